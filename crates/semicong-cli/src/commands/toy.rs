use crate::support::print_json;
use semicong_kernel::{FiniteSemigroup, toy};
use serde_json::json;

pub fn run(name: String, json_output: bool) {
    let semigroup = toy::get_semigroup(&name).unwrap_or_else(|| {
        eprintln!(
            "error: unknown toy semigroup {name:?}, expected one of {}",
            toy::NAMES.join(", ")
        );
        std::process::exit(1);
    });
    let degree = semigroup.generators().first().map_or(0, |g| g.degree());
    let generators: Vec<&[u32]> = semigroup.generators().iter().map(|g| g.images()).collect();

    if json_output {
        print_json(&json!({
            "name": name,
            "size": semigroup.size(),
            "nr_generators": semigroup.nr_generators(),
            "degree": degree,
            "generators": generators,
        }));
    } else {
        println!("semicong toy {name}");
        println!("  Size: {}", semigroup.size());
        println!("  Generators: {}", semigroup.nr_generators());
        println!("  Degree: {degree}");
        for (letter, images) in generators.iter().enumerate() {
            println!("    {letter}: {images:?}");
        }
    }
}
