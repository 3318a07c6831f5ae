use crate::support::{
    congruence_or_exit, load_presentation_or_exit, or_exit, print_json, semigroup_or_exit,
};
use semicong_kernel::{FiniteSemigroup, Word, format_word};
use serde_json::json;

pub fn run(file: String, json_output: bool) {
    let presentation = load_presentation_or_exit(&file);
    let parent = semigroup_or_exit(&presentation);
    let mut cong = congruence_or_exit(&presentation, &parent);

    let quotient = or_exit(cong.quotient_semigroup());
    let size = quotient.size();
    let nr_generators = quotient.nr_generators();
    let elements: Vec<Word> = (0..size).map(|pos| quotient.factorisation(pos)).collect();

    if json_output {
        print_json(&json!({
            "presentation": file,
            "digest": presentation.digest(),
            "parent_size": parent.size(),
            "size": size,
            "nr_generators": nr_generators,
            "elements": elements,
        }));
    } else {
        println!("semicong quotient {file}");
        println!("  Parent size: {}", parent.size());
        println!("  Quotient size: {size}");
        for (pos, word) in elements.iter().enumerate() {
            println!("    {pos}: {}", format_word(word));
        }
    }
}
