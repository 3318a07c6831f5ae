use crate::support::{
    congruence_or_exit, load_presentation_or_exit, or_exit, parse_word_or_exit, print_json,
    semigroup_or_exit,
};
use semicong_kernel::format_word;
use serde_json::json;

pub fn run(file: String, u: String, v: String, json_output: bool) {
    let presentation = load_presentation_or_exit(&file);
    let parent = semigroup_or_exit(&presentation);
    let mut cong = congruence_or_exit(&presentation, &parent);

    let u = parse_word_or_exit(&u);
    let v = parse_word_or_exit(&v);
    let u_class = or_exit(cong.word_to_class_index(&u));
    let v_class = or_exit(cong.word_to_class_index(&v));
    let related = or_exit(cong.contains(&u, &v));

    if json_output {
        print_json(&json!({
            "presentation": file,
            "digest": presentation.digest(),
            "kind": presentation.kind,
            "u": u,
            "v": v,
            "u_class": u_class,
            "v_class": v_class,
            "contains": related,
        }));
    } else {
        println!("semicong contains {file}");
        println!("  Kind: {}", presentation.kind);
        println!("  {} is in class {u_class}", format_word(&u));
        println!("  {} is in class {v_class}", format_word(&v));
        println!("  Related: {}", if related { "yes" } else { "no" });
    }
}
