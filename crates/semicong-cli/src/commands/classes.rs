use crate::support::{
    congruence_or_exit, format_words, load_presentation_or_exit, or_exit, print_json,
    semigroup_or_exit,
};
use semicong_kernel::{FiniteSemigroup, Word};
use serde_json::json;

pub fn run(file: String, json_output: bool) {
    let presentation = load_presentation_or_exit(&file);
    let parent = semigroup_or_exit(&presentation);
    let mut cong = congruence_or_exit(&presentation, &parent);

    let nr_classes = or_exit(cong.nr_classes());
    let classes: Vec<Vec<Word>> = or_exit(cong.non_trivial_classes()).cloned().collect();

    if json_output {
        print_json(&json!({
            "presentation": file,
            "digest": presentation.digest(),
            "kind": presentation.kind,
            "parent_size": parent.size(),
            "generating_pairs": cong.nr_generating_pairs(),
            "nr_classes": nr_classes.finite(),
            "non_trivial_classes": classes,
        }));
    } else {
        println!("semicong classes {file}");
        println!("  Digest: {}", presentation.digest());
        println!("  Kind: {}", presentation.kind);
        println!("  Parent size: {}", parent.size());
        println!("  Generating pairs: {}", cong.nr_generating_pairs());
        println!("  Classes: {nr_classes}");
        println!("  Non-trivial classes: {}", classes.len());
        for (i, class) in classes.iter().enumerate() {
            println!("    {i}: {}", format_words(class));
        }
    }
}
