// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_logseq_page(sections: usize, depth: usize) -> String {
    let mut content = String::from("title:: Benchmark\ntags:: bench, generated\n\n");

    for section in 0..sections {
        content.push_str(&format!("- Section {section} with a [[Link]]\n"));
        content.push_str("  id:: 64b7f0a1-1c2d-4e5f-8a9b-0c1d2e3f4a5b\n");
        for level in 1..=depth {
            let tabs = "\t".repeat(level);
            content.push_str(&format!("{tabs}- Item at level {level}\n"));
            content.push_str(&format!("{tabs}  collapsed:: true\n"));
            content.push_str(&format!(
                "{tabs}  Continuation text that wraps onto a second line.\n"
            ));
        }
        content.push('\n');
    }

    content
}
