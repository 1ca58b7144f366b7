#![no_main]

use libfuzzer_sys::fuzz_target;
use scripture_index::bible::parse_references;
use scripture_index::utils::Language;

fuzz_target!(|data: &str| {
    // Any text must parse into references that key and render
    let list = parse_references(data);
    for reference in list.expanded() {
        let _ = reference.sort_key();
        let _ = reference.entry_text(Language::Arabic);
        let _ = reference.to_string();
    }
});
