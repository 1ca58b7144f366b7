#![no_main]

use libfuzzer_sys::fuzz_target;
use scripture_index::index::{Page, Pages};
use scripture_index::utils::Language;

fuzz_target!(|data: &str| {
    let _ = data.parse::<Page>();

    // A rendered page list must read back as the same set
    if let Ok(pages) = data.parse::<Pages>() {
        let rendered = pages.render(Language::English);
        if let Ok(again) = rendered.parse::<Pages>() {
            assert_eq!(pages.sorted(), again.sorted());
        }
    }
});
