#![no_main]

use layout::{ApproxFontBackend, LayoutConfig, layout_document};
use libfuzzer_sys::fuzz_target;

// Layout over arbitrary trees may fail cleanly (the approximate backend
// refuses degenerate font sizes) but must never panic.
fuzz_target!(|data: &str| {
    let dom = html::parse(data);
    let _ = layout_document(&dom, LayoutConfig::html_defaults(), &ApproxFontBackend);
});
