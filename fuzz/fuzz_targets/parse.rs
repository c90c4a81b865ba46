#![no_main]

use libfuzzer_sys::fuzz_target;

// The parser's contract is "always produce a tree": any UTF-8 input must
// yield a single root element named html, without panicking.
fuzz_target!(|data: &str| {
    let dom = html::parse(data);
    assert!(!dom.is_empty());
    match dom.get(dom.root()) {
        Some(html::Node::Element { name, parent, .. }) => {
            assert_eq!(name, "html");
            assert_eq!(*parent, None);
        }
        other => panic!("root must be an html element, got: {other:?}"),
    }
});
