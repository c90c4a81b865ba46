//! End-to-end pipeline checks: markup string in, display list out.

use pretty_assertions::assert_eq;

use weft::{ApproxFontBackend, LayoutConfig};

#[test]
fn bare_text_is_fully_wrapped() {
    let dom = weft::parse("hello");
    assert_eq!(
        html::debug::outline(&dom, 100),
        vec![
            "<html>".to_string(),
            "  <body>".to_string(),
            "    \"hello\"".to_string(),
        ]
    );
}

#[test]
fn head_and_body_content_are_routed() {
    let dom = weft::parse("<title>T</title><p>P</p>");
    assert_eq!(
        html::debug::outline(&dom, 100),
        vec![
            "<html>".to_string(),
            "  <head>".to_string(),
            "    <title>".to_string(),
            "      \"T\"".to_string(),
            "  <body>".to_string(),
            "    <p>".to_string(),
            "      \"P\"".to_string(),
        ]
    );
}

#[test]
fn reparse_produces_identical_outlines() {
    let markup = r#"<!doctype html>
<title>Page</title>
<p class="intro">Some <b>bold</b> text &amp; more.</p>
<img src=logo.png>
<p>Unclosed paragraph
"#;
    let first = html::debug::outline(&weft::parse(markup), 500);
    let second = html::debug::outline(&weft::parse(markup), 500);
    assert_eq!(first, second);
}

#[test]
fn render_produces_positioned_runs() {
    let runs = weft::render(
        "<p>hello <b>world</b></p>",
        LayoutConfig::html_defaults(),
        &ApproxFontBackend,
    )
    .expect("render");

    let texts: Vec<&str> = runs.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, ["hello", "world"]);
    assert_eq!(runs[0].x, 13.0);
    assert!(runs[1].x > runs[0].x);
    assert_eq!(runs[0].y, runs[1].y, "one line, one baseline");
    assert_eq!(runs[1].font.spec.weight, weft::FontWeight::Bold);
}

#[test]
fn render_never_fails_on_malformed_markup() {
    let inputs = [
        "",
        "<",
        ">",
        "<><><>",
        "</b></b></b>",
        "<p <p <p",
        "<b>unclosed",
        "a > b < c",
    ];
    for markup in inputs {
        let result = weft::render(markup, LayoutConfig::html_defaults(), &ApproxFontBackend);
        assert!(result.is_ok(), "render failed for {markup:?}: {result:?}");
    }
}
