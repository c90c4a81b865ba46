//! Demo shell: read markup from a file argument (or stdin), dump the parsed
//! tree outline, then the laid-out display list. Fetching and painting live
//! elsewhere; this binary exists to exercise the pipeline end to end.

use std::io::Read;
use std::process::ExitCode;

use mimalloc::MiMalloc;

use weft::{ApproxFontBackend, FontStyle, FontWeight, LayoutConfig};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const OUTLINE_CAP: usize = 200;

fn read_input() -> std::io::Result<String> {
    match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut markup = String::new();
            std::io::stdin().read_to_string(&mut markup)?;
            Ok(markup)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let markup = match read_input() {
        Ok(markup) => markup,
        Err(err) => {
            eprintln!("weft: failed to read input: {err}");
            return ExitCode::FAILURE;
        }
    };

    let dom = weft::parse(&markup);
    for line in html::debug::outline(&dom, OUTLINE_CAP) {
        println!("{line}");
    }

    let runs = match weft::layout_document(&dom, LayoutConfig::html_defaults(), &ApproxFontBackend)
    {
        Ok(runs) => runs,
        Err(err) => {
            eprintln!("weft: layout failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("-- {} runs --", runs.len());
    for run in &runs {
        let weight = match run.font.spec.weight {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        };
        let style = match run.font.spec.style {
            FontStyle::Roman => "roman",
            FontStyle::Italic => "italic",
        };
        println!(
            "{:>8.1} {:>8.1}  {:>2}pt {weight}/{style}  {}",
            run.x, run.y, run.font.spec.size, run.text
        );
    }

    ExitCode::SUCCESS
}
