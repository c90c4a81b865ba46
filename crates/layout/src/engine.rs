//! Greedy line layout over a parsed document.
//!
//! The engine walks the tree depth-first, splits text runs into words on
//! ASCII spaces, and packs words into lines bounded by the viewport width.
//! Completed lines are flushed onto a shared baseline and appended to the
//! display list; tags toggle the style cursor on the way down and restore it
//! on the way back up.

use std::fmt;

use html::{Dom, Id, Node};

use crate::fonts::{FontBackend, FontError, FontHandle, FontResolver, FontSpec, FontStyle, FontWeight};

/// Viewport and typography constants. Constructor-time configuration; the
/// defaults match the classic 800px page with 13px side margins and an 18px
/// line pitch.
#[derive(Clone, Copy, Debug)]
pub struct LayoutConfig {
    pub width: f32,
    pub hstep: f32,
    pub vstep: f32,
    pub base_size: i32,
}

impl LayoutConfig {
    pub fn html_defaults() -> Self {
        Self {
            width: 800.0,
            hstep: 13.0,
            vstep: 18.0,
            base_size: 12,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::html_defaults()
    }
}

/// One positioned word: immutable once appended to the display list. `y` is
/// the word's top edge in top-down viewport coordinates; words sharing a
/// line sit on a common baseline, not a common top.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutRun {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub font: FontHandle,
}

#[derive(Debug)]
pub enum LayoutError {
    Font(FontError),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Font(err) => write!(f, "font resolution failed: {err}"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LayoutError::Font(err) => Some(err),
        }
    }
}

impl From<FontError> for LayoutError {
    fn from(err: FontError) -> Self {
        LayoutError::Font(err)
    }
}

/// Lay out a document into an ordered display list. Fresh engine state per
/// call; the only failure mode is the font backend refusing a spec.
pub fn layout_document(
    dom: &Dom,
    config: LayoutConfig,
    backend: &dyn FontBackend,
) -> Result<Vec<LayoutRun>, LayoutError> {
    let mut engine = LineLayout::new(config, FontResolver::new(backend));
    engine.recurse(dom, dom.root())?;
    engine.flush();
    Ok(engine.display_list)
}

#[derive(Clone, Copy)]
struct StyleState {
    weight: FontWeight,
    style: FontStyle,
    size: i32,
}

struct PendingWord {
    x: f32,
    text: String,
    font: FontHandle,
}

struct LineLayout<'a> {
    config: LayoutConfig,
    fonts: FontResolver<'a>,
    display_list: Vec<LayoutRun>,
    line: Vec<PendingWord>,
    cursor_x: f32,
    cursor_y: f32,
    weight: FontWeight,
    style: FontStyle,
    size: i32,
    /// Style snapshots, one pushed per open element. A stack rather than
    /// paired toggles: nested `<b><b>x</b></b>` stays bold until the
    /// outermost close.
    saved: Vec<StyleState>,
}

impl<'a> LineLayout<'a> {
    fn new(config: LayoutConfig, fonts: FontResolver<'a>) -> Self {
        Self {
            cursor_x: config.hstep,
            cursor_y: config.vstep,
            weight: FontWeight::Normal,
            style: FontStyle::Roman,
            size: config.base_size,
            config,
            fonts,
            display_list: Vec::new(),
            line: Vec::new(),
            saved: Vec::new(),
        }
    }

    fn recurse(&mut self, dom: &Dom, id: Id) -> Result<(), LayoutError> {
        match dom.get(id) {
            Some(Node::Text { text, .. }) => {
                for word in text.split(' ').filter(|w| !w.is_empty()) {
                    self.word(word)?;
                }
            }
            Some(Node::Element { name, .. }) => {
                self.open_tag(name);
                for &child in dom.children(id) {
                    self.recurse(dom, child)?;
                }
                self.close_tag(name);
            }
            None => {}
        }
        Ok(())
    }

    fn open_tag(&mut self, name: &str) {
        self.saved.push(StyleState {
            weight: self.weight,
            style: self.style,
            size: self.size,
        });
        match name {
            "i" => self.style = FontStyle::Italic,
            "b" => self.weight = FontWeight::Bold,
            "small" => self.size -= 2,
            "big" => self.size += 2,
            "br" => self.flush(),
            _ => {}
        }
    }

    fn close_tag(&mut self, name: &str) {
        if let Some(prev) = self.saved.pop() {
            self.weight = prev.weight;
            self.style = prev.style;
            self.size = prev.size;
        }
        if name == "p" {
            self.flush();
            self.cursor_y += self.config.vstep;
        }
    }

    /// Place one word, breaking the line first if it would overflow the
    /// right margin. Greedy: no hyphenation, no mid-word breaks, and a word
    /// wider than the whole viewport still lands at the left margin.
    fn word(&mut self, word: &str) -> Result<(), LayoutError> {
        let font = self.fonts.resolve(FontSpec {
            size: self.size,
            weight: self.weight,
            style: self.style,
        })?;
        let width = self.fonts.measure(word, font);
        if self.cursor_x + width > self.config.width - self.config.hstep {
            self.flush();
        }
        self.line.push(PendingWord {
            x: self.cursor_x,
            text: word.to_string(),
            font,
        });
        self.cursor_x += width + self.fonts.measure(" ", font);
        Ok(())
    }

    /// Finalize the pending line: pick the deepest ascent as the shared
    /// baseline, place every word relative to it, and advance the vertical
    /// cursor with 25% leading above and below.
    fn flush(&mut self) {
        if self.line.is_empty() {
            return;
        }

        let metrics: Vec<_> = self
            .line
            .iter()
            .map(|word| self.fonts.metrics(&word.text, word.font))
            .collect();
        let max_ascent = metrics.iter().map(|m| m.ascent).fold(0.0f32, f32::max);
        let max_descent = metrics.iter().map(|m| m.descent).fold(0.0f32, f32::max);

        let baseline = self.cursor_y + 1.25 * max_ascent;
        log::trace!(
            target: "layout.engine",
            "flush: {} words, baseline {baseline}",
            self.line.len()
        );

        for (word, metric) in self.line.drain(..).zip(metrics) {
            self.display_list.push(LayoutRun {
                x: word.x,
                y: baseline - metric.ascent,
                text: word.text,
                font: word.font,
            });
        }

        self.cursor_y = baseline + 1.25 * max_descent;
        self.cursor_x = self.config.hstep;
    }
}
