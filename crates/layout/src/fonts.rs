//! Font resolution and text measurement.
//!
//! [`FontBackend`] is the seam to the platform text shaper; everything else
//! in layout talks to fonts through a [`FontResolver`], which memoizes
//! spec-to-handle resolution for the lifetime of one layout pass.

use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Roman,
    Italic,
}

/// What layout asks for: integer point size plus weight and slant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontSpec {
    pub size: i32,
    pub weight: FontWeight,
    pub style: FontStyle,
}

/// A resolved font, stable for the lifetime of the resolver that produced
/// it. The paint surface maps this back to a platform font when drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FontHandle {
    pub spec: FontSpec,
}

/// Vertical metrics for one measured run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub leading: f32,
}

impl LineMetrics {
    pub fn height(self) -> f32 {
        self.ascent + self.descent
    }
}

/// The shaping backend could not produce a usable handle. This is the one
/// condition layout surfaces as a hard error; callers should substitute a
/// default font and retry rather than abort the render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontError {
    Unavailable { spec: FontSpec },
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontError::Unavailable { spec } => {
                write!(
                    f,
                    "no font available for size {} ({:?}, {:?})",
                    spec.size, spec.weight, spec.style
                )
            }
        }
    }
}

impl std::error::Error for FontError {}

/// Seam to the external text-shaping service. Measurements must be
/// deterministic for a fixed (text, font) pair within one process run;
/// exact values are backend-dependent.
pub trait FontBackend {
    fn resolve(&self, spec: FontSpec) -> Result<FontHandle, FontError>;
    fn measure(&self, text: &str, font: FontHandle) -> f32;
    fn metrics(&self, text: &str, font: FontHandle) -> LineMetrics;
}

/// Memoizing front door to a [`FontBackend`]. One instance per layout pass;
/// the map is mutex-guarded so parallel layouts may share a resolver. The
/// key space is tiny, so contention stays low.
pub struct FontResolver<'a> {
    backend: &'a dyn FontBackend,
    cache: Mutex<HashMap<FontSpec, FontHandle>>,
}

impl<'a> FontResolver<'a> {
    pub fn new(backend: &'a dyn FontBackend) -> Self {
        Self {
            backend,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn resolve(&self, spec: FontSpec) -> Result<FontHandle, FontError> {
        let mut cache = match self.cache.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(&handle) = cache.get(&spec) {
            return Ok(handle);
        }
        let handle = self.backend.resolve(spec)?;
        cache.insert(spec, handle);
        Ok(handle)
    }

    pub fn measure(&self, text: &str, font: FontHandle) -> f32 {
        self.backend.measure(text, font)
    }

    pub fn metrics(&self, text: &str, font: FontHandle) -> LineMetrics {
        self.backend.metrics(text, font)
    }
}

/// Deterministic metrics-approximating backend, used when no platform shaper
/// is wired up (and by tests). Widths advance half an em per character; the
/// em box splits 0.8/0.2 into ascent and descent, a typical proportion for
/// latin text faces.
pub struct ApproxFontBackend;

impl FontBackend for ApproxFontBackend {
    fn resolve(&self, spec: FontSpec) -> Result<FontHandle, FontError> {
        if spec.size <= 0 {
            return Err(FontError::Unavailable { spec });
        }
        Ok(FontHandle { spec })
    }

    fn measure(&self, text: &str, font: FontHandle) -> f32 {
        text.chars().count() as f32 * font.spec.size as f32 * 0.5
    }

    fn metrics(&self, _text: &str, font: FontHandle) -> LineMetrics {
        let em = font.spec.size as f32;
        LineMetrics {
            ascent: em * 0.8,
            descent: em * 0.2,
            leading: em * 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingBackend {
        resolves: AtomicUsize,
    }

    impl CountingBackend {
        fn new() -> Self {
            Self {
                resolves: AtomicUsize::new(0),
            }
        }
    }

    impl FontBackend for CountingBackend {
        fn resolve(&self, spec: FontSpec) -> Result<FontHandle, FontError> {
            self.resolves.fetch_add(1, Ordering::Relaxed);
            Ok(FontHandle { spec })
        }

        fn measure(&self, text: &str, _font: FontHandle) -> f32 {
            text.chars().count() as f32 * 10.0
        }

        fn metrics(&self, _text: &str, _font: FontHandle) -> LineMetrics {
            LineMetrics {
                ascent: 8.0,
                descent: 2.0,
                leading: 2.0,
            }
        }
    }

    fn spec(size: i32) -> FontSpec {
        FontSpec {
            size,
            weight: FontWeight::Normal,
            style: FontStyle::Roman,
        }
    }

    #[test]
    fn resolver_memoizes_per_spec() {
        let backend = CountingBackend::new();
        let resolver = FontResolver::new(&backend);

        let first = resolver.resolve(spec(12)).expect("resolve");
        let second = resolver.resolve(spec(12)).expect("resolve");
        assert_eq!(first, second);
        assert_eq!(backend.resolves.load(Ordering::Relaxed), 1);

        resolver.resolve(spec(14)).expect("resolve");
        assert_eq!(backend.resolves.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn approx_widths_grow_with_text_length() {
        let backend = ApproxFontBackend;
        let font = backend.resolve(spec(12)).expect("resolve");
        let short = backend.measure("ab", font);
        let long = backend.measure("abcd", font);
        assert!(long > short, "expected {long} > {short}");
    }

    #[test]
    fn approx_ascent_grows_with_size() {
        let backend = ApproxFontBackend;
        let small = backend.resolve(spec(10)).expect("resolve");
        let big = backend.resolve(spec(20)).expect("resolve");
        let m_small = backend.metrics("x", small);
        let m_big = backend.metrics("x", big);
        assert!(m_big.ascent > m_small.ascent);
        assert!(m_big.height() > m_small.height());
    }

    #[test]
    fn approx_rejects_degenerate_sizes() {
        let backend = ApproxFontBackend;
        assert_eq!(
            backend.resolve(spec(0)),
            Err(FontError::Unavailable { spec: spec(0) })
        );
        assert!(backend.resolve(spec(-2)).is_err());
    }
}
