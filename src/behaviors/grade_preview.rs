//! Live letter-grade preview under the marks input.

use std::fmt;
use std::sync::LazyLock;

use fancy_regex::Regex;

use super::on_dom_content_loaded;
use crate::{NodeId, Page, Result};

/// Letter grades, declared lowest first so that `Ord` follows the grade
/// ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    F,
    D,
    C,
    B,
    A,
    APlus,
}

impl Grade {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::F => "F",
            Self::D => "D",
            Self::C => "C",
            Self::B => "B",
            Self::A => "A",
            Self::APlus => "A+",
        }
    }

    /// Suffix of the badge's `grade-*` class: the label with `+` spelled out.
    pub fn css_slug(self) -> String {
        self.as_str().replacen('+', "plus", 1)
    }

    /// Badge markup rendered into the preview element.
    pub fn preview_html(self) -> String {
        format!(
            "<strong>Grade Preview:</strong> <span class=\"grade-badge grade-{}\">{}</span>",
            self.css_slug(),
            self.as_str()
        )
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const THRESHOLDS: [(f64, Grade); 6] = [
    (90.0, Grade::APlus),
    (80.0, Grade::A),
    (70.0, Grade::B),
    (60.0, Grade::C),
    (50.0, Grade::D),
    (0.0, Grade::F),
];

/// Maps marks to a grade. Negative marks and NaN have no grade; there is no
/// upper bound and no rounding.
pub fn classify(marks: f64) -> Option<Grade> {
    THRESHOLDS
        .iter()
        .find(|(min, _)| marks >= *min)
        .map(|(_, grade)| *grade)
}

static NUMERIC_PREFIX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)").ok()
});

/// `parseFloat` semantics: leading whitespace is skipped, the longest
/// numeric prefix is parsed and trailing garbage ignored. `None` where
/// `parseFloat` would return `NaN`.
pub fn parse_float(src: &str) -> Option<f64> {
    let src = src.trim_start_matches(is_js_whitespace);
    let regex = NUMERIC_PREFIX.as_ref()?;
    let matched = regex.find(src).ok()??;
    matched.as_str().parse::<f64>().ok()
}

fn is_js_whitespace(ch: char) -> bool {
    ch.is_whitespace() || ch == '\u{feff}'
}

pub fn install(page: &mut Page) {
    on_dom_content_loaded(page, "grade-preview", |page| {
        bind_marks_input(page)?;
        Ok(())
    });
}

/// Creates the preview element next to the first marks input and re-renders
/// it on every `input` event. Returns `(input, preview)`.
pub fn bind_marks_input(page: &mut Page) -> Result<Option<(NodeId, NodeId)>> {
    let config = page.shared_config();
    let Some(input) = page.query_selector(&config.marks_input_selector)? else {
        return Ok(None);
    };
    let Some(parent) = page.parent(input) else {
        return Ok(None);
    };

    let preview = page.create_element("div");
    page.set_attribute(preview, "class", "grade-preview")?;
    page.set_style(preview, "margin-top", "10px")?;
    page.append_child(parent, preview)?;

    page.add_event_listener(input, "input", move |page, _| {
        render_preview(page, input, preview)?;
        Ok(())
    });
    Ok(Some((input, preview)))
}

/// Classifies the input's current value and renders the badge, or clears
/// the preview when there is no grade.
pub fn render_preview(page: &mut Page, input: NodeId, preview: NodeId) -> Result<Option<Grade>> {
    let value = page.value(input)?;
    let grade = parse_float(&value).and_then(classify);
    let html = grade.map(Grade::preview_html).unwrap_or_default();
    page.set_inner_html(preview, &html)?;
    tracing::trace!(value = %value, grade = grade.map(Grade::as_str), "grade preview");
    Ok(grade)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive_lower_bounds() {
        assert_eq!(classify(90.0), Some(Grade::APlus));
        assert_eq!(classify(89.999), Some(Grade::A));
        assert_eq!(classify(80.0), Some(Grade::A));
        assert_eq!(classify(70.0), Some(Grade::B));
        assert_eq!(classify(60.0), Some(Grade::C));
        assert_eq!(classify(50.0), Some(Grade::D));
        assert_eq!(classify(49.5), Some(Grade::F));
        assert_eq!(classify(0.0), Some(Grade::F));
        assert_eq!(classify(-0.0), Some(Grade::F));
        assert_eq!(classify(-0.1), None);
        assert_eq!(classify(f64::NAN), None);
        assert_eq!(classify(250.0), Some(Grade::APlus));
        assert_eq!(classify(f64::INFINITY), Some(Grade::APlus));
    }

    #[test]
    fn parse_float_reads_the_numeric_prefix() {
        assert_eq!(parse_float("3.5px"), Some(3.5));
        assert_eq!(parse_float("  -2.5e2x"), Some(-250.0));
        assert_eq!(parse_float("85"), Some(85.0));
        assert_eq!(parse_float(".5"), Some(0.5));
        assert_eq!(parse_float("7."), Some(7.0));
        assert_eq!(parse_float("1e"), Some(1.0));
        assert_eq!(parse_float("+Infinityx"), Some(f64::INFINITY));
        assert_eq!(parse_float("abc"), None);
        assert_eq!(parse_float(""), None);
        assert_eq!(parse_float("."), None);
        assert_eq!(parse_float("-"), None);
    }

    #[test]
    fn slug_spells_out_plus() {
        assert_eq!(Grade::APlus.css_slug(), "Aplus");
        assert_eq!(Grade::B.css_slug(), "B");
        assert_eq!(Grade::APlus.to_string(), "A+");
    }
}
