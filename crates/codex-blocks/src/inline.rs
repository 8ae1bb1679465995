//! Inline content: styled text runs, links, and hard breaks.
//!
//! An `InlineSpan` is one run inside a text-bearing block. The JSON shape is
//! the stored editor format: `{"type":"text","text":...,"styles":{...}}`,
//! `{"type":"link","href":...,"content":[...]}` or `{"type":"hardBreak"}`.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A named inline mark.
///
/// The order of this enum is the fixed mark-application order used by
/// renderers: earlier marks wrap later ones (bold is outermost, highlight
/// innermost). Deriving the order from the type rather than from the stored
/// styles map keeps nesting deterministic across round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Strike,
    Code,
    Highlight,
}

/// The set of marks on one text span.
///
/// Serialized as a `{"<mark>": true}` map; inactive marks are omitted.
/// Unknown mark names in stored documents are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Styles {
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub strike: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub code: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub highlight: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Styles {
    /// No marks at all.
    pub const PLAIN: Self = Self {
        bold: false,
        italic: false,
        underline: false,
        strike: false,
        code: false,
        highlight: false,
    };

    pub fn is_plain(&self) -> bool {
        *self == Self::PLAIN
    }

    /// Active marks in application order (outermost first).
    pub fn marks(&self) -> impl Iterator<Item = Mark> + '_ {
        [
            (self.bold, Mark::Bold),
            (self.italic, Mark::Italic),
            (self.underline, Mark::Underline),
            (self.strike, Mark::Strike),
            (self.code, Mark::Code),
            (self.highlight, Mark::Highlight),
        ]
        .into_iter()
        .filter_map(|(on, mark)| on.then_some(mark))
    }

    pub fn with(mut self, mark: Mark) -> Self {
        match mark {
            Mark::Bold => self.bold = true,
            Mark::Italic => self.italic = true,
            Mark::Underline => self.underline = true,
            Mark::Strike => self.strike = true,
            Mark::Code => self.code = true,
            Mark::Highlight => self.highlight = true,
        }
        self
    }
}

/// One run of inline content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InlineSpan {
    /// Plain text carrying zero or more marks.
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Styles::is_plain")]
        styles: Styles,
    },
    /// A link wrapping nested inline content.
    Link {
        href: SmolStr,
        #[serde(default)]
        content: Vec<InlineSpan>,
    },
    /// A hard line break within a block.
    HardBreak,
}

impl InlineSpan {
    /// Unstyled text span.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            styles: Styles::PLAIN,
        }
    }

    /// Text span with the given marks.
    pub fn styled(text: impl Into<String>, styles: Styles) -> Self {
        Self::Text {
            text: text.into(),
            styles,
        }
    }

    /// Link span around plain text.
    pub fn link(href: impl Into<SmolStr>, text: impl Into<String>) -> Self {
        Self::Link {
            href: href.into(),
            content: vec![Self::text(text)],
        }
    }

    /// The raw text of this span and everything nested in it.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Text { text, .. } => text.clone(),
            Self::Link { content, .. } => content.iter().map(InlineSpan::plain_text).collect(),
            Self::HardBreak => "\n".to_string(),
        }
    }

    /// Whether this span contributes no visible text.
    pub fn is_empty_text(&self) -> bool {
        match self {
            Self::Text { text, .. } => text.is_empty(),
            Self::Link { content, .. } => content.iter().all(InlineSpan::is_empty_text),
            Self::HardBreak => false,
        }
    }
}
