//! Block nodes and the closed set of block kinds.
//!
//! `BlockKind` is a tagged union over every kind this wiki understands, with
//! an `Unknown` pass-through arm so documents written by a newer editor still
//! load and render (children only) instead of failing. Kind-specific
//! properties live on the variant; the stored JSON shape is
//! `{"id", "type", "props", "content", "children"}`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use smol_str::SmolStr;

use crate::inline::InlineSpan;

/// Severity/flavor of an alert block.
///
/// Unknown stored values decode to `Info`, so rendering never has to deal
/// with an out-of-domain alert type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlertType {
    Heresy,
    Danger,
    #[default]
    Info,
    Imperial,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Heresy => "heresy",
            Self::Danger => "danger",
            Self::Info => "info",
            Self::Imperial => "imperial",
        }
    }

    /// Parse a stored `alertType` value, falling back to `Info`.
    pub fn from_prop(value: &str) -> Self {
        match value {
            "heresy" => Self::Heresy,
            "danger" => Self::Danger,
            "info" => Self::Info,
            "imperial" => Self::Imperial,
            other => {
                tracing::debug!(alert_type = other, "unknown alertType, using info");
                Self::Info
            }
        }
    }
}

/// Icon shown in a lore block's header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoreIcon {
    #[default]
    Book,
    Scroll,
}

impl LoreIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Book => "book",
            Self::Scroll => "scroll",
        }
    }

    pub fn from_prop(value: &str) -> Self {
        match value {
            "scroll" => Self::Scroll,
            "book" => Self::Book,
            other => {
                tracing::debug!(icon = other, "unknown lore icon, using book");
                Self::Book
            }
        }
    }
}

/// The kind of a block, with its kind-specific properties.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Paragraph,
    /// Stored level is kept verbatim; renderers clamp out-of-range levels.
    Heading {
        level: u8,
    },
    BulletListItem,
    NumberedListItem,
    CodeBlock {
        language: SmolStr,
    },
    Image {
        url: SmolStr,
        caption: SmolStr,
    },
    /// Colored call-out with a glyph and optional title; body is the block's
    /// inline content.
    Alert {
        alert_type: AlertType,
        title: SmolStr,
    },
    /// Titled sidebar container; body is the block's children.
    Lore {
        title: SmolStr,
        icon: LoreIcon,
    },
    /// Leaf quotation. The quoted text lives here, not in inline content.
    Quote {
        text: String,
        author: String,
        source: String,
    },
    /// Any kind this editor does not recognize. Props are preserved verbatim
    /// so the document round-trips losslessly.
    Unknown {
        kind: SmolStr,
        props: Map<String, Value>,
    },
}

impl BlockKind {
    /// Alert with the documented defaults (`info`, empty title).
    pub fn alert(alert_type: AlertType) -> Self {
        Self::Alert {
            alert_type,
            title: SmolStr::default(),
        }
    }

    /// Lore block with the documented defaults.
    pub fn lore() -> Self {
        Self::Lore {
            title: SmolStr::new("Lore"),
            icon: LoreIcon::Book,
        }
    }

    /// Quote block with all-empty attribution.
    pub fn quote() -> Self {
        Self::Quote {
            text: String::new(),
            author: String::new(),
            source: String::new(),
        }
    }

    /// The stored `type` tag for this kind.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading { .. } => "heading",
            Self::BulletListItem => "bulletListItem",
            Self::NumberedListItem => "numberedListItem",
            Self::CodeBlock { .. } => "codeBlock",
            Self::Image { .. } => "image",
            Self::Alert { .. } => "alert",
            Self::Lore { .. } => "lore",
            Self::Quote { .. } => "quote",
            Self::Unknown { kind, .. } => kind,
        }
    }

    /// Whether this kind carries visible inline content.
    pub fn has_inline_content(&self) -> bool {
        matches!(
            self,
            Self::Paragraph
                | Self::Heading { .. }
                | Self::BulletListItem
                | Self::NumberedListItem
                | Self::CodeBlock { .. }
                | Self::Alert { .. }
        )
    }

    fn props(&self) -> Map<String, Value> {
        let mut props = Map::new();
        match self {
            Self::Paragraph | Self::BulletListItem | Self::NumberedListItem => {}
            Self::Heading { level } => {
                props.insert("level".into(), Value::from(*level));
            }
            Self::CodeBlock { language } => {
                props.insert("language".into(), Value::from(language.as_str()));
            }
            Self::Image { url, caption } => {
                props.insert("url".into(), Value::from(url.as_str()));
                props.insert("caption".into(), Value::from(caption.as_str()));
            }
            Self::Alert { alert_type, title } => {
                props.insert("alertType".into(), Value::from(alert_type.as_str()));
                props.insert("title".into(), Value::from(title.as_str()));
            }
            Self::Lore { title, icon } => {
                props.insert("title".into(), Value::from(title.as_str()));
                props.insert("icon".into(), Value::from(icon.as_str()));
            }
            Self::Quote {
                text,
                author,
                source,
            } => {
                props.insert("text".into(), Value::from(text.as_str()));
                props.insert("author".into(), Value::from(author.as_str()));
                props.insert("source".into(), Value::from(source.as_str()));
            }
            Self::Unknown { props: raw, .. } => return raw.clone(),
        }
        props
    }

    /// Decode a stored `type`/`props` pair. Consumed props move into the
    /// variant; whatever is left over comes back so the block can carry it
    /// verbatim. An unrecognized kind keeps all its props on the variant.
    fn from_raw(kind: &str, mut props: Map<String, Value>) -> (Self, Map<String, Value>) {
        let kind = match kind {
            "paragraph" => Self::Paragraph,
            "heading" => Self::Heading {
                level: take_int(&mut props, "level", 1).clamp(0, u8::MAX as i64) as u8,
            },
            "bulletListItem" => Self::BulletListItem,
            "numberedListItem" => Self::NumberedListItem,
            "codeBlock" => Self::CodeBlock {
                language: take_str(&mut props, "language", ""),
            },
            "image" => Self::Image {
                url: take_str(&mut props, "url", ""),
                caption: take_str(&mut props, "caption", ""),
            },
            "alert" => Self::Alert {
                alert_type: AlertType::from_prop(&take_str(&mut props, "alertType", "info")),
                title: take_str(&mut props, "title", ""),
            },
            "lore" => Self::Lore {
                title: take_str(&mut props, "title", "Lore"),
                icon: LoreIcon::from_prop(&take_str(&mut props, "icon", "book")),
            },
            "quote" => Self::Quote {
                text: take_string(&mut props, "text"),
                author: take_string(&mut props, "author"),
                source: take_string(&mut props, "source"),
            },
            other => {
                return (
                    Self::Unknown {
                        kind: SmolStr::new(other),
                        props,
                    },
                    Map::new(),
                );
            }
        };
        (kind, props)
    }
}

fn take_str(props: &mut Map<String, Value>, key: &str, default: &str) -> SmolStr {
    match props.remove(key).as_ref().and_then(Value::as_str) {
        Some(s) => SmolStr::new(s),
        None => SmolStr::new(default),
    }
}

fn take_string(props: &mut Map<String, Value>, key: &str) -> String {
    props
        .remove(key)
        .as_ref()
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn take_int(props: &mut Map<String, Value>, key: &str, default: i64) -> i64 {
    props.remove(key).and_then(|v| v.as_i64()).unwrap_or(default)
}

/// One node in the wiki content tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Opaque id, unique within the document.
    pub id: SmolStr,
    pub kind: BlockKind,
    /// Inline content, for kinds that carry text.
    pub content: Vec<InlineSpan>,
    /// Nested blocks (list nesting, lore bodies).
    pub children: Vec<Block>,
    /// Stored props this editor does not model for the block's kind, kept
    /// verbatim so a richer editor's documents round-trip losslessly.
    pub extra_props: Map<String, Value>,
}

impl Block {
    pub fn new(id: impl Into<SmolStr>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            kind,
            content: Vec::new(),
            children: Vec::new(),
            extra_props: Map::new(),
        }
    }

    pub fn with_content(mut self, content: Vec<InlineSpan>) -> Self {
        self.content = content;
        self
    }

    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.children = children;
        self
    }

    /// An empty paragraph, the placeholder the slash menu replaces. A
    /// paragraph carrying foreign props is not a placeholder; replacing it
    /// would drop them.
    pub fn is_empty_paragraph(&self) -> bool {
        matches!(self.kind, BlockKind::Paragraph)
            && self.children.is_empty()
            && self.extra_props.is_empty()
            && self.content.iter().all(InlineSpan::is_empty_text)
    }
}

#[derive(Serialize, Deserialize)]
struct RawBlock {
    #[serde(default)]
    id: SmolStr,
    #[serde(rename = "type")]
    kind: SmolStr,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    props: Map<String, Value>,
    #[serde(default)]
    content: Vec<InlineSpan>,
    #[serde(default)]
    children: Vec<Block>,
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut props = self.kind.props();
        props.extend(
            self.extra_props
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        RawBlock {
            id: self.id.clone(),
            kind: SmolStr::new(self.kind.type_name()),
            props,
            content: self.content.clone(),
            children: self.children.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawBlock::deserialize(deserializer)?;
        let (kind, extra_props) = BlockKind::from_raw(&raw.kind, raw.props);
        Ok(Block {
            id: raw.id,
            kind,
            content: raw.content,
            children: raw.children,
            extra_props,
        })
    }
}
