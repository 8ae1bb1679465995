//! The slash-command catalog.
//!
//! Typing the trigger character opens a palette over these commands. The
//! catalog order is the presentation order: default block kinds first, then
//! the wiki's custom kinds. Filtering is a stable case-insensitive substring
//! match over titles and aliases - matches keep their catalog order, no
//! re-ranking.

use smol_str::SmolStr;

use codex_blocks::{AlertType, Block, BlockKind, IdGen};

/// Character that opens the command palette.
pub const TRIGGER_CHAR: char = '/';

/// What a command inserts: a block kind with its documented defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTemplate {
    Paragraph,
    Heading { level: u8 },
    BulletListItem,
    NumberedListItem,
    CodeBlock,
    Image,
    Lore,
    Quote,
    Alert { alert_type: AlertType },
}

impl BlockTemplate {
    /// Build a fresh block with default properties and a new id.
    pub fn instantiate(&self, ids: &mut IdGen) -> Block {
        let kind = match self {
            Self::Paragraph => BlockKind::Paragraph,
            Self::Heading { level } => BlockKind::Heading { level: *level },
            Self::BulletListItem => BlockKind::BulletListItem,
            Self::NumberedListItem => BlockKind::NumberedListItem,
            Self::CodeBlock => BlockKind::CodeBlock {
                language: SmolStr::default(),
            },
            Self::Image => BlockKind::Image {
                url: SmolStr::default(),
                caption: SmolStr::default(),
            },
            Self::Lore => BlockKind::lore(),
            Self::Quote => BlockKind::quote(),
            Self::Alert { alert_type } => BlockKind::alert(*alert_type),
        };
        Block::new(ids.next_id(), kind)
    }
}

/// One insertable-block command.
#[derive(Debug, Clone)]
pub struct SlashCommand {
    pub title: SmolStr,
    pub description: SmolStr,
    /// Visual grouping label only; carries no semantics.
    pub group: SmolStr,
    pub aliases: &'static [&'static str],
    pub template: BlockTemplate,
}

impl SlashCommand {
    fn new(
        title: &str,
        description: &str,
        group: &str,
        aliases: &'static [&'static str],
        template: BlockTemplate,
    ) -> Self {
        Self {
            title: SmolStr::new(title),
            description: SmolStr::new(description),
            group: SmolStr::new(group),
            aliases,
            template,
        }
    }

    /// Case-insensitive substring match over title and aliases.
    pub fn matches(&self, query_lower: &str) -> bool {
        self.title.to_lowercase().contains(query_lower)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_lowercase().contains(query_lower))
    }
}

/// The full catalog, in presentation order.
pub fn command_catalog() -> Vec<SlashCommand> {
    vec![
        SlashCommand::new(
            "Paragraph",
            "Plain body text",
            "Basic",
            &["p", "text", "plain"],
            BlockTemplate::Paragraph,
        ),
        SlashCommand::new(
            "Heading 1",
            "Top-level section heading",
            "Basic",
            &["h1", "title"],
            BlockTemplate::Heading { level: 1 },
        ),
        SlashCommand::new(
            "Heading 2",
            "Section heading",
            "Basic",
            &["h2", "subtitle"],
            BlockTemplate::Heading { level: 2 },
        ),
        SlashCommand::new(
            "Heading 3",
            "Subsection heading",
            "Basic",
            &["h3"],
            BlockTemplate::Heading { level: 3 },
        ),
        SlashCommand::new(
            "Bullet List",
            "Unordered list item",
            "Basic",
            &["ul", "unordered", "list"],
            BlockTemplate::BulletListItem,
        ),
        SlashCommand::new(
            "Numbered List",
            "Ordered list item",
            "Basic",
            &["ol", "ordered"],
            BlockTemplate::NumberedListItem,
        ),
        SlashCommand::new(
            "Code Block",
            "Preformatted monospace block",
            "Basic",
            &["code", "fence", "pre"],
            BlockTemplate::CodeBlock,
        ),
        SlashCommand::new(
            "Image",
            "Upload and embed an image",
            "Media",
            &["img", "picture", "figure"],
            BlockTemplate::Image,
        ),
        SlashCommand::new(
            "Lore Block",
            "Titled lore sidebar with nested content",
            "Codex",
            &["lore", "fluff", "sidebar"],
            BlockTemplate::Lore,
        ),
        SlashCommand::new(
            "Quote Block",
            "Quotation with attribution",
            "Codex",
            &["quote", "citation", "blockquote"],
            BlockTemplate::Quote,
        ),
        SlashCommand::new(
            "Alert: Heresy",
            "Red call-out for forbidden knowledge",
            "Codex",
            &["alert", "heresy", "warning"],
            BlockTemplate::Alert {
                alert_type: AlertType::Heresy,
            },
        ),
        SlashCommand::new(
            "Alert: Danger",
            "Orange call-out for hazards",
            "Codex",
            &["alert", "danger", "caution"],
            BlockTemplate::Alert {
                alert_type: AlertType::Danger,
            },
        ),
        SlashCommand::new(
            "Alert: Info",
            "Blue call-out for asides",
            "Codex",
            &["alert", "info", "note"],
            BlockTemplate::Alert {
                alert_type: AlertType::Info,
            },
        ),
        SlashCommand::new(
            "Alert: Imperial",
            "Gold call-out for official decrees",
            "Codex",
            &["alert", "imperial", "decree"],
            BlockTemplate::Alert {
                alert_type: AlertType::Imperial,
            },
        ),
    ]
}

/// Filter the catalog by a palette query.
///
/// Empty query returns everything; otherwise matches keep their relative
/// catalog order.
pub fn filter_commands<'a>(catalog: &'a [SlashCommand], query: &str) -> Vec<&'a SlashCommand> {
    if query.is_empty() {
        return catalog.iter().collect();
    }
    let query_lower = query.to_lowercase();
    catalog
        .iter()
        .filter(|cmd| cmd.matches(&query_lower))
        .collect()
}
