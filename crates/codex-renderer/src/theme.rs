//! Visual theme values threaded through rendering.
//!
//! Inline styles only carry what the block model needs (accents, highlight
//! and code colors); everything else is site CSS keyed off the emitted
//! classes. Serde-derived so a site config file can override any of it.

use codex_blocks::{AlertType, LoreIcon};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub colors: ColorScheme,
    pub fonts: FontScheme,
    pub spacing: SpacingScheme,
    pub alerts: AlertStyles,
    pub icons: IconSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorScheme {
    pub background: SmolStr,
    pub foreground: SmolStr,
    pub link: SmolStr,
    pub link_hover: SmolStr,
    pub highlight: SmolStr,
    pub code_fg: SmolStr,
    pub code_bg: SmolStr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontScheme {
    pub body: SmolStr,
    pub heading: SmolStr,
    pub monospace: SmolStr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingScheme {
    pub base_font_size: SmolStr,
    pub line_height: SmolStr,
    pub scale: SmolStr,
}

/// Accent color and glyph for one alert flavor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertStyle {
    pub accent: SmolStr,
    pub glyph: SmolStr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertStyles {
    pub heresy: AlertStyle,
    pub danger: AlertStyle,
    pub info: AlertStyle,
    pub imperial: AlertStyle,
}

impl AlertStyles {
    pub fn for_type(&self, alert_type: AlertType) -> &AlertStyle {
        match alert_type {
            AlertType::Heresy => &self.heresy,
            AlertType::Danger => &self.danger,
            AlertType::Info => &self.info,
            AlertType::Imperial => &self.imperial,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IconSet {
    pub book: SmolStr,
    pub scroll: SmolStr,
}

impl IconSet {
    pub fn for_lore(&self, icon: LoreIcon) -> &SmolStr {
        match icon {
            LoreIcon::Book => &self.book,
            LoreIcon::Scroll => &self.scroll,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            colors: ColorScheme::default(),
            fonts: FontScheme::default(),
            spacing: SpacingScheme::default(),
            alerts: AlertStyles::default(),
            icons: IconSet::default(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: SmolStr::new("#1a1714"),
            foreground: SmolStr::new("#e8e0d0"),
            link: SmolStr::new("#c9a227"),
            link_hover: SmolStr::new("#e0bc4f"),
            highlight: SmolStr::new("#5b4a1f"),
            code_fg: SmolStr::new("#d4b106"),
            code_bg: SmolStr::new("#26221c"),
        }
    }
}

impl Default for FontScheme {
    fn default() -> Self {
        Self {
            body: SmolStr::new("'Crimson Text', Georgia, 'Times New Roman', serif"),
            heading: SmolStr::new("'Cinzel', 'Trajan Pro', Georgia, serif"),
            monospace: SmolStr::new(
                "'IBM Plex Mono', 'Cascadia Code', 'Roboto Mono', Consolas, monospace",
            ),
        }
    }
}

impl Default for SpacingScheme {
    fn default() -> Self {
        Self {
            base_font_size: SmolStr::new("16px"),
            line_height: SmolStr::new("1.6"),
            scale: SmolStr::new("1.25"),
        }
    }
}

impl Default for AlertStyles {
    fn default() -> Self {
        Self {
            heresy: AlertStyle {
                accent: SmolStr::new("#7f1d1d"),
                glyph: SmolStr::new("☠"),
            },
            danger: AlertStyle {
                accent: SmolStr::new("#b45309"),
                glyph: SmolStr::new("⚠"),
            },
            info: AlertStyle {
                accent: SmolStr::new("#1d4ed8"),
                glyph: SmolStr::new("ℹ"),
            },
            imperial: AlertStyle {
                accent: SmolStr::new("#a16207"),
                glyph: SmolStr::new("⚜"),
            },
        }
    }
}

impl Default for IconSet {
    fn default() -> Self {
        Self {
            book: SmolStr::new("📖"),
            scroll: SmolStr::new("📜"),
        }
    }
}
