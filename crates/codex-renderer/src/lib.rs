//! codex-renderer: pure HTML rendering for wiki block trees.
//!
//! `render_html(doc, theme)` turns a `WikiDocument` into markup. Rendering
//! is total: unknown block kinds degrade to their children, out-of-domain
//! property values fall back to documented defaults, and the only error
//! surface is the destination writer's.

pub mod html;
pub mod theme;

pub use html::{push_html, render_html, write_html_fmt, write_html_io};
pub use theme::{AlertStyle, AlertStyles, ColorScheme, FontScheme, IconSet, SpacingScheme, Theme};

#[cfg(test)]
mod tests;
