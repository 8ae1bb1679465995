//! Block tree to HTML.
//!
//! Pure transformation: `WikiDocument × Theme → markup`. Total over any
//! structurally valid tree - unknown kinds render their children only,
//! out-of-range heading levels clamp to 3, and nothing here can fail except
//! the underlying writer.
//!
//! Mark nesting is fixed and deterministic: bold, italic, underline, strike,
//! code, highlight, outermost first (see `codex_blocks::Mark`).

use std::collections::VecDeque;

use pulldown_cmark_escape::{
    FmtWriter, IoWriter, StrWrite, escape_href, escape_html, escape_html_body_text,
};

use codex_blocks::{Block, BlockKind, InlineSpan, Mark, Styles, WikiDocument};

use crate::theme::Theme;

struct HtmlWriter<'a, W> {
    writer: W,
    theme: &'a Theme,
}

impl<'a, W: StrWrite> HtmlWriter<'a, W> {
    fn new(writer: W, theme: &'a Theme) -> Self {
        Self { writer, theme }
    }

    #[inline]
    fn write(&mut self, s: &str) -> Result<(), W::Error> {
        self.writer.write_str(s)
    }

    fn run(mut self, doc: &WikiDocument) -> Result<(), W::Error> {
        self.write_blocks(&doc.blocks)
    }

    /// Write a sibling run, grouping consecutive list items of the same kind
    /// into one `<ul>`/`<ol>`.
    fn write_blocks(&mut self, blocks: &[Block]) -> Result<(), W::Error> {
        let mut rest = blocks;
        while let Some(block) = rest.first() {
            match block.kind {
                BlockKind::BulletListItem => {
                    let run = list_run(rest, |k| matches!(k, BlockKind::BulletListItem));
                    self.write("<ul>\n")?;
                    for item in &rest[..run] {
                        self.write_list_item(item)?;
                    }
                    self.write("</ul>\n")?;
                    rest = &rest[run..];
                }
                BlockKind::NumberedListItem => {
                    let run = list_run(rest, |k| matches!(k, BlockKind::NumberedListItem));
                    self.write("<ol>\n")?;
                    for item in &rest[..run] {
                        self.write_list_item(item)?;
                    }
                    self.write("</ol>\n")?;
                    rest = &rest[run..];
                }
                _ => {
                    self.write_block(block)?;
                    rest = &rest[1..];
                }
            }
        }
        Ok(())
    }

    fn write_list_item(&mut self, block: &Block) -> Result<(), W::Error> {
        self.write("<li>")?;
        self.write_inline(&block.content)?;
        if !block.children.is_empty() {
            self.write("\n")?;
            self.write_blocks(&block.children)?;
        }
        self.write("</li>\n")
    }

    fn write_block(&mut self, block: &Block) -> Result<(), W::Error> {
        match &block.kind {
            BlockKind::Paragraph => {
                self.write("<p>")?;
                self.write_inline(&block.content)?;
                self.write("</p>\n")?;
            }
            BlockKind::Heading { level } => {
                // Anything outside 1..=6 degrades to the h3 presentation.
                let level = if (1..=6).contains(level) { *level } else { 3 };
                write!(&mut self.writer, "<h{}>", level)?;
                self.write_inline(&block.content)?;
                write!(&mut self.writer, "</h{}>\n", level)?;
            }
            // Lone list items outside a write_blocks run still render.
            BlockKind::BulletListItem => {
                self.write("<ul>\n")?;
                self.write_list_item(block)?;
                self.write("</ul>\n")?;
            }
            BlockKind::NumberedListItem => {
                self.write("<ol>\n")?;
                self.write_list_item(block)?;
                self.write("</ol>\n")?;
            }
            BlockKind::CodeBlock { language } => {
                if language.is_empty() {
                    self.write("<pre><code>")?;
                } else {
                    self.write("<pre><code class=\"language-")?;
                    escape_html(&mut self.writer, language)?;
                    self.write("\">")?;
                }
                for span in &block.content {
                    escape_html_body_text(&mut self.writer, &span.plain_text())?;
                }
                self.write("</code></pre>\n")?;
            }
            BlockKind::Image { url, caption } => {
                // A placeholder image (upload not completed) renders nothing.
                if url.is_empty() {
                    return Ok(());
                }
                self.write("<figure class=\"wiki-image\"><img src=\"")?;
                escape_href(&mut self.writer, url)?;
                self.write("\" alt=\"")?;
                escape_html(&mut self.writer, caption)?;
                self.write("\" />")?;
                if !caption.is_empty() {
                    self.write("<figcaption>")?;
                    escape_html_body_text(&mut self.writer, caption)?;
                    self.write("</figcaption>")?;
                }
                self.write("</figure>\n")?;
            }
            BlockKind::Alert { alert_type, title } => {
                let style = self.theme.alerts.for_type(*alert_type);
                self.write("<aside class=\"wiki-alert wiki-alert-")?;
                self.write(alert_type.as_str())?;
                self.write("\" style=\"border-color: ")?;
                escape_html(&mut self.writer, &style.accent)?;
                self.write("\"><span class=\"wiki-alert-glyph\">")?;
                escape_html_body_text(&mut self.writer, &style.glyph)?;
                self.write("</span><div class=\"wiki-alert-body\">")?;
                if !title.is_empty() {
                    self.write("<p class=\"wiki-alert-title\">")?;
                    escape_html_body_text(&mut self.writer, title)?;
                    self.write("</p>")?;
                }
                self.write("<p>")?;
                self.write_inline(&block.content)?;
                self.write("</p>")?;
                if !block.children.is_empty() {
                    self.write("\n")?;
                    self.write_blocks(&block.children)?;
                }
                self.write("</div></aside>\n")?;
            }
            BlockKind::Lore { title, icon } => {
                self.write("<section class=\"wiki-lore\"><header class=\"wiki-lore-header\">")?;
                self.write("<span class=\"wiki-lore-icon\">")?;
                escape_html_body_text(&mut self.writer, self.theme.icons.for_lore(*icon))?;
                self.write("</span><span class=\"wiki-lore-title\">")?;
                escape_html_body_text(&mut self.writer, title)?;
                self.write("</span></header>\n")?;
                self.write_blocks(&block.children)?;
                self.write("</section>\n")?;
            }
            BlockKind::Quote {
                text,
                author,
                source,
            } => {
                // The quoted text lives in props; inline content is ignored.
                self.write("<figure class=\"wiki-quote\"><blockquote>")?;
                escape_html_body_text(&mut self.writer, text)?;
                self.write("</blockquote>")?;
                if !author.is_empty() || !source.is_empty() {
                    self.write("<figcaption>— ")?;
                    if !author.is_empty() {
                        escape_html_body_text(&mut self.writer, author)?;
                    }
                    if !author.is_empty() && !source.is_empty() {
                        self.write(", ")?;
                    }
                    if !source.is_empty() {
                        self.write("<cite>")?;
                        escape_html_body_text(&mut self.writer, source)?;
                        self.write("</cite>")?;
                    }
                    self.write("</figcaption>")?;
                }
                self.write("</figure>\n")?;
            }
            BlockKind::Unknown { kind, .. } => {
                // Forward compatibility: render children only.
                tracing::debug!(kind = %kind, "unknown block kind, rendering children");
                self.write_blocks(&block.children)?;
            }
        }
        Ok(())
    }

    fn write_inline(&mut self, spans: &[InlineSpan]) -> Result<(), W::Error> {
        for span in spans {
            self.write_span(span)?;
        }
        Ok(())
    }

    fn write_span(&mut self, span: &InlineSpan) -> Result<(), W::Error> {
        match span {
            InlineSpan::Text { text, styles } => self.write_marked_text(text, styles),
            InlineSpan::Link { href, content } => {
                if is_external(href) {
                    self.write("<a class=\"wiki-link external\" href=\"")?;
                    escape_href(&mut self.writer, href)?;
                    self.write("\" target=\"_blank\" rel=\"noopener noreferrer\">")?;
                } else {
                    self.write("<a class=\"wiki-link\" href=\"")?;
                    escape_href(&mut self.writer, href)?;
                    self.write("\">")?;
                }
                self.write_inline(content)?;
                self.write("</a>")
            }
            InlineSpan::HardBreak => self.write("<br />"),
        }
    }

    /// Apply marks around one text run, in the fixed order `Styles::marks`
    /// yields them. Open tags go out in order, close tags in reverse, so
    /// nesting is balanced and identical on every render of the same span.
    fn write_marked_text(&mut self, text: &str, styles: &Styles) -> Result<(), W::Error> {
        let mut open: VecDeque<Mark> = VecDeque::new();
        for mark in styles.marks() {
            self.open_mark(mark)?;
            open.push_front(mark);
        }
        escape_html_body_text(&mut self.writer, text)?;
        for mark in open {
            self.close_mark(mark)?;
        }
        Ok(())
    }

    fn open_mark(&mut self, mark: Mark) -> Result<(), W::Error> {
        match mark {
            Mark::Bold => self.write("<strong>"),
            Mark::Italic => self.write("<em>"),
            Mark::Underline => self.write("<u>"),
            Mark::Strike => self.write("<del>"),
            Mark::Code => {
                self.write("<code class=\"wiki-code\" style=\"color: ")?;
                escape_html(&mut self.writer, &self.theme.colors.code_fg)?;
                self.write("; background-color: ")?;
                escape_html(&mut self.writer, &self.theme.colors.code_bg)?;
                self.write("\">")
            }
            Mark::Highlight => {
                self.write("<mark style=\"background-color: ")?;
                escape_html(&mut self.writer, &self.theme.colors.highlight)?;
                self.write("\">")
            }
        }
    }

    fn close_mark(&mut self, mark: Mark) -> Result<(), W::Error> {
        match mark {
            Mark::Bold => self.write("</strong>"),
            Mark::Italic => self.write("</em>"),
            Mark::Underline => self.write("</u>"),
            Mark::Strike => self.write("</del>"),
            Mark::Code => self.write("</code>"),
            Mark::Highlight => self.write("</mark>"),
        }
    }
}

fn list_run(blocks: &[Block], same: impl Fn(&BlockKind) -> bool) -> usize {
    blocks.iter().take_while(|b| same(&b.kind)).count()
}

/// Hrefs with a web scheme open in a new tab. Anything else, including
/// colon-bearing page titles like `Kharn:Betrayer`, is an internal wiki
/// reference.
fn is_external(href: &str) -> bool {
    url::Url::parse(href)
        .map(|url| matches!(url.scheme(), "http" | "https" | "mailto"))
        .unwrap_or(false)
}

/// Render a document to a fresh string.
pub fn render_html(doc: &WikiDocument, theme: &Theme) -> String {
    let mut output = String::new();
    push_html(&mut output, doc, theme);
    output
}

/// Render a document, appending to `s`.
pub fn push_html(s: &mut String, doc: &WikiDocument, theme: &Theme) {
    write_html_fmt(s, doc, theme).unwrap()
}

/// Render to any `fmt::Write`.
pub fn write_html_fmt<W>(writer: W, doc: &WikiDocument, theme: &Theme) -> core::fmt::Result
where
    W: core::fmt::Write,
{
    HtmlWriter::new(FmtWriter(writer), theme).run(doc)
}

/// Render to any `io::Write`.
pub fn write_html_io<W>(writer: W, doc: &WikiDocument, theme: &Theme) -> std::io::Result<()>
where
    W: std::io::Write,
{
    HtmlWriter::new(IoWriter(writer), theme).run(doc)
}
