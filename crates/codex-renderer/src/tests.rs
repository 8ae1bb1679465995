//! Rendering tests: kind dispatch, mark nesting, fallbacks, and the
//! tolerance guarantees (unknown kinds, out-of-domain props).

use codex_blocks::{AlertType, Block, BlockKind, InlineSpan, Mark, Styles, WikiDocument};
use serde_json::json;

use crate::html::render_html;
use crate::theme::Theme;

fn render(blocks: Vec<Block>) -> String {
    render_html(&WikiDocument { blocks }, &Theme::default())
}

fn para(id: &str, text: &str) -> Block {
    Block::new(id, BlockKind::Paragraph).with_content(vec![InlineSpan::text(text)])
}

#[test]
fn test_empty_document_renders_empty() {
    assert_eq!(render(vec![]), "");
}

#[test]
fn test_paragraph_and_escaping() {
    let html = render(vec![para("b-0", "x < y & <script>")]);
    assert_eq!(html, "<p>x &lt; y &amp; &lt;script&gt;</p>\n");
}

#[test]
fn test_heading_levels_and_clamp() {
    let heading = |level| {
        Block::new("b-0", BlockKind::Heading { level })
            .with_content(vec![InlineSpan::text("The Siege of Terra")])
    };

    assert_eq!(
        render(vec![heading(2)]),
        "<h2>The Siege of Terra</h2>\n"
    );
    // Out-of-range levels degrade to the h3 presentation.
    assert_eq!(render(vec![heading(0)]), "<h3>The Siege of Terra</h3>\n");
    assert_eq!(render(vec![heading(9)]), "<h3>The Siege of Terra</h3>\n");
}

#[test]
fn test_mark_nesting_is_deterministic() {
    let styles = Styles::PLAIN.with(Mark::Italic).with(Mark::Bold);
    let block = Block::new("b-0", BlockKind::Paragraph)
        .with_content(vec![InlineSpan::styled("Blood", styles)]);

    let html = render(vec![block.clone()]);
    assert_eq!(html, "<p><strong><em>Blood</em></strong></p>\n");
    // Repeated renders of the same input are identical.
    assert_eq!(render(vec![block]), html);
}

#[test]
fn test_mark_order_ignores_stored_styles_order() {
    // Two spans whose styles maps list the marks in opposite orders must
    // still nest the same way.
    let a: InlineSpan =
        serde_json::from_value(json!({ "type": "text", "text": "x",
                                       "styles": { "bold": true, "italic": true } }))
        .unwrap();
    let b: InlineSpan =
        serde_json::from_value(json!({ "type": "text", "text": "x",
                                       "styles": { "italic": true, "bold": true } }))
        .unwrap();

    let render_span = |span| {
        render(vec![Block::new("b-0", BlockKind::Paragraph).with_content(vec![span])])
    };
    assert_eq!(render_span(a), render_span(b));
}

#[test]
fn test_code_and_highlight_take_theme_colors() {
    let block = Block::new("b-0", BlockKind::Paragraph).with_content(vec![
        InlineSpan::styled("bolter", Styles::PLAIN.with(Mark::Code)),
        InlineSpan::text(" "),
        InlineSpan::styled("drum", Styles::PLAIN.with(Mark::Highlight)),
    ]);

    insta::assert_snapshot!(
        render(vec![block]).trim_end(),
        @r##"<p><code class="wiki-code" style="color: #d4b106; background-color: #26221c">bolter</code> <mark style="background-color: #5b4a1f">drum</mark></p>"##
    );
}

#[test]
fn test_internal_and_external_links() {
    let block = Block::new("b-0", BlockKind::Paragraph).with_content(vec![
        InlineSpan::link("/wiki/angron", "Angron"),
        InlineSpan::link("https://example.com/rules", "the rules"),
    ]);

    let html = render(vec![block]);
    assert_eq!(
        html,
        concat!(
            "<p>",
            "<a class=\"wiki-link\" href=\"/wiki/angron\">Angron</a>",
            "<a class=\"wiki-link external\" href=\"https://example.com/rules\" ",
            "target=\"_blank\" rel=\"noopener noreferrer\">the rules</a>",
            "</p>\n"
        )
    );
}

#[test]
fn test_colon_in_page_title_is_not_external() {
    let block = Block::new("b-0", BlockKind::Paragraph).with_content(vec![
        InlineSpan::link("Kharn:Betrayer", "Kharn"),
        InlineSpan::link("mailto:scribe@example.com", "the scribe"),
    ]);

    let html = render(vec![block]);
    assert_eq!(
        html,
        concat!(
            "<p>",
            "<a class=\"wiki-link\" href=\"Kharn:Betrayer\">Kharn</a>",
            "<a class=\"wiki-link external\" href=\"mailto:scribe@example.com\" ",
            "target=\"_blank\" rel=\"noopener noreferrer\">the scribe</a>",
            "</p>\n"
        )
    );
}

#[test]
fn test_hard_break() {
    let block = Block::new("b-0", BlockKind::Paragraph).with_content(vec![
        InlineSpan::text("first"),
        InlineSpan::HardBreak,
        InlineSpan::text("second"),
    ]);
    assert_eq!(render(vec![block]), "<p>first<br />second</p>\n");
}

#[test]
fn test_consecutive_list_items_group() {
    let html = render(vec![
        Block::new("b-0", BlockKind::BulletListItem).with_content(vec![InlineSpan::text("A")]),
        Block::new("b-1", BlockKind::BulletListItem).with_content(vec![InlineSpan::text("B")]),
        para("b-2", "between"),
        Block::new("b-3", BlockKind::NumberedListItem).with_content(vec![InlineSpan::text("C")]),
    ]);

    assert_eq!(
        html,
        "<ul>\n<li>A</li>\n<li>B</li>\n</ul>\n<p>between</p>\n<ol>\n<li>C</li>\n</ol>\n"
    );
}

#[test]
fn test_nested_list_items() {
    let html = render(vec![
        Block::new("b-0", BlockKind::BulletListItem)
            .with_content(vec![InlineSpan::text("parent")])
            .with_children(vec![
                Block::new("b-1", BlockKind::BulletListItem)
                    .with_content(vec![InlineSpan::text("child")]),
            ]),
    ]);

    assert_eq!(
        html,
        "<ul>\n<li>parent\n<ul>\n<li>child</li>\n</ul>\n</li>\n</ul>\n"
    );
}

#[test]
fn test_code_block() {
    let block = Block::new("b-0", BlockKind::CodeBlock { language: "rust".into() })
        .with_content(vec![InlineSpan::text("fn main() {}")]);
    assert_eq!(
        render(vec![block]),
        "<pre><code class=\"language-rust\">fn main() {}</code></pre>\n"
    );

    let plain = Block::new("b-1", BlockKind::CodeBlock { language: "".into() })
        .with_content(vec![InlineSpan::text("ave imperator")]);
    assert_eq!(render(vec![plain]), "<pre><code>ave imperator</code></pre>\n");
}

#[test]
fn test_image_with_and_without_caption() {
    let captioned = Block::new(
        "b-0",
        BlockKind::Image {
            url: "https://img.example/t.png".into(),
            caption: "A titan".into(),
        },
    );
    assert_eq!(
        render(vec![captioned]),
        "<figure class=\"wiki-image\"><img src=\"https://img.example/t.png\" alt=\"A titan\" />\
         <figcaption>A titan</figcaption></figure>\n"
    );

    let bare = Block::new(
        "b-1",
        BlockKind::Image {
            url: "https://img.example/t.png".into(),
            caption: "".into(),
        },
    );
    assert_eq!(
        render(vec![bare]),
        "<figure class=\"wiki-image\"><img src=\"https://img.example/t.png\" alt=\"\" /></figure>\n"
    );

    // Placeholder images (no url yet) render nothing.
    let placeholder = Block::new(
        "b-2",
        BlockKind::Image {
            url: "".into(),
            caption: "pending".into(),
        },
    );
    assert_eq!(render(vec![placeholder]), "");
}

#[test]
fn test_alert_renders_palette_and_title() {
    let block = Block::new(
        "b-0",
        BlockKind::Alert {
            alert_type: AlertType::Heresy,
            title: "The warp overtakes you".into(),
        },
    )
    .with_content(vec![InlineSpan::text("Burn the heretic.")]);

    insta::assert_snapshot!(
        render(vec![block]).trim_end(),
        @r##"<aside class="wiki-alert wiki-alert-heresy" style="border-color: #7f1d1d"><span class="wiki-alert-glyph">☠</span><div class="wiki-alert-body"><p class="wiki-alert-title">The warp overtakes you</p><p>Burn the heretic.</p></div></aside>"##
    );
}

#[test]
fn test_unknown_alert_type_falls_back_to_info() {
    let block: Block = serde_json::from_value(json!({
        "id": "b-0",
        "type": "alert",
        "props": { "alertType": "exterminatus", "title": "" },
        "content": [{ "type": "text", "text": "body" }]
    }))
    .unwrap();

    let html = render(vec![block]);
    assert!(html.contains("wiki-alert-info"));
    assert!(html.contains("border-color: #1d4ed8"));
    assert!(html.contains("ℹ"));
    assert!(html.contains("<p>body</p>"));
}

#[test]
fn test_lore_renders_header_once_then_children_in_order() {
    let block = Block::new("b-0", BlockKind::lore())
        .with_children(vec![para("b-1", "first passage"), para("b-2", "second passage")]);

    let html = render(vec![block]);
    assert_eq!(
        html,
        "<section class=\"wiki-lore\"><header class=\"wiki-lore-header\">\
         <span class=\"wiki-lore-icon\">📖</span>\
         <span class=\"wiki-lore-title\">Lore</span></header>\n\
         <p>first passage</p>\n<p>second passage</p>\n</section>\n"
    );
    assert_eq!(html.matches("wiki-lore-header").count(), 1);
}

#[test]
fn test_quote_with_author_and_empty_source() {
    let block = Block::new(
        "b-0",
        BlockKind::Quote {
            text: "Sangre para el Dios de la Sangre.".into(),
            author: "Kharn".into(),
            source: "".into(),
        },
    );

    let html = render(vec![block]);
    assert_eq!(
        html,
        "<figure class=\"wiki-quote\"><blockquote>Sangre para el Dios de la Sangre.</blockquote>\
         <figcaption>— Kharn</figcaption></figure>\n"
    );
    // no separator, no placeholder for the empty source
    assert!(!html.contains(","));
    assert!(!html.contains("<cite>"));
}

#[test]
fn test_quote_attribution_variants() {
    let quote = |author: &str, source: &str| {
        render(vec![Block::new(
            "b-0",
            BlockKind::Quote {
                text: "No pity. No remorse. No fear.".into(),
                author: author.into(),
                source: source.into(),
            },
        )])
    };

    assert!(quote("", "").ends_with("</blockquote></figure>\n"));
    assert!(quote("Kharn", "Betrayer").contains("— Kharn, <cite>Betrayer</cite>"));
    assert!(quote("", "Betrayer").contains("<figcaption>— <cite>Betrayer</cite></figcaption>"));
}

#[test]
fn test_quote_ignores_inline_content() {
    let block = Block::new(
        "b-0",
        BlockKind::Quote {
            text: "the real words".into(),
            author: "".into(),
            source: "".into(),
        },
    )
    .with_content(vec![InlineSpan::text("stray inline content")]);

    let html = render(vec![block]);
    assert!(html.contains("the real words"));
    assert!(!html.contains("stray inline content"));
}

#[test]
fn test_unknown_kind_renders_children_only() {
    let block: Block = serde_json::from_value(json!({
        "id": "b-0",
        "type": "starMap",
        "props": { "sector": "Ultima" },
        "children": [
            { "id": "b-1", "type": "paragraph",
              "content": [{ "type": "text", "text": "visible child" }] }
        ]
    }))
    .unwrap();

    assert_eq!(render(vec![block]), "<p>visible child</p>\n");

    let leaf: Block =
        serde_json::from_value(json!({ "id": "b-2", "type": "starMap" })).unwrap();
    assert_eq!(render(vec![leaf]), "");
}

#[test]
fn test_every_known_kind_renders_without_panicking() {
    let blocks = vec![
        para("b-0", "p"),
        Block::new("b-1", BlockKind::Heading { level: 1 })
            .with_content(vec![InlineSpan::text("h")]),
        Block::new("b-2", BlockKind::BulletListItem).with_content(vec![InlineSpan::text("u")]),
        Block::new("b-3", BlockKind::NumberedListItem).with_content(vec![InlineSpan::text("o")]),
        Block::new("b-4", BlockKind::CodeBlock { language: "".into() })
            .with_content(vec![InlineSpan::text("c")]),
        Block::new("b-5", BlockKind::Image { url: "u".into(), caption: "".into() }),
        Block::new("b-6", BlockKind::alert(AlertType::Imperial))
            .with_content(vec![InlineSpan::text("a")]),
        Block::new("b-7", BlockKind::lore()).with_children(vec![para("b-8", "l")]),
        Block::new(
            "b-9",
            BlockKind::Quote { text: "q".into(), author: "".into(), source: "".into() },
        ),
    ];

    let html = render(blocks);
    for needle in ["<p>p</p>", "<h1>h</h1>", "<li>u</li>", "<li>o</li>", "<code>c</code>"] {
        assert!(html.contains(needle), "missing {needle} in {html}");
    }
}
