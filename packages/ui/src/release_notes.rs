//! Markdown rendering for version release notes.

use dioxus::prelude::*;
use pulldown_cmark::{Event, Options, Parser};

fn parser_options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_TASKLISTS);
    opts
}

/// Render release notes to HTML. Raw HTML in the source is emitted as escaped
/// text.
pub fn render_release_notes(source: &str) -> String {
    let parser = Parser::new_ext(source, parser_options()).map(|event| match event {
        Event::Html(html) | Event::InlineHtml(html) => Event::Text(html),
        other => other,
    });
    let mut html_out = String::new();
    pulldown_cmark::html::push_html(&mut html_out, parser);
    html_out
}

#[component]
pub fn ReleaseNotes(source: String) -> Element {
    if source.trim().is_empty() {
        return rsx! {
            p { class: "release-notes empty", "No release notes." }
        };
    }
    let html = render_release_notes(&source);
    rsx! {
        div { class: "release-notes", dangerous_inner_html: "{html}" }
    }
}
