use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

const PARAGRAPH_CLASS: &str = "mb-4 font-sans text-lg content-line";
const ITEM_CLASS: &str = "font-sans text-lg content-line";
const MEDIA_CLASS: &str = "rounded-lg my-8 w-full";

static RENDERER: LazyLock<MarkdownRenderer> = LazyLock::new(MarkdownRenderer::new);

/// Renders card bodies: highlighted code blocks plus the site's per-element classes.
pub struct MarkdownRenderer {
    syntaxset: SyntaxSet,
    themeset: ThemeSet,
}

impl MarkdownRenderer {
    pub fn new() -> MarkdownRenderer {
        MarkdownRenderer {
            syntaxset: SyntaxSet::load_defaults_newlines(),
            themeset: ThemeSet::load_defaults(),
        }
    }

    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, Options::all());
        let events = style_overrides(self.highlight(parser));
        let mut html_output = String::new();
        pulldown_cmark::html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Replaces fenced code blocks with syntect's highlighted HTML.
    ///
    /// Based on <https://gitlab.com/eguiraud/highlight-pulldown>.
    fn highlight<'a, It>(&self, events: It) -> Vec<Event<'a>>
    where
        It: Iterator<Item = Event<'a>>,
    {
        let theme = &self.themeset.themes["InspiredGitHub"];
        let mut syntax = self.syntaxset.find_syntax_plain_text();
        let mut in_code_block = false;
        let mut to_highlight = String::new();
        let mut out_events = Vec::new();

        for event in events {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    syntax = match kind {
                        CodeBlockKind::Fenced(lang) => self
                            .syntaxset
                            .find_syntax_by_token(&lang)
                            .unwrap_or_else(|| self.syntaxset.find_syntax_plain_text()),
                        CodeBlockKind::Indented => self.syntaxset.find_syntax_plain_text(),
                    };
                    in_code_block = true;
                }
                Event::End(TagEnd::CodeBlock) if in_code_block => {
                    match highlighted_html_for_string(&to_highlight, &self.syntaxset, syntax, theme)
                    {
                        Ok(html) => out_events.push(Event::Html(CowStr::from(html))),
                        Err(_) => {
                            out_events.push(Event::Start(Tag::CodeBlock(CodeBlockKind::Indented)));
                            out_events.push(Event::Text(CowStr::from(to_highlight.clone())));
                            out_events.push(Event::End(TagEnd::CodeBlock));
                        }
                    }
                    to_highlight.clear();
                    in_code_block = false;
                }
                Event::Text(t) if in_code_block => to_highlight.push_str(&t),
                e => out_events.push(e),
            }
        }

        out_events
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_markdown(markdown: &str) -> String {
    RENDERER.render(markdown)
}

fn html(s: impl Into<String>) -> Event<'static> {
    Event::Html(CowStr::from(s.into()))
}

/// Adds the site's classes to block elements and to raw `<img>`/`<video>` tags.
fn style_overrides(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    events
        .into_iter()
        .map(|event| match event {
            Event::Start(Tag::Paragraph) => html(format!("<p class=\"{PARAGRAPH_CLASS}\">")),
            Event::End(TagEnd::Paragraph) => html("</p>\n"),
            Event::Start(Tag::Heading {
                level: HeadingLevel::H2,
                ..
            }) => html("<h2 class=\"text-3xl font-bold mt-8 mb-4\">"),
            Event::Start(Tag::Heading {
                level: HeadingLevel::H3,
                ..
            }) => html("<h3 class=\"text-2xl font-bold mt-6 mb-3\">"),
            Event::End(TagEnd::Heading(HeadingLevel::H2)) => html("</h2>\n"),
            Event::End(TagEnd::Heading(HeadingLevel::H3)) => html("</h3>\n"),
            Event::Start(Tag::List(None)) => html("<ul class=\"font-sans\">\n"),
            Event::Start(Tag::List(Some(1))) => html("<ol class=\"font-sans\">\n"),
            Event::Start(Tag::List(Some(start))) => {
                html(format!("<ol start=\"{start}\" class=\"font-sans\">\n"))
            }
            Event::End(TagEnd::List(true)) => html("</ol>\n"),
            Event::End(TagEnd::List(false)) => html("</ul>\n"),
            Event::Start(Tag::Item) => html(format!("<li class=\"{ITEM_CLASS}\">")),
            Event::End(TagEnd::Item) => html("</li>\n"),
            Event::Start(Tag::Strong) => html("<strong class=\"font-sans font-bold\">"),
            Event::End(TagEnd::Strong) => html("</strong>"),
            Event::Html(raw) => Event::Html(style_raw_media(raw)),
            Event::InlineHtml(raw) => Event::InlineHtml(style_raw_media(raw)),
            e => e,
        })
        .collect()
}

fn style_raw_media(raw: CowStr<'_>) -> CowStr<'_> {
    let trimmed = raw.trim_start();
    if trimmed.starts_with("<img ") && !trimmed.contains("class=") {
        CowStr::from(raw.replacen("<img ", &format!("<img class=\"{MEDIA_CLASS}\" "), 1))
    } else if trimmed.starts_with("<video ") && !trimmed.contains("class=") {
        CowStr::from(raw.replacen(
            "<video ",
            &format!("<video class=\"{MEDIA_CLASS}\" controls "),
            1,
        ))
    } else {
        raw
    }
}
