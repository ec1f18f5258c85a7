use crate::error::{MarkdownError, Result};
use crate::node::Node;
use fancy_regex::Regex as FancyRegex;
use std::sync::LazyLock;

static RE_IMAGE: LazyLock<FancyRegex> =
    LazyLock::new(|| FancyRegex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());
static RE_LINK: LazyLock<FancyRegex> =
    LazyLock::new(|| FancyRegex::new(r"(?<!!)\[([^\[\]]*)\]\(([^\(\)]*)\)").unwrap());

/// One typed run of inline text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Plain(String),
    Bold(String),
    Italic(String),
    Code(String),
    Link { text: String, url: String },
    Image { alt: String, url: String },
}

impl Span {
    pub fn text(&self) -> &str {
        match self {
            Span::Plain(t) | Span::Bold(t) | Span::Italic(t) | Span::Code(t) => t,
            Span::Link { text, .. } => text,
            Span::Image { alt, .. } => alt,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Span::Link { url, .. } | Span::Image { url, .. } => Some(url),
            _ => None,
        }
    }

    pub fn into_node(self) -> Node {
        match self {
            Span::Plain(text) => Node::text(text),
            Span::Bold(text) => Node::leaf("b", text),
            Span::Italic(text) => Node::leaf("i", text),
            Span::Code(text) => Node::leaf("code", text),
            Span::Link { text, url } => Node::leaf("a", text).with_attribute("href", url),
            Span::Image { alt, url } => Node::leaf("img", "")
                .with_attribute("src", url)
                .with_attribute("alt", alt),
        }
    }
}

/// Tokenize inline markdown.
///
/// Passes run in a fixed order (bold, italic, code, image, link) and each one
/// only splits spans that are still `Plain`. Anything already typed is left
/// alone, so markup inside a bold run stays literal.
pub fn tokenize(text: &str) -> Result<Vec<Span>> {
    let spans = vec![Span::Plain(text.to_string())];
    let spans = split_delimiter(spans, "**", Span::Bold)?;
    let spans = split_delimiter(spans, "*", Span::Italic)?;
    let spans = split_delimiter(spans, "`", Span::Code)?;
    let spans = split_images(spans);
    Ok(split_links(spans))
}

fn split_delimiter(spans: Vec<Span>, delimiter: &str, kind: fn(String) -> Span) -> Result<Vec<Span>> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        let text = match span {
            Span::Plain(text) => text,
            other => {
                out.push(other);
                continue;
            }
        };
        let count = text.matches(delimiter).count();
        if count == 0 {
            out.push(Span::Plain(text));
            continue;
        }
        if count % 2 != 0 {
            return Err(MarkdownError::MalformedInlineMarkup {
                delimiter: delimiter.to_string(),
                text,
            });
        }
        // Even-indexed segments sit outside a delimiter pair.
        for (i, segment) in text.split(delimiter).enumerate() {
            if segment.is_empty() {
                continue;
            }
            if i % 2 == 0 {
                out.push(Span::Plain(segment.to_string()));
            } else {
                out.push(kind(segment.to_string()));
            }
        }
    }
    Ok(out)
}

fn split_images(spans: Vec<Span>) -> Vec<Span> {
    split_matches(spans, &RE_IMAGE, |alt, url| {
        (format!("![{}]({})", alt, url), Span::Image { alt, url })
    })
}

fn split_links(spans: Vec<Span>) -> Vec<Span> {
    split_matches(spans, &RE_LINK, |text, url| {
        (format!("[{}]({})", text, url), Span::Link { text, url })
    })
}

/// Split `Plain` spans around every match of `re`. `build` returns the literal
/// markup to split on and the span that replaces it.
fn split_matches<F>(spans: Vec<Span>, re: &FancyRegex, build: F) -> Vec<Span>
where
    F: Fn(String, String) -> (String, Span),
{
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        let text = match span {
            Span::Plain(text) => text,
            other => {
                out.push(other);
                continue;
            }
        };
        let found: Vec<(String, String)> = re
            .captures_iter(&text)
            .filter_map(|r| r.ok())
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
            .collect();
        if found.is_empty() {
            out.push(Span::Plain(text));
            continue;
        }
        let mut rest = text.as_str();
        for (label, url) in found {
            let (markup, matched) = build(label, url);
            let Some((before, after)) = rest.split_once(markup.as_str()) else {
                continue;
            };
            if !before.is_empty() {
                out.push(Span::Plain(before.to_string()));
            }
            out.push(matched);
            rest = after;
        }
        if !rest.is_empty() {
            out.push(Span::Plain(rest.to_string()));
        }
    }
    out
}
