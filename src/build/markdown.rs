//! Markdown rendering with header anchors and bare URL linking.

use std::collections::HashSet;
use std::ops::Range;

use pulldown_cmark::{
    CowStr, Event, HeadingLevel, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream, html,
};
use pulldown_cmark_escape::escape_html;

use crate::config::MarkdownConfig;

#[derive(thiserror::Error, Debug)]
pub enum MarkdownError {
    #[error("invalid markdown extension: {0}")]
    InvalidExtension(String),
}

/// Render markdown to an HTML fragment using pulldown-cmark.
pub fn render_markdown(
    markdown: &str,
    markdown_config: &MarkdownConfig,
) -> Result<String, MarkdownError> {
    let mut options = Options::empty();
    for extension in &markdown_config.extensions {
        match extension.as_str() {
            "definition_lists" => options.insert(Options::ENABLE_DEFINITION_LIST),
            "footnotes" => options.insert(Options::ENABLE_FOOTNOTES),
            "gfm" => options.insert(Options::ENABLE_GFM),
            "heading_attributes" => options.insert(Options::ENABLE_HEADING_ATTRIBUTES),
            "strikethrough" => options.insert(Options::ENABLE_STRIKETHROUGH),
            "tables" => options.insert(Options::ENABLE_TABLES),
            "tasklists" => options.insert(Options::ENABLE_TASKLISTS),
            other => return Err(MarkdownError::InvalidExtension(other.to_string())),
        }
    }

    let mut events: Vec<Event> = TextMergeStream::new(Parser::new_ext(markdown, options)).collect();
    if markdown_config.autolink {
        events = autolink(events);
    }
    if markdown_config.header_ids || markdown_config.custom_header_ids {
        events = add_heading_ids(
            events,
            markdown_config.header_ids,
            markdown_config.custom_header_ids,
        );
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());
    Ok(html_output)
}

// =============================================================================
// Bare URL linking
// =============================================================================

const URL_PREFIXES: &[&str] = &["https://", "http://", "ftp://", "www."];

/// Turn bare URLs in text into links.
///
/// Text inside code blocks and existing links is left alone. Inline code and
/// raw HTML arrive as their own event kinds and are never touched.
fn autolink(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut output = Vec::with_capacity(events.len());
    let mut link_depth = 0usize;
    let mut in_code_block = false;

    for event in events {
        match event {
            Event::Start(Tag::Link { .. } | Tag::Image { .. }) => {
                link_depth += 1;
                output.push(event);
            }
            Event::End(TagEnd::Link | TagEnd::Image) => {
                link_depth = link_depth.saturating_sub(1);
                output.push(event);
            }
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
                output.push(event);
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                output.push(event);
            }
            Event::Text(text) if link_depth == 0 && !in_code_block => {
                push_linked_text(&mut output, text);
            }
            _ => output.push(event),
        }
    }

    output
}

fn push_linked_text<'a>(output: &mut Vec<Event<'a>>, text: CowStr<'a>) {
    let urls = find_urls(&text);
    if urls.is_empty() {
        output.push(Event::Text(text));
        return;
    }

    let mut last = 0;
    for range in urls {
        if range.start > last {
            output.push(Event::Text(text[last..range.start].to_string().into()));
        }
        let url = &text[range.clone()];
        let href = if url.len() >= 4 && url[..4].eq_ignore_ascii_case("www.") {
            format!("http://{}", url)
        } else {
            url.to_string()
        };
        output.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: href.into(),
            title: CowStr::from(""),
            id: CowStr::from(""),
        }));
        output.push(Event::Text(url.to_string().into()));
        output.push(Event::End(TagEnd::Link));
        last = range.end;
    }
    if last < text.len() {
        output.push(Event::Text(text[last..].to_string().into()));
    }
}

/// Find the byte ranges of bare URLs in a run of text.
///
/// A URL starts with one of [`URL_PREFIXES`] at the start of the text or
/// after whitespace or `(`, and runs until whitespace or a quote/angle
/// bracket. Trailing sentence punctuation and unbalanced `)` are not part
/// of the URL.
fn find_urls(text: &str) -> Vec<Range<usize>> {
    let mut found = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        let at_boundary = text[..pos]
            .chars()
            .next_back()
            .is_none_or(|c| c.is_whitespace() || c == '(');
        let prefix = URL_PREFIXES.iter().find(|prefix| {
            rest.get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        });

        if at_boundary && let Some(prefix) = prefix {
            let len = rest
                .find(|c: char| c.is_whitespace() || matches!(c, '<' | '>' | '"' | '\''))
                .unwrap_or(rest.len());
            let end = pos + trim_url_end(&rest[..len]);
            if end > pos + prefix.len() {
                found.push(pos..end);
                pos = end;
                continue;
            }
        }

        pos += rest.chars().next().map_or(1, char::len_utf8);
    }

    found
}

fn trim_url_end(url: &str) -> usize {
    let mut end = url.len();
    while let Some(last) = url[..end].chars().next_back() {
        let unbalanced_paren =
            last == ')' && url[..end].matches('(').count() < url[..end].matches(')').count();
        if matches!(last, '.' | ',' | ':' | ';' | '!' | '?') || unbalanced_paren {
            end -= 1;
        } else {
            break;
        }
    }
    end
}

// =============================================================================
// Heading ids
// =============================================================================

struct HeadingState<'a> {
    level: HeadingLevel,
    classes: Vec<String>,
    attrs: Vec<(String, Option<String>)>,
    text: String,
    inner: Vec<Event<'a>>,
}

/// Give headings GitHub-style anchor ids.
///
/// With `custom`, a trailing `{custom-id}` is cut from the heading text and
/// used as the id source. Otherwise the id comes from the heading text when
/// `generate` is set. Ids from the `heading_attributes` extension are kept
/// and reserved, so generated ids never collide with them.
fn add_heading_ids(events: Vec<Event<'_>>, generate: bool, custom: bool) -> Vec<Event<'_>> {
    let mut used_ids: HashSet<String> = events
        .iter()
        .filter_map(|event| match event {
            Event::Start(Tag::Heading { id: Some(id), .. }) => Some(id.to_string()),
            _ => None,
        })
        .collect();

    let mut output = Vec::with_capacity(events.len());
    let mut heading: Option<HeadingState> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading {
                level,
                id: None,
                ref classes,
                ref attrs,
            }) => {
                heading = Some(HeadingState {
                    level,
                    classes: classes.iter().map(|c| c.to_string()).collect(),
                    attrs: attrs
                        .iter()
                        .map(|(k, v)| (k.to_string(), v.as_ref().map(|v| v.to_string())))
                        .collect(),
                    text: String::new(),
                    inner: Vec::new(),
                });
            }
            Event::End(TagEnd::Heading(_)) if heading.is_some() => {
                if let Some(mut state) = heading.take() {
                    let source = match custom.then(|| take_custom_id(&mut state)).flatten() {
                        Some(custom_id) => Some(custom_id),
                        None if generate => Some(state.text.clone()),
                        None => None,
                    };
                    let id = source.map(|source| unique_id(&slugify(&source), &mut used_ids));
                    output.push(Event::Html(heading_html(state, id.as_deref()).into()));
                }
            }
            event => match heading.as_mut() {
                Some(state) => {
                    if let Event::Text(text) | Event::Code(text) = &event {
                        state.text.push_str(text);
                    }
                    state.inner.push(event);
                }
                None => output.push(event),
            },
        }
    }

    output
}

/// Split a trailing `{id}` off the heading's last run of text.
fn take_custom_id(state: &mut HeadingState<'_>) -> Option<String> {
    let Some(Event::Text(last)) = state.inner.last() else {
        return None;
    };
    let (text, id) = split_custom_id(last)?;
    let (text, id) = (text.to_string(), id.to_string());

    let cut = last.len() - text.len();
    state.text.truncate(state.text.len() - cut);
    state.inner.pop();
    if !text.is_empty() {
        state.inner.push(Event::Text(text.into()));
    }
    Some(id)
}

fn split_custom_id(text: &str) -> Option<(&str, &str)> {
    let body = text.trim_end().strip_suffix('}')?;
    let open = body.rfind('{')?;
    let id = &body[open + 1..];
    if id.is_empty() {
        return None;
    }
    Some((body[..open].trim_end(), id))
}

fn unique_id(base_id: &str, used_ids: &mut HashSet<String>) -> String {
    let mut id = base_id.to_string();
    let mut suffix = 1;
    while used_ids.contains(&id) {
        id = format!("{}-{}", base_id, suffix);
        suffix += 1;
    }
    used_ids.insert(id.clone());
    id
}

fn heading_html(state: HeadingState<'_>, id: Option<&str>) -> String {
    let level = state.level as usize;
    let mut out = format!("<h{level}");

    if let Some(id) = id {
        out.push_str(" id=\"");
        push_escaped(&mut out, id);
        out.push('"');
    }
    if !state.classes.is_empty() {
        out.push_str(" class=\"");
        push_escaped(&mut out, &state.classes.join(" "));
        out.push('"');
    }
    for (key, value) in &state.attrs {
        out.push(' ');
        push_escaped(&mut out, key);
        out.push_str("=\"");
        push_escaped(&mut out, value.as_deref().unwrap_or_default());
        out.push('"');
    }
    out.push('>');

    html::push_html(&mut out, state.inner.into_iter());
    out.push_str(&format!("</h{level}>\n"));
    out
}

fn push_escaped(out: &mut String, text: &str) {
    // Writing into a String never fails
    let _ = escape_html(out, text);
}

/// Convert heading text to a GitHub-compatible anchor id.
///
/// Lowercases, turns spaces into `-` and drops punctuation other than
/// `-` and `_`.
pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}
