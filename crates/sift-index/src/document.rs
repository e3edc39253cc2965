//! Conversion of source files into indexable documents.

use std::{
    collections::BTreeMap,
    fs,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use crate::{IndexError, discovery::DiscoveredFile, frontmatter::parse_frontmatter};

/// The supported source formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Markdown with optional YAML frontmatter.
    Markdown,
    /// HTML page.
    Html,
    /// Plain text.
    Text,
}

impl DocumentKind {
    /// Determines the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "html" | "htm" => Some(Self::Html),
            "txt" | "text" => Some(Self::Text),
            _ => None,
        }
    }
}

/// One indexable document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Path relative to the document root, with `/` separators.
    pub path: String,
    /// Title; falls back to the file name.
    pub title: String,
    /// Plain-text content.
    pub body: String,
    /// File size in bytes.
    pub size: u64,
    /// Modification time.
    pub mtime: SystemTime,
    /// Extra properties from frontmatter or meta tags.
    pub properties: BTreeMap<String, String>,
}

impl SourceDocument {
    /// Reads and converts a discovered file.
    pub fn load(file: &DiscoveredFile) -> Result<Self, IndexError> {
        let kind = DocumentKind::from_path(&file.abs_path).ok_or_else(|| IndexError::Document {
            path: file.abs_path.clone(),
            message: "unsupported file type".to_string(),
        })?;
        let content = fs::read_to_string(&file.abs_path).map_err(|e| IndexError::Document {
            path: file.abs_path.clone(),
            message: e.to_string(),
        })?;

        let rel_path = file.rel_path.to_string_lossy().replace('\\', "/");
        let mut doc = Self::from_content(kind, &rel_path, &content);
        doc.size = file.size;
        doc.mtime = file.mtime;
        Ok(doc)
    }

    /// Converts file content of a known format.
    pub fn from_content(kind: DocumentKind, rel_path: &str, content: &str) -> Self {
        let extracted = match kind {
            DocumentKind::Markdown => extract_markdown(content),
            DocumentKind::Html => extract_html(content),
            DocumentKind::Text => extract_text(content),
        };

        let title = extracted
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| file_stem(rel_path));

        Self {
            path: rel_path.to_string(),
            title,
            body: extracted.body,
            size: content.len() as u64,
            mtime: UNIX_EPOCH,
            properties: extracted.properties,
        }
    }

    /// Modification time as Unix seconds.
    pub fn mtime_secs(&self) -> i64 {
        self.mtime
            .duration_since(UNIX_EPOCH)
            .ok()
            .and_then(|d| i64::try_from(d.as_secs()).ok())
            .unwrap_or(0)
    }
}

/// Text and metadata pulled out of one file.
#[derive(Debug, Default)]
struct Extracted {
    /// Title, if the format carries one.
    title: Option<String>,
    /// Plain-text body.
    body: String,
    /// Extra properties.
    properties: BTreeMap<String, String>,
}

/// Returns the file name without extension.
fn file_stem(rel_path: &str) -> String {
    Path::new(rel_path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| rel_path.to_string())
}

/// Markdown: frontmatter properties, first heading as title, rendered text as body.
fn extract_markdown(content: &str) -> Extracted {
    let (mut properties, markdown) = parse_frontmatter(content);

    let mut body = String::new();
    let mut heading: Option<String> = None;
    let mut in_first_heading = false;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Heading { .. }) if heading.is_none() => {
                in_first_heading = true;
                heading = Some(String::new());
            }
            Event::End(TagEnd::Heading(_)) => {
                in_first_heading = false;
                push_break(&mut body);
            }
            Event::Text(text) | Event::Code(text) => {
                if in_first_heading && let Some(h) = heading.as_mut() {
                    h.push_str(&text);
                }
                body.push_str(&text);
            }
            Event::SoftBreak | Event::HardBreak => body.push(' '),
            Event::End(
                TagEnd::Paragraph | TagEnd::Item | TagEnd::CodeBlock | TagEnd::BlockQuote(_),
            ) => push_break(&mut body),
            _ => {}
        }
    }

    let title = properties.remove("title").or(heading);
    Extracted {
        title,
        body: body.trim().to_string(),
        properties,
    }
}

/// Separates blocks with a blank line.
fn push_break(body: &mut String) {
    if !body.is_empty() && !body.ends_with("\n\n") {
        body.push_str("\n\n");
    }
}

/// HTML: `<title>`, `<meta name content>` properties, visible text as body.
fn extract_html(content: &str) -> Extracted {
    let title = element_text(content, "title").map(|t| normalize_whitespace(&decode_entities(&t)));

    let mut properties = BTreeMap::new();
    for tag in tags_named(content, "meta") {
        if let (Some(name), Some(value)) = (attribute(tag, "name"), attribute(tag, "content")) {
            properties.insert(name.to_lowercase(), decode_entities(&value));
        }
    }

    let mut text = content.to_string();
    for block in ["head", "script", "style", "noscript"] {
        text = strip_tag_blocks(&text, block);
    }
    let body = normalize_whitespace(&decode_entities(&strip_tags(&text)));

    Extracted {
        title,
        body,
        properties,
    }
}

/// Plain text: first non-empty line as title.
fn extract_text(content: &str) -> Extracted {
    let content = content.trim_start_matches('\u{feff}');
    Extracted {
        title: content
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(str::to_string),
        body: content.trim().to_string(),
        properties: BTreeMap::new(),
    }
}

/// Returns the inner text of the first `<name>` element.
fn element_text(html: &str, name: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let open = lower.find(&format!("<{name}"))?;
    let start = open + lower[open..].find('>')? + 1;
    let end = start + lower[start..].find(&format!("</{name}"))?;
    Some(html[start..end].to_string())
}

/// Returns the source of every `<name ...>` tag.
fn tags_named<'a>(html: &'a str, name: &str) -> Vec<&'a str> {
    let lower = html.to_ascii_lowercase();
    let open = format!("<{name}");
    let mut tags = Vec::new();
    let mut pos = 0;

    while let Some(offset) = lower[pos..].find(&open) {
        let start = pos + offset;
        let after = start + open.len();
        let Some(len) = lower[after..].find('>') else {
            break;
        };
        let boundary = lower[after..].chars().next();
        if boundary.is_some_and(|c| c.is_whitespace() || c == '/' || c == '>') {
            tags.push(&html[start..=after + len]);
        }
        pos = after + len + 1;
    }

    tags
}

/// Returns the value of a quoted attribute in a tag.
fn attribute(tag: &str, name: &str) -> Option<String> {
    let lower = tag.to_ascii_lowercase();
    let mut pos = 0;
    while let Some(offset) = lower[pos..].find(name) {
        let start = pos + offset;
        pos = start + name.len();
        let preceded = lower[..start].ends_with(|c: char| c.is_whitespace());
        let rest = lower[pos..].trim_start();
        if !preceded || !rest.starts_with('=') {
            continue;
        }
        let value_start = tag.len() - rest.len() + 1;
        let value = tag[value_start..].trim_start();
        let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
        let inner = &value[1..];
        return inner.find(quote).map(|end| inner[..end].to_string());
    }
    None
}

/// Removes `<tag ...> ... </tag>` blocks, ASCII case-insensitively.
fn strip_tag_blocks(html: &str, tag: &str) -> String {
    let lower = html.to_ascii_lowercase();
    let open_pat = format!("<{tag}");
    let close_pat = format!("</{tag}>");

    let mut out = String::with_capacity(html.len());
    let mut i = 0;
    while let Some(rel_start) = lower[i..].find(&open_pat) {
        let start = i + rel_start;
        let after_open = start + open_pat.len();
        let Some(rel_end) = lower[after_open..].find(&close_pat) else {
            break;
        };
        out.push_str(&html[i..start]);
        i = after_open + rel_end + close_pat.len();
    }
    out.push_str(&html[i..]);
    out
}

/// Replaces every tag with a space.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Decodes the common named entities and numeric character references.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').filter(|end| *end <= 10).and_then(|end| {
            let entity = &rest[1..end];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, end))
        });
        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }

    out.push_str(rest);
    out
}

/// Collapses runs of whitespace into single spaces.
fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
