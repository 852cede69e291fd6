//! Just enough HTML handling to pull one cell out of a result table.
//!
//! Tags are matched case-insensitively and nesting of the same tag is
//! tracked, so a `<table>` inside a cell does not end the outer table early.
//! Comments, `<script>` and `<style>` bodies are never treated as markup.

use regex::{Captures, Regex};
use std::borrow::Cow;

/// Compiled matchers for one result-table layout.
#[derive(Debug, Clone)]
pub struct TableParser {
    class: String,
    table_tag: Regex,
    cell_tag: Regex,
    class_attr: Regex,
    any_tag: Regex,
    entity: Regex,
    hidden: Regex,
}

/// Opening (group 1 empty) or closing (group 1 `/`) tag of one element name.
fn tag_regex(name: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?i)<(/?){}\b[^>]*>", regex::escape(name)))
}

fn is_opening(caps: &Captures) -> bool {
    caps.get(1).is_some_and(|m| m.as_str().is_empty())
}

/// Content between an opening tag ending at `open_end` and its matching
/// close. An unclosed element runs to the end of `html`.
fn inner_extent<'a>(html: &'a str, tag: &Regex, open_end: usize) -> &'a str {
    let rest = &html[open_end..];
    let mut depth = 1usize;
    for caps in tag.captures_iter(rest) {
        let Some(whole) = caps.get(0) else { continue };
        if is_opening(&caps) {
            depth += 1;
            continue;
        }
        depth -= 1;
        if depth == 0 {
            return &rest[..whole.start()];
        }
    }
    rest
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "nbsp" => Some('\u{a0}'),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = match name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => name.strip_prefix('#')?.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

impl TableParser {
    /// Parser for tables carrying `class` among their class tokens.
    pub fn new(class: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            class: class.to_string(),
            table_tag: tag_regex("table")?,
            cell_tag: tag_regex("td")?,
            class_attr: Regex::new(r#"(?i)\sclass\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)?,
            any_tag: Regex::new(r"(?s)<!--.*?-->|<[^>]*>")?,
            entity: Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);")?,
            hidden: Regex::new(
                r"(?is)<!--.*?-->|<script\b.*?</script\s*>|<style\b.*?</style\s*>",
            )?,
        })
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    fn has_class(&self, open_tag: &str) -> bool {
        self.class_attr.captures_iter(open_tag).any(|caps| {
            let value = caps
                .get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))
                .map(|m| m.as_str())
                .unwrap_or("");
            value.split_whitespace().any(|token| token == self.class)
        })
    }

    /// `html` with comments, scripts and stylesheets removed. Run this before
    /// `find_table` so markup inside them cannot be mistaken for cells.
    pub fn strip_hidden<'a>(&self, html: &'a str) -> Cow<'a, str> {
        self.hidden.replace_all(html, "")
    }

    /// Inner HTML of the first matching `<table>`.
    pub fn find_table<'a>(&self, html: &'a str) -> Option<&'a str> {
        self.table_tag
            .captures_iter(html)
            .filter(is_opening)
            .filter_map(|caps| caps.get(0))
            .find(|open| self.has_class(open.as_str()))
            .map(|open| inner_extent(html, &self.table_tag, open.end()))
    }

    /// Inner HTML of every `<td>` in `fragment`, nested ones included, in
    /// document order of their opening tags.
    pub fn table_cells<'a>(&self, fragment: &'a str) -> Vec<&'a str> {
        self.cell_tag
            .captures_iter(fragment)
            .filter(is_opening)
            .filter_map(|caps| caps.get(0))
            .map(|open| inner_extent(fragment, &self.cell_tag, open.end()))
            .collect()
    }

    /// Text content of an HTML fragment: tags and comments removed, common
    /// entities decoded, surrounding whitespace trimmed.
    pub fn text_content(&self, fragment: &str) -> String {
        let stripped = self.any_tag.replace_all(fragment, "");
        let decoded = self.entity.replace_all(&stripped, |caps: &Captures| {
            decode_entity(&caps[1])
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        });
        decoded.trim().to_string()
    }
}
