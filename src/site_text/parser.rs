use once_cell::sync::Lazy;
use regex::Regex;

use super::line::{self, Line};
use super::{clean_value, ParseError};
use crate::site::{Link, Site};

static LINK_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"text:\s*(.+?)(?:\s+url:|$)").expect("valid link text regex"));
static LINK_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"url:\s*(.+)").expect("valid link url regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Links,
    Tags,
}

/// Line-by-line state machine.
///
/// Transitions that flush buffers:
/// - `Item` in `Links` flushes the pending link before opening a new one
/// - `Entry` flushes the pending link and the pending description
/// - end of input flushes both
struct SiteParser {
    site: Site,
    section: Section,
    link: Option<Link>,
    /// `Some` while a description may continue on indented lines.
    description: Option<Vec<String>>,
}

impl SiteParser {
    fn new() -> Self {
        Self {
            site: Site::default(),
            section: Section::None,
            link: None,
            description: None,
        }
    }

    fn feed(&mut self, raw: &str) {
        match line::classify(raw) {
            Line::Skip | Line::Other => {}
            Line::Item(payload) => self.item(payload),
            Line::Nested(content) => self.nested(content),
            Line::Entry { key, value } => self.entry(key, value),
        }
    }

    fn item(&mut self, payload: &str) {
        match self.section {
            Section::Links => {
                self.flush_link();

                let mut link = Link::default();
                if let Some(text) = LINK_TEXT.captures(payload).and_then(|c| c.get(1)) {
                    link.text = clean_value(text.as_str());
                }
                if let Some(url) = LINK_URL.captures(payload).and_then(|c| c.get(1)) {
                    link.url = clean_value(url.as_str());
                }
                self.link = Some(link);
            }
            Section::Tags => {
                let tag = clean_value(payload);
                if !tag.is_empty() {
                    self.site.tags.push(tag);
                }
            }
            Section::None => {}
        }
    }

    fn nested(&mut self, content: &str) {
        if let (Section::Links, Some(link)) = (self.section, self.link.as_mut()) {
            if let Some((key, value)) = line::split_key_value(content) {
                let value = clean_value(value);
                match key {
                    "text" => link.text = value,
                    "url" => link.url = value,
                    _ => log::trace!("ignoring link attribute {key}"),
                }
            }
            return;
        }

        if let Some(lines) = self.description.as_mut() {
            lines.push(content.to_string());
        }
    }

    fn entry(&mut self, key: &str, value: &str) {
        self.flush_link();
        self.flush_description();

        match key {
            "links" => {
                self.section = Section::Links;
                self.site.links = vec![];
            }
            "tags" => {
                self.section = Section::Tags;
                self.site.tags = vec![];
            }
            "description" => {
                self.section = Section::None;
                let mut lines = vec![];
                if !is_blank(value) {
                    lines.push(clean_value(value));
                }
                self.description = Some(lines);
            }
            _ => {
                self.section = Section::None;
                if !is_blank(value) {
                    self.site.set_field(key, clean_value(value));
                }
            }
        }
    }

    fn flush_link(&mut self) {
        if let Some(link) = self.link.take() {
            if link.text.is_empty() {
                log::trace!("dropping link without text: {:?}", link.url);
            } else {
                self.site.links.push(link);
            }
        }
    }

    fn flush_description(&mut self) {
        if let Some(lines) = self.description.take() {
            if !lines.is_empty() {
                self.site.description = lines.join(" ").trim().to_string();
            }
        }
    }

    fn finish(mut self) -> Result<Site, ParseError> {
        self.flush_link();
        self.flush_description();

        if self.site.name.is_empty() {
            return Err(ParseError::MissingField("name"));
        }
        if self.site.url.is_empty() {
            return Err(ParseError::MissingField("url"));
        }

        Ok(self.site)
    }
}

fn is_blank(value: &str) -> bool {
    value.is_empty() || value == "[]"
}

pub fn parse_body(body: &str) -> Result<Site, ParseError> {
    let mut parser = SiteParser::new();
    for raw in body.lines() {
        parser.feed(raw);
    }
    parser.finish()
}
