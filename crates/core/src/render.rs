//! Rendered visible text for scraper elements.
//!
//! Approximates what a browser reports as `innerText`: script-like and
//! hidden subtrees are skipped, inline whitespace collapses to single spaces,
//! block elements start on a new line and paragraphs are separated by a blank
//! line. `pre` keeps its whitespace.

use scraper::{ElementRef, Node};

/// Elements whose content is never rendered.
const HIDDEN_ELEMENTS: [&str; 7] = ["script", "style", "noscript", "template", "head", "title", "iframe"];

/// Elements rendered on their own line.
const BLOCK_ELEMENTS: [&str; 33] = [
    "address",
    "article",
    "aside",
    "blockquote",
    "caption",
    "dd",
    "details",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "ol",
    "pre",
    "section",
    "summary",
    "table",
    "tr",
    "ul",
];

/// Render the visible text of `element` and its descendants.
pub fn render_text(element: ElementRef<'_>) -> String {
    let mut renderer = Renderer::default();
    renderer.element(element);
    renderer.finish()
}

/// True when `element` would not be displayed.
pub fn is_hidden(element: &ElementRef<'_>) -> bool {
    let value = element.value();
    if HIDDEN_ELEMENTS.contains(&value.name()) || value.attr("hidden").is_some() {
        return true;
    }

    value.attr("style").is_some_and(|style| {
        let style: String = style.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_lowercase();
        style.contains("display:none") || style.contains("visibility:hidden")
    })
}

fn required_breaks(tag_name: &str) -> usize {
    if tag_name == "p" {
        2
    } else if BLOCK_ELEMENTS.contains(&tag_name) {
        1
    } else {
        0
    }
}

#[derive(Default)]
struct Renderer {
    out: String,
    pending_breaks: usize,
    preformatted: usize,
}

impl Renderer {
    fn element(&mut self, element: ElementRef<'_>) {
        if is_hidden(&element) {
            return;
        }

        let tag_name = element.value().name();
        if tag_name == "br" {
            self.line_break();
            return;
        }

        let breaks = required_breaks(tag_name);
        let preformatted = matches!(tag_name, "pre" | "textarea");

        self.require_breaks(breaks);
        if preformatted {
            self.preformatted += 1;
        }

        for child in element.children() {
            match child.value() {
                Node::Text(text) => self.text(text),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.element(child);
                    }
                }
                _ => {}
            }
        }

        if preformatted {
            self.preformatted -= 1;
        }
        if matches!(tag_name, "td" | "th") {
            self.space();
        }
        self.require_breaks(breaks);
    }

    fn text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }

        if self.preformatted > 0 {
            self.flush_breaks();
            self.out.push_str(raw);
            return;
        }

        let words: Vec<&str> = raw.split_whitespace().collect();
        if words.is_empty() {
            self.space();
            return;
        }

        self.flush_breaks();
        if raw.starts_with(char::is_whitespace) {
            self.space();
        }
        self.out.push_str(&words.join(" "));
        if raw.ends_with(char::is_whitespace) {
            self.space();
        }
    }

    fn space(&mut self) {
        if self.pending_breaks == 0 && !self.out.is_empty() && !self.out.ends_with([' ', '\n']) {
            self.out.push(' ');
        }
    }

    fn line_break(&mut self) {
        self.flush_breaks();
        self.trim_trailing_spaces();
        self.out.push('\n');
    }

    fn require_breaks(&mut self, count: usize) {
        self.pending_breaks = self.pending_breaks.max(count);
    }

    fn flush_breaks(&mut self) {
        if self.pending_breaks == 0 {
            return;
        }

        if !self.out.is_empty() {
            self.trim_trailing_spaces();
            let existing = self.out.len() - self.out.trim_end_matches('\n').len();
            for _ in existing..self.pending_breaks {
                self.out.push('\n');
            }
        }
        self.pending_breaks = 0;
    }

    fn trim_trailing_spaces(&mut self) {
        let len = self.out.trim_end_matches(' ').len();
        self.out.truncate(len);
    }

    fn finish(self) -> String {
        self.out.trim().to_string()
    }
}
