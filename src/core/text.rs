//! HTML to plain text, plus title recovery for job posting pages.

use crate::core::record::{truncate_chars, TITLE_MAX_CHARS};
use crate::domain::model::NOT_FOUND;
use scraper::{ElementRef, Html, Node, Selector};

/// Elements whose text content is never rendered.
const INVISIBLE_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

const TITLE_CLASS_MARKERS: [&str; 2] = ["job-title", "jobtitle"];

/// A parsed page. Not `Send`: parse, read what you need, drop it before awaiting.
pub struct PageDocument {
    document: Html,
}

impl PageDocument {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Every visible text node, trimmed, joined by single spaces.
    pub fn text(&self) -> String {
        let mut parts = Vec::new();

        for node in self.document.tree.root().descendants() {
            let Node::Text(text) = node.value() else {
                continue;
            };

            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map(|el| INVISIBLE_ELEMENTS.contains(&el.name()))
                    .unwrap_or(false)
            });
            if hidden {
                continue;
            }

            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed);
            }
        }

        parts.join(" ")
    }

    /// `<h1>`, then `<title>`, then the first element with a job-title class.
    pub fn title(&self) -> String {
        let found = self
            .first_match("h1")
            .or_else(|| self.first_match("title"))
            .or_else(|| self.first_job_title_class());

        match found {
            Some(element) => {
                let text = element.text().collect::<String>();
                truncate_chars(text.trim(), TITLE_MAX_CHARS)
            }
            None => NOT_FOUND.to_string(),
        }
    }

    fn first_match(&self, css: &str) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(css).ok()?;
        self.document.select(&selector).next()
    }

    fn first_job_title_class(&self) -> Option<ElementRef<'_>> {
        let selector = Selector::parse("[class]").ok()?;
        self.document.select(&selector).find(|element| {
            element
                .value()
                .attr("class")
                .map(|class| {
                    let class = class.to_lowercase();
                    TITLE_CLASS_MARKERS
                        .iter()
                        .any(|marker| class.contains(marker))
                })
                .unwrap_or(false)
        })
    }
}

pub fn extract_text(html: &str) -> String {
    PageDocument::parse(html).text()
}

pub fn extract_title(html: &str) -> String {
    PageDocument::parse(html).title()
}
