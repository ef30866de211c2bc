use crate::error::{Result, ScrapeError};
use scraper::{ElementRef, Selector};

/// Ordered CSS selectors for one field; the first selector that matches wins.
///
/// Results are never merged across selectors.
#[derive(Debug, Clone)]
pub struct SelectorChain {
    selectors: Vec<Selector>,
}

impl SelectorChain {
    pub fn parse(css: &[&str]) -> Result<Self> {
        let selectors = css
            .iter()
            .map(|s| Selector::parse(s).map_err(|_| ScrapeError::Selector(s.to_string())))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { selectors })
    }

    /// First element under `scope` matched by the earliest matching selector
    pub fn first<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.selectors
            .iter()
            .find_map(|selector| scope.select(selector).next())
    }

    /// All elements of the earliest selector that matches anything
    pub fn all<'a>(&self, scope: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        for selector in &self.selectors {
            let found: Vec<_> = scope.select(selector).collect();
            if !found.is_empty() {
                return found;
            }
        }
        Vec::new()
    }
}

/// Text content of an element with whitespace runs collapsed
pub fn clean_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Raw concatenated text content, for price parsing
pub fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Nearest `<a>` ancestor of an element
pub fn enclosing_anchor(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|node| node.value().name() == "a")
}

/// `src`, falling back to the lazy-loading `data-src`
pub fn image_source(element: ElementRef<'_>) -> Option<&str> {
    let value = element.value();
    value
        .attr("src")
        .filter(|s| !s.trim().is_empty())
        .or_else(|| value.attr("data-src"))
}
