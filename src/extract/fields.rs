//! Generic field extraction over anchored document nodes

use crate::extract::sentinel::is_placeholder;
use scraper::{ElementRef, Html, Selector};
use std::str::FromStr;

/// How a field's anchor node is located in the document
#[derive(Debug, Clone, Copy)]
pub enum Anchor {
    /// A `<span>` whose literal text equals one of the captions ("Episodes:")
    Label(&'static [&'static str]),

    /// A `<meta property="...">` tag; the value is its `content` attribute
    MetaProperty(&'static str),

    /// An element carrying `itemprop="..."`; the value is its own text
    ItemProp(&'static str),

    /// First match of a raw CSS selector; the value is its own text
    Css(&'static str),
}

/// Declarative description of one extractable field
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub anchor: Anchor,
    pub sentinels: &'static [&'static str],
}

impl FieldSpec {
    pub const fn label(captions: &'static [&'static str]) -> Self {
        Self {
            anchor: Anchor::Label(captions),
            sentinels: &[],
        }
    }

    pub const fn meta(property: &'static str) -> Self {
        Self {
            anchor: Anchor::MetaProperty(property),
            sentinels: &[],
        }
    }

    pub const fn itemprop(name: &'static str) -> Self {
        Self {
            anchor: Anchor::ItemProp(name),
            sentinels: &[],
        }
    }

    pub const fn css(selector: &'static str) -> Self {
        Self {
            anchor: Anchor::Css(selector),
            sentinels: &[],
        }
    }

    /// Adds field-specific placeholder strings on top of the defaults
    pub const fn with_sentinels(mut self, sentinels: &'static [&'static str]) -> Self {
        self.sentinels = sentinels;
        self
    }
}

/// Collapses whitespace runs to single spaces and trims
pub fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Finds the caption `<span>` matching one of the given labels
fn label_element<'a>(document: &'a Html, captions: &[&str]) -> Option<(ElementRef<'a>, String)> {
    let spans = Selector::parse("span").ok()?;
    for element in document.select(&spans) {
        let text = normalize_ws(&element.text().collect::<String>());
        if captions.iter().any(|caption| text == *caption) {
            return Some((element, text));
        }
    }
    None
}

/// The block containing an anchor: its nearest ancestor element
fn containing_block(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.parent().and_then(ElementRef::wrap)
}

/// Resolves an anchor to the block that holds the field's value nodes
///
/// Used by list extraction: for caption anchors this is the caption's
/// containing block; for CSS anchors it is the matched element itself.
pub fn anchor_block<'a>(document: &'a Html, anchor: &Anchor) -> Option<ElementRef<'a>> {
    match anchor {
        Anchor::Label(captions) => {
            let (label, _) = label_element(document, captions)?;
            containing_block(label)
        }
        Anchor::MetaProperty(property) => {
            let selector = Selector::parse(&format!(r#"meta[property="{}"]"#, property)).ok()?;
            document.select(&selector).next()
        }
        Anchor::ItemProp(name) => {
            let selector = Selector::parse(&format!(r#"[itemprop="{}"]"#, name)).ok()?;
            document.select(&selector).next()
        }
        Anchor::Css(css) => {
            let selector = Selector::parse(css).ok()?;
            document.select(&selector).next()
        }
    }
}

/// Extracts a scalar text field
///
/// Absent anchors and placeholder values both yield `None`; this function
/// never fails. For caption anchors the value is the containing block's text
/// with the caption itself removed.
pub fn text_field(document: &Html, spec: &FieldSpec) -> Option<String> {
    let raw = match &spec.anchor {
        Anchor::Label(captions) => {
            let (label, label_text) = label_element(document, captions)?;
            let block = containing_block(label)?;
            let block_text = normalize_ws(&block.text().collect::<String>());
            normalize_ws(&block_text.replacen(&label_text, "", 1))
        }
        Anchor::MetaProperty(property) => {
            let selector = Selector::parse(&format!(r#"meta[property="{}"]"#, property)).ok()?;
            document
                .select(&selector)
                .next()?
                .value()
                .attr("content")?
                .trim()
                .to_string()
        }
        Anchor::ItemProp(name) => {
            let selector = Selector::parse(&format!(r#"[itemprop="{}"]"#, name)).ok()?;
            normalize_ws(&document.select(&selector).next()?.text().collect::<String>())
        }
        Anchor::Css(css) => {
            let selector = Selector::parse(css).ok()?;
            normalize_ws(&document.select(&selector).next()?.text().collect::<String>())
        }
    };

    if raw.is_empty() || is_placeholder(&raw, spec.sentinels) {
        None
    } else {
        Some(raw)
    }
}

/// Extracts a numeric field, tolerating the site's decorations
///
/// A present anchor whose value does not survive cleanup is an extraction
/// defect and maps to `None`, never an error.
pub fn number_field<T: FromStr>(document: &Html, spec: &FieldSpec) -> Option<T> {
    parse_number(&text_field(document, spec)?)
}

/// Strips thousands separators, rank markers, and unit suffixes, then parses
///
/// "1,234,567" parses as 1234567; "#42" as 42; "271,310 users" as 271310.
/// Non-numeric residue yields `None`.
pub fn parse_number<T: FromStr>(text: &str) -> Option<T> {
    let mut cleaned = text.replace(['#', ','], "");
    for suffix in ["users", "user"] {
        if let Some(stripped) = cleaned.trim_end().strip_suffix(suffix) {
            cleaned = stripped.to_string();
            break;
        }
    }
    cleaned.trim().parse().ok()
}

/// Extracts a list field: the titles of link nodes under the anchor's block
///
/// Returns document order, no deduplication. An absent anchor yields an
/// empty list, as does a block whose text carries one of the field's
/// sentinels ("None found", "No genres have been added yet"). Links without
/// a `title` attribute fall back to their display text.
pub fn link_titles(document: &Html, spec: &FieldSpec) -> Vec<String> {
    let Some(block) = anchor_block(document, &spec.anchor) else {
        return Vec::new();
    };

    let block_text = normalize_ws(&block.text().collect::<String>());
    if spec
        .sentinels
        .iter()
        .any(|sentinel| block_text.contains(sentinel))
    {
        return Vec::new();
    }

    let Ok(links) = Selector::parse("a") else {
        return Vec::new();
    };

    block
        .select(&links)
        .filter_map(|link| {
            link.value()
                .attr("title")
                .map(str::to_string)
                .or_else(|| Some(normalize_ws(&link.text().collect::<String>())))
        })
        .filter(|title| !title.is_empty())
        .collect()
}
