//! Anime detail page assembly
//!
//! The detail page is a label-driven sidebar plus `og:*` meta tags. Every
//! field below degrades to absent (or an empty list) on its own; only a
//! missing primary title or canonical URL makes the whole page invalid.

use crate::config::SiteConfig;
use crate::crawler::fetch_page;
use crate::extract::{
    id_from_url, link_titles, normalize_ws, number_field, slug_from_url, slugify, text_field,
    FieldSpec, NO_GENRES, NO_SYNOPSIS,
};
use crate::records::Outcome;
use crate::{CrawlerError, Result};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

const NAME: FieldSpec = FieldSpec::meta("og:title");
const MAL_URL: FieldSpec = FieldSpec::meta("og:url");
const IMAGE: FieldSpec = FieldSpec::meta("og:image");
const ENGLISH: FieldSpec = FieldSpec::label(&["English:"]);
const JAPANESE: FieldSpec = FieldSpec::label(&["Japanese:"]);
const SYNONYMS: FieldSpec = FieldSpec::label(&["Synonyms:"]);
const EPISODES: FieldSpec = FieldSpec::label(&["Episodes:"]);
const TYPE: FieldSpec = FieldSpec::label(&["Type:"]);
const STATUS: FieldSpec = FieldSpec::label(&["Status:"]);
const PREMIERED: FieldSpec = FieldSpec::label(&["Premiered:"]);
const BROADCAST: FieldSpec = FieldSpec::label(&["Broadcast:"]);
const SOURCE: FieldSpec = FieldSpec::label(&["Source:"]);
const DURATION: FieldSpec = FieldSpec::label(&["Duration:"]);
const AIRED: FieldSpec = FieldSpec::label(&["Aired:"]);
const RATING: FieldSpec = FieldSpec::label(&["Rating:"]).with_sentinels(&["None"]);
const RANK: FieldSpec = FieldSpec::label(&["Ranked:"]);
const POPULARITY: FieldSpec = FieldSpec::label(&["Popularity:"]);
const MEMBERS: FieldSpec = FieldSpec::label(&["Members:"]);
const FAVORITES: FieldSpec = FieldSpec::label(&["Favorites:"]);
const SCORE: FieldSpec = FieldSpec::itemprop("ratingValue");
const SCORED_BY: FieldSpec = FieldSpec::itemprop("ratingCount");

const PRODUCERS: FieldSpec = FieldSpec::label(&["Producers:"]).with_sentinels(&["None found"]);
const LICENSORS: FieldSpec = FieldSpec::label(&["Licensors:"]).with_sentinels(&["None found"]);
const STUDIOS: FieldSpec = FieldSpec::label(&["Studios:"]).with_sentinels(&["None found"]);
const GENRES: FieldSpec = FieldSpec::label(&["Genres:", "Genre:"]).with_sentinels(&[NO_GENRES]);
const EXPLICIT_GENRES: FieldSpec =
    FieldSpec::label(&["Explicit Genres:", "Explicit Genre:"]).with_sentinels(&[NO_GENRES]);
const DEMOGRAPHICS: FieldSpec = FieldSpec::label(&["Demographic:", "Demographics:"]);
const THEMES: FieldSpec = FieldSpec::label(&["Theme:", "Themes:"]);

/// Normalized anime detail record
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeRecord {
    pub id: u32,
    pub slug: Option<String>,
    pub name: String,
    pub english: Option<String>,
    pub japanese: Option<String>,
    pub synonyms: Vec<String>,
    pub image: Option<String>,
    pub synopsis: Option<String>,
    pub mal_url: String,
    pub episodes: Option<u32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub status: Option<String>,
    pub premiered: Option<String>,
    pub broadcast: Option<String>,
    pub producers: Vec<String>,
    pub licensors: Vec<String>,
    pub studios: Vec<String>,
    pub source: Option<String>,
    pub genres: Vec<String>,
    pub explicit_genres: Vec<String>,
    pub demographics: Vec<String>,
    pub themes: Vec<String>,
    pub duration: Option<String>,
    pub score: Option<f64>,
    pub scored_by: Option<u64>,
    pub rating: Option<String>,
    pub rank: Option<u32>,
    pub popularity: Option<u32>,
    pub related: Vec<RelatedGroup>,
    pub members: Option<u64>,
    pub favorites: Option<u64>,
    pub external_links: Vec<String>,
    pub aired: Option<String>,
}

/// One relation kind ("Adaptation", "Sequel") and its linked entries
#[derive(Debug, Serialize, PartialEq)]
pub struct RelatedGroup {
    pub relation: String,
    pub entries: Vec<RelatedEntry>,
}

/// A linked catalog entry inside a related-entries group
#[derive(Debug, Serialize, PartialEq)]
pub struct RelatedEntry {
    pub id: Option<u32>,
    pub slug: String,
    pub title: String,
    pub url: String,
}

/// Fetches and assembles the detail record for one anime ID
///
/// An unavailable page yields a not-found outcome, never an error; only a
/// page that lacks its primary title or canonical URL fails.
pub async fn crawl_anime(
    client: &Client,
    site: &SiteConfig,
    id: u32,
) -> Result<Outcome<AnimeRecord>> {
    let url = site.anime_url(id);
    match fetch_page(client, &url).await {
        None => Ok(Outcome::not_found(id, "Anime Not Found")),
        Some(body) => Ok(Outcome::Found(assemble_anime(&body, id)?)),
    }
}

/// Assembles an [`AnimeRecord`] from a fetched detail document
pub fn assemble_anime(html: &str, id: u32) -> Result<AnimeRecord> {
    let document = Html::parse_document(html);

    let name = text_field(&document, &NAME).ok_or(CrawlerError::InvalidEntityPage {
        id,
        field: "og:title",
    })?;
    let mal_url = text_field(&document, &MAL_URL).ok_or(CrawlerError::InvalidEntityPage {
        id,
        field: "og:url",
    })?;
    let slug = slug_from_url(&mal_url);

    let synonyms = text_field(&document, &SYNONYMS)
        .map(|value| {
            value
                .split(", ")
                .map(|synonym| synonym.trim().to_string())
                .filter(|synonym| !synonym.is_empty())
                .collect()
        })
        .unwrap_or_default();

    // The site renders durations with an abbreviating period ("24 min. per
    // ep."); the period is presentation, not data.
    let duration = text_field(&document, &DURATION).map(|value| value.replace('.', ""));

    Ok(AnimeRecord {
        id,
        slug,
        name,
        english: text_field(&document, &ENGLISH),
        japanese: text_field(&document, &JAPANESE),
        synonyms,
        image: text_field(&document, &IMAGE),
        synopsis: synopsis(&document),
        mal_url,
        episodes: number_field(&document, &EPISODES),
        kind: text_field(&document, &TYPE),
        status: text_field(&document, &STATUS),
        premiered: text_field(&document, &PREMIERED),
        broadcast: text_field(&document, &BROADCAST),
        producers: link_titles(&document, &PRODUCERS),
        licensors: link_titles(&document, &LICENSORS),
        studios: link_titles(&document, &STUDIOS),
        source: text_field(&document, &SOURCE),
        genres: link_titles(&document, &GENRES),
        explicit_genres: link_titles(&document, &EXPLICIT_GENRES),
        demographics: link_titles(&document, &DEMOGRAPHICS),
        themes: link_titles(&document, &THEMES),
        duration,
        score: number_field(&document, &SCORE),
        scored_by: number_field(&document, &SCORED_BY),
        rating: text_field(&document, &RATING),
        rank: number_field(&document, &RANK),
        popularity: number_field(&document, &POPULARITY),
        related: related_groups(&document),
        members: number_field(&document, &MEMBERS),
        favorites: number_field(&document, &FAVORITES),
        external_links: external_links(&document),
        aired: text_field(&document, &AIRED),
    })
}

/// Synopsis text; the site's "nothing here yet" paragraph maps to absent
fn synopsis(document: &Html) -> Option<String> {
    let selector = Selector::parse(r#"[itemprop="description"]"#).ok()?;
    let text = document
        .select(&selector)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_string();

    if text.is_empty() || text.starts_with(NO_SYNOPSIS) {
        None
    } else {
        Some(text)
    }
}

/// External links, skipping the "more links" toggle pseudo-entry
fn external_links(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("div.external_links a.link") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter(|link| !link.value().classes().any(|class| class == "js-more-links"))
        .filter_map(|link| link.value().attr("href").map(str::to_string))
        .collect()
}

/// Related entries appear in two layouts: tiled cards and a compact table
fn related_groups(document: &Html) -> Vec<RelatedGroup> {
    let mut groups = Vec::new();
    collect_tiled_relations(document, &mut groups);
    collect_tabular_relations(document, &mut groups);
    groups
}

fn collect_tiled_relations(document: &Html, groups: &mut Vec<RelatedGroup>) {
    let Ok(entry_sel) = Selector::parse("div.related-entries div.entry") else {
        return;
    };
    let Ok(relation_sel) = Selector::parse("div.content div.relation") else {
        return;
    };
    let Ok(title_link_sel) = Selector::parse("div.content div.title a") else {
        return;
    };

    for entry in document.select(&entry_sel) {
        let Some(relation_node) = entry.select(&relation_sel).next() else {
            continue;
        };
        let relation = strip_parenthetical(&normalize_ws(
            &relation_node.text().collect::<String>(),
        ));

        let entries: Vec<RelatedEntry> = entry
            .select(&title_link_sel)
            .filter_map(linked_entry)
            .collect();
        if entries.is_empty() {
            continue;
        }

        groups.push(RelatedGroup { relation, entries });
    }
}

fn collect_tabular_relations(document: &Html, groups: &mut Vec<RelatedGroup>) {
    let Ok(row_sel) = Selector::parse("table.entries-table tr") else {
        return;
    };
    let Ok(cell_sel) = Selector::parse("td") else {
        return;
    };
    let Ok(link_sel) = Selector::parse("a") else {
        return;
    };

    for row in document.select(&row_sel) {
        let mut cells = row.select(&cell_sel);
        let (Some(relation_cell), Some(entries_cell)) = (cells.next(), cells.next()) else {
            continue;
        };

        let relation = normalize_ws(&relation_cell.text().collect::<String>())
            .replace(':', "")
            .trim()
            .to_string();

        let entries: Vec<RelatedEntry> = entries_cell
            .select(&link_sel)
            .filter_map(linked_entry)
            .collect();

        groups.push(RelatedGroup { relation, entries });
    }
}

/// Builds a sub-record from one `<a>`: id from the URL's first numeric path
/// segment, slug from the display title
fn linked_entry(link: ElementRef<'_>) -> Option<RelatedEntry> {
    let url = link.value().attr("href")?.to_string();
    let title = normalize_ws(&link.text().collect::<String>());
    if title.is_empty() {
        return None;
    }

    Some(RelatedEntry {
        id: id_from_url(&url),
        slug: slugify(&title),
        title,
        url,
    })
}

/// Drops a trailing parenthetical qualifier: "Adaptation (Manga)" -> "Adaptation"
fn strip_parenthetical(text: &str) -> String {
    match text.find(" (") {
        Some(position) => text[..position].trim().to_string(),
        None => text.trim().to_string(),
    }
}
