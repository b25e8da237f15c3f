//! Episode list page assembly
//!
//! Episodes live in a table; each row is independent. A row without a
//! parseable episode number is a markup defect and is skipped; an empty
//! table is a valid empty list.

use crate::config::SiteConfig;
use crate::crawler::fetch_page;
use crate::extract::{normalize_ws, parse_number};
use crate::records::Outcome;
use crate::Result;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Serialize;

/// One row of the episode table
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeRow {
    pub id: u32,
    pub url: Option<String>,
    pub title: Option<String>,
    pub japanese: Option<String>,
    pub romanji: Option<String>,
    pub aired: Option<String>,
    pub score: Option<f64>,
    pub video_url: Option<String>,
}

/// Fetches and assembles the episode list for one anime ID
pub async fn crawl_episodes(
    client: &Client,
    site: &SiteConfig,
    id: u32,
) -> Result<Outcome<Vec<EpisodeRow>>> {
    let url = site.episodes_url(id);
    match fetch_page(client, &url).await {
        None => Ok(Outcome::not_found(id, "Anime episodes Not Found")),
        Some(body) => Ok(Outcome::Found(assemble_episodes(&body))),
    }
}

/// Assembles episode rows from a fetched episode list document
pub fn assemble_episodes(html: &str) -> Vec<EpisodeRow> {
    let document = Html::parse_document(html);

    let Ok(row_sel) = Selector::parse("table.episode_list tr") else {
        return Vec::new();
    };
    let Ok(number_sel) = Selector::parse("td.episode-number") else {
        return Vec::new();
    };
    let Ok(title_link_sel) = Selector::parse("td.episode-title a") else {
        return Vec::new();
    };
    let Ok(alt_title_sel) = Selector::parse("td.episode-title span.di-ib") else {
        return Vec::new();
    };
    let Ok(aired_sel) = Selector::parse("td.episode-aired") else {
        return Vec::new();
    };
    let Ok(poll_sel) = Selector::parse("td.episode-poll") else {
        return Vec::new();
    };
    let Ok(video_sel) = Selector::parse("td.episode-video a") else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    for row in document.select(&row_sel) {
        let Some(number_cell) = row.select(&number_sel).next() else {
            continue;
        };
        let number_text = normalize_ws(&number_cell.text().collect::<String>());
        let Some(id) = parse_number::<u32>(&number_text) else {
            continue;
        };

        let title_link = row.select(&title_link_sel).next();
        let title = title_link
            .map(|link| normalize_ws(&link.text().collect::<String>()))
            .filter(|title| !title.is_empty());
        let url = title_link
            .and_then(|link| link.value().attr("href"))
            .map(str::to_string);

        let alt_text = row
            .select(&alt_title_sel)
            .next()
            .map(|span| normalize_ws(&span.text().collect::<String>()))
            .unwrap_or_default();
        let (romanji, japanese) = split_alt_titles(&alt_text);

        let aired = row
            .select(&aired_sel)
            .next()
            .map(|cell| normalize_ws(&cell.text().collect::<String>()))
            .filter(|aired| !aired.is_empty() && aired != "N/A");

        let score = row
            .select(&poll_sel)
            .next()
            .and_then(|cell| cell.value().attr("data-raw"))
            .and_then(parse_number::<f64>);

        let video_url = row
            .select(&video_sel)
            .next()
            .and_then(|link| link.value().attr("href"))
            .map(str::to_string);

        rows.push(EpisodeRow {
            id,
            url,
            title,
            japanese,
            romanji,
            aired,
            score,
            video_url,
        });
    }

    rows
}

/// Splits the secondary title line "Romanized Title (Native Title)"
///
/// Text without the parenthesized native title carries no usable pair and
/// maps to two absent values.
fn split_alt_titles(text: &str) -> (Option<String>, Option<String>) {
    let text = text.trim();
    let Some(open) = text.rfind('(') else {
        return (None, None);
    };
    let Some(inner) = text[open + 1..].strip_suffix(')') else {
        return (None, None);
    };

    let romanji = text[..open].trim();
    let japanese = inner.trim();
    (
        (!romanji.is_empty()).then(|| romanji.to_string()),
        (!japanese.is_empty()).then(|| japanese.to_string()),
    )
}
