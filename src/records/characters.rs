//! Character and staff page assembly
//!
//! Each character block is a small table carrying the character's identity
//! and a nested list of voice-actor rows. Blocks lacking a name node are
//! markup defects and are skipped; they never fail the page.

use crate::config::SiteConfig;
use crate::crawler::fetch_page;
use crate::extract::{id_from_url, normalize_ws, parse_number, slugify};
use crate::records::Outcome;
use crate::Result;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

/// One character with its voice-actor roster
#[derive(Debug, Serialize, PartialEq)]
pub struct CharacterEntry {
    pub id: Option<u32>,
    pub slug: String,
    pub name: String,
    pub favorites: Option<u64>,
    pub role: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
    pub voice_actors: Vec<VoiceActor>,
}

/// A voice actor attached to a character
#[derive(Debug, Serialize, PartialEq)]
pub struct VoiceActor {
    pub id: Option<u32>,
    pub slug: String,
    pub name: String,
    pub language: Option<String>,
    pub image: Option<String>,
    pub url: Option<String>,
}

/// Fetches and assembles the character/staff roster for one anime ID
pub async fn crawl_characters(
    client: &Client,
    site: &SiteConfig,
    id: u32,
) -> Result<Outcome<Vec<CharacterEntry>>> {
    let url = site.characters_url(id);
    match fetch_page(client, &url).await {
        None => Ok(Outcome::not_found(id, "Characters and staff Not Found")),
        Some(body) => Ok(Outcome::Found(assemble_characters(&body))),
    }
}

/// Assembles character entries from a fetched character/staff document
pub fn assemble_characters(html: &str) -> Vec<CharacterEntry> {
    let document = Html::parse_document(html);

    let Ok(block_sel) = Selector::parse("div.anime-character-container table") else {
        return Vec::new();
    };
    let Ok(name_sel) = Selector::parse("div.spaceit_pad a h3.h3_character_name") else {
        return Vec::new();
    };
    let Ok(link_sel) = Selector::parse("a.fw-n") else {
        return Vec::new();
    };
    let Ok(image_sel) = Selector::parse("a.fw-n img") else {
        return Vec::new();
    };
    let Ok(favorites_sel) = Selector::parse("div.js-anime-character-favorites") else {
        return Vec::new();
    };
    let Ok(role_sel) = Selector::parse("div.spaceit_pad") else {
        return Vec::new();
    };
    let Ok(any_link_sel) = Selector::parse("a") else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for block in document.select(&block_sel) {
        let Some(name_node) = block.select(&name_sel).next() else {
            continue;
        };
        let name = normalize_ws(&name_node.text().collect::<String>());
        if name.is_empty() {
            continue;
        }

        let url = block
            .select(&link_sel)
            .next()
            .and_then(|link| link.value().attr("href"))
            .map(str::to_string);
        let image = block
            .select(&image_sel)
            .next()
            .and_then(|img| img.value().attr("data-src"))
            .map(str::to_string);
        let favorites = block
            .select(&favorites_sel)
            .next()
            .map(|node| normalize_ws(&node.text().collect::<String>()))
            .and_then(|text| parse_number(&text));

        // The role is the first padded line that is plain text rather than
        // a link (those are the name and voice-actor lines).
        let role = block
            .select(&role_sel)
            .find(|node| node.select(&any_link_sel).next().is_none())
            .map(|node| normalize_ws(&node.text().collect::<String>()))
            .filter(|role| !role.is_empty());

        entries.push(CharacterEntry {
            id: url.as_deref().and_then(id_from_url),
            slug: slugify(&name),
            name,
            favorites,
            role,
            image,
            url,
            voice_actors: voice_actors(block),
        });
    }

    entries
}

/// Voice-actor rows nested inside one character block
fn voice_actors(block: ElementRef<'_>) -> Vec<VoiceActor> {
    let Ok(row_sel) = Selector::parse("tr.js-anime-character-va-lang") else {
        return Vec::new();
    };
    let Ok(name_sel) = Selector::parse("div.spaceit_pad a") else {
        return Vec::new();
    };
    let Ok(language_sel) = Selector::parse("div.js-anime-character-language") else {
        return Vec::new();
    };
    let Ok(image_sel) = Selector::parse("div.picSurround a img") else {
        return Vec::new();
    };

    let mut actors = Vec::new();
    for row in block.select(&row_sel) {
        let Some(name_link) = row.select(&name_sel).next() else {
            continue;
        };
        let name = normalize_ws(&name_link.text().collect::<String>());
        if name.is_empty() {
            continue;
        }

        let url = name_link.value().attr("href").map(str::to_string);
        let language = row
            .select(&language_sel)
            .next()
            .map(|node| normalize_ws(&node.text().collect::<String>()))
            .filter(|language| !language.is_empty());
        let image = row
            .select(&image_sel)
            .next()
            .and_then(|img| img.value().attr("data-src"))
            .map(str::to_string);

        actors.push(VoiceActor {
            id: url.as_deref().and_then(id_from_url),
            slug: slugify(&name),
            name,
            language,
            image,
            url,
        });
    }

    actors
}
