//! Catalog taxonomy pages: genre groups, genre descriptions, season archive
//!
//! The search index page lists four link groups (genres, explicit genres,
//! themes, demographics) sharing one markup shape; the season archive is a
//! flat list of season links. These produce small lookup tables rather than
//! entity records, and an unavailable page yields an empty list.

use crate::config::SiteConfig;
use crate::crawler::fetch_page;
use crate::extract::{normalize_ws, parse_number, slugify};
use reqwest::Client;
use scraper::{Html, Selector};
use serde::Serialize;

/// One entry of a genre-like group on the search index page
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenreEntry {
    pub id: u32,
    pub mal_id: u32,
    pub slug: String,
    pub name: String,
    pub titles_count: u64,
    pub link: String,
}

/// Which of the index page's link groups to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenreGroup {
    Genres,
    ExplicitGenres,
    Themes,
    Demographics,
}

impl GenreGroup {
    /// Position of the group among the page's `.genre-link` blocks
    fn index(self) -> usize {
        match self {
            GenreGroup::Genres => 0,
            GenreGroup::ExplicitGenres => 1,
            GenreGroup::Themes => 2,
            GenreGroup::Demographics => 3,
        }
    }
}

/// Description of a single genre
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenreDescription {
    pub mal_id: u32,
    pub description: String,
}

/// One entry of the season archive
#[derive(Debug, Serialize, PartialEq)]
pub struct SeasonEntry {
    pub id: u32,
    pub slug: String,
    pub season: String,
    pub url: String,
}

/// Fetches one genre group from the search index page
///
/// An unavailable page yields an empty list.
pub async fn crawl_genre_catalog(
    client: &Client,
    site: &SiteConfig,
    group: GenreGroup,
) -> Vec<GenreEntry> {
    match fetch_page(client, &site.genres_url()).await {
        None => Vec::new(),
        Some(body) => assemble_genre_catalog(&body, group),
    }
}

/// Assembles one genre group from the search index document
pub fn assemble_genre_catalog(html: &str, group: GenreGroup) -> Vec<GenreEntry> {
    let document = Html::parse_document(html);

    let Ok(group_sel) = Selector::parse(".anime-manga-search .genre-link") else {
        return Vec::new();
    };
    let Ok(entry_sel) = Selector::parse(".genre-name-link") else {
        return Vec::new();
    };

    let Some(group_block) = document.select(&group_sel).nth(group.index()) else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for link in group_block.select(&entry_sel) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let Some((mal_id, slug)) = id_and_slug_from_href(href) else {
            continue;
        };

        let text = normalize_ws(&link.text().collect::<String>());
        let (name, titles_count) = split_name_and_count(&text);
        if name.is_empty() {
            continue;
        }

        entries.push(GenreEntry {
            id: entries.len() as u32 + 1,
            mal_id,
            slug,
            name,
            titles_count,
            link: href.to_string(),
        });
    }

    entries
}

/// Fetches a genre's description page
///
/// An unavailable page or a missing description block both resolve to the
/// configured not-found message.
pub async fn crawl_genre_description(
    client: &Client,
    site: &SiteConfig,
    id: u32,
) -> GenreDescription {
    let description = match fetch_page(client, &site.genre_url(id)).await {
        None => None,
        Some(body) => assemble_genre_description(&body),
    };

    GenreDescription {
        mal_id: id,
        description: description.unwrap_or_else(|| site.description_not_found.clone()),
    }
}

/// The description block's text, if the page carries one
pub fn assemble_genre_description(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("#content .genre-description").ok()?;

    let text = normalize_ws(
        &document
            .select(&selector)
            .next()?
            .text()
            .collect::<String>(),
    );
    (!text.is_empty()).then_some(text)
}

/// Fetches the season archive
///
/// An unavailable page yields an empty list.
pub async fn crawl_seasons(client: &Client, site: &SiteConfig) -> Vec<SeasonEntry> {
    match fetch_page(client, &site.seasons_url()).await {
        None => Vec::new(),
        Some(body) => assemble_seasons(&body),
    }
}

/// Assembles the season list from the archive document
pub fn assemble_seasons(html: &str) -> Vec<SeasonEntry> {
    let document = Html::parse_document(html);

    let Ok(link_sel) = Selector::parse(".js-categories-seasonal .anime-seasonal-byseason a")
    else {
        return Vec::new();
    };

    let mut seasons = Vec::new();
    for link in document.select(&link_sel) {
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        let season = normalize_ws(&link.text().collect::<String>());
        if season.is_empty() {
            continue;
        }

        seasons.push(SeasonEntry {
            id: seasons.len() as u32 + 1,
            slug: slugify(&season),
            season,
            url: href.to_string(),
        });
    }

    seasons
}

/// Splits an entry href into the numeric ID and the trailing slug segments
///
/// "/anime/genre/1/Action" yields (1, "action").
fn id_and_slug_from_href(href: &str) -> Option<(u32, String)> {
    let path = href.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let position = segments
        .iter()
        .position(|segment| segment.chars().all(|c| c.is_ascii_digit()) && !segment.is_empty())?;
    let mal_id: u32 = segments[position].parse().ok()?;

    let rest = segments.get(position + 1..).unwrap_or_default().join("/");
    if rest.is_empty() {
        return None;
    }

    Some((mal_id, slugify(&rest)))
}

/// Splits "Action (12,345)" into the name and the parenthesized count
fn split_name_and_count(text: &str) -> (String, u64) {
    if let Some(open) = text.rfind(" (") {
        if let Some(inner) = text[open + 2..].strip_suffix(')') {
            if let Some(count) = parse_number::<u64>(inner) {
                return (text[..open].trim().to_string(), count);
            }
        }
    }
    (text.trim().to_string(), 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_page() -> String {
        r#"<html><body>
<div class="anime-manga-search">
  <div class="genre-link">
    <a class="genre-name-link" href="/anime/genre/1/Action">Action (5,082)</a>
    <a class="genre-name-link" href="/anime/genre/2/Adventure">Adventure (4,545)</a>
  </div>
  <div class="genre-link">
    <a class="genre-name-link" href="/anime/genre/12/Hentai">Hentai (1,570)</a>
  </div>
  <div class="genre-link">
    <a class="genre-name-link" href="/anime/genre/50/Adult_Cast">Adult Cast (1,234)</a>
  </div>
  <div class="genre-link">
    <a class="genre-name-link" href="/anime/genre/42/Seinen">Seinen (1,109)</a>
  </div>
</div>
</body></html>"#
            .to_string()
    }

    #[test]
    fn test_genre_group_entries() {
        let entries = assemble_genre_catalog(&index_page(), GenreGroup::Genres);

        assert_eq!(
            entries,
            vec![
                GenreEntry {
                    id: 1,
                    mal_id: 1,
                    slug: "action".to_string(),
                    name: "Action".to_string(),
                    titles_count: 5_082,
                    link: "/anime/genre/1/Action".to_string(),
                },
                GenreEntry {
                    id: 2,
                    mal_id: 2,
                    slug: "adventure".to_string(),
                    name: "Adventure".to_string(),
                    titles_count: 4_545,
                    link: "/anime/genre/2/Adventure".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_group_selection_by_position() {
        let themes = assemble_genre_catalog(&index_page(), GenreGroup::Themes);
        assert_eq!(themes.len(), 1);
        assert_eq!(themes[0].slug, "adult-cast");

        let demographics = assemble_genre_catalog(&index_page(), GenreGroup::Demographics);
        assert_eq!(demographics[0].name, "Seinen");
    }

    #[test]
    fn test_missing_group_is_empty() {
        let html = r#"<html><body><div class="anime-manga-search"></div></body></html>"#;
        assert!(assemble_genre_catalog(html, GenreGroup::Genres).is_empty());
    }

    #[test]
    fn test_entry_without_numeric_id_is_skipped() {
        let html = r#"<html><body><div class="anime-manga-search">
            <div class="genre-link">
              <a class="genre-name-link" href="/anime/genre/broken">Broken</a>
              <a class="genre-name-link" href="/anime/genre/3/Cars">Cars (171)</a>
            </div>
        </div></body></html>"#;

        let entries = assemble_genre_catalog(html, GenreGroup::Genres);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].mal_id, 3);
        assert_eq!(entries[0].id, 1);
    }

    #[test]
    fn test_name_without_count() {
        assert_eq!(split_name_and_count("Action"), ("Action".to_string(), 0));
        assert_eq!(
            split_name_and_count("Action (5,082)"),
            ("Action".to_string(), 5_082)
        );
    }

    #[test]
    fn test_genre_description_extraction() {
        let html = r#"<html><body><div id="content">
            <div class="genre-description">Action anime usually involve a fairly straightforward story.</div>
        </div></body></html>"#;

        assert_eq!(
            assemble_genre_description(html),
            Some("Action anime usually involve a fairly straightforward story.".to_string())
        );
    }

    #[test]
    fn test_genre_description_missing() {
        assert_eq!(assemble_genre_description("<html><body></body></html>"), None);
    }

    #[test]
    fn test_season_archive() {
        let html = r#"<html><body><div class="js-categories-seasonal">
            <table class="anime-seasonal-byseason">
              <tr>
                <td><a href="/anime/season/1998/spring">Spring 1998</a></td>
                <td><a href="/anime/season/1998/summer">Summer 1998</a></td>
              </tr>
            </table>
        </div></body></html>"#;

        let seasons = assemble_seasons(html);
        assert_eq!(seasons.len(), 2);
        assert_eq!(seasons[0].season, "Spring 1998");
        assert_eq!(seasons[0].slug, "spring-1998");
        assert_eq!(seasons[0].url, "/anime/season/1998/spring");
        assert_eq!(seasons[1].id, 2);
    }

    #[test]
    fn test_empty_season_archive() {
        assert!(assemble_seasons("<html><body></body></html>").is_empty());
    }
}
