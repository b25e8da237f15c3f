use serde::Deserialize;

/// Main configuration structure for the crawler
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub scan: ScanConfig,
    pub checkpoint: CheckpointConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
}

/// Catalog site layout: base URL and per-entity path templates
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the catalog site
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path prefix for anime entity pages
    #[serde(rename = "anime-path", default = "default_anime_path")]
    pub anime_path: String,

    /// Path of the search index page carrying the genre catalog
    #[serde(rename = "genres-path", default = "default_genres_path")]
    pub genres_path: String,

    /// Path prefix for single-genre description pages
    #[serde(rename = "genre-path", default = "default_genre_path")]
    pub genre_path: String,

    /// Path of the season archive page
    #[serde(rename = "season-path", default = "default_season_path")]
    pub season_path: String,

    /// Message substituted when a genre description is absent
    #[serde(rename = "description-not-found", default = "default_not_found")]
    pub description_not_found: String,
}

fn default_anime_path() -> String {
    "/anime".to_string()
}

fn default_genres_path() -> String {
    "/anime.php".to_string()
}

fn default_genre_path() -> String {
    "/anime/genre".to_string()
}

fn default_season_path() -> String {
    "/anime/season/archive".to_string()
}

fn default_not_found() -> String {
    "Description not found".to_string()
}

impl SiteConfig {
    fn root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Canonical URL of an anime entity page; also the URL the scanner probes
    pub fn anime_url(&self, id: u32) -> String {
        format!("{}{}/{}", self.root(), self.anime_path, id)
    }

    /// URL of an anime's episode list page
    pub fn episodes_url(&self, id: u32) -> String {
        format!("{}{}/{}/_/episode", self.root(), self.anime_path, id)
    }

    /// URL of an anime's character and staff page
    pub fn characters_url(&self, id: u32) -> String {
        format!("{}{}/{}/_/characters", self.root(), self.anime_path, id)
    }

    /// URL of the search index page (genre catalog source)
    pub fn genres_url(&self) -> String {
        format!("{}{}", self.root(), self.genres_path)
    }

    /// URL of a single genre's description page
    pub fn genre_url(&self, id: u32) -> String {
        format!("{}{}/{}", self.root(), self.genre_path, id)
    }

    /// URL of the season archive page
    pub fn seasons_url(&self) -> String {
        format!("{}{}", self.root(), self.season_path)
    }
}

/// ID-space scan behavior
#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    /// Upper bound of the candidate ID range
    #[serde(rename = "last-id")]
    pub last_id: u32,

    /// Number of candidate IDs probed per batch
    #[serde(rename = "batch-size")]
    pub batch_size: u32,

    /// Seconds slept between batches
    #[serde(rename = "sleep-interval")]
    pub sleep_interval: u64,
}

/// Checkpoint persistence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CheckpointConfig {
    /// Persistence medium for the set of confirmed-valid IDs
    #[serde(default)]
    pub backend: CheckpointBackend,

    /// Path of the checkpoint file or database
    pub path: String,
}

/// Available checkpoint persistence media
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CheckpointBackend {
    #[default]
    Json,
    Sqlite,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteConfig {
        SiteConfig {
            base_url: "https://catalog.example/".to_string(),
            anime_path: default_anime_path(),
            genres_path: default_genres_path(),
            genre_path: default_genre_path(),
            season_path: default_season_path(),
            description_not_found: default_not_found(),
        }
    }

    #[test]
    fn test_anime_url_strips_trailing_slash() {
        assert_eq!(site().anime_url(5), "https://catalog.example/anime/5");
    }

    #[test]
    fn test_episodes_and_characters_urls() {
        let s = site();
        assert_eq!(s.episodes_url(1), "https://catalog.example/anime/1/_/episode");
        assert_eq!(
            s.characters_url(1),
            "https://catalog.example/anime/1/_/characters"
        );
    }

    #[test]
    fn test_catalog_urls() {
        let s = site();
        assert_eq!(s.genres_url(), "https://catalog.example/anime.php");
        assert_eq!(s.genre_url(4), "https://catalog.example/anime/genre/4");
        assert_eq!(s.seasons_url(), "https://catalog.example/anime/season/archive");
    }
}
