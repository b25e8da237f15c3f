//! Record assemblers: one fetched document in, one typed record out
//!
//! Each submodule owns one entity kind of the catalog site. Assembly is pure
//! and stateless; the only inputs are the document text and the requested
//! ID, so calls are independent and safe to run concurrently.

mod anime;
mod catalog;
mod characters;
mod episodes;

pub use anime::{assemble_anime, crawl_anime, AnimeRecord, RelatedEntry, RelatedGroup};
pub use catalog::{
    assemble_genre_catalog, assemble_seasons, crawl_genre_catalog, crawl_genre_description,
    crawl_seasons, GenreDescription, GenreEntry, GenreGroup, SeasonEntry,
};
pub use characters::{assemble_characters, crawl_characters, CharacterEntry, VoiceActor};
pub use episodes::{assemble_episodes, crawl_episodes, EpisodeRow};

use serde::Serialize;

/// Structured result for a fetch that produced no document
///
/// Serializes to `{"malId": n, "error": "..."}`, the shape callers receive
/// instead of an exception when an entity is unavailable.
#[derive(Debug, Clone, Serialize)]
pub struct NotFound {
    #[serde(rename = "malId")]
    pub mal_id: u32,
    pub error: &'static str,
}

/// Outcome of a single-entity crawl: the record, or a not-found marker
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Outcome<T> {
    Found(T),
    NotFound(NotFound),
}

impl<T> Outcome<T> {
    /// The not-found marker for the given ID and entity-specific message
    pub fn not_found(mal_id: u32, error: &'static str) -> Self {
        Outcome::NotFound(NotFound { mal_id, error })
    }

    /// Whether this outcome carries a record
    pub fn is_found(&self) -> bool {
        matches!(self, Outcome::Found(_))
    }
}
