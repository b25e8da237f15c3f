//! Site-specific placeholder strings
//!
//! The catalog site renders "no value" as literal text in several shapes.
//! These sentinels must resolve to an absent field, never be returned as
//! data.

/// Placeholders the site uses interchangeably for scalar fields
pub const DEFAULT_SENTINELS: &[&str] = &["Unknown", "N/A", "None found", "?"];

/// Leading text of an empty synopsis block
pub const NO_SYNOPSIS: &str = "No synopsis information has been added to this title.";

/// Marker text of an empty genre block
pub const NO_GENRES: &str = "No genres have been added yet";

/// Whether a trimmed value is a placeholder rather than data
///
/// `extra` carries per-field sentinels (e.g. "None" for the audience
/// rating) on top of the defaults.
pub fn is_placeholder(value: &str, extra: &[&str]) -> bool {
    DEFAULT_SENTINELS
        .iter()
        .chain(extra.iter())
        .any(|sentinel| *sentinel == value)
}
