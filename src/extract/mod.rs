//! Data-driven field extraction
//!
//! Every field on a catalog page is described by a [`FieldSpec`]: where its
//! anchor node is found and which placeholder strings count as "no value".
//! One generic routine interprets the descriptors, replacing the per-field
//! DOM-walking functions such sites usually accumulate.

mod fields;
mod ids;
mod sentinel;

pub use fields::{
    anchor_block, link_titles, normalize_ws, number_field, parse_number, text_field, Anchor,
    FieldSpec,
};
pub use ids::{id_from_url, slug_from_url, slugify};
pub use sentinel::{is_placeholder, DEFAULT_SENTINELS, NO_GENRES, NO_SYNOPSIS};
