//! Identifier and slug derivation from entity URLs

use url::Url;

/// Extracts the entity ID from a URL: the first path segment that starts
/// with digits yields its leading digit run
///
/// Works on absolute URLs and bare hrefs alike.
pub fn id_from_url(url: &str) -> Option<u32> {
    let path = path_of(url);
    for segment in path.split('/') {
        let digits: String = segment.chars().take_while(char::is_ascii_digit).collect();
        if !digits.is_empty() {
            return digits.parse().ok();
        }
    }
    None
}

/// Lower-cases, strips commas, and hyphenates spaces and underscores
pub fn slugify(input: &str) -> String {
    input.trim().to_lowercase().replace(',', "").replace([' ', '_'], "-")
}

/// Slug of a URL: its final non-empty path segment, slugified
pub fn slug_from_url(url: &str) -> Option<String> {
    let path = path_of(url);
    let segment = path.split('/').rev().find(|segment| !segment.is_empty())?;
    Some(slugify(segment))
}

fn path_of(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        // Relative href: strip query and fragment, keep the path
        Err(_) => url
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}
