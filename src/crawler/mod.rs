//! Crawler module: HTTP fetching and ID-space scanning
//!
//! The fetcher is the single transport surface shared by the scanner and the
//! record assemblers; the scanner walks the candidate ID range and maintains
//! the checkpoint of confirmed-valid IDs.

mod fetcher;
mod scanner;

pub use fetcher::{build_http_client, fetch_page, probe_url};
pub use scanner::Scanner;
