//! Configuration loading and validation
//!
//! Configuration is read from a TOML file and passed explicitly into the
//! components that need it; there is no process-wide configuration state.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{CheckpointBackend, CheckpointConfig, Config, ScanConfig, SiteConfig, UserAgentConfig};
pub use validation::validate;
