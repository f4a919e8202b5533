//! Configuration loading and validation
//!
//! The harvester is configured through a TOML file with four tables:
//! `[site]` (entry URL and subject), `[browser]` (Chrome launch options),
//! `[crawler]` (wait and pacing intervals), `[output]` (file paths).

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{BrowserSettings, Config, CrawlerConfig, OutputConfig, SiteConfig};
pub use validation::validate;
