pub mod config;
pub mod dataset;
pub mod error;
pub mod sampler;
pub mod slug;
pub mod types;

pub use config::{load_site_config, parse_site_toml};
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use types::*;
