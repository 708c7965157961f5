pub mod config;
pub mod error;
pub mod flatten;
pub mod markdown;

pub use config::Config;
pub use error::ConfigError;
pub use flatten::unflatten_extension_configs;
pub use markdown::MarkdownConfig;
