//! Configuration types
//!
//! Board-agnostic launcher configuration. Defaults are the canonical
//! timings; a board may override them from an embedded TOML file parsed
//! by [`parse_config`].

pub mod loader;
pub mod timing;
pub mod types;

pub use loader::{parse_config, ConfigError};
pub use timing::*;
pub use types::*;
