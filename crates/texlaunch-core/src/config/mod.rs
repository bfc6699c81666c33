//! Configuration layer.
//!
//! Every environment variable is read here; the rest of the workspace only
//! sees structured config.
//!
//! - `loader`: `.env` loading plus `env_or` / `env_optional` / `env_bool`
//! - `schema`: `LaunchConfig`, `ObservabilityConfig`
//! - `env_keys`: key constants

pub mod env_keys;
pub mod loader;
pub mod schema;

pub use loader::{env_bool, env_optional, env_or, load_dotenv, load_dotenv_from_dir};
pub use schema::{LaunchConfig, LaunchOverrides, ObservabilityConfig};
