//! Puffin Core Library
//!
//! Process configuration and shared helpers for the Puffin web backend:
//!
//! - **Configuration**: compiled-in defaults, environment overrides with
//!   type coercion, and derived settings (version, full server name, menu links)
//! - **State**: the resolved configuration shared immutably across components
//! - **Utilities**: UUID parsing, word-preserving truncation, proxy unwrapping
//!
//! ## Modules
//!
//! - [`config`]: Configuration resolution
//! - [`error`]: Error types
//! - [`sanitize`]: Secret redaction for dumps and logs
//! - [`state`]: Shared application state
//! - [`util`]: String and identifier helpers
//!
//! ## Example
//!
//! ```ignore
//! use puffin_core::{config::Config, state::AppState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::init().await?;
//!     let state = AppState::new(config);
//!     // ... build and run server
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod sanitize;
pub mod state;
pub mod util;

pub use error::{ConfigError, ConfigResult};
