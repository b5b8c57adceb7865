//! registry
//!
//! Read-only access to the AiiDAlab app registry.
//!
//! # Architecture
//!
//! The registry is an external JSON source. Nothing in the reconciler
//! depends on it; the `registry` command uses it to display app metadata.
//!
//! # Example
//!
//! ```ignore
//! use aiidalab_develop::registry::RegistryClient;
//!
//! let client = RegistryClient::default();
//! let entry = client.fetch_app("aiidalab-widgets-base").await?;
//! println!("{}", serde_json::to_string_pretty(&entry)?);
//! ```

mod client;

pub use client::{app_summaries, AppSummary, RegistryClient, RegistryError, DEFAULT_REGISTRY_URL};
