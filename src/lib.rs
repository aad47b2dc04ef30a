//! GitHub profile statistics card generator.
//!
//! The library covers one batch run end to end: authenticated REST fetches
//! with pagination, aggregation of the fetched records into a statistics
//! snapshot, deterministic SVG rendering driven by a display configuration,
//! and change-detecting persistence of the produced artifacts. The binary in
//! `main.rs` wires these stages into a sequential pipeline.

pub mod api;
pub mod artifact;
pub mod card;
pub mod config;
pub mod error;
pub mod fetch;
pub mod page;
pub mod stats;

pub use api::{ApiClient, ApiResponse, GithubClient};
pub use artifact::{PersistOutcome, embed_reference, persist};
pub use card::render_card;
pub use config::{DisplayConfig, load_display_config, parse_display_config};
pub use error::Error;
pub use fetch::{IssueTotals, Profile, Session};
pub use stats::{Snapshot, analyze_events, analyze_repos, contribution_calendar};
