//! Shared fixtures for talkmap integration tests
//!
//! Rosters are written to temporary CSV files so tests go through the same
//! readers the CLI uses. Mock providers make the embedding and projection
//! stages observable without a model download.

pub mod fixtures;
pub mod mock_providers;

pub use fixtures::{roster_csv, talk_rows, write_csv, ROSTER_HEADER};
pub use mock_providers::{FixedProjector, LookupEmbedder, RecordingProjector};
