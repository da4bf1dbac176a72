//! # Video Generation
//!
//! Everything that talks to the external video-generation service lives here.
//! The core reducer only ever sees the outcome: a [`VideoLocation`] or a
//! [`GenerationError`].
//!
//! ```text
//! core::action ──Effect::SpawnRequest──▶ tui ──▶ VideoService::generate()
//!                                                   │
//!      Action::GenerationFinished ◀─────────────────┘
//! ```

pub mod download;
pub mod http;
pub mod service;
pub mod types;

pub use download::{DownloadError, Downloader};
pub use http::HttpVideoService;
pub use service::{GenerationError, VideoService};
pub use types::{GenerateVideoRequest, GenerateVideoResponse, VideoLocation};
