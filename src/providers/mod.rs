//! Provider layer - queries external music sources and normalizes results.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Model types** (`crate::model`) - Internal types that represent our records
//! - **API DTOs** (`invidious/dto.rs`, `jamendo/dto.rs`, ...) - Exact API response shapes
//! - **Adapters** - Convert DTOs to model types, defensively
//! - **Clients** - HTTP clients for external APIs, one per provider
//! - **MirrorPool** - Sequential fallback over community-run mirror instances
//!
//! This decoupling means:
//! 1. API changes don't ripple through our codebase
//! 2. We can test API contracts independently
//! 3. Providers can be reordered or dropped via configuration
//!
//! Every adapter implements [`MusicProvider`]; the aggregation layer only ever
//! sees that trait.

pub mod domain;
pub mod invidious;
pub mod itunes;
pub mod jamendo;
pub mod lyrics;
pub mod mirrors;
pub mod traits;
pub mod workers;

pub use domain::ProviderError;
pub use invidious::InvidiousClient;
pub use itunes::ITunesClient;
pub use jamendo::JamendoClient;
pub use lyrics::LyricsClient;
pub use mirrors::MirrorPool;
pub use traits::MusicProvider;
pub use workers::WorkersClient;
