pub mod catalog;
pub mod classifier;
pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod observability;
pub mod sources;
pub mod synthesizer;

// Layered boundaries: use cases and ports, and the adapters behind them
pub mod app;
pub mod infra;

pub use app::HotelResolver;
pub use classifier::classify;
pub use config::ResolverConfig;
pub use domain::{CanonicalHotel, ResolutionOutcome, ResolutionResult, SourceCategory, SourceTag};
pub use error::{ResolverError, Result};
