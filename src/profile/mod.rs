//! Profile model and the load pipeline (remote first, then sample).
//!
//! Internals are split into:
//! - `model`:     canonical types handed to the rendering layer
//! - `raw`:       untrusted, all-optional input records
//! - `normalize`: raw input to canonical profile
//! - `scrape`:    markup to raw records
//! - `sample`:    the bundled substitute profile
//! - `loader`:    orchestration, phase tracking and fallback

pub mod loader;
mod model;
pub mod normalize;
pub mod raw;
pub mod sample;
pub mod scrape;

pub use loader::{FallbackPolicy, LoadOptions, LoadPhase, ProfileLoader};
pub use model::{
    Item, Profile, ProfileSource, Snapshot, StatKey, Stats, Status, StatusSlug,
};
pub use normalize::Normalizer;
pub use raw::{RawItem, RawProfile, RawStatus};
pub use sample::{SampleProvider, SampleSource};
pub use scrape::ExtractionStrategy;
