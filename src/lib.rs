//! anime-garden: fetch a public anime-planet watch list and turn it into a typed profile.
//!
//! Pages are fetched through a [`Relay`] (the HTTP [`GardenClient`] by default), scraped with
//! a swappable [`ExtractionStrategy`] and normalized into a [`Profile`]. When the upstream
//! fails, [`ProfileLoader`] serves the bundled sample instead.

pub mod address;
pub mod core;
pub mod envelope;
pub mod profile;

pub use address::{ListingPage, listing_address, page_address, summary_address};
pub use crate::core::{
    DEFAULT_AVATAR, DEFAULT_BASE_SITE, GardenClient, GardenClientBuilder, GardenError, Relay,
    RelayFuture, RelayResponse,
};
pub use envelope::{
    EnvelopeBody, EnvelopeSource, ProfileEnvelope, ProfileQuery, handle_profile_request,
};
pub use profile::{
    ExtractionStrategy, FallbackPolicy, Item, LoadOptions, LoadPhase, Normalizer, Profile,
    ProfileLoader, ProfileSource, RawItem, RawProfile, RawStatus, SampleProvider, SampleSource,
    Snapshot, StatKey, Stats, Status, StatusSlug,
};
