//! Core components of the `anime-garden` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`GardenClient`] and its builder.
//! - The primary [`GardenError`] type.
//! - The [`Relay`] seam used to fetch remote pages.

/// The main client (`GardenClient`), builder, and configuration.
pub mod client;
/// The primary error type (`GardenError`) for the crate.
pub mod error;
/// The `Relay` trait and its HTTP implementation.
pub mod relay;

pub(crate) mod net;
pub(crate) mod wire;

pub use client::constants::{DEFAULT_AVATAR, DEFAULT_BASE_SITE};
pub use client::{GardenClient, GardenClientBuilder};
pub use error::GardenError;
pub use relay::{Relay, RelayFuture, RelayResponse};
