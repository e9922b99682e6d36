//! Remote snapshot provider contract and the simulated implementation.
//!
//! # Responsibility
//! - Define the fetch contract consumed by synchronization.
//!
//! # Invariants
//! - A fetch returns the provider's full current view, never a delta.
//! - Consumers must treat every implementation as unreliable and latent.

pub mod source;
