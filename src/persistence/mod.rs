//! Persisted state backed by LocalStorage
//!
//! Features:
//! - JSON slot content via serde
//! - Hydrate-or-default on creation, never failing the caller
//! - Write-through (or deferred, in order) on every change
//! - Change observers

pub mod cell;
pub mod codec;

pub use cell::{Hydration, PersistedCell, WritePolicy};
pub use codec::{Codec, JsonCodec};
