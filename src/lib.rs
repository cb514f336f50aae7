//! Favorite Roster - random user cards with persisted favorites
//!
//! Core modules:
//! - `persistence`: State cells mirrored into LocalStorage
//! - `platform`: Browser/native storage backends
//! - `settings`: Storage keys, count bounds, API endpoint
//! - `user_count`: Persisted requested-user count
//! - `favorites`: Persisted favorites list
//! - `roster`: Random user API model

pub mod error;
pub mod favorites;
pub mod persistence;
pub mod platform;
pub mod roster;
pub mod settings;
pub mod user_count;

pub use error::{CodecError, SlotReadFailure, SlotWriteFailure, StorageError};
pub use favorites::Favorites;
pub use persistence::{Hydration, PersistedCell, WritePolicy};
pub use platform::{MemoryStorage, SlotStorage};
pub use settings::Settings;
pub use user_count::UserCount;
