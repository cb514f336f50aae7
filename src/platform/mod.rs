//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, in-memory map elsewhere)

pub mod storage;

pub use storage::{MemoryStorage, SlotStorage};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
