//! Persisted cell: in-memory state mirrored into a storage slot
//!
//! A [`PersistedCell`] hydrates from its slot on creation and writes every
//! later change back. Storage problems never reach the caller: they are
//! logged, recorded, and the cell keeps serving its in-memory value.

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::codec::{Codec, JsonCodec};
use crate::error::{SlotReadFailure, SlotWriteFailure};
use crate::platform::SlotStorage;

/// How the cell's value was obtained at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydration {
    /// Decoded from the slot
    Restored,
    /// Slot never written; default used
    Missing,
    /// Slot content unreadable; default used
    Corrupt,
    /// Backend read failed; default used
    Unavailable,
}

impl Hydration {
    /// Whether the default was substituted
    pub fn used_default(&self) -> bool {
        !matches!(self, Hydration::Restored)
    }
}

/// When a change is written to the slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Inside the setter, right after the in-memory update
    #[default]
    Immediate,
    /// Queued in change order until [`PersistedCell::flush`]
    Deferred,
}

type Observer<T> = Box<dyn FnMut(&T)>;

/// Issues encoded writes to one slot, flushing any queue when dropped
struct SlotWriter<B: SlotStorage> {
    key: String,
    backend: B,
    pending: VecDeque<String>,
    last_error: Option<SlotWriteFailure>,
}

impl<B: SlotStorage> SlotWriter<B> {
    fn flush(&mut self) {
        while let Some(text) = self.pending.pop_front() {
            self.write(text);
        }
    }

    fn write(&mut self, text: String) {
        match self.backend.set(&self.key, &text) {
            Ok(()) => self.last_error = None,
            Err(source) => self.record_failure(SlotWriteFailure::Backend {
                key: self.key.clone(),
                source,
            }),
        }
    }

    fn record_failure(&mut self, failure: SlotWriteFailure) {
        log::error!("{}; keeping in-memory value", failure);
        self.last_error = Some(failure);
    }
}

impl<B: SlotStorage> Drop for SlotWriter<B> {
    fn drop(&mut self) {
        if !self.pending.is_empty() {
            log::debug!("Flushing {} pending writes for '{}'", self.pending.len(), self.key);
            self.flush();
        }
    }
}

/// A value that survives restarts by mirroring into a durable slot
pub struct PersistedCell<T, B, C = JsonCodec>
where
    B: SlotStorage,
    C: Codec<T>,
{
    value: T,
    codec: C,
    policy: WritePolicy,
    hydration: Hydration,
    observers: Vec<Observer<T>>,
    writer: SlotWriter<B>,
}

impl<T, B> PersistedCell<T, B, JsonCodec>
where
    T: Serialize + DeserializeOwned,
    B: SlotStorage,
{
    /// Bind `key` with JSON content, falling back to `default`
    pub fn new(key: impl Into<String>, default: T, backend: B) -> Self {
        Self::with_codec(key, default, JsonCodec, backend)
    }
}

impl<T, B, C> PersistedCell<T, B, C>
where
    B: SlotStorage,
    C: Codec<T>,
{
    /// Bind `key` using an explicit codec
    ///
    /// Never fails and never writes: a missing, corrupt or unreadable slot
    /// yields `default`.
    pub fn with_codec(key: impl Into<String>, default: T, codec: C, backend: B) -> Self {
        let key = key.into();
        if key.is_empty() {
            log::warn!("Persisted cell bound to an empty storage key");
        }

        let (value, hydration) = match read_slot(&key, &codec, &backend) {
            Ok(Some(value)) => {
                log::debug!("Restored '{}' from storage", key);
                (value, Hydration::Restored)
            }
            Ok(None) => {
                log::debug!("No stored '{}', using default", key);
                (default, Hydration::Missing)
            }
            Err(failure) => {
                let hydration = match failure {
                    SlotReadFailure::Corrupt { .. } => {
                        log::warn!("{}; using default", failure);
                        Hydration::Corrupt
                    }
                    SlotReadFailure::Backend { .. } => {
                        log::error!("{}; using default", failure);
                        Hydration::Unavailable
                    }
                };
                (default, hydration)
            }
        };

        Self {
            value,
            codec,
            policy: WritePolicy::Immediate,
            hydration,
            observers: Vec::new(),
            writer: SlotWriter {
                key,
                backend,
                pending: VecDeque::new(),
                last_error: None,
            },
        }
    }

    /// Change when writes reach the slot
    ///
    /// Switching to `Immediate` flushes anything still queued.
    pub fn with_policy(mut self, policy: WritePolicy) -> Self {
        self.policy = policy;
        if policy == WritePolicy::Immediate {
            self.flush();
        }
        self
    }

    pub fn key(&self) -> &str {
        &self.writer.key
    }

    /// Current value
    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn hydration(&self) -> Hydration {
        self.hydration
    }

    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    /// Most recent write failure, cleared by the next successful write
    pub fn last_write_error(&self) -> Option<&SlotWriteFailure> {
        self.writer.last_error.as_ref()
    }

    /// Writes queued under [`WritePolicy::Deferred`]
    pub fn pending_writes(&self) -> usize {
        self.writer.pending.len()
    }

    /// Replace the value and mirror it to storage
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.changed();
    }

    /// Derive the next value from the current one
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.value);
        self.set(next);
    }

    /// Register a callback run after every change, in registration order
    pub fn subscribe(&mut self, observer: impl FnMut(&T) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Issue all queued writes, oldest first
    pub fn flush(&mut self) {
        self.writer.flush();
    }

    /// Flush and return the in-memory value
    pub fn into_inner(mut self) -> T {
        self.flush();
        self.value
    }

    fn changed(&mut self) {
        self.mirror();
        for observer in self.observers.iter_mut() {
            observer(&self.value);
        }
    }

    fn mirror(&mut self) {
        // Encode now so a deferred write carries the value as of this change
        let text = match self.codec.encode(&self.value) {
            Ok(text) => text,
            Err(source) => {
                let key = self.writer.key.clone();
                self.writer
                    .record_failure(SlotWriteFailure::Encode { key, source });
                return;
            }
        };

        match self.policy {
            WritePolicy::Immediate => self.writer.write(text),
            WritePolicy::Deferred => self.writer.pending.push_back(text),
        }
    }
}

fn read_slot<T, B, C>(key: &str, codec: &C, backend: &B) -> Result<Option<T>, SlotReadFailure>
where
    B: SlotStorage,
    C: Codec<T>,
{
    let text = backend.get(key).map_err(|source| SlotReadFailure::Backend {
        key: key.to_string(),
        source,
    })?;

    match text {
        Some(text) => codec
            .decode(&text)
            .map(Some)
            .map_err(|source| SlotReadFailure::Corrupt {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

impl<T, B, C> fmt::Debug for PersistedCell<T, B, C>
where
    T: fmt::Debug,
    B: SlotStorage,
    C: Codec<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistedCell")
            .field("key", &self.writer.key)
            .field("value", &self.value)
            .field("policy", &self.policy)
            .field("hydration", &self.hydration)
            .field("pending", &self.writer.pending.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}
