//! Persistence behavior across bindings, checked from outside the crate

use std::cell::RefCell;
use std::sync::Once;

use favorite_roster::{
    Favorites, Hydration, MemoryStorage, PersistedCell, Settings, SlotStorage, StorageError,
    UserCount, WritePolicy,
};
use proptest::prelude::*;

thread_local! {
    static RECORDS: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

/// Logger that keeps each test thread's records for inspection
struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        RECORDS.with(|r| {
            r.borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

fn capture_logs() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("logger already set");
        log::set_max_level(log::LevelFilter::Trace);
    });
    RECORDS.with(|r| r.borrow_mut().clear());
}

fn logged_at(level: log::Level) -> Vec<String> {
    RECORDS.with(|r| {
        r.borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, msg)| msg.clone())
            .collect()
    })
}

/// Backend that accepts reads and rejects every write
struct FullStorage(MemoryStorage);

impl SlotStorage for FullStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.get(key)
    }

    fn set(&self, key: &str, text: &str) -> Result<(), StorageError> {
        Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            needed: key.len() + text.len(),
            quota: 0,
        })
    }
}

#[test]
fn test_corrupt_slot_logs_warning_and_falls_back() {
    capture_logs();
    let storage = MemoryStorage::new();
    storage.insert_raw("userCount", "{{{");

    let cell = PersistedCell::new("userCount", 5u32, &storage);

    assert_eq!(*cell.get(), 5);
    assert_eq!(cell.hydration(), Hydration::Corrupt);
    let warnings = logged_at(log::Level::Warn);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("userCount"));
}

#[test]
fn test_missing_slot_is_not_logged_as_failure() {
    capture_logs();
    let storage = MemoryStorage::new();

    let cell = PersistedCell::new("favorites", Vec::<String>::new(), &storage);

    assert_eq!(cell.hydration(), Hydration::Missing);
    assert!(logged_at(log::Level::Warn).is_empty());
    assert!(logged_at(log::Level::Error).is_empty());
    assert!(storage.is_empty());
}

#[test]
fn test_rejected_writes_are_logged_not_raised() {
    capture_logs();
    let storage = FullStorage(MemoryStorage::new());
    let mut favorites = Favorites::new(&Settings::default(), &storage);

    assert!(favorites.toggle("a@x.io"));
    assert!(favorites.toggle("b@x.io"));

    assert_eq!(favorites.len(), 2);
    assert_eq!(logged_at(log::Level::Error).len(), 2);
    assert!(storage.0.is_empty());
}

#[test]
fn test_count_and_favorites_share_one_backend() {
    let storage = MemoryStorage::new();
    let settings = Settings::default();
    {
        let mut count = UserCount::new(&settings, &storage);
        let mut favorites = Favorites::new(&settings, &storage);
        count.set(8);
        favorites.toggle("a@x.io");
    }
    assert_eq!(storage.len(), 2);
    assert_eq!(storage.raw("userCount").as_deref(), Some("8"));
    assert_eq!(storage.raw("favorites").as_deref(), Some("[\"a@x.io\"]"));
}

#[test]
fn test_custom_keys_do_not_collide() {
    let storage = MemoryStorage::new();
    let team_a = Settings {
        favorites_key: "favorites:a".to_string(),
        ..Settings::default()
    };
    let team_b = Settings {
        favorites_key: "favorites:b".to_string(),
        ..Settings::default()
    };

    Favorites::new(&team_a, &storage).toggle("a@x.io");
    let b = Favorites::new(&team_b, &storage);

    assert!(b.is_empty());
    assert_eq!(storage.raw("favorites:b"), None);
}

proptest! {
    #[test]
    fn prop_value_survives_rebinding(
        values in proptest::collection::vec("[a-z0-9.@]{0,24}", 0..8),
    ) {
        let storage = MemoryStorage::new();
        PersistedCell::new("favorites", Vec::<String>::new(), &storage).set(values.clone());

        let restored = PersistedCell::new("favorites", Vec::<String>::new(), &storage);
        prop_assert_eq!(restored.hydration(), Hydration::Restored);
        prop_assert_eq!(restored.get(), &values);
    }

    #[test]
    fn prop_last_write_wins(
        writes in proptest::collection::vec(any::<u32>(), 1..16),
        deferred in any::<bool>(),
    ) {
        let storage = MemoryStorage::new();
        let policy = if deferred { WritePolicy::Deferred } else { WritePolicy::Immediate };
        {
            let mut cell = PersistedCell::new("n", 0u32, &storage).with_policy(policy);
            for n in &writes {
                cell.set(*n);
            }
        }

        let restored = PersistedCell::new("n", 0u32, &storage);
        prop_assert_eq!(*restored.get(), *writes.last().unwrap());
    }

    #[test]
    fn prop_other_keys_untouched(a in any::<i64>(), b in any::<i64>()) {
        let storage = MemoryStorage::new();
        PersistedCell::new("b", 0i64, &storage).set(b);
        PersistedCell::new("a", 0i64, &storage).set(a);

        prop_assert_eq!(*PersistedCell::new("b", 0i64, &storage).get(), b);
    }
}
