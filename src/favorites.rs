//! Favorite users
//!
//! Persisted to LocalStorage as a JSON list of emails, in the order they
//! were starred.

use crate::persistence::PersistedCell;
use crate::platform::SlotStorage;
use crate::settings::Settings;

/// Starred users, identified by email
#[derive(Debug)]
pub struct Favorites<B: SlotStorage> {
    cell: PersistedCell<Vec<String>, B>,
}

impl<B: SlotStorage> Favorites<B> {
    /// Hydrate from `settings.favorites_key`
    pub fn new(settings: &Settings, backend: B) -> Self {
        let cell = PersistedCell::new(settings.favorites_key.clone(), Vec::new(), backend);
        log::info!("Loaded {} favorites", cell.get().len());
        Self { cell }
    }

    /// Star or unstar `email`, returning whether it is now a favorite
    pub fn toggle(&mut self, email: &str) -> bool {
        let mut starred = false;
        self.cell.update(|current| {
            if current.iter().any(|e| e == email) {
                current.iter().filter(|e| *e != email).cloned().collect()
            } else {
                starred = true;
                let mut next = current.clone();
                next.push(email.to_string());
                next
            }
        });
        starred
    }

    pub fn contains(&self, email: &str) -> bool {
        self.cell.get().iter().any(|e| e == email)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cell.get().iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cell.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cell.get().is_empty()
    }

    pub fn cell(&self) -> &PersistedCell<Vec<String>, B> {
        &self.cell
    }

    pub fn cell_mut(&mut self) -> &mut PersistedCell<Vec<String>, B> {
        &mut self.cell
    }
}
