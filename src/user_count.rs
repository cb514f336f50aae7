//! Requested user count
//!
//! Persisted across sessions and kept inside the configured bounds.

use crate::persistence::PersistedCell;
use crate::platform::SlotStorage;
use crate::settings::Settings;

/// Number of users to request, persisted in LocalStorage
#[derive(Debug)]
pub struct UserCount<B: SlotStorage> {
    cell: PersistedCell<u32, B>,
    min: u32,
    max: u32,
}

impl<B: SlotStorage> UserCount<B> {
    /// Hydrate from `settings.count_key`
    pub fn new(settings: &Settings, backend: B) -> Self {
        let (min, max) = settings.count_bounds();
        Self {
            cell: PersistedCell::new(settings.count_key.clone(), settings.default_count, backend),
            min,
            max,
        }
    }

    /// Current count, within bounds even if storage holds something else
    pub fn get(&self) -> u32 {
        (*self.cell.get()).clamp(self.min, self.max)
    }

    /// Store a new count (clamped), returning what was stored
    pub fn set(&mut self, count: u32) -> u32 {
        let count = count.clamp(self.min, self.max);
        self.cell.set(count);
        count
    }

    /// Apply the text of a number input; non-numeric text is ignored
    ///
    /// Any finite number is accepted: fractions are truncated and values
    /// outside the bounds are clamped.
    pub fn set_from_input(&mut self, text: &str) -> bool {
        match text.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => {
                let count = number.trunc().clamp(self.min as f64, self.max as f64) as u32;
                self.set(count);
                true
            }
            Ok(number) => {
                log::debug!("Ignoring non-finite count input {:?} ({})", text, number);
                false
            }
            Err(e) => {
                log::debug!("Ignoring count input {:?}: {}", text, e);
                false
            }
        }
    }

    pub fn cell(&self) -> &PersistedCell<u32, B> {
        &self.cell
    }

    pub fn cell_mut(&mut self) -> &mut PersistedCell<u32, B> {
        &mut self.cell
    }
}
