//! Ticket booth
//!
//! Couples the movie catalog to a [`Picker`] and stamps every pick with a
//! serial number, the way a paper ticket would carry one.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::catalog::{Catalog, Movie};
use crate::consts::SERIAL_LEN;
use crate::persistence::KeyValueStore;
use crate::picker::Picker;
use crate::settings::Settings;

/// Mixed into the seed so serials don't mirror the draw sequence
const SERIAL_SEED_SALT: u64 = 0x7469_636b_6574;

/// An issued ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub movie: Movie,
    /// Zero-padded decimal serial
    pub serial: String,
    /// Movies left in the cycle after this one
    pub remaining: usize,
}

pub struct TicketBooth<S> {
    picker: Picker<Movie, S>,
    serial_rng: Pcg32,
}

impl<S: KeyValueStore> TicketBooth<S> {
    pub fn new(catalog: Catalog, store: S, key: &str) -> Self {
        Self {
            picker: Picker::new(catalog.into_movies(), store, key),
            serial_rng: Pcg32::from_os_rng(),
        }
    }

    /// Booth with reproducible draws and serials
    pub fn with_seed(catalog: Catalog, store: S, key: &str, seed: u64) -> Self {
        Self {
            picker: Picker::with_seed(catalog.into_movies(), store, key, seed),
            serial_rng: Pcg32::seed_from_u64(seed ^ SERIAL_SEED_SALT),
        }
    }

    pub fn from_settings(catalog: Catalog, store: S, settings: &Settings) -> Self {
        match settings.seed {
            Some(seed) => Self::with_seed(catalog, store, &settings.storage_key, seed),
            None => Self::new(catalog, store, &settings.storage_key),
        }
    }

    /// Pick the next movie and stamp a ticket for it.
    ///
    /// Returns `None` once every movie has been shown this cycle.
    pub fn issue(&mut self) -> Option<Ticket> {
        let movie = self.picker.pick()?.clone();
        let serial = random_serial(&mut self.serial_rng, SERIAL_LEN);
        let remaining = self.picker.remaining();
        log::info!("Issued ticket {} for \"{}\"", serial, movie.title);
        Some(Ticket {
            movie,
            serial,
            remaining,
        })
    }

    /// Reshuffle the full catalog into a new cycle.
    pub fn reset(&mut self) {
        self.picker.reset();
    }

    pub fn remaining(&self) -> usize {
        self.picker.remaining()
    }

    /// Catalog size
    pub fn total(&self) -> usize {
        self.picker.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.picker.is_exhausted()
    }

    pub fn picker(&self) -> &Picker<Movie, S> {
        &self.picker
    }
}

/// `len` random decimal digits
fn random_serial<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use std::collections::HashSet;

    const KEY: &str = "booth";

    fn catalog(n: usize) -> Catalog {
        let movies = (0..n)
            .map(|i| Movie {
                title: format!("Feature {i}"),
                director: "Anon".into(),
                runtime: 90 + i as u32,
                genre: "Drama".into(),
                year: None,
                vibe: None,
                blurb: None,
                good_for: None,
            })
            .collect();
        Catalog::new(movies).unwrap()
    }

    #[test]
    fn test_issue_until_exhausted() {
        let mut booth = TicketBooth::with_seed(catalog(5), MemoryStore::new(), KEY, 21);
        assert_eq!(booth.total(), 5);

        let mut titles = HashSet::new();
        for left in (0..5).rev() {
            let ticket = booth.issue().unwrap();
            assert_eq!(ticket.remaining, left);
            assert_eq!(ticket.serial.len(), SERIAL_LEN);
            assert!(ticket.serial.chars().all(|c| c.is_ascii_digit()));
            assert!(titles.insert(ticket.movie.title));
        }

        assert!(booth.is_exhausted());
        assert!(booth.issue().is_none());

        booth.reset();
        assert_eq!(booth.remaining(), 5);
        assert!(!booth.is_exhausted());
    }

    #[test]
    fn test_from_settings_uses_key_and_seed() {
        let settings = Settings {
            storage_key: "custom_key".into(),
            seed: Some(8),
            ..Settings::default()
        };
        let mut mem = MemoryStore::new();
        let first = {
            let mut booth = TicketBooth::from_settings(catalog(4), &mut mem, &settings);
            booth.issue().unwrap()
        };
        assert!(mem.get("custom_key").is_some());

        let replay = TicketBooth::from_settings(catalog(4), MemoryStore::new(), &settings)
            .issue()
            .unwrap();
        assert_eq!(first, replay);
    }

    #[test]
    fn test_ticket_json_shape() {
        let mut booth = TicketBooth::with_seed(catalog(1), MemoryStore::new(), KEY, 2);
        let json = serde_json::to_value(booth.issue().unwrap()).unwrap();
        assert_eq!(json["movie"]["title"], "Feature 0");
        assert_eq!(json["remaining"], 0);
        assert!(json["serial"].is_string());
    }
}
