//! Ticket Booth - non-repeating movie picks from a fixed catalog
//!
//! Core modules:
//! - `picker`: Draw-without-replacement over a fixed set of items
//! - `persistence`: Key-value storage backends and the unwatched-pool store
//! - `catalog`: Movie records loaded from JSON
//! - `booth`: Couples a catalog to a picker and issues tickets
//! - `platform`: Browser/native platform glue
//! - `settings`: Storage location and RNG seed

pub mod booth;
pub mod catalog;
pub mod persistence;
pub mod picker;
pub mod platform;
pub mod settings;

pub use booth::{Ticket, TicketBooth};
pub use catalog::{Catalog, CatalogError, Movie};
#[cfg(not(target_arch = "wasm32"))]
pub use persistence::FileStore;
pub use persistence::{KeyValueStore, MemoryStore, PoolLoadError, PoolStore, StorageError};
pub use picker::{Picker, PickerState, shuffled};
pub use settings::Settings;

/// Booth configuration constants
pub mod consts {
    /// Storage key holding the unwatched pool
    pub const STORAGE_KEY: &str = "cinema_unwatched_indices_v1";
    /// Number of digits printed on each ticket
    pub const SERIAL_LEN: usize = 6;
}
