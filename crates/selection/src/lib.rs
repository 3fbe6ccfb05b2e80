//! Client-side selection state for the routine builder.
//!
//! The [`SelectionStore`] keeps the products a user has picked, in the
//! order they were picked, and writes the whole set to a [`Storage`]
//! after every change so it survives restarts. [`CatalogBrowser`] loads
//! the read-only catalog and produces the filtered views the front end
//! displays.
//!
//! Nothing here knows how the data is rendered. Front ends read the
//! store and call its mutators in response to user input.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod browser;
mod error;
mod filter;
mod source;
mod storage;
mod store;
mod token;

pub use browser::CatalogBrowser;
pub use error::{CatalogError, StorageError};
pub use filter::filter;
pub use source::CatalogSource;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{SELECTION_KEY, SelectionStore};
pub use token::{RequestToken, RequestTokens};

/// Re-exports of [`routine_model`] catalog types.
pub use routine_model::{Catalog, CatalogItem};
