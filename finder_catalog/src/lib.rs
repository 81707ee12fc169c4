//! Building catalog loading.
//!
//! The catalog is a UTF-8 CSV file with a header row. Several historical
//! spellings exist for each column header; see [`Field::aliases`].

mod columns;
mod error;
mod loader;

pub use columns::Field;
pub use error::{CatalogError, Result};
pub use loader::{load_catalog, load_catalog_from_reader};
