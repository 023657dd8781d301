//! Normalized arcade machine catalog: data model, `-listxml` dump parsing,
//! and idempotent materialization of the normalized record set.

pub mod error;
pub mod listxml;
pub mod machine;
pub mod store;

pub use error::CatalogError;
pub use machine::{
    BiosSet, Chip, DriverStatus, Feature, MachineRecord, MachineSet, NO_RELATION, Rom,
};
pub use store::{
    CATALOG_VERSION, CatalogStore, FsCatalogStore, NormalizedCatalog, load_or_normalize,
};
