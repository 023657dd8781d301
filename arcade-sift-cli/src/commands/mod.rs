mod check;
mod favorites;
mod normalize;
mod plan;
mod stats;

pub(crate) use check::run_check;
pub(crate) use favorites::run_favorites;
pub(crate) use normalize::run_normalize;
pub(crate) use plan::run_plan;
pub(crate) use stats::run_stats;

use std::path::Path;

use arcade_sift_catalog::{FsCatalogStore, MachineSet, load_or_normalize};

use crate::error::CliError;

/// Load the normalized catalog, materializing it on first use.
pub(crate) fn load_catalog(xml: &Path, json: &Path) -> Result<MachineSet, CliError> {
    let store = FsCatalogStore::new(json);
    Ok(load_or_normalize(xml, &store)?)
}
