use std::path::Path;

use arcade_sift_lib::CuratedList;

use crate::error::CliError;

/// Print the enabled favorites, one per line in declaration order, for
/// consumption by the external copy step.
pub(crate) fn run_favorites(config: &Path) -> Result<(), CliError> {
    let curated = CuratedList::load(config)?;
    for name in curated.enabled_names()? {
        println!("{name}");
    }
    Ok(())
}
