use std::collections::HashSet;
use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;

/// Print summary counts over the normalized catalog.
pub(crate) fn run_stats(xml: &Path, json: &Path) -> Result<(), CliError> {
    let set = super::load_catalog(xml, json)?;

    let mut parents = 0usize;
    let mut clones = 0usize;
    let mut mechanical = 0usize;
    let mut with_roms = 0usize;
    let mut sourcefiles = HashSet::new();

    for machine in set.iter() {
        if machine.is_parent() {
            parents += 1;
        } else {
            clones += 1;
        }
        if machine.ismechanical == "yes" {
            mechanical += 1;
        }
        if machine.has_roms() {
            with_roms += 1;
        }
        sourcefiles.insert(machine.sourcefile.as_str());
    }

    log::info!(
        "{}",
        "Catalog summary:".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Machines:     {}", set.len());
    log::info!("  Parents:      {parents}");
    log::info!("  Clones:       {clones}");
    log::info!("  Mechanical:   {mechanical}");
    log::info!("  Bearing ROMs: {with_roms}");
    log::info!("  Sourcefiles:  {}", sourcefiles.len());

    Ok(())
}
