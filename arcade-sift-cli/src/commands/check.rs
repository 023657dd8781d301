use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use arcade_sift_lib::{CuratedList, FindingKind, validate};

use crate::error::CliError;

/// Audit the favorites list against the catalog. Findings are advisory:
/// they are printed as a complete list at the end of the pass and do not
/// fail the run.
pub(crate) fn run_check(xml: &Path, json: &Path, config: &Path) -> Result<(), CliError> {
    let set = super::load_catalog(xml, json)?;
    let curated = CuratedList::load(config)?;

    let findings = validate(&set, &curated);

    if findings.is_empty() {
        log::info!(
            "{} {} entries checked, no findings",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            curated.len(),
        );
        return Ok(());
    }

    for finding in &findings {
        match finding.kind {
            FindingKind::NotFound => log::warn!(
                "{} '{}' not found in the catalog, replace it with its successor",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                finding.machine.if_supports_color(Stdout, |t| t.bold()),
            ),
            FindingKind::MissingReference => log::warn!(
                "{} required device '{}' is not in the favorites list",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                finding.machine.if_supports_color(Stdout, |t| t.bold()),
            ),
        }
    }
    log::info!(
        "{} findings across {} entries",
        findings.len(),
        curated.len()
    );

    Ok(())
}
