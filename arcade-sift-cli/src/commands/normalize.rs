use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::error::CliError;

/// Materialize the normalized catalog artifact.
pub(crate) fn run_normalize(xml: &Path, json: &Path) -> Result<(), CliError> {
    let set = super::load_catalog(xml, json)?;
    log::info!(
        "{} {} machines normalized ({})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        set.len(),
        json.display(),
    );
    Ok(())
}
