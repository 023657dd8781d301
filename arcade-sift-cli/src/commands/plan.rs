use std::fs;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use arcade_sift_lib::{SubsystemMapping, SubsystemPlan, classify, classify_all};

use crate::error::CliError;

/// Compute the per-subsystem machine lists and print them, or write the
/// whole plan as JSON for the external copy step.
pub(crate) fn run_plan(
    xml: &Path,
    json: &Path,
    config: &Path,
    subsystem: Option<&str>,
    output: Option<PathBuf>,
) -> Result<(), CliError> {
    let set = super::load_catalog(xml, json)?;
    let mapping = SubsystemMapping::load(config)?;

    let plans: Vec<SubsystemPlan> = match subsystem {
        Some(name) => {
            let sourcefile = mapping
                .get(name)
                .ok_or_else(|| CliError::other(format!("Unknown subsystem: {name}")))?;
            vec![SubsystemPlan {
                subsystem: name.to_string(),
                sourcefile: sourcefile.to_string(),
                machines: classify(&set, sourcefile),
            }]
        }
        None => classify_all(&set, &mapping),
    };

    if let Some(path) = output {
        let contents = serde_json::to_string_pretty(&plans)?;
        fs::write(&path, contents)?;
        log::info!(
            "{} Plan for {} subsystem(s) written to {}",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            plans.len(),
            path.display(),
        );
        return Ok(());
    }

    for plan in &plans {
        log::info!(
            "{} [{}]: {} machines",
            plan.subsystem.if_supports_color(Stdout, |t| t.bold()),
            plan.sourcefile.if_supports_color(Stdout, |t| t.cyan()),
            plan.machines.len(),
        );
        for name in &plan.machines {
            println!("{name}");
        }
    }

    Ok(())
}
