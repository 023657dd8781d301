//! Subsystem classification: which machines belong to a hardware driver's
//! subsystem, including the shared device machines they pull in.

use std::collections::HashSet;

use serde::Serialize;

use arcade_sift_catalog::MachineSet;

use crate::config::SubsystemMapping;

/// The machines assigned to one subsystem, handed to the external copy step.
#[derive(Debug, Clone, Serialize)]
pub struct SubsystemPlan {
    pub subsystem: String,
    pub sourcefile: String,
    pub machines: Vec<String>,
}

/// Compute the machine names belonging to one subsystem.
///
/// The primary set is every parent machine of the requested sourcefile
/// (clones excluded). On top of that, one hop of dependency closure: device
/// references of primary machines that resolve in the catalog and carry
/// their own ROMs are included too. Refs that don't resolve are skipped;
/// the validator, not the classifier, is the place that reports gaps.
/// Device refs of the added machines are not expanded further.
///
/// Primary members come first in catalog order, then the additional members
/// in catalog order.
pub fn classify(set: &MachineSet, sourcefile: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut primary = HashSet::new();

    for machine in set.iter() {
        if machine.sourcefile == sourcefile && machine.is_parent() {
            primary.insert(machine.name.as_str());
            names.push(machine.name.clone());
        }
    }

    let mut additional = HashSet::new();
    for machine in set.iter().filter(|m| primary.contains(m.name.as_str())) {
        for device_ref in &machine.device_refs {
            if primary.contains(device_ref.as_str()) || additional.contains(device_ref.as_str()) {
                continue;
            }
            if let Some(device) = set.get(device_ref) {
                if device.has_roms() {
                    additional.insert(device_ref.as_str());
                }
            }
        }
    }

    for machine in set.iter() {
        if additional.contains(machine.name.as_str()) {
            names.push(machine.name.clone());
        }
    }

    names
}

/// Classify every subsystem in the mapping, in mapping order.
///
/// Subsystems are independent: a machine whose device refs cross sourcefile
/// boundaries may legitimately appear in more than one plan.
pub fn classify_all(set: &MachineSet, mapping: &SubsystemMapping) -> Vec<SubsystemPlan> {
    mapping
        .entries()
        .iter()
        .map(|(subsystem, sourcefile)| SubsystemPlan {
            subsystem: subsystem.clone(),
            sourcefile: sourcefile.clone(),
            machines: classify(set, sourcefile),
        })
        .collect()
}
