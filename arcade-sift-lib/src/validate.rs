//! Advisory consistency check of a curated favorites list against the
//! catalog's dependency graph. Findings are data; rendering them is the
//! caller's job.

use std::collections::HashSet;

use arcade_sift_catalog::MachineSet;

use crate::config::{CuratedList, parse_flag};

/// One reported inconsistency. Never a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub kind: FindingKind,
    pub machine: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
    /// An enabled curated entry has no machine in the catalog; the entry is
    /// stale and should be replaced by its successor/renamed machine.
    NotFound,
    /// A ROM-bearing device required by an enabled entry is missing from the
    /// curated list entirely.
    MissingReference,
}

/// Cross-validate a curated list against the catalog.
///
/// Enabled entries are looked up by name; each one's device refs that
/// resolve to ROM-bearing machines are collected as required references.
/// A reference required by several enabled machines is reported once.
/// Every required reference absent from the list (enabled or not) becomes a
/// finding. Reporting only; neither input is mutated.
pub fn validate(set: &MachineSet, curated: &CuratedList) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut required = Vec::new();
    let mut seen = HashSet::new();

    for (name, flag) in curated.iter() {
        if parse_flag(flag) != Some(true) {
            continue;
        }
        match set.get(name) {
            None => findings.push(Finding {
                kind: FindingKind::NotFound,
                machine: name.to_string(),
            }),
            Some(machine) => {
                for device_ref in &machine.device_refs {
                    if let Some(device) = set.get(device_ref) {
                        if device.has_roms() && seen.insert(device_ref.as_str()) {
                            required.push(device_ref.clone());
                        }
                    }
                }
            }
        }
    }

    for device_ref in required {
        if !curated.contains(&device_ref) {
            findings.push(Finding {
                kind: FindingKind::MissingReference,
                machine: device_ref,
            });
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_sift_catalog::listxml::parse_listxml;

    const SAMPLE_LISTXML: &str = r#"<mame>
    <machine name="sf2" sourcefile="capcom/cps1.cpp">
        <rom name="sf2e.30g" size="131072" crc="fe39ee33"/>
        <device_ref name="qsound"/>
    </machine>
    <machine name="dino" sourcefile="capcom/cps1.cpp">
        <rom name="cde_30.11f" size="524288" crc="8f4e585e"/>
        <device_ref name="qsound"/>
        <device_ref name="watchdog"/>
    </machine>
    <machine name="qsound" sourcefile="shared/qsound.cpp">
        <rom name="dl-1425.bin" size="2097152" crc="d6cf5ef5"/>
    </machine>
    <machine name="watchdog" sourcefile="shared/watchdog.cpp"/>
</mame>"#;

    fn sample_set() -> MachineSet {
        MachineSet::from_records(parse_listxml(SAMPLE_LISTXML.as_bytes()).unwrap()).unwrap()
    }

    #[test]
    fn test_not_found_for_stale_entry() {
        let set = sample_set();
        let curated = CuratedList::from_toml_str("[favorites]\nghost_rom = \"true\"\n").unwrap();
        let findings = validate(&set, &curated);
        assert_eq!(
            findings,
            vec![Finding {
                kind: FindingKind::NotFound,
                machine: "ghost_rom".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_reference_reported_once() {
        let set = sample_set();
        // Both enabled machines require qsound; it is reported exactly once.
        let curated =
            CuratedList::from_toml_str("[favorites]\nsf2 = \"true\"\ndino = \"true\"\n").unwrap();
        let findings = validate(&set, &curated);
        assert_eq!(
            findings,
            vec![Finding {
                kind: FindingKind::MissingReference,
                machine: "qsound".to_string(),
            }]
        );
    }

    #[test]
    fn test_listed_reference_satisfies_even_when_disabled() {
        let set = sample_set();
        let curated = CuratedList::from_toml_str(
            "[favorites]\nsf2 = \"true\"\nqsound = \"false\"\n",
        )
        .unwrap();
        assert!(validate(&set, &curated).is_empty());
    }

    #[test]
    fn test_romless_device_not_required() {
        let set = sample_set();
        // dino refs watchdog, but watchdog bears no ROMs
        let curated = CuratedList::from_toml_str(
            "[favorites]\ndino = \"true\"\nqsound = \"true\"\n",
        )
        .unwrap();
        assert!(validate(&set, &curated).is_empty());
    }

    #[test]
    fn test_disabled_entries_are_skipped() {
        let set = sample_set();
        let curated = CuratedList::from_toml_str("[favorites]\nsf2 = \"false\"\n").unwrap();
        assert!(validate(&set, &curated).is_empty());
    }

    #[test]
    fn test_findings_accumulate_across_the_pass() {
        let set = sample_set();
        let curated = CuratedList::from_toml_str(
            "[favorites]\nghost_a = \"true\"\nsf2 = \"true\"\nghost_b = \"true\"\n",
        )
        .unwrap();
        let findings = validate(&set, &curated);
        assert_eq!(findings.len(), 3);
        assert_eq!(findings[0].machine, "ghost_a");
        assert_eq!(findings[0].kind, FindingKind::NotFound);
        assert_eq!(findings[1].machine, "ghost_b");
        assert_eq!(findings[2].machine, "qsound");
        assert_eq!(findings[2].kind, FindingKind::MissingReference);
    }
}
