use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Sentinel used by the catalog for "no relation" in `romof`, `cloneof` and
/// `sampleof`. The literal string, not an absent field; downstream logic
/// compares against it directly.
pub const NO_RELATION: &str = "none";

/// A single normalized machine from the catalog dump.
///
/// Serialized field names match the dump's attribute/element names so the
/// materialized JSON can be consumed by external tooling as-is. Every field
/// the dump omits is materialized with its documented default; nothing is
/// left absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineRecord {
    pub name: String,
    pub sourcefile: String,
    pub romof: String,
    pub cloneof: String,
    pub ismechanical: String,
    pub sampleof: String,
    pub description: String,
    pub year: String,
    pub manufacturer: String,
    pub biossets: Vec<BiosSet>,
    pub roms: Vec<Rom>,
    pub device_refs: Vec<String>,
    pub chips: Vec<Chip>,
    pub driver: DriverStatus,
    pub features: Vec<Feature>,
}

impl MachineRecord {
    /// A parent/primary machine rather than a clone variant.
    pub fn is_parent(&self) -> bool {
        self.cloneof == NO_RELATION
    }

    /// Whether the machine carries its own distributable payload, as opposed
    /// to being a pure logical/device placeholder.
    pub fn has_roms(&self) -> bool {
        !self.roms.is_empty()
    }
}

/// A BIOS set option within a machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiosSet {
    pub name: String,
    pub description: String,
}

/// A ROM component of a machine. All fields are carried verbatim from the
/// dump; size and checksums are opaque text to this system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rom {
    pub name: String,
    pub size: String,
    pub crc: String,
    pub sha1: String,
    pub region: String,
    pub offset: String,
}

/// An emulated chip within a machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chip {
    #[serde(rename = "type")]
    pub kind: String,
    pub tag: String,
    pub name: String,
    pub clock: String,
}

/// Emulation quality metadata from the dump's `driver` element. These are
/// the one place absence stays absent: the dump may omit any of them and
/// no `"none"` default is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverStatus {
    pub status: Option<String>,
    pub emulation: Option<String>,
    pub savestate: Option<String>,
}

/// Completeness of one emulated capability.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
}

/// The normalized record set: catalog-ordered records plus a name index.
///
/// Read-only after construction; nothing mutates a record in place.
#[derive(Debug, Clone)]
pub struct MachineSet {
    records: Vec<MachineRecord>,
    by_name: HashMap<String, usize>,
}

impl MachineSet {
    /// Build a set from normalized records, enforcing name uniqueness.
    /// Two machines sharing a name is a hard error, never a silent overwrite.
    pub fn from_records(records: Vec<MachineRecord>) -> Result<Self, CatalogError> {
        let mut by_name = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if by_name.insert(record.name.clone(), i).is_some() {
                return Err(CatalogError::DuplicateName(record.name.clone()));
            }
        }
        Ok(Self { records, by_name })
    }

    /// Look up a machine by name.
    pub fn get(&self, name: &str) -> Option<&MachineRecord> {
        self.by_name.get(name).map(|&i| &self.records[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Records in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &MachineRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[MachineRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> MachineRecord {
        MachineRecord {
            name: name.to_string(),
            sourcefile: "test/driver.cpp".to_string(),
            romof: NO_RELATION.to_string(),
            cloneof: NO_RELATION.to_string(),
            ismechanical: "no".to_string(),
            sampleof: NO_RELATION.to_string(),
            description: NO_RELATION.to_string(),
            year: NO_RELATION.to_string(),
            manufacturer: NO_RELATION.to_string(),
            biossets: Vec::new(),
            roms: Vec::new(),
            device_refs: Vec::new(),
            chips: Vec::new(),
            driver: DriverStatus::default(),
            features: Vec::new(),
        }
    }

    #[test]
    fn test_lookup_by_name() {
        let set = MachineSet::from_records(vec![record("sf2"), record("dino")]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("dino").unwrap().name, "dino");
        assert!(set.get("missing").is_none());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = MachineSet::from_records(vec![record("sf2"), record("sf2")]);
        match result {
            Err(CatalogError::DuplicateName(name)) => assert_eq!(name, "sf2"),
            other => panic!("expected DuplicateName, got {other:?}"),
        }
    }

    #[test]
    fn test_iteration_preserves_catalog_order() {
        let set =
            MachineSet::from_records(vec![record("c"), record("a"), record("b")]).unwrap();
        let names: Vec<&str> = set.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_parent_and_rom_flags() {
        let mut clone = record("sf2ce");
        clone.cloneof = "sf2".to_string();
        assert!(!clone.is_parent());
        assert!(record("sf2").is_parent());

        let mut with_rom = record("qsound");
        with_rom.roms.push(Rom {
            name: "dl-1425.bin".to_string(),
            ..Rom::default()
        });
        assert!(with_rom.has_roms());
        assert!(!record("qsound_hle").has_roms());
    }
}
