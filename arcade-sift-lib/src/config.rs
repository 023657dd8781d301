//! Curated configuration: the subsystem mapping and the favorites list.
//!
//! Both live in TOML tables whose keys are case-sensitive, case-preserving
//! catalog names; declaration order is kept because the extractor and the
//! batch classifier emit results in it.

use std::collections::HashSet;
use std::path::Path;

use crate::error::ConfigError;

/// Parse a boolean-like flag literal, case-insensitively.
/// Anything other than "true"/"false" is not a boolean at all.
pub(crate) fn parse_flag(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Read a named table of string → string entries from a TOML document,
/// preserving declaration order.
fn load_section(contents: &str, section: &str) -> Result<Vec<(String, String)>, ConfigError> {
    let doc: toml::Value = contents.parse()?;
    let table = doc
        .get(section)
        .and_then(|v| v.as_table())
        .ok_or_else(|| ConfigError::MissingSection(section.to_string()))?;

    let mut entries = Vec::with_capacity(table.len());
    for (key, value) in table {
        let value = value
            .as_str()
            .ok_or_else(|| ConfigError::NotAString(key.clone()))?;
        entries.push((key.clone(), value.to_string()));
    }
    Ok(entries)
}

/// Ordered mapping from subsystem name to hardware-driver sourcefile key,
/// from the `[systems]` table.
#[derive(Debug, Clone)]
pub struct SubsystemMapping {
    entries: Vec<(String, String)>,
}

impl SubsystemMapping {
    pub const SECTION: &'static str = "systems";

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            entries: load_section(contents, Self::SECTION)?,
        })
    }

    /// (subsystem, sourcefile) pairs in declaration order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn get(&self, subsystem: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == subsystem)
            .map(|(_, sourcefile)| sourcefile.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Operator-maintained selection of machine names with an enabled flag each,
/// from the `[favorites]` table. Flags stay raw strings until extraction so
/// a bad literal can be reported against its entry.
#[derive(Debug, Clone)]
pub struct CuratedList {
    entries: Vec<(String, String)>,
    names: HashSet<String>,
}

impl CuratedList {
    pub const SECTION: &'static str = "favorites";

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let entries = load_section(contents, Self::SECTION)?;
        let names = entries.iter().map(|(name, _)| name.clone()).collect();
        Ok(Self { entries, names })
    }

    /// Whether a machine name is listed at all, enabled or not.
    /// Case-sensitive: names are catalog primary keys.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// (name, raw flag) pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, flag)| (name.as_str(), flag.as_str()))
    }

    /// Every enabled machine name, in declaration order.
    ///
    /// A flag that is neither "true" nor "false" (case-insensitive) is an
    /// error naming the entry, never a silent false.
    pub fn enabled_names(&self) -> Result<Vec<String>, ConfigError> {
        let mut enabled = Vec::new();
        for (name, flag) in &self.entries {
            match parse_flag(flag) {
                Some(true) => enabled.push(name.clone()),
                Some(false) => {}
                None => {
                    return Err(ConfigError::InvalidFlag {
                        machine: name.clone(),
                        value: flag.clone(),
                    });
                }
            }
        }
        Ok(enabled)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
