use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::CatalogError;
use crate::machine::{BiosSet, Chip, DriverStatus, Feature, MachineRecord, NO_RELATION, Rom};

/// Parse a `-listxml` style catalog dump into normalized machine records,
/// preserving document order.
///
/// Every machine element yields exactly one record; defaults are applied at
/// extraction time so no field is ever left absent. Malformed markup is a
/// hard error, with no partial-recovery mode.
pub fn parse_listxml<R: BufRead>(reader: R) -> Result<Vec<MachineRecord>, CatalogError> {
    let mut xml = Reader::from_reader(reader);
    xml.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut machines = Vec::new();

    let mut current: Option<MachineRecord> = None;
    let mut in_driver = false;
    let mut current_tag = String::new();

    loop {
        match xml.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match tag_name.as_str() {
                    "machine" => current = Some(machine_from_attributes(e)?),
                    "driver" => in_driver = true,
                    _ => {
                        append_repeated(&mut current, &tag_name, e)?;
                        current_tag = tag_name;
                    }
                }
            }
            Event::Empty(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                if tag_name == "machine" {
                    // A machine with no children still yields a record
                    machines.push(machine_from_attributes(e)?);
                } else {
                    append_repeated(&mut current, &tag_name, e)?;
                }
            }
            Event::Text(ref e) => {
                if let Some(ref mut machine) = current {
                    let text = e.unescape()?.to_string();
                    if in_driver {
                        set_driver_field(&mut machine.driver, &current_tag, text);
                    } else {
                        set_text_field(machine, &current_tag, text);
                    }
                }
            }
            Event::End(ref e) => {
                let tag_name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match tag_name.as_str() {
                    "machine" => {
                        if let Some(machine) = current.take() {
                            machines.push(machine);
                        }
                    }
                    "driver" => in_driver = false,
                    _ => current_tag.clear(),
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if machines.is_empty() {
        return Err(CatalogError::invalid_catalog(
            "No machine elements found in catalog dump",
        ));
    }

    Ok(machines)
}

/// Parse a catalog dump from a file path.
pub fn parse_listxml_file(path: &std::path::Path) -> Result<Vec<MachineRecord>, CatalogError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    parse_listxml(reader)
}

/// Route a repeated child element to the right list on the open machine.
fn append_repeated(
    current: &mut Option<MachineRecord>,
    tag_name: &str,
    e: &BytesStart<'_>,
) -> Result<(), CatalogError> {
    let Some(machine) = current.as_mut() else {
        return Ok(());
    };
    match tag_name {
        "biosset" => machine.biossets.push(biosset_from_attributes(e)?),
        "rom" => machine.roms.push(rom_from_attributes(e)?),
        "device_ref" => {
            if let Some(name) = attribute(e, b"name")? {
                machine.device_refs.push(name);
            }
        }
        "chip" => machine.chips.push(chip_from_attributes(e)?),
        "feature" => machine.features.push(feature_from_attributes(e)?),
        _ => {}
    }
    Ok(())
}

/// First-matching-child rule: single-valued fields keep the first value
/// seen and otherwise stay at their default.
fn set_text_field(machine: &mut MachineRecord, tag: &str, text: String) {
    match tag {
        "description" if machine.description == NO_RELATION => machine.description = text,
        "year" if machine.year == NO_RELATION => machine.year = text,
        "manufacturer" if machine.manufacturer == NO_RELATION => machine.manufacturer = text,
        _ => {}
    }
}

fn set_driver_field(driver: &mut DriverStatus, tag: &str, text: String) {
    match tag {
        "status" if driver.status.is_none() => driver.status = Some(text),
        "emulation" if driver.emulation.is_none() => driver.emulation = Some(text),
        "savestate" if driver.savestate.is_none() => driver.savestate = Some(text),
        _ => {}
    }
}

/// Read one attribute by key, if present.
fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, CatalogError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(String::from_utf8_lossy(&attr.value).to_string()));
        }
    }
    Ok(None)
}

fn machine_from_attributes(e: &BytesStart<'_>) -> Result<MachineRecord, CatalogError> {
    let mut machine = MachineRecord {
        name: String::new(),
        sourcefile: String::new(),
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
    };

    for attr in e.attributes() {
        let attr = attr?;
        let value = String::from_utf8_lossy(&attr.value).to_string();
        match attr.key.as_ref() {
            b"name" => machine.name = value,
            b"sourcefile" => machine.sourcefile = value,
            b"romof" => machine.romof = value,
            b"cloneof" => machine.cloneof = value,
            b"ismechanical" => machine.ismechanical = value,
            b"sampleof" => machine.sampleof = value,
            _ => {}
        }
    }

    if machine.name.is_empty() {
        return Err(CatalogError::invalid_catalog(
            "machine element missing name attribute",
        ));
    }

    Ok(machine)
}

fn biosset_from_attributes(e: &BytesStart<'_>) -> Result<BiosSet, CatalogError> {
    let mut biosset = BiosSet::default();
    for attr in e.attributes() {
        let attr = attr?;
        let value = String::from_utf8_lossy(&attr.value).to_string();
        match attr.key.as_ref() {
            b"name" => biosset.name = value,
            b"description" => biosset.description = value,
            _ => {}
        }
    }
    Ok(biosset)
}

fn rom_from_attributes(e: &BytesStart<'_>) -> Result<Rom, CatalogError> {
    let mut rom = Rom::default();
    for attr in e.attributes() {
        let attr = attr?;
        let value = String::from_utf8_lossy(&attr.value).to_string();
        match attr.key.as_ref() {
            b"name" => rom.name = value,
            b"size" => rom.size = value,
            b"crc" => rom.crc = value,
            b"sha1" => rom.sha1 = value,
            b"region" => rom.region = value,
            b"offset" => rom.offset = value,
            _ => {}
        }
    }
    Ok(rom)
}

fn chip_from_attributes(e: &BytesStart<'_>) -> Result<Chip, CatalogError> {
    let mut chip = Chip {
        clock: NO_RELATION.to_string(),
        ..Chip::default()
    };
    for attr in e.attributes() {
        let attr = attr?;
        let value = String::from_utf8_lossy(&attr.value).to_string();
        match attr.key.as_ref() {
            b"type" => chip.kind = value,
            b"tag" => chip.tag = value,
            b"name" => chip.name = value,
            b"clock" => chip.clock = value,
            _ => {}
        }
    }
    Ok(chip)
}

fn feature_from_attributes(e: &BytesStart<'_>) -> Result<Feature, CatalogError> {
    let mut feature = Feature::default();
    for attr in e.attributes() {
        let attr = attr?;
        let value = String::from_utf8_lossy(&attr.value).to_string();
        match attr.key.as_ref() {
            b"type" => feature.kind = value,
            b"status" => feature.status = value,
            _ => {}
        }
    }
    Ok(feature)
}
