//! Startup configuration: identity/contract files and the cache seed import.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use tracing::warn;

use registrar_core::error::{RegistrarError, Result};
use registrar_core::types::{Address, Name, Record};

/// Reads a plain text file holding a single ledger address.
///
/// Used for both the transacting identity and the deployed registry
/// contract address.
pub fn read_address_file(path: &Path) -> Result<Address> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| RegistrarError::Config(format!("can't read {}: {e}", path.display())))?;
    Address::normalize(content.trim())
        .map_err(|_| RegistrarError::Config(format!("{} holds no valid address", path.display())))
}

/// One entry of the seed export file.
#[derive(Debug, Deserialize)]
struct SeedEntry {
    name: String,
    addr: String,
    #[serde(default)]
    publickey: Option<String>,
    #[serde(default)]
    signature: Option<String>,
}

/// Loads the startup seed collection.
///
/// The export format is a JSON object keyed by arbitrary index (a plain
/// array is accepted too); each value is a record. Entries that fail
/// validation are skipped with a warning rather than aborting the import.
pub fn load_seed_records(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| RegistrarError::Config(format!("can't read {}: {e}", path.display())))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| RegistrarError::Config(format!("{} is not valid JSON: {e}", path.display())))?;

    let entries: Vec<serde_json::Value> = match value {
        serde_json::Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        serde_json::Value::Array(list) => list,
        _ => {
            return Err(RegistrarError::Config(format!(
                "{} holds neither an object nor an array",
                path.display()
            )))
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        match parse_entry(entry) {
            Ok(record) => records.push(record),
            Err(e) => warn!(error = %e, "skipping seed entry"),
        }
    }
    Ok(records)
}

fn parse_entry(value: serde_json::Value) -> Result<Record> {
    let entry: SeedEntry = serde_json::from_value(value)
        .map_err(|e| RegistrarError::Config(format!("malformed seed entry: {e}")))?;

    let name = Name::parse(&entry.name)?;
    let addr = Address::normalize(&entry.addr)?;

    let decode = |field: &Option<String>| -> Result<Option<Vec<u8>>> {
        match field.as_deref().filter(|s| !s.is_empty()) {
            Some(s) => BASE64
                .decode(s.trim())
                .map(Some)
                .map_err(|e| RegistrarError::Config(format!("bad seed credential: {e}"))),
            None => Ok(None),
        }
    };

    Ok(Record {
        name,
        addr,
        publickey: decode(&entry.publickey)?,
        signature: decode(&entry.signature)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    fn write_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_address_file() {
        let file = write_file("  0xAABBCCDDEEFF00112233445566778899AABBCCDD\n");
        let addr = read_address_file(file.path()).unwrap();
        assert_eq!(
            addr.to_hex_string(),
            "0xaabbccddeeff00112233445566778899aabbccdd"
        );
    }

    #[test]
    fn test_read_address_file_missing() {
        let err = read_address_file(Path::new("/nonexistent/identity.txt")).unwrap_err();
        assert!(matches!(err, RegistrarError::Config(_)));
    }

    #[test]
    fn test_read_address_file_garbage() {
        let file = write_file("not an address");
        assert!(read_address_file(file.path()).is_err());
    }

    #[test]
    fn test_load_seed_records_object_format() {
        let file = write_file(
            r#"{
                "0": { "name": "alice", "addr": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa" },
                "1": { "name": "bob", "addr": "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb" }
            }"#,
        );
        let records = load_seed_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_load_seed_records_array_format() {
        let file = write_file(
            r#"[{ "name": "alice", "addr": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa" }]"#,
        );
        let records = load_seed_records(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name.as_str(), "alice");
        assert!(records[0].publickey.is_none());
    }

    #[test]
    fn test_load_seed_records_skips_invalid_entries() {
        let file = write_file(
            r#"[
                { "name": "alice", "addr": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa" },
                { "name": "NOT VALID", "addr": "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb" },
                { "name": "zero", "addr": "0x0000000000000000000000000000000000000000" }
            ]"#,
        );
        let records = load_seed_records(file.path()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_load_seed_records_decodes_credentials() {
        let file = write_file(
            r#"[{
                "name": "alice",
                "addr": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
                "publickey": "AQEB",
                "signature": "AgIC"
            }]"#,
        );
        let records = load_seed_records(file.path()).unwrap();
        assert_eq!(records[0].publickey, Some(vec![1, 1, 1]));
        assert_eq!(records[0].signature, Some(vec![2, 2, 2]));
    }

    #[test]
    fn test_load_seed_records_rejects_non_collection() {
        let file = write_file(r#""just a string""#);
        assert!(load_seed_records(file.path()).is_err());
    }
}
