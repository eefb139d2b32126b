//! # argcheck-cli — Command-Line Front End
//!
//! Provides the `argcheck` binary.
//!
//! ## Subcommands
//!
//! - `argcheck validate --schema <FILE> <DOCUMENT>`: validate a document
//!   against a structure definition and print the normalized document.
//! - `argcheck types`: list the built-in type names.
//!
//! Exit codes: 0 on success, 1 on validation failure or operational error.

pub mod types;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

/// Read a JSON or YAML file into a JSON value.
///
/// `.yaml` and `.yml` files are parsed as YAML; everything else as JSON.
pub fn load_structured(path: &Path) -> Result<serde_json::Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse YAML in {}", path.display()))
    } else {
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_json_and_yaml_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json = write(dir.path(), "a.json", r#"{"age": "Int"}"#);
        let yaml = write(dir.path(), "a.yaml", "age: Int\n");
        assert_eq!(load_structured(&json).unwrap(), load_structured(&yaml).unwrap());
    }

    #[test]
    fn reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write(dir.path(), "bad.json", "{not json");
        let err = load_structured(&bad).unwrap_err();
        assert!(format!("{err:#}").contains("bad.json"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_structured(&dir.path().join("nope.json")).is_err());
    }
}
