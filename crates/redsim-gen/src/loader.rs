//! Scenario Loader
//!
//! Resolves a scenario name to `<dir>/<name>.json`. A missing file is a
//! normal operator condition (a typo'd name) and comes back as
//! `Ok(None)`; only an unreadable or unparsable document is an error.

use crate::scenario::Scenario;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Default scenario directory, relative to the working directory
pub const DEFAULT_SCENARIO_DIR: &str = "scenarios";

#[derive(Debug)]
pub enum LoaderError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoaderError::Io(e) => write!(f, "failed to read scenario file: {}", e),
            LoaderError::Parse(e) => write!(f, "malformed scenario document: {}", e),
        }
    }
}

impl std::error::Error for LoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoaderError::Io(e) => Some(e),
            LoaderError::Parse(e) => Some(e),
        }
    }
}

/// Resolve a named scenario from the scenario directory.
///
/// Idempotent and side-effect free: looking up an unresolvable name any
/// number of times yields `Ok(None)` every time.
pub fn load_scenario(dir: &Path, name: &str) -> Result<Option<Scenario>, LoaderError> {
    let path = dir.join(format!("{}.json", name));

    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(LoaderError::Io(e)),
    };

    let scenario: Scenario = serde_json::from_str(&raw).map_err(LoaderError::Parse)?;
    Ok(Some(scenario))
}

/// Names of every loadable scenario in the directory, sorted
pub fn list_scenarios(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .filter_map(|entry| {
                    let path = entry.path();
                    if path.extension().is_some_and(|ext| ext == "json") {
                        path.file_stem()
                            .and_then(|stem| stem.to_str())
                            .map(|stem| stem.to_string())
                    } else {
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("redsim-loader-{}-{}", tag, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_scenario_is_none_and_idempotent() {
        let dir = scratch_dir("missing");
        assert!(load_scenario(&dir, "doesNotExist").unwrap().is_none());
        // A second lookup behaves identically, with no side effect
        assert!(load_scenario(&dir, "doesNotExist").unwrap().is_none());
        assert!(list_scenarios(&dir).is_empty());
    }

    #[test]
    fn test_loads_well_formed_document() {
        let dir = scratch_dir("wellformed");
        fs::write(
            dir.join("sql-burst.json"),
            r#"{"name":"sql-burst","steps":[{"action":"sqlInjection","count":3,"delayMs":0}]}"#,
        )
        .unwrap();

        let scenario = load_scenario(&dir, "sql-burst").unwrap().unwrap();
        assert_eq!(scenario.name, "sql-burst");
        assert_eq!(scenario.steps.len(), 1);
        assert_eq!(scenario.steps[0].action, "sqlInjection");
        assert_eq!(scenario.steps[0].count, 3);
        assert_eq!(scenario.steps[0].delay_ms, 0);
    }

    #[test]
    fn test_delay_defaults_to_zero_when_absent() {
        let dir = scratch_dir("defaults");
        fs::write(
            dir.join("quick.json"),
            r#"{"name":"quick","steps":[{"action":"portScan","count":1}]}"#,
        )
        .unwrap();

        let scenario = load_scenario(&dir, "quick").unwrap().unwrap();
        assert_eq!(scenario.steps[0].delay_ms, 0);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        let dir = scratch_dir("malformed");
        fs::write(dir.join("broken.json"), "{ not json").unwrap();

        match load_scenario(&dir, "broken") {
            Err(LoaderError::Parse(_)) => {}
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_list_names_sorted() {
        let dir = scratch_dir("list");
        fs::write(dir.join("zeta.json"), "{}").unwrap();
        fs::write(dir.join("alpha.json"), "{}").unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        assert_eq!(list_scenarios(&dir), vec!["alpha", "zeta"]);
    }
}
