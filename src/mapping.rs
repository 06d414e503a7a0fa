use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{KhataError, Result};
use crate::settings::get_data_dir;

/// Description → category overrides supplied by the user. Loaded fresh
/// on every categorization; the only state that outlives a run.
pub type Mapping = BTreeMap<String, String>;

/// Suggested category vocabulary advertised to the user. This is a
/// separate taxonomy from the categorizer's internal rule table and the
/// two are intentionally not reconciled.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Shopping",
    "Grocery / Daily Needs",
    "Bills & Recharge",
    "Food & Dining",
    "Subscriptions",
    "Transfers",
    "Salary / Income",
    "Travel / Fuel",
    "Others",
];

fn mapping_path() -> PathBuf {
    get_data_dir().join("name_category_map.json")
}

pub fn load_mapping() -> Mapping {
    load_mapping_from(&mapping_path())
}

pub fn load_mapping_from(path: &Path) -> Mapping {
    if path.exists() {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        serde_json::from_str(&content).unwrap_or_default()
    } else {
        Mapping::new()
    }
}

pub fn save_mapping(mapping: &Mapping) -> Result<()> {
    save_mapping_to(&mapping_path(), mapping)
}

pub fn save_mapping_to(path: &Path, mapping: &Mapping) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(mapping)
        .map_err(|e| KhataError::Mapping(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

/// Merge a partial mapping into the stored one: matching keys are
/// overwritten, everything else is retained. Whole-table
/// read-then-write; concurrent writers are last-writer-wins.
pub fn update_mapping(partial: &Mapping) -> Result<Mapping> {
    update_mapping_at(&mapping_path(), partial)
}

pub fn update_mapping_at(path: &Path, partial: &Mapping) -> Result<Mapping> {
    let mut merged = load_mapping_from(path);
    for (name, category) in partial {
        merged.insert(name.clone(), category.clone());
    }
    save_mapping_to(path, &merged)?;
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mapping = load_mapping_from(&dir.path().join("absent.json"));
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_load_garbage_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        std::fs::write(&path, "not json at all").unwrap();
        assert!(load_mapping_from(&path).is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("map.json");
        let mut mapping = Mapping::new();
        mapping.insert("John Doe".to_string(), "Transfers".to_string());
        save_mapping_to(&path, &mapping).unwrap();
        assert_eq!(load_mapping_from(&path), mapping);
    }

    #[test]
    fn test_update_merges_and_retains() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.json");
        let mut initial = Mapping::new();
        initial.insert("A".to_string(), "Food & Dining".to_string());
        initial.insert("B".to_string(), "Shopping".to_string());
        save_mapping_to(&path, &initial).unwrap();

        let mut partial = Mapping::new();
        partial.insert("B".to_string(), "Transfers".to_string());
        partial.insert("C".to_string(), "Others".to_string());
        let merged = update_mapping_at(&path, &partial).unwrap();

        assert_eq!(merged.get("A").map(String::as_str), Some("Food & Dining"));
        assert_eq!(merged.get("B").map(String::as_str), Some("Transfers"));
        assert_eq!(merged.get("C").map(String::as_str), Some("Others"));
        assert_eq!(load_mapping_from(&path), merged);
    }
}
