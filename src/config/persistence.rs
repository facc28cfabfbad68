//! Preference persistence for Quire
//!
//! The engine never owns global preference state. Hosts hand it a
//! `PreferenceStore`, a plain string key/value interface, and the helpers
//! here translate `FormatSettings` to and from that store. Two stores ship
//! with the crate: an in-memory map and a JSON file in the platform config
//! directory.

use crate::config::{FormatSettings, IndentUnit, LineEnding};
use crate::error::{Error, Result, ResultExt};
use log::{debug, info};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "quire";

/// Preference file name
const PREFERENCES_FILE_NAME: &str = "preferences.json";

/// Suffix of the temporary file used during atomic writes
const BACKUP_SUFFIX: &str = "bak";

/// Store key for the indent kind (`spaces` or `tabs`)
pub const KEY_INDENT_TYPE: &str = "html-indent-type";
/// Store key for the indent width (`2` or `4`)
pub const KEY_INDENT_SIZE: &str = "html-indent-size";
/// Store key for the line ending (`lf` or `crlf`)
pub const KEY_LINE_ENDING: &str = "html-line-ending";

// ─────────────────────────────────────────────────────────────────────────────
// Store Trait
// ─────────────────────────────────────────────────────────────────────────────

/// A string key/value store for preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Volatile store, handy for tests and hosts that persist elsewhere.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// JSON File Store
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the engine.
///
/// - **Windows**: `%APPDATA%\quire\`
/// - **macOS**: `~/Library/Application Support/quire/`
/// - **Linux**: `~/.config/quire/`
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the directory cannot be determined
/// (e.g., if the HOME environment variable is not set).
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Preferences kept as one flat JSON object on disk.
///
/// Every `set` rewrites the whole file atomically: the JSON goes to a
/// sibling `.bak` file which is then renamed over the original.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at the default location in the platform config directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(get_config_dir()?.join(PREFERENCES_FILE_NAME)))
    }

    /// Open the store backed by `path`.
    ///
    /// A missing, empty or unreadable file yields an empty store; a warning
    /// is logged for the unreadable case.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = read_values(&path)
            .unwrap_or_warn_default(BTreeMap::new(), "Failed to load preferences");
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                debug!("Creating config directory: {}", dir.display());
                fs::create_dir_all(dir).map_err(|e| Error::ConfigSave {
                    path: dir.to_path_buf(),
                    source: Box::new(e),
                })?;
            }
        }

        let json = serde_json::to_string_pretty(&self.values).map_err(|e| Error::ConfigSave {
            path: self.path.clone(),
            source: Box::new(e),
        })?;

        let backup_path = self.path.with_extension(BACKUP_SUFFIX);
        fs::write(&backup_path, &json).map_err(|e| Error::ConfigSave {
            path: backup_path.clone(),
            source: Box::new(e),
        })?;
        fs::rename(&backup_path, &self.path).map_err(|e| Error::ConfigSave {
            path: self.path.clone(),
            source: Box::new(e),
        })?;

        debug!("Preferences written to {}", self.path.display());
        Ok(())
    }
}

fn read_values(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        debug!("Preference file not found at {}, starting empty", path.display());
        return Ok(BTreeMap::new());
    }

    let contents = fs::read_to_string(path).map_err(|e| Error::ConfigLoad {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let values = serde_json::from_str(&contents).map_err(|e| Error::ConfigParse {
        message: format!("Failed to parse {}: {}", path.display(), e),
        source: Some(Box::new(e)),
    })?;

    info!("Preferences loaded from {}", path.display());
    Ok(values)
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let previous = self.values.insert(key.to_string(), value.to_string());
        if let Err(e) = self.write() {
            match previous {
                Some(old) => self.values.insert(key.to_string(), old),
                None => self.values.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Format Settings <-> Store
// ─────────────────────────────────────────────────────────────────────────────

/// Read formatting preferences from `store`.
///
/// Missing keys use defaults silently; unreadable values use defaults with a
/// warning.
pub fn load_format_settings(store: &dyn PreferenceStore) -> FormatSettings {
    let defaults = FormatSettings::default();

    let size = match store.get(KEY_INDENT_SIZE) {
        None => None,
        Some(raw) => parse_indent_size(&raw)
            .unwrap_or_warn_default(None, "Ignoring stored indent size"),
    };

    let indent = match store.get(KEY_INDENT_TYPE) {
        None => match (defaults.indent, size) {
            (IndentUnit::Spaces(_), Some(n)) => IndentUnit::Spaces(n),
            (unit, _) => unit,
        },
        Some(raw) => parse_indent_type(&raw, size)
            .unwrap_or_warn_default(defaults.indent, "Ignoring stored indent type"),
    };

    let line_ending = match store.get(KEY_LINE_ENDING) {
        None => defaults.line_ending,
        Some(raw) => parse_line_ending(&raw)
            .unwrap_or_warn_default(defaults.line_ending, "Ignoring stored line ending"),
    };

    let mut settings = FormatSettings {
        indent,
        line_ending,
    };
    settings.sanitize();
    settings
}

/// Write formatting preferences to `store`.
pub fn save_format_settings(
    store: &mut dyn PreferenceStore,
    settings: &FormatSettings,
) -> Result<()> {
    match settings.indent {
        IndentUnit::Spaces(n) => {
            store.set(KEY_INDENT_TYPE, "spaces")?;
            store.set(KEY_INDENT_SIZE, &n.to_string())?;
        }
        IndentUnit::Tabs => store.set(KEY_INDENT_TYPE, "tabs")?,
    }
    let ending = match settings.line_ending {
        LineEnding::Lf => "lf",
        LineEnding::Crlf => "crlf",
    };
    store.set(KEY_LINE_ENDING, ending)?;
    info!(
        "Format settings saved: {}, {}",
        settings.indent.label(),
        settings.line_ending.label()
    );
    Ok(())
}

fn invalid(key: &str, raw: &str) -> Error {
    Error::ConfigParse {
        message: format!("Invalid value {:?} for preference {}", raw, key),
        source: None,
    }
}

fn parse_indent_size(raw: &str) -> Result<Option<u8>> {
    match raw.trim().parse::<u8>() {
        Ok(n) if IndentUnit::SPACE_WIDTHS.contains(&n) => Ok(Some(n)),
        _ => Err(invalid(KEY_INDENT_SIZE, raw)),
    }
}

fn parse_indent_type(raw: &str, size: Option<u8>) -> Result<IndentUnit> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "spaces" => Ok(IndentUnit::Spaces(size.unwrap_or(2))),
        "tabs" => Ok(IndentUnit::Tabs),
        _ => Err(invalid(KEY_INDENT_TYPE, raw)),
    }
}

fn parse_line_ending(raw: &str) -> Result<LineEnding> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "lf" => Ok(LineEnding::Lf),
        "crlf" => Ok(LineEnding::Crlf),
        _ => Err(invalid(KEY_LINE_ENDING, raw)),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Helper holding a temporary directory for file-store tests.
    struct TestEnv {
        _temp_dir: TempDir,
        file: PathBuf,
    }

    impl TestEnv {
        fn new() -> Self {
            let temp_dir = TempDir::new().expect("Failed to create temp dir");
            let file = temp_dir.path().join(APP_NAME).join(PREFERENCES_FILE_NAME);
            Self {
                _temp_dir: temp_dir,
                file,
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Memory store
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_memory_store_get_set() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a"), None);
        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a"), Some("2".to_string()));
    }

    #[test]
    fn test_empty_store_gives_defaults() {
        let store = MemoryStore::new();
        assert_eq!(load_format_settings(&store), FormatSettings::default());
    }

    #[test]
    fn test_format_settings_roundtrip() {
        let mut store = MemoryStore::new();
        for settings in [
            FormatSettings {
                indent: IndentUnit::Spaces(4),
                line_ending: LineEnding::Crlf,
            },
            FormatSettings {
                indent: IndentUnit::Tabs,
                line_ending: LineEnding::Lf,
            },
        ] {
            save_format_settings(&mut store, &settings).unwrap();
            assert_eq!(load_format_settings(&store), settings);
        }
    }

    #[test]
    fn test_stored_keys_and_values() {
        let mut store = MemoryStore::new();
        let settings = FormatSettings {
            indent: IndentUnit::Spaces(4),
            line_ending: LineEnding::Crlf,
        };
        save_format_settings(&mut store, &settings).unwrap();
        assert_eq!(store.get(KEY_INDENT_TYPE).as_deref(), Some("spaces"));
        assert_eq!(store.get(KEY_INDENT_SIZE).as_deref(), Some("4"));
        assert_eq!(store.get(KEY_LINE_ENDING).as_deref(), Some("crlf"));
    }

    #[test]
    fn test_garbage_values_fall_back() {
        let mut store = MemoryStore::new();
        store.set(KEY_INDENT_TYPE, "wavy").unwrap();
        store.set(KEY_INDENT_SIZE, "seven").unwrap();
        store.set(KEY_LINE_ENDING, "CR").unwrap();
        assert_eq!(load_format_settings(&store), FormatSettings::default());
    }

    #[test]
    fn test_values_are_case_insensitive() {
        let mut store = MemoryStore::new();
        store.set(KEY_INDENT_TYPE, "Spaces").unwrap();
        store.set(KEY_INDENT_SIZE, " 4 ").unwrap();
        store.set(KEY_LINE_ENDING, "CRLF").unwrap();
        let settings = load_format_settings(&store);
        assert_eq!(settings.indent, IndentUnit::Spaces(4));
        assert_eq!(settings.line_ending, LineEnding::Crlf);
    }

    #[test]
    fn test_size_without_type_applies_to_default_spaces() {
        let mut store = MemoryStore::new();
        store.set(KEY_INDENT_SIZE, "4").unwrap();
        assert_eq!(load_format_settings(&store).indent, IndentUnit::Spaces(4));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // JSON file store
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let env = TestEnv::new();
        let store = JsonFileStore::open(&env.file);
        assert_eq!(store.get(KEY_INDENT_TYPE), None);
        assert!(!env.file.exists());
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let env = TestEnv::new();
        let settings = FormatSettings {
            indent: IndentUnit::Tabs,
            line_ending: LineEnding::Crlf,
        };
        {
            let mut store = JsonFileStore::open(&env.file);
            save_format_settings(&mut store, &settings).unwrap();
        }
        assert!(env.file.exists());
        assert!(!env.file.with_extension(BACKUP_SUFFIX).exists());

        let reopened = JsonFileStore::open(&env.file);
        assert_eq!(load_format_settings(&reopened), settings);
    }

    #[test]
    fn test_file_store_writes_flat_json_object() {
        let env = TestEnv::new();
        let mut store = JsonFileStore::open(&env.file);
        store.set("k", "v").unwrap();
        let contents = fs::read_to_string(&env.file).unwrap();
        let parsed: BTreeMap<String, String> = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.get("k").map(String::as_str), Some("v"));
    }

    #[test]
    fn test_file_store_corrupted_file_starts_empty() {
        let env = TestEnv::new();
        fs::create_dir_all(env.file.parent().unwrap()).unwrap();
        fs::write(&env.file, "{ not json").unwrap();
        let store = JsonFileStore::open(&env.file);
        assert_eq!(store.get("anything"), None);
    }

    #[test]
    fn test_file_store_empty_file_starts_empty() {
        let env = TestEnv::new();
        fs::create_dir_all(env.file.parent().unwrap()).unwrap();
        fs::write(&env.file, "  \n").unwrap();
        assert_eq!(JsonFileStore::open(&env.file).get("x"), None);
    }

    #[test]
    fn test_get_config_dir_contains_app_name() {
        if let Ok(path) = get_config_dir() {
            assert!(path.to_string_lossy().contains(APP_NAME));
        }
    }
}
