//! Configuration File Loader
//!
//! Locates and reads the per-user config file (`~/.config/dspdfviewer.ini`)
//! and overlays its entries onto a raw value set.
//!
//! Every failure here is soft: a missing, unreadable or non-UTF-8 file
//! contributes nothing, and a single bad line is skipped with a warning.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::raw::{Provenance, RawValueSet};
use super::schema::OptionValue;
use crate::constants::paths;

/// One recognized `key = value` entry from a config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    /// Canonical option name
    pub name: &'static str,
    pub value: OptionValue,
    /// 1-based line number in the file
    pub line: usize,
}

/// Configuration file loader
pub struct ConfigLoader;

impl ConfigLoader {
    // =========================================================================
    // Path Management
    // =========================================================================

    /// Location of the user's config file, if a home directory is known
    pub fn config_file_path(home: Option<&OsStr>) -> Option<PathBuf> {
        let home = home.filter(|h| !h.is_empty())?;
        Some(PathBuf::from(home).join(paths::CONFIG_FILE_RELATIVE))
    }

    /// Read the user's config file, best effort
    pub fn read_user_config(home: Option<&OsStr>) -> Option<Vec<u8>> {
        let Some(path) = Self::config_file_path(home) else {
            debug!("No home directory known, skipping config file");
            return None;
        };
        Self::read(&path)
    }

    /// Read a config file, returning `None` if it is absent or unreadable
    pub fn read(path: &Path) -> Option<Vec<u8>> {
        match fs::read(path) {
            Ok(bytes) => {
                debug!("Loaded config file: {}", path.display());
                Some(bytes)
            }
            Err(e) => {
                debug!("Config file {} not used: {}", path.display(), e);
                None
            }
        }
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    /// Parse config-file bytes into the entries the registry accepts from a file.
    ///
    /// Unknown keys, keys that may only come from the command line, and
    /// values that do not parse are dropped.
    pub fn parse(registry: super::OptionRegistry, bytes: &[u8]) -> Vec<ConfigEntry> {
        let content = match std::str::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                warn!("Ignoring config file that is not valid UTF-8: {}", e);
                return Vec::new();
            }
        };

        let mut entries = Vec::new();
        let mut section: Option<String> = None;

        for (index, raw_line) in content.lines().enumerate() {
            let line_no = index + 1;
            let line = strip_comment(raw_line).trim();

            if line.is_empty() {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let name = name.trim();
                section = (!name.is_empty()).then(|| name.to_string());
                continue;
            }

            let Some((key, value)) = split_pair(line) else {
                debug!("Config line {}: no value for '{}', skipped", line_no, line);
                continue;
            };

            let key = match &section {
                Some(prefix) => format!("{}.{}", prefix, key),
                None => key.to_string(),
            };

            let Some(descriptor) = registry
                .lookup(&key)
                .filter(|d| d.sources.config_file())
            else {
                debug!("Config line {}: unrecognized key '{}', ignored", line_no, key);
                continue;
            };

            match descriptor.parse(value) {
                Ok(value) => entries.push(ConfigEntry {
                    name: descriptor.name,
                    value,
                    line: line_no,
                }),
                Err(e) => warn!(
                    "Config line {}: invalid value for '{}': {}",
                    line_no, descriptor.name, e
                ),
            }
        }

        entries
    }

    /// Overlay config-file bytes onto a raw value set with `ConfigFile` provenance
    pub fn overlay(raw: &mut RawValueSet, bytes: &[u8]) {
        for entry in Self::parse(raw.registry(), bytes) {
            if let Err(e) = raw.set(entry.name, entry.value, Provenance::ConfigFile) {
                warn!("Config line {}: {}", entry.line, e);
            }
        }
    }
}

/// Drop full-line `#` / `;` comments and trailing ` #` comments
fn strip_comment(line: &str) -> &str {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') || trimmed.starts_with(';') {
        return "";
    }
    match line.find(" #").or_else(|| line.find("\t#")) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Split `key = value` or `key value`
fn split_pair(line: &str) -> Option<(&str, &str)> {
    let (key, value) = match line.split_once('=') {
        Some(pair) => pair,
        None => line.split_once(char::is_whitespace)?,
    };

    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key, value))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{OptionRegistry, names};
    use tempfile::TempDir;

    fn parse(content: &str) -> Vec<ConfigEntry> {
        ConfigLoader::parse(OptionRegistry::standard(), content.as_bytes())
    }

    #[test]
    fn test_config_file_path_from_home() {
        let path = ConfigLoader::config_file_path(Some(OsStr::new("/home/alice"))).unwrap();
        assert_eq!(path, PathBuf::from("/home/alice/.config/dspdfviewer.ini"));
        assert!(ConfigLoader::config_file_path(None).is_none());
        assert!(ConfigLoader::config_file_path(Some(OsStr::new(""))).is_none());
    }

    #[test]
    fn test_read_user_config_missing_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(ConfigLoader::read_user_config(Some(tmp.path().as_os_str())).is_none());
    }

    #[test]
    fn test_read_user_config_present() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(".config");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("dspdfviewer.ini"), "thumbnails = false\n").unwrap();

        let bytes = ConfigLoader::read_user_config(Some(tmp.path().as_os_str())).unwrap();
        assert_eq!(bytes, b"thumbnails = false\n");
    }

    #[test]
    fn test_read_directory_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(ConfigLoader::read(tmp.path()).is_none());
    }

    #[test]
    fn test_parse_equals_and_whitespace_forms() {
        let entries = parse("hyperlink-support = false\nprerender-next-pages 4\nwall-clock=0\n");
        assert_eq!(
            entries,
            vec![
                ConfigEntry {
                    name: names::HYPERLINK_SUPPORT,
                    value: OptionValue::Bool(false),
                    line: 1,
                },
                ConfigEntry {
                    name: names::PRERENDER_NEXT_PAGES,
                    value: OptionValue::Unsigned(4),
                    line: 2,
                },
                ConfigEntry {
                    name: names::WALL_CLOCK,
                    value: OptionValue::Bool(false),
                    line: 3,
                },
            ]
        );
    }

    #[test]
    fn test_parse_skips_comments_unknown_and_cli_only() {
        let entries = parse(
            "# presenter setup\n\
             ; old style comment\n\
             \n\
             future-option = 7\n\
             full-page = true\n\
             document-path = talk.pdf\n\
             slide-clock = off # not needed\n",
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, names::SLIDE_CLOCK);
        assert_eq!(entries[0].value, OptionValue::Bool(false));
    }

    #[test]
    fn test_parse_sectioned_keys_are_unknown() {
        let entries = parse("[viewer]\nthumbnails = false\n");
        assert!(entries.is_empty());
    }

    #[test]
    fn test_parse_skips_bad_values() {
        let entries = parse(
            "thumbnails = perhaps\nbottom-pane-height = tall\nprerender-next-pages = -1\ncache-to-memory = no\n",
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, names::CACHE_TO_MEMORY);
    }

    #[test]
    fn test_parse_keeps_negative_bounded_value() {
        let entries = parse("bottom-pane-height = -3\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value, OptionValue::Integer(-3));
    }

    #[test]
    fn test_strip_comment_forms() {
        assert_eq!(strip_comment("; legacy"), "");
        assert_eq!(strip_comment("  # note"), "");
        assert_eq!(strip_comment("wall-clock = off # quiet"), "wall-clock = off");
        assert_eq!(strip_comment("wall-clock = off\t# quiet"), "wall-clock = off");
        assert_eq!(strip_comment("cache-to-memory = yes ; kept"), "cache-to-memory = yes ; kept");
    }

    #[test]
    fn test_parse_alias_resolves_to_canonical() {
        let entries = parse("bottom-pane-height-percent = 35\n");
        assert_eq!(entries[0].name, names::BOTTOM_PANE_HEIGHT);
        assert_eq!(entries[0].value, OptionValue::Unsigned(35));
    }

    #[test]
    fn test_parse_invalid_utf8_yields_nothing() {
        let entries = ConfigLoader::parse(OptionRegistry::standard(), &[0xff, 0xfe, b'\n']);
        assert!(entries.is_empty());
    }

    #[test]
    fn test_overlay_later_lines_win() {
        let mut raw = RawValueSet::from_defaults(OptionRegistry::standard());
        ConfigLoader::overlay(&mut raw, b"thumbnails = false\nthumbnails = true\n");
        assert!(raw.flag(names::THUMBNAILS));
        assert_eq!(raw.provenance(names::THUMBNAILS), Some(Provenance::ConfigFile));
        assert_eq!(raw.provenance(names::WALL_CLOCK), Some(Provenance::Default));
    }
}
