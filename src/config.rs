use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::rotation::ScreenId;

pub const DEFAULT_CONFIG_PATH: &str = "display.cfg";
pub const CONFIG_PATH_ENV: &str = "STATUS_PANEL_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read {}: {}", .path.display(), .source)]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("All screens are disabled, nothing to rotate")]
    EmptyRotation,
}

/// Which screens take part in the rotation. Every flag defaults to enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenFlags {
    pub show_temperature: bool,
    pub show_cpu_memory: bool,
    pub show_sd_memory: bool,
    pub show_hostname: bool,
}

impl Default for ScreenFlags {
    fn default() -> Self {
        Self {
            show_temperature: true,
            show_cpu_memory: true,
            show_sd_memory: true,
            show_hostname: true,
        }
    }
}

impl ScreenFlags {
    pub fn is_enabled(&self, screen: ScreenId) -> bool {
        match screen {
            ScreenId::Temperature => self.show_temperature,
            ScreenId::CpuMemory => self.show_cpu_memory,
            ScreenId::SdMemory => self.show_sd_memory,
            ScreenId::Hostname => self.show_hostname,
        }
    }

    fn flag_mut(&mut self, screen: ScreenId) -> &mut bool {
        match screen {
            ScreenId::Temperature => &mut self.show_temperature,
            ScreenId::CpuMemory => &mut self.show_cpu_memory,
            ScreenId::SdMemory => &mut self.show_sd_memory,
            ScreenId::Hostname => &mut self.show_hostname,
        }
    }

    /// Loads flags from `path`, falling back to all-enabled defaults when the
    /// file cannot be read. The error, if any, is handed back as a warning.
    pub fn load_or_default(path: &Path, debug: bool) -> (Self, Option<ConfigError>) {
        match Self::from_file(path, debug) {
            Ok(flags) => (flags, None),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    pub fn from_file(path: &Path, debug: bool) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        if debug {
            debug!("Parsing screen configuration from {}", path.display());
        }
        Ok(Self::parse(&contents, debug))
    }

    /// Tolerant `key = value` / `key: value` parser. Unknown keys and bad
    /// values are skipped, leaving the affected flag at its default.
    pub fn parse(contents: &str, debug: bool) -> Self {
        let mut flags = Self::default();

        for (number, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let Some((key, value)) = line.split_once(['=', ':']) else {
                if debug {
                    debug!("line {}: no key/value separator, ignored: {:?}", number + 1, line);
                }
                continue;
            };

            let Some(screen) = screen_for_key(key) else {
                if debug {
                    debug!("line {}: unknown key {:?} ignored", number + 1, key.trim());
                }
                continue;
            };

            match parse_bool(value) {
                Some(enabled) => {
                    *flags.flag_mut(screen) = enabled;
                    if debug {
                        debug!("line {}: {} = {}", number + 1, screen, enabled);
                    }
                }
                None => {
                    if debug {
                        debug!(
                            "line {}: invalid value {:?} for {}, keeping default",
                            number + 1,
                            value.trim(),
                            screen
                        );
                    }
                }
            }
        }

        flags
    }
}

/// Config file location: `$STATUS_PANEL_CONFIG` if set, else `display.cfg`
/// in the working directory.
pub fn config_path() -> PathBuf {
    config_path_from(env::var_os(CONFIG_PATH_ENV))
}

fn config_path_from(override_path: Option<OsString>) -> PathBuf {
    override_path
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn screen_for_key(key: &str) -> Option<ScreenId> {
    let normalized: String = key
        .trim()
        .trim_matches('"')
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect();
    let name = normalized.strip_prefix("show").unwrap_or(&normalized);

    match name {
        "temperature" | "temp" => Some(ScreenId::Temperature),
        "cpumemory" | "cpu" => Some(ScreenId::CpuMemory),
        "sdmemory" | "sd" | "disk" => Some(ScreenId::SdMemory),
        "hostname" | "host" => Some(ScreenId::Hostname),
        _ => None,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    // Trailing comments are allowed after the value
    let value = value.split('#').next().unwrap_or_default();
    let value = value.trim().trim_matches(|c: char| c == '"' || c == '\'');

    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_flags_all_enabled() {
        let flags = ScreenFlags::default();
        for screen in ScreenId::ALL {
            assert!(flags.is_enabled(screen));
        }
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (flags, warning) = ScreenFlags::load_or_default(&dir.path().join("display.cfg"), false);
        assert_eq!(flags, ScreenFlags::default());
        assert!(matches!(warning, Some(ConfigError::Unreadable { .. })));
    }

    #[test]
    fn test_numeric_values() {
        let file = write_config(
            "show_temperature = 1\nshow_cpu_memory = 0\nshow_sd_memory = 1\nshow_hostname = 1\n",
        );
        let flags = ScreenFlags::from_file(file.path(), false).unwrap();
        assert!(flags.show_temperature);
        assert!(!flags.show_cpu_memory);
        assert!(flags.show_sd_memory);
        assert!(flags.show_hostname);
    }

    #[test]
    fn test_yaml_style_and_word_values() {
        let flags = ScreenFlags::parse(
            "temperature: false\ncpuMemory: \"no\"\nsd-memory: off\nhostname: true\n",
            false,
        );
        assert_eq!(
            flags,
            ScreenFlags {
                show_temperature: false,
                show_cpu_memory: false,
                show_sd_memory: false,
                show_hostname: true,
            }
        );
    }

    #[test]
    fn test_comments_blank_lines_and_unknown_keys() {
        let flags = ScreenFlags::parse(
            "# panel screens\n\n; legacy comment\nbrightness = 7\nshow_hostname = 0  # hide\n",
            true,
        );
        assert!(flags.show_temperature);
        assert!(flags.show_cpu_memory);
        assert!(flags.show_sd_memory);
        assert!(!flags.show_hostname);
    }

    #[test]
    fn test_malformed_lines_keep_defaults() {
        let flags = ScreenFlags::parse(
            "show_temperature\nshow_cpu_memory = maybe\n=1\ngarbage line here\n",
            true,
        );
        assert_eq!(flags, ScreenFlags::default());
    }

    #[test]
    fn test_only_hostname() {
        let flags = ScreenFlags::parse(
            "show_temperature=0\nshow_cpu_memory=0\nshow_sd_memory=0\nshow_hostname=1\n",
            false,
        );
        assert!(flags.show_hostname);
        assert!(!flags.show_temperature && !flags.show_cpu_memory && !flags.show_sd_memory);
    }

    #[test]
    fn test_all_disabled() {
        let flags = ScreenFlags::parse(
            "temperature=0\ncpu_memory=0\nsd_memory=0\nhostname=0\n",
            false,
        );
        assert!(ScreenId::ALL.iter().all(|&screen| !flags.is_enabled(screen)));
    }

    #[test]
    fn test_loading_twice_is_identical() {
        let file = write_config("show_cpu_memory = 0\nshow_sd_memory = false\n");
        let first = ScreenFlags::from_file(file.path(), false).unwrap();
        let second = ScreenFlags::from_file(file.path(), false).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_config_path_override() {
        assert_eq!(
            config_path_from(Some(OsString::from("/etc/status-panel/display.cfg"))),
            PathBuf::from("/etc/status-panel/display.cfg")
        );
        assert_eq!(config_path_from(None), PathBuf::from(DEFAULT_CONFIG_PATH));
        assert_eq!(
            config_path_from(Some(OsString::new())),
            PathBuf::from(DEFAULT_CONFIG_PATH)
        );
    }
}
