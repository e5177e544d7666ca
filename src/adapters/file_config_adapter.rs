//! INI file configuration adapter.

use crate::domain::error::SigchainError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SigchainError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config
            .load(path)
            .map_err(|reason| SigchainError::ConfigParse {
                file: path.display().to_string(),
                reason,
            })?;
        tracing::debug!(file = %path.display(), "loaded configuration");
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, SigchainError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| SigchainError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    fn parse_bool(value: &str) -> Option<bool> {
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
        self.config
            .get(section, key)
            .as_deref()
            .and_then(Self::parse_bool)
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const RULE_INI: &str = "
[rule]
max_signals = 2
ignore_period = yes
history_bars = 128
bands = 2.5

[entry]
indicator1 = 3
operator1 = 0
indicator2 = -1
";

    #[test]
    fn reads_sections_and_keys() {
        let adapter = FileConfigAdapter::from_string(RULE_INI).unwrap();
        assert_eq!(adapter.get_string("entry", "indicator1"), Some("3".into()));
        assert_eq!(adapter.get_int("rule", "max_signals", 5), 2);
        assert_eq!(adapter.get_int("entry", "indicator2", 0), -1);
        assert_eq!(adapter.get_double("rule", "bands", 0.0), 2.5);
        assert!(adapter.get_bool("rule", "ignore_period", false));
    }

    #[test]
    fn keys_are_case_insensitive() {
        let adapter = FileConfigAdapter::from_string("[Entry]\nIndicator1 = 4\n").unwrap();
        assert_eq!(adapter.get_int("entry", "indicator1", 0), 4);
    }

    #[test]
    fn defaults_for_missing_or_malformed() {
        let adapter = FileConfigAdapter::from_string("[rule]\nmax_signals = five\n").unwrap();
        assert_eq!(adapter.get_string("rule", "missing"), None);
        assert_eq!(adapter.get_string("nowhere", "key"), None);
        assert_eq!(adapter.get_int("rule", "max_signals", 5), 5);
        assert_eq!(adapter.get_double("rule", "missing", 1.5), 1.5);
        assert!(adapter.get_bool("rule", "missing", true));
    }

    #[test]
    fn bool_spellings() {
        let adapter =
            FileConfigAdapter::from_string("[rule]\na = true\nb = No\nc = 1\nd = maybe\n").unwrap();
        assert!(adapter.get_bool("rule", "a", false));
        assert!(!adapter.get_bool("rule", "b", true));
        assert!(adapter.get_bool("rule", "c", false));
        assert!(adapter.get_bool("rule", "d", true));
        assert!(!adapter.get_bool("rule", "d", false));
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", RULE_INI).unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_int("rule", "history_bars", 0), 128);
    }

    #[test]
    fn from_file_missing_is_config_parse_error() {
        let err = FileConfigAdapter::from_file("/nonexistent/sigchain.ini")
            .err()
            .unwrap();
        assert!(matches!(err, SigchainError::ConfigParse { .. }));
        assert_eq!(err.exit_status(), 2);
    }
}
