use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::{Path, PathBuf};

use crate::config::AnalyzerConfig;

const PROJECT_FILE: &str = ".scarrc";

/// Settings read from a `.scarrc` / `config.ini` file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub log_path: Option<String>,
    pub log_name: Option<String>,
    pub log_ext: Option<String>,
    pub dst_file: Option<String>,
    pub threads: Option<usize>,
}

impl ConfigFile {
    /// Find project-level .scarrc by walking up directory tree
    pub fn find_project_config() -> Option<PathBuf> {
        let mut current = env::current_dir().ok()?;
        loop {
            let config_path = current.join(PROJECT_FILE);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                break;
            }
        }
        None
    }

    /// Get list of user config file locations in order of preference
    pub fn get_user_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. $XDG_CONFIG_HOME/scar/config.ini (~/.config when unset)
        // 2. ~/.scarrc
        let xdg_config = env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                env::var("HOME")
                    .map(|h| PathBuf::from(h).join(".config"))
                    .unwrap_or_else(|_| PathBuf::from(".config"))
            });
        paths.push(xdg_config.join("scar").join("config.ini"));

        if let Ok(home) = env::var("HOME") {
            paths.push(PathBuf::from(home).join(PROJECT_FILE));
        }

        paths
    }

    /// Load configuration with proper precedence: project > user
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // First existing user config file only
        if let Some(path) = Self::get_user_config_paths()
            .into_iter()
            .find(|p| p.exists())
        {
            config = Self::merge_configs(config, Self::load_from_path(&path)?);
        }

        if let Some(project_path) = Self::find_project_config() {
            config = Self::merge_configs(config, Self::load_from_path(&project_path)?);
        }

        Ok(config)
    }

    /// Layered configuration, topped by an explicit file when one is given
    pub fn load_with_custom_path(custom_path: Option<&Path>) -> Result<Self> {
        let config = Self::load()?;
        match custom_path {
            Some(path) => Ok(Self::merge_configs(config, Self::load_from_path(path)?)),
            None => Ok(config),
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse_ini_content(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse INI content from string
    fn parse_ini_content(content: &str) -> Result<Self> {
        let mut config = Self::default();
        let mut current_section = String::new();

        for (number, line) in content.lines().enumerate() {
            let line_number = number + 1;
            let line = line.trim();

            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len() - 1].trim().to_string();
                continue;
            }

            let (key, value) = line
                .split_once('=')
                .map(|(k, v)| (k.trim(), v.trim()))
                .ok_or_else(|| anyhow!("Line {}: expected 'key = value'", line_number))?;

            if !current_section.is_empty() && current_section != "defaults" {
                return Err(anyhow!(
                    "Line {}: unknown section [{}]",
                    line_number,
                    current_section
                ));
            }

            let value = unquote(value).to_string();
            match key {
                "log_path" => config.log_path = Some(value),
                "log_name" => config.log_name = Some(value),
                "log_ext" => config.log_ext = Some(value),
                "dst_file" => config.dst_file = Some(value),
                "threads" => {
                    let threads = value.parse().with_context(|| {
                        format!("Line {}: threads must be a number, got '{}'", line_number, value)
                    })?;
                    config.threads = Some(threads);
                }
                other => {
                    return Err(anyhow!("Line {}: unknown key '{}'", line_number, other));
                }
            }
        }

        Ok(config)
    }

    /// Merge two configuration objects, with the second taking precedence
    fn merge_configs(base: Self, overlay: Self) -> Self {
        Self {
            log_path: overlay.log_path.or(base.log_path),
            log_name: overlay.log_name.or(base.log_name),
            log_ext: overlay.log_ext.or(base.log_ext),
            dst_file: overlay.dst_file.or(base.dst_file),
            threads: overlay.threads.or(base.threads),
        }
    }

    /// Overwrite the settings this file defines
    pub fn apply_to(&self, config: &mut AnalyzerConfig) {
        if let Some(log_path) = &self.log_path {
            config.log_path = log_path.clone();
        }
        if let Some(log_name) = &self.log_name {
            config.log_name = log_name.clone();
        }
        if let Some(log_ext) = &self.log_ext {
            config.log_ext = log_ext.clone();
        }
        if let Some(dst_file) = &self.dst_file {
            config.dst_file = dst_file.clone();
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
    }
}

/// Strip one pair of matching surrounding quotes
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# site defaults").unwrap();
        writeln!(file, "log_path = /var/scar").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "[defaults]").unwrap();
        writeln!(file, "log_name = charger").unwrap();
        writeln!(file, "; keep the original suffix").unwrap();
        writeln!(file, "dst_file = \"_scar.log\"").unwrap();
        writeln!(file, "threads = 4").unwrap();
        file.flush().unwrap();

        let config = ConfigFile::load_from_path(file.path()).unwrap();
        assert_eq!(config.log_path.as_deref(), Some("/var/scar"));
        assert_eq!(config.log_name.as_deref(), Some("charger"));
        assert_eq!(config.log_ext, None);
        assert_eq!(config.dst_file.as_deref(), Some("_scar.log"));
        assert_eq!(config.threads, Some(4));
    }

    #[test]
    fn test_unknown_key_names_key_and_line() {
        let err = ConfigFile::parse_ini_content("log_ext = .log\nlog_dir = /tmp\n").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("log_dir"));
        assert!(message.contains("Line 2"));
    }

    #[test]
    fn test_invalid_lines() {
        assert!(ConfigFile::parse_ini_content("threads = many").is_err());
        assert!(ConfigFile::parse_ini_content("just words").is_err());
        assert!(ConfigFile::parse_ini_content("[aliases]\nx = y").is_err());
    }

    #[test]
    fn test_merge_and_apply() {
        let user = ConfigFile {
            log_ext: Some(".txt".to_string()),
            threads: Some(2),
            ..Default::default()
        };
        let project = ConfigFile {
            threads: Some(8),
            ..Default::default()
        };

        let merged = ConfigFile::merge_configs(user, project);
        let mut config = AnalyzerConfig::default();
        merged.apply_to(&mut config);

        assert_eq!(config.log_ext, ".txt");
        assert_eq!(config.threads, 8);
        assert_eq!(config.dst_file, "_analyze.log");
    }
}
