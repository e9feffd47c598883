use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{get_config_path, Config};

const HEADER: &str = "\
# athlete-scores configuration
#
# events: points table. throw and jump marks are entered in centimeters,
#   race marks in seconds; `unit` is the unit the coefficients expect.
# metrics: recovery index inputs, each mapped through a logistic curve
#   centred between lower_midpoint and upper_midpoint.
#
# Remove a table to fall back to the built-in one.

";

/// Write the built-in tables to a config file.
///
/// If `path` is None, writes to the default config path. An existing file is
/// only replaced when `force` is set. Returns the path written.
pub fn write_default_config(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {}. Pass --force to overwrite it.",
            config_path.display()
        );
    }

    write_config(&config_path, &Config::with_defaults())?;
    Ok(config_path)
}

/// Serialize `config` to YAML and write it atomically.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    // Create parent directories
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(HEADER.as_bytes())
        .and_then(|_| file.write_all(yaml.as_bytes()))
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use tempfile::TempDir;

    #[test]
    fn test_written_config_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let written = write_default_config(Some(path.clone()), false).unwrap();
        assert_eq!(written, path);

        let loaded = load_config(Some(path)).unwrap();
        assert_eq!(loaded, Config::with_defaults());
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "{}").unwrap();

        let err = write_default_config(Some(path.clone()), false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");

        write_default_config(Some(path.clone()), true).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# athlete-scores configuration"));
        assert!(content.contains("Longueur"));
    }
}
