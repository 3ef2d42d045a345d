use std::path::{Path, PathBuf};

use clap::ValueEnum;
use haven_assessment::scoring::DEFAULT_TOP_N;
use serde::{Deserialize, Serialize};

/// Version written by [`save_config`]; [`migrate`] upgrades anything older.
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HavenConfig {
    /// Absent in files written before versioning, which read as 0.
    #[serde(default)]
    pub config_version: u32,
    /// How many recommendations to show.
    pub top_n: usize,
    /// Default output for `score` and `take`. Added in v1.
    #[serde(default)]
    pub output: OutputFormat,
    #[serde(default)]
    pub log_format: LogFormat,
    pub created_at: jiff::Timestamp,
}

impl Default for HavenConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            top_n: DEFAULT_TOP_N,
            output: OutputFormat::default(),
            log_format: LogFormat::default(),
            created_at: jiff::Timestamp::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Markdown-style text for people.
    #[default]
    Text,
    /// JSON for other programs.
    Json,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("haven").join("config.json"))
}

/// Where the startup config came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// No file on disk; built-in defaults.
    Defaults,
    /// Read as-is.
    File,
    /// Read and upgraded from an older `config_version`.
    Migrated { from: u32 },
}

pub fn load_config(path: &Path) -> eyre::Result<HavenConfig> {
    Ok(read_config(path)?.0)
}

/// Read the config at `path`, reporting whether it needed migrating.
///
/// Nothing is logged here: the CLI reads its config before the log
/// subscriber exists, so the caller reports the [`ConfigSource`].
pub fn read_config(path: &Path) -> eyre::Result<(HavenConfig, ConfigSource)> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Migrations work on the raw value; older files may lack required fields.
    let json: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| eyre::eyre!("config at {} is not valid JSON: {e}", path.display()))?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: HavenConfig = serde_json::from_value(migrated)?;
    let source = if on_disk_version < CURRENT_VERSION {
        ConfigSource::Migrated {
            from: on_disk_version,
        }
    } else {
        ConfigSource::File
    };
    Ok((config, source))
}

/// Load the config at `path`, falling back to defaults when no file exists.
pub fn load_or_default(path: &Path) -> eyre::Result<(HavenConfig, ConfigSource)> {
    if path.exists() {
        read_config(path)
    } else {
        Ok((HavenConfig::default(), ConfigSource::Defaults))
    }
}

/// Upgrade a raw config from `from_version` to [`CURRENT_VERSION`], one
/// version step at a time.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update haven."
        ));
    }

    // v1 introduced `output`; older files printed text.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("output")
            .or_insert(serde_json::Value::String("text".to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &HavenConfig) -> eyre::Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| eyre::eyre!("config path {} has no parent", path.display()))?;
    std::fs::create_dir_all(dir)?;

    // A migrated config is saved under the version it now has.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Readers never see a half-written config: write beside it, then rename.
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
