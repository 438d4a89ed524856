use std::{fs, io, path::Path};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const DEFAULT_API_BASE: &str = "http://localhost:5000";
pub const SETTINGS_FILE: &str = "bullpen.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base: Option<String>,
}

/// Defaults, then `bullpen.toml` in the working directory, then
/// `BULLPEN_API_BASE` / `APP__API_BASE` from the environment.
pub fn load_settings() -> anyhow::Result<Settings> {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Some(file_cfg) = read_file_settings(path)? {
        if let Some(v) = file_cfg.api_base {
            apply_api_base(&mut settings, &v, "settings file");
        }
    }

    if let Some(v) = env("BULLPEN_API_BASE") {
        apply_api_base(&mut settings, &v, "BULLPEN_API_BASE");
    }
    if let Some(v) = env("APP__API_BASE") {
        apply_api_base(&mut settings, &v, "APP__API_BASE");
    }

    Ok(settings)
}

fn read_file_settings(path: &Path) -> anyhow::Result<Option<FileSettings>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    };
    let parsed = toml::from_str::<FileSettings>(&raw)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
    Ok(Some(parsed))
}

fn apply_api_base(settings: &mut Settings, raw: &str, source: &str) {
    match normalize_api_base(raw) {
        Some(api_base) => settings.api_base = api_base,
        None => warn!(
            source,
            value = raw,
            kept = %settings.api_base,
            "config: ignoring invalid api base address"
        ),
    }
}

/// Trims whitespace and trailing slashes; rejects anything that is not an
/// absolute http(s) URL.
pub fn normalize_api_base(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    let parsed = Url::parse(trimmed).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return None;
    }
    Some(trimmed.to_string())
}
