use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml, Yaml},
};
use std::path::Path;

use super::Settings;

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Layered configuration: embedded defaults, then user and repository
/// files, then `KATAS_` environment variables.
pub struct KatasConfig {
    figment: Figment,
}

impl KatasConfig {
    pub fn load() -> Result<Self> {
        Self::load_with_custom_config(None)
    }

    pub fn load_with_custom_config(custom_config: Option<&str>) -> Result<Self> {
        tracing::trace!("CONFIG LOAD: Starting");
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        // A custom config replaces the user and repository layers
        if let Some(custom_path) = custom_config {
            tracing::debug!("Using custom config file: {}", custom_path);
            figment = Self::merge_file(figment, custom_path)?;
        } else {
            let user_config = Self::user_config_path();
            figment = figment
                // User config - support multiple formats
                .merge(Toml::file(&user_config))
                .merge(Json::file(user_config.replace(".toml", ".json")))
                .merge(Yaml::file(user_config.replace(".toml", ".yaml")))
                .merge(Yaml::file(user_config.replace(".toml", ".yml")))
                // Repository config - support multiple formats
                .merge(Toml::file("katas.toml"))
                .merge(Json::file("katas.json"))
                .merge(Yaml::file("katas.yaml"))
                .merge(Yaml::file("katas.yml"));
        }

        // Environment variables always have highest priority
        figment = figment.merge(Env::prefixed("KATAS_").split("__"));

        Ok(KatasConfig { figment })
    }

    /// Typed view of the merged configuration, validated
    pub fn settings(&self) -> Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .context("Failed to read configuration")?;
        settings.validate()?;
        tracing::trace!("CONFIG LOAD: Final parallel.mode = {:?}", settings.parallel.mode);
        Ok(settings)
    }

    /// Get a nested object/section as JSON
    pub fn get_section(&self, path: &str) -> Result<serde_json::Value> {
        self.figment
            .extract_inner(path)
            .with_context(|| format!("Failed to read config section '{path}'"))
    }

    fn merge_file(figment: Figment, path: &str) -> Result<Figment> {
        if !Path::new(path).is_file() {
            anyhow::bail!("Config file not found: {}", path);
        }

        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        Ok(match extension.as_deref() {
            Some("json") => figment.merge(Json::file(path)),
            Some("yaml" | "yml") => figment.merge(Yaml::file(path)),
            _ => figment.merge(Toml::file(path)),
        })
    }

    fn user_config_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{home}/.config/katas/config.toml"),
            Err(_) => "~/.config/katas/config.toml".to_string(),
        }
    }
}
