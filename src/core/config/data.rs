use crate::core::params::{GenerationParams, DEFAULT_SYSTEM_PROMPT};
use crate::utils::url::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    /// Model server address, e.g. "http://localhost:1234"
    pub base_url: Option<String>,
    /// Model to select before the model list arrives
    pub default_model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub system_prompt: Option<String>,
    /// Where conversations and preferences are stored
    pub data_dir: Option<PathBuf>,
}

/// Keys accepted by `codeface set` and `codeface unset`.
pub const CONFIG_KEYS: &[&str] = &[
    "base-url",
    "default-model",
    "temperature",
    "max-tokens",
    "system-prompt",
    "data-dir",
];

impl Config {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Generation parameters with config values layered over the defaults.
    pub fn generation_params(&self) -> GenerationParams {
        let defaults = GenerationParams::default();
        GenerationParams::new(
            self.temperature.unwrap_or(defaults.temperature()),
            self.max_tokens.unwrap_or(defaults.max_tokens()),
            self.system_prompt
                .clone()
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        )
    }

    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("A value is required for '{key}'"));
        }
        match key {
            "base-url" => self.base_url = Some(value.to_string()),
            "default-model" => self.default_model = Some(value.to_string()),
            "temperature" => {
                let parsed = value
                    .parse::<f32>()
                    .map_err(|_| format!("Invalid temperature: {value}"))?;
                self.temperature = Some(parsed);
            }
            "max-tokens" => {
                let parsed = value
                    .parse::<u32>()
                    .map_err(|_| format!("Invalid max-tokens: {value}"))?;
                self.max_tokens = Some(parsed);
            }
            "system-prompt" => self.system_prompt = Some(value.to_string()),
            "data-dir" => self.data_dir = Some(PathBuf::from(value)),
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    pub fn unset_value(&mut self, key: &str) -> Result<(), String> {
        match key {
            "base-url" => self.base_url = None,
            "default-model" => self.default_model = None,
            "temperature" => self.temperature = None,
            "max-tokens" => self.max_tokens = None,
            "system-prompt" => self.system_prompt = None,
            "data-dir" => self.data_dir = None,
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> String {
    format!(
        "Unknown config key '{key}'. Available keys: {}",
        CONFIG_KEYS.join(", ")
    )
}

pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
