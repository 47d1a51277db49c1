use std::fs;

use anyhow::Context;
use engine::EngineOptions;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    pub max_input_bytes: usize,
    pub max_body_bytes: usize,
    pub stop_at: u64,
    pub max_terms: usize,
    pub max_output_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        let engine = EngineOptions::default();
        Self {
            server_bind: "127.0.0.1:8080".into(),
            max_input_bytes: 4096,
            max_body_bytes: 16 * 1024,
            stop_at: engine.stop_at,
            max_terms: engine.max_terms,
            max_output_bytes: engine.max_output_bytes,
        }
    }
}

impl Settings {
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            stop_at: self.stop_at,
            max_terms: self.max_terms,
            max_output_bytes: self.max_output_bytes,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    bind_addr: Option<String>,
    max_input_bytes: Option<usize>,
    max_body_bytes: Option<usize>,
    stop_at: Option<u64>,
    max_terms: Option<usize>,
    max_output_bytes: Option<usize>,
}

/// Defaults, then `server.toml` in the working directory, then environment.
pub fn load_settings() -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("server.toml") {
        apply_file(&mut settings, &raw).context("failed to parse server.toml")?;
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    Ok(settings)
}

fn apply_file(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;

    if let Some(v) = file_cfg.bind_addr {
        settings.server_bind = v;
    }
    if let Some(v) = file_cfg.max_input_bytes {
        settings.max_input_bytes = v;
    }
    if let Some(v) = file_cfg.max_body_bytes {
        settings.max_body_bytes = v;
    }
    if let Some(v) = file_cfg.stop_at {
        settings.stop_at = v;
    }
    if let Some(v) = file_cfg.max_terms {
        settings.max_terms = v;
    }
    if let Some(v) = file_cfg.max_output_bytes {
        settings.max_output_bytes = v;
    }
    Ok(())
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = lookup("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(parsed) = lookup("APP__MAX_INPUT_BYTES").and_then(|v| v.parse().ok()) {
        settings.max_input_bytes = parsed;
    }
    if let Some(parsed) = lookup("APP__MAX_BODY_BYTES").and_then(|v| v.parse().ok()) {
        settings.max_body_bytes = parsed;
    }
    if let Some(parsed) = lookup("APP__STOP_AT").and_then(|v| v.parse().ok()) {
        settings.stop_at = parsed;
    }
    if let Some(parsed) = lookup("APP__MAX_TERMS").and_then(|v| v.parse().ok()) {
        settings.max_terms = parsed;
    }
    if let Some(parsed) = lookup("APP__MAX_OUTPUT_BYTES").and_then(|v| v.parse().ok()) {
        settings.max_output_bytes = parsed;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
