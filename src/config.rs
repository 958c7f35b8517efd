//! Game configuration, read from the environment (and `.env`).

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use ollama_rs::Ollama;

use crate::engine::{
    CombinationEngine, Generator, HttpGenerator, OllamaGenerator, DEFAULT_CONTEXT,
    DEFAULT_GENERATOR_TIMEOUT,
};
use crate::error::{CraftError, CraftResult};

pub const DEFAULT_DATA_DIR: &str = ".drug_craft";
pub const DEFAULT_GENERATOR_URL: &str = "http://localhost:3000/api/generate-combination";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2:3b";

/// Which generative backend, if any, supplies novel results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorBackend {
    None,
    Http { url: String },
    Ollama { model: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CraftConfig {
    /// Directory for the saved records
    pub data_dir: PathBuf,
    /// Keep state in memory only
    pub ephemeral: bool,
    pub generator: GeneratorBackend,
    pub generator_timeout: Duration,
    /// Context tag sent with every generation request
    pub context: String,
}

impl Default for CraftConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            ephemeral: false,
            generator: GeneratorBackend::None,
            generator_timeout: DEFAULT_GENERATOR_TIMEOUT,
            context: DEFAULT_CONTEXT.to_string(),
        }
    }
}

impl CraftConfig {
    /// Read `DRUG_CRAFT_*` variables from the process environment.
    pub fn from_env() -> CraftResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source; unset variables keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> CraftResult<Self> {
        let mut config = Self::default();

        if let Some(dir) = lookup("DRUG_CRAFT_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(flag) = lookup("DRUG_CRAFT_EPHEMERAL") {
            config.ephemeral = parse_bool("DRUG_CRAFT_EPHEMERAL", &flag)?;
        }
        if let Some(context) = lookup("DRUG_CRAFT_CONTEXT") {
            config.context = context;
        }
        if let Some(secs) = lookup("DRUG_CRAFT_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| CraftError::Config {
                key: "DRUG_CRAFT_TIMEOUT_SECS".into(),
                reason: format!("expected whole seconds, got '{secs}'"),
            })?;
            config.generator_timeout = Duration::from_secs(secs);
        }

        let backend = lookup("DRUG_CRAFT_GENERATOR").unwrap_or_else(|| "none".to_string());
        config.generator = match backend.trim().to_lowercase().as_str() {
            "" | "none" => GeneratorBackend::None,
            "http" => GeneratorBackend::Http {
                url: lookup("DRUG_CRAFT_GENERATOR_URL")
                    .unwrap_or_else(|| DEFAULT_GENERATOR_URL.to_string()),
            },
            "ollama" => GeneratorBackend::Ollama {
                model: lookup("DRUG_CRAFT_OLLAMA_MODEL")
                    .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string()),
            },
            other => {
                return Err(CraftError::Config {
                    key: "DRUG_CRAFT_GENERATOR".into(),
                    reason: format!("unknown backend '{other}' (expected none, http or ollama)"),
                })
            }
        };

        Ok(config)
    }

    pub fn build_generator(&self) -> Option<Arc<dyn Generator>> {
        match &self.generator {
            GeneratorBackend::None => None,
            GeneratorBackend::Http { url } => Some(Arc::new(HttpGenerator::new(url.clone()))),
            GeneratorBackend::Ollama { model } => {
                Some(Arc::new(OllamaGenerator::new(Ollama::default(), model.clone())))
            }
        }
    }

    pub fn build_engine(&self) -> CombinationEngine {
        let engine = CombinationEngine::new()
            .with_timeout(self.generator_timeout)
            .with_context(self.context.clone());
        match self.build_generator() {
            Some(generator) => engine.with_generator(generator),
            None => engine,
        }
    }
}

fn parse_bool(key: &str, value: &str) -> CraftResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(CraftError::Config {
            key: key.to_string(),
            reason: format!("expected a boolean, got '{value}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> CraftResult<CraftConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CraftConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, CraftConfig::default());
        assert_eq!(config.context, "drug_craft");
        assert!(config.build_generator().is_none());
    }

    #[test]
    fn test_http_backend() {
        let config = config_from(&[
            ("DRUG_CRAFT_GENERATOR", "HTTP"),
            ("DRUG_CRAFT_GENERATOR_URL", "http://example.test/api.js"),
            ("DRUG_CRAFT_TIMEOUT_SECS", "3"),
        ])
        .unwrap();
        assert_eq!(
            config.generator,
            GeneratorBackend::Http { url: "http://example.test/api.js".into() }
        );
        assert_eq!(config.generator_timeout, Duration::from_secs(3));
        assert!(config.build_engine().has_generator());
    }

    #[test]
    fn test_ollama_backend_default_model() {
        let config = config_from(&[("DRUG_CRAFT_GENERATOR", "ollama")]).unwrap();
        assert_eq!(config.generator, GeneratorBackend::Ollama { model: "llama3.2:3b".into() });
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            config_from(&[("DRUG_CRAFT_GENERATOR", "carrier-pigeon")]),
            Err(CraftError::Config { .. })
        ));
        assert!(config_from(&[("DRUG_CRAFT_TIMEOUT_SECS", "soon")]).is_err());
        assert!(config_from(&[("DRUG_CRAFT_EPHEMERAL", "maybe")]).is_err());
    }

    #[test]
    fn test_ephemeral_flag() {
        let config = config_from(&[("DRUG_CRAFT_EPHEMERAL", "yes")]).unwrap();
        assert!(config.ephemeral);
    }
}
