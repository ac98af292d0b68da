use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub retrieval: RetrievalConfig,
    pub chat: ChatConfig,
    pub upload: UploadConfig,
    pub features: FeatureFlags,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrievalConfig {
    /// Words per chunk when a document is split.
    pub chunk_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    pub typing_delay_min_ms: u64,
    pub typing_delay_max_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    pub max_file_size_mb: usize,
    pub extraction_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeatureFlags {
    pub pdf_upload_enabled: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());
        Self::load_from(Some(&environment), app_environment())
    }

    /// Layer `config/default`, then `config/{run_env}` when given, then `env`.
    pub fn load_from(run_env: Option<&str>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(File::with_name("config/default"));
        if let Some(run_env) = run_env {
            builder = builder.add_source(File::with_name(&format!("config/{run_env}")).required(false));
        }

        let config: Self = builder.add_source(env).build()?.try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retrieval.chunk_size == 0 {
            return Err(ConfigError::Message(
                "retrieval.chunk_size must be greater than zero".into(),
            ));
        }
        if self.chat.typing_delay_min_ms > self.chat.typing_delay_max_ms {
            return Err(ConfigError::Message(format!(
                "chat.typing_delay_min_ms ({}) exceeds chat.typing_delay_max_ms ({})",
                self.chat.typing_delay_min_ms, self.chat.typing_delay_max_ms
            )));
        }
        if self.upload.max_file_size_mb == 0 {
            return Err(ConfigError::Message(
                "upload.max_file_size_mb must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.upload.max_file_size_mb * 1024 * 1024
    }
}

/// `APP__SECTION__KEY` overrides, e.g. `APP__SERVER__PORT=8080`.
pub fn app_environment() -> Environment {
    Environment::with_prefix("APP").separator("__")
}

#[cfg(test)]
pub(crate) fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        retrieval: RetrievalConfig { chunk_size: 180 },
        chat: ChatConfig {
            typing_delay_min_ms: 0,
            typing_delay_max_ms: 0,
        },
        upload: UploadConfig {
            max_file_size_mb: 5,
            extraction_timeout_secs: 5,
        },
        features: FeatureFlags {
            pdf_upload_enabled: true,
        },
    }
}
