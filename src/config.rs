use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::clips::ClipStore;
use crate::llm::report::{Sport, SportProfile};
use crate::llm::LLMConfig;

/// Configuration for TactiCore
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Event tables and clip storage
    pub data: DataConfig,

    /// LLM client settings for coaching reports
    pub llm: LLMConfig,

    /// Coaching report prompts
    pub reports: ReportConfig,

    /// JSON API settings
    pub api: ApiConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Event table (match_id, minute, second, team, player, type, x, y, phase, description)
    pub events_file: PathBuf,

    /// Match table (match_id, date, competition, home_team, away_team, home_score, away_score)
    pub matches_file: PathBuf,

    /// Directory where uploaded clips are stored
    pub clips_dir: PathBuf,

    /// Accepted clip extensions
    pub clip_extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory searched for `{sport}_context.txt` and `{sport}_prompt.txt`
    pub prompt_dir: PathBuf,

    /// Sport used when none is given on the command line
    pub default_sport: Sport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub bind_address: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    pub level: String,
}

impl ReportConfig {
    /// Built-in profile for `sport` with any prompt overrides applied
    pub async fn load_profile(&self, sport: Sport) -> Result<SportProfile> {
        SportProfile::for_sport(sport)
            .with_overrides_from(&self.prompt_dir)
            .await
    }
}

impl DataConfig {
    pub fn clip_store(&self) -> ClipStore {
        ClipStore::new(self.clips_dir.clone(), self.clip_extensions.clone())
    }
}

impl Config {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let config_paths = ["tacticore.toml", "config/tacticore.toml"];

        for path in &config_paths {
            if Path::new(path).exists() {
                return Self::from_file(path);
            }
        }

        tracing::debug!("No configuration file found, using environment");
        Ok(Self::from_env())
    }

    /// Load configuration from a specific TOML file, then apply environment overrides
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config {}: {}", path.display(), e))?;
        let config: Config = toml::from_str(&config_str)
            .map_err(|e| anyhow!("Failed to parse config {}: {}", path.display(), e))?;

        tracing::info!("📄 Loaded configuration from: {}", path.display());
        Ok(config.with_env_overrides())
    }

    /// Defaults with environment overrides
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var("TACTICORE_EVENTS_FILE") {
            self.data.events_file = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("TACTICORE_MATCHES_FILE") {
            self.data.matches_file = PathBuf::from(path);
        }

        if let Ok(dir) = std::env::var("TACTICORE_CLIPS_DIR") {
            self.data.clips_dir = PathBuf::from(dir);
        }

        if let Ok(level) = std::env::var("TACTICORE_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(port) = std::env::var("TACTICORE_API_PORT") {
            match port.parse() {
                Ok(port) => self.api.port = port,
                Err(_) => tracing::warn!("Ignoring invalid TACTICORE_API_PORT: {}", port),
            }
        }

        self.llm.apply_env();

        self
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path.as_ref().display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.data.clip_extensions.is_empty() {
            return Err(anyhow!("clip_extensions must list at least one extension"));
        }

        if self.llm.max_tokens == 0 {
            return Err(anyhow!("llm.max_tokens must be greater than 0"));
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(anyhow!("llm.temperature must be between 0.0 and 2.0"));
        }

        if self.api.port == 0 {
            return Err(anyhow!("api.port must be greater than 0"));
        }

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "TactiCore Configuration:\n\
            - Events file: {}\n\
            - Matches file: {}\n\
            - Clips directory: {}\n\
            - LLM provider: {:?} ({})\n\
            - LLM API key: {}\n\
            - Prompt directory: {}\n\
            - API: {}:{}",
            self.data.events_file.display(),
            self.data.matches_file.display(),
            self.data.clips_dir.display(),
            self.llm.provider,
            self.llm.model,
            if self.llm.api_key.is_some() { "set" } else { "not set" },
            self.reports.prompt_dir.display(),
            self.api.bind_address,
            self.api.port
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig {
                events_file: PathBuf::from("data/demo_events.csv"),
                matches_file: PathBuf::from("data/demo_matches.csv"),
                clips_dir: PathBuf::from("data/videos"),
                clip_extensions: vec!["mp4".to_string(), "mov".to_string(), "m4v".to_string()],
            },
            llm: LLMConfig::default(),
            reports: ReportConfig {
                prompt_dir: PathBuf::from("config/prompts"),
                default_sport: Sport::Football,
            },
            api: ApiConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 8080,
            },
            logging: LoggingConfig {
                level: "tacticore=info,warn".to_string(),
            },
        }
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_events_file(mut self, path: PathBuf) -> Self {
        self.config.data.events_file = path;
        self
    }

    pub fn with_matches_file(mut self, path: PathBuf) -> Self {
        self.config.data.matches_file = path;
        self
    }

    pub fn with_clips_dir(mut self, dir: PathBuf) -> Self {
        self.config.data.clips_dir = dir;
        self
    }

    pub fn with_llm(mut self, llm: LLMConfig) -> Self {
        self.config.llm = llm;
        self
    }

    pub fn with_prompt_dir(mut self, dir: PathBuf) -> Self {
        self.config.reports.prompt_dir = dir;
        self
    }

    pub fn with_api_port(mut self, port: u16) -> Self {
        self.config.api.port = port;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LLMProvider;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data.clip_extensions, vec!["mp4", "mov", "m4v"]);
        assert_eq!(config.llm.temperature, 0.0);
        assert_eq!(config.reports.default_sport, Sport::Football);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .with_events_file(PathBuf::from("events.csv"))
            .with_api_port(9000)
            .with_llm(LLMConfig {
                provider: LLMProvider::LMStudio,
                ..LLMConfig::default()
            })
            .build();

        assert_eq!(config.data.events_file, PathBuf::from("events.csv"));
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.llm.provider, LLMProvider::LMStudio);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.data.clip_extensions.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.llm.temperature = 3.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("tacticore.toml");

        let mut config = ConfigBuilder::new().with_api_port(9100).build();
        config.llm.api_key = Some("from-file".to_string());
        config.save(&path).unwrap();

        let reloaded = Config::from_file(&path).unwrap();
        assert_eq!(reloaded.api.port, 9100);
        assert_eq!(reloaded.llm.api_key.as_deref(), Some("from-file"));
        assert_eq!(reloaded.data.matches_file, config.data.matches_file);
    }

    #[test]
    fn test_llm_env_overrides_apply_to_config_files() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("tacticore.toml");

        let mut config = Config::default();
        config.llm.api_key = Some("from-file".to_string());
        config.save(&path).unwrap();

        std::env::set_var("TACTICORE_LLM_PROVIDER", "lmstudio");
        std::env::set_var("TACTICORE_LLM_MODEL", "qwen2.5-7b-instruct");
        let reloaded = Config::from_file(&path);
        std::env::remove_var("TACTICORE_LLM_PROVIDER");
        std::env::remove_var("TACTICORE_LLM_MODEL");

        let reloaded = reloaded.unwrap();
        assert_eq!(reloaded.llm.provider, LLMProvider::LMStudio);
        assert_eq!(reloaded.llm.model, "qwen2.5-7b-instruct");
        assert_eq!(reloaded.llm.api_key.as_deref(), Some("from-file"));
    }
}
