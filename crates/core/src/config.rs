//! Configuration management.
//!
//! Configuration is merged from, in increasing precedence:
//! - Built-in defaults (the fixed `data/...` paths, top-3 retrieval)
//! - A YAML settings file (`<workspace>/tutor.yaml` or `--config`)
//! - A `.env` file in the workspace and the process environment
//! - Command-line flags
//!
//! Only absence checks are performed; nothing here contacts the completion API.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Default settings file name, looked up in the workspace.
pub const CONFIG_FILE_NAME: &str = "tutor.yaml";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Workspace root; relative data paths resolve against it
    pub workspace: PathBuf,

    /// Optional settings file path
    pub config_file: Option<PathBuf>,

    /// Completion provider settings
    pub llm: LlmSettings,

    /// Merger inputs and the merged corpus file
    pub data: DataPaths,

    /// HTTP server settings
    pub server: ServerSettings,

    /// Retrieval settings
    pub retrieval: RetrievalSettings,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Completion provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Provider identifier ("openai", "aipipe")
    pub provider: String,

    /// API key; never written back out
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    pub base_url: Option<String>,

    /// Model identifier sent with every request
    pub model: Option<String>,

    /// Request timeout in seconds; the HTTP client default applies when unset
    pub timeout_secs: Option<u64>,

    /// Prompt definition used for answers
    pub prompt_id: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_key: None,
            base_url: None,
            model: None,
            timeout_secs: None,
            prompt_id: "answer.default".to_string(),
        }
    }
}

/// Paths used by the content merger and the answer service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Course markdown tree
    pub course_dir: PathBuf,

    /// Discourse JSON export tree
    pub discourse_dir: PathBuf,

    /// Merged corpus file (merger output, service input)
    pub output_file: PathBuf,

    /// Forum base URL used to build post links
    pub discourse_base_url: String,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            course_dir: PathBuf::from("data/course_content"),
            discourse_dir: PathBuf::from("data/discourse"),
            output_file: PathBuf::from("data/scraped_content.json"),
            discourse_base_url: "https://discourse.onlinedegree.iitm.ac.in".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Socket address to bind
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Retrieval settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetrievalSettings {
    /// Number of documents used as context
    pub top_k: usize,

    /// Characters of document text shown in each link preview
    pub preview_chars: usize,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            top_k: 3,
            preview_chars: 100,
        }
    }
}

/// Settings file structure. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ConfigFile {
    llm: Option<LlmSection>,
    data: Option<DataSection>,
    server: Option<ServerSection>,
    retrieval: Option<RetrievalSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LlmSection {
    provider: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
    prompt_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DataSection {
    course_dir: Option<PathBuf>,
    discourse_dir: Option<PathBuf>,
    output_file: Option<PathBuf>,
    discourse_base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ServerSection {
    bind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RetrievalSection {
    top_k: Option<usize>,
    preview_chars: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: PathBuf::from("."),
            config_file: None,
            llm: LlmSettings::default(),
            data: DataPaths::default(),
            server: ServerSettings::default(),
            retrieval: RetrievalSettings::default(),
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment, `.env` and the settings file.
    ///
    /// Environment variables:
    /// - `TUTOR_WORKSPACE`: Override workspace path
    /// - `TUTOR_CONFIG`: Path to settings file
    /// - `TUTOR_PROVIDER`: Completion provider
    /// - `TUTOR_BIND`: Server bind address
    /// - `OPENAI_API_KEY` (or `AIPIPE_TOKEN`): API key
    /// - `OPENAI_BASE_URL`: API base URL
    /// - `OPENAI_MODEL`: Model identifier
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use tutor_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Corpus: {:?}", config.output_file());
    /// ```
    pub fn load() -> AppResult<Self> {
        let workspace = std::env::var("TUTOR_WORKSPACE").ok().map(PathBuf::from);
        let config_file = std::env::var("TUTOR_CONFIG").ok().map(PathBuf::from);
        Self::load_with(workspace, config_file)
    }

    /// Load configuration for an explicit workspace and settings file.
    pub fn load_with(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) = workspace {
            config.workspace = workspace;
        }
        config.config_file = config_file;

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        // Existing process variables win over .env entries
        let dotenv_path = config.workspace.join(".env");
        if dotenv_path.exists() {
            dotenvy::from_path(&dotenv_path).map_err(|e| {
                AppError::Config(format!("Failed to read {:?}: {}", dotenv_path, e))
            })?;
        }

        let config_path = match config.config_file {
            Some(ref cf) => cf.clone(),
            None => config.workspace.join(CONFIG_FILE_NAME),
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        } else if config.config_file.is_some() {
            return Err(AppError::Config(format!(
                "Config file not found: {:?}",
                config_path
            )));
        }

        config.apply_env();

        Ok(config)
    }

    /// Apply process environment overrides.
    fn apply_env(&mut self) {
        if let Ok(provider) = std::env::var("TUTOR_PROVIDER") {
            self.llm.provider = provider;
        }

        if let Ok(bind) = std::env::var("TUTOR_BIND") {
            self.server.bind = bind;
        }

        self.llm.api_key = std::env::var("OPENAI_API_KEY")
            .or_else(|_| std::env::var("AIPIPE_TOKEN"))
            .ok()
            .filter(|key| !key.is_empty());

        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            if !base_url.is_empty() {
                self.llm.base_url = Some(base_url);
            }
        }

        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            if !model.is_empty() {
                self.llm.model = Some(model);
            }
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            self.log_level = Some(level);
        }

        if std::env::var_os("NO_COLOR").is_some() {
            self.no_color = true;
        }
    }

    /// Merge a YAML settings file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(llm) = file.llm {
            if let Some(provider) = llm.provider {
                result.llm.provider = provider;
            }
            result.llm.base_url = llm.base_url.or(result.llm.base_url);
            result.llm.model = llm.model.or(result.llm.model);
            result.llm.timeout_secs = llm.timeout_secs.or(result.llm.timeout_secs);
            if let Some(prompt_id) = llm.prompt_id {
                result.llm.prompt_id = prompt_id;
            }
        }

        if let Some(data) = file.data {
            if let Some(dir) = data.course_dir {
                result.data.course_dir = dir;
            }
            if let Some(dir) = data.discourse_dir {
                result.data.discourse_dir = dir;
            }
            if let Some(output_file) = data.output_file {
                result.data.output_file = output_file;
            }
            if let Some(url) = data.discourse_base_url {
                result.data.discourse_base_url = url;
            }
        }

        if let Some(bind) = file.server.and_then(|s| s.bind) {
            result.server.bind = bind;
        }

        if let Some(retrieval) = file.retrieval {
            if let Some(top_k) = retrieval.top_k {
                result.retrieval.top_k = top_k;
            }
            if let Some(preview_chars) = retrieval.preview_chars {
                result.retrieval.preview_chars = preview_chars;
            }
        }

        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over the environment and settings file.
    pub fn with_overrides(
        mut self,
        model: Option<String>,
        base_url: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(model) = model {
            self.llm.model = Some(model);
        }

        if let Some(base_url) = base_url {
            self.llm.base_url = Some(base_url);
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Resolve a configured path against the workspace.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() || self.workspace == Path::new(".") {
            path.to_path_buf()
        } else {
            self.workspace.join(path)
        }
    }

    /// Course markdown tree.
    pub fn course_dir(&self) -> PathBuf {
        self.resolve(&self.data.course_dir)
    }

    /// Discourse export tree.
    pub fn discourse_dir(&self) -> PathBuf {
        self.resolve(&self.data.discourse_dir)
    }

    /// Merged corpus file.
    pub fn output_file(&self) -> PathBuf {
        self.resolve(&self.data.output_file)
    }

    /// Check that the completion provider can be called.
    pub fn validate_llm(&self) -> AppResult<()> {
        if self.llm.api_key.is_none() {
            return Err(AppError::Config(
                "API key not found: set OPENAI_API_KEY in the environment or .env".to_string(),
            ));
        }

        if self.llm.model.is_none() {
            return Err(AppError::Config(
                "Model not configured: set OPENAI_MODEL or pass --model".to_string(),
            ));
        }

        if self.retrieval.top_k == 0 {
            return Err(AppError::Config("retrieval.topK must be at least 1".to_string()));
        }

        Ok(())
    }
}
