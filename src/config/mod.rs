//! Configuration management.
//!
//! Settings come from (lowest to highest precedence) built-in defaults, a TOML
//! file, and `PUBMED_AFFILIATIONS__*` environment variables.
//!
//! ```toml
//! [pubmed]
//! esearch_url = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi"
//! esummary_url = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esummary.fcgi"
//! api_key = "your-ncbi-key"
//! tool = "pubmed-affiliations"
//! email = "you@example.com"
//!
//! [search]
//! max_results = 10
//!
//! [filter]
//! academic_keywords = ["university", "college", "institute", "lab", "hospital"]
//!
//! [http]
//! timeout_seconds = 30
//! connect_timeout_seconds = 10
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for overrides (`PUBMED_AFFILIATIONS__SEARCH__MAX_RESULTS=25`)
pub const ENV_PREFIX: &str = "PUBMED_AFFILIATIONS";

/// Config file name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "pubmed-affiliations.toml";

/// NCBI E-utilities search endpoint
pub const DEFAULT_ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";

/// NCBI E-utilities summary endpoint
pub const DEFAULT_ESUMMARY_URL: &str =
    "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esummary.fcgi";

/// Affiliation substrings that mark an author as academic
pub const DEFAULT_ACADEMIC_KEYWORDS: [&str; 5] =
    ["university", "college", "institute", "lab", "hospital"];

/// Placeholder printed instead of secrets
const MASKED_SECRET: &str = "********";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// E-utilities endpoints and credentials
    #[serde(default)]
    pub pubmed: PubMedConfig,

    /// Search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Affiliation filter settings
    #[serde(default)]
    pub filter: FilterConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,
}

/// PubMed E-utilities settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PubMedConfig {
    #[serde(default = "default_esearch_url")]
    pub esearch_url: String,

    #[serde(default = "default_esummary_url")]
    pub esummary_url: String,

    /// NCBI API key (raises the rate limit from 3 to 10 requests/second)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Tool name reported to NCBI
    #[serde(default)]
    pub tool: Option<String>,

    /// Contact email reported to NCBI
    #[serde(default)]
    pub email: Option<String>,
}

impl Default for PubMedConfig {
    fn default() -> Self {
        Self {
            esearch_url: default_esearch_url(),
            esummary_url: default_esummary_url(),
            api_key: None,
            tool: None,
            email: None,
        }
    }
}

fn default_esearch_url() -> String {
    DEFAULT_ESEARCH_URL.to_string()
}

fn default_esummary_url() -> String {
    DEFAULT_ESUMMARY_URL.to_string()
}

/// Search settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Result cap passed as `retmax`
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
        }
    }
}

fn default_max_results() -> usize {
    10
}

/// Affiliation filter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_academic_keywords")]
    pub academic_keywords: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            academic_keywords: default_academic_keywords(),
        }
    }
}

fn default_academic_keywords() -> Vec<String> {
    DEFAULT_ACADEMIC_KEYWORDS
        .iter()
        .map(|k| k.to_string())
        .collect()
}

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Config {
    /// Fill unset credentials from the conventional NCBI environment variable
    pub fn with_env_api_key(mut self) -> Self {
        if self.pubmed.api_key.is_none() {
            self.pubmed.api_key = std::env::var("NCBI_API_KEY").ok().filter(|k| !k.is_empty());
        }
        self
    }

    /// Render the effective configuration as TOML, with the API key masked
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        let mut shown = self.clone();
        if shown.pubmed.api_key.is_some() {
            shown.pubmed.api_key = Some(MASKED_SECRET.to_string());
        }
        toml::to_string_pretty(&shown)
    }
}

/// Load configuration from a file, with environment overrides
pub fn load_config(path: &Path) -> Result<Config, config::ConfigError> {
    build_config(Some(path))
}

/// Get the configuration from defaults and environment overrides only
pub fn get_config() -> Result<Config, config::ConfigError> {
    build_config(None)
}

fn build_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("filter.academic_keywords"),
        )
        .build()?;

    Ok(settings.try_deserialize::<Config>()?.with_env_api_key())
}

/// Find a config file in the working directory or the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(env!("CARGO_PKG_NAME")).join("config.toml"))
        .filter(|path| path.is_file())
}
