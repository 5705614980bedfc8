use serde::Deserialize;

use crate::network::Network;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub fixer: FixerConfig,
}

// ============================================================
// Network Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct NetworkConfig {
    #[serde(default = "default_network_name")]
    pub name: String,
    /// Explicit JSON-RPC endpoint. When unset, the Infura endpoint for
    /// `name` is derived from the access credential.
    pub rpc_url: Option<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: default_network_name(),
            rpc_url: None,
        }
    }
}

fn default_network_name() -> String {
    "mainnet".to_string()
}

// ============================================================
// Fixer Config
// ============================================================

#[derive(Debug, Deserialize, Clone)]
pub struct FixerConfig {
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
}

impl Default for FixerConfig {
    fn default() -> Self {
        Self {
            output_suffix: default_output_suffix(),
            query_timeout_secs: default_query_timeout_secs(),
        }
    }
}

fn default_output_suffix() -> String {
    ".fixed.csv".to_string()
}

fn default_query_timeout_secs() -> u64 {
    30
}

impl Config {
    pub fn load(path: &str) -> eyre::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("Failed to read config file '{}': {}", path, e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| eyre::eyre!("Failed to parse config file '{}': {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise fall back to the defaults.
    pub fn load_or_default(path: Option<&str>) -> eyre::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn network(&self) -> eyre::Result<Network> {
        self.network
            .name
            .parse::<Network>()
            .map_err(|e| eyre::eyre!("{}", e))
    }

    pub fn validate(&self) -> eyre::Result<()> {
        self.network()?;

        if let Some(url) = &self.network.rpc_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(eyre::eyre!(
                    "Invalid rpc_url '{}': only http(s) endpoints are supported",
                    url
                ));
            }
        }
        if self.fixer.output_suffix.is_empty() {
            return Err(eyre::eyre!("output_suffix must not be empty"));
        }
        if self.fixer.query_timeout_secs == 0 {
            return Err(eyre::eyre!("query_timeout_secs must be greater than zero"));
        }
        Ok(())
    }
}
