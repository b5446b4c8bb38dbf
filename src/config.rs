//! Configuration: TOML file defaults + environment variable overrides.
//!
//! Service settings live in `config/default.toml`.
//! The wallet-connect project id and RPC override come from plain environment
//! variables so they never need to be committed.

use serde::Deserialize;
use std::env;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub chain: ChainConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub events: EventsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    3000
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json_output: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_output: false,
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

/// Which Somnia network the front-end wallet layer should target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChainConfig {
    #[serde(default = "default_network")]
    pub network: Network,
    #[serde(default = "default_mainnet_rpc")]
    pub mainnet_rpc_url: String,
    #[serde(default = "default_testnet_rpc")]
    pub testnet_rpc_url: String,
    #[serde(default)]
    pub walletconnect_project_id: Option<String>,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            network: default_network(),
            mainnet_rpc_url: default_mainnet_rpc(),
            testnet_rpc_url: default_testnet_rpc(),
            walletconnect_project_id: None,
        }
    }
}

fn default_network() -> Network {
    Network::Testnet
}
fn default_mainnet_rpc() -> String {
    "https://api.infra.mainnet.somnia.network/".into()
}
fn default_testnet_rpc() -> String {
    "https://dream-rpc.somnia.network/".into()
}

/// Chain metadata served to the front-end.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainInfo {
    pub chain_id: u64,
    pub name: &'static str,
    pub currency_symbol: &'static str,
    pub rpc_url: String,
    pub explorer_url: &'static str,
    pub testnet: bool,
    pub wallet_connect_configured: bool,
}

impl ChainConfig {
    pub fn info(&self) -> ChainInfo {
        let configured = self
            .walletconnect_project_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty());
        match self.network {
            Network::Mainnet => ChainInfo {
                chain_id: 5031,
                name: "Somnia Mainnet",
                currency_symbol: "SOMI",
                rpc_url: self.mainnet_rpc_url.clone(),
                explorer_url: "https://explorer.somnia.network",
                testnet: false,
                wallet_connect_configured: configured,
            },
            Network::Testnet => ChainInfo {
                chain_id: 50312,
                name: "Somnia Shannon Testnet",
                currency_symbol: "STT",
                rpc_url: self.testnet_rpc_url.clone(),
                explorer_url: "https://shannon-explorer.somnia.network",
                testnet: true,
                wallet_connect_configured: configured,
            },
        }
    }
}

/// Range and text of the placeholder argument score.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Inclusive lower bound.
    #[serde(default = "default_min_score")]
    pub min_score: u8,
    /// Exclusive upper bound.
    #[serde(default = "default_max_score")]
    pub max_score: u8,
    #[serde(default = "default_analysis")]
    pub analysis: String,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            max_score: default_max_score(),
            analysis: default_analysis(),
        }
    }
}

fn default_min_score() -> u8 {
    60
}
fn default_max_score() -> u8 {
    100
}
fn default_analysis() -> String {
    "This argument shows good reasoning and provides relevant evidence to support the position."
        .into()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventsConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

fn default_capacity() -> usize {
    1024
}

impl Config {
    /// Load configuration from `config/default.toml` merged with env vars
    /// prefixed with `DEBATE` (e.g. `DEBATE__WEB__PORT=8080`).
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::Environment::with_prefix("DEBATE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut cfg: Config = builder.try_deserialize()?;

        if let Ok(v) = env::var("WALLETCONNECT_PROJECT_ID") {
            cfg.chain.walletconnect_project_id = Some(v);
        }
        if let Ok(v) = env::var("SOMNIA_RPC_URL") {
            match cfg.chain.network {
                Network::Mainnet => cfg.chain.mainnet_rpc_url = v,
                Network::Testnet => cfg.chain.testnet_rpc_url = v,
            }
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = parse("");
        assert!(cfg.web.enabled);
        assert_eq!(cfg.web.port, 3000);
        assert_eq!(cfg.logging.log_level, "info");
        assert_eq!(cfg.scoring.min_score, 60);
        assert_eq!(cfg.scoring.max_score, 100);
        assert!(cfg.seed.enabled);
        assert_eq!(cfg.events.capacity, 1024);
        assert_eq!(cfg.chain.network, Network::Testnet);
    }

    #[test]
    fn sections_override_defaults() {
        let cfg = parse(
            r#"
[web]
port = 8080

[chain]
network = "mainnet"
walletconnect_project_id = "abc123"

[scoring]
min_score = 10
max_score = 20
"#,
        );
        assert_eq!(cfg.web.port, 8080);
        assert_eq!(cfg.scoring.min_score, 10);

        let info = cfg.chain.info();
        assert_eq!(info.chain_id, 5031);
        assert!(!info.testnet);
        assert!(info.wallet_connect_configured);
    }

    #[test]
    fn blank_project_id_is_not_configured() {
        let chain = ChainConfig {
            walletconnect_project_id: Some("  ".into()),
            ..ChainConfig::default()
        };
        let info = chain.info();
        assert_eq!(info.chain_id, 50312);
        assert!(!info.wallet_connect_configured);
    }
}
