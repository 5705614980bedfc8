use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::fixer::{BalanceFixer, FixerArgs};
use crate::token::RpcTokenService;

#[derive(Debug, Parser)]
#[command(version, about, rename_all = "kebab")]
pub struct Cli {
    #[command(subcommand)]
    pub subcmd: SubCmd,
}
impl Cli {
    pub async fn run(&self) -> eyre::Result<()> {
        match &self.subcmd {
            SubCmd::FixBalanceSheet {
                balance_sheet,
                contract_address,
                infura_api_key,
                config,
                network,
            } => {
                let mut cfg = Config::load_or_default(config.as_deref())?;

                if let Some(network) = network {
                    cfg.network.name = network.clone();
                    cfg.validate()?;
                }

                let service = RpcTokenService::from_config(&cfg, infura_api_key)?;
                let args = FixerArgs {
                    balance_sheet: balance_sheet.clone(),
                    contract_address: contract_address.clone(),
                };

                BalanceFixer::new(args, &cfg, service)?.run().await?;
            }
        }

        Ok(())
    }
}

#[derive(Debug, Subcommand)]
pub enum SubCmd {
    /// Fix the balance sheet emitted by Etherscan by querying ERC-20 `balanceOf` directly for
    /// each holder.
    FixBalanceSheet {
        /// The balance sheet that is to be fixed.
        #[arg(long = "balance-sheet", short = 'b', alias = "balanceSheet", value_name = "PATH")]
        balance_sheet: PathBuf,
        /// Which contract to query balances from (needs to be an ERC-20 contract).
        #[arg(long = "contract-address", short = 'c', alias = "contractAddress", value_name = "ADDRESS")]
        contract_address: String,
        /// The Infura API key.
        #[arg(long = "infura-api-key", short = 'k', alias = "infuraApiKey", value_name = "KEY")]
        infura_api_key: String,
        /// Optional TOML configuration file.
        #[arg(long, value_name = "PATH")]
        config: Option<String>,
        /// Network to query, overriding the configuration.
        #[arg(long, value_name = "NAME")]
        network: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";

    #[test]
    fn test_long_flags() {
        let cli = Cli::try_parse_from([
            "balance-sheet-fixer",
            "fix-balance-sheet",
            "--balance-sheet",
            "holders.csv",
            "--contract-address",
            TOKEN,
            "--infura-api-key",
            "key",
        ])
        .unwrap();

        let SubCmd::FixBalanceSheet {
            balance_sheet,
            contract_address,
            infura_api_key,
            config,
            network,
        } = cli.subcmd;
        assert_eq!(balance_sheet, PathBuf::from("holders.csv"));
        assert_eq!(contract_address, TOKEN);
        assert_eq!(infura_api_key, "key");
        assert!(config.is_none());
        assert!(network.is_none());
    }

    #[test]
    fn test_short_and_aliased_flags() {
        let cli = Cli::try_parse_from([
            "balance-sheet-fixer",
            "fix-balance-sheet",
            "-b",
            "holders.csv",
            "--contractAddress",
            TOKEN,
            "--infuraApiKey",
            "key",
            "--network",
            "sepolia",
        ])
        .unwrap();

        let SubCmd::FixBalanceSheet { contract_address, network, .. } = cli.subcmd;
        assert_eq!(contract_address, TOKEN);
        assert_eq!(network.as_deref(), Some("sepolia"));
    }

    #[test]
    fn test_missing_required_flag() {
        let err = Cli::try_parse_from([
            "balance-sheet-fixer",
            "fix-balance-sheet",
            "--balance-sheet",
            "holders.csv",
            "--contract-address",
            TOKEN,
        ])
        .unwrap_err();

        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
