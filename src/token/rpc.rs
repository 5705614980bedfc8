use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::sol;
use std::str::FromStr;

use super::service::TokenBalanceService;
use super::types::TokenMetadata;
use crate::config::Config;
use crate::error::{QueryError, TokenResolutionError};

// Only the read methods the fixer needs.
sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    interface IERC20 {
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function balanceOf(address owner) external view returns (uint256);
    }
}

/// Token Balance Service backed by a JSON-RPC endpoint.
pub struct RpcTokenService {
    provider: DynProvider,
}

impl RpcTokenService {
    pub fn new<P: Provider + 'static>(provider: P) -> Self {
        Self {
            provider: provider.erased(),
        }
    }

    pub fn connect(rpc_url: &str) -> eyre::Result<Self> {
        let provider = ProviderBuilder::new()
            .connect_http(rpc_url.parse().map_err(|e| eyre::eyre!("Invalid RPC URL: {}", e))?);

        Ok(Self::new(provider))
    }

    /// Connect to the configured `rpc_url`, or to the Infura endpoint of the
    /// configured network using `api_key`.
    pub fn from_config(config: &Config, api_key: &str) -> eyre::Result<Self> {
        let network = config.network()?;
        let url = match &config.network.rpc_url {
            Some(url) => {
                tracing::info!(network = %network, "Using configured RPC endpoint");
                url.clone()
            }
            None => {
                tracing::info!(network = %network, "Using Infura RPC endpoint");
                network.infura_url(api_key)
            }
        };

        Self::connect(&url)
    }
}

impl TokenBalanceService for RpcTokenService {
    async fn resolve_token(
        &self,
        chain_id: u64,
        contract_address: &str,
    ) -> Result<TokenMetadata, TokenResolutionError> {
        let address = Address::from_str(contract_address).map_err(|e| {
            TokenResolutionError::InvalidContractAddress {
                address: contract_address.to_string(),
                reason: e.to_string(),
            }
        })?;

        let unavailable = |reason: String| TokenResolutionError::MetadataUnavailable {
            contract: contract_address.to_string(),
            chain_id,
            reason,
        };

        let actual = self
            .provider
            .get_chain_id()
            .await
            .map_err(|e| unavailable(e.to_string()))?;
        if actual != chain_id {
            return Err(TokenResolutionError::ChainMismatch {
                expected: chain_id,
                actual,
            });
        }

        let erc20 = IERC20::new(address, &self.provider);

        let symbol = erc20
            .symbol()
            .call()
            .await
            .map_err(|e| TokenResolutionError::NotErc20 {
                contract: contract_address.to_string(),
                reason: e.to_string(),
            })?;

        let decimals = erc20
            .decimals()
            .call()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        tracing::debug!(%address, %symbol, decimals, chain_id, "Resolved token metadata");

        Ok(TokenMetadata {
            contract_address: address,
            symbol,
            decimals,
            chain_id,
        })
    }

    async fn balance_of(&self, token: &TokenMetadata, holder: Address) -> Result<U256, QueryError> {
        IERC20::new(token.contract_address, &self.provider)
            .balanceOf(holder)
            .call()
            .await
            .map_err(|e| QueryError::Rpc(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Bytes, U64};
    use alloy::sol_types::SolCall;
    use alloy::transports::mock::Asserter;

    const TOKEN: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";

    fn mocked() -> (RpcTokenService, Asserter) {
        let asserter = Asserter::new();
        let provider = ProviderBuilder::new().connect_mocked_client(asserter.clone());
        (RpcTokenService::new(provider), asserter)
    }

    fn push_symbol(asserter: &Asserter, symbol: &str) {
        let encoded = IERC20::symbolCall::abi_encode_returns(&symbol.to_string());
        asserter.push_success(&Bytes::from(encoded));
    }

    fn push_decimals(asserter: &Asserter, decimals: u8) {
        let encoded = IERC20::decimalsCall::abi_encode_returns(&decimals);
        asserter.push_success(&Bytes::from(encoded));
    }

    #[test]
    fn test_connect_rejects_bad_url() {
        assert!(RpcTokenService::connect("not a url").is_err());
    }

    #[test]
    fn test_from_config_with_override() {
        let mut config = Config::default();
        config.network.rpc_url = Some("http://localhost:8545".to_string());
        assert!(RpcTokenService::from_config(&config, "unused").is_ok());
    }

    #[tokio::test]
    async fn test_resolve_rejects_malformed_contract() {
        let (service, _asserter) = mocked();
        let err = service.resolve_token(1, "0x1234").await.unwrap_err();
        assert!(matches!(err, TokenResolutionError::InvalidContractAddress { .. }));
    }

    #[tokio::test]
    async fn test_resolve_token() {
        let (service, asserter) = mocked();
        asserter.push_success(&U64::from(1));
        push_symbol(&asserter, "DAI");
        push_decimals(&asserter, 18);

        let token = service.resolve_token(1, TOKEN).await.unwrap();

        assert_eq!(token.symbol, "DAI");
        assert_eq!(token.decimals, 18);
        assert_eq!(token.chain_id, 1);
        assert_eq!(token.contract_address, Address::from_str(TOKEN).unwrap());
    }

    #[tokio::test]
    async fn test_resolve_on_wrong_chain() {
        let (service, asserter) = mocked();
        asserter.push_success(&U64::from(11_155_111));

        let err = service.resolve_token(1, TOKEN).await.unwrap_err();

        assert!(matches!(
            err,
            TokenResolutionError::ChainMismatch { expected: 1, actual: 11_155_111 }
        ));
    }

    #[tokio::test]
    async fn test_resolve_chain_id_failure() {
        let (service, asserter) = mocked();
        asserter.push_failure_msg("connection refused");

        let err = service.resolve_token(1, TOKEN).await.unwrap_err();

        assert!(matches!(err, TokenResolutionError::MetadataUnavailable { chain_id: 1, .. }));
    }

    #[tokio::test]
    async fn test_resolve_without_symbol_is_not_erc20() {
        let (service, asserter) = mocked();
        asserter.push_success(&U64::from(1));
        asserter.push_failure_msg("execution reverted");

        let err = service.resolve_token(1, TOKEN).await.unwrap_err();

        assert!(matches!(err, TokenResolutionError::NotErc20 { .. }));
    }

    #[tokio::test]
    async fn test_resolve_without_decimals() {
        let (service, asserter) = mocked();
        asserter.push_success(&U64::from(1));
        push_symbol(&asserter, "DAI");
        asserter.push_failure_msg("execution reverted");

        let err = service.resolve_token(1, TOKEN).await.unwrap_err();

        assert!(matches!(err, TokenResolutionError::MetadataUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_balance_of() {
        let (service, asserter) = mocked();
        let token = TokenMetadata {
            contract_address: Address::from_str(TOKEN).unwrap(),
            symbol: "DAI".to_string(),
            decimals: 18,
            chain_id: 1,
        };
        let raw = U256::from(2_500_000_000_000_000_000u128);
        asserter.push_success(&Bytes::from(IERC20::balanceOfCall::abi_encode_returns(&raw)));
        asserter.push_failure_msg("rate limited");

        let holder = Address::repeat_byte(0xaa);
        assert_eq!(service.balance_of(&token, holder).await.unwrap(), raw);
        assert!(matches!(
            service.balance_of(&token, holder).await,
            Err(QueryError::Rpc(_))
        ));
    }
}
