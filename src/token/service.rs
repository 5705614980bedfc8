use alloy::primitives::{Address, U256};
use std::future::Future;

use super::types::TokenMetadata;
use crate::error::{QueryError, TokenResolutionError};

/// Read-only access to an ERC-20 token on some chain.
///
/// The fixer only talks to the chain through this trait, so tests can swap
/// in an in-memory implementation.
pub trait TokenBalanceService: Send + Sync {
    /// Resolve `contract_address` on `chain_id` to its symbol and decimals.
    fn resolve_token(
        &self,
        chain_id: u64,
        contract_address: &str,
    ) -> impl Future<Output = Result<TokenMetadata, TokenResolutionError>> + Send;

    /// Raw `balanceOf(holder)` in the token's smallest unit.
    fn balance_of(
        &self,
        token: &TokenMetadata,
        holder: Address,
    ) -> impl Future<Output = Result<U256, QueryError>> + Send;
}
