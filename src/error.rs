use thiserror::Error;

/// A line that carries no recognizable holder address.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no address found")]
    NoAddressFound,
}

/// Resolving the token contract failed. Always fatal for a run.
#[derive(Debug, Error)]
pub enum TokenResolutionError {
    #[error("invalid contract address [{address}]: {reason}")]
    InvalidContractAddress { address: String, reason: String },

    #[error("unable to determine symbol for contract [{contract}]. It may not be a valid ERC-20 token: {reason}")]
    NotErc20 { contract: String, reason: String },

    #[error("could not resolve token address [{contract}] for chain [{chain_id}]: {reason}")]
    MetadataUnavailable {
        contract: String,
        chain_id: u64,
        reason: String,
    },

    #[error("endpoint serves chain {actual}, expected chain {expected}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// A single `balanceOf` query failed. Only the offending line is skipped.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid holder address [{0}]")]
    InvalidHolderAddress(String),

    #[error("rpc call failed: {0}")]
    Rpc(String),

    #[error("balance query timed out after {0}s")]
    Timeout(u64),

    #[error("balance {raw} with {decimals} decimals is not representable")]
    Unrepresentable { raw: String, decimals: u8 },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("network [{0}] is not supported")]
pub struct UnsupportedNetwork(pub String);

/// Why a single balance sheet line produced no record.
#[derive(Debug, Error)]
pub enum LineError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Query(#[from] QueryError),
}
