pub mod normalize;
pub mod rpc;
pub mod service;
pub mod types;

pub use normalize::normalize;
pub use rpc::RpcTokenService;
pub use service::TokenBalanceService;
pub use types::{BalanceRecord, TokenMetadata};
