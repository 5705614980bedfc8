use alloy::primitives::Address;

/// Metadata of the ERC-20 token whose balances are being fixed.
/// Resolved once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenMetadata {
    pub contract_address: Address,
    pub symbol: String,
    pub decimals: u8,
    pub chain_id: u64,
}

/// One corrected row of the balance sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceRecord {
    /// Holder address exactly as it appeared in the input line.
    pub holder_address: String,
    pub scaled_balance: f64,
}

impl BalanceRecord {
    /// `<address>, <balance>` as written to the fixed sheet.
    pub fn to_line(&self) -> String {
        format!("{}, {}", self.holder_address, self.scaled_balance)
    }
}
