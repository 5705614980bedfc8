use alloy::primitives::Address;
use eyre::WrapErr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::config::{Config, FixerConfig};
use crate::error::{LineError, QueryError};
use crate::extract::{extract_address, AddressMatcher, HexAddressMatcher};
use crate::token::{normalize, BalanceRecord, TokenBalanceService, TokenMetadata};

/// What to fix: the balance sheet and the token contract it refers to.
#[derive(Debug, Clone)]
pub struct FixerArgs {
    pub balance_sheet: PathBuf,
    pub contract_address: String,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total_lines: usize,
    pub written: usize,
    pub skipped: usize,
    pub output: PathBuf,
}

/// Rewrites a balance sheet with balances read from the token contract.
///
/// Lines are handled strictly one after another. A line that fails is
/// reported and skipped; only token resolution aborts the run. The output
/// file is written once, after the last line.
pub struct BalanceFixer<S, M = HexAddressMatcher> {
    args: FixerArgs,
    config: FixerConfig,
    chain_id: u64,
    service: S,
    matcher: M,
}

impl<S: TokenBalanceService> BalanceFixer<S> {
    pub fn new(args: FixerArgs, config: &Config, service: S) -> eyre::Result<Self> {
        let chain_id = config.network()?.chain_id();

        Ok(Self {
            args,
            config: config.fixer.clone(),
            chain_id,
            service,
            matcher: HexAddressMatcher,
        })
    }
}

impl<S: TokenBalanceService, M: AddressMatcher> BalanceFixer<S, M> {
    /// Replace the address matcher.
    pub fn with_matcher<N: AddressMatcher>(self, matcher: N) -> BalanceFixer<S, N> {
        BalanceFixer {
            args: self.args,
            config: self.config,
            chain_id: self.chain_id,
            service: self.service,
            matcher,
        }
    }

    pub async fn run(&self) -> eyre::Result<RunSummary> {
        let token = self
            .service
            .resolve_token(self.chain_id, &self.args.contract_address)
            .await
            .wrap_err_with(|| {
                format!(
                    "Could not resolve token [{}] on chain {}",
                    self.args.contract_address, self.chain_id
                )
            })?;

        tracing::info!(
            symbol = %token.symbol,
            decimals = token.decimals,
            contract = %token.contract_address,
            "Token resolved"
        );

        let path = &self.args.balance_sheet;
        let content = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("Failed to read balance sheet '{}': {}", path.display(), e))?;
        let lines: Vec<&str> = content.lines().collect();

        let records = self.process_lines(&token, &lines).await;

        let output = output_path(path, &self.config.output_suffix);
        std::fs::write(&output, render_records(&records))
            .map_err(|e| eyre::eyre!("Failed to write '{}': {}", output.display(), e))?;

        let summary = RunSummary {
            total_lines: lines.len(),
            written: records.len(),
            skipped: lines.len() - records.len(),
            output,
        };

        tracing::info!(
            total = summary.total_lines,
            written = summary.written,
            skipped = summary.skipped,
            output = %summary.output.display(),
            "Balance sheet fixed"
        );

        Ok(summary)
    }

    /// Process every line in order, keeping the records of the lines that
    /// succeeded.
    pub async fn process_lines(&self, token: &TokenMetadata, lines: &[&str]) -> Vec<BalanceRecord> {
        let mut records = Vec::with_capacity(lines.len());

        for (index, line) in lines.iter().enumerate() {
            let progress = progress_percent(index, lines.len());

            match self.process_line(token, line).await {
                Ok(record) => {
                    tracing::info!(
                        progress = %format!("{}%", progress),
                        address = %record.holder_address,
                        balance = record.scaled_balance,
                        symbol = %token.symbol,
                        "Balance retrieved"
                    );
                    records.push(record);
                }
                Err(e) => {
                    tracing::error!(
                        progress = %format!("{}%", progress),
                        line = %line,
                        error = %e,
                        "Could not retrieve balance for line"
                    );
                }
            }
        }

        records
    }

    async fn process_line(&self, token: &TokenMetadata, line: &str) -> Result<BalanceRecord, LineError> {
        let holder_text = extract_address(&self.matcher, line)?;
        let hex = holder_text
            .strip_prefix("0x")
            .or_else(|| holder_text.strip_prefix("0X"))
            .unwrap_or(holder_text);
        let holder = Address::from_str(hex)
            .map_err(|_| QueryError::InvalidHolderAddress(holder_text.to_string()))?;

        let secs = self.config.query_timeout_secs;
        let raw = tokio::time::timeout(
            Duration::from_secs(secs),
            self.service.balance_of(token, holder),
        )
        .await
        .map_err(|_| QueryError::Timeout(secs))??;

        let scaled_balance =
            normalize(raw, token.decimals).ok_or_else(|| QueryError::Unrepresentable {
                raw: raw.to_string(),
                decimals: token.decimals,
            })?;

        Ok(BalanceRecord {
            holder_address: holder_text.to_string(),
            scaled_balance,
        })
    }
}

/// `floor(100 * index / total)`.
pub fn progress_percent(index: usize, total: usize) -> usize {
    index * 100 / total.max(1)
}

/// The fixed sheet lives next to the input, with `suffix` appended.
pub fn output_path(input: &Path, suffix: &str) -> PathBuf {
    let mut path = input.as_os_str().to_os_string();
    path.push(suffix);
    PathBuf::from(path)
}

/// Newline-joined `<address>, <balance>` lines, without a trailing newline.
pub fn render_records(records: &[BalanceRecord]) -> String {
    records
        .iter()
        .map(BalanceRecord::to_line)
        .collect::<Vec<_>>()
        .join("\n")
}
