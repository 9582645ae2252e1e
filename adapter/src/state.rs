//! State definitions for the bridge vault adapter contract.
//!
//! Quota buckets live in `rate_limiter`, issued balances in `ledger` and the
//! role table in `roles`. This module holds the remaining configuration and
//! counters.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::Item;

use crate::vault::{Underlying, VaultMode};

// ============================================================================
// Core Configuration
// ============================================================================

/// Contract configuration
#[cw_serde]
pub struct Config {
    /// Underlying CW20 this adapter custodies or mints
    pub underlying: Addr,
    /// Current custody mode
    pub mode: VaultMode,
    /// Name of the issued representation
    pub name: String,
    /// Symbol of the issued representation
    pub symbol: String,
    /// Decimals, mirrored from the underlying at instantiation
    pub decimals: u8,
}

impl Config {
    pub fn underlying(&self) -> Underlying {
        Underlying(self.underlying.clone())
    }
}

/// Adapter statistics
#[cw_serde]
#[derive(Default)]
pub struct Stats {
    /// Number of vault deposits
    pub deposit_count: u64,
    /// Number of vault withdrawals that released a non-zero amount
    pub withdraw_count: u64,
    /// Total underlying pulled into custody by deposits
    pub underlying_bridge_out: Uint128,
    /// Total underlying paid out of custody
    pub total_paid_out: Uint128,
    /// Total underlying minted by MintBurn withdrawals
    pub total_minted_underlying: Uint128,
    /// Total issued balance credited back for illiquid Lock withdrawals
    pub total_recredited: Uint128,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:bridge-vault-adapter";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default page size for enumeration queries
pub const DEFAULT_LIMIT: u32 = 10;

/// Maximum page size for enumeration queries
pub const MAX_LIMIT: u32 = 50;

// ============================================================================
// Storage
// ============================================================================

/// Primary config storage
pub const CONFIG: Item<Config> = Item::new("config");

/// Adapter statistics
pub const STATS: Item<Stats> = Item::new("stats");
