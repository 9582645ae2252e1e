//! Bridge Vault Adapter - Rate-Limited Custody for Bridged CW20 Tokens
//!
//! This contract sits between a bridge router and an underlying CW20 token.
//! It issues an internal balance for value moved across the bridge and
//! settles withdrawals against the underlying it holds in custody.
//!
//! # Deposit Flow
//! 1. The router (or a holder) funds the vault with underlying
//! 2. Quota is charged in full to the recipient; any shortfall rejects the call
//! 3. The recipient is issued the same amount
//!
//! # Withdraw Flow
//! 1. Quota is charged up to what the holder's and global buckets allow
//! 2. That amount is burned from the holder
//! 3. Held underlying is paid out; the remainder is re-issued (Lock) or
//!    minted on the underlying (MintBurn)
//!
//! # Rate Limiting
//! - One global bucket and one bucket per account, both regenerating per second
//! - Deposits are strict; withdrawals are partial and never fail on quota

pub mod contract;
pub mod error;
mod execute;
pub mod ledger;
pub mod msg;
mod query;
pub mod quota;
pub mod rate_limiter;
pub mod roles;
pub mod state;
pub mod vault;

pub use crate::error::ContractError;
pub use crate::roles::Role;
pub use crate::vault::VaultMode;
