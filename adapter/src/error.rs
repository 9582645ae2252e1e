//! Error types for the bridge vault adapter contract.

use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: caller lacks the {role} role")]
    Unauthorized { role: String },

    #[error("Cannot revoke the last admin")]
    CannotRevokeLastAdmin,

    // ========================================================================
    // Quota Errors
    // ========================================================================

    /// A single bucket could not cover the request.
    #[error("Insufficient quota: available {available}, requested {requested}")]
    InsufficientQuota {
        available: Uint128,
        requested: Uint128,
    },

    /// The joint (global and per-account) quota could not cover a strict request.
    #[error("Quota exceeded: max consumable is {max_consumable}, requested {requested}")]
    QuotaExceeded {
        max_consumable: Uint128,
        requested: Uint128,
    },

    // ========================================================================
    // Balance & Custody Errors
    // ========================================================================

    #[error("Insufficient issued balance: held {held}, requested {requested}")]
    InsufficientBalance { held: Uint128, requested: Uint128 },

    #[error("Underlying transfer failed: {reason}")]
    TransferFailed { reason: String },

    #[error("Asset {asset} backs issued balances and cannot be retrieved")]
    ForbiddenAsset { asset: String },

    #[error("Token not accepted: {token}")]
    UnsupportedToken { token: String },

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid amount: {reason}")]
    InvalidAmount { reason: String },
}

impl ContractError {
    pub fn zero_amount() -> Self {
        ContractError::InvalidAmount {
            reason: "Amount must be greater than zero".to_string(),
        }
    }
}
