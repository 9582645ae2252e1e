//! Message types for the bridge vault adapter contract.

use common::AssetInfo;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

use crate::roles::Role;
use crate::vault::VaultMode;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

/// Migrate message
#[cw_serde]
pub struct MigrateMsg {}

/// Instantiate message
#[cw_serde]
pub struct InstantiateMsg {
    /// Name of the issued representation
    pub name: String,
    /// Symbol of the issued representation
    pub symbol: String,
    /// Underlying CW20 contract address
    pub underlying: String,
    /// Initial custody mode
    pub mode: VaultMode,
    /// Initial admin
    pub admin: String,
    /// Initial router addresses
    pub routers: Vec<String>,
    /// Global bucket capacity
    pub global_quota: Uint128,
    /// Per-account bucket capacity
    pub user_quota: Uint128,
    /// Global regeneration per second
    pub global_quota_regen_rate: Uint128,
    /// Per-account regeneration per second
    pub user_quota_regen_rate: Uint128,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Execute messages
#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Router Operations
    // ========================================================================
    /// Pull `amount` of underlying from the caller into the vault and issue it
    /// to `recipient`. Quota is charged to `recipient` and must cover the full
    /// amount.
    ///
    /// Authorization: Router only
    DepositVault { amount: Uint128, recipient: String },

    /// Burn issued balance from `from` and release underlying to `to`. Only the
    /// part covered by `from`'s current quota is processed. `from` must hold
    /// the full requested `amount`, even when quota covers less of it.
    ///
    /// Authorization: Router only
    WithdrawVault {
        from: String,
        amount: Uint128,
        to: String,
    },

    /// Issue balance without moving underlying or charging quota.
    ///
    /// Authorization: Router only
    Mint { recipient: String, amount: Uint128 },

    /// Burn issued balance without moving underlying.
    ///
    /// Authorization: Router only
    Burn { from: String, amount: Uint128 },

    // ========================================================================
    // Holder Operations
    // ========================================================================
    /// Deposit the caller's own underlying (requires an allowance to the adapter).
    Deposit { amount: Uint128 },

    /// Redeem the caller's own issued balance for underlying.
    Withdraw { amount: Uint128 },

    /// Deposit underlying sent through CW20 `Send`
    Receive(cw20::Cw20ReceiveMsg),

    // ========================================================================
    // Quota Configuration
    // ========================================================================
    /// Authorization: Admin only
    SetGlobalQuota { quota: Uint128 },

    /// Authorization: Admin only
    SetUserQuota { quota: Uint128 },

    /// Authorization: Admin only
    SetGlobalQuotaRegenRate { rate: Uint128 },

    /// Authorization: Admin only
    SetUserQuotaRegenRate { rate: Uint128 },

    // ========================================================================
    // Admin Operations
    // ========================================================================
    /// Switch custody mode. Moves no funds.
    ///
    /// Authorization: Admin only
    SetMode { mode: VaultMode },

    /// Send the adapter's entire balance of `asset` to `recipient`.
    /// The underlying token can never be retrieved.
    ///
    /// Authorization: Admin only
    EmergencyRetrieve { asset: AssetInfo, recipient: String },

    /// Authorization: Admin only
    GrantRole { role: Role, address: String },

    /// Authorization: Admin only
    RevokeRole { role: Role, address: String },
}

/// CW20 receive hook message
#[cw_serde]
pub enum ReceiveMsg {
    /// Router deposit on behalf of `recipient`
    DepositVault { recipient: String },
    /// Holder deposit to self
    Deposit {},
}

// ============================================================================
// Query Messages
// ============================================================================

/// Query messages
#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Returns contract configuration
    #[returns(ConfigResponse)]
    Config {},

    /// Returns the custody mode
    #[returns(ModeResponse)]
    Mode {},

    /// Returns quota capacities and regeneration rates
    #[returns(QuotaConfigResponse)]
    QuotaConfig {},

    /// Returns the amount `account` can move right now
    #[returns(MaxConsumableResponse)]
    MaxConsumable { account: String },

    /// Returns the global bucket state
    #[returns(GlobalQuotaResponse)]
    GlobalQuota {},

    /// Returns an account's issued balance
    #[returns(cw20::BalanceResponse)]
    Balance { address: String },

    /// Returns issued token info (supply = total issued)
    #[returns(cw20::TokenInfoResponse)]
    TokenInfo {},

    /// Returns the underlying held in custody
    #[returns(VaultLiquidityResponse)]
    VaultLiquidity {},

    #[returns(HasRoleResponse)]
    HasRole { role: Role, address: String },

    #[returns(RoleMembersResponse)]
    RoleMembers {
        role: Role,
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Returns adapter statistics
    #[returns(StatsResponse)]
    Stats {},
}

// ============================================================================
// Response Types
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub underlying: Addr,
    pub mode: VaultMode,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[cw_serde]
pub struct ModeResponse {
    pub mode: VaultMode,
}

#[cw_serde]
pub struct QuotaConfigResponse {
    pub global_quota: Uint128,
    pub user_quota: Uint128,
    pub global_quota_regen_rate: Uint128,
    pub user_quota_regen_rate: Uint128,
}

#[cw_serde]
pub struct MaxConsumableResponse {
    pub account: Addr,
    /// min(global_available, user_available)
    pub amount: Uint128,
    pub global_available: Uint128,
    pub user_available: Uint128,
}

#[cw_serde]
pub struct GlobalQuotaResponse {
    pub capacity: Uint128,
    pub regen_rate: Uint128,
    pub available: Uint128,
    pub last_update: u64,
}

#[cw_serde]
pub struct VaultLiquidityResponse {
    pub underlying: Addr,
    pub held: Uint128,
}

#[cw_serde]
pub struct HasRoleResponse {
    pub has_role: bool,
}

#[cw_serde]
pub struct RoleMembersResponse {
    pub role: Role,
    pub members: Vec<Addr>,
}

#[cw_serde]
pub struct StatsResponse {
    pub deposit_count: u64,
    pub withdraw_count: u64,
    pub underlying_bridge_out: Uint128,
    pub total_paid_out: Uint128,
    pub total_minted_underlying: Uint128,
    pub total_recredited: Uint128,
}
