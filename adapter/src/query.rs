//! Query handlers for the bridge vault adapter.
//!
//! This module contains all query message handlers for retrieving contract state.

use cosmwasm_std::{Deps, Env, StdResult};
use cw20::{BalanceResponse, TokenInfoResponse};

use crate::ledger;
use crate::msg::{
    ConfigResponse, GlobalQuotaResponse, HasRoleResponse, MaxConsumableResponse, ModeResponse,
    QuotaConfigResponse, RoleMembersResponse, StatsResponse, VaultLiquidityResponse,
};
use crate::rate_limiter::{load_settings, RateLimiter, GLOBAL_BUCKET};
use crate::roles::{role_members, Role, RoleRegistry, StoredRoles};
use crate::state::{CONFIG, DEFAULT_LIMIT, MAX_LIMIT, STATS};

// ============================================================================
// Core Queries
// ============================================================================

/// Query contract configuration.
pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        underlying: config.underlying,
        mode: config.mode,
        name: config.name,
        symbol: config.symbol,
        decimals: config.decimals,
    })
}

pub fn query_mode(deps: Deps) -> StdResult<ModeResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ModeResponse { mode: config.mode })
}

/// Query adapter statistics.
pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.load(deps.storage)?;
    Ok(StatsResponse {
        deposit_count: stats.deposit_count,
        withdraw_count: stats.withdraw_count,
        underlying_bridge_out: stats.underlying_bridge_out,
        total_paid_out: stats.total_paid_out,
        total_minted_underlying: stats.total_minted_underlying,
        total_recredited: stats.total_recredited,
    })
}

// ============================================================================
// Quota Queries
// ============================================================================

pub fn query_quota_config(deps: Deps) -> StdResult<QuotaConfigResponse> {
    let (global, user) = load_settings(deps.storage)?;
    Ok(QuotaConfigResponse {
        global_quota: global.capacity,
        user_quota: user.capacity,
        global_quota_regen_rate: global.regen_rate,
        user_quota_regen_rate: user.regen_rate,
    })
}

/// Query how much `account` can move at the current block time.
pub fn query_max_consumable(
    deps: Deps,
    env: Env,
    account: String,
) -> StdResult<MaxConsumableResponse> {
    let account = deps.api.addr_validate(&account)?;
    let now = env.block.time.seconds();
    let limiter = RateLimiter::load(deps.storage, &account, now)?;

    Ok(MaxConsumableResponse {
        amount: limiter.max_consumable(now),
        global_available: limiter.global().available(now),
        user_available: limiter.user().available(now),
        account,
    })
}

pub fn query_global_quota(deps: Deps, env: Env) -> StdResult<GlobalQuotaResponse> {
    let bucket = GLOBAL_BUCKET.load(deps.storage)?;
    Ok(GlobalQuotaResponse {
        capacity: bucket.capacity,
        regen_rate: bucket.regen_rate,
        available: bucket.available(env.block.time.seconds()),
        last_update: bucket.last_update,
    })
}

// ============================================================================
// Ledger & Vault Queries
// ============================================================================

pub fn query_balance(deps: Deps, address: String) -> StdResult<BalanceResponse> {
    let address = deps.api.addr_validate(&address)?;
    Ok(BalanceResponse {
        balance: ledger::balance_of(deps.storage, &address)?,
    })
}

/// Token info of the issued representation. Supply is the total issued.
pub fn query_token_info(deps: Deps) -> StdResult<TokenInfoResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(TokenInfoResponse {
        name: config.name,
        symbol: config.symbol,
        decimals: config.decimals,
        total_supply: ledger::total_issued(deps.storage)?,
    })
}

/// Underlying currently held in custody.
pub fn query_vault_liquidity(deps: Deps, env: Env) -> StdResult<VaultLiquidityResponse> {
    let underlying = CONFIG.load(deps.storage)?.underlying();
    let held = underlying.balance_of(&deps.querier, &env.contract.address)?;
    Ok(VaultLiquidityResponse {
        underlying: underlying.0,
        held,
    })
}

// ============================================================================
// Role Queries
// ============================================================================

pub fn query_has_role(deps: Deps, role: Role, address: String) -> StdResult<HasRoleResponse> {
    let address = deps.api.addr_validate(&address)?;
    Ok(HasRoleResponse {
        has_role: StoredRoles(deps.storage).has_role(&address, role)?,
    })
}

/// Query members of a role with pagination.
pub fn query_role_members(
    deps: Deps,
    role: Role,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<RoleMembersResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_after = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;

    let members = role_members(deps.storage, role, start_after.as_ref(), limit)?;
    Ok(RoleMembersResponse { role, members })
}
