//! Bridge Vault Adapter - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
    Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_burn, execute_deposit, execute_deposit_vault, execute_emergency_retrieve,
    execute_grant_role, execute_mint, execute_receive, execute_revoke_role,
    execute_set_global_quota, execute_set_global_quota_regen_rate, execute_set_mode,
    execute_set_user_quota, execute_set_user_quota_regen_rate, execute_withdraw,
    execute_withdraw_vault,
};
use crate::ledger::TOTAL_ISSUED;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_balance, query_config, query_global_quota, query_has_role, query_max_consumable,
    query_mode, query_quota_config, query_role_members, query_stats, query_token_info,
    query_vault_liquidity,
};
use crate::quota::QuotaSettings;
use crate::rate_limiter::init_quotas;
use crate::roles::{grant_role, Role};
use crate::state::{Config, Stats, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, STATS};
use crate::vault::Underlying;

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    let underlying = Underlying(deps.api.addr_validate(&msg.underlying)?);

    // Issued balances share the underlying's precision
    let token_info = underlying.token_info(&deps.querier)?;

    let config = Config {
        underlying: underlying.addr().clone(),
        mode: msg.mode,
        name: msg.name,
        symbol: msg.symbol,
        decimals: token_info.decimals,
    };
    CONFIG.save(deps.storage, &config)?;

    let global = QuotaSettings {
        capacity: msg.global_quota,
        regen_rate: msg.global_quota_regen_rate,
    };
    let user = QuotaSettings {
        capacity: msg.user_quota,
        regen_rate: msg.user_quota_regen_rate,
    };
    init_quotas(deps.storage, global, user, env.block.time.seconds())?;

    grant_role(deps.storage, &admin, Role::Admin)?;
    let mut router_count = 0u32;
    for router in msg.routers {
        let router = deps.api.addr_validate(&router)?;
        grant_role(deps.storage, &router, Role::Router)?;
        router_count += 1;
    }

    STATS.save(deps.storage, &Stats::default())?;
    TOTAL_ISSUED.save(deps.storage, &Uint128::zero())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", admin)
        .add_attribute("underlying", config.underlying)
        .add_attribute("mode", config.mode.as_str())
        .add_attribute("router_count", router_count.to_string())
        .add_attribute("global_quota", global.capacity)
        .add_attribute("user_quota", user.capacity))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Router operations
        ExecuteMsg::DepositVault { amount, recipient } => {
            execute_deposit_vault(deps, env, info, amount, recipient)
        }
        ExecuteMsg::WithdrawVault { from, amount, to } => {
            execute_withdraw_vault(deps, env, info, from, amount, to)
        }
        ExecuteMsg::Mint { recipient, amount } => execute_mint(deps, info, recipient, amount),
        ExecuteMsg::Burn { from, amount } => execute_burn(deps, info, from, amount),

        // Holder operations
        ExecuteMsg::Deposit { amount } => execute_deposit(deps, env, info, amount),
        ExecuteMsg::Withdraw { amount } => execute_withdraw(deps, env, info, amount),
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, env, info, cw20_msg),

        // Quota configuration
        ExecuteMsg::SetGlobalQuota { quota } => execute_set_global_quota(deps, env, info, quota),
        ExecuteMsg::SetUserQuota { quota } => execute_set_user_quota(deps, env, info, quota),
        ExecuteMsg::SetGlobalQuotaRegenRate { rate } => {
            execute_set_global_quota_regen_rate(deps, env, info, rate)
        }
        ExecuteMsg::SetUserQuotaRegenRate { rate } => {
            execute_set_user_quota_regen_rate(deps, env, info, rate)
        }

        // Admin operations
        ExecuteMsg::SetMode { mode } => execute_set_mode(deps, info, mode),
        ExecuteMsg::EmergencyRetrieve { asset, recipient } => {
            execute_emergency_retrieve(deps, env, info, asset, recipient)
        }
        ExecuteMsg::GrantRole { role, address } => execute_grant_role(deps, info, role, address),
        ExecuteMsg::RevokeRole { role, address } => {
            execute_revoke_role(deps, info, role, address)
        }
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Mode {} => to_json_binary(&query_mode(deps)?),
        QueryMsg::QuotaConfig {} => to_json_binary(&query_quota_config(deps)?),
        QueryMsg::MaxConsumable { account } => {
            to_json_binary(&query_max_consumable(deps, env, account)?)
        }
        QueryMsg::GlobalQuota {} => to_json_binary(&query_global_quota(deps, env)?),
        QueryMsg::Balance { address } => to_json_binary(&query_balance(deps, address)?),
        QueryMsg::TokenInfo {} => to_json_binary(&query_token_info(deps)?),
        QueryMsg::VaultLiquidity {} => to_json_binary(&query_vault_liquidity(deps, env)?),
        QueryMsg::HasRole { role, address } => {
            to_json_binary(&query_has_role(deps, role, address)?)
        }
        QueryMsg::RoleMembers {
            role,
            start_after,
            limit,
        } => to_json_binary(&query_role_members(deps, role, start_after, limit)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    // Backfill stats for state written without them
    if STATS.may_load(deps.storage)?.is_none() {
        STATS.save(deps.storage, &Stats::default())?;
    }

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
