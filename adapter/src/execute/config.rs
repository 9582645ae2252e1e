//! Quota and mode configuration handlers.
//!
//! Changes take effect immediately. Lowering a capacity caps what a bucket
//! holds; raising it never refills one.

use cosmwasm_std::{DepsMut, Env, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::rate_limiter::{update_global_settings, update_user_settings};
use crate::roles::{Role, RoleRegistry, StoredRoles};
use crate::state::CONFIG;
use crate::vault::VaultMode;

// ============================================================================
// Global Quota
// ============================================================================

pub fn execute_set_global_quota(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    quota: Uint128,
) -> Result<Response, ContractError> {
    StoredRoles(deps.storage).ensure_role(&info.sender, Role::Admin)?;

    let settings = update_global_settings(deps.storage, env.block.time.seconds(), |s| {
        s.capacity = quota
    })?;

    Ok(Response::new()
        .add_attribute("method", "set_global_quota")
        .add_attribute("capacity", settings.capacity)
        .add_attribute("regen_rate", settings.regen_rate))
}

pub fn execute_set_global_quota_regen_rate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    rate: Uint128,
) -> Result<Response, ContractError> {
    StoredRoles(deps.storage).ensure_role(&info.sender, Role::Admin)?;

    let settings = update_global_settings(deps.storage, env.block.time.seconds(), |s| {
        s.regen_rate = rate
    })?;

    Ok(Response::new()
        .add_attribute("method", "set_global_quota_regen_rate")
        .add_attribute("capacity", settings.capacity)
        .add_attribute("regen_rate", settings.regen_rate))
}

// ============================================================================
// Per-account Quota
// ============================================================================

/// Applies to every stored account bucket at once.
pub fn execute_set_user_quota(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    quota: Uint128,
) -> Result<Response, ContractError> {
    StoredRoles(deps.storage).ensure_role(&info.sender, Role::Admin)?;

    let settings = update_user_settings(deps.storage, env.block.time.seconds(), |s| {
        s.capacity = quota
    })?;

    Ok(Response::new()
        .add_attribute("method", "set_user_quota")
        .add_attribute("capacity", settings.capacity)
        .add_attribute("regen_rate", settings.regen_rate))
}

pub fn execute_set_user_quota_regen_rate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    rate: Uint128,
) -> Result<Response, ContractError> {
    StoredRoles(deps.storage).ensure_role(&info.sender, Role::Admin)?;

    let settings = update_user_settings(deps.storage, env.block.time.seconds(), |s| {
        s.regen_rate = rate
    })?;

    Ok(Response::new()
        .add_attribute("method", "set_user_quota_regen_rate")
        .add_attribute("capacity", settings.capacity)
        .add_attribute("regen_rate", settings.regen_rate))
}

// ============================================================================
// Mode
// ============================================================================

/// Switch custody mode. Held underlying stays where it is.
pub fn execute_set_mode(
    deps: DepsMut,
    info: MessageInfo,
    mode: VaultMode,
) -> Result<Response, ContractError> {
    StoredRoles(deps.storage).ensure_role(&info.sender, Role::Admin)?;

    let mut config = CONFIG.load(deps.storage)?;
    let previous = config.mode;
    config.mode = mode;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_mode")
        .add_attribute("previous", previous.as_str())
        .add_attribute("mode", mode.as_str()))
}
