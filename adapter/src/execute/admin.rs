//! Admin operations handlers.
//!
//! This module handles:
//! - Role grants and revocations
//! - Emergency retrieval of stray assets

use common::{Asset, AssetInfo};
use cosmwasm_std::{DepsMut, Env, MessageInfo, Response};

use crate::error::ContractError;
use crate::roles::{grant_role, revoke_role, Role, RoleRegistry, StoredRoles};
use crate::state::CONFIG;

// ============================================================================
// Roles
// ============================================================================

pub fn execute_grant_role(
    deps: DepsMut,
    info: MessageInfo,
    role: Role,
    address: String,
) -> Result<Response, ContractError> {
    StoredRoles(deps.storage).ensure_role(&info.sender, Role::Admin)?;
    let account = deps.api.addr_validate(&address)?;

    grant_role(deps.storage, &account, role)?;

    Ok(Response::new()
        .add_attribute("method", "grant_role")
        .add_attribute("role", role.as_str())
        .add_attribute("account", account))
}

pub fn execute_revoke_role(
    deps: DepsMut,
    info: MessageInfo,
    role: Role,
    address: String,
) -> Result<Response, ContractError> {
    StoredRoles(deps.storage).ensure_role(&info.sender, Role::Admin)?;
    let account = deps.api.addr_validate(&address)?;

    revoke_role(deps.storage, &account, role)?;

    Ok(Response::new()
        .add_attribute("method", "revoke_role")
        .add_attribute("role", role.as_str())
        .add_attribute("account", account))
}

// ============================================================================
// Emergency Retrieval
// ============================================================================

/// Send the adapter's whole balance of `asset` to `recipient`.
///
/// The underlying backs issued balances and is refused with `ForbiddenAsset`.
pub fn execute_emergency_retrieve(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset: AssetInfo,
    recipient: String,
) -> Result<Response, ContractError> {
    StoredRoles(deps.storage).ensure_role(&info.sender, Role::Admin)?;

    let config = CONFIG.load(deps.storage)?;
    if asset.is_cw20(&config.underlying) {
        return Err(ContractError::ForbiddenAsset {
            asset: asset.to_string(),
        });
    }
    if let AssetInfo::Cw20 { contract_addr } = &asset {
        deps.api.addr_validate(contract_addr.as_str())?;
    }
    let recipient = deps.api.addr_validate(&recipient)?;

    let amount = asset.query_balance(&deps.querier, &env.contract.address)?;
    let retrieved = Asset::new(asset, amount);

    let mut response = Response::new()
        .add_attribute("method", "emergency_retrieve")
        .add_attribute("asset", retrieved.info.to_string())
        .add_attribute("recipient", recipient.as_str())
        .add_attribute("amount", amount);
    if !amount.is_zero() {
        response = response.add_message(retrieved.transfer_msg(&recipient)?);
    }
    Ok(response)
}
