//! Router adjustments of issued balance. No quota is charged and no
//! underlying moves.

use cosmwasm_std::{DepsMut, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::ledger;
use crate::roles::{Role, RoleRegistry, StoredRoles};

/// Issue `amount` to `recipient`.
pub fn execute_mint(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    StoredRoles(deps.storage).ensure_role(&info.sender, Role::Router)?;
    if amount.is_zero() {
        return Err(ContractError::zero_amount());
    }
    let recipient = deps.api.addr_validate(&recipient)?;

    ledger::issue(deps.storage, &recipient, amount)?;

    Ok(Response::new()
        .add_attribute("method", "mint")
        .add_attribute("recipient", recipient)
        .add_attribute("amount", amount))
}

/// Remove `amount` from `from`.
pub fn execute_burn(
    deps: DepsMut,
    info: MessageInfo,
    from: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    StoredRoles(deps.storage).ensure_role(&info.sender, Role::Router)?;
    if amount.is_zero() {
        return Err(ContractError::zero_amount());
    }
    let from = deps.api.addr_validate(&from)?;

    ledger::burn(deps.storage, &from, amount)?;

    Ok(Response::new()
        .add_attribute("method", "burn")
        .add_attribute("from", from)
        .add_attribute("amount", amount))
}
