//! Issued balance ledger.
//!
//! Tracks the bridged representation owed to each account. `TOTAL_ISSUED` is
//! updated together with every balance change so it always equals the sum of
//! all balances.

use cosmwasm_std::{Addr, StdError, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};

use crate::error::ContractError;

/// Issued balance per account
pub const BALANCES: Map<&Addr, Uint128> = Map::new("issued_balances");

/// Sum of all issued balances
pub const TOTAL_ISSUED: Item<Uint128> = Item::new("total_issued");

pub fn balance_of(storage: &dyn Storage, account: &Addr) -> StdResult<Uint128> {
    Ok(BALANCES.may_load(storage, account)?.unwrap_or_default())
}

pub fn total_issued(storage: &dyn Storage) -> StdResult<Uint128> {
    Ok(TOTAL_ISSUED.may_load(storage)?.unwrap_or_default())
}

/// Credit `amount` of issued balance to `to`.
pub fn issue(storage: &mut dyn Storage, to: &Addr, amount: Uint128) -> StdResult<()> {
    if amount.is_zero() {
        return Ok(());
    }
    let balance = balance_of(storage, to)?.checked_add(amount)?;
    let total = total_issued(storage)?.checked_add(amount)?;
    BALANCES.save(storage, to, &balance)?;
    TOTAL_ISSUED.save(storage, &total)
}

/// Debit `amount` of issued balance from `from`.
pub fn burn(storage: &mut dyn Storage, from: &Addr, amount: Uint128) -> Result<(), ContractError> {
    let held = balance_of(storage, from)?;
    if held < amount {
        return Err(ContractError::InsufficientBalance {
            held,
            requested: amount,
        });
    }
    if amount.is_zero() {
        return Ok(());
    }

    let remaining = held - amount;
    if remaining.is_zero() {
        BALANCES.remove(storage, from);
    } else {
        BALANCES.save(storage, from, &remaining)?;
    }
    let total = total_issued(storage)?
        .checked_sub(amount)
        .map_err(StdError::from)?;
    TOTAL_ISSUED.save(storage, &total)?;
    Ok(())
}

/// Fail with `InsufficientBalance` unless `account` holds at least `amount`.
pub fn ensure_balance(
    storage: &dyn Storage,
    account: &Addr,
    amount: Uint128,
) -> Result<(), ContractError> {
    let held = balance_of(storage, account)?;
    if held < amount {
        return Err(ContractError::InsufficientBalance {
            held,
            requested: amount,
        });
    }
    Ok(())
}
