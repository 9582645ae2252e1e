//! Role-based access control.
//!
//! Handlers never read the role table directly; they go through
//! [`RoleRegistry`], which answers `has_role(caller, role)`. The contract's
//! own implementation is [`StoredRoles`], backed by the `ROLES` map.

use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Order, StdResult, Storage};
use cw_storage_plus::{Bound, Map};

use crate::error::ContractError;

#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum Role {
    /// Reconfigures quotas and mode, manages roles, emergency retrieval
    Admin,
    /// Bridge router: deposit/withdraw/mint/burn on behalf of transfers
    Router,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Router => "router",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role members
/// Key: (role name, address), Value: always true
pub const ROLES: Map<(&str, &Addr), bool> = Map::new("roles");

pub trait RoleRegistry {
    fn has_role(&self, account: &Addr, role: Role) -> StdResult<bool>;

    fn ensure_role(&self, account: &Addr, role: Role) -> Result<(), ContractError> {
        if !self.has_role(account, role)? {
            return Err(ContractError::Unauthorized {
                role: role.to_string(),
            });
        }
        Ok(())
    }
}

/// Role table kept in contract storage.
pub struct StoredRoles<'a>(pub &'a dyn Storage);

impl RoleRegistry for StoredRoles<'_> {
    fn has_role(&self, account: &Addr, role: Role) -> StdResult<bool> {
        Ok(ROLES
            .may_load(self.0, (role.as_str(), account))?
            .unwrap_or(false))
    }
}

pub fn grant_role(storage: &mut dyn Storage, account: &Addr, role: Role) -> StdResult<()> {
    ROLES.save(storage, (role.as_str(), account), &true)
}

pub fn revoke_role(
    storage: &mut dyn Storage,
    account: &Addr,
    role: Role,
) -> Result<(), ContractError> {
    if role == Role::Admin
        && StoredRoles(storage).has_role(account, Role::Admin)?
        && role_members(storage, Role::Admin, None, 2)?.len() < 2
    {
        return Err(ContractError::CannotRevokeLastAdmin);
    }
    ROLES.remove(storage, (role.as_str(), account));
    Ok(())
}

/// Members of `role` in address order.
pub fn role_members(
    storage: &dyn Storage,
    role: Role,
    start_after: Option<&Addr>,
    limit: usize,
) -> StdResult<Vec<Addr>> {
    let start = start_after.map(Bound::exclusive);
    ROLES
        .prefix(role.as_str())
        .keys(storage, start, None, Order::Ascending)
        .take(limit)
        .collect()
}
