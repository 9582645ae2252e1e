//! Vault custody of the underlying CW20.
//!
//! Deposits always pull the underlying into custody. Withdrawals release it
//! according to the vault mode, with one shared fallback when custody runs
//! short: [`plan_release`] pays out whatever the vault holds and covers the
//! rest by re-issuing balance (Lock) or minting the underlying (MintBurn).

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg,
};
use cw20::{AllowanceResponse, BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg, TokenInfoResponse};

use crate::error::ContractError;

#[cw_serde]
#[derive(Copy, Eq)]
pub enum VaultMode {
    /// Underlying held 1:1 in custody; never minted
    Lock,
    /// Underlying minted on demand; held balance is spent first
    MintBurn,
}

impl VaultMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            VaultMode::Lock => "lock",
            VaultMode::MintBurn => "mint_burn",
        }
    }
}

/// Handle to the underlying CW20 contract.
#[derive(Debug, Clone, PartialEq)]
pub struct Underlying(pub Addr);

impl Underlying {
    pub fn addr(&self) -> &Addr {
        &self.0
    }

    pub fn balance_of(&self, querier: &QuerierWrapper, account: &Addr) -> StdResult<Uint128> {
        let res: BalanceResponse = querier.query_wasm_smart(
            &self.0,
            &Cw20QueryMsg::Balance {
                address: account.to_string(),
            },
        )?;
        Ok(res.balance)
    }

    pub fn allowance(
        &self,
        querier: &QuerierWrapper,
        owner: &Addr,
        spender: &Addr,
    ) -> StdResult<Uint128> {
        let res: AllowanceResponse = querier.query_wasm_smart(
            &self.0,
            &Cw20QueryMsg::Allowance {
                owner: owner.to_string(),
                spender: spender.to_string(),
            },
        )?;
        Ok(res.allowance)
    }

    pub fn token_info(&self, querier: &QuerierWrapper) -> StdResult<TokenInfoResponse> {
        querier.query_wasm_smart(&self.0, &Cw20QueryMsg::TokenInfo {})
    }

    /// Pull `amount` from `from` into `vault`. The vault must hold an allowance.
    pub fn transfer_in(&self, from: &Addr, vault: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
        self.call(Cw20ExecuteMsg::TransferFrom {
            owner: from.to_string(),
            recipient: vault.to_string(),
            amount,
        })
    }

    pub fn transfer_out(&self, to: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
        self.call(Cw20ExecuteMsg::Transfer {
            recipient: to.to_string(),
            amount,
        })
    }

    /// Mint new underlying to `to`. The vault must be the token's minter.
    pub fn mint(&self, to: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
        self.call(Cw20ExecuteMsg::Mint {
            recipient: to.to_string(),
            amount,
        })
    }

    fn call(&self, msg: Cw20ExecuteMsg) -> StdResult<CosmosMsg> {
        Ok(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: self.0.to_string(),
            msg: to_json_binary(&msg)?,
            funds: vec![],
        }))
    }
}

/// Check that `from` can fund a `transfer_in` of `amount` to `vault`, then build it.
pub fn pull_in(
    querier: &QuerierWrapper,
    underlying: &Underlying,
    from: &Addr,
    vault: &Addr,
    amount: Uint128,
) -> Result<CosmosMsg, ContractError> {
    let balance = underlying.balance_of(querier, from)?;
    if balance < amount {
        return Err(ContractError::TransferFailed {
            reason: format!("{} holds {} of {} needed", from, balance, amount),
        });
    }
    let allowance = underlying.allowance(querier, from, vault)?;
    if allowance < amount {
        return Err(ContractError::TransferFailed {
            reason: format!("allowance {} is below {}", allowance, amount),
        });
    }
    Ok(underlying.transfer_in(from, vault, amount)?)
}

/// How a withdrawal of `paid_out + minted + recredited` is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Release {
    /// Underlying transferred out of custody
    pub paid_out: Uint128,
    /// Underlying newly minted to the recipient (MintBurn only)
    pub minted: Uint128,
    /// Issued balance credited back to the recipient (Lock only)
    pub recredited: Uint128,
}

/// Split a release of `amount` given the vault's `held` underlying.
pub fn plan_release(mode: VaultMode, held: Uint128, amount: Uint128) -> Release {
    let paid_out = held.min(amount);
    let shortfall = amount - paid_out;
    match mode {
        VaultMode::Lock => Release {
            paid_out,
            minted: Uint128::zero(),
            recredited: shortfall,
        },
        VaultMode::MintBurn => Release {
            paid_out,
            minted: shortfall,
            recredited: Uint128::zero(),
        },
    }
}

impl Release {
    /// Underlying messages that settle this release to `to`.
    pub fn messages(&self, underlying: &Underlying, to: &Addr) -> StdResult<Vec<CosmosMsg>> {
        let mut messages = vec![];
        if !self.paid_out.is_zero() {
            messages.push(underlying.transfer_out(to, self.paid_out)?);
        }
        if !self.minted.is_zero() {
            messages.push(underlying.mint(to, self.minted)?);
        }
        Ok(messages)
    }
}
