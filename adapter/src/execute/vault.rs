//! Vault deposit and withdrawal handlers.
//!
//! Router calls act on behalf of bridge transfers; holder calls let any
//! account move its own funds. Both go through the same two cores:
//! deposits charge quota strictly, withdrawals release only what the quota
//! covers right now and leave the rest with the holder.

use cosmwasm_std::{
    from_json, Addr, CosmosMsg, DepsMut, Env, MessageInfo, Response, StdResult, Uint128,
};
use cw20::Cw20ReceiveMsg;

use crate::error::ContractError;
use crate::ledger;
use crate::msg::ReceiveMsg;
use crate::rate_limiter::RateLimiter;
use crate::roles::{Role, RoleRegistry, StoredRoles};
use crate::state::{CONFIG, STATS};
use crate::vault::{plan_release, pull_in};

/// Where deposited underlying comes from.
enum Funding {
    /// Pulled from `payer` through an allowance
    Pull { payer: Addr },
    /// Already transferred in by `payer` via CW20 `Send`
    Received { payer: Addr },
}

// ============================================================================
// Router Operations
// ============================================================================

/// Deposit underlying from the router and issue it to `recipient`.
pub fn execute_deposit_vault(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    recipient: String,
) -> Result<Response, ContractError> {
    StoredRoles(deps.storage).ensure_role(&info.sender, Role::Router)?;
    let recipient = deps.api.addr_validate(&recipient)?;

    deposit(
        deps,
        &env,
        Funding::Pull {
            payer: info.sender,
        },
        recipient,
        amount,
        "deposit_vault",
    )
}

/// Burn issued balance from `from` and release underlying to `to`.
pub fn execute_withdraw_vault(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    from: String,
    amount: Uint128,
    to: String,
) -> Result<Response, ContractError> {
    StoredRoles(deps.storage).ensure_role(&info.sender, Role::Router)?;
    let from = deps.api.addr_validate(&from)?;
    let to = deps.api.addr_validate(&to)?;

    withdraw(deps, &env, from, to, amount, "withdraw_vault")
}

// ============================================================================
// Holder Operations
// ============================================================================

pub fn execute_deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let holder = info.sender;
    deposit(
        deps,
        &env,
        Funding::Pull {
            payer: holder.clone(),
        },
        holder,
        amount,
        "deposit",
    )
}

pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let holder = info.sender;
    withdraw(deps, &env, holder.clone(), holder, amount, "withdraw")
}

/// Handle underlying sent with CW20 `Send`.
pub fn execute_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.underlying {
        return Err(ContractError::UnsupportedToken {
            token: info.sender.to_string(),
        });
    }

    let sender = deps.api.addr_validate(&cw20_msg.sender)?;
    let amount = cw20_msg.amount;

    let receive_msg: ReceiveMsg = from_json(&cw20_msg.msg)?;
    match receive_msg {
        ReceiveMsg::DepositVault { recipient } => {
            StoredRoles(deps.storage).ensure_role(&sender, Role::Router)?;
            let recipient = deps.api.addr_validate(&recipient)?;
            deposit(
                deps,
                &env,
                Funding::Received { payer: sender },
                recipient,
                amount,
                "deposit_vault",
            )
        }
        ReceiveMsg::Deposit {} => deposit(
            deps,
            &env,
            Funding::Received {
                payer: sender.clone(),
            },
            sender,
            amount,
            "deposit",
        ),
    }
}

// ============================================================================
// Cores
// ============================================================================

fn deposit(
    deps: DepsMut,
    env: &Env,
    funding: Funding,
    recipient: Addr,
    amount: Uint128,
    action: &str,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::zero_amount());
    }

    let now = env.block.time.seconds();
    let config = CONFIG.load(deps.storage)?;

    let mut limiter = RateLimiter::load(deps.storage, &recipient, now)?;
    limiter.consume_strict(amount, now)?;

    let mut messages: Vec<CosmosMsg> = vec![];
    let payer = match funding {
        Funding::Pull { payer } => {
            messages.push(pull_in(
                &deps.querier,
                &config.underlying(),
                &payer,
                &env.contract.address,
                amount,
            )?);
            payer
        }
        Funding::Received { payer } => payer,
    };

    ledger::issue(deps.storage, &recipient, amount)?;
    limiter.save(deps.storage)?;

    STATS.update(deps.storage, |mut stats| -> StdResult<_> {
        stats.deposit_count += 1;
        stats.underlying_bridge_out = stats.underlying_bridge_out.checked_add(amount)?;
        Ok(stats)
    })?;

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("method", action)
        .add_attribute("payer", payer)
        .add_attribute("recipient", recipient)
        .add_attribute("amount", amount)
        .add_attribute("mode", config.mode.as_str()))
}

fn withdraw(
    deps: DepsMut,
    env: &Env,
    from: Addr,
    to: Addr,
    amount: Uint128,
    action: &str,
) -> Result<Response, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::zero_amount());
    }
    ledger::ensure_balance(deps.storage, &from, amount)?;

    let now = env.block.time.seconds();
    let config = CONFIG.load(deps.storage)?;
    let underlying = config.underlying();

    let mut limiter = RateLimiter::load(deps.storage, &from, now)?;
    let consumed = limiter.consume_partial(amount, now);

    let held = underlying.balance_of(&deps.querier, &env.contract.address)?;
    let release = plan_release(config.mode, held, consumed);

    ledger::burn(deps.storage, &from, consumed)?;
    ledger::issue(deps.storage, &to, release.recredited)?;
    limiter.save(deps.storage)?;

    if !consumed.is_zero() {
        STATS.update(deps.storage, |mut stats| -> StdResult<_> {
            stats.withdraw_count += 1;
            stats.total_paid_out = stats.total_paid_out.checked_add(release.paid_out)?;
            stats.total_minted_underlying =
                stats.total_minted_underlying.checked_add(release.minted)?;
            stats.total_recredited = stats.total_recredited.checked_add(release.recredited)?;
            Ok(stats)
        })?;
    }

    Ok(Response::new()
        .add_messages(release.messages(&underlying, &to)?)
        .add_attribute("method", action)
        .add_attribute("from", from)
        .add_attribute("to", to)
        .add_attribute("requested", amount)
        .add_attribute("consumed", consumed)
        .add_attribute("paid_out", release.paid_out)
        .add_attribute("minted", release.minted)
        .add_attribute("recredited", release.recredited)
        .add_attribute("mode", config.mode.as_str()))
}
