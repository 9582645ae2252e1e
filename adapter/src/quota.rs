//! Token-bucket quota accounting.
//!
//! A [`QuotaBucket`] stores up to `capacity` units of permitted throughput and
//! regenerates `regen_rate` units per elapsed second. Regeneration is folded
//! into every consumption, so two consumptions at the same block time never
//! regenerate twice.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;

use crate::error::ContractError;

/// Capacity and regeneration rate of a bucket.
#[cw_serde]
#[derive(Default, Copy)]
pub struct QuotaSettings {
    /// Maximum storable quota
    pub capacity: Uint128,
    /// Units regenerated per second
    pub regen_rate: Uint128,
}

#[cw_serde]
#[derive(Default)]
pub struct QuotaBucket {
    /// Maximum storable quota
    pub capacity: Uint128,
    /// Units regenerated per second
    pub regen_rate: Uint128,
    /// Quota left as of `last_update` (never above `capacity`)
    pub remaining: Uint128,
    /// Block time (seconds) of the last regeneration or consumption
    pub last_update: u64,
}

impl QuotaBucket {
    /// A bucket configured with `settings` that starts full at `now`.
    pub fn new(settings: QuotaSettings, now: u64) -> Self {
        Self {
            capacity: settings.capacity,
            regen_rate: settings.regen_rate,
            remaining: settings.capacity,
            last_update: now,
        }
    }

    pub fn settings(&self) -> QuotaSettings {
        QuotaSettings {
            capacity: self.capacity,
            regen_rate: self.regen_rate,
        }
    }

    /// Quota consumable at `now`. Times before `last_update` regenerate nothing.
    pub fn available(&self, now: u64) -> Uint128 {
        let elapsed = now.saturating_sub(self.last_update);
        let regenerated = self.regen_rate.saturating_mul(Uint128::from(elapsed));
        self.remaining
            .saturating_add(regenerated)
            .min(self.capacity)
    }

    /// Consume exactly `amount`, or fail without touching state.
    pub fn try_consume(&mut self, amount: Uint128, now: u64) -> Result<(), ContractError> {
        let available = self.available(now);
        if amount > available {
            return Err(ContractError::InsufficientQuota {
                available,
                requested: amount,
            });
        }
        self.settle(available - amount, now);
        Ok(())
    }

    /// Consume as much of `amount` as is available and return what was taken.
    pub fn consume_up_to(&mut self, amount: Uint128, now: u64) -> Uint128 {
        let available = self.available(now);
        let consumed = amount.min(available);
        self.settle(available - consumed, now);
        consumed
    }

    /// Apply new settings. Regeneration up to `now` accrues at the old rate and
    /// `remaining` is only ever capped, never topped up.
    pub fn reconfigure(&mut self, settings: QuotaSettings, now: u64) {
        let available = self.available(now);
        self.capacity = settings.capacity;
        self.regen_rate = settings.regen_rate;
        self.settle(available.min(settings.capacity), now);
    }

    fn settle(&mut self, remaining: Uint128, now: u64) {
        self.remaining = remaining;
        self.last_update = self.last_update.max(now);
    }
}
