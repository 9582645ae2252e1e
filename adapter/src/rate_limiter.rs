//! Dual-bucket rate limiter.
//!
//! Every consumption draws from the global bucket and from the caller's
//! account bucket together. A [`RateLimiter`] is loaded for one account,
//! mutated in memory and written back with [`RateLimiter::save`] only once the
//! whole operation has succeeded.

use cosmwasm_std::{Addr, Order, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};

use crate::error::ContractError;
use crate::quota::{QuotaBucket, QuotaSettings};

// ============================================================================
// Storage
// ============================================================================

/// Global bucket shared by every account
pub const GLOBAL_BUCKET: Item<QuotaBucket> = Item::new("global_bucket");

/// Settings applied to every account bucket
pub const USER_QUOTA: Item<QuotaSettings> = Item::new("user_quota");

/// Per-account buckets, created on first use
pub const ACCOUNT_BUCKETS: Map<&Addr, QuotaBucket> = Map::new("account_buckets");

/// Store the initial quota configuration. The global bucket starts full.
pub fn init_quotas(
    storage: &mut dyn Storage,
    global: QuotaSettings,
    user: QuotaSettings,
    now: u64,
) -> StdResult<()> {
    GLOBAL_BUCKET.save(storage, &QuotaBucket::new(global, now))?;
    USER_QUOTA.save(storage, &user)
}

/// Current global and per-account settings.
pub fn load_settings(storage: &dyn Storage) -> StdResult<(QuotaSettings, QuotaSettings)> {
    let global = GLOBAL_BUCKET.load(storage)?.settings();
    let user = USER_QUOTA.load(storage)?;
    Ok((global, user))
}

/// Reconfigure the global bucket in place.
pub fn update_global_settings(
    storage: &mut dyn Storage,
    now: u64,
    update: impl FnOnce(&mut QuotaSettings),
) -> StdResult<QuotaSettings> {
    let mut bucket = GLOBAL_BUCKET.load(storage)?;
    let mut settings = bucket.settings();
    update(&mut settings);
    bucket.reconfigure(settings, now);
    GLOBAL_BUCKET.save(storage, &bucket)?;
    Ok(settings)
}

/// Change the per-account settings and reconfigure every stored account
/// bucket at `now`, so time before the change accrues at the old settings.
pub fn update_user_settings(
    storage: &mut dyn Storage,
    now: u64,
    update: impl FnOnce(&mut QuotaSettings),
) -> StdResult<QuotaSettings> {
    let mut settings = USER_QUOTA.load(storage)?;
    update(&mut settings);
    USER_QUOTA.save(storage, &settings)?;

    let buckets = ACCOUNT_BUCKETS
        .range(storage, None, None, Order::Ascending)
        .collect::<StdResult<Vec<_>>>()?;
    for (account, mut bucket) in buckets {
        bucket.reconfigure(settings, now);
        ACCOUNT_BUCKETS.save(storage, &account, &bucket)?;
    }
    Ok(settings)
}

// ============================================================================
// Rate Limiter
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct RateLimiter {
    account: Addr,
    global: QuotaBucket,
    user: QuotaBucket,
}

impl RateLimiter {
    /// Load the buckets that govern `account` at block time `now`.
    pub fn load(storage: &dyn Storage, account: &Addr, now: u64) -> StdResult<Self> {
        let global = GLOBAL_BUCKET.load(storage)?;
        let settings = USER_QUOTA.load(storage)?;
        let user = match ACCOUNT_BUCKETS.may_load(storage, account)? {
            Some(bucket) => bucket,
            None => QuotaBucket::new(settings, now),
        };

        Ok(Self {
            account: account.clone(),
            global,
            user,
        })
    }

    pub fn global(&self) -> &QuotaBucket {
        &self.global
    }

    pub fn user(&self) -> &QuotaBucket {
        &self.user
    }

    /// Largest amount both buckets can cover at `now`.
    pub fn max_consumable(&self, now: u64) -> Uint128 {
        self.global.available(now).min(self.user.available(now))
    }

    /// Consume exactly `amount` from both buckets or fail with `QuotaExceeded`.
    pub fn consume_strict(&mut self, amount: Uint128, now: u64) -> Result<(), ContractError> {
        let max_consumable = self.max_consumable(now);
        if amount > max_consumable {
            return Err(ContractError::QuotaExceeded {
                max_consumable,
                requested: amount,
            });
        }
        self.global.try_consume(amount, now)?;
        self.user.try_consume(amount, now)?;
        Ok(())
    }

    /// Consume up to `amount` from both buckets and return what was consumed.
    pub fn consume_partial(&mut self, amount: Uint128, now: u64) -> Uint128 {
        let actual = amount.min(self.max_consumable(now));
        let global = self.global.consume_up_to(actual, now);
        let user = self.user.consume_up_to(actual, now);
        debug_assert_eq!(global, user);
        actual
    }

    pub fn save(&self, storage: &mut dyn Storage) -> StdResult<()> {
        GLOBAL_BUCKET.save(storage, &self.global)?;
        ACCOUNT_BUCKETS.save(storage, &self.account, &self.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::mock_dependencies;

    fn settings(capacity: u128, regen_rate: u128) -> QuotaSettings {
        QuotaSettings {
            capacity: Uint128::from(capacity),
            regen_rate: Uint128::from(regen_rate),
        }
    }

    #[test]
    fn test_max_consumable_is_min_of_buckets() {
        let cases = [(72u128, 41u128), (16, 24), (120, 12), (8, 9)];
        for (global, user) in cases {
            let mut deps = mock_dependencies();
            init_quotas(deps.as_mut().storage, settings(global, 0), settings(user, 0), 0).unwrap();

            let account = Addr::unchecked("terra1user");
            let mut limiter = RateLimiter::load(deps.as_ref().storage, &account, 0).unwrap();
            let expected = Uint128::from(global.min(user));
            assert_eq!(limiter.max_consumable(0), expected);

            limiter.consume_strict(Uint128::from(5u128), 0).unwrap();
            assert_eq!(limiter.max_consumable(0), expected - Uint128::from(5u128));
        }
    }

    #[test]
    fn test_strict_failure_mutates_nothing() {
        let mut deps = mock_dependencies();
        init_quotas(deps.as_mut().storage, settings(100, 0), settings(50, 0), 0).unwrap();

        let account = Addr::unchecked("terra1user");
        let mut limiter = RateLimiter::load(deps.as_ref().storage, &account, 0).unwrap();
        let before = limiter.clone();

        let err = limiter.consume_strict(Uint128::from(51u128), 0).unwrap_err();
        assert_eq!(
            err,
            ContractError::QuotaExceeded {
                max_consumable: Uint128::from(50u128),
                requested: Uint128::from(51u128),
            }
        );
        assert_eq!(limiter, before);
    }

    #[test]
    fn test_partial_consumption_persists_for_both_buckets() {
        let mut deps = mock_dependencies();
        init_quotas(deps.as_mut().storage, settings(100, 0), settings(100, 0), 0).unwrap();
        let alice = Addr::unchecked("terra1alice");
        let bob = Addr::unchecked("terra1bob");

        for (amount, expected) in [(16u128, 16u128), (41, 41), (80, 43)] {
            let mut limiter = RateLimiter::load(deps.as_ref().storage, &alice, 0).unwrap();
            let actual = limiter.consume_partial(Uint128::from(amount), 0);
            assert_eq!(actual, Uint128::from(expected));
            limiter.save(deps.as_mut().storage).unwrap();
        }

        // Alice drained the global bucket, so Bob gets nothing either
        let limiter = RateLimiter::load(deps.as_ref().storage, &bob, 0).unwrap();
        assert_eq!(limiter.user().available(0), Uint128::from(100u128));
        assert_eq!(limiter.max_consumable(0), Uint128::zero());
    }

    #[test]
    fn test_account_bucket_regenerates() {
        let mut deps = mock_dependencies();
        init_quotas(
            deps.as_mut().storage,
            settings(1_000, 0),
            settings(100, 5),
            0,
        )
        .unwrap();
        let account = Addr::unchecked("terra1user");

        let mut limiter = RateLimiter::load(deps.as_ref().storage, &account, 0).unwrap();
        limiter.consume_strict(Uint128::from(100u128), 0).unwrap();
        limiter.save(deps.as_mut().storage).unwrap();

        let limiter = RateLimiter::load(deps.as_ref().storage, &account, 4).unwrap();
        assert_eq!(limiter.max_consumable(4), Uint128::from(20u128));
    }

    #[test]
    fn test_user_settings_reach_existing_buckets() {
        let mut deps = mock_dependencies();
        init_quotas(deps.as_mut().storage, settings(1_000, 0), settings(100, 0), 0).unwrap();
        let account = Addr::unchecked("terra1user");

        let mut limiter = RateLimiter::load(deps.as_ref().storage, &account, 0).unwrap();
        limiter.consume_strict(Uint128::from(10u128), 0).unwrap();
        limiter.save(deps.as_mut().storage).unwrap();

        update_user_settings(deps.as_mut().storage, 0, |s| {
            s.capacity = Uint128::from(40u128)
        })
        .unwrap();

        let limiter = RateLimiter::load(deps.as_ref().storage, &account, 1).unwrap();
        assert_eq!(limiter.user().capacity, Uint128::from(40u128));
        assert_eq!(limiter.max_consumable(1), Uint128::from(40u128));
    }

    #[test]
    fn test_user_regen_change_accrues_from_change_time() {
        let mut deps = mock_dependencies();
        init_quotas(deps.as_mut().storage, settings(1_000, 0), settings(100, 0), 0).unwrap();
        let account = Addr::unchecked("terra1user");

        let mut limiter = RateLimiter::load(deps.as_ref().storage, &account, 0).unwrap();
        limiter.consume_strict(Uint128::from(100u128), 0).unwrap();
        limiter.save(deps.as_mut().storage).unwrap();

        update_user_settings(deps.as_mut().storage, 10, |s| {
            s.regen_rate = Uint128::from(5u128)
        })
        .unwrap();

        let limiter = RateLimiter::load(deps.as_ref().storage, &account, 20).unwrap();
        assert_eq!(limiter.max_consumable(20), Uint128::from(50u128));
    }

    #[test]
    fn test_user_cap_sticks_through_lower_then_raise() {
        let mut deps = mock_dependencies();
        init_quotas(deps.as_mut().storage, settings(1_000, 0), settings(100, 0), 0).unwrap();
        let account = Addr::unchecked("terra1user");

        let mut limiter = RateLimiter::load(deps.as_ref().storage, &account, 0).unwrap();
        limiter.consume_strict(Uint128::from(10u128), 0).unwrap();
        limiter.save(deps.as_mut().storage).unwrap();

        update_user_settings(deps.as_mut().storage, 0, |s| s.capacity = Uint128::from(30u128))
            .unwrap();
        update_user_settings(deps.as_mut().storage, 0, |s| {
            s.capacity = Uint128::from(200u128)
        })
        .unwrap();

        let limiter = RateLimiter::load(deps.as_ref().storage, &account, 0).unwrap();
        assert_eq!(limiter.user().capacity, Uint128::from(200u128));
        assert_eq!(limiter.max_consumable(0), Uint128::from(30u128));
    }

    #[test]
    fn test_update_global_settings_caps_remaining() {
        let mut deps = mock_dependencies();
        init_quotas(deps.as_mut().storage, settings(100, 0), settings(100, 0), 0).unwrap();

        let updated = update_global_settings(deps.as_mut().storage, 0, |s| {
            s.capacity = Uint128::from(30u128)
        })
        .unwrap();
        assert_eq!(updated, settings(30, 0));

        let (global, user) = load_settings(deps.as_ref().storage).unwrap();
        assert_eq!(global, settings(30, 0));
        assert_eq!(user, settings(100, 0));
        assert_eq!(
            GLOBAL_BUCKET.load(deps.as_ref().storage).unwrap().remaining,
            Uint128::from(30u128)
        );
    }
}
