#![no_std]

mod error;
mod events;
mod finalize;
mod initialize;
#[cfg(test)]
mod invariants;
mod oracle;
mod settle;
mod shares;
mod storage;
mod swap;
#[cfg(any(test, feature = "testutils"))]
pub mod testutils;

pub use error::PoolError;

use lb_math::get_sqrt_ratio_at_tick;
use lb_types::{PoolConfig, PoolState, MAX_TICK, MIN_TICK};
use soroban_sdk::{contract, contractimpl, log, panic_with_error, Address, Bytes, Env};
use storage::{get_config, get_state, set_config, set_state};

#[contract]
pub struct LbPool;

#[contractimpl]
impl LbPool {
    /// Deploy a pool over [tick_lower, tick_upper]
    ///
    /// The pool is uninitialized until the supplier calls `initialize`.
    pub fn __constructor(
        env: Env,
        factory: Address,
        token0: Address,
        token1: Address,
        tick_lower: i32,
        tick_upper: i32,
        supplier: Address,
        block_timestamp_initialize: u64,
    ) {
        if token0 >= token1 {
            panic_with_error!(&env, PoolError::InvalidTokens);
        }

        if tick_lower >= tick_upper || tick_lower < MIN_TICK || tick_upper > MAX_TICK {
            panic_with_error!(&env, PoolError::InvalidTicks);
        }

        if block_timestamp_initialize < env.ledger().timestamp() {
            panic_with_error!(&env, PoolError::InvalidBlockTimestamp);
        }

        let sqrt_price_lower_x96 = get_sqrt_ratio_at_tick(&env, tick_lower)
            .unwrap_or_else(|_| panic_with_error!(&env, PoolError::InvalidTicks));
        let sqrt_price_upper_x96 = get_sqrt_ratio_at_tick(&env, tick_upper)
            .unwrap_or_else(|_| panic_with_error!(&env, PoolError::InvalidTicks));

        let config = PoolConfig {
            factory,
            token0,
            token1,
            tick_lower,
            tick_upper,
            sqrt_price_lower_x96,
            sqrt_price_upper_x96,
            supplier,
            block_timestamp_initialize,
        };
        set_config(&env, &config);
        set_state(&env, &PoolState::default());

        log!(&env, "pool created", tick_lower, tick_upper);
    }

    /// Seed the range at one of its edges
    ///
    /// # Arguments
    /// * `sender` - Must be the supplier; pays the reserves
    /// * `liquidity_delta` - Liquidity to back the range
    /// * `sqrt_price_x96` - Either the lower or the upper edge price
    ///
    /// # Returns
    /// (shares, amount0, amount1) - Shares minted to the pool and reserves pulled
    pub fn initialize(
        env: Env,
        sender: Address,
        liquidity_delta: u128,
        sqrt_price_x96: u128,
    ) -> Result<(u128, i128, i128), PoolError> {
        initialize::initialize(&env, sender, liquidity_delta, sqrt_price_x96)
    }

    /// Execute a swap
    ///
    /// # Arguments
    /// * `sender` - Pays the input asset
    /// * `recipient` - Address to receive output tokens
    /// * `zero_for_one` - True if swapping token0 for token1
    /// * `amount_specified` - Positive for exact input, negative for exact output
    /// * `sqrt_price_limit_x96` - Price limit for the swap
    ///
    /// # Returns
    /// (amount0, amount1) - Negative values are amounts paid out
    pub fn swap(
        env: Env,
        sender: Address,
        recipient: Address,
        zero_for_one: bool,
        amount_specified: i128,
        sqrt_price_limit_x96: u128,
    ) -> Result<(i128, i128), PoolError> {
        swap::execute_swap(
            &env,
            sender,
            recipient,
            zero_for_one,
            amount_specified,
            sqrt_price_limit_x96,
        )
    }

    /// Pay out the reserves and close the pool
    ///
    /// When `notify_data` is set, `recipient` must be a contract exposing
    /// `lb_finalize_notify(amount0, amount1, data)`.
    ///
    /// # Returns
    /// (liquidity_delta, sqrt_price_x96, amount0, amount1) - Amounts include protocol fees
    pub fn finalize(
        env: Env,
        sender: Address,
        recipient: Address,
        notify_data: Option<Bytes>,
    ) -> Result<(u128, u128, i128, i128), PoolError> {
        finalize::finalize(&env, sender, recipient, notify_data)
    }

    /// Move pool shares between holders
    pub fn transfer(env: Env, from: Address, to: Address, amount: u128) -> Result<(), PoolError> {
        from.require_auth();
        shares::transfer(&env, &from, &to, amount)
    }

    // === View Functions ===

    /// Get current pool state
    pub fn state(env: Env) -> PoolState {
        get_state(&env)
    }

    /// Get pool configuration
    pub fn config(env: Env) -> PoolConfig {
        get_config(&env)
    }

    /// Get current sqrt price
    pub fn sqrt_price_x96(env: Env) -> u128 {
        get_state(&env).sqrt_price_x96
    }

    /// Get current tick
    pub fn tick(env: Env) -> i32 {
        get_state(&env).tick
    }

    /// Get current liquidity
    pub fn liquidity(env: Env) -> u128 {
        get_state(&env).liquidity
    }

    pub fn finalized(env: Env) -> bool {
        get_state(&env).finalized
    }

    /// Get token0 address
    pub fn token0(env: Env) -> Address {
        get_config(&env).token0
    }

    /// Get token1 address
    pub fn token1(env: Env) -> Address {
        get_config(&env).token1
    }

    pub fn factory(env: Env) -> Address {
        get_config(&env).factory
    }

    pub fn supplier(env: Env) -> Address {
        get_config(&env).supplier
    }

    /// Total shares outstanding
    pub fn total_supply(env: Env) -> u128 {
        shares::total_supply(&env)
    }

    /// Shares held by `id`
    pub fn balance(env: Env, id: Address) -> u128 {
        shares::balance(&env, &id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::{PoolTest, TICK_LOWER, TICK_UPPER};
    use soroban_sdk::testutils::{Address as _, Ledger};
    use soroban_sdk::Address;

    fn sorted_tokens(env: &Env) -> (Address, Address) {
        let a = Address::generate(env);
        let b = Address::generate(env);
        if a < b {
            (a, b)
        } else {
            (b, a)
        }
    }

    #[test]
    fn test_constructor_sets_config() {
        let env = Env::default();
        let t = PoolTest::new(&env);

        let config = t.pool.config();
        assert_eq!(config.tick_lower, TICK_LOWER);
        assert_eq!(config.tick_upper, TICK_UPPER);
        assert_eq!(config.sqrt_price_lower_x96, 1405554789141674157946772620652924);
        assert_eq!(config.sqrt_price_upper_x96, 1716731329948153579533136957103548);
        assert_eq!(t.pool.factory(), t.factory.address);
        assert_eq!(t.pool.supplier(), t.supplier);
        assert_eq!(t.pool.token0(), t.token0.address);
        assert_eq!(t.pool.token1(), t.token1.address);

        // Uninitialized
        assert_eq!(t.pool.state(), PoolState::default());
        assert_eq!(t.pool.sqrt_price_x96(), 0);
        assert_eq!(t.pool.liquidity(), 0);
        assert!(!t.pool.finalized());
        assert_eq!(t.pool.total_supply(), 0);
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #100)")]
    fn test_constructor_unsorted_tokens_fails() {
        let env = Env::default();
        let (t0, t1) = sorted_tokens(&env);
        let factory = Address::generate(&env);
        let supplier = Address::generate(&env);
        env.register(LbPool, (factory, t1, t0, -100i32, 100i32, supplier, 0u64));
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #100)")]
    fn test_constructor_identical_tokens_fails() {
        let env = Env::default();
        let (t0, _) = sorted_tokens(&env);
        let factory = Address::generate(&env);
        let supplier = Address::generate(&env);
        env.register(
            LbPool,
            (factory, t0.clone(), t0, -100i32, 100i32, supplier, 0u64),
        );
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #101)")]
    fn test_constructor_inverted_ticks_fails() {
        let env = Env::default();
        let (t0, t1) = sorted_tokens(&env);
        let factory = Address::generate(&env);
        let supplier = Address::generate(&env);
        env.register(LbPool, (factory, t0, t1, 100i32, 100i32, supplier, 0u64));
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #101)")]
    fn test_constructor_tick_out_of_bounds_fails() {
        let env = Env::default();
        let (t0, t1) = sorted_tokens(&env);
        let factory = Address::generate(&env);
        let supplier = Address::generate(&env);
        env.register(
            LbPool,
            (factory, t0, t1, MIN_TICK - 1, 0i32, supplier, 0u64),
        );
    }

    #[test]
    #[should_panic(expected = "Error(Contract, #102)")]
    fn test_constructor_stale_initialize_timestamp_fails() {
        let env = Env::default();
        env.ledger().set_timestamp(1_000);
        let (t0, t1) = sorted_tokens(&env);
        let factory = Address::generate(&env);
        let supplier = Address::generate(&env);
        env.register(LbPool, (factory, t0, t1, -100i32, 100i32, supplier, 999u64));
    }

    #[test]
    fn test_constructor_accepts_full_tick_domain() {
        let env = Env::default();
        let (t0, t1) = sorted_tokens(&env);
        let factory = Address::generate(&env);
        let supplier = Address::generate(&env);
        let id = env.register(
            LbPool,
            (factory, t0, t1, MIN_TICK, MAX_TICK, supplier, 0u64),
        );
        let config = LbPoolClient::new(&env, &id).config();
        assert_eq!(config.sqrt_price_lower_x96, lb_types::MIN_SQRT_RATIO);
        assert_eq!(config.sqrt_price_upper_x96, lb_types::MAX_SQRT_RATIO);
    }

    #[test]
    fn test_share_transfer() {
        let env = Env::default();
        let t = PoolTest::new(&env);
        let (shares_minted, _, _) = t.initialize_at_lower();
        let holder = Address::generate(&env);
        let other = Address::generate(&env);

        env.as_contract(&t.pool.address, || {
            shares::mint(&env, &holder, 1_000).unwrap();
        });

        t.pool.transfer(&holder, &other, &400);
        assert_eq!(t.pool.balance(&holder), 600);
        assert_eq!(t.pool.balance(&other), 400);
        assert_eq!(t.pool.balance(&t.pool.address), shares_minted);
        assert_eq!(t.pool.total_supply(), shares_minted + 1_000);

        let result = t.pool.try_transfer(&other, &holder, &401);
        assert_eq!(result, Err(Ok(PoolError::BalanceLessThanAmount)));
    }
}
