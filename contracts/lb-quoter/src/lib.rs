#![no_std]

mod error;

pub use error::QuoterError;

use lb_math::compute_swap;
use lb_types::{default_sqrt_price_limit, PoolConfig, PoolState, SwapParams, SwapRange};
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, IntoVal, Symbol};

#[contract]
pub struct LbQuoter;

/// Storage keys
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Factory,
}

/// Parameters for quoting an exact input single swap
#[contracttype]
#[derive(Clone)]
pub struct QuoteExactInputSingleParams {
    pub token_in: Address,
    pub token_out: Address,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub supplier: Address,
    pub block_timestamp_initialize: u64,
    pub amount_in: i128,
    /// 0 selects the widest valid limit
    pub sqrt_price_limit_x96: u128,
}

/// Parameters for quoting an exact output single swap
#[contracttype]
#[derive(Clone)]
pub struct QuoteExactOutputSingleParams {
    pub token_in: Address,
    pub token_out: Address,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub supplier: Address,
    pub block_timestamp_initialize: u64,
    pub amount_out: i128,
    /// 0 selects the widest valid limit
    pub sqrt_price_limit_x96: u128,
}

/// Quote result
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QuoteResult {
    /// Input the pool would pull; may be below the request when an exact input hits the edge
    pub amount_in: i128,
    pub amount_out: i128,
    pub sqrt_price_after_x96: u128,
    pub tick_after: i32,
    /// Whether the swap would end on the finalize edge
    pub finalized: bool,
}

#[contractimpl]
impl LbQuoter {
    /// Initialize quoter with factory address
    pub fn initialize(env: Env, factory: Address) -> Result<(), QuoterError> {
        if env.storage().instance().has(&DataKey::Factory) {
            return Err(QuoterError::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Factory, &factory);
        Ok(())
    }

    /// Quote exact input single swap
    /// Returns the expected amounts without executing the swap
    pub fn quote_exact_input_single(
        env: Env,
        params: QuoteExactInputSingleParams,
    ) -> Result<QuoteResult, QuoterError> {
        if params.amount_in <= 0 {
            return Err(QuoterError::InvalidAmountSpecified);
        }
        let pool = get_pool(
            &env,
            &params.token_in,
            &params.token_out,
            params.tick_lower,
            params.tick_upper,
            &params.supplier,
            params.block_timestamp_initialize,
        )?;
        let zero_for_one = params.token_in < params.token_out;
        simulate_swap(
            &env,
            &pool,
            zero_for_one,
            params.amount_in,
            params.sqrt_price_limit_x96,
        )
    }

    /// Quote exact output single swap
    pub fn quote_exact_output_single(
        env: Env,
        params: QuoteExactOutputSingleParams,
    ) -> Result<QuoteResult, QuoterError> {
        if params.amount_out <= 0 {
            return Err(QuoterError::InvalidAmountSpecified);
        }
        let pool = get_pool(
            &env,
            &params.token_in,
            &params.token_out,
            params.tick_lower,
            params.tick_upper,
            &params.supplier,
            params.block_timestamp_initialize,
        )?;
        let zero_for_one = params.token_in < params.token_out;
        // Negative amount for exact output
        simulate_swap(
            &env,
            &pool,
            zero_for_one,
            -params.amount_out,
            params.sqrt_price_limit_x96,
        )
    }

    /// Get factory address
    pub fn get_factory(env: Env) -> Result<Address, QuoterError> {
        get_factory(&env)
    }
}

fn get_factory(env: &Env) -> Result<Address, QuoterError> {
    env.storage()
        .instance()
        .get(&DataKey::Factory)
        .ok_or(QuoterError::NotInitialized)
}

fn get_pool(
    env: &Env,
    token_a: &Address,
    token_b: &Address,
    tick_lower: i32,
    tick_upper: i32,
    supplier: &Address,
    block_timestamp_initialize: u64,
) -> Result<Address, QuoterError> {
    let factory = get_factory(env)?;
    let pool: Option<Address> = env.invoke_contract(
        &factory,
        &Symbol::new(env, "get_pool"),
        (
            token_a,
            token_b,
            tick_lower,
            tick_upper,
            supplier,
            block_timestamp_initialize,
        )
            .into_val(env),
    );
    pool.ok_or(QuoterError::PoolNotFound)
}

fn get_pool_state(env: &Env, pool: &Address) -> PoolState {
    env.invoke_contract(pool, &Symbol::new(env, "state"), ().into_val(env))
}

fn get_pool_config(env: &Env, pool: &Address) -> PoolConfig {
    env.invoke_contract(pool, &Symbol::new(env, "config"), ().into_val(env))
}

/// Run the pool's own swap computation against its current state
fn simulate_swap(
    env: &Env,
    pool: &Address,
    zero_for_one: bool,
    amount_specified: i128,
    sqrt_price_limit_x96: u128,
) -> Result<QuoteResult, QuoterError> {
    let state = get_pool_state(env, pool);
    if !state.is_initialized() {
        return Err(QuoterError::PoolNotInitialized);
    }
    if state.finalized {
        return Err(QuoterError::PoolFinalized);
    }
    let config = get_pool_config(env, pool);

    let sqrt_price_limit_x96 = if sqrt_price_limit_x96 == 0 {
        default_sqrt_price_limit(zero_for_one)
    } else {
        sqrt_price_limit_x96
    };

    let params = SwapParams {
        zero_for_one,
        amount_specified,
        sqrt_price_limit_x96,
    };
    let range = SwapRange {
        liquidity: state.liquidity,
        sqrt_price_x96: state.sqrt_price_x96,
        sqrt_price_lower_x96: config.sqrt_price_lower_x96,
        sqrt_price_upper_x96: config.sqrt_price_upper_x96,
        sqrt_price_finalize_x96: state.sqrt_price_finalize_x96,
    };
    let result = compute_swap(env, &params, &range)?;

    let (amount_in, amount_out) = if zero_for_one {
        (result.amount0, -result.amount1)
    } else {
        (result.amount1, -result.amount0)
    };

    Ok(QuoteResult {
        amount_in,
        amount_out,
        sqrt_price_after_x96: result.sqrt_price_x96,
        tick_after: result.tick,
        finalized: result.finalized,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lb_pool::testutils::PoolTest;
    use soroban_sdk::testutils::Address as _;

    struct QuoterTest<'a> {
        pool: PoolTest<'a>,
        quoter: LbQuoterClient<'a>,
    }

    impl<'a> QuoterTest<'a> {
        fn new(env: &'a Env) -> Self {
            let pool = PoolTest::new(env);
            let quoter_id = env.register(LbQuoter, ());
            let quoter = LbQuoterClient::new(env, &quoter_id);
            quoter.initialize(&pool.factory.address);
            QuoterTest { pool, quoter }
        }

        fn exact_input(&self, zero_for_one: bool, amount_in: i128) -> QuoteExactInputSingleParams {
            let config = self.pool.pool.config();
            let (token_in, token_out) = if zero_for_one {
                (config.token0, config.token1)
            } else {
                (config.token1, config.token0)
            };
            QuoteExactInputSingleParams {
                token_in,
                token_out,
                tick_lower: config.tick_lower,
                tick_upper: config.tick_upper,
                supplier: config.supplier,
                block_timestamp_initialize: config.block_timestamp_initialize,
                amount_in,
                sqrt_price_limit_x96: 0,
            }
        }

        fn exact_output(
            &self,
            zero_for_one: bool,
            amount_out: i128,
        ) -> QuoteExactOutputSingleParams {
            let p = self.exact_input(zero_for_one, 0);
            QuoteExactOutputSingleParams {
                token_in: p.token_in,
                token_out: p.token_out,
                tick_lower: p.tick_lower,
                tick_upper: p.tick_upper,
                supplier: p.supplier,
                block_timestamp_initialize: p.block_timestamp_initialize,
                amount_out,
                sqrt_price_limit_x96: 0,
            }
        }
    }

    #[test]
    fn test_quote_exact_input_matches_swap() {
        let env = Env::default();
        let t = QuoterTest::new(&env);
        t.pool.initialize_at_lower();

        let quote = t
            .quoter
            .quote_exact_input_single(&t.exact_input(false, 1_000_000_000_000_000_000));

        let (amount0, amount1) = t.pool.pool.swap(
            &t.pool.trader,
            &t.pool.trader,
            &false,
            &1_000_000_000_000_000_000,
            &default_sqrt_price_limit(false),
        );
        assert_eq!(quote.amount_in, amount1);
        assert_eq!(quote.amount_out, -amount0);
        assert_eq!(quote.sqrt_price_after_x96, t.pool.pool.sqrt_price_x96());
        assert_eq!(quote.tick_after, t.pool.pool.tick());
        assert!(!quote.finalized);
    }

    #[test]
    fn test_quote_exact_output_matches_swap() {
        let env = Env::default();
        let t = QuoterTest::new(&env);
        t.pool.initialize_at_upper();

        let quote = t
            .quoter
            .quote_exact_output_single(&t.exact_output(true, 5_000_000_000_000_000_000));

        let (amount0, amount1) = t.pool.pool.swap(
            &t.pool.trader,
            &t.pool.trader,
            &true,
            &-5_000_000_000_000_000_000,
            &default_sqrt_price_limit(true),
        );
        assert_eq!(quote.amount_in, amount0);
        assert_eq!(quote.amount_out, -amount1);
        assert_eq!(quote.sqrt_price_after_x96, t.pool.pool.sqrt_price_x96());
        assert_eq!(quote.tick_after, t.pool.pool.tick());
    }

    #[test]
    fn test_quote_reports_edge_fill() {
        let env = Env::default();
        let t = QuoterTest::new(&env);
        let (_, reserve0, _) = t.pool.initialize_at_lower();

        let quote = t
            .quoter
            .quote_exact_input_single(&t.exact_input(false, 100_000_000_000_000_000_000_000));

        assert!(quote.finalized);
        assert_eq!(quote.amount_out, reserve0);
        assert!(quote.amount_in < 100_000_000_000_000_000_000_000);
        assert_eq!(
            quote.sqrt_price_after_x96,
            t.pool.pool.config().sqrt_price_upper_x96
        );
        // Quoting does not move the pool
        assert_eq!(
            t.pool.pool.sqrt_price_x96(),
            t.pool.pool.config().sqrt_price_lower_x96
        );
    }

    #[test]
    fn test_quote_errors() {
        let env = Env::default();
        let t = QuoterTest::new(&env);

        let result = t
            .quoter
            .try_quote_exact_input_single(&t.exact_input(false, 1_000));
        assert_eq!(result, Err(Ok(QuoterError::PoolNotInitialized)));

        let (_, reserve0, _) = t.pool.initialize_at_lower();

        // A limit must sit strictly below the current price when selling token0
        let mut params = t.exact_input(true, 1_000);
        params.sqrt_price_limit_x96 = t.pool.pool.sqrt_price_x96();
        let result = t.quoter.try_quote_exact_input_single(&params);
        assert_eq!(result, Err(Ok(QuoterError::InvalidSqrtPriceLimitX96)));

        let result = t
            .quoter
            .try_quote_exact_input_single(&t.exact_input(false, 0));
        assert_eq!(result, Err(Ok(QuoterError::InvalidAmountSpecified)));

        let result = t
            .quoter
            .try_quote_exact_output_single(&t.exact_output(false, reserve0 + 1));
        assert_eq!(result, Err(Ok(QuoterError::InvalidSqrtPriceX96)));

        let mut params = t.exact_input(false, 1_000);
        params.supplier = Address::generate(&env);
        let result = t.quoter.try_quote_exact_input_single(&params);
        assert_eq!(result, Err(Ok(QuoterError::PoolNotFound)));
    }

    #[test]
    fn test_quote_rejects_non_positive_amounts() {
        let env = Env::default();
        let t = QuoterTest::new(&env);
        t.pool.initialize_at_lower();

        for amount in [0, -1_000, i128::MIN] {
            let result = t
                .quoter
                .try_quote_exact_output_single(&t.exact_output(false, amount));
            assert_eq!(result, Err(Ok(QuoterError::InvalidAmountSpecified)));

            let result = t
                .quoter
                .try_quote_exact_input_single(&t.exact_input(false, amount));
            assert_eq!(result, Err(Ok(QuoterError::InvalidAmountSpecified)));
        }
    }

    #[test]
    fn test_quote_finalized_pool_fails() {
        let env = Env::default();
        let t = QuoterTest::new(&env);
        t.pool.initialize_at_lower();
        t.pool.pool.swap(
            &t.pool.trader,
            &t.pool.trader,
            &false,
            &100_000_000_000_000_000_000_000,
            &default_sqrt_price_limit(false),
        );

        let result = t
            .quoter
            .try_quote_exact_input_single(&t.exact_input(true, 1_000));
        assert_eq!(result, Err(Ok(QuoterError::PoolFinalized)));
    }

    #[test]
    fn test_initialize_twice_fails() {
        let env = Env::default();
        let t = QuoterTest::new(&env);
        let result = t.quoter.try_initialize(&t.pool.factory.address);
        assert_eq!(result, Err(Ok(QuoterError::AlreadyInitialized)));
    }
}
