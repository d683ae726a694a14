#![no_std]

use lb_types::default_sqrt_price_limit;
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, IntoVal, Symbol};

#[contract]
pub struct LbRouter;

/// Storage keys
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Factory,
}

/// Parameters for exact input single swap
#[contracttype]
#[derive(Clone)]
pub struct ExactInputSingleParams {
    pub token_in: Address,
    pub token_out: Address,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub supplier: Address,
    pub block_timestamp_initialize: u64,
    /// Pays `amount_in`
    pub sender: Address,
    pub recipient: Address,
    pub deadline: u64,
    pub amount_in: i128,
    pub amount_out_minimum: i128,
    /// 0 selects the widest valid limit
    pub sqrt_price_limit_x96: u128,
}

/// Parameters for exact output single swap
#[contracttype]
#[derive(Clone)]
pub struct ExactOutputSingleParams {
    pub token_in: Address,
    pub token_out: Address,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub supplier: Address,
    pub block_timestamp_initialize: u64,
    /// Pays the input amount
    pub sender: Address,
    pub recipient: Address,
    pub deadline: u64,
    pub amount_out: i128,
    pub amount_in_maximum: i128,
    /// 0 selects the widest valid limit
    pub sqrt_price_limit_x96: u128,
}

/// Identifies a pool through the factory registry
struct PoolRef<'a> {
    token_in: &'a Address,
    token_out: &'a Address,
    tick_lower: i32,
    tick_upper: i32,
    supplier: &'a Address,
    block_timestamp_initialize: u64,
}

#[contractimpl]
impl LbRouter {
    /// Initialize router with factory address
    pub fn initialize(env: Env, factory: Address) {
        if env.storage().instance().has(&DataKey::Factory) {
            panic!("Already initialized");
        }
        env.storage().instance().set(&DataKey::Factory, &factory);
    }

    /// Swap exact input amount for maximum output (single pool)
    ///
    /// An exact input stops at the range edge, so the pool may take less
    /// than `amount_in`; only the output is checked.
    pub fn exact_input_single(env: Env, params: ExactInputSingleParams) -> i128 {
        params.sender.require_auth();
        check_deadline(&env, params.deadline);
        check_amount(params.amount_in);

        let pool = get_pool(
            &env,
            PoolRef {
                token_in: &params.token_in,
                token_out: &params.token_out,
                tick_lower: params.tick_lower,
                tick_upper: params.tick_upper,
                supplier: &params.supplier,
                block_timestamp_initialize: params.block_timestamp_initialize,
            },
        );

        let zero_for_one = params.token_in < params.token_out;
        let (amount0, amount1) = invoke_swap(
            &env,
            &pool,
            &params.sender,
            &params.recipient,
            zero_for_one,
            params.amount_in,
            sqrt_price_limit(zero_for_one, params.sqrt_price_limit_x96),
        );

        let amount_out = if zero_for_one { -amount1 } else { -amount0 };
        if amount_out < params.amount_out_minimum {
            panic!("Too little received");
        }

        amount_out
    }

    /// Swap minimum input for exact output (single pool)
    pub fn exact_output_single(env: Env, params: ExactOutputSingleParams) -> i128 {
        params.sender.require_auth();
        check_deadline(&env, params.deadline);
        check_amount(params.amount_out);

        let pool = get_pool(
            &env,
            PoolRef {
                token_in: &params.token_in,
                token_out: &params.token_out,
                tick_lower: params.tick_lower,
                tick_upper: params.tick_upper,
                supplier: &params.supplier,
                block_timestamp_initialize: params.block_timestamp_initialize,
            },
        );

        let zero_for_one = params.token_in < params.token_out;
        // Negative for exact output
        let (amount0, amount1) = invoke_swap(
            &env,
            &pool,
            &params.sender,
            &params.recipient,
            zero_for_one,
            -params.amount_out,
            sqrt_price_limit(zero_for_one, params.sqrt_price_limit_x96),
        );

        let amount_in = if zero_for_one { amount0 } else { amount1 };
        if amount_in > params.amount_in_maximum {
            panic!("Too much requested");
        }

        amount_in
    }

    /// Get factory address
    pub fn get_factory(env: Env) -> Address {
        get_factory(&env)
    }
}

/// Exact amounts are positive; the sign is chosen here, not by the caller
fn check_amount(amount: i128) {
    if amount <= 0 {
        panic!("Invalid amount");
    }
}

fn get_factory(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Factory)
        .unwrap_or_else(|| panic!("Not initialized"))
}

fn check_deadline(env: &Env, deadline: u64) {
    if env.ledger().timestamp() > deadline {
        panic!("Transaction too old");
    }
}

fn sqrt_price_limit(zero_for_one: bool, sqrt_price_limit_x96: u128) -> u128 {
    if sqrt_price_limit_x96 == 0 {
        default_sqrt_price_limit(zero_for_one)
    } else {
        sqrt_price_limit_x96
    }
}

fn get_pool(env: &Env, pool: PoolRef) -> Address {
    let factory = get_factory(env);
    let found: Option<Address> = env.invoke_contract(
        &factory,
        &Symbol::new(env, "get_pool"),
        (
            pool.token_in,
            pool.token_out,
            pool.tick_lower,
            pool.tick_upper,
            pool.supplier,
            pool.block_timestamp_initialize,
        )
            .into_val(env),
    );
    found.unwrap_or_else(|| panic!("Pool not found"))
}

fn invoke_swap(
    env: &Env,
    pool: &Address,
    sender: &Address,
    recipient: &Address,
    zero_for_one: bool,
    amount_specified: i128,
    sqrt_price_limit_x96: u128,
) -> (i128, i128) {
    env.invoke_contract(
        pool,
        &Symbol::new(env, "swap"),
        (
            sender,
            recipient,
            zero_for_one,
            amount_specified,
            sqrt_price_limit_x96,
        )
            .into_val(env),
    )
}
