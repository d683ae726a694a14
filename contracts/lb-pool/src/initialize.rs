use crate::storage::{get_config, get_state, set_state};
use crate::{events, settle, shares, PoolError};
use lb_math::{to_amounts, to_i128};
use lb_types::{PoolState, MINIMUM_LIQUIDITY};
use soroban_sdk::{log, Address, Env, IntoVal, Symbol};

/// Seed the range with `liquidity_delta` at one of its edges
///
/// The supplier delivers the one-sided reserves for that edge; shares are
/// minted to the pool itself.
pub fn initialize(
    env: &Env,
    sender: Address,
    liquidity_delta: u128,
    sqrt_price_x96: u128,
) -> Result<(u128, i128, i128), PoolError> {
    sender.require_auth();

    let config = get_config(env);
    if sender != config.supplier {
        return Err(PoolError::Unauthorized);
    }

    let state = get_state(env);
    if state.is_initialized() {
        return Err(PoolError::Initialized);
    }

    let now = env.ledger().timestamp();
    if now < config.block_timestamp_initialize {
        return Err(PoolError::BlockTimestampLessThanInitialize);
    }

    if liquidity_delta < MINIMUM_LIQUIDITY {
        return Err(PoolError::LiquidityLessThanMin);
    }

    // Seed at an edge; the opposite edge is where the pool finalizes
    let (tick, sqrt_price_finalize_x96) = if sqrt_price_x96 == config.sqrt_price_lower_x96 {
        (config.tick_lower, config.sqrt_price_upper_x96)
    } else if sqrt_price_x96 == config.sqrt_price_upper_x96 {
        (config.tick_upper, config.sqrt_price_lower_x96)
    } else {
        return Err(PoolError::InvalidSqrtPriceX96);
    };

    let fee_protocol = factory_fee_protocol(env, &config.factory);

    let (amount0, amount1) = to_amounts(
        env,
        liquidity_delta,
        sqrt_price_x96,
        config.sqrt_price_lower_x96,
        config.sqrt_price_upper_x96,
    )?;
    let amount0 = to_i128(amount0)?;
    let amount1 = to_i128(amount1)?;

    let state = PoolState {
        liquidity: liquidity_delta,
        sqrt_price_x96,
        sqrt_price_initialize_x96: sqrt_price_x96,
        sqrt_price_finalize_x96,
        tick,
        total_positions: state.total_positions + 1,
        block_timestamp: now,
        tick_cumulative: 0,
        fee_protocol,
        finalized: false,
    };
    set_state(env, &state);

    shares::mint(env, &env.current_contract_address(), liquidity_delta)?;

    settle::collect(env, &config.token0, &sender, amount0, PoolError::Amount0LessThanMin)?;
    settle::collect(env, &config.token1, &sender, amount1, PoolError::Amount1LessThanMin)?;

    log!(env, "initialize", liquidity_delta, amount0, amount1);
    events::emit_initialize(env, liquidity_delta, sqrt_price_x96, tick);

    Ok((liquidity_delta, amount0, amount1))
}

/// Protocol fee currently configured on the factory
fn factory_fee_protocol(env: &Env, factory: &Address) -> u32 {
    env.invoke_contract(factory, &Symbol::new(env, "fee_protocol"), ().into_val(env))
}
