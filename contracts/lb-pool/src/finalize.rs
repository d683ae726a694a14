use crate::storage::{get_config, get_state, set_state};
use crate::{events, oracle, settle, shares, PoolError};
use lb_math::{range_fees, to_amounts, to_i128};
use lb_types::MINIMUM_DURATION;
use soroban_sdk::{log, Address, Bytes, Env, IntoVal, Symbol};

/// Release the range reserves
///
/// Allowed once the price has reached the finalize edge, or after
/// `MINIMUM_DURATION` has passed since `block_timestamp_initialize`. The
/// protocol share goes to the factory, the rest to `recipient`.
pub fn finalize(
    env: &Env,
    sender: Address,
    recipient: Address,
    notify_data: Option<Bytes>,
) -> Result<(u128, u128, i128, i128), PoolError> {
    sender.require_auth();

    let config = get_config(env);
    if sender != config.supplier {
        return Err(PoolError::Unauthorized);
    }

    let mut state = get_state(env);
    if !state.is_initialized() {
        return Err(PoolError::NotInitialized);
    }

    let pool = env.current_contract_address();
    let supply = shares::total_supply(env);
    if supply == 0 {
        return Err(PoolError::SupplyLessThanMin);
    }

    let now = env.ledger().timestamp();
    if !state.finalized {
        let deadline = config
            .block_timestamp_initialize
            .saturating_add(MINIMUM_DURATION);
        if now < deadline {
            return Err(PoolError::NotFinalized);
        }
    }

    oracle::advance(&mut state, now)?;

    let (amount0, amount1) = to_amounts(
        env,
        state.liquidity,
        state.sqrt_price_x96,
        config.sqrt_price_lower_x96,
        config.sqrt_price_upper_x96,
    )?;
    let amount0 = to_i128(amount0)?;
    let amount1 = to_i128(amount1)?;
    let (fees0, fees1) = range_fees(amount0, amount1, state.fee_protocol)?;

    let liquidity_delta = state.liquidity;
    state.liquidity = 0;
    state.finalized = true;
    set_state(env, &state);

    shares::burn(env, &pool, shares::balance(env, &pool))?;

    settle::pay(env, &config.token0, &config.factory, fees0);
    settle::pay(env, &config.token1, &config.factory, fees1);
    settle::pay(env, &config.token0, &recipient, amount0 - fees0);
    settle::pay(env, &config.token1, &recipient, amount1 - fees1);

    if let Some(data) = notify_data {
        notify(env, &recipient, amount0 - fees0, amount1 - fees1, data);
    }

    log!(env, "finalize", liquidity_delta, amount0, amount1, fees0, fees1);
    events::emit_finalize(env, liquidity_delta, state.sqrt_price_x96, amount0, amount1);

    Ok((liquidity_delta, state.sqrt_price_x96, amount0, amount1))
}

/// Tell the liquidity receiver what it was paid
fn notify(env: &Env, receiver: &Address, amount0: i128, amount1: i128, data: Bytes) {
    let args = (amount0, amount1, data).into_val(env);
    env.invoke_contract::<()>(receiver, &Symbol::new(env, "lb_finalize_notify"), args);
}
