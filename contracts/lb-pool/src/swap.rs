use crate::storage::{get_config, get_state, set_state};
use crate::{events, oracle, settle, PoolError};
use lb_math::compute_swap;
use lb_types::{SwapParams, SwapRange};
use soroban_sdk::{log, Address, Env};

/// Execute a swap against the range
///
/// The output asset is pushed to `recipient` after the new price is written,
/// then the input asset is pulled from `sender`. Exact input is filled up to
/// the range edge at most; exact output is all or nothing.
pub fn execute_swap(
    env: &Env,
    sender: Address,
    recipient: Address,
    zero_for_one: bool,
    amount_specified: i128,
    sqrt_price_limit_x96: u128,
) -> Result<(i128, i128), PoolError> {
    sender.require_auth();

    let config = get_config(env);
    let mut state = get_state(env);

    if !state.is_initialized() {
        return Err(PoolError::NotInitialized);
    }
    if state.finalized {
        return Err(PoolError::Finalized);
    }

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

    // Oracle sees the tick that was in force for the elapsed period
    oracle::advance(&mut state, env.ledger().timestamp())?;

    state.sqrt_price_x96 = result.sqrt_price_x96;
    state.tick = result.tick;
    if result.finalized {
        state.finalized = true;
    }
    set_state(env, &state);

    if result.finalized {
        log!(env, "finalize edge reached", result.sqrt_price_x96);
    }

    // Output first, then input
    if zero_for_one {
        settle::pay(env, &config.token1, &recipient, -result.amount1);
        settle::collect(
            env,
            &config.token0,
            &sender,
            result.amount0,
            PoolError::Amount0LessThanMin,
        )?;
    } else {
        settle::pay(env, &config.token0, &recipient, -result.amount0);
        settle::collect(
            env,
            &config.token1,
            &sender,
            result.amount1,
            PoolError::Amount1LessThanMin,
        )?;
    }

    events::emit_swap(
        env,
        &sender,
        &recipient,
        result.amount0,
        result.amount1,
        state.sqrt_price_x96,
        state.liquidity,
        state.tick,
        state.finalized,
    );

    Ok((result.amount0, result.amount1))
}
