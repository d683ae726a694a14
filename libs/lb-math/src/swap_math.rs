use crate::range_math::check_sqrt_price_in_range;
use crate::sqrt_price_math::{
    get_next_sqrt_price_from_input, liquidity_x96, sqrt_price_x96_next_swap, virtual_reserve0,
};
use crate::{
    get_tick_at_sqrt_ratio, mul_div, mul_div_rounding_up, to_i128, u128_from_u256, MathError,
};
use lb_types::{SwapComputation, SwapParams, SwapRange, MAX_SQRT_RATIO, MIN_SQRT_RATIO, Q96};
use soroban_sdk::Env;

/// Signed token amounts exchanged moving the pool from `sqrt_price_start_x96`
/// to `sqrt_price_end_x96` at constant liquidity. Positive flows into the pool.
///
/// amount0 is the difference of the floored virtual reserves L * 2^96 / sqrt_price,
/// so it tracks the range reserves exactly. amount1 rounds up when paid in and
/// down when paid out.
pub fn swap_amounts(
    env: &Env,
    liquidity: u128,
    sqrt_price_start_x96: u128,
    sqrt_price_end_x96: u128,
) -> Result<(i128, i128), MathError> {
    if sqrt_price_start_x96 == 0 || sqrt_price_end_x96 == 0 {
        return Err(MathError::InvalidSqrtPriceX96);
    }

    let numerator = liquidity_x96(env, liquidity);
    let reserve0_start = virtual_reserve0(env, &numerator, sqrt_price_start_x96);
    let reserve0_end = virtual_reserve0(env, &numerator, sqrt_price_end_x96);

    let amount0 = if sqrt_price_end_x96 <= sqrt_price_start_x96 {
        to_i128(u128_from_u256(&reserve0_end.sub(&reserve0_start))?)?
    } else {
        -to_i128(u128_from_u256(&reserve0_start.sub(&reserve0_end))?)?
    };

    // Token1 owed to the pool rounds up so sub-wei dust stays with the pool;
    // flooring both sides lets repeated swaps drain the range below its reserves.
    let amount1 = if sqrt_price_end_x96 >= sqrt_price_start_x96 {
        let delta = sqrt_price_end_x96 - sqrt_price_start_x96;
        to_i128(mul_div_rounding_up(env, liquidity, delta, Q96)?)?
    } else {
        let delta = sqrt_price_start_x96 - sqrt_price_end_x96;
        -to_i128(mul_div(env, liquidity, delta, Q96)?)?
    };

    Ok((amount0, amount1))
}

/// Pure swap against a single range: validation, price step, edge clamp,
/// limit check and amounts. No storage is touched; the pool executes the
/// result and the quoter reports it.
pub fn compute_swap(
    env: &Env,
    params: &SwapParams,
    range: &SwapRange,
) -> Result<SwapComputation, MathError> {
    let zero_for_one = params.zero_for_one;
    let limit = params.sqrt_price_limit_x96;
    let sqrt_price_x96 = range.sqrt_price_x96;

    if params.amount_specified == 0 {
        return Err(MathError::InvalidAmountSpecified);
    }

    if zero_for_one {
        if limit >= sqrt_price_x96 || limit <= MIN_SQRT_RATIO {
            return Err(MathError::InvalidSqrtPriceLimitX96);
        }
    } else if limit <= sqrt_price_x96 || limit >= MAX_SQRT_RATIO {
        return Err(MathError::InvalidSqrtPriceLimitX96);
    }

    let sqrt_price_next_x96 = if params.amount_specified > 0 {
        exact_input_target(env, range, zero_for_one, params.amount_specified)?
    } else {
        let next = sqrt_price_x96_next_swap(
            env,
            range.liquidity,
            sqrt_price_x96,
            zero_for_one,
            params.amount_specified,
        )?;
        // Exact output is never partially filled
        check_sqrt_price_in_range(
            next,
            range.sqrt_price_lower_x96,
            range.sqrt_price_upper_x96,
        )?;
        next
    };

    if (zero_for_one && sqrt_price_next_x96 < limit)
        || (!zero_for_one && sqrt_price_next_x96 > limit)
    {
        return Err(MathError::SqrtPriceX96ExceedsLimit);
    }

    let (amount0, amount1) =
        swap_amounts(env, range.liquidity, sqrt_price_x96, sqrt_price_next_x96)?;
    let tick = get_tick_at_sqrt_ratio(env, sqrt_price_next_x96)?;

    Ok(SwapComputation {
        amount0,
        amount1,
        sqrt_price_x96: sqrt_price_next_x96,
        tick,
        finalized: sqrt_price_next_x96 == range.sqrt_price_finalize_x96,
    })
}

/// Price reached by an exact input: the edge the swap moves toward when the
/// input covers it, the stepped price otherwise. The edge test runs first so
/// an oversized input never evaluates a price outside the representable range.
fn exact_input_target(
    env: &Env,
    range: &SwapRange,
    zero_for_one: bool,
    amount_in: i128,
) -> Result<u128, MathError> {
    let edge = if zero_for_one {
        range.sqrt_price_lower_x96
    } else {
        range.sqrt_price_upper_x96
    };

    let (amount0_to_edge, amount1_to_edge) =
        swap_amounts(env, range.liquidity, range.sqrt_price_x96, edge)?;
    let amount_to_edge = if zero_for_one {
        amount0_to_edge
    } else {
        amount1_to_edge
    };
    if amount_in >= amount_to_edge {
        return Ok(edge);
    }

    let next = get_next_sqrt_price_from_input(
        env,
        range.liquidity,
        range.sqrt_price_x96,
        zero_for_one,
        amount_in.unsigned_abs(),
    )?;
    Ok(if zero_for_one { next.max(edge) } else { next.min(edge) })
}
