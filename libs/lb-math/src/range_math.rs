use crate::sqrt_price_math::{liquidity_x96, virtual_reserve0};
use crate::{mul_div, u128_from_u256, MathError};
use lb_types::{FEE_UNIT, Q96};
use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::Env;

/// Range math is only defined for lower < upper and lower <= price <= upper
pub fn check_sqrt_price_in_range(
    sqrt_price_x96: u128,
    sqrt_price_lower_x96: u128,
    sqrt_price_upper_x96: u128,
) -> Result<(), MathError> {
    if sqrt_price_lower_x96 == 0
        || sqrt_price_upper_x96 <= sqrt_price_lower_x96
        || sqrt_price_x96 < sqrt_price_lower_x96
        || sqrt_price_x96 > sqrt_price_upper_x96
    {
        return Err(MathError::InvalidSqrtPriceX96);
    }
    Ok(())
}

/// Reserves backing `liquidity` at `sqrt_price_x96` within [lower, upper]
///
/// amount0 = L * 2^96 / sqrt_price - L * 2^96 / upper
/// amount1 = L * (sqrt_price - lower) / 2^96
pub fn to_amounts(
    env: &Env,
    liquidity: u128,
    sqrt_price_x96: u128,
    sqrt_price_lower_x96: u128,
    sqrt_price_upper_x96: u128,
) -> Result<(u128, u128), MathError> {
    check_sqrt_price_in_range(sqrt_price_x96, sqrt_price_lower_x96, sqrt_price_upper_x96)?;

    let numerator = liquidity_x96(env, liquidity);
    let reserve0 = virtual_reserve0(env, &numerator, sqrt_price_x96);
    let offset0 = virtual_reserve0(env, &numerator, sqrt_price_upper_x96);
    let amount0 = u128_from_u256(&reserve0.sub(&offset0))?;

    let amount1 = mul_div(env, liquidity, sqrt_price_x96 - sqrt_price_lower_x96, Q96)?;

    Ok((amount0, amount1))
}

/// Largest liquidity whose range reserves at `sqrt_price_x96` do not exceed
/// `amount0` and `amount1`
pub fn to_liquidity(
    env: &Env,
    sqrt_price_x96: u128,
    sqrt_price_lower_x96: u128,
    sqrt_price_upper_x96: u128,
    amount0: u128,
    amount1: u128,
) -> Result<u128, MathError> {
    check_sqrt_price_in_range(sqrt_price_x96, sqrt_price_lower_x96, sqrt_price_upper_x96)?;

    // At the upper edge the position holds no token0, so token0 does not bind
    let liquidity0 = if sqrt_price_x96 < sqrt_price_upper_x96 {
        let intermediate = mul_div(env, amount0, sqrt_price_x96, Q96)?;
        mul_div(
            env,
            intermediate,
            sqrt_price_upper_x96,
            sqrt_price_upper_x96 - sqrt_price_x96,
        )?
    } else {
        u128::MAX
    };

    let liquidity1 = if sqrt_price_x96 > sqrt_price_lower_x96 {
        mul_div(env, amount1, Q96, sqrt_price_x96 - sqrt_price_lower_x96)?
    } else {
        u128::MAX
    };

    Ok(liquidity0.min(liquidity1))
}

/// Protocol share of the range reserves, floor(amount * fee_protocol / FEE_UNIT)
pub fn range_fees(
    amount0: i128,
    amount1: i128,
    fee_protocol: u32,
) -> Result<(i128, i128), MathError> {
    if amount0 < 0 || amount1 < 0 || fee_protocol > FEE_UNIT {
        return Err(MathError::Overflow);
    }

    let fee = i128::from(fee_protocol);
    let unit = i128::from(FEE_UNIT);
    let fees0 = amount0
        .fixed_mul_floor(fee, unit)
        .ok_or(MathError::Overflow)?;
    let fees1 = amount1
        .fixed_mul_floor(fee, unit)
        .ok_or(MathError::Overflow)?;

    Ok((fees0, fees1))
}
