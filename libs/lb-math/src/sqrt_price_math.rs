use crate::{mul_div, mul_div_rounding_up, u128_from_u256, MathError};
use lb_types::{MAX_SQRT_RATIO, MIN_SQRT_RATIO, Q96};
use soroban_sdk::{Env, U256};

/// L * 2^96 as U256, the numerator of every token0 reserve
pub(crate) fn liquidity_x96(env: &Env, liquidity: u128) -> U256 {
    U256::from_u128(env, liquidity).mul(&U256::from_u128(env, Q96))
}

/// Virtual token0 reserve floor(L * 2^96 / sqrt_price)
pub(crate) fn virtual_reserve0(env: &Env, liquidity_x96: &U256, sqrt_price_x96: u128) -> U256 {
    liquidity_x96.div(&U256::from_u128(env, sqrt_price_x96))
}

fn check_representable(sqrt_price_x96: u128) -> Result<u128, MathError> {
    if (MIN_SQRT_RATIO..=MAX_SQRT_RATIO).contains(&sqrt_price_x96) {
        Ok(sqrt_price_x96)
    } else {
        Err(MathError::InvalidSqrtPriceX96)
    }
}

/// Price after `amount_in` of the input token is added to the pool
///
/// zero_for_one: sqrt_price' = L * 2^96 / (reserve0 + amount_in)
/// one_for_zero: sqrt_price' = sqrt_price + amount_in * 2^96 / L
pub fn get_next_sqrt_price_from_input(
    env: &Env,
    liquidity: u128,
    sqrt_price_x96: u128,
    zero_for_one: bool,
    amount_in: u128,
) -> Result<u128, MathError> {
    if liquidity == 0 || sqrt_price_x96 == 0 {
        return Err(MathError::InvalidSqrtPriceX96);
    }

    let next = if zero_for_one {
        let numerator = liquidity_x96(env, liquidity);
        let reserve0 = virtual_reserve0(env, &numerator, sqrt_price_x96);
        let denominator = reserve0.add(&U256::from_u128(env, amount_in));
        u128_from_u256(&numerator.div(&denominator))
            .map_err(|_| MathError::InvalidSqrtPriceX96)?
    } else {
        let delta = mul_div(env, amount_in, Q96, liquidity)
            .map_err(|_| MathError::InvalidSqrtPriceX96)?;
        sqrt_price_x96
            .checked_add(delta)
            .ok_or(MathError::InvalidSqrtPriceX96)?
    };

    check_representable(next)
}

/// Price after `amount_out` of the output token is removed from the pool
///
/// zero_for_one (token1 out): sqrt_price' = sqrt_price - ceil(amount_out * 2^96 / L)
/// one_for_zero (token0 out): sqrt_price' = L * 2^96 / (reserve0 - amount_out)
pub fn get_next_sqrt_price_from_output(
    env: &Env,
    liquidity: u128,
    sqrt_price_x96: u128,
    zero_for_one: bool,
    amount_out: u128,
) -> Result<u128, MathError> {
    if liquidity == 0 || sqrt_price_x96 == 0 {
        return Err(MathError::InvalidSqrtPriceX96);
    }

    let next = if zero_for_one {
        let delta = mul_div_rounding_up(env, amount_out, Q96, liquidity)
            .map_err(|_| MathError::InvalidSqrtPriceX96)?;
        if delta >= sqrt_price_x96 {
            return Err(MathError::InvalidSqrtPriceX96);
        }
        sqrt_price_x96 - delta
    } else {
        let numerator = liquidity_x96(env, liquidity);
        let reserve0 = virtual_reserve0(env, &numerator, sqrt_price_x96);
        let amount_out_256 = U256::from_u128(env, amount_out);
        // Cannot take out the whole virtual reserve
        if !reserve0.gt(&amount_out_256) {
            return Err(MathError::InvalidSqrtPriceX96);
        }
        u128_from_u256(&numerator.div(&reserve0.sub(&amount_out_256)))
            .map_err(|_| MathError::InvalidSqrtPriceX96)?
    };

    check_representable(next)
}

/// Next price for a signed swap amount: positive is exact input, negative
/// is exact output
pub fn sqrt_price_x96_next_swap(
    env: &Env,
    liquidity: u128,
    sqrt_price_x96: u128,
    zero_for_one: bool,
    amount_specified: i128,
) -> Result<u128, MathError> {
    if amount_specified == 0 {
        return Err(MathError::InvalidAmountSpecified);
    }
    if amount_specified > 0 {
        get_next_sqrt_price_from_input(
            env,
            liquidity,
            sqrt_price_x96,
            zero_for_one,
            amount_specified.unsigned_abs(),
        )
    } else {
        get_next_sqrt_price_from_output(
            env,
            liquidity,
            sqrt_price_x96,
            zero_for_one,
            amount_specified.unsigned_abs(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;

    const LIQUIDITY: u128 = 1_000_000_000_000_000_000; // 1e18

    #[test]
    fn test_input_zero_for_one_matches_reserve_formula() {
        let env = Env::default();
        // L = 1e18 at price 1: reserve0 = 1e18, adding 1e18 halves sqrt price
        let next = get_next_sqrt_price_from_input(&env, LIQUIDITY, Q96, true, LIQUIDITY).unwrap();
        assert_eq!(next, Q96 / 2);
    }

    #[test]
    fn test_input_one_for_zero_adds_linearly() {
        let env = Env::default();
        let next = get_next_sqrt_price_from_input(&env, LIQUIDITY, Q96, false, LIQUIDITY).unwrap();
        assert_eq!(next, Q96 * 2);
    }

    #[test]
    fn test_input_zero_amount_keeps_price() {
        let env = Env::default();
        assert_eq!(
            get_next_sqrt_price_from_input(&env, LIQUIDITY, Q96, true, 0),
            Ok(Q96)
        );
        assert_eq!(
            get_next_sqrt_price_from_input(&env, LIQUIDITY, Q96, false, 0),
            Ok(Q96)
        );
    }

    #[test]
    fn test_output_zero_for_one_rounds_price_down() {
        let env = Env::default();
        // amount_out * 2^96 / L = 1 / 3 of Q96, not exact
        let next = get_next_sqrt_price_from_output(&env, 3, Q96, true, 1).unwrap();
        let delta = Q96 / 3 + 1;
        assert_eq!(next, Q96 - delta);
    }

    #[test]
    fn test_output_one_for_zero() {
        let env = Env::default();
        // reserve0 = 1e18; removing half doubles sqrt price
        let next =
            get_next_sqrt_price_from_output(&env, LIQUIDITY, Q96, false, LIQUIDITY / 2).unwrap();
        assert_eq!(next, Q96 * 2);
    }

    #[test]
    fn test_output_exceeding_reserves_fails() {
        let env = Env::default();
        assert_eq!(
            get_next_sqrt_price_from_output(&env, LIQUIDITY, Q96, false, LIQUIDITY),
            Err(MathError::InvalidSqrtPriceX96)
        );
        assert_eq!(
            get_next_sqrt_price_from_output(&env, LIQUIDITY, Q96, true, LIQUIDITY),
            Err(MathError::InvalidSqrtPriceX96)
        );
    }

    #[test]
    fn test_zero_liquidity_fails() {
        let env = Env::default();
        assert_eq!(
            get_next_sqrt_price_from_input(&env, 0, Q96, true, 1),
            Err(MathError::InvalidSqrtPriceX96)
        );
    }

    #[test]
    fn test_price_beyond_representable_range_fails() {
        let env = Env::default();
        assert_eq!(
            get_next_sqrt_price_from_input(&env, 1, MAX_SQRT_RATIO, false, 1),
            Err(MathError::InvalidSqrtPriceX96)
        );
    }

    #[test]
    fn test_next_swap_dispatch() {
        let env = Env::default();
        assert_eq!(
            sqrt_price_x96_next_swap(&env, LIQUIDITY, Q96, true, 0),
            Err(MathError::InvalidAmountSpecified)
        );
        assert_eq!(
            sqrt_price_x96_next_swap(&env, LIQUIDITY, Q96, true, LIQUIDITY as i128),
            get_next_sqrt_price_from_input(&env, LIQUIDITY, Q96, true, LIQUIDITY)
        );
        assert_eq!(
            sqrt_price_x96_next_swap(&env, LIQUIDITY, Q96, false, -((LIQUIDITY / 2) as i128)),
            get_next_sqrt_price_from_output(&env, LIQUIDITY, Q96, false, LIQUIDITY / 2)
        );
    }
}
