// ============================================================================
// INVARIANTS MODULE
// ============================================================================
//
// Properties every reachable pool state satisfies. The lifecycle tests
// below assert them after each operation.
//
// INVARIANT CATEGORIES:
//
// 1. PRICE INVARIANTS
//    - An initialized price never leaves [lower, upper]
//    - Tick is consistent with sqrt price
//
// 2. LIFECYCLE INVARIANTS
//    - Finalize edge is the edge opposite the initialize edge
//    - A drained pool has no liquidity and no shares
//
// 3. CONSERVATION INVARIANTS
//    - Token balances cover the range reserves
//    - Swap amounts flow in opposite directions
//
// ============================================================================

use lb_types::{PoolConfig, PoolState};

// ============================================================================
// PRICE INVARIANTS
// ============================================================================

/// Invariant: price stays inside the range once initialized
///
/// Property:
///   sqrt_price_x96 == 0 || lower <= sqrt_price_x96 <= upper
pub fn price_in_range(config: &PoolConfig, state: &PoolState) -> bool {
    !state.is_initialized()
        || (state.sqrt_price_x96 >= config.sqrt_price_lower_x96
            && state.sqrt_price_x96 <= config.sqrt_price_upper_x96)
}

/// Invariant: tick matches the price
///
/// Property:
///   tick == get_tick_at_sqrt_ratio(sqrt_price_x96)
pub fn tick_consistent_with_price(tick: i32, computed_tick_from_price: i32) -> bool {
    tick == computed_tick_from_price
}

// ============================================================================
// LIFECYCLE INVARIANTS
// ============================================================================

/// Invariant: initialize and finalize edges are the two ends of the range
pub fn edges_opposite(config: &PoolConfig, state: &PoolState) -> bool {
    let lower = config.sqrt_price_lower_x96;
    let upper = config.sqrt_price_upper_x96;
    (state.sqrt_price_initialize_x96 == lower && state.sqrt_price_finalize_x96 == upper)
        || (state.sqrt_price_initialize_x96 == upper && state.sqrt_price_finalize_x96 == lower)
}

/// Invariant: liquidity is backed one-to-one by shares until finalize burns both
///
/// Property:
///   total_supply == liquidity
pub fn shares_back_liquidity(state: &PoolState, total_supply: u128) -> bool {
    total_supply == state.liquidity
}

/// Invariant: reaching the finalize edge latches `finalized`
pub fn finalized_at_edge(state: &PoolState) -> bool {
    state.sqrt_price_x96 != state.sqrt_price_finalize_x96 || state.finalized
}

// ============================================================================
// CONSERVATION INVARIANTS
// ============================================================================

/// Invariant: the pool holds at least the reserves its liquidity implies
///
/// Property:
///   balance_i >= to_amounts(liquidity, sqrt_price_x96, lower, upper)_i
pub fn balances_cover_reserves(
    balance0: i128,
    balance1: i128,
    reserve0: u128,
    reserve1: u128,
) -> bool {
    balance0 >= 0
        && balance1 >= 0
        && balance0 as u128 >= reserve0
        && balance1 as u128 >= reserve1
}

/// Invariant: amounts in a swap move in opposite directions
pub fn swap_amounts_opposite_signs(amount0: i128, amount1: i128) -> bool {
    (amount0 >= 0 && amount1 <= 0) || (amount0 <= 0 && amount1 >= 0)
}

/// Invariant: swap direction consistency
///
/// Property:
///   - zero_for_one => price decreases (sqrt_price_after <= sqrt_price_before)
///   - !zero_for_one => price increases (sqrt_price_after >= sqrt_price_before)
pub fn swap_direction_consistent(
    zero_for_one: bool,
    sqrt_price_before: u128,
    sqrt_price_after: u128,
) -> bool {
    if zero_for_one {
        sqrt_price_after <= sqrt_price_before
    } else {
        sqrt_price_after >= sqrt_price_before
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::PoolTest;
    use lb_math::{get_tick_at_sqrt_ratio, to_amounts};
    use lb_types::default_sqrt_price_limit;
    use soroban_sdk::testutils::Ledger;
    use soroban_sdk::Env;

    fn check_all(env: &Env, t: &PoolTest) {
        let config = t.pool.config();
        let state = t.pool.state();

        assert!(price_in_range(&config, &state));
        assert!(edges_opposite(&config, &state));
        assert!(finalized_at_edge(&state));
        assert!(tick_consistent_with_price(
            state.tick,
            get_tick_at_sqrt_ratio(env, state.sqrt_price_x96).unwrap()
        ));
        assert!(shares_back_liquidity(&state, t.pool.total_supply()));

        let (reserve0, reserve1) = to_amounts(
            env,
            state.liquidity,
            state.sqrt_price_x96,
            config.sqrt_price_lower_x96,
            config.sqrt_price_upper_x96,
        )
        .unwrap();
        assert!(balances_cover_reserves(
            t.token0.balance(&t.pool.address),
            t.token1.balance(&t.pool.address),
            reserve0,
            reserve1,
        ));
    }

    #[test]
    fn test_invariants_hold_through_lifecycle() {
        let env = Env::default();
        let t = PoolTest::new(&env);
        t.factory.set_fee_protocol(&250);
        t.initialize_at_lower();
        check_all(&env, &t);

        // Alternate buys and partial sells toward the finalize edge
        let steps: [(bool, i128); 6] = [
            (false, 50_000_000_000_000_000_000),
            (true, 100_000_000_000),
            (false, 90_000_000_000_000_000_000),
            (true, -7_000_000_000_000_000_000),
            (false, -200_000_000_000),
            (false, 100_000_000_000_000_000_000_000),
        ];
        for (i, (zero_for_one, amount)) in steps.iter().enumerate() {
            env.ledger().set_timestamp(60 * (i as u64 + 1));
            let before = t.pool.sqrt_price_x96();
            let (amount0, amount1) = t.pool.swap(
                &t.trader,
                &t.trader,
                zero_for_one,
                amount,
                &default_sqrt_price_limit(*zero_for_one),
            );
            assert!(swap_amounts_opposite_signs(amount0, amount1));
            assert!(swap_direction_consistent(
                *zero_for_one,
                before,
                t.pool.sqrt_price_x96()
            ));
            check_all(&env, &t);
        }
        assert!(t.pool.finalized());

        t.pool.finalize(&t.supplier, &t.supplier, &None);
        let state = t.pool.state();
        assert_eq!(state.liquidity, 0);
        assert!(shares_back_liquidity(&state, t.pool.total_supply()));
    }

    #[test]
    fn test_swap_amounts_opposite_signs() {
        assert!(swap_amounts_opposite_signs(10, -5));
        assert!(swap_amounts_opposite_signs(-10, 5));
        assert!(swap_amounts_opposite_signs(0, 0));
        assert!(!swap_amounts_opposite_signs(10, 5));
        assert!(!swap_amounts_opposite_signs(-10, -5));
    }

    #[test]
    fn test_swap_direction_consistent() {
        assert!(swap_direction_consistent(true, 100, 90));
        assert!(!swap_direction_consistent(true, 100, 110));
        assert!(swap_direction_consistent(false, 100, 110));
        assert!(!swap_direction_consistent(false, 100, 90));
    }
}
