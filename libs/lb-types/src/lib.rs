#![no_std]

mod pool;
mod swap;

pub use pool::*;
pub use swap::*;

/// Q96 constant (2^96) for fixed-point math
pub const Q96: u128 = 1 << 96;

/// Minimum tick index
/// Limited by u128 representation (a uint160 price would allow -887272)
pub const MIN_TICK: i32 = -443636;

/// Maximum tick index
/// Limited by u128 representation (a uint160 price would allow 887272)
pub const MAX_TICK: i32 = 443636;

/// Minimum sqrt price (at MIN_TICK)
/// sqrt(1.0001^-443636) * 2^96, rounded up
pub const MIN_SQRT_RATIO: u128 = 18447090764788882728;

/// Maximum sqrt price (at MAX_TICK)
/// sqrt(1.0001^443636) * 2^96, rounded up, bounded by u128::MAX
pub const MAX_SQRT_RATIO: u128 = 340275971719517849884101479065584693834;

/// Denominator for the protocol fee (parts per million)
pub const FEE_UNIT: u32 = 1_000_000;

/// Seconds after `block_timestamp_initialize` when the supplier may finalize
/// without the price having reached the finalize edge
pub const MINIMUM_DURATION: u64 = 86_400;

/// Smallest liquidity a pool may be seeded with
pub const MINIMUM_LIQUIDITY: u128 = 10_000;

/// Default price limit for a direction when the caller passes 0
pub fn default_sqrt_price_limit(zero_for_one: bool) -> u128 {
    if zero_for_one {
        MIN_SQRT_RATIO + 1
    } else {
        MAX_SQRT_RATIO - 1
    }
}
