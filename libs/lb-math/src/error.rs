/// Failures of the fixed-point math. Contracts map these onto their own
/// `#[contracterror]` enums.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MathError {
    /// Tick outside [MIN_TICK, MAX_TICK]
    InvalidTick,
    /// Price is zero, outside the representable range, or outside the pool range
    InvalidSqrtPriceX96,
    /// Price limit on the wrong side of the current price or out of bounds
    InvalidSqrtPriceLimitX96,
    /// Swap amount of zero
    InvalidAmountSpecified,
    /// Swap would move the price past the caller's limit
    SqrtPriceX96ExceedsLimit,
    /// Result does not fit the target integer width
    Overflow,
    DivisionByZero,
}
