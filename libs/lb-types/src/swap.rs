// Pure swap computation types, shared by the pool (execution) and the
// quoter (simulation) so both run the same arithmetic.

/// Parameters for a swap operation (input to pure computation)
#[derive(Clone, Debug)]
pub struct SwapParams {
    /// True if swapping token0 for token1
    pub zero_for_one: bool,
    /// Positive for exact input, negative for exact output
    pub amount_specified: i128,
    /// Price limit for the swap
    pub sqrt_price_limit_x96: u128,
}

/// Snapshot of the pool fields a swap reads
#[derive(Clone, Debug)]
pub struct SwapRange {
    pub liquidity: u128,
    pub sqrt_price_x96: u128,
    pub sqrt_price_lower_x96: u128,
    pub sqrt_price_upper_x96: u128,
    pub sqrt_price_finalize_x96: u128,
}

/// Complete result of pure swap computation
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapComputation {
    /// Final amount of token0 (positive = pool receives, negative = pool pays)
    pub amount0: i128,
    /// Final amount of token1 (positive = pool receives, negative = pool pays)
    pub amount1: i128,
    /// sqrt price after the swap
    pub sqrt_price_x96: u128,
    /// Tick after the swap
    pub tick: i32,
    /// Whether the swap ended on the finalize edge
    pub finalized: bool,
}
