use soroban_sdk::{contracttype, Address};

/// Pool configuration - immutable after construction
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolConfig {
    /// Factory contract address, receives protocol fees
    pub factory: Address,
    /// Token0 address (lower address)
    pub token0: Address,
    /// Token1 address (higher address)
    pub token1: Address,
    /// Lower bound of the range
    pub tick_lower: i32,
    /// Upper bound of the range
    pub tick_upper: i32,
    /// sqrt price at `tick_lower` as Q64.96
    pub sqrt_price_lower_x96: u128,
    /// sqrt price at `tick_upper` as Q64.96
    pub sqrt_price_upper_x96: u128,
    /// Only address allowed to initialize and finalize
    pub supplier: Address,
    /// Earliest ledger timestamp at which `initialize` succeeds
    pub block_timestamp_initialize: u64,
}

/// Current pool state - stored in Instance storage for frequent access
///
/// `sqrt_price_x96 == 0` means the pool has not been initialized.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PoolState {
    /// Liquidity backing the range, zero before initialize and after finalize
    pub liquidity: u128,
    /// Current sqrt(price) as Q64.96
    pub sqrt_price_x96: u128,
    /// Edge the pool was seeded at
    pub sqrt_price_initialize_x96: u128,
    /// Opposite edge, reaching it finalizes the pool
    pub sqrt_price_finalize_x96: u128,
    /// Tick for `sqrt_price_x96`
    pub tick: i32,
    /// Number of liquidity provisions (one per pool)
    pub total_positions: u32,
    /// Timestamp of the last oracle update
    pub block_timestamp: u64,
    /// Time-weighted sum of ticks
    pub tick_cumulative: i128,
    /// Protocol fee in FEE_UNIT parts, snapshotted at initialize
    pub fee_protocol: u32,
    /// One-way latch set when the finalize edge is reached or on finalize
    pub finalized: bool,
}

impl PoolState {
    pub fn is_initialized(&self) -> bool {
        self.sqrt_price_x96 != 0
    }
}

/// Identity of a pool in the factory registry; hashed into the deployment salt
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolKey {
    pub token0: Address,
    pub token1: Address,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub supplier: Address,
    pub block_timestamp_initialize: u64,
}

impl PoolKey {
    /// Builds a key with the token pair sorted
    pub fn new(
        token_a: Address,
        token_b: Address,
        tick_lower: i32,
        tick_upper: i32,
        supplier: Address,
        block_timestamp_initialize: u64,
    ) -> Self {
        let (token0, token1) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };
        Self {
            token0,
            token1,
            tick_lower,
            tick_upper,
            supplier,
            block_timestamp_initialize,
        }
    }
}
