use lb_math::MathError;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PoolError {
    // Construction (1xx)
    InvalidTokens = 100,
    InvalidTicks = 101,
    InvalidBlockTimestamp = 102,

    // State (2xx)
    Initialized = 200,
    NotInitialized = 201,
    Finalized = 202,
    NotFinalized = 203,
    SupplyLessThanMin = 204,

    // Validation (3xx)
    InvalidSqrtPriceX96 = 300,
    InvalidSqrtPriceLimitX96 = 301,
    InvalidAmountSpecified = 302,
    LiquidityLessThanMin = 303,
    BlockTimestampLessThanInitialize = 304,

    // Economic (4xx)
    SqrtPriceX96ExceedsLimit = 400,
    Amount0LessThanMin = 401,
    Amount1LessThanMin = 402,
    BalanceLessThanAmount = 403,

    // Authorization (5xx)
    Unauthorized = 500,

    // Arithmetic (6xx)
    Overflow = 600,
    DivisionByZero = 601,
}

impl From<MathError> for PoolError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InvalidTick => PoolError::InvalidTicks,
            MathError::InvalidSqrtPriceX96 => PoolError::InvalidSqrtPriceX96,
            MathError::InvalidSqrtPriceLimitX96 => PoolError::InvalidSqrtPriceLimitX96,
            MathError::InvalidAmountSpecified => PoolError::InvalidAmountSpecified,
            MathError::SqrtPriceX96ExceedsLimit => PoolError::SqrtPriceX96ExceedsLimit,
            MathError::Overflow => PoolError::Overflow,
            MathError::DivisionByZero => PoolError::DivisionByZero,
        }
    }
}
