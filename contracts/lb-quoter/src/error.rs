use lb_math::MathError;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum QuoterError {
    // State (2xx)
    AlreadyInitialized = 200,
    NotInitialized = 201,
    PoolNotFound = 202,
    PoolNotInitialized = 203,
    PoolFinalized = 204,

    // Validation (3xx)
    InvalidSqrtPriceX96 = 300,
    InvalidSqrtPriceLimitX96 = 301,
    InvalidAmountSpecified = 302,
    InvalidTick = 303,

    // Economic (4xx)
    SqrtPriceX96ExceedsLimit = 400,

    // Arithmetic (6xx)
    Overflow = 600,
    DivisionByZero = 601,
}

impl From<MathError> for QuoterError {
    fn from(e: MathError) -> Self {
        match e {
            MathError::InvalidTick => QuoterError::InvalidTick,
            MathError::InvalidSqrtPriceX96 => QuoterError::InvalidSqrtPriceX96,
            MathError::InvalidSqrtPriceLimitX96 => QuoterError::InvalidSqrtPriceLimitX96,
            MathError::InvalidAmountSpecified => QuoterError::InvalidAmountSpecified,
            MathError::SqrtPriceX96ExceedsLimit => QuoterError::SqrtPriceX96ExceedsLimit,
            MathError::Overflow => QuoterError::Overflow,
            MathError::DivisionByZero => QuoterError::DivisionByZero,
        }
    }
}
