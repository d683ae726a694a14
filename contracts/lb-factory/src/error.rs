use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum FactoryError {
    // Pool parameters (1xx)
    InvalidTokens = 100,

    // State (2xx)
    AlreadyInitialized = 200,
    NotInitialized = 201,
    PoolActive = 202,

    // Validation (3xx)
    InvalidFeeProtocol = 300,

    // Authorization (5xx)
    Unauthorized = 500,
}
