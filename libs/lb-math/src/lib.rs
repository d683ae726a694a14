#![no_std]

mod error;
pub mod full_math;
pub mod range_math;
pub mod sqrt_price_math;
pub mod swap_math;
pub mod tick_math;

pub use error::MathError;
pub use full_math::*;
pub use range_math::*;
pub use sqrt_price_math::*;
pub use swap_math::*;
pub use tick_math::*;
