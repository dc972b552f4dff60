pub mod cdi;
pub mod error;
pub mod returns;
pub mod tax;
pub mod types;

#[cfg(feature = "scenarios")]
pub mod scenarios;

pub use error::CdiCompareError;
pub use types::*;

/// Standard result type for all cdi-compare operations
pub type CdiCompareResult<T> = Result<T, CdiCompareError>;
