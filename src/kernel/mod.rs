//! Kernel functions for density estimation

pub mod epanechnikov;
pub mod traits;

pub use self::epanechnikov::*;
pub use self::traits::*;
