pub mod expiry;
pub mod filter;

pub use expiry::*;
pub use filter::*;
