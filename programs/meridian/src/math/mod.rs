pub mod debt;
pub mod decimal;
pub mod interest;
pub mod oracle;
pub mod staking;
pub mod swap;

pub use debt::*;
pub use decimal::*;
pub use interest::*;
pub use oracle::*;
pub use staking::*;
pub use swap::*;
