pub mod exchange;
pub mod exchange_account;
pub mod registry;
pub mod settlement;
pub mod swapline;
pub mod vault;

pub use exchange::*;
pub use exchange_account::*;
pub use registry::*;
pub use settlement::*;
pub use swapline::*;
pub use vault::*;
