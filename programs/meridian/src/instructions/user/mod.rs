pub mod burn;
pub mod check_collateralization;
pub mod create_exchange_account;
pub mod deposit;
pub mod liquidate;
pub mod mint;
pub mod rewards;
pub mod settlement;
pub mod swap;
pub mod withdraw;

pub use burn::*;
pub use check_collateralization::*;
pub use create_exchange_account::*;
pub use deposit::*;
pub use liquidate::*;
pub use mint::*;
pub use rewards::*;
pub use settlement::*;
pub use swap::*;
pub use withdraw::*;
