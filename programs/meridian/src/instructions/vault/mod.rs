pub mod borrow_vault;
pub mod create_vault;
pub mod create_vault_entry;
pub mod deposit_vault;
pub mod liquidate_vault;
pub mod repay_vault;
pub mod set_vault_halted;
pub mod trigger_debt_adjustment;
pub mod withdraw_vault;

pub use borrow_vault::*;
pub use create_vault::*;
pub use create_vault_entry::*;
pub use deposit_vault::*;
pub use liquidate_vault::*;
pub use repay_vault::*;
pub use set_vault_halted::*;
pub use trigger_debt_adjustment::*;
pub use withdraw_vault::*;
