pub mod create_swapline;
pub mod native_to_synthetic;
pub mod set_halted_swapline;
pub mod synthetic_to_native;
pub mod withdraw_swapline_fee;

pub use create_swapline::*;
pub use native_to_synthetic::*;
pub use set_halted_swapline::*;
pub use synthetic_to_native::*;
pub use withdraw_swapline_fee::*;
