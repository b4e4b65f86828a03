pub mod collect_reserves;
pub mod initialize_exchange;
pub mod initialize_registry;
pub mod manage_assets;
pub mod set_parameters;

pub use collect_reserves::*;
pub use initialize_exchange::*;
pub use initialize_registry::*;
pub use manage_assets::*;
pub use set_parameters::*;
