pub mod update_prices;

pub use update_prices::*;
