pub mod admin;
pub mod oracle;
pub mod swapline;
pub mod user;
pub mod vault;

pub use admin::*;
pub use oracle::*;
pub use swapline::*;
pub use user::*;
pub use vault::*;
