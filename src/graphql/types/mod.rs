pub mod organization;
pub mod user;

pub use organization::*;
pub use user::*;
