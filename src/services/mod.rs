pub mod auth_service;
pub mod organization_service;
pub mod user_service;
pub mod validation;

pub use auth_service::*;
pub use organization_service::*;
pub use user_service::*;
pub use validation::*;
