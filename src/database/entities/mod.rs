pub mod organizations;
pub mod users;
