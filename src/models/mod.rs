//! Entity value types shared by the store, the services and the API layer.
//!
//! The store hands these out by value; nothing here is cached across
//! operations.

pub mod organization;
pub mod user;

pub use organization::{
    NewOrganization, Organization, OrganizationChanges, OrganizationInput, OrganizationUpdate,
};
pub use user::{NewUser, User, UserInput};
