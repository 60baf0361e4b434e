// User domain module
// Contains the user entity, age-band categorization, and the domain service

#![allow(clippy::module_inception)]

pub mod category;
pub mod service;
pub mod user;

// Re-export main types for convenience
pub use category::UserCategory;
pub use service::UserDomainService;
pub use user::User;
