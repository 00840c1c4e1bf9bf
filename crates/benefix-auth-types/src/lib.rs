//! Auth types for the Benefix HR service.
//!
//! Provides JWT validation, cookie builders, and Argon2 password hashing.

pub mod cookie;
pub mod password;
pub mod token;
