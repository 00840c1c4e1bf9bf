//! Domain types shared across the Benefix workspace.
//!
//! Pure types only: roles and pagination carry no framework or database
//! dependencies, so every layer can import them freely.

pub mod pagination;
pub mod user;
