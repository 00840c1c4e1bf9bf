pub mod dependent;
pub mod employee;
pub mod import;
pub mod login;
pub mod policy;
pub mod token;
