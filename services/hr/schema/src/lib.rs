pub mod dependents;
pub mod employees;
pub mod policies;
pub mod users;
