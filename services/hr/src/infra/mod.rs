pub mod db;
pub mod file;
pub mod otp;
