mod employee_test;
mod import_test;
mod otp_test;
mod token_test;
