pub mod enquiries;
pub mod login;
