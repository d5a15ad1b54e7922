pub mod auth;
pub mod bootstrap;
pub mod passwords;
pub mod tokens;
