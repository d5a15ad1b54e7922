pub mod auth;

pub use auth::{RequireOwner, authenticate};
