//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows and the submission payload
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `sqlite.rs`: pooled storage handle with the account and enquiry queries

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{DbAccount, Enquiry, NewEnquiry};
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, SylvaStorage};
