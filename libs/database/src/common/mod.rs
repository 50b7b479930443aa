//! Types shared by every connector

pub mod error;

pub use error::{DatabaseError, DatabaseResult};
