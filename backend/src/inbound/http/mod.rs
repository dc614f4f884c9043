//! HTTP inbound adapter exposing REST endpoints.

pub mod actor;
pub mod admin;
pub mod catalogue;
pub mod circulation;
pub mod error;
pub mod health;
pub mod members;
pub mod schemas;
pub mod state;

pub use error::ApiResult;
