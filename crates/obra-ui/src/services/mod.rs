//! Thin REST clients for the console API. Every call goes through
//! [`client`], which unwraps the response envelope and turns non-2xx
//! statuses into [`ServiceError::Api`] with the server's message.

pub mod auth;
pub mod client;
pub mod records;
pub mod stats;

pub use client::ServiceError;
