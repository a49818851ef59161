//! # Quill Shared
//!
//! Request/response types shared between the backend and any client of the
//! REST API. This crate defines the JSON contract the frontend consumes.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
