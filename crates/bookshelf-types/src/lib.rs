//! Shared domain types for Bookshelf.
//!
//! This crate contains the book record types, the wire representation used
//! by the REST API, server configuration, and the error types shared by the
//! storage and API layers.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod book;
pub mod config;
pub mod error;
