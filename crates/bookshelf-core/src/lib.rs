//! Business logic and repository trait definitions for Bookshelf.
//!
//! This crate defines the "ports" (repository traits) that the infrastructure
//! layer implements. It depends only on `bookshelf-types` -- never on
//! `bookshelf-infra` or any database/IO crate.

pub mod repository;
pub mod service;
