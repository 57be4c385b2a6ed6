//! Infrastructure layer for Bookshelf.
//!
//! Contains the SQLite implementation of the `BookRepository` port defined in
//! `bookshelf-core`, plus data-directory and `config.toml` resolution.

pub mod config;
pub mod sqlite;
