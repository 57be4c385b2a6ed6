//! Request extractors.

pub mod book;
