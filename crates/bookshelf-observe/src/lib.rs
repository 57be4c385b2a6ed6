//! Observability setup for Bookshelf: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
