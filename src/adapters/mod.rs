//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-process storage, seeded with the system catalog
//! - `postgres` - sqlx-backed storage
//! - `exercise` - The bundled exercise library
//! - `http` - axum routers over the application services

pub mod exercise;
pub mod http;
pub mod memory;
pub mod postgres;
