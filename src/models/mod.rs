//! Data models: entities, request/response shapes and the envelope

pub mod book;
pub mod envelope;
pub mod loan;
pub mod user;
