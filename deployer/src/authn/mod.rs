//! Credential resolution

pub mod credential;
