//! Cloud Run access through the Google Cloud client libraries

pub mod operation;
pub mod resources;
pub mod session;
