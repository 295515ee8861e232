//! Cloud Run deployer library
//!
//! Creates or updates a Cloud Run service from a container image and returns
//! its public URL. A created service is made publicly invokable.

pub mod authn;
pub mod cli;
pub mod cloud;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod logs;
pub mod settings;
pub mod utils;
