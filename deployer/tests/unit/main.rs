//! Unit tests for the deployer

mod deployer_update;
mod fsm;
mod names;
mod settings;
