//! RobCo-style terminal hacking: find the password among the duds before the
//! terminal locks.

pub mod config;
pub mod core;
pub mod hacking;
pub mod status;
pub mod ui;
pub mod words;
