//! Trace-driven queueing-delay simulator.

pub mod cli;
pub mod config;
pub mod io;
pub mod logging;
pub mod runner;
pub mod sim;
pub mod trace;
