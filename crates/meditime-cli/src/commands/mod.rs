pub mod calendar;
pub mod config;
pub mod reset;
pub mod stats;
pub mod theme;
pub mod timer;

mod common;
