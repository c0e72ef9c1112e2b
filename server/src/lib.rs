pub mod api;
pub mod bootstrap;
pub mod errors;
pub mod modules;
pub mod runner;
pub mod utils;
