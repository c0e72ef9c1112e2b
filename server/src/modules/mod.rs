pub mod auth;
pub mod discoveries;
pub mod scientists;
pub mod stories;
pub mod uploads;
