pub mod prelude;

pub mod discovery;
pub mod discovery_story;
pub mod scientist;
pub mod user;
