pub use super::discovery::Entity as Discovery;
pub use super::discovery_story::Entity as DiscoveryStory;
pub use super::scientist::Entity as Scientist;
pub use super::user::Entity as User;
