mod service;

pub use service::{clean_content, ContentSection, ServiceError, StoryInput, StoryService};
