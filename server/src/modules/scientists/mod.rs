mod service;

pub use service::{ScientistInput, ScientistService, ServiceError};
