mod service;

pub use service::{DiscoveryInput, DiscoveryService, ServiceError};
