use service::Services;

/// Shared handler state; cloning is cheap.
#[derive(Clone)]
pub struct ServerState {
    pub services: Services,
}

impl ServerState {
    pub fn new(services: Services) -> Self {
        Self { services }
    }
}
