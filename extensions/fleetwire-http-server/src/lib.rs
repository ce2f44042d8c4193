mod agent_backend;
mod fleet_server;
mod memory_backend;
mod routes;
mod server_error;
pub mod utils;

pub use agent_backend::{AgentBackend, BackendError};
pub use fleet_server::FleetServer;
pub use memory_backend::InMemoryBackend;
pub use routes::router;
pub use server_error::ServerError;
