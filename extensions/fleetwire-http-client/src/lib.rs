mod agent_transport;
mod delivered;
mod transport_client;
mod transport_config;
mod transport_error;

pub use agent_transport::AgentTransport;
pub use delivered::{Delivered, TransportPath};
pub use transport_client::TransportClient;
pub use transport_config::TransportConfig;
pub use transport_error::TransportError;
