//! Use-Cases der Application-Layer-Orchestrierung.

pub mod connect;
pub mod disconnect;
pub mod move_element;
pub mod reconnect;

pub use connect::{bind_ports, pick_free_port};
pub use disconnect::unbind_ports;
pub use move_element::move_and_reconnect;
pub use reconnect::{reconnect, ReconnectionResult};
