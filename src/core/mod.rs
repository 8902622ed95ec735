//! Core-Domänentypen: Elemente, Ports, Verbindungen, Netzwerk, Spatial-Index.

pub mod connection;
pub mod element;
pub mod network;
pub mod port;
pub mod snapshot;
pub mod spatial;

pub use connection::Connection;
pub use element::{Element, ElementId, ElementKind, Placement};
pub use network::ConduitNetwork;
pub use port::{Domain, Port, PortFrame, PortId, PortShape};
pub use snapshot::{ConnectionSnapshot, SnapshotEntry};
pub use spatial::{PortIndex, SpatialMatch};
