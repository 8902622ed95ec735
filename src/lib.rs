//! MEP-Conduit-Editor Library.
//! Ausrichtungs- und Wiederverbindungs-Engine für Leitungsnetze
//! (Rohr, Lüftung, Elektro) als Library exportiert.

pub mod app;
pub mod core;
pub mod error;
pub mod shared;
pub mod solver;

pub use app::{
    EditHistory, EditorState, OpposingContext, OpposingResolution, ResolutionPolicy, Snapshot,
};
pub use app::use_cases::{
    bind_ports, move_and_reconnect, pick_free_port, reconnect, unbind_ports, ReconnectionResult,
};
pub use core::{
    ConduitNetwork, Connection, ConnectionSnapshot, Domain, Element, ElementId, ElementKind,
    Placement, Port, PortFrame, PortId, PortShape,
};
pub use core::{PortIndex, SpatialMatch};
pub use error::{EngineError, EngineResult};
pub use shared::EngineOptions;
pub use solver::{align_ports, intersect_lines, is_opposing, PortAlignment};
