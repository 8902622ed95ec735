//! Application-Layer: Zustand, History, Richtlinien und Use-Cases.

pub mod history;
pub mod policy;
/// Engine-Zustand (Netzwerk, History, Optionen)
pub mod state;
pub mod use_cases;

pub use history::{EditHistory, Snapshot};
pub use policy::{OpposingContext, OpposingResolution, ResolutionPolicy};
pub use state::EditorState;
