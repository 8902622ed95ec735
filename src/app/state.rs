//! Editor-Zustand: Netzwerk, History und Laufzeit-Optionen.

use std::sync::Arc;

use super::history::{EditHistory, Snapshot};
use crate::core::ConduitNetwork;
use crate::shared::EngineOptions;

/// Hauptzustand der Bearbeitungs-Engine.
pub struct EditorState {
    /// Aktuell geladenes Netzwerk (None = kein Modell geladen)
    pub network: Option<Arc<ConduitNetwork>>,
    /// Undo/Redo-History (Snapshot-basiert)
    pub history: EditHistory,
    /// Laufzeit-Optionen (Toleranzen, Propagations-Limit)
    pub options: EngineOptions,
}

impl EditorState {
    /// Erstellt einen neuen, leeren Zustand.
    pub fn new() -> Self {
        let options = EngineOptions::default();
        Self {
            network: None,
            history: EditHistory::new_with_capacity(options.undo_depth),
            options,
        }
    }

    /// Erstellt einen Zustand mit einem geladenen Netzwerk.
    pub fn with_network(network: ConduitNetwork) -> Self {
        let mut state = Self::new();
        state.network = Some(Arc::new(network));
        state
    }

    /// Nimmt den aktuellen Zustand in die Undo-History auf
    /// (vor jeder Mutation aufzurufen).
    pub fn record_undo_snapshot(&mut self) {
        let snap = Snapshot::from_state(self);
        self.history.record_snapshot(snap);
    }

    /// Stellt den letzten Undo-Snapshot wieder her.
    pub fn undo(&mut self) -> bool {
        let current = Snapshot::from_state(self);
        if let Some(prev) = self.history.pop_undo_with_current(current) {
            prev.apply_to(self);
            true
        } else {
            false
        }
    }

    /// Wiederholt die zuletzt rückgängig gemachte Mutation.
    pub fn redo(&mut self) -> bool {
        let current = Snapshot::from_state(self);
        if let Some(next) = self.history.pop_redo_with_current(current) {
            next.apply_to(self);
            true
        } else {
            false
        }
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}
