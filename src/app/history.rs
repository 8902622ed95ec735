//! Snapshot-basierte Undo/Redo-History über dem Netzwerk-Zustand.

use crate::core::ConduitNetwork;
use std::sync::Arc;

/// Snapshot reduziert auf die für Undo/Redo relevanten Teile.
///
/// Nutzt Arc-Clone (Copy-on-Write): Das Erstellen eines Snapshots ist O(1) —
/// der teure Netzwerk-Klon findet erst beim nächsten `Arc::make_mut()` in
/// einem Use-Case statt. Derselbe Mechanismus dient als transaktionale
/// Hülle: begin = Snapshot ziehen, rollback = Snapshot anwenden,
/// commit = Snapshot in die History aufnehmen.
#[derive(Clone)]
pub struct Snapshot {
    /// Optionales Netzwerk (Arc-Klon für O(1)-Snapshot)
    pub network: Option<Arc<ConduitNetwork>>,
}

impl Snapshot {
    /// Erstellt einen O(1)-Snapshot durch Arc-Clone statt Deep-Clone.
    pub fn from_state(state: &crate::app::EditorState) -> Self {
        Self {
            network: state.network.clone(),
        }
    }

    /// Stellt den Snapshot wieder her (O(1) Arc-Zuweisung).
    pub fn apply_to(self, state: &mut crate::app::EditorState) {
        state.network = self.network;
    }
}

/// Einfacher Undo/Redo-Manager mit Snapshotting.
#[derive(Default)]
pub struct EditHistory {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    max_depth: usize,
}

impl EditHistory {
    /// Erstellt einen neuen History-Manager mit maximaler Tiefe.
    pub fn new_with_capacity(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Nimmt einen fertigen Snapshot auf; ein neuer Eintrag leert den
    /// Redo-Stack.
    pub fn record_snapshot(&mut self, snap: Snapshot) {
        if self.undo_stack.len() >= self.max_depth {
            self.undo_stack.remove(0);
        }
        self.undo_stack.push(snap);
        self.redo_stack.clear();
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Pop vom Undo-Stack; `current` wandert auf den Redo-Stack.
    pub fn pop_undo_with_current(&mut self, current: Snapshot) -> Option<Snapshot> {
        if let Some(prev) = self.undo_stack.pop() {
            if self.redo_stack.len() >= self.max_depth {
                self.redo_stack.remove(0);
            }
            self.redo_stack.push(current);
            Some(prev)
        } else {
            None
        }
    }

    /// Pop vom Redo-Stack; `current` wandert auf den Undo-Stack.
    pub fn pop_redo_with_current(&mut self, current: Snapshot) -> Option<Snapshot> {
        if let Some(next) = self.redo_stack.pop() {
            if self.undo_stack.len() >= self.max_depth {
                self.undo_stack.remove(0);
            }
            self.undo_stack.push(current);
            Some(next)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::EditorState;
    use crate::core::{ConduitNetwork, Domain, ElementKind, Placement};
    use glam::DVec3;
    use std::sync::Arc;

    fn snapshot_with_element_count(count: usize) -> Snapshot {
        let mut network = ConduitNetwork::new();
        for i in 0..count {
            let x = i as f64 * 10.0;
            network.add_element(
                ElementKind::Pipe,
                Domain::Piping,
                Placement::Run {
                    start: DVec3::new(x, 0.0, 0.0),
                    end: DVec3::new(x + 5.0, 0.0, 0.0),
                },
            );
        }
        let mut state = EditorState::new();
        state.network = Some(Arc::new(network));
        Snapshot::from_state(&state)
    }

    #[test]
    fn empty_history_cannot_undo_or_redo() {
        let history = EditHistory::new_with_capacity(10);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_restores_previous_snapshot() {
        let mut history = EditHistory::new_with_capacity(10);
        history.record_snapshot(snapshot_with_element_count(2));

        let current = snapshot_with_element_count(5);
        let restored = history
            .pop_undo_with_current(current)
            .expect("undo vorhanden");

        assert_eq!(restored.network.as_deref().unwrap().element_count(), 2);
        assert!(!history.can_undo());
        assert!(history.can_redo());
    }

    #[test]
    fn redo_restores_undone_snapshot() {
        let mut history = EditHistory::new_with_capacity(10);
        history.record_snapshot(snapshot_with_element_count(2));

        let _restored = history.pop_undo_with_current(snapshot_with_element_count(5));
        let redone = history
            .pop_redo_with_current(snapshot_with_element_count(2))
            .expect("redo vorhanden");

        assert_eq!(redone.network.as_deref().unwrap().element_count(), 5);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn new_record_clears_redo_stack() {
        let mut history = EditHistory::new_with_capacity(10);
        history.record_snapshot(snapshot_with_element_count(1));

        let _restored = history.pop_undo_with_current(snapshot_with_element_count(3));
        assert!(history.can_redo());

        history.record_snapshot(snapshot_with_element_count(7));
        assert!(!history.can_redo());
    }

    #[test]
    fn respects_max_depth() {
        let mut history = EditHistory::new_with_capacity(3);

        for i in 1..=5 {
            history.record_snapshot(snapshot_with_element_count(i));
        }

        let mut undo_count = 0;
        while history.can_undo() {
            history.pop_undo_with_current(snapshot_with_element_count(99));
            undo_count += 1;
        }
        assert_eq!(undo_count, 3);
    }
}
