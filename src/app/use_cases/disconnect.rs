//! Use-Case: Eine bestehende Verbindung lösen.

use std::sync::Arc;

use crate::app::EditorState;
use crate::core::PortId;
use crate::error::{EngineError, EngineResult};

/// Löst die Verbindung zwischen zwei Ports.
///
/// Besteht keine Verbindung, ist der Aufruf ein Fehler ohne
/// History-Eintrag.
pub fn unbind_ports(state: &mut EditorState, a: PortId, b: PortId) -> EngineResult<()> {
    let network = state
        .network
        .as_ref()
        .ok_or_else(|| EngineError::aborted("kein Netzwerk geladen"))?;
    network.try_port(a)?;
    network.try_port(b)?;
    if !network.has_connection(a, b) {
        return Err(EngineError::aborted(format!(
            "zwischen {} und {} besteht keine Verbindung",
            a, b
        )));
    }

    state.record_undo_snapshot();
    let network = state
        .network
        .as_mut()
        .ok_or_else(|| EngineError::aborted("kein Netzwerk geladen"))?;
    Arc::make_mut(network).unbind(a, b);
    log::info!("Verbindung {} ↔ {} gelöst", a, b);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ConduitNetwork, Domain, ElementKind, Placement, PortFrame, PortShape};
    use glam::DVec3;

    fn bound_pair(network: &mut ConduitNetwork) -> (PortId, PortId) {
        let shape = PortShape::Round { diameter: 0.05 };
        let a = network.add_element(
            ElementKind::Pipe,
            Domain::Piping,
            Placement::Run {
                start: DVec3::ZERO,
                end: DVec3::X,
            },
        );
        let b = network.add_element(
            ElementKind::Pipe,
            Domain::Piping,
            Placement::Run {
                start: DVec3::X,
                end: DVec3::X * 2.0,
            },
        );
        let pa = network
            .add_port(a, DVec3::X, PortFrame::from_primary(DVec3::X), Domain::Piping, shape)
            .unwrap();
        let pb = network
            .add_port(b, DVec3::X, PortFrame::from_primary(-DVec3::X), Domain::Piping, shape)
            .unwrap();
        network.bind(pa, pb).unwrap();
        (pa, pb)
    }

    #[test]
    fn unbind_is_undoable() {
        let mut network = ConduitNetwork::new();
        let (a, b) = bound_pair(&mut network);
        let mut state = EditorState::with_network(network);

        unbind_ports(&mut state, a, b).expect("unbind erwartet");
        assert!(!state.network.as_ref().unwrap().has_connection(a, b));

        assert!(state.undo());
        assert!(state.network.as_ref().unwrap().has_connection(a, b));
    }

    #[test]
    fn unbind_without_connection_fails() {
        let mut network = ConduitNetwork::new();
        let (a, b) = bound_pair(&mut network);
        let mut state = EditorState::with_network(network);

        unbind_ports(&mut state, a, b).unwrap();
        assert!(matches!(
            unbind_ports(&mut state, a, b),
            Err(EngineError::OperationAborted { .. })
        ));
    }
}
