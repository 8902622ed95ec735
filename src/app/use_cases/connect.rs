//! Use-Case: Zwei Ports manuell verbinden.

use std::sync::Arc;

use glam::DVec3;

use crate::app::EditorState;
use crate::core::{ConduitNetwork, PortId};
use crate::error::{EngineError, EngineResult};

/// Bindet zwei freie Ports gleicher Domäne aneinander.
///
/// Die Vorbedingungen werden vor dem Undo-Snapshot geprüft, damit
/// abgelehnte Versuche keinen History-Eintrag hinterlassen.
pub fn bind_ports(state: &mut EditorState, a: PortId, b: PortId) -> EngineResult<()> {
    let network = state
        .network
        .as_ref()
        .ok_or_else(|| EngineError::aborted("kein Netzwerk geladen"))?;

    let port_a = network.try_port(a)?;
    let port_b = network.try_port(b)?;
    if !port_a.is_free() {
        return Err(EngineError::PortAlreadyBound(a));
    }
    if !port_b.is_free() {
        return Err(EngineError::PortAlreadyBound(b));
    }
    if port_a.domain != port_b.domain {
        return Err(EngineError::DomainMismatch {
            a: port_a.domain,
            b: port_b.domain,
        });
    }

    state.record_undo_snapshot();
    let network = state
        .network
        .as_mut()
        .ok_or_else(|| EngineError::aborted("kein Netzwerk geladen"))?;
    Arc::make_mut(network).bind(a, b)?;
    log::info!("Ports {} und {} verbunden", a, b);
    Ok(())
}

/// Sucht über den Spatial-Index den nächstgelegenen **freien** Port
/// innerhalb des Aufnahme-Radius um `position`.
///
/// Gebundene Ports werden übersprungen; die Kandidaten kommen bereits
/// nach Distanz sortiert aus dem Index.
pub fn pick_free_port(network: &ConduitNetwork, position: DVec3, radius: f64) -> Option<PortId> {
    network
        .ports_within_radius(position, radius)
        .into_iter()
        .find(|hit| {
            network
                .port(hit.port_id)
                .is_some_and(|port| port.is_free())
        })
        .map(|hit| hit.port_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Domain, ElementKind, Placement, PortFrame, PortShape};

    fn pipe(network: &mut ConduitNetwork, start: DVec3, end: DVec3) -> (PortId, PortId) {
        let element = network.add_element(
            ElementKind::Pipe,
            Domain::Piping,
            Placement::Run { start, end },
        );
        let axis = (end - start).normalize();
        let shape = PortShape::Round { diameter: 0.05 };
        let p1 = network
            .add_port(element, start, PortFrame::from_primary(-axis), Domain::Piping, shape)
            .unwrap();
        let p2 = network
            .add_port(element, end, PortFrame::from_primary(axis), Domain::Piping, shape)
            .unwrap();
        (p1, p2)
    }

    #[test]
    fn bind_ports_records_undo_entry() {
        let mut network = ConduitNetwork::new();
        let (_, a) = pipe(&mut network, DVec3::ZERO, DVec3::X);
        let (b, _) = pipe(&mut network, DVec3::X, DVec3::X * 2.0);
        let mut state = EditorState::with_network(network);

        bind_ports(&mut state, a, b).expect("bind erwartet");
        assert!(state.history.can_undo());
        assert!(state.network.as_ref().unwrap().has_connection(a, b));

        assert!(state.undo());
        assert!(!state.network.as_ref().unwrap().has_connection(a, b));
    }

    #[test]
    fn rejected_bind_leaves_history_untouched() {
        let mut network = ConduitNetwork::new();
        let (_, a) = pipe(&mut network, DVec3::ZERO, DVec3::X);
        let (b, _) = pipe(&mut network, DVec3::X, DVec3::X * 2.0);
        let (c, _) = pipe(&mut network, DVec3::X, DVec3::X * 3.0);
        let mut state = EditorState::with_network(network);

        bind_ports(&mut state, a, b).unwrap();
        let result = bind_ports(&mut state, a, c);

        assert_eq!(result, Err(EngineError::PortAlreadyBound(a)));
        // Nur der erfolgreiche Bind liegt auf der History
        assert!(state.undo());
        assert!(!state.undo());
    }

    #[test]
    fn pick_skips_bound_ports() {
        let mut network = ConduitNetwork::new();
        let (_, a) = pipe(&mut network, DVec3::ZERO, DVec3::X);
        let (b, _) = pipe(&mut network, DVec3::new(1.0, 0.1, 0.0), DVec3::X * 5.0);
        network.bind(a, b).unwrap();

        // a und b liegen am nächsten, sind aber gebunden
        let picked = pick_free_port(&network, DVec3::X, 10.0);
        assert!(picked.is_some());
        assert_ne!(picked, Some(a));
        assert_ne!(picked, Some(b));

        assert_eq!(pick_free_port(&network, DVec3::X * 100.0, 1.0), None);
    }
}
