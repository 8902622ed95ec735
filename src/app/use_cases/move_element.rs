//! Use-Case: Element an einen Ziel-Port bewegen und wieder verbinden
//! (atomare Einheit mit Alles-oder-Nichts-Semantik).

use std::sync::Arc;

use crate::app::history::Snapshot;
use crate::app::policy::{OpposingContext, OpposingResolution, ResolutionPolicy};
use crate::app::EditorState;
use crate::core::{ConduitNetwork, ConnectionSnapshot, Placement, PortId};
use crate::error::{EngineError, EngineResult};
use crate::shared::EngineOptions;
use crate::solver::{align_ports, is_opposing};

use super::reconnect::{reconnect, ReconnectionResult};

/// Bewegt das Element des `moving_port` so, dass es am `stationary_port`
/// andockt, und stellt betroffene Bindungen wieder her.
///
/// Opposing-Paare (Achsen antiparallel innerhalb der Toleranz) werden
/// zuerst über die injizierte Richtlinie aufgelöst; alle anderen Paare
/// gehen direkt in Ausrichtung + Propagation. Jeder Fehler und jede
/// Abbruch-Entscheidung verwirft sämtliche Zwischenschritte — der Graph
/// bleibt exakt im Zustand vor der Operation. Erfolgreiche Operationen
/// landen als ein Eintrag auf der Undo-History.
pub fn move_and_reconnect(
    state: &mut EditorState,
    stationary_port: PortId,
    moving_port: PortId,
    policy: &mut dyn ResolutionPolicy,
) -> EngineResult<ReconnectionResult> {
    let Some(pre) = state.network.clone() else {
        return Err(EngineError::aborted("kein Netzwerk geladen"));
    };
    let options = state.options.clone();

    let stationary = pre.try_port(stationary_port)?;
    let moving = pre.try_port(moving_port)?;
    let context = OpposingContext {
        stationary_port,
        moving_port,
        moving_element: moving.element,
    };

    let opposing = is_opposing(stationary, moving, options.opposing_dot_tolerance);
    let outcome = if opposing {
        match policy.resolve(&context) {
            OpposingResolution::Cancel => Err(EngineError::aborted(
                "von der Auflösungs-Richtlinie abgebrochen",
            )),
            OpposingResolution::ExtendCurve => {
                extend_to_target(state, &context, &options)
            }
            OpposingResolution::MoveSingle => {
                move_single(state, &context, &options)
            }
            OpposingResolution::MoveSubgraph => {
                with_network(state, |network| {
                    reconnect(
                        network,
                        context.moving_element,
                        stationary_port,
                        None,
                        &options,
                    )
                })
            }
        }
    } else {
        with_network(state, |network| {
            reconnect(
                network,
                context.moving_element,
                stationary_port,
                None,
                &options,
            )
        })
    };

    match outcome {
        Ok(result) => {
            // Commit: Vor-Zustand als Undo-Eintrag aufnehmen
            state.history.record_snapshot(Snapshot {
                network: Some(pre),
            });
            log::info!(
                "Operation festgeschrieben: {} wiederhergestellt, {} offen",
                result.resolved_count,
                result.pending_count
            );
            Ok(result)
        }
        Err(e) => {
            // Rollback: alle Zwischenschritte verwerfen
            state.network = Some(pre);
            log::warn!("Operation zurückgerollt: {}", e);
            Err(e)
        }
    }
}

/// Führt eine Mutation auf dem COW-Netzwerk aus.
fn with_network<T>(
    state: &mut EditorState,
    f: impl FnOnce(&mut ConduitNetwork) -> EngineResult<T>,
) -> EngineResult<T> {
    let network = state
        .network
        .as_mut()
        .ok_or_else(|| EngineError::aborted("kein Netzwerk geladen"))?;
    f(Arc::make_mut(network))
}

/// ExtendCurve: das gerade Segment entlang der eigenen Achse
/// verlängern/verkürzen, ohne den restlichen Teilgraphen zu bewegen.
fn extend_to_target(
    state: &mut EditorState,
    context: &OpposingContext,
    options: &EngineOptions,
) -> EngineResult<ReconnectionResult> {
    with_network(state, |network| {
        let element = network.try_element(context.moving_element)?;
        let Placement::Run { .. } = element.placement else {
            return Err(EngineError::GeometricDegeneracy(format!(
                "ExtendCurve erfordert ein gerades Segment, {} ist ein Formteil",
                context.moving_element
            )));
        };
        let axis = element
            .placement
            .run_axis()
            .and_then(|a| a.try_normalize())
            .ok_or_else(|| {
                EngineError::GeometricDegeneracy(format!(
                    "Segment {} hat keine Achse",
                    context.moving_element
                ))
            })?;

        let stationary = network.try_port(context.stationary_port)?;
        let moving = network.try_port(context.moving_port)?;

        // Ziel auf die Segment-Achse projizieren
        let delta = stationary.origin - moving.origin;
        let new_origin = moving.origin + axis * delta.dot(axis);
        if new_origin.distance(stationary.origin) > options.position_tolerance {
            return Err(EngineError::aborted(format!(
                "Ziel-Port {} liegt nicht auf der Achse von Segment {}",
                context.stationary_port, context.moving_element
            )));
        }

        network.unbind_port(context.moving_port);
        network.extend_run_endpoint(context.moving_element, context.moving_port, new_origin)?;
        network.bind(context.moving_port, context.stationary_port)?;

        Ok(ReconnectionResult {
            resolved_count: 1,
            pending_count: 0,
        })
    })
}

/// MoveSingle: nur das direkt betroffene Element bewegen. Übrige
/// Bindungen werden gelöst und absichtlich **nicht** wiederhergestellt;
/// ihre Anzahl wird als `pending_count` gemeldet.
fn move_single(
    state: &mut EditorState,
    context: &OpposingContext,
    _options: &EngineOptions,
) -> EngineResult<ReconnectionResult> {
    with_network(state, |network| {
        let snapshot = ConnectionSnapshot::capture(network, context.moving_element)?;

        let stationary = network.try_port(context.stationary_port)?;
        let moving = network.try_port(context.moving_port)?;
        if !stationary.is_free() {
            return Err(EngineError::PortAlreadyBound(context.stationary_port));
        }

        let alignment = align_ports(stationary, moving)?;
        let center = moving.origin;
        network.apply_alignment(context.moving_element, center, &alignment)?;
        network.bind(context.moving_port, context.stationary_port)?;

        let dropped = snapshot
            .entries
            .iter()
            .filter(|e| e.peer_port != context.stationary_port)
            .count();
        if dropped > 0 {
            log::warn!(
                "MoveSingle: {} Alt-Bindung(en) von {} bleiben absichtlich gelöst",
                dropped,
                context.moving_element
            );
        }

        Ok(ReconnectionResult {
            resolved_count: 1,
            pending_count: dropped,
        })
    })
}
