//! Use-Case: Wiederverbinden nach einer Element-Bewegung.
//!
//! Arbeitet als begrenzte Worklist statt unbeschränkter Rekursion: jede
//! erfasste Alt-Bindung wird als Aufgabe in eine Queue gestellt und
//! innerhalb eines Iterations-Limits abgearbeitet. Das Limit ist kein
//! Fehler — offene Aufgaben werden als `pending_count` gemeldet.

use std::collections::VecDeque;

use glam::DVec3;

use crate::core::{ConduitNetwork, ConnectionSnapshot, ElementId, PortId};
use crate::error::{EngineError, EngineResult};
use crate::shared::EngineOptions;
use crate::solver::{align_ports, find_nearest, find_nearest_in_domain, is_opposing};

/// Ergebnis einer Reconnect-Operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconnectionResult {
    /// Anzahl wiederhergestellter (oder bereits konsistenter) Bindungen
    pub resolved_count: usize,
    /// Anzahl beim Erreichen des Iterations-Limits offen gebliebener
    /// Bindungen
    pub pending_count: usize,
}

/// Eine offene Wiederherstellungs-Aufgabe.
struct PendingTask {
    /// Das als Nächstes zu bewegende Element
    moving_element: ElementId,
    /// Stationärer Ziel-Port (am bereits bewegten Nachbarn)
    stationary_port: PortId,
    /// Position, die der Alt-Peer-Port zum Erfassungszeitpunkt hatte —
    /// darüber wird der Mating-Port am inzwischen evtl. bewegten Element
    /// wiedergefunden. `None` für die initiale Aufgabe.
    locate_hint: Option<DVec3>,
}

/// Verschiebt `moving_element` so, dass es am Ziel-Port andockt, und stellt
/// anschließend die zuvor bestehenden Bindungen queue-getrieben wieder her.
///
/// `snapshot` kann vom Aufrufer mitgegeben werden, wenn die Bindungen des
/// Elements bereits erfasst und gelöst wurden; sonst erfasst die Operation
/// selbst. Scheitert die initiale Aufgabe, wird der Fehler durchgereicht;
/// Fehlschläge in der Propagation werden geloggt und übersprungen.
pub fn reconnect(
    network: &mut ConduitNetwork,
    moving_element: ElementId,
    target_stationary_port: PortId,
    snapshot: Option<ConnectionSnapshot>,
    options: &EngineOptions,
) -> EngineResult<ReconnectionResult> {
    network.try_element(moving_element)?;
    network.try_port(target_stationary_port)?;

    let mut queue: VecDeque<PendingTask> = VecDeque::new();
    queue.push_back(PendingTask {
        moving_element,
        stationary_port: target_stationary_port,
        locate_hint: None,
    });

    let mut initial_snapshot = snapshot;
    let mut resolved_count = 0usize;
    let mut iterations = 0usize;

    while iterations < options.propagation_cap {
        let Some(task) = queue.pop_front() else {
            break;
        };
        iterations += 1;
        let is_initial = iterations == 1;

        match process_task(network, &task, initial_snapshot.take(), options, &mut queue) {
            Ok(()) => resolved_count += 1,
            Err(e) if is_initial => return Err(e),
            Err(e) => {
                log::warn!(
                    "Wiederherstellung {} → {} übersprungen: {}",
                    task.moving_element,
                    task.stationary_port,
                    e
                );
            }
        }
    }

    let pending_count = queue.len();
    if pending_count > 0 {
        log::warn!(
            "Propagations-Limit ({}) erreicht: {} Bindung(en) bleiben offen",
            options.propagation_cap,
            pending_count
        );
    }
    log::info!(
        "Reconnect von {} abgeschlossen: {} wiederhergestellt, {} offen",
        moving_element,
        resolved_count,
        pending_count
    );

    Ok(ReconnectionResult {
        resolved_count,
        pending_count,
    })
}

/// Verarbeitet eine einzelne Aufgabe: Capture → Transform → Rebind,
/// gefolgt vom Einreihen der erfassten Alt-Bindungen.
fn process_task(
    network: &mut ConduitNetwork,
    task: &PendingTask,
    presupplied_snapshot: Option<ConnectionSnapshot>,
    options: &EngineOptions,
    queue: &mut VecDeque<PendingTask>,
) -> EngineResult<()> {
    let (moving_id, snapshot) = match task.locate_hint {
        // Initiale Aufgabe: erst erfassen und lösen, dann unter den nun
        // freien Ports den Mating-Port suchen
        None => {
            let snapshot = match presupplied_snapshot {
                Some(snap) => snap,
                None => ConnectionSnapshot::capture(network, task.moving_element)?,
            };
            let stationary = network.try_port(task.stationary_port)?;
            let moving = find_nearest_in_domain(
                network.ports_of(task.moving_element),
                std::iter::once(stationary),
                stationary.domain,
            )
            .ok_or_else(|| {
                EngineError::aborted(format!(
                    "kein freier Port passender Domäne an Element {}",
                    task.moving_element
                ))
            })?;
            (moving.id, Some(snapshot))
        }
        // Propagierte Aufgabe: Mating-Port über die Alt-Position des
        // Peer-Ports wiederfinden; Erfassung erst nach den
        // Veraltet-Prüfungen
        Some(hint) => {
            let moving = find_nearest(network.ports_of(task.moving_element), hint)
                .ok_or_else(|| {
                    EngineError::aborted(format!(
                        "Element {} hat keine Ports mehr",
                        task.moving_element
                    ))
                })?;
            (moving.id, None)
        }
    };

    let moving = network.try_port(moving_id)?.clone();
    let stationary = network.try_port(task.stationary_port)?.clone();

    // Bereits konsistent (veraltete Aufgabe nach einem Zyklus)
    if moving.peer() == Some(stationary.id) {
        return Ok(());
    }
    if !moving.is_free() {
        return Err(EngineError::PortAlreadyBound(moving.id));
    }
    if !stationary.is_free() {
        return Err(EngineError::PortAlreadyBound(stationary.id));
    }
    if moving.domain != stationary.domain {
        return Err(EngineError::DomainMismatch {
            a: stationary.domain,
            b: moving.domain,
        });
    }

    // Deckungsgleich und opposing: binden ohne Bewegung. Tritt auf, wenn
    // ein Zyklus durch vorherige Aufgaben bereits starr mitbewegt wurde.
    if network.ports_coincident(moving.id, stationary.id, options.position_tolerance)
        && is_opposing(&stationary, &moving, options.opposing_dot_tolerance)
    {
        network.bind(moving.id, stationary.id)?;
        enqueue_entries(queue, snapshot.as_ref(), stationary.id);
        return Ok(());
    }

    // Transformation vor der Erfassung berechnen — scheitert die
    // Ausrichtung, ist noch nichts gelöst worden
    let alignment = align_ports(&stationary, &moving)?;

    let snapshot = match snapshot {
        Some(snap) => snap,
        None => ConnectionSnapshot::capture(network, task.moving_element)?,
    };

    network.apply_alignment(task.moving_element, moving.origin, &alignment)?;
    network.bind(moving.id, stationary.id)?;
    log::debug!(
        "Element {} an Port {} angedockt (Winkel {:.4} rad)",
        task.moving_element,
        stationary.id,
        alignment.angle
    );

    enqueue_entries(queue, Some(&snapshot), stationary.id);
    Ok(())
}

/// Reiht die erfassten Alt-Bindungen als Folgeaufgaben ein.
/// Die Primärbindung (Peer = Ziel-Port) ist bereits wiederhergestellt.
fn enqueue_entries(
    queue: &mut VecDeque<PendingTask>,
    snapshot: Option<&ConnectionSnapshot>,
    bound_stationary: PortId,
) {
    let Some(snapshot) = snapshot else {
        return;
    };
    for entry in &snapshot.entries {
        if entry.peer_port == bound_stationary {
            continue;
        }
        queue.push_back(PendingTask {
            moving_element: entry.peer_element,
            stationary_port: entry.local_port,
            locate_hint: Some(entry.peer_origin),
        });
    }
}
