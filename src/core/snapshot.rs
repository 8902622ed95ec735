//! Flüchtige Verbindungs-Schnappschüsse für die Wiederherstellung
//! nach einer Element-Bewegung.

use glam::DVec3;

use super::{ConduitNetwork, ElementId, PortId};
use crate::error::EngineResult;

/// Eine erfasste Bindung: lokaler Port → Peer-Port samt der Position,
/// die der Peer-Port zum Erfassungszeitpunkt hatte.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotEntry {
    /// Port am erfassten Element
    pub local_port: PortId,
    /// Peer-Port zum Erfassungszeitpunkt
    pub peer_port: PortId,
    /// Element des Peer-Ports
    pub peer_element: ElementId,
    /// Ursprung des Peer-Ports zum Erfassungszeitpunkt
    pub peer_origin: DVec3,
}

/// Erfasst die Bindungen eines Elements unmittelbar vor einem Disconnect
/// und treibt danach deren Wiederherstellung.
///
/// Wird verbraucht, sobald die Wiederherstellung abgeschlossen oder
/// aufgegeben wurde — nie über eine Operation hinaus gehalten.
#[derive(Debug, Clone)]
pub struct ConnectionSnapshot {
    /// Erfasstes Element
    pub element: ElementId,
    /// Erfasste Bindungen in Port-Reihenfolge des Elements
    pub entries: Vec<SnapshotEntry>,
}

impl ConnectionSnapshot {
    /// Erfasst alle gebundenen Ports des Elements in einer physikalischen
    /// Domäne und löst die erfassten Bindungen.
    ///
    /// Generische/virtuelle Ports werden übersprungen.
    pub fn capture(network: &mut ConduitNetwork, element: ElementId) -> EngineResult<Self> {
        let mut entries = Vec::new();
        let port_ids: Vec<PortId> = network.try_element(element)?.ports.clone();

        for local_port in port_ids {
            let Some(port) = network.port(local_port) else {
                continue;
            };
            if !port.domain.is_captured() {
                continue;
            }
            let Some(peer_port) = port.peer() else {
                continue;
            };
            let Some(peer) = network.port(peer_port) else {
                continue;
            };
            entries.push(SnapshotEntry {
                local_port,
                peer_port,
                peer_element: peer.element,
                peer_origin: peer.origin,
            });
            network.unbind(local_port, peer_port);
        }

        Ok(Self { element, entries })
    }

    /// Gibt `true` zurück, wenn keine Bindungen erfasst wurden.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Anzahl der erfassten Bindungen.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
