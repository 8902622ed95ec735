//! Die zentrale Netzwerk-Datenstruktur mit Elementen, Ports, Verbindungen
//! und Spatial-Index (Arena mit stabilen IDs).

use glam::{DQuat, DVec3};
use indexmap::IndexMap;
use std::collections::HashMap;

use super::{Connection, Domain, Element, ElementId, ElementKind, Placement, Port, PortFrame,
    PortId, PortShape};
use super::{PortIndex, SpatialMatch};
use crate::error::{EngineError, EngineResult};
use crate::solver::align::PortAlignment;

/// Container für ein vollständiges Leitungsnetz.
///
/// Elemente und Ports liegen in Arenen und werden während einer
/// Propagation ausschließlich über ihre stabilen IDs angesprochen —
/// nie über Live-Referenzen.
#[derive(Debug, Clone)]
pub struct ConduitNetwork {
    /// Alle Elemente, indexiert nach ihrer ID
    elements: HashMap<ElementId, Element>,
    /// Alle Ports, indexiert nach ihrer ID
    ports: HashMap<PortId, Port>,
    /// Alle Verbindungen, kanonisch nach (min, max) indexiert.
    /// IndexMap hält die Einfüge-Reihenfolge deterministisch.
    connections: IndexMap<(PortId, PortId), Connection>,
    /// Persistenter Spatial-Index für schnelle Port-Abfragen
    spatial_index: PortIndex,
    next_element_id: u64,
    next_port_id: u64,
}

impl ConduitNetwork {
    /// Erstellt ein neues, leeres Netzwerk.
    pub fn new() -> Self {
        Self {
            elements: HashMap::new(),
            ports: HashMap::new(),
            connections: IndexMap::new(),
            spatial_index: PortIndex::empty(),
            next_element_id: 1,
            next_port_id: 1,
        }
    }

    // ── Elemente ────────────────────────────────────────────────────

    /// Fügt ein Element hinzu und vergibt die nächste freie ID.
    pub fn add_element(
        &mut self,
        kind: ElementKind,
        domain: Domain,
        placement: Placement,
    ) -> ElementId {
        let id = ElementId(self.next_element_id);
        self.next_element_id += 1;
        self.elements.insert(
            id,
            Element {
                id,
                kind,
                domain,
                placement,
                ports: Vec::new(),
            },
        );
        id
    }

    /// Entfernt ein Element inklusive seiner Ports und aller betroffenen
    /// Verbindungen. Peers der entfernten Ports werden freigegeben.
    pub fn remove_element(&mut self, element_id: ElementId) -> Option<Element> {
        let removed = self.elements.remove(&element_id)?;
        for &port_id in &removed.ports {
            if let Some(port) = self.ports.remove(&port_id) {
                if let Some(peer_id) = port.peer {
                    self.connections
                        .shift_remove(&Connection::key(port_id, peer_id));
                    if let Some(peer) = self.ports.get_mut(&peer_id) {
                        peer.peer = None;
                    }
                }
            }
        }
        self.rebuild_spatial_index();
        Some(removed)
    }

    /// Liefert ein Element (read-only).
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Liefert ein Element oder `ElementNotFound`.
    pub fn try_element(&self, id: ElementId) -> EngineResult<&Element> {
        self.elements.get(&id).ok_or(EngineError::ElementNotFound(id))
    }

    // ── Ports ───────────────────────────────────────────────────────

    /// Fügt einem Element einen Port hinzu.
    pub fn add_port(
        &mut self,
        element_id: ElementId,
        origin: DVec3,
        frame: PortFrame,
        domain: Domain,
        shape: PortShape,
    ) -> EngineResult<PortId> {
        let element = self
            .elements
            .get_mut(&element_id)
            .ok_or(EngineError::ElementNotFound(element_id))?;

        let id = PortId(self.next_port_id);
        self.next_port_id += 1;
        element.ports.push(id);
        self.ports.insert(
            id,
            Port {
                id,
                element: element_id,
                origin,
                frame,
                domain,
                shape,
                peer: None,
            },
        );
        self.rebuild_spatial_index();
        Ok(id)
    }

    /// Liefert einen Port (read-only).
    pub fn port(&self, id: PortId) -> Option<&Port> {
        self.ports.get(&id)
    }

    /// Liefert einen Port oder `PortNotFound`.
    pub fn try_port(&self, id: PortId) -> EngineResult<&Port> {
        self.ports.get(&id).ok_or(EngineError::PortNotFound(id))
    }

    /// Iterator über die Ports eines Elements.
    pub fn ports_of(&self, element_id: ElementId) -> impl Iterator<Item = &Port> {
        self.elements
            .get(&element_id)
            .into_iter()
            .flat_map(|e| e.ports.iter())
            .filter_map(|id| self.ports.get(id))
    }

    /// Iterator über alle Ports des Netzwerks.
    pub fn ports_iter(&self) -> impl Iterator<Item = &Port> {
        self.ports.values()
    }

    // ── Verbindungen ────────────────────────────────────────────────

    /// Bindet zwei freie Ports gleicher Domäne aneinander.
    ///
    /// Hält die Symmetrie-Invariante: beide `peer`-Felder und der
    /// Verbindungs-Eintrag werden gemeinsam gesetzt.
    pub fn bind(&mut self, a: PortId, b: PortId) -> EngineResult<()> {
        if a == b {
            return Err(EngineError::aborted(format!(
                "Port {a} kann nicht an sich selbst gebunden werden"
            )));
        }
        let port_a = self.try_port(a)?;
        let port_b = self.try_port(b)?;

        if port_a.domain != port_b.domain {
            return Err(EngineError::DomainMismatch {
                a: port_a.domain,
                b: port_b.domain,
            });
        }
        if !port_a.is_free() {
            return Err(EngineError::PortAlreadyBound(a));
        }
        if !port_b.is_free() {
            return Err(EngineError::PortAlreadyBound(b));
        }

        self.connections
            .insert(Connection::key(a, b), Connection::new(a, b));
        if let Some(port) = self.ports.get_mut(&a) {
            port.peer = Some(b);
        }
        if let Some(port) = self.ports.get_mut(&b) {
            port.peer = Some(a);
        }
        Ok(())
    }

    /// Löst die Verbindung zwischen zwei Ports.
    /// Gibt `false` zurück, wenn keine existierte.
    pub fn unbind(&mut self, a: PortId, b: PortId) -> bool {
        if self.connections.shift_remove(&Connection::key(a, b)).is_none() {
            return false;
        }
        if let Some(port) = self.ports.get_mut(&a) {
            port.peer = None;
        }
        if let Some(port) = self.ports.get_mut(&b) {
            port.peer = None;
        }
        true
    }

    /// Löst die Verbindung eines Ports zu seinem Peer.
    /// Gibt die Peer-ID zurück, falls eine Verbindung bestand.
    pub fn unbind_port(&mut self, port_id: PortId) -> Option<PortId> {
        let peer = self.ports.get(&port_id)?.peer?;
        self.unbind(port_id, peer);
        Some(peer)
    }

    /// Prüft ob zwischen zwei Ports eine Verbindung existiert — O(1).
    pub fn has_connection(&self, a: PortId, b: PortId) -> bool {
        self.connections.contains_key(&Connection::key(a, b))
    }

    /// Iterator über alle Verbindungen (Einfüge-Reihenfolge).
    pub fn connections_iter(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    // ── Starre Bewegungen ───────────────────────────────────────────

    /// Verschiebt ein Element (Platzierung und alle Ports) um `delta`.
    pub fn translate_element(&mut self, element_id: ElementId, delta: DVec3) -> EngineResult<()> {
        let element = self
            .elements
            .get_mut(&element_id)
            .ok_or(EngineError::ElementNotFound(element_id))?;

        match &mut element.placement {
            Placement::Run { start, end } => {
                *start += delta;
                *end += delta;
            }
            Placement::Fitting { origin } => *origin += delta,
        }
        for port_id in element.ports.clone() {
            if let Some(port) = self.ports.get_mut(&port_id) {
                port.origin += delta;
            }
        }
        self.rebuild_spatial_index();
        Ok(())
    }

    /// Rotiert ein Element um eine Achse durch `center`.
    pub fn rotate_element_about(
        &mut self,
        element_id: ElementId,
        axis: DVec3,
        angle: f64,
        center: DVec3,
    ) -> EngineResult<()> {
        let rotation = DQuat::from_axis_angle(axis, angle);
        let rotate_point = |p: DVec3| center + rotation * (p - center);

        let element = self
            .elements
            .get_mut(&element_id)
            .ok_or(EngineError::ElementNotFound(element_id))?;

        match &mut element.placement {
            Placement::Run { start, end } => {
                *start = rotate_point(*start);
                *end = rotate_point(*end);
            }
            Placement::Fitting { origin } => *origin = rotate_point(*origin),
        }
        for port_id in element.ports.clone() {
            if let Some(port) = self.ports.get_mut(&port_id) {
                port.origin = rotate_point(port.origin);
                port.frame = port.frame.rotated(rotation);
            }
        }
        self.rebuild_spatial_index();
        Ok(())
    }

    /// Wendet ein Ausrichtungs-Ergebnis auf ein Element an:
    /// erst Rotation um `center`, dann Translation.
    ///
    /// Genau eine starre Bewegung pro Element und Operation.
    pub fn apply_alignment(
        &mut self,
        element_id: ElementId,
        center: DVec3,
        alignment: &PortAlignment,
    ) -> EngineResult<()> {
        if alignment.needs_rotation() {
            self.rotate_element_about(element_id, alignment.axis, alignment.angle, center)?;
        }
        if alignment.translation != DVec3::ZERO {
            self.translate_element(element_id, alignment.translation)?;
        }
        Ok(())
    }

    /// Verlängert/verkürzt ein gerades Segment entlang seiner Achse,
    /// indem der dem Port nähere Endpunkt auf `new_origin` gesetzt wird.
    /// Der Rest des Teilgraphen bleibt unbewegt.
    pub fn extend_run_endpoint(
        &mut self,
        element_id: ElementId,
        port_id: PortId,
        new_origin: DVec3,
    ) -> EngineResult<()> {
        let port_origin = self.try_port(port_id)?.origin;
        let element = self
            .elements
            .get_mut(&element_id)
            .ok_or(EngineError::ElementNotFound(element_id))?;

        let Placement::Run { start, end } = &mut element.placement else {
            return Err(EngineError::GeometricDegeneracy(format!(
                "Element {element_id} ist kein gerades Segment"
            )));
        };
        if port_origin.distance_squared(*start) <= port_origin.distance_squared(*end) {
            *start = new_origin;
        } else {
            *end = new_origin;
        }
        if let Some(port) = self.ports.get_mut(&port_id) {
            port.origin = new_origin;
        }
        self.rebuild_spatial_index();
        Ok(())
    }

    // ── Abfragen / Invarianten ──────────────────────────────────────

    /// Prüft ob zwei Port-Ursprünge innerhalb der Toleranz zusammenfallen.
    pub fn ports_coincident(&self, a: PortId, b: PortId, tolerance: f64) -> bool {
        match (self.ports.get(&a), self.ports.get(&b)) {
            (Some(pa), Some(pb)) => pa.origin.distance_squared(pb.origin) <= tolerance * tolerance,
            _ => false,
        }
    }

    /// Gibt die Anzahl der Elemente zurück.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Gibt die Anzahl der Ports zurück.
    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    /// Gibt die Anzahl der Verbindungen zurück.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Prüft die strukturellen Invarianten des Verbindungsgraphen:
    /// Symmetrie der Bindung, höchstens ein Peer pro Port und
    /// Übereinstimmung zwischen `peer`-Feldern und Verbindungs-Tabelle.
    pub fn validate(&self) -> Result<(), String> {
        for conn in self.connections.values() {
            let a = self
                .ports
                .get(&conn.a)
                .ok_or_else(|| format!("Verbindung referenziert fehlenden Port {}", conn.a))?;
            let b = self
                .ports
                .get(&conn.b)
                .ok_or_else(|| format!("Verbindung referenziert fehlenden Port {}", conn.b))?;
            if a.peer != Some(conn.b) || b.peer != Some(conn.a) {
                return Err(format!(
                    "Bindung {} ↔ {} ist nicht symmetrisch",
                    conn.a, conn.b
                ));
            }
        }
        for port in self.ports.values() {
            if let Some(peer_id) = port.peer {
                if !self.has_connection(port.id, peer_id) {
                    return Err(format!(
                        "Port {} referenziert Peer {} ohne Verbindungs-Eintrag",
                        port.id, peer_id
                    ));
                }
            }
        }
        Ok(())
    }

    // ── Spatial-Index ───────────────────────────────────────────────

    /// Baut den persistenten Spatial-Index aus den aktuellen Ports neu auf.
    pub fn rebuild_spatial_index(&mut self) {
        self.spatial_index = PortIndex::from_ports(&self.ports);
    }

    /// Findet den nächstgelegenen Port zur Weltposition.
    pub fn nearest_port(&self, query: DVec3) -> Option<SpatialMatch> {
        self.spatial_index.nearest(query)
    }

    /// Findet alle Ports innerhalb eines Radius.
    pub fn ports_within_radius(&self, query: DVec3, radius: f64) -> Vec<SpatialMatch> {
        self.spatial_index.within_radius(query, radius)
    }
}

impl Default for ConduitNetwork {
    fn default() -> Self {
        Self::new()
    }
}
