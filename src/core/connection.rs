//! Repräsentiert eine Verbindung zwischen zwei gebundenen Ports.

use super::PortId;

/// Ungeordnetes Paar gebundener Ports.
///
/// Wird ausschließlich durch explizites `bind` erzeugt und durch
/// explizites `unbind` zerstört. Pro Port existiert höchstens eine
/// Verbindung.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    /// Erster Port (kanonisch: kleinere ID)
    pub a: PortId,
    /// Zweiter Port (kanonisch: größere ID)
    pub b: PortId,
}

impl Connection {
    /// Erstellt eine Verbindung in kanonischer Ordnung.
    pub fn new(a: PortId, b: PortId) -> Self {
        let (a, b) = Self::key(a, b);
        Self { a, b }
    }

    /// Kanonischer Map-Schlüssel: (min, max) — macht das Paar ungeordnet.
    pub fn key(a: PortId, b: PortId) -> (PortId, PortId) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Gibt den jeweils anderen Port zurück, falls `port` beteiligt ist.
    pub fn other(&self, port: PortId) -> Option<PortId> {
        if port == self.a {
            Some(self.b)
        } else if port == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}
