//! Fehler-Taxonomie der Engine.
//!
//! "Nicht gefunden" bei Suchen ist bewusst **kein** Fehler (`Option::None`),
//! und ein erreichtes Propagations-Limit ist ein Teilergebnis
//! (`ReconnectionResult::pending_count`), ebenfalls kein Fehler.

use crate::core::{Domain, ElementId, PortId};
use thiserror::Error;

/// Result-Alias für Engine-Operationen.
pub type EngineResult<T> = Result<T, EngineError>;

/// Alle Fehlerfälle der Kern-Engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Port-ID existiert nicht im Netzwerk
    #[error("Port {0} existiert nicht im Netzwerk")]
    PortNotFound(PortId),

    /// Element-ID existiert nicht im Netzwerk
    #[error("Element {0} existiert nicht im Netzwerk")]
    ElementNotFound(ElementId),

    /// Port ist bereits an einen anderen Peer gebunden
    #[error("Port {0} ist bereits gebunden")]
    PortAlreadyBound(PortId),

    /// Ports unterschiedlicher Domänen dürfen nie verbunden werden
    #[error("Domänen passen nicht zusammen: {a:?} / {b:?}")]
    DomainMismatch { a: Domain, b: Domain },

    /// Geometrie lässt keine wohldefinierte Lösung zu (z.B. Null-Vektoren)
    #[error("geometrische Degeneration: {0}")]
    GeometricDegeneracy(String),

    /// Atomare Operation abgebrochen; alle Zwischenschritte wurden verworfen
    #[error("Operation abgebrochen: {reason}")]
    OperationAborted { reason: String },
}

impl EngineError {
    /// Abbruch-Fehler mit Begründung (Kurzform für die Use-Cases).
    pub fn aborted(reason: impl Into<String>) -> Self {
        Self::OperationAborted {
            reason: reason.into(),
        }
    }
}
