//! Zentrale Konfiguration der Conduit-Engine.
//!
//! `EngineOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Propagation ─────────────────────────────────────────────────────

/// Maximale Anzahl Worklist-Iterationen pro Reconnect-Operation.
/// Begrenzt zyklische oder pathologische Verbindungsgraphen.
pub const PROPAGATION_CAP: usize = 20;

// ── Geometrie-Toleranzen ────────────────────────────────────────────

/// Distanz, unterhalb derer zwei Port-Ursprünge als deckungsgleich gelten.
pub const POSITION_TOLERANCE: f64 = 1e-6;
/// Dot-Toleranz für die Opposing-Klassifikation (`|dot − (−1)| < tol`).
pub const OPPOSING_DOT_TOLERANCE: f64 = crate::solver::OPPOSING_DOT_TOLERANCE;

// ── History ─────────────────────────────────────────────────────────

/// Maximale Tiefe der Undo/Redo-History.
pub const UNDO_DEPTH: usize = 200;

/// Alle zur Laufzeit änderbaren Engine-Optionen.
/// Kann als TOML neben der Host-Anwendung gespeichert werden.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Iterations-Limit der Reconnect-Propagation
    #[serde(default = "default_propagation_cap")]
    pub propagation_cap: usize,
    /// Koinzidenz-Toleranz für Port-Ursprünge (Welteinheiten)
    pub position_tolerance: f64,
    /// Dot-Toleranz für die Opposing-Klassifikation
    pub opposing_dot_tolerance: f64,
    /// Maximale Undo/Redo-Tiefe
    pub undo_depth: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            propagation_cap: PROPAGATION_CAP,
            position_tolerance: POSITION_TOLERANCE,
            opposing_dot_tolerance: OPPOSING_DOT_TOLERANCE,
            undo_depth: UNDO_DEPTH,
        }
    }
}

/// Serde-Default für `propagation_cap` (Abwärtskompatibilität).
fn default_propagation_cap() -> usize {
    PROPAGATION_CAP
}

impl EngineOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }
}
