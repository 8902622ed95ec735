//! Ausrichtungs-Solver: Rotation + Translation, um zwei Ports zu verheiraten.
//!
//! Nach Anwendung der Rotation (um den Ursprung des bewegten Ports) und der
//! Translation fällt der Ursprung des bewegten Ports mit dem des
//! stationären zusammen und seine Achse zeigt dessen Achse **entgegen**.

use glam::DVec3;

use crate::core::Port;
use crate::error::{EngineError, EngineResult};

/// Rotationen unterhalb dieses Winkels sind numerische No-Ops.
pub const ALIGN_ANGLE_EPS: f64 = 1e-6;
/// Dot-Schwelle, ab der zwei Achsen als antiparallel gelten.
pub const ANTIPARALLEL_DOT: f64 = -0.9999;
/// Unterhalb dieser Quadratlänge gilt das Kreuzprodukt als degeneriert.
const AXIS_LENGTH_SQ_EPS: f64 = 1e-12;

/// Standard-Toleranz für die Opposing-Klassifikation: `|dot − (−1)| < 0.001`.
pub const OPPOSING_DOT_TOLERANCE: f64 = 0.001;

/// Ergebnis der Ausrichtung: Rotationsachse, Winkel und Translation.
///
/// Die Rotation ist um den Ursprung des bewegten Ports auszuführen; die
/// Translation gilt danach (bei Rotation um den eigenen Ursprung bleibt
/// sie die einfache Ursprungs-Differenz).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortAlignment {
    /// Normalisierte Rotationsachse (Null-Vektor wenn keine Rotation nötig)
    pub axis: DVec3,
    /// Rotationswinkel in Radiant
    pub angle: f64,
    /// Translation nach der Rotation
    pub translation: DVec3,
}

impl PortAlignment {
    /// Gibt `true` zurück, wenn die Rotation tatsächlich auszuführen ist.
    pub fn needs_rotation(&self) -> bool {
        self.angle > ALIGN_ANGLE_EPS
    }
}

/// Berechnet die starre Bewegung, die den bewegten Port `moving` auf den
/// stationären Port `stationary` ausrichtet (Achsen antiparallel,
/// Ursprünge deckungsgleich).
pub fn align_ports(stationary: &Port, moving: &Port) -> EngineResult<PortAlignment> {
    let s_dir = stationary.frame.primary.try_normalize().ok_or_else(|| {
        EngineError::GeometricDegeneracy(format!(
            "Port {} hat eine Null-Orientierung",
            stationary.id
        ))
    })?;
    let m_dir = moving.frame.primary.try_normalize().ok_or_else(|| {
        EngineError::GeometricDegeneracy(format!("Port {} hat eine Null-Orientierung", moving.id))
    })?;

    // Zielrichtung des bewegten Ports: der stationären Achse entgegen
    let desired = -s_dir;
    let dot = m_dir.dot(desired).clamp(-1.0, 1.0);
    let mut angle = dot.acos();

    let cross = m_dir.cross(desired);
    let axis = if cross.length_squared() < AXIS_LENGTH_SQ_EPS {
        if m_dir.dot(s_dir) < ANTIPARALLEL_DOT {
            // Bereits entgegengesetzt — keine Rotation nötig
            angle = 0.0;
            DVec3::ZERO
        } else {
            // Achsen zeigen in dieselbe Richtung: 180°-Flip um eine
            // beliebige Querachse des bewegten Ports
            angle = std::f64::consts::PI;
            let fallback = moving
                .frame
                .secondary
                .try_normalize()
                .or_else(|| moving.frame.tertiary.try_normalize())
                .ok_or_else(|| {
                    EngineError::GeometricDegeneracy(format!(
                        "Port {} hat kein nutzbares Dreibein für den 180°-Flip",
                        moving.id
                    ))
                })?;
            fallback
        }
    } else {
        cross.normalize()
    };

    // Rotation um den Ursprung des bewegten Ports lässt diesen fix —
    // die Translation bleibt die einfache Ursprungs-Differenz.
    let translation = stationary.origin - moving.origin;

    Ok(PortAlignment {
        axis,
        angle,
        translation,
    })
}

/// Klassifiziert zwei Ports als "opposing" (Achsen antiparallel innerhalb
/// der Toleranz). Ports mit Null-Orientierung sind nie opposing.
pub fn is_opposing(a: &Port, b: &Port, dot_tolerance: f64) -> bool {
    let (Some(a_dir), Some(b_dir)) = (
        a.frame.primary.try_normalize(),
        b.frame.primary.try_normalize(),
    ) else {
        return false;
    };
    (a_dir.dot(b_dir) - (-1.0)).abs() < dot_tolerance
}
