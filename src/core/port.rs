//! Ports (Connectoren): typisierte, orientierte Anschlusspunkte an Elementen.

use glam::{DQuat, DVec3};

use super::ElementId;

/// Stabile ID eines Ports im Netzwerk-Arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortId(pub u64);

impl std::fmt::Display for PortId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Physikalische Domäne eines Ports.
///
/// Ports unterschiedlicher Domänen werden nie miteinander verbunden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Domain {
    /// Rohrleitungen (Sanitär, Heizung)
    Piping,
    /// Lüftungskanäle
    Hvac,
    /// Elektro-Leerrohre
    Electrical,
    /// Kabeltrassen
    CableTray,
    /// Generisch/virtuell — wird von der Propagation nie erfasst
    #[default]
    Undefined,
}

impl Domain {
    /// Domänen, deren Verbindungen beim Verschieben erfasst und
    /// wiederhergestellt werden (keine generischen/virtuellen Ports).
    pub fn is_captured(&self) -> bool {
        matches!(self, Domain::Piping | Domain::Hvac | Domain::Electrical)
    }
}

/// Form-/Größenbeschreibung des Anschlussquerschnitts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PortShape {
    /// Runder Querschnitt
    Round { diameter: f64 },
    /// Rechteckiger Querschnitt
    Rectangular { width: f64, height: f64 },
    /// Ovaler Querschnitt
    Oval { width: f64, height: f64 },
}

/// Lokales, rechtshändiges Orientierungs-Dreibein eines Ports.
///
/// `primary` ist die Verbindungsachse (zeigt aus dem Element heraus).
/// `secondary`/`tertiary` dienen als Ausweich-Achsen für den degenerierten
/// 180°-Fall der Ausrichtung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortFrame {
    /// Verbindungsachse
    pub primary: DVec3,
    /// Erste Querachse
    pub secondary: DVec3,
    /// Zweite Querachse
    pub tertiary: DVec3,
}

impl PortFrame {
    /// Baut ein Dreibein aus der Verbindungsachse; Querachsen werden
    /// orthonormal ergänzt. `primary` muss nicht normalisiert sein.
    pub fn from_primary(primary: DVec3) -> Self {
        match primary.try_normalize() {
            Some(p) => {
                let (s, t) = p.any_orthonormal_pair();
                Self {
                    primary,
                    secondary: s,
                    tertiary: t,
                }
            }
            // Null-Achse bleibt erhalten — die Ausrichtung meldet das später
            // als GeometricDegeneracy statt hier zu raten.
            None => Self {
                primary,
                secondary: DVec3::ZERO,
                tertiary: DVec3::ZERO,
            },
        }
    }

    /// Rotiert alle drei Achsen mit der gegebenen Quaternion.
    pub fn rotated(&self, rotation: DQuat) -> Self {
        Self {
            primary: rotation * self.primary,
            secondary: rotation * self.secondary,
            tertiary: rotation * self.tertiary,
        }
    }
}

/// Anschlusspunkt an genau einem Element (Rück-Referenz, kein Besitz).
///
/// Verbindungszustand: entweder *frei* oder an genau einen Peer-Port
/// gebunden. `peer` wird ausschließlich über
/// [`ConduitNetwork::bind`](super::ConduitNetwork::bind) /
/// [`ConduitNetwork::unbind`](super::ConduitNetwork::unbind) verändert,
/// damit die Symmetrie-Invariante nie verletzt wird.
#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    /// Stabile ID
    pub id: PortId,
    /// Besitzendes Element
    pub element: ElementId,
    /// 3D-Ursprung
    pub origin: DVec3,
    /// Lokales Orientierungs-Dreibein
    pub frame: PortFrame,
    /// Physikalische Domäne
    pub domain: Domain,
    /// Querschnittsbeschreibung
    pub shape: PortShape,
    pub(crate) peer: Option<PortId>,
}

impl Port {
    /// Aktueller Peer-Port, falls gebunden.
    pub fn peer(&self) -> Option<PortId> {
        self.peer
    }

    /// Gibt `true` zurück, wenn der Port an keinen Peer gebunden ist.
    pub fn is_free(&self) -> bool {
        self.peer.is_none()
    }
}
