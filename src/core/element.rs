//! Elemente: physische Netzwerk-Mitglieder (gerade Segmente und Formteile).

use glam::DVec3;

use super::{Domain, PortId};

/// Stabile ID eines Elements im Netzwerk-Arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// Geschlossene Art-Aufzählung statt Laufzeit-Typ-Inspektion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Rohrsegment
    Pipe,
    /// Lüftungskanal-Segment
    Duct,
    /// Kabeltrassen-Segment
    CableTray,
    /// Elektro-Leerrohr-Segment
    Conduit,
    /// Formteil (Bogen, T-Stück, Übergang, ...)
    Fitting,
}

impl ElementKind {
    /// Gibt `true` zurück für Formteile (Punkt-Platzierung statt Kurve).
    pub fn is_fitting(&self) -> bool {
        matches!(self, ElementKind::Fitting)
    }
}

/// Geometrische Platzierung eines Elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Gerades Segment als Strecke zwischen zwei Punkten
    Run { start: DVec3, end: DVec3 },
    /// Formteil als Einfügepunkt (Orientierung liegt an den Ports)
    Fitting { origin: DVec3 },
}

impl Placement {
    /// Richtungsachse eines geraden Segments (nicht normalisiert);
    /// `None` für Formteile.
    pub fn run_axis(&self) -> Option<DVec3> {
        match self {
            Placement::Run { start, end } => Some(*end - *start),
            Placement::Fitting { .. } => None,
        }
    }
}

/// Physisches Netzwerk-Mitglied. Besitzt seine Platzierung; die Ports
/// liegen im Netzwerk-Arena und referenzieren das Element zurück.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Stabile ID
    pub id: ElementId,
    /// Art des Elements
    pub kind: ElementKind,
    /// Netzwerk-Domäne des Elements
    pub domain: Domain,
    /// Geometrische Platzierung
    pub placement: Placement,
    /// Ports dieses Elements (Einfüge-Reihenfolge)
    pub ports: Vec<PortId>,
}
