//! Auflösungs-Richtlinie für den Opposing-Fall.
//!
//! Ersetzt den modalen Auswahl-Dialog des interaktiven Hosts durch einen
//! injizierten Callback. In Tests und nicht-interaktiven Kontexten genügt
//! eine vorab festgelegte Entscheidung.

use crate::core::{ElementId, PortId};

/// Entscheidung, wie zwei opposing Ports zusammengeführt werden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpposingResolution {
    /// Bewegtes Segment entlang der eigenen Achse verlängern/verkürzen;
    /// der restliche Teilgraph bleibt unbewegt
    ExtendCurve,
    /// Nur das direkt betroffene Element bewegen; übrige Bindungen
    /// werden gelöst und nicht wiederhergestellt
    MoveSingle,
    /// Element bewegen und durch den verbundenen Teilgraphen propagieren
    MoveSubgraph,
    /// Operation abbrechen (vollständiger Rollback)
    Cancel,
}

/// Kontext der anstehenden Entscheidung.
#[derive(Debug, Clone, Copy)]
pub struct OpposingContext {
    /// Stationärer Ziel-Port
    pub stationary_port: PortId,
    /// Port am bewegten Element
    pub moving_port: PortId,
    /// Das zu bewegende Element
    pub moving_element: ElementId,
}

/// Von außen gelieferte Entscheidungs-Richtlinie (interaktiv oder
/// programmatisch). Wird synchron genau einmal pro Opposing-Fall befragt.
pub trait ResolutionPolicy {
    /// Liefert die Entscheidung für den gegebenen Kontext.
    fn resolve(&mut self, context: &OpposingContext) -> OpposingResolution;
}

/// Vorab festgelegte Entscheidung als Richtlinie.
impl ResolutionPolicy for OpposingResolution {
    fn resolve(&mut self, _context: &OpposingContext) -> OpposingResolution {
        *self
    }
}

impl<F> ResolutionPolicy for F
where
    F: FnMut(&OpposingContext) -> OpposingResolution,
{
    fn resolve(&mut self, context: &OpposingContext) -> OpposingResolution {
        self(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_policy_returns_itself() {
        let context = OpposingContext {
            stationary_port: PortId(1),
            moving_port: PortId(2),
            moving_element: ElementId(1),
        };
        let mut policy = OpposingResolution::MoveSubgraph;
        assert_eq!(policy.resolve(&context), OpposingResolution::MoveSubgraph);
    }

    #[test]
    fn closure_policy_sees_context() {
        let context = OpposingContext {
            stationary_port: PortId(7),
            moving_port: PortId(8),
            moving_element: ElementId(3),
        };
        let mut policy = |ctx: &OpposingContext| {
            if ctx.moving_element == ElementId(3) {
                OpposingResolution::ExtendCurve
            } else {
                OpposingResolution::Cancel
            }
        };
        assert_eq!(policy.resolve(&context), OpposingResolution::ExtendCurve);
    }
}
