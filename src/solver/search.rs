//! Connector-Suche: nächste/fernste/domänen-gefilterte Ports.
//!
//! Alle Vergleiche sind strikt (`<` bzw. `>`) — bei Gleichstand gewinnt
//! der zuerst iterierte Kandidat. Leere Eingaben liefern `None`,
//! nie einen Fehler; ob "kein Kandidat" fatal ist, entscheidet der Aufrufer.

use glam::DVec3;

use crate::core::{Domain, Port};

/// Findet den Port mit dem geringsten Abstand zum Referenzpunkt.
pub fn find_nearest<'a, I>(ports: I, point: DVec3) -> Option<&'a Port>
where
    I: IntoIterator<Item = &'a Port>,
{
    let mut best: Option<(&Port, f64)> = None;
    for port in ports {
        let dist = port.origin.distance_squared(point);
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((port, dist));
        }
    }
    best.map(|(port, _)| port)
}

/// Findet den Port mit dem größten Abstand zum Referenzpunkt.
pub fn find_farthest<'a, I>(ports: I, point: DVec3) -> Option<&'a Port>
where
    I: IntoIterator<Item = &'a Port>,
{
    let mut best: Option<(&Port, f64)> = None;
    for port in ports {
        let dist = port.origin.distance_squared(point);
        if best.map_or(true, |(_, d)| dist > d) {
            best = Some((port, dist));
        }
    }
    best.map(|(port, _)| port)
}

/// Findet das Paar (ein Port aus `a`, einer aus `b`) mit dem geringsten
/// Ursprungs-Abstand.
pub fn closest_pair<'a>(a: &[&'a Port], b: &[&'a Port]) -> Option<(&'a Port, &'a Port)> {
    let mut best: Option<((&Port, &Port), f64)> = None;
    for pa in a {
        for pb in b {
            let dist = pa.origin.distance_squared(pb.origin);
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some(((pa, pb), dist));
            }
        }
    }
    best.map(|(pair, _)| pair)
}

/// Findet unter `ports` den freien Port der gewünschten Domäne, der einem
/// der Referenz-Ports am nächsten liegt.
///
/// Bereits gebundene Ports und fremde Domänen werden stillschweigend
/// übersprungen — null Kandidaten sind kein Fehler.
pub fn find_nearest_in_domain<'a, I, J>(
    ports: I,
    reference_ports: J,
    domain: Domain,
) -> Option<&'a Port>
where
    I: IntoIterator<Item = &'a Port>,
    J: IntoIterator<Item = &'a Port>,
{
    let references: Vec<DVec3> = reference_ports.into_iter().map(|p| p.origin).collect();
    if references.is_empty() {
        return None;
    }

    let mut best: Option<(&Port, f64)> = None;
    for port in ports {
        if port.domain != domain || !port.is_free() {
            continue;
        }
        for reference in &references {
            let dist = port.origin.distance_squared(*reference);
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((port, dist));
            }
        }
    }
    best.map(|(port, _)| port)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ElementId, PortFrame, PortId, PortShape};

    fn port(id: u64, origin: DVec3, domain: Domain, bound: bool) -> Port {
        Port {
            id: PortId(id),
            element: ElementId(1),
            origin,
            frame: PortFrame::from_primary(DVec3::Z),
            domain,
            shape: PortShape::Round { diameter: 0.05 },
            peer: bound.then_some(PortId(999)),
        }
    }

    #[test]
    fn nearest_and_farthest() {
        let ports = vec![
            port(1, DVec3::new(1.0, 0.0, 0.0), Domain::Piping, false),
            port(2, DVec3::new(5.0, 0.0, 0.0), Domain::Piping, false),
            port(3, DVec3::new(2.0, 2.0, 0.0), Domain::Piping, false),
        ];

        let nearest = find_nearest(ports.iter(), DVec3::ZERO).expect("Treffer erwartet");
        assert_eq!(nearest.id, PortId(1));

        let farthest = find_farthest(ports.iter(), DVec3::ZERO).expect("Treffer erwartet");
        assert_eq!(farthest.id, PortId(2));
    }

    #[test]
    fn empty_input_yields_none() {
        let ports: Vec<Port> = Vec::new();
        assert!(find_nearest(ports.iter(), DVec3::ZERO).is_none());
        assert!(find_farthest(ports.iter(), DVec3::ZERO).is_none());
        assert!(find_nearest_in_domain(ports.iter(), ports.iter(), Domain::Piping).is_none());
    }

    #[test]
    fn tie_break_keeps_first_encountered() {
        // Zwei Ports mit exakt gleichem Abstand — der erste gewinnt
        let ports = vec![
            port(1, DVec3::new(1.0, 0.0, 0.0), Domain::Piping, false),
            port(2, DVec3::new(-1.0, 0.0, 0.0), Domain::Piping, false),
        ];
        let nearest = find_nearest(ports.iter(), DVec3::ZERO).unwrap();
        assert_eq!(nearest.id, PortId(1));
    }

    #[test]
    fn domain_search_skips_bound_and_foreign_ports() {
        let candidates = vec![
            port(1, DVec3::new(1.0, 0.0, 0.0), Domain::Hvac, false),
            port(2, DVec3::new(2.0, 0.0, 0.0), Domain::Piping, true),
            port(3, DVec3::new(3.0, 0.0, 0.0), Domain::Piping, false),
        ];
        let references = vec![port(10, DVec3::ZERO, Domain::Piping, false)];

        let hit = find_nearest_in_domain(candidates.iter(), references.iter(), Domain::Piping)
            .expect("Treffer erwartet");
        assert_eq!(hit.id, PortId(3));
    }

    #[test]
    fn domain_search_with_only_bound_candidates_yields_none() {
        let candidates = vec![port(1, DVec3::X, Domain::Piping, true)];
        let references = vec![port(10, DVec3::ZERO, Domain::Piping, false)];
        assert!(
            find_nearest_in_domain(candidates.iter(), references.iter(), Domain::Piping).is_none()
        );
    }

    #[test]
    fn closest_pair_picks_minimal_distance() {
        let left = vec![
            port(1, DVec3::new(0.0, 0.0, 0.0), Domain::Piping, false),
            port(2, DVec3::new(10.0, 0.0, 0.0), Domain::Piping, false),
        ];
        let right = vec![
            port(3, DVec3::new(11.0, 0.0, 0.0), Domain::Piping, false),
            port(4, DVec3::new(50.0, 0.0, 0.0), Domain::Piping, false),
        ];
        let left_refs: Vec<&Port> = left.iter().collect();
        let right_refs: Vec<&Port> = right.iter().collect();

        let (a, b) = closest_pair(&left_refs, &right_refs).expect("Paar erwartet");
        assert_eq!((a.id, b.id), (PortId(2), PortId(3)));
    }
}
