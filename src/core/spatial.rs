//! Spatial-Index (KD-Tree) für schnelle Port-Abfragen im 3D-Raum.

use std::collections::HashMap;

use glam::DVec3;
use kiddo::{KdTree, SquaredEuclidean};

use crate::core::{Port, PortId};

/// Ergebnis einer Distanzabfrage gegen den Spatial-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialMatch {
    /// ID des gefundenen Ports
    pub port_id: PortId,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f64,
}

/// Read-only Spatial-Index über allen Port-Ursprüngen eines Netzwerks.
#[derive(Debug, Clone)]
pub struct PortIndex {
    tree: KdTree<f64, 3>,
    port_ids: Vec<PortId>,
}

impl PortIndex {
    /// Erstellt einen leeren Spatial-Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 3]>::new()).into(),
            port_ids: Vec::new(),
        }
    }

    /// Baut einen neuen Index aus den übergebenen Ports.
    pub fn from_ports(ports: &HashMap<PortId, Port>) -> Self {
        let mut port_ids: Vec<PortId> = ports.keys().copied().collect();
        port_ids.sort_unstable();

        let entries: Vec<[f64; 3]> = port_ids
            .iter()
            .filter_map(|id| {
                ports
                    .get(id)
                    .map(|port| [port.origin.x, port.origin.y, port.origin.z])
            })
            .collect();

        let tree: KdTree<f64, 3> = (&entries).into();

        Self { tree, port_ids }
    }

    /// Gibt die Anzahl indexierter Ports zurück.
    pub fn len(&self) -> usize {
        self.port_ids.len()
    }

    /// Gibt `true` zurück, wenn keine Ports im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.port_ids.is_empty()
    }

    /// Findet den nächsten Port zur gegebenen Weltposition.
    pub fn nearest(&self, query: DVec3) -> Option<SpatialMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[query.x, query.y, query.z]);
        let port_id = *self.port_ids.get(result.item as usize)?;

        Some(SpatialMatch {
            port_id,
            distance: result.distance.sqrt(),
        })
    }

    /// Findet alle Ports innerhalb eines Radius um die Query-Position,
    /// sortiert nach aufsteigender Distanz.
    pub fn within_radius(&self, query: DVec3, radius: f64) -> Vec<SpatialMatch> {
        if self.is_empty() || radius.is_sign_negative() {
            return Vec::new();
        }

        let mut results = self
            .tree
            .within::<SquaredEuclidean>(&[query.x, query.y, query.z], radius * radius)
            .into_iter()
            .filter_map(|entry| {
                let port_id = *self.port_ids.get(entry.item as usize)?;
                Some(SpatialMatch {
                    port_id,
                    distance: entry.distance.sqrt(),
                })
            })
            .collect::<Vec<_>>();

        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Domain, ElementId, PortFrame, PortShape};

    fn sample_ports() -> HashMap<PortId, Port> {
        let mut ports = HashMap::new();
        for (id, origin) in [
            (1, DVec3::new(0.0, 0.0, 0.0)),
            (2, DVec3::new(10.0, 0.0, 0.0)),
            (3, DVec3::new(4.0, 3.0, 0.0)),
        ] {
            ports.insert(
                PortId(id),
                Port {
                    id: PortId(id),
                    element: ElementId(1),
                    origin,
                    frame: PortFrame::from_primary(DVec3::Z),
                    domain: Domain::Piping,
                    shape: PortShape::Round { diameter: 0.05 },
                    peer: None,
                },
            );
        }
        ports
    }

    #[test]
    fn nearest_returns_expected_port() {
        let index = PortIndex::from_ports(&sample_ports());
        let nearest = index
            .nearest(DVec3::new(3.9, 2.9, 0.1))
            .expect("Treffer erwartet");

        assert_eq!(nearest.port_id, PortId(3));
        assert!(nearest.distance < 0.2);
    }

    #[test]
    fn radius_query_returns_sorted_matches() {
        let index = PortIndex::from_ports(&sample_ports());
        let matches = index.within_radius(DVec3::ZERO, 6.0);

        let ids: Vec<PortId> = matches.into_iter().map(|m| m.port_id).collect();
        assert_eq!(ids, vec![PortId(1), PortId(3)]);
    }

    #[test]
    fn empty_index_has_no_entries() {
        let index = PortIndex::empty();

        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.nearest(DVec3::ZERO).is_none());
    }
}
