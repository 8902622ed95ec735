//! Rein-geometrische Solver: Connector-Suche, Ausrichtung, Geraden-Schnitt.

pub mod align;
pub mod intersect;
pub mod search;

pub use align::{align_ports, is_opposing, PortAlignment};
pub use align::{ALIGN_ANGLE_EPS, ANTIPARALLEL_DOT, OPPOSING_DOT_TOLERANCE};
pub use intersect::{intersect_lines, PARALLEL_DEN_EPS};
pub use search::{closest_pair, find_farthest, find_nearest, find_nearest_in_domain};
