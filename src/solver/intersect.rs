//! Schnitt-Solver: nächstliegende Punkte zweier (windschiefer) Geraden.

use glam::DVec3;

/// Unterhalb dieser Determinante gelten die Geraden als parallel.
pub const PARALLEL_DEN_EPS: f64 = 1e-8;

/// Liefert den Punkt, der den Schnitt einer Haupt- und einer Abzweig-Gerade
/// für Ausrichtungszwecke am besten repräsentiert.
///
/// Berechnet die nächstliegenden Punkte beider Geraden (Parameter `s` auf
/// der Haupt-, `t` auf der Abzweig-Geraden) und gibt deren **Mittelpunkt**
/// zurück — nicht den Punkt einer der beiden Geraden. Für nicht exakt
/// schneidende Geraden (der Normalfall bei Abzweigen) ist das ein
/// symmetrisches, stabiles Ziel; die Näherung ist beabsichtigt.
pub fn intersect_lines(
    main_a: DVec3,
    main_b: DVec3,
    branch_a: DVec3,
    branch_b: DVec3,
) -> DVec3 {
    let d1 = main_b - main_a;
    let d2 = branch_b - branch_a;
    let r = main_a - branch_a;

    let a = d1.dot(d1);
    let b = d1.dot(d2);
    let c = d2.dot(d2);
    let d = d1.dot(r);
    let e = d2.dot(r);
    let den = a * c - b * b;

    let (s, t) = if den < PARALLEL_DEN_EPS {
        // Parallel innerhalb der Toleranz: degenerations-sichere
        // Ein-Parameter-Lösung
        let t = if b <= c { e / c } else { d / b };
        (0.0, t)
    } else {
        ((b * e - c * d) / den, (a * e - b * d) / den)
    };

    let on_main = main_a + d1 * s;
    let on_branch = branch_a + d2 * t;
    (on_main + on_branch) * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn branch_extended_meets_main() {
        // Hauptleitung entlang X, Abzweig senkrecht darüber — die
        // verlängerte Abzweig-Gerade trifft die Hauptleitung bei (5,0,0)
        let point = intersect_lines(
            DVec3::ZERO,
            DVec3::new(10.0, 0.0, 0.0),
            DVec3::new(5.0, 5.0, 0.0),
            DVec3::new(5.0, 1.0, 0.0),
        );

        assert_relative_eq!(point.x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(point.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(point.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn skew_lines_yield_midpoint() {
        // Windschiefe Geraden mit Abstand 2 entlang Z → Mittelpunkt bei z=1
        let point = intersect_lines(
            DVec3::ZERO,
            DVec3::new(10.0, 0.0, 0.0),
            DVec3::new(5.0, -5.0, 2.0),
            DVec3::new(5.0, 5.0, 2.0),
        );

        assert_relative_eq!(point.x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(point.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(point.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn parallel_lines_use_fallback() {
        // Parallele Geraden: s = 0, t projiziert main_a auf die Abzweig-Gerade
        let point = intersect_lines(
            DVec3::ZERO,
            DVec3::new(10.0, 0.0, 0.0),
            DVec3::new(0.0, 2.0, 0.0),
            DVec3::new(10.0, 2.0, 0.0),
        );

        assert_relative_eq!(point.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(point.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn truly_intersecting_lines_return_the_intersection() {
        let point = intersect_lines(
            DVec3::new(-1.0, -1.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(-1.0, 1.0, 0.0),
            DVec3::new(1.0, -1.0, 0.0),
        );

        assert_relative_eq!(point.length(), 0.0, epsilon = 1e-12);
    }
}
