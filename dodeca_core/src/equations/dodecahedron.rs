//! # Regular Dodecahedron Formulas
//!
//! Closed-form relations between the edge length of a regular dodecahedron
//! (12 pentagonal faces, 30 edges, 20 vertices) and its other measures.
//!
//! ## Notation
//!
//! - `a` = Edge length
//! - `V` = Volume
//! - `S` = Total surface area
//! - `R` = Circumscribed sphere radius (touches all 20 vertices)
//! - `r` = Inscribed sphere radius (touches all 12 faces)
//! - `φ` = Golden ratio, (1 + √5)/2
//!
//! Every measure is a fixed coefficient times a power of `a`, so the
//! inverses are exact. The functions are unit-agnostic: feed centimeters,
//! get cm³ back.
//!
//! ## References
//!
//! - Coxeter, Regular Polytopes, Table I
//! - Wolfram MathWorld, "Regular Dodecahedron"

use once_cell::sync::Lazy;

/// Coefficients `k` in `measure = k · aⁿ`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// V = k·a³, k = (15 + 7√5)/4
    pub volume: f64,
    /// S = k·a², k = 3√(25 + 10√5)
    pub surface_area: f64,
    /// R = k·a, k = √3(1 + √5)/4
    pub circumscribed_radius: f64,
    /// r = k·a, k = √(75 + 30√5)/20
    pub inscribed_radius: f64,
}

/// Coefficients, computed once per process.
pub static COEFFICIENTS: Lazy<Coefficients> = Lazy::new(|| {
    let sqrt5 = 5.0_f64.sqrt();
    Coefficients {
        volume: (15.0 + 7.0 * sqrt5) / 4.0,
        surface_area: 3.0 * (25.0 + 10.0 * sqrt5).sqrt(),
        circumscribed_radius: 3.0_f64.sqrt() * (1.0 + sqrt5) / 4.0,
        inscribed_radius: (75.0 + 30.0 * sqrt5).sqrt() / 20.0,
    }
});

/// Golden ratio φ = (1 + √5)/2
pub static PHI: Lazy<f64> = Lazy::new(|| (1.0 + 5.0_f64.sqrt()) / 2.0);

// =============================================================================
// FORWARD FORMULAS
// Edge length → measure
// =============================================================================

/// Volume of a dodecahedron with edge `a`
///
/// # Formula
/// V = (15 + 7√5)/4 × a³
///
/// # Example
/// ```rust
/// use dodeca_core::equations::dodecahedron::volume;
///
/// assert!((volume(1.0) - 7.6631).abs() < 1e-4);
/// ```
#[inline]
pub fn volume(a: f64) -> f64 {
    COEFFICIENTS.volume * a.powi(3)
}

/// Total surface area of a dodecahedron with edge `a`
///
/// # Formula
/// S = 3√(25 + 10√5) × a²
///
/// Twelve regular pentagons of side `a`.
#[inline]
pub fn surface_area(a: f64) -> f64 {
    COEFFICIENTS.surface_area * a.powi(2)
}

/// Radius of the sphere through all 20 vertices
///
/// # Formula
/// R = √3(1 + √5)/4 × a  (equivalently φ√3/2 × a)
#[inline]
pub fn circumscribed_radius(a: f64) -> f64 {
    COEFFICIENTS.circumscribed_radius * a
}

/// Radius of the sphere tangent to all 12 faces
///
/// # Formula
/// r = √(75 + 30√5)/20 × a
#[inline]
pub fn inscribed_radius(a: f64) -> f64 {
    COEFFICIENTS.inscribed_radius * a
}

// =============================================================================
// INVERSE FORMULAS
// Measure → edge length
// =============================================================================

/// Edge length from volume
///
/// # Formula
/// a = ∛(V / k_V)
#[inline]
pub fn edge_from_volume(v: f64) -> f64 {
    (v / COEFFICIENTS.volume).cbrt()
}

/// Edge length from total surface area
///
/// # Formula
/// a = √(S / k_S)
#[inline]
pub fn edge_from_surface_area(s: f64) -> f64 {
    (s / COEFFICIENTS.surface_area).sqrt()
}

/// Edge length from circumscribed radius
#[inline]
pub fn edge_from_circumscribed_radius(r: f64) -> f64 {
    r / COEFFICIENTS.circumscribed_radius
}

/// Edge length from inscribed radius
#[inline]
pub fn edge_from_inscribed_radius(r: f64) -> f64 {
    r / COEFFICIENTS.inscribed_radius
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_relative(actual: f64, expected: f64, tol: f64) {
        let rel = ((actual - expected) / expected).abs();
        assert!(rel < tol, "expected {}, got {} (rel err {})", expected, actual, rel);
    }

    #[test]
    fn test_unit_edge_golden_values() {
        assert!((volume(1.0) - 7.6631).abs() < 1e-4);
        assert!((surface_area(1.0) - 20.6457).abs() < 1e-4);
        assert!((circumscribed_radius(1.0) - 1.4013).abs() < 1e-4);
        assert!((inscribed_radius(1.0) - 1.1135).abs() < 1e-4);
    }

    #[test]
    fn test_circumscribed_radius_matches_golden_ratio_form() {
        // R = φ√3/2 × a
        let expected = *PHI * 3.0_f64.sqrt() / 2.0;
        assert_relative(circumscribed_radius(1.0), expected, 1e-12);
    }

    #[test]
    fn test_scaling_exponents() {
        // Doubling the edge scales V by 8, S by 4, radii by 2
        assert_relative(volume(2.0), 8.0 * volume(1.0), 1e-12);
        assert_relative(surface_area(2.0), 4.0 * surface_area(1.0), 1e-12);
        assert_relative(circumscribed_radius(2.0), 2.0 * circumscribed_radius(1.0), 1e-12);
        assert_relative(inscribed_radius(2.0), 2.0 * inscribed_radius(1.0), 1e-12);
    }

    #[test]
    fn test_inverses_recover_edge() {
        for &a in &[1e-3, 0.37, 1.0, 4.0, 5.0, 123.456, 1e4] {
            assert_relative(edge_from_volume(volume(a)), a, 1e-9);
            assert_relative(edge_from_surface_area(surface_area(a)), a, 1e-9);
            assert_relative(edge_from_circumscribed_radius(circumscribed_radius(a)), a, 1e-9);
            assert_relative(edge_from_inscribed_radius(inscribed_radius(a)), a, 1e-9);
        }
    }

    #[test]
    fn test_inscribed_smaller_than_circumscribed() {
        assert!(inscribed_radius(3.0) < circumscribed_radius(3.0));
    }
}
