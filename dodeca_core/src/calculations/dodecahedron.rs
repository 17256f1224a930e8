//! # Dodecahedron Parameter Calculator
//!
//! Resolves one canonical edge length from up to two known measures of a
//! regular dodecahedron and derives every other measure from it.
//!
//! ## Resolution Rules
//!
//! 1. Nothing selected → [`CalculatorError::NoParametersSelected`]
//! 2. Any selected value not finite and positive → [`CalculatorError::InvalidValue`]
//! 3. More than [`MAX_SELECTED`] selected → [`CalculatorError::TooManySelected`]
//! 4. Edge length selected → used as-is, other selections are not cross-checked
//! 5. One other measure → inverted to an edge length
//! 6. Two other measures → each inverted; if the edge ratio differs from 1 by
//!    more than [`CONSISTENCY_TOLERANCE`] the request is
//!    [`CalculatorError::InconsistentParameters`], otherwise the mean is used
//! 7. An edge or derived measure that underflows to zero or overflows to
//!    infinity → [`CalculatorError::InvalidValue`] for the input it came from
//!
//! ## Example
//!
//! ```rust
//! use dodeca_core::calculations::dodecahedron::{calculate, ParameterSet, GeometricQuantity};
//! use dodeca_core::equations::{surface_area, volume};
//!
//! let params = ParameterSet::new()
//!     .with_selected(GeometricQuantity::Volume(volume(5.0)))
//!     .with_selected(GeometricQuantity::SurfaceArea(surface_area(5.0)));
//!
//! let props = calculate(&params).unwrap();
//! assert!((props.edge_length - 5.0).abs() < 0.01);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::dodecahedron as eq;
use crate::errors::CalculatorError;
use crate::units::{Dimension, LengthUnit};

/// Maximum number of known quantities the calculator accepts at once
pub const MAX_SELECTED: usize = 2;

/// Allowed relative disagreement between two edge-length candidates (1%)
pub const CONSISTENCY_TOLERANCE: f64 = 0.01;

// ============================================================================
// Quantities
// ============================================================================

/// The five measures the calculator knows about.
///
/// Ordering follows declaration order; it decides which candidate counts as
/// "first" in the consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityKind {
    /// a - edge length
    EdgeLength,
    /// V - volume
    Volume,
    /// S - total surface area
    SurfaceArea,
    /// R - circumscribed sphere radius
    CircumscribedRadius,
    /// r - inscribed sphere radius
    InscribedRadius,
}

impl QuantityKind {
    pub const ALL: [QuantityKind; 5] = [
        QuantityKind::EdgeLength,
        QuantityKind::Volume,
        QuantityKind::SurfaceArea,
        QuantityKind::CircumscribedRadius,
        QuantityKind::InscribedRadius,
    ];

    /// Machine name, matches the JSON representation
    pub fn name(self) -> &'static str {
        match self {
            QuantityKind::EdgeLength => "edge_length",
            QuantityKind::Volume => "volume",
            QuantityKind::SurfaceArea => "surface_area",
            QuantityKind::CircumscribedRadius => "circumscribed_radius",
            QuantityKind::InscribedRadius => "inscribed_radius",
        }
    }

    /// Conventional symbol (a, V, S, R, r)
    pub fn symbol(self) -> &'static str {
        match self {
            QuantityKind::EdgeLength => "a",
            QuantityKind::Volume => "V",
            QuantityKind::SurfaceArea => "S",
            QuantityKind::CircumscribedRadius => "R",
            QuantityKind::InscribedRadius => "r",
        }
    }

    pub fn dimension(self) -> Dimension {
        match self {
            QuantityKind::Volume => Dimension::Volume,
            QuantityKind::SurfaceArea => Dimension::Area,
            QuantityKind::EdgeLength
            | QuantityKind::CircumscribedRadius
            | QuantityKind::InscribedRadius => Dimension::Length,
        }
    }

    /// Value of this measure for a dodecahedron with the given edge
    pub fn from_edge(self, edge: f64) -> f64 {
        match self {
            QuantityKind::EdgeLength => edge,
            QuantityKind::Volume => eq::volume(edge),
            QuantityKind::SurfaceArea => eq::surface_area(edge),
            QuantityKind::CircumscribedRadius => eq::circumscribed_radius(edge),
            QuantityKind::InscribedRadius => eq::inscribed_radius(edge),
        }
    }

    /// Edge length of the dodecahedron whose measure of this kind is `value`
    pub fn edge_from(self, value: f64) -> f64 {
        match self {
            QuantityKind::EdgeLength => value,
            QuantityKind::Volume => eq::edge_from_volume(value),
            QuantityKind::SurfaceArea => eq::edge_from_surface_area(value),
            QuantityKind::CircumscribedRadius => eq::edge_from_circumscribed_radius(value),
            QuantityKind::InscribedRadius => eq::edge_from_inscribed_radius(value),
        }
    }
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A known measure together with its value.
///
/// ## JSON Example
///
/// ```json
/// { "kind": "volume", "value": 957.89 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum GeometricQuantity {
    EdgeLength(f64),
    Volume(f64),
    SurfaceArea(f64),
    CircumscribedRadius(f64),
    InscribedRadius(f64),
}

impl GeometricQuantity {
    pub fn new(kind: QuantityKind, value: f64) -> Self {
        match kind {
            QuantityKind::EdgeLength => GeometricQuantity::EdgeLength(value),
            QuantityKind::Volume => GeometricQuantity::Volume(value),
            QuantityKind::SurfaceArea => GeometricQuantity::SurfaceArea(value),
            QuantityKind::CircumscribedRadius => GeometricQuantity::CircumscribedRadius(value),
            QuantityKind::InscribedRadius => GeometricQuantity::InscribedRadius(value),
        }
    }

    pub fn kind(&self) -> QuantityKind {
        match self {
            GeometricQuantity::EdgeLength(_) => QuantityKind::EdgeLength,
            GeometricQuantity::Volume(_) => QuantityKind::Volume,
            GeometricQuantity::SurfaceArea(_) => QuantityKind::SurfaceArea,
            GeometricQuantity::CircumscribedRadius(_) => QuantityKind::CircumscribedRadius,
            GeometricQuantity::InscribedRadius(_) => QuantityKind::InscribedRadius,
        }
    }

    pub fn value(&self) -> f64 {
        match *self {
            GeometricQuantity::EdgeLength(v)
            | GeometricQuantity::Volume(v)
            | GeometricQuantity::SurfaceArea(v)
            | GeometricQuantity::CircumscribedRadius(v)
            | GeometricQuantity::InscribedRadius(v) => v,
        }
    }

    /// Finite and strictly positive
    pub fn is_valid(&self) -> bool {
        let v = self.value();
        v.is_finite() && v > 0.0
    }
}

// ============================================================================
// Input
// ============================================================================

/// One row of the calculator: whether the measure is known, and its value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterEntry {
    pub selected: bool,
    pub value: f64,
}

/// Calculator input: an optional entry per quantity kind.
///
/// Entries that are present but not selected are carried along (a form keeps
/// the text of unchecked fields) and ignored by [`calculate`].
///
/// ## JSON Example
///
/// ```json
/// {
///   "entries": {
///     "volume": { "selected": true, "value": 957.89 },
///     "inscribed_radius": { "selected": false, "value": 2.78 }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub entries: BTreeMap<QuantityKind, ParameterEntry>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every listed quantity selected. A repeated kind keeps the last value.
    pub fn from_selected(quantities: &[GeometricQuantity]) -> Self {
        quantities
            .iter()
            .fold(Self::new(), |set, q| set.with_selected(*q))
    }

    /// Builder: add a selected quantity
    pub fn with_selected(mut self, quantity: GeometricQuantity) -> Self {
        self.set(quantity.kind(), true, quantity.value());
        self
    }

    /// Builder: add an entry with explicit selection state
    pub fn with_entry(mut self, kind: QuantityKind, selected: bool, value: f64) -> Self {
        self.set(kind, selected, value);
        self
    }

    pub fn set(&mut self, kind: QuantityKind, selected: bool, value: f64) {
        self.entries.insert(kind, ParameterEntry { selected, value });
    }

    pub fn get(&self, kind: QuantityKind) -> Option<&ParameterEntry> {
        self.entries.get(&kind)
    }

    pub fn is_selected(&self, kind: QuantityKind) -> bool {
        self.entries.get(&kind).is_some_and(|e| e.selected)
    }

    /// Selected quantities in kind order
    pub fn selected(&self) -> impl Iterator<Item = GeometricQuantity> + '_ {
        self.entries
            .iter()
            .filter(|(_, e)| e.selected)
            .map(|(kind, e)| GeometricQuantity::new(*kind, e.value))
    }

    pub fn selected_count(&self) -> usize {
        self.entries.values().filter(|e| e.selected).count()
    }
}

// ============================================================================
// Output
// ============================================================================

/// An edge length recovered from one known measure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeLengthCandidate {
    /// Measure the candidate was derived from
    pub source: QuantityKind,
    pub edge_length: f64,
}

impl EdgeLengthCandidate {
    pub fn from_quantity(quantity: &GeometricQuantity) -> Self {
        let source = quantity.kind();
        EdgeLengthCandidate {
            source,
            edge_length: source.edge_from(quantity.value()),
        }
    }
}

/// The canonical edge length and the candidates it was settled from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEdge {
    pub edge_length: f64,
    pub candidates: Vec<EdgeLengthCandidate>,
}

/// All measures of one dodecahedron.
///
/// ## JSON Example
///
/// ```json
/// {
///   "edge_length": 1.0,
///   "volume": 7.663,
///   "surface_area": 20.646,
///   "circumscribed_radius": 1.401,
///   "inscribed_radius": 1.114
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DodecahedronProperties {
    pub edge_length: f64,
    pub volume: f64,
    pub surface_area: f64,
    pub circumscribed_radius: f64,
    pub inscribed_radius: f64,
}

impl DodecahedronProperties {
    /// Derive every measure from an edge length. No validation.
    pub fn from_edge(edge: f64) -> Self {
        DodecahedronProperties {
            edge_length: edge,
            volume: eq::volume(edge),
            surface_area: eq::surface_area(edge),
            circumscribed_radius: eq::circumscribed_radius(edge),
            inscribed_radius: eq::inscribed_radius(edge),
        }
    }

    pub fn get(&self, kind: QuantityKind) -> f64 {
        match kind {
            QuantityKind::EdgeLength => self.edge_length,
            QuantityKind::Volume => self.volume,
            QuantityKind::SurfaceArea => self.surface_area,
            QuantityKind::CircumscribedRadius => self.circumscribed_radius,
            QuantityKind::InscribedRadius => self.inscribed_radius,
        }
    }

    /// Measures in kind order
    pub fn iter(&self) -> impl Iterator<Item = GeometricQuantity> + '_ {
        QuantityKind::ALL
            .into_iter()
            .map(move |kind| GeometricQuantity::new(kind, self.get(kind)))
    }

    /// Re-express every measure in another length unit
    pub fn convert(&self, from: LengthUnit, to: LengthUnit) -> Self {
        let c = |kind: QuantityKind| from.convert(self.get(kind), kind.dimension(), to);
        DodecahedronProperties {
            edge_length: c(QuantityKind::EdgeLength),
            volume: c(QuantityKind::Volume),
            surface_area: c(QuantityKind::SurfaceArea),
            circumscribed_radius: c(QuantityKind::CircumscribedRadius),
            inscribed_radius: c(QuantityKind::InscribedRadius),
        }
    }
}

// ============================================================================
// Calculation
// ============================================================================

/// Settle on a canonical edge length without deriving the other measures.
pub fn resolve_edge(params: &ParameterSet) -> Result<ResolvedEdge, CalculatorError> {
    let selected: Vec<GeometricQuantity> = params.selected().collect();

    if selected.is_empty() {
        return Err(CalculatorError::NoParametersSelected);
    }

    if let Some(bad) = selected.iter().find(|q| !q.is_valid()) {
        return Err(CalculatorError::invalid_value(bad.kind(), bad.value()));
    }

    if selected.len() > MAX_SELECTED {
        return Err(CalculatorError::TooManySelected {
            selected: selected.len(),
            max: MAX_SELECTED,
        });
    }

    // Edge length wins outright; the other selection is not cross-checked
    if let Some(edge) = selected.iter().find(|q| q.kind() == QuantityKind::EdgeLength) {
        debug!(edge = edge.value(), ignored = selected.len() - 1, "edge length given directly");
        return Ok(ResolvedEdge {
            edge_length: edge.value(),
            candidates: vec![EdgeLengthCandidate::from_quantity(edge)],
        });
    }

    let candidates: Vec<EdgeLengthCandidate> =
        selected.iter().map(EdgeLengthCandidate::from_quantity).collect();

    // Extreme inputs can underflow to a zero edge or overflow to infinity
    if let Some((bad, _)) = selected
        .iter()
        .zip(&candidates)
        .find(|(_, c)| !(c.edge_length.is_finite() && c.edge_length > 0.0))
    {
        debug!(source = %bad.kind(), value = bad.value(), "edge candidate out of range");
        return Err(CalculatorError::invalid_value(bad.kind(), bad.value()));
    }

    let first = candidates[0];
    for other in &candidates[1..] {
        let ratio = other.edge_length / first.edge_length;
        debug!(
            first = %first.source,
            second = %other.source,
            ratio,
            "cross-checking edge candidates"
        );
        // False for a NaN ratio, which then counts as inconsistent
        let consistent = (ratio - 1.0).abs() <= CONSISTENCY_TOLERANCE;
        if !consistent {
            return Err(CalculatorError::InconsistentParameters {
                first: first.source,
                second: other.source,
                ratio,
            });
        }
    }

    let edge_length =
        candidates.iter().map(|c| c.edge_length).sum::<f64>() / candidates.len() as f64;
    debug!(edge_length, candidates = candidates.len(), "edge length resolved");

    Ok(ResolvedEdge {
        edge_length,
        candidates,
    })
}

/// Calculate all dodecahedron measures from the selected entries.
///
/// # Returns
///
/// * `Ok(DodecahedronProperties)` - All five measures
/// * `Err(CalculatorError)` - See the module-level resolution rules
pub fn calculate(params: &ParameterSet) -> Result<DodecahedronProperties, CalculatorError> {
    let resolved = resolve_edge(params)?;
    let props = DodecahedronProperties::from_edge(resolved.edge_length);

    // A valid edge can still cube past f64::MAX or square below the smallest subnormal
    if let Some(kind) = QuantityKind::ALL
        .into_iter()
        .find(|kind| !(props.get(*kind).is_finite() && props.get(*kind) > 0.0))
    {
        debug!(%kind, edge_length = resolved.edge_length, "derived measure out of range");
        let source = resolved
            .candidates
            .first()
            .map_or(QuantityKind::EdgeLength, |c| c.source);
        let value = params.get(source).map_or(resolved.edge_length, |e| e.value);
        return Err(CalculatorError::invalid_value(source, value));
    }

    Ok(props)
}

/// [`calculate`] with every listed quantity selected.
pub fn calculate_from_quantities(
    quantities: &[GeometricQuantity],
) -> Result<DodecahedronProperties, CalculatorError> {
    calculate(&ParameterSet::from_selected(quantities))
}

/// [`calculate`] for a single known edge length.
pub fn calculate_from_edge(edge: f64) -> Result<DodecahedronProperties, CalculatorError> {
    calculate_from_quantities(&[GeometricQuantity::EdgeLength(edge)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {} ± {}, got {}",
            expected,
            tol,
            actual
        );
    }

    #[test]
    fn test_volume_and_surface_agree() {
        let props = calculate_from_quantities(&[
            GeometricQuantity::Volume(eq::volume(5.0)),
            GeometricQuantity::SurfaceArea(eq::surface_area(5.0)),
        ])
        .unwrap();
        assert_close(props.edge_length, 5.0, 0.01);
    }

    #[test]
    fn test_volume_and_surface_disagree() {
        let err = calculate_from_quantities(&[
            GeometricQuantity::Volume(eq::volume(5.0)),
            GeometricQuantity::SurfaceArea(eq::surface_area(6.0)),
        ])
        .unwrap_err();

        match err {
            CalculatorError::InconsistentParameters { first, second, ratio } => {
                assert_eq!(first, QuantityKind::Volume);
                assert_eq!(second, QuantityKind::SurfaceArea);
                assert_close(ratio, 1.2, 1e-9);
            }
            other => panic!("expected InconsistentParameters, got {:?}", other),
        }
    }

    #[test]
    fn test_edge_length_takes_priority() {
        let props = calculate_from_quantities(&[
            GeometricQuantity::EdgeLength(3.0),
            GeometricQuantity::Volume(1.0),
        ])
        .unwrap();
        assert_eq!(props.edge_length, 3.0);
        assert_close(props.volume, eq::volume(3.0), 1e-9);
    }

    #[test]
    fn test_edge_priority_still_validates_other_value() {
        let err = calculate_from_quantities(&[
            GeometricQuantity::EdgeLength(3.0),
            GeometricQuantity::Volume(-1.0),
        ])
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_VALUE");
    }

    #[test]
    fn test_nothing_selected() {
        assert_eq!(
            calculate(&ParameterSet::new()),
            Err(CalculatorError::NoParametersSelected)
        );

        // Unselected entries do not count
        let params = ParameterSet::new().with_entry(QuantityKind::Volume, false, 100.0);
        assert_eq!(calculate(&params), Err(CalculatorError::NoParametersSelected));
    }

    #[test]
    fn test_invalid_values() {
        for bad in [-5.0, 0.0, f64::NAN, f64::INFINITY] {
            let err = calculate_from_quantities(&[GeometricQuantity::Volume(bad)]).unwrap_err();
            assert!(
                matches!(err, CalculatorError::InvalidValue { quantity: QuantityKind::Volume, .. }),
                "value {} gave {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_underflowing_candidates_are_invalid() {
        // Both edges round to zero, so their ratio is NaN
        let err = calculate_from_quantities(&[
            GeometricQuantity::Volume(5e-324),
            GeometricQuantity::SurfaceArea(5e-324),
        ])
        .unwrap_err();
        assert!(
            matches!(err, CalculatorError::InvalidValue { quantity: QuantityKind::Volume, .. }),
            "got {:?}",
            err
        );
    }

    #[test]
    fn test_overflowing_measures_are_invalid() {
        let err = calculate_from_quantities(&[GeometricQuantity::SurfaceArea(f64::MAX)]).unwrap_err();
        assert!(
            matches!(err, CalculatorError::InvalidValue { quantity: QuantityKind::SurfaceArea, .. }),
            "got {:?}",
            err
        );

        assert_eq!(calculate_from_edge(f64::MAX).unwrap_err().error_code(), "INVALID_VALUE");
        // Volume of a 1e-300 edge underflows to zero
        assert_eq!(calculate_from_edge(1e-300).unwrap_err().error_code(), "INVALID_VALUE");
    }

    #[test]
    fn test_successful_results_serialize_without_nulls() {
        let props = calculate_from_quantities(&[GeometricQuantity::Volume(1e300)]).unwrap();
        let json = serde_json::to_string(&props).unwrap();
        assert!(!json.contains("null"), "{}", json);
    }

    #[test]
    fn test_unselected_invalid_value_is_ignored() {
        let params = ParameterSet::new()
            .with_selected(GeometricQuantity::EdgeLength(2.0))
            .with_entry(QuantityKind::Volume, false, f64::NAN);
        assert!(calculate(&params).is_ok());
    }

    #[test]
    fn test_single_inscribed_radius() {
        let props =
            calculate_from_quantities(&[GeometricQuantity::InscribedRadius(eq::inscribed_radius(4.0))])
                .unwrap();
        let expected = DodecahedronProperties::from_edge(4.0);
        assert_close(props.edge_length, 4.0, 1e-9);
        for kind in QuantityKind::ALL {
            assert_close(props.get(kind), expected.get(kind), 1e-9 * expected.get(kind));
        }
    }

    #[test]
    fn test_each_single_quantity_recovers_edge() {
        for kind in QuantityKind::ALL {
            let props = calculate_from_quantities(&[GeometricQuantity::new(kind, kind.from_edge(2.5))])
                .unwrap();
            assert_close(props.edge_length, 2.5, 1e-9);
        }
    }

    #[test]
    fn test_too_many_selected() {
        let err = calculate_from_quantities(&[
            GeometricQuantity::Volume(eq::volume(1.0)),
            GeometricQuantity::SurfaceArea(eq::surface_area(1.0)),
            GeometricQuantity::InscribedRadius(eq::inscribed_radius(1.0)),
        ])
        .unwrap_err();
        assert_eq!(err, CalculatorError::TooManySelected { selected: 3, max: 2 });
    }

    #[test]
    fn test_invalid_value_reported_before_too_many() {
        let err = calculate_from_quantities(&[
            GeometricQuantity::EdgeLength(1.0),
            GeometricQuantity::Volume(1.0),
            GeometricQuantity::SurfaceArea(-1.0),
        ])
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_VALUE");
    }

    #[test]
    fn test_tolerance_is_relative_and_averages() {
        // Candidates 10.0 and 10.05: 0.5% apart, accepted, mean used
        let params = ParameterSet::new()
            .with_selected(GeometricQuantity::CircumscribedRadius(eq::circumscribed_radius(10.0)))
            .with_selected(GeometricQuantity::InscribedRadius(eq::inscribed_radius(10.05)));
        let resolved = resolve_edge(&params).unwrap();
        assert_eq!(resolved.candidates.len(), 2);
        assert_eq!(resolved.candidates[0].source, QuantityKind::CircumscribedRadius);
        assert_close(resolved.edge_length, 10.025, 1e-9);

        // Same 0.5% gap at a tiny scale is still accepted
        let tiny = ParameterSet::new()
            .with_selected(GeometricQuantity::CircumscribedRadius(eq::circumscribed_radius(1e-3)))
            .with_selected(GeometricQuantity::InscribedRadius(eq::inscribed_radius(1.005e-3)));
        assert!(calculate(&tiny).is_ok());

        // 2% apart is rejected
        let far = ParameterSet::new()
            .with_selected(GeometricQuantity::CircumscribedRadius(eq::circumscribed_radius(10.0)))
            .with_selected(GeometricQuantity::InscribedRadius(eq::inscribed_radius(10.2)));
        assert!(matches!(
            calculate(&far),
            Err(CalculatorError::InconsistentParameters { .. })
        ));
    }

    #[test]
    fn test_unit_edge_golden_values() {
        let props = calculate_from_edge(1.0).unwrap();
        assert_close(props.volume, 7.6631, 1e-4);
        assert_close(props.surface_area, 20.6457, 1e-4);
        assert_close(props.circumscribed_radius, 1.4013, 1e-4);
        assert_close(props.inscribed_radius, 1.1135, 1e-4);
    }

    #[test]
    fn test_convert_properties() {
        let cm = DodecahedronProperties::from_edge(10.0);
        let m = cm.convert(LengthUnit::Centimeter, LengthUnit::Meter);
        assert_close(m.edge_length, 0.1, 1e-12);
        assert_close(m.surface_area, cm.surface_area / 1.0e4, 1e-12);
        assert_close(m.volume, cm.volume / 1.0e6, 1e-12);
        // Conversion commutes with the formulas
        let direct = DodecahedronProperties::from_edge(0.1);
        assert_close(m.volume, direct.volume, 1e-12);
    }

    #[test]
    fn test_repeated_kind_keeps_last_value() {
        let set = ParameterSet::from_selected(&[
            GeometricQuantity::Volume(1.0),
            GeometricQuantity::Volume(2.0),
        ]);
        assert_eq!(set.selected_count(), 1);
        assert_eq!(set.get(QuantityKind::Volume).map(|e| e.value), Some(2.0));
    }

    #[test]
    fn test_serialization() {
        let params = ParameterSet::new()
            .with_selected(GeometricQuantity::Volume(957.89))
            .with_entry(QuantityKind::InscribedRadius, false, 2.78);
        let json = serde_json::to_string_pretty(&params).unwrap();
        assert!(json.contains("\"volume\""));
        let roundtrip: ParameterSet = serde_json::from_str(&json).unwrap();
        assert_eq!(params, roundtrip);

        let q = GeometricQuantity::SurfaceArea(20.0);
        assert_eq!(
            serde_json::to_string(&q).unwrap(),
            r#"{"kind":"surface_area","value":20.0}"#
        );
    }
}
