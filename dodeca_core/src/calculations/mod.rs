//! # Calculations
//!
//! Each calculation follows the pattern:
//!
//! - an input type (JSON-serializable)
//! - a result type (JSON-serializable)
//! - `calculate(input) -> Result<Result, Error>` - pure calculation function
//!
//! ## Available Calculations
//!
//! - [`dodecahedron`] - Edge length and derived measures from up to two known measures

pub mod dodecahedron;

// Re-export commonly used types
pub use dodecahedron::{
    calculate,
    calculate_from_edge,
    calculate_from_quantities,
    resolve_edge,
    DodecahedronProperties,
    EdgeLengthCandidate,
    GeometricQuantity,
    ParameterEntry,
    ParameterSet,
    QuantityKind,
    ResolvedEdge,
    CONSISTENCY_TOLERANCE,
    MAX_SELECTED,
};
