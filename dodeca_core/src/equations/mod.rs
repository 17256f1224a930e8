//! # Geometry Equations
//!
//! Closed-form solid geometry used by the calculators. Keeping the formulas
//! in one place makes them easy to check against a reference table.
//!
//! ## Modules
//!
//! - [`dodecahedron`] - Regular dodecahedron measures and their inverses

pub mod dodecahedron;

pub use dodecahedron::{
    circumscribed_radius,
    edge_from_circumscribed_radius,
    edge_from_inscribed_radius,
    edge_from_surface_area,
    edge_from_volume,
    inscribed_radius,
    surface_area,
    volume,
    Coefficients,
    COEFFICIENTS,
    PHI,
};
