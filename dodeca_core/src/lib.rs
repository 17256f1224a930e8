//! # dodeca_core - Dodecahedron Calculator Engine
//!
//! `dodeca_core` computes the measures of a regular dodecahedron (edge length,
//! volume, surface area, circumscribed and inscribed radius) from whichever
//! one or two of them are known, and checks that two known measures describe
//! the same solid.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All data types implement Serialize
//! - **Typed Errors**: Rejections are error values, never display strings
//! - **Locale-Agnostic Core**: Text for people lives in [`i18n`]
//!
//! ## Quick Start
//!
//! ```rust
//! use dodeca_core::calculations::{calculate_from_quantities, GeometricQuantity};
//!
//! let props = calculate_from_quantities(&[GeometricQuantity::Volume(957.89)]).unwrap();
//! assert!((props.edge_length - 5.0).abs() < 0.01);
//!
//! let json = serde_json::to_string_pretty(&props).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`equations`] - Closed-form dodecahedron formulas and their inverses
//! - [`calculations`] - The parameter-consistency calculator
//! - [`errors`] - Structured error types
//! - [`units`] - Length units and dimension scaling
//! - [`i18n`] - Russian/English message lookup
//! - [`problems`] - Practice problems and answer checking
//! - [`form`] - Calculator form state (selection cap, back-fill, status line)
//! - [`preferences`] - Language and theme persisted to disk

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod form;
pub mod i18n;
pub mod preferences;
pub mod problems;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{
    calculate, DodecahedronProperties, GeometricQuantity, ParameterSet, QuantityKind,
};
pub use errors::{CalcError, CalcResult, CalculatorError};
pub use i18n::{Language, MessageKey};
pub use preferences::{load_or_default, update_preferences, Preferences, Theme};
