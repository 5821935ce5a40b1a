//! Layout planning core for LunaHab.
//!
//! This crate contains the generate → validate → score → optimize
//! pipeline for fixed-crew lunar habitat layouts, independent of any web
//! layer, renderer, or file format. Functions take plain data and return
//! results, making them unit-testable and portable across the CLI and
//! any future front-end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | Per-zone generation defaults (fractions, privacy, connections) |
//! | [`constraints`] | Hard-rule validator producing messages + stable rule ids |
//! | [`error`] | Fatal error taxonomy (config, generation, weights) |
//! | [`generator`] | Seeded initial-layout generator with one-shot NHV self-heal |
//! | [`graph`] | Symmetrized zone adjacency: BFS reach, cycles, hop distance |
//! | [`models`] | Layout/Zone/Systems/Metrics/settings value types |
//! | [`optimizer`] | Simulated annealing over neighbor operators, validator-gated |
//! | [`scoring`] | Metrics bundle and weighted scalar objective |
//!
//! ```
//! use lunahab_logic::models::{ConstraintSettings, GeneratorConfig, ScoreWeights};
//!
//! let settings = ConstraintSettings::default();
//! let layout = lunahab_logic::generate(&GeneratorConfig::default(), &settings)?;
//! assert!(lunahab_logic::validate(&layout, &settings).passed);
//!
//! let result = lunahab_logic::optimize(
//!     &layout,
//!     20,
//!     &settings,
//!     &ScoreWeights::default(),
//!     Some(7),
//! )?;
//! assert!(result.metrics.feasibility);
//! # Ok::<(), lunahab_logic::LayoutError>(())
//! ```

pub mod catalog;
pub mod constraints;
pub mod error;
pub mod generator;
pub mod graph;
pub mod models;
pub mod optimizer;
pub mod scoring;

pub use constraints::validate;
pub use error::LayoutError;
pub use generator::{generate, generate_with};
pub use optimizer::{optimize, NeighborOp};
pub use scoring::evaluate;
