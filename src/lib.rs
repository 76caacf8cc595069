#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod config;
pub mod derived;
pub mod errors;
pub mod geometry;
pub mod profile;
pub mod report;
pub mod results;
pub mod validate;

pub use config::{InputData, Material, MeshSeeds, Parameters, Preset, StepKind};
pub use derived::DerivedGeometry;
pub use errors::{ConfigError, Constraint, InvalidGeometry, ResultError};
pub use geometry::{displacement, force, point, Displacement, Force, Point, SketchPoint};
pub use profile::{
    CrossSection, EdgeGroup, ModelPlan, PressureLoad, SeedGroup, Segment, ShellSection, Support,
    SupportKind,
};
pub use report::{render_plan, render_summary};
pub use results::{NodeLabel, NodeRecord, ResultData, ResultExport, FIBER_TOLERANCE};
pub use validate::{validate, MIN_LENGTH};
