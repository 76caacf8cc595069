//! Error types produced while configuring the profile or importing results.

use std::fmt;

use thiserror::Error;

/// Geometric rule checked before any derived quantity is computed.
///
/// Variants are listed in the order the validator evaluates them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constraint {
    /// T flange length below the minimum length.
    FlangeLength,
    /// T web length below the minimum length.
    WebLength,
    /// T wall thickness below the minimum length.
    TThickness,
    /// T wall thickness larger than the flange length.
    TThicknessExceedsFlange,
    /// T wall thickness larger than the web length.
    TThicknessExceedsWeb,
    /// Tube width below the minimum length.
    QuadWidth,
    /// Tube height below the minimum length.
    QuadHeight,
    /// Tube wall thickness larger than the tube width or height.
    QuadThickness,
    /// The two outer T-beams overlap under the tube.
    TBeamCollision,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Constraint::FlangeLength => "invalid flange length for T section",
            Constraint::WebLength => "invalid web length for T section",
            Constraint::TThickness => "invalid T section thickness",
            Constraint::TThicknessExceedsFlange => {
                "flange length must be greater than T section thickness"
            }
            Constraint::TThicknessExceedsWeb => {
                "web length must be greater than T section thickness"
            }
            Constraint::QuadWidth => "invalid width for quadrilateral section",
            Constraint::QuadHeight => "invalid height for quadrilateral section",
            Constraint::QuadThickness => {
                "width and height of the quadrilateral section must be greater than its thickness"
            }
            Constraint::TBeamCollision => "the T-beams collide with each other",
        };
        f.write_str(text)
    }
}

/// Returned when a configuration cannot produce a valid cross-section.
///
/// This is the only geometry failure; the collision case is distinguished
/// through [`InvalidGeometry::is_collision`].
///
/// # Examples
///
/// ```
/// use quadbeam::{validate, Constraint, Preset};
///
/// let mut parameters = Preset::Cp1.parameters();
/// parameters.flange_length = 70.0;
/// let error = validate(&parameters).expect_err("T-beams overlap");
/// assert_eq!(error.constraint, Constraint::TBeamCollision);
/// assert!(error.is_collision());
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
#[error("invalid geometry: {constraint} (values: {values:?})")]
pub struct InvalidGeometry {
    /// The rule that failed.
    pub constraint: Constraint,
    /// Offending dimensions in millimetres, in the order the rule names them.
    pub values: Vec<f64>,
}

impl InvalidGeometry {
    /// Create a failure for `constraint` citing the offending `values`.
    #[must_use]
    pub fn new(constraint: Constraint, values: &[f64]) -> Self {
        Self {
            constraint,
            values: values.to_vec(),
        }
    }

    /// Whether the failure is the T-beam collision check.
    #[must_use]
    pub fn is_collision(&self) -> bool {
        self.constraint == Constraint::TBeamCollision
    }
}

/// Error returned while building or loading an analysis configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("unable to read configuration: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file is not valid JSON for a profile.
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
    /// The profile geometry failed validation.
    #[error(transparent)]
    Geometry(#[from] InvalidGeometry),
    /// A preset name did not match any known profile.
    #[error("unknown profile preset '{0}' (expected CP1, CP2 or CP3)")]
    UnknownPreset(String),
    /// A step name did not match any analysis step.
    #[error("unknown analysis step '{0}' (expected linear or buckling)")]
    UnknownStep(String),
    /// A mesh seed count was zero.
    #[error("mesh seed '{edge}' must be positive")]
    InvalidMeshSeed {
        /// Name of the edge group carrying the seed.
        edge: &'static str,
    },
}

/// Error returned while importing node results exported by the solver.
#[derive(Debug, Error)]
pub enum ResultError {
    /// The export could not be read.
    #[error("unable to read results: {0}")]
    Io(#[from] std::io::Error),
    /// The export is not valid JSON for node results.
    #[error("malformed results: {0}")]
    Json(#[from] serde_json::Error),
    /// Node labels are positive integers.
    #[error("node label must be positive (received {0})")]
    NonPositiveLabel(u32),
}
