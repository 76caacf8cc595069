//! Configuration record for one analysis run of the combined profile.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use crate::derived::DerivedGeometry;
use crate::errors::ConfigError;
use crate::validate::validate;

/// Elastic material of the whole profile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Young's modulus in N/mm².
    pub elastic_modulus: f64,
    /// Poisson ratio.
    pub poisson_ratio: f64,
    /// Density in kg/mm³.
    pub density: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            elastic_modulus: 210_000.0,
            poisson_ratio: 0.3,
            density: 7.8e-6,
        }
    }
}

/// Seed counts per edge group, plus the element cap handed to the mesher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshSeeds {
    /// Subdivisions of the tube side walls.
    pub quad_height: u32,
    /// Subdivisions of the tube top face; the split bottom face gets half.
    pub quad_width: u32,
    /// Subdivisions of each T flange half.
    pub t_flange: u32,
    /// Subdivisions of each T web.
    pub t_web: u32,
    /// Subdivisions along the extrusion.
    pub length: u32,
    /// Maximum number of elements.
    pub max_elements: u32,
}

impl Default for MeshSeeds {
    fn default() -> Self {
        Self {
            quad_height: 5,
            quad_width: 10,
            t_flange: 5,
            t_web: 5,
            length: 10,
            max_elements: 200,
        }
    }
}

impl MeshSeeds {
    /// Seed count for each half of the tube bottom face.
    ///
    /// The centre web splits the bottom face, so each half receives half of
    /// the top-face seeds, rounded down.
    #[must_use]
    pub fn quad_bottom_half(&self) -> u32 {
        self.quad_width / 2
    }

    /// Reject zero seed counts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMeshSeed`] naming the first empty group.
    pub fn check(&self) -> Result<(), ConfigError> {
        let groups = [
            ("quad_height", self.quad_height),
            ("quad_width", self.quad_width),
            ("t_flange", self.t_flange),
            ("t_web", self.t_web),
            ("length", self.length),
            ("max_elements", self.max_elements),
        ];
        match groups.iter().find(|(_, count)| *count == 0) {
            Some(&(edge, _)) => Err(ConfigError::InvalidMeshSeed { edge }),
            None => Ok(()),
        }
    }
}

/// Kind of analysis step the job runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Linear static calculation.
    #[default]
    Linear,
    /// Stability analysis.
    Buckling,
}

impl StepKind {
    /// Human-readable step name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            StepKind::Linear => "Linear",
            StepKind::Buckling => "Buckling",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StepKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(StepKind::Linear),
            "buckling" => Ok(StepKind::Buckling),
            _ => Err(ConfigError::UnknownStep(s.to_owned())),
        }
    }
}

/// Load applied when none is given, in kN.
fn default_load() -> f64 {
    -29.0
}

/// Raw parameters of one combined profile, before validation.
///
/// Lengths are millimetres. Material, load, mesh and step fall back to their
/// defaults when missing from a JSON file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Profile label, e.g. `CP1`.
    pub name: String,
    /// Width of the quadrilateral tube.
    pub quad_width: f64,
    /// Height of the quadrilateral tube.
    pub quad_height: f64,
    /// Wall thickness of the quadrilateral tube.
    pub quad_thickness: f64,
    /// Length of each T flange.
    pub flange_length: f64,
    /// Length of each T web.
    pub web_length: f64,
    /// Wall thickness of the T-beams.
    pub t_thickness: f64,
    /// Length of the profile along the extrusion.
    pub length: f64,
    /// Elastic material.
    #[serde(default)]
    pub material: Material,
    /// Applied load in kN; negative is downward.
    #[serde(default = "default_load")]
    pub load: f64,
    /// Mesh density controls.
    #[serde(default)]
    pub mesh: MeshSeeds,
    /// Analysis step.
    #[serde(default)]
    pub step: StepKind,
}

/// The three combined profiles studied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// 120 x 60 tube.
    Cp1,
    /// 140 x 80 tube.
    Cp2,
    /// 160 x 90 tube.
    Cp3,
}

impl Preset {
    /// All presets in order.
    pub const ALL: [Preset; 3] = [Preset::Cp1, Preset::Cp2, Preset::Cp3];

    /// Label used for the model and job names.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Preset::Cp1 => "CP1",
            Preset::Cp2 => "CP2",
            Preset::Cp3 => "CP3",
        }
    }

    /// Fully populated parameters for this profile.
    ///
    /// # Examples
    /// ```
    /// use quadbeam::Preset;
    ///
    /// let parameters = Preset::Cp2.parameters();
    /// assert_eq!(parameters.name, "CP2");
    /// assert_eq!(parameters.quad_width, 140.0);
    /// ```
    #[must_use]
    pub fn parameters(self) -> Parameters {
        let (quad_width, quad_height) = match self {
            Preset::Cp1 => (120.0, 60.0),
            Preset::Cp2 => (140.0, 80.0),
            Preset::Cp3 => (160.0, 90.0),
        };
        Parameters {
            name: self.label().to_owned(),
            quad_width,
            quad_height,
            quad_thickness: 4.0,
            flange_length: 50.0,
            web_length: 50.0,
            t_thickness: 6.0,
            length: 3700.0,
            material: Material::default(),
            load: default_load(),
            mesh: MeshSeeds::default(),
            step: StepKind::default(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_owned()))
    }
}

/// Validated parameters together with their derived geometry.
///
/// The only way to obtain an [`InputData`] is through validation, so the
/// derived fields are always consistent with a feasible cross-section.
#[derive(Clone, Debug, PartialEq)]
pub struct InputData {
    /// Raw parameters as supplied.
    parameters: Parameters,
    /// Quantities derived from the parameters.
    derived: DerivedGeometry,
}

impl InputData {
    /// Validate `parameters` and derive the secondary geometry.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Geometry`] when the cross-section is infeasible
    /// and [`ConfigError::InvalidMeshSeed`] when a seed count is zero.
    ///
    /// # Examples
    /// ```
    /// use quadbeam::{InputData, Preset};
    ///
    /// let data = InputData::new(Preset::Cp1.parameters()).expect("CP1 is valid");
    /// assert_eq!(data.derived().half_span, 58.0);
    /// assert_eq!(data.job_name(), "CP1-Linear");
    /// ```
    pub fn new(parameters: Parameters) -> Result<Self, ConfigError> {
        validate(&parameters)?;
        parameters.mesh.check()?;
        let derived = DerivedGeometry::compute(&parameters);
        Ok(Self {
            parameters,
            derived,
        })
    }

    /// Build the input for one of the studied profiles.
    ///
    /// # Errors
    ///
    /// Propagates validation failures, which the shipped presets never produce.
    pub fn from_preset(preset: Preset) -> Result<Self, ConfigError> {
        info!("using preset profile {preset}");
        Self::new(preset.parameters())
    }

    /// Parse parameters from JSON text and validate them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input, otherwise the same
    /// failures as [`InputData::new`].
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let parameters: Parameters = serde_json::from_str(json)?;
        Self::new(parameters)
    }

    /// Load parameters from a JSON file and validate them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise the
    /// same failures as [`InputData::from_json_str`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("loading profile parameters from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Replace this input with parameters loaded from `path`.
    ///
    /// On failure the current input is left untouched.
    ///
    /// # Errors
    ///
    /// Same as [`InputData::load`].
    pub fn reload<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        *self = Self::load(path)?;
        Ok(())
    }

    /// Same profile analysed with a different step.
    #[must_use]
    pub fn with_step(mut self, step: StepKind) -> Self {
        self.parameters.step = step;
        self
    }

    /// Raw parameters.
    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Derived geometry.
    #[must_use]
    pub fn derived(&self) -> &DerivedGeometry {
        &self.derived
    }

    /// Profile label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.parameters.name
    }

    /// Name of the analysis step.
    #[must_use]
    pub fn step_name(&self) -> &'static str {
        self.parameters.step.name()
    }

    /// Job name, `<profile>-<step>`.
    #[must_use]
    pub fn job_name(&self) -> String {
        format!("{}-{}", self.parameters.name, self.step_name())
    }
}
