//! Secondary geometric quantities placing every sketch point, face, edge and
//! boundary condition of the external model.

use uom::si::f64::{Force, Length, Pressure};
use uom::si::force::kilonewton;
use uom::si::length::millimeter;
use uom::si::pressure::megapascal;

use crate::config::Parameters;

/// Quantities derived from a validated [`Parameters`] record.
///
/// All lengths are millimetres measured from the tube centre; the pressure
/// is in N/mm².
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedGeometry {
    /// Half the span between the tube side-wall centrelines, `(a_q - s_q) / 2`.
    pub half_span: f64,
    /// Offset to the tube top and bottom wall centrelines, `(b_q - s_q) / 2`.
    pub quad_offset: f64,
    /// Offset down to the T flange centreline, `b_q / 2 + h_t - s_t / 2`.
    pub flange_offset: f64,
    /// Load spread over the bearing area `l * (b_t + a_q)`.
    pub pressure: f64,
}

impl DerivedGeometry {
    /// Compute the derived quantities.
    ///
    /// Pure and idempotent. The parameters must already be validated; nothing
    /// here checks them again.
    ///
    /// # Examples
    /// ```
    /// use quadbeam::{DerivedGeometry, Preset};
    ///
    /// let derived = DerivedGeometry::compute(&Preset::Cp1.parameters());
    /// assert_eq!(derived.half_span, 58.0);
    /// assert_eq!(derived.quad_offset, 28.0);
    /// assert_eq!(derived.flange_offset, 77.0);
    /// ```
    #[must_use]
    pub fn compute(parameters: &Parameters) -> Self {
        let half_span = (parameters.quad_width - parameters.quad_thickness) / 2.0;
        let quad_offset = parameters.quad_height / 2.0 - parameters.quad_thickness / 2.0;
        let flange_offset =
            parameters.quad_height / 2.0 + parameters.web_length - parameters.t_thickness / 2.0;

        let load = Force::new::<kilonewton>(parameters.load);
        let length = Length::new::<millimeter>(parameters.length);
        let width = Length::new::<millimeter>(parameters.flange_length + parameters.quad_width);
        let pressure: Pressure = load / (length * width);

        Self {
            half_span,
            quad_offset,
            flange_offset,
            pressure: pressure.get::<megapascal>(),
        }
    }

    /// Magnitude handed to the pressure load, positive towards the surface.
    #[must_use]
    pub fn pressure_magnitude(&self) -> f64 {
        -self.pressure
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::config::Preset;

    #[test]
    fn cp1_matches_hand_calculation() {
        let derived = DerivedGeometry::compute(&Preset::Cp1.parameters());
        assert_relative_eq!(derived.half_span, 58.0);
        assert_relative_eq!(derived.quad_offset, 28.0);
        assert_relative_eq!(derived.flange_offset, 77.0);
        assert_relative_eq!(
            derived.pressure,
            -29_000.0 / (3_700.0 * 170.0),
            max_relative = 1.0e-12
        );
        assert!(derived.pressure_magnitude() > 0.0);
    }

    #[test]
    fn cp3_offsets() {
        let derived = DerivedGeometry::compute(&Preset::Cp3.parameters());
        assert_relative_eq!(derived.half_span, 78.0);
        assert_relative_eq!(derived.quad_offset, 43.0);
        assert_relative_eq!(derived.flange_offset, 92.0);
        assert_relative_eq!(
            derived.pressure,
            -29_000.0 / (3_700.0 * 210.0),
            max_relative = 1.0e-12
        );
    }

    #[test]
    fn compute_is_idempotent() {
        let parameters = Preset::Cp2.parameters();
        let first = DerivedGeometry::compute(&parameters);
        let second = DerivedGeometry::compute(&parameters);
        assert_eq!(first, second);
    }
}
