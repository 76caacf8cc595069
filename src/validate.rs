//! Feasibility checks run before any derived geometry is trusted.

use log::info;

use crate::config::Parameters;
use crate::errors::{Constraint, InvalidGeometry};

/// Minimum admissible length of any section dimension, in millimetres.
pub const MIN_LENGTH: f64 = 0.1;

/// One named predicate of a check group.
struct Rule<'a> {
    /// Rule reported on failure.
    constraint: Constraint,
    /// Whether the parameters violate the rule.
    violated: bool,
    /// Offending values cited in the failure.
    values: &'a [f64],
}

/// Report the first violated rule of a group, in order.
fn first_violation(rules: &[Rule<'_>]) -> Result<(), InvalidGeometry> {
    match rules.iter().find(|rule| rule.violated) {
        Some(rule) => Err(InvalidGeometry::new(rule.constraint, rule.values)),
        None => Ok(()),
    }
}

/// Minimum lengths of the T section, then thickness against flange and web.
// Comparisons are negated so that NaN dimensions fail instead of slipping through.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
fn check_t_section(parameters: &Parameters) -> Result<(), InvalidGeometry> {
    let b_t = parameters.flange_length;
    let h_t = parameters.web_length;
    let s_t = parameters.t_thickness;
    first_violation(&[
        Rule {
            constraint: Constraint::FlangeLength,
            violated: !(b_t >= MIN_LENGTH),
            values: &[b_t],
        },
        Rule {
            constraint: Constraint::WebLength,
            violated: !(h_t >= MIN_LENGTH),
            values: &[h_t],
        },
        Rule {
            constraint: Constraint::TThickness,
            violated: !(s_t >= MIN_LENGTH),
            values: &[s_t],
        },
        Rule {
            constraint: Constraint::TThicknessExceedsFlange,
            violated: !(s_t <= b_t),
            values: &[s_t, b_t],
        },
        Rule {
            constraint: Constraint::TThicknessExceedsWeb,
            violated: !(s_t <= h_t),
            values: &[s_t, h_t],
        },
    ])
}

/// Minimum tube width and height, then wall thickness against both.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
fn check_quad_section(parameters: &Parameters) -> Result<(), InvalidGeometry> {
    let a_q = parameters.quad_width;
    let b_q = parameters.quad_height;
    let s_q = parameters.quad_thickness;
    first_violation(&[
        Rule {
            constraint: Constraint::QuadWidth,
            violated: !(a_q >= MIN_LENGTH),
            values: &[a_q],
        },
        Rule {
            constraint: Constraint::QuadHeight,
            violated: !(b_q >= MIN_LENGTH),
            values: &[b_q],
        },
        Rule {
            constraint: Constraint::QuadThickness,
            violated: !(s_q <= a_q && s_q <= b_q),
            values: &[s_q, a_q, b_q],
        },
    ])
}

/// The outer T-beams sit centred under the tube walls and must not overlap.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
fn check_collision(parameters: &Parameters) -> Result<(), InvalidGeometry> {
    let a_q = parameters.quad_width;
    let b_t = parameters.flange_length;
    first_violation(&[Rule {
        constraint: Constraint::TBeamCollision,
        violated: !(a_q >= 2.0 * b_t),
        values: &[a_q, b_t],
    }])
}

/// Check the raw parameters for geometric feasibility.
///
/// Checks run in a fixed order (T section, quadrilateral section, T-beam
/// collision) and the first violation is returned. Each passing group is
/// acknowledged with an `info` log record.
///
/// # Errors
///
/// Returns [`InvalidGeometry`] naming the violated [`Constraint`] and the
/// offending values.
///
/// # Examples
/// ```
/// use quadbeam::{validate, Constraint, Preset};
///
/// let mut parameters = Preset::Cp1.parameters();
/// assert!(validate(&parameters).is_ok());
///
/// parameters.t_thickness = 60.0;
/// let error = validate(&parameters).expect_err("thickness exceeds flange");
/// assert_eq!(error.constraint, Constraint::TThicknessExceedsFlange);
/// ```
pub fn validate(parameters: &Parameters) -> Result<(), InvalidGeometry> {
    check_t_section(parameters)?;
    info!("{}: T-section check passed", parameters.name);
    check_quad_section(parameters)?;
    info!("{}: quadrilateral section check passed", parameters.name);
    check_collision(parameters)?;
    info!("{}: collision check passed", parameters.name);
    Ok(())
}
