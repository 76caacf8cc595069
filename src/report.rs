//! Plain-text summaries of a configured profile and its results.

use std::fmt::Write;

use crate::config::InputData;
use crate::profile::ModelPlan;
use crate::results::ResultData;

/// Render a textual summary of the profile and, when available, its results.
///
/// # Examples
/// ```
/// use quadbeam::{render_summary, InputData, Preset};
///
/// let data = InputData::from_preset(Preset::Cp1).expect("valid");
/// let report = render_summary(&data, None);
/// assert!(report.contains("CP1-Linear"));
/// ```
#[must_use]
pub fn render_summary(data: &InputData, results: Option<&ResultData>) -> String {
    let parameters = data.parameters();
    let derived = data.derived();
    let mut output = String::new();

    writeln!(
        &mut output,
        "Profile {} (job {}, step {})",
        data.name(),
        data.job_name(),
        data.step_name()
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Tube: {:.1} x {:.1} mm, wall {:.1} mm; T-beams: flange {:.1} mm, web {:.1} mm, wall {:.1} mm; length {:.1} mm",
        parameters.quad_width,
        parameters.quad_height,
        parameters.quad_thickness,
        parameters.flange_length,
        parameters.web_length,
        parameters.t_thickness,
        parameters.length
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Material: E = {:.0} N/mm², nu = {:.2}, rho = {:.2e} kg/mm³; load = {:+.1} kN",
        parameters.material.elastic_modulus,
        parameters.material.poisson_ratio,
        parameters.material.density,
        parameters.load
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "Derived: qs = {:.3} mm, quad_y = {:.3} mm, lower_y = {:.3} mm, p1 = {:+.5e} N/mm²",
        derived.half_span, derived.quad_offset, derived.flange_offset, derived.pressure
    )
    .expect("writing to string cannot fail");

    let mesh = &parameters.mesh;
    writeln!(
        &mut output,
        "Mesh seeds: quad height {}, quad width {}, T flange {}, T web {}, length {} (max {} elements)",
        mesh.quad_height, mesh.quad_width, mesh.t_flange, mesh.t_web, mesh.length, mesh.max_elements
    )
    .expect("writing to string cannot fail");

    if let Some(results) = results {
        let reaction = results.sum_reaction_forces();
        writeln!(
            &mut output,
            "Fiber nodes: {}; maximum deflection = {:+.4} mm",
            results.node_count(),
            results.max_displacement()
        )
        .expect("writing to string cannot fail");
        writeln!(
            &mut output,
            "Sum of reaction forces: Fx = {:+.1} N, Fy = {:+.1} N, Fz = {:+.1} N",
            reaction.x, reaction.y, reaction.z
        )
        .expect("writing to string cannot fail");
    } else {
        output.push_str("Results: not available (no result export supplied)\n");
    }

    output
}

/// Render the coordinates handed to the external model builder.
#[must_use]
pub fn render_plan(plan: &ModelPlan) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Sketch (sheet size {:.1} mm), extruded {:.1} mm:",
        plan.cross_section.sheet_size(),
        plan.depth
    )
    .expect("writing to string cannot fail");
    for segment in plan.cross_section.segments() {
        writeln!(
            &mut output,
            "  line ({:+9.3}, {:+9.3}) -> ({:+9.3}, {:+9.3})",
            segment.start.x, segment.start.y, segment.end.x, segment.end.y
        )
        .expect("writing to string cannot fail");
    }

    for section in &plan.sections {
        writeln!(
            &mut output,
            "Section {}: thickness {:.1} mm on {} faces",
            section.name,
            section.thickness,
            section.faces.len()
        )
        .expect("writing to string cannot fail");
    }

    for group in &plan.seeds {
        writeln!(
            &mut output,
            "Seed {:?}: {} per edge on {} edges",
            group.group,
            group.seeds,
            group.edges.len()
        )
        .expect("writing to string cannot fail");
    }

    writeln!(
        &mut output,
        "Pressure {:.5e} N/mm² on face at ({:.3}, {:.3}, {:.3})",
        plan.pressure.magnitude, plan.pressure.face.x, plan.pressure.face.y, plan.pressure.face.z
    )
    .expect("writing to string cannot fail");

    let fiber = plan.cross_section.fiber();
    writeln!(
        &mut output,
        "Fiber tracked along x = {:.3}, y = {:.3}",
        fiber.x, fiber.y
    )
    .expect("writing to string cannot fail");

    for support in &plan.supports {
        let restraint = match support.kind.restraint() {
            Some(dofs) => format!("{dofs:?}"),
            None => "set only".to_owned(),
        };
        writeln!(
            &mut output,
            "Support {}: {} vertices, restraint {}",
            support.kind.name(),
            support.vertices.len(),
            restraint
        )
        .expect("writing to string cannot fail");
    }

    output
}
