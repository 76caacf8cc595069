//! Cross-section sketch and model plan for the external model builder.
//!
//! Nothing here talks to a finite-element engine. The plan is a set of
//! coordinates (sketch lines, face and edge probes, support vertices) from
//! which a builder creates the shell part, assigns sections, seeds the mesh
//! and applies loads and boundary conditions.

use crate::config::InputData;
use crate::geometry::{Point, SketchPoint};

/// Straight line of the cross-section sketch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// First end point.
    pub start: SketchPoint,
    /// Second end point.
    pub end: SketchPoint,
}

impl Segment {
    /// Create a segment between two sketch points.
    #[must_use]
    pub const fn new(start: SketchPoint, end: SketchPoint) -> Self {
        Self { start, end }
    }

    /// Point halfway along the segment.
    #[must_use]
    pub fn midpoint(&self) -> SketchPoint {
        self.start.midpoint(self.end)
    }

    /// Length of the segment in millimetres.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end.x - self.start.x).hypot(self.end.y - self.start.y)
    }
}

/// Centreline geometry of the combined profile in the sketch plane.
///
/// The tube is centred on the origin. One T-beam hangs under each tube side
/// wall and one under the centre, flanges at `y = -flange_offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrossSection {
    /// Horizontal offset of the side walls.
    half_span: f64,
    /// Vertical offset of the top and bottom walls.
    quad_offset: f64,
    /// Depth of the flange centreline below the tube centre.
    flange_offset: f64,
    /// Full flange length.
    flange_length: f64,
    /// Sketch sheet size.
    sheet_size: f64,
}

impl CrossSection {
    /// Cross-section of a validated input.
    #[must_use]
    pub fn new(data: &InputData) -> Self {
        let parameters = data.parameters();
        let derived = data.derived();
        Self {
            half_span: derived.half_span,
            quad_offset: derived.quad_offset,
            flange_offset: derived.flange_offset,
            flange_length: parameters.flange_length,
            sheet_size: 2.0 * (parameters.quad_height + parameters.web_length),
        }
    }

    /// Size of the sketch sheet.
    #[must_use]
    pub fn sheet_size(&self) -> f64 {
        self.sheet_size
    }

    /// Horizontal positions of the three T webs, left to right.
    #[must_use]
    pub fn web_positions(&self) -> [f64; 3] {
        [-self.half_span, 0.0, self.half_span]
    }

    /// The four tube walls: top, left, bottom, right.
    #[must_use]
    pub fn tube_walls(&self) -> [Segment; 4] {
        let (qs, qy) = (self.half_span, self.quad_offset);
        [
            Segment::new(SketchPoint::new(qs, qy), SketchPoint::new(-qs, qy)),
            Segment::new(SketchPoint::new(-qs, qy), SketchPoint::new(-qs, -qy)),
            Segment::new(SketchPoint::new(-qs, -qy), SketchPoint::new(qs, -qy)),
            Segment::new(SketchPoint::new(qs, -qy), SketchPoint::new(qs, qy)),
        ]
    }

    /// Web of the T-beam at `x`, from the tube bottom down to the flange.
    #[must_use]
    pub fn web(&self, x: f64) -> Segment {
        Segment::new(
            SketchPoint::new(x, -self.quad_offset),
            SketchPoint::new(x, -self.flange_offset),
        )
    }

    /// Flange of the T-beam at `x`, split at the web into two halves.
    #[must_use]
    pub fn flange_halves(&self, x: f64) -> [Segment; 2] {
        let [left, root, right] = self.flange_vertices(x);
        [Segment::new(left, root), Segment::new(root, right)]
    }

    /// Flange tip, web root and flange tip of the T-beam at `x`.
    #[must_use]
    pub fn flange_vertices(&self, x: f64) -> [SketchPoint; 3] {
        let y = -self.flange_offset;
        let half = self.flange_length / 2.0;
        [
            SketchPoint::new(x - half, y),
            SketchPoint::new(x, y),
            SketchPoint::new(x + half, y),
        ]
    }

    /// All sketch lines: four tube walls, then web and flange of each T-beam.
    ///
    /// # Examples
    /// ```
    /// use quadbeam::{CrossSection, InputData, Preset};
    ///
    /// let data = InputData::from_preset(Preset::Cp1).expect("valid");
    /// assert_eq!(CrossSection::new(&data).segments().len(), 10);
    /// ```
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments = self.tube_walls().to_vec();
        for x in self.web_positions() {
            let [left, _, right] = self.flange_vertices(x);
            segments.push(self.web(x));
            segments.push(Segment::new(left, right));
        }
        segments
    }

    /// The six flange tips, where the beam rests on its supports.
    #[must_use]
    pub fn flange_tips(&self) -> Vec<SketchPoint> {
        self.web_positions()
            .into_iter()
            .flat_map(|x| {
                let [left, _, right] = self.flange_vertices(x);
                [left, right]
            })
            .collect()
    }

    /// Point on the tube top wall where the tracked fiber runs.
    #[must_use]
    pub fn fiber(&self) -> SketchPoint {
        SketchPoint::new(0.0, self.quad_offset)
    }
}

/// Shell section assigned to a group of faces.
#[derive(Clone, Debug, PartialEq)]
pub struct ShellSection {
    /// Section name, `<profile>-Quad-Section` or `<profile>-T-Section`.
    pub name: String,
    /// Shell thickness in millimetres.
    pub thickness: f64,
    /// One probe point on each face receiving the section.
    pub faces: Vec<Point>,
}

/// Edge groups seeded independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeGroup {
    /// Tube corners running along the extrusion.
    Length,
    /// Tube side walls.
    QuadHeight,
    /// Tube top wall.
    QuadWidth,
    /// Halves of the tube bottom wall.
    QuadBottomHalf,
    /// Halves of the T flanges.
    TFlange,
    /// T webs.
    TWeb,
}

/// Seed count applied to every edge found at the probe points.
#[derive(Clone, Debug, PartialEq)]
pub struct SeedGroup {
    /// Which group this is.
    pub group: EdgeGroup,
    /// Number of subdivisions per edge.
    pub seeds: u32,
    /// One probe point on each edge.
    pub edges: Vec<Point>,
}

/// Vertex sets carrying boundary conditions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SupportKind {
    /// Flange tips at `z = 0`, all degrees of freedom fixed.
    FixedAll,
    /// Flange tips at `z = l`, free to slide along the extrusion.
    FixedY,
    /// Every flange vertex at `z = 0`.
    FixedXZ,
}

impl SupportKind {
    /// Set name in the model.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SupportKind::FixedAll => "bcFixedAll",
            SupportKind::FixedY => "bcFixedY",
            SupportKind::FixedXZ => "bcFixedXZ",
        }
    }

    /// Restrained `[u1, u2, u3, ur1, ur2, ur3]`, or `None` for a set that
    /// is only defined and carries no boundary condition.
    #[must_use]
    pub const fn restraint(self) -> Option<[bool; 6]> {
        match self {
            SupportKind::FixedAll => Some([true; 6]),
            SupportKind::FixedY => Some([true, true, false, false, true, true]),
            SupportKind::FixedXZ => None,
        }
    }
}

/// Vertex set of one support kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Support {
    /// Kind of support.
    pub kind: SupportKind,
    /// Vertices in the set.
    pub vertices: Vec<Point>,
}

/// Uniform pressure on the tube top face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PressureLoad {
    /// Probe point on the loaded face.
    pub face: Point,
    /// Magnitude in N/mm², positive towards the surface.
    pub magnitude: f64,
}

/// Everything the external builder needs beyond the raw parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelPlan {
    /// Cross-section the part is extruded from.
    pub cross_section: CrossSection,
    /// Extrusion depth in millimetres.
    pub depth: f64,
    /// Tube and T-beam shell sections.
    pub sections: [ShellSection; 2],
    /// Mesh seeds per edge group.
    pub seeds: Vec<SeedGroup>,
    /// Applied pressure.
    pub pressure: PressureLoad,
    /// Support vertex sets.
    pub supports: Vec<Support>,
}

impl ModelPlan {
    /// Lay out the model for a validated input.
    ///
    /// # Examples
    /// ```
    /// use quadbeam::{InputData, ModelPlan, Preset};
    ///
    /// let data = InputData::from_preset(Preset::Cp1).expect("valid");
    /// let plan = ModelPlan::new(&data);
    /// assert_eq!(plan.sections[0].faces.len(), 5);
    /// assert_eq!(plan.sections[1].faces.len(), 9);
    /// ```
    #[must_use]
    pub fn new(data: &InputData) -> Self {
        let parameters = data.parameters();
        let cross_section = CrossSection::new(data);
        let depth = parameters.length;
        let mid = depth / 2.0;
        let ends = [0.0, depth];

        let [top, left, bottom, right] = cross_section.tube_walls();
        let [bottom_left, bottom_right] = split(&bottom);
        let webs: Vec<Segment> = cross_section
            .web_positions()
            .into_iter()
            .map(|x| cross_section.web(x))
            .collect();
        let flange_halves: Vec<Segment> = cross_section
            .web_positions()
            .into_iter()
            .flat_map(|x| cross_section.flange_halves(x))
            .collect();

        let tube_faces = [top, left, right, bottom_left, bottom_right];
        let sections = [
            ShellSection {
                name: format!("{}-Quad-Section", parameters.name),
                thickness: parameters.quad_thickness,
                faces: probes(&tube_faces, &[mid]),
            },
            ShellSection {
                name: format!("{}-T-Section", parameters.name),
                thickness: parameters.t_thickness,
                faces: probes(&[webs.as_slice(), flange_halves.as_slice()].concat(), &[mid]),
            },
        ];

        let mesh = &parameters.mesh;
        let seeds = vec![
            SeedGroup {
                group: EdgeGroup::Length,
                seeds: mesh.length,
                edges: [top.start, top.end, bottom.start, bottom.end]
                    .iter()
                    .map(|corner| corner.at(mid))
                    .collect(),
            },
            SeedGroup {
                group: EdgeGroup::QuadHeight,
                seeds: mesh.quad_height,
                edges: probes(&[left, right], &ends),
            },
            SeedGroup {
                group: EdgeGroup::QuadWidth,
                seeds: mesh.quad_width,
                edges: probes(&[top], &ends),
            },
            SeedGroup {
                group: EdgeGroup::QuadBottomHalf,
                seeds: mesh.quad_bottom_half(),
                edges: probes(&[bottom_left, bottom_right], &ends),
            },
            SeedGroup {
                group: EdgeGroup::TFlange,
                seeds: mesh.t_flange,
                edges: probes(&flange_halves, &ends),
            },
            SeedGroup {
                group: EdgeGroup::TWeb,
                seeds: mesh.t_web,
                edges: probes(&webs, &ends),
            },
        ];

        let pressure = PressureLoad {
            face: top.midpoint().at(mid),
            magnitude: data.derived().pressure_magnitude(),
        };

        let tips = cross_section.flange_tips();
        let flange_vertices: Vec<SketchPoint> = cross_section
            .web_positions()
            .into_iter()
            .flat_map(|x| cross_section.flange_vertices(x))
            .collect();
        let supports = vec![
            Support {
                kind: SupportKind::FixedAll,
                vertices: tips.iter().map(|tip| tip.at(0.0)).collect(),
            },
            Support {
                kind: SupportKind::FixedY,
                vertices: tips.iter().map(|tip| tip.at(depth)).collect(),
            },
            Support {
                kind: SupportKind::FixedXZ,
                vertices: flange_vertices.iter().map(|vertex| vertex.at(0.0)).collect(),
            },
        ];

        Self {
            cross_section,
            depth,
            sections,
            seeds,
            pressure,
            supports,
        }
    }

    /// Seed group of the given kind.
    #[must_use]
    pub fn seed_group(&self, group: EdgeGroup) -> Option<&SeedGroup> {
        self.seeds.iter().find(|seeds| seeds.group == group)
    }

    /// Supports that carry a boundary condition.
    pub fn boundary_conditions(&self) -> impl Iterator<Item = (&Support, [bool; 6])> {
        self.supports
            .iter()
            .filter_map(|support| support.kind.restraint().map(|dofs| (support, dofs)))
    }
}

/// Split a segment at its midpoint.
fn split(segment: &Segment) -> [Segment; 2] {
    let mid = segment.midpoint();
    [
        Segment::new(segment.start, mid),
        Segment::new(mid, segment.end),
    ]
}

/// Midpoint of every segment, placed at each of the given depths.
fn probes(segments: &[Segment], depths: &[f64]) -> Vec<Point> {
    depths
        .iter()
        .flat_map(|&z| segments.iter().map(move |segment| segment.midpoint().at(z)))
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::config::Preset;

    fn cp1() -> InputData {
        InputData::from_preset(Preset::Cp1).expect("valid preset")
    }

    #[test]
    fn cross_section_lines() {
        let section = CrossSection::new(&cp1());
        let segments = section.segments();
        assert_eq!(segments.len(), 10);
        assert_relative_eq!(section.sheet_size(), 220.0);

        // Tube walls enclose a 116 x 56 rectangle.
        assert_relative_eq!(segments[0].length(), 116.0);
        assert_relative_eq!(segments[1].length(), 56.0);

        // Webs run from the tube bottom to the flange, flanges span b_t.
        for pair in segments[4..].chunks(2) {
            assert_relative_eq!(pair[0].length(), 49.0);
            assert_relative_eq!(pair[1].length(), 50.0);
            assert_relative_eq!(pair[1].start.y, -77.0);
        }
    }

    #[test]
    fn flanges_are_centred_under_webs() {
        let section = CrossSection::new(&cp1());
        assert_eq!(section.web_positions(), [-58.0, 0.0, 58.0]);
        let tips = section.flange_tips();
        assert_eq!(tips.len(), 6);
        assert_eq!(tips[0], SketchPoint::new(-83.0, -77.0));
        assert_eq!(tips[5], SketchPoint::new(83.0, -77.0));
    }

    #[test]
    fn plan_sections_use_their_own_thickness() {
        let plan = ModelPlan::new(&cp1());
        assert_eq!(plan.sections[0].name, "CP1-Quad-Section");
        assert_relative_eq!(plan.sections[0].thickness, 4.0);
        assert_eq!(plan.sections[1].name, "CP1-T-Section");
        assert_relative_eq!(plan.sections[1].thickness, 6.0);
        assert!(plan.sections[1]
            .faces
            .iter()
            .all(|face| face.y < -28.0 && (face.z - 1850.0).abs() < f64::EPSILON));
    }

    #[test]
    fn seed_groups_cover_both_ends() {
        let plan = ModelPlan::new(&cp1());
        let length = plan.seed_group(EdgeGroup::Length).expect("length seeds");
        assert_eq!(length.seeds, 10);
        assert_eq!(length.edges.len(), 4);
        assert!(length.edges.iter().all(|edge| edge.z == 1850.0));

        let bottom = plan.seed_group(EdgeGroup::QuadBottomHalf).expect("bottom seeds");
        assert_eq!(bottom.seeds, 5);
        assert_eq!(bottom.edges.len(), 4);

        let flanges = plan.seed_group(EdgeGroup::TFlange).expect("flange seeds");
        assert_eq!(flanges.edges.len(), 12);
        assert_eq!(flanges.edges.iter().filter(|edge| edge.z == 3700.0).count(), 6);

        let webs = plan.seed_group(EdgeGroup::TWeb).expect("web seeds");
        assert_eq!(webs.edges[1], Point::new(0.0, -52.5, 0.0));
    }

    #[test]
    fn pressure_acts_on_top_face() {
        let data = cp1();
        let plan = ModelPlan::new(&data);
        assert_eq!(plan.pressure.face, Point::new(0.0, 28.0, 1850.0));
        assert_relative_eq!(plan.pressure.magnitude, -data.derived().pressure);
    }

    #[test]
    fn supports_and_boundary_conditions() {
        let plan = ModelPlan::new(&cp1());
        assert_eq!(plan.supports.len(), 3);
        assert_eq!(plan.supports[2].vertices.len(), 9);

        let applied: Vec<_> = plan
            .boundary_conditions()
            .map(|(support, _)| support.kind)
            .collect();
        assert_eq!(applied, vec![SupportKind::FixedAll, SupportKind::FixedY]);

        let fixed_y = &plan.supports[1];
        assert!(fixed_y.vertices.iter().all(|vertex| vertex.z == 3700.0));
        assert_eq!(
            SupportKind::FixedY.restraint(),
            Some([true, true, false, false, true, true])
        );
    }
}
