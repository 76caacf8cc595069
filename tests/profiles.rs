use approx::assert_relative_eq;
use quadbeam::{
    displacement, point, validate, ConfigError, Constraint, DerivedGeometry, InputData,
    ModelPlan, Parameters, Preset, ResultData, ResultExport, StepKind, SupportKind,
};

fn cp1_with(adjust: impl FnOnce(&mut Parameters)) -> Parameters {
    let mut parameters = Preset::Cp1.parameters();
    adjust(&mut parameters);
    parameters
}

fn geometry_error(parameters: Parameters) -> Constraint {
    match InputData::new(parameters) {
        Err(ConfigError::Geometry(error)) => error.constraint,
        other => panic!("expected a geometry error, got {other:?}"),
    }
}

#[test]
fn cp1_validates_and_derives_expected_geometry() {
    let data = InputData::from_preset(Preset::Cp1).expect("CP1 is feasible");
    let parameters = data.parameters();
    assert_eq!(parameters.quad_width, 120.0);
    assert_eq!(parameters.quad_height, 60.0);
    assert_eq!(parameters.quad_thickness, 4.0);
    assert_eq!(parameters.flange_length, 50.0);
    assert_eq!(parameters.web_length, 50.0);
    assert_eq!(parameters.t_thickness, 6.0);
    assert_eq!(parameters.length, 3700.0);
    assert_eq!(parameters.load, -29.0);

    let derived = data.derived();
    assert_relative_eq!(derived.half_span, 58.0);
    assert_relative_eq!(derived.quad_offset, 28.0);
    assert_relative_eq!(derived.flange_offset, 77.0);
    assert_relative_eq!(
        derived.pressure,
        -29_000.0 / (3_700.0 * 170.0),
        max_relative = 1.0e-12
    );
    assert_relative_eq!(derived.pressure, -0.046_104, max_relative = 1.0e-4);
}

#[test]
fn wide_flanges_collide() {
    let parameters = cp1_with(|parameters| parameters.flange_length = 70.0);
    let error = validate(&parameters).expect_err("120 < 2 * 70");
    assert!(error.is_collision());
    assert_eq!(geometry_error(parameters), Constraint::TBeamCollision);
}

#[test]
fn thick_t_section_is_inconsistent() {
    let parameters = cp1_with(|parameters| parameters.t_thickness = 60.0);
    assert_eq!(
        geometry_error(parameters),
        Constraint::TThicknessExceedsFlange
    );
}

#[test]
fn every_infeasible_family_is_rejected() {
    let cases: [(fn(&mut Parameters), Constraint); 8] = [
        (|p| p.flange_length = 0.09, Constraint::FlangeLength),
        (|p| p.web_length = 0.0, Constraint::WebLength),
        (|p| p.t_thickness = 0.05, Constraint::TThickness),
        (|p| p.web_length = 5.9, Constraint::TThicknessExceedsWeb),
        (|p| p.quad_width = 0.0, Constraint::QuadWidth),
        (|p| p.quad_height = 0.0, Constraint::QuadHeight),
        (|p| p.quad_thickness = 60.5, Constraint::QuadThickness),
        (|p| p.quad_width = 99.0, Constraint::TBeamCollision),
    ];
    for (adjust, expected) in cases {
        assert_eq!(geometry_error(cp1_with(adjust)), expected);
    }
}

#[test]
fn derived_geometry_is_stable_across_recomputation() {
    for preset in Preset::ALL {
        let data = InputData::from_preset(preset).expect("preset is feasible");
        let again = DerivedGeometry::compute(data.parameters());
        assert_eq!(*data.derived(), again);
    }
}

#[test]
fn json_configuration_matches_preset() {
    let path = std::env::temp_dir().join(format!("quadbeam-cp2-{}.json", std::process::id()));
    let json = serde_json::to_string_pretty(&Preset::Cp2.parameters()).expect("serialises");
    std::fs::write(&path, json).expect("write temp file");

    let loaded = InputData::load(&path).expect("valid file");
    let preset = InputData::from_preset(Preset::Cp2).expect("valid preset");
    assert_eq!(loaded, preset);

    std::fs::remove_file(path).ok();
}

#[test]
fn missing_configuration_file_is_an_io_error() {
    let path = std::env::temp_dir().join("quadbeam-does-not-exist.json");
    assert!(matches!(InputData::load(path), Err(ConfigError::Io(_))));
}

#[test]
fn buckling_job_name() {
    let data = InputData::from_preset(Preset::Cp3)
        .expect("valid")
        .with_step(StepKind::Buckling);
    assert_eq!(data.job_name(), "CP3-Buckling");
}

#[test]
fn max_displacement_preserves_sign() {
    let mut results = ResultData::new();
    for (label, uy) in [(1, -2.5), (2, 1.0), (3, -0.3)] {
        results.insert_position(label, point(0.0, 28.0, f64::from(label)));
        results.insert_displacement(label, displacement(0.0, uy, 0.0));
    }
    assert_eq!(results.max_displacement(), -2.5);
    assert_eq!(ResultData::new().max_displacement(), 0.0);
}

#[test]
fn plan_and_results_share_the_fiber() {
    let data = InputData::from_preset(Preset::Cp1).expect("valid");
    let plan = ModelPlan::new(&data);
    let fiber = plan.cross_section.fiber();

    let export = ResultExport {
        nodes: (1..=11)
            .map(|label| quadbeam::NodeRecord {
                label,
                position: [fiber.x, fiber.y, 370.0 * f64::from(label - 1)],
                reaction: None,
                displacement: Some([0.0, -0.1 * f64::from(label.min(12 - label)), 0.0]),
            })
            .collect(),
    };
    let results = ResultData::from_export(&export, data.derived()).expect("valid export");
    assert_eq!(results.node_count(), 11);
    assert_relative_eq!(results.max_displacement(), -0.6, epsilon = 1.0e-12);

    let fixed_all = plan
        .supports
        .iter()
        .find(|support| support.kind == SupportKind::FixedAll)
        .expect("fixed support present");
    assert!(fixed_all.vertices.iter().all(|vertex| vertex.y == -77.0));
}
