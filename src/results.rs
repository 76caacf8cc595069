//! Aggregation of node results along the tracked fiber.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::derived::DerivedGeometry;
use crate::errors::ResultError;
use crate::geometry::{Displacement, Force, Point};

/// Identifier of a mesh node, as assigned by the solver.
pub type NodeLabel = u32;

/// Distance within which a node counts as lying on the fiber, in millimetres.
pub const FIBER_TOLERANCE: f64 = 1.0e-10;

/// One node of a solver result export.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Node label, a positive integer.
    pub label: NodeLabel,
    /// Undeformed coordinates in millimetres.
    pub position: [f64; 3],
    /// Reaction force in newtons, when the node is supported.
    #[serde(default)]
    pub reaction: Option<[f64; 3]>,
    /// Displacement in millimetres.
    #[serde(default)]
    pub displacement: Option<[f64; 3]>,
}

/// Node results written by the external post-processing step.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultExport {
    /// Exported nodes.
    pub nodes: Vec<NodeRecord>,
}

/// Positions, reaction forces and displacements of tracked nodes.
///
/// The fiber is the ordered list of nodes whose position has been recorded;
/// queries walk it in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultData {
    /// Fiber nodes in the order they were first recorded.
    fiber: Vec<NodeLabel>,
    /// Node positions.
    positions: HashMap<NodeLabel, Point>,
    /// Reaction forces.
    reactions: HashMap<NodeLabel, Force>,
    /// Displacements.
    displacements: HashMap<NodeLabel, Displacement>,
}

impl ResultData {
    /// Create an empty aggregator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the position of a fiber node.
    ///
    /// Re-recording a node replaces its position but keeps its place on the fiber.
    pub fn insert_position(&mut self, label: NodeLabel, position: Point) {
        if self.positions.insert(label, position).is_none() {
            self.fiber.push(label);
        }
    }

    /// Record the reaction force on a node.
    pub fn insert_reaction(&mut self, label: NodeLabel, reaction: Force) {
        self.reactions.insert(label, reaction);
    }

    /// Record the displacement of a node.
    pub fn insert_displacement(&mut self, label: NodeLabel, displacement: Displacement) {
        self.displacements.insert(label, displacement);
    }

    /// Record every node lying on the fiber along the tube top wall.
    ///
    /// A node is on the fiber when `x = 0` and `y = quad_offset` within
    /// [`FIBER_TOLERANCE`]. Returns the number of nodes recorded.
    pub fn track_fiber_nodes<I>(&mut self, nodes: I, derived: &DerivedGeometry) -> usize
    where
        I: IntoIterator<Item = (NodeLabel, Point)>,
    {
        let mut found = 0;
        for (label, position) in nodes {
            if position.x.abs() < FIBER_TOLERANCE
                && (position.y - derived.quad_offset).abs() < FIBER_TOLERANCE
            {
                debug!(
                    "{label:4} {:10.3} {:10.3} {:10.3}",
                    position.x, position.y, position.z
                );
                self.insert_position(label, position);
                found += 1;
            }
        }
        info!("{found} fiber nodes found");
        found
    }

    /// Build an aggregator from a solver export.
    ///
    /// Fiber nodes are selected by position; reactions and displacements are
    /// kept for every node that carries them.
    ///
    /// # Errors
    ///
    /// Returns [`ResultError::NonPositiveLabel`] when a node label is zero.
    pub fn from_export(
        export: &ResultExport,
        derived: &DerivedGeometry,
    ) -> Result<Self, ResultError> {
        if let Some(record) = export.nodes.iter().find(|record| record.label == 0) {
            return Err(ResultError::NonPositiveLabel(record.label));
        }
        let mut results = Self::new();
        results.track_fiber_nodes(
            export
                .nodes
                .iter()
                .map(|record| (record.label, Point::from(record.position))),
            derived,
        );
        for record in &export.nodes {
            if let Some(reaction) = record.reaction {
                results.insert_reaction(record.label, reaction.into());
            }
            if let Some(displacement) = record.displacement {
                results.insert_displacement(record.label, displacement.into());
            }
        }
        Ok(results)
    }

    /// Read a JSON export from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ResultError::Io`] or [`ResultError::Json`] when the export
    /// cannot be read, otherwise the same failures as [`ResultData::from_export`].
    pub fn read_json<P: AsRef<Path>>(
        path: P,
        derived: &DerivedGeometry,
    ) -> Result<Self, ResultError> {
        let path = path.as_ref();
        info!("reading node results from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        let export: ResultExport = serde_json::from_str(&contents)?;
        Self::from_export(&export, derived)
    }

    /// Fiber nodes in insertion order.
    #[must_use]
    pub fn fiber(&self) -> &[NodeLabel] {
        &self.fiber
    }

    /// Number of fiber nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.fiber.len()
    }

    /// Recorded position of a node.
    #[must_use]
    pub fn position(&self, label: NodeLabel) -> Option<Point> {
        self.positions.get(&label).copied()
    }

    /// Recorded reaction force on a node.
    #[must_use]
    pub fn reaction(&self, label: NodeLabel) -> Option<Force> {
        self.reactions.get(&label).copied()
    }

    /// Recorded displacement of a node.
    #[must_use]
    pub fn displacement(&self, label: NodeLabel) -> Option<Displacement> {
        self.displacements.get(&label).copied()
    }

    /// Vertical displacement of largest magnitude along the fiber.
    ///
    /// The sign is preserved, so a downward deflection comes back negative.
    /// On equal magnitudes the first node on the fiber wins. Returns `0.0`
    /// when no node is tracked; fiber nodes without a displacement are skipped.
    ///
    /// # Examples
    /// ```
    /// use quadbeam::{displacement, point, ResultData};
    ///
    /// let mut results = ResultData::new();
    /// for (label, uy) in [(1, -2.5), (2, 1.0), (3, -0.3)] {
    ///     results.insert_position(label, point(0.0, 28.0, 0.0));
    ///     results.insert_displacement(label, displacement(0.0, uy, 0.0));
    /// }
    /// assert_eq!(results.max_displacement(), -2.5);
    /// ```
    #[must_use]
    pub fn max_displacement(&self) -> f64 {
        let mut max = 0.0_f64;
        for label in &self.fiber {
            match self.displacements.get(label) {
                Some(displacement) => {
                    if displacement.y.abs() > max.abs() {
                        max = displacement.y;
                    }
                }
                None => warn!("fiber node {label} has no displacement"),
            }
        }
        max
    }

    /// Componentwise sum of all recorded reaction forces.
    #[must_use]
    pub fn sum_reaction_forces(&self) -> Force {
        self.reactions
            .values()
            .fold(Force::default(), |sum, &reaction| sum + reaction)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::config::Preset;

    fn fiber_with(displacements: &[(NodeLabel, f64)]) -> ResultData {
        let mut results = ResultData::new();
        for &(label, uy) in displacements {
            results.insert_position(label, Point::new(0.0, 28.0, f64::from(label)));
            results.insert_displacement(label, Displacement::new(0.0, uy, 0.0));
        }
        results
    }

    #[test]
    fn max_displacement_keeps_sign_of_largest_magnitude() {
        let results = fiber_with(&[(1, -2.5), (2, 1.0), (3, -0.3)]);
        assert_eq!(results.max_displacement(), -2.5);

        let results = fiber_with(&[(1, 0.4), (2, -0.1), (3, 0.7)]);
        assert_eq!(results.max_displacement(), 0.7);
    }

    #[test]
    fn max_displacement_of_empty_fiber_is_zero() {
        assert_eq!(ResultData::new().max_displacement(), 0.0);
    }

    #[test]
    fn ties_go_to_first_fiber_node() {
        let results = fiber_with(&[(7, 2.0), (3, -2.0)]);
        assert_eq!(results.max_displacement(), 2.0);
        let results = fiber_with(&[(3, -2.0), (7, 2.0)]);
        assert_eq!(results.max_displacement(), -2.0);
    }

    #[test]
    fn nodes_off_the_fiber_are_ignored_by_the_query() {
        let mut results = fiber_with(&[(1, -0.5)]);
        results.insert_displacement(99, Displacement::new(0.0, -10.0, 0.0));
        assert_eq!(results.max_displacement(), -0.5);
    }

    #[test]
    fn fiber_nodes_without_displacement_are_skipped() {
        let mut results = fiber_with(&[(1, -0.5)]);
        results.insert_position(2, Point::new(0.0, 28.0, 10.0));
        assert_eq!(results.node_count(), 2);
        assert_eq!(results.max_displacement(), -0.5);
    }

    #[test]
    fn repeated_position_keeps_fiber_order() {
        let mut results = ResultData::new();
        results.insert_position(4, Point::new(0.0, 28.0, 0.0));
        results.insert_position(2, Point::new(0.0, 28.0, 5.0));
        results.insert_position(4, Point::new(0.0, 28.0, 1.0));
        assert_eq!(results.fiber(), &[4, 2]);
        assert_eq!(results.position(4), Some(Point::new(0.0, 28.0, 1.0)));
    }

    #[test]
    fn reactions_sum_componentwise() {
        let mut results = ResultData::new();
        assert_eq!(results.sum_reaction_forces(), Force::default());
        results.insert_reaction(1, Force::new(1.0, 2_000.0, 0.0));
        results.insert_reaction(2, Force::new(-1.0, 1_500.0, 0.5));
        let sum = results.sum_reaction_forces();
        assert_relative_eq!(sum.x, 0.0);
        assert_relative_eq!(sum.y, 3_500.0);
        assert_relative_eq!(sum.z, 0.5);
        assert_eq!(results.reaction(2), Some(Force::new(-1.0, 1_500.0, 0.5)));
    }

    #[test]
    fn fiber_selection_uses_top_wall_centreline() {
        let derived = DerivedGeometry::compute(&Preset::Cp1.parameters());
        let mut results = ResultData::new();
        let found = results.track_fiber_nodes(
            [
                (1, Point::new(0.0, 28.0, 0.0)),
                (2, Point::new(5.8, 28.0, 0.0)),
                (3, Point::new(0.0, -28.0, 370.0)),
                (4, Point::new(0.0, 28.0, 370.0)),
            ],
            &derived,
        );
        assert_eq!(found, 2);
        assert_eq!(results.fiber(), &[1, 4]);
    }

    #[test]
    fn export_is_parsed_and_filtered() {
        let derived = DerivedGeometry::compute(&Preset::Cp1.parameters());
        let export: ResultExport = serde_json::from_str(
            r#"{"nodes": [
                {"label": 1, "position": [0, 28, 0], "displacement": [0, -0.2, 0]},
                {"label": 2, "position": [0, 28, 1850], "displacement": [0, -1.4, 0]},
                {"label": 3, "position": [-83, -77, 0], "reaction": [0, 1200, 0],
                 "displacement": [0, 0, 0]}
            ]}"#,
        )
        .expect("valid export");
        let results = ResultData::from_export(&export, &derived).expect("labels are positive");
        assert_eq!(results.fiber(), &[1, 2]);
        assert_eq!(results.max_displacement(), -1.4);
        assert_relative_eq!(results.sum_reaction_forces().y, 1_200.0);
    }

    #[test]
    fn zero_label_is_rejected() {
        let derived = DerivedGeometry::compute(&Preset::Cp1.parameters());
        let export = ResultExport {
            nodes: vec![NodeRecord {
                label: 0,
                position: [0.0, 28.0, 0.0],
                reaction: None,
                displacement: None,
            }],
        };
        assert!(matches!(
            ResultData::from_export(&export, &derived),
            Err(ResultError::NonPositiveLabel(0))
        ));
    }
}
