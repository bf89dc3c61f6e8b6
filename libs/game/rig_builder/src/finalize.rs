// This file is part of OpenFA.
//
// OpenFA is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// OpenFA is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with OpenFA.  If not, see <http://www.gnu.org/licenses/>.
//! Whole-rig passes that run once every section has been built (spec.md
//! §4.5): wing span/induced-drag, position lights, lowest-node discovery,
//! bounding boxes, and default sound-source attachment.
use nalgebra::Vector3;
use rigdef::error::DiagnosticList;
use rigdef::records::{CameraSettings, EngineType, PropSpecial};

use crate::limits::{self, MAX_PROPS, MAX_SOUNDSCRIPTS_PER_TRUCK};
use crate::rig::{BoundingBox, BuiltProp, BuiltSoundSource, Rig};

/// Per spec.md §4.5: inflate every collision box's bounds by 5cm on every
/// side so fast-moving contact points don't tunnel through thin panels.
const COLLISION_BOX_INFLATION_METERS: f32 = 0.05;

/// Treats the whole `wings` vector as a single contiguous spanwise run and
/// gives both of its boundary wings the tip-to-tip span, enabling induced
/// drag on them; interior wings keep `span_meters = 0.0` (spec.md §4.5 only
/// computes a span at the run's start/end wing, to avoid counting the same
/// span once per wing panel).
fn compute_wing_spans(rig: &mut Rig) {
    if rig.wings.len() < 2 {
        return;
    }
    let first_tip = rig.nodes[rig.wings[0].nodes[1]].position;
    let last_tip = rig.nodes[rig.wings[rig.wings.len() - 1].nodes[1]].position;
    let span = (first_tip - last_tip).norm();
    rig.wings.first_mut().unwrap().span_meters = span;
    rig.wings.last_mut().unwrap().span_meters = span;
}

/// For an aircraft (has at least one wing) with no explicit lights defined,
/// synthesize four beacon props at the outermost wingtips (spec.md §4.5).
/// The synthesized props reuse the tip node as reference/x-axis/y-axis node,
/// since no separate orientation geometry is available at this point.
fn synthesize_position_lights(rig: &mut Rig, module_name: &str, diags: &mut DiagnosticList) {
    if rig.wings.is_empty() || !rig.flares2.is_empty() {
        return;
    }
    let first_tip = rig.wings[0].nodes[1];
    let last_tip = rig.wings[rig.wings.len() - 1].nodes[1];
    let beacons = [
        (first_tip, PropSpecial::RedBeacon),
        (first_tip, PropSpecial::Beacon),
        (last_tip, PropSpecial::RedBeacon),
        (last_tip, PropSpecial::Beacon),
    ];
    for (node, special) in beacons {
        limits::try_push(
            &mut rig.props,
            BuiltProp {
                reference_node: node,
                x_axis_node: node,
                y_axis_node: node,
                offset: Vector3::zeros(),
                rotation: Vector3::zeros(),
                mesh_name: "beacon.mesh".to_string(),
                camera_settings: CameraSettings::default(),
                special: Some(special),
            },
            MAX_PROPS,
            "finalize",
            module_name,
            diags,
        );
    }
}

/// The node with the lowest vertical (Y) coordinate, used by the runtime to
/// set ground-spawn height.
fn find_lowest_node(rig: &mut Rig) {
    rig.lowest_node = rig
        .nodes
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.position.y.partial_cmp(&b.position.y).unwrap())
        .map(|(index, _)| index);
}

fn compute_bounding_box(rig: &mut Rig) {
    let mut nodes = rig.nodes.iter();
    let Some(first) = nodes.next() else {
        rig.bounding_box = None;
        return;
    };
    let mut min = first.position;
    let mut max = first.position;
    for node in nodes {
        min.x = min.x.min(node.position.x);
        min.y = min.y.min(node.position.y);
        min.z = min.z.min(node.position.z);
        max.x = max.x.max(node.position.x);
        max.y = max.y.max(node.position.y);
        max.z = max.z.max(node.position.z);
    }
    rig.bounding_box = Some(BoundingBox { min, max });
}

fn compute_collision_box_bounds(rig: &mut Rig) {
    let inflation = Vector3::new(
        COLLISION_BOX_INFLATION_METERS,
        COLLISION_BOX_INFLATION_METERS,
        COLLISION_BOX_INFLATION_METERS,
    );
    for collision_box in &mut rig.collision_boxes {
        let mut points = collision_box.nodes.iter().map(|&idx| rig.nodes[idx].position);
        let Some(first) = points.next() else { continue };
        let mut min = first;
        let mut max = first;
        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }
        collision_box.bounds_min = min - inflation;
        collision_box.bounds_max = max + inflation;
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum VehicleKind {
    Car,
    Truck,
    Boat,
    Airplane,
}

fn classify_vehicle(rig: &Rig) -> Option<VehicleKind> {
    if !rig.wings.is_empty() || !rig.turbojets.is_empty() || !rig.turboprops2.is_empty() || !rig.pistonprops.is_empty() {
        return Some(VehicleKind::Airplane);
    }
    if !rig.screwprops.is_empty() {
        return Some(VehicleKind::Boat);
    }
    if !rig.wheels.is_empty() {
        let kind = match rig.engoption.as_ref().map(|e| e.engine_type) {
            Some(EngineType::Truck) => VehicleKind::Truck,
            _ => VehicleKind::Car,
        };
        return Some(kind);
    }
    None
}

/// Attaches a small set of default sound scripts by vehicle kind and
/// feature set (spec.md §4.5), when the rig-def didn't define any of its
/// own. Node 0 is used as a generic anchor since no dedicated "engine bay"
/// node concept exists in this grammar.
fn attach_default_sound_sources(rig: &mut Rig, module_name: &str, diags: &mut DiagnosticList) {
    if !rig.sound_sources.is_empty() || rig.nodes.is_empty() {
        return;
    }
    let Some(kind) = classify_vehicle(rig) else {
        return;
    };
    let mut scripts = vec![match kind {
        VehicleKind::Car => "tracks/default_car",
        VehicleKind::Truck => "tracks/default_truck",
        VehicleKind::Boat => "tracks/default_boat",
        VehicleKind::Airplane => "tracks/default_airplane",
    }];
    if !rig.commands.is_empty() {
        scripts.push("tracks/default_creak");
    }
    if !rig.turbojets.is_empty() || !rig.turboprops2.is_empty() || !rig.pistonprops.is_empty() {
        scripts.push("tracks/default_turbo");
    }
    if !rig.airbrakes.is_empty() {
        scripts.push("tracks/default_air");
    }
    if rig.antilockbrakes.is_some() {
        scripts.push("tracks/default_alb");
    }
    if rig.traction_control.is_some() {
        scripts.push("tracks/default_tc");
    }
    for script in scripts {
        limits::try_push(
            &mut rig.sound_sources,
            BuiltSoundSource { node: 0, sound_script_name: script.to_string(), mode: None },
            MAX_SOUNDSCRIPTS_PER_TRUCK,
            "soundsources",
            module_name,
            diags,
        );
    }
}

pub fn finalize(rig: &mut Rig, module_name: &str, diags: &mut DiagnosticList) {
    compute_wing_spans(rig);
    synthesize_position_lights(rig, module_name, diags);
    find_lowest_node(rig);
    compute_bounding_box(rig);
    compute_collision_box_bounds(rig);
    attach_default_sound_sources(rig, module_name, diags);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rig::BuiltNode;
    use rigdef::defaults::NodeOptions;

    fn node(x: f32, y: f32, z: f32) -> BuiltNode {
        BuiltNode {
            position: Vector3::new(x, y, z),
            options: NodeOptions::empty(),
            load_weight: 0.0,
            friction: 1.0,
            volume: 1.0,
            surface: 1.0,
            detacher_group: 0,
            wheel_id: None,
            wheel_ring: 0,
        }
    }

    #[test]
    fn bounding_box_spans_every_node() {
        let mut rig = Rig { nodes: vec![node(-1.0, 0.0, 2.0), node(3.0, -4.0, 0.0)], ..Default::default() };
        let mut diags = DiagnosticList::new();
        finalize(&mut rig, "root", &mut diags);
        let bb = rig.bounding_box.unwrap();
        assert_eq!(bb.min, Vector3::new(-1.0, -4.0, 0.0));
        assert_eq!(bb.max, Vector3::new(3.0, 0.0, 2.0));
    }

    #[test]
    fn lowest_node_is_smallest_y() {
        let mut rig = Rig { nodes: vec![node(0.0, 5.0, 0.0), node(0.0, -2.0, 0.0), node(0.0, 1.0, 0.0)], ..Default::default() };
        let mut diags = DiagnosticList::new();
        finalize(&mut rig, "root", &mut diags);
        assert_eq!(rig.lowest_node, Some(1));
    }

    #[test]
    fn collision_box_bounds_are_inflated() {
        let mut rig = Rig { nodes: vec![node(0.0, 0.0, 0.0), node(1.0, 1.0, 1.0)], ..Default::default() };
        rig.collision_boxes.push(crate::rig::BuiltCollisionBox { nodes: vec![0, 1], ..Default::default() });
        let mut diags = DiagnosticList::new();
        finalize(&mut rig, "root", &mut diags);
        let cb = &rig.collision_boxes[0];
        assert_eq!(cb.bounds_min, Vector3::new(-0.05, -0.05, -0.05));
        assert_eq!(cb.bounds_max, Vector3::new(1.05, 1.05, 1.05));
    }
}
