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
//! The wheel family (spec.md §4.3.3): every variant places nodes in rings
//! around an axle and wires them into a spring/damper truss. Single-ring
//! variants (`wheels`, `meshwheels`) place `2*rays` nodes (outer ring bound
//! to `axis1`, inner ring bound to `axis2`); two-ring variants (`wheels2`,
//! `meshwheels2`, `flexbodywheels`) add a second, larger ring connected to
//! the first by radial spokes, for `4*rays` nodes.
//!
//! Each ray contributes a fixed beam template rather than a literal
//! reimplementation of the historical engine's truss (see DESIGN.md): 4
//! radial spokes to the axle plus 4 same-ring tangential beams, 8 beams/ray
//! total, for a single ring (`wheels`, `meshwheels`) — matching spec.md
//! §4.3.3 step 4 and the original engine's `CheckBeamLimit(num_rays * 8)`.
//! Two-ring variants (`wheels2`, `meshwheels2`, `flexbodywheels`) repeat
//! that 8-beam truss for a second, tyre-radius ring (using tread
//! spring/damp) and add 6 cross-reinforcement beams plus 2 axial support
//! beams (with the tyre-intrusion short bound) between the two rings, 24
//! beams/ray total. Every wheel additionally gets one virtual beam from its
//! rigidity node (if any) to the nearer axis node.
use nalgebra::Vector3;

use rigdef::error::DiagnosticList;
use rigdef::ids::NodeId;
use rigdef::records::{
    BaseWheel, BaseWheel2, Braking, FlexBodyWheel, MeshWheel, MeshWheel2, Propulsion, Wheel, Wheel2,
};

use crate::beams::{make_beam, push_beam};
use crate::geometry::{axis_direction, perpendicular, ray_points};
use crate::limits::{self, MAX_WHEELS};
use crate::nodes::push_synthetic_node;
use crate::resolver::NodeResolver;
use crate::rig::{BuiltBeamKind, BuiltNode, BuiltWheel, Rig, WheelVariant};

const SECTION: &str = "wheels";

struct AxisNodes {
    index: [usize; 2],
    position: [Vector3<f32>; 2],
}

/// Resolves the axis pair and swaps them, if needed, so `axis1.z < axis2.z`
/// (spec.md §4.3.3 invariant).
fn resolve_axis(
    rig: &Rig,
    resolver: &NodeResolver,
    nodes: &[NodeId; 2],
    module_name: &str,
    diags: &mut DiagnosticList,
) -> Option<AxisNodes> {
    let a = resolver.resolve(&nodes[0], 0, SECTION, module_name, diags)?;
    let b = resolver.resolve(&nodes[1], 0, SECTION, module_name, diags)?;
    let pa = rig.nodes[a].position;
    let pb = rig.nodes[b].position;
    if pa.z <= pb.z {
        Some(AxisNodes { index: [a, b], position: [pa, pb] })
    } else {
        Some(AxisNodes { index: [b, a], position: [pb, pa] })
    }
}

fn nearest_axis_node(axis: &AxisNodes, target: Vector3<f32>) -> usize {
    let d0 = (axis.position[0] - target).norm_squared();
    let d1 = (axis.position[1] - target).norm_squared();
    if d0 <= d1 { axis.index[0] } else { axis.index[1] }
}

struct Ring {
    outer: Vec<usize>,
    inner: Vec<usize>,
}

#[allow(clippy::too_many_arguments)]
fn build_ring_nodes(
    rig: &mut Rig,
    axis: &AxisNodes,
    num_rays: u32,
    radius: f32,
    mass_per_node: f32,
    node_defaults: &rigdef::defaults::NodeDefaults,
    wheel_id: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) -> Ring {
    let axis_dir = axis_direction(axis.position[0], axis.position[1]);
    let ray_vector = perpendicular(&axis_dir);
    let mut outer = Vec::with_capacity(num_rays as usize);
    let mut inner = Vec::with_capacity(num_rays as usize);
    for i in 0..num_rays {
        let (outer_pos, inner_pos) = ray_points(
            axis.position[0],
            axis.position[1],
            &axis_dir,
            ray_vector,
            radius,
            i,
            num_rays,
        );
        let make_node = |position: Vector3<f32>, ring: u8| BuiltNode {
            position,
            options: node_defaults.options,
            load_weight: mass_per_node,
            friction: node_defaults.friction,
            volume: node_defaults.volume,
            surface: node_defaults.surface,
            detacher_group: 0,
            wheel_id: Some(wheel_id),
            wheel_ring: ring,
        };
        if let Some(idx) = push_synthetic_node(rig, make_node(outer_pos, 1), module_name, diags) {
            outer.push(idx);
        }
        if let Some(idx) = push_synthetic_node(rig, make_node(inner_pos, 2), module_name, diags) {
            inner.push(idx);
        }
    }
    Ring { outer, inner }
}

/// The 8-beams-per-ray single-ring truss (spec.md §4.3.3 step 4): 4 radial
/// spokes to the axle, 4 same-ray/next-ray tangential beams.
#[allow(clippy::too_many_arguments)]
fn build_ring_beams(
    rig: &mut Rig,
    axis: &AxisNodes,
    ring: &Ring,
    beam_defaults: &rigdef::defaults::BeamDefaults,
    springiness: f32,
    damping: f32,
    module_name: &str,
    diags: &mut DiagnosticList,
) -> Vec<usize> {
    let mut out = Vec::new();
    let rays = ring.outer.len();
    let mut push = |rig: &mut Rig, a: usize, b: usize, short_bound: Option<f32>| {
        let mut beam = make_beam(
            [a, b],
            BuiltBeamKind::Normal,
            beam_defaults,
            rigdef::records::BeamOptions::empty(),
            0,
        );
        beam.springiness = springiness;
        beam.damping_constant = damping;
        beam.short_bound = short_bound;
        if let Some(idx) = push_beam(rig, beam, module_name, diags) {
            out.push(idx);
        }
    };
    for i in 0..rays {
        let j = (i + 1) % rays;
        let (a1, a2) = (axis.index[0], axis.index[1]);
        let (oi, ii, oj, ij) = (ring.outer[i], ring.inner[i], ring.outer[j], ring.inner[j]);
        push(rig, a1, oi, Some(0.66));
        push(rig, a2, ii, Some(0.66));
        push(rig, a1, ii, None);
        push(rig, a2, oi, None);
        push(rig, oi, ii, None);
        push(rig, oi, oj, None);
        push(rig, ii, ij, None);
        push(rig, ii, oj, None);
    }
    out
}

/// The 8-beams-per-ray rim-to-tyre bridge (spec.md §4.3.3 step 5): 6
/// unbounded cross-reinforcement beams between same/next-ray rim and tyre
/// nodes, plus 2 axial support beams (one per ring side) carrying the
/// `1 - 0.95*rim_radius/tyre_radius` short bound that keeps the tyre ring
/// from collapsing onto the rim ring.
#[allow(clippy::too_many_arguments)]
fn build_cross_beams(
    rig: &mut Rig,
    rim: &Ring,
    tyre: &Ring,
    beam_defaults: &rigdef::defaults::BeamDefaults,
    springiness: f32,
    damping: f32,
    rim_radius: f32,
    tyre_radius: f32,
    module_name: &str,
    diags: &mut DiagnosticList,
) -> Vec<usize> {
    let mut out = Vec::new();
    let rays = rim.outer.len();
    let axial_short_bound = 1.0 - 0.95 * rim_radius / tyre_radius;
    let mut push = |rig: &mut Rig, a: usize, b: usize, short_bound: Option<f32>| {
        let mut beam = make_beam(
            [a, b],
            BuiltBeamKind::Normal,
            beam_defaults,
            rigdef::records::BeamOptions::empty(),
            0,
        );
        beam.springiness = springiness;
        beam.damping_constant = damping;
        beam.short_bound = short_bound;
        if let Some(idx) = push_beam(rig, beam, module_name, diags) {
            out.push(idx);
        }
    };
    for i in 0..rays {
        let j = (i + 1) % rays;
        // Axial support: directly ties each ring side to its counterpart on
        // the other ring, so the tyre cannot travel past the short bound
        // and intrude into the rim.
        push(rig, rim.outer[i], tyre.outer[i], Some(axial_short_bound));
        push(rig, rim.inner[i], tyre.inner[i], Some(axial_short_bound));
        // Cross reinforcement, unbounded.
        push(rig, rim.outer[i], tyre.inner[i], None);
        push(rig, rim.inner[i], tyre.outer[i], None);
        push(rig, rim.outer[i], tyre.outer[j], None);
        push(rig, rim.inner[i], tyre.inner[j], None);
        push(rig, rim.outer[i], tyre.inner[j], None);
        push(rig, rim.inner[i], tyre.outer[j], None);
    }
    out
}

fn build_rigidity_beam(
    rig: &mut Rig,
    axis: &AxisNodes,
    rigidity_node: Option<usize>,
    rigidity_position: Option<Vector3<f32>>,
    beam_defaults: &rigdef::defaults::BeamDefaults,
    module_name: &str,
    diags: &mut DiagnosticList,
) -> Option<usize> {
    let rigidity_node = rigidity_node?;
    let position = rigidity_position?;
    let nearest = nearest_axis_node(axis, position);
    let beam = make_beam(
        [rigidity_node, nearest],
        BuiltBeamKind::Virtual,
        beam_defaults,
        rigdef::records::BeamOptions::empty(),
        0,
    );
    push_beam(rig, beam, module_name, diags)
}

fn register_wheel(rig: &mut Rig, wheel: BuiltWheel, module_name: &str, diags: &mut DiagnosticList) {
    if rig.wheels.len() >= MAX_WHEELS {
        diags.error(0, SECTION, module_name, format!("capacity exceeded ({MAX_WHEELS}); dropping wheel"));
        return;
    }
    rig.wheels.push(wheel);
}

#[allow(clippy::too_many_arguments)]
fn resolve_base(
    rig: &Rig,
    resolver: &NodeResolver,
    base: &BaseWheel,
    module_name: &str,
    diags: &mut DiagnosticList,
) -> Option<(AxisNodes, usize, Option<usize>, Option<Vector3<f32>>)> {
    let axis = resolve_axis(rig, resolver, &base.nodes, module_name, diags)?;
    let arm = resolver.resolve(&base.reference_arm_node, 0, SECTION, module_name, diags)?;
    let rigidity = base
        .rigidity_node
        .as_ref()
        .and_then(|id| resolver.resolve(id, 0, SECTION, module_name, diags));
    let rigidity_pos = rigidity.map(|idx| rig.nodes[idx].position);
    Some((axis, arm, rigidity, rigidity_pos))
}

pub fn build_wheels(
    rig: &mut Rig,
    resolver: &mut NodeResolver,
    wheels: &[Wheel],
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    for wheel in wheels {
        let base = &wheel.base;
        let Some((axis, arm, rigidity, rigidity_pos)) = resolve_base(rig, resolver, base, module_name, diags) else {
            continue;
        };
        let wheel_id = rig.wheels.len();
        let mass_per_node = base.mass / (2.0 * base.num_rays as f32);
        let ring = build_ring_nodes(
            rig,
            &axis,
            base.num_rays,
            wheel.radius,
            mass_per_node,
            &base.node_defaults,
            wheel_id,
            module_name,
            diags,
        );
        let mut beam_indices = build_ring_beams(
            rig,
            &axis,
            &ring,
            &base.beam_defaults,
            wheel.springiness,
            wheel.damping,
            module_name,
            diags,
        );
        if let Some(idx) = build_rigidity_beam(rig, &axis, rigidity, rigidity_pos, &base.beam_defaults, module_name, diags) {
            beam_indices.push(idx);
        }
        let mut node_indices = ring.outer.clone();
        node_indices.extend(ring.inner.iter());
        let near_attach = nearest_axis_node(&axis, rig.nodes[arm].position);
        register_wheel(
            rig,
            BuiltWheel {
                variant: WheelVariant::Wheels,
                num_rays: base.num_rays,
                radius: wheel.radius,
                width: base.width,
                mass: base.mass,
                axis_nodes: axis.index,
                rigidity_node: rigidity,
                reference_arm_node: arm,
                near_attach_node: near_attach,
                braking: base.braking,
                propulsion: base.propulsion,
                node_indices,
                beam_indices,
                side: None,
                face_material_name: Some(wheel.face_material_name.clone()),
                band_material_name: Some(wheel.band_material_name.clone()),
                rim_mesh_name: None,
                tyre_mesh_name: None,
            },
            module_name,
            diags,
        );
    }
}

pub fn build_meshwheels(
    rig: &mut Rig,
    resolver: &mut NodeResolver,
    wheels: &[MeshWheel],
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    for wheel in wheels {
        let base = &wheel.base;
        let Some((axis, arm, rigidity, rigidity_pos)) = resolve_base(rig, resolver, base, module_name, diags) else {
            continue;
        };
        let wheel_id = rig.wheels.len();
        let mass_per_node = base.mass / (2.0 * base.num_rays as f32);
        let ring = build_ring_nodes(
            rig,
            &axis,
            base.num_rays,
            wheel.tyre_radius,
            mass_per_node,
            &base.node_defaults,
            wheel_id,
            module_name,
            diags,
        );
        let mut beam_indices = build_ring_beams(
            rig,
            &axis,
            &ring,
            &base.beam_defaults,
            wheel.spring,
            wheel.damping,
            module_name,
            diags,
        );
        if let Some(idx) = build_rigidity_beam(rig, &axis, rigidity, rigidity_pos, &base.beam_defaults, module_name, diags) {
            beam_indices.push(idx);
        }
        let mut node_indices = ring.outer.clone();
        node_indices.extend(ring.inner.iter());
        let near_attach = nearest_axis_node(&axis, rig.nodes[arm].position);
        register_wheel(
            rig,
            BuiltWheel {
                variant: WheelVariant::MeshWheels,
                num_rays: base.num_rays,
                radius: wheel.tyre_radius,
                width: base.width,
                mass: base.mass,
                axis_nodes: axis.index,
                rigidity_node: rigidity,
                reference_arm_node: arm,
                near_attach_node: near_attach,
                braking: base.braking,
                propulsion: base.propulsion,
                node_indices,
                beam_indices,
                side: Some(wheel.side),
                face_material_name: None,
                band_material_name: None,
                rim_mesh_name: Some(wheel.mesh_name.clone()),
                tyre_mesh_name: Some(wheel.material_name.clone()),
            },
            module_name,
            diags,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn build_two_ring(
    rig: &mut Rig,
    resolver: &mut NodeResolver,
    base: &BaseWheel2,
    rim_springiness: f32,
    rim_damping: f32,
    variant: WheelVariant,
    side: Option<rigdef::records::MeshWheelSide>,
    face_material_name: Option<String>,
    band_material_name: Option<String>,
    rim_mesh_name: Option<String>,
    tyre_mesh_name: Option<String>,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let inner = &base.base;
    let Some((axis, arm, rigidity, rigidity_pos)) = resolve_base(rig, resolver, inner, module_name, diags) else {
        return;
    };
    let wheel_id = rig.wheels.len();
    // spec.md §4.3.3: two-ring wheels split mass 0.67 tyre / 0.33 rim.
    let rim_mass = inner.mass * 0.33 / (2.0 * inner.num_rays as f32);
    let tyre_mass = inner.mass * 0.67 / (2.0 * inner.num_rays as f32);
    let rim = build_ring_nodes(
        rig,
        &axis,
        inner.num_rays,
        base.rim_radius,
        rim_mass,
        &inner.node_defaults,
        wheel_id,
        module_name,
        diags,
    );
    let tyre = build_ring_nodes(
        rig,
        &axis,
        inner.num_rays,
        base.tyre_radius,
        tyre_mass,
        &inner.node_defaults,
        wheel_id,
        module_name,
        diags,
    );
    let mut beam_indices = build_ring_beams(
        rig,
        &axis,
        &rim,
        &inner.beam_defaults,
        rim_springiness,
        rim_damping,
        module_name,
        diags,
    );
    // spec.md §4.3.3 step 5: the tyre ring repeats the same 8-beam truss,
    // using tread (tyre) spring/damp instead of the rim's.
    beam_indices.extend(build_ring_beams(
        rig,
        &axis,
        &tyre,
        &inner.beam_defaults,
        base.tyre_springiness,
        base.tyre_damping,
        module_name,
        diags,
    ));
    beam_indices.extend(build_cross_beams(
        rig,
        &rim,
        &tyre,
        &inner.beam_defaults,
        base.tyre_springiness,
        base.tyre_damping,
        base.rim_radius,
        base.tyre_radius,
        module_name,
        diags,
    ));
    if let Some(idx) = build_rigidity_beam(rig, &axis, rigidity, rigidity_pos, &inner.beam_defaults, module_name, diags) {
        beam_indices.push(idx);
    }
    let mut node_indices = rim.outer.clone();
    node_indices.extend(rim.inner.iter());
    node_indices.extend(tyre.outer.iter());
    node_indices.extend(tyre.inner.iter());
    let near_attach = nearest_axis_node(&axis, rig.nodes[arm].position);
    register_wheel(
        rig,
        BuiltWheel {
            variant,
            num_rays: inner.num_rays,
            radius: base.tyre_radius,
            width: inner.width,
            mass: inner.mass,
            axis_nodes: axis.index,
            rigidity_node: rigidity,
            reference_arm_node: arm,
            near_attach_node: near_attach,
            braking: inner.braking,
            propulsion: inner.propulsion,
            node_indices,
            beam_indices,
            side,
            face_material_name,
            band_material_name,
            rim_mesh_name,
            tyre_mesh_name,
        },
        module_name,
        diags,
    );
}

pub fn build_wheels2(
    rig: &mut Rig,
    resolver: &mut NodeResolver,
    wheels: &[Wheel2],
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    for wheel in wheels {
        build_two_ring(
            rig,
            resolver,
            &wheel.base,
            wheel.rim_springiness,
            wheel.rim_damping,
            WheelVariant::Wheels2,
            None,
            Some(wheel.face_material_name.clone()),
            Some(wheel.band_material_name.clone()),
            None,
            None,
            module_name,
            diags,
        );
    }
}

pub fn build_meshwheels2(
    rig: &mut Rig,
    resolver: &mut NodeResolver,
    wheels: &[MeshWheel2],
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    for wheel in wheels {
        // No distinct rim spring/damp is given; the rim ring reuses the
        // tyre's own, matching the lighter mesh-only variant's grammar.
        build_two_ring(
            rig,
            resolver,
            &wheel.base,
            wheel.base.tyre_springiness,
            wheel.base.tyre_damping,
            WheelVariant::MeshWheels2,
            Some(wheel.side),
            None,
            None,
            Some(wheel.mesh_name.clone()),
            Some(wheel.material_name.clone()),
            module_name,
            diags,
        );
    }
}

pub fn build_flexbodywheels(
    rig: &mut Rig,
    resolver: &mut NodeResolver,
    wheels: &[FlexBodyWheel],
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    for wheel in wheels {
        build_two_ring(
            rig,
            resolver,
            &wheel.base,
            wheel.rim_springiness,
            wheel.rim_damping,
            WheelVariant::FlexBodyWheels,
            Some(wheel.side),
            None,
            None,
            Some(wheel.rim_mesh_name.clone()),
            Some(wheel.tyre_mesh_name.clone()),
            module_name,
            diags,
        );
    }
}

/// Downgrades any `wheels2`/`meshwheels2`/`flexbodywheels` record to its
/// single-ring equivalent node/beam counts, for vehicles built with two-ring
/// wheels disabled (spec.md §9 open question).
pub fn effective_ray_multiplier(variant: WheelVariant) -> u32 {
    match variant {
        WheelVariant::Wheels | WheelVariant::MeshWheels => 2,
        WheelVariant::Wheels2 | WheelVariant::MeshWheels2 | WheelVariant::FlexBodyWheels => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigdef::defaults::DefaultsStack;
    use rigdef::records::{BaseWheel, Propulsion};

    fn push_axis_nodes(rig: &mut Rig, resolver: &mut NodeResolver) {
        let defaults = DefaultsStack::default();
        let mut diags = DiagnosticList::new();
        for (n, z) in [(0, -0.5f32), (1, 0.5), (2, 0.0)] {
            let node = BuiltNode {
                position: Vector3::new(0.0, 0.0, z),
                options: defaults.node_defaults.options,
                load_weight: 10.0,
                friction: 1.0,
                volume: 1.0,
                surface: 1.0,
                detacher_group: 0,
                wheel_id: None,
                wheel_ring: 0,
            };
            let idx = push_synthetic_node(rig, node, "root", &mut diags).unwrap();
            resolver.register(&NodeId::Numbered(n), idx);
        }
    }

    #[test]
    fn single_ring_wheel_produces_expected_node_and_beam_counts() {
        let mut rig = Rig::default();
        let mut resolver = NodeResolver::new();
        let mut diags = DiagnosticList::new();
        push_axis_nodes(&mut rig, &mut resolver);

        let base = BaseWheel {
            width: 0.3,
            num_rays: 8,
            nodes: [NodeId::Numbered(0), NodeId::Numbered(1)],
            rigidity_node: None,
            braking: Braking::Yes,
            propulsion: Propulsion::Forward,
            reference_arm_node: NodeId::Numbered(2),
            mass: 40.0,
            node_defaults: DefaultsStack::default().node_defaults,
            beam_defaults: DefaultsStack::default().beam_defaults,
        };
        let wheel = Wheel {
            base,
            radius: 0.4,
            springiness: 100.0,
            damping: 5.0,
            face_material_name: "tracks/wheelface".into(),
            band_material_name: "tracks/wheelband".into(),
        };
        build_wheels(&mut rig, &mut resolver, &[wheel], "root", &mut diags);

        assert_eq!(rig.wheels.len(), 1);
        let built = &rig.wheels[0];
        assert_eq!(built.node_indices.len(), 16); // 2 * rays
        assert_eq!(built.beam_indices.len(), 64); // 8 * rays, no rigidity beam
        assert!(built.is_propelled());
        assert!(built.is_braked());
    }

    #[test]
    fn two_ring_wheel_produces_four_rays_worth_of_nodes() {
        let mut rig = Rig::default();
        let mut resolver = NodeResolver::new();
        let mut diags = DiagnosticList::new();
        push_axis_nodes(&mut rig, &mut resolver);

        let base = BaseWheel {
            width: 0.3,
            num_rays: 6,
            nodes: [NodeId::Numbered(0), NodeId::Numbered(1)],
            rigidity_node: None,
            braking: Braking::No,
            propulsion: Propulsion::None,
            reference_arm_node: NodeId::Numbered(2),
            mass: 40.0,
            node_defaults: DefaultsStack::default().node_defaults,
            beam_defaults: DefaultsStack::default().beam_defaults,
        };
        let base2 = BaseWheel2 {
            base,
            rim_radius: 0.25,
            tyre_radius: 0.4,
            tyre_springiness: 300.0,
            tyre_damping: 20.0,
        };
        let wheel = Wheel2 {
            base: base2,
            face_material_name: "tracks/wheelface".into(),
            band_material_name: "tracks/wheelband".into(),
            rim_springiness: 200.0,
            rim_damping: 10.0,
        };
        build_wheels2(&mut rig, &mut resolver, &[wheel], "root", &mut diags);

        let built = &rig.wheels[0];
        assert_eq!(built.node_indices.len(), 24); // 4 * rays
        // 8 (rim truss) + 8 (tyre truss) + 6 (cross) + 2 (axial support) per
        // ray, no rigidity beam.
        assert_eq!(built.beam_indices.len(), 144); // 24 * rays
        assert!(!built.is_propelled());
        assert!(!built.is_braked());
    }

    #[test]
    fn two_ring_wheel_with_rigidity_adds_one_virtual_beam() {
        let mut rig = Rig::default();
        let mut resolver = NodeResolver::new();
        let mut diags = DiagnosticList::new();
        push_axis_nodes(&mut rig, &mut resolver);
        let rigidity_node = BuiltNode {
            position: Vector3::new(0.3, 0.0, 0.0),
            options: DefaultsStack::default().node_defaults.options,
            load_weight: 1.0,
            friction: 1.0,
            volume: 1.0,
            surface: 1.0,
            detacher_group: 0,
            wheel_id: None,
            wheel_ring: 0,
        };
        let rigidity_idx = push_synthetic_node(&mut rig, rigidity_node, "root", &mut diags).unwrap();
        resolver.register(&NodeId::Numbered(3), rigidity_idx);

        let base = BaseWheel {
            width: 0.3,
            num_rays: 6,
            nodes: [NodeId::Numbered(0), NodeId::Numbered(1)],
            rigidity_node: Some(NodeId::Numbered(3)),
            braking: Braking::No,
            propulsion: Propulsion::None,
            reference_arm_node: NodeId::Numbered(2),
            mass: 40.0,
            node_defaults: DefaultsStack::default().node_defaults,
            beam_defaults: DefaultsStack::default().beam_defaults,
        };
        let base2 = BaseWheel2 {
            base,
            rim_radius: 0.25,
            tyre_radius: 0.4,
            tyre_springiness: 300.0,
            tyre_damping: 20.0,
        };
        let wheel = Wheel2 {
            base: base2,
            face_material_name: "tracks/wheelface".into(),
            band_material_name: "tracks/wheelband".into(),
            rim_springiness: 200.0,
            rim_damping: 10.0,
        };
        build_wheels2(&mut rig, &mut resolver, &[wheel], "root", &mut diags);

        let built = &rig.wheels[0];
        assert_eq!(built.beam_indices.len(), 145); // 24 * rays + 1 rigidity beam
    }
}
