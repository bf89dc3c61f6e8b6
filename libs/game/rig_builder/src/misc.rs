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
//! Every remaining subsystem: leaf data that is either copied through
//! unchanged (engine, brakes, torque curve...) or needs only its node
//! references resolved, with no beams or synthesized geometry of its own.
use rigdef::error::DiagnosticList;
use rigdef::module::Module;
use rigdef::records::*;

use crate::limits::{self, MAX_AEROENGINES, MAX_AIRBRAKES, MAX_CAMERARAIL, MAX_CPARTICLES, MAX_SCREWPROPS, MAX_SOUNDSCRIPTS_PER_TRUCK, MAX_WINGS};
use crate::resolver::NodeResolver;
use crate::rig::*;

macro_rules! resolve_or_continue {
    ($resolver:expr, $id:expr, $section:expr, $module_name:expr, $diags:expr) => {
        match $resolver.resolve($id, 0, $section, $module_name, $diags) {
            Some(idx) => idx,
            None => continue,
        }
    };
}

pub fn build_axles(rig: &mut Rig, resolver: &NodeResolver, axles: &[Axle], module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "axles";
    for axle in axles {
        let mut wheels = [[0usize; 2]; 2];
        let mut ok = true;
        for (w, pair) in axle.wheels.iter().enumerate() {
            for (n, id) in pair.iter().enumerate() {
                match resolver.resolve(id, 0, SECTION, module_name, diags) {
                    Some(idx) => wheels[w][n] = idx,
                    None => ok = false,
                }
            }
        }
        if ok {
            rig.axles.push(BuiltAxle { wheels, options: axle.options.clone() });
        }
    }
}

pub fn build_lockgroups(rig: &mut Rig, resolver: &NodeResolver, lockgroups: &[Lockgroup], module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "lockgroups";
    for lg in lockgroups {
        let nodes = lg
            .nodes
            .iter()
            .filter_map(|id| resolver.resolve(id, 0, SECTION, module_name, diags))
            .collect();
        rig.lockgroups.push(BuiltLockgroup { number: lg.number, nodes });
    }
}

pub fn build_ropables(rig: &mut Rig, resolver: &NodeResolver, ropables: &[Ropable], module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "ropables";
    for r in ropables {
        let node = resolve_or_continue!(resolver, &r.node, SECTION, module_name, diags);
        rig.ropables.push(BuiltRopable { node, group: r.group, multilock: r.multilock });
    }
}

pub fn build_ropes(rig: &mut Rig, resolver: &NodeResolver, ropes: &[Rope], module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "ropes";
    for rope in ropes {
        let root_node = resolve_or_continue!(resolver, &rope.root_node, SECTION, module_name, diags);
        let end_node = resolve_or_continue!(resolver, &rope.end_node, SECTION, module_name, diags);
        let beam = crate::beams::make_beam(
            [root_node, end_node],
            if rope.invisible { BuiltBeamKind::Invisible } else { BuiltBeamKind::Normal },
            &rope.beam_defaults,
            BeamOptions::ROPE,
            rope.detacher_group,
        );
        if let Some(beam_index) = crate::beams::push_beam(rig, beam, module_name, diags) {
            rig.ropes.push(BuiltRope { root_node, end_node, invisible: rope.invisible, beam_index });
        }
    }
}

pub fn build_particles(rig: &mut Rig, resolver: &NodeResolver, particles: &[Particle], module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "particles";
    for p in particles {
        let emitter_node = resolve_or_continue!(resolver, &p.emitter_node, SECTION, module_name, diags);
        let reference_node = resolve_or_continue!(resolver, &p.reference_node, SECTION, module_name, diags);
        limits::try_push(
            &mut rig.particles,
            BuiltParticle { emitter_node, reference_node, particle_system_name: p.particle_system_name.clone() },
            MAX_CPARTICLES,
            SECTION,
            module_name,
            diags,
        );
    }
}

pub fn build_node_collisions(rig: &mut Rig, resolver: &NodeResolver, items: &[NodeCollision], module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "nodecollision";
    for nc in items {
        let node = resolve_or_continue!(resolver, &nc.node, SECTION, module_name, diags);
        rig.node_collisions.push(BuiltNodeCollision { node, radius: nc.radius });
    }
}

pub fn build_material_flare_bindings(rig: &mut Rig, items: &[MaterialFlareBinding]) {
    rig.material_flare_bindings.extend(items.iter().cloned());
}

pub fn build_collision_boxes(rig: &mut Rig, resolver: &NodeResolver, items: &[CollisionBox], module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "collisionboxes";
    for cb in items {
        let nodes = cb.nodes.iter().filter_map(|id| resolver.resolve(id, 0, SECTION, module_name, diags)).collect();
        rig.collision_boxes.push(BuiltCollisionBox { nodes, ..Default::default() });
    }
}

pub fn build_camera_rails(rig: &mut Rig, resolver: &NodeResolver, items: &[CameraRail], module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "camerarail";
    for cr in items {
        let nodes: Vec<usize> = cr.nodes.iter().filter_map(|id| resolver.resolve(id, 0, SECTION, module_name, diags)).collect();
        limits::try_push(&mut rig.camera_rails, BuiltCameraRail { nodes }, MAX_CAMERARAIL, SECTION, module_name, diags);
    }
}

pub fn build_cameras(rig: &mut Rig, resolver: &NodeResolver, items: &[Camera], module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "cameras";
    for c in items {
        let center_node = resolve_or_continue!(resolver, &c.center_node, SECTION, module_name, diags);
        let back_node = resolve_or_continue!(resolver, &c.back_node, SECTION, module_name, diags);
        let left_node = resolve_or_continue!(resolver, &c.left_node, SECTION, module_name, diags);
        rig.cameras.push(BuiltCamera { center_node, back_node, left_node });
    }
}

pub fn build_ext_camera(rig: &mut Rig, resolver: &NodeResolver, ext_camera: &Option<ExtCamera>, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "extcamera";
    if let Some(ext) = ext_camera {
        let node = ext.node.as_ref().and_then(|id| resolver.resolve(id, 0, SECTION, module_name, diags));
        rig.ext_camera = Some((ext.mode, node));
    }
}

pub fn build_videocameras(rig: &mut Rig, resolver: &NodeResolver, items: &[VideoCamera], module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "videocamera";
    for vc in items {
        let reference_node = resolve_or_continue!(resolver, &vc.reference_node, SECTION, module_name, diags);
        let left_node = resolve_or_continue!(resolver, &vc.left_node, SECTION, module_name, diags);
        let bottom_node = resolve_or_continue!(resolver, &vc.bottom_node, SECTION, module_name, diags);
        let alt_reference_node = vc.alt_reference_node.as_ref().and_then(|id| resolver.resolve(id, 0, SECTION, module_name, diags));
        let alt_orientation_node = vc.alt_orientation_node.as_ref().and_then(|id| resolver.resolve(id, 0, SECTION, module_name, diags));
        rig.videocameras.push(BuiltVideoCamera {
            reference_node,
            left_node,
            bottom_node,
            alt_reference_node,
            alt_orientation_node,
            offset: vc.offset,
            rotation: vc.rotation,
            field_of_view: vc.field_of_view,
            texture_width: vc.texture_width,
            texture_height: vc.texture_height,
            min_clip_distance: vc.min_clip_distance,
            max_clip_distance: vc.max_clip_distance,
            camera_role: vc.camera_role,
            camera_mode: vc.camera_mode,
            material_name: vc.material_name.clone(),
            camera_name: vc.camera_name.clone(),
        });
    }
}

pub fn build_airbrakes(rig: &mut Rig, resolver: &NodeResolver, items: &[Airbrake], module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "airbrakes";
    for ab in items {
        let reference_node = resolve_or_continue!(resolver, &ab.reference_node, SECTION, module_name, diags);
        let x_axis_node = resolve_or_continue!(resolver, &ab.x_axis_node, SECTION, module_name, diags);
        let y_axis_node = resolve_or_continue!(resolver, &ab.y_axis_node, SECTION, module_name, diags);
        let additional_node = resolve_or_continue!(resolver, &ab.additional_node, SECTION, module_name, diags);
        limits::try_push(
            &mut rig.airbrakes,
            BuiltAirbrake {
                reference_node,
                x_axis_node,
                y_axis_node,
                additional_node,
                offset: ab.offset,
                width: ab.width,
                height: ab.height,
                max_inclination_angle: ab.max_inclination_angle,
                lift_coefficient: ab.lift_coefficient,
            },
            MAX_AIRBRAKES,
            SECTION,
            module_name,
            diags,
        );
    }
}

pub fn build_flares2(rig: &mut Rig, resolver: &NodeResolver, items: &[Flare2], module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "flares2";
    for f in items {
        let reference_node = resolve_or_continue!(resolver, &f.reference_node, SECTION, module_name, diags);
        rig.flares2.push(BuiltFlare2 {
            reference_node,
            x: f.x,
            y: f.y,
            offset: f.offset,
            kind: f.kind,
            control_number: f.control_number,
            blink_delay_milis: f.blink_delay_milis,
            size: f.size,
            material_name: f.material_name.clone(),
        });
    }
}

pub fn build_sound_sources(rig: &mut Rig, resolver: &NodeResolver, plain: &[SoundSource], extended: &[SoundSource2], module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "soundsources";
    for s in plain {
        let Some(node) = resolver.resolve(&s.node, 0, SECTION, module_name, diags) else { continue };
        limits::try_push(
            &mut rig.sound_sources,
            BuiltSoundSource { node, sound_script_name: s.sound_script_name.clone(), mode: None },
            MAX_SOUNDSCRIPTS_PER_TRUCK,
            SECTION,
            module_name,
            diags,
        );
    }
    for s in extended {
        let Some(node) = resolver.resolve(&s.base.node, 0, "soundsources2", module_name, diags) else { continue };
        limits::try_push(
            &mut rig.sound_sources,
            BuiltSoundSource { node, sound_script_name: s.base.sound_script_name.clone(), mode: Some(s.mode) },
            MAX_SOUNDSCRIPTS_PER_TRUCK,
            "soundsources2",
            module_name,
            diags,
        );
    }
}

pub fn build_contacters(rig: &mut Rig, resolver: &NodeResolver, items: &[Contacter], module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "contacters";
    for c in items {
        if let Some(node) = resolver.resolve(&c.node, 0, SECTION, module_name, diags) {
            rig.contacters.push(node);
        }
    }
}

pub fn build_railgroups(rig: &mut Rig, resolver: &NodeResolver, items: &[RailGroup], module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "railgroups";
    for rg in items {
        let mut nodes = Vec::new();
        for range in &rg.node_list {
            nodes.extend(resolver.resolve_range(range, 0, SECTION, module_name, diags));
        }
        rig.railgroups.push(BuiltRailGroup { id: rg.id, nodes });
    }
}

pub fn build_slidenodes(rig: &mut Rig, resolver: &NodeResolver, items: &[SlideNode], module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "slidenodes";
    for sn in items {
        let Some(slide_node) = resolver.resolve(&sn.slide_node, 0, SECTION, module_name, diags) else { continue };
        let mut rail_nodes = Vec::new();
        for range in &sn.rail_node_ranges {
            rail_nodes.extend(resolver.resolve_range(range, 0, SECTION, module_name, diags));
        }
        rig.slidenodes.push(BuiltSlideNode {
            slide_node,
            rail_nodes,
            spring_rate: sn.spring_rate,
            break_force: sn.break_force,
            tolerance: sn.tolerance,
            railgroup_id: sn.railgroup_id,
            attachment_rate: sn.attachment_rate,
            max_attachment_distance: sn.max_attachment_distance,
            constraint_flags: sn.constraint_flags,
        });
    }
}

pub fn build_turbojets(rig: &mut Rig, resolver: &NodeResolver, items: &[Turbojet], module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "turbojets";
    for t in items {
        let front_node = resolve_or_continue!(resolver, &t.front_node, SECTION, module_name, diags);
        let back_node = resolve_or_continue!(resolver, &t.back_node, SECTION, module_name, diags);
        let side_node = resolve_or_continue!(resolver, &t.side_node, SECTION, module_name, diags);
        limits::try_push(
            &mut rig.turbojets,
            BuiltTurbojet {
                front_node,
                back_node,
                side_node,
                is_reversable: t.is_reversable,
                dry_thrust: t.dry_thrust,
                wet_thrust: t.wet_thrust,
                front_diameter: t.front_diameter,
                back_diameter: t.back_diameter,
                nozzle_length: t.nozzle_length,
            },
            MAX_AEROENGINES,
            SECTION,
            module_name,
            diags,
        );
    }
}

fn resolve_blade_tips(resolver: &NodeResolver, ids: &[rigdef::ids::NodeId; 4], section: &str, module_name: &str, diags: &mut DiagnosticList) -> Option<[usize; 4]> {
    let mut out = [0usize; 4];
    for (i, id) in ids.iter().enumerate() {
        out[i] = resolver.resolve(id, 0, section, module_name, diags)?;
    }
    Some(out)
}

pub fn build_turboprops2(rig: &mut Rig, resolver: &NodeResolver, items: &[Turboprop2], module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "turboprops2";
    for t in items {
        let reference_node = resolve_or_continue!(resolver, &t.reference_node, SECTION, module_name, diags);
        let axis_node = resolve_or_continue!(resolver, &t.axis_node, SECTION, module_name, diags);
        let Some(blade_tip_nodes) = resolve_blade_tips(resolver, &t.blade_tip_nodes, SECTION, module_name, diags) else { continue };
        let couple_node = t.couple_node.as_ref().and_then(|id| resolver.resolve(id, 0, SECTION, module_name, diags));
        limits::try_push(
            &mut rig.turboprops2,
            BuiltTurboprop2 { reference_node, axis_node, blade_tip_nodes, turbine_power_kw: t.turbine_power_kw, airfoil: t.airfoil.clone(), couple_node },
            MAX_AEROENGINES,
            SECTION,
            module_name,
            diags,
        );
    }
}

pub fn build_pistonprops(rig: &mut Rig, resolver: &NodeResolver, items: &[Pistonprop], module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "pistonprops";
    for p in items {
        let reference_node = resolve_or_continue!(resolver, &p.reference_node, SECTION, module_name, diags);
        let axis_node = resolve_or_continue!(resolver, &p.axis_node, SECTION, module_name, diags);
        let Some(blade_tip_nodes) = resolve_blade_tips(resolver, &p.blade_tip_nodes, SECTION, module_name, diags) else { continue };
        let couple_node = p.couple_node.as_ref().and_then(|id| resolver.resolve(id, 0, SECTION, module_name, diags));
        limits::try_push(
            &mut rig.pistonprops,
            BuiltPistonprop { reference_node, axis_node, blade_tip_nodes, couple_node, turbine_power_kw: p.turbine_power_kw, pitch: p.pitch, airfoil: p.airfoil.clone() },
            MAX_AEROENGINES,
            SECTION,
            module_name,
            diags,
        );
    }
}

pub fn build_screwprops(rig: &mut Rig, resolver: &NodeResolver, items: &[Screwprop], module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "screwprops";
    for s in items {
        let prop_node = resolve_or_continue!(resolver, &s.prop_node, SECTION, module_name, diags);
        let back_node = resolve_or_continue!(resolver, &s.back_node, SECTION, module_name, diags);
        let top_node = resolve_or_continue!(resolver, &s.top_node, SECTION, module_name, diags);
        limits::try_push(
            &mut rig.screwprops,
            BuiltScrewprop { prop_node, back_node, top_node, power: s.power },
            MAX_SCREWPROPS,
            SECTION,
            module_name,
            diags,
        );
    }
}

pub fn build_wings(rig: &mut Rig, resolver: &NodeResolver, items: &[Wing], module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "wings";
    for w in items {
        let mut nodes = [0usize; 8];
        let mut ok = true;
        for (i, id) in w.nodes.iter().enumerate() {
            match resolver.resolve(id, 0, SECTION, module_name, diags) {
                Some(idx) => nodes[i] = idx,
                None => ok = false,
            }
        }
        if !ok {
            continue;
        }
        // Span is finalized once every wing's nodes are in place (spec.md
        // §4.6); this placeholder is overwritten by `finalize::compute_wing_spans`.
        limits::try_push(
            &mut rig.wings,
            BuiltWing {
                nodes,
                tex_coords: w.tex_coords,
                control_surface: w.control_surface,
                chord_point: w.chord_point,
                min_deflection: w.min_deflection,
                max_deflection: w.max_deflection,
                airfoil: w.airfoil.clone(),
                efficiency_coef: w.efficiency_coef,
                span_meters: 0.0,
            },
            MAX_WINGS,
            SECTION,
            module_name,
            diags,
        );
    }
}

/// Copies every scalar/leaf field from a parsed `Module` onto the `Rig`
/// under construction. Called once per module in the merge order, so a
/// later module's values win for singleton fields (spec.md §4.1).
pub fn copy_scalars(rig: &mut Rig, module: &Module) {
    if !module.authors.is_empty() {
        rig.authors.extend(module.authors.iter().cloned());
    }
    if module.fileinfo.is_some() {
        rig.fileinfo = module.fileinfo.clone();
    }
    if module.guid.is_some() {
        rig.guid = module.guid.clone();
    }
    if module.minimum_mass.is_some() {
        rig.minimum_mass = module.minimum_mass;
    }
    if module.globals.is_some() {
        rig.globals = module.globals.clone();
    }
    rig.managed_materials.extend(module.managed_materials.iter().cloned());
    if module.gui_settings.is_some() {
        rig.gui_settings = module.gui_settings.clone();
    }
    if let Some(skel) = module.skeleton_settings {
        rig.skeleton_settings = skel;
    }
    if module.help_panel_material_name.is_some() {
        rig.help_panel_material_name = module.help_panel_material_name.clone();
    }
    rig.description.extend(module.description.iter().cloned());

    if module.engine.is_some() {
        rig.engine = module.engine.clone();
    }
    if module.engoption.is_some() {
        rig.engoption = module.engoption.clone();
    }
    if let Some(brakes) = module.brakes {
        rig.brakes = brakes;
    }
    if module.antilockbrakes.is_some() {
        rig.antilockbrakes = module.antilockbrakes;
    }
    if module.traction_control.is_some() {
        rig.traction_control = module.traction_control;
    }
    if module.slope_brake.is_some() {
        rig.slope_brake = module.slope_brake;
    }
    if module.cruise_control.is_some() {
        rig.cruise_control = module.cruise_control;
    }
    if module.speed_limiter.is_some() {
        rig.speed_limiter = module.speed_limiter;
    }
    if module.torque_curve.is_some() {
        rig.torque_curve = module.torque_curve.clone();
    }
    if module.fusedrag.is_some() {
        rig.fusedrag = module.fusedrag.clone();
    }
}
