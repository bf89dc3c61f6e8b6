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
//! Turns a parsed [`rigdef::File`] into a [`Rig`]: a single, flattened,
//! reference-resolved graph ready for the physics step (spec.md §1, §4).
//!
//! A rig-def file's `root` module is always merged; the caller additionally
//! names zero or more `section <name>` modules to merge alongside it (the
//! mod-and-variant mechanism described in spec.md §4.1) -- which sections
//! exist and which to pick is a question for the caller, not this crate, so
//! `build` just takes the list of names to merge.
//!
//! Section order below follows spec.md §4.5: structural records that create
//! new nodes run first, so every later section's node references resolve
//! against a fully populated node table.
pub mod animators;
pub mod beams;
pub mod cinecam;
pub mod commands;
pub mod finalize;
pub mod flexbodies;
pub mod geometry;
pub mod hooks;
pub mod hydros;
pub mod limits;
pub mod misc;
pub mod nodes;
pub mod props;
pub mod resolver;
pub mod rig;
pub mod rotators;
pub mod shocks;
pub mod submesh;
pub mod ties;
pub mod triggers;
pub mod wheels;

use rigdef::error::DiagnosticList;
use rigdef::module::Module;

use resolver::NodeResolver;
use rig::Rig;

/// Merges `root` with every named module in `sections` (in the order given)
/// and builds the combined result into a single [`Rig`].
///
/// Unknown section names are silently skipped with a warning: a mod author
/// referencing a variant that a particular file doesn't define is a common,
/// recoverable situation (spec.md §4.1), not a fatal one.
pub fn build(file: &rigdef::File, sections: &[&str], diags: &mut DiagnosticList) -> Rig {
    let modules: Vec<&Module> = std::iter::once(file.root())
        .chain(sections.iter().filter_map(|name| match file.modules.get(name) {
            Some(module) => Some(module),
            None => {
                diags.warning(0, "module", "root", format!("unknown section module '{name}'; skipping"));
                None
            }
        }))
        .collect();

    let mut rig = Rig::default();
    let mut resolver = NodeResolver::new();

    for module in &modules {
        misc::copy_scalars(&mut rig, module);
    }

    for module in &modules {
        nodes::build_nodes(&mut rig, &mut resolver, &module.nodes, &module.name, diags);
    }

    for module in &modules {
        beams::build_beams(&mut rig, &resolver, &module.beams, &module.name, diags);
        cinecam::build_cinecams(&mut rig, &resolver, &module.cinecams, &module.name, diags);
        shocks::build_shocks(&mut rig, &resolver, &module.shocks, &module.name, diags);
        shocks::build_shocks2(&mut rig, &resolver, &module.shocks2, &module.name, diags);
    }

    for module in &modules {
        commands::build_commands(&mut rig, &resolver, &module.commands2, &module.name, diags);
        ties::build_ties(&mut rig, &resolver, &module.ties, &module.name, diags);
        animators::build_animators(&mut rig, &resolver, &module.animators, &module.name, diags);
        hydros::build_hydros(&mut rig, &resolver, &module.hydros, &module.name, diags);
    }

    for module in &modules {
        wheels::build_wheels(&mut rig, &mut resolver, &module.wheels, &module.name, diags);
        wheels::build_meshwheels(&mut rig, &mut resolver, &module.meshwheels, &module.name, diags);
        wheels::build_wheels2(&mut rig, &mut resolver, &module.wheels2, &module.name, diags);
        wheels::build_meshwheels2(&mut rig, &mut resolver, &module.meshwheels2, &module.name, diags);
        wheels::build_flexbodywheels(&mut rig, &mut resolver, &module.flexbodywheels, &module.name, diags);
    }

    for module in &modules {
        misc::build_turbojets(&mut rig, &resolver, &module.turbojets, &module.name, diags);
        misc::build_turboprops2(&mut rig, &resolver, &module.turboprops2, &module.name, diags);
        misc::build_pistonprops(&mut rig, &resolver, &module.pistonprops, &module.name, diags);
        misc::build_screwprops(&mut rig, &resolver, &module.screwprops, &module.name, diags);
        misc::build_wings(&mut rig, &resolver, &module.wings, &module.name, diags);
        misc::build_contacters(&mut rig, &resolver, &module.contacter_nodes, &module.name, diags);
        misc::build_flares2(&mut rig, &resolver, &module.flares2, &module.name, diags);
        misc::build_cameras(&mut rig, &resolver, &module.cameras, &module.name, diags);
        misc::build_ext_camera(&mut rig, &resolver, &module.ext_camera, &module.name, diags);
        misc::build_videocameras(&mut rig, &resolver, &module.videocameras, &module.name, diags);
        props::build_props(&mut rig, &resolver, &module.props, &module.name, diags);
    }

    for module in &modules {
        rotators::build_rotators(&mut rig, &resolver, &module.rotators, &module.name, diags);
        rotators::build_rotators2(&mut rig, &resolver, &module.rotators2, &module.name, diags);
        triggers::build_triggers(&mut rig, &resolver, &module.triggers, &module.name, diags);
        misc::build_lockgroups(&mut rig, &resolver, &module.lockgroups, &module.name, diags);
        hooks::build_hooks(&mut rig, &resolver, &module.hooks, &module.name, diags);
        misc::build_railgroups(&mut rig, &resolver, &module.railgroups, &module.name, diags);
        misc::build_slidenodes(&mut rig, &resolver, &module.slidenodes, &module.name, diags);
        misc::build_ropes(&mut rig, &resolver, &module.ropes, &module.name, diags);
        misc::build_ropables(&mut rig, &resolver, &module.ropables, &module.name, diags);
        misc::build_particles(&mut rig, &resolver, &module.particles, &module.name, diags);
        misc::build_node_collisions(&mut rig, &resolver, &module.node_collisions, &module.name, diags);
        misc::build_axles(&mut rig, &resolver, &module.axles, &module.name, diags);
        misc::build_collision_boxes(&mut rig, &resolver, &module.collision_boxes, &module.name, diags);
        misc::build_material_flare_bindings(&mut rig, &module.material_flare_bindings);
        submesh::build_submeshes(&mut rig, &resolver, &module.submeshes, &module.name, diags);
        misc::build_camera_rails(&mut rig, &resolver, &module.camera_rails, &module.name, diags);
        misc::build_airbrakes(&mut rig, &resolver, &module.airbrakes, &module.name, diags);
        flexbodies::build_flexbodies(&mut rig, &resolver, &module.flexbodies, &module.name, diags);
        misc::build_sound_sources(&mut rig, &resolver, &module.sound_sources, &module.sound_sources2, &module.name, diags);
    }

    finalize::finalize(&mut rig, modules[0].name.as_str(), diags);
    rig
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_node_beam_lines() -> Vec<String> {
        let text = "\
nodes
0, 0.0, 0.0, 0.0
1, 1.0, 0.0, 0.0
beams
0, 1
";
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn merges_root_only_by_default() {
        let file = rigdef::parse(two_node_beam_lines().into_iter());
        let mut diags = DiagnosticList::new();
        let rig = build(&file, &[], &mut diags);
        assert_eq!(rig.nodes.len(), 2);
        assert_eq!(rig.beams.len(), 1);
        assert!(!diags.has_errors());
    }

    #[test]
    fn unknown_section_name_warns_but_does_not_fail() {
        let file = rigdef::parse(two_node_beam_lines().into_iter());
        let mut diags = DiagnosticList::new();
        let rig = build(&file, &["nonexistent_variant"], &mut diags);
        assert_eq!(rig.nodes.len(), 2);
        assert!(!diags.is_empty());
        assert!(!diags.has_errors());
    }
}
