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
//! Hooks attach a node to any compatible ropable node within range at
//! runtime; unlike beams/ties, the `hooks` grammar carries no defaults
//! reference of its own; the virtual lock beam is built from the built-in
//! beam defaults (spec.md §4.3.4), overridden by `option_max_force` and
//! `option_speed_coef` the way the physics step expects.
use rigdef::defaults::BeamDefaults;
use rigdef::error::DiagnosticList;
use rigdef::records::{BeamOptions, Hook};

use crate::beams::make_beam;
use crate::limits::{self, MAX_BEAMS};
use crate::resolver::NodeResolver;
use crate::rig::{BuiltBeamKind, BuiltHook, Rig};

const SECTION: &str = "hooks";

pub fn build_hooks(
    rig: &mut Rig,
    resolver: &NodeResolver,
    hooks: &[Hook],
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let defaults = BeamDefaults::default();
    for hook in hooks {
        let Some(node) = resolver.resolve(&hook.node, 0, SECTION, module_name, diags) else {
            continue;
        };
        // The lock beam's other end is resolved at runtime (whichever
        // ropable node it latches onto); the build-time placeholder points
        // back at the hook node itself so the beam is well-formed until
        // then.
        let mut beam = make_beam([node, node], BuiltBeamKind::Virtual, &defaults, BeamOptions::empty(), 0);
        beam.springiness = defaults.springiness;
        beam.damping_constant = defaults.damping_constant;
        beam.breaking_threshold = hook.option_max_force;
        let Some(beam_index) = limits::try_push(&mut rig.beams, beam, MAX_BEAMS, SECTION, module_name, diags) else {
            continue;
        };
        rig.hooks.push(BuiltHook {
            node,
            flags: hook.flags,
            option_hook_range: hook.option_hook_range,
            option_speed_coef: hook.option_speed_coef,
            option_max_force: hook.option_max_force,
            hookgroup: hook.option_hookgroup,
            lockgroup: hook.option_lockgroup,
            option_timer: hook.option_timer,
            option_minimum_range_meters: hook.option_minimum_range_meters,
            beam_index,
        });
    }
}
