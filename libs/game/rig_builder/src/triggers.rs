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
//! Triggers build as invisible, zero-spring beams (mechanically inert
//! sensors) whose `shortbound`/`longbound` trigger keys index into
//! `Rig::command_keys`: a `BLOCK_KEYS` trigger references a command key that
//! gets suppressed while the trigger is tripped. `commands2` is built before
//! `triggers` in section order (spec.md §4.5), so every referenced key
//! already has a slot by the time this runs.
use rigdef::error::DiagnosticList;
use rigdef::records::{BeamOptions, Trigger, TriggerOptions};

use crate::beams::make_beam;
use crate::limits::{self, MAX_BEAMS};
use crate::resolver::NodeResolver;
use crate::rig::{BuiltBeamKind, BuiltTrigger, Rig};

const SECTION: &str = "triggers";

pub fn build_triggers(
    rig: &mut Rig,
    resolver: &NodeResolver,
    triggers: &[Trigger],
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    for trigger in triggers {
        let Some(a) = resolver.resolve(&trigger.nodes[0], 0, SECTION, module_name, diags) else { continue };
        let Some(b) = resolver.resolve(&trigger.nodes[1], 0, SECTION, module_name, diags) else { continue };
        let mut beam = make_beam(
            [a, b],
            BuiltBeamKind::Invisible,
            &trigger.beam_defaults,
            BeamOptions::INVISIBLE,
            trigger.detacher_group,
        );
        beam.springiness = 0.0;
        beam.damping_constant = 0.0;
        let Some(beam_index) = limits::try_push(&mut rig.beams, beam, MAX_BEAMS, SECTION, module_name, diags) else {
            continue;
        };

        if trigger.options.contains(TriggerOptions::BLOCK_KEYS) {
            for key in [trigger.shortbound_trigger_key, trigger.longbound_trigger_key] {
                if key != 0 && !rig.command_keys.iter().any(|k| k.key == key) {
                    diags.warning(
                        0,
                        SECTION,
                        module_name,
                        format!("trigger blocks key {key}, which no command references"),
                    );
                }
            }
        }

        rig.triggers.push(BuiltTrigger {
            nodes: [a, b],
            contraction_trigger_limit: trigger.contraction_trigger_limit,
            expansion_trigger_limit: trigger.expansion_trigger_limit,
            shortbound_trigger_key: trigger.shortbound_trigger_key,
            longbound_trigger_key: trigger.longbound_trigger_key,
            options: trigger.options,
            boundary_timer: trigger.boundary_timer,
            engine_trigger_motor_index: trigger.engine_trigger_motor_index,
            engine_trigger_function: trigger.engine_trigger_function,
            beam_index,
        });
    }
}
