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
//! Builds `commands2` beams and registers each into the command-key table
//! (spec.md §4.3.1): every key that appears as a `contract_key`/`extend_key`
//! gets one `BuiltCommandKey` collecting the beam indices it drives, in the
//! order the commands were declared.
use rigdef::error::DiagnosticList;
use rigdef::records::{BeamOptions, Command2};

use crate::beams::make_beam;
use crate::limits::{self, MAX_BEAMS, MAX_COMMANDS};
use crate::resolver::NodeResolver;
use crate::rig::{BuiltBeamKind, BuiltCommand, BuiltCommandKey, Rig};

const SECTION: &str = "commands2";

fn key_slot(rig: &mut Rig, key: i32) -> usize {
    if let Some(pos) = rig.command_keys.iter().position(|k| k.key == key) {
        return pos;
    }
    rig.command_keys.push(BuiltCommandKey { key, beams: Vec::new(), description: None });
    rig.command_keys.len() - 1
}

pub fn build_commands(
    rig: &mut Rig,
    resolver: &NodeResolver,
    commands: &[Command2],
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    for command in commands {
        let Some(a) = resolver.resolve(&command.nodes[0], 0, SECTION, module_name, diags) else {
            continue;
        };
        let Some(b) = resolver.resolve(&command.nodes[1], 0, SECTION, module_name, diags) else {
            continue;
        };
        let kind = if command.has_option(rigdef::records::CommandOptions::INVISIBLE) {
            BuiltBeamKind::Invisible
        } else {
            BuiltBeamKind::Normal
        };
        let beam_options = if command.has_option(rigdef::records::CommandOptions::ROPE) {
            BeamOptions::ROPE
        } else {
            BeamOptions::empty()
        };
        let beam = make_beam([a, b], kind, &command.beam_defaults, beam_options, command.detacher_group);
        let Some(beam_index) = limits::try_push(&mut rig.beams, beam, MAX_BEAMS, SECTION, module_name, diags) else {
            continue;
        };

        if rig.commands.len() >= MAX_COMMANDS {
            diags.error(0, SECTION, module_name, format!("capacity exceeded ({MAX_COMMANDS}); dropping command"));
            continue;
        }
        rig.commands.push(BuiltCommand {
            nodes: [a, b],
            shorten_rate: command.shorten_rate,
            lengthen_rate: command.lengthen_rate,
            max_contraction: command.max_contraction,
            max_extension: command.max_extension,
            contract_key: command.contract_key,
            extend_key: command.extend_key,
            options: command.options,
            description: command.description.clone(),
            affect_engine: command.affect_engine,
            needs_engine: command.needs_engine,
            beam_index,
        });

        let contract_slot = key_slot(rig, command.contract_key);
        rig.command_keys[contract_slot].beams.push(beam_index);
        if command.description.is_some() && rig.command_keys[contract_slot].description.is_none() {
            rig.command_keys[contract_slot].description = command.description.clone();
        }
        if command.extend_key != command.contract_key {
            let extend_slot = key_slot(rig, command.extend_key);
            rig.command_keys[extend_slot].beams.push(beam_index);
        }
    }
}
