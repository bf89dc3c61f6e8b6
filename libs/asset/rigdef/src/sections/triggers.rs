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
use crate::defaults::DefaultsStack;
use crate::error::DiagnosticList;
use crate::fields::split_fields;
use crate::ids::parse_node_id;
use crate::module::Module;
use crate::records::{EngineTriggerFunction, Trigger, TriggerOptions};

const SECTION: &str = "triggers";

/// `n1, n2, contract_limit, expansion_limit, short_key_or_motor,
///  long_key_or_function [, options [, boundary_timer]]`.
pub fn parse_trigger(
    module: &mut Module,
    defaults: &DefaultsStack,
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let fields = split_fields(line);
    if fields.len() < 6 {
        diags.error(line_no, SECTION, module_name, "expected at least 6 fields");
        return;
    }
    let n1 = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let n2 = parse_node_id(&fields[1], line_no, SECTION, module_name, diags);
    let (Some(contraction_trigger_limit), Some(expansion_trigger_limit)) =
        (fields[2].parse::<f32>().ok(), fields[3].parse::<f32>().ok())
    else {
        diags.error(line_no, SECTION, module_name, "non-numeric trigger limit");
        return;
    };
    let (Some(short_field), Some(long_field)) =
        (fields[4].parse::<i32>().ok(), fields[5].parse::<i32>().ok())
    else {
        diags.error(line_no, SECTION, module_name, "non-numeric key/motor field");
        return;
    };

    let mut options = TriggerOptions::empty();
    let mut boundary_timer = 0.0f32;
    if let Some(opt_field) = fields.get(6) {
        for c in opt_field.chars() {
            let flag = match c {
                'i' => Some(TriggerOptions::INVISIBLE),
                'c' => Some(TriggerOptions::COMMAND_STYLE),
                'x' => Some(TriggerOptions::START_OFF),
                'b' => Some(TriggerOptions::BLOCK_KEYS),
                'B' => Some(TriggerOptions::BLOCK_TRIGGERS),
                'A' => Some(TriggerOptions::INV_BLOCK_TRIGGERS),
                's' => Some(TriggerOptions::SWITCH_CMD_NUM),
                'h' => Some(TriggerOptions::UNLOCK_HOOKGROUPS_KEY),
                'H' => Some(TriggerOptions::LOCK_HOOKGROUPS_KEY),
                't' => Some(TriggerOptions::CONTINUOUS),
                'E' => Some(TriggerOptions::ENGINE_TRIGGER),
                _ if !c.is_whitespace() => {
                    diags.warning(
                        line_no,
                        SECTION,
                        module_name,
                        format!("unknown trigger option `{c}` ignored"),
                    );
                    None
                }
                _ => None,
            };
            if let Some(flag) = flag {
                options.insert(flag);
            }
        }
        if let Some(timer_field) = fields.get(7) {
            match timer_field.parse::<f32>() {
                Ok(v) => boundary_timer = v,
                Err(_) => diags.warning(line_no, SECTION, module_name, "non-numeric boundary_timer"),
            }
        }
    }

    let (engine_trigger_motor_index, engine_trigger_function, shortbound_trigger_key, longbound_trigger_key) =
        if options.contains(TriggerOptions::ENGINE_TRIGGER) {
            let function = match long_field {
                0 => EngineTriggerFunction::Clutch,
                1 => EngineTriggerFunction::Brake,
                2 => EngineTriggerFunction::Accelerator,
                3 => EngineTriggerFunction::RpmControl,
                4 => EngineTriggerFunction::ShiftUp,
                5 => EngineTriggerFunction::ShiftDown,
                other => {
                    diags.error(
                        line_no,
                        SECTION,
                        module_name,
                        format!("unknown engine trigger function id {other}"),
                    );
                    EngineTriggerFunction::Clutch
                }
            };
            (Some(short_field), Some(function), short_field, long_field)
        } else {
            (None, None, short_field, long_field)
        };

    module.triggers.push(Trigger {
        nodes: [n1, n2],
        contraction_trigger_limit,
        expansion_trigger_limit,
        shortbound_trigger_key,
        longbound_trigger_key,
        options,
        boundary_timer,
        engine_trigger_motor_index,
        engine_trigger_function,
        beam_defaults: defaults.beam_defaults.clone(),
        detacher_group: defaults.detacher_group,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_blocker_trigger_records_short_key() {
        let defaults = DefaultsStack::default();
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_trigger(&mut module, &defaults, "0,1,0.5,1.5,5,0,b", 1, "root", &mut diags);
        assert_eq!(module.triggers.len(), 1);
        assert!(module.triggers[0].options.contains(TriggerOptions::BLOCK_KEYS));
        assert_eq!(module.triggers[0].shortbound_trigger_key, 5);
    }

    #[test]
    fn engine_trigger_decodes_function_id() {
        let defaults = DefaultsStack::default();
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_trigger(&mut module, &defaults, "0,1,0.5,1.5,2,3,E", 1, "root", &mut diags);
        assert_eq!(
            module.triggers[0].engine_trigger_function,
            Some(EngineTriggerFunction::RpmControl)
        );
        assert_eq!(module.triggers[0].engine_trigger_motor_index, Some(2));
    }
}
