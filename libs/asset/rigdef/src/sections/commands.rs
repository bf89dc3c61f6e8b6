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
use crate::defaults::{DefaultsStack, OptionalInertia};
use crate::error::DiagnosticList;
use crate::fields::split_fields;
use crate::ids::parse_node_id;
use crate::module::Module;
use crate::records::{Command2, CommandOptions};

const SECTION: &str = "commands2";

/// `n1, n2, shorten_rate, lengthen_rate, max_contraction, max_extension,
///  contract_key, extend_key[, options[, description]]`. `commands` (the
/// older single-rate grammar) feeds the same record with `shorten_rate ==
/// lengthen_rate` and is folded in by the caller before reaching here.
pub fn parse_command2(
    module: &mut Module,
    defaults: &DefaultsStack,
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let fields = split_fields(line);
    if fields.len() < 8 {
        diags.error(line_no, SECTION, module_name, "expected at least 8 fields");
        return;
    }
    let n1 = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let n2 = parse_node_id(&fields[1], line_no, SECTION, module_name, diags);
    let mut nums = [0f32; 4];
    for (i, field) in fields[2..6].iter().enumerate() {
        match field.parse::<f32>() {
            Ok(v) => nums[i] = v,
            Err(_) => {
                diags.error(line_no, SECTION, module_name, format!("non-numeric field {i}"));
                return;
            }
        }
    }
    let (Some(contract_key), Some(extend_key)) =
        (fields[6].parse::<i32>().ok(), fields[7].parse::<i32>().ok())
    else {
        diags.error(line_no, SECTION, module_name, "non-numeric key field");
        return;
    };

    let mut options = CommandOptions::empty();
    let mut press_mode_seen = false;
    if let Some(opt_field) = fields.get(8) {
        for c in opt_field.chars() {
            let flag = match c {
                'i' => Some(CommandOptions::INVISIBLE),
                'r' => Some(CommandOptions::ROPE),
                'c' => Some(CommandOptions::AUTO_CENTER),
                'f' => Some(CommandOptions::NOT_FASTER),
                'p' => Some(CommandOptions::PRESS_ONCE),
                'o' => Some(CommandOptions::PRESS_ONCE_CENTER),
                _ if !c.is_whitespace() => {
                    diags.warning(
                        line_no,
                        SECTION,
                        module_name,
                        format!("unknown command option `{c}` ignored"),
                    );
                    None
                }
                _ => None,
            };
            if let Some(flag) = flag {
                let is_press_mode = matches!(
                    flag,
                    CommandOptions::AUTO_CENTER
                        | CommandOptions::PRESS_ONCE
                        | CommandOptions::PRESS_ONCE_CENTER
                );
                if is_press_mode && press_mode_seen {
                    diags.warning(
                        line_no,
                        SECTION,
                        module_name,
                        "command already has a press mode set; keeping the first one",
                    );
                } else {
                    if is_press_mode {
                        press_mode_seen = true;
                    }
                    options.insert(flag);
                }
            }
        }
    }

    // Trailing shape: `[, description [, start_delay, stop_delay, start_fn,
    // stop_fn [, affect_engine [, needs_engine]]]]`. The inertia tail only
    // makes sense once a description has been given a slot to occupy, so a
    // bare extra field is treated as the description.
    let description = fields.get(9).cloned();
    let inertia = if fields.len() > 10 {
        let tail: Vec<&str> = fields[10..].iter().map(String::as_str).collect();
        crate::defaults::parse_optional_inertia_tail(&tail)
    } else {
        OptionalInertia::default()
    };
    let affect_engine = fields
        .get(14)
        .and_then(|f| f.parse::<f32>().ok())
        .unwrap_or(1.0);
    let needs_engine = fields
        .get(15)
        .and_then(|f| crate::fields::parse_bool(f))
        .unwrap_or(false);

    module.commands2.push(Command2 {
        nodes: [n1, n2],
        shorten_rate: nums[0],
        lengthen_rate: nums[1],
        max_contraction: nums[2],
        max_extension: nums[3],
        contract_key,
        extend_key,
        options,
        description,
        inertia,
        affect_engine,
        needs_engine,
        beam_defaults: defaults.beam_defaults.clone(),
        inertia_defaults: defaults.inertia_defaults.clone(),
        detacher_group: defaults.detacher_group,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_command() {
        let defaults = DefaultsStack::default();
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_command2(&mut module, &defaults, "0,1,10,10,0.2,0.3,5,6,c", 1, "root", &mut diags);
        assert_eq!(module.commands2.len(), 1);
        assert_eq!(module.commands2[0].center_length(), 0.25);
    }

    #[test]
    fn second_press_mode_is_rejected_with_warning() {
        let defaults = DefaultsStack::default();
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_command2(&mut module, &defaults, "0,1,10,10,0.2,0.3,5,6,cp", 1, "root", &mut diags);
        assert_eq!(diags.len(), 1);
        assert!(module.commands2[0].has_option(CommandOptions::AUTO_CENTER));
        assert!(!module.commands2[0].has_option(CommandOptions::PRESS_ONCE));
    }
}
