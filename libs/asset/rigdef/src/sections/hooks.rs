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
use crate::records::{Hook, HookOptions};

const SECTION: &str = "hooks";

/// `node[, key=value | flag]*`, where flags are `autolock`, `nodisable`,
/// `norope`, `selflock`, `visible` and keys are `hookrange=`, `speedcoef=`,
/// `maxforce=`, `hookgroup=`, `lockgroup=`, `timer=`, `minrange=`. This is an
/// explicit override of the implicit hook record a node's `h` option already
/// registers (`sections::nodes::register_hook_node`); matching entries
/// overwrite the implicit defaults rather than duplicate them.
pub fn parse_hook(
    module: &mut Module,
    _defaults: &DefaultsStack,
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let fields = split_fields(line);
    if fields.is_empty() {
        diags.error(line_no, SECTION, module_name, "expected a node id");
        return;
    }
    let node = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);

    let mut flags = HookOptions::empty();
    let mut option_hook_range = 0.4f32;
    let mut option_speed_coef = 1.0f32;
    let mut option_max_force = f32::MAX;
    let mut option_hookgroup = -1i32;
    let mut option_lockgroup = -1i32;
    let mut option_timer = 0.0f32;
    let mut option_minimum_range_meters = 0.0f32;

    for token in &fields[1..] {
        if let Some((key, value)) = token.split_once('=') {
            let parsed = value.parse::<f32>();
            match key.to_ascii_lowercase().as_str() {
                "hookrange" => option_hook_range = parsed.unwrap_or(option_hook_range),
                "speedcoef" => option_speed_coef = parsed.unwrap_or(option_speed_coef),
                "maxforce" => option_max_force = parsed.unwrap_or(option_max_force),
                "hookgroup" => option_hookgroup = value.parse().unwrap_or(option_hookgroup),
                "lockgroup" => option_lockgroup = value.parse().unwrap_or(option_lockgroup),
                "timer" => option_timer = parsed.unwrap_or(option_timer),
                "minrange" => option_minimum_range_meters = parsed.unwrap_or(option_minimum_range_meters),
                _ => diags.warning(
                    line_no,
                    SECTION,
                    module_name,
                    format!("unknown hook key `{key}` ignored"),
                ),
            }
            continue;
        }
        match token.to_ascii_lowercase().as_str() {
            "autolock" => flags.insert(HookOptions::AUTO_LOCK),
            "nodisable" => flags.insert(HookOptions::NO_DISABLE),
            "norope" => flags.insert(HookOptions::NO_ROPE),
            "selflock" => flags.insert(HookOptions::SELF_LOCK),
            "visible" => flags.insert(HookOptions::VISIBLE),
            _ => diags.warning(
                line_no,
                SECTION,
                module_name,
                format!("unknown hook flag `{token}` ignored"),
            ),
        }
    }

    module.hooks.push(Hook {
        node,
        flags,
        option_hook_range,
        option_speed_coef,
        option_max_force,
        option_hookgroup,
        option_lockgroup,
        option_timer,
        option_minimum_range_meters,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hook_with_keys_and_flags() {
        let defaults = DefaultsStack::default();
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_hook(&mut module, &defaults, "12, hookrange=0.8, autolock", 1, "root", &mut diags);
        assert_eq!(module.hooks.len(), 1);
        assert_eq!(module.hooks[0].option_hook_range, 0.8);
        assert!(module.hooks[0].flags.contains(HookOptions::AUTO_LOCK));
    }
}
