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
use nalgebra::Vector3;

use crate::defaults::{DefaultsStack, NodeOptions};
use crate::error::DiagnosticList;
use crate::fields::split_fields;
use crate::ids::parse_node_id;
use crate::module::Module;
use crate::records::{
    BeamDefaults, BeamKind, BeamOptions, BeamSubKind, Hook, HookOptions, Node,
};
use std::rc::Rc;

const SECTION: &str = "nodes";

/// `nodes`/`nodes2` share a grammar: `id, x, y, z [, options [ load_weight ]]`.
pub fn parse_node(
    module: &mut Module,
    defaults: &DefaultsStack,
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let fields = split_fields(line);
    if fields.len() < 4 {
        diags.error(
            line_no,
            SECTION,
            module_name,
            format!("expected at least 4 fields, got {}", fields.len()),
        );
        return;
    }

    let id = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let (Some(x), Some(y), Some(z)) = (
        fields[1].parse::<f32>().ok(),
        fields[2].parse::<f32>().ok(),
        fields[3].parse::<f32>().ok(),
    ) else {
        diags.error(line_no, SECTION, module_name, "non-numeric position field");
        return;
    };

    let mut options = NodeOptions::empty();
    let mut load_weight_override = None;
    let mut has_l_flag = false;
    if let Some(opt_field) = fields.get(4) {
        for c in opt_field.chars() {
            match NodeOptions::from_letter(c) {
                Some(flag) => {
                    options.insert(flag);
                    if flag == NodeOptions::LOAD_WEIGHT_OVERRIDE {
                        has_l_flag = true;
                    }
                }
                None if !c.is_whitespace() => diags.warning(
                    line_no,
                    SECTION,
                    module_name,
                    format!("unknown node option `{c}` ignored"),
                ),
                None => {}
            }
        }
        if has_l_flag {
            if let Some(weight_field) = fields.get(5) {
                match weight_field.parse::<f32>() {
                    Ok(w) => load_weight_override = Some(w),
                    Err(_) => diags.warning(
                        line_no,
                        SECTION,
                        module_name,
                        "`l` option's trailing load-weight is not numeric; keeping node-defaults weight",
                    ),
                }
            }
        }
    }

    let is_hook = options.contains(NodeOptions::HOOK_POINT);
    let node = Node {
        id: id.clone(),
        position: Vector3::new(x, y, z),
        options,
        load_weight_override,
        detacher_group: defaults.detacher_group,
        defaults: defaults.node_defaults.clone(),
        beam_defaults: defaults.beam_defaults.clone(),
    };
    module.nodes.push(node);

    if is_hook {
        register_hook_node(module, defaults, &id, line_no, module_name, diags);
    }
}

/// A node flagged `h` registers a rope-like, initially-disabled beam to
/// node 0 (or node 1 if the hook node is itself node 0), plus a `Hook`
/// record whose tunables come from the current defaults.
fn register_hook_node(
    module: &mut Module,
    defaults: &DefaultsStack,
    hook_node: &crate::ids::NodeId,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    use crate::ids::NodeId;
    let anchor = if matches!(hook_node.as_numbered(), Some(0)) {
        NodeId::Numbered(1)
    } else {
        NodeId::Numbered(0)
    };

    module.beams.push(crate::records::Beam {
        nodes: [hook_node.clone(), anchor],
        options: BeamOptions::ROPE,
        extension_break_limit: None,
        kind: BeamKind::Invisible,
        sub_kind: Some(BeamSubKind::Rope),
        detacher_group: defaults.detacher_group,
        defaults: Rc::new(BeamDefaults {
            springiness: 0.0,
            damping_constant: 0.0,
            ..(*defaults.beam_defaults).clone()
        }),
    });

    let _ = line_no;
    let _ = diags;

    module.hooks.push(Hook {
        node: hook_node.clone(),
        flags: HookOptions::empty(),
        option_hook_range: 0.4,
        option_speed_coef: 1.0,
        option_max_force: f32::MAX,
        option_hookgroup: -1,
        option_lockgroup: -1,
        option_timer: 0.0,
        option_minimum_range_meters: 0.0,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_node() {
        let defaults = DefaultsStack::default();
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_node(&mut module, &defaults, "0, 0,0,0", 1, "root", &mut diags);
        assert_eq!(module.nodes.len(), 1);
        assert!(diags.is_empty());
    }

    #[test]
    fn hook_flag_registers_rope_and_hook_record() {
        let defaults = DefaultsStack::default();
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_node(&mut module, &defaults, "0, 0,0,0", 1, "root", &mut diags);
        parse_node(&mut module, &defaults, "5, 1,0,0, h", 2, "root", &mut diags);
        assert_eq!(module.hooks.len(), 1);
        assert_eq!(module.beams.len(), 1);
    }
}
