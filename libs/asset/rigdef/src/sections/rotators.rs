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
use crate::defaults::OptionalInertia;
use crate::error::DiagnosticList;
use crate::fields::split_fields;
use crate::ids::parse_node_id;
use crate::module::Module;
use crate::records::{Rotator, Rotator2};

const SECTION: &str = "rotators";
const SECTION2: &str = "rotators2";

/// `axis1, axis2, base1..4, rotating1..4, rate, spin_left_key,
///  spin_right_key[, engine_coupling, needs_engine]`.
pub fn parse_rotator(
    module: &mut Module,
    defaults: &DefaultsStack,
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let fields = split_fields(line);
    if fields.len() < 13 {
        diags.error(line_no, SECTION, module_name, "expected at least 13 fields");
        return;
    }
    let Some(rotator) = parse_common(&fields, SECTION, module_name, line_no, defaults, diags) else {
        return;
    };
    module.rotators.push(rotator);
}

/// `axis1, axis2, base1..4, rotating1..4, rate, spin_left_key,
///  spin_right_key, rotating_force, tolerance[, description]`.
pub fn parse_rotator2(
    module: &mut Module,
    defaults: &DefaultsStack,
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let fields = split_fields(line);
    if fields.len() < 15 {
        diags.error(line_no, SECTION2, module_name, "expected at least 15 fields");
        return;
    }
    let Some(base) = parse_common(&fields[..13], SECTION2, module_name, line_no, defaults, diags) else {
        return;
    };
    let (Some(rotating_force), Some(tolerance)) =
        (fields[13].parse::<f32>().ok(), fields[14].parse::<f32>().ok())
    else {
        diags.error(line_no, SECTION2, module_name, "non-numeric force/tolerance");
        return;
    };
    let description = fields.get(15).cloned();

    module.rotators2.push(Rotator2 {
        base,
        rotating_force,
        tolerance,
        description,
    });
}

fn parse_common(
    fields: &[String],
    section: &str,
    module_name: &str,
    line_no: usize,
    defaults: &DefaultsStack,
    diags: &mut DiagnosticList,
) -> Option<Rotator> {
    let axis_nodes = [
        parse_node_id(&fields[0], line_no, section, module_name, diags),
        parse_node_id(&fields[1], line_no, section, module_name, diags),
    ];
    let base_plate_nodes = [
        parse_node_id(&fields[2], line_no, section, module_name, diags),
        parse_node_id(&fields[3], line_no, section, module_name, diags),
        parse_node_id(&fields[4], line_no, section, module_name, diags),
        parse_node_id(&fields[5], line_no, section, module_name, diags),
    ];
    let rotating_plate_nodes = [
        parse_node_id(&fields[6], line_no, section, module_name, diags),
        parse_node_id(&fields[7], line_no, section, module_name, diags),
        parse_node_id(&fields[8], line_no, section, module_name, diags),
        parse_node_id(&fields[9], line_no, section, module_name, diags),
    ];
    let Some(rate) = fields[10].parse::<f32>().ok() else {
        diags.error(line_no, section, module_name, "non-numeric rate");
        return None;
    };
    let (Some(spin_left_key), Some(spin_right_key)) =
        (fields[11].parse::<i32>().ok(), fields[12].parse::<i32>().ok())
    else {
        diags.error(line_no, section, module_name, "non-numeric spin keys");
        return None;
    };
    let engine_coupling = fields.get(13).and_then(|f| f.parse::<f32>().ok()).unwrap_or(1.0);
    let needs_engine = fields
        .get(14)
        .map(|f| matches!(f.as_str(), "true" | "1"))
        .unwrap_or(false);

    Some(Rotator {
        axis_nodes,
        base_plate_nodes,
        rotating_plate_nodes,
        rate,
        spin_left_key,
        spin_right_key,
        inertia: OptionalInertia::default(),
        inertia_defaults: defaults.inertia_defaults.clone(),
        engine_coupling,
        needs_engine,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_rotator() {
        let defaults = DefaultsStack::default();
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_rotator(
            &mut module,
            &defaults,
            "0,1,2,3,4,5,6,7,8,9,1.0,33,34",
            1,
            "root",
            &mut diags,
        );
        assert!(diags.is_empty(), "{:?}", diags.iter().collect::<Vec<_>>());
        assert_eq!(module.rotators.len(), 1);
        assert_eq!(module.rotators[0].rate, 1.0);
    }

    #[test]
    fn parses_rotator2_with_description() {
        let defaults = DefaultsStack::default();
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_rotator2(
            &mut module,
            &defaults,
            "0,1,2,3,4,5,6,7,8,9,1.0,33,34,10000,0.1,turret",
            1,
            "root",
            &mut diags,
        );
        assert_eq!(module.rotators2.len(), 1);
        assert_eq!(module.rotators2[0].description.as_deref(), Some("turret"));
    }
}
