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
use crate::records::{Hydro, HydroOptions};

const SECTION: &str = "hydros";

/// `n1, n2, lengthening_factor[, options]` with an optional inertia tail.
pub fn parse_hydro(
    module: &mut Module,
    defaults: &DefaultsStack,
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let fields = split_fields(line);
    if fields.len() < 3 {
        diags.error(line_no, SECTION, module_name, "expected at least 3 fields");
        return;
    }
    let n1 = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let n2 = parse_node_id(&fields[1], line_no, SECTION, module_name, diags);
    let Some(lengthening_factor) = fields[2].parse::<f32>().ok() else {
        diags.error(line_no, SECTION, module_name, "non-numeric lengthening_factor");
        return;
    };

    let mut options = HydroOptions::empty();
    if let Some(opt_field) = fields.get(3) {
        for c in opt_field.chars() {
            let flag = match c {
                'i' => Some(HydroOptions::INVISIBLE),
                's' => Some(HydroOptions::DISABLE_ON_HIGH_SPEED),
                'a' => Some(HydroOptions::INPUT_AILERON),
                'r' => Some(HydroOptions::INPUT_RUDDER),
                'e' => Some(HydroOptions::INPUT_ELEVATOR),
                'u' => Some(HydroOptions::INPUT_AILERON_ELEVATOR),
                'v' => Some(HydroOptions::INPUT_INV_AILERON_ELEVATOR),
                'x' => Some(HydroOptions::INPUT_INV_AILERON),
                'y' => Some(HydroOptions::INPUT_INV_RUDDER),
                'g' => Some(HydroOptions::INPUT_INV_ELEVATOR),
                'h' => Some(HydroOptions::INPUT_REPLAY),
                _ if !c.is_whitespace() => {
                    diags.warning(
                        line_no,
                        SECTION,
                        module_name,
                        format!("unknown hydro option `{c}` ignored"),
                    );
                    None
                }
                _ => None,
            };
            if let Some(flag) = flag {
                options.insert(flag);
            }
        }
    }

    let inertia = if fields.len() > 4 {
        let tail: Vec<&str> = fields[4..].iter().map(String::as_str).collect();
        crate::defaults::parse_optional_inertia_tail(&tail)
    } else {
        OptionalInertia::default()
    };

    module.hydros.push(Hydro {
        nodes: [n1, n2],
        lengthening_factor,
        options,
        inertia,
        inertia_defaults: defaults.inertia_defaults.clone(),
        beam_defaults: defaults.beam_defaults.clone(),
        detacher_group: defaults.detacher_group,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hydro_with_flags() {
        let defaults = DefaultsStack::default();
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_hydro(&mut module, &defaults, "0,1,1.2,ae", 1, "root", &mut diags);
        assert_eq!(module.hydros.len(), 1);
        assert!(module.hydros[0].options.contains(HydroOptions::INPUT_AILERON));
        assert!(module.hydros[0].options.contains(HydroOptions::INPUT_ELEVATOR));
    }
}
