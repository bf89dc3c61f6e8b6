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
use crate::records::{Tie, TieOptions};

const SECTION: &str = "ties";

/// `root_node, max_reach_length, auto_shorten_rate, min_length, max_length[,
///  options[, max_stress[, group]]]`.
pub fn parse_tie(
    module: &mut Module,
    defaults: &DefaultsStack,
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let fields = split_fields(line);
    if fields.len() < 5 {
        diags.error(line_no, SECTION, module_name, "expected at least 5 fields");
        return;
    }
    let root_node = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let mut nums = [0f32; 4];
    for (i, field) in fields[1..5].iter().enumerate() {
        match field.parse::<f32>() {
            Ok(v) => nums[i] = v,
            Err(_) => {
                diags.error(line_no, SECTION, module_name, format!("non-numeric field {i}"));
                return;
            }
        }
    }
    let mut options = TieOptions::Visible;
    if let Some(opt_field) = fields.get(5) {
        if opt_field.contains('i') {
            options = TieOptions::Invisible;
        }
    }
    let max_stress = fields.get(6).and_then(|f| f.parse::<f32>().ok()).unwrap_or(100_000.0);
    let group = fields.get(7).and_then(|f| f.parse::<i32>().ok());

    module.ties.push(Tie {
        root_node,
        max_reach_length: nums[0],
        auto_shorten_rate: nums[1],
        min_length: nums[2],
        max_length: nums[3],
        options,
        max_stress,
        beam_defaults: defaults.beam_defaults.clone(),
        detacher_group: defaults.detacher_group,
        group,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tie() {
        let defaults = DefaultsStack::default();
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_tie(&mut module, &defaults, "0,10,5,0.1,5", 1, "root", &mut diags);
        assert_eq!(module.ties.len(), 1);
        assert_eq!(module.ties[0].options, TieOptions::Visible);
    }
}
