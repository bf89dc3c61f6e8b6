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
use crate::records::{Shock, Shock2, Shock2Options, ShockOptions};

const SHOCK: &str = "shocks";
const SHOCK2: &str = "shocks2";

/// `n1, n2, spring_rate, damping, short_bound, long_bound, precompression[, options]`.
pub fn parse_shock(
    module: &mut Module,
    defaults: &DefaultsStack,
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let fields = split_fields(line);
    if fields.len() < 7 {
        diags.error(line_no, SHOCK, module_name, "expected at least 7 fields");
        return;
    }
    let n1 = parse_node_id(&fields[0], line_no, SHOCK, module_name, diags);
    let n2 = parse_node_id(&fields[1], line_no, SHOCK, module_name, diags);
    let Some(spring_rate) = fields[2].parse::<f32>().ok() else {
        diags.error(line_no, SHOCK, module_name, "non-numeric spring_rate");
        return;
    };
    let Some(damping) = fields[3].parse::<f32>().ok() else {
        diags.error(line_no, SHOCK, module_name, "non-numeric damping");
        return;
    };
    let Some(short_bound) = fields[4].parse::<f32>().ok() else {
        diags.error(line_no, SHOCK, module_name, "non-numeric short_bound");
        return;
    };
    let Some(long_bound) = fields[5].parse::<f32>().ok() else {
        diags.error(line_no, SHOCK, module_name, "non-numeric long_bound");
        return;
    };
    let Some(precompression) = fields[6].parse::<f32>().ok() else {
        diags.error(line_no, SHOCK, module_name, "non-numeric precompression");
        return;
    };

    let mut options = ShockOptions::empty();
    if let Some(opt_field) = fields.get(7) {
        for c in opt_field.chars() {
            match c {
                'i' => options.insert(ShockOptions::INVISIBLE),
                'L' => options.insert(ShockOptions::ACTIVE_LEFT),
                'R' => options.insert(ShockOptions::ACTIVE_RIGHT),
                'm' => options.insert(ShockOptions::METRIC),
                c if !c.is_whitespace() => diags.warning(
                    line_no,
                    SHOCK,
                    module_name,
                    format!("unknown shock option `{c}` ignored"),
                ),
                _ => {}
            }
        }
    }

    module.shocks.push(Shock {
        nodes: [n1, n2],
        spring_rate,
        damping,
        short_bound,
        long_bound,
        precompression,
        options,
        beam_defaults: defaults.beam_defaults.clone(),
        detacher_group: defaults.detacher_group,
    });
}

/// `n1, n2, spring_in, damp_in, progress_spring_in, progress_damp_in, spring_out,
///  damp_out, progress_spring_out, progress_damp_out, short_bound, long_bound,
///  precompression[, options]`.
#[allow(clippy::too_many_lines)]
pub fn parse_shock2(
    module: &mut Module,
    defaults: &DefaultsStack,
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let fields = split_fields(line);
    if fields.len() < 13 {
        diags.error(line_no, SHOCK2, module_name, "expected at least 13 fields");
        return;
    }
    let n1 = parse_node_id(&fields[0], line_no, SHOCK2, module_name, diags);
    let n2 = parse_node_id(&fields[1], line_no, SHOCK2, module_name, diags);
    let mut nums = [0f32; 11];
    for (i, field) in fields[2..13].iter().enumerate() {
        match field.parse::<f32>() {
            Ok(v) => nums[i] = v,
            Err(_) => {
                diags.error(line_no, SHOCK2, module_name, format!("non-numeric field {i}"));
                return;
            }
        }
    }

    let mut options = Shock2Options::empty();
    if let Some(opt_field) = fields.get(13) {
        for c in opt_field.chars() {
            match c {
                'i' => options.insert(Shock2Options::INVISIBLE),
                's' => options.insert(Shock2Options::SOFT_BUMP_BOUNDS),
                'm' => options.insert(Shock2Options::METRIC),
                'M' => options.insert(Shock2Options::ABSOLUTE_METRIC),
                c if !c.is_whitespace() => diags.warning(
                    line_no,
                    SHOCK2,
                    module_name,
                    format!("unknown shock2 option `{c}` ignored"),
                ),
                _ => {}
            }
        }
    }

    module.shocks2.push(Shock2 {
        nodes: [n1, n2],
        spring_in: nums[0],
        damp_in: nums[1],
        progress_factor_spring_in: nums[2],
        progress_factor_damp_in: nums[3],
        spring_out: nums[4],
        damp_out: nums[5],
        progress_factor_spring_out: nums[6],
        progress_factor_damp_out: nums[7],
        short_bound: nums[8],
        long_bound: nums[9],
        precompression: nums[10],
        options,
        beam_defaults: defaults.beam_defaults.clone(),
        detacher_group: defaults.detacher_group,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_shock() {
        let defaults = DefaultsStack::default();
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_shock(
            &mut module,
            &defaults,
            "0,1,8000,800,0.6,0.6,0,i",
            1,
            "root",
            &mut diags,
        );
        assert_eq!(module.shocks.len(), 1);
        assert!(module.shocks[0].options.contains(ShockOptions::INVISIBLE));
    }

    #[test]
    fn parses_shock2() {
        let defaults = DefaultsStack::default();
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_shock2(
            &mut module,
            &defaults,
            "0,1,9000,800,1,1,9000,800,1,1,0.6,0.6,0",
            1,
            "root",
            &mut diags,
        );
        assert_eq!(module.shocks2.len(), 1);
    }
}
