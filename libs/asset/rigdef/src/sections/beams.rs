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
use crate::records::{Beam, BeamKind, BeamOptions, BeamSubKind};

const SECTION: &str = "beams";

/// `n1, n2 [, options [ extension_limit ]]`.
pub fn parse_beam(
    module: &mut Module,
    defaults: &DefaultsStack,
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let fields = split_fields(line);
    if fields.len() < 2 {
        diags.error(line_no, SECTION, module_name, "expected at least 2 node ids");
        return;
    }
    let n1 = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let n2 = parse_node_id(&fields[1], line_no, SECTION, module_name, diags);

    let mut options = BeamOptions::empty();
    let mut extension_break_limit = None;
    let mut sub_kind = None;
    if let Some(opt_field) = fields.get(2) {
        for c in opt_field.chars() {
            match c {
                'i' => options.insert(BeamOptions::INVISIBLE),
                'r' => {
                    options.insert(BeamOptions::ROPE);
                    sub_kind = Some(BeamSubKind::Rope);
                }
                's' => {
                    options.insert(BeamOptions::SUPPORT);
                    sub_kind = Some(BeamSubKind::Support);
                }
                c if !c.is_whitespace() => diags.warning(
                    line_no,
                    SECTION,
                    module_name,
                    format!("unknown beam option `{c}` ignored"),
                ),
                _ => {}
            }
        }
        if options.contains(BeamOptions::SUPPORT) {
            if let Some(limit_field) = fields.get(3) {
                match limit_field.parse::<f32>() {
                    Ok(v) => extension_break_limit = Some(v),
                    Err(_) => diags.warning(
                        line_no,
                        SECTION,
                        module_name,
                        "support beam's extension limit is not numeric",
                    ),
                }
            }
        }
    }

    let kind = if options.contains(BeamOptions::INVISIBLE) {
        BeamKind::Invisible
    } else {
        BeamKind::Normal
    };

    module.beams.push(Beam {
        nodes: [n1, n2],
        options,
        extension_break_limit,
        kind,
        sub_kind,
        detacher_group: defaults.detacher_group,
        defaults: defaults.beam_defaults.clone(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_invisible_beam() {
        let defaults = DefaultsStack::default();
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_beam(&mut module, &defaults, "0,1,i", 1, "root", &mut diags);
        assert_eq!(module.beams.len(), 1);
        assert_eq!(module.beams[0].kind, BeamKind::Invisible);
        assert!(diags.is_empty());
    }

    #[test]
    fn support_beam_reads_extension_limit() {
        let defaults = DefaultsStack::default();
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_beam(&mut module, &defaults, "0,1,s,2.5", 1, "root", &mut diags);
        assert_eq!(module.beams[0].extension_break_limit, Some(2.5));
    }
}
