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
use crate::error::DiagnosticList;
use crate::fields::split_fields;
use crate::ids::parse_node_id;
use crate::module::Module;
use crate::records::{Cab, CabOptions, Submesh, Texcoord};

/// A bare `submesh` keyword opens a new submesh subsection; its `texcoords`
/// and `cab` lines append to the most recently opened one until the next
/// `submesh`/`end_section`/module switch.
pub fn start_submesh(module: &mut Module) {
    module.submeshes.push(Submesh::default());
}

/// `node, u, v`. Errors (rather than being silently dropped) if no submesh
/// has been opened yet, since a bare `texcoords` line outside `submesh` is a
/// malformed file rather than a tolerated legacy shorthand.
pub fn parse_texcoord(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    let fields = split_fields(line);
    if fields.len() < 3 {
        diags.error(line_no, "texcoords", module_name, "expected 3 fields");
        return;
    }
    let node = parse_node_id(&fields[0], line_no, "texcoords", module_name, diags);
    let (Some(u), Some(v)) = (fields[1].parse::<f32>().ok(), fields[2].parse::<f32>().ok()) else {
        diags.error(line_no, "texcoords", module_name, "non-numeric u/v");
        return;
    };
    let Some(submesh) = module.submeshes.last_mut() else {
        diags.error(line_no, "texcoords", module_name, "`texcoords` outside of a `submesh` block");
        return;
    };
    submesh.texcoords.push(Texcoord { node, u, v });
}

/// `node1, node2, node3[, options]`.
pub fn parse_cab(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    let fields = split_fields(line);
    if fields.len() < 3 {
        diags.error(line_no, "cab", module_name, "expected at least 3 fields");
        return;
    }
    let nodes = [
        parse_node_id(&fields[0], line_no, "cab", module_name, diags),
        parse_node_id(&fields[1], line_no, "cab", module_name, diags),
        parse_node_id(&fields[2], line_no, "cab", module_name, diags),
    ];
    let mut options = CabOptions::empty();
    if let Some(opt_field) = fields.get(3) {
        for c in opt_field.chars() {
            let flag = match c {
                'c' => Some(CabOptions::CONTACT),
                'b' => Some(CabOptions::BUOYANT),
                'p' => Some(CabOptions::TEN_X_TOUGHER),
                'u' => Some(CabOptions::INVULNERABLE),
                's' => Some(CabOptions::BUOYANT_NO_DRAG),
                'r' => Some(CabOptions::BUOYANT_ONLY_DRAG),
                'D' => Some(CabOptions::CONTACT | CabOptions::BUOYANT),
                'F' => Some(CabOptions::TEN_X_TOUGHER | CabOptions::BUOYANT),
                'S' => Some(CabOptions::INVULNERABLE | CabOptions::BUOYANT),
                _ if !c.is_whitespace() => {
                    diags.warning(line_no, "cab", module_name, format!("unknown cab option `{c}` ignored"));
                    None
                }
                _ => None,
            };
            if let Some(flag) = flag {
                options.insert(flag);
            }
        }
    }

    let cab = Cab { nodes, options };
    if let Some(submesh) = module.submeshes.last_mut() {
        submesh.cab_triangles.push(cab);
    } else {
        diags.warning(line_no, "cab", module_name, "`cab` outside of a `submesh` block, attaching to implicit one");
        let mut submesh = Submesh::default();
        submesh.cab_triangles.push(cab);
        module.submeshes.push(submesh);
    }
}

/// A bare `backmesh` keyword marks the current submesh as double-sided.
pub fn mark_backmesh(module: &mut Module, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    match module.submeshes.last_mut() {
        Some(submesh) => submesh.backmesh = true,
        None => diags.error(line_no, "backmesh", module_name, "`backmesh` outside of a `submesh` block"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cab_and_texcoords_attach_to_open_submesh() {
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        start_submesh(&mut module);
        parse_texcoord(&mut module, "0, 0.1, 0.2", 1, "root", &mut diags);
        parse_cab(&mut module, "0,1,2,cD", 2, "root", &mut diags);
        assert!(diags.is_empty(), "{:?}", diags.iter().collect::<Vec<_>>());
        assert_eq!(module.submeshes.len(), 1);
        assert_eq!(module.submeshes[0].texcoords.len(), 1);
        assert_eq!(module.submeshes[0].cab_triangles.len(), 1);
        assert!(module.submeshes[0].cab_triangles[0].options.contains(CabOptions::CONTACT));
    }

    #[test]
    fn cab_without_submesh_is_an_error_but_recovers() {
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_cab(&mut module, "0,1,2", 1, "root", &mut diags);
        assert_eq!(module.submeshes.len(), 1);
        assert!(!diags.is_empty());
    }
}
