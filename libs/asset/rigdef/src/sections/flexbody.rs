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

use crate::error::DiagnosticList;
use crate::fields::split_fields;
use crate::ids::{parse_node_id, parse_node_range};
use crate::module::Module;
use crate::records::{CameraMode, CameraSettings, Flexbody};

const SECTION: &str = "flexbodies";

/// Two-line record: `ref, x, y, offsetX, offsetY, offsetZ, rotX, rotY, rotZ,
/// mesh_name` followed by a `forset node[-node], node, ...` line naming the
/// nodes the mesh deforms with (spec.md §4.3.6). The caller is responsible
/// for pairing the header with its `forset` line; this module only parses
/// each half.
pub fn parse_flexbody_header(
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) -> Option<Flexbody> {
    let fields = split_fields(line);
    if fields.len() < 10 {
        diags.error(line_no, SECTION, module_name, "expected at least 10 fields");
        return None;
    }
    let reference_node = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let x_axis_node = parse_node_id(&fields[1], line_no, SECTION, module_name, diags);
    let y_axis_node = parse_node_id(&fields[2], line_no, SECTION, module_name, diags);
    let mut nums = [0f32; 6];
    for (i, field) in fields[3..9].iter().enumerate() {
        match field.parse::<f32>() {
            Ok(v) => nums[i] = v,
            Err(_) => {
                diags.error(line_no, SECTION, module_name, format!("non-numeric field {i}"));
                return None;
            }
        }
    }

    Some(Flexbody {
        reference_node,
        x_axis_node,
        y_axis_node,
        offset: Vector3::new(nums[0], nums[1], nums[2]),
        rotation: Vector3::new(nums[3], nums[4], nums[5]),
        mesh_name: fields[9].clone(),
        animations: Vec::new(),
        forset: Vec::new(),
        camera_settings: CameraSettings::default(),
    })
}

/// `forset node[-node], node, ...`. Each token is either a single node id or
/// a `start-end` range; both expand into the same `forset` vector.
pub fn parse_forset(line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) -> Vec<crate::ids::NodeRange> {
    let Some(rest) = line.strip_prefix("forset").map(str::trim) else {
        diags.error(line_no, SECTION, module_name, "expected `forset` line after flexbody header");
        return Vec::new();
    };
    rest.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|token| parse_node_range(token, line_no, SECTION, module_name, diags))
        .collect()
}

/// `forset_camera_mode <flexbody-index> <mode>`, where `<mode>` is `-2`
/// (external), `-1` (always), `-3` (classic/end), or a cinecam index.
pub fn parse_flexbody_camera_mode(
    module: &mut Module,
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let fields = split_fields(line);
    if fields.len() < 2 {
        diags.error(line_no, "flexbody_camera_mode", module_name, "expected 2 fields");
        return;
    }
    let Some(index) = fields[0].parse::<usize>().ok() else {
        diags.error(line_no, "flexbody_camera_mode", module_name, "non-numeric flexbody index");
        return;
    };
    let Some(mode_value) = fields[1].parse::<i32>().ok() else {
        diags.error(line_no, "flexbody_camera_mode", module_name, "non-numeric mode");
        return;
    };
    let Some(flexbody) = module.flexbodies.get_mut(index) else {
        diags.error(line_no, "flexbody_camera_mode", module_name, "flexbody index out of range");
        return;
    };
    flexbody.camera_settings.mode = Some(match mode_value {
        -2 => CameraMode::External,
        -1 => CameraMode::Always,
        -3 => CameraMode::Begin,
        0..=i32::MAX => CameraMode::Cinecam(mode_value),
        _ => CameraMode::Invalid,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_forset() {
        let mut diags = DiagnosticList::new();
        let body = parse_flexbody_header(
            "0,1,2,0,0,0,0,0,0,body.mesh",
            1,
            "root",
            &mut diags,
        )
        .unwrap();
        assert_eq!(body.mesh_name, "body.mesh");

        let forset = parse_forset("forset 3-10, 15", 2, "root", &mut diags);
        assert_eq!(forset.len(), 2);
        assert!(diags.is_empty());
    }
}
