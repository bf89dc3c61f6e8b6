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
use rigdef::error::DiagnosticList;
use rigdef::records::Prop;

use crate::limits::{self, MAX_PROPS};
use crate::resolver::NodeResolver;
use crate::rig::{BuiltProp, Rig};

const SECTION: &str = "props";

pub fn build_props(
    rig: &mut Rig,
    resolver: &NodeResolver,
    props: &[Prop],
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    for prop in props {
        let Some(reference_node) = resolver.resolve(&prop.reference_node, 0, SECTION, module_name, diags) else {
            continue;
        };
        let Some(x_axis_node) = resolver.resolve(&prop.x_axis_node, 0, SECTION, module_name, diags) else {
            continue;
        };
        let Some(y_axis_node) = resolver.resolve(&prop.y_axis_node, 0, SECTION, module_name, diags) else {
            continue;
        };
        limits::try_push(
            &mut rig.props,
            BuiltProp {
                reference_node,
                x_axis_node,
                y_axis_node,
                offset: prop.offset,
                rotation: prop.rotation,
                mesh_name: prop.mesh_name.clone(),
                camera_settings: prop.camera_settings,
                special: prop.special,
            },
            MAX_PROPS,
            SECTION,
            module_name,
            diags,
        );
    }
}
