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
use rigdef::records::Tie;

use crate::resolver::NodeResolver;
use crate::rig::{BuiltTie, Rig};

const SECTION: &str = "ties";

pub fn build_ties(
    rig: &mut Rig,
    resolver: &NodeResolver,
    ties: &[Tie],
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    for tie in ties {
        let Some(root_node) = resolver.resolve(&tie.root_node, 0, SECTION, module_name, diags) else {
            continue;
        };
        rig.ties.push(BuiltTie {
            root_node,
            max_reach_length: tie.max_reach_length,
            auto_shorten_rate: tie.auto_shorten_rate,
            min_length: tie.min_length,
            max_length: tie.max_length,
            options: tie.options,
            max_stress: tie.max_stress,
            group: tie.group,
        });
    }
}
