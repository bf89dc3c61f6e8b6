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
use rigdef::records::{BeamOptions, Hydro};
use rigdef::error::DiagnosticList;

use crate::beams::make_beam;
use crate::limits::{self, MAX_BEAMS, MAX_HYDROS};
use crate::resolver::NodeResolver;
use crate::rig::{BuiltBeamKind, BuiltHydro, Rig};

const SECTION: &str = "hydros";

pub fn build_hydros(
    rig: &mut Rig,
    resolver: &NodeResolver,
    hydros: &[Hydro],
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    for hydro in hydros {
        let Some(a) = resolver.resolve(&hydro.nodes[0], 0, SECTION, module_name, diags) else { continue };
        let Some(b) = resolver.resolve(&hydro.nodes[1], 0, SECTION, module_name, diags) else { continue };
        let kind = if hydro.options.contains(rigdef::records::HydroOptions::INVISIBLE) {
            BuiltBeamKind::InvisibleHydro
        } else {
            BuiltBeamKind::Hydro
        };
        let beam = make_beam([a, b], kind, &hydro.beam_defaults, BeamOptions::empty(), hydro.detacher_group);
        let Some(beam_index) = limits::try_push(&mut rig.beams, beam, MAX_BEAMS, SECTION, module_name, diags) else {
            continue;
        };
        if rig.hydros.len() >= MAX_HYDROS {
            diags.error(0, SECTION, module_name, format!("capacity exceeded ({MAX_HYDROS}); dropping hydro"));
            continue;
        }
        rig.hydros.push(BuiltHydro {
            nodes: [a, b],
            lengthening_factor: hydro.lengthening_factor,
            options: hydro.options,
            beam_index,
        });
    }
}
