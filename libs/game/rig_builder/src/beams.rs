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
use rigdef::defaults::BeamDefaults;
use rigdef::error::DiagnosticList;
use rigdef::records::{Beam, BeamKind, BeamOptions};

use crate::limits::{self, MAX_BEAMS};
use crate::resolver::NodeResolver;
use crate::rig::{BuiltBeam, BuiltBeamKind, Rig};

const SECTION: &str = "beams";

fn map_kind(kind: BeamKind) -> BuiltBeamKind {
    match kind {
        BeamKind::Normal => BuiltBeamKind::Normal,
        BeamKind::Invisible => BuiltBeamKind::Invisible,
        BeamKind::Hydro => BuiltBeamKind::Hydro,
        BeamKind::InvisibleHydro => BuiltBeamKind::InvisibleHydro,
        BeamKind::Virtual => BuiltBeamKind::Virtual,
        BeamKind::Marked => BuiltBeamKind::Marked,
    }
}

/// Builds a `BuiltBeam` from already-resolved node indices and a defaults
/// record, for use by every subsystem that synthesizes beams directly
/// (wheels, cinecam, hooks, ropes...) rather than parsing a `beams` line.
#[allow(clippy::too_many_arguments)]
pub fn make_beam(
    nodes: [usize; 2],
    kind: BuiltBeamKind,
    defaults: &BeamDefaults,
    options: BeamOptions,
    detacher_group: i32,
) -> BuiltBeam {
    BuiltBeam {
        nodes,
        options,
        kind,
        springiness: defaults.springiness * defaults.scale.springiness,
        damping_constant: defaults.damping_constant * defaults.scale.damping_constant,
        deformation_threshold: defaults.deformation_threshold_constant
            * defaults.scale.deformation_threshold_constant,
        breaking_threshold: defaults.breaking_threshold_constant * defaults.scale.breaking_threshold_constant,
        visual_diameter: defaults.visual_beam_diameter,
        material_name: defaults.beam_material_name.clone(),
        plastic_deformation_coefficient: defaults.plastic_deformation_coefficient,
        extension_break_limit: None,
        short_bound: None,
        detacher_group,
    }
}

pub fn push_beam(rig: &mut Rig, beam: BuiltBeam, module_name: &str, diags: &mut DiagnosticList) -> Option<usize> {
    limits::try_push(&mut rig.beams, beam, MAX_BEAMS, SECTION, module_name, diags)
}

pub fn build_beams(
    rig: &mut Rig,
    resolver: &NodeResolver,
    beams: &[Beam],
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    for beam in beams {
        let Some(a) = resolver.resolve(&beam.nodes[0], 0, SECTION, module_name, diags) else {
            continue;
        };
        let Some(b) = resolver.resolve(&beam.nodes[1], 0, SECTION, module_name, diags) else {
            continue;
        };
        let mut built = make_beam(
            [a, b],
            map_kind(beam.kind),
            &beam.defaults,
            beam.options,
            beam.detacher_group,
        );
        built.extension_break_limit = beam.extension_break_limit;
        limits::try_push(&mut rig.beams, built, MAX_BEAMS, SECTION, module_name, diags);
    }
}
