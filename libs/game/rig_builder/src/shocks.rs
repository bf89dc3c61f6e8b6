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
use rigdef::records::{BeamOptions, Shock, Shock2};

use crate::beams::make_beam;
use crate::limits::{self, MAX_BEAMS, MAX_SHOCKS};
use crate::resolver::NodeResolver;
use crate::rig::{BuiltBeamKind, BuiltShock, BuiltShock2, Rig};

pub fn build_shocks(
    rig: &mut Rig,
    resolver: &NodeResolver,
    shocks: &[Shock],
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    const SECTION: &str = "shocks";
    for shock in shocks {
        let Some(a) = resolver.resolve(&shock.nodes[0], 0, SECTION, module_name, diags) else { continue };
        let Some(b) = resolver.resolve(&shock.nodes[1], 0, SECTION, module_name, diags) else { continue };
        let mut beam = make_beam(
            [a, b],
            BuiltBeamKind::Invisible,
            &shock.beam_defaults,
            BeamOptions::empty(),
            shock.detacher_group,
        );
        beam.springiness = shock.spring_rate;
        beam.damping_constant = shock.damping;
        beam.short_bound = Some(shock.short_bound);
        let Some(beam_index) = limits::try_push(&mut rig.beams, beam, MAX_BEAMS, SECTION, module_name, diags) else {
            continue;
        };
        if rig.shocks.len() >= MAX_SHOCKS {
            diags.error(0, SECTION, module_name, format!("capacity exceeded ({MAX_SHOCKS}); dropping shock"));
            continue;
        }
        rig.shocks.push(BuiltShock {
            nodes: [a, b],
            spring_rate: shock.spring_rate,
            damping: shock.damping,
            short_bound: shock.short_bound,
            long_bound: shock.long_bound,
            precompression: shock.precompression,
            options: shock.options,
            beam_index,
        });
    }
}

pub fn build_shocks2(
    rig: &mut Rig,
    resolver: &NodeResolver,
    shocks: &[Shock2],
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    const SECTION: &str = "shocks2";
    for shock in shocks {
        let Some(a) = resolver.resolve(&shock.nodes[0], 0, SECTION, module_name, diags) else { continue };
        let Some(b) = resolver.resolve(&shock.nodes[1], 0, SECTION, module_name, diags) else { continue };
        let mut beam = make_beam(
            [a, b],
            BuiltBeamKind::Invisible,
            &shock.beam_defaults,
            BeamOptions::empty(),
            shock.detacher_group,
        );
        beam.springiness = shock.spring_in;
        beam.damping_constant = shock.damp_in;
        beam.short_bound = Some(shock.short_bound);
        let Some(beam_index) = limits::try_push(&mut rig.beams, beam, MAX_BEAMS, SECTION, module_name, diags) else {
            continue;
        };
        if rig.shocks2.len() >= MAX_SHOCKS {
            diags.error(0, SECTION, module_name, format!("capacity exceeded ({MAX_SHOCKS}); dropping shock2"));
            continue;
        }
        rig.shocks2.push(BuiltShock2 {
            nodes: [a, b],
            spring_in: shock.spring_in,
            damp_in: shock.damp_in,
            progress_factor_spring_in: shock.progress_factor_spring_in,
            progress_factor_damp_in: shock.progress_factor_damp_in,
            spring_out: shock.spring_out,
            damp_out: shock.damp_out,
            progress_factor_spring_out: shock.progress_factor_spring_out,
            progress_factor_damp_out: shock.progress_factor_damp_out,
            short_bound: shock.short_bound,
            long_bound: shock.long_bound,
            precompression: shock.precompression,
            options: shock.options,
            beam_index,
        });
    }
}
