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
use rigdef::records::{Animator, AnimatorFlags, BeamOptions};

use crate::beams::make_beam;
use crate::limits::{self, MAX_BEAMS};
use crate::resolver::NodeResolver;
use crate::rig::{BuiltAnimator, BuiltBeamKind, Rig};

const SECTION: &str = "animators";

pub fn build_animators(
    rig: &mut Rig,
    resolver: &NodeResolver,
    animators: &[Animator],
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    for animator in animators {
        let Some(a) = resolver.resolve(&animator.nodes[0], 0, SECTION, module_name, diags) else { continue };
        let Some(b) = resolver.resolve(&animator.nodes[1], 0, SECTION, module_name, diags) else { continue };
        let kind = if animator.flags.contains(AnimatorFlags::INVISIBLE) {
            BuiltBeamKind::Invisible
        } else {
            BuiltBeamKind::Normal
        };
        let beam = make_beam([a, b], kind, &animator.beam_defaults, BeamOptions::empty(), animator.detacher_group);
        let Some(beam_index) = limits::try_push(&mut rig.beams, beam, MAX_BEAMS, SECTION, module_name, diags) else {
            continue;
        };
        rig.animators.push(BuiltAnimator {
            nodes: [a, b],
            lengthening_factor: animator.lengthening_factor,
            flags: animator.flags,
            short_limit: animator.short_limit,
            long_limit: animator.long_limit,
            beam_index,
        });
    }
}
