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
//! Process-wide capacity limits (spec.md §5). The builder models a "fixed
//! capacity array" as a `Vec` guarded by [`Capacity::try_push`]: the shape a
//! caller observes (an overflowing item is dropped with an `ERROR`
//! diagnostic and everything before it survives) is identical to a literal
//! fixed-size array, without committing every record type to a `[T; N]`.

pub const MAX_NODES: usize = 4096;
pub const MAX_BEAMS: usize = 16384;
pub const MAX_SHOCKS: usize = 2048;
pub const MAX_WHEELS: usize = 64;
pub const MAX_HYDROS: usize = 128;
pub const MAX_PROPS: usize = 512;
pub const MAX_FLEXBODIES: usize = 256;
pub const MAX_CABS: usize = 8192;
pub const MAX_TEXCOORDS: usize = 8192;
pub const MAX_ROTATORS: usize = 64;
pub const MAX_CPARTICLES: usize = 128;
pub const MAX_SOUNDSCRIPTS_PER_TRUCK: usize = 128;
pub const MAX_COMMANDS: usize = 84; // two per key, keys 1..42
pub const MAX_AEROENGINES: usize = 8;
pub const MAX_AIRBRAKES: usize = 16;
pub const MAX_WINGS: usize = 64;
pub const MAX_CAMERARAIL: usize = 32;
pub const MAX_SCREWPROPS: usize = 8;

use rigdef::error::DiagnosticList;

/// A push that enforces a capacity limit the way spec.md §5 requires: items
/// past the limit are dropped with an `ERROR` diagnostic, and the collection
/// is left exactly at the limit, never over it.
#[allow(clippy::too_many_arguments)]
pub fn try_push<T>(
    vec: &mut Vec<T>,
    item: T,
    limit: usize,
    section: &str,
    module_name: &str,
    diags: &mut DiagnosticList,
) -> Option<usize> {
    if vec.len() >= limit {
        diags.error(0, section, module_name, format!("capacity exceeded ({limit}); dropping item"));
        return None;
    }
    let index = vec.len();
    vec.push(item);
    Some(index)
}
