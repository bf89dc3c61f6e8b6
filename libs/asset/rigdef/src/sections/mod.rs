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
//! One module per section family, each exposing parser functions that
//! validate a single line and append one record to the current `Module`.
pub mod animators;
pub mod beams;
pub mod commands;
pub mod engine;
pub mod flexbody;
pub mod hooks;
pub mod hydros;
pub mod misc;
pub mod nodes;
pub mod props;
pub mod rotators;
pub mod shocks;
pub mod submesh;
pub mod ties;
pub mod triggers;
pub mod wheels;
