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
use bitflags::bitflags;
use std::rc::Rc;

bitflags! {
    /// Per-node option letters from `nodes`/`nodes2` (spec.md §3).
    #[derive(Default)]
    pub struct NodeOptions: u32 {
        const MOUSE_GRAB          = 1 << 0; // n
        const NO_MOUSE_GRAB       = 1 << 1; // m
        const NO_SPARKS           = 1 << 2; // f
        const EXHAUST_SOURCE      = 1 << 3; // x
        const EXHAUST_DIRECTION   = 1 << 4; // y
        const NO_GROUND_CONTACT   = 1 << 5; // c
        const HOOK_POINT          = 1 << 6; // h
        const TERRAIN_EDIT        = 1 << 7; // e
        const EXTRA_BUOYANCY      = 1 << 8; // b
        const NO_PARTICLES        = 1 << 9; // p
        const LOG                 = 1 << 10; // L
        const LOAD_WEIGHT_OVERRIDE = 1 << 11; // l
    }
}

impl NodeOptions {
    pub fn from_letter(c: char) -> Option<Self> {
        Some(match c {
            'n' => Self::MOUSE_GRAB,
            'm' => Self::NO_MOUSE_GRAB,
            'f' => Self::NO_SPARKS,
            'x' => Self::EXHAUST_SOURCE,
            'y' => Self::EXHAUST_DIRECTION,
            'c' => Self::NO_GROUND_CONTACT,
            'h' => Self::HOOK_POINT,
            'e' => Self::TERRAIN_EDIT,
            'b' => Self::EXTRA_BUOYANCY,
            'p' => Self::NO_PARTICLES,
            'L' => Self::LOG,
            'l' => Self::LOAD_WEIGHT_OVERRIDE,
            _ => return None,
        })
    }
}

/// Current `set_node_defaults` state; shared by reference into every node
/// record created while it is current.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDefaults {
    pub load_weight: f32,
    pub friction: f32,
    pub volume: f32,
    pub surface: f32,
    pub options: NodeOptions,
}

impl Default for NodeDefaults {
    fn default() -> Self {
        Self {
            load_weight: -1.0,
            friction: 1.0,
            volume: 1.0,
            surface: 1.0,
            options: NodeOptions::empty(),
        }
    }
}

bitflags! {
    /// Tracks which `BeamDefaults` fields the user actually specified, so
    /// downstream code can distinguish "explicitly set" from "happens to
    /// equal the built-in default".
    #[derive(Default)]
    pub struct BeamDefaultsUserSpecified: u32 {
        const SPRINGINESS               = 1 << 0;
        const DAMPING_CONSTANT          = 1 << 1;
        const DEFORM_THRESHOLD_CONSTANT = 1 << 2;
        const BREAK_THRESHOLD_CONSTANT  = 1 << 3;
        const BEAM_DIAMETER             = 1 << 4;
        const BEAM_MATERIAL             = 1 << 5;
        const PLASTIC_DEFORM_COEFFICIENT = 1 << 6;
    }
}

/// Multiplier block set by `set_beam_defaults_scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamDefaultsScale {
    pub springiness: f32,
    pub damping_constant: f32,
    pub deformation_threshold_constant: f32,
    pub breaking_threshold_constant: f32,
}

impl Default for BeamDefaultsScale {
    fn default() -> Self {
        Self {
            springiness: 1.0,
            damping_constant: 1.0,
            deformation_threshold_constant: 1.0,
            breaking_threshold_constant: 1.0,
        }
    }
}

/// Current `set_beam_defaults` state.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamDefaults {
    pub springiness: f32,
    pub damping_constant: f32,
    pub deformation_threshold_constant: f32,
    pub breaking_threshold_constant: f32,
    pub visual_beam_diameter: f32,
    pub beam_material_name: String,
    pub plastic_deformation_coefficient: f32,
    pub scale: BeamDefaultsScale,
    pub user_specified: BeamDefaultsUserSpecified,
    pub enable_advanced_deformation: bool,
}

impl Default for BeamDefaults {
    fn default() -> Self {
        Self {
            springiness: 9_000_000.0,
            damping_constant: 12_000.0,
            deformation_threshold_constant: 400_000.0,
            breaking_threshold_constant: 1_000_000.0,
            visual_beam_diameter: 0.05,
            beam_material_name: "tracks/beam".to_string(),
            plastic_deformation_coefficient: 0.0,
            scale: BeamDefaultsScale::default(),
            user_specified: BeamDefaultsUserSpecified::empty(),
            enable_advanced_deformation: false,
        }
    }
}

impl BeamDefaults {
    /// `set_beam_defaults` applies a negative incoming value as "revert this
    /// field to the built-in default"; a non-negative value overrides it and
    /// marks the field as user-specified. Returns the new defaults record to
    /// be installed on the stack (the previous one is untouched, since it is
    /// still referenced by records already created).
    #[allow(clippy::too_many_arguments)]
    pub fn apply(
        &self,
        springiness: f32,
        damping_constant: f32,
        deformation_threshold_constant: f32,
        breaking_threshold_constant: f32,
        visual_beam_diameter: f32,
        beam_material_name: Option<String>,
        plastic_deformation_coefficient: f32,
    ) -> Self {
        let base = Self::default();
        let mut out = self.clone();
        let mut mark = |flag: BeamDefaultsUserSpecified, value: f32, field: &mut f32, base_value: f32| {
            if value < 0.0 {
                *field = base_value;
                out.user_specified.remove(flag);
            } else {
                *field = value;
                out.user_specified.insert(flag);
            }
        };
        mark(
            BeamDefaultsUserSpecified::SPRINGINESS,
            springiness,
            &mut out.springiness,
            base.springiness,
        );
        mark(
            BeamDefaultsUserSpecified::DAMPING_CONSTANT,
            damping_constant,
            &mut out.damping_constant,
            base.damping_constant,
        );
        mark(
            BeamDefaultsUserSpecified::DEFORM_THRESHOLD_CONSTANT,
            deformation_threshold_constant,
            &mut out.deformation_threshold_constant,
            base.deformation_threshold_constant,
        );
        mark(
            BeamDefaultsUserSpecified::BREAK_THRESHOLD_CONSTANT,
            breaking_threshold_constant,
            &mut out.breaking_threshold_constant,
            base.breaking_threshold_constant,
        );
        mark(
            BeamDefaultsUserSpecified::BEAM_DIAMETER,
            visual_beam_diameter,
            &mut out.visual_beam_diameter,
            base.visual_beam_diameter,
        );
        mark(
            BeamDefaultsUserSpecified::PLASTIC_DEFORM_COEFFICIENT,
            plastic_deformation_coefficient,
            &mut out.plastic_deformation_coefficient,
            base.plastic_deformation_coefficient,
        );
        if let Some(name) = beam_material_name {
            out.beam_material_name = name;
            out.user_specified
                .insert(BeamDefaultsUserSpecified::BEAM_MATERIAL);
        }
        out
    }
}

/// Unconditional inertia curve (engine/turbojet startup ramps and similar).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inertia {
    pub start_delay_factor: f32,
    pub stop_delay_factor: f32,
    pub start_function: Option<String>,
    pub stop_function: Option<String>,
}

impl Inertia {
    /// `set_inertia_defaults` applies a negative `start_delay`/`stop_delay`
    /// field as "restore the built-in inertia defaults" (spec.md's tested
    /// `set_inertia_defaults -1` round-trip), mirroring `BeamDefaults::apply`'s
    /// negative-means-reset contract. Otherwise resolves normally, keeping
    /// any field the tail left unset at its current value.
    pub fn apply(&self, tail: &OptionalInertia) -> Self {
        let negative = |v: Option<f32>| v.map(|v| v < 0.0).unwrap_or(false);
        if negative(tail.start_delay_factor) || negative(tail.stop_delay_factor) {
            return Self::default();
        }
        tail.resolve(self)
    }
}

/// An inertia tail attached to commands/hydros/rotators/animators, where any
/// field may be omitted (`/` or `-`) and means "keep the previous value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionalInertia {
    pub start_delay_factor: Option<f32>,
    pub stop_delay_factor: Option<f32>,
    pub start_function: Option<String>,
    pub stop_function: Option<String>,
}

impl OptionalInertia {
    /// Resolves against a base `Inertia`, keeping prior values for any field
    /// the user left unset.
    pub fn resolve(&self, base: &Inertia) -> Inertia {
        Inertia {
            start_delay_factor: self.start_delay_factor.unwrap_or(base.start_delay_factor),
            stop_delay_factor: self.stop_delay_factor.unwrap_or(base.stop_delay_factor),
            start_function: self
                .start_function
                .clone()
                .or_else(|| base.start_function.clone()),
            stop_function: self
                .stop_function
                .clone()
                .or_else(|| base.stop_function.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManagedMaterialOptions {
    pub double_sided: bool,
}

/// The four parallel "current default" values plus `detacher_group`,
/// threaded through the parser. Each is reference-counted so that replacing
/// it (via a `set_*` directive) leaves records that already captured the
/// previous value untouched.
#[derive(Debug, Clone)]
pub struct DefaultsStack {
    pub node_defaults: Rc<NodeDefaults>,
    pub beam_defaults: Rc<BeamDefaults>,
    pub inertia_defaults: Rc<Inertia>,
    pub managed_material_options: Rc<ManagedMaterialOptions>,
    pub detacher_group: i32,
}

impl Default for DefaultsStack {
    fn default() -> Self {
        Self {
            node_defaults: Rc::new(NodeDefaults::default()),
            beam_defaults: Rc::new(BeamDefaults::default()),
            inertia_defaults: Rc::new(Inertia::default()),
            managed_material_options: Rc::new(ManagedMaterialOptions::default()),
            detacher_group: 0,
        }
    }
}

/// Parses the trailing `(start_delay, stop_delay, start_fn, stop_fn)` tail
/// shared by commands/hydros/rotators/animators (spec.md §4.3). Each field
/// is itself optional; a bare `/` or `-` token means "keep the previous
/// value" rather than "zero", matching `OptionalInertia::resolve`.
pub fn parse_optional_inertia_tail(fields: &[&str]) -> OptionalInertia {
    let placeholder = |s: &str| s == "/" || s == "-";
    let mut tail = OptionalInertia::default();
    if let Some(f) = fields.first() {
        if !placeholder(f) {
            tail.start_delay_factor = f.parse::<f32>().ok();
        }
    }
    if let Some(f) = fields.get(1) {
        if !placeholder(f) {
            tail.stop_delay_factor = f.parse::<f32>().ok();
        }
    }
    if let Some(f) = fields.get(2) {
        if !placeholder(f) {
            tail.start_function = Some((*f).to_string());
        }
    }
    if let Some(f) = fields.get(3) {
        if !placeholder(f) {
            tail.stop_function = Some((*f).to_string());
        }
    }
    tail
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_fields_reset_to_builtin_defaults() {
        let custom = BeamDefaults::default().apply(1.0, 2.0, 3.0, 4.0, 0.1, None, 0.5);
        assert!(custom.user_specified.contains(BeamDefaultsUserSpecified::SPRINGINESS));
        let reset = custom.apply(-1.0, -1.0, -1.0, -1.0, -1.0, None, -1.0);
        let builtin = BeamDefaults::default();
        assert_eq!(reset.springiness, builtin.springiness);
        assert_eq!(reset.damping_constant, builtin.damping_constant);
        assert!(!reset.user_specified.contains(BeamDefaultsUserSpecified::SPRINGINESS));
    }

    #[test]
    fn set_inertia_defaults_negative_restores_builtin_defaults() {
        let custom = Inertia {
            start_delay_factor: 3.0,
            stop_delay_factor: 4.0,
            start_function: Some("foo".to_string()),
            stop_function: Some("bar".to_string()),
        };
        let tail = parse_optional_inertia_tail(&["-1", "-1"]);
        let reset = custom.apply(&tail);
        assert_eq!(reset, Inertia::default());
    }

    #[test]
    fn optional_inertia_keeps_previous_when_unset() {
        let base = Inertia {
            start_delay_factor: 1.5,
            stop_delay_factor: 2.5,
            start_function: Some("foo".to_string()),
            stop_function: None,
        };
        let tail = OptionalInertia::default();
        let resolved = tail.resolve(&base);
        assert_eq!(resolved, base);
    }
}
