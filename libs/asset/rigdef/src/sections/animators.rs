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
use crate::defaults::DefaultsStack;
use crate::error::DiagnosticList;
use crate::fields::split_fields;
use crate::ids::parse_node_id;
use crate::module::Module;
use crate::records::{AeroAnimator, AeroAnimatorFlags, Animator, AnimatorFlags};

const SECTION: &str = "animators";

/// `n1, n2, lengthening_factor, flag|flag|shortlimit:x|longlimit:x|...`.
/// Unlike most sections the flag list is `|`-separated, matching the
/// `add_animation` grammar (spec.md §4.3.7) the format reuses here.
pub fn parse_animator(
    module: &mut Module,
    defaults: &DefaultsStack,
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let fields = split_fields(line);
    if fields.len() < 3 {
        diags.error(line_no, SECTION, module_name, "expected at least 3 fields");
        return;
    }
    let n1 = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let n2 = parse_node_id(&fields[1], line_no, SECTION, module_name, diags);
    let Some(lengthening_factor) = fields[2].parse::<f32>().ok() else {
        diags.error(line_no, SECTION, module_name, "non-numeric lengthening_factor");
        return;
    };

    let mut flags = AnimatorFlags::empty();
    let mut short_limit = None;
    let mut long_limit = None;
    let mut aero_flags = AeroAnimatorFlags::empty();
    let mut aero_motor = 0u32;

    for raw_token in fields.iter().skip(3).flat_map(|f| f.split('|')) {
        let token = raw_token.trim();
        if token.is_empty() {
            continue;
        }
        if let Some(value) = token.strip_prefix("shortlimit:") {
            short_limit = value.parse::<f32>().ok();
            continue;
        }
        if let Some(value) = token.strip_prefix("longlimit:") {
            long_limit = value.parse::<f32>().ok();
            continue;
        }
        let (base, motor) = split_motor_suffix(token);
        let flag = match base {
            "visible" => Some(AnimatorFlags::VISIBLE),
            "invisible" => Some(AnimatorFlags::INVISIBLE),
            "airspeed" => Some(AnimatorFlags::AIRSPEED),
            "vvi" => Some(AnimatorFlags::VERTICAL_VELOCITY),
            "altimeter100k" => Some(AnimatorFlags::ALTIMETER_100K),
            "altimeter10k" => Some(AnimatorFlags::ALTIMETER_10K),
            "altimeter1k" => Some(AnimatorFlags::ALTIMETER_1K),
            "aoa" => Some(AnimatorFlags::ANGLE_OF_ATTACK),
            "flap" => Some(AnimatorFlags::FLAP),
            "airbrake" => Some(AnimatorFlags::AIR_BRAKE),
            "roll" => Some(AnimatorFlags::ROLL),
            "pitch" => Some(AnimatorFlags::PITCH),
            "brakes" => Some(AnimatorFlags::BRAKES),
            "accel" => Some(AnimatorFlags::ACCEL),
            "clutch" => Some(AnimatorFlags::CLUTCH),
            "speedo" => Some(AnimatorFlags::SPEEDO),
            "tacho" => Some(AnimatorFlags::TACHO),
            "turbo" => Some(AnimatorFlags::TURBO),
            "parking" => Some(AnimatorFlags::PARKING),
            "shifterman1" => Some(AnimatorFlags::SHIFT_LEFT_RIGHT),
            "shifterman2" => Some(AnimatorFlags::SHIFT_BACK_FORTH),
            "sequential" => Some(AnimatorFlags::SEQUENTIAL_SHIFT),
            "shifterlin" => Some(AnimatorFlags::GEAR_SELECT),
            "torque" => Some(AnimatorFlags::TORQUE),
            "difflock" => Some(AnimatorFlags::DIFFLOCK),
            "rudderboat" => Some(AnimatorFlags::BOAT_RUDDER),
            "throttleboat" => Some(AnimatorFlags::BOAT_THROTTLE),
            "throttle" | "rpm" | "aerotorque" | "pitch_control" | "status" => {
                let aero_flag = match base {
                    "throttle" => AeroAnimatorFlags::THROTTLE,
                    "rpm" => AeroAnimatorFlags::RPM,
                    "aerotorque" => AeroAnimatorFlags::TORQUE,
                    "pitch_control" => AeroAnimatorFlags::PITCH,
                    _ => AeroAnimatorFlags::STATUS,
                };
                aero_flags.insert(aero_flag);
                if let Some(m) = motor {
                    aero_motor = m;
                }
                None
            }
            _ => {
                diags.warning(
                    line_no,
                    SECTION,
                    module_name,
                    format!("unknown animator flag `{token}` ignored"),
                );
                None
            }
        };
        if let Some(flag) = flag {
            flags.insert(flag);
        }
    }
    if short_limit.is_some() {
        flags.insert(AnimatorFlags::SHORT_LIMIT);
    }
    if long_limit.is_some() {
        flags.insert(AnimatorFlags::LONG_LIMIT);
    }

    let aero_animator = if aero_flags.is_empty() {
        None
    } else {
        Some(AeroAnimator {
            flags: aero_flags,
            motor: aero_motor,
        })
    };

    module.animators.push(Animator {
        nodes: [n1, n2],
        lengthening_factor,
        flags,
        short_limit,
        long_limit,
        aero_animator,
        inertia_defaults: defaults.inertia_defaults.clone(),
        beam_defaults: defaults.beam_defaults.clone(),
        detacher_group: defaults.detacher_group,
    });
}

/// Splits a trailing digit suffix off a motor-indexed token, e.g.
/// `"throttle1"` -> `("throttle", Some(1))`.
fn split_motor_suffix(token: &str) -> (&str, Option<u32>) {
    let digits_at = token.find(|c: char| c.is_ascii_digit());
    match digits_at {
        Some(idx) if idx > 0 => {
            let (base, digits) = token.split_at(idx);
            match digits.parse::<u32>() {
                Ok(n) => (base, Some(n)),
                Err(_) => (token, None),
            }
        }
        _ => (token, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sensor_flags_and_limits() {
        let defaults = DefaultsStack::default();
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_animator(
            &mut module,
            &defaults,
            "0,1,1.0,airspeed|shortlimit:0.5",
            1,
            "root",
            &mut diags,
        );
        assert_eq!(module.animators.len(), 1);
        let a = &module.animators[0];
        assert!(a.flags.contains(AnimatorFlags::AIRSPEED));
        assert!(a.flags.contains(AnimatorFlags::SHORT_LIMIT));
        assert_eq!(a.short_limit, Some(0.5));
    }

    #[test]
    fn motor_indexed_throttle_sets_aero_animator() {
        let defaults = DefaultsStack::default();
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_animator(&mut module, &defaults, "0,1,1.0,throttle2", 1, "root", &mut diags);
        let aero = module.animators[0].aero_animator.as_ref().unwrap();
        assert!(aero.flags.contains(AeroAnimatorFlags::THROTTLE));
        assert_eq!(aero.motor, 2);
    }
}
