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
use nalgebra::Vector3;

use crate::defaults::DefaultsStack;
use crate::error::DiagnosticList;
use crate::fields::split_fields;
use crate::ids::parse_node_id;
use crate::module::Module;
use crate::records::{
    Animation, AnimationModeFlags, AnimationSourceFlags, BeaconSpecial, CameraSettings, MotorSource,
    MotorSourceFlags, Prop, PropSpecial, SteeringWheelSpecial,
};

const SECTION: &str = "props";

/// `ref, x, y, offsetX, offsetY, offsetZ, rotX, rotY, rotZ, mesh_name[,
///  special_name[, special_args...]]`. Special mesh names (`leftmirror`,
/// `rightmirror`, `dashboard[-rh]`, `spinprop`, `pale`, `seat[2]`, `beacon`,
/// `redbeacon`, `lightbar`) unlock the additional per-prop behavior the
/// renderer attaches to a prop slot instead of drawing its mesh literally.
pub fn parse_prop(
    module: &mut Module,
    _defaults: &DefaultsStack,
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    let fields = split_fields(line);
    if fields.len() < 10 {
        diags.error(line_no, SECTION, module_name, "expected at least 10 fields");
        return;
    }
    let reference_node = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let x_axis_node = parse_node_id(&fields[1], line_no, SECTION, module_name, diags);
    let y_axis_node = parse_node_id(&fields[2], line_no, SECTION, module_name, diags);
    let mut nums = [0f32; 6];
    for (i, field) in fields[3..9].iter().enumerate() {
        match field.parse::<f32>() {
            Ok(v) => nums[i] = v,
            Err(_) => {
                diags.error(line_no, SECTION, module_name, format!("non-numeric field {i}"));
                return;
            }
        }
    }
    let offset = Vector3::new(nums[0], nums[1], nums[2]);
    let rotation = Vector3::new(nums[3], nums[4], nums[5]);
    let mesh_name = fields[9].clone();

    let (special, special_steering_wheel, special_beacon) = match fields.get(10).map(String::as_str) {
        Some("leftmirror") => (Some(PropSpecial::LeftRearViewMirror), None, None),
        Some("rightmirror") => (Some(PropSpecial::RightRearViewMirror), None, None),
        Some("dashboard-rh") => (
            Some(PropSpecial::SteeringWheelRightHanded),
            Some(parse_steering_wheel(&fields[11..])),
            None,
        ),
        Some("dashboard") => (
            Some(PropSpecial::SteeringWheelLeftHanded),
            Some(parse_steering_wheel(&fields[11..])),
            None,
        ),
        Some("spinprop") => (Some(PropSpecial::SpinProp), None, None),
        Some("pale") => (Some(PropSpecial::Pale), None, None),
        Some("seat") => (Some(PropSpecial::DriverSeat), None, None),
        Some("seat2") => (Some(PropSpecial::DriverSeat2), None, None),
        Some("beacon") => (Some(PropSpecial::Beacon), None, Some(parse_beacon(&fields[11..]))),
        Some("redbeacon") => (Some(PropSpecial::RedBeacon), None, None),
        Some("lightbar") => (Some(PropSpecial::LightBar), None, None),
        Some(other) => {
            diags.warning(line_no, SECTION, module_name, format!("unknown prop special `{other}` ignored"));
            (None, None, None)
        }
        None => (None, None, None),
    };

    module.props.push(Prop {
        reference_node,
        x_axis_node,
        y_axis_node,
        offset,
        rotation,
        mesh_name,
        animations: Vec::new(),
        camera_settings: CameraSettings::default(),
        special,
        special_steering_wheel,
        special_beacon,
    });
}

fn parse_steering_wheel(rest: &[String]) -> SteeringWheelSpecial {
    let mut wheel = SteeringWheelSpecial::default();
    if rest.len() >= 4 {
        if let (Ok(x), Ok(y), Ok(z)) = (rest[0].parse(), rest[1].parse(), rest[2].parse()) {
            wheel.offset = Some(Vector3::new(x, y, z));
        }
        if let Ok(angle) = rest[3].parse() {
            wheel.rotation_angle = angle;
        }
        if let Some(mesh) = rest.get(4) {
            wheel.mesh_name = mesh.clone();
        }
    }
    wheel
}

fn parse_beacon(rest: &[String]) -> BeaconSpecial {
    let mut beacon = BeaconSpecial::default();
    if rest.len() >= 3 {
        if let (Ok(r), Ok(g), Ok(b)) = (rest[0].parse(), rest[1].parse(), rest[2].parse()) {
            beacon.color = Vector3::new(r, g, b);
        }
    }
    if let Some(material) = rest.get(3) {
        beacon.flare_material_name = material.clone();
    }
    beacon
}

/// `ratio, lower_limit, upper_limit, source1|source2|..., mode1|mode2|...`.
/// Shared between `props`' `add_animation` directive and `flexbodies`, which
/// attach to whichever prop or flexbody record was created most recently in
/// the current module (spec.md §4.3.6).
pub fn parse_add_animation(
    animations: &mut Vec<Animation>,
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    const SECTION: &str = "add_animation";
    let fields = split_fields(line);
    if fields.len() < 5 {
        diags.error(line_no, SECTION, module_name, "expected at least 5 fields");
        return;
    }
    let (Some(ratio), Some(lower_limit), Some(upper_limit)) = (
        fields[0].parse::<f32>().ok(),
        fields[1].parse::<f32>().ok(),
        fields[2].parse::<f32>().ok(),
    ) else {
        diags.error(line_no, SECTION, module_name, "non-numeric ratio/limits");
        return;
    };

    let mut animation = Animation {
        ratio,
        lower_limit,
        upper_limit,
        ..Animation::new()
    };

    for token in fields[3].split('|').map(str::trim).filter(|t| !t.is_empty()) {
        apply_source_token(&mut animation, token, line_no, module_name, diags);
    }
    for token in fields.get(4).map(String::as_str).unwrap_or("").split('|').map(str::trim).filter(|t| !t.is_empty()) {
        apply_mode_token(&mut animation, token, line_no, module_name, diags);
    }

    animations.push(animation);
}

fn apply_source_token(
    animation: &mut Animation,
    token: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    if let Some(name) = token.strip_prefix("event:") {
        animation.event = Some(name.to_string());
        animation.source.insert(AnimationSourceFlags::EVENT);
        return;
    }
    let (base, index) = split_trailing_digits(token);
    let flag = match base {
        "airspeed" => Some(AnimationSourceFlags::AIRSPEED),
        "vvi" => Some(AnimationSourceFlags::VERTICAL_VELOCITY),
        "altimeter" => Some(AnimationSourceFlags::ALTIMETER),
        "aoa" => Some(AnimationSourceFlags::ANGLE_OF_ATTACK),
        "flap" => Some(AnimationSourceFlags::FLAP),
        "airbrake" => Some(AnimationSourceFlags::AIR_BRAKE),
        "roll" => Some(AnimationSourceFlags::ROLL),
        "pitch" => Some(AnimationSourceFlags::PITCH),
        "brakes" => Some(AnimationSourceFlags::BRAKES),
        "accel" => Some(AnimationSourceFlags::ACCEL),
        "clutch" => Some(AnimationSourceFlags::CLUTCH),
        "speedo" => Some(AnimationSourceFlags::SPEEDO),
        "tacho" => Some(AnimationSourceFlags::TACHO),
        "turbo" => Some(AnimationSourceFlags::TURBO),
        "parking" => Some(AnimationSourceFlags::PARKING),
        "shifterman1" => Some(AnimationSourceFlags::SHIFTERMAN1),
        "shifterman2" => Some(AnimationSourceFlags::SHIFTERMAN2),
        "sequential" => Some(AnimationSourceFlags::SEQUENTIAL_SHIFT),
        "shifterlin" => Some(AnimationSourceFlags::SHIFTERLIN),
        "torque" => Some(AnimationSourceFlags::TORQUE),
        "heading" => Some(AnimationSourceFlags::HEADING),
        "difflock" => Some(AnimationSourceFlags::DIFFLOCK),
        "rudderboat" => Some(AnimationSourceFlags::BOAT_RUDDER),
        "throttleboat" => Some(AnimationSourceFlags::BOAT_THROTTLE),
        "steeringwheel" => Some(AnimationSourceFlags::STEERING_WHEEL),
        "aileron" => Some(AnimationSourceFlags::AILERON),
        "elevator" => Some(AnimationSourceFlags::ELEVATOR),
        "arudder" => Some(AnimationSourceFlags::AIR_RUDDER),
        "permanent" => Some(AnimationSourceFlags::PERMANENT),
        "throttle" | "rpm" => {
            let aero_flag = if base == "throttle" {
                MotorSourceFlags::AERO_THROTTLE
            } else {
                MotorSourceFlags::AERO_RPM
            };
            animation.motor_sources.push(MotorSource {
                flags: aero_flag,
                motor_index: index.unwrap_or(0),
            });
            if base == "throttle" {
                Some(AnimationSourceFlags::THROTTLE)
            } else {
                Some(AnimationSourceFlags::RPM)
            }
        }
        _ => {
            diags.warning(
                line_no,
                "add_animation",
                module_name,
                format!("unknown animation source `{token}` ignored"),
            );
            None
        }
    };
    if let Some(flag) = flag {
        animation.source.insert(flag);
    }
}

fn apply_mode_token(animation: &mut Animation, token: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    let flag = match token {
        "x-rotation" => Some(AnimationModeFlags::ROTATION_X),
        "y-rotation" => Some(AnimationModeFlags::ROTATION_Y),
        "z-rotation" => Some(AnimationModeFlags::ROTATION_Z),
        "x-offset" => Some(AnimationModeFlags::OFFSET_X),
        "y-offset" => Some(AnimationModeFlags::OFFSET_Y),
        "z-offset" => Some(AnimationModeFlags::OFFSET_Z),
        "autoanimate" => Some(AnimationModeFlags::AUTO_ANIMATE),
        "noflip" => Some(AnimationModeFlags::NO_FLIP),
        "bounce" => Some(AnimationModeFlags::BOUNCE),
        "eventlock" => Some(AnimationModeFlags::EVENT_LOCK),
        _ => {
            diags.warning(
                line_no,
                "add_animation",
                module_name,
                format!("unknown animation mode `{token}` ignored"),
            );
            None
        }
    };
    if let Some(flag) = flag {
        animation.mode.insert(flag);
    }
}

/// Splits a trailing digit suffix, e.g. `"throttle1"` -> `("throttle", Some(1))`.
fn split_trailing_digits(token: &str) -> (&str, Option<u32>) {
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
    fn parses_plain_prop() {
        let defaults = DefaultsStack::default();
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_prop(
            &mut module,
            &defaults,
            "0,1,2,0,0,0.1,0,0,0,dash.mesh",
            1,
            "root",
            &mut diags,
        );
        assert_eq!(module.props.len(), 1);
        assert!(module.props[0].special.is_none());
    }

    #[test]
    fn parses_beacon_special() {
        let defaults = DefaultsStack::default();
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_prop(
            &mut module,
            &defaults,
            "0,1,2,0,0,0.1,0,0,0,beacon.mesh,beacon,1,0,0,tracks/beaconflare",
            1,
            "root",
            &mut diags,
        );
        assert_eq!(module.props[0].special, Some(PropSpecial::Beacon));
        assert_eq!(
            module.props[0].special_beacon.as_ref().unwrap().flare_material_name,
            "tracks/beaconflare"
        );
    }

    #[test]
    fn add_animation_parses_motor_indexed_throttle() {
        let mut animations = Vec::new();
        let mut diags = DiagnosticList::new();
        parse_add_animation(&mut animations, "1.0,-1,-1,throttle1,autoanimate", 1, "root", &mut diags);
        assert_eq!(animations.len(), 1);
        assert!(animations[0].source.contains(AnimationSourceFlags::THROTTLE));
        assert_eq!(animations[0].motor_sources[0].motor_index, 1);
        assert!(animations[0].mode.contains(AnimationModeFlags::AUTO_ANIMATE));
    }
}
