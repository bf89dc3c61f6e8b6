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
//! Engine, braking, and drivetrain-assist sections: `engine`, `engoption`,
//! `brakes`, `antilockbrakes`, `tractioncontrol`, `slopebrake`,
//! `cruisecontrol`, `speedlimiter`, `torquecurve`, and `axles`.
use crate::error::DiagnosticList;
use crate::fields::split_fields;
use crate::ids::parse_node_id;
use crate::module::Module;
use crate::records::{
    AlbTcMode, AntiLockBrakes, Axle, AxleOptions, Brakes, CruiseControl, Engine, EngineType,
    Engoption, SlopeBrake, SpeedLimiter, TorqueCurve, TorqueCurveSample, TractionControl,
};

/// `shift_down_rpm, shift_up_rpm, torque, global_gear_ratio,
///  reverse_gear_ratio, neutral_gear_ratio, gear_ratio+`.
pub fn parse_engine(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "engine";
    let fields = split_fields(line);
    if fields.len() < 7 {
        diags.error(line_no, SECTION, module_name, "expected at least 7 fields");
        return;
    }
    let mut nums = [0f32; 6];
    for (i, field) in fields[0..6].iter().enumerate() {
        match field.parse::<f32>() {
            Ok(v) => nums[i] = v,
            Err(_) => {
                diags.error(line_no, SECTION, module_name, format!("non-numeric field {i}"));
                return;
            }
        }
    }
    let mut gear_ratios = Vec::new();
    for field in &fields[6..] {
        match field.parse::<f32>() {
            Ok(v) => gear_ratios.push(v),
            Err(_) => {
                diags.error(line_no, SECTION, module_name, "non-numeric gear ratio");
                return;
            }
        }
    }
    if gear_ratios.is_empty() {
        diags.error(line_no, SECTION, module_name, "at least one forward gear ratio is required");
        return;
    }

    module.engine = Some(Engine {
        shift_down_rpm: nums[0],
        shift_up_rpm: nums[1],
        torque: nums[2],
        global_gear_ratio: nums[3],
        reverse_gear_ratio: nums[4],
        neutral_gear_ratio: nums[5],
        gear_ratios,
    });
}

/// `inertia[, engine_type[, clutch_force[, shift_time[, clutch_time[,
///  post_shift_time[, idle_rpm[, stall_rpm[, max_idle_mixture[,
///  min_idle_mixture]]]]]]]]]`. `engine_type` is `t` (truck) or `c` (car,
/// default).
pub fn parse_engoption(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "engoption";
    let fields = split_fields(line);
    if fields.is_empty() {
        diags.error(line_no, SECTION, module_name, "expected at least 1 field");
        return;
    }
    let Some(inertia) = fields[0].parse::<f32>().ok() else {
        diags.error(line_no, SECTION, module_name, "non-numeric inertia");
        return;
    };
    let engine_type = match fields.get(1).map(String::as_str) {
        Some("t") => EngineType::Truck,
        Some("c") | None => EngineType::Car,
        Some(other) => {
            diags.warning(line_no, SECTION, module_name, format!("unknown engine type `{other}`, defaulting to car"));
            EngineType::Car
        }
    };
    let opt = |idx: usize| fields.get(idx).and_then(|f| f.parse::<f32>().ok());

    module.engoption = Some(Engoption {
        inertia,
        engine_type,
        clutch_force: opt(2),
        shift_time: opt(3),
        clutch_time: opt(4),
        post_shift_time: opt(5),
        idle_rpm: opt(6),
        stall_rpm: opt(7),
        max_idle_mixture: opt(8),
        min_idle_mixture: opt(9),
    });
}

/// `default_braking_force[, parking_brake_force]`.
pub fn parse_brakes(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "brakes";
    let fields = split_fields(line);
    if fields.is_empty() {
        diags.error(line_no, SECTION, module_name, "expected at least 1 field");
        return;
    }
    let Some(default_braking_force) = fields[0].parse::<f32>().ok() else {
        diags.error(line_no, SECTION, module_name, "non-numeric default_braking_force");
        return;
    };
    let parking_brake_force = fields.get(1).and_then(|f| f.parse::<f32>().ok());

    module.brakes = Some(Brakes {
        default_braking_force,
        parking_brake_force,
    });
}

fn parse_alb_tc_mode(tokens: &[String]) -> AlbTcMode {
    let mut mode = AlbTcMode::empty();
    for token in tokens {
        match token.as_str() {
            "on" => mode.insert(AlbTcMode::ON),
            "off" => mode.insert(AlbTcMode::OFF),
            "no-dashboard" => mode.insert(AlbTcMode::NO_DASHBOARD),
            "no-toggle" => mode.insert(AlbTcMode::NO_TOGGLE),
            _ => {}
        }
    }
    mode
}

/// `regulation_force, min_speed[, pulse_per_sec[, mode...]]`.
pub fn parse_antilockbrakes(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "antilockbrakes";
    let fields = split_fields(line);
    if fields.len() < 2 {
        diags.error(line_no, SECTION, module_name, "expected at least 2 fields");
        return;
    }
    let (Some(regulation_force), Some(min_speed)) =
        (fields[0].parse::<f32>().ok(), fields[1].parse::<f32>().ok())
    else {
        diags.error(line_no, SECTION, module_name, "non-numeric regulation_force/min_speed");
        return;
    };
    let pulse_per_sec = fields.get(2).and_then(|f| f.parse::<f32>().ok()).unwrap_or(6.0);
    let mode = parse_alb_tc_mode(fields.get(3..).unwrap_or(&[]));

    module.antilockbrakes = Some(AntiLockBrakes {
        regulation_force,
        min_speed,
        pulse_per_sec,
        mode,
    });
}

/// `regulation_force, wheel_slip, fade_speed, pulse_per_sec[, mode...]`.
pub fn parse_tractioncontrol(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "tractioncontrol";
    let fields = split_fields(line);
    if fields.len() < 4 {
        diags.error(line_no, SECTION, module_name, "expected at least 4 fields");
        return;
    }
    let mut nums = [0f32; 4];
    for (i, field) in fields[0..4].iter().enumerate() {
        match field.parse::<f32>() {
            Ok(v) => nums[i] = v,
            Err(_) => {
                diags.error(line_no, SECTION, module_name, format!("non-numeric field {i}"));
                return;
            }
        }
    }
    let mode = parse_alb_tc_mode(fields.get(4..).unwrap_or(&[]));

    module.traction_control = Some(TractionControl {
        regulation_force: nums[0],
        wheel_slip: nums[1],
        fade_speed: nums[2],
        pulse_per_sec: nums[3],
        mode,
    });
}

/// `[regulating_force[, attach_angle[, release_angle]]]` (inline directive).
pub fn parse_slopebrake(module: &mut Module, rest: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "slopebrake";
    let fields = split_fields(rest);
    let base = SlopeBrake::default();
    let regulating_force = fields
        .first()
        .map(|f| {
            f.parse::<f32>().unwrap_or_else(|_| {
                diags.warning(line_no, SECTION, module_name, "non-numeric regulating_force, using default");
                base.regulating_force
            })
        })
        .unwrap_or(base.regulating_force);
    let attach_angle = fields
        .get(1)
        .and_then(|f| f.parse::<f32>().ok())
        .unwrap_or(base.attach_angle);
    let release_angle = fields
        .get(2)
        .and_then(|f| f.parse::<f32>().ok())
        .unwrap_or(base.release_angle);

    module.slope_brake = Some(SlopeBrake {
        regulating_force,
        attach_angle,
        release_angle,
    });
}

/// `min_speed, autobrake` (inline directive).
pub fn parse_cruisecontrol(module: &mut Module, rest: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "cruisecontrol";
    let fields = split_fields(rest);
    if fields.len() < 2 {
        diags.error(line_no, SECTION, module_name, "expected 2 fields");
        return;
    }
    let (Some(min_speed), Some(autobrake)) = (fields[0].parse::<f32>().ok(), fields[1].parse::<i32>().ok()) else {
        diags.error(line_no, SECTION, module_name, "non-numeric min_speed/autobrake");
        return;
    };
    module.cruise_control = Some(CruiseControl { min_speed, autobrake });
}

/// `max_speed` (inline directive).
pub fn parse_speedlimiter(module: &mut Module, rest: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "speedlimiter";
    let fields = split_fields(rest);
    let Some(max_speed) = fields.first().and_then(|f| f.parse::<f32>().ok()) else {
        diags.error(line_no, SECTION, module_name, "expected a numeric max_speed");
        return;
    };
    module.speed_limiter = Some(SpeedLimiter { max_speed });
}

/// Either `power, torque_percent` rows (accumulated across calls) or a single
/// `predefined(<name>)` row that replaces the curve entirely.
pub fn parse_torquecurve(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "torquecurve";
    if let Some(name) = line.strip_prefix("predefined(").and_then(|s| s.strip_suffix(')')) {
        module.torque_curve = Some(TorqueCurve {
            samples: Vec::new(),
            predefined_func_name: Some(name.to_string()),
        });
        return;
    }
    let fields = split_fields(line);
    if fields.len() < 2 {
        diags.error(line_no, SECTION, module_name, "expected `power, torque_percent` or `predefined(name)`");
        return;
    }
    let (Some(power), Some(torque_percent)) = (fields[0].parse::<f32>().ok(), fields[1].parse::<f32>().ok()) else {
        diags.error(line_no, SECTION, module_name, "non-numeric power/torque_percent");
        return;
    };
    module
        .torque_curve
        .get_or_insert_with(TorqueCurve::default)
        .samples
        .push(TorqueCurveSample { power, torque_percent });
}

/// `wheel1_left, wheel1_right[, wheel2_left, wheel2_right]...[, options]`,
/// where the trailing token is consumed as options only if it does not parse
/// as a node id pair member, i.e. it appears after an even number of node
/// fields and contains only `o`/`l`/`s` letters.
pub fn parse_axles(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "axles";
    let fields = split_fields(line);
    if fields.len() < 2 {
        diags.error(line_no, SECTION, module_name, "expected at least 2 node ids");
        return;
    }
    let is_option_token = |s: &str| !s.is_empty() && s.chars().all(|c| matches!(c, 'o' | 'l' | 's'));
    let (node_fields, option_field) = if fields.len() % 2 == 1 && is_option_token(fields.last().unwrap()) {
        (&fields[..fields.len() - 1], Some(fields.last().unwrap().as_str()))
    } else {
        (&fields[..], None)
    };
    if node_fields.len() < 2 || node_fields.len() % 2 != 0 {
        diags.error(line_no, SECTION, module_name, "expected an even number of wheel node ids");
        return;
    }

    let mut wheels = Vec::new();
    for pair in node_fields.chunks(2) {
        let left = parse_node_id(&pair[0], line_no, SECTION, module_name, diags);
        let right = parse_node_id(&pair[1], line_no, SECTION, module_name, diags);
        wheels.push([left, right]);
    }
    if wheels.len() > 2 {
        diags.warning(line_no, SECTION, module_name, "axle names more than 2 wheel pairs, only the first 2 are used");
        wheels.truncate(2);
    }
    while wheels.len() < 2 {
        wheels.push(wheels[0].clone());
    }

    let mut options = Vec::new();
    if let Some(opt_field) = option_field {
        for c in opt_field.chars() {
            options.push(match c {
                'o' => AxleOptions::Open,
                'l' => AxleOptions::Locked,
                's' => AxleOptions::Split,
                _ => unreachable!("filtered by is_option_token"),
            });
        }
    }

    module.axles.push(Axle {
        wheels: [wheels[0].clone(), wheels[1].clone()],
        options,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_engine_with_forward_gears() {
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_engine(&mut module, "2000,3000,5000,4.1,4.2,0.1,3.5,2.1,1.4,1.0,0.8", 1, "root", &mut diags);
        assert!(diags.is_empty(), "{:?}", diags.iter().collect::<Vec<_>>());
        let engine = module.engine.unwrap();
        assert_eq!(engine.gear_ratios.len(), 5);
    }

    #[test]
    fn parses_engoption_truck_type() {
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_engoption(&mut module, "10.0,t,10000", 1, "root", &mut diags);
        let eng = module.engoption.unwrap();
        assert_eq!(eng.engine_type, EngineType::Truck);
        assert_eq!(eng.clutch_force, Some(10000.0));
    }

    #[test]
    fn antilockbrakes_parses_mode_tokens() {
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_antilockbrakes(&mut module, "5000,3,6,on,no-toggle", 1, "root", &mut diags);
        let alb = module.antilockbrakes.unwrap();
        assert!(alb.mode.contains(AlbTcMode::ON));
        assert!(alb.mode.contains(AlbTcMode::NO_TOGGLE));
    }

    #[test]
    fn axles_parses_two_wheel_pairs_with_options() {
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_axles(&mut module, "0,1,2,3,l", 1, "root", &mut diags);
        assert_eq!(module.axles.len(), 1);
        assert_eq!(module.axles[0].options, vec![AxleOptions::Locked]);
    }

    #[test]
    fn torquecurve_accepts_predefined_name() {
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_torquecurve(&mut module, "predefined(diesel)", 1, "root", &mut diags);
        assert_eq!(module.torque_curve.unwrap().predefined_func_name.as_deref(), Some("diesel"));
    }
}
