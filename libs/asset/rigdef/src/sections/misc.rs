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
//! Everything that isn't a node/beam-graph family or drivetrain section:
//! metadata directives, attachment/rope families, and the various
//! "decoration" sections (particles, flares, cameras, sound sources).
use nalgebra::Vector3;

use crate::defaults::{DefaultsStack, ManagedMaterialOptions};
use crate::error::DiagnosticList;
use crate::fields::{split_fields, split_keyword};
use crate::ids::{parse_node_id, parse_node_id_optional, parse_node_range};
use crate::module::Module;
use crate::records::{
    Airbrake, Author, Camera, CameraRail, Cinecam, CollisionBox, Contacter, ExtCamera,
    ExtCameraMode, Fileinfo, Flare2, FlareType, Fusedrag, GuiSettings, Globals, Lockgroup,
    ManagedMaterial, ManagedMaterialType, MapMode, MaterialFlareBinding, NodeCollision, Particle,
    Pistonprop, RailGroup, Ropable, Rope, Screwprop, SkeletonSettings, SlideNode,
    SlideNodeConstraints, SoundSource, SoundSource2, SoundSource2Mode, Turbojet, Turboprop2,
    VideoCamera, Wing, WingControl,
};

/// `dry_mass, cargo_mass[, material_name]`.
pub fn parse_globals(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "globals";
    let fields = split_fields(line);
    if fields.len() < 2 {
        diags.error(line_no, SECTION, module_name, "expected at least 2 fields");
        return;
    }
    let (Some(dry_mass), Some(cargo_mass)) = (fields[0].parse::<f32>().ok(), fields[1].parse::<f32>().ok()) else {
        diags.error(line_no, SECTION, module_name, "non-numeric dry_mass/cargo_mass");
        return;
    };
    module.globals = Some(Globals {
        dry_mass,
        cargo_mass,
        material_name: fields.get(2).cloned(),
    });
}

/// `author <type> <forum_id> <name> <email>` (inline directive, may repeat).
/// `name` may itself contain whitespace, so only the first two and the last
/// tokens are fixed; everything between is joined back into the name.
pub fn parse_author(module: &mut Module, rest: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "author";
    let fields = split_fields(rest);
    if fields.len() < 4 {
        diags.error(line_no, SECTION, module_name, "expected `type forum_id name... email`");
        return;
    }
    let Some(forum_account_id) = fields[1].parse::<i64>().ok() else {
        diags.error(line_no, SECTION, module_name, "non-numeric forum_id");
        return;
    };
    let email = fields.last().unwrap().clone();
    let name = fields[2..fields.len() - 1].join(" ");
    module.authors.push(Author {
        kind: fields[0].clone(),
        forum_account_id,
        name,
        email,
    });
}

/// `fileinfo <unique_id>[, category_id[, file_version]]` (inline).
pub fn parse_fileinfo(module: &mut Module, rest: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "fileinfo";
    let fields = split_fields(rest);
    if fields.is_empty() {
        diags.error(line_no, SECTION, module_name, "expected at least a unique_id");
        return;
    }
    module.fileinfo = Some(Fileinfo {
        unique_id: fields[0].clone(),
        category_id: fields.get(1).and_then(|f| f.parse::<i32>().ok()).unwrap_or(-1),
        file_version: fields.get(2).and_then(|f| f.parse::<i32>().ok()).unwrap_or(1),
    });
}

/// `guisettings <key> <value...>` (repeatable key/value inline directive).
pub fn parse_guisettings(module: &mut Module, rest: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "guisettings";
    let (key, value) = split_keyword(rest);
    if key.is_empty() {
        diags.error(line_no, SECTION, module_name, "expected a key");
        return;
    }
    let gui = module.gui_settings.get_or_insert_with(GuiSettings::default);
    match key {
        "tachoMaterial" => gui.tacho_material = Some(value.to_string()),
        "speedoMaterial" => gui.speedo_material = Some(value.to_string()),
        "speedoMax" => {
            gui.speedo_highest_kph = value.parse::<f32>().unwrap_or_else(|_| {
                diags.warning(line_no, SECTION, module_name, "non-numeric speedoMax, ignoring");
                gui.speedo_highest_kph
            });
        }
        "useMaxRPM" => gui.use_max_rpm = crate::fields::parse_bool(value).unwrap_or(false),
        "helpMaterial" => gui.help_material = Some(value.to_string()),
        "interactiveOverviewMap" => {
            gui.map_mode = Some(match value {
                "off" => MapMode::Off,
                "simple" => MapMode::Simple,
                "zoom" => MapMode::Zoom,
                other => {
                    diags.warning(line_no, SECTION, module_name, format!("unknown map mode `{other}`"));
                    MapMode::Off
                }
            });
        }
        "dashboard" => gui.dashboard_layouts.push(value.to_string()),
        "rtt_dashboard" => gui.rtt_dashboard_layouts.push(value.to_string()),
        other => diags.warning(line_no, SECTION, module_name, format!("unknown guisettings key `{other}` ignored")),
    }
}

/// `minimass <value>` (inline) - minimum per-node mass clamp.
pub fn parse_minimass(module: &mut Module, rest: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "minimass";
    let fields = split_fields(rest);
    let Some(value) = fields.first().and_then(|f| f.parse::<f32>().ok()) else {
        diags.error(line_no, SECTION, module_name, "expected a numeric value");
        return;
    };
    module.minimum_mass = Some(value);
}

/// `name, type[, doublesided] diffuse[, damaged[, specular]]`.
pub fn parse_managedmaterial(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "managedmaterials";
    let fields = split_fields(line);
    if fields.len() < 3 {
        diags.error(line_no, SECTION, module_name, "expected at least `name, type, diffuse`");
        return;
    }
    let kind = match fields[1].as_str() {
        "flexmesh_standard" => ManagedMaterialType::FlexmeshStandard,
        "flexmesh_transparent" => ManagedMaterialType::Transparent,
        "mesh_standard" => ManagedMaterialType::MeshStandard,
        "mesh_transparent" => ManagedMaterialType::MeshTransparent,
        other => {
            diags.error(line_no, SECTION, module_name, format!("unknown managed material type `{other}`"));
            return;
        }
    };

    let mut idx = 2;
    let mut double_sided = ManagedMaterialOptions::default().double_sided;
    if let Some(flag) = crate::fields::parse_bool(&fields[idx]) {
        double_sided = flag;
        idx += 1;
    }
    let Some(diffuse_map) = fields.get(idx).cloned() else {
        diags.error(line_no, SECTION, module_name, "expected a diffuse map name");
        return;
    };
    idx += 1;

    module.managed_materials.push(ManagedMaterial {
        name: fields[0].clone(),
        kind,
        double_sided,
        diffuse_map,
        damaged_diffuse_map: fields.get(idx).cloned(),
        specular_map: fields.get(idx + 1).cloned(),
    });
}

/// `flare_number, material_name`.
pub fn parse_materialflarebinding(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "materialflarebindings";
    let fields = split_fields(line);
    if fields.len() < 2 {
        diags.error(line_no, SECTION, module_name, "expected 2 fields");
        return;
    }
    let Some(flare_number) = fields[0].parse::<i32>().ok() else {
        diags.error(line_no, SECTION, module_name, "non-numeric flare_number");
        return;
    };
    module.material_flare_bindings.push(MaterialFlareBinding {
        flare_number,
        material_name: fields[1].clone(),
    });
}

/// `node, radius`.
pub fn parse_nodecollision(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "nodecollision";
    let fields = split_fields(line);
    if fields.len() < 2 {
        diags.error(line_no, SECTION, module_name, "expected 2 fields");
        return;
    }
    let node = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let Some(radius) = fields[1].parse::<f32>().ok() else {
        diags.error(line_no, SECTION, module_name, "non-numeric radius");
        return;
    };
    module.node_collisions.push(NodeCollision { node, radius });
}

/// `emitter_node, reference_node, particle_system_name`.
pub fn parse_particle(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "particles";
    let fields = split_fields(line);
    if fields.len() < 3 {
        diags.error(line_no, SECTION, module_name, "expected 3 fields");
        return;
    }
    let emitter_node = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let reference_node = parse_node_id(&fields[1], line_no, SECTION, module_name, diags);
    module.particles.push(Particle {
        emitter_node,
        reference_node,
        particle_system_name: fields[2].clone(),
    });
}

/// `ref, axis, blade1..4, couple_node, turbine_power_kw, pitch, airfoil`.
pub fn parse_pistonprop(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "pistonprops";
    let fields = split_fields(line);
    if fields.len() < 10 {
        diags.error(line_no, SECTION, module_name, "expected at least 10 fields");
        return;
    }
    let reference_node = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let axis_node = parse_node_id(&fields[1], line_no, SECTION, module_name, diags);
    let blade_tip_nodes = [
        parse_node_id(&fields[2], line_no, SECTION, module_name, diags),
        parse_node_id(&fields[3], line_no, SECTION, module_name, diags),
        parse_node_id(&fields[4], line_no, SECTION, module_name, diags),
        parse_node_id(&fields[5], line_no, SECTION, module_name, diags),
    ];
    let couple_node = parse_node_id_optional(&fields[6], line_no, SECTION, module_name, diags);
    let (Some(turbine_power_kw), Some(pitch)) = (fields[7].parse::<f32>().ok(), fields[8].parse::<f32>().ok()) else {
        diags.error(line_no, SECTION, module_name, "non-numeric turbine_power_kw/pitch");
        return;
    };
    module.pistonprops.push(Pistonprop {
        reference_node,
        axis_node,
        blade_tip_nodes,
        couple_node,
        turbine_power_kw,
        pitch,
        airfoil: fields[9].clone(),
    });
}

/// `id, node_range...`.
pub fn parse_railgroup(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "railgroups";
    let fields = split_fields(line);
    if fields.len() < 2 {
        diags.error(line_no, SECTION, module_name, "expected an id and at least one node range");
        return;
    }
    let Some(id) = fields[0].parse::<i32>().ok() else {
        diags.error(line_no, SECTION, module_name, "non-numeric id");
        return;
    };
    let node_list = fields[1..]
        .iter()
        .map(|t| parse_node_range(t, line_no, SECTION, module_name, diags))
        .collect();
    module.railgroups.push(RailGroup { id, node_list });
}

/// `node[, group[, multilock]]`.
pub fn parse_ropable(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "ropables";
    let fields = split_fields(line);
    if fields.is_empty() {
        diags.error(line_no, SECTION, module_name, "expected at least a node");
        return;
    }
    let node = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let group = fields.get(1).and_then(|f| f.parse::<i32>().ok()).unwrap_or(Ropable::DEFAULT_GROUP);
    let multilock = fields.get(2).and_then(|f| crate::fields::parse_bool(f)).unwrap_or(false);
    module.ropables.push(Ropable { node, group, multilock });
}

/// `root_node, end_node[, invisible]`.
pub fn parse_rope(module: &mut Module, defaults: &crate::defaults::DefaultsStack, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "ropes";
    let fields = split_fields(line);
    if fields.len() < 2 {
        diags.error(line_no, SECTION, module_name, "expected at least 2 fields");
        return;
    }
    let root_node = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let end_node = parse_node_id(&fields[1], line_no, SECTION, module_name, diags);
    let invisible = fields.get(2).and_then(|f| crate::fields::parse_bool(f)).unwrap_or(false);
    module.ropes.push(Rope {
        root_node,
        end_node,
        invisible,
        beam_defaults: defaults.beam_defaults.clone(),
        detacher_group: defaults.detacher_group,
    });
}

/// `prop_node, back_node, top_node, power`.
pub fn parse_screwprop(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "screwprops";
    let fields = split_fields(line);
    if fields.len() < 4 {
        diags.error(line_no, SECTION, module_name, "expected 4 fields");
        return;
    }
    let prop_node = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let back_node = parse_node_id(&fields[1], line_no, SECTION, module_name, diags);
    let top_node = parse_node_id(&fields[2], line_no, SECTION, module_name, diags);
    let Some(power) = fields[3].parse::<f32>().ok() else {
        diags.error(line_no, SECTION, module_name, "non-numeric power");
        return;
    };
    module.screwprops.push(Screwprop { prop_node, back_node, top_node, power });
}

/// `slide_node, rail_node_range...[, spring_rate[, break_force[, tolerance[,
///  railgroup_id[, attachment_rate[, max_attachment_distance[,
///  constraint_flags]]]]]]]`. The rail-range list is terminated by the first
/// field that doesn't parse as a node range with a trailing numeric option,
/// which in practice means: everything up to the first pure-numeric field
/// that is also followed only by further numeric/flag fields is a rail node.
/// Since every rail node or range token and every trailing numeric field can
/// both look like bare numbers, the grammar instead fixes the trailing field
/// count at 6 and treats everything before that as rail ranges.
pub fn parse_slidenode(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "slidenodes";
    let fields = split_fields(line);
    if fields.len() < 2 {
        diags.error(line_no, SECTION, module_name, "expected a slide_node and at least one rail node range");
        return;
    }
    let slide_node = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);

    const MAX_TRAILING: usize = 7;
    let trailing_count = fields.len().saturating_sub(1).min(MAX_TRAILING);
    let rail_end = fields.len() - trailing_count;
    let rail_node_ranges = fields[1..rail_end]
        .iter()
        .map(|t| parse_node_range(t, line_no, SECTION, module_name, diags))
        .collect();
    let trailing = &fields[rail_end..];

    let spring_rate = trailing.first().and_then(|f| f.parse::<f32>().ok()).unwrap_or(9_000_000.0);
    let break_force = trailing.get(1).and_then(|f| f.parse::<f32>().ok());
    let tolerance = trailing.get(2).and_then(|f| f.parse::<f32>().ok()).unwrap_or(0.15);
    let railgroup_id = trailing.get(3).and_then(|f| f.parse::<i32>().ok());
    let attachment_rate = trailing.get(4).and_then(|f| f.parse::<f32>().ok()).unwrap_or(1.0);
    let max_attachment_distance = trailing.get(5).and_then(|f| f.parse::<f32>().ok()).unwrap_or(0.1);
    let mut constraint_flags = SlideNodeConstraints::empty();
    if let Some(flags_field) = trailing.get(6) {
        for c in flags_field.chars() {
            let flag = match c {
                'a' => Some(SlideNodeConstraints::ATTACH_ALL),
                'f' => Some(SlideNodeConstraints::ATTACH_FOREIGN),
                's' => Some(SlideNodeConstraints::ATTACH_SELF),
                'n' => Some(SlideNodeConstraints::ATTACH_NONE),
                _ if !c.is_whitespace() => {
                    diags.warning(line_no, SECTION, module_name, format!("unknown constraint flag `{c}` ignored"));
                    None
                }
                _ => None,
            };
            if let Some(flag) = flag {
                constraint_flags.insert(flag);
            }
        }
    }

    module.slidenodes.push(SlideNode {
        slide_node,
        rail_node_ranges,
        spring_rate,
        break_force,
        tolerance,
        railgroup_id,
        attachment_rate,
        max_attachment_distance,
        constraint_flags,
    });
}

/// `node, sound_script_name`.
pub fn parse_soundsource(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "soundsources";
    let fields = split_fields(line);
    if fields.len() < 2 {
        diags.error(line_no, SECTION, module_name, "expected 2 fields");
        return;
    }
    let node = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    module.sound_sources.push(SoundSource {
        node,
        sound_script_name: fields[1].clone(),
    });
}

/// `node, mode, sound_script_name`. `mode` is numeric: `-2` always, `-1`
/// outside, `0..` a cinecam index. Non-decimal input parses as `0` with a
/// warning rather than rejecting the record.
pub fn parse_soundsource2(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "soundsources2";
    let fields = split_fields(line);
    if fields.len() < 3 {
        diags.error(line_no, SECTION, module_name, "expected 3 fields");
        return;
    }
    let node = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let mode_value = fields[1].parse::<i32>().unwrap_or_else(|_| {
        diags.warning(line_no, SECTION, module_name, format!("non-numeric mode `{}`, defaulting to 0", fields[1]));
        0
    });
    let mode = match mode_value {
        -2 => SoundSource2Mode::Always,
        -1 => SoundSource2Mode::Outside,
        n => SoundSource2Mode::Cinecam(n),
    };
    module.sound_sources2.push(SoundSource2 {
        base: SoundSource {
            node,
            sound_script_name: fields[2].clone(),
        },
        mode,
    });
}

/// `front, back, side, is_reversable, dry_thrust, wet_thrust,
///  front_diameter, back_diameter, nozzle_length`.
pub fn parse_turbojet(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "turbojets";
    let fields = split_fields(line);
    if fields.len() < 9 {
        diags.error(line_no, SECTION, module_name, "expected 9 fields");
        return;
    }
    let front_node = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let back_node = parse_node_id(&fields[1], line_no, SECTION, module_name, diags);
    let side_node = parse_node_id(&fields[2], line_no, SECTION, module_name, diags);
    let Some(is_reversable) = crate::fields::parse_bool(&fields[3]) else {
        diags.error(line_no, SECTION, module_name, "non-boolean is_reversable");
        return;
    };
    let mut nums = [0f32; 5];
    for (i, field) in fields[4..9].iter().enumerate() {
        match field.parse::<f32>() {
            Ok(v) => nums[i] = v,
            Err(_) => {
                diags.error(line_no, SECTION, module_name, format!("non-numeric field {i}"));
                return;
            }
        }
    }
    module.turbojets.push(Turbojet {
        front_node,
        back_node,
        side_node,
        is_reversable,
        dry_thrust: nums[0],
        wet_thrust: nums[1],
        front_diameter: nums[2],
        back_diameter: nums[3],
        nozzle_length: nums[4],
    });
}

/// `ref, axis, blade1..4, turbine_power_kw, airfoil[, couple_node]`.
pub fn parse_turboprop2(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "turboprops2";
    let fields = split_fields(line);
    if fields.len() < 8 {
        diags.error(line_no, SECTION, module_name, "expected at least 8 fields");
        return;
    }
    let reference_node = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let axis_node = parse_node_id(&fields[1], line_no, SECTION, module_name, diags);
    let blade_tip_nodes = [
        parse_node_id(&fields[2], line_no, SECTION, module_name, diags),
        parse_node_id(&fields[3], line_no, SECTION, module_name, diags),
        parse_node_id(&fields[4], line_no, SECTION, module_name, diags),
        parse_node_id(&fields[5], line_no, SECTION, module_name, diags),
    ];
    let Some(turbine_power_kw) = fields[6].parse::<f32>().ok() else {
        diags.error(line_no, SECTION, module_name, "non-numeric turbine_power_kw");
        return;
    };
    let couple_node = fields.get(8).and_then(|f| parse_node_id_optional(f, line_no, SECTION, module_name, diags));
    module.turboprops2.push(Turboprop2 {
        reference_node,
        axis_node,
        blade_tip_nodes,
        turbine_power_kw,
        airfoil: fields[7].clone(),
        couple_node,
    });
}

/// `ref, left, bottom, alt_ref, alt_orientation, offset.xyz, rotation.xyz,
///  fov, tex_w, tex_h, min_clip, max_clip, camera_role, camera_mode,
///  material_name[, camera_name]`.
pub fn parse_videocamera(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "videocameras";
    let fields = split_fields(line);
    if fields.len() < 19 {
        diags.error(line_no, SECTION, module_name, "expected at least 19 fields");
        return;
    }
    let reference_node = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let left_node = parse_node_id(&fields[1], line_no, SECTION, module_name, diags);
    let bottom_node = parse_node_id(&fields[2], line_no, SECTION, module_name, diags);
    let alt_reference_node = parse_node_id_optional(&fields[3], line_no, SECTION, module_name, diags);
    let alt_orientation_node = parse_node_id_optional(&fields[4], line_no, SECTION, module_name, diags);
    let mut nums = [0f32; 10];
    for (i, field) in fields[5..15].iter().enumerate() {
        match field.parse::<f32>() {
            Ok(v) => nums[i] = v,
            Err(_) => {
                diags.error(line_no, SECTION, module_name, format!("non-numeric field {i}"));
                return;
            }
        }
    }
    let (Some(texture_width), Some(texture_height), Some(camera_role), Some(camera_mode)) = (
        fields[15].parse::<i32>().ok(),
        fields[16].parse::<i32>().ok(),
        fields[17].parse::<i32>().ok(),
        fields[18].parse::<i32>().ok(),
    ) else {
        diags.error(line_no, SECTION, module_name, "non-numeric tex_w/tex_h/camera_role/camera_mode");
        return;
    };
    let Some(material_name) = fields.get(19).cloned() else {
        diags.error(line_no, SECTION, module_name, "expected a material_name");
        return;
    };

    module.videocameras.push(VideoCamera {
        reference_node,
        left_node,
        bottom_node,
        alt_reference_node,
        alt_orientation_node,
        offset: Vector3::new(nums[0], nums[1], nums[2]),
        rotation: Vector3::new(nums[3], nums[4], nums[5]),
        field_of_view: nums[6],
        texture_width,
        texture_height,
        min_clip_distance: nums[7],
        max_clip_distance: nums[8],
        camera_role,
        camera_mode,
        material_name,
        camera_name: fields.get(20).cloned(),
    });
}

fn wing_control_from(c: char) -> Option<WingControl> {
    Some(match c {
        'n' => WingControl::Normal,
        'a' => WingControl::FlapAilerons,
        'b' => WingControl::Brakes,
        'f' => WingControl::Flap,
        'e' => WingControl::Elevator,
        'r' => WingControl::Rudder,
        'S' => WingControl::SpoilerLeft,
        's' => WingControl::SpoilerRight,
        'c' => WingControl::ElevatorAilerons,
        'g' => WingControl::Gear,
        'U' => WingControl::UndefinedLeft,
        'u' => WingControl::UndefinedRight,
        'i' => WingControl::SpoilerLeftControllable,
        'o' => WingControl::SpoilerRightControllable,
        'd' => WingControl::DiggingAilerons,
        'w' => WingControl::StabilatorLeft,
        _ => return None,
    })
}

/// `n1..n8, tex_coord.x1 y1 x2 y2 x3 y3 x4 y4, control_surface, chord_point,
///  min_deflection, max_deflection, airfoil[, efficiency_coef]`.
pub fn parse_wing(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "wings";
    let fields = split_fields(line);
    if fields.len() < 17 {
        diags.error(line_no, SECTION, module_name, "expected at least 17 fields");
        return;
    }
    let nodes = [
        parse_node_id(&fields[0], line_no, SECTION, module_name, diags),
        parse_node_id(&fields[1], line_no, SECTION, module_name, diags),
        parse_node_id(&fields[2], line_no, SECTION, module_name, diags),
        parse_node_id(&fields[3], line_no, SECTION, module_name, diags),
        parse_node_id(&fields[4], line_no, SECTION, module_name, diags),
        parse_node_id(&fields[5], line_no, SECTION, module_name, diags),
        parse_node_id(&fields[6], line_no, SECTION, module_name, diags),
        parse_node_id(&fields[7], line_no, SECTION, module_name, diags),
    ];
    let mut tex = [0f32; 8];
    for (i, field) in fields[8..16].iter().enumerate() {
        match field.parse::<f32>() {
            Ok(v) => tex[i] = v,
            Err(_) => {
                diags.error(line_no, SECTION, module_name, format!("non-numeric tex coord {i}"));
                return;
            }
        }
    }
    let Some(control_surface) = fields[16].chars().next().and_then(wing_control_from) else {
        diags.error(line_no, SECTION, module_name, "unknown control_surface letter");
        return;
    };
    let chord_point = fields.get(17).and_then(|f| f.parse::<f32>().ok()).unwrap_or(0.5);
    let min_deflection = fields.get(18).and_then(|f| f.parse::<f32>().ok()).unwrap_or(-80.0);
    let max_deflection = fields.get(19).and_then(|f| f.parse::<f32>().ok()).unwrap_or(80.0);
    let airfoil = fields.get(20).cloned().unwrap_or_else(|| "NACA0009".to_string());
    let efficiency_coef = fields.get(21).and_then(|f| f.parse::<f32>().ok()).unwrap_or(1.0);

    module.wings.push(Wing {
        nodes,
        tex_coords: [(tex[0], tex[1]), (tex[2], tex[3]), (tex[4], tex[5]), (tex[6], tex[7])],
        control_surface,
        chord_point,
        min_deflection,
        max_deflection,
        airfoil,
        efficiency_coef,
    });
}

/// `autocalc | front_node, rear_node, approximate_width, airfoil[, area_coefficient]`.
pub fn parse_fusedrag(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "fusedrag";
    let fields = split_fields(line);
    if fields.first().map(String::as_str) == Some("autocalc") {
        module.fusedrag = Some(Fusedrag::AutoCalc);
        return;
    }
    if fields.len() < 4 {
        diags.error(line_no, SECTION, module_name, "expected `autocalc` or 4+ fields");
        return;
    }
    let front_node = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let rear_node = parse_node_id(&fields[1], line_no, SECTION, module_name, diags);
    let Some(approximate_width) = fields[2].parse::<f32>().ok() else {
        diags.error(line_no, SECTION, module_name, "non-numeric approximate_width");
        return;
    };
    module.fusedrag = Some(Fusedrag::Explicit {
        front_node,
        rear_node,
        approximate_width,
        airfoil_name: fields[3].clone(),
        area_coefficient: fields.get(4).and_then(|f| f.parse::<f32>().ok()).unwrap_or(1.0),
    });
}

/// `center_node, back_node, left_node`.
pub fn parse_camera(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "cameras";
    let fields = split_fields(line);
    if fields.len() < 3 {
        diags.error(line_no, SECTION, module_name, "expected 3 fields");
        return;
    }
    let center_node = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let back_node = parse_node_id(&fields[1], line_no, SECTION, module_name, diags);
    let left_node = parse_node_id(&fields[2], line_no, SECTION, module_name, diags);
    module.cameras.push(Camera { center_node, back_node, left_node });
}

/// A bare `camerarail` keyword starts a new rail; subsequent node lines
/// append to the most recently opened one.
pub fn start_camerarail(module: &mut Module) {
    module.camera_rails.push(CameraRail::default());
}

/// A node line within the current `camerarails` block.
pub fn parse_camerarail_node(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "camerarails";
    let fields = split_fields(line);
    let Some(first) = fields.first() else {
        diags.error(line_no, SECTION, module_name, "expected a node id");
        return;
    };
    let node = parse_node_id(first, line_no, SECTION, module_name, diags);
    if module.camera_rails.is_empty() {
        module.camera_rails.push(CameraRail::default());
    }
    module.camera_rails.last_mut().unwrap().nodes.push(node);
}

/// A node line within the current `collisionboxes` block; every node named
/// across the section accumulates into a single box (spec.md §4.3).
pub fn parse_collisionbox_node(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "collisionboxes";
    let fields = split_fields(line);
    if module.collision_boxes.is_empty() {
        module.collision_boxes.push(CollisionBox::default());
    }
    let boxx = module.collision_boxes.last_mut().unwrap();
    for field in &fields {
        boxx.nodes.push(parse_node_id(field, line_no, SECTION, module_name, diags));
    }
}

/// `ref, x_axis, y_axis, additional_node, offset.xyz, width, height,
///  max_inclination_angle, tex_x1, tex_x2, tex_y1, tex_y2[, lift_coefficient]`.
pub fn parse_airbrake(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "airbrakes";
    let fields = split_fields(line);
    if fields.len() < 12 {
        diags.error(line_no, SECTION, module_name, "expected at least 12 fields");
        return;
    }
    let reference_node = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let x_axis_node = parse_node_id(&fields[1], line_no, SECTION, module_name, diags);
    let y_axis_node = parse_node_id(&fields[2], line_no, SECTION, module_name, diags);
    let additional_node = parse_node_id(&fields[3], line_no, SECTION, module_name, diags);
    let mut nums = [0f32; 8];
    for (i, field) in fields[4..12].iter().enumerate() {
        match field.parse::<f32>() {
            Ok(v) => nums[i] = v,
            Err(_) => {
                diags.error(line_no, SECTION, module_name, format!("non-numeric field {i}"));
                return;
            }
        }
    }
    module.airbrakes.push(Airbrake {
        reference_node,
        x_axis_node,
        y_axis_node,
        additional_node,
        offset: Vector3::new(nums[0], nums[1], nums[2]),
        width: nums[3],
        height: nums[4],
        max_inclination_angle: nums[5],
        texcoord_x1: nums[6],
        texcoord_x2: nums[7],
        texcoord_y1: fields.get(12).and_then(|f| f.parse::<f32>().ok()).unwrap_or(0.0),
        texcoord_y2: fields.get(13).and_then(|f| f.parse::<f32>().ok()).unwrap_or(1.0),
        lift_coefficient: fields.get(14).and_then(|f| f.parse::<f32>().ok()).unwrap_or(1.0),
    });
}

/// `classic|cinecam|node [node_id]` (inline, single record).
pub fn parse_extcamera(module: &mut Module, rest: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "extcamera";
    let fields = split_fields(rest);
    let Some(mode_word) = fields.first() else {
        diags.error(line_no, SECTION, module_name, "expected a mode keyword");
        return;
    };
    let mode = match mode_word.as_str() {
        "classic" => ExtCameraMode::Classic,
        "cinecam" => ExtCameraMode::Cinecam,
        "node" => ExtCameraMode::Node,
        other => {
            diags.error(line_no, SECTION, module_name, format!("unknown extcamera mode `{other}`"));
            return;
        }
    };
    let node = fields.get(1).map(|f| parse_node_id(f, line_no, SECTION, module_name, diags));
    module.ext_camera = Some(ExtCamera { mode, node });
}

/// `set_skeleton_settings visibility_range_meters[, beam_thickness_meters]`.
pub fn parse_skeleton_settings(module: &mut Module, rest: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "set_skeleton_settings";
    let fields = split_fields(rest);
    let base = SkeletonSettings::default();
    let Some(visibility_range_meters) = fields.first().and_then(|f| f.parse::<f32>().ok()) else {
        diags.error(line_no, SECTION, module_name, "expected a numeric visibility_range_meters");
        return;
    };
    let beam_thickness_meters = fields.get(1).and_then(|f| f.parse::<f32>().ok()).unwrap_or(base.beam_thickness_meters);
    module.skeleton_settings = Some(SkeletonSettings { visibility_range_meters, beam_thickness_meters });
}

/// `ref, x, y, offset.xyz, type, control_number, blink_delay_ms, size[, material_name]`.
pub fn parse_flare2(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "flares2";
    let fields = split_fields(line);
    if fields.len() < 10 {
        diags.error(line_no, SECTION, module_name, "expected at least 10 fields");
        return;
    }
    let reference_node = parse_node_id(&fields[0], line_no, SECTION, module_name, diags);
    let (Some(x), Some(y)) = (fields[1].parse::<f32>().ok(), fields[2].parse::<f32>().ok()) else {
        diags.error(line_no, SECTION, module_name, "non-numeric x/y");
        return;
    };
    let mut offs = [0f32; 3];
    for (i, field) in fields[3..6].iter().enumerate() {
        match field.parse::<f32>() {
            Ok(v) => offs[i] = v,
            Err(_) => {
                diags.error(line_no, SECTION, module_name, format!("non-numeric offset field {i}"));
                return;
            }
        }
    }
    let kind = match fields[6].as_str() {
        "f" => FlareType::Headlight,
        "b" => FlareType::Brakelight,
        "l" => FlareType::LeftBlinker,
        "r" => FlareType::RightBlinker,
        "R" => FlareType::ReverseLight,
        "u" => FlareType::User,
        other => {
            diags.error(line_no, SECTION, module_name, format!("unknown flare type `{other}`"));
            return;
        }
    };
    let (Some(control_number), Some(blink_delay_milis)) =
        (fields[7].parse::<i32>().ok(), fields[8].parse::<i32>().ok())
    else {
        diags.error(line_no, SECTION, module_name, "non-numeric control_number/blink_delay");
        return;
    };
    let Some(size) = fields[9].parse::<f32>().ok() else {
        diags.error(line_no, SECTION, module_name, "non-numeric size");
        return;
    };
    module.flares2.push(Flare2 {
        reference_node,
        x,
        y,
        offset: Vector3::new(offs[0], offs[1], offs[2]),
        kind,
        control_number,
        blink_delay_milis,
        size,
        material_name: fields.get(10).cloned(),
    });
}

/// One bare node id per line.
pub fn parse_contacter(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "contacters";
    let fields = split_fields(line);
    let Some(first) = fields.first() else {
        diags.error(line_no, SECTION, module_name, "expected a node id");
        return;
    };
    let node = parse_node_id(first, line_no, SECTION, module_name, diags);
    module.contacter_nodes.push(Contacter { node });
}

/// `lockgroup_number, node...`.
pub fn parse_lockgroup(module: &mut Module, line: &str, line_no: usize, module_name: &str, diags: &mut DiagnosticList) {
    const SECTION: &str = "lockgroups";
    let fields = split_fields(line);
    if fields.len() < 2 {
        diags.error(line_no, SECTION, module_name, "expected a lockgroup number and at least one node");
        return;
    }
    let Some(number) = fields[0].parse::<i32>().ok() else {
        diags.error(line_no, SECTION, module_name, "non-numeric lockgroup number");
        return;
    };
    let nodes = fields[1..]
        .iter()
        .map(|f| parse_node_id(f, line_no, SECTION, module_name, diags))
        .collect();
    module.lockgroups.push(Lockgroup { number, nodes });
}

/// `x, y, z, n1..n8, spring, damping` — a virtual camera node spring-linked
/// to eight existing nodes. The rig builder is responsible for synthesizing
/// the actual node; this just records the placement and linkage.
pub fn parse_cinecam(
    module: &mut Module,
    defaults: &DefaultsStack,
    line: &str,
    line_no: usize,
    module_name: &str,
    diags: &mut DiagnosticList,
) {
    const SECTION: &str = "cinecam";
    let fields = split_fields(line);
    if fields.len() < 13 {
        diags.error(line_no, SECTION, module_name, "expected at least 13 fields");
        return;
    }
    let mut position = [0f32; 3];
    for (i, field) in fields[0..3].iter().enumerate() {
        match field.parse::<f32>() {
            Ok(v) => position[i] = v,
            Err(_) => {
                diags.error(line_no, SECTION, module_name, format!("non-numeric position field {i}"));
                return;
            }
        }
    }
    let nodes = [
        parse_node_id(&fields[3], line_no, SECTION, module_name, diags),
        parse_node_id(&fields[4], line_no, SECTION, module_name, diags),
        parse_node_id(&fields[5], line_no, SECTION, module_name, diags),
        parse_node_id(&fields[6], line_no, SECTION, module_name, diags),
        parse_node_id(&fields[7], line_no, SECTION, module_name, diags),
        parse_node_id(&fields[8], line_no, SECTION, module_name, diags),
        parse_node_id(&fields[9], line_no, SECTION, module_name, diags),
        parse_node_id(&fields[10], line_no, SECTION, module_name, diags),
    ];
    let (Some(spring), Some(damping)) = (fields[11].parse::<f32>().ok(), fields[12].parse::<f32>().ok())
    else {
        diags.error(line_no, SECTION, module_name, "non-numeric spring/damping");
        return;
    };
    module.cinecams.push(Cinecam {
        position: Vector3::new(position[0], position[1], position[2]),
        nodes,
        spring,
        damping,
        node_defaults: defaults.node_defaults.clone(),
        beam_defaults: defaults.beam_defaults.clone(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn globals_parses_optional_material() {
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_globals(&mut module, "5000, 0, tracks/black", 1, "root", &mut diags);
        assert_eq!(module.globals.as_ref().unwrap().material_name.as_deref(), Some("tracks/black"));
    }

    #[test]
    fn author_joins_multiword_name() {
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_author(&mut module, "curator 1234 Jane Q Public jane@example.com", 1, "root", &mut diags);
        assert_eq!(module.authors[0].name, "Jane Q Public");
        assert_eq!(module.authors[0].email, "jane@example.com");
    }

    #[test]
    fn guisettings_accumulates_dashboard_layouts() {
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_guisettings(&mut module, "dashboard default.layout", 1, "root", &mut diags);
        parse_guisettings(&mut module, "dashboard night.layout", 2, "root", &mut diags);
        assert_eq!(module.gui_settings.unwrap().dashboard_layouts.len(), 2);
    }

    #[test]
    fn managedmaterials_detects_doublesided_flag() {
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_managedmaterial(&mut module, "chrome, mesh_standard, 1, chrome.dds", 1, "root", &mut diags);
        let mat = &module.managed_materials[0];
        assert!(mat.double_sided);
        assert_eq!(mat.diffuse_map, "chrome.dds");
    }

    #[test]
    fn soundsource2_defaults_nondecimal_mode_to_zero_with_warning() {
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_soundsource2(&mut module, "0, always, engine.sound", 1, "root", &mut diags);
        assert_eq!(module.sound_sources2[0].mode, SoundSource2Mode::Cinecam(0));
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn slidenodes_parses_ranges_and_trailing_fields() {
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_slidenode(&mut module, "0, 1-5, 10, 9000000, 100000, 0.2, 1, 1.0, 0.1, a", 1, "root", &mut diags);
        assert_eq!(module.slidenodes.len(), 1);
        assert_eq!(module.slidenodes[0].rail_node_ranges.len(), 2);
        assert!(module.slidenodes[0].constraint_flags.contains(SlideNodeConstraints::ATTACH_ALL));
    }

    #[test]
    fn fusedrag_autocalc_sets_variant() {
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_fusedrag(&mut module, "autocalc", 1, "root", &mut diags);
        assert!(matches!(module.fusedrag, Some(Fusedrag::AutoCalc)));
    }

    #[test]
    fn collisionboxes_accumulate_across_lines() {
        let mut module = Module::new("root");
        let mut diags = DiagnosticList::new();
        parse_collisionbox_node(&mut module, "0, 1, 2", 1, "root", &mut diags);
        parse_collisionbox_node(&mut module, "3, 4", 2, "root", &mut diags);
        assert_eq!(module.collision_boxes[0].nodes.len(), 5);
    }
}
