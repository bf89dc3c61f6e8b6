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
//! Parses a rig-def file into a [`ModuleRegistry`]: a `root` [`Module`] plus
//! zero or more named `section ... end_section` modules. Callers select which
//! named modules to merge with root at build time; that selection is the
//! `rig_builder` crate's job, not this one's.
//!
//! The driver below is a line classifier, not a grammar: each scanned line is
//! matched against a keyword table (inline directives first, then section
//! keywords, longest/most-specific match wins). A keyword line switches the
//! "active section" the parser is in; every line that isn't itself a
//! recognized keyword is handed to whichever per-line parser the active
//! section names.
pub mod defaults;
pub mod error;
pub mod fields;
pub mod ids;
pub mod module;
pub mod records;
pub mod scanner;
pub mod sections;

use std::rc::Rc;

use defaults::{DefaultsStack, Inertia, ManagedMaterialOptions, NodeDefaults};
use error::DiagnosticList;
use fields::split_keyword;
use module::{Module, ModuleRegistry, ROOT_MODULE};
use scanner::Scanner;

/// The result of parsing a rig-def file: every module the file defined (the
/// synthetic `root` plus any named `section` blocks), and every diagnostic
/// raised along the way.
#[derive(Debug, Clone)]
pub struct File {
    pub modules: ModuleRegistry,
    pub diagnostics: DiagnosticList,
}

impl File {
    pub fn root(&self) -> &Module {
        self.modules.root()
    }
}

/// Which record family the lines following the most recent section keyword
/// belong to. `None` means "outside any section" -- a stray data line there
/// is ignored with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveSection {
    None,
    Description,
    Nodes,
    Beams,
    Cinecam,
    Shocks,
    Shocks2,
    Commands,
    Commands2,
    Ties,
    Animators,
    Hydros,
    Wheels,
    Wheels2,
    MeshWheels,
    MeshWheels2,
    FlexBodyWheels,
    Rotators,
    Rotators2,
    Triggers,
    Hooks,
    Props,
    Flexbodies,
    Submesh,
    Globals,
    ManagedMaterials,
    MaterialFlareBindings,
    NodeCollision,
    Particles,
    Pistonprops,
    RailGroups,
    Ropables,
    Ropes,
    Screwprops,
    SlideNodes,
    SoundSources,
    SoundSources2,
    Turbojets,
    Turboprops2,
    VideoCameras,
    Wings,
    Fusedrag,
    Cameras,
    CameraRails,
    CollisionBoxes,
    Airbrakes,
    Flares2,
    Contacters,
    Lockgroups,
    Axles,
    AntiLockBrakes,
    TractionControl,
    Engine,
    Engoption,
    Brakes,
    TorqueCurve,
}

/// Which half of a `submesh` block is currently accumulating lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubmeshPart {
    None,
    Texcoords,
    Cab,
}

/// Whether the very next scanned line is the `forset` half of a two-line
/// flexbody record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlexbodyPending {
    No,
    AwaitingForset,
}

struct ParseState {
    defaults: DefaultsStack,
    current_module: String,
    active: ActiveSection,
    submesh_part: SubmeshPart,
    flexbody_pending: FlexbodyPending,
}

impl Default for ParseState {
    fn default() -> Self {
        Self {
            defaults: DefaultsStack::default(),
            current_module: ROOT_MODULE.to_string(),
            active: ActiveSection::None,
            submesh_part: SubmeshPart::None,
            flexbody_pending: FlexbodyPending::No,
        }
    }
}

/// Parses an iterator of raw (unscanned) lines into a [`File`]. Callers
/// typically get `lines` from `std::io::BufRead::lines()` with the `Result`
/// unwrapped, since a rig-def file is plain text read off local disk.
pub fn parse(lines: impl Iterator<Item = String>) -> File {
    let mut registry = ModuleRegistry::new();
    let mut diags = DiagnosticList::new();
    let mut state = ParseState::default();

    for scanned in Scanner::new(lines) {
        dispatch_line(&mut registry, &mut state, &mut diags, scanned.line_no, &scanned.text);
    }

    File {
        modules: registry,
        diagnostics: diags,
    }
}

fn dispatch_line(
    registry: &mut ModuleRegistry,
    state: &mut ParseState,
    diags: &mut DiagnosticList,
    line_no: usize,
    text: &str,
) {
    // A pending flexbody header consumes the very next line as its `forset`,
    // regardless of what keyword-like text it starts with.
    if state.flexbody_pending == FlexbodyPending::AwaitingForset {
        state.flexbody_pending = FlexbodyPending::No;
        let module_name = state.current_module.clone();
        let forset = sections::flexbody::parse_forset(text, line_no, &module_name, diags);
        let module = registry.get_or_create(&module_name);
        if let Some(body) = module.flexbodies.last_mut() {
            body.forset = forset;
        }
        return;
    }

    let (keyword, rest) = split_keyword(text);
    let module_name = state.current_module.clone();

    match keyword {
        // --- Module switching -------------------------------------------------
        "section" => {
            let fields = fields::split_fields(rest);
            let Some(name) = fields.get(1).or_else(|| fields.first()) else {
                diags.error(line_no, "section", &module_name, "expected a module name");
                return;
            };
            registry.get_or_create(name);
            state.current_module = name.clone();
            state.active = ActiveSection::None;
            return;
        }
        "end_section" => {
            state.current_module = ROOT_MODULE.to_string();
            state.active = ActiveSection::None;
            return;
        }

        // --- Defaults-stack inline directives -----------------------------------
        "set_node_defaults" => {
            let f = fields::split_fields(rest);
            let get = |i: usize, default: f32| f.get(i).and_then(|s| s.parse::<f32>().ok()).unwrap_or(default);
            let base = NodeDefaults::default();
            let mut options = defaults::NodeOptions::empty();
            if let Some(opt_field) = f.get(4) {
                for c in opt_field.chars() {
                    if let Some(flag) = defaults::NodeOptions::from_letter(c) {
                        options.insert(flag);
                    }
                }
            }
            state.defaults.node_defaults = Rc::new(NodeDefaults {
                load_weight: get(0, base.load_weight),
                friction: get(1, base.friction),
                volume: get(2, base.volume),
                surface: get(3, base.surface),
                options,
            });
            return;
        }
        "set_beam_defaults" => {
            let f = fields::split_fields(rest);
            let get = |i: usize| f.get(i).and_then(|s| s.parse::<f32>().ok()).unwrap_or(-1.0);
            let material = f.get(4).cloned();
            state.defaults.beam_defaults = Rc::new(state.defaults.beam_defaults.apply(
                get(0),
                get(1),
                get(2),
                get(3),
                get(5),
                material,
                get(6),
            ));
            return;
        }
        "set_beam_defaults_scale" => {
            let f = fields::split_fields(rest);
            let base = defaults::BeamDefaultsScale::default();
            let get = |i: usize, default: f32| f.get(i).and_then(|s| s.parse::<f32>().ok()).unwrap_or(default);
            let scale = defaults::BeamDefaultsScale {
                springiness: get(0, base.springiness),
                damping_constant: get(1, base.damping_constant),
                deformation_threshold_constant: get(2, base.deformation_threshold_constant),
                breaking_threshold_constant: get(3, base.breaking_threshold_constant),
            };
            let mut next = (*state.defaults.beam_defaults).clone();
            next.scale = scale;
            state.defaults.beam_defaults = Rc::new(next);
            return;
        }
        "enable_advanced_deformation" => {
            let mut next = (*state.defaults.beam_defaults).clone();
            next.enable_advanced_deformation = fields::split_fields(rest)
                .first()
                .and_then(|f| fields::parse_bool(f))
                .unwrap_or(true);
            state.defaults.beam_defaults = Rc::new(next);
            return;
        }
        "set_inertia_defaults" => {
            let f = fields::split_fields(rest);
            let tail: Vec<&str> = f.iter().map(String::as_str).collect();
            let parsed = defaults::parse_optional_inertia_tail(&tail);
            state.defaults.inertia_defaults = Rc::new(state.defaults.inertia_defaults.apply(&parsed));
            return;
        }
        "set_managedmaterials_options" | "set_managed_materials_options" => {
            let double_sided = fields::split_fields(rest)
                .first()
                .and_then(|f| fields::parse_bool(f))
                .unwrap_or(false);
            state.defaults.managed_material_options = Rc::new(ManagedMaterialOptions { double_sided });
            return;
        }
        "detacher_group" => {
            let f = fields::split_fields(rest);
            state.defaults.detacher_group = match f.first().map(String::as_str) {
                Some("reset") | None => 0,
                Some(n) => n.parse::<i32>().unwrap_or(0),
            };
            return;
        }

        // --- Metadata inline directives ------------------------------------
        "author" => {
            sections::misc::parse_author(registry.get_or_create(&module_name), rest, line_no, &module_name, diags);
            return;
        }
        "fileinfo" => {
            sections::misc::parse_fileinfo(registry.get_or_create(&module_name), rest, line_no, &module_name, diags);
            return;
        }
        "guid" => {
            registry.get_or_create(&module_name).guid = fields::split_fields(rest).into_iter().next();
            return;
        }
        "guisettings" => {
            sections::misc::parse_guisettings(registry.get_or_create(&module_name), rest, line_no, &module_name, diags);
            return;
        }
        "minimass" => {
            sections::misc::parse_minimass(registry.get_or_create(&module_name), rest, line_no, &module_name, diags);
            return;
        }
        "help" => {
            registry.get_or_create(&module_name).help_panel_material_name = fields::split_fields(rest).into_iter().next();
            return;
        }
        "extcamera" => {
            sections::misc::parse_extcamera(registry.get_or_create(&module_name), rest, line_no, &module_name, diags);
            return;
        }
        "set_skeleton_settings" => {
            sections::misc::parse_skeleton_settings(registry.get_or_create(&module_name), rest, line_no, &module_name, diags);
            return;
        }
        "slopebrake" => {
            sections::engine::parse_slopebrake(registry.get_or_create(&module_name), rest, line_no, &module_name, diags);
            return;
        }
        "cruisecontrol" => {
            sections::engine::parse_cruisecontrol(registry.get_or_create(&module_name), rest, line_no, &module_name, diags);
            return;
        }
        "speedlimiter" => {
            sections::engine::parse_speedlimiter(registry.get_or_create(&module_name), rest, line_no, &module_name, diags);
            return;
        }
        "add_animation" => {
            let module = registry.get_or_create(&module_name);
            let animations = if let Some(prop) = module.props.last_mut() {
                Some(&mut prop.animations)
            } else {
                module.flexbodies.last_mut().map(|f| &mut f.animations)
            };
            match animations {
                Some(animations) => sections::props::parse_add_animation(animations, rest, line_no, &module_name, diags),
                None => diags.error(line_no, "add_animation", &module_name, "no prop or flexbody to attach to"),
            }
            return;
        }
        "forset_camera_mode" | "flexbody_camera_mode" => {
            sections::flexbody::parse_flexbody_camera_mode(registry.get_or_create(&module_name), rest, line_no, &module_name, diags);
            return;
        }
        "set_collision_range" => {
            // A global physics tunable with no corresponding record on
            // `Module`; parsed only so the keyword doesn't fall through as
            // unrecognized data.
            if fields::split_fields(rest).first().and_then(|f| f.parse::<f32>().ok()).is_none() {
                diags.warning(line_no, "set_collision_range", &module_name, "non-numeric collision range ignored");
            }
            return;
        }
        "description" => {
            state.active = ActiveSection::Description;
            return;
        }
        "end_description" => {
            state.active = ActiveSection::None;
            return;
        }

        // --- Subsection openers ---------------------------------------------
        "submesh" => {
            sections::submesh::start_submesh(registry.get_or_create(&module_name));
            state.active = ActiveSection::Submesh;
            state.submesh_part = SubmeshPart::None;
            return;
        }
        "backmesh" => {
            sections::submesh::mark_backmesh(registry.get_or_create(&module_name), line_no, &module_name, diags);
            return;
        }
        "texcoords" => {
            state.submesh_part = SubmeshPart::Texcoords;
            return;
        }
        "cab" if state.active == ActiveSection::Submesh => {
            state.submesh_part = SubmeshPart::Cab;
            return;
        }
        "camerarail" | "camerarails" => {
            sections::misc::start_camerarail(registry.get_or_create(&module_name));
            state.active = ActiveSection::CameraRails;
            return;
        }
        "collisionbox" | "collisionboxes" => {
            state.active = ActiveSection::CollisionBoxes;
            return;
        }
        "flexbodies" => {
            state.active = ActiveSection::Flexbodies;
            return;
        }

        // --- Section headers that start a record-per-line family --------------
        "nodes" | "nodes2" => {
            state.active = ActiveSection::Nodes;
            return;
        }
        "beams" => {
            state.active = ActiveSection::Beams;
            return;
        }
        "cinecam" => {
            state.active = ActiveSection::Cinecam;
            return;
        }
        "shocks" => {
            state.active = ActiveSection::Shocks;
            return;
        }
        "shocks2" => {
            state.active = ActiveSection::Shocks2;
            return;
        }
        "commands" => {
            state.active = ActiveSection::Commands;
            return;
        }
        "commands2" => {
            state.active = ActiveSection::Commands2;
            return;
        }
        "ties" => {
            state.active = ActiveSection::Ties;
            return;
        }
        "animators" => {
            state.active = ActiveSection::Animators;
            return;
        }
        "hydros" => {
            state.active = ActiveSection::Hydros;
            return;
        }
        "rotators" => {
            state.active = ActiveSection::Rotators;
            return;
        }
        "rotators2" => {
            state.active = ActiveSection::Rotators2;
            return;
        }
        "triggers" => {
            state.active = ActiveSection::Triggers;
            return;
        }
        "hooks" => {
            state.active = ActiveSection::Hooks;
            return;
        }
        "wheels" => {
            state.active = ActiveSection::Wheels;
            return;
        }
        "wheels2" => {
            state.active = ActiveSection::Wheels2;
            return;
        }
        "meshwheels" => {
            state.active = ActiveSection::MeshWheels;
            return;
        }
        "meshwheels2" => {
            state.active = ActiveSection::MeshWheels2;
            return;
        }
        "flexbodywheels" => {
            state.active = ActiveSection::FlexBodyWheels;
            return;
        }
        "turbojets" => {
            state.active = ActiveSection::Turbojets;
            return;
        }
        "turboprops2" => {
            state.active = ActiveSection::Turboprops2;
            return;
        }
        "pistonprops" => {
            state.active = ActiveSection::Pistonprops;
            return;
        }
        "screwprops" => {
            state.active = ActiveSection::Screwprops;
            return;
        }
        "wings" => {
            state.active = ActiveSection::Wings;
            return;
        }
        "fusedrag" => {
            state.active = ActiveSection::Fusedrag;
            return;
        }
        "flares2" => {
            state.active = ActiveSection::Flares2;
            return;
        }
        "cameras" => {
            state.active = ActiveSection::Cameras;
            return;
        }
        "videocameras" => {
            state.active = ActiveSection::VideoCameras;
            return;
        }
        "props" => {
            state.active = ActiveSection::Props;
            return;
        }
        "engine" => {
            state.active = ActiveSection::Engine;
            return;
        }
        "engoption" => {
            state.active = ActiveSection::Engoption;
            return;
        }
        "brakes" => {
            state.active = ActiveSection::Brakes;
            return;
        }
        "torquecurve" => {
            state.active = ActiveSection::TorqueCurve;
            return;
        }
        "axles" => {
            state.active = ActiveSection::Axles;
            return;
        }
        "antilockbrakes" => {
            state.active = ActiveSection::AntiLockBrakes;
            return;
        }
        "tractioncontrol" => {
            state.active = ActiveSection::TractionControl;
            return;
        }
        "lockgroups" => {
            state.active = ActiveSection::Lockgroups;
            return;
        }
        "railgroups" => {
            state.active = ActiveSection::RailGroups;
            return;
        }
        "slidenodes" => {
            state.active = ActiveSection::SlideNodes;
            return;
        }
        "ropes" => {
            state.active = ActiveSection::Ropes;
            return;
        }
        "ropables" => {
            state.active = ActiveSection::Ropables;
            return;
        }
        "particles" => {
            state.active = ActiveSection::Particles;
            return;
        }
        "materialflarebindings" => {
            state.active = ActiveSection::MaterialFlareBindings;
            return;
        }
        "nodecollision" => {
            state.active = ActiveSection::NodeCollision;
            return;
        }
        "airbrakes" => {
            state.active = ActiveSection::Airbrakes;
            return;
        }
        "soundsources" => {
            state.active = ActiveSection::SoundSources;
            return;
        }
        "soundsources2" => {
            state.active = ActiveSection::SoundSources2;
            return;
        }
        "contacters" => {
            state.active = ActiveSection::Contacters;
            return;
        }
        "globals" => {
            state.active = ActiveSection::Globals;
            return;
        }
        "managedmaterials" => {
            state.active = ActiveSection::ManagedMaterials;
            return;
        }

        _ => {}
    }

    // Not a recognized keyword: treat as a data line belonging to whichever
    // section is currently active.
    let module = registry.get_or_create(&module_name);
    let defaults = &state.defaults;

    match state.active {
        ActiveSection::None => {
            diags.warning(line_no, "(none)", &module_name, "data line outside any section ignored");
        }
        ActiveSection::Description => {
            module.description.push(text.to_string());
        }
        ActiveSection::Nodes => sections::nodes::parse_node(module, defaults, text, line_no, &module_name, diags),
        ActiveSection::Beams => sections::beams::parse_beam(module, defaults, text, line_no, &module_name, diags),
        ActiveSection::Cinecam => sections::misc::parse_cinecam(module, defaults, text, line_no, &module_name, diags),
        ActiveSection::Shocks => sections::shocks::parse_shock(module, defaults, text, line_no, &module_name, diags),
        ActiveSection::Shocks2 => sections::shocks::parse_shock2(module, defaults, text, line_no, &module_name, diags),
        ActiveSection::Commands => {
            // The legacy single-rate grammar feeds the shared Command2 record
            // by duplicating the rate field into both shorten/lengthen slots.
            let f = fields::split_fields(text);
            if f.len() < 3 {
                diags.error(line_no, "commands", &module_name, "expected at least 3 fields");
            } else {
                let mut expanded = f.clone();
                expanded.insert(3, f[2].clone());
                sections::commands::parse_command2(module, defaults, &expanded.join(","), line_no, &module_name, diags);
            }
        }
        ActiveSection::Commands2 => sections::commands::parse_command2(module, defaults, text, line_no, &module_name, diags),
        ActiveSection::Ties => sections::ties::parse_tie(module, defaults, text, line_no, &module_name, diags),
        ActiveSection::Animators => sections::animators::parse_animator(module, defaults, text, line_no, &module_name, diags),
        ActiveSection::Hydros => sections::hydros::parse_hydro(module, defaults, text, line_no, &module_name, diags),
        ActiveSection::Wheels => sections::wheels::parse_wheel(module, defaults, text, line_no, &module_name, diags),
        ActiveSection::Wheels2 => sections::wheels::parse_wheel2(module, defaults, text, line_no, &module_name, diags),
        ActiveSection::MeshWheels => sections::wheels::parse_meshwheel(module, defaults, text, line_no, &module_name, diags),
        ActiveSection::MeshWheels2 => sections::wheels::parse_meshwheel2(module, defaults, text, line_no, &module_name, diags),
        ActiveSection::FlexBodyWheels => sections::wheels::parse_flexbodywheel(module, defaults, text, line_no, &module_name, diags),
        ActiveSection::Rotators => sections::rotators::parse_rotator(module, defaults, text, line_no, &module_name, diags),
        ActiveSection::Rotators2 => sections::rotators::parse_rotator2(module, defaults, text, line_no, &module_name, diags),
        ActiveSection::Triggers => sections::triggers::parse_trigger(module, defaults, text, line_no, &module_name, diags),
        ActiveSection::Hooks => sections::hooks::parse_hook(module, defaults, text, line_no, &module_name, diags),
        ActiveSection::Props => sections::props::parse_prop(module, defaults, text, line_no, &module_name, diags),
        ActiveSection::Flexbodies => {
            match sections::flexbody::parse_flexbody_header(text, line_no, &module_name, diags) {
                Some(body) => {
                    module.flexbodies.push(body);
                    state.flexbody_pending = FlexbodyPending::AwaitingForset;
                }
                None => {
                    // Header failed to parse; still consume the next line as
                    // its forset so a broken entry doesn't desync the file.
                    state.flexbody_pending = FlexbodyPending::AwaitingForset;
                }
            }
        }
        ActiveSection::Submesh => match state.submesh_part {
            SubmeshPart::None => diags.error(line_no, "submesh", &module_name, "expected `texcoords` or `cab` before data"),
            SubmeshPart::Texcoords => sections::submesh::parse_texcoord(module, text, line_no, &module_name, diags),
            SubmeshPart::Cab => sections::submesh::parse_cab(module, text, line_no, &module_name, diags),
        },
        ActiveSection::Globals => sections::misc::parse_globals(module, text, line_no, &module_name, diags),
        ActiveSection::ManagedMaterials => sections::misc::parse_managedmaterial(module, text, line_no, &module_name, diags),
        ActiveSection::MaterialFlareBindings => sections::misc::parse_materialflarebinding(module, text, line_no, &module_name, diags),
        ActiveSection::NodeCollision => sections::misc::parse_nodecollision(module, text, line_no, &module_name, diags),
        ActiveSection::Particles => sections::misc::parse_particle(module, text, line_no, &module_name, diags),
        ActiveSection::Pistonprops => sections::misc::parse_pistonprop(module, text, line_no, &module_name, diags),
        ActiveSection::RailGroups => sections::misc::parse_railgroup(module, text, line_no, &module_name, diags),
        ActiveSection::Ropables => sections::misc::parse_ropable(module, text, line_no, &module_name, diags),
        ActiveSection::Ropes => sections::misc::parse_rope(module, defaults, text, line_no, &module_name, diags),
        ActiveSection::Screwprops => sections::misc::parse_screwprop(module, text, line_no, &module_name, diags),
        ActiveSection::SlideNodes => sections::misc::parse_slidenode(module, text, line_no, &module_name, diags),
        ActiveSection::SoundSources => sections::misc::parse_soundsource(module, text, line_no, &module_name, diags),
        ActiveSection::SoundSources2 => sections::misc::parse_soundsource2(module, text, line_no, &module_name, diags),
        ActiveSection::Turbojets => sections::misc::parse_turbojet(module, text, line_no, &module_name, diags),
        ActiveSection::Turboprops2 => sections::misc::parse_turboprop2(module, text, line_no, &module_name, diags),
        ActiveSection::VideoCameras => sections::misc::parse_videocamera(module, text, line_no, &module_name, diags),
        ActiveSection::Wings => sections::misc::parse_wing(module, text, line_no, &module_name, diags),
        ActiveSection::Fusedrag => sections::misc::parse_fusedrag(module, text, line_no, &module_name, diags),
        ActiveSection::Cameras => sections::misc::parse_camera(module, text, line_no, &module_name, diags),
        ActiveSection::CameraRails => sections::misc::parse_camerarail_node(module, text, line_no, &module_name, diags),
        ActiveSection::CollisionBoxes => sections::misc::parse_collisionbox_node(module, text, line_no, &module_name, diags),
        ActiveSection::Airbrakes => sections::misc::parse_airbrake(module, text, line_no, &module_name, diags),
        ActiveSection::Flares2 => sections::misc::parse_flare2(module, text, line_no, &module_name, diags),
        ActiveSection::Contacters => sections::misc::parse_contacter(module, text, line_no, &module_name, diags),
        ActiveSection::Lockgroups => sections::misc::parse_lockgroup(module, text, line_no, &module_name, diags),
        ActiveSection::Axles => sections::engine::parse_axles(module, text, line_no, &module_name, diags),
        ActiveSection::AntiLockBrakes => sections::engine::parse_antilockbrakes(module, text, line_no, &module_name, diags),
        ActiveSection::TractionControl => sections::engine::parse_tractioncontrol(module, text, line_no, &module_name, diags),
        ActiveSection::Engine => sections::engine::parse_engine(module, text, line_no, &module_name, diags),
        ActiveSection::Engoption => sections::engine::parse_engoption(module, text, line_no, &module_name, diags),
        ActiveSection::Brakes => sections::engine::parse_brakes(module, text, line_no, &module_name, diags),
        ActiveSection::TorqueCurve => sections::engine::parse_torquecurve(module, text, line_no, &module_name, diags),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_node_beam_scenario() {
        let mut file = parse(
            ["nodes", "0, 0,0,0", "1, 1,0,0", "beams", "0,1,i", ""]
                .iter()
                .map(|s| s.to_string()),
        );
        let root = file.modules.root_mut();
        assert_eq!(root.nodes.len(), 2);
        assert_eq!(root.beams.len(), 1);
        assert!(file.diagnostics.is_empty());
    }

    #[test]
    fn cinecam_scenario() {
        let mut lines = vec!["nodes".to_string()];
        for i in 0..8 {
            let x = if i & 1 != 0 { 1.0 } else { 0.0 };
            let y = if i & 2 != 0 { 1.0 } else { 0.0 };
            let z = if i & 4 != 0 { 1.0 } else { 0.0 };
            lines.push(format!("{i}, {x},{y},{z}"));
        }
        lines.push("cinecam".to_string());
        lines.push("0,0,0, 0,1,2,3,4,5,6,7, 8000, 800".to_string());
        let file = parse(lines.into_iter());
        let root = file.root();
        assert_eq!(root.nodes.len(), 8);
        assert_eq!(root.cinecams.len(), 1);
        assert_eq!(root.cinecams[0].nodes.len(), 8);
    }

    #[test]
    fn wheel_scenario() {
        let lines = [
            "nodes",
            "0, 0,0,0",
            "1, 0,0,1",
            "wheels",
            "0.5, 0.2, 4, 0, 1, 9999, 0, 1, 0, 10, 8000, 400, face, band",
        ];
        let file = parse(lines.iter().map(|s| s.to_string()));
        let root = file.root();
        assert_eq!(root.wheels.len(), 1);
        assert_eq!(root.wheels[0].base.propulsion, crate::records::Propulsion::Forward);
    }

    #[test]
    fn trigger_blocks_command_key_scenario() {
        let lines = [
            "nodes",
            "0, 0,0,0",
            "1, 1,0,0",
            "commands2",
            "0,1, 10,10, 0.2,0.3, 5,5, c",
            "triggers",
            "0,1, 0.5, 1.5, 5, 0, b",
        ];
        let file = parse(lines.iter().map(|s| s.to_string()));
        let root = file.root();
        assert_eq!(root.triggers.len(), 1);
        assert_eq!(root.commands2.len(), 1);
    }

    #[test]
    fn legacy_numeric_tolerance_scenario() {
        let lines = ["nodes", "0, 0,0,0", "1, 1,0,0", "beams", "0, 42, i"];
        let file = parse(lines.iter().map(|s| s.to_string()));
        let root = file.root();
        assert_eq!(root.beams.len(), 1);
        assert!(file.diagnostics.iter().any(|d| d.text.contains("42")));
    }

    #[test]
    fn flexbody_forset_with_range_scenario() {
        let mut lines = vec!["nodes".to_string()];
        for i in 0..10 {
            lines.push(format!("{i}, {i},0,0"));
        }
        lines.push("flexbodies".to_string());
        lines.push("0, 1, 2, 0,0,0, 0,0,0, body.mesh".to_string());
        lines.push("forset 3-7,9".to_string());
        let file = parse(lines.into_iter());
        let root = file.root();
        assert_eq!(root.flexbodies.len(), 1);
        assert_eq!(root.flexbodies[0].mesh_name, "body.mesh");
        assert_eq!(root.flexbodies[0].forset.len(), 2);
    }

    #[test]
    fn module_switching() {
        let lines = [
            "nodes",
            "0, 0,0,0",
            "section 1 variant_a",
            "nodes",
            "1, 1,0,0",
            "end_section",
            "nodes",
            "2, 2,0,0",
        ];
        let file = parse(lines.iter().map(|s| s.to_string()));
        assert_eq!(file.root().nodes.len(), 2);
        assert_eq!(file.modules.get("variant_a").unwrap().nodes.len(), 1);
    }

    #[test]
    fn description_block_is_captured_verbatim() {
        let lines = ["description", "a vehicle", "; not a comment here", "end_description", "nodes", "0,0,0,0"];
        let file = parse(lines.iter().map(|s| s.to_string()));
        assert_eq!(file.root().description, vec!["a vehicle".to_string(), "; not a comment here".to_string()]);
        assert_eq!(file.root().nodes.len(), 1);
    }
}
