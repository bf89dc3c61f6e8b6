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
//! The built [`Rig`]: every record from the chosen modules with node/wheel/
//! hook references resolved to dense indices, ready for a physics engine to
//! consume directly. Mirrors `rigdef::records` one-for-one, minus the `Rc`
//! defaults plumbing, which only matters during parsing.
use nalgebra::Vector3;

use rigdef::records::{
    AlbTcMode, AnimationModeFlags, AnimationSourceFlags, AnimatorFlags, Author, AxleOptions,
    BeamOptions, Braking, CabOptions, CameraMode, CameraSettings, CommandOptions, EngineTriggerFunction,
    EngineType, ExtCameraMode, Fileinfo, FlareType, Globals, GuiSettings, HookOptions, ManagedMaterial,
    MaterialFlareBinding, MeshWheelSide, MotorSourceFlags, PropSpecial, Propulsion, Shock2Options,
    ShockOptions, SkeletonSettings, SlideNodeConstraints, TieOptions, TriggerOptions, WingControl,
};

#[derive(Debug, Clone)]
pub struct BuiltNode {
    pub position: Vector3<f32>,
    pub options: rigdef::defaults::NodeOptions,
    pub load_weight: f32,
    pub friction: f32,
    pub volume: f32,
    pub surface: f32,
    pub detacher_group: i32,
    /// Set by the wheel builder for every node it synthesizes.
    pub wheel_id: Option<usize>,
    /// `1` for the outer ring, `2` for the inner ring, `0` for non-wheel nodes.
    pub wheel_ring: u8,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BuiltBeamKind {
    Normal,
    Invisible,
    Hydro,
    InvisibleHydro,
    Virtual,
    Marked,
}

#[derive(Debug, Clone)]
pub struct BuiltBeam {
    pub nodes: [usize; 2],
    pub options: BeamOptions,
    pub kind: BuiltBeamKind,
    pub springiness: f32,
    pub damping_constant: f32,
    pub deformation_threshold: f32,
    pub breaking_threshold: f32,
    pub visual_diameter: f32,
    pub material_name: String,
    pub plastic_deformation_coefficient: f32,
    pub extension_break_limit: Option<f32>,
    pub short_bound: Option<f32>,
    pub detacher_group: i32,
}

#[derive(Debug, Clone)]
pub struct BuiltCinecam {
    pub position: Vector3<f32>,
    pub nodes: [usize; 8],
    pub beams: [usize; 8],
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum WheelVariant {
    Wheels,
    Wheels2,
    MeshWheels,
    MeshWheels2,
    FlexBodyWheels,
}

#[derive(Debug, Clone)]
pub struct BuiltWheel {
    pub variant: WheelVariant,
    pub num_rays: u32,
    pub radius: f32,
    pub width: f32,
    pub mass: f32,
    pub axis_nodes: [usize; 2],
    pub rigidity_node: Option<usize>,
    pub reference_arm_node: usize,
    /// `near_attach[k]` is the axis node closest to the reference arm node,
    /// for ray `k`'s torque application (spec.md §4.3.3 step 7).
    pub near_attach_node: usize,
    pub braking: Braking,
    pub propulsion: Propulsion,
    /// Every node index this wheel created, outer ring then inner ring (then
    /// tyre outer/inner for two-ring variants), in ray order.
    pub node_indices: Vec<usize>,
    /// Every beam index this wheel created.
    pub beam_indices: Vec<usize>,
    pub side: Option<MeshWheelSide>,
    pub face_material_name: Option<String>,
    pub band_material_name: Option<String>,
    pub rim_mesh_name: Option<String>,
    pub tyre_mesh_name: Option<String>,
}

impl BuiltWheel {
    pub fn is_propelled(&self) -> bool {
        !matches!(self.propulsion, Propulsion::None)
    }

    pub fn is_braked(&self) -> bool {
        !matches!(self.braking, Braking::No)
    }
}

#[derive(Debug, Clone)]
pub struct BuiltShock {
    pub nodes: [usize; 2],
    pub spring_rate: f32,
    pub damping: f32,
    pub short_bound: f32,
    pub long_bound: f32,
    pub precompression: f32,
    pub options: ShockOptions,
    pub beam_index: usize,
}

#[derive(Debug, Clone)]
pub struct BuiltShock2 {
    pub nodes: [usize; 2],
    pub spring_in: f32,
    pub damp_in: f32,
    pub progress_factor_spring_in: f32,
    pub progress_factor_damp_in: f32,
    pub spring_out: f32,
    pub damp_out: f32,
    pub progress_factor_spring_out: f32,
    pub progress_factor_damp_out: f32,
    pub short_bound: f32,
    pub long_bound: f32,
    pub precompression: f32,
    pub options: Shock2Options,
    pub beam_index: usize,
}

#[derive(Debug, Clone)]
pub struct BuiltTrigger {
    pub nodes: [usize; 2],
    pub contraction_trigger_limit: f32,
    pub expansion_trigger_limit: f32,
    pub shortbound_trigger_key: i32,
    pub longbound_trigger_key: i32,
    pub options: TriggerOptions,
    pub boundary_timer: f32,
    pub engine_trigger_motor_index: Option<i32>,
    pub engine_trigger_function: Option<EngineTriggerFunction>,
    pub beam_index: usize,
}

#[derive(Debug, Clone)]
pub struct BuiltCommandKey {
    pub key: i32,
    /// Beam indices this key contracts/extends, in command-order.
    pub beams: Vec<usize>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BuiltCommand {
    pub nodes: [usize; 2],
    pub shorten_rate: f32,
    pub lengthen_rate: f32,
    pub max_contraction: f32,
    pub max_extension: f32,
    pub contract_key: i32,
    pub extend_key: i32,
    pub options: CommandOptions,
    pub description: Option<String>,
    pub affect_engine: f32,
    pub needs_engine: bool,
    pub beam_index: usize,
}

#[derive(Debug, Clone)]
pub struct BuiltHydro {
    pub nodes: [usize; 2],
    pub lengthening_factor: f32,
    pub options: rigdef::records::HydroOptions,
    pub beam_index: usize,
}

#[derive(Debug, Clone)]
pub struct BuiltAnimator {
    pub nodes: [usize; 2],
    pub lengthening_factor: f32,
    pub flags: AnimatorFlags,
    pub short_limit: Option<f32>,
    pub long_limit: Option<f32>,
    pub beam_index: usize,
}

#[derive(Debug, Clone)]
pub struct BuiltRotator {
    pub axis_nodes: [usize; 2],
    pub base_plate_nodes: [usize; 4],
    pub rotating_plate_nodes: [usize; 4],
    pub rate: f32,
    pub spin_left_key: i32,
    pub spin_right_key: i32,
    pub engine_coupling: f32,
    pub needs_engine: bool,
    pub rotating_force: Option<f32>,
    pub tolerance: Option<f32>,
}

#[derive(Debug, Clone)]
pub struct BuiltHook {
    pub node: usize,
    pub flags: HookOptions,
    pub option_hook_range: f32,
    pub option_speed_coef: f32,
    pub option_max_force: f32,
    pub hookgroup: i32,
    pub lockgroup: i32,
    pub option_timer: f32,
    pub option_minimum_range_meters: f32,
    /// Index into `Rig::beams` of the hook/rope beam this hook locks onto a
    /// ropable node, created by `set_beam_defaults`-style virtual beam.
    pub beam_index: usize,
}

#[derive(Debug, Clone)]
pub struct BuiltTie {
    pub root_node: usize,
    pub max_reach_length: f32,
    pub auto_shorten_rate: f32,
    pub min_length: f32,
    pub max_length: f32,
    pub options: TieOptions,
    pub max_stress: f32,
    pub group: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct BuiltAxle {
    pub wheels: [[usize; 2]; 2],
    pub options: Vec<AxleOptions>,
}

#[derive(Debug, Clone)]
pub struct BuiltFlexbody {
    pub reference_node: usize,
    pub x_axis_node: usize,
    pub y_axis_node: usize,
    pub offset: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub mesh_name: String,
    pub forset_nodes: Vec<usize>,
    pub camera_settings: CameraSettings,
}

#[derive(Debug, Clone)]
pub struct BuiltProp {
    pub reference_node: usize,
    pub x_axis_node: usize,
    pub y_axis_node: usize,
    pub offset: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub mesh_name: String,
    pub camera_settings: CameraSettings,
    pub special: Option<PropSpecial>,
}

#[derive(Debug, Clone)]
pub struct BuiltCab {
    pub nodes: [usize; 3],
    pub options: CabOptions,
}

#[derive(Debug, Clone)]
pub struct BuiltTexcoord {
    pub node: usize,
    pub u: f32,
    pub v: f32,
}

/// One of up to three submesh copies: the original, and (when `backmesh` is
/// set) a transparent pass and a back-facing pass (spec.md §4.4).
#[derive(Debug, Clone)]
pub struct BuiltSubmesh {
    pub texcoords: Vec<BuiltTexcoord>,
    pub cab_triangles: Vec<BuiltCab>,
    pub transparent: bool,
    pub back_facing: bool,
}

#[derive(Debug, Clone)]
pub struct BuiltSlideNode {
    pub slide_node: usize,
    pub rail_nodes: Vec<usize>,
    pub spring_rate: f32,
    pub break_force: Option<f32>,
    pub tolerance: f32,
    pub railgroup_id: Option<i32>,
    pub attachment_rate: f32,
    pub max_attachment_distance: f32,
    pub constraint_flags: SlideNodeConstraints,
}

#[derive(Debug, Clone)]
pub struct BuiltWing {
    pub nodes: [usize; 8],
    pub tex_coords: [(f32, f32); 4],
    pub control_surface: WingControl,
    pub chord_point: f32,
    pub min_deflection: f32,
    pub max_deflection: f32,
    pub airfoil: String,
    pub efficiency_coef: f32,
    pub span_meters: f32,
}

#[derive(Debug, Clone)]
pub struct BuiltTurbojet {
    pub front_node: usize,
    pub back_node: usize,
    pub side_node: usize,
    pub is_reversable: bool,
    pub dry_thrust: f32,
    pub wet_thrust: f32,
    pub front_diameter: f32,
    pub back_diameter: f32,
    pub nozzle_length: f32,
}

#[derive(Debug, Clone)]
pub struct BuiltTurboprop2 {
    pub reference_node: usize,
    pub axis_node: usize,
    pub blade_tip_nodes: [usize; 4],
    pub turbine_power_kw: f32,
    pub airfoil: String,
    pub couple_node: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct BuiltPistonprop {
    pub reference_node: usize,
    pub axis_node: usize,
    pub blade_tip_nodes: [usize; 4],
    pub couple_node: Option<usize>,
    pub turbine_power_kw: f32,
    pub pitch: f32,
    pub airfoil: String,
}

#[derive(Debug, Clone)]
pub struct BuiltScrewprop {
    pub prop_node: usize,
    pub back_node: usize,
    pub top_node: usize,
    pub power: f32,
}

#[derive(Debug, Clone)]
pub struct BuiltVideoCamera {
    pub reference_node: usize,
    pub left_node: usize,
    pub bottom_node: usize,
    pub alt_reference_node: Option<usize>,
    pub alt_orientation_node: Option<usize>,
    pub offset: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub field_of_view: f32,
    pub texture_width: i32,
    pub texture_height: i32,
    pub min_clip_distance: f32,
    pub max_clip_distance: f32,
    pub camera_role: i32,
    pub camera_mode: i32,
    pub material_name: String,
    pub camera_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BuiltCamera {
    pub center_node: usize,
    pub back_node: usize,
    pub left_node: usize,
}

#[derive(Debug, Clone)]
pub struct BuiltAirbrake {
    pub reference_node: usize,
    pub x_axis_node: usize,
    pub y_axis_node: usize,
    pub additional_node: usize,
    pub offset: Vector3<f32>,
    pub width: f32,
    pub height: f32,
    pub max_inclination_angle: f32,
    pub lift_coefficient: f32,
}

#[derive(Debug, Clone)]
pub struct BuiltFlare2 {
    pub reference_node: usize,
    pub x: f32,
    pub y: f32,
    pub offset: Vector3<f32>,
    pub kind: FlareType,
    pub control_number: i32,
    pub blink_delay_milis: i32,
    pub size: f32,
    pub material_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct BuiltSoundSource {
    pub node: usize,
    pub sound_script_name: String,
    pub mode: Option<rigdef::records::SoundSource2Mode>,
}

#[derive(Debug, Clone)]
pub struct BuiltRope {
    pub root_node: usize,
    pub end_node: usize,
    pub invisible: bool,
    pub beam_index: usize,
}

#[derive(Debug, Clone)]
pub struct BuiltRopable {
    pub node: usize,
    pub group: i32,
    pub multilock: bool,
}

#[derive(Debug, Clone)]
pub struct BuiltParticle {
    pub emitter_node: usize,
    pub reference_node: usize,
    pub particle_system_name: String,
}

#[derive(Debug, Clone)]
pub struct BuiltNodeCollision {
    pub node: usize,
    pub radius: f32,
}

#[derive(Debug, Clone, Default)]
pub struct BuiltCollisionBox {
    pub nodes: Vec<usize>,
    /// Axis-aligned bounding box over `nodes`, inflated by 5cm on every
    /// side, computed during finalize.
    pub bounds_min: Vector3<f32>,
    pub bounds_max: Vector3<f32>,
}

#[derive(Debug, Clone, Default)]
pub struct BuiltCameraRail {
    pub nodes: Vec<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct BuiltRailGroup {
    pub id: i32,
    pub nodes: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct BuiltLockgroup {
    pub number: i32,
    pub nodes: Vec<usize>,
}

/// Bounding box over every node position, computed during finalize.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min: Vector3<f32>,
    pub max: Vector3<f32>,
}

/// The fully resolved vehicle, ready to hand to a physics engine.
#[derive(Debug, Clone, Default)]
pub struct Rig {
    pub name: String,
    pub authors: Vec<Author>,
    pub fileinfo: Option<Fileinfo>,
    pub guid: Option<String>,
    pub minimum_mass: Option<f32>,
    pub globals: Option<Globals>,
    pub managed_materials: Vec<ManagedMaterial>,
    pub material_flare_bindings: Vec<MaterialFlareBinding>,
    pub gui_settings: Option<GuiSettings>,
    pub skeleton_settings: SkeletonSettings,
    pub help_panel_material_name: Option<String>,
    pub description: Vec<String>,

    pub nodes: Vec<BuiltNode>,
    pub beams: Vec<BuiltBeam>,
    pub cinecams: Vec<BuiltCinecam>,
    pub wheels: Vec<BuiltWheel>,
    pub shocks: Vec<BuiltShock>,
    pub shocks2: Vec<BuiltShock2>,
    pub triggers: Vec<BuiltTrigger>,
    pub commands: Vec<BuiltCommand>,
    pub command_keys: Vec<BuiltCommandKey>,
    pub hydros: Vec<BuiltHydro>,
    pub animators: Vec<BuiltAnimator>,
    pub rotators: Vec<BuiltRotator>,
    pub hooks: Vec<BuiltHook>,
    pub ties: Vec<BuiltTie>,
    pub axles: Vec<BuiltAxle>,
    pub lockgroups: Vec<BuiltLockgroup>,
    pub flexbodies: Vec<BuiltFlexbody>,
    pub props: Vec<BuiltProp>,
    pub submeshes: Vec<BuiltSubmesh>,
    pub slidenodes: Vec<BuiltSlideNode>,
    pub railgroups: Vec<BuiltRailGroup>,
    pub ropes: Vec<BuiltRope>,
    pub ropables: Vec<BuiltRopable>,
    pub particles: Vec<BuiltParticle>,
    pub node_collisions: Vec<BuiltNodeCollision>,
    pub collision_boxes: Vec<BuiltCollisionBox>,
    pub camera_rails: Vec<BuiltCameraRail>,
    pub cameras: Vec<BuiltCamera>,
    pub ext_camera: Option<(ExtCameraMode, Option<usize>)>,
    pub videocameras: Vec<BuiltVideoCamera>,
    pub airbrakes: Vec<BuiltAirbrake>,
    pub flares2: Vec<BuiltFlare2>,
    pub sound_sources: Vec<BuiltSoundSource>,
    pub contacters: Vec<usize>,

    pub engine: Option<rigdef::records::Engine>,
    pub engoption: Option<rigdef::records::Engoption>,
    pub brakes: rigdef::records::Brakes,
    pub antilockbrakes: Option<rigdef::records::AntiLockBrakes>,
    pub traction_control: Option<rigdef::records::TractionControl>,
    pub slope_brake: Option<rigdef::records::SlopeBrake>,
    pub cruise_control: Option<rigdef::records::CruiseControl>,
    pub speed_limiter: Option<rigdef::records::SpeedLimiter>,
    pub torque_curve: Option<rigdef::records::TorqueCurve>,
    pub turbojets: Vec<BuiltTurbojet>,
    pub turboprops2: Vec<BuiltTurboprop2>,
    pub pistonprops: Vec<BuiltPistonprop>,
    pub screwprops: Vec<BuiltScrewprop>,
    pub wings: Vec<BuiltWing>,
    pub fusedrag: Option<rigdef::records::Fusedrag>,

    pub bounding_box: Option<BoundingBox>,
    pub lowest_node: Option<usize>,
}

impl Rig {
    pub fn propelled_wheels(&self) -> impl Iterator<Item = &BuiltWheel> {
        self.wheels.iter().filter(|w| w.is_propelled())
    }

    pub fn braked_wheels(&self) -> impl Iterator<Item = &BuiltWheel> {
        self.wheels.iter().filter(|w| w.is_braked())
    }
}

// AlbTcMode, MotorSourceFlags, AnimationSourceFlags, AnimationModeFlags, and
// CameraMode are re-exported here for callers that only depend on
// `rig_builder` and never touch `rigdef` directly.
pub use rigdef::records::{AlbTcMode as RigAlbTcMode, AnimationModeFlags as RigAnimationModeFlags};
pub use rigdef::records::{AnimationSourceFlags as RigAnimationSourceFlags, CameraMode as RigCameraMode};
pub use rigdef::records::MotorSourceFlags as RigMotorSourceFlags;
