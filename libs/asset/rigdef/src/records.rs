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
//! Typed records produced by the section parsers. Each record captures the
//! defaults that were current when it was parsed (by `Rc`, see
//! `crate::defaults`) rather than copying their values, matching the
//! reference-semantics the original format relies on.
use bitflags::bitflags;
use nalgebra::Vector3;
use std::rc::Rc;

use crate::defaults::{BeamDefaults, Inertia, NodeDefaults, NodeOptions, OptionalInertia};
use crate::ids::{NodeId, NodeRange};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Braking {
    No,
    Yes,
    DirectionalLeft,
    DirectionalRight,
    OnlyFoot,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Propulsion {
    None,
    Forward,
    Backward,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub position: Vector3<f32>,
    pub options: NodeOptions,
    pub load_weight_override: Option<f32>,
    pub detacher_group: i32,
    pub defaults: Rc<NodeDefaults>,
    pub beam_defaults: Rc<BeamDefaults>,
}

bitflags! {
    #[derive(Default)]
    pub struct BeamOptions: u32 {
        const INVISIBLE = 1 << 0; // i
        const ROPE      = 1 << 1; // r
        const SUPPORT   = 1 << 2; // s
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BeamKind {
    Normal,
    Invisible,
    Hydro,
    InvisibleHydro,
    Virtual,
    Marked,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BeamSubKind {
    Rope,
    Support,
    Shock1,
    Shock2,
    NoShock,
}

#[derive(Debug, Clone)]
pub struct Beam {
    pub nodes: [NodeId; 2],
    pub options: BeamOptions,
    pub extension_break_limit: Option<f32>,
    pub kind: BeamKind,
    pub sub_kind: Option<BeamSubKind>,
    pub detacher_group: i32,
    pub defaults: Rc<BeamDefaults>,
}

#[derive(Debug, Clone)]
pub struct Cinecam {
    pub position: Vector3<f32>,
    pub nodes: [NodeId; 8],
    pub spring: f32,
    pub damping: f32,
    pub node_defaults: Rc<NodeDefaults>,
    pub beam_defaults: Rc<BeamDefaults>,
}

/// Shared shape across the five wheel variants (spec.md §3, §4.3.3).
#[derive(Debug, Clone)]
pub struct BaseWheel {
    pub width: f32,
    pub num_rays: u32,
    pub nodes: [NodeId; 2],
    pub rigidity_node: Option<NodeId>,
    pub braking: Braking,
    pub propulsion: Propulsion,
    pub reference_arm_node: NodeId,
    pub mass: f32,
    pub node_defaults: Rc<NodeDefaults>,
    pub beam_defaults: Rc<BeamDefaults>,
}

#[derive(Debug, Clone)]
pub struct Wheel {
    pub base: BaseWheel,
    pub radius: f32,
    pub springiness: f32,
    pub damping: f32,
    pub face_material_name: String,
    pub band_material_name: String,
}

#[derive(Debug, Clone)]
pub struct BaseWheel2 {
    pub base: BaseWheel,
    pub rim_radius: f32,
    pub tyre_radius: f32,
    pub tyre_springiness: f32,
    pub tyre_damping: f32,
}

#[derive(Debug, Clone)]
pub struct Wheel2 {
    pub base: BaseWheel2,
    pub face_material_name: String,
    pub band_material_name: String,
    pub rim_springiness: f32,
    pub rim_damping: f32,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MeshWheelSide {
    Right,
    Left,
}

#[derive(Debug, Clone)]
pub struct MeshWheel {
    pub base: BaseWheel,
    pub side: MeshWheelSide,
    pub mesh_name: String,
    pub material_name: String,
    pub rim_radius: f32,
    pub tyre_radius: f32,
    pub spring: f32,
    pub damping: f32,
}

#[derive(Debug, Clone)]
pub struct MeshWheel2 {
    pub base: BaseWheel2,
    pub side: MeshWheelSide,
    pub mesh_name: String,
    pub material_name: String,
}

#[derive(Debug, Clone)]
pub struct FlexBodyWheel {
    pub base: BaseWheel2,
    pub side: MeshWheelSide,
    pub rim_springiness: f32,
    pub rim_damping: f32,
    pub rim_mesh_name: String,
    pub tyre_mesh_name: String,
}

bitflags! {
    #[derive(Default)]
    pub struct ShockOptions: u32 {
        const INVISIBLE    = 1 << 0; // i
        const ACTIVE_LEFT  = 1 << 1; // L
        const ACTIVE_RIGHT = 1 << 2; // R
        const METRIC       = 1 << 3; // m
    }
}

#[derive(Debug, Clone)]
pub struct Shock {
    pub nodes: [NodeId; 2],
    pub spring_rate: f32,
    pub damping: f32,
    pub short_bound: f32,
    pub long_bound: f32,
    pub precompression: f32,
    pub options: ShockOptions,
    pub beam_defaults: Rc<BeamDefaults>,
    pub detacher_group: i32,
}

bitflags! {
    #[derive(Default)]
    pub struct Shock2Options: u32 {
        const INVISIBLE           = 1 << 0; // i
        const SOFT_BUMP_BOUNDS    = 1 << 1; // s
        const METRIC              = 1 << 2; // m
        const ABSOLUTE_METRIC     = 1 << 3; // M
    }
}

#[derive(Debug, Clone)]
pub struct Shock2 {
    pub nodes: [NodeId; 2],
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
    pub beam_defaults: Rc<BeamDefaults>,
    pub detacher_group: i32,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EngineTriggerFunction {
    Clutch,
    Brake,
    Accelerator,
    RpmControl,
    ShiftUp,
    ShiftDown,
}

bitflags! {
    #[derive(Default)]
    pub struct TriggerOptions: u32 {
        const INVISIBLE            = 1 << 0;  // i
        const COMMAND_STYLE        = 1 << 1;  // c
        const START_OFF            = 1 << 2;  // x
        const BLOCK_KEYS           = 1 << 3;  // b
        const BLOCK_TRIGGERS       = 1 << 4;  // B
        const INV_BLOCK_TRIGGERS   = 1 << 5;  // A
        const SWITCH_CMD_NUM       = 1 << 6;  // s
        const UNLOCK_HOOKGROUPS_KEY = 1 << 7; // h
        const LOCK_HOOKGROUPS_KEY  = 1 << 8;  // H
        const CONTINUOUS           = 1 << 9;  // t
        const ENGINE_TRIGGER       = 1 << 10; // E
    }
}

#[derive(Debug, Clone)]
pub struct Trigger {
    pub nodes: [NodeId; 2],
    pub contraction_trigger_limit: f32,
    pub expansion_trigger_limit: f32,
    pub shortbound_trigger_key: i32,
    pub longbound_trigger_key: i32,
    pub options: TriggerOptions,
    pub boundary_timer: f32,
    pub engine_trigger_motor_index: Option<i32>,
    pub engine_trigger_function: Option<EngineTriggerFunction>,
    pub beam_defaults: Rc<BeamDefaults>,
    pub detacher_group: i32,
}

bitflags! {
    #[derive(Default)]
    pub struct CommandOptions: u32 {
        const INVISIBLE         = 1 << 0; // i
        const ROPE              = 1 << 1; // r
        const AUTO_CENTER       = 1 << 2; // c
        const NOT_FASTER        = 1 << 3; // f
        const PRESS_ONCE        = 1 << 4; // p
        const PRESS_ONCE_CENTER = 1 << 5; // o
    }
}

#[derive(Debug, Clone)]
pub struct Command2 {
    pub nodes: [NodeId; 2],
    pub shorten_rate: f32,
    pub lengthen_rate: f32,
    pub max_contraction: f32,
    pub max_extension: f32,
    pub contract_key: i32,
    pub extend_key: i32,
    pub options: CommandOptions,
    pub description: Option<String>,
    pub inertia: OptionalInertia,
    pub affect_engine: f32,
    pub needs_engine: bool,
    pub beam_defaults: Rc<BeamDefaults>,
    pub inertia_defaults: Rc<Inertia>,
    pub detacher_group: i32,
}

impl Command2 {
    pub fn has_option(&self, opt: CommandOptions) -> bool {
        self.options.contains(opt)
    }

    pub fn center_length(&self) -> f32 {
        (self.max_contraction + self.max_extension) / 2.0
    }
}

bitflags! {
    #[derive(Default)]
    pub struct HydroOptions: u32 {
        const INVISIBLE              = 1 << 0; // i
        const DISABLE_ON_HIGH_SPEED  = 1 << 1; // s
        const INPUT_AILERON          = 1 << 2; // a
        const INPUT_RUDDER           = 1 << 3; // r
        const INPUT_ELEVATOR         = 1 << 4; // e
        const INPUT_AILERON_ELEVATOR = 1 << 5; // u
        const INPUT_INV_AILERON_ELEVATOR = 1 << 6; // v
        const INPUT_INV_AILERON      = 1 << 7; // x
        const INPUT_INV_RUDDER       = 1 << 8; // y
        const INPUT_INV_ELEVATOR     = 1 << 9; // g
        const INPUT_REPLAY           = 1 << 10; // h
    }
}

#[derive(Debug, Clone)]
pub struct Hydro {
    pub nodes: [NodeId; 2],
    pub lengthening_factor: f32,
    pub options: HydroOptions,
    pub inertia: OptionalInertia,
    pub inertia_defaults: Rc<Inertia>,
    pub beam_defaults: Rc<BeamDefaults>,
    pub detacher_group: i32,
}

bitflags! {
    #[derive(Default)]
    pub struct AnimatorFlags: u64 {
        const VISIBLE            = 1 << 0;
        const INVISIBLE          = 1 << 1;
        const AIRSPEED           = 1 << 2;
        const VERTICAL_VELOCITY  = 1 << 3;
        const ALTIMETER_100K     = 1 << 4;
        const ALTIMETER_10K      = 1 << 5;
        const ALTIMETER_1K       = 1 << 6;
        const ANGLE_OF_ATTACK    = 1 << 7;
        const FLAP               = 1 << 8;
        const AIR_BRAKE          = 1 << 9;
        const ROLL               = 1 << 10;
        const PITCH              = 1 << 11;
        const BRAKES             = 1 << 12;
        const ACCEL              = 1 << 13;
        const CLUTCH             = 1 << 14;
        const SPEEDO             = 1 << 15;
        const TACHO              = 1 << 16;
        const TURBO              = 1 << 17;
        const PARKING            = 1 << 18;
        const SHIFT_LEFT_RIGHT   = 1 << 19;
        const SHIFT_BACK_FORTH   = 1 << 20;
        const SEQUENTIAL_SHIFT   = 1 << 21;
        const GEAR_SELECT        = 1 << 22;
        const TORQUE             = 1 << 23;
        const DIFFLOCK           = 1 << 24;
        const BOAT_RUDDER        = 1 << 25;
        const BOAT_THROTTLE      = 1 << 26;
        const SHORT_LIMIT        = 1 << 27;
        const LONG_LIMIT         = 1 << 28;
    }
}

bitflags! {
    #[derive(Default)]
    pub struct AeroAnimatorFlags: u32 {
        const THROTTLE = 1 << 0;
        const RPM      = 1 << 1;
        const TORQUE   = 1 << 2;
        const PITCH    = 1 << 3;
        const STATUS   = 1 << 4;
    }
}

#[derive(Debug, Clone, Default)]
pub struct AeroAnimator {
    pub flags: AeroAnimatorFlags,
    pub motor: u32,
}

#[derive(Debug, Clone)]
pub struct Animator {
    pub nodes: [NodeId; 2],
    pub lengthening_factor: f32,
    pub flags: AnimatorFlags,
    pub short_limit: Option<f32>,
    pub long_limit: Option<f32>,
    pub aero_animator: Option<AeroAnimator>,
    pub inertia_defaults: Rc<Inertia>,
    pub beam_defaults: Rc<BeamDefaults>,
    pub detacher_group: i32,
}

#[derive(Debug, Clone)]
pub struct Rotator {
    pub axis_nodes: [NodeId; 2],
    pub base_plate_nodes: [NodeId; 4],
    pub rotating_plate_nodes: [NodeId; 4],
    pub rate: f32,
    pub spin_left_key: i32,
    pub spin_right_key: i32,
    pub inertia: OptionalInertia,
    pub inertia_defaults: Rc<Inertia>,
    pub engine_coupling: f32,
    pub needs_engine: bool,
}

#[derive(Debug, Clone)]
pub struct Rotator2 {
    pub base: Rotator,
    pub rotating_force: f32,
    pub tolerance: f32,
    pub description: Option<String>,
}

bitflags! {
    #[derive(Default)]
    pub struct MotorSourceFlags: u32 {
        const AERO_THROTTLE = 1 << 0;
        const AERO_RPM      = 1 << 1;
        const AERO_TORQUE   = 1 << 2;
        const AERO_PITCH    = 1 << 3;
        const AERO_STATUS   = 1 << 4;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MotorSource {
    pub flags: MotorSourceFlags,
    pub motor_index: u32,
}

bitflags! {
    #[derive(Default)]
    pub struct AnimationSourceFlags: u64 {
        const AIRSPEED        = 1 << 0;
        const VERTICAL_VELOCITY = 1 << 1;
        const ALTIMETER       = 1 << 2;
        const ANGLE_OF_ATTACK = 1 << 3;
        const FLAP            = 1 << 4;
        const AIR_BRAKE       = 1 << 5;
        const ROLL            = 1 << 6;
        const PITCH           = 1 << 7;
        const BRAKES          = 1 << 8;
        const ACCEL           = 1 << 9;
        const CLUTCH          = 1 << 10;
        const SPEEDO          = 1 << 11;
        const TACHO           = 1 << 12;
        const TURBO           = 1 << 13;
        const PARKING         = 1 << 14;
        const SHIFTERMAN1     = 1 << 15;
        const SHIFTERMAN2     = 1 << 16;
        const SEQUENTIAL_SHIFT = 1 << 17;
        const SHIFTERLIN      = 1 << 18;
        const TORQUE          = 1 << 19;
        const HEADING         = 1 << 20;
        const DIFFLOCK        = 1 << 21;
        const BOAT_RUDDER     = 1 << 22;
        const BOAT_THROTTLE   = 1 << 23;
        const STEERING_WHEEL  = 1 << 24;
        const AILERON         = 1 << 25;
        const ELEVATOR        = 1 << 26;
        const AIR_RUDDER      = 1 << 27;
        const PERMANENT       = 1 << 28;
        const EVENT           = 1 << 29;
        const THROTTLE        = 1 << 30;
        const RPM             = 1 << 31;
    }
}

bitflags! {
    #[derive(Default)]
    pub struct AnimationModeFlags: u32 {
        const ROTATION_X = 1 << 0;
        const ROTATION_Y = 1 << 1;
        const ROTATION_Z = 1 << 2;
        const OFFSET_X   = 1 << 3;
        const OFFSET_Y   = 1 << 4;
        const OFFSET_Z   = 1 << 5;
        const AUTO_ANIMATE = 1 << 6;
        const NO_FLIP    = 1 << 7;
        const BOUNCE     = 1 << 8;
        const EVENT_LOCK = 1 << 9;
    }
}

#[derive(Debug, Clone)]
pub struct Animation {
    pub ratio: f32,
    pub lower_limit: f32,
    pub upper_limit: f32,
    pub source: AnimationSourceFlags,
    pub motor_sources: Vec<MotorSource>,
    pub mode: AnimationModeFlags,
    pub event: Option<String>,
}

impl Animation {
    pub fn new() -> Self {
        Self {
            ratio: 1.0,
            lower_limit: -1.0,
            upper_limit: -1.0,
            source: AnimationSourceFlags::empty(),
            motor_sources: Vec::new(),
            mode: AnimationModeFlags::empty(),
            event: None,
        }
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CameraMode {
    Begin,
    External,
    Cinecam(i32),
    Always,
    End,
    Invalid,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CameraSettings {
    pub mode: Option<CameraMode>,
}

#[derive(Debug, Clone)]
pub struct Flexbody {
    pub reference_node: NodeId,
    pub x_axis_node: NodeId,
    pub y_axis_node: NodeId,
    pub offset: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub mesh_name: String,
    pub animations: Vec<Animation>,
    pub forset: Vec<NodeRange>,
    pub camera_settings: CameraSettings,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PropSpecial {
    LeftRearViewMirror,
    RightRearViewMirror,
    SteeringWheelLeftHanded,
    SteeringWheelRightHanded,
    SpinProp,
    Pale,
    DriverSeat,
    DriverSeat2,
    Beacon,
    RedBeacon,
    LightBar,
}

#[derive(Debug, Clone)]
pub struct SteeringWheelSpecial {
    pub offset: Option<Vector3<f32>>,
    pub rotation_angle: f32,
    pub mesh_name: String,
}

impl Default for SteeringWheelSpecial {
    fn default() -> Self {
        Self {
            offset: None,
            rotation_angle: 160.0,
            mesh_name: "dirwheel.mesh".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BeaconSpecial {
    pub color: Vector3<f32>,
    pub flare_material_name: String,
}

impl Default for BeaconSpecial {
    fn default() -> Self {
        Self {
            color: Vector3::new(1.0, 0.5, 0.0),
            flare_material_name: "tracks/beaconflare".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Prop {
    pub reference_node: NodeId,
    pub x_axis_node: NodeId,
    pub y_axis_node: NodeId,
    pub offset: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub mesh_name: String,
    pub animations: Vec<Animation>,
    pub camera_settings: CameraSettings,
    pub special: Option<PropSpecial>,
    pub special_steering_wheel: Option<SteeringWheelSpecial>,
    pub special_beacon: Option<BeaconSpecial>,
}

bitflags! {
    #[derive(Default)]
    pub struct CabOptions: u32 {
        const CONTACT         = 1 << 0; // c
        const BUOYANT         = 1 << 1; // b
        const TEN_X_TOUGHER   = 1 << 2; // p
        const INVULNERABLE    = 1 << 3; // u
        const BUOYANT_NO_DRAG = 1 << 4; // s
        const BUOYANT_ONLY_DRAG = 1 << 5; // r
    }
}

impl CabOptions {
    /// `D = c+b`.
    pub fn is_contact_buoyant(&self) -> bool {
        self.contains(Self::CONTACT) && self.contains(Self::BUOYANT)
    }
    /// `F = p+b`.
    pub fn is_ten_x_tougher_buoyant(&self) -> bool {
        self.contains(Self::TEN_X_TOUGHER) && self.contains(Self::BUOYANT)
    }
    /// `S = u+b`.
    pub fn is_unpenetrable_buoyant(&self) -> bool {
        self.contains(Self::INVULNERABLE) && self.contains(Self::BUOYANT)
    }
}

#[derive(Debug, Clone)]
pub struct Cab {
    pub nodes: [NodeId; 3],
    pub options: CabOptions,
}

#[derive(Debug, Clone)]
pub struct Texcoord {
    pub node: NodeId2,
    pub u: f32,
    pub v: f32,
}

/// Placeholder alias kept distinct from `NodeId` so texcoords can carry a
/// resolved or unresolved id through the parse stage uniformly with the rest
/// of the record set.
pub type NodeId2 = NodeId;

#[derive(Debug, Clone, Default)]
pub struct Submesh {
    pub backmesh: bool,
    pub texcoords: Vec<Texcoord>,
    pub cab_triangles: Vec<Cab>,
}

bitflags! {
    #[derive(Default)]
    pub struct HookOptions: u32 {
        const SELF_LOCK  = 1 << 0;
        const AUTO_LOCK  = 1 << 1;
        const NO_DISABLE = 1 << 2;
        const NO_ROPE    = 1 << 3;
        const VISIBLE    = 1 << 4;
    }
}

#[derive(Debug, Clone)]
pub struct Hook {
    pub node: NodeId,
    pub flags: HookOptions,
    pub option_hook_range: f32,
    pub option_speed_coef: f32,
    pub option_max_force: f32,
    pub option_hookgroup: i32,
    pub option_lockgroup: i32,
    pub option_timer: f32,
    pub option_minimum_range_meters: f32,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TieOptions {
    Visible,
    Invisible,
}

#[derive(Debug, Clone)]
pub struct Tie {
    pub root_node: NodeId,
    pub max_reach_length: f32,
    pub auto_shorten_rate: f32,
    pub min_length: f32,
    pub max_length: f32,
    pub options: TieOptions,
    pub max_stress: f32,
    pub beam_defaults: Rc<BeamDefaults>,
    pub detacher_group: i32,
    pub group: Option<i32>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AxleOptions {
    Open,
    Locked,
    Split,
}

#[derive(Debug, Clone)]
pub struct Axle {
    pub wheels: [[NodeId; 2]; 2],
    pub options: Vec<AxleOptions>,
}

#[derive(Debug, Clone)]
pub struct Lockgroup {
    pub number: i32,
    pub nodes: Vec<NodeId>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ManagedMaterialType {
    FlexmeshStandard,
    Transparent,
    MeshStandard,
    MeshTransparent,
}

#[derive(Debug, Clone)]
pub struct ManagedMaterial {
    pub name: String,
    pub kind: ManagedMaterialType,
    pub double_sided: bool,
    pub diffuse_map: String,
    pub damaged_diffuse_map: Option<String>,
    pub specular_map: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MaterialFlareBinding {
    pub flare_number: i32,
    pub material_name: String,
}

#[derive(Debug, Clone)]
pub struct NodeCollision {
    pub node: NodeId,
    pub radius: f32,
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub emitter_node: NodeId,
    pub reference_node: NodeId,
    pub particle_system_name: String,
}

#[derive(Debug, Clone)]
pub struct Pistonprop {
    pub reference_node: NodeId,
    pub axis_node: NodeId,
    pub blade_tip_nodes: [NodeId; 4],
    pub couple_node: Option<NodeId>,
    pub turbine_power_kw: f32,
    pub pitch: f32,
    pub airfoil: String,
}

#[derive(Debug, Clone)]
pub struct RailGroup {
    pub id: i32,
    pub node_list: Vec<NodeRange>,
}

#[derive(Debug, Clone)]
pub struct Ropable {
    pub node: NodeId,
    pub group: i32,
    pub multilock: bool,
}

impl Ropable {
    pub const DEFAULT_GROUP: i32 = -1;
}

#[derive(Debug, Clone)]
pub struct Rope {
    pub root_node: NodeId,
    pub end_node: NodeId,
    pub invisible: bool,
    pub beam_defaults: Rc<BeamDefaults>,
    pub detacher_group: i32,
}

#[derive(Debug, Clone)]
pub struct Screwprop {
    pub prop_node: NodeId,
    pub back_node: NodeId,
    pub top_node: NodeId,
    pub power: f32,
}

bitflags! {
    #[derive(Default)]
    pub struct SlideNodeConstraints: u32 {
        const ATTACH_ALL     = 1 << 0;
        const ATTACH_FOREIGN = 1 << 1;
        const ATTACH_SELF    = 1 << 2;
        const ATTACH_NONE    = 1 << 3;
    }
}

#[derive(Debug, Clone)]
pub struct SlideNode {
    pub slide_node: NodeId,
    pub rail_node_ranges: Vec<NodeRange>,
    pub spring_rate: f32,
    pub break_force: Option<f32>,
    pub tolerance: f32,
    pub railgroup_id: Option<i32>,
    pub attachment_rate: f32,
    pub max_attachment_distance: f32,
    pub constraint_flags: SlideNodeConstraints,
}

#[derive(Debug, Clone)]
pub struct SoundSource {
    pub node: NodeId,
    pub sound_script_name: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SoundSource2Mode {
    Always,
    Outside,
    Cinecam(i32),
}

#[derive(Debug, Clone)]
pub struct SoundSource2 {
    pub base: SoundSource,
    pub mode: SoundSource2Mode,
}

#[derive(Debug, Clone, Copy)]
pub struct SpeedLimiter {
    pub max_speed: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct TorqueCurveSample {
    pub power: f32,
    pub torque_percent: f32,
}

#[derive(Debug, Clone, Default)]
pub struct TorqueCurve {
    pub samples: Vec<TorqueCurveSample>,
    pub predefined_func_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Turbojet {
    pub front_node: NodeId,
    pub back_node: NodeId,
    pub side_node: NodeId,
    pub is_reversable: bool,
    pub dry_thrust: f32,
    pub wet_thrust: f32,
    pub front_diameter: f32,
    pub back_diameter: f32,
    pub nozzle_length: f32,
}

#[derive(Debug, Clone)]
pub struct Turboprop2 {
    pub reference_node: NodeId,
    pub axis_node: NodeId,
    pub blade_tip_nodes: [NodeId; 4],
    pub turbine_power_kw: f32,
    pub airfoil: String,
    pub couple_node: Option<NodeId>,
}

#[derive(Debug, Clone)]
pub struct VideoCamera {
    pub reference_node: NodeId,
    pub left_node: NodeId,
    pub bottom_node: NodeId,
    pub alt_reference_node: Option<NodeId>,
    pub alt_orientation_node: Option<NodeId>,
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

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum WingControl {
    Normal,
    FlapAilerons,
    Brakes,
    ElevatorAilerons,
    Elevator,
    Rudder,
    SpoilerLeft,
    SpoilerRight,
    Flap,
    DiggingAilerons,
    Gear,
    StabilatorLeft,
    UndefinedLeft,
    UndefinedRight,
    SpoilerLeftControllable,
    SpoilerRightControllable,
}

#[derive(Debug, Clone)]
pub struct Wing {
    pub nodes: [NodeId; 8],
    pub tex_coords: [(f32, f32); 4],
    pub control_surface: WingControl,
    pub chord_point: f32,
    pub min_deflection: f32,
    pub max_deflection: f32,
    pub airfoil: String,
    pub efficiency_coef: f32,
}

#[derive(Debug, Clone)]
pub enum Fusedrag {
    AutoCalc,
    Explicit {
        front_node: NodeId,
        rear_node: NodeId,
        approximate_width: f32,
        airfoil_name: String,
        area_coefficient: f32,
    },
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub center_node: NodeId,
    pub back_node: NodeId,
    pub left_node: NodeId,
}

#[derive(Debug, Clone, Default)]
pub struct CameraRail {
    pub nodes: Vec<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct CollisionBox {
    pub nodes: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Airbrake {
    pub reference_node: NodeId,
    pub x_axis_node: NodeId,
    pub y_axis_node: NodeId,
    pub additional_node: NodeId,
    pub offset: Vector3<f32>,
    pub width: f32,
    pub height: f32,
    pub max_inclination_angle: f32,
    pub texcoord_x1: f32,
    pub texcoord_x2: f32,
    pub texcoord_y1: f32,
    pub texcoord_y2: f32,
    pub lift_coefficient: f32,
}

#[derive(Debug, Clone)]
pub struct Author {
    pub kind: String,
    pub forum_account_id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default)]
pub struct Fileinfo {
    pub unique_id: String,
    pub category_id: i32,
    pub file_version: i32,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ExtCameraMode {
    Classic,
    Cinecam,
    Node,
}

#[derive(Debug, Clone)]
pub struct ExtCamera {
    pub mode: ExtCameraMode,
    pub node: Option<NodeId>,
}

#[derive(Debug, Clone, Copy)]
pub struct SkeletonSettings {
    pub visibility_range_meters: f32,
    pub beam_thickness_meters: f32,
}

impl Default for SkeletonSettings {
    fn default() -> Self {
        Self {
            visibility_range_meters: 150.0,
            beam_thickness_meters: 0.01,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CruiseControl {
    pub min_speed: f32,
    pub autobrake: i32,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FlareType {
    Headlight,
    Brakelight,
    LeftBlinker,
    RightBlinker,
    ReverseLight,
    User,
}

#[derive(Debug, Clone)]
pub struct Flare2 {
    pub reference_node: NodeId,
    pub x: f32,
    pub y: f32,
    pub offset: Vector3<f32>,
    pub kind: FlareType,
    pub control_number: i32,
    pub blink_delay_milis: i32,
    pub size: f32,
    pub material_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Globals {
    pub dry_mass: f32,
    pub cargo_mass: f32,
    pub material_name: Option<String>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MapMode {
    Off,
    Simple,
    Zoom,
}

#[derive(Debug, Clone, Default)]
pub struct GuiSettings {
    pub tacho_material: Option<String>,
    pub speedo_material: Option<String>,
    pub speedo_highest_kph: f32,
    pub use_max_rpm: bool,
    pub help_material: Option<String>,
    pub map_mode: Option<MapMode>,
    pub dashboard_layouts: Vec<String>,
    pub rtt_dashboard_layouts: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Engine {
    pub shift_down_rpm: f32,
    pub shift_up_rpm: f32,
    pub torque: f32,
    pub global_gear_ratio: f32,
    pub reverse_gear_ratio: f32,
    pub neutral_gear_ratio: f32,
    pub gear_ratios: Vec<f32>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EngineType {
    Car,
    Truck,
}

#[derive(Debug, Clone)]
pub struct Engoption {
    pub inertia: f32,
    pub engine_type: EngineType,
    pub clutch_force: Option<f32>,
    pub shift_time: Option<f32>,
    pub clutch_time: Option<f32>,
    pub post_shift_time: Option<f32>,
    pub idle_rpm: Option<f32>,
    pub stall_rpm: Option<f32>,
    pub max_idle_mixture: Option<f32>,
    pub min_idle_mixture: Option<f32>,
}

#[derive(Debug, Clone, Copy)]
pub struct Brakes {
    pub default_braking_force: f32,
    pub parking_brake_force: Option<f32>,
}

impl Default for Brakes {
    fn default() -> Self {
        Self {
            default_braking_force: 30_000.0,
            parking_brake_force: None,
        }
    }
}

bitflags! {
    #[derive(Default)]
    pub struct AlbTcMode: u32 {
        const ON           = 1 << 0;
        const OFF          = 1 << 1;
        const NO_DASHBOARD = 1 << 2;
        const NO_TOGGLE    = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AntiLockBrakes {
    pub regulation_force: f32,
    pub min_speed: f32,
    pub pulse_per_sec: f32,
    pub mode: AlbTcMode,
}

#[derive(Debug, Clone, Copy)]
pub struct TractionControl {
    pub regulation_force: f32,
    pub wheel_slip: f32,
    pub fade_speed: f32,
    pub pulse_per_sec: f32,
    pub mode: AlbTcMode,
}

#[derive(Debug, Clone, Copy)]
pub struct SlopeBrake {
    pub regulating_force: f32,
    pub attach_angle: f32,
    pub release_angle: f32,
}

impl Default for SlopeBrake {
    fn default() -> Self {
        Self {
            regulating_force: 6.0,
            attach_angle: 5.0,
            release_angle: 10.0,
        }
    }
}

/// Any single-numeric-node section (`contacters`) collapses to this.
#[derive(Debug, Clone)]
pub struct Contacter {
    pub node: NodeId,
}
