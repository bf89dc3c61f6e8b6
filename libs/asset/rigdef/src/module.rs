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
//! A `Module` is a named bundle of every record vector a rig-def file can
//! produce. A synthetic `root` module receives everything outside a
//! `section ... end_section` block; `section <ver> <name>` switches the
//! parser's current module, `end_section` returns to root.
use std::collections::HashMap;

use crate::records::*;

#[derive(Debug, Clone, Default)]
pub struct Module {
    pub name: String,
    pub help_panel_material_name: Option<String>,
    pub description: Vec<String>,
    pub contacter_nodes: Vec<Contacter>,

    pub authors: Vec<Author>,
    pub fileinfo: Option<Fileinfo>,
    pub guid: Option<String>,
    pub minimum_mass: Option<f32>,
    pub globals: Option<Globals>,
    pub managed_materials: Vec<ManagedMaterial>,
    pub gui_settings: Option<GuiSettings>,

    pub nodes: Vec<Node>,
    pub beams: Vec<Beam>,
    pub cinecams: Vec<Cinecam>,
    pub shocks: Vec<Shock>,
    pub shocks2: Vec<Shock2>,

    pub commands2: Vec<Command2>,
    pub ties: Vec<Tie>,
    pub animators: Vec<Animator>,
    pub hydros: Vec<Hydro>,

    pub wheels: Vec<Wheel>,
    pub wheels2: Vec<Wheel2>,
    pub meshwheels: Vec<MeshWheel>,
    pub meshwheels2: Vec<MeshWheel2>,
    pub flexbodywheels: Vec<FlexBodyWheel>,

    pub turbojets: Vec<Turbojet>,
    pub turboprops2: Vec<Turboprop2>,
    pub pistonprops: Vec<Pistonprop>,
    pub screwprops: Vec<Screwprop>,
    pub wings: Vec<Wing>,
    pub fusedrag: Option<Fusedrag>,

    pub flares2: Vec<Flare2>,
    pub cameras: Vec<Camera>,
    pub camera_rails: Vec<CameraRail>,
    pub videocameras: Vec<VideoCamera>,
    pub ext_camera: Option<ExtCamera>,
    pub props: Vec<Prop>,

    pub engine: Option<Engine>,
    pub engoption: Option<Engoption>,
    pub brakes: Option<Brakes>,
    pub traction_control: Option<TractionControl>,
    pub antilockbrakes: Option<AntiLockBrakes>,
    pub slope_brake: Option<SlopeBrake>,
    pub cruise_control: Option<CruiseControl>,
    pub speed_limiter: Option<SpeedLimiter>,
    pub torque_curve: Option<TorqueCurve>,
    pub axles: Vec<Axle>,

    pub rotators: Vec<Rotator>,
    pub rotators2: Vec<Rotator2>,
    pub triggers: Vec<Trigger>,
    pub lockgroups: Vec<Lockgroup>,
    pub hooks: Vec<Hook>,
    pub railgroups: Vec<RailGroup>,
    pub slidenodes: Vec<SlideNode>,
    pub ropes: Vec<Rope>,
    pub ropables: Vec<Ropable>,
    pub particles: Vec<Particle>,
    pub collision_boxes: Vec<CollisionBox>,
    pub material_flare_bindings: Vec<MaterialFlareBinding>,
    pub node_collisions: Vec<NodeCollision>,
    pub submeshes: Vec<Submesh>,
    pub airbrakes: Vec<Airbrake>,
    pub skeleton_settings: Option<SkeletonSettings>,
    pub flexbodies: Vec<Flexbody>,
    pub sound_sources: Vec<SoundSource>,
    pub sound_sources2: Vec<SoundSource2>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

pub const ROOT_MODULE: &str = "root";

/// `name -> Module`, with the synthetic root present from construction.
#[derive(Debug, Clone)]
pub struct ModuleRegistry {
    modules: HashMap<String, Module>,
}

impl Default for ModuleRegistry {
    fn default() -> Self {
        let mut modules = HashMap::new();
        modules.insert(ROOT_MODULE.to_string(), Module::new(ROOT_MODULE));
        Self { modules }
    }
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create(&mut self, name: &str) -> &mut Module {
        self.modules
            .entry(name.to_string())
            .or_insert_with(|| Module::new(name))
    }

    pub fn get(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    pub fn root(&self) -> &Module {
        self.modules.get(ROOT_MODULE).expect("root module always present")
    }

    pub fn root_mut(&mut self) -> &mut Module {
        self.modules
            .get_mut(ROOT_MODULE)
            .expect("root module always present")
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    pub fn into_inner(self) -> HashMap<String, Module> {
        self.modules
    }
}
