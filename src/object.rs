use bevy_heavy::ComputeMassProperties3d;
use bevy_math::primitives::{Capsule3d, Cuboid, Cylinder, Sphere};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Engine-assigned identifier of a scene object.
pub type ObjectId = u32;

/// Static data for one scene object. Cached once at bootstrap; it does not
/// change between frames.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectStatic {
    pub id: ObjectId,

    /// Model name as reported by the engine.
    pub name: String,

    /// Collision shape used to derive mass.
    pub shape: ShapePrimitive,

    /// Density in kg/m³.
    pub density: f32,

    /// Mass in kg, computed from shape volume and density via `bevy_heavy`
    /// unless overridden with [`with_mass`](Self::with_mass).
    pub mass: f32,
}

impl ObjectStatic {
    pub fn new(id: ObjectId, name: impl Into<String>, shape: ShapePrimitive, density: f32) -> Self {
        let mass = shape.to_bevy_primitive().mass(density);
        Self {
            id,
            name: name.into(),
            shape,
            density,
            mass,
        }
    }

    /// Replaces the derived mass with an explicit one.
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }
}

/// Static data for every object in the scene, keyed by id.
#[derive(Clone, Debug, Default)]
pub struct ObjectRegistry {
    objects: HashMap<ObjectId, ObjectStatic>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, object: ObjectStatic) {
        self.objects.insert(object.id, object);
    }

    pub fn get(&self, id: ObjectId) -> Option<&ObjectStatic> {
        self.objects.get(&id)
    }

    /// Mass of `id`, or zero for objects the engine never described.
    pub fn mass_of(&self, id: ObjectId) -> f32 {
        self.get(id).map_or(0.0, |o| o.mass)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl FromIterator<ObjectStatic> for ObjectRegistry {
    fn from_iter<I: IntoIterator<Item = ObjectStatic>>(iter: I) -> Self {
        let mut registry = Self::new();
        for object in iter {
            registry.insert(object);
        }
        registry
    }
}

/// Supported collision primitives for scene objects.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub enum ShapePrimitive {
    /// A box defined by half-extents (x, y, z).
    Box(Vec3),
    /// A cylinder defined by radius and height (aligned along Y axis).
    Cylinder { radius: f32, height: f32 },
    /// A sphere defined by radius.
    Sphere(f32),
    /// A capsule defined by radius and height (aligned along Y axis).
    Capsule { radius: f32, height: f32 },
}

/// A type-erased wrapper so we can call [`ComputeMassProperties3d`] on any variant.
#[derive(Clone, Copy, Debug)]
pub enum BevyPrimitive {
    Cuboid(Cuboid),
    Cylinder(Cylinder),
    Sphere(Sphere),
    Capsule(Capsule3d),
}

impl ComputeMassProperties3d for BevyPrimitive {
    fn mass(&self, density: f32) -> f32 {
        match self {
            Self::Cuboid(s) => s.mass(density),
            Self::Cylinder(s) => s.mass(density),
            Self::Sphere(s) => s.mass(density),
            Self::Capsule(s) => s.mass(density),
        }
    }

    fn unit_principal_angular_inertia(&self) -> Vec3 {
        match self {
            Self::Cuboid(s) => s.unit_principal_angular_inertia(),
            Self::Cylinder(s) => s.unit_principal_angular_inertia(),
            Self::Sphere(s) => s.unit_principal_angular_inertia(),
            Self::Capsule(s) => s.unit_principal_angular_inertia(),
        }
    }

    fn center_of_mass(&self) -> Vec3 {
        match self {
            Self::Cuboid(s) => s.center_of_mass(),
            Self::Cylinder(s) => s.center_of_mass(),
            Self::Sphere(s) => s.center_of_mass(),
            Self::Capsule(s) => s.center_of_mass(),
        }
    }
}

impl ShapePrimitive {
    /// Convert to the corresponding `bevy_math` primitive for mass-property computation.
    pub fn to_bevy_primitive(self) -> BevyPrimitive {
        match self {
            Self::Box(half_extents) => BevyPrimitive::Cuboid(Cuboid {
                half_size: half_extents,
            }),
            Self::Cylinder { radius, height } => {
                BevyPrimitive::Cylinder(Cylinder::new(radius, height))
            }
            Self::Sphere(r) => BevyPrimitive::Sphere(Sphere::new(r)),
            Self::Capsule { radius, height } => {
                BevyPrimitive::Capsule(Capsule3d::new(radius, height))
            }
        }
    }
}
