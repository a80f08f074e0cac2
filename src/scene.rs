//! Scene graph port
//!
//! The simulation only ever adds, removes and places objects, then asks for a
//! frame. `SceneGraph` keeps that retained state in memory; the renderer draws
//! from it and tests inspect it directly.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::sim::VehicleKind;

/// Opaque handle to an object in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u32);

/// Who is driving a vehicle body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleRole {
    Player,
    Traffic,
}

/// What an object in the scene looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Vehicle { kind: VehicleKind, role: VehicleRole },
    /// Debug disc showing a collision hit zone
    HitZoneMarker,
}

/// A placed object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    pub kind: ObjectKind,
    pub position: Vec2,
    /// Rotation about the vertical axis (radians)
    pub rotation: f32,
}

/// Everything the simulation needs from a rendering backend
pub trait SceneHandle {
    /// Add an object at the origin
    fn add(&mut self, kind: ObjectKind) -> ObjectId;
    /// Remove an object; unknown ids are ignored
    fn remove(&mut self, id: ObjectId);
    /// Move an object
    fn place(&mut self, id: ObjectId, position: Vec2, rotation: f32);
    /// Draw the current scene
    fn render(&mut self);
}

/// In-memory scene graph
#[derive(Debug, Default)]
pub struct SceneGraph {
    objects: BTreeMap<ObjectId, SceneObject>,
    next_id: u32,
    frames_rendered: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Objects in insertion order
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}

impl SceneHandle for SceneGraph {
    fn add(&mut self, kind: ObjectKind) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.objects.insert(
            id,
            SceneObject {
                kind,
                position: Vec2::ZERO,
                rotation: 0.0,
            },
        );
        id
    }

    fn remove(&mut self, id: ObjectId) {
        self.objects.remove(&id);
    }

    fn place(&mut self, id: ObjectId, position: Vec2, rotation: f32) {
        if let Some(object) = self.objects.get_mut(&id) {
            object.position = position;
            object.rotation = rotation;
        }
    }

    fn render(&mut self) {
        self.frames_rendered += 1;
    }
}

/// Scene objects making up one vehicle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleVisual {
    pub body: ObjectId,
    /// Hit zone markers, front to rear (empty unless hit zones are shown)
    pub hit_zones: Vec<ObjectId>,
}

impl VehicleVisual {
    /// Move the body
    pub fn place<S: SceneHandle + ?Sized>(&self, scene: &mut S, position: Vec2, rotation: f32) {
        scene.place(self.body, position, rotation);
    }

    /// Move the markers onto hit zone points (extra points or markers are ignored)
    pub fn place_hit_zones<S, I>(&self, scene: &mut S, points: I)
    where
        S: SceneHandle + ?Sized,
        I: IntoIterator<Item = Vec2>,
    {
        for (marker, point) in self.hit_zones.iter().zip(points) {
            scene.place(*marker, point, 0.0);
        }
    }

    /// Take the body and its markers out of the scene
    pub fn remove_from<S: SceneHandle + ?Sized>(&self, scene: &mut S) {
        scene.remove(self.body);
        for marker in &self.hit_zones {
            scene.remove(*marker);
        }
    }
}

/// Build a vehicle body, plus one marker per hit zone when `show_hit_zones` is set
pub fn build_vehicle<S: SceneHandle + ?Sized>(
    scene: &mut S,
    kind: VehicleKind,
    role: VehicleRole,
    show_hit_zones: bool,
) -> VehicleVisual {
    let body = scene.add(ObjectKind::Vehicle { kind, role });
    let hit_zones = if show_hit_zones {
        (0..kind.hit_zone_count())
            .map(|_| scene.add(ObjectKind::HitZoneMarker))
            .collect()
    } else {
        Vec::new()
    };

    VehicleVisual { body, hit_zones }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_vehicle_markers() {
        let mut scene = SceneGraph::new();

        let car = build_vehicle(&mut scene, VehicleKind::Car, VehicleRole::Traffic, true);
        assert_eq!(car.hit_zones.len(), 2);

        let truck = build_vehicle(&mut scene, VehicleKind::Truck, VehicleRole::Traffic, true);
        assert_eq!(truck.hit_zones.len(), 3);

        let plain = build_vehicle(&mut scene, VehicleKind::Truck, VehicleRole::Traffic, false);
        assert!(plain.hit_zones.is_empty());

        assert_eq!(scene.len(), 3 + 4 + 1);
    }

    #[test]
    fn test_remove_vehicle_takes_markers() {
        let mut scene = SceneGraph::new();
        let player = build_vehicle(&mut scene, VehicleKind::Car, VehicleRole::Player, true);
        let truck = build_vehicle(&mut scene, VehicleKind::Truck, VehicleRole::Traffic, true);

        truck.remove_from(&mut scene);
        assert_eq!(scene.len(), 3);
        assert!(scene.contains(player.body));
        assert!(!scene.contains(truck.body));
    }

    #[test]
    fn test_place_and_render() {
        let mut scene = SceneGraph::new();
        let car = build_vehicle(&mut scene, VehicleKind::Car, VehicleRole::Player, true);

        car.place(&mut scene, Vec2::new(3.0, 4.0), 1.0);
        car.place_hit_zones(&mut scene, [Vec2::new(1.0, 0.0), Vec2::new(-1.0, 0.0)]);
        scene.render();

        let body = scene.get(car.body).unwrap();
        assert_eq!(body.position, Vec2::new(3.0, 4.0));
        assert_eq!(body.rotation, 1.0);
        assert_eq!(scene.get(car.hit_zones[1]).unwrap().position, Vec2::new(-1.0, 0.0));
        assert_eq!(scene.frames_rendered(), 1);
    }
}
