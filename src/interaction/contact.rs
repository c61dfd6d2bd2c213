use bevy::math::bounding::BoundingSphere;
use bevy::prelude::*;

use crate::math::Collider;

/// Marks a collider as an overlap volume that reports contacts.
#[derive(Component, Debug, Default)]
#[require(Touching)]
pub struct Sensor;

/// Moving body that can touch sensors.
#[derive(Component, Debug, Clone, Copy)]
pub struct Body {
    pub radius: f32,
}

/// Bodies currently inside a sensor.
#[derive(Component, Debug, Default)]
pub struct Touching(Vec<Entity>);

impl Touching {
    pub fn contains(&self, body: Entity) -> bool {
        self.0.contains(&body)
    }
}

/// Fired on the first frame a body overlaps a sensor.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeginOverlap {
    pub sensor: Entity,
    pub other: Entity,
}

pub fn detect_contacts(
    mut sensors: Query<(Entity, &Transform, &Collider, &mut Touching), With<Sensor>>,
    bodies: Query<(Entity, &Transform, &Body)>,
    mut overlaps: MessageWriter<BeginOverlap>,
) {
    for (sensor, sensor_tf, collider, mut touching) in &mut sensors {
        let mut now_touching = Vec::new();
        for (body, body_tf, shape) in &bodies {
            if body == sensor {
                continue;
            }
            let volume = BoundingSphere::new(body_tf.translation, shape.radius);
            if collider.touches(sensor_tf.translation, &volume) {
                if !touching.contains(body) {
                    overlaps.write(BeginOverlap {
                        sensor,
                        other: body,
                    });
                }
                now_touching.push(body);
            }
        }
        touching.0 = now_touching;
    }
}
