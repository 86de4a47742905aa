//! Character body: velocity owned by the simulation
//!
//! Архитектура:
//! - Locomotion пишет horizontal velocity + one-shot impulses
//! - Headless режим: `integrate_headless_body` (gravity, slide friction, flat floor y=0)
//! - Rapier: только синхронизация `Velocity` и `Collider` (коллизии: на стороне движка)
//!
//! Детерминизм: fixed timestep (60Hz)

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::locomotion::CapsuleShape;

/// Gravity for the headless body (m/s²)
pub const GRAVITY: f32 = -9.81;

/// Velocity + ground contact of a character
///
/// Transform.translation = центр капсулы; ноги на `translation.y - height / 2`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CharacterBody {
    pub velocity: Vec3,
    pub grounded: bool,
    /// Horizontal velocity decay rate (1/s); non-zero only while sliding
    pub horizontal_drag: f32,
}

impl Default for CharacterBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            grounded: true,
            horizontal_drag: 0.0,
        }
    }
}

/// Marker: body integrated by `integrate_headless_body`
///
/// Без этого маркера CharacterBody только читается/пишется gameplay-слоем,
/// а позицию двигает внешний движок.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct HeadlessBody;

/// Система интеграции velocity → Transform (headless режим)
///
/// Gravity в воздухе, экспоненциальное трение при `horizontal_drag > 0`,
/// плоский пол на y = 0 (ноги не проваливаются ниже).
pub fn integrate_headless_body(
    time: Res<Time<Fixed>>,
    mut query: Query<(&mut CharacterBody, &mut Transform, &CapsuleShape), With<HeadlessBody>>,
) {
    let delta = time.delta_secs();

    for (mut body, mut transform, capsule) in query.iter_mut() {
        let half_height = capsule.height * 0.5;

        if !body.grounded {
            body.velocity.y += GRAVITY * delta;
        }

        if body.horizontal_drag > 0.0 {
            let keep = (-body.horizontal_drag * delta).exp();
            body.velocity.x *= keep;
            body.velocity.z *= keep;
        }

        transform.translation += body.velocity * delta;

        // Пол: ноги на y=0
        let feet_y = transform.translation.y - half_height;
        if feet_y <= 0.0 {
            transform.translation.y = half_height;
            if body.velocity.y < 0.0 {
                body.velocity.y = 0.0;
            }
            body.grounded = true;
        } else {
            body.grounded = false;
        }
    }
}

/// Система синхронизации CharacterBody.velocity → Rapier Velocity
pub fn sync_velocity_to_rapier(mut query: Query<(&CharacterBody, &mut Velocity)>) {
    for (body, mut rapier_velocity) in query.iter_mut() {
        rapier_velocity.linvel = body.velocity;
    }
}

/// Система пересоздания Rapier collider при stand/crouch
///
/// `Collider::capsule_y` принимает половину длины цилиндрической части.
pub fn sync_capsule_collider(
    mut query: Query<(&CapsuleShape, &mut Collider), Changed<CapsuleShape>>,
) {
    for (capsule, mut collider) in query.iter_mut() {
        *collider = capsule_collider(capsule);
    }
}

/// Rapier collider for a capsule shape
pub fn capsule_collider(capsule: &CapsuleShape) -> Collider {
    let half_segment = (capsule.height * 0.5 - capsule.radius).max(0.0);
    Collider::capsule_y(half_segment, capsule.radius)
}
