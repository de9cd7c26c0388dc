use bevy::math::Vec2;
use bevy::prelude::Resource;
use log::{debug, info};
use rand::Rng;

use crate::input::DirectionalKeys;
use crate::util::distance;
use crate::{
    BODY_MASS, BODY_RADIUS, BODY_SEGMENTS, DRIFT_AFTER_GRAVITY, FRICTION, GRAVITATIONAL_CONSTANT,
    HEIGHT, INPUT_SPEED, SPAWN_MARGIN, WIDTH,
};

/// Below this distance the gravity step is skipped.
pub(crate) const GRAVITY_EPSILON: f32 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Role {
    /// The steered, gravity-dominant anchor.
    Primary,
    /// Pulled toward the primary.
    Secondary,
}

impl Role {
    pub(crate) const ALL: [Role; 2] = [Role::Primary, Role::Secondary];

    pub(crate) fn index(self) -> usize {
        match self {
            Role::Primary => 0,
            Role::Secondary => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Body {
    pub(crate) name: String,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) radius: f32,
    pub(crate) mass: f32,
    pub(crate) segments: u32,
}

impl Body {
    pub(crate) fn new(name: &str, position: Vec2, radius: f32, mass: f32) -> Body {
        debug_assert!(radius > 0., "radius must be positive");
        debug_assert!(mass > 0., "mass must be positive");
        Body {
            name: name.to_string(),
            position,
            velocity: Vec2::ZERO,
            radius,
            mass,
            segments: BODY_SEGMENTS,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_velocity(mut self, velocity: Vec2) -> Body {
        self.velocity = velocity;
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Settings {
    pub(crate) viewport: Vec2,
    pub(crate) friction: f32,
    pub(crate) input_speed: f32,
    pub(crate) gravitational_constant: f32,
    /// Move the secondary by its velocity again after gravity, on top of the
    /// regular integration step.
    pub(crate) drift_after_gravity: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            viewport: Vec2::new(WIDTH, HEIGHT),
            friction: FRICTION,
            input_speed: INPUT_SPEED,
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            drift_after_gravity: DRIFT_AFTER_GRAVITY,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Collision {
    pub(crate) first: String,
    pub(crate) second: String,
}

/// Advances every body by its velocity, damps it, and reflects velocity off
/// the viewport edges. Positions are not clamped.
pub(crate) fn update_positions(bodies: &mut [Body], settings: &Settings) {
    for body in bodies.iter_mut() {
        body.position += body.velocity;
        body.velocity *= settings.friction;

        if body.position.x - body.radius < 0. || body.position.x + body.radius > settings.viewport.x
        {
            body.velocity.x = -body.velocity.x;
        }
        if body.position.y - body.radius < 0. || body.position.y + body.radius > settings.viewport.y
        {
            body.velocity.y = -body.velocity.y;
        }
    }
}

/// Scans pairs `(i, j)` with `i < j` in ascending order and swaps the
/// velocities of every overlapping pair. Later pairs see the velocities left
/// by earlier swaps in the same pass.
pub(crate) fn check_collisions(bodies: &mut [Body]) -> Vec<Collision> {
    let mut collisions = vec![];
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let body = &mut head[i];
        for other in tail.iter_mut() {
            let radius_sum = body.radius + other.radius;
            if body.position.distance_squared(other.position) <= radius_sum * radius_sum {
                std::mem::swap(&mut body.velocity, &mut other.velocity);
                collisions.push(Collision {
                    first: body.name.clone(),
                    second: other.name.clone(),
                });
            }
        }
    }
    collisions
}

/// Accelerates the secondary toward the primary by `G * M / d^2`.
/// Returns false when the bodies are too close for a finite result.
pub(crate) fn apply_gravity(primary: &Body, secondary: &mut Body, settings: &Settings) -> bool {
    let distance = distance(primary.position, secondary.position);
    if distance < GRAVITY_EPSILON {
        return false;
    }

    let direction = (primary.position - secondary.position) / distance;
    let acceleration =
        direction * settings.gravitational_constant * primary.mass / (distance * distance);
    secondary.velocity += acceleration;

    if settings.drift_after_gravity {
        secondary.position += secondary.velocity;
    }
    true
}

pub(crate) struct Drawable {
    pub(crate) role: Role,
    pub(crate) position: Vec2,
    pub(crate) radius: f32,
    pub(crate) segments: u32,
}

#[derive(Resource)]
pub(crate) struct Simulation {
    bodies: [Body; 2],
    settings: Settings,
}

impl Simulation {
    pub(crate) fn new(settings: Settings, rng: &mut impl Rng) -> Simulation {
        let viewport = settings.viewport;
        let primary = Body::new("User", viewport / 2., BODY_RADIUS, BODY_MASS);
        let secondary = Body::new(
            "Enemy",
            Vec2::new(
                rng.random_range(SPAWN_MARGIN..viewport.x - SPAWN_MARGIN),
                rng.random_range(SPAWN_MARGIN..viewport.y - SPAWN_MARGIN),
            ),
            BODY_RADIUS,
            BODY_MASS,
        );
        debug!("spawned {:?} and {:?}", primary, secondary);
        Simulation::with_bodies(primary, secondary, settings)
    }

    pub(crate) fn with_bodies(primary: Body, secondary: Body, settings: Settings) -> Simulation {
        Simulation {
            bodies: [primary, secondary],
            settings,
        }
    }

    pub(crate) fn settings(&self) -> &Settings {
        &self.settings
    }

    #[cfg(test)]
    pub(crate) fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn body(&self, role: Role) -> &Body {
        &self.bodies[role.index()]
    }

    /// Runs one frame: input, integration, collisions, `render`, then gravity.
    /// Gravity runs after rendering so its effect shows from the next frame.
    pub(crate) fn tick(
        &mut self,
        keys: DirectionalKeys,
        render: impl FnOnce(&[Drawable]),
    ) -> Vec<Collision> {
        let speed = self.settings.input_speed;
        keys.apply(&mut self.bodies[Role::Primary.index()].velocity, speed);

        update_positions(&mut self.bodies, &self.settings);

        let collisions = check_collisions(&mut self.bodies);
        for collision in &collisions {
            info!("Collision: {} <-> {}", collision.first, collision.second);
        }

        render(&self.draw());

        let [primary, secondary] = &mut self.bodies;
        if !apply_gravity(primary, secondary, &self.settings) {
            debug!("{} and {} coincide, gravity skipped", primary.name, secondary.name);
        }

        collisions
    }

    pub(crate) fn draw(&self) -> Vec<Drawable> {
        Role::ALL
            .iter()
            .map(|&role| {
                let body = self.body(role);
                Drawable {
                    role,
                    position: body.position,
                    radius: body.radius,
                    segments: body.segments,
                }
            })
            .collect::<Vec<_>>()
    }
}
