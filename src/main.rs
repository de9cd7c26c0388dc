use bevy::prelude::*;
use bevy::window::WindowResolution;
use log::{error, info};

use crate::input::DirectionalKeys;
use crate::simulation::{Role, Settings, Simulation};
use crate::util::to_world;

mod input;
mod simulation;
mod util;

pub(crate) const WIDTH: f32 = 1400.0;
pub(crate) const HEIGHT: f32 = 1000.0;
pub(crate) const BODY_RADIUS: f32 = 30.;
pub(crate) const BODY_MASS: f32 = 10000.;
pub(crate) const BODY_SEGMENTS: u32 = 50;
pub(crate) const SPAWN_MARGIN: f32 = 50.;
pub(crate) const INPUT_SPEED: f32 = 5.;
pub(crate) const FRICTION: f32 = 0.9;
pub(crate) const GRAVITATIONAL_CONSTANT: f32 = 0.00095;
pub(crate) const DRIFT_AFTER_GRAVITY: bool = false;
pub(crate) const YELLOW: Color = Color::srgb(1., 1.0, 0.);
pub(crate) const BACKGROUND: Color = Color::srgb(0.2, 0.3, 0.4);

/// Links a rendered entity to its slot in the simulation.
#[derive(Component)]
struct Avatar(Role);

fn main() -> AppExit {
    let simulation = Simulation::new(Settings::default(), &mut rand::rng());

    let exit = App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Circle Collision Demo".into(),
                resolution: WindowResolution::new(WIDTH as u32, HEIGHT as u32),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(BACKGROUND))
        .insert_resource(simulation)
        .add_systems(Startup, setup)
        .add_systems(Update, step_frame)
        .run();

    match &exit {
        AppExit::Success => info!("Exited cleanly."),
        AppExit::Error(code) => error!("Error occured: exit code {}", code),
    }
    exit
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    simulation: Res<Simulation>,
) {
    commands.spawn(Camera2d);

    let viewport = simulation.settings().viewport;
    for drawable in simulation.draw() {
        let color = match drawable.role {
            Role::Primary => YELLOW,
            Role::Secondary => Color::WHITE,
        };
        let circle = Circle::new(drawable.radius)
            .mesh()
            .resolution(drawable.segments);
        commands.spawn((
            Name::new(simulation.body(drawable.role).name.clone()),
            Avatar(drawable.role),
            Mesh2d(meshes.add(circle)),
            MeshMaterial2d(materials.add(ColorMaterial::from(color))),
            Transform::from_translation(to_world(drawable.position, viewport)),
        ));
    }
}

/// Runs the simulation once per rendered frame and moves each avatar to the
/// position its body had when the frame was drawn.
fn step_frame(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut simulation: ResMut<Simulation>,
    mut avatars: Query<(&Avatar, &mut Transform)>,
) {
    let keys = DirectionalKeys::from_keyboard(&keyboard);
    let viewport = simulation.settings().viewport;

    simulation.tick(keys, |drawables| {
        for (avatar, mut transform) in avatars.iter_mut() {
            if let Some(drawable) = drawables.iter().find(|d| d.role == avatar.0) {
                transform.translation = to_world(drawable.position, viewport);
            }
        }
    });
}
