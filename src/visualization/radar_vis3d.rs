use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::math::primitives::{Cuboid, Sphere};

use crate::mapping::visual::{GlowColor, Hsl};
use crate::simulation::integrator::BOUNDS;
use crate::simulation::params::{EQUILIBRIUM_GRAVITY, GRAVITY_RANGE, TIME_SPEED_RANGE};
use crate::simulation::scenario::RadarScenario;
use crate::simulation::states::{Body, NVec3};

/// Component tagging each sphere with its body index into the scenario's body list
#[derive(Component)]
struct BubbleIndex(pub usize);

/// Screen-space ticker label following a bubble
#[derive(Component)]
struct TickerLabel(pub usize);

#[derive(Component)]
struct HudText;

/// Set when the body set was replaced and the bubbles must be rebuilt
#[derive(Resource, Default)]
struct RespawnBubbles(bool);

/// World units per simulation unit
const SCALE3D: f32 = 10.0;

/// Distance of the camera from the origin along +Z
const CAMERA_DISTANCE: f32 = 1100.0;

const GRAVITY_NUDGE: f64 = 0.005;
const TIME_SPEED_NUDGE: f64 = 0.05;

/// Wave front speed (simulation units per second) and ring thickness
const WAVE_SPEED: f64 = 30.0;
const WAVE_WIDTH: f64 = 6.0;

/// Open the 3D radar viewer and drive the scenario once per frame
pub fn run_3d(scenario: RadarScenario) {
    info!("run_3d: starting radar viewer with {} bodies", scenario.state.bodies().len());

    App::new()
        .insert_resource(scenario)
        .insert_resource(RespawnBubbles::default())
        .insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 300.0,
        })
        // the binary installs its own tracing subscriber
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .add_systems(Startup, (setup_3d, spawn_bubbles_startup))
        .add_systems(
            Update,
            (
                keyboard_controls,
                physics_step_3d,
                respawn_bubbles,
                sync_bubbles_3d,
                sync_labels,
                update_hud,
                draw_bounds,
            )
                .chain(),
        )
        .run();
}

/// Startup system: camera, light, axes, HUD
fn setup_3d(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<StandardMaterial>>) {
    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.02, 0.02, 0.05)),
            ..Default::default()
        },
        transform: Transform::from_xyz(300.0, 250.0, CAMERA_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
        ..Default::default()
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 5.0e7,
            range: 3000.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(200.0, 400.0, CAMERA_DISTANCE),
        ..Default::default()
    });

    spawn_axes(&mut commands, &mut meshes, &mut materials);

    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 16.0,
                color: Color::WHITE,
                ..Default::default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            top: Val::Px(12.0),
            ..Default::default()
        }),
        HudText,
    ));
}

fn spawn_bubbles_startup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scenario: Res<RadarScenario>,
) {
    spawn_bubbles(&mut commands, &mut meshes, &mut materials, scenario.state.bodies());
}

/// One translucent glowing sphere and one label per body
fn spawn_bubbles(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    bodies: &[Body],
) {
    for (i, b) in bodies.iter().enumerate() {
        let radius_screen = (b.visual.size as f32) * SCALE3D;

        let base = hsl_color(&b.visual.color, b.visual.opacity as f32);
        let glow = glow_color(&b.visual.glow_color).to_linear();
        let g = b.visual.glow as f32;

        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Sphere::new(radius_screen).mesh()),
                material: materials.add(StandardMaterial {
                    base_color: base,
                    emissive: LinearRgba::rgb(glow.red * g, glow.green * g, glow.blue * g),
                    alpha_mode: AlphaMode::Blend,
                    ..Default::default()
                }),
                transform: Transform::from_translation(to_world(&b.x)),
                ..Default::default()
            },
            BubbleIndex(i),
        ));

        commands.spawn((
            TextBundle::from_section(
                b.ticker.clone(),
                TextStyle {
                    font_size: 13.0,
                    color: Color::WHITE,
                    ..Default::default()
                },
            )
            .with_style(Style {
                position_type: PositionType::Absolute,
                ..Default::default()
            }),
            TickerLabel(i),
        ));
    }
}

/// Keyboard stand-in for the control panel
fn keyboard_controls(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut scenario: ResMut<RadarScenario>,
    mut respawn: ResMut<RespawnBubbles>,
) {
    let state = &mut scenario.state;

    if keys.just_pressed(KeyCode::Space) {
        let enabled = !state.params.physics_enabled;
        state.set_physics_enabled(enabled);
    }
    if keys.just_pressed(KeyCode::KeyC) {
        let enabled = !state.params.collisions_enabled;
        state.set_collisions_enabled(enabled);
    }
    if keys.just_pressed(KeyCode::ArrowUp) {
        let g = (state.params.gravity_strength + GRAVITY_NUDGE).clamp(GRAVITY_RANGE.0, GRAVITY_RANGE.1);
        state.set_gravity_strength(g);
    }
    if keys.just_pressed(KeyCode::ArrowDown) {
        let g = (state.params.gravity_strength - GRAVITY_NUDGE).clamp(GRAVITY_RANGE.0, GRAVITY_RANGE.1);
        state.set_gravity_strength(g);
    }
    if keys.just_pressed(KeyCode::ArrowRight) {
        let s = (state.params.time_speed + TIME_SPEED_NUDGE).clamp(TIME_SPEED_RANGE.0, TIME_SPEED_RANGE.1);
        state.set_time_speed(s);
    }
    if keys.just_pressed(KeyCode::ArrowLeft) {
        let s = (state.params.time_speed - TIME_SPEED_NUDGE).clamp(TIME_SPEED_RANGE.0, TIME_SPEED_RANGE.1);
        state.set_time_speed(s);
    }
    if keys.just_pressed(KeyCode::KeyE) {
        state.set_gravity_strength(EQUILIBRIUM_GRAVITY);
    }
    if keys.just_pressed(KeyCode::KeyW) {
        state.wave.trigger(NVec3::zeros(), time.elapsed_seconds_f64());
    }
    if keys.just_pressed(KeyCode::KeyL) {
        scenario.show_labels = !scenario.show_labels;
    }
    if keys.just_pressed(KeyCode::KeyR) {
        match scenario.refresh() {
            Ok(_) => respawn.0 = true,
            Err(e) => warn!("manual refresh failed: {e}"),
        }
    }
    if keys.just_pressed(KeyCode::KeyF) {
        match scenario.cycle_filter() {
            Ok(_) => respawn.0 = true,
            Err(e) => warn!("refresh after filter change failed: {e}"),
        }
    }
}

/// Per-frame refresh timer, wave timeout and physics step
fn physics_step_3d(time: Res<Time>, mut scenario: ResMut<RadarScenario>, mut respawn: ResMut<RespawnBubbles>) {
    let report = scenario.tick(time.delta(), time.elapsed_seconds_f64());
    if report.refreshed {
        respawn.0 = true;
    }
}

/// Rebuild every bubble after the body set was replaced
fn respawn_bubbles(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut respawn: ResMut<RespawnBubbles>,
    scenario: Res<RadarScenario>,
    existing: Query<Entity, Or<(With<BubbleIndex>, With<TickerLabel>)>>,
) {
    if !respawn.0 {
        return;
    }
    respawn.0 = false;

    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }
    spawn_bubbles(&mut commands, &mut meshes, &mut materials, scenario.state.bodies());
}

/// Positions, volume pulse and wave ripple
fn sync_bubbles_3d(
    time: Res<Time>,
    scenario: Res<RadarScenario>,
    mut query: Query<(&BubbleIndex, &mut Transform)>,
) {
    let bodies = scenario.state.bodies();
    let now = time.elapsed_seconds_f64();
    let wave = scenario.state.wave.elapsed(now).map(|e| (scenario.state.wave.center, e * WAVE_SPEED));

    for (BubbleIndex(i), mut transform) in &mut query {
        let Some(b) = bodies.get(*i) else {
            continue;
        };

        transform.translation = to_world(&b.x);

        let mut scale = 1.0 + ((now * b.visual.pulse_speed * 2.0).sin() * 0.05) as f32;
        if let Some((center, front)) = wave {
            let d = (b.x - center).norm();
            if (d - front).abs() < WAVE_WIDTH {
                scale *= 1.3;
            }
        }
        transform.scale = Vec3::splat(scale);
    }
}

/// Project each ticker label onto the screen above its bubble
fn sync_labels(
    scenario: Res<RadarScenario>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut labels: Query<(&TickerLabel, &mut Style, &mut Visibility)>,
) {
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    let bodies = scenario.state.bodies();

    for (TickerLabel(i), mut style, mut visibility) in &mut labels {
        let projected = bodies.get(*i).filter(|_| scenario.show_labels).and_then(|b| {
            let above = to_world(&b.x) + Vec3::Y * (b.visual.size as f32 + 1.0) * SCALE3D;
            camera.world_to_viewport(camera_transform, above)
        });

        match projected {
            Some(p) => {
                *visibility = Visibility::Visible;
                style.left = Val::Px(p.x);
                style.top = Val::Px(p.y);
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

fn update_hud(scenario: Res<RadarScenario>, mut hud: Query<&mut Text, With<HudText>>) {
    let Ok(mut text) = hud.get_single_mut() else {
        return;
    };
    let s = &scenario.state;
    let mut line = format!(
        "{:?} mode | gravity {:.3} | time {:.2} | collisions {} | physics {} | {} stocks | {:?}",
        s.params.mode(),
        s.params.gravity_strength,
        s.params.time_speed,
        if s.params.collisions_enabled { "on" } else { "off" },
        if s.params.physics_enabled { "on" } else { "off" },
        s.bodies().len(),
        scenario.filter,
    );
    if let Some(err) = &s.last_error {
        line.push_str(&format!("\nlast refresh failed: {err}"));
    }
    text.sections[0].value = line;
}

/// Wireframe of the reflecting walls
fn draw_bounds(mut gizmos: Gizmos) {
    let side = 2.0 * BOUNDS as f32 * SCALE3D;
    gizmos.cuboid(Transform::from_scale(Vec3::splat(side)), Color::srgba(0.4, 0.4, 0.6, 0.4));
}

fn to_world(x: &NVec3) -> Vec3 {
    Vec3::new(x.x as f32, x.y as f32, x.z as f32) * SCALE3D
}

fn hsl_color(hsl: &Hsl, alpha: f32) -> Color {
    Color::hsla(
        hsl.hue as f32,
        (hsl.saturation / 100.0) as f32,
        (hsl.lightness / 100.0) as f32,
        alpha,
    )
}

fn glow_color(glow: &GlowColor) -> Color {
    match glow {
        GlowColor::Gold => Color::srgb(1.0, 0.843, 0.0), // #ffd700
        GlowColor::White => Color::WHITE,
        GlowColor::Base(hsl) => hsl_color(hsl, 1.0),
    }
}

// =========================================================================================
// Axes through the origin, spanning the walls
// =========================================================================================

fn spawn_axes(commands: &mut Commands, meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) {
    let axis_len = 2.0 * BOUNDS as f32 * SCALE3D;
    let axis_thickness = 0.05 * SCALE3D;

    let axes = [
        (Cuboid::new(axis_len, axis_thickness, axis_thickness), Color::srgba(1.0, 0.0, 0.0, 0.3)),
        (Cuboid::new(axis_thickness, axis_len, axis_thickness), Color::srgba(0.0, 1.0, 0.0, 0.3)),
        (Cuboid::new(axis_thickness, axis_thickness, axis_len), Color::srgba(0.0, 0.0, 1.0, 0.3)),
    ];

    for (cuboid, color) in axes {
        commands.spawn(PbrBundle {
            mesh: meshes.add(cuboid.mesh()),
            material: materials.add(StandardMaterial {
                base_color: color,
                unlit: true,
                alpha_mode: AlphaMode::Blend,
                ..Default::default()
            }),
            transform: Transform::from_xyz(0.0, 0.0, 0.0),
            ..Default::default()
        });
    }
}
