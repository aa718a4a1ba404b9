//! 3D view of a cube using kiss3d.
//!
//! Queued moves are performed one per tick, so scrambles and solves play out
//! on screen instead of jumping straight to the result.

use kiss3d::prelude::*;

use twisty::cube::{random_sequence, DEFAULT_SCRAMBLE_LENGTH};
use twisty::grid::Dims;
use twisty::pieces::{self, Face};
use twisty::CubeOps;

/// Frames between two queued moves.
const FRAMES_PER_MOVE: u32 = 6;

/// Display colour for a sticker.
fn sticker_color(color: pieces::Color) -> Color {
    match color {
        pieces::Color::White => Color::new(0.95, 0.95, 0.95, 1.0),
        pieces::Color::Orange => Color::new(1.0, 0.5, 0.0, 1.0),
        pieces::Color::Green => Color::new(0.0, 0.7, 0.2, 1.0),
        pieces::Color::Red => Color::new(0.85, 0.1, 0.1, 1.0),
        pieces::Color::Blue => Color::new(0.1, 0.3, 0.9, 1.0),
        pieces::Color::Yellow => Color::new(1.0, 0.9, 0.1, 1.0),
    }
}

/// Outward unit normal of a face in world space (+X = R, +Y = U, +Z = F).
fn face_normal(face: Face) -> Vec3 {
    match face {
        Face::U => Vec3::new(0.0, 1.0, 0.0),
        Face::D => Vec3::new(0.0, -1.0, 0.0),
        Face::F => Vec3::new(0.0, 0.0, 1.0),
        Face::B => Vec3::new(0.0, 0.0, -1.0),
        Face::R => Vec3::new(1.0, 0.0, 0.0),
        Face::L => Vec3::new(-1.0, 0.0, 0.0),
    }
}

/// Whether slot `(i, j, k)` shows a sticker on `face`.
fn on_face(dims: Dims, (i, j, k): (usize, usize, usize), face: Face) -> bool {
    match face {
        Face::U => i == 0,
        Face::D => i == dims.y - 1,
        Face::F => j == 0,
        Face::B => j == dims.z - 1,
        Face::L => k == 0,
        Face::R => k == dims.x - 1,
    }
}

/// One rendered sticker and the grid slot and face it shows.
struct Sticker {
    node: SceneNode3d,
    slot: (usize, usize, usize),
    face: Face,
}

/// Builds a thin box for every visible sticker.
///
/// Slot `(i, j, k)` maps to world `(k, -i, -j)`, shifted so the cube is
/// centered on the origin.
fn build_stickers(scene: &mut SceneNode3d, dims: Dims) -> Vec<Sticker> {
    /// Edge of a sticker, leaving a visible gap between neighbours.
    const STICKER_SIZE: f32 = 0.9;
    const STICKER_DEPTH: f32 = 0.02;

    let center = Vec3::new(
        (dims.x as f32 - 1.0) / 2.0,
        -(dims.y as f32 - 1.0) / 2.0,
        -(dims.z as f32 - 1.0) / 2.0,
    );

    let mut stickers = Vec::new();
    for i in 0..dims.y {
        for j in 0..dims.z {
            for k in 0..dims.x {
                let slot = (i, j, k);
                let position = Vec3::new(k as f32, -(i as f32), -(j as f32)) - center;
                for face in Face::ALL {
                    if !on_face(dims, slot, face) {
                        continue;
                    }
                    let normal = face_normal(face);
                    let [w, h, d] = [normal.x, normal.y, normal.z]
                        .map(|n| if n == 0.0 { STICKER_SIZE } else { STICKER_DEPTH });
                    let node = scene
                        .add_cube(w, h, d)
                        .set_color(sticker_color(face.solved_color()))
                        .set_position(position + normal * 0.5);
                    stickers.push(Sticker { node, slot, face });
                }
            }
        }
    }
    stickers
}

fn title(cube: &dyn CubeOps) -> String {
    format!(
        "{} - solved: {} - [S] scramble, [Space] solve, [R] reset",
        cube.name(),
        cube.is_solved()
    )
}

/// Opens the viewer and runs until the window is closed.
pub fn display(cube: Box<dyn CubeOps>) {
    pollster::block_on(display_async(cube));
}

async fn display_async(mut cube: Box<dyn CubeOps>) {
    let mut window = Window::new(&title(cube.as_ref())).await;

    let mut camera = OrbitCamera3d::default();
    camera.set_dist(8.0);

    let mut scene = SceneNode3d::empty();
    scene
        .add_light(Light::point(100.0))
        .set_position(Vec3::new(5.0, 5.0, 5.0));

    let mut stickers = build_stickers(&mut scene, cube.grid().dims());
    let mut frame: u32 = 0;
    // colours are refreshed only after the cube changes
    let mut dirty = true;

    loop {
        for event in window.events().iter() {
            if let kiss3d::event::WindowEvent::Key(key, action, _) = event.value {
                use kiss3d::event::{Action, Key};
                if action == Action::Press {
                    match key {
                        Key::S => cube.enqueue(&random_sequence(
                            DEFAULT_SCRAMBLE_LENGTH,
                            &mut rand::thread_rng(),
                        )),
                        Key::Space if cube.is_idle() => {
                            let solution = cube.solution();
                            cube.enqueue(&solution);
                        }
                        Key::R => {
                            cube.reset();
                            dirty = true;
                        }
                        _ => {}
                    }
                }
            }
        }

        frame = frame.wrapping_add(1);
        if frame % FRAMES_PER_MOVE == 0 && cube.step().is_some() {
            dirty = true;
        }

        if dirty {
            let grid = cube.grid();
            for sticker in &mut stickers {
                let (i, j, k) = sticker.slot;
                let color = grid.color_at(i, j, k, sticker.face);
                sticker.node.set_color(sticker_color(color));
            }
            window.set_title(&title(cube.as_ref()));
            dirty = false;
        }

        if !window.render_3d(&mut scene, &mut camera).await {
            break;
        }
    }
}
