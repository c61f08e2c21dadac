//! Falling-sand viewer.
//!
//! Thin macroquad front-end over the `sim` crate: renders the committed
//! snapshot as pixels, drives the cursor brush from the mouse, and
//! shows the matter total and compute time per frame. All simulation
//! state lives in `sim`; this crate only presents and forwards input.

use macroquad::prelude::*;
use sim::{BinarySand, SimConfig, Simulation, DEFAULT_BRUSH_RADIUS};

// Requested size; the simulation pads to the tiling granularity.
const SIM_WIDTH: usize = 512;
const SIM_HEIGHT: usize = 288;
const SCALE: f32 = 2.0;

const SAND_COLOR: [u8; 4] = [60, 220, 60, 255];
const EMPTY_COLOR: [u8; 4] = [10, 12, 16, 255];

fn window_conf() -> Conf {
    Conf {
        window_title: "Falling Sand - three-phase parallel sand".to_owned(),
        window_width: (SIM_WIDTH as f32 * SCALE) as i32,
        window_height: (SIM_HEIGHT as f32 * SCALE) as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let config = SimConfig {
        width: SIM_WIDTH,
        height: SIM_HEIGHT,
        steps_per_frame: 10,
        ..SimConfig::default()
    };
    let mut sim = Simulation::new(BinarySand, config).expect("simulation config");
    let (width, height) = (sim.width(), sim.height());
    log::info!("grid {width}x{height} ({} cells)", width * height);

    let mut render_buffer = Image::gen_image_color(width as u16, height as u16, BLACK);
    let render_texture = Texture2D::from_image(&render_buffer);
    render_texture.set_filter(FilterMode::Nearest); // Crisp pixel look

    let mut paused = false;
    let mut compute_time = std::time::Duration::ZERO;

    loop {
        // --- INPUT ---
        if is_key_pressed(KeyCode::Space) {
            paused = !paused;
        }
        if is_key_pressed(KeyCode::R) {
            sim.reset();
        }

        // Brush edits happen between steps, against the buffer the next
        // proposal pass reads.
        let (mx, my) = mouse_position();
        let cx = (mx / SCALE) as i32;
        let cy = (my / SCALE) as i32;
        if is_mouse_button_down(MouseButton::Left) {
            sim.paint(cx, cy, DEFAULT_BRUSH_RADIUS, 1);
        }
        if is_mouse_button_down(MouseButton::Right) {
            sim.paint(cx, cy, DEFAULT_BRUSH_RADIUS, 0);
        }

        // --- UPDATE ---
        if !paused {
            compute_time = sim.advance();
        }

        // --- RENDER ---
        {
            let snapshot = sim.snapshot();
            let pixels = render_buffer.get_image_data_mut();
            for (pixel, &matter) in pixels.iter_mut().zip(snapshot) {
                *pixel = if matter != 0 { SAND_COLOR } else { EMPTY_COLOR };
            }
        }
        render_texture.update(&render_buffer);
        draw_texture_ex(
            &render_texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(width as f32 * SCALE, height as f32 * SCALE)),
                ..Default::default()
            },
        );

        draw_text(
            &format!(
                "compute({} steps): {:.4} s",
                sim.config().steps_per_frame,
                compute_time.as_secs_f64()
            ),
            10.0,
            24.0,
            24.0,
            LIGHTGRAY,
        );
        draw_text(
            &format!("matter: {}", sim.total_matter()),
            10.0,
            48.0,
            24.0,
            LIGHTGRAY,
        );
        draw_text(
            "LMB add / RMB erase / SPACE pause / R reset",
            10.0,
            72.0,
            20.0,
            GRAY,
        );

        next_frame().await;
    }
}
