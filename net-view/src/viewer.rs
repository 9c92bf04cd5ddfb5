//! Interactive particle-network viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns a [`Simulation`] and
//! implements [`eframe::App`]: once per displayed frame it ticks the
//! simulation and draws the four output buffers (primary/secondary
//! points and line segments) with pan/zoom controls.

use std::time::Instant;

use eframe::App;
use net_core::config::SimConfig;
use net_core::error::SimError;
use net_core::sim::Simulation;
use rand::SeedableRng;
use rand::rngs::StdRng;

const PRIMARY_COLOR: egui::Color32 = egui::Color32::WHITE;
const SECONDARY_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 102, 0);

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The simulation core: one owned [`Simulation`].
/// - A draft [`SimConfig`] edited in the side panel and applied by
///   rebuilding the simulation (config is construction-time state).
/// - Camera state (pan/zoom) and run control.
///
/// The per-frame update is:
/// 1. If `running`, tick the simulation once and time it.
/// 2. Draw the buffers of the last successful tick; a failed tick is
///    reported instead of drawn.
/// 3. Handle pan/zoom and panel interactions.
pub struct Viewer {
    sim: Simulation,
    cfg_draft: SimConfig,
    seed: u64,

    running: bool,
    zoom: f32,
    pan: egui::Vec2,

    last_tick_millis: f64,
    /// Set when applying the draft config failed; shown in the panel.
    cfg_error: Option<String>,
    /// Set when the last tick failed; drawing is skipped while present.
    tick_error: Option<String>,
}

impl Viewer {
    /// Creates a viewer around a freshly spawned default simulation.
    pub fn new() -> Result<Self, SimError> {
        let cfg = SimConfig::default();
        let sim = Simulation::new(cfg)?;

        Ok(Self {
            sim,
            cfg_draft: cfg,
            seed: 0,
            running: true,
            zoom: 60.0,
            pan: egui::vec2(0.0, 0.0),
            last_tick_millis: 0.0,
            cfg_error: None,
            tick_error: None,
        })
    }

    /// Rebuilds the simulation from the draft config.
    ///
    /// On an invalid draft the current simulation keeps running and the
    /// error text is surfaced in the config panel.
    fn apply_config(&mut self, seeded: bool) {
        let result = if seeded {
            Simulation::from_rng(self.cfg_draft, &mut StdRng::seed_from_u64(self.seed))
        } else {
            Simulation::new(self.cfg_draft)
        };

        match result {
            Ok(sim) => {
                self.sim = sim;
                self.cfg_error = None;
                self.tick_error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "rejected config draft");
                self.cfg_error = Some(e.to_string());
            }
        }
    }

    /// Advances the simulation by one tick, recording duration and
    /// outcome. A failed tick drops the frame rather than drawing a
    /// partial graph.
    fn step_once(&mut self) {
        let start = Instant::now();
        match self.sim.tick() {
            Ok(_) => {
                self.tick_error = None;
                self.last_tick_millis = start.elapsed().as_secs_f64() * 1000.0;
            }
            Err(e) => {
                tracing::warn!(error = %e, "tick failed, skipping frame");
                self.tick_error = Some(e.to_string());
            }
        }
    }

    /// Converts a world-space x/y position to screen-space.
    ///
    /// The slab is nearly flat on z, so the projection is a plain
    /// orthographic drop of the z coordinate: scale by `zoom`, offset
    /// by `pan`, center in `rect`, flip y so world +y points up.
    fn world_to_screen(&self, x: f32, y: f32, rect: egui::Rect) -> egui::Pos2 {
        let center = rect.center();
        egui::pos2(
            center.x + x * self.zoom + self.pan.x,
            center.y - y * self.zoom + self.pan.y,
        )
    }

    /// Inverse of [`Viewer::world_to_screen`] (up to rounding).
    fn screen_to_world(&self, p: egui::Pos2, rect: egui::Rect) -> (f32, f32) {
        let center = rect.center();
        let x = (p.x - center.x - self.pan.x) / self.zoom;
        let y = (center.y - p.y + self.pan.y) / self.zoom;
        (x, y)
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (run controls, stepping, zoom).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Step").clicked() {
                    self.step_once();
                }

                if ui.button("Respawn").clicked() {
                    self.apply_config(false);
                }

                ui.separator();
                ui.add(
                    egui::DragValue::new(&mut self.seed)
                        .prefix("seed = ")
                        .speed(1.0),
                );
                if ui.button("Respawn seeded").clicked() {
                    self.apply_config(true);
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 10.0..=200.0).text("Zoom"));
            });
        });
    }

    /// Builds the bottom status bar (tick count, populations, edges,
    /// tick duration).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("tick = {:.3} ms", self.last_tick_millis));
                ui.separator();

                let set = self.sim.particles();
                ui.label(format!(
                    "particles = {} ({} primary / {} secondary)",
                    set.len(),
                    set.primary.len(),
                    set.secondary.len()
                ));

                let (primary_edges, secondary_edges) = self.sim.edges().class_counts();
                ui.label(format!(
                    "edges = {} ({} primary / {} secondary)",
                    self.sim.edges().len(),
                    primary_edges,
                    secondary_edges
                ));

                ui.separator();
                ui.label(format!("ticks = {}", self.sim.ticks()));
            });
        });
    }

    /// Builds the right-hand configuration panel.
    ///
    /// Edits go to the draft config; "Apply" rebuilds the simulation so
    /// the running instance never sees a half-edited config.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Population");
                ui.horizontal(|ui| {
                    ui.label("particle_count:");
                    ui.add(
                        egui::DragValue::new(&mut self.cfg_draft.particle_count)
                            .range(1..=2000)
                            .speed(1.0),
                    );
                });
                ui.horizontal(|ui| {
                    ui.label("secondary_probability:");
                    ui.add(
                        egui::DragValue::new(&mut self.cfg_draft.secondary_probability)
                            .range(0.0..=1.0)
                            .speed(0.01),
                    );
                });

                ui.separator();
                ui.label("Bounds (half extents)");
                Self::labeled_drag_f32(ui, "x:", &mut self.cfg_draft.bounds.x, 0.1..=100.0, 0.1);
                Self::labeled_drag_f32(ui, "y:", &mut self.cfg_draft.bounds.y, 0.1..=100.0, 0.1);
                Self::labeled_drag_f32(ui, "z:", &mut self.cfg_draft.bounds.z, 0.1..=100.0, 0.1);

                ui.separator();
                ui.label("Velocity half-range");
                Self::labeled_drag_f32(
                    ui,
                    "xy:",
                    &mut self.cfg_draft.velocity_range.x,
                    0.001..=1.0,
                    0.001,
                );
                Self::labeled_drag_f32(
                    ui,
                    "z:",
                    &mut self.cfg_draft.velocity_range.y,
                    0.001..=1.0,
                    0.001,
                );

                ui.separator();
                ui.label("Proximity");
                Self::labeled_drag_f32(
                    ui,
                    "threshold:",
                    &mut self.cfg_draft.proximity_threshold,
                    0.1..=20.0,
                    0.05,
                );

                ui.separator();
                if ui.button("Apply (respawn)").clicked() {
                    self.apply_config(false);
                }
                if ui.button("Reset draft to default").clicked() {
                    self.cfg_draft = SimConfig::default();
                }

                if let Some(err) = &self.cfg_error {
                    ui.separator();
                    ui.colored_label(egui::Color32::LIGHT_RED, err);
                }
            });
    }

    /// Draws one flat point buffer as filled circles.
    fn draw_points(
        &self,
        painter: &egui::Painter,
        rect: egui::Rect,
        buffer: &[f32],
        radius: f32,
        color: egui::Color32,
    ) {
        for point in buffer.chunks_exact(3) {
            let p = self.world_to_screen(point[0], point[1], rect);
            painter.circle_filled(p, radius, color);
        }
    }

    /// Draws one flat line buffer as segments.
    fn draw_lines(
        &self,
        painter: &egui::Painter,
        rect: egui::Rect,
        buffer: &[f32],
        stroke: egui::Stroke,
    ) {
        for seg in buffer.chunks_exact(6) {
            let a = self.world_to_screen(seg[0], seg[1], rect);
            let b = self.world_to_screen(seg[3], seg[4], rect);
            painter.line_segment([a, b], stroke);
        }
    }

    /// Builds the central panel: ticks the simulation and draws the
    /// current buffers.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Pan with drag.
            if response.dragged() {
                self.pan += response.drag_delta();
            }

            // Zoom around the mouse cursor.
            let scroll = ui.ctx().input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let pointer_screen = response.hover_pos().unwrap_or(rect.center());
                let (wx, wy) = self.screen_to_world(pointer_screen, rect);

                let factor = (1.0 + scroll * 0.001).clamp(0.5, 2.0);
                self.zoom = (self.zoom * factor).clamp(10.0, 200.0);

                let screen_after = self.world_to_screen(wx, wy, rect);
                self.pan += pointer_screen - screen_after;
            }

            // One tick per displayed frame while running.
            if self.running {
                self.step_once();
                ctx.request_repaint();
            }

            if let Some(err) = &self.tick_error {
                // Dropped frame: report instead of drawing a stale or
                // partial graph.
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    format!("tick failed: {err}"),
                    egui::FontId::proportional(16.0),
                    egui::Color32::LIGHT_RED,
                );
                return;
            }

            let buffers = self.sim.buffers();

            // Lines first so points sit on top of them.
            self.draw_lines(
                &painter,
                rect,
                &buffers.primary_lines,
                egui::Stroke::new(
                    1.0,
                    egui::Color32::from_rgba_unmultiplied(255, 255, 255, 50),
                ),
            );
            self.draw_lines(
                &painter,
                rect,
                &buffers.secondary_lines,
                egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(255, 102, 0, 75)),
            );

            self.draw_points(&painter, rect, &buffers.primary_points, 2.0, PRIMARY_COLOR);
            self.draw_points(
                &painter,
                rect,
                &buffers.secondary_points,
                2.5,
                SECONDARY_COLOR,
            );
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::Pos2::new(0.0, 0.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn world_to_screen_and_back_is_roundtrip() {
        let mut viewer = Viewer::new().unwrap();
        // Use non-trivial zoom and pan to exercise the math.
        viewer.zoom = 45.0;
        viewer.pan = egui::vec2(15.0, -7.0);
        let rect = test_rect();

        let world_points = [(0.0_f32, 0.0_f32), (7.5, -5.0), (-3.5, 2.25)];
        let eps = 1e-4;

        for (x, y) in world_points {
            let screen = viewer.world_to_screen(x, y, rect);
            let (bx, by) = viewer.screen_to_world(screen, rect);

            assert!(
                (bx - x).abs() < eps && (by - y).abs() < eps,
                "roundtrip mismatch: ({x}, {y}) -> ({bx}, {by})"
            );
        }
    }

    #[test]
    fn step_once_advances_and_records_success() {
        let mut viewer = Viewer::new().unwrap();
        assert_eq!(viewer.sim.ticks(), 0);

        viewer.step_once();

        assert_eq!(viewer.sim.ticks(), 1);
        assert!(viewer.tick_error.is_none());
        assert_eq!(
            viewer.sim.buffers().point_count(),
            viewer.sim.particles().len()
        );
    }

    #[test]
    fn applying_invalid_draft_keeps_current_simulation() {
        let mut viewer = Viewer::new().unwrap();
        viewer.step_once();
        let ticks = viewer.sim.ticks();

        viewer.cfg_draft.proximity_threshold = -3.0;
        viewer.apply_config(false);

        // The running simulation is untouched, the error is surfaced.
        assert!(viewer.cfg_error.is_some());
        assert_eq!(viewer.sim.ticks(), ticks);
    }

    #[test]
    fn applying_seeded_draft_is_reproducible() {
        let mut a = Viewer::new().unwrap();
        let mut b = Viewer::new().unwrap();
        a.seed = 99;
        b.seed = 99;

        a.apply_config(true);
        b.apply_config(true);

        for (pa, pb) in a
            .sim
            .particles()
            .particles
            .iter()
            .zip(b.sim.particles().particles.iter())
        {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.vel, pb.vel);
            assert_eq!(pa.class, pb.class);
        }
    }

    #[test]
    fn failed_tick_is_reported_and_recoverable() {
        let mut viewer = Viewer::new().unwrap();
        viewer.step_once();
        assert!(viewer.tick_error.is_none());

        // Corrupt the partition; the next step must drop the frame.
        viewer.sim.particles_mut().secondary.push(usize::MAX);
        viewer.step_once();
        assert!(viewer.tick_error.is_some());

        // Restore and confirm the viewer recovers on the next step.
        viewer.sim.particles_mut().secondary.pop();
        viewer.step_once();
        assert!(viewer.tick_error.is_none());
    }
}
