//! Interactive trebuchet viewer
//!
//! Draws the arm swinging and, once released, the predicted flight path.
//! The scenario file is watched and reloaded on every save. The viewer only
//! reads simulation state; stepping goes through the core's `step_simulation`.

use crate::config;
use eframe::egui;
use glam::DVec2;
use notify::{Event, RecommendedWatcher, Watcher};
use std::path::PathBuf;
use std::sync::mpsc;
use trebuchet_core::{
    build_simulation_context_from_source, step_simulation, LaunchResult, SimulationContext,
    Trajectory,
};

/// Open the viewer window and block until it is closed
pub fn launch(source_path: PathBuf) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(config::WINDOW_SIZE),
        ..Default::default()
    };
    eframe::run_native(
        config::WINDOW_TITLE,
        options,
        Box::new(|cc| Ok(Box::new(ViewApp::new(source_path, cc)))),
    )
}

/// Where the projectile went, captured at release
struct Flight {
    launch: LaunchResult,
    /// Release point relative to the pivot
    origin: DVec2,
    path: Vec<DVec2>,
}

pub struct ViewApp {
    source_path: PathBuf,
    source_text: String,
    ctx_opt: Option<SimulationContext>,
    flight: Option<Flight>,
    last_error: Option<String>,
    warnings: Vec<String>,
    playing: bool,
    speed_multiplier: f32,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
}

impl ViewApp {
    pub fn new(source_path: PathBuf, _cc: &eframe::CreationContext<'_>) -> Self {
        let source_text = std::fs::read_to_string(&source_path)
            .unwrap_or_else(|e| format!("Error reading file: {}", e));

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })
        .ok();

        if let Some(ref mut w) = watcher {
            if let Err(e) = w.watch(&source_path, notify::RecursiveMode::NonRecursive) {
                tracing::warn!(error = %e, "file watching disabled");
            }
        }

        let mut app = Self {
            source_path,
            source_text,
            ctx_opt: None,
            flight: None,
            last_error: None,
            warnings: Vec::new(),
            playing: false,
            speed_multiplier: 1.0,
            file_watcher: watcher,
            file_receiver: rx,
        };
        app.reload_context();
        app
    }

    fn reload_context(&mut self) {
        self.flight = None;
        match build_simulation_context_from_source(&self.source_text) {
            Ok((ctx, diagnostics)) => {
                self.warnings = diagnostics.warnings().map(|d| d.to_string()).collect();
                self.ctx_opt = Some(ctx);
                self.last_error = None;
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                self.warnings.clear();
                self.ctx_opt = None;
                self.playing = false;
            }
        }
    }

    fn check_file_changes(&mut self) {
        let mut needs_reload = false;
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_),
                    paths,
                    ..
                }) => {
                    if paths.contains(&self.source_path) {
                        if let Ok(new_text) = std::fs::read_to_string(&self.source_path) {
                            self.source_text = new_text;
                            needs_reload = true;
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "file watcher error"),
            }
        }

        if needs_reload {
            tracing::info!(path = %self.source_path.display(), "scenario reloaded");
            self.reload_context();
        }
    }

    /// Freeze the arm and compute the flight from its current state
    fn release(&mut self) {
        let Some(ref ctx) = self.ctx_opt else {
            return;
        };
        self.playing = false;
        match ctx.compute_launch() {
            Ok(launch) => {
                let path = Trajectory::from_launch(&launch).sample(config::trajectory_samples());
                self.flight = Some(Flight {
                    launch,
                    origin: ctx.projectile_position(),
                    path,
                });
            }
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    fn advance(&mut self) {
        let Some(ref mut ctx) = self.ctx_opt else {
            return;
        };
        let steps = (config::steps_per_frame() as f32 * self.speed_multiplier)
            .round()
            .max(1.0) as usize;
        let mut release = false;
        for _ in 0..steps {
            if ctx.release_due() || ctx.is_finished() {
                release = true;
                break;
            }
            step_simulation(ctx);
        }
        if release {
            self.release();
        }
    }

    fn draw_scene(&self, ui: &egui::Ui) {
        let Some(ref ctx) = self.ctx_opt else {
            return;
        };
        let rect = ui.max_rect();
        let painter = ui.painter();

        let geometry = ctx.trebuchet().config().geometry;
        let h0 = ctx.trebuchet().config().base_height;
        let scale = (0.6 * rect.height() as f64 / (geometry.short_arm + h0)) as f32;

        let ground_y = rect.bottom() - 60.0;
        let pivot = egui::pos2(rect.center().x, ground_y - h0 as f32 * scale);
        // World (pivot frame, y up) to screen
        let to_screen = |p: DVec2| pivot + egui::vec2(p.x as f32 * scale, -(p.y as f32) * scale);

        // Ground
        painter.rect_filled(
            egui::Rect::from_min_max(egui::pos2(rect.left(), ground_y), rect.right_bottom()),
            0.0,
            egui::Color32::from_rgb(0xA9, 0x3C, 0xD4),
        );

        // Base
        let half_top = 0.075 * h0 as f32 * scale;
        let half_foot = 0.15 * h0 as f32 * scale;
        painter.add(egui::Shape::convex_polygon(
            vec![
                pivot + egui::vec2(half_top, -0.1 * h0 as f32 * scale),
                egui::pos2(pivot.x + half_foot, ground_y),
                egui::pos2(pivot.x - half_foot, ground_y),
                pivot + egui::vec2(-half_top, -0.1 * h0 as f32 * scale),
            ],
            egui::Color32::from_rgb(0x9C, 0xA4, 0x00),
            egui::Stroke::new(1.0, egui::Color32::BLACK),
        ));

        // Arm outline in its own frame, rotated by theta
        let (l1, l2, w) = (geometry.long_arm, geometry.short_arm, geometry.width);
        let theta = ctx.arm_state().theta;
        let (sin, cos) = theta.sin_cos();
        let outline = [
            (l1 + 0.2 * w, 0.2 * w),
            (l1 + 0.2 * w, -0.2 * w),
            (0.2 * l1, -0.5 * w),
            (-0.2 * l2, -0.5 * w),
            (-l2 - 0.2 * w, -0.1 * w),
            (-l2 - 0.2 * w, 0.1 * w),
            (-0.2 * l2, 0.5 * w),
            (0.2 * l1, 0.5 * w),
        ];
        let points = outline
            .iter()
            .map(|&(x, y)| to_screen(DVec2::new(x * cos - y * sin, x * sin + y * cos)))
            .collect();
        painter.add(egui::Shape::convex_polygon(
            points,
            egui::Color32::from_rgb(0xAF, 0xF5, 0x3D),
            egui::Stroke::new(1.0, egui::Color32::BLACK),
        ));

        // Counterweight, pivot and projectile
        let cw = to_screen(ctx.counterweight_position());
        let cw_size = 0.1 * (l1 + l2) as f32 * scale;
        painter.rect_filled(
            egui::Rect::from_center_size(
                cw + egui::vec2(0.0, 0.5 * cw_size),
                egui::vec2(cw_size, cw_size),
            ),
            2.0,
            egui::Color32::from_rgb(0x00, 0x00, 0xAA),
        );
        painter.circle_filled(pivot, 4.0, egui::Color32::GRAY);

        let radius = (0.5 * w as f32 * scale).max(3.0);
        match &self.flight {
            Some(flight) => {
                // Path is in a ground frame below the release point
                let ground_origin = flight.origin - DVec2::new(0.0, flight.launch.release_height);
                let path: Vec<egui::Pos2> = flight
                    .path
                    .iter()
                    .map(|p| to_screen(ground_origin + *p))
                    .collect();
                painter.add(egui::Shape::line(
                    path,
                    egui::Stroke::new(1.5, egui::Color32::from_rgb(0xB7, 0xF1, 0x5B)),
                ));
                let landing = Trajectory::from_launch(&flight.launch).landing_point();
                painter.circle_filled(
                    to_screen(ground_origin + landing),
                    radius,
                    egui::Color32::from_rgb(0xD7, 0x2D, 0x80),
                );
            }
            None => {
                painter.circle_filled(
                    to_screen(ctx.projectile_position()),
                    radius,
                    egui::Color32::LIGHT_GRAY,
                );
            }
        }
    }
}

impl eframe::App for ViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(if self.playing { "⏸ Pause" } else { "▶ Play" }).clicked() {
                    self.playing = !self.playing && self.flight.is_none();
                }

                if ui.button("⏮ Reset").clicked() {
                    self.reload_context();
                    self.playing = false;
                }

                if ui.button("⏭ Step").clicked() && self.flight.is_none() {
                    if let Some(ref mut sim) = self.ctx_opt {
                        step_simulation(sim);
                    }
                }

                if ui.button("Release").clicked() && self.flight.is_none() {
                    self.release();
                }

                ui.separator();
                ui.label("Speed:");
                ui.add(egui::Slider::new(&mut self.speed_multiplier, 0.1..=10.0));
                ui.separator();

                if let Some(ref sim) = self.ctx_opt {
                    let arm = sim.arm_state();
                    ui.label(format!(
                        "t = {:.3} s  θ = {:.1}°  ω = {:.2} rad/s",
                        sim.elapsed(),
                        arm.theta.to_degrees(),
                        arm.theta_dot
                    ));
                }
            });
        });

        if let Some(ref flight) = self.flight {
            egui::SidePanel::right("results").show(ctx, |ui| {
                let launch = &flight.launch;
                ui.heading("Launch");
                for (name, value) in [
                    ("v0 (m/s)", launch.release_speed),
                    ("angle (°)", launch.launch_angle),
                    ("height (m)", launch.release_height),
                    ("flight time (s)", launch.flight_time),
                    ("range (m)", launch.range),
                    ("energy eff.", launch.energy_efficiency),
                    ("range eff.", launch.range_efficiency),
                    ("height eff.", launch.height_efficiency),
                ] {
                    ui.label(format!("{}: {:.4}", name, value));
                }
            });
        }

        if self.last_error.is_some() || !self.warnings.is_empty() {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.set_max_height(100.0);
                if let Some(ref error) = self.last_error {
                    ui.label(
                        egui::RichText::new(format!("Error: {}", error)).color(egui::Color32::RED),
                    );
                }
                for warning in &self.warnings {
                    ui.label(egui::RichText::new(warning).color(egui::Color32::YELLOW));
                }
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| self.draw_scene(ui));

        if self.playing {
            self.advance();
            ctx.request_repaint();
        }
    }
}
