use kiss3d::camera::{ArcBall, Camera};
use kiss3d::event::{Action, Event, EventManager, Key, WindowEvent};
use kiss3d::planar_camera::PlanarCamera;
use kiss3d::post_processing::PostProcessingEffect;
use kiss3d::renderer::Renderer;
use kiss3d::scene::SceneNode;
use kiss3d::window::{State, Window};

use nalgebra::{Point2, Point3, Translation3, UnitQuaternion, Vector3};

use std::collections::HashMap;
use std::f64::consts::PI;
use std::time::Instant;

use crate::sim::{BodyID, OrbitSimulator};

// Visual-only spin of the central body: one revolution per simulated day.
const CENTRAL_SPIN_RATE: f64 = 2.0 * PI / 86400.0;

const MAX_TICKS_PER_FRAME: u32 = 1024;

// Key config, all in one place
const KEY_PREV_FOCUS: Key = Key::Q;
const KEY_NEXT_FOCUS: Key = Key::E;
const KEY_SPEED_UP: Key = Key::Period;
const KEY_SLOW_DOWN: Key = Key::Comma;
const KEY_PAUSE: Key = Key::P;

pub struct FpsCounter {
    last_reset: Instant,
    frames: usize,
    previous_fps: f64,
}

impl FpsCounter {
    pub fn new() -> Self {
        FpsCounter {
            last_reset: Instant::now(),
            frames: 0,
            previous_fps: 0.0,
        }
    }

    pub fn value(&self) -> f64 {
        self.previous_fps
    }

    pub fn increment(&mut self) {
        self.frames += 1;
        let elapsed = self.last_reset.elapsed();
        if elapsed.as_millis() >= 1000 {
            self.previous_fps = (1000 * self.frames) as f64 / elapsed.as_millis() as f64;
            self.frames = 0;
            self.last_reset = Instant::now();
        }
    }
}

pub struct CameraFocus {
    focus_points: Vec<BodyID>,
    focus_idx: usize,
}

impl CameraFocus {
    pub fn new(simulator: &OrbitSimulator) -> Self {
        CameraFocus {
            focus_points: simulator.bodies().map(|body| body.id).collect(),
            focus_idx: 0,
        }
    }

    pub fn next(&mut self) {
        self.focus_idx = (self.focus_idx + 1) % self.focus_points.len();
    }

    pub fn prev(&mut self) {
        let n = self.focus_points.len();
        self.focus_idx = (self.focus_idx + n - 1) % n;
    }

    pub fn point(&self) -> BodyID {
        self.focus_points[self.focus_idx]
    }
}

pub struct Simulation {
    // Object state
    simulator: OrbitSimulator,
    body_spheres: HashMap<BodyID, SceneNode>,
    central_id: Option<BodyID>,
    elapsed_ticks: u64,
    // Display
    scale: f64,
    ticks_per_frame: u32,
    paused: bool,
    fps_counter: FpsCounter,
    // Camera
    camera: ArcBall,
    camera_focus: CameraFocus,
}

impl Simulation {
    /// `scale` converts SI meters into scene units; it applies to body
    /// positions, body radii, and trail points alike.
    pub fn new(simulator: OrbitSimulator, scale: f64, window: &mut Window) -> Self {
        let mut body_spheres = HashMap::new();
        for body in simulator.bodies() {
            let mut sphere = window.add_sphere(body.info.radius * scale as f32);
            let color = &body.info.color;
            sphere.set_color(color.x, color.y, color.z);
            body_spheres.insert(body.id, sphere);
        }

        let camera_focus = CameraFocus::new(&simulator);
        let central_id = simulator
            .bodies()
            .find(|body| body.is_fixed())
            .map(|body| body.id);

        let mut simulation = Simulation {
            simulator,
            body_spheres,
            central_id,
            elapsed_ticks: 0,
            scale,
            ticks_per_frame: 1,
            paused: false,
            fps_counter: FpsCounter::new(),
            camera: ArcBall::new(Point3::new(0.0, -700.0, 350.0), Point3::origin()),
            camera_focus,
        };
        simulation.update_scene_objects();

        simulation
    }

    fn process_user_input(&mut self, mut events: EventManager) {
        // Process events
        for event in events.iter() {
            self.process_event(event);
        }
    }

    fn process_event(&mut self, event: Event) {
        match event.value {
            WindowEvent::Key(KEY_NEXT_FOCUS, Action::Press, _) => {
                self.camera_focus.next();
                self.update_scene_objects();
            }
            WindowEvent::Key(KEY_PREV_FOCUS, Action::Press, _) => {
                self.camera_focus.prev();
                self.update_scene_objects();
            }
            WindowEvent::Key(KEY_SPEED_UP, Action::Press, _) => {
                self.ticks_per_frame = (self.ticks_per_frame * 2).min(MAX_TICKS_PER_FRAME);
                println!("Simulation rate is {} ticks / frame", self.ticks_per_frame);
            }
            WindowEvent::Key(KEY_SLOW_DOWN, Action::Press, _) => {
                self.ticks_per_frame = (self.ticks_per_frame / 2).max(1);
                println!("Simulation rate is {} ticks / frame", self.ticks_per_frame);
            }
            WindowEvent::Key(KEY_PAUSE, Action::Press, _) => {
                self.paused = !self.paused;
            }
            _ => {}
        }
    }

    fn update_state(&mut self) {
        if self.paused {
            return;
        }

        for _ in 0..self.ticks_per_frame {
            self.simulator.tick();
        }
        self.elapsed_ticks += self.ticks_per_frame as u64;

        // Spin the central body's sphere. This is cosmetic; the simulator
        // itself never moves the fixed body.
        let angle =
            CENTRAL_SPIN_RATE * self.simulator.config().dt * self.ticks_per_frame as f64;
        if let Some(id) = self.central_id {
            if let Some(sphere) = self.body_spheres.get_mut(&id) {
                sphere.prepend_to_local_rotation(&UnitQuaternion::from_axis_angle(
                    &Vector3::y_axis(),
                    angle as f32,
                ));
            }
        }
    }

    // The whole scene is translated so that the focused body sits at the
    // origin, where the camera looks.
    fn focus_position(&self) -> Vector3<f64> {
        self.simulator.get_body(self.camera_focus.point()).position()
    }

    fn update_scene_objects(&mut self) {
        let focus_position = self.focus_position();
        for (id, sphere) in self.body_spheres.iter_mut() {
            let relative = self.simulator.get_body(*id).position() - focus_position;
            let position: Point3<f32> = nalgebra::convert(Point3::from(relative * self.scale));
            sphere.set_local_translation(Translation3::from(position));
        }
    }

    fn draw_trails(&self, window: &mut Window) {
        let offset: Vector3<f32> = nalgebra::convert(-self.focus_position() * self.scale);

        for (id, trail) in self.simulator.trails() {
            let color = &self.simulator.get_body(id).info.color;
            let (points, opacities) = trail.renderable(self.scale);

            // kiss3d lines take a plain color, so the fade is applied by
            // dimming the color toward black with the segment's opacity.
            for i in 1..points.len() {
                let start = points[i - 1] + offset;
                let end = points[i] + offset;
                let faded = Point3::from(color.coords * opacities[i]);
                window.draw_line(&start, &end, &faded);
            }
        }
    }

    fn draw_hud(&self, window: &mut Window) {
        let default_font = kiss3d::text::Font::default();
        let text_color = Point3::new(1.0, 1.0, 1.0);
        window.draw_text(
            &self.status_text(),
            &Point2::origin(),
            60.0,
            &default_font,
            &text_color,
        );
    }

    fn status_text(&self) -> String {
        let body = self.simulator.get_body(self.camera_focus.point());
        let elapsed = self.elapsed_ticks as f64 * self.simulator.config().dt;

        // Indentation is intentional
        format!(
            "Focused on: {}
    Radius: {:.0} m
    Speed: {:.0} m/s
Time: {}
Rate: {} ticks / frame ({} s each){}
FPS: {:.0}",
            body.info.name,
            body.position().norm(),
            body.velocity().norm(),
            format_sim_time(elapsed),
            self.ticks_per_frame,
            self.simulator.config().dt,
            if self.paused { " [paused]" } else { "" },
            self.fps_counter.value(),
        )
    }
}

impl State for Simulation {
    fn cameras_and_effect_and_renderer(
        &mut self,
    ) -> (
        Option<&mut dyn Camera>,
        Option<&mut dyn PlanarCamera>,
        Option<&mut dyn Renderer>,
        Option<&mut dyn PostProcessingEffect>,
    ) {
        (Some(&mut self.camera), None, None, None)
    }

    fn step(&mut self, window: &mut Window) {
        self.process_user_input(window.events());
        self.update_state();
        self.update_scene_objects();
        self.draw_trails(window);
        self.draw_hud(window);
        self.fps_counter.increment();
    }
}

fn format_sim_time(seconds: f64) -> String {
    let mut total_seconds = seconds as u64;
    let secs = total_seconds % 60;
    total_seconds /= 60;
    let minutes = total_seconds % 60;
    total_seconds /= 60;
    let hours = total_seconds % 24;
    total_seconds /= 24;

    format!("{}d, {:02}:{:02}:{:02}", total_seconds, hours, minutes, secs)
}
