use kiss3d::light::Light;
use kiss3d::window::Window;

use rust_luna::file::read_file;
use rust_luna::gui::Simulation;

// One simulated hour per tick, rendered at a millionth of true size.
const TIME_STEP: f64 = 3600.0;
const RENDER_SCALE: f64 = 1.0e-6;

fn main() {
    let mut window = Window::new("Earth-Moon Orbit Simulator");
    window.set_light(Light::StickToCamera);
    window.set_framerate_limit(Some(60));

    let simulator = read_file("luna-bodies.txt", TIME_STEP);
    let simulation = Simulation::new(simulator, RENDER_SCALE, &mut window);
    window.render_loop(simulation);
}
