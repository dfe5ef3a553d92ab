use std::f64::consts::PI;

use rust_luna::file::read_file;
use rust_luna::physics::G;
use rust_luna::sim::BodyState;

use clap::Parser;

/// Print orbital characteristics for one body from the bodies file.
#[derive(Debug, Parser)]
struct Args {
    name: String,
    #[arg(long, default_value = "luna-bodies.txt")]
    file: String,
}

fn main() {
    let args = Args::parse();

    // The time step is irrelevant here; nothing gets ticked.
    let simulator = read_file(&args.file, 3600.0);
    let mu = G * simulator.config().central_mass;

    for body in simulator.bodies() {
        if body.info.name.to_lowercase() != args.name.to_lowercase() {
            continue;
        }

        let (position, velocity) = match body.state {
            BodyState::FixedAtOrigin => {
                println!("{} is the central body; it has no orbit.", body.info.name);
                return;
            }
            BodyState::Orbiting { position, velocity } => (position, velocity),
        };

        let r = position.norm();
        let speed = velocity.norm();
        // vis-viva: eps = v^2/2 - mu/r, a = -mu / (2 eps)
        let energy = speed * speed / 2.0 - mu / r;
        let semimajor_axis = -mu / (2.0 * energy);
        let ecc_vector =
            ((speed * speed - mu / r) * position - position.dot(&velocity) * velocity) / mu;

        println!("Orbital characteristics for {}", body.info.name);
        println!("- Distance from center: {:.4e} m", r);
        println!("- Speed: {:.1} m/s", speed);
        println!(
            "- Circular velocity at this distance: {:.1} m/s",
            (mu / r).sqrt()
        );
        println!("- Specific orbital energy: {:.4e} J/kg", energy);
        println!("- Semi-major axis: {:.4e} m", semimajor_axis);
        println!("- Eccentricity: {:.4}", ecc_vector.norm());
        if energy < 0.0 {
            let period = 2.0 * PI * (semimajor_axis.powi(3) / mu).sqrt();
            println!("- Period: {:.0} s ({:.2} days)", period, period / 86400.0);
        } else {
            println!("- Period: N/A (unbound)");
        }
        if let Some(trail) = simulator.get_trail(body.id) {
            println!("- Trail cap: {:.4e} m", trail.max_length());
        }
        return;
    }

    println!("No body named {} in {}", args.name, args.file);
}
