use std::f64::consts::PI;

use nalgebra::Vector3;
use plotters::prelude::*;

use rust_luna::physics::{rk4_step, G};

const EARTH_MASS: f64 = 5.972e24;
const LUNAR_DISTANCE: f64 = 3.844e8;

// Integrates the circular lunar orbit for one period at a few step sizes,
// plotting the relative radial error over time for each. Useful for picking
// a dt: the error should fall off like dt^4.
pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mu = G * EARTH_MASS;
    let period = 2.0 * PI * (LUNAR_DISTANCE.powi(3) / mu).sqrt();
    let circular_speed = (mu / LUNAR_DISTANCE).sqrt();

    for &dt in &[600.0, 1800.0, 3600.0, 7200.0] {
        let n_steps = (period / dt).round() as usize;

        let mut position = Vector3::x() * LUNAR_DISTANCE;
        let mut velocity = Vector3::y() * circular_speed;
        let mut errors = vec![(0.0, 0.0)];

        for i in 1..=n_steps {
            let (p, v) = rk4_step(position, velocity, dt, G, EARTH_MASS);
            position = p;
            velocity = v;

            let radial_error = (position.norm() - LUNAR_DISTANCE).abs() / LUNAR_DISTANCE;
            errors.push((i as f64 * dt / 86400.0, radial_error));
        }

        let closure =
            (position - Vector3::x() * LUNAR_DISTANCE).norm() / LUNAR_DISTANCE;
        println!(
            "dt = {:6.0} s: max radial error {:.3e}, closure error {:.3e}",
            dt,
            errors.iter().map(|&(_, e)| e).fold(0.0, f64::max),
            closure,
        );

        draw_plot(&format!("plots/rk4-error-dt{}.png", dt as u64), &errors)?;
    }

    Ok(())
}

fn draw_plot(name: &str, errors: &[(f64, f64)]) -> Result<(), Box<dyn std::error::Error>> {
    let max_days = errors.last().map(|&(t, _)| t).unwrap_or(1.0);
    let max_error = errors.iter().map(|&(_, e)| e).fold(0.0, f64::max);

    let root = BitMapBackend::new(name, (640, 640)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(5)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..max_days, 0.0..max_error * 1.1)?;

    chart.configure_mesh().draw()?;

    chart.draw_series(LineSeries::new(errors.iter().copied(), &RED))?;

    Ok(())
}
