extern crate curve_fit;

use curve_fit::{
    approximate_normalized, approximate_polygon, interpolate_gauss, interpolate_polygon, ControlPoints,
    GaussParams, RidgeParams, Sampling,
};
use nalgebra::Point2;

fn print_curve(name: &str, curve: &[Point2<f64>]) {
    println!("# {name}");
    println!("x;y");
    for p in curve {
        println!("{:.2};{:.2}", p.x, p.y);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let points = ControlPoints::new(vec![
        Point2::new(0.0, 1.0),
        Point2::new(1.0, -1.0),
        Point2::new(2.0, 0.0),
        Point2::new(4.0, 3.0),
        Point2::new(5.0, 1.0),
        Point2::new(6.0, 1.0),
    ])?;
    let sampling = Sampling::new(0.0, 6.0, 0.1)?;

    print_curve("interpolation - polygon", &interpolate_polygon(&points, &sampling)?);
    print_curve(
        "interpolation - gauss",
        &interpolate_gauss(&points, &GaussParams::new(1.0, 1), &sampling)?,
    );
    print_curve("fitting - polygon", &approximate_polygon(&points, 3, &sampling)?);
    print_curve(
        "fitting - normalized",
        &approximate_normalized(&points, &RidgeParams::new(3, 0.5), &sampling)?,
    );
    Ok(())
}
