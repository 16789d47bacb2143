extern crate curve_fit;

use curve_fit::{GaussParams, Method, RidgeParams, Sampling, Sketch, DEFAULT_PICK_RADIUS};
use nalgebra::Point2;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut sketch = Sketch::new(Sampling::new(20.0, 780.0, 20.0)?);

    // clicks on a 800x600 canvas, y pointing up
    for (x, y) in [(120.0, 300.0), (260.0, 420.0), (400.0, 180.0), (540.0, 350.0), (680.0, 260.0)] {
        sketch.add_point(Point2::new(x, y))?;
    }
    sketch.set_gauss_params(GaussParams::default().with_degree(1));
    sketch.set_polynomial_degree(3);
    sketch.set_ridge_params(RidgeParams::new(3, 10.0));

    for (method, error) in sketch.refresh() {
        eprintln!("{method:?}: {error}");
    }

    // right click next to the third point
    if let Some(removed) = sketch.remove_nearest(Point2::new(404.0, 186.0), DEFAULT_PICK_RADIUS) {
        eprintln!("removed ({}, {})", removed.x, removed.y);
    }
    for (method, error) in sketch.refresh() {
        eprintln!("{method:?}: {error}");
    }

    for method in Method::ALL {
        println!("# {method:?}");
        println!("x;y");
        for p in sketch.curve(method) {
            println!("{:.2};{:.2}", p.x, p.y);
        }
    }
    Ok(())
}
