//! Probe the crop handle hit-test.

use cappy_view_core::selection::classify;
use cappy_view_model::geometry::Point2D;

pub fn run(rect: &[f64], point: &[f64], handle_size: f64) -> anyhow::Result<()> {
    let (&[x1, y1, x2, y2], &[px, py]) = (rect, point) else {
        anyhow::bail!("--rect takes four values and --point takes two");
    };
    if handle_size <= 0.0 {
        anyhow::bail!("--handle-size must be positive (got {handle_size})");
    }

    let handle = classify(
        Point2D::new(px, py),
        Point2D::new(x1, y1),
        Point2D::new(x2, y2),
        handle_size,
    );
    println!("{handle:?}");
    Ok(())
}
