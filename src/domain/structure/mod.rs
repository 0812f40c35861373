// Chan structural elements, one module per pipeline artifact
mod center;
mod fractal;
mod point;
mod segment;
mod stroke;

pub use center::Center;
pub use fractal::{Fractal, FractalKind};
pub use point::{BuySellPoint, PointKind};
pub use segment::Segment;
pub use stroke::{Direction, Stroke};
