/// 2d point in projected (cartesian) coordinates.
///
/// For geographic reference systems `x` is longitude and `y` is latitude in degrees.
pub type Point2d = nalgebra::Point2<f64>;
