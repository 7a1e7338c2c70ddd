use nalgebra::Rotation2;

use super::*;

/// Bounces a ray that left `incoming_origin` and landed on `hit`.
///
/// Returns the point the next ray should start from, [`TraceConfig::safety_padding`]
/// away from the surface along its normal, and the direction it should travel in.
///
/// If `incoming_origin` coincides with `hit.point`, the outgoing direction is the normal.
#[inline]
#[must_use]
pub fn reflect(hit: &Hit, incoming_origin: &Point, config: &TraceConfig) -> (Point, Direction) {
    let restart = hit.point + hit.normal.as_ref() * config.safety_padding;

    let back = incoming_origin - hit.point;

    let dir = match config.reflection {
        ReflectionMode::Rotation => rotate_normal(&back, &hit.normal),
        ReflectionMode::Householder => try_direction(-back)
            .map_or(hit.normal, |d| reflect_direction(&d, &hit.normal, config.reflection)),
    };

    (restart, dir)
}

/// Reflects `dir` off a surface with the given `normal`.
///
/// Reflecting twice, off the same normal, gives `dir` back (up to roundoff errors).
#[inline]
#[must_use]
pub fn reflect_direction(
    dir: &Direction,
    normal: &Direction,
    mode: ReflectionMode,
) -> Direction {
    match mode {
        ReflectionMode::Rotation => rotate_normal(&-dir.into_inner(), normal),
        ReflectionMode::Householder => {
            let n = normal.as_ref();
            let p = dir.dot(n);
            Direction::new_normalize(dir.as_ref() - n * (p + p))
        }
    }
}

/// `normal`, rotated by the signed angle going from `back` to `normal`.
#[inline]
fn rotate_normal(back: &Vector, normal: &Direction) -> Direction {
    let n = normal.as_ref();
    let angle = back.perp(n).atan2(back.dot(n));
    Rotation2::new(angle) * *normal
}

/// The direction making an angle of `degrees` with the x axis, counterclockwise.
#[inline]
#[must_use]
pub fn aim_direction(degrees: Float) -> Direction {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Direction::new_normalize(Vector::new(cos, sin))
}
