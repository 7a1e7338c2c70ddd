//! Concrete mirrors for [`ricochet`] environments.

mod box_mirror;
mod circle;
mod scene;
mod segment;

pub use box_mirror::*;
pub use circle::*;
pub use scene::*;
pub use segment::*;

use ricochet::*;

/// Flips `normal` if needed, so that it faces a ray travelling along `dir`.
#[inline]
#[must_use]
pub fn facing(normal: Direction, dir: &Direction) -> Direction {
    if normal.dot(dir.as_ref()) > 0. {
        -normal
    } else {
        normal
    }
}
