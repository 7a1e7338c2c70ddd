//! Randomly generated rays, surfaces and scenes.

use std::iter;

use ricochet::{either::Either, *};
use ricochet_shapes::*;

pub use rand;

/// Largest coordinate magnitude of generated points.
pub const MAX_COORD: Float = 7.;

pub trait Random: Sized {
    /// Generate a randomized value of this type using the provided `rng`
    ///
    /// This method must not fail. If creating a value is faillible, keep trying until success
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self;
}

impl Random for Direction {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        aim_direction(rng.gen_range(0. ..360.))
    }
}

impl Random for Ray {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        Self::new(rand_point(rng, MAX_COORD), Direction::random(rng))
    }
}

impl Random for Segment {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        loop {
            let [start, end] = [(); 2].map(|()| rand_point(rng, MAX_COORD));
            if let Some(s) = Self::try_new(start, end) {
                break s;
            }
        }
    }
}

impl Random for Circle {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        loop {
            if let Some(c) = Self::try_new(rand_point(rng, MAX_COORD), rng.gen_range(0.1..3.)) {
                break c;
            }
        }
    }
}

impl Random for BoxMirror {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        loop {
            let [a, b] = [(); 2].map(|()| rand_point(rng, MAX_COORD));
            let min = Point::new(a.x.min(b.x), a.y.min(b.y));
            let max = Point::new(a.x.max(b.x), a.y.max(b.y));

            if let Some(walls) = Self::try_new(min, max) {
                break walls;
            }
        }
    }
}

impl Random for Rectangle {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        Self::new(
            rand_point(rng, MAX_COORD),
            rng.gen_range(0.1..2.),
            rng.gen_range(0.1..2.),
        )
    }
}

impl<L: Random, R: Random> Random for Either<L, R> {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        if rng.gen() {
            Self::Left(L::random(rng))
        } else {
            Self::Right(R::random(rng))
        }
    }
}

pub fn rand_point(rng: &mut (impl rand::Rng + ?Sized), max_coord_mag: Float) -> Point {
    // the rng generates floats in 0.0..1.0, scale and translate the range accordingly
    let mut coord = || (rng.gen::<Float>() - 0.5) * (max_coord_mag.abs() * 2.0);
    Point::new(coord(), coord())
}

/// A travel budget in `1.0..max`.
pub fn rand_budget(rng: &mut (impl rand::Rng + ?Sized), max: Float) -> Float {
    rng.gen_range(1.0..max.max(1.0 + Float::EPSILON))
}

pub fn gen_random<T: Random>(n: usize, rng: &mut (impl rand::Rng + ?Sized)) -> Vec<T> {
    iter::repeat_with(|| T::random(rng)).take(n).collect()
}

/// A scene of `num_surfaces` random surfaces, and `num_rays` random rays to launch into it.
pub fn random_scene<M: Random>(
    num_surfaces: usize,
    num_rays: usize,
    rng: &mut (impl rand::Rng + ?Sized),
) -> (Scene<M>, Vec<Ray>) {
    (
        gen_random::<M>(num_surfaces, rng).into(),
        gen_random(num_rays, rng),
    )
}
