use std::{ops::Deref, rc::Rc, sync::Arc};

use either::Either;
use impl_trait_for_tuples::impl_for_tuples;

use super::*;

/// Opaque identifier of the surface a [`Hit`] landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub usize);

/// The result of a successful [`Environment::query`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub point: Point,
    /// Normal to the surface at [`point`](Self::point), facing the incoming ray.
    pub normal: Direction,
    /// Distance travelled by the ray from its origin to [`point`](Self::point).
    pub distance: Float,
    pub surface: Option<SurfaceId>,
}

/// Collects the hits reported by an [`Environment`] for a given ray,
/// and keeps the closest one.
#[derive(Debug)]
pub struct QueryCtx<'a> {
    ray: &'a Ray,
    max_distance: Float,
    surface: Option<SurfaceId>,
    closest: Option<Hit>,
}

impl<'a> QueryCtx<'a> {
    #[inline]
    #[must_use]
    fn new(ray: &'a Ray, max_distance: Float) -> Self {
        Self {
            ray,
            max_distance,
            surface: None,
            closest: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn ray(&self) -> &'a Ray {
        self.ray
    }

    #[inline]
    #[must_use]
    pub const fn max_distance(&self) -> Float {
        self.max_distance
    }

    /// Stores a hit at [`ray.at(distance)`](Ray::at), with the given `normal`,
    /// if `distance` lies in `[0, max_distance]` and is strictly smaller than
    /// that of the hit stored internally.
    ///
    /// The hit is tagged with the surface id set by the innermost
    /// enclosing [`Self::with_surface`] call, if any.
    pub fn add_hit(&mut self, distance: Float, normal: Direction) {
        // also rejects NaNs
        if !(0. ..=self.max_distance).contains(&distance) {
            return;
        }

        if self
            .closest
            .as_ref()
            .map_or(true, |hit| hit.distance > distance)
        {
            self.closest = Some(Hit {
                point: self.ray.at(distance),
                normal,
                distance,
                surface: self.surface,
            });
        }
    }

    /// Runs `f`, tagging every hit it adds with `id`.
    pub fn with_surface(&mut self, id: SurfaceId, f: impl FnOnce(&mut Self)) {
        let outer = self.surface.replace(id);
        f(self);
        self.surface = outer;
    }

    #[inline]
    fn into_closest(self) -> Option<Hit> {
        self.closest
    }
}

/// The world rays bounce around in.
///
/// Implementors only need to provide [`Self::add_hits`], reporting every point
/// where `ctx.ray()` meets them, in no particular order. Intersections behind
/// the ray's origin, or beyond `ctx.max_distance()`, can be reported too, they
/// are properly discarded.
///
/// This method is expected to be deterministic with respect to the ray: calling
/// it any number of times, without modifying `self` in between, must report the
/// exact same hits.
pub trait Environment {
    fn add_hits(&self, ctx: &mut QueryCtx<'_>);

    /// Returns the closest hit along `ray`, within `max_distance` of its origin.
    #[inline]
    fn query(&self, ray: &Ray, max_distance: Float) -> Option<Hit> {
        let mut ctx = QueryCtx::new(ray, max_distance);
        self.add_hits(&mut ctx);
        ctx.into_closest()
    }
}

#[impl_for_tuples(1, 16)]
impl Environment for T {
    #[inline]
    fn add_hits(&self, ctx: &mut QueryCtx<'_>) {
        for_tuples!( #( T.add_hits(ctx); )* );
    }
}

impl<L: Environment, R: Environment> Environment for Either<L, R> {
    #[inline]
    fn add_hits(&self, ctx: &mut QueryCtx<'_>) {
        match self {
            Either::Left(env) => env.add_hits(ctx),
            Either::Right(env) => env.add_hits(ctx),
        }
    }
}

impl<T: Environment> Environment for [T] {
    #[inline]
    fn add_hits(&self, ctx: &mut QueryCtx<'_>) {
        self.iter().for_each(|env| env.add_hits(ctx));
    }
}

impl<const N: usize, T: Environment> Environment for [T; N] {
    #[inline]
    fn add_hits(&self, ctx: &mut QueryCtx<'_>) {
        self.as_slice().add_hits(ctx);
    }
}

// All these impls go through `Deref`, but a blanket impl over every `Deref` type
// would make it impossible to implement the trait for new types downstream.
impl<T: Environment> Environment for Vec<T> {
    #[inline]
    fn add_hits(&self, ctx: &mut QueryCtx<'_>) {
        self.as_slice().add_hits(ctx);
    }
}

impl<T: Environment + ?Sized> Environment for Box<T> {
    #[inline]
    fn add_hits(&self, ctx: &mut QueryCtx<'_>) {
        self.deref().add_hits(ctx);
    }
}

impl<T: Environment + ?Sized> Environment for Rc<T> {
    #[inline]
    fn add_hits(&self, ctx: &mut QueryCtx<'_>) {
        self.deref().add_hits(ctx);
    }
}

impl<T: Environment + ?Sized> Environment for Arc<T> {
    #[inline]
    fn add_hits(&self, ctx: &mut QueryCtx<'_>) {
        self.deref().add_hits(ctx);
    }
}

impl<T: Environment + ?Sized> Environment for &T {
    #[inline]
    fn add_hits(&self, ctx: &mut QueryCtx<'_>) {
        (*self).add_hits(ctx);
    }
}

impl<T: Environment + ?Sized> Environment for &mut T {
    #[inline]
    fn add_hits(&self, ctx: &mut QueryCtx<'_>) {
        self.deref().add_hits(ctx);
    }
}
