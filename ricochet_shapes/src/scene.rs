use std::{ops::Index, slice};

use super::*;

/// A list of surfaces. Hits are tagged with the [`SurfaceId`] holding the
/// index of the surface they landed on, unless that surface tags them itself.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene<M> {
    surfaces: Vec<M>,
}

impl<M> Default for Scene<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Scene<M> {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            surfaces: Vec::new(),
        }
    }

    /// Adds `surface` to this scene and returns its id.
    #[inline]
    pub fn push(&mut self, surface: M) -> SurfaceId {
        self.surfaces.push(surface);
        SurfaceId(self.surfaces.len() - 1)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: SurfaceId) -> Option<&M> {
        self.surfaces.get(id.0)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, M> {
        self.surfaces.iter()
    }

    #[inline]
    #[must_use]
    pub fn surfaces(&self) -> &[M] {
        &self.surfaces
    }

    #[inline]
    #[must_use]
    pub fn into_surfaces(self) -> Vec<M> {
        self.surfaces
    }
}

impl<M> From<Vec<M>> for Scene<M> {
    #[inline]
    fn from(surfaces: Vec<M>) -> Self {
        Self { surfaces }
    }
}

impl<M> FromIterator<M> for Scene<M> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = M>>(iter: I) -> Self {
        Self {
            surfaces: iter.into_iter().collect(),
        }
    }
}

impl<M> Index<SurfaceId> for Scene<M> {
    type Output = M;

    #[inline]
    fn index(&self, id: SurfaceId) -> &M {
        &self.surfaces[id.0]
    }
}

impl<'a, M> IntoIterator for &'a Scene<M> {
    type Item = &'a M;
    type IntoIter = slice::Iter<'a, M>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<M: Environment> Environment for Scene<M> {
    fn add_hits(&self, ctx: &mut QueryCtx<'_>) {
        for (i, surface) in self.surfaces.iter().enumerate() {
            ctx.with_surface(SurfaceId(i), |ctx| surface.add_hits(ctx));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ricochet::either::Either;

    type Shape = Either<Segment, Circle>;

    fn scene() -> Scene<Shape> {
        let mut scene = Scene::new();
        scene.push(Either::Left(Segment::new([5., -10.], [5., 10.])));
        scene.push(Either::Right(Circle::new([2., 3.], 1.)));
        scene.push(Either::Left(Segment::new([-5., -10.], [-5., 10.])));
        scene
    }

    #[test]
    fn hits_carry_the_index_of_their_surface() {
        let scene = scene();

        let east = Ray::try_new([0., 0.], [1., 0.]).unwrap();
        assert_eq!(scene.query(&east, 100.).unwrap().surface, Some(SurfaceId(0)));

        let west = Ray::try_new([0., 0.], [-1., 0.]).unwrap();
        assert_eq!(scene.query(&west, 100.).unwrap().surface, Some(SurfaceId(2)));

        let up = Ray::try_new([2., 0.], [0., 1.]).unwrap();
        let hit = scene.query(&up, 100.).unwrap();
        assert_eq!(hit.surface, Some(SurfaceId(1)));
        assert_relative_eq!(hit.distance, 2.);
        assert!(matches!(scene[SurfaceId(1)], Either::Right(_)));
    }

    #[test]
    fn bookkeeping() {
        let mut scene = scene();
        assert_eq!(scene.len(), 3);
        assert!(scene.get(SurfaceId(3)).is_none());

        let id = scene.push(Either::Right(Circle::new([0., 0.], 0.5)));
        assert_eq!(id, SurfaceId(3));
        assert_eq!(scene.iter().count(), 4);
        assert!(Scene::<Shape>::default().is_empty());
    }

    #[test]
    fn ray_bounces_between_two_walls() {
        let scene = scene();
        let config = TraceConfig::default();
        let path = trace_single_ray(&scene, [0., 0.], [1., 0.], 25., &config).unwrap();

        // 5 to the right, twice across, then the leftovers
        assert_eq!(path.len(), 4);
        assert_eq!(path.termination(), Termination::EscapedOpenSpace);
        assert_relative_eq!(path.total_length(), 25.);
    }
}
