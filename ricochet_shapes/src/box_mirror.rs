use super::*;

/// An axis-aligned box, made of four [`Segment`]s. Reflective inside and out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxMirror {
    min: Point,
    max: Point,
    edges: [Segment; 4],
}

impl BoxMirror {
    /// Returns `None` unless `min` is strictly smaller than `max` on both axes,
    /// both are finite, and no side is (almost) zero.
    #[inline]
    #[must_use]
    pub fn try_new(min: impl Into<Point>, max: impl Into<Point>) -> Option<Self> {
        let (a, c) = (min.into(), max.into());
        if !(a.x < c.x && a.y < c.y) {
            return None;
        }

        let b = Point::new(c.x, a.y);
        let d = Point::new(a.x, c.y);

        let [ab, bc, cd, da] =
            [(a, b), (b, c), (c, d), (d, a)].map(|(p, q)| Segment::try_new(p, q));

        Some(Self {
            min: a,
            max: c,
            edges: [ab?, bc?, cd?, da?],
        })
    }

    /// A panicking version of [`Self::try_new`]
    ///
    /// # Panics
    ///
    /// if `min` isn't strictly smaller than `max` on both axes.
    #[inline]
    #[must_use]
    pub fn new(min: impl Into<Point>, max: impl Into<Point>) -> Self {
        Self::try_new(min, max).expect("box corners must be ordered and finite")
    }

    #[inline]
    #[must_use]
    pub const fn min(&self) -> &Point {
        &self.min
    }

    #[inline]
    #[must_use]
    pub const fn max(&self) -> &Point {
        &self.max
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, p: &Point) -> bool {
        (self.min.x..=self.max.x).contains(&p.x) && (self.min.y..=self.max.y).contains(&p.y)
    }

    /// The four sides of this box, starting at `min`, going along the x axis first.
    #[inline]
    #[must_use]
    pub const fn edges(&self) -> &[Segment; 4] {
        &self.edges
    }
}

impl Environment for BoxMirror {
    #[inline]
    fn add_hits(&self, ctx: &mut QueryCtx<'_>) {
        self.edges.add_hits(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_unordered_corners() {
        assert!(BoxMirror::try_new([0., 0.], [0., 1.]).is_none());
        assert!(BoxMirror::try_new([1., 1.], [0., 0.]).is_none());
        assert!(BoxMirror::try_new([0., 0.], [1., Float::INFINITY]).is_none());
        assert!(BoxMirror::try_new([0., 0.], [1e-300, 1.]).is_none());
        assert_eq!(BoxMirror::new([0., 0.], [2., 1.]).edges()[1].length(), 1.);
    }

    #[test]
    fn hit_from_inside_and_out() {
        let b = BoxMirror::new([-1., -1.], [1., 1.]);

        let hit = b.query(&Ray::try_new([0., 0.], [1., 0.]).unwrap(), 10.).unwrap();
        assert_relative_eq!(hit.point, Point::new(1., 0.), epsilon = 1e-12);
        assert_relative_eq!(hit.normal.into_inner(), Vector::new(-1., 0.), epsilon = 1e-12);

        let hit = b.query(&Ray::try_new([-3., 0.5], [1., 0.]).unwrap(), 10.).unwrap();
        assert_relative_eq!(hit.distance, 2., epsilon = 1e-12);
        assert_relative_eq!(hit.normal.into_inner(), Vector::new(-1., 0.), epsilon = 1e-12);
    }

    #[test]
    fn rays_stay_inside() {
        let b = BoxMirror::new([-4., -3.], [6., 2.]);
        let config = TraceConfig::default();

        for deg in (1..360).step_by(19) {
            let path = trace_single_ray(
                &b,
                [0.5, -0.25],
                aim_direction(deg as Float).into_inner(),
                80.,
                &config,
            )
            .unwrap();

            assert!(path.len() > 1);
            assert!(path.total_length() <= 80. + 1e-9);
            for p in path.points() {
                let grown = BoxMirror::new([-4. - 1e-9, -3. - 1e-9], [6. + 1e-9, 2. + 1e-9]);
                assert!(grown.contains(&p), "{p} escaped");
            }
        }
    }
}
