use log::{debug, trace, warn};

use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraceState {
    Advancing,
    Done(Termination),
}

/// Lazily yields the segments of a single ray's path, one bounce at a time.
///
/// See [`trace_single_ray`] to collect them into a [`Path`].
#[derive(Debug, Clone)]
pub struct Bounces<'a, E: Environment + ?Sized> {
    env: &'a E,
    ray: Ray,
    remaining: Float,
    config: TraceConfig,
    count: usize,
    state: TraceState,
}

impl<'a, E: Environment + ?Sized> Bounces<'a, E> {
    pub fn new(
        env: &'a E,
        origin: impl Into<Point>,
        dir: impl Into<Vector>,
        budget: Float,
        config: &TraceConfig,
    ) -> Result<Self, TraceError> {
        config.validate()?;
        let remaining = check_budget(budget)?;
        let ray = Ray::try_new(origin, dir).ok_or(TraceError::ZeroDirection)?;

        Ok(Self {
            env,
            ray,
            remaining,
            config: *config,
            count: 0,
            state: TraceState::Advancing,
        })
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> TraceState {
        self.state
    }

    /// What's left of the travel budget.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> Float {
        self.remaining
    }

    /// Must only be called while `self.state` is `Advancing`.
    fn advance(&mut self) -> (PathSegment, TraceState) {
        let ray = self.ray;
        self.count += 1;

        let Some(hit) = self.env.query(&ray, self.remaining) else {
            let segment = PathSegment::new(ray.origin, ray.dir, self.remaining);
            self.remaining = 0.;
            self.state = TraceState::Done(Termination::EscapedOpenSpace);
            trace!("segment {}: escaped, length {}", self.count, segment.length);
            return (segment, self.state);
        };

        let segment = PathSegment::new(ray.origin, ray.dir, hit.distance);
        self.remaining -= hit.distance;
        trace!(
            "segment {}: hit {:?} at ({}, {}), {} left",
            self.count,
            hit.surface,
            hit.point.x,
            hit.point.y,
            self.remaining,
        );

        if self.count >= self.config.max_segments {
            warn!(
                "ray stopped after {} segments, {} travel distance left",
                self.count, self.remaining
            );
            self.state = TraceState::Done(Termination::IterationCapped);
            return (segment, self.state);
        }

        let (origin, dir) = reflect(&hit, &ray.origin, &self.config);
        self.ray = Ray::new(origin, dir);

        if self.remaining <= 0. {
            self.state = TraceState::Done(Termination::BudgetExhausted);
        }

        (segment, self.state)
    }
}

impl<E: Environment + ?Sized> Iterator for Bounces<'_, E> {
    type Item = PathSegment;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        (self.state == TraceState::Advancing).then(|| self.advance().0)
    }
}

/// Traces the path of a ray starting at `origin`, travelling along `dir`, bouncing
/// off `env`, for a total distance of at most `budget`.
///
/// The returned path always has at least one segment.
///
/// # Errors
///
/// If `dir` is zero, `budget` isn't finite and positive, or `config` is invalid.
pub fn trace_single_ray<E: Environment + ?Sized>(
    env: &E,
    origin: impl Into<Point>,
    dir: impl Into<Vector>,
    budget: Float,
    config: &TraceConfig,
) -> Result<Path, TraceError> {
    let mut bounces = Bounces::new(env, origin, dir, budget, config)?;
    let mut segments = Vec::new();

    let termination = loop {
        let (segment, state) = bounces.advance();
        segments.push(segment);
        if let TraceState::Done(termination) = state {
            break termination;
        }
    };

    debug!(
        "traced {} segments over a budget of {budget}: {}",
        segments.len(),
        termination.name()
    );

    Ok(Path::new(segments, termination))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::tests::{HorizontalWall, Nothing, VerticalWall};
    use approx::assert_relative_eq;

    /// Reports a hit right in front of every ray, on a surface facing it, as if
    /// the ray were stuck inside a thick collider.
    struct PinchedWalls;

    impl Environment for PinchedWalls {
        fn add_hits(&self, ctx: &mut QueryCtx<'_>) {
            let normal = -ctx.ray().dir.into_inner();
            ctx.add_hit(1e-6, Direction::new_normalize(normal));
        }
    }

    fn room() -> (VerticalWall, VerticalWall, HorizontalWall, HorizontalWall) {
        (
            VerticalWall(-4.),
            VerticalWall(6.),
            HorizontalWall(-3.),
            HorizontalWall(2.),
        )
    }

    fn check_invariants(path: &Path, budget: Float) {
        assert!(path.len() >= 1);
        assert!(path.iter().all(|s| s.length >= 0.));
        assert!(path.total_length() <= budget + 1e-9);
        assert_eq!(
            path.net_displacement(),
            path.last().end() - path.first().start
        );
    }

    #[test]
    fn bounces_back_off_a_wall() {
        let config = TraceConfig::default();
        let path =
            trace_single_ray(&VerticalWall(5.), [0., 0.], [1., 0.], 10., &config).unwrap();

        let [first, second] = path.segments() else {
            panic!("expected two segments, got {}", path.len());
        };

        assert_eq!(first.start, Point::origin());
        assert_relative_eq!(first.dir.into_inner(), Vector::new(1., 0.));
        assert_relative_eq!(first.length, 5.);

        assert_relative_eq!(second.start, Point::new(5. - config.safety_padding, 0.));
        assert_relative_eq!(second.dir.into_inner(), Vector::new(-1., 0.), epsilon = 1e-12);
        assert_relative_eq!(second.length, 5.);

        assert_eq!(path.termination(), Termination::EscapedOpenSpace);
        assert_relative_eq!(path.last().end().x, 0., epsilon = 1e-3);
        check_invariants(&path, 10.);
    }

    #[test]
    fn open_space_uses_the_whole_budget() {
        let config = TraceConfig::default();
        let path = trace_single_ray(&Nothing, [1., 2.], [0., 3.], 7.5, &config).unwrap();

        assert_eq!(path.len(), 1);
        assert_eq!(path.first().length, 7.5);
        assert_relative_eq!(path.first().end(), Point::new(1., 9.5));
        assert_eq!(path.termination(), Termination::EscapedOpenSpace);
    }

    #[test]
    fn budget_can_run_out_on_a_bounce() {
        let config = TraceConfig::default();
        let path =
            trace_single_ray(&VerticalWall(1.), [0., 0.], [1., 0.], 1., &config).unwrap();

        assert_eq!(path.len(), 1);
        assert_eq!(path.termination(), Termination::BudgetExhausted);
        assert_relative_eq!(path.total_length(), 1.);
    }

    #[test]
    fn degenerate_geometry_is_capped() {
        let config = TraceConfig::default();
        let path = trace_single_ray(&PinchedWalls, [0., 0.], [1., 0.], 10., &config).unwrap();

        assert_eq!(path.len(), 500);
        assert_eq!(path.termination(), Termination::IterationCapped);
        check_invariants(&path, 10.);

        let config = config.with_max_segments(3);
        let path = trace_single_ray(&PinchedWalls, [0., 0.], [1., 0.], 10., &config).unwrap();
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn stays_inside_a_closed_room() {
        let room = room();
        let config = TraceConfig::default();

        for deg in (1..360).step_by(13) {
            let budget = 20. + deg as Float;
            let dir = aim_direction(deg as Float).into_inner();
            let path = trace_single_ray(&room, [0.5, -0.25], dir, budget, &config).unwrap();

            check_invariants(&path, budget);
            // nothing escapes a closed room
            assert_ne!(path.len(), 1);
            for p in path.points() {
                assert!((-4. - 1e-9..=6. + 1e-9).contains(&p.x), "{p} left the room");
                assert!((-3. - 1e-9..=2. + 1e-9).contains(&p.y), "{p} left the room");
            }
        }
    }

    #[test]
    fn iterator_is_lazy() {
        let room = room();
        let mut bounces =
            Bounces::new(&room, [0., 0.], [1., 1.], 1000., &TraceConfig::default()).unwrap();

        let first_three: Vec<_> = bounces.by_ref().take(3).collect();
        assert_eq!(first_three.len(), 3);
        assert_eq!(bounces.state(), TraceState::Advancing);
        assert!(bounces.remaining() < 1000.);

        // onto the wall at y = 2
        assert_relative_eq!(first_three[0].end(), Point::new(2., 2.), epsilon = 1e-12);
        assert_relative_eq!(
            first_three[1].dir.into_inner(),
            Vector::new(1., -1.).normalize(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn rejects_invalid_input() {
        let config = TraceConfig::default();

        assert_eq!(
            trace_single_ray(&Nothing, [0., 0.], [0., 0.], 1., &config),
            Err(TraceError::ZeroDirection)
        );
        assert_eq!(
            trace_single_ray(&Nothing, [0., 0.], [1., 0.], 0., &config),
            Err(TraceError::InvalidBudget(0.))
        );
        assert!(trace_single_ray(&Nothing, [0., 0.], [1., 0.], Float::NAN, &config).is_err());
        let infinite = [Float::INFINITY, 0.];
        assert!(trace_single_ray(&Nothing, [0., 0.], infinite, 1., &config).is_err());
        assert!(matches!(
            trace_single_ray(&Nothing, [0., 0.], [1., 0.], 1., &config.with_max_segments(0)),
            Err(TraceError::InvalidConfig(_))
        ));
    }

    #[test]
    fn huge_directions_are_normalized() {
        let dir = try_direction([1e200, 1e200]).unwrap();
        assert_relative_eq!(dir.norm(), 1.);
        assert_relative_eq!(dir.x, dir.y);

        let tiny = try_direction([0., 1e-300]);
        assert!(tiny.is_none());

        let path =
            trace_single_ray(&Nothing, [0., 0.], [1e200, 1e200], 2., &TraceConfig::default())
                .unwrap();
        assert_relative_eq!(path.first().dir.norm(), 1.);
        assert_relative_eq!(path.last().end().coords.norm(), 2., epsilon = 1e-9);
    }
}
