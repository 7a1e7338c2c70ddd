use log::{debug, trace, warn};

use super::*;

/// An axis-aligned rectangle, anchored at its top-left corner.
///
/// The y axis points "down": the bottom edge lies at `position.y + height`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rectangle {
    pub position: Point,
    pub width: Float,
    pub height: Float,
}

impl Rectangle {
    #[inline]
    #[must_use]
    pub fn new(position: impl Into<Point>, width: Float, height: Float) -> Self {
        Self {
            position: position.into(),
            width,
            height,
        }
    }

    /// Clockwise, starting from the top-left corner.
    #[inline]
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        let Self {
            position: p,
            width: w,
            height: h,
        } = *self;

        [
            p,
            p + Vector::new(w, 0.),
            p + Vector::new(w, h),
            p + Vector::new(0., h),
        ]
    }

    #[inline]
    #[must_use]
    pub fn center(&self) -> Point {
        self.position + Vector::new(self.width, self.height) * 0.5
    }

    fn validate(&self) -> Result<(), TraceError> {
        let valid = |s: Float| s.is_finite() && s > 0.;
        let finite = self.position.iter().all(|c| c.is_finite());

        if finite && valid(self.width) && valid(self.height) {
            Ok(())
        } else {
            Err(TraceError::InvalidRectangle {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Number of rays cast from the inside of the rectangle's edges, on top of the
/// four corner rays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeRays {
    /// Rays on the face leading horizontal motion (left or right), spread along its height.
    pub horizontal: usize,
    /// Rays on the face leading vertical motion (top or bottom), spread along its width.
    pub vertical: usize,
}

impl EdgeRays {
    /// Largest ray count accepted on either face.
    pub const MAX: usize = 1 << 16;

    #[inline]
    #[must_use]
    pub const fn new(horizontal: usize, vertical: usize) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Fails if either face carries more than [`Self::MAX`] rays.
    pub fn validate(self) -> Result<Self, TraceError> {
        if self.horizontal.max(self.vertical) <= Self::MAX {
            Ok(self)
        } else {
            Err(TraceError::TooManyEdgeRays(self))
        }
    }
}

impl Default for EdgeRays {
    fn default() -> Self {
        Self::new(3, 2)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RayRole {
    /// `0..4`, clockwise from the top-left corner.
    Corner(usize),
    EdgeHorizontal(usize),
    EdgeVertical(usize),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayOrigin {
    pub role: RayRole,
    pub point: Point,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectionResult {
    pub path: Path,
    /// `path.last().end() - path.first().start`: apply this once to the body,
    /// instead of walking it along every bounce.
    pub net_displacement: Vector,
}

/// Sweeps an axis-aligned rectangle through an [`Environment`], bouncing it
/// off whatever its leading faces run into.
///
/// Each step casts a bundle of parallel rays, from the four corners and from the
/// inside of the leading edges, and moves the whole body by the closest hit.
/// The bundle is rebuilt at the start of every [`Self::project_rectangle`] call,
/// and left in its final state afterwards.
#[derive(Clone, Debug, Default)]
pub struct RectangleProjector {
    config: TraceConfig,
    rect: Option<Rectangle>,
    /// Corners first, then horizontal edge rays, then vertical edge rays.
    origins: Vec<RayOrigin>,
}

impl RectangleProjector {
    #[inline]
    #[must_use]
    pub fn new(config: TraceConfig) -> Self {
        Self {
            config,
            rect: None,
            origins: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &TraceConfig {
        &self.config
    }

    #[inline]
    pub fn set_config(&mut self, config: TraceConfig) {
        self.config = config;
    }

    /// The ray bundle, as left by the last call to [`Self::project_rectangle`].
    #[inline]
    #[must_use]
    pub fn origins(&self) -> &[RayOrigin] {
        &self.origins
    }

    /// The origin playing `role` in the current bundle, if any.
    #[must_use]
    pub fn origin(&self, role: RayRole) -> Option<&RayOrigin> {
        let num_horizontal = self
            .origins
            .iter()
            .filter(|o| matches!(o.role, RayRole::EdgeHorizontal(_)))
            .count();

        let index = match role {
            RayRole::Corner(i) => (i < 4).then_some(i),
            RayRole::EdgeHorizontal(i) => (i < num_horizontal).then_some(4 + i),
            RayRole::EdgeVertical(i) => Some(4 + num_horizontal + i),
        }?;

        self.origins.get(index).filter(|o| o.role == role)
    }

    /// Where the tracked rectangle ended up after the last call to
    /// [`Self::project_rectangle`], if any.
    #[inline]
    #[must_use]
    pub const fn rectangle(&self) -> Option<&Rectangle> {
        self.rect.as_ref()
    }

    /// Simulates `rect` travelling along `dir` for at most `budget`, bouncing off `env`.
    ///
    /// The segments of the returned path start at the (successive) top-left
    /// anchors of the rectangle.
    ///
    /// # Errors
    ///
    /// If `rect` has a non-positive or non-finite size, `dir` is zero, `budget`
    /// isn't finite and positive, `edge_rays` exceeds [`EdgeRays::MAX`] on a
    /// face, or the projector's configuration is invalid.
    pub fn project_rectangle<E: Environment + ?Sized>(
        &mut self,
        env: &E,
        rect: &Rectangle,
        dir: impl Into<Vector>,
        budget: Float,
        edge_rays: EdgeRays,
    ) -> Result<ProjectionResult, TraceError> {
        self.config.validate()?;
        rect.validate()?;
        edge_rays.validate()?;
        let mut remaining = check_budget(budget)?;
        let mut dir = try_direction(dir).ok_or(TraceError::ZeroDirection)?;

        let mut body = *rect;
        self.reset(rect, &dir, edge_rays);

        let mut segments = Vec::new();

        let termination = loop {
            let start = body.position;

            let Some((hit, from)) = self.closest_hit(env, &dir, remaining) else {
                segments.push(PathSegment::new(start, dir, remaining));
                break Termination::EscapedOpenSpace;
            };

            segments.push(PathSegment::new(start, dir, hit.distance));
            remaining -= hit.distance;

            trace!(
                "step {}: {:?} hit {:?} after {}, {} left",
                segments.len(),
                from.role,
                hit.surface,
                hit.distance,
                remaining,
            );

            if segments.len() >= self.config.max_segments {
                warn!(
                    "rectangle stopped after {} segments, {} travel distance left",
                    segments.len(),
                    remaining
                );
                break Termination::IterationCapped;
            }

            let movement =
                dir.as_ref() * hit.distance + hit.normal.as_ref() * self.config.safety_padding;
            body.position += movement;
            self.origins.iter_mut().for_each(|o| o.point += movement);

            (_, dir) = reflect(&hit, &from.point, &self.config);
            self.reanchor(&body, &dir);

            if remaining <= 0. {
                break Termination::BudgetExhausted;
            }
        };

        self.rect = Some(body);

        let path = Path::new(segments, termination);
        let net_displacement = path.net_displacement();

        debug!(
            "projected {}x{} rectangle over {} segments: {}",
            rect.width,
            rect.height,
            path.len(),
            termination.name()
        );

        Ok(ProjectionResult {
            path,
            net_displacement,
        })
    }

    fn reset(&mut self, rect: &Rectangle, dir: &Direction, edge_rays: EdgeRays) {
        let Rectangle {
            position: p,
            width,
            height,
        } = *rect;

        self.rect = None;
        self.origins.clear();

        self.origins
            .extend(rect.corners().into_iter().enumerate().map(|(i, point)| RayOrigin {
                role: RayRole::Corner(i),
                point,
            }));

        let x = if dir.x > 0. { p.x + width } else { p.x };
        let step = height / (edge_rays.horizontal as Float + 1.);
        self.origins
            .extend((0..edge_rays.horizontal).map(|i| RayOrigin {
                role: RayRole::EdgeHorizontal(i),
                point: Point::new(x, p.y + step * (i + 1) as Float),
            }));

        let y = if dir.y > 0. { p.y + height } else { p.y };
        let step = width / (edge_rays.vertical as Float + 1.);
        self.origins
            .extend((0..edge_rays.vertical).map(|i| RayOrigin {
                role: RayRole::EdgeVertical(i),
                point: Point::new(p.x + step * (i + 1) as Float, y),
            }));
    }

    /// The closest hit over the whole bundle, along with the origin of the ray
    /// that produced it.
    fn closest_hit<E: Environment + ?Sized>(
        &self,
        env: &E,
        dir: &Direction,
        max_distance: Float,
    ) -> Option<(Hit, RayOrigin)> {
        let mut closest: Option<(Hit, RayOrigin)> = None;

        for origin in &self.origins {
            let Some(hit) = env.query(&Ray::new(origin.point, *dir), max_distance) else {
                continue;
            };

            if closest
                .as_ref()
                .map_or(true, |(c, _)| hit.distance < c.distance)
            {
                closest = Some((hit, *origin));
            }
        }

        closest
    }

    /// Moves edge rays left on the trailing side of the body over to its leading side.
    fn reanchor(&mut self, rect: &Rectangle, dir: &Direction) {
        let center = rect.center();

        for origin in &mut self.origins {
            let p = &mut origin.point;
            match origin.role {
                RayRole::Corner(_) => {}
                RayRole::EdgeHorizontal(_) => {
                    if dir.x > 0. && p.x < center.x {
                        p.x += rect.width;
                    } else if dir.x <= 0. && p.x > center.x {
                        p.x -= rect.width;
                    }
                }
                RayRole::EdgeVertical(_) => {
                    if dir.y > 0. && p.y < center.y {
                        p.y += rect.height;
                    } else if dir.y <= 0. && p.y > center.y {
                        p.y -= rect.height;
                    }
                }
            }
        }
    }
}
