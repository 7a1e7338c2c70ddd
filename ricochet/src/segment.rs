use std::slice;

use super::*;

/// One straight leg of a [`Path`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSegment {
    pub start: Point,
    pub dir: Direction,
    /// Always non-negative.
    pub length: Float,
}

impl PathSegment {
    #[inline]
    #[must_use]
    pub const fn new(start: Point, dir: Direction, length: Float) -> Self {
        Self { start, dir, length }
    }

    /// `start + dir * length`
    #[inline]
    #[must_use]
    pub fn end(&self) -> Point {
        self.start + self.dir.as_ref() * self.length
    }

    /// The half-line this segment is a part of.
    #[inline]
    #[must_use]
    pub fn ray(&self) -> Ray {
        Ray::new(self.start, self.dir)
    }
}

/// Why a trace stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The last segment hit nothing and used up what was left of the budget.
    EscapedOpenSpace,
    /// The budget ran out exactly on a bounce.
    BudgetExhausted,
    /// The path reached [`TraceConfig::max_segments`]. It is still well formed,
    /// but is only a prefix of the "true" path.
    IterationCapped,
}

impl Termination {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::EscapedOpenSpace => "escaped_open_space",
            Self::BudgetExhausted => "budget_exhausted",
            Self::IterationCapped => "iteration_capped",
        }
    }
}

/// The polyline followed by a ray, or a body, as it bounces around.
///
/// Segments are stored in the order they were travelled. A path is never empty,
/// and the sum of its segment lengths never exceeds (up to roundoff errors)
/// the travel budget it was traced with.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
    termination: Termination,
}

impl Path {
    #[inline]
    pub(crate) fn new(segments: Vec<PathSegment>, termination: Termination) -> Self {
        debug_assert!(!segments.is_empty(), "paths must not be empty");
        Self {
            segments,
            termination,
        }
    }

    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[inline]
    #[must_use]
    pub fn into_segments(self) -> Vec<PathSegment> {
        self.segments
    }

    #[inline]
    #[must_use]
    pub const fn termination(&self) -> Termination {
        self.termination
    }

    #[inline]
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, PathSegment> {
        self.segments.iter()
    }

    #[inline]
    #[must_use]
    pub fn first(&self) -> &PathSegment {
        &self.segments[0]
    }

    #[inline]
    #[must_use]
    pub fn last(&self) -> &PathSegment {
        &self.segments[self.segments.len() - 1]
    }

    #[inline]
    #[must_use]
    pub fn total_length(&self) -> Float {
        self.iter().map(|s| s.length).sum()
    }

    /// `self.last().end() - self.first().start`, the translation taking the start
    /// of this path to its end, without following every bounce.
    #[inline]
    #[must_use]
    pub fn net_displacement(&self) -> Vector {
        self.last().end() - self.first().start
    }

    /// The start of every segment, followed by the end of the last one.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.iter()
            .map(|s| s.start)
            .chain(std::iter::once(self.last().end()))
    }

    /// Checks if the last segment retraces an earlier one, i. e. they start at
    /// the same point, in the same direction (within `eps`), which means the path
    /// is stuck in a periodic orbit.
    ///
    /// Returns the index of the first such earlier segment.
    #[must_use]
    pub fn loop_index(&self, eps: Float) -> Option<usize> {
        self.segments.split_last().and_then(|(last, segments)| {
            segments.iter().position(|s| {
                (s.start - last.start).norm() <= eps
                    && (s.dir.as_ref() - last.dir.as_ref()).norm() <= eps
            })
        })
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathSegment;
    type IntoIter = slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
