use thiserror::Error;

use super::*;

/// Precondition violations reported by [`trace_single_ray`] and
/// [`RectangleProjector::project_rectangle`].
///
/// Hitting nothing, or hitting the segment cap, are not errors, see [`Termination`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TraceError {
    #[error("direction must be a finite, non-zero vector")]
    ZeroDirection,
    #[error("travel budget must be finite and positive, got {0}")]
    InvalidBudget(Float),
    #[error("rectangle must have a finite, positive size, got {width}x{height}")]
    InvalidRectangle { width: Float, height: Float },
    #[error("invalid trace configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("at most {max} edge rays per face, got {0:?}", max = EdgeRays::MAX)]
    TooManyEdgeRays(EdgeRays),
}

pub(crate) fn check_budget(budget: Float) -> Result<Float, TraceError> {
    if budget.is_finite() && budget > 0. {
        Ok(budget)
    } else {
        Err(TraceError::InvalidBudget(budget))
    }
}
