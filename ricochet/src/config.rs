use super::*;

/// How outgoing directions are computed at each bounce.
///
/// Both agree in exact arithmetic, but may round differently near grazing angles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReflectionMode {
    /// Rotate the surface normal by the signed angle between the reversed
    /// incoming ray and that normal.
    #[default]
    Rotation,
    /// `d - 2 (d . n) n`, renormalized.
    Householder,
}

impl ReflectionMode {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rotation => "rotation",
            Self::Householder => "householder",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rotation" => Some(Self::Rotation),
            "householder" => Some(Self::Householder),
            _ => None,
        }
    }
}

/// Tunables shared by [`trace_single_ray`] and [`RectangleProjector`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TraceConfig {
    /// Distance a restart point is pushed off the surface it bounced on,
    /// along that surface's normal.
    ///
    /// Must be large enough to absorb the roundoff errors of [`Float`],
    /// so the next query doesn't find the same surface again right away,
    /// but small enough not to skip over surfaces that are really there.
    pub safety_padding: Float,
    /// Maximum number of segments in a path. Reaching it stops the trace,
    /// which guards against parallel mirrors and other degenerate geometry.
    pub max_segments: usize,
    pub reflection: ReflectionMode,
}

impl TraceConfig {
    pub const DEFAULT_SAFETY_PADDING: Float = 0.00015;
    pub const DEFAULT_MAX_SEGMENTS: usize = 500;

    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            safety_padding: Self::DEFAULT_SAFETY_PADDING,
            max_segments: Self::DEFAULT_MAX_SEGMENTS,
            reflection: ReflectionMode::Rotation,
        }
    }

    #[inline]
    #[must_use]
    pub const fn with_safety_padding(mut self, safety_padding: Float) -> Self {
        self.safety_padding = safety_padding;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_max_segments(mut self, max_segments: usize) -> Self {
        self.max_segments = max_segments;
        self
    }

    #[inline]
    #[must_use]
    pub const fn with_reflection(mut self, reflection: ReflectionMode) -> Self {
        self.reflection = reflection;
        self
    }

    pub fn validate(&self) -> Result<(), TraceError> {
        if !(self.safety_padding.is_finite() && self.safety_padding >= 0.) {
            return Err(TraceError::InvalidConfig(
                "safety padding must be finite and non-negative",
            ));
        }
        if self.max_segments == 0 {
            return Err(TraceError::InvalidConfig("max_segments must be at least 1"));
        }
        Ok(())
    }
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_constants() {
        let config = TraceConfig::default();
        assert_eq!(config.max_segments, 500);
        assert_eq!(config.safety_padding, 0.00015);
        assert_eq!(config.reflection, ReflectionMode::Rotation);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(TraceConfig::new().with_max_segments(0).validate().is_err());
        assert!(TraceConfig::new()
            .with_safety_padding(-1.)
            .validate()
            .is_err());
        assert!(TraceConfig::new()
            .with_safety_padding(Float::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn mode_names_round_trip() {
        for mode in [ReflectionMode::Rotation, ReflectionMode::Householder] {
            assert_eq!(ReflectionMode::from_name(mode.name()), Some(mode));
        }
        assert_eq!(ReflectionMode::from_name("diffuse"), None);
    }
}
