use super::*;

/// Tolerance used to report periodic orbits in serialized paths.
pub const LOOP_EPSILON: Float = 1e-9;

impl JsonSer for Termination {
    fn to_json(&self) -> serde_json::Value {
        self.name().into()
    }
}

impl JsonSer for PathSegment {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "start": self.start.coords.as_slice(),
            "direction": self.dir.as_ref().as_slice(),
            "length": self.length,
            "end": self.end().coords.as_slice(),
        })
    }
}

impl JsonSer for Path {
    /// Serialize a path into a JSON object, of the following format:
    ///
    /// ```json
    /// {
    ///     "segments": [
    ///         { "start": [0., 0.], "direction": [1., 0.], "length": 5., "end": [5., 0.] },
    ///         ...
    ///     ],
    ///     "termination": "escaped_open_space", // or "budget_exhausted", "iteration_capped"
    ///     "total_length": 10.,
    ///     "net_displacement": [0., 0.],
    ///     "loop_index": null, // or the index of the segment the path started retracing
    /// }
    /// ```
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "segments": self.segments().to_json(),
            "termination": self.termination().to_json(),
            "total_length": self.total_length(),
            "net_displacement": self.net_displacement().as_slice(),
            "loop_index": self.loop_index(LOOP_EPSILON),
        })
    }
}

impl JsonSer for ProjectionResult {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "path": self.path.to_json(),
            "net_displacement": self.net_displacement.as_slice(),
        })
    }
}

impl JsonSer for SceneOutcome {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "rays": self.paths.to_json(),
            "rectangles": self.projections.to_json(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ricochet_shapes::Segment;
    use serde_json::json;

    #[test]
    fn serializes_paths() {
        let wall = Segment::new([5., -10.], [5., 10.]);
        let config = TraceConfig::default().with_safety_padding(0.5);
        let path = trace_single_ray(&wall, [0., 0.], [1., 0.], 6., &config).unwrap();

        let json = path.to_json();
        assert_eq!(json["termination"], "escaped_open_space");
        assert_eq!(json["total_length"], 6.0);
        assert_eq!(json["loop_index"], serde_json::Value::Null);

        let segments = json["segments"].as_array().unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(
            segments[0],
            json!({
                "start": [0.0, 0.0],
                "direction": [1.0, 0.0],
                "length": 5.0,
                "end": [5.0, 0.0],
            })
        );
        assert_eq!(segments[1]["start"], json!([4.5, 0.0]));
    }

    #[test]
    fn serializes_projections() {
        let wall = Segment::new([5., -10.], [5., 10.]);
        let mut projector = RectangleProjector::default();
        let rect = Rectangle::new([0., 0.], 1., 1.);
        let result = projector
            .project_rectangle(&wall, &rect, [1., 0.], 3., EdgeRays::default())
            .unwrap();

        let json = result.to_json();
        assert_eq!(json["path"]["termination"], "escaped_open_space");
        assert_eq!(json["net_displacement"], json!([3.0, 0.0]));
    }
}
