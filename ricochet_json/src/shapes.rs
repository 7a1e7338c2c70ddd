use ricochet_shapes::*;

use super::*;

impl JsonType for Segment {
    fn json_type() -> String {
        "segment".into()
    }
}

impl JsonDes for Segment {
    /// Deserialize a new segment mirror from a JSON object.
    ///
    /// The JSON object must follow the following format:
    ///
    /// ```json
    /// {
    ///     "start": [1., 2.],
    ///     "end": [3., 4.], // must be distinct from "start"
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let start = get_pair(json, "start")?;
        let end = get_pair(json, "end")?;

        Self::try_new(start, end).ok_or_else(|| "segment endpoints must be distinct".into())
    }
}

impl JsonSer for Segment {
    /// Serialize a segment mirror into a JSON object.
    ///
    /// The format of the returned object is explained in [`Self::from_json`]
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "start": self.start().coords.as_slice(),
            "end": self.end().coords.as_slice(),
        })
    }
}

impl JsonType for Circle {
    fn json_type() -> String {
        "circle".into()
    }
}

impl JsonDes for Circle {
    /// Deserialize a new circular mirror from a JSON object.
    ///
    /// The JSON object must follow the following format:
    ///
    /// ```json
    /// {
    ///     "center": [1., 2.],
    ///     "radius": 4., // must be positive
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let center = get_pair(json, "center")?;
        let radius = get_float(json, "radius")?;

        Self::try_new(center, radius).ok_or_else(|| "circle radius must be positive".into())
    }
}

impl JsonSer for Circle {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "center": self.center.coords.as_slice(),
            "radius": self.radius(),
        })
    }
}

impl JsonType for BoxMirror {
    fn json_type() -> String {
        "box".into()
    }
}

impl JsonDes for BoxMirror {
    /// Deserialize a new box mirror from a JSON object.
    ///
    /// The JSON object must follow the following format:
    ///
    /// ```json
    /// {
    ///     "min": [-1., -2.],
    ///     "max": [3., 4.], // strictly greater than "min", on both axes
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let min = get_pair(json, "min")?;
        let max = get_pair(json, "max")?;

        Self::try_new(min, max)
            .ok_or_else(|| "box \"max\" must be strictly greater than \"min\"".into())
    }
}

impl JsonSer for BoxMirror {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "min": self.min().coords.as_slice(),
            "max": self.max().coords.as_slice(),
        })
    }
}

impl<M: JsonSer> JsonSer for Scene<M> {
    fn to_json(&self) -> serde_json::Value {
        self.surfaces().to_json()
    }
}

impl<M: JsonDes> JsonDes for Scene<M> {
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        map_json_array(json, M::from_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn shapes_round_trip() {
        let segment = Segment::new([0., 1.], [2., 3.5]);
        assert_eq!(Segment::from_json(&segment.to_json()).unwrap(), segment);

        let circle = Circle::new([-1., 4.], 0.25);
        assert_eq!(Circle::from_json(&circle.to_json()).unwrap(), circle);

        let b = BoxMirror::new([-10., -5.], [10., 5.]);
        assert_eq!(BoxMirror::from_json(&b.to_json()).unwrap(), b);
    }

    #[test]
    fn rejects_degenerate_shapes() {
        assert!(Segment::from_json(&json!({ "start": [1, 1], "end": [1, 1] })).is_err());
        assert!(Circle::from_json(&json!({ "center": [0, 0], "radius": 0 })).is_err());
        assert!(Circle::from_json(&json!({ "center": [0, 0] })).is_err());
        assert!(BoxMirror::from_json(&json!({ "min": [0, 0], "max": [0, 1] })).is_err());
    }

    #[test]
    fn scenes_are_arrays() {
        let scene: Scene<Circle> = Scene::from_json(&json!([
            { "center": [0, 0], "radius": 1 },
            { "center": [5, 0], "radius": 2 },
        ]))
        .unwrap();

        assert_eq!(scene.len(), 2);
        assert_eq!(scene[SurfaceId(1)].radius(), 2.);
        assert!(Scene::<Circle>::from_json(&json!({})).is_err());
    }
}
