use std::{collections::HashMap, sync::OnceLock};

use ricochet_shapes::*;

use super::*;

pub trait JsonTypeDyn {
    fn json_type_dyn(&self) -> String;
}

impl<T: JsonType + ?Sized> JsonTypeDyn for T {
    fn json_type_dyn(&self) -> String {
        Self::json_type()
    }
}

/// A surface whose concrete type is only known at runtime.
pub trait SceneSurface: Environment + JsonSer + JsonTypeDyn {}

impl<T: Environment + JsonSer + JsonTypeDyn + ?Sized> SceneSurface for T {}

/// Wraps a pointer to a surface, and (de)serializes it along with its type:
///
/// ```json
/// {
///     "type": "string",
///     "data": // <layout depends on the value at "type">
/// }
/// ```
///
/// Arrays of surfaces of the same type are supported by prefixing the type with `[]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dynamic<T>(pub T);

/// A surface of any type registered in [`Dynamic::<DynSurface>::from_json`].
pub type DynSurface = Dynamic<Box<dyn SceneSurface>>;

impl<T: Deref> Environment for Dynamic<T>
where
    T::Target: Environment,
{
    #[inline]
    fn add_hits(&self, ctx: &mut QueryCtx<'_>) {
        self.0.deref().add_hits(ctx);
    }
}

impl<T: Deref> JsonSer for Dynamic<T>
where
    T::Target: JsonTypeDyn + JsonSer,
{
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "type": self.0.deref().json_type_dyn(),
            "data": self.0.deref().to_json(),
        })
    }
}

impl<T> JsonType for Dynamic<T> {
    fn json_type() -> String {
        "dynamic".into()
    }
}

impl DynSurface {
    #[inline]
    #[must_use]
    pub fn boxed(surface: impl SceneSurface + 'static) -> Self {
        Self(Box::new(surface))
    }
}

type SurfaceDeserializer =
    fn(&serde_json::Value) -> Result<Box<dyn SceneSurface>, Box<dyn Error>>;

fn boxed<T: SceneSurface + 'static>(surface: T) -> Box<dyn SceneSurface> {
    Box::new(surface)
}

/// Deserializers for `T`, and for arrays of `T`.
fn entries<T>() -> [(String, SurfaceDeserializer); 2]
where
    T: SceneSurface + JsonType + JsonDes + 'static,
{
    [
        (
            T::json_type(),
            (|json| T::from_json(json).map(boxed)) as SurfaceDeserializer,
        ),
        (
            Vec::<T>::json_type(),
            (|json| Vec::<T>::from_json(json).map(boxed)) as SurfaceDeserializer,
        ),
    ]
}

impl JsonDes for DynSurface {
    /// Deserialize a surface of any of the following types:
    /// `segment`, `circle`, `box`, or `dynamic` (recursively).
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        static DESERIALIZERS: OnceLock<HashMap<String, SurfaceDeserializer>> = OnceLock::new();

        let deserializers = DESERIALIZERS.get_or_init(|| {
            [
                entries::<Segment>(),
                entries::<Circle>(),
                entries::<BoxMirror>(),
                entries::<DynSurface>(),
            ]
            .into_iter()
            .flatten()
            .collect()
        });

        let surface_type = json
            .get("type")
            .ok_or("missing surface type")?
            .as_str()
            .ok_or("type must be a string")?;

        let surface_json = json.get("data").ok_or("missing surface data")?;

        let deserializer = deserializers
            .get(surface_type)
            .ok_or_else(|| format!("invalid surface type: {surface_type}"))?;

        deserializer(surface_json).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn dispatches_on_type() {
        let scene: Scene<DynSurface> = Scene::from_json(&json!([
            { "type": "segment", "data": { "start": [5, -1], "end": [5, 1] } },
            { "type": "circle", "data": { "center": [-5, 0], "radius": 1 } },
            { "type": "box", "data": { "min": [-10, -10], "max": [10, 10] } },
        ]))
        .unwrap();

        assert_eq!(scene[SurfaceId(0)].to_json()["type"], "segment");
        assert_eq!(scene[SurfaceId(2)].to_json()["type"], "box");

        let east = Ray::try_new([0., 0.], [1., 0.]).unwrap();
        let hit = scene.query(&east, 100.).unwrap();
        assert_eq!(hit.surface, Some(SurfaceId(0)));
        assert_relative_eq!(hit.distance, 5.);

        let west = Ray::try_new([0., 0.], [-1., 0.]).unwrap();
        let hit = scene.query(&west, 100.).unwrap();
        assert_eq!(hit.surface, Some(SurfaceId(1)));
        assert_relative_eq!(hit.distance, 4.);
    }

    #[test]
    fn arrays_and_nesting() {
        let json = json!({
            "type": "dynamic",
            "data": {
                "type": "[]segment",
                "data": [
                    { "start": [1.0, -1.0], "end": [1.0, 1.0] },
                    { "start": [2.0, -1.0], "end": [2.0, 1.0] },
                ],
            },
        });

        let surface = DynSurface::from_json(&json).unwrap();
        assert_eq!(surface.to_json(), json);

        let east = Ray::try_new([0., 0.], [1., 0.]).unwrap();
        assert_relative_eq!(surface.query(&east, 10.).unwrap().distance, 1.);
    }

    #[test]
    fn round_trips_through_json() {
        let surface = DynSurface::boxed(Circle::new([1., 2.], 3.));
        let json = surface.to_json();

        assert_eq!(json["type"], "circle");
        assert_eq!(DynSurface::from_json(&json).unwrap().to_json(), json);
    }

    #[test]
    fn rejects_unknown_types() {
        assert!(DynSurface::from_json(&json!({ "type": "parabola", "data": {} })).is_err());
        assert!(DynSurface::from_json(&json!({ "type": "circle" })).is_err());
        assert!(DynSurface::from_json(&json!({ "data": {} })).is_err());
    }
}
