use log::{debug, info};
use ricochet_shapes::Scene;

use super::*;

/// A ray to trace, along with its travel budget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayLaunch {
    pub ray: Ray,
    pub budget: Float,
}

impl RayLaunch {
    /// # Errors
    ///
    /// See [`trace_single_ray`].
    pub fn trace<E: Environment + ?Sized>(
        &self,
        env: &E,
        config: &TraceConfig,
    ) -> Result<Path, TraceError> {
        let Ray { origin, dir } = self.ray;
        trace_single_ray(env, origin, dir.into_inner(), self.budget, config)
    }
}

impl JsonSer for RayLaunch {
    fn to_json(&self) -> serde_json::Value {
        let mut json = self.ray.to_json();
        json["budget"] = self.budget.into();
        json
    }
}

impl JsonDes for RayLaunch {
    /// A ray, in the format described in [`Ray::from_json`],
    /// with an additional positive `"budget"` field.
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let ray = Ray::from_json(json)?;
        let budget = get_budget(json)?;

        Ok(Self { ray, budget })
    }
}

/// A rectangle to project, along with its direction and travel budget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectangleLaunch {
    pub rect: Rectangle,
    pub dir: Direction,
    pub budget: Float,
    pub edge_rays: EdgeRays,
}

impl RectangleLaunch {
    /// # Errors
    ///
    /// See [`RectangleProjector::project_rectangle`].
    pub fn project<E: Environment + ?Sized>(
        &self,
        projector: &mut RectangleProjector,
        env: &E,
    ) -> Result<ProjectionResult, TraceError> {
        projector.project_rectangle(
            env,
            &self.rect,
            self.dir.into_inner(),
            self.budget,
            self.edge_rays,
        )
    }
}

impl JsonSer for RectangleLaunch {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "position": self.rect.position.coords.as_slice(),
            "size": [self.rect.width, self.rect.height],
            "direction": self.dir.as_ref().as_slice(),
            "budget": self.budget,
            "edge_rays": [self.edge_rays.horizontal, self.edge_rays.vertical],
        })
    }
}

impl JsonDes for RectangleLaunch {
    /// Deserialize a rectangle launch from a JSON object.
    ///
    /// The JSON object must follow the following format:
    ///
    /// ```json
    /// {
    ///     "position": [0., 0.], // top-left corner
    ///     "size": [1., 2.], // width and height, positive
    ///     "direction": [1., 1.], // or "angle": 45.
    ///     "budget": 10., // positive
    ///     "edge_rays": [3, 2], // optional
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let position = get_pair(json, "position")?;
        let [width, height] = get_pair(json, "size")?;

        if !(width > 0. && height > 0.) {
            return Err(format!("rectangle size must be positive, got {width}x{height}").into());
        }

        let edge_rays = match json.get("edge_rays") {
            None => EdgeRays::default(),
            Some(value) => {
                let counts = value
                    .as_array()
                    .filter(|a| a.len() == 2)
                    .and_then(|a| {
                        a.iter()
                            .map(|n| n.as_u64().and_then(|n| usize::try_from(n).ok()))
                            .collect::<Option<Vec<_>>>()
                    })
                    .ok_or("\"edge_rays\" must be an array of 2 non-negative integers")?;
                EdgeRays::new(counts[0], counts[1]).validate()?
            }
        };

        Ok(Self {
            rect: Rectangle::new(position, width, height),
            dir: get_direction(json)?,
            budget: get_budget(json)?,
            edge_rays,
        })
    }
}

fn get_budget(json: &serde_json::Value) -> Result<Float, Box<dyn Error>> {
    let budget = get_float(json, "budget")?;
    if budget > 0. {
        Ok(budget)
    } else {
        Err(format!("budget must be positive, got {budget}").into())
    }
}

/// Everything needed to run a batch of traces: surfaces to bounce off, rays and
/// rectangles to launch, and the configuration shared by all of them.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct SceneFile<M> {
    pub config: TraceConfig,
    pub surfaces: Scene<M>,
    pub rays: Vec<RayLaunch>,
    pub rectangles: Vec<RectangleLaunch>,
}

/// What came out of [`SceneFile::run`], in launch order.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneOutcome {
    pub paths: Vec<Path>,
    pub projections: Vec<ProjectionResult>,
}

impl<M: Environment> SceneFile<M> {
    /// Traces every ray, then projects every rectangle, through `self.surfaces`.
    ///
    /// # Errors
    ///
    /// If `self.config` is invalid.
    pub fn run(&self) -> Result<SceneOutcome, TraceError> {
        info!(
            "running {} rays and {} rectangles through {} surfaces",
            self.rays.len(),
            self.rectangles.len(),
            self.surfaces.len(),
        );

        let paths = self
            .rays
            .iter()
            .map(|launch| launch.trace(&self.surfaces, &self.config))
            .collect::<Result<Vec<_>, _>>()?;

        let mut projector = RectangleProjector::new(self.config);
        let projections = self
            .rectangles
            .iter()
            .map(|launch| launch.project(&mut projector, &self.surfaces))
            .collect::<Result<Vec<_>, _>>()?;

        for (i, path) in paths.iter().enumerate() {
            debug!("ray {i}: {} segments, {}", path.len(), path.termination().name());
        }

        Ok(SceneOutcome { paths, projections })
    }
}

impl<M: JsonDes> JsonDes for SceneFile<M> {
    /// Deserialize a scene from a JSON object.
    ///
    /// The JSON object must follow the following format:
    ///
    /// ```json
    /// {
    ///     "config": { ... }, // optional, see `TraceConfig::from_json`
    ///     "surfaces": [ ... ],
    ///     "rays": [ ... ], // optional, see `RayLaunch::from_json`
    ///     "rectangles": [ ... ], // optional, see `RectangleLaunch::from_json`
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let config = json
            .get("config")
            .map(TraceConfig::from_json)
            .transpose()?
            .unwrap_or_default();

        let surfaces = json.get("surfaces").ok_or("missing \"surfaces\" field")?;
        let surfaces = Scene::from_json(surfaces)?;

        let rays = json
            .get("rays")
            .map(|rays| map_json_array(rays, RayLaunch::from_json))
            .transpose()?
            .unwrap_or_default();

        let rectangles = json
            .get("rectangles")
            .map(|rects| map_json_array(rects, RectangleLaunch::from_json))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            config,
            surfaces,
            rays,
            rectangles,
        })
    }
}

impl<M: JsonSer> JsonSer for SceneFile<M> {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "config": self.config.to_json(),
            "surfaces": self.surfaces.to_json(),
            "rays": self.rays.to_json(),
            "rectangles": self.rectangles.to_json(),
        })
    }
}
