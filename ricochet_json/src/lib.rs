//! JSON (de)serialization of scenes, and of the paths traced through them.

mod config;
mod results;
mod scene;
mod shapes;
mod surface;

pub use results::*;
pub use scene::*;
pub use surface::*;

use ricochet::*;
use std::{error::Error, ops::Deref, rc::Rc, sync::Arc};

pub use serde_json;

/// This is essentially `try_into` then `try_map` but the latter is nightly-only
pub fn json_array_to_float_array<const D: usize>(
    json_array: &[serde_json::Value],
) -> Option<[Float; D]> {
    let array: &[serde_json::Value; D] = json_array.try_into().ok()?;

    let mut coords = [0.; D];
    for (coord, value) in coords.iter_mut().zip(array) {
        *coord = value.as_f64().filter(|c| c.is_finite())?;
    }
    Some(coords)
}

/// Reads the field `key` of `json` as a pair of finite floats.
pub fn get_pair(json: &serde_json::Value, key: &str) -> Result<[Float; 2], Box<dyn Error>> {
    json.get(key)
        .ok_or_else(|| format!("missing field \"{key}\""))?
        .as_array()
        .and_then(|a| json_array_to_float_array(a))
        .ok_or_else(|| format!("\"{key}\" must be an array of 2 finite numbers").into())
}

/// Reads the field `key` of `json` as a finite float.
pub fn get_float(json: &serde_json::Value, key: &str) -> Result<Float, Box<dyn Error>> {
    json.get(key)
        .ok_or_else(|| format!("missing field \"{key}\""))?
        .as_f64()
        .filter(|f| f.is_finite())
        .ok_or_else(|| format!("\"{key}\" must be a finite number").into())
}

/// Reads a direction from either the `"direction"` field of `json`, a non-zero
/// pair of floats, or its `"angle"` field, in degrees, counterclockwise from the x axis.
pub fn get_direction(json: &serde_json::Value) -> Result<Direction, Box<dyn Error>> {
    if json.get("direction").is_some() {
        try_direction(get_pair(json, "direction")?)
            .ok_or_else(|| "direction must be non-zero".into())
    } else if json.get("angle").is_some() {
        get_float(json, "angle").map(aim_direction)
    } else {
        Err("missing \"direction\" or \"angle\"".into())
    }
}

pub fn map_json_array<C: FromIterator<T>, T>(
    json: &serde_json::Value,
    map: impl FnMut(&serde_json::Value) -> Result<T, Box<dyn Error>>,
) -> Result<C, Box<dyn Error>> {
    json.as_array()
        .ok_or("json value must be an array")?
        .iter()
        .map(map)
        .collect()
}

pub trait JsonType {
    /// Returns a string, unique to the type, found in the "type" field of the json
    /// representation of a surface of this type
    fn json_type() -> String;
}

impl<T: JsonType> JsonType for [T] {
    fn json_type() -> String {
        format!("[]{}", T::json_type())
    }
}

impl<T: JsonType> JsonType for Vec<T> {
    fn json_type() -> String {
        <[T]>::json_type()
    }
}

pub trait JsonSer {
    /// Serialize `self` into a JSON object.
    fn to_json(&self) -> serde_json::Value;
}

impl<T: JsonSer> JsonSer for [T] {
    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.iter().map(T::to_json).collect())
    }
}

impl<const N: usize, T: JsonSer> JsonSer for [T; N] {
    fn to_json(&self) -> serde_json::Value {
        self.as_slice().to_json()
    }
}

// It's clear that all these impls use the `Deref` trait, but writing a blanket impl over all
// types implementing `Deref` makes the trait unusable downstream

impl<T: JsonSer + ?Sized> JsonSer for Box<T> {
    fn to_json(&self) -> serde_json::Value {
        self.deref().to_json()
    }
}

impl<T: JsonSer + ?Sized> JsonSer for Arc<T> {
    fn to_json(&self) -> serde_json::Value {
        self.deref().to_json()
    }
}

impl<T: JsonSer + ?Sized> JsonSer for Rc<T> {
    fn to_json(&self) -> serde_json::Value {
        self.deref().to_json()
    }
}

impl<T: JsonSer> JsonSer for Vec<T> {
    fn to_json(&self) -> serde_json::Value {
        self.as_slice().to_json()
    }
}

impl<T: JsonSer + ?Sized> JsonSer for &T {
    fn to_json(&self) -> serde_json::Value {
        (*self).to_json()
    }
}

pub trait JsonDes {
    /// Deserialize from a JSON object.
    ///
    /// Returns an error if `json`'s format or values are invalid.
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>>
    where
        Self: Sized;
}

impl<T: JsonDes> JsonDes for Vec<T> {
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        map_json_array(json, T::from_json)
    }
}

impl JsonSer for Ray {
    /// Serialize a ray into a JSON object.
    ///
    /// The format of the returned object is explained in [`Self::from_json`]
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "origin": self.origin.coords.as_slice(),
            "direction": self.dir.as_ref().as_slice(),
        })
    }
}

impl JsonDes for Ray {
    /// Deserialize a new ray from a JSON object.
    ///
    /// The JSON object must follow the following format:
    ///
    /// ```json
    /// {
    ///     "origin": [9., 8.],
    ///     "direction": [9., 8.], // must be non-zero
    /// }
    /// ```
    ///
    /// `"direction"` can be replaced with `"angle": 45.`, in degrees, counterclockwise
    /// from the x axis.
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        Ok(Self::new(get_pair(json, "origin")?, get_direction(json)?))
    }
}
