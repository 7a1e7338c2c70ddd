use super::*;

impl JsonSer for TraceConfig {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "safety_padding": self.safety_padding,
            "max_segments": self.max_segments,
            "reflection": self.reflection.name(),
        })
    }
}

impl JsonDes for TraceConfig {
    /// Deserialize a trace configuration from a JSON object.
    ///
    /// Every field is optional, missing ones take their default value:
    ///
    /// ```json
    /// {
    ///     "safety_padding": 0.00015,
    ///     "max_segments": 500,
    ///     "reflection": "rotation" // or "householder"
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        if !json.is_object() {
            return Err("config must be an object".into());
        }

        let mut config = Self::default();

        if json.get("safety_padding").is_some() {
            config.safety_padding = get_float(json, "safety_padding")?;
        }

        if let Some(value) = json.get("max_segments") {
            config.max_segments = value
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or("\"max_segments\" must be a non-negative integer")?;
        }

        if let Some(value) = json.get("reflection") {
            let name = value.as_str().ok_or("\"reflection\" must be a string")?;
            config.reflection = ReflectionMode::from_name(name)
                .ok_or_else(|| format!("unknown reflection mode: {name}"))?;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_take_defaults() {
        let config = TraceConfig::from_json(&json!({ "max_segments": 12 })).unwrap();
        assert_eq!(config, TraceConfig::default().with_max_segments(12));

        assert_eq!(TraceConfig::from_json(&json!({})).unwrap(), TraceConfig::default());
    }

    #[test]
    fn round_trips() {
        let config = TraceConfig::new()
            .with_safety_padding(0.01)
            .with_reflection(ReflectionMode::Householder);
        assert_eq!(TraceConfig::from_json(&config.to_json()).unwrap(), config);
    }

    #[test]
    fn rejects_invalid_values() {
        for json in [
            json!([]),
            json!({ "max_segments": 0 }),
            json!({ "max_segments": -3 }),
            json!({ "safety_padding": -1 }),
            json!({ "reflection": "refraction" }),
        ] {
            assert!(TraceConfig::from_json(&json).is_err(), "{json}");
        }
    }
}
