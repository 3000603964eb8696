use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Camera tuning. Every field has a default, so partial JSON overrides are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ViewConfig {
    /// Total padding subtracted from each viewport dimension before fitting.
    pub padding: f64,
    /// Scale range for the initial fit.
    pub fit_min_scale: f64,
    pub fit_max_scale: f64,
    /// Scale range for interactive zooming.
    pub min_scale: f64,
    pub max_scale: f64,
    /// Upward shift applied after centring, so the root card sits above the middle.
    pub vertical_bias: f64,
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
    /// Smallest box dimension used when computing the fit scale.
    pub min_extent: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            padding: 80.0,
            fit_min_scale: 0.2,
            fit_max_scale: 1.0,
            min_scale: 0.1,
            max_scale: 2.0,
            vertical_bias: 40.0,
            zoom_in_factor: 1.2,
            zoom_out_factor: 0.8,
            min_extent: 1.0,
        }
    }
}

impl ViewConfig {
    pub fn from_value(value: Value) -> Result<Self> {
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let all = [
            ("padding", self.padding),
            ("fitMinScale", self.fit_min_scale),
            ("fitMaxScale", self.fit_max_scale),
            ("minScale", self.min_scale),
            ("maxScale", self.max_scale),
            ("verticalBias", self.vertical_bias),
            ("zoomInFactor", self.zoom_in_factor),
            ("zoomOutFactor", self.zoom_out_factor),
            ("minExtent", self.min_extent),
        ];
        if let Some((name, _)) = all.iter().find(|(_, v)| !v.is_finite()) {
            return Err(invalid(format!("`{name}` must be finite")));
        }

        let positive = [
            ("fitMinScale", self.fit_min_scale),
            ("minScale", self.min_scale),
            ("zoomInFactor", self.zoom_in_factor),
            ("zoomOutFactor", self.zoom_out_factor),
            ("minExtent", self.min_extent),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(invalid(format!("`{name}` must be positive")));
        }

        if self.padding < 0.0 {
            return Err(invalid("`padding` must not be negative".to_string()));
        }
        if self.fit_min_scale > self.fit_max_scale {
            return Err(invalid(
                "`fitMinScale` must not exceed `fitMaxScale`".to_string(),
            ));
        }
        if self.min_scale > self.max_scale {
            return Err(invalid("`minScale` must not exceed `maxScale`".to_string()));
        }
        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfig { message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_overrides_keep_defaults() {
        let cfg = ViewConfig::from_value(json!({ "padding": 20, "maxScale": 3.0 })).unwrap();
        assert_eq!(cfg.padding, 20.0);
        assert_eq!(cfg.max_scale, 3.0);
        assert_eq!(cfg.fit_max_scale, 1.0);
        assert_eq!(cfg.zoom_in_factor, 1.2);
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        let err = ViewConfig::from_value(json!({ "fitMinScale": 2.0 })).unwrap_err();
        assert!(err.to_string().contains("fitMinScale"));

        let err = ViewConfig::from_json_str(r#"{ "minScale": 5, "maxScale": 1 }"#).unwrap_err();
        assert!(err.to_string().contains("minScale"));
    }

    #[test]
    fn non_positive_factors_are_rejected() {
        let err = ViewConfig::from_value(json!({ "zoomOutFactor": 0 })).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ViewConfig::from_value(json!({ "zoom": 2 })).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
