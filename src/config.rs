use crate::error::PipelineError;
use crate::raster::RasterSize;
use reportly_layout::{LayoutConfig, PageGeometry};
use reportly_report::Theme;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

pub const DEFAULT_TITLE: &str = "AI Data Analysis Report";
pub const OUTPUT_FILE_NAME: &str = "AI_Data_Analysis_Report.pdf";

/// Everything an export can be tuned with. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportConfig {
    pub geometry: PageGeometry,
    /// Spacing rules, oversize policy and the type scale.
    pub layout: LayoutConfig,
    /// Name of a theme preset; unknown names fall back to the default theme.
    pub theme: String,
    pub raster: RasterSize,
    /// Report title. `None` leaves out the title block.
    pub title: Option<String>,
    pub output_file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::a4(),
            layout: LayoutConfig::default(),
            theme: Theme::default().name.to_string(),
            raster: RasterSize::default(),
            title: Some(DEFAULT_TITLE.to_string()),
            output_file_name: OUTPUT_FILE_NAME.to_string(),
        }
    }
}

impl ExportConfig {
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        let config: ExportConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read config from '{}': {}", path.display(), e),
            ))
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        self.geometry.validate()?;

        if self.raster.width == 0 || self.raster.height == 0 {
            return Err(PipelineError::Configuration(format!(
                "Raster size must be positive, got {}x{}",
                self.raster.width, self.raster.height
            )));
        }

        let name = self.output_file_name.trim();
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(PipelineError::Configuration(format!(
                "Output file name '{}' must be a plain file name",
                self.output_file_name
            )));
        }
        Ok(())
    }

    pub fn theme(&self) -> Theme {
        Theme::by_name(&self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reportly_layout::OversizePolicy;

    #[test]
    fn defaults_match_the_classic_export() {
        let config = ExportConfig::default();
        assert_eq!(config.geometry, PageGeometry::a4());
        assert_eq!(config.raster, RasterSize { width: 1000, height: 600 });
        assert_eq!(config.output_file_name, "AI_Data_Analysis_Report.pdf");
        assert_eq!(config.theme(), Theme::PROFESSIONAL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = ExportConfig::from_json(
            r#"{
                "theme": "vibrant",
                "title": null,
                "layout": { "oversize": "shrinkToFit" },
                "geometry": { "width": 612.0, "height": 792.0, "margin": 36.0 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.theme(), Theme::VIBRANT);
        assert_eq!(config.title, None);
        assert_eq!(config.layout.oversize, OversizePolicy::ShrinkToFit);
        assert_eq!(config.geometry.margin, 36.0);
        assert_eq!(config.raster, RasterSize::default());
    }

    #[test]
    fn rejects_bad_geometry_and_names() {
        let err = ExportConfig::from_json(
            r#"{ "geometry": { "width": 50.0, "height": 792.0, "margin": 30.0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));

        let err = ExportConfig::from_json(
            r#"{ "geometry": { "width": 612.0, "height": 792.0, "margin": -20.0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)), "{err}");

        let err = ExportConfig::from_json(r#"{ "outputFileName": "../report.pdf" }"#).unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));

        let err = ExportConfig::from_json(r#"{ "raster": { "width": 0 } }"#).unwrap_err();
        assert!(matches!(err, PipelineError::Configuration(_)));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(
            ExportConfig::from_json("{ nope"),
            Err(PipelineError::Json(_))
        ));
    }
}
