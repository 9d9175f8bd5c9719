//! Minimal feature styling model.
//!
//! Styles are pass-through data: the host map does the actual drawing. The
//! library only needs enough structure to copy a leaf's style onto its spread
//! marker, apply a layer-level `featureStyle`, and rescale image styles for
//! the device pixel ratio during animated draws.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Style {
    pub stroke: Option<Stroke>,
    pub fill: Option<Fill>,
    pub image: Option<ImageStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stroke {
    pub color: String,
    #[serde(default = "default_stroke_width")]
    pub width: f64,
}

fn default_stroke_width() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fill {
    pub color: String,
}

/// A circle image symbolizer. `scale` follows the host's convention of a
/// multiplier applied at draw time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageStyle {
    pub radius: f64,
    pub scale: f64,
    pub fill: Option<Fill>,
    pub stroke: Option<Stroke>,
}

impl Default for ImageStyle {
    fn default() -> Self {
        Self {
            radius: 0.0,
            scale: 1.0,
            fill: None,
            stroke: None,
        }
    }
}

impl Style {
    /// An empty circle image, used by the animation ghost feature.
    pub fn empty_circle() -> Self {
        Self {
            image: Some(ImageStyle::default()),
            ..Self::default()
        }
    }

    /// Returns a copy with any image scale set to the device pixel ratio.
    ///
    /// The original style is left untouched; the scaled copy lives only for
    /// the duration of one interpolated draw.
    pub fn for_pixel_ratio(&self, ratio: f64) -> Self {
        let mut style = self.clone();
        if let Some(image) = style.image.as_mut() {
            image.scale = ratio;
        }
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_rescale_leaves_original_untouched() {
        let style = Style {
            image: Some(ImageStyle {
                radius: 6.0,
                scale: 1.0,
                fill: None,
                stroke: None,
            }),
            ..Style::default()
        };
        let scaled = style.for_pixel_ratio(2.0);
        assert_eq!(scaled.image.as_ref().unwrap().scale, 2.0);
        assert_eq!(style.image.as_ref().unwrap().scale, 1.0);
    }

    #[test]
    fn deserializes_camel_case() {
        let style: Style = serde_json::from_str(
            r##"{"stroke":{"color":"#069","width":2},"image":{"radius":8}}"##,
        )
        .unwrap();
        assert_eq!(style.stroke.as_ref().unwrap().width, 2.0);
        let image = style.image.unwrap();
        assert_eq!(image.radius, 8.0);
        assert_eq!(image.scale, 1.0);
    }
}
