use crate::color::{self, Color, parse_color_or};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub const DEFAULT_SCORE_LEVEL: i32 = 2;
pub const DEFAULT_MAX_SCORE: i32 = 100;
pub const DEFAULT_TEXT_SIZE_DP: f64 = 14.0;
pub const DEFAULT_LINE_WIDTH_DP: f64 = 1.0;

/// Converts density-independent pixels to whole device pixels, rounding to nearest.
pub fn dip_to_px(dp: f64, density: f64) -> i32 {
    (dp * density + 0.5) as i32
}

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct DimensionLabel(String);

crate::impl_string_newtype!(DimensionLabel);

/// What happens to the surface transform once the grid is drawn.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum RotationMode {
    /// The rotation replaces the surface transform after the grid and stays in
    /// effect for whatever the host draws next.
    #[default]
    #[strum(serialize = "set")]
    Set,
    /// The chart itself is drawn rotated and the transform is left untouched.
    #[strum(serialize = "wrap")]
    Wrap,
    #[strum(serialize = "off", serialize = "none")]
    Off,
}

/// Raw style attributes as a styling system hands them over: colors and scores
/// are strings, sizes are in dp.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StyleAttributes {
    pub score_level: Option<i32>,
    pub max_score: Option<i32>,
    pub dimension_text_size: Option<f64>,
    pub dimension_rotate_degree: Option<f32>,
    pub dimension_text_list: Vec<String>,
    pub dimension_text_color_list: Vec<String>,
    pub dimension_score_level_list: Vec<String>,
    pub dimension_radar_background_color: Option<String>,
    pub dimension_radar_score_color_list: Vec<String>,
    pub diagonal_line_color: Option<String>,
    pub diagonal_line_width: Option<f64>,
    pub side_line_color: Option<String>,
    pub side_line_width: Option<f64>,
    pub rotation_mode: RotationMode,
    pub show_scores: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarStyle {
    pub score_level: i32,
    pub max_score: i32,
    pub text_size: i32,
    pub rotate_degree: f32,
    pub dimension_texts: Vec<DimensionLabel>,
    pub dimension_text_colors: Vec<Color>,
    pub dimension_scores: Vec<f32>,
    pub dimension_score_colors: Vec<Color>,
    pub background_color: Color,
    pub diagonal_line_color: Color,
    pub diagonal_line_width: i32,
    pub side_line_color: Color,
    pub side_line_width: i32,
    pub rotation_mode: RotationMode,
    pub show_scores: bool,
}

impl Default for RadarStyle {
    fn default() -> Self {
        Self::from_attributes(&StyleAttributes::default(), 1.0)
    }
}

impl RadarStyle {
    /// Resolves raw attributes. Nothing here fails: unparseable entries fall back
    /// to black for text colors, gray for score colors, `0.0` for scores and the
    /// attribute's default for single colors.
    pub fn from_attributes(attrs: &StyleAttributes, density: f64) -> Self {
        let px = |dp: Option<f64>, default_dp: f64| dip_to_px(dp.unwrap_or(default_dp), density);
        let single_color = |value: &Option<String>, default: Color| {
            value
                .as_deref()
                .map_or(default, |s| parse_color_or(s, default))
        };

        Self {
            score_level: attrs.score_level.unwrap_or(DEFAULT_SCORE_LEVEL),
            max_score: attrs.max_score.unwrap_or(DEFAULT_MAX_SCORE),
            text_size: px(attrs.dimension_text_size, DEFAULT_TEXT_SIZE_DP),
            rotate_degree: attrs.dimension_rotate_degree.unwrap_or(0.0),
            dimension_texts: attrs
                .dimension_text_list
                .iter()
                .map(DimensionLabel::new)
                .collect(),
            dimension_text_colors: attrs
                .dimension_text_color_list
                .iter()
                .map(|s| parse_color_or(s, color::black()))
                .collect(),
            dimension_scores: attrs
                .dimension_score_level_list
                .iter()
                .map(|s| parse_score(s))
                .collect(),
            dimension_score_colors: attrs
                .dimension_radar_score_color_list
                .iter()
                .map(|s| parse_color_or(s, color::gray()))
                .collect(),
            background_color: single_color(
                &attrs.dimension_radar_background_color,
                color::white(),
            ),
            diagonal_line_color: single_color(&attrs.diagonal_line_color, color::gray()),
            diagonal_line_width: px(attrs.diagonal_line_width, DEFAULT_LINE_WIDTH_DP),
            side_line_color: single_color(&attrs.side_line_color, color::gray()),
            side_line_width: px(attrs.side_line_width, DEFAULT_LINE_WIDTH_DP),
            rotation_mode: attrs.rotation_mode,
            show_scores: attrs.show_scores,
        }
    }
}

fn parse_score(s: &str) -> f32 {
    s.trim()
        .parse()
        .ok()
        .filter(|v: &f32| v.is_finite())
        .unwrap_or_else(|| {
            log::warn!("Invalid dimension score '{}', using 0", s);
            0.0
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let style = RadarStyle::default();
        assert_eq!(style.score_level, 2);
        assert_eq!(style.max_score, 100);
        assert_eq!(style.text_size, 14);
        assert_eq!(style.rotate_degree, 0.0);
        assert_eq!(style.background_color, color::white());
        assert_eq!(style.diagonal_line_color, color::gray());
        assert_eq!(style.side_line_color, color::gray());
        assert_eq!(style.diagonal_line_width, 1);
        assert_eq!(style.side_line_width, 1);
        assert_eq!(style.rotation_mode, RotationMode::Set);
        assert!(!style.show_scores);
        assert!(style.dimension_texts.is_empty());
    }

    #[test]
    fn test_density_scales_dp_sizes() {
        let attrs = StyleAttributes {
            side_line_width: Some(1.5),
            ..Default::default()
        };
        let style = RadarStyle::from_attributes(&attrs, 2.0);
        assert_eq!(style.text_size, 28);
        assert_eq!(style.diagonal_line_width, 2);
        assert_eq!(style.side_line_width, 3);
        assert_eq!(dip_to_px(14.0, 1.5), 21);
        assert_eq!(dip_to_px(1.0, 0.75), 1);
    }

    #[test]
    fn test_invalid_list_colors_use_fallbacks() {
        let attrs = StyleAttributes {
            dimension_text_color_list: vec!["red".into(), "not-a-color".into()],
            dimension_radar_score_color_list: vec!["not-a-color".into(), "#0000FF".into()],
            ..Default::default()
        };
        let style = RadarStyle::from_attributes(&attrs, 1.0);
        assert_eq!(
            style.dimension_text_colors,
            vec![color::NamedColor::Red.color(), color::black()]
        );
        assert_eq!(
            style.dimension_score_colors,
            vec![color::gray(), color::NamedColor::Blue.color()]
        );
    }

    #[test]
    fn test_invalid_single_color_keeps_default() {
        let attrs = StyleAttributes {
            diagonal_line_color: Some("#12".into()),
            side_line_color: Some("#FF0000".into()),
            dimension_radar_background_color: Some("nope".into()),
            ..Default::default()
        };
        let style = RadarStyle::from_attributes(&attrs, 1.0);
        assert_eq!(style.diagonal_line_color, color::gray());
        assert_eq!(style.side_line_color, color::NamedColor::Red.color());
        assert_eq!(style.background_color, color::white());
    }

    #[test]
    fn test_scores_parse_with_zero_fallback() {
        let attrs = StyleAttributes {
            dimension_score_level_list: vec!["80".into(), "12.5".into(), "high".into()],
            ..Default::default()
        };
        let style = RadarStyle::from_attributes(&attrs, 1.0);
        assert_eq!(style.dimension_scores, vec![80.0, 12.5, 0.0]);
    }

    #[test]
    fn test_non_finite_scores_become_zero() {
        let attrs = StyleAttributes {
            dimension_score_level_list: vec!["NaN".into(), "inf".into(), "-inf".into()],
            ..Default::default()
        };
        let style = RadarStyle::from_attributes(&attrs, 1.0);
        assert_eq!(style.dimension_scores, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_mode_deserialization() {
        let cases = vec![
            ("\"set\"", RotationMode::Set),
            ("\"WRAP\"", RotationMode::Wrap),
            ("\"none\"", RotationMode::Off),
            ("\"off\"", RotationMode::Off),
        ];
        for (json, expected) in cases {
            let mode: RotationMode = serde_json::from_str(json).unwrap();
            assert_eq!(mode, expected);
        }
        assert!(serde_json::from_str::<RotationMode>("\"sideways\"").is_err());
    }

    #[test]
    fn test_attributes_deserialize_with_missing_fields() {
        let json = r#"{
            "dimension_text_list": ["Speed", "Power", "Range"],
            "dimension_rotate_degree": 30.0,
            "show_scores": true
        }"#;
        let attrs: StyleAttributes = serde_json::from_str(json).unwrap();
        let style = RadarStyle::from_attributes(&attrs, 1.0);
        assert_eq!(style.dimension_texts.len(), 3);
        assert_eq!(style.dimension_texts[1].as_str(), "Power");
        assert_eq!(style.rotate_degree, 30.0);
        assert!(style.show_scores);
        assert_eq!(style.max_score, DEFAULT_MAX_SCORE);
    }
}
