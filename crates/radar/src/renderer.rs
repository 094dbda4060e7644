use crate::color::{self, Color};
use crate::geometry::{ANGLE_STEP_DEGREES, DIVIDE_COUNT, GridLevel, HexSegment, Layout, rotation_about};
use crate::style::{RadarStyle, RotationMode};
use crate::surface::{Path, Stroke, Surface, TextStyle};
use glam::DVec2;

pub const MIN_SCORED_DIMENSIONS: usize = 3;
pub const SCORE_FILL_ALPHA: f64 = 0.5;

/// The two callbacks a host drives a chart with.
pub trait ChartView {
    fn size_changed(&mut self, width: i32, height: i32, old_width: i32, old_height: i32);

    fn draw<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error>;
}

#[derive(Debug, Clone)]
pub struct RadarRenderer {
    style: RadarStyle,
    layout: Layout,
}

impl RadarRenderer {
    pub fn new(style: RadarStyle) -> Self {
        Self {
            style,
            layout: Layout::default(),
        }
    }

    pub fn style(&self) -> &RadarStyle {
        &self.style
    }

    /// Swaps the style. The layout is left alone until the next [`resize`](Self::resize).
    pub fn set_style(&mut self, style: RadarStyle) {
        self.style = style;
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        self.layout = Layout::from_size(width, height, self.style.text_size);
        log::debug!(
            "Resized to {}x{}: center ({}, {}), radius {}",
            width,
            height,
            self.layout.center.x,
            self.layout.center.y,
            self.layout.radius
        );
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        surface.save()?;
        self.apply_wrapped_rotation(surface);
        self.draw_score_levels(surface)?;
        surface.restore()?;

        if self.style.show_scores {
            self.draw_scores(surface)?;
        }

        if self.style.rotation_mode == RotationMode::Set {
            surface.set_matrix(rotation_about(self.rotate_degree(), self.layout.center));
        }
        Ok(())
    }

    fn rotate_degree(&self) -> f64 {
        f64::from(self.style.rotate_degree)
    }

    fn apply_wrapped_rotation<S: Surface>(&self, surface: &mut S) {
        if self.style.rotation_mode == RotationMode::Wrap {
            surface.rotate_about(self.rotate_degree(), self.layout.center);
        }
    }

    fn draw_score_levels<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let center = self.layout.center;

        for level in GridLevel::all() {
            self.draw_hex_grid(surface)?;
            surface.scale_about(level.scale_factor(), center);
        }
        Ok(())
    }

    /// One ring: the top diagonal and side, re-issued under a frame rotated one
    /// step per vertex. Six steps bring the frame back to where it started.
    pub fn draw_hex_grid<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let segment = HexSegment::compute(&self.layout);
        let [center, vertex] = segment.diagonal();
        let diagonal = Path::line(center, vertex);
        let [vertex, next_vertex] = segment.side();
        let side = Path::line(vertex, next_vertex);

        let diagonal_stroke = Stroke {
            color: self.style.diagonal_line_color,
            width: f64::from(self.style.diagonal_line_width),
        };
        let side_stroke = Stroke {
            color: self.style.side_line_color,
            width: f64::from(self.style.side_line_width),
        };

        for _ in 0..DIVIDE_COUNT {
            surface.stroke_path(&diagonal, &diagonal_stroke)?;
            surface.stroke_path(&side, &side_stroke)?;
            surface.rotate_about(ANGLE_STEP_DEGREES, self.layout.center);
        }
        Ok(())
    }

    /// Vertices of the score polygon, or `None` with fewer than three dimensions.
    pub fn score_polygon(&self) -> Option<Vec<DVec2>> {
        let count = self.style.dimension_texts.len();
        if count < MIN_SCORED_DIMENSIONS {
            return None;
        }

        let max_score = f64::from(self.style.max_score);
        let step = 360.0 / count as f64;

        Some(
            (0..count)
                .map(|k| {
                    let score = self.style.dimension_scores.get(k).copied().unwrap_or(0.0);
                    let fraction = if max_score > 0.0 {
                        (f64::from(score) / max_score).clamp(0.0, 1.0)
                    } else {
                        0.0
                    };
                    self.layout
                        .axis_point(self.layout.radius * fraction, step * k as f64)
                })
                .collect(),
        )
    }

    fn score_color(&self) -> Color {
        self.style
            .dimension_score_colors
            .first()
            .copied()
            .unwrap_or_else(color::green)
    }

    fn draw_scores<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let Some(points) = self.score_polygon() else {
            log::debug!(
                "Score overlay needs at least {} dimensions, skipping",
                MIN_SCORED_DIMENSIONS
            );
            return Ok(());
        };

        surface.save()?;
        self.apply_wrapped_rotation(surface);

        let outline = self.score_color();
        let mut fill = outline;
        fill.alpha *= SCORE_FILL_ALPHA;

        let polygon = Path::polygon(points);
        surface.fill_path(&polygon, fill)?;
        surface.stroke_path(
            &polygon,
            &Stroke {
                color: outline,
                width: f64::from(self.style.side_line_width),
            },
        )?;

        let count = self.style.dimension_texts.len();
        let label_distance = self.layout.radius + f64::from(self.style.text_size);
        for (k, label) in self.style.dimension_texts.iter().enumerate() {
            let style = TextStyle {
                color: self
                    .style
                    .dimension_text_colors
                    .get(k)
                    .copied()
                    .unwrap_or_else(color::black),
                size: f64::from(self.style.text_size),
            };
            let anchor = self
                .layout
                .axis_point(label_distance, 360.0 / count as f64 * k as f64);
            surface.fill_text(label.as_str(), anchor, &style)?;
        }

        surface.restore()
    }
}

impl ChartView for RadarRenderer {
    fn size_changed(&mut self, width: i32, height: i32, _old_width: i32, _old_height: i32) {
        self.resize(width, height);
    }

    fn draw<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        RadarRenderer::draw(self, surface)
    }
}
