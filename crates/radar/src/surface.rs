use crate::color::Color;
use crate::geometry::{rotation_about, scale_about};
use glam::{DAffine2, DVec2};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub size: f64,
}

/// A polyline in user space, optionally closed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    points: Vec<DVec2>,
    closed: bool,
}

impl Path {
    pub fn line(from: DVec2, to: DVec2) -> Self {
        Self {
            points: vec![from, to],
            closed: false,
        }
    }

    pub fn polygon(points: impl IntoIterator<Item = DVec2>) -> Self {
        Self {
            points: points.into_iter().collect(),
            closed: true,
        }
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn transformed(&self, matrix: &DAffine2) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|&p| matrix.transform_point2(p))
                .collect(),
            closed: self.closed,
        }
    }

    /// Summed length of all segments, including the closing one.
    pub fn length(&self) -> f64 {
        let open: f64 = self.points.windows(2).map(|w| w[0].distance(w[1])).sum();
        match (self.closed, self.points.first(), self.points.last()) {
            (true, Some(first), Some(last)) => open + last.distance(*first),
            _ => open,
        }
    }
}

/// How much a transform stretches lengths, taken as the geometric mean of its axes.
pub fn linear_scale(matrix: &DAffine2) -> f64 {
    matrix.matrix2.determinant().abs().sqrt()
}

/// The current transform plus the states pushed by `save`.
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    current: DAffine2,
    saved: Vec<DAffine2>,
}

impl TransformStack {
    pub fn current(&self) -> DAffine2 {
        self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Returns false when nothing was saved.
    pub fn restore(&mut self) -> bool {
        match self.saved.pop() {
            Some(m) => {
                self.current = m;
                true
            }
            None => false,
        }
    }

    pub fn concat(&mut self, matrix: DAffine2) {
        self.current = self.current * matrix;
    }

    pub fn set(&mut self, matrix: DAffine2) {
        self.current = matrix;
    }
}

/// The drawing capabilities the renderer needs from its host.
///
/// Transforms follow the usual canvas convention: `concat` pre-multiplies, so
/// the newest transform applies to user coordinates first. `set_matrix` replaces
/// the whole current transform.
pub trait Surface {
    type Error;

    fn save(&mut self) -> Result<(), Self::Error>;

    fn restore(&mut self) -> Result<(), Self::Error>;

    fn matrix(&self) -> DAffine2;

    fn concat(&mut self, matrix: DAffine2);

    fn set_matrix(&mut self, matrix: DAffine2);

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) -> Result<(), Self::Error>;

    fn fill_path(&mut self, path: &Path, color: Color) -> Result<(), Self::Error>;

    /// Draws `text` centered on `anchor`.
    fn fill_text(&mut self, text: &str, anchor: DVec2, style: &TextStyle)
    -> Result<(), Self::Error>;

    fn scale_about(&mut self, factor: f64, pivot: DVec2) {
        self.concat(scale_about(factor, pivot));
    }

    fn rotate_about(&mut self, degrees: f64, pivot: DVec2) {
        self.concat(rotation_about(degrees, pivot));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("restore called without a matching save")]
    UnbalancedRestore,
}

/// Everything a [`RecordingSurface`] was asked to do. Geometry is stored in
/// device space with the transform already applied.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    Concat(DAffine2),
    SetMatrix(DAffine2),
    Stroke { path: Path, stroke: Stroke },
    Fill { path: Path, color: Color },
    Text {
        text: String,
        anchor: DVec2,
        style: TextStyle,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    transforms: TransformStack,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn save_depth(&self) -> usize {
        self.transforms.depth()
    }

    pub fn strokes(&self) -> impl Iterator<Item = (&Path, &Stroke)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Stroke { path, stroke } => Some((path, stroke)),
            _ => None,
        })
    }

    pub fn fills(&self) -> impl Iterator<Item = (&Path, &Color)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Fill { path, color } => Some((path, color)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = (&str, DVec2, &TextStyle)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text {
                text,
                anchor,
                style,
            } => Some((text.as_str(), *anchor, style)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    type Error = SurfaceError;

    fn save(&mut self) -> Result<(), SurfaceError> {
        self.transforms.save();
        self.commands.push(DrawCommand::Save);
        Ok(())
    }

    fn restore(&mut self) -> Result<(), SurfaceError> {
        if !self.transforms.restore() {
            return Err(SurfaceError::UnbalancedRestore);
        }
        self.commands.push(DrawCommand::Restore);
        Ok(())
    }

    fn matrix(&self) -> DAffine2 {
        self.transforms.current()
    }

    fn concat(&mut self, matrix: DAffine2) {
        self.transforms.concat(matrix);
        self.commands.push(DrawCommand::Concat(matrix));
    }

    fn set_matrix(&mut self, matrix: DAffine2) {
        self.transforms.set(matrix);
        self.commands.push(DrawCommand::SetMatrix(matrix));
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) -> Result<(), SurfaceError> {
        let m = self.transforms.current();
        self.commands.push(DrawCommand::Stroke {
            path: path.transformed(&m),
            stroke: Stroke {
                color: stroke.color,
                width: stroke.width * linear_scale(&m),
            },
        });
        Ok(())
    }

    fn fill_path(&mut self, path: &Path, color: Color) -> Result<(), SurfaceError> {
        let m = self.transforms.current();
        self.commands.push(DrawCommand::Fill {
            path: path.transformed(&m),
            color,
        });
        Ok(())
    }

    fn fill_text(
        &mut self,
        text: &str,
        anchor: DVec2,
        style: &TextStyle,
    ) -> Result<(), SurfaceError> {
        let m = self.transforms.current();
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            anchor: m.transform_point2(anchor),
            style: TextStyle {
                color: style.color,
                size: style.size * linear_scale(&m),
            },
        });
        Ok(())
    }
}
