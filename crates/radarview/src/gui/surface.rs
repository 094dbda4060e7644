use cairo::Context;
use glam::{DAffine2, DVec2};
use radar::surface::{TransformStack, linear_scale};
use radar::{Color, Path, Stroke, Surface, TextStyle};

/// Draws onto a cairo context in its current user space.
///
/// The transform stack is kept here rather than in cairo: the grid scales its
/// frame by zero, which cairo refuses as an invalid matrix. Paths are mapped to
/// device space before they reach the context and stroke widths follow the
/// transform's scale.
///
/// The stack lives only as long as this value. A matrix set at the end of
/// `draw` (`RotationMode::Set`) is dropped with it, so on screen and in export
/// `set` looks the same as `off`.
pub struct CairoSurface<'a> {
    cr: &'a Context,
    transforms: TransformStack,
}

impl<'a> CairoSurface<'a> {
    pub fn new(cr: &'a Context) -> Self {
        Self {
            cr,
            transforms: TransformStack::default(),
        }
    }

    fn trace(&self, path: &Path) {
        let m = self.transforms.current();
        self.cr.new_path();
        for (i, p) in path.points().iter().enumerate() {
            let p = m.transform_point2(*p);
            if i == 0 {
                self.cr.move_to(p.x, p.y);
            } else {
                self.cr.line_to(p.x, p.y);
            }
        }
        if path.is_closed() {
            self.cr.close_path();
        }
    }

    fn set_source(&self, color: Color) {
        let (r, g, b, a) = color.into_components();
        self.cr.set_source_rgba(r, g, b, a);
    }
}

impl Surface for CairoSurface<'_> {
    type Error = cairo::Error;

    fn save(&mut self) -> Result<(), cairo::Error> {
        self.transforms.save();
        Ok(())
    }

    fn restore(&mut self) -> Result<(), cairo::Error> {
        if self.transforms.restore() {
            Ok(())
        } else {
            Err(cairo::Error::InvalidRestore)
        }
    }

    fn matrix(&self) -> DAffine2 {
        self.transforms.current()
    }

    fn concat(&mut self, matrix: DAffine2) {
        self.transforms.concat(matrix);
    }

    fn set_matrix(&mut self, matrix: DAffine2) {
        self.transforms.set(matrix);
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) -> Result<(), cairo::Error> {
        let width = stroke.width * linear_scale(&self.transforms.current());
        if width <= 0.0 {
            return Ok(());
        }
        self.trace(path);
        self.set_source(stroke.color);
        self.cr.set_line_width(width);
        self.cr.stroke()
    }

    fn fill_path(&mut self, path: &Path, color: Color) -> Result<(), cairo::Error> {
        self.trace(path);
        self.set_source(color);
        self.cr.fill()
    }

    fn fill_text(
        &mut self,
        text: &str,
        anchor: DVec2,
        style: &TextStyle,
    ) -> Result<(), cairo::Error> {
        let m = self.transforms.current();
        let size = style.size * linear_scale(&m);
        if size <= 0.0 {
            return Ok(());
        }
        let anchor = m.transform_point2(anchor);

        self.set_source(style.color);
        self.cr
            .select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        self.cr.set_font_size(size);
        let ext = self.cr.text_extents(text)?;
        self.cr.move_to(
            anchor.x - ext.width() / 2.0 - ext.x_bearing(),
            anchor.y - ext.height() / 2.0 - ext.y_bearing(),
        );
        self.cr.show_text(text)
    }
}
