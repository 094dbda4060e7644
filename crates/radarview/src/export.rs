use crate::gui::CairoSurface;
use crate::gui::theme::paint_background;
use cairo::{Context, Format, ImageSurface};
use radar::{RadarRenderer, RadarStyle};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid image size {0}x{1}")]
    InvalidSize(i32, i32),
    #[error("Drawing error: {0}")]
    Cairo(#[from] cairo::Error),
    #[error("PNG error: {0}")]
    Png(#[from] cairo::IoError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Renders one frame offscreen, the same way the window's draw callback does.
pub fn render_image(style: RadarStyle, width: i32, height: i32) -> Result<ImageSurface, ExportError> {
    if width <= 0 || height <= 0 {
        return Err(ExportError::InvalidSize(width, height));
    }

    let image = ImageSurface::create(Format::ARgb32, width, height)?;
    {
        let cr = Context::new(&image)?;
        let mut renderer = RadarRenderer::new(style);
        renderer.resize(width, height);

        paint_background(&cr, renderer.style().background_color)?;
        renderer.draw(&mut CairoSurface::new(&cr))?;
    }
    image.flush();
    Ok(image)
}

pub fn export_png(
    style: RadarStyle,
    width: i32,
    height: i32,
    path: &Path,
) -> Result<(), ExportError> {
    let image = render_image(style, width, height)?;
    let mut file = fs_err::File::create(path)?;
    image.write_to_png(&mut file)?;
    log::info!("Exported {}x{} chart to {}", width, height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(image: &mut ImageSurface, x: usize, y: usize) -> [u8; 4] {
        let stride = image.stride() as usize;
        let data = image.data().unwrap();
        let at = y * stride + x * 4;
        [data[at], data[at + 1], data[at + 2], data[at + 3]]
    }

    #[test]
    fn test_render_paints_background_and_grid() {
        let mut image = render_image(RadarStyle::default(), 120, 120).unwrap();

        assert_eq!(pixel(&mut image, 2, 2), [255, 255, 255, 255]);
        // the upward diagonal runs along x = 60
        let on_diagonal = pixel(&mut image, 60, 40);
        assert_ne!(on_diagonal, [255, 255, 255, 255]);
    }

    #[test]
    fn test_render_rejects_empty_size() {
        assert!(matches!(
            render_image(RadarStyle::default(), 0, 10),
            Err(ExportError::InvalidSize(0, 10))
        ));
    }

    #[test]
    fn test_export_writes_png() {
        let path = std::env::temp_dir().join(format!("radarview-export-{}.png", std::process::id()));
        export_png(RadarStyle::default(), 64, 48, &path).unwrap();

        let bytes = fs_err::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        fs_err::remove_file(&path).unwrap();
    }
}
