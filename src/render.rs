use embedded_graphics::prelude::Point;

use crate::error::RenderError;
use crate::fit::FitSettings;
use crate::font::BuiltinFont;
use crate::font::FontFace;
use crate::font::FontSpec;
use crate::font::ScalableFace;
use crate::font::TextFont;
use crate::frame::Canvas;
use crate::frame::Frame;

/// Turns a time string into a centered 1-bit frame.
#[derive(Debug, Clone, Default)]
pub struct FrameRenderer {
    font: FontSpec,
    fit: FitSettings,
}

impl FrameRenderer {
    pub fn new(font: FontSpec) -> Self {
        Self {
            font,
            fit: FitSettings::default(),
        }
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    /// Renders `text` for `canvas`.
    ///
    /// A scalable font is re-read from disk on every call, so a font file that
    /// disappears or gets corrupted is reported on the next frame.
    pub fn render(&self, canvas: Canvas, text: &str) -> Result<Frame, RenderError> {
        self.render_from(canvas, text, FontFace::open)
    }

    /// Like [`FrameRenderer::render`], with `open` turning a font path into a face.
    fn render_from<F, O>(&self, canvas: Canvas, text: &str, open: O) -> Result<Frame, RenderError>
    where
        F: ScalableFace,
        O: FnOnce(&camino::Utf8Path) -> Result<F, RenderError>,
    {
        match &self.font {
            FontSpec::Builtin => Ok(render_with(canvas, text, &BuiltinFont)),
            FontSpec::Scalable(path) => {
                let face = open(path.as_path())?;
                render_scaled(canvas, text, &face, self.fit)
            }
        }
    }
}

/// Fits `text` to `canvas` with `face` and renders it at the chosen size.
pub fn render_scaled<F>(
    canvas: Canvas,
    text: &str,
    face: &F,
    settings: FitSettings,
) -> Result<Frame, RenderError>
where
    F: ScalableFace,
{
    let size = crate::fit::fit(canvas, text, face, settings)?;
    Ok(render_with(canvas, text, &face.at_size(size)))
}

/// Draws `text` centered on a blank frame.
pub fn render_with<T>(canvas: Canvas, text: &str, font: &T) -> Frame
where
    T: TextFont,
{
    let mut frame = Frame::blank(canvas);
    let measured = font.measure(text);
    let origin = centered_origin(canvas, measured.width, measured.height);

    font.draw(text, origin, &mut frame);
    frame
}

/// Top-left corner that centers a `width` x `height` box, rounding down.
///
/// A box larger than the canvas gets a negative origin and is clipped on both
/// sides, one pixel more on the left or top when the overflow is odd.
pub fn centered_origin(canvas: Canvas, width: u32, height: u32) -> Point {
    Point::new(
        (canvas.width() as i32 - width as i32).div_euclid(2),
        (canvas.height() as i32 - height as i32).div_euclid(2),
    )
}
