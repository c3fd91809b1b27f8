use std::io::Write;

use crate::frame::Canvas;
use crate::frame::Frame;

/// Prints every frame as ASCII art, for running without a panel attached.
pub struct TerminalSink<W> {
    canvas: Canvas,
    out: W,
}

impl<W> TerminalSink<W>
where
    W: Write,
{
    pub fn new(canvas: Canvas, out: W) -> Self {
        Self { canvas, out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TerminalSink<std::io::Stdout> {
    pub fn stdout(canvas: Canvas) -> Self {
        Self::new(canvas, std::io::stdout())
    }
}

impl<W> super::DisplaySink for TerminalSink<W>
where
    W: Write + Send + 'static,
{
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn push(&mut self, frame: &Frame) -> Result<(), crate::error::SinkError> {
        super::ensure_size(frame, self.canvas)?;

        let border = "-".repeat(self.canvas.width() as usize);
        writeln!(self.out, "+{border}+")?;
        for row in frame.to_ascii().lines() {
            writeln!(self.out, "|{row}|")?;
        }
        writeln!(self.out, "+{border}+")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::prelude::Point;

    use super::TerminalSink;
    use crate::error::SinkError;
    use crate::frame::Canvas;
    use crate::frame::Frame;
    use crate::sink::DisplaySink;

    #[test]
    fn test_push_writes_ascii() {
        let canvas = Canvas::new(4, 2).unwrap();
        let mut frame = Frame::blank(canvas);
        frame.set_pixel(Point::new(1, 0), BinaryColor::On);
        frame.set_pixel(Point::new(3, 1), BinaryColor::On);

        let mut sink = TerminalSink::new(canvas, Vec::new());
        sink.push(&frame).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        insta::assert_snapshot!(out, @r"
        +----+
        |.#..|
        |...#|
        +----+
        ");
    }

    #[test]
    fn test_push_rejects_wrong_size() {
        let mut sink = TerminalSink::new(Canvas::new(4, 2).unwrap(), Vec::new());
        let frame = Frame::blank(Canvas::new(2, 4).unwrap());
        assert!(matches!(
            sink.push(&frame),
            Err(SinkError::SizeMismatch { .. })
        ));
        assert!(sink.into_inner().is_empty());
    }
}
