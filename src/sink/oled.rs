use embedded_graphics::prelude::DrawTarget;
use linux_embedded_hal::I2cdev;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use crate::error::SinkError;
use crate::frame::Canvas;
use crate::frame::Frame;

type Panel<S> = Ssd1306<I2CInterface<I2cdev>, S, BufferedGraphicsMode<S>>;

enum Driver {
    Size128x32(Panel<DisplaySize128x32>),
    Size128x64(Panel<DisplaySize128x64>),
}

/// SSD1306 OLED on a Linux I2C bus, mounted upside down.
pub struct Ssd1306Sink {
    canvas: Canvas,
    driver: Driver,
}

impl Ssd1306Sink {
    /// Opens the bus, initializes the controller and blanks the panel.
    pub fn open(device: &camino::Utf8Path, canvas: Canvas) -> Result<Self, SinkError> {
        let i2c = I2cdev::new(device).map_err(|error| SinkError::OpeningBus {
            path: device.to_path_buf(),
            reason: error.to_string(),
        })?;
        let interface = I2CDisplayInterface::new(i2c);

        let mut driver = match (canvas.width(), canvas.height()) {
            (128, 32) => Driver::Size128x32(
                Ssd1306::new(interface, DisplaySize128x32, DisplayRotation::Rotate0)
                    .into_buffered_graphics_mode(),
            ),
            (128, 64) => Driver::Size128x64(
                Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
                    .into_buffered_graphics_mode(),
            ),
            (width, height) => return Err(SinkError::UnsupportedSize { width, height }),
        };

        match &mut driver {
            Driver::Size128x32(panel) => {
                panel.init().map_err(SinkError::Transport)?;
                panel.clear_buffer();
                panel.flush().map_err(SinkError::Transport)?;
            }
            Driver::Size128x64(panel) => {
                panel.init().map_err(SinkError::Transport)?;
                panel.clear_buffer();
                panel.flush().map_err(SinkError::Transport)?;
            }
        }

        tracing::info!(%device, %canvas, "Initialized SSD1306 display");
        Ok(Self { canvas, driver })
    }
}

impl super::DisplaySink for Ssd1306Sink {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn orientation(&self) -> super::Orientation {
        super::Orientation::UpsideDown
    }

    fn push(&mut self, frame: &Frame) -> Result<(), SinkError> {
        super::ensure_size(frame, self.canvas)?;

        match &mut self.driver {
            Driver::Size128x32(panel) => {
                panel.draw_iter(frame.pixels()).map_err(SinkError::Transport)?;
                panel.flush().map_err(SinkError::Transport)
            }
            Driver::Size128x64(panel) => {
                panel.draw_iter(frame.pixels()).map_err(SinkError::Transport)?;
                panel.flush().map_err(SinkError::Transport)
            }
        }
    }
}
