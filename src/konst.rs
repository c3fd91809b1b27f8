pub const INITIAL_FONT_SIZE: u32 = 10;

pub const PADDING: u32 = 2;

pub const POLL_INCREMENT: std::time::Duration = std::time::Duration::from_secs(5);

pub const FONT_ENV_VAR: &str = "FONT";

pub const DEFAULT_I2C_DEVICE: &str = "/dev/i2c-1";

pub const DEFAULT_WIDTH: u32 = 128;

pub const DEFAULT_HEIGHT: u32 = 32;
