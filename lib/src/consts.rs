use std::ops::RangeInclusive;

/// Default location of the controlled backlight device
pub const SYSFS_DIR: &str = "/sys/class/backlight/intel_backlight";

/// Filename for current brightness.
pub const FILE_BRIGHTNESS: &str = "brightness";

/// Filename for device's max brightness
pub const FILE_MAX_BRIGHTNESS: &str = "max_brightness";

/// Range of percentages that can be requested with an absolute set
pub const PERCENTAGE_RANGE: RangeInclusive<f64> = 0.0..=100.;
