#![warn(clippy::match_same_arms)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::unnecessary_wraps)]

#[macro_use]
mod util;
mod config;
mod consts;
mod device;
mod errors;

pub use crate::config::BacklightConfig;
use crate::consts::*;
use crate::device::Device;
pub use crate::errors::BacklightError;
use crate::errors::*;
use crate::util::*;

make_log_macro!(debug, "blctl");

/// Parse a percentage from user-supplied text. The result is not
/// checked against any range here; an absolute set rejects out-of-range
/// values while a relative adjustment accepts them.
pub fn parse_percentage(input: &str) -> Result<f64> {
    input
        .trim()
        .parse()
        .map_err(|_| BacklightError::ParseFailed(input.to_string()))
}

/// Used to construct [`Backlight`]
#[derive(Default)]
pub struct BacklightBuilder {
    config: Option<BacklightConfig>,
}

impl BacklightBuilder {
    /// Create a new [`BacklightBuilder`].
    pub fn new() -> Self {
        BacklightBuilder::default()
    }

    /// Defaults to [`BacklightConfig::new()`].
    pub fn with_config(mut self, config: BacklightConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Returns the constructed [`Backlight`] instance.
    pub fn build(self) -> Result<Backlight> {
        let config = match self.config {
            Some(config) => config,
            None => BacklightConfig::new()?,
        };

        Ok(Backlight::new(&config))
    }
}

/// A single backlight device whose brightness is read and written as a
/// percentage of its maximum. Every operation re-reads the device from
/// scratch; nothing is cached between calls.
pub struct Backlight {
    device: Device,
}

impl Backlight {
    pub(crate) fn new(config: &BacklightConfig) -> Self {
        Backlight {
            device: Device::new(config),
        }
    }

    /// Raw value of the current brightness. A negative reading is not
    /// physical and is rejected.
    pub fn get_current_raw(&self) -> Result<i64> {
        let value = self.device.read_value(FILE_BRIGHTNESS)?;
        if value < 0 {
            return Err(BacklightError::OutOfRange(value));
        }
        Ok(value)
    }

    /// Raw value of the maximum brightness. A maximum that is not
    /// strictly positive leaves the percentage undefined and is
    /// rejected.
    pub fn get_maximum_raw(&self) -> Result<i64> {
        let value = self.device.read_value(FILE_MAX_BRIGHTNESS)?;
        if value <= 0 {
            return Err(BacklightError::OutOfRange(value));
        }
        Ok(value)
    }

    /// Query the current brightness as a percentage of the maximum.
    /// The read path never clamps; the reported value may differ
    /// slightly from a previously set percentage because the device
    /// only stores whole raw units.
    pub fn get_percentage(&self) -> Result<f64> {
        let current = self.get_current_raw()?;
        let maximum = self.get_maximum_raw()?;

        Ok(100.0 * current as f64 / maximum as f64)
    }

    /// Set the brightness to an absolute percentage of the maximum.
    /// Values outside 0 to 100 ask for something the device cannot do
    /// and are rejected, not clamped.
    pub fn set_percentage(&self, percentage: f64) -> Result<()> {
        if !PERCENTAGE_RANGE.contains(&percentage) {
            return Err(BacklightError::InvalidInput(percentage));
        }

        let maximum = self.get_maximum_raw()?;
        let raw = round_half_up(percentage * maximum as f64 / 100.0);
        debug!("set {}% -> raw {}", percentage, raw);
        self.device.write_value(FILE_BRIGHTNESS, raw)
    }

    /// Shift the brightness by a percentage, which may be negative.
    /// A sum that runs past either end of the scale is clamped; pushing
    /// past a boundary is a normal request for a relative adjustment.
    pub fn adjust_percentage(&self, delta: f64) -> Result<()> {
        let target = (self.get_percentage()? + delta).clamp(0.0, 100.0);
        self.set_percentage(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn fake_device(current: &str, maximum: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(FILE_BRIGHTNESS), current).unwrap();
        fs::write(dir.path().join(FILE_MAX_BRIGHTNESS), maximum).unwrap();
        dir
    }

    fn backlight_at(path: &Path) -> Backlight {
        BacklightBuilder::new()
            .with_config(BacklightConfig {
                directory: path.to_path_buf(),
            })
            .build()
            .unwrap()
    }

    fn raw_brightness(dir: &TempDir) -> String {
        fs::read_to_string(dir.path().join(FILE_BRIGHTNESS)).unwrap()
    }

    #[test]
    fn percentage_is_current_over_maximum() {
        let dir = fake_device("50", "200");
        let percentage = backlight_at(dir.path()).get_percentage().unwrap();
        assert_eq!(percentage, 25.0);
        assert_eq!(format!("{percentage:.1}"), "25.0");
    }

    #[test]
    fn percentage_read_path_never_clamps() {
        // Some drivers briefly report more than the maximum.
        let dir = fake_device("250", "200");
        assert_eq!(backlight_at(dir.path()).get_percentage().unwrap(), 125.0);
    }

    #[test]
    fn set_scales_against_the_maximum() {
        let dir = fake_device("199", "200");
        backlight_at(dir.path()).set_percentage(10.0).unwrap();
        assert_eq!(raw_brightness(&dir), "20");
    }

    #[test]
    fn set_rounds_halves_up() {
        let dir = fake_device("0", "3");
        // 50% of 3 is 1.5 raw units.
        backlight_at(dir.path()).set_percentage(50.0).unwrap();
        assert_eq!(raw_brightness(&dir), "2");
    }

    #[test]
    fn set_written_value_reads_back_within_one_raw_unit() {
        let dir = fake_device("0", "200");
        let backlight = backlight_at(dir.path());
        backlight.set_percentage(33.3).unwrap();
        let reread = backlight.get_percentage().unwrap();
        assert!((reread - 33.3).abs() <= 100.0 / 200.0);
    }

    #[test]
    fn set_rejects_out_of_range_requests_without_writing() {
        let dir = fake_device("50", "200");
        let backlight = backlight_at(dir.path());
        assert!(matches!(
            backlight.set_percentage(-0.5),
            Err(BacklightError::InvalidInput(_))
        ));
        assert!(matches!(
            backlight.set_percentage(100.5),
            Err(BacklightError::InvalidInput(_))
        ));
        assert_eq!(raw_brightness(&dir), "50");
    }

    #[test]
    fn adjust_clamps_at_the_top() {
        let dir = fake_device("95", "100");
        backlight_at(dir.path()).adjust_percentage(20.0).unwrap();
        assert_eq!(raw_brightness(&dir), "100");
    }

    #[test]
    fn adjust_clamps_at_the_bottom() {
        let dir = fake_device("10", "100");
        backlight_at(dir.path()).adjust_percentage(-200.0).unwrap();
        assert_eq!(raw_brightness(&dir), "0");
    }

    #[test]
    fn adjust_applies_plain_deltas_unclamped() {
        let dir = fake_device("50", "200");
        backlight_at(dir.path()).adjust_percentage(-5.0).unwrap();
        assert_eq!(raw_brightness(&dir), "40");
    }

    #[test]
    fn malformed_current_value_fails_before_any_write() {
        let dir = fake_device("not-a-number", "200");
        let backlight = backlight_at(dir.path());
        assert!(matches!(
            backlight.get_percentage(),
            Err(BacklightError::ParseFailed(_))
        ));
        assert!(matches!(
            backlight.adjust_percentage(10.0),
            Err(BacklightError::ParseFailed(_))
        ));
        assert_eq!(raw_brightness(&dir), "not-a-number");
    }

    #[test]
    fn negative_current_value_is_out_of_range() {
        let dir = fake_device("-3", "200");
        assert!(matches!(
            backlight_at(dir.path()).get_percentage(),
            Err(BacklightError::OutOfRange(-3))
        ));
    }

    #[test]
    fn non_positive_maximum_is_out_of_range() {
        let dir = fake_device("50", "0");
        assert!(matches!(
            backlight_at(dir.path()).get_percentage(),
            Err(BacklightError::OutOfRange(0))
        ));
    }

    #[test]
    fn parses_percentages_from_text() {
        assert_eq!(parse_percentage("12.5").unwrap(), 12.5);
        assert_eq!(parse_percentage(" 80 ").unwrap(), 80.0);
        assert_eq!(parse_percentage("-3").unwrap(), -3.0);
    }

    #[test]
    fn rejects_non_numeric_percentages() {
        assert!(matches!(
            parse_percentage("bright"),
            Err(BacklightError::ParseFailed(_))
        ));
        assert!(matches!(
            parse_percentage(""),
            Err(BacklightError::ParseFailed(_))
        ));
    }
}
