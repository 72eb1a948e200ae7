use crate::consts::*;
use crate::errors::*;
use crate::util::*;

use std::path::PathBuf;

use serde::Deserialize;
use serde::Deserializer;
use smart_default::SmartDefault;

make_log_macro!(debug, "config");

#[derive(Deserialize, Clone, Debug, SmartDefault)]
#[serde(default)]
#[serde(deny_unknown_fields)]
pub struct BacklightConfig {
    /// Directory holding the device's `brightness` and `max_brightness`
    /// control files.
    #[default(PathBuf::from(SYSFS_DIR))]
    #[serde(deserialize_with = "deserialize_directory")]
    pub directory: PathBuf,
}

fn deserialize_directory<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
where
    D: Deserializer<'de>,
{
    let directory: PathBuf = Deserialize::deserialize(deserializer)?;
    debug!("{:?}", directory);

    if !directory.is_absolute() {
        return Err(serde::de::Error::invalid_value(
            serde::de::Unexpected::Other(format!("{directory:?}").as_str()),
            &"an absolute path",
        ));
    }

    Ok(directory)
}

impl BacklightConfig {
    pub fn new() -> Result<Self> {
        if let Some(config_path) = find_file("config", Some("blctl"), Some("toml")) {
            deserialize_toml_file(config_path)
        } else {
            Ok(BacklightConfig::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_the_builtin_directory() {
        assert_eq!(
            BacklightConfig::default().directory,
            PathBuf::from(SYSFS_DIR)
        );
    }

    #[test]
    fn directory_can_be_overridden() {
        let config: BacklightConfig =
            toml::from_str("directory = \"/sys/class/backlight/amdgpu_bl0\"").unwrap();
        assert_eq!(
            config.directory,
            PathBuf::from("/sys/class/backlight/amdgpu_bl0")
        );
    }

    #[test]
    fn relative_directories_are_rejected() {
        assert!(toml::from_str::<BacklightConfig>("directory = \"backlight\"").is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(toml::from_str::<BacklightConfig>("device = \"intel\"").is_err());
    }
}
