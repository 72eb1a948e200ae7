use std::fs::{File, OpenOptions};
use std::io::{Read as _, Write as _};
use std::os::fd::IntoRawFd;
use std::path::PathBuf;

use crate::config::BacklightConfig;
use crate::errors::*;

make_log_macro!(debug, "device");
make_log_macro!(error, "device");

/// Scoped handle to a single control file. Lives for exactly one read
/// or one write and must be released through [`ControlFile::close`],
/// which reports close failures instead of discarding them the way an
/// implicit drop would.
struct ControlFile {
    path: PathBuf,
    file: File,
}

impl ControlFile {
    fn open_read(path: PathBuf) -> Result<Self> {
        match File::open(&path) {
            Ok(file) => Ok(ControlFile { path, file }),
            Err(source) => Err(BacklightError::OpenFailed { path, source }),
        }
    }

    fn open_write(path: PathBuf) -> Result<Self> {
        match OpenOptions::new().write(true).truncate(true).open(&path) {
            Ok(file) => Ok(ControlFile { path, file }),
            Err(source) => Err(BacklightError::OpenFailed { path, source }),
        }
    }

    /// Scan a single integer token from the file. Leading whitespace is
    /// tolerated, a trailing newline is not required.
    fn read_integer(&mut self) -> Result<i64> {
        let mut content = String::new();
        if self.file.read_to_string(&mut content).is_err() {
            return Err(BacklightError::ParseFailed(self.path.display().to_string()));
        }

        content
            .split_whitespace()
            .next()
            .and_then(|token| token.parse().ok())
            .ok_or_else(|| BacklightError::ParseFailed(self.path.display().to_string()))
    }

    /// Write the value in decimal with no surrounding whitespace.
    fn write_integer(&mut self, value: i64) -> Result<()> {
        self.file
            .write_all(value.to_string().as_bytes())
            .map_err(|source| BacklightError::WriteFailed {
                path: self.path.clone(),
                source,
            })
    }

    fn close(self) -> Result<()> {
        let ControlFile { path, file } = self;
        let fd = file.into_raw_fd();
        // SAFETY: `into_raw_fd` transfers ownership of the descriptor,
        // so it is closed exactly once, here.
        if unsafe { libc::close(fd) } == 0 {
            Ok(())
        } else {
            Err(BacklightError::CloseFailed {
                path,
                source: std::io::Error::last_os_error(),
            })
        }
    }
}

/// Merge the outcome of an operation with the outcome of closing the
/// handle it ran on. A close failure marks an otherwise successful
/// operation as failed; when both fail, the operation's own error wins
/// and the close failure goes to the log.
fn seal<T>(outcome: Result<T>, closed: Result<()>) -> Result<T> {
    match (outcome, closed) {
        (outcome, Ok(())) => outcome,
        (Ok(_), Err(close_err)) => Err(close_err),
        (Err(err), Err(close_err)) => {
            error!("{close_err}");
            Err(err)
        }
    }
}

/// Raw integer access to the control files of a single backlight device.
pub struct Device {
    sysfs_dir: PathBuf,
}

impl Device {
    pub(crate) fn new(config: &BacklightConfig) -> Self {
        Device {
            sysfs_dir: config.directory.clone(),
        }
    }

    fn control_path(&self, name: &str) -> Result<PathBuf> {
        let path = self.sysfs_dir.join(name);
        if path.as_os_str().len() >= libc::PATH_MAX as usize {
            return Err(BacklightError::PathTooLong(path));
        }
        Ok(path)
    }

    /// Read one integer from the named control file.
    pub(crate) fn read_value(&self, name: &str) -> Result<i64> {
        let mut handle = ControlFile::open_read(self.control_path(name)?)?;
        let scanned = handle.read_integer();
        let value = seal(scanned, handle.close())?;
        debug!("read {} from {}/{}", value, self.sysfs_dir.display(), name);
        Ok(value)
    }

    /// Write one integer to the named control file, truncating its
    /// previous content.
    pub(crate) fn write_value(&self, name: &str, value: i64) -> Result<()> {
        let mut handle = ControlFile::open_write(self.control_path(name)?)?;
        let written = handle.write_integer(value);
        seal(written, handle.close())?;
        debug!("wrote {} to {}/{}", value, self.sysfs_dir.display(), name);
        Ok(())
    }
}
