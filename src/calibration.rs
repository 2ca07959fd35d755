//! Factory calibration
//!
//! Calibration is produced by a factory tool that lays the device on up to six
//! faces and stores the readings as text in
//! `/data/sensors/accel_cal_data.ini`. Despite the extension the file is not
//! INI: every reading is a token
//!
//! ```text
//! <plane><digits>&[-]<value>
//! ```
//!
//! where `plane` is the 1-based reading slot (1-6), `digits` the number of
//! decimal digits in `value` (1-4), and `value` the reading itself, e.g.
//! `14&1032 24&-1016`. Anything between tokens is ignored.
//!
//! Slot layout: 0/1 = +Z/-Z, 2/3 = +X/-X, 4/5 = +Y/-Y. When the three "+"
//! slots are all zero the file only carries a single resting-plane reading
//! (one-plane mode).

use crate::sample::{AxisLayout, ONE_G};

/// Default location of the calibration file
pub const CALIBRATION_FILE_PATH: &str = "/data/sensors/accel_cal_data.ini";

/// Largest calibration file the driver reads
pub const MAX_FILE_LEN: usize = 128;

/// Number of stored readings
pub const READINGS: usize = 6;

/// Smallest accepted sensitivity (65 % of 1 g)
pub const SENSITIVITY_MIN: i32 = 665;

/// Largest accepted six-plane sensitivity (130 % of 1 g)
///
/// Tighter than the 135 % window the factory tool was written against; the
/// one-plane path uses [`ONE_PLANE_MAX`] instead.
pub const SENSITIVITY_MAX: i32 = 1331;

/// Largest plausible one-plane resting reading (135 % of 1 g)
pub const ONE_PLANE_MAX: i32 = 1382;

/// Calibration file grammar error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Plane marker outside 1-6 (carries the offending byte)
    InvalidPlane(u8),
    /// Digit count outside 1-4 (carries the offending byte)
    InvalidDigitCount(u8),
    /// Non-digit inside a value (carries the offending byte)
    InvalidDigit(u8),
    /// Token cut off by the end of the file
    Truncated,
}

/// Calibration load error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationError {
    /// Calibration storage missing or unreadable
    Unavailable,
    /// Calibration file does not follow the token grammar
    Parse(ParseError),
}

impl From<ParseError> for CalibrationError {
    fn from(error: ParseError) -> Self {
        Self::Parse(error)
    }
}

/// Result of a successful calibration reload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationStatus {
    /// File contained data and was applied
    Loaded,
    /// File was empty; defaults were applied
    Empty,
}

/// Where calibration text comes from
pub trait CalibrationSource {
    /// Fill `buf` from the start of the calibration data, returning the byte count
    ///
    /// # Errors
    ///
    /// Returns [`CalibrationError::Unavailable`] if the storage cannot be read.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, CalibrationError>;
}

impl CalibrationSource for &[u8] {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, CalibrationError> {
        let len = self.len().min(buf.len());
        buf[..len].copy_from_slice(&self[..len]);
        Ok(len)
    }
}

/// Source for boards without calibration storage
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoCalibration;

impl CalibrationSource for NoCalibration {
    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, CalibrationError> {
        Err(CalibrationError::Unavailable)
    }
}

/// Calibration file on the host filesystem
#[cfg(feature = "std")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCalibrationSource {
    path: std::path::PathBuf,
}

#[cfg(feature = "std")]
impl FileCalibrationSource {
    /// Read calibration from `path`
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(feature = "std")]
impl Default for FileCalibrationSource {
    fn default() -> Self {
        Self::new(CALIBRATION_FILE_PATH)
    }
}

#[cfg(feature = "std")]
impl CalibrationSource for FileCalibrationSource {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, CalibrationError> {
        use std::io::Read;

        let mut file =
            std::fs::File::open(&self.path).map_err(|_| CalibrationError::Unavailable)?;
        file.read(buf).map_err(|_| CalibrationError::Unavailable)
    }
}

/// Parse calibration text into the six reading slots
///
/// Slots without a token stay zero. Only the first [`MAX_FILE_LEN`] bytes are
/// considered.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first malformed token.
pub fn parse(text: &[u8]) -> Result<[i32; READINGS], ParseError> {
    let text = &text[..text.len().min(MAX_FILE_LEN)];
    let mut readings = [0i32; READINGS];

    for (pos, _) in text.iter().enumerate().filter(|&(_, &b)| b == b'&') {
        if pos < 2 {
            return Err(ParseError::Truncated);
        }

        let plane_byte = text[pos - 2];
        let plane = match plane_byte {
            b'1'..=b'6' => usize::from(plane_byte - b'1'),
            _ => return Err(ParseError::InvalidPlane(plane_byte)),
        };

        let count_byte = text[pos - 1];
        let digits = match count_byte {
            b'1'..=b'4' => usize::from(count_byte - b'0'),
            _ => return Err(ParseError::InvalidDigitCount(count_byte)),
        };

        let mut start = pos + 1;
        let negative = text.get(start) == Some(&b'-');
        if negative {
            start += 1;
        }

        let field = text
            .get(start..start + digits)
            .ok_or(ParseError::Truncated)?;
        let mut value = 0i32;
        for &b in field {
            if !b.is_ascii_digit() {
                return Err(ParseError::InvalidDigit(b));
            }
            value = value * 10 + i32::from(b - b'0');
        }

        readings[plane] = if negative { -value } else { value };
    }

    Ok(readings)
}

/// Per-axis calibration state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    /// Readings from the calibration file
    pub data: [i32; READINGS],
    /// Zero-g offset per sensor axis (x, y, z)
    pub offset: [i32; 3],
    /// Counts per g per sensor axis (x, y, z)
    pub sensitivity: [i32; 3],
    /// Six-plane data present
    pub six_plane: bool,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            data: [0; READINGS],
            offset: [0; 3],
            sensitivity: [ONE_G; 3],
            six_plane: false,
        }
    }
}

impl Calibration {
    /// Recompute offsets and sensitivities from new readings
    ///
    /// Six-plane data yields `sensitivity = (high - low) / 2` and
    /// `offset = low + sensitivity` per axis, with sensitivities outside
    /// [`SENSITIVITY_MIN`]..=[`SENSITIVITY_MAX`] replaced by 1024.
    ///
    /// One-plane data only corrects offsets, and only on the PF400CG / A400CG
    /// layouts; every other layout keeps its current values.
    pub fn update(&mut self, data: [i32; READINGS], layout: AxisLayout) {
        self.data = data;
        self.six_plane = !(data[0] == 0 && data[2] == 0 && data[4] == 0);

        if self.six_plane {
            // sensor axis x <- slots 2/3, y <- 4/5, z <- 0/1
            for (axis, (high, low)) in [(2, 3), (4, 5), (0, 1)].into_iter().enumerate() {
                let sensitivity = (data[high] - data[low]) / 2;
                self.offset[axis] = data[low] + sensitivity;
                self.sensitivity[axis] = checked_sensitivity(sensitivity);
            }
        } else if layout.has_one_plane_correction() {
            self.offset[0] = resting_offset(data[1]);
            self.offset[1] = resting_offset(data[3]);
            self.offset[2] = vertical_offset(data[5]);
        }
    }
}

fn checked_sensitivity(value: i32) -> i32 {
    if (SENSITIVITY_MIN..=SENSITIVITY_MAX).contains(&value) {
        value
    } else {
        ONE_G
    }
}

/// Offset of a +1 g resting reading, zero if the reading is implausible
fn resting_offset(reading: i32) -> i32 {
    if reading > SENSITIVITY_MIN && reading < ONE_PLANE_MAX {
        reading - ONE_G
    } else {
        0
    }
}

/// Offset of the Z reading, which may rest at +1 g or -1 g
///
/// Both windows include their limits.
fn vertical_offset(reading: i32) -> i32 {
    let window = SENSITIVITY_MIN..=ONE_PLANE_MAX;
    if reading > 0 && window.contains(&reading) {
        reading - ONE_G
    } else if reading <= 0 && window.contains(&-reading) {
        reading + ONE_G
    } else {
        0
    }
}
