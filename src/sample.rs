//! Sample decoding and board axis remapping
//!
//! The sensor delivers three left-justified 12-bit two's-complement values in
//! six bytes (`XOUT_L`, `XOUT_H`, `YOUT_L`, ...). The low byte carries the four
//! least significant bits in its upper nibble.

use crate::calibration::Calibration;

/// Number of output bytes read per sample
pub const SAMPLE_BYTES: usize = 6;

/// Counts reported for 1 g after calibration
pub const ONE_G: i32 = 1024;

/// Full-scale value of the orientation hint handed to the camera
pub const ORIENTATION_SCALE: i32 = 98;

/// Decoded sensor sample in sensor axes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// X-axis, -2048..=2047
    pub x: i32,
    /// Y-axis, -2048..=2047
    pub y: i32,
    /// Z-axis, -2048..=2047
    pub z: i32,
}

impl RawSample {
    /// Decode a 6-byte output burst
    #[must_use]
    pub fn from_bytes(bytes: &[u8; SAMPLE_BYTES]) -> Self {
        Self {
            x: decode_axis(bytes[0], bytes[1]),
            y: decode_axis(bytes[2], bytes[3]),
            z: decode_axis(bytes[4], bytes[5]),
        }
    }

    /// True when all three axes read exactly zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0 && self.z == 0
    }
}

/// Sample after board remapping and calibration, in device axes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AccelSample {
    /// X-axis, 1024 counts per g when calibrated
    pub x: i32,
    /// Y-axis
    pub y: i32,
    /// Z-axis
    pub z: i32,
}

/// Combine one axis' low/high output bytes into a signed 12-bit value
#[must_use]
pub fn decode_axis(low: u8, high: u8) -> i32 {
    let value = (i32::from(low) >> 4) | (i32::from(high) << 4);
    sign_extend_12(value)
}

/// Interpret the low 12 bits of `value` as two's complement
#[must_use]
pub const fn sign_extend_12(value: i32) -> i32 {
    let value = value & 0x0FFF;
    if value >= 2048 { value - 4096 } else { value }
}

/// Scale one reported axis to the ±98 orientation range
///
/// Inputs beyond ±1 g saturate; the quotient rounds half away from zero.
#[must_use]
pub fn rescale_orientation(value: i32) -> i32 {
    let clamped = value.clamp(-ONE_G, ONE_G);
    let scaled = clamped * ORIENTATION_SCALE;
    let half = ONE_G / 2;
    let rounded = if scaled >= 0 {
        (scaled + half) / ONE_G
    } else {
        (scaled - half) / ONE_G
    };
    rounded.clamp(-ORIENTATION_SCALE, ORIENTATION_SCALE)
}

/// Sensor placement on the board
///
/// Each layout fixes which sensor axis feeds which reported axis and with
/// which sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisLayout {
    /// ME372CL EVB: X = -y, Y = -x, Z = -z
    EvbMe372cl,
    /// ME372CG SR: X = -x, Y = y, Z = -z
    SrMe372cg,
    /// ME372CL SR: X = -x, Y = y, Z = -z
    SrMe372cl,
    /// ME175CG SR: X = y, Y = x, Z = -z
    SrMe175cg,
    /// PF400CG SR: X = -x, Y = y, Z = -z, offset-only in one-plane mode
    SrPf400cg,
    /// A400CG SR: same as PF400CG
    SrA400cg,
    /// ME372CL ER: X = x, Y = -y, Z = -z
    ErMe372cl,
}

/// Source of one reported axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisMap {
    /// Sensor axis index (0 = x, 1 = y, 2 = z)
    source: usize,
    /// Sign applied to that axis
    sign: i32,
}

const fn axis(source: usize, sign: i32) -> AxisMap {
    AxisMap { source, sign }
}

impl AxisLayout {
    fn maps(self) -> [AxisMap; 3] {
        match self {
            Self::EvbMe372cl => [axis(1, -1), axis(0, -1), axis(2, -1)],
            Self::SrMe372cg | Self::SrMe372cl | Self::SrPf400cg | Self::SrA400cg => {
                [axis(0, -1), axis(1, 1), axis(2, -1)]
            }
            Self::SrMe175cg => [axis(1, 1), axis(0, 1), axis(2, -1)],
            Self::ErMe372cl => [axis(0, 1), axis(1, -1), axis(2, -1)],
        }
    }

    /// Whether one-plane calibration applies offset-only correction on this layout
    #[must_use]
    pub const fn has_one_plane_correction(self) -> bool {
        matches!(self, Self::SrPf400cg | Self::SrA400cg)
    }

    /// Map a raw sample to reported device axes
    ///
    /// With a usable calibration every axis becomes
    /// `sign * 1024 * (raw - offset) / sensitivity`. A zero sensitivity on any
    /// axis falls back to the plain sign/swap transform. The PF400CG and
    /// A400CG layouts outside six-plane mode subtract the offset only.
    #[must_use]
    pub fn apply(self, raw: &RawSample, calibration: &Calibration) -> AccelSample {
        let values = [raw.x, raw.y, raw.z];
        let maps = self.maps();
        let offset = calibration.offset;
        let sensitivity = calibration.sensitivity;

        let report = |map: AxisMap| -> i32 {
            let value = values[map.source];
            if self.has_one_plane_correction() && !calibration.six_plane {
                map.sign * (value - offset[map.source])
            } else if sensitivity.contains(&0) {
                map.sign * value
            } else {
                map.sign * ONE_G * (value - offset[map.source]) / sensitivity[map.source]
            }
        };

        AccelSample {
            x: report(maps[0]),
            y: report(maps[1]),
            z: report(maps[2]),
        }
    }
}
