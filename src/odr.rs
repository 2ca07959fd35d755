//! Output data rate selection
//!
//! The host asks for a sample interval in milliseconds; the driver picks the
//! fastest output data rate whose latency cutoff still covers that interval.

/// Output data rate codes for `DATA_CTRL_REG`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum OutputDataRate {
    /// 12.5 Hz
    Hz12_5 = 0x00,
    /// 25 Hz
    Hz25 = 0x01,
    /// 50 Hz
    Hz50 = 0x02,
    /// 100 Hz
    Hz100 = 0x03,
    /// 200 Hz
    Hz200 = 0x04,
    /// 400 Hz
    Hz400 = 0x05,
    /// 800 Hz
    Hz800 = 0x06,
    /// 1600 Hz
    Hz1600 = 0x07,
    /// 3.125 Hz
    Hz3_125 = 0x0A,
    /// 6.25 Hz
    Hz6_25 = 0x0B,
}

impl OutputDataRate {
    /// Register value
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode a register value
    #[must_use]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0x00 => Some(Self::Hz12_5),
            0x01 => Some(Self::Hz25),
            0x02 => Some(Self::Hz50),
            0x03 => Some(Self::Hz100),
            0x04 => Some(Self::Hz200),
            0x05 => Some(Self::Hz400),
            0x06 => Some(Self::Hz800),
            0x07 => Some(Self::Hz1600),
            0x0A => Some(Self::Hz3_125),
            0x0B => Some(Self::Hz6_25),
            _ => None,
        }
    }

    /// Rate in millihertz
    #[must_use]
    pub const fn millihertz(self) -> u32 {
        match self {
            Self::Hz3_125 => 3_125,
            Self::Hz6_25 => 6_250,
            Self::Hz12_5 => 12_500,
            Self::Hz25 => 25_000,
            Self::Hz50 => 50_000,
            Self::Hz100 => 100_000,
            Self::Hz200 => 200_000,
            Self::Hz400 => 400_000,
            Self::Hz800 => 800_000,
            Self::Hz1600 => 1_600_000,
        }
    }
}

/// Output resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    /// 8-bit, low current
    Bits8,
    /// 12-bit, high resolution
    Bits12,
}

impl Resolution {
    /// Decode the `resolution` attribute value (0 = 8-bit, 1 = 12-bit)
    #[must_use]
    pub const fn from_value(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Bits8),
            1 => Some(Self::Bits12),
            _ => None,
        }
    }
}

/// One row of the rate table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OdrEntry {
    /// Largest poll interval (ms) this entry is selected for
    pub cutoff_ms: u32,
    /// Rate programmed into `DATA_CTRL_REG`
    pub rate: OutputDataRate,
    /// Resolution tier for this rate
    pub resolution: Resolution,
}

/// Rate table, ascending by cutoff
///
/// | interval   | rate     | use            |
/// |------------|----------|----------------|
/// | ..=15 ms   | 200 Hz   | fastest        |
/// | ..=35 ms   | 50 Hz    | game           |
/// | ..=70 ms   | 25 Hz    | UI             |
/// | ..=250 ms  | 12.5 Hz  | normal         |
/// | longer     | 12.5 Hz  | no polling     |
pub static ODR_TABLE: [OdrEntry; 5] = [
    OdrEntry {
        cutoff_ms: 15,
        rate: OutputDataRate::Hz200,
        resolution: Resolution::Bits12,
    },
    OdrEntry {
        cutoff_ms: 35,
        rate: OutputDataRate::Hz50,
        resolution: Resolution::Bits12,
    },
    OdrEntry {
        cutoff_ms: 70,
        rate: OutputDataRate::Hz25,
        resolution: Resolution::Bits12,
    },
    OdrEntry {
        cutoff_ms: 250,
        rate: OutputDataRate::Hz12_5,
        resolution: Resolution::Bits12,
    },
    OdrEntry {
        cutoff_ms: u32::MAX,
        rate: OutputDataRate::Hz12_5,
        resolution: Resolution::Bits12,
    },
];

/// Pick the table entry for a requested poll interval
///
/// Returns the first entry whose cutoff is at least `interval_ms`, or the
/// last entry when the interval exceeds every cutoff.
#[must_use]
pub fn select(interval_ms: u32) -> &'static OdrEntry {
    ODR_TABLE
        .iter()
        .find(|entry| interval_ms <= entry.cutoff_ms)
        .unwrap_or(&ODR_TABLE[ODR_TABLE.len() - 1])
}
