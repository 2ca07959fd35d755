//! State shared with consumers outside the driver
//!
//! The camera stack reads the most recent acceleration to decide image
//! orientation, and the I2C bus controller can be asked to reset the bus. Both
//! go through a [`SharedSensorState`] that the driver borrows for its whole
//! lifetime. The driver is the only writer; readers only ever see cached
//! values and never cause bus traffic.
//!
//! ```ignore
//! static SENSOR_STATE: SharedSensorState = SharedSensorState::new();
//!
//! // camera side
//! let (x, y, z) = SENSOR_STATE.orientation();
//! ```

use core::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use crate::sample::{rescale_orientation, AccelSample};

/// Cache of the last published sample plus the bus reset request flag
#[derive(Debug, Default)]
pub struct SharedSensorState {
    x: AtomicI32,
    y: AtomicI32,
    z: AtomicI32,
    bus_reset: AtomicBool,
}

impl SharedSensorState {
    /// Create an empty state (all axes zero, no reset requested)
    pub const fn new() -> Self {
        Self {
            x: AtomicI32::new(0),
            y: AtomicI32::new(0),
            z: AtomicI32::new(0),
            bus_reset: AtomicBool::new(false),
        }
    }

    /// Store a freshly published sample
    pub fn publish(&self, sample: AccelSample) {
        self.x.store(sample.x, Ordering::Relaxed);
        self.y.store(sample.y, Ordering::Relaxed);
        self.z.store(sample.z, Ordering::Relaxed);
    }

    /// Last published sample in reported counts
    ///
    /// Axes are stored individually, so a reader racing a publish may see a
    /// mix of two consecutive samples.
    pub fn last_sample(&self) -> AccelSample {
        AccelSample {
            x: self.x.load(Ordering::Relaxed),
            y: self.y.load(Ordering::Relaxed),
            z: self.z.load(Ordering::Relaxed),
        }
    }

    /// Last sample scaled to ±98 per axis for the camera
    pub fn orientation(&self) -> (i32, i32, i32) {
        let sample = self.last_sample();
        (
            rescale_orientation(sample.x),
            rescale_orientation(sample.y),
            rescale_orientation(sample.z),
        )
    }

    /// Ask the bus controller to reset the sensor's I2C bus
    pub fn request_bus_reset(&self) {
        self.bus_reset.store(true, Ordering::Release);
    }

    /// Consume a pending bus reset request
    pub fn take_bus_reset_request(&self) -> bool {
        self.bus_reset.swap(false, Ordering::AcqRel)
    }
}
