//! ICM-42670 accelerometer binding.
//!
//! Wraps the IMU on a shared I2C bus and reports each axis in milli-g, the
//! unit the data log stores. A sample takes all three axes from one vector
//! read.

use core::cell::RefCell;

use embedded_hal::i2c::I2c;
use embedded_hal_bus::i2c::RefCellDevice;
use icm42670::{
    accelerometer::{Accelerometer as _, Error as AccelerometerError},
    Address as ImuAddress, Error as Icm42670Error, Icm42670,
};

use super::{Accelerometer, Axis};

/// Errors that can occur when talking to the IMU.
#[derive(Debug)]
pub enum ImuError<E: core::fmt::Debug> {
    Init(Icm42670Error<E>),
    Read(AccelerometerError<Icm42670Error<E>>),
}

/// `Accelerometer` backed by an ICM-42670.
pub struct ImuAccelerometer<'a, I2C: 'static> {
    imu: Icm42670<RefCellDevice<'a, I2C>>,
}

impl<'a, I2C, E> ImuAccelerometer<'a, I2C>
where
    I2C: I2c<Error = E> + 'static,
    E: core::fmt::Debug,
{
    /// Initialize the IMU at its primary address on the shared bus.
    pub fn new(i2c_bus: &'a RefCell<I2C>) -> Result<Self, ImuError<E>> {
        let imu = Icm42670::new(RefCellDevice::new(i2c_bus), ImuAddress::Primary)
            .map_err(ImuError::Init)?;
        tracing::info!("IMU initialized");
        Ok(Self { imu })
    }
}

impl<I2C, E> Accelerometer for ImuAccelerometer<'_, I2C>
where
    I2C: I2c<Error = E> + 'static,
    E: core::fmt::Debug,
{
    type Error = ImuError<E>;

    /// Reads the full vector and returns one axis; the sensor has no
    /// single-axis read.
    fn read_axis(
        &mut self,
        axis: Axis,
    ) -> Result<i32, Self::Error> {
        let accel = self.imu.accel_norm().map_err(ImuError::Read)?;
        let g = match axis {
            Axis::X => accel.x,
            Axis::Y => accel.y,
            Axis::Z => accel.z,
        };
        Ok(to_milli_g(g))
    }

    /// One vector read per sample.
    fn read_sample(&mut self) -> Result<[i32; 3], Self::Error> {
        let accel = self.imu.accel_norm().map_err(ImuError::Read)?;
        Ok([
            to_milli_g(accel.x),
            to_milli_g(accel.y),
            to_milli_g(accel.z),
        ])
    }
}

fn to_milli_g(g: f32) -> i32 {
    libm::roundf(g * 1000.0) as i32
}
