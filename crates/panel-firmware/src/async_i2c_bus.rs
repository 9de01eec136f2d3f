//! Shared async I2C bus
//!
//! The PMIC, the IO expander and the touch controller all sit on I2C0. Each
//! driver gets its own [`AsyncI2cDevice`] handle; a transaction holds the bus
//! mutex for its whole duration and yields to the executor while the
//! transfer is in flight.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal_async::i2c::{ErrorType, I2c, Operation};

/// Handle onto a bus shared behind an embassy [`Mutex`].
///
/// Every driver on the bus gets its own handle. The async mutex can be held
/// across await points, so a transfer in flight yields to the executor
/// instead of spinning, and no other handle can interleave with it.
///
/// ```ignore
/// static I2C_BUS: StaticCell<AsyncMutex<CriticalSectionRawMutex, I2cBus>> = StaticCell::new();
/// let bus = I2C_BUS.init(AsyncMutex::new(i2c));
///
/// let pmic = AsyncAxp2101::new(AsyncI2cDevice::new(bus));
/// let touch = Ft6336u::new(AsyncI2cDevice::new(bus), 320, 240);
/// ```
pub struct AsyncI2cDevice<'a, T> {
    bus: &'a Mutex<CriticalSectionRawMutex, T>,
}

impl<'a, T> AsyncI2cDevice<'a, T> {
    /// Wrap a reference to the shared bus.
    #[inline]
    pub const fn new(bus: &'a Mutex<CriticalSectionRawMutex, T>) -> Self {
        Self { bus }
    }
}

impl<T: ErrorType> ErrorType for AsyncI2cDevice<'_, T> {
    type Error = T::Error;
}

impl<T: I2c> I2c for AsyncI2cDevice<'_, T> {
    /// Read from `address`, holding the bus for the whole transfer.
    #[inline]
    async fn read(&mut self, address: u8, read: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.lock().await.read(address, read).await
    }

    /// Write to `address`, holding the bus for the whole transfer.
    #[inline]
    async fn write(&mut self, address: u8, write: &[u8]) -> Result<(), Self::Error> {
        self.bus.lock().await.write(address, write).await
    }

    /// Register read: write the register address, then read without
    /// releasing the bus in between.
    #[inline]
    async fn write_read(
        &mut self,
        address: u8,
        write: &[u8],
        read: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.bus.lock().await.write_read(address, write, read).await
    }

    /// Run `operations` as one transaction under a single bus lock.
    #[inline]
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.bus.lock().await.transaction(address, operations).await
    }
}
