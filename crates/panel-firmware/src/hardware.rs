//! I2C peripheral bring-up for the CoreS3 board
//!
//! Brings up, in order: the shared I2C0 bus, the AXP2101 power rails the LCD
//! and touch controller need, and the AW9523 expander pin that carries the
//! touch interrupt. A failing step is logged and bring-up continues; the
//! entry sequence reports whatever ends up not working.

use core::fmt::Debug;

use aw9523_embedded::r#async::Aw9523Async;
use axp2101_embedded::AsyncAxp2101;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex as AsyncMutex;
use esp_hal::i2c::master::{Config as I2cConfig, ConfigError, I2c};
use esp_hal::time::Rate;
use log::{info, warn};
use static_cell::StaticCell;

use crate::async_i2c_bus::AsyncI2cDevice;

pub type I2cBus = I2c<'static, esp_hal::Async>;
pub type SharedI2c = AsyncI2cDevice<'static, I2cBus>;
pub type Pmic = AsyncAxp2101<SharedI2c>;
pub type IoExpander = Aw9523Async<embedded_hal::i2c::SevenBitAddress, SharedI2c>;

/// AW9523 address on the CoreS3 system bus
const AW9523_ADDR: u8 = 0x58;
/// AW9523 P1_2, wired to the FT6336U INT line
const TOUCH_INT_PIN: u8 = 10;

/// Drivers that live on the shared bus, apart from the touch controller.
pub struct I2cHardware {
    pub power_mgmt: Pmic,
    pub gpio_expander: IoExpander,
}

/// Create I2C0 at 400 kHz on the CoreS3 system bus pins.
pub fn create_i2c_bus(
    i2c0: esp_hal::peripherals::I2C0<'static>,
    sda: esp_hal::peripherals::GPIO12<'static>,
    scl: esp_hal::peripherals::GPIO11<'static>,
) -> Result<I2cBus, ConfigError> {
    Ok(I2c::new(i2c0, I2cConfig::default().with_frequency(Rate::from_khz(400)))?
        .with_sda(sda)
        .with_scl(scl)
        .into_async())
}

/// Share the bus and bring up the PMIC and IO expander.
///
/// Returns the hardware plus a bus handle for the touch controller.
pub async fn init_i2c_hardware(i2c0: I2cBus) -> (I2cHardware, SharedI2c) {
    static I2C0_BUS: StaticCell<AsyncMutex<CriticalSectionRawMutex, I2cBus>> = StaticCell::new();
    let bus = I2C0_BUS.init(AsyncMutex::new(i2c0));

    info!("Configuring power management");
    let mut power_mgmt = AsyncAxp2101::new(AsyncI2cDevice::new(bus));
    if check("PMIC init", power_mgmt.init().await) {
        info!("Power management ready");
    }

    // DLDO1 (backlight) stays off until the entry sequence switches it on
    check("ALDO1 enable", power_mgmt.enable_aldo1().await);
    check("ALDO2 enable", power_mgmt.enable_aldo2().await);
    check("ALDO3 enable", power_mgmt.enable_aldo3().await);
    check("ALDO4 enable", power_mgmt.enable_aldo4().await);
    check("BLDO1 enable", power_mgmt.enable_bldo1().await);
    check("BLDO2 enable", power_mgmt.enable_bldo2().await);
    // 3.3 V LCD logic supply
    check("ALDO4 voltage", power_mgmt.set_aldo4_voltage(3300).await);

    info!("Configuring GPIO expander");
    let mut gpio_expander = Aw9523Async::new(AsyncI2cDevice::new(bus), AW9523_ADDR);
    check("AW9523 init", gpio_expander.init().await);
    let int_ok = check(
        "Touch INT pin mode",
        gpio_expander
            .pin_mode(TOUCH_INT_PIN, aw9523_embedded::PinMode::Input)
            .await,
    ) && check(
        "Touch INT interrupt",
        gpio_expander.enable_interrupt(TOUCH_INT_PIN, true).await,
    );
    if int_ok {
        info!("GPIO expander ready (P1_2 is the touch interrupt)");
    }

    let hardware = I2cHardware {
        power_mgmt,
        gpio_expander,
    };
    (hardware, AsyncI2cDevice::new(bus))
}

fn check<T, E: Debug>(step: &str, result: Result<T, E>) -> bool {
    match result {
        Ok(_) => true,
        Err(e) => {
            warn!("{} failed: {:?}", step, e);
            false
        }
    }
}
