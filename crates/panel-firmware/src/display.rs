//! ILI9342C display and touch controller bring-up

use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use esp_hal::Blocking;
use esp_hal::gpio::Output;
use esp_hal::spi::master::Spi;
use log::info;
use mipidsi::interface::SpiInterface;
use mipidsi::{Builder as MipidsiBuilder, NoResetPin, models::ILI9342CRgb565};
use panel_core::config::DisplayConfig;
use panel_core::{DisplayPanel, PanelError};
use static_cell::StaticCell;

use crate::hardware::SharedI2c;
use crate::touch::Ft6336u;

/// SPI batching buffer size (larger = faster, uses more RAM)
const SPI_BUFFER_LEN: usize = 512;

pub type LcdSpi = ExclusiveDevice<Spi<'static, Blocking>, Output<'static>, NoDelay>;
pub type LcdInterface = SpiInterface<'static, LcdSpi, Output<'static>>;
pub type Lcd = mipidsi::Display<LcdInterface, ILI9342CRgb565, NoResetPin>;
pub type Touch = Ft6336u<SharedI2c>;

/// The CoreS3 LCD plus its touch controller.
///
/// Nothing talks to either chip until [`DisplayPanel::init`] runs; after
/// that, [`CoreS3Panel::into_parts`] hands them to the tasks.
pub struct CoreS3Panel {
    bus: Option<(LcdSpi, Output<'static>)>,
    display: Option<Lcd>,
    touch: Touch,
    config: DisplayConfig,
}

impl CoreS3Panel {
    /// `dc` is the LCD data/command pin.
    pub fn new(spi: LcdSpi, dc: Output<'static>, touch: Touch, config: DisplayConfig) -> Self {
        Self {
            bus: Some((spi, dc)),
            display: None,
            touch,
            config,
        }
    }

    /// Split into the display (if it came up) and the touch controller.
    pub fn into_parts(self) -> (Option<Lcd>, Touch) {
        (self.display, self.touch)
    }

    fn init_display(&mut self) -> Result<(), PanelError> {
        static SPI_BUFFER: StaticCell<[u8; SPI_BUFFER_LEN]> = StaticCell::new();

        let (spi, dc) = self.bus.take().ok_or_else(already_initialized)?;
        let buffer = SPI_BUFFER
            .try_init([0; SPI_BUFFER_LEN])
            .ok_or_else(already_initialized)?;

        let di = SpiInterface::new(spi, dc, buffer);
        let display = MipidsiBuilder::new(ILI9342CRgb565, di)
            .display_size(self.config.width, self.config.height)
            .init(&mut embassy_time::Delay)
            .map_err(|e| PanelError::display(&e))?;

        self.display = Some(display);
        info!("Display initialized ({}x{})", self.config.width, self.config.height);
        Ok(())
    }
}

fn already_initialized() -> PanelError {
    PanelError::display_reason("display already initialized")
}

impl DisplayPanel for CoreS3Panel {
    type Error = PanelError;

    async fn init(&mut self) -> Result<(), Self::Error> {
        // Touch is brought up even when the LCD fails, and vice versa
        let display = self.init_display();
        let touch = self
            .touch
            .init()
            .await
            .map(|_| ())
            .map_err(|e| PanelError::touch(&e));
        display.and(touch)
    }
}
