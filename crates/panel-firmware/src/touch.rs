//! Minimal FT6336U capacitive touch reader
//!
//! Only what the panel needs: identify the chip, select polling mode and
//! read the first touch point. The controller sits at 0x38 on the system
//! bus; its INT line goes through the AW9523 expander, so the touch task
//! polls instead of waiting on an interrupt.

use embedded_hal_async::i2c::I2c;
use log::{info, warn};
use panel_core::ui::TouchPoint;

/// FT6336U I2C address
pub const I2C_ADDR: u8 = 0x38;

/// Expected CHIP_ID register value
pub const CHIP_ID_FT6336U: u8 = 0x64;

const ADDR_TD_STATUS: u8 = 0x02;
const ADDR_CHIP_ID: u8 = 0xA3;
const ADDR_G_MODE: u8 = 0xA4;

/// G_MODE value for polling (INT asserted while touched)
const G_MODE_POLLING: u8 = 0x00;

pub struct Ft6336u<I2C> {
    i2c: I2C,
    max_x: u16,
    max_y: u16,
}

impl<I2C: I2c> Ft6336u<I2C> {
    /// Points are clamped to `width` x `height`.
    pub fn new(i2c: I2C, width: u16, height: u16) -> Self {
        Self {
            i2c,
            max_x: width.saturating_sub(1),
            max_y: height.saturating_sub(1),
        }
    }

    /// Check the chip id and switch to polling mode. Returns the chip id.
    pub async fn init(&mut self) -> Result<u8, I2C::Error> {
        let chip_id = self.read_byte(ADDR_CHIP_ID).await?;
        if chip_id == CHIP_ID_FT6336U {
            info!("FT6336U detected");
        } else {
            warn!("Unexpected touch chip id 0x{:02X}", chip_id);
        }
        self.i2c
            .write(I2C_ADDR, &[ADDR_G_MODE, G_MODE_POLLING])
            .await?;
        Ok(chip_id)
    }

    /// Read the first touch point, or `None` when nothing touches the panel.
    pub async fn read_point(&mut self) -> Result<Option<TouchPoint>, I2C::Error> {
        // TD_STATUS followed by P1_XH, P1_XL, P1_YH, P1_YL
        let mut buf = [0u8; 5];
        self.i2c
            .write_read(I2C_ADDR, &[ADDR_TD_STATUS], &mut buf)
            .await?;
        Ok(decode_point(&buf).map(|p| {
            TouchPoint::new(p.x.min(self.max_x), p.y.min(self.max_y))
        }))
    }

    async fn read_byte(&mut self, addr: u8) -> Result<u8, I2C::Error> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(I2C_ADDR, &[addr], &mut buf).await?;
        Ok(buf[0])
    }
}

/// Decode TD_STATUS and the first point's 12-bit coordinates.
fn decode_point(buf: &[u8; 5]) -> Option<TouchPoint> {
    let touches = buf[0] & 0x0F;
    // 0x0F is reported while the controller is still booting
    if touches == 0 || touches > 2 {
        return None;
    }
    let x = (((buf[1] & 0x0F) as u16) << 8) | buf[2] as u16;
    let y = (((buf[3] & 0x0F) as u16) << 8) | buf[4] as u16;
    Some(TouchPoint::new(x, y))
}
