//! LCD backlight on the AXP2101 DLDO1 rail

use log::debug;
use panel_core::{Backlight, PanelError};

use crate::hardware::Pmic;

/// Backlight switched through the PMIC.
///
/// On the CoreS3 the LCD backlight LED driver is supplied by DLDO1, so the
/// backlight is on exactly when that rail is enabled.
pub struct PmicBacklight {
    pmic: Pmic,
    lit: bool,
}

impl PmicBacklight {
    pub fn new(pmic: Pmic) -> Self {
        Self { pmic, lit: false }
    }

    pub fn is_on(&self) -> bool {
        self.lit
    }

    /// Give the PMIC back, e.g. for battery readings.
    pub fn pmic(&mut self) -> &mut Pmic {
        &mut self.pmic
    }
}

impl Backlight for PmicBacklight {
    type Error = PanelError;

    async fn on(&mut self) -> Result<(), Self::Error> {
        self.pmic
            .enable_dldo1()
            .await
            .map_err(|e| PanelError::backlight(&e))?;
        self.lit = true;
        debug!("DLDO1 enabled");
        Ok(())
    }

    async fn off(&mut self) -> Result<(), Self::Error> {
        self.pmic
            .disable_dldo1()
            .await
            .map_err(|e| PanelError::backlight(&e))?;
        self.lit = false;
        debug!("DLDO1 disabled");
        Ok(())
    }
}
