use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

use crate::radio::{prelude::LinkPower, Nrf24Error, SplitLink};

use super::timing;

impl<SPI, CE, CSN, DELAY> LinkPower for SplitLink<SPI, CE, CSN, DELAY>
where
    SPI: SpiBus,
    CE: OutputPin,
    CSN: OutputPin<Error = CE::Error>,
    DELAY: DelayNs,
{
    type PowerErrorType = Nrf24Error<SPI::Error, CE::Error>;

    /// Drop CE, then clear PWR_UP. The link's PRIM_RX bit is kept.
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        self.write_config(self._config_reg.with_power(false))
    }

    /// Set PWR_UP and wait for the crystal to settle.
    ///
    /// `None` waits [`timing::POWER_UP_SETTLE_US`]; `Some(0)` skips the wait.
    /// Nothing is sent if the radio is already powered.
    fn power_up(&mut self, delay: Option<u32>) -> Result<(), Self::PowerErrorType> {
        if self.is_powered() {
            return Ok(());
        }
        self.write_config(self._config_reg.with_power(true))?;
        match delay.unwrap_or(timing::POWER_UP_SETTLE_US) {
            0 => {}
            us => self._delay_impl.delay_us(us),
        }
        Ok(())
    }

    fn is_powered(&self) -> bool {
        self._config_reg.power()
    }
}
