use super::{mnemonics, registers, Nrf24Error, SplitLink};
use crate::radio::{
    prelude::{LinkFifo, LinkPower, LinkSetup},
    LINK_CHANNEL,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

impl<SPI, CE, CSN, DELAY> LinkSetup for SplitLink<SPI, CE, CSN, DELAY>
where
    SPI: SpiBus,
    CE: OutputPin,
    CSN: OutputPin<Error = CE::Error>,
    DELAY: DelayNs,
{
    type SetupErrorType = Nrf24Error<SPI::Error, CE::Error>;

    /// Configure the radio's hardware using the [`LinkConfig`](struct@crate::radio::LinkConfig)
    /// given to [`SplitLink::new()`].
    fn setup(&mut self) -> Result<(), Self::SetupErrorType> {
        let config = self._config;
        #[cfg(all(feature = "defmt", target_os = "none"))]
        defmt::debug!("setting up radio link as {}", config.role());

        // idle the chip select before the first transaction
        self._csn_pin.set_high().map_err(Nrf24Error::Gpo)?;
        self._config_reg = self._config_reg.with_is_rx(config.is_master());
        self.power_down()?;

        let mut features = 0u8;
        if config.auto_ack() {
            self.write_register(registers::SETUP_RETR, config.auto_retries().into_bits())?;
            let pipes = if config.is_master() {
                mnemonics::PIPE_0 | mnemonics::PIPE_1
            } else {
                mnemonics::PIPE_0
            };
            self.write_register(registers::EN_AA, pipes)?;
        } else {
            self.write_register(registers::EN_AA, 0)?;
            self.write_register(registers::SETUP_RETR, 0)?;
            features |= mnemonics::EN_DYN_ACK;
        }

        self.write_register(registers::RF_CH, LINK_CHANNEL)?;
        self.write_register(registers::RF_SETUP, config.rf_setup())?;
        self.write_register(registers::SETUP_AW, config.address_width().into_bits())?;
        // clear any event latched before a reset
        self.write_register(registers::STATUS, 0xFF)?;

        let width = config.address_width().byte_length();
        if config.is_master() {
            self.write_register(registers::EN_RXADDR, mnemonics::PIPE_0 | mnemonics::PIPE_1)?;
            self.write_buffer(registers::RX_ADDR_P0, config.slave_address(0))?;
            self.write_buffer(registers::RX_ADDR_P1, config.slave_address(1))?;
            self.write_register(registers::RX_PW_P0, config.payload_length())?;
            self.write_register(registers::RX_PW_P1, config.payload_length())?;
            // the master only sends ACK packets, which reuse the RX pipe's address
            self.write_buffer(registers::TX_ADDR, &[0u8; 5][..width])?;
        } else {
            let address = config.slave_address(config.device_number());
            self.write_register(registers::EN_RXADDR, mnemonics::PIPE_0)?;
            self.write_register(registers::RX_PW_P0, 0)?;
            self.write_buffer(registers::RX_ADDR_P0, address)?;
            self.write_buffer(registers::TX_ADDR, address)?;
        }

        self.write_register(registers::DYNPD, 0)?;
        self.write_register(registers::FEATURE, features)?;

        self.flush_rx()?;
        self.flush_tx()?;

        // Do not write CE high so radio will remain in standby-I mode.
        self.power_up(None)
    }
}
