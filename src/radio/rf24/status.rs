use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

use crate::{
    radio::{prelude::LinkStatus, Nrf24Error, SplitLink},
    types::StatusFlags,
};

use super::{commands, registers};

impl<SPI, CE, CSN, DELAY> LinkStatus for SplitLink<SPI, CE, CSN, DELAY>
where
    SPI: SpiBus,
    CE: OutputPin,
    CSN: OutputPin<Error = CE::Error>,
    DELAY: DelayNs,
{
    type StatusErrorType = Nrf24Error<SPI::Error, CE::Error>;

    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType> {
        self.write_register(registers::STATUS, flags.into_bits() & StatusFlags::IRQ_MASK)?;
        Ok(())
    }

    fn update(&mut self) -> Result<(), Self::StatusErrorType> {
        self.command(commands::NOP)?;
        Ok(())
    }

    fn get_status_flags(&self) -> StatusFlags {
        self._status
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{commands, registers, LinkStatus, StatusFlags};
    use crate::{radio::LinkConfig, spi_test_expects, test::mk_radio, test::spy::mk_spy_radio};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    pub fn what_happened() {
        let spi_expectations = spi_test_expects![
            (vec![commands::NOP], vec![0x70u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin, mut csn_pin) = (mocks.0, mocks.1, mocks.2, mocks.3);
        radio.update().unwrap();
        let flags = radio.get_status_flags();
        assert!(flags.rx_dr());
        assert!(flags.tx_ds());
        assert!(flags.tx_df());
        spi.done();
        ce_pin.done();
        csn_pin.done();
    }

    #[test]
    pub fn clear_some_flags() {
        let spi_expectations = spi_test_expects![
            // only TX_DS and MAX_RT are written; other bits are dropped
            (
                vec![registers::STATUS | commands::W_REGISTER, 0x30u8],
                vec![0x7Eu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin, mut csn_pin) = (mocks.0, mocks.1, mocks.2, mocks.3);
        let flags = StatusFlags::new().with_rx_dr(false);
        radio.clear_status_flags(flags).unwrap();
        // the cached status is the one clocked out before the write took effect
        assert_eq!(radio.get_status_flags().into_bits(), 0x7E);
        spi.done();
        ce_pin.done();
        csn_pin.done();
    }

    #[test]
    pub fn clearing_leaves_other_flags() {
        let (mut radio, chip) = mk_spy_radio(LinkConfig::default());
        chip.borrow_mut().registers[registers::STATUS as usize][0] = 0x70;
        radio
            .clear_status_flags(StatusFlags::default().with_tx_ds(true))
            .unwrap();
        radio.update().unwrap();
        let flags = radio.get_status_flags();
        assert!(flags.rx_dr());
        assert!(!flags.tx_ds());
        assert!(flags.tx_df());
    }
}
