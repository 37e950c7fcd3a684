use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};
pub(crate) mod bit_fields;
use bit_fields::Config;
mod constants;
mod details;
mod fifo;
mod init;
mod power;
mod radio;
mod status;
pub use constants::{commands, mnemonics, registers, timing};

use super::LinkConfig;
use crate::StatusFlags;

/// An collection of error types to describe hardware malfunctions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nrf24Error<SPI, DO> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// Represents a DigitalOutput error (CE or CSN pin).
    Gpo(DO),
    /// The TX FIFO was not drained within the number of polls given to
    /// [`LinkTransfer::transmit_and_drain_bounded()`](fn@crate::radio::prelude::LinkTransfer::transmit_and_drain_bounded).
    TxTimeout,
}

#[cfg(feature = "defmt")]
impl<SPI, DO> defmt::Format for Nrf24Error<SPI, DO> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Nrf24Error::Spi(_) => defmt::write!(fmt, "SPI transaction failed"),
            Nrf24Error::Gpo(_) => defmt::write!(fmt, "digital output failed"),
            Nrf24Error::TxTimeout => defmt::write!(fmt, "TX FIFO not drained"),
        }
    }
}

/// This struct implements the [`Link*` traits](mod@crate::radio::prelude)
/// for an nRF24L01 linking the halves of a split keyboard.
///
/// The driver owns the SPI bus and both control lines;
/// every operation is a blocking call that needs exclusive (`&mut`) access.
pub struct SplitLink<SPI, CE, CSN, DELAY> {
    _spi: SPI,
    /// The CE pin for the radio.
    ///
    /// This really only exposed for advanced manipulation of active TX/RX mode.
    /// It is strongly recommended to start transmissions using
    /// [`LinkTransfer::pulse_tx()`](fn@crate::radio::prelude::LinkTransfer::pulse_tx) or
    /// [`LinkTransfer::transmit_and_drain()`](fn@crate::radio::prelude::LinkTransfer::transmit_and_drain).
    pub ce_pin: CE,
    _csn_pin: CSN,
    _delay_impl: DELAY,
    _buf: [u8; 33],
    _status: StatusFlags,
    _config: LinkConfig,
    _config_reg: Config,
}

impl<SPI, CE, CSN, DELAY> SplitLink<SPI, CE, CSN, DELAY>
where
    SPI: SpiBus,
    CE: OutputPin,
    CSN: OutputPin<Error = CE::Error>,
    DELAY: DelayNs,
{
    /// Instantiate a [`SplitLink`] object for use on the specified
    /// `spi` bus with the given `ce_pin` and `csn_pin`.
    ///
    /// Nothing is sent to the radio until
    /// [`LinkSetup::setup()`](fn@crate::radio::prelude::LinkSetup::setup) is called.
    pub fn new(
        ce_pin: CE,
        csn_pin: CSN,
        spi: SPI,
        delay_impl: DELAY,
        config: LinkConfig,
    ) -> SplitLink<SPI, CE, CSN, DELAY> {
        SplitLink {
            _spi: spi,
            ce_pin,
            _csn_pin: csn_pin,
            _delay_impl: delay_impl,
            _buf: [0u8; 33],
            _status: StatusFlags::from_bits(0),
            _config: config,
            // 16 bit CRC, enable all IRQ, and power down
            _config_reg: Config::default().with_is_rx(config.is_master()),
        }
    }

    /// The configuration given to [`SplitLink::new()`].
    pub fn config(&self) -> &LinkConfig {
        &self._config
    }

    /// Exchange the first `len` bytes of the internal buffer.
    ///
    /// CSN is released before a failed exchange is reported.
    fn spi_transfer(&mut self, len: u8) -> Result<StatusFlags, Nrf24Error<SPI::Error, CE::Error>> {
        self._csn_pin.set_low().map_err(Nrf24Error::Gpo)?;
        let result = self
            ._spi
            .transfer_in_place(&mut self._buf[..len as usize])
            .and_then(|_| self._spi.flush());
        self._csn_pin.set_high().map_err(Nrf24Error::Gpo)?;
        result.map_err(Nrf24Error::Spi)?;
        self._status = StatusFlags::from_bits(self._buf[0]);
        Ok(self._status)
    }

    /// Clock out a `command` followed by `len` NOP bytes.
    ///
    /// This is also used to write SPI commands that consist of 1 byte:
    /// ```ignore
    /// self.spi_read(0, commands::NOP)?;
    /// // STATUS register is now stored in self._status
    /// ```
    fn spi_read(
        &mut self,
        len: u8,
        command: u8,
    ) -> Result<StatusFlags, Nrf24Error<SPI::Error, CE::Error>> {
        self._buf[0] = command;
        self._buf[1..(len as usize + 1)].fill(commands::NOP);
        self.spi_transfer(len + 1)
    }

    /// Read a single byte register.
    pub fn read_register(&mut self, reg: u8) -> Result<u8, Nrf24Error<SPI::Error, CE::Error>> {
        self.spi_read(1, commands::R_REGISTER | (commands::REGISTER_MASK & reg))?;
        Ok(self._buf[1])
    }

    /// Read `buf.len()` bytes (32 at most) from a multi-byte register.
    pub fn read_buffer(
        &mut self,
        reg: u8,
        buf: &mut [u8],
    ) -> Result<(), Nrf24Error<SPI::Error, CE::Error>> {
        let len = buf.len().min(32);
        self.spi_read(
            len as u8,
            commands::R_REGISTER | (commands::REGISTER_MASK & reg),
        )?;
        buf[..len].copy_from_slice(&self._buf[1..(len + 1)]);
        Ok(())
    }

    /// Write a single byte register.
    ///
    /// Returns the STATUS register clocked out with the command byte.
    pub fn write_register(
        &mut self,
        reg: u8,
        byte: u8,
    ) -> Result<StatusFlags, Nrf24Error<SPI::Error, CE::Error>> {
        self._buf[0] = commands::W_REGISTER | (commands::REGISTER_MASK & reg);
        self._buf[1] = byte;
        self.spi_transfer(2)
    }

    /// Write up to 32 bytes to a multi-byte register.
    ///
    /// Returns the STATUS register clocked out with the command byte.
    pub fn write_buffer(
        &mut self,
        reg: u8,
        buf: &[u8],
    ) -> Result<StatusFlags, Nrf24Error<SPI::Error, CE::Error>> {
        self.write_payload(commands::W_REGISTER | (commands::REGISTER_MASK & reg), buf)
    }

    /// Send a command that has no payload (like `FLUSH_TX`).
    ///
    /// Returns the STATUS register clocked out with the command byte.
    pub fn command(&mut self, opcode: u8) -> Result<StatusFlags, Nrf24Error<SPI::Error, CE::Error>> {
        self.spi_read(0, opcode)
    }

    fn write_payload(
        &mut self,
        command: u8,
        buf: &[u8],
    ) -> Result<StatusFlags, Nrf24Error<SPI::Error, CE::Error>> {
        let buf_len = buf.len().min(32);
        self._buf[0] = command;
        self._buf[1..(buf_len + 1)].copy_from_slice(&buf[..buf_len]);
        self.spi_transfer(buf_len as u8 + 1)
    }

    /// Cache `config` and write it to the CONFIG register.
    fn write_config(&mut self, config: Config) -> Result<(), Nrf24Error<SPI::Error, CE::Error>> {
        self._config_reg = config;
        self.write_register(registers::CONFIG, config.into_bits())?;
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{commands, registers, Nrf24Error};
    use crate::{
        radio::LinkConfig,
        spi_test_expects,
        test::{
            mk_radio,
            spy::{mk_spy_radio, BusEvent},
        },
    };
    use embedded_hal::spi::ErrorKind;
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::{vec, vec::Vec};

    #[test]
    pub fn read_register() {
        let spi_expectations = spi_test_expects![
            // R_REGISTER | RF_CH followed by a NOP placeholder
            (vec![registers::RF_CH, commands::NOP], vec![0xEu8, 2u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin, mut csn_pin) = (mocks.0, mocks.1, mocks.2, mocks.3);
        assert_eq!(radio.read_register(registers::RF_CH).unwrap(), 2);
        spi.done();
        ce_pin.done();
        csn_pin.done();
    }

    #[test]
    pub fn register_offset_is_masked() {
        let spi_expectations = spi_test_expects![
            (vec![0x1F, commands::NOP], vec![0xEu8, 0u8]),
            (vec![commands::W_REGISTER | 0x1F, 0x42], vec![0xEu8, 0u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin, mut csn_pin) = (mocks.0, mocks.1, mocks.2, mocks.3);
        radio.read_register(0xFF).unwrap();
        radio.write_register(0xFF, 0x42).unwrap();
        spi.done();
        ce_pin.done();
        csn_pin.done();
    }

    #[test]
    pub fn read_buffer() {
        let spi_expectations = spi_test_expects![
            (
                vec![registers::TX_ADDR, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF],
                vec![0xEu8, 1, 2, 3, 4, 5],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin, mut csn_pin) = (mocks.0, mocks.1, mocks.2, mocks.3);
        let mut address = [0u8; 5];
        radio.read_buffer(registers::TX_ADDR, &mut address).unwrap();
        assert_eq!(address, [1, 2, 3, 4, 5]);
        spi.done();
        ce_pin.done();
        csn_pin.done();
    }

    #[test]
    pub fn write_returns_status() {
        let spi_expectations = spi_test_expects![
            (
                vec![registers::EN_AA | commands::W_REGISTER, 3u8],
                vec![0x2Eu8, 0u8],
            ),
            (
                vec![registers::RX_ADDR_P1 | commands::W_REGISTER, 0xAA, 0xBB, 0xCC],
                vec![0x1Eu8, 0, 0, 0],
            ),
            (vec![commands::FLUSH_RX], vec![0x4Eu8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin, mut csn_pin) = (mocks.0, mocks.1, mocks.2, mocks.3);
        let status = radio.write_register(registers::EN_AA, 3).unwrap();
        assert!(status.tx_ds());
        let status = radio
            .write_buffer(registers::RX_ADDR_P1, &[0xAA, 0xBB, 0xCC])
            .unwrap();
        assert!(status.tx_df());
        let status = radio.command(commands::FLUSH_RX).unwrap();
        assert!(status.rx_dr());
        assert_eq!(status.rx_pipe(), 7);
        spi.done();
        ce_pin.done();
        csn_pin.done();
    }

    #[test]
    pub fn csn_released_on_spi_error() {
        let (mut radio, chip) = mk_spy_radio(LinkConfig::default());
        chip.borrow_mut().fail_transfers = true;
        assert_eq!(
            radio.write_register(registers::STATUS, 0x70),
            Err(Nrf24Error::Spi(ErrorKind::Other))
        );
        assert_eq!(
            chip.borrow().events,
            vec![BusEvent::Csn(false), BusEvent::Csn(true)]
        );
    }

    #[test]
    pub fn csn_brackets_every_transaction() {
        let (mut radio, chip) = mk_spy_radio(LinkConfig::default());
        radio.read_register(registers::CONFIG).unwrap();
        let mut buf = [0u8; 5];
        radio.read_buffer(registers::RX_ADDR_P0, &mut buf).unwrap();
        radio.write_register(registers::RF_CH, 2).unwrap();
        radio.write_buffer(registers::TX_ADDR, &[1, 2, 3]).unwrap();
        radio.command(commands::FLUSH_TX).unwrap();

        let events = chip.borrow().events.clone();
        assert_eq!(events.len(), 5 * 3);
        for frame in events.chunks(3) {
            assert_eq!(frame[0], BusEvent::Csn(false));
            assert!(matches!(frame[1], BusEvent::Transfer(_)));
            assert_eq!(frame[2], BusEvent::Csn(true));
        }
        let commands: Vec<u8> = events
            .iter()
            .filter_map(|e| match e {
                BusEvent::Transfer(bytes) => Some(bytes[0]),
                _ => None,
            })
            .collect();
        assert_eq!(
            commands,
            vec![
                registers::CONFIG,
                registers::RX_ADDR_P0,
                registers::RF_CH | commands::W_REGISTER,
                registers::TX_ADDR | commands::W_REGISTER,
                commands::FLUSH_TX,
            ]
        );
    }

    #[test]
    pub fn register_round_trip() {
        let (mut radio, _chip) = mk_spy_radio(LinkConfig::default());
        for reg in [
            registers::EN_AA,
            registers::EN_RXADDR,
            registers::SETUP_RETR,
            registers::RF_CH,
            registers::RF_SETUP,
            registers::RX_PW_P0,
            registers::DYNPD,
            registers::FEATURE,
        ] {
            for value in [0u8, 1, 0x3F, 0xA5] {
                radio.write_register(reg, value).unwrap();
                assert_eq!(radio.read_register(reg).unwrap(), value);
            }
        }
    }

    #[test]
    pub fn buffer_round_trip() {
        let (mut radio, _chip) = mk_spy_radio(LinkConfig::default());
        let payload_length = radio.config().payload_length() as usize;
        let source: Vec<u8> = (0..payload_length as u8).map(|i| i ^ 0x5A).collect();
        for len in 1..=payload_length {
            radio.write_buffer(registers::TX_ADDR, &source[..len]).unwrap();
            let mut result = vec![0u8; len];
            radio.read_buffer(registers::TX_ADDR, &mut result).unwrap();
            assert_eq!(result, source[..len]);
        }
    }
}
