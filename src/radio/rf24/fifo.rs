use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

use crate::radio::{prelude::LinkFifo, Nrf24Error, SplitLink};
use crate::FifoState;

use super::{commands, mnemonics, registers};

impl<SPI, CE, CSN, DELAY> LinkFifo for SplitLink<SPI, CE, CSN, DELAY>
where
    SPI: SpiBus,
    CE: OutputPin,
    CSN: OutputPin<Error = CE::Error>,
    DELAY: DelayNs,
{
    type FifoErrorType = Nrf24Error<SPI::Error, CE::Error>;

    fn available(&mut self) -> Result<bool, Self::FifoErrorType> {
        let fifo = self.read_register(registers::FIFO_STATUS)?;
        Ok(fifo & mnemonics::RX_EMPTY == 0)
    }

    /// Use this to discard all 3 layers in the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.command(commands::FLUSH_RX)?;
        Ok(())
    }

    /// Use this to discard all 3 layers in the radio's TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.command(commands::FLUSH_TX)?;
        Ok(())
    }

    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType> {
        let fifo = self.read_register(registers::FIFO_STATUS)?;
        let (empty, full) = if about_tx {
            (mnemonics::TX_EMPTY, mnemonics::TX_FULL)
        } else {
            (mnemonics::RX_EMPTY, mnemonics::RX_FULL)
        };
        if fifo & empty > 0 {
            Ok(FifoState::Empty)
        } else if fifo & full > 0 {
            Ok(FifoState::Full)
        } else {
            Ok(FifoState::Occupied)
        }
    }
}
