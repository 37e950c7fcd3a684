use super::{commands, mnemonics, registers, timing, Nrf24Error, SplitLink};
use crate::{radio::prelude::LinkTransfer, StatusFlags};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

impl<SPI, CE, CSN, DELAY> SplitLink<SPI, CE, CSN, DELAY>
where
    SPI: SpiBus,
    CE: OutputPin,
    CSN: OutputPin<Error = CE::Error>,
    DELAY: DelayNs,
{
    /// Hold CE high until the TX FIFO is drained or MAX_RT is asserted.
    ///
    /// CE is deactivated on every exit path, including errors.
    fn drain_tx_fifo(
        &mut self,
        max_polls: Option<u32>,
    ) -> Result<(), Nrf24Error<SPI::Error, CE::Error>> {
        self.ce_pin.set_high().map_err(Nrf24Error::Gpo)?;
        self._delay_impl.delay_us(timing::CE_HOLD_US);
        let result = self.poll_tx_fifo(max_polls);
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        result
    }

    fn poll_tx_fifo(
        &mut self,
        max_polls: Option<u32>,
    ) -> Result<(), Nrf24Error<SPI::Error, CE::Error>> {
        let mut polls = 0u32;
        loop {
            // the status byte clocked out with this read tells about MAX_RT
            let fifo = self.read_register(registers::FIFO_STATUS)?;
            polls = polls.saturating_add(1);
            if fifo & mnemonics::TX_EMPTY > 0 {
                return Ok(());
            }
            if self._status.tx_df() {
                #[cfg(all(feature = "defmt", target_os = "none"))]
                defmt::trace!("auto-retries exhausted after {=u32} polls", polls);
                return Ok(());
            }
            if max_polls.is_some_and(|max| polls >= max) {
                #[cfg(all(feature = "defmt", target_os = "none"))]
                defmt::debug!("TX FIFO not drained after {=u32} polls", polls);
                return Err(Nrf24Error::TxTimeout);
            }
        }
    }
}

impl<SPI, CE, CSN, DELAY> LinkTransfer for SplitLink<SPI, CE, CSN, DELAY>
where
    SPI: SpiBus,
    CE: OutputPin,
    CSN: OutputPin<Error = CE::Error>,
    DELAY: DelayNs,
{
    type TransferErrorType = Nrf24Error<SPI::Error, CE::Error>;

    /// See [`LinkTransfer::load_tx_payload()`] for implementation-agnostic detail.
    ///
    /// The returned [`StatusFlags::tx_full()`] was sampled before the upload.
    /// Uploading into a full TX FIFO is silently dropped by the radio.
    fn load_tx_payload(&mut self, buf: &[u8]) -> Result<StatusFlags, Self::TransferErrorType> {
        let payload_length = self._config.payload_length() as usize;
        let buf_len = buf.len().min(payload_length);
        self._buf[0] = if self._config.auto_ack() {
            commands::W_TX_PAYLOAD
        } else {
            commands::W_TX_PAYLOAD_NO_ACK
        };
        self._buf[1..(buf_len + 1)].copy_from_slice(&buf[..buf_len]);
        // pad buf with zeros
        self._buf[(buf_len + 1)..(payload_length + 1)].fill(0);
        self.spi_transfer(payload_length as u8 + 1)
    }

    /// <div class="warning">
    ///
    /// This does not check if a payload was loaded. Pulsing with an empty
    /// TX FIFO does nothing.
    ///
    /// </div>
    fn pulse_tx(&mut self) -> Result<(), Self::TransferErrorType> {
        self.ce_pin.set_high().map_err(Nrf24Error::Gpo)?;
        self._delay_impl.delay_us(timing::CE_HOLD_US);
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)
    }

    fn transmit_and_drain(&mut self) -> Result<(), Self::TransferErrorType> {
        self.drain_tx_fifo(None)
    }

    fn transmit_and_drain_bounded(
        &mut self,
        max_polls: u32,
    ) -> Result<(), Self::TransferErrorType> {
        self.drain_tx_fifo(Some(max_polls))
    }

    /// See [`LinkTransfer::read_rx_payload()`] for implementation-agnostic detail.
    ///
    /// Unlike the other RX helpers, this does not clear the RX_DR flag.
    /// Use [`LinkTransfer::clear_irq_flags()`] once all payloads are handled.
    fn read_rx_payload(
        &mut self,
        buf: &mut [u8],
        len: Option<u8>,
    ) -> Result<u8, Self::TransferErrorType> {
        let buf_len =
            (buf.len().min(32) as u8).min(len.unwrap_or(self._config.payload_length()));
        if buf_len == 0 {
            return Ok(0);
        }
        self.spi_read(buf_len, commands::R_RX_PAYLOAD)?;
        buf[..buf_len as usize].copy_from_slice(&self._buf[1..(buf_len as usize + 1)]);
        Ok(buf_len)
    }

    fn rx_pipe(&mut self) -> Result<u8, Self::TransferErrorType> {
        Ok(self.command(commands::NOP)?.rx_pipe())
    }

    fn clear_irq_flags(&mut self) -> Result<StatusFlags, Self::TransferErrorType> {
        self.write_register(registers::STATUS, StatusFlags::IRQ_MASK)
    }
}
