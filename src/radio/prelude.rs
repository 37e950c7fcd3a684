//! This module defines the traits implemented by
//! [`SplitLink`](struct@crate::radio::SplitLink).
//!
//! Since rustc only compiles objects that are used,
//! it is convenient to import these traits with the `*` syntax.
//!
//! ```
//! use rf24split::radio::prelude::*;
//! ```

use crate::types::{FifoState, StatusFlags};

/// A trait to represent the one-time configuration of the link.
pub trait LinkSetup {
    type SetupErrorType;

    /// Bring the radio from power-down (or an unknown state) into an armed state
    /// matching the [`LinkConfig`](struct@crate::radio::LinkConfig) given to the driver.
    ///
    /// This powers the radio down, programs auto-ACK and auto-retries, the channel,
    /// data rate, address width and pipes, flushes both FIFOs, then powers up
    /// as a primary receiver (master) or primary transmitter (slave).
    ///
    /// This function blocks until the radio's oscillator has settled. Do not call
    /// any other radio operation before it returns.
    ///
    /// Written registers are not read back.
    fn setup(&mut self) -> Result<(), Self::SetupErrorType>;
}

/// A trait to represent manipulation of the radio's power state.
pub trait LinkPower {
    type PowerErrorType;

    /// Power down the radio. Only the SPI interface remains active.
    ///
    /// The CE pin is driven low before the radio is powered down.
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Power up the radio into standby mode.
    ///
    /// The `delay` parameter is the number of microseconds to wait for the
    /// radio's oscillator to settle. `None` uses
    /// [`timing::POWER_UP_SETTLE_US`](constant@crate::radio::rf24::timing::POWER_UP_SETTLE_US).
    /// Does nothing if the radio is already powered.
    fn power_up(&mut self, delay: Option<u32>) -> Result<(), Self::PowerErrorType>;

    /// Is the radio powered up?
    fn is_powered(&self) -> bool;
}

/// A trait to represent moving payloads across the link.
///
/// The caller is responsible for the order of operations:
/// a payload must be loaded before a transmission is started.
pub trait LinkTransfer {
    type TransferErrorType;

    /// Upload a payload into the TX FIFO.
    ///
    /// Exactly [`LinkConfig::payload_length()`](fn@crate::radio::LinkConfig::payload_length)
    /// bytes are uploaded: a longer `buf` is truncated and a shorter `buf` is padded with zeros.
    /// The payload asks for an ACK only if auto-ACK is enabled.
    ///
    /// This does not start a transmission.
    fn load_tx_payload(&mut self, buf: &[u8]) -> Result<StatusFlags, Self::TransferErrorType>;

    /// Pulse the CE pin long enough to start transmitting the TX FIFO's head.
    ///
    /// This does not wait for the transmission to finish.
    fn pulse_tx(&mut self) -> Result<(), Self::TransferErrorType>;

    /// Keep the CE pin active until the TX FIFO is empty or the
    /// maximum number of retries was reached.
    ///
    /// This blocks without any timeout. A dead link (or radio) will
    /// block as long as the auto-retry feature keeps failing.
    /// Inspect [`StatusFlags::tx_df()`] afterwards to know if the retries were exhausted.
    fn transmit_and_drain(&mut self) -> Result<(), Self::TransferErrorType>;

    /// Same as [`LinkTransfer::transmit_and_drain()`] but gives up
    /// after `max_polls` reads of the FIFO_STATUS register (at least one).
    ///
    /// The CE pin is deactivated before a timeout error is returned.
    fn transmit_and_drain_bounded(&mut self, max_polls: u32)
        -> Result<(), Self::TransferErrorType>;

    /// Read the payload at the head of the RX FIFO into `buf`.
    ///
    /// `len` defaults to the configured payload length and is capped by the `buf` length.
    /// Returns the number of bytes read.
    fn read_rx_payload(
        &mut self,
        buf: &mut [u8],
        len: Option<u8>,
    ) -> Result<u8, Self::TransferErrorType>;

    /// Get the pipe number of the payload at the head of the RX FIFO.
    ///
    /// A value of `7` means the RX FIFO is empty.
    fn rx_pipe(&mut self) -> Result<u8, Self::TransferErrorType>;

    /// Clear the "RX Data Ready", "TX Data Sent" and "TX Data Failed" flags
    /// after they have been handled.
    ///
    /// Returns the STATUS register as it was before the flags were cleared.
    fn clear_irq_flags(&mut self) -> Result<StatusFlags, Self::TransferErrorType>;
}

/// A trait to represent manipulation of [`StatusFlags`].
pub trait LinkStatus {
    type StatusErrorType;

    /// Get the [`StatusFlags`] state that was cached from the latest SPI transaction.
    fn get_status_flags(&self) -> StatusFlags;

    /// Clear the radio's IRQ status flags
    ///
    /// Set any member of [`StatusFlags`] to `true` to clear the corresponding
    /// event. Setting any member of [`StatusFlags`] to `false` will leave
    /// the corresponding status flag untouched.
    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType>;

    /// Refresh the internal cache of status byte
    /// (which is also saved from every SPI transaction).
    fn update(&mut self) -> Result<(), Self::StatusErrorType>;
}

/// A trait to represent manipulation of RX and TX FIFOs.
pub trait LinkFifo {
    type FifoErrorType;

    /// Flush the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Flush the radio's TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Get the state of the specified FIFO.
    ///
    /// - Pass `true` to `about_tx` parameter to get the state of the TX FIFO.
    /// - Pass `false` to `about_tx` parameter to get the state of the RX FIFO.
    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType>;

    /// Is there a payload available in the radio's RX FIFO?
    fn available(&mut self) -> Result<bool, Self::FifoErrorType>;
}

/// A trait to dump the radio's configuration, as read back from its registers.
pub trait LinkDetails {
    type DetailsErrorType;

    /// Print the radio's configuration.
    ///
    /// Output goes to `std::println!` with the `std` feature, or `defmt::println!`
    /// with the `defmt` feature. Otherwise nothing is read nor printed.
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType>;
}
