//! This module defines types used by the driver's traits and configuration.

use core::{
    fmt::{Display, Formatter, Result},
    write,
};

use bitfield_struct::bitfield;

/// Power Amplifier level. The units dBm (decibel-milliwatts or dB<sub>mW</sub>)
/// represents a logarithmic signal loss.
///
/// Keyboard halves sit within a meter of each other,
/// so [`LinkConfig`](struct@crate::radio::LinkConfig) defaults to [`PaLevel::Min`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaLevel {
    /// -18 dBm
    Min,
    /// -12 dBm
    Low,
    /// -6 dBm
    High,
    /// 0 dBm
    Max,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for PaLevel {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PaLevel::Min => defmt::write!(fmt, "Min"),
            PaLevel::Low => defmt::write!(fmt, "Low"),
            PaLevel::High => defmt::write!(fmt, "High"),
            PaLevel::Max => defmt::write!(fmt, "Max"),
        }
    }
}

impl PaLevel {
    // only decoded when printing details
    #[cfg_attr(
        not(any(
            all(feature = "defmt", target_os = "none"),
            all(feature = "std", not(target_os = "none"))
        )),
        allow(dead_code)
    )]
    pub(crate) const MASK: u8 = 6;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            PaLevel::Min => 0,
            PaLevel::Low => 2,
            PaLevel::High => 4,
            PaLevel::Max => 6,
        }
    }

    #[cfg_attr(
        not(any(
            all(feature = "defmt", target_os = "none"),
            all(feature = "std", not(target_os = "none"))
        )),
        allow(dead_code)
    )]
    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0 => PaLevel::Min,
            2 => PaLevel::Low,
            4 => PaLevel::High,
            _ => PaLevel::Max,
        }
    }
}

impl Display for PaLevel {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            PaLevel::Min => write!(f, "Min"),
            PaLevel::Low => write!(f, "Low"),
            PaLevel::High => write!(f, "High"),
            PaLevel::Max => write!(f, "Max"),
        }
    }
}

/// How fast data moves through the air. Units are in bits per second (bps).
///
/// The link always runs at [`DataRate::Mbps2`];
/// the other rates are only decoded when reading back the RF_SETUP register.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DataRate {
    /// represents 1 Mbps
    Mbps1,
    /// represents 2 Mbps
    Mbps2,
    /// represents 250 Kbps
    Kbps250,
}

impl DataRate {
    #[cfg_attr(
        not(any(
            all(feature = "defmt", target_os = "none"),
            all(feature = "std", not(target_os = "none"))
        )),
        allow(dead_code)
    )]
    pub(crate) const MASK: u8 = 0x28;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            DataRate::Mbps1 => 0,
            DataRate::Mbps2 => 0x8,
            DataRate::Kbps250 => 0x20,
        }
    }

    #[cfg_attr(
        not(any(
            all(feature = "defmt", target_os = "none"),
            all(feature = "std", not(target_os = "none"))
        )),
        allow(dead_code)
    )]
    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0x8 => DataRate::Mbps2,
            0x20 => DataRate::Kbps250,
            _ => DataRate::Mbps1,
        }
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for DataRate {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DataRate::Mbps1 => defmt::write!(fmt, "1 Mbps"),
            DataRate::Mbps2 => defmt::write!(fmt, "2 Mbps"),
            DataRate::Kbps250 => defmt::write!(fmt, "250 Kbps"),
        }
    }
}

impl Display for DataRate {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            DataRate::Mbps1 => write!(f, "1 Mbps"),
            DataRate::Mbps2 => write!(f, "2 Mbps"),
            DataRate::Kbps250 => write!(f, "250 Kbps"),
        }
    }
}

/// The number of bytes used for every pipe's address.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AddressWidth {
    /// 3 byte addresses
    Bytes3,
    /// 4 byte addresses
    Bytes4,
    /// 5 byte addresses
    Bytes5,
}

impl AddressWidth {
    /// The number of address bytes written for each pipe.
    pub const fn byte_length(self) -> usize {
        match self {
            AddressWidth::Bytes3 => 3,
            AddressWidth::Bytes4 => 4,
            AddressWidth::Bytes5 => 5,
        }
    }

    /// The SETUP_AW register value.
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            AddressWidth::Bytes3 => 1,
            AddressWidth::Bytes4 => 2,
            AddressWidth::Bytes5 => 3,
        }
    }
}

impl TryFrom<u8> for AddressWidth {
    type Error = ConfigError;

    /// Only 3, 4 or 5 byte addresses are supported by the link.
    fn try_from(value: u8) -> core::result::Result<Self, Self::Error> {
        match value {
            3 => Ok(AddressWidth::Bytes3),
            4 => Ok(AddressWidth::Bytes4),
            5 => Ok(AddressWidth::Bytes5),
            _ => Err(ConfigError::InvalidAddressWidth(value)),
        }
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for AddressWidth {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=usize} bytes", self.byte_length())
    }
}

impl Display for AddressWidth {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} bytes", self.byte_length())
    }
}

/// Rejected values when building a [`LinkConfig`](struct@crate::radio::LinkConfig).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// Address widths must be 3, 4 or 5 bytes.
    InvalidAddressWidth(u8),
    /// The device number does not index the
    /// [`SLAVE_ADDRESSES`](constant@crate::radio::SLAVE_ADDRESSES) table.
    InvalidDeviceNumber(u8),
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ConfigError::InvalidAddressWidth(w) => {
                defmt::write!(fmt, "invalid address width: {=u8}", w)
            }
            ConfigError::InvalidDeviceNumber(n) => {
                defmt::write!(fmt, "invalid device number: {=u8}", n)
            }
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ConfigError::InvalidAddressWidth(w) => write!(f, "invalid address width: {w}"),
            ConfigError::InvalidDeviceNumber(n) => write!(f, "invalid device number: {n}"),
        }
    }
}

/// The possible states of a FIFO.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FifoState {
    /// Represent the state of a FIFO when it is full.
    Full,
    /// Represent the state of a FIFO when it is empty.
    Empty,
    /// Represent the state of a FIFO when it is not full but not empty either.
    Occupied,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for FifoState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FifoState::Empty => defmt::write!(fmt, "Empty"),
            FifoState::Full => defmt::write!(fmt, "Full"),
            FifoState::Occupied => defmt::write!(fmt, "Occupied"),
        }
    }
}

impl Display for FifoState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            FifoState::Empty => write!(f, "Empty"),
            FifoState::Full => write!(f, "Full"),
            FifoState::Occupied => write!(f, "Occupied"),
        }
    }
}

/// The STATUS register, as clocked out during the first byte of every SPI transaction.
///
/// To instantiate an object with flags that have different values:
/// ```
/// use rf24split::StatusFlags;
/// let flags = StatusFlags::default() // all flags are false
///     .with_rx_dr(true); // assert only `rx_dr` flags
/// ```
/// Use [`StatusFlags::default`] to instantiate all flags set to false.
/// Use [`StatusFlags::new`] to instantiate all flags set to true.
#[bitfield(u8, new = false, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct StatusFlags {
    #[bits(1)]
    _padding: u8,

    /// A flag to describe if RX Data Ready to read.
    #[bits(1, access = RO)]
    pub rx_dr: bool,

    /// A flag to describe if TX Data Sent (and acknowledged when auto-ack is on).
    #[bits(1, access = RO)]
    pub tx_ds: bool,

    /// A flag to describe if TX Data Failed (the MAX_RT event).
    #[bits(1, access = RO)]
    pub tx_df: bool,

    /// The pipe number of the payload at the head of the RX FIFO.
    ///
    /// A value of `7` means the RX FIFO is empty; `6` is unused.
    #[bits(3, access = RO)]
    pub rx_pipe: u8,

    /// A flag to describe if the TX FIFO is full.
    #[bits(1, access = RO)]
    pub tx_full: bool,
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusFlags {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusFlags rx_dr: {}, tx_ds: {}, tx_df: {}, rx_pipe: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.tx_df(),
            self.rx_pipe(),
        )
    }
}

impl StatusFlags {
    /// A mask to isolate only the IRQ flags.
    pub(crate) const IRQ_MASK: u8 = 0x70;

    /// A convenience constructor similar to [`StatusFlags::default`] except
    /// all fields are set to `true`.
    pub fn new() -> Self {
        Self::from_bits(Self::IRQ_MASK)
    }

    /// A flag to describe if RX Data Ready to read.
    pub fn with_rx_dr(self, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << Self::RX_DR_OFFSET);
        Self::from_bits(new_val | ((flag as u8) << Self::RX_DR_OFFSET))
    }

    /// A flag to describe if TX Data Sent.
    pub fn with_tx_ds(self, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << Self::TX_DS_OFFSET);
        Self::from_bits(new_val | ((flag as u8) << Self::TX_DS_OFFSET))
    }

    /// A flag to describe if TX Data Failed.
    pub fn with_tx_df(self, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << Self::TX_DF_OFFSET);
        Self::from_bits(new_val | ((flag as u8) << Self::TX_DF_OFFSET))
    }
}

impl Display for StatusFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "StatusFlags rx_dr: {}, tx_ds: {}, tx_df: {}, rx_pipe: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.tx_df(),
            self.rx_pipe(),
        )
    }
}

#[cfg(test)]
mod test {
    use super::{AddressWidth, ConfigError, DataRate, FifoState, PaLevel, StatusFlags};
    extern crate std;
    use std::{format, string::String};

    #[test]
    fn rx_pipe_from_every_status_byte() {
        for status in 0..=u8::MAX {
            let flags = StatusFlags::from_bits(status);
            assert_eq!(flags.rx_pipe(), (status >> 1) & 0b111);
            assert_eq!(flags.tx_full(), status & 1 == 1);
        }
    }

    #[test]
    fn irq_flags_from_status_byte() {
        let flags = StatusFlags::from_bits(0x4E);
        assert!(flags.rx_dr());
        assert!(!flags.tx_ds());
        assert!(!flags.tx_df());
        assert_eq!(flags.rx_pipe(), 7);
        assert_eq!(StatusFlags::new().into_bits(), 0x70);
    }

    fn set_flags(rx_dr: bool, tx_ds: bool, tx_df: bool) {
        let flags = StatusFlags::default()
            .with_rx_dr(rx_dr)
            .with_tx_ds(tx_ds)
            .with_tx_df(tx_df);
        assert_eq!(flags.rx_dr(), rx_dr);
        assert_eq!(flags.tx_ds(), tx_ds);
        assert_eq!(flags.tx_df(), tx_df);
    }

    #[test]
    fn flags_0x50() {
        set_flags(true, false, true);
    }

    #[test]
    fn flags_0x20() {
        set_flags(false, true, false);
    }

    #[test]
    fn display_flags() {
        assert_eq!(
            format!("{}", StatusFlags::from_bits(0x0E)),
            String::from("StatusFlags rx_dr: false, tx_ds: false, tx_df: false, rx_pipe: 7")
        );
    }

    #[test]
    fn address_width_from_raw() {
        assert_eq!(AddressWidth::try_from(3), Ok(AddressWidth::Bytes3));
        assert_eq!(AddressWidth::try_from(4), Ok(AddressWidth::Bytes4));
        assert_eq!(AddressWidth::try_from(5), Ok(AddressWidth::Bytes5));
        for invalid in [0u8, 1, 2, 6, 32, 255] {
            assert_eq!(
                AddressWidth::try_from(invalid),
                Err(ConfigError::InvalidAddressWidth(invalid))
            );
        }
    }

    #[test]
    fn address_width_register_bits() {
        for (width, bits, len) in [
            (AddressWidth::Bytes3, 1u8, 3usize),
            (AddressWidth::Bytes4, 2, 4),
            (AddressWidth::Bytes5, 3, 5),
        ] {
            assert_eq!(width.into_bits(), bits);
            assert_eq!(width.byte_length(), len);
        }
        assert_eq!(format!("{}", AddressWidth::Bytes4), String::from("4 bytes"));
    }

    #[test]
    fn display_config_error() {
        assert_eq!(
            format!("{}", ConfigError::InvalidDeviceNumber(2)),
            String::from("invalid device number: 2")
        );
        assert_eq!(
            format!("{}", ConfigError::InvalidAddressWidth(6)),
            String::from("invalid address width: 6")
        );
    }

    #[test]
    fn rf_setup_bits() {
        for rate in [DataRate::Mbps1, DataRate::Mbps2, DataRate::Kbps250] {
            assert_eq!(DataRate::from_bits(rate.into_bits() | 1), rate);
        }
        for level in [PaLevel::Min, PaLevel::Low, PaLevel::High, PaLevel::Max] {
            assert_eq!(PaLevel::from_bits(level.into_bits() | 0x08), level);
        }
        assert_eq!(format!("{}", DataRate::Mbps2), String::from("2 Mbps"));
        assert_eq!(format!("{}", PaLevel::Min), String::from("Min"));
    }

    #[test]
    fn display_fifo_state() {
        assert_eq!(format!("{}", FifoState::Empty), String::from("Empty"));
        assert_eq!(format!("{}", FifoState::Full), String::from("Full"));
        assert_eq!(format!("{}", FifoState::Occupied), String::from("Occupied"));
    }
}
