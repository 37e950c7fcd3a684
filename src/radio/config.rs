use crate::radio::rf24::bit_fields::SetupRetry;
use crate::{AddressWidth, ConfigError, DataRate, PaLevel};

/// The fixed addresses of the keyboard halves, indexed by device number.
///
/// Both firmware builds (master and slaves) must agree on these bytes.
pub const SLAVE_ADDRESSES: [[u8; 5]; 2] = [
    [0x0f, 0xb3, 0x47, 0x17, 0x1c],
    [0xd7, 0x1c, 0xca, 0x3b, 0x8a],
];

/// The radio channel used by the link (2402 MHz).
pub const LINK_CHANNEL: u8 = 2;

/// The over-the-air data rate used by the link.
pub const LINK_DATA_RATE: DataRate = DataRate::Mbps2;

/// The largest payload the nRF24L01 FIFOs can hold.
pub const MAX_PAYLOAD_LENGTH: u8 = 32;

/// The auto-retry delay used by device 0: `(10 + 1) * 250` = 2750 microseconds.
///
/// Other device numbers retry after the minimum 250 microseconds, so two
/// slaves that collided once do not keep colliding on every retry.
pub(crate) const DEVICE_0_RETRY_DELAY: u8 = 10;

/// Which half of the keyboard this radio lives in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceRole {
    /// The base half. Listens on RX pipes 0 and 1 (one per slave) and only
    /// transmits auto-ACK packets.
    Master,
    /// A peripheral half, identified by its device number.
    Slave(u8),
}

#[cfg(feature = "defmt")]
impl defmt::Format for DeviceRole {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DeviceRole::Master => defmt::write!(fmt, "master"),
            DeviceRole::Slave(n) => defmt::write!(fmt, "slave {=u8}", n),
        }
    }
}

/// An object to configure the link.
///
/// The configuration is fixed per firmware build: construct it once with
/// [`LinkConfig::master()`] or [`LinkConfig::slave()`] and pass it to
/// [`SplitLink::new()`](fn@crate::radio::SplitLink::new).
/// ```
/// use rf24split::{radio::LinkConfig, AddressWidth};
///
/// let config = LinkConfig::slave(1)
///     .unwrap()
///     .with_payload_length(8)
///     .with_address_width(AddressWidth::try_from(5).unwrap());
/// assert_eq!(config.device_number(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkConfig {
    role: DeviceRole,
    auto_ack: bool,
    payload_length: u8,
    address_width: AddressWidth,
    max_retries: u8,
    pa_level: PaLevel,
}

impl Default for LinkConfig {
    /// Instantiate a master [`LinkConfig`] with library defaults.
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`LinkConfig::role()`] | [`DeviceRole::Master`] |
    /// | [`LinkConfig::auto_ack()`] | `true` |
    /// | [`LinkConfig::payload_length()`] | `32` |
    /// | [`LinkConfig::address_width()`] | [`AddressWidth::Bytes5`] |
    /// | [`LinkConfig::max_retries()`] | `15` |
    /// | [`LinkConfig::pa_level()`] | [`PaLevel::Min`] |
    fn default() -> Self {
        Self {
            role: DeviceRole::Master,
            auto_ack: true,
            payload_length: MAX_PAYLOAD_LENGTH,
            address_width: AddressWidth::Bytes5,
            max_retries: 15,
            pa_level: PaLevel::Min,
        }
    }
}

impl LinkConfig {
    /// A configuration for the base half of the keyboard.
    pub fn master() -> Self {
        Self::default()
    }

    /// A configuration for the peripheral half identified by `device_number`.
    ///
    /// The `device_number` must index [`SLAVE_ADDRESSES`].
    pub fn slave(device_number: u8) -> Result<Self, ConfigError> {
        if device_number as usize >= SLAVE_ADDRESSES.len() {
            return Err(ConfigError::InvalidDeviceNumber(device_number));
        }
        Ok(Self {
            role: DeviceRole::Slave(device_number),
            ..Self::default()
        })
    }

    /// Returns the role given to [`LinkConfig::master()`] or [`LinkConfig::slave()`].
    pub const fn role(&self) -> DeviceRole {
        self.role
    }

    /// Is this the base half?
    pub const fn is_master(&self) -> bool {
        matches!(self.role, DeviceRole::Master)
    }

    /// The slave's device number; always `0` for the master.
    pub const fn device_number(&self) -> u8 {
        match self.role {
            DeviceRole::Master => 0,
            DeviceRole::Slave(n) => n,
        }
    }

    /// Returns the value set by [`LinkConfig::with_auto_ack()`].
    pub const fn auto_ack(&self) -> bool {
        self.auto_ack
    }

    /// Enable or disable the hardware auto-ACK and auto-retry features.
    ///
    /// When disabled, payloads are uploaded with the `W_TX_PAYLOAD_NO_ACK`
    /// command instead.
    pub fn with_auto_ack(self, enable: bool) -> Self {
        Self {
            auto_ack: enable,
            ..self
        }
    }

    /// Returns the value set by [`LinkConfig::with_payload_length()`].
    pub const fn payload_length(&self) -> u8 {
        self.payload_length
    }

    /// The length of every payload sent or received over the link.
    ///
    /// This value is clamped to range [1, 32].
    pub fn with_payload_length(self, value: u8) -> Self {
        Self {
            payload_length: value.clamp(1, MAX_PAYLOAD_LENGTH),
            ..self
        }
    }

    /// Returns the value set by [`LinkConfig::with_address_width()`].
    pub const fn address_width(&self) -> AddressWidth {
        self.address_width
    }

    /// The number of address bytes used for every pipe.
    ///
    /// Use [`AddressWidth::try_from()`] to validate a raw byte count.
    pub fn with_address_width(self, width: AddressWidth) -> Self {
        Self {
            address_width: width,
            ..self
        }
    }

    /// Returns the value set by [`LinkConfig::with_max_retries()`].
    pub const fn max_retries(&self) -> u8 {
        self.max_retries
    }

    /// The auto-retry feature's `count` shared by all slaves.
    ///
    /// This value is clamped to range [0, 15].
    pub fn with_max_retries(self, count: u8) -> Self {
        Self {
            max_retries: count.min(15),
            ..self
        }
    }

    /// Returns the value set by [`LinkConfig::with_pa_level()`].
    pub const fn pa_level(&self) -> PaLevel {
        self.pa_level
    }

    /// The Power Amplitude (PA) level.
    pub fn with_pa_level(self, level: PaLevel) -> Self {
        Self {
            pa_level: level,
            ..self
        }
    }

    /// The address this radio receives on (pipe 0 for slaves) and transmits to.
    ///
    /// For the master this is the address of the given `pipe`'s slave.
    pub(crate) fn slave_address(&self, device_number: u8) -> &[u8] {
        &SLAVE_ADDRESSES[device_number as usize][..self.address_width.byte_length()]
    }

    /// The SETUP_RETR register value.
    pub(crate) fn auto_retries(&self) -> SetupRetry {
        match self.role {
            DeviceRole::Slave(n) if self.auto_ack => SetupRetry::new()
                .with_ard(if n == 0 { DEVICE_0_RETRY_DELAY } else { 0 })
                .with_arc(self.max_retries),
            // the master only sends ACK packets, which are never retried
            _ => SetupRetry::new(),
        }
    }

    /// The RF_SETUP register value.
    pub(crate) fn rf_setup(&self) -> u8 {
        LINK_DATA_RATE.into_bits() | self.pa_level.into_bits()
    }
}

#[cfg(test)]
mod test {
    use super::{DeviceRole, LinkConfig, SLAVE_ADDRESSES};
    use crate::{AddressWidth, ConfigError, PaLevel};

    #[test]
    fn defaults() {
        let config = LinkConfig::default();
        assert_eq!(config, LinkConfig::master());
        assert!(config.is_master());
        assert_eq!(config.device_number(), 0);
        assert!(config.auto_ack());
        assert_eq!(config.payload_length(), 32);
        assert_eq!(config.address_width(), AddressWidth::Bytes5);
        assert_eq!(config.max_retries(), 15);
        assert_eq!(config.pa_level(), PaLevel::Min);
        // 2 Mbps at -18 dBm
        assert_eq!(config.rf_setup(), 0x08);
    }

    #[test]
    fn slave_device_numbers() {
        for n in 0..SLAVE_ADDRESSES.len() as u8 {
            let config = LinkConfig::slave(n).unwrap();
            assert_eq!(config.role(), DeviceRole::Slave(n));
            assert!(!config.is_master());
            assert_eq!(config.device_number(), n);
        }
        assert_eq!(
            LinkConfig::slave(2),
            Err(ConfigError::InvalidDeviceNumber(2))
        );
    }

    #[test]
    fn payload_length() {
        let config = LinkConfig::default().with_payload_length(255);
        assert_eq!(config.payload_length(), 32);
        let config = config.with_payload_length(0);
        assert_eq!(config.payload_length(), 1);
        let config = config.with_payload_length(8);
        assert_eq!(config.payload_length(), 8);
    }

    #[test]
    fn max_retries() {
        let config = LinkConfig::default().with_max_retries(20);
        assert_eq!(config.max_retries(), 15);
        assert_eq!(config.with_max_retries(3).max_retries(), 3);
    }

    #[test]
    fn retry_delay_per_device_number() {
        let device_0 = LinkConfig::slave(0).unwrap().with_max_retries(5);
        let device_1 = LinkConfig::slave(1).unwrap().with_max_retries(5);
        assert_eq!(device_0.auto_retries().ard(), 10);
        assert_eq!(device_1.auto_retries().ard(), 0);
        assert_eq!(device_0.auto_retries().arc(), device_1.auto_retries().arc());
        assert_eq!(device_0.auto_retries().arc(), 5);

        // no retries without auto-ack, and never for the master
        assert_eq!(device_0.with_auto_ack(false).auto_retries().into_bits(), 0);
        assert_eq!(LinkConfig::master().auto_retries().into_bits(), 0);
    }

    #[test]
    fn truncated_addresses() {
        let config = LinkConfig::slave(1)
            .unwrap()
            .with_address_width(AddressWidth::Bytes3);
        assert_eq!(config.slave_address(1), &[0xd7, 0x1c, 0xca]);
        assert_eq!(config.slave_address(0), &[0x0f, 0xb3, 0x47]);
    }

    #[test]
    fn pa_level() {
        let mut config = LinkConfig::default();
        for level in [PaLevel::Max, PaLevel::High, PaLevel::Low, PaLevel::Min] {
            config = config.with_pa_level(level);
            assert_eq!(config.pa_level(), level);
            assert_eq!(config.rf_setup(), 0x08 | level.into_bits());
        }
    }
}
