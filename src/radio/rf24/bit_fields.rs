use bitfield_struct::bitfield;

/// The CONFIG register.
///
/// The link never masks IRQ events and always uses a 16 bit CRC.
#[bitfield(u8, order = Msb)]
pub(crate) struct Config {
    #[bits(1)]
    _padding: u8,

    /// IRQ masks, all cleared
    #[bits(3)]
    _irq_masks: u8,

    /// EN_CRC
    #[bits(1, default = true)]
    pub crc_enable: bool,

    /// CRCO: 2 byte CRC when set.
    #[bits(1, default = true)]
    pub crc_2_bytes: bool,

    /// PWR_UP
    #[bits(1)]
    pub power: bool,

    /// PRIM_RX
    #[bits(1)]
    pub is_rx: bool,
}

/// The SETUP_RETR register.
#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRetry {
    /// The auto-retry feature's `delay`: `(ard + 1) * 250` microseconds.
    #[bits(4)]
    pub ard: u8,

    /// The auto-retry feature's `count`.
    #[bits(4)]
    pub arc: u8,
}
