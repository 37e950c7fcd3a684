/// Register offsets for the nRF24L01.
pub mod registers {
    pub const CONFIG: u8 = 0x00;
    pub const EN_AA: u8 = 0x01;
    pub const EN_RXADDR: u8 = 0x02;
    pub const SETUP_AW: u8 = 0x03;
    pub const SETUP_RETR: u8 = 0x04;
    pub const RF_CH: u8 = 0x05;
    pub const RF_SETUP: u8 = 0x06;
    pub const STATUS: u8 = 0x07;
    pub const OBSERVE_TX: u8 = 0x08;
    pub const RX_ADDR_P0: u8 = 0x0A;
    pub const RX_ADDR_P1: u8 = 0x0B;
    pub const TX_ADDR: u8 = 0x10;
    pub const RX_PW_P0: u8 = 0x11;
    pub const RX_PW_P1: u8 = 0x12;
    pub const FIFO_STATUS: u8 = 0x17;
    pub const DYNPD: u8 = 0x1C;
    pub const FEATURE: u8 = 0x1D;
}

/// SPI commands for the nRF24L01.
pub mod commands {
    pub const R_REGISTER: u8 = 0x00;
    pub const W_REGISTER: u8 = 0x20;
    /// Register offsets occupy the 5 LSBs of the (R|W)_REGISTER commands.
    pub const REGISTER_MASK: u8 = 0x1F;
    pub const R_RX_PAYLOAD: u8 = 0x61;
    pub const W_TX_PAYLOAD: u8 = 0xA0;
    pub const W_TX_PAYLOAD_NO_ACK: u8 = 0xB0;
    pub const FLUSH_TX: u8 = 0xE1;
    pub const FLUSH_RX: u8 = 0xE2;
    pub const NOP: u8 = 0xFF;
}

/// Bit mnemonics
pub mod mnemonics {
    /// EN_AA / EN_RXADDR bits
    pub const PIPE_0: u8 = 1 << 0;
    pub const PIPE_1: u8 = 1 << 1;

    /// FIFO_STATUS bits
    pub const RX_EMPTY: u8 = 1 << 0;
    pub const RX_FULL: u8 = 1 << 1;
    pub const TX_EMPTY: u8 = 1 << 4;
    pub const TX_FULL: u8 = 1 << 5;

    /// FEATURE bits
    pub const EN_DYN_ACK: u8 = 1 << 0;
}

/// Timing constraints (in microseconds).
pub mod timing {
    /// CE must stay high at least 10 us to start a transmission.
    pub const CE_HOLD_US: u32 = 11;

    /// Tpd2stby with a crystal oscillator is 1.5 ms.
    pub const POWER_UP_SETTLE_US: u32 = 1500;
}
