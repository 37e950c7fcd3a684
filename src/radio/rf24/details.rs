use super::{Nrf24Error, SplitLink};
use crate::radio::prelude::LinkDetails;
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

#[cfg(any(
    all(feature = "defmt", target_os = "none"),
    all(feature = "std", not(target_os = "none"))
))]
use super::{bit_fields::Config, mnemonics, registers};
#[cfg(any(
    all(feature = "defmt", target_os = "none"),
    all(feature = "std", not(target_os = "none"))
))]
use crate::{
    radio::prelude::{LinkFifo, LinkPower},
    DataRate, PaLevel,
};

#[cfg(feature = "std")]
extern crate std;

impl<SPI, CE, CSN, DELAY> LinkDetails for SplitLink<SPI, CE, CSN, DELAY>
where
    SPI: SpiBus,
    CE: OutputPin,
    CSN: OutputPin<Error = CE::Error>,
    DELAY: DelayNs,
{
    type DetailsErrorType = Nrf24Error<SPI::Error, CE::Error>;

    #[cfg(feature = "defmt")]
    #[cfg(target_os = "none")]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        defmt::println!("Link role_________________{}", self._config.role());

        let channel = self.read_register(registers::RF_CH)?;
        defmt::println!(
            "Channel___________________{=u8} ~ {=u16} MHz",
            channel,
            channel as u16 + 2400u16
        );

        let rf_setup = self.read_register(registers::RF_SETUP)?;
        defmt::println!("RF Data Rate______________{}", DataRate::from_bits(rf_setup));
        defmt::println!("RF Power Amplifier________{}", PaLevel::from_bits(rf_setup));

        let config = Config::from_bits(self.read_register(registers::CONFIG)?);
        defmt::println!(
            "CRC Length________________{=u8} bytes",
            config.crc_enable() as u8 * (1 + config.crc_2_bytes() as u8)
        );

        let address_width = self.read_register(registers::SETUP_AW)?;
        defmt::println!(
            "Address length____________{=u8} bytes",
            (address_width & 3) + 2
        );
        for pipe in 0..2u8 {
            let width = self.read_register(registers::RX_PW_P0 + pipe)?;
            defmt::println!("Pipe {=u8} payload length__{=u8} bytes", pipe, width);
        }

        let retry_setup = self.read_register(registers::SETUP_RETR)?;
        defmt::println!(
            "Auto retry delay__________{=u16} microseconds",
            (retry_setup >> 4) as u16 * 250 + 250
        );
        defmt::println!(
            "Auto retry attempts_______{=u8} maximum",
            retry_setup & 0x0F
        );
        let observer = self.read_register(registers::OBSERVE_TX)?;
        defmt::println!(
            "Packets lost\n    on current channel____{=u8}",
            observer >> 4
        );
        defmt::println!(
            "Retry attempts made\n    for last transmission_{=u8}",
            observer & 0xF
        );

        let features = self.read_register(registers::FEATURE)?;
        defmt::println!(
            "Ask no ACK allowed________{=bool}",
            features & mnemonics::EN_DYN_ACK > 0
        );
        defmt::println!(
            "Auto Acknowledgment_______0b{=0..8}",
            self.read_register(registers::EN_AA)?
        );
        let open_pipes = self.read_register(registers::EN_RXADDR)?;
        defmt::println!("Open RX pipes_____________0b{=0..8}", open_pipes);

        let rx = defmt::intern!("R");
        let tx = defmt::intern!("T");
        defmt::println!(
            "Primary Mode______________{=istr}X",
            if config.is_rx() { rx } else { tx }
        );
        defmt::println!("Powered Up________________{=bool}", self.is_powered());

        defmt::println!("TX FIFO___________________{}", self.get_fifo_state(true)?);
        defmt::println!("RX FIFO___________________{}", self.get_fifo_state(false)?);
        defmt::println!("Status____________________{}", self._status);

        let mut address = [0u8; 5];
        self.read_buffer(registers::TX_ADDR, &mut address)?;
        address.reverse();
        defmt::println!("TX address________________{=[u8; 5]:02X}", address);
        for pipe in 0..2u8 {
            self.read_buffer(registers::RX_ADDR_P0 + pipe, &mut address)?;
            address.reverse();
            defmt::println!(
                "Pipe {=u8} (open: {=bool}) bound to {=[u8; 5]:02X}",
                pipe,
                open_pipes & (1u8 << pipe) > 0,
                address,
            );
        }
        Ok(())
    }

    #[cfg(not(any(
        all(feature = "defmt", target_os = "none"),
        all(feature = "std", not(target_os = "none"))
    )))]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        Ok(())
    }

    #[cfg(not(target_os = "none"))]
    #[cfg(feature = "std")]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        std::println!("Link role_________________{:?}", self._config.role());

        let channel = self.read_register(registers::RF_CH)?;
        std::println!(
            "Channel___________________{channel} ~ {} MHz",
            channel as u16 + 2400u16
        );

        let rf_setup = self.read_register(registers::RF_SETUP)?;
        std::println!("RF Data Rate______________{}", DataRate::from_bits(rf_setup));
        std::println!("RF Power Amplifier________{}", PaLevel::from_bits(rf_setup));

        let config = Config::from_bits(self.read_register(registers::CONFIG)?);
        std::println!(
            "CRC Length________________{} bytes",
            config.crc_enable() as u8 * (1 + config.crc_2_bytes() as u8)
        );

        let address_width = self.read_register(registers::SETUP_AW)?;
        std::println!("Address length____________{} bytes", (address_width & 3) + 2);
        for pipe in 0..2u8 {
            let width = self.read_register(registers::RX_PW_P0 + pipe)?;
            std::println!("Pipe {pipe} payload length__{width} bytes");
        }

        let retry_setup = self.read_register(registers::SETUP_RETR)?;
        std::println!(
            "Auto retry delay__________{} microseconds",
            (retry_setup >> 4) as u16 * 250 + 250
        );
        std::println!("Auto retry attempts_______{} maximum", retry_setup & 0x0F);
        let observer = self.read_register(registers::OBSERVE_TX)?;
        std::println!("Packets lost\n    on current channel____{}", observer >> 4);
        std::println!(
            "Retry attempts made\n    for last transmission_{}",
            observer & 0xF
        );

        let features = self.read_register(registers::FEATURE)?;
        std::println!(
            "Ask no ACK allowed________{}",
            features & mnemonics::EN_DYN_ACK > 0
        );
        std::println!(
            "Auto Acknowledgment_______{:#010b}",
            self.read_register(registers::EN_AA)?
        );
        let open_pipes = self.read_register(registers::EN_RXADDR)?;
        std::println!("Open RX pipes_____________{:#010b}", open_pipes);

        std::println!(
            "Primary Mode______________{}X",
            if config.is_rx() { "R" } else { "T" }
        );
        std::println!("Powered Up________________{}", self.is_powered());

        std::println!("TX FIFO___________________{}", self.get_fifo_state(true)?);
        std::println!("RX FIFO___________________{}", self.get_fifo_state(false)?);
        std::println!("Status____________________{}", self._status);

        // print addresses as they are stored (LSB first on the wire)
        let mut address = [0u8; 5];
        self.read_buffer(registers::TX_ADDR, &mut address)?;
        address.reverse();
        std::println!("TX address________________{:02X?}", address);
        for pipe in 0..2u8 {
            self.read_buffer(registers::RX_ADDR_P0 + pipe, &mut address)?;
            address.reverse();
            std::println!(
                "Pipe {pipe} ({}) bound to {:02X?}",
                if open_pipes & (1u8 << pipe) > 0 {
                    " open "
                } else {
                    "closed"
                },
                address,
            );
        }
        Ok(())
    }
}
