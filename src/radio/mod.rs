//! A module to encapsulate all things related to radio operation.
pub mod prelude;

pub mod rf24;
pub use rf24::{Nrf24Error, SplitLink};

mod config;
pub use config::{
    DeviceRole, LinkConfig, LINK_CHANNEL, LINK_DATA_RATE, MAX_PAYLOAD_LENGTH, SLAVE_ADDRESSES,
};
