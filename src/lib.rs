#![doc = include_str!("../README.md")]
//!
//! ## Basic API
//!
//! - [`LinkConfig::master()`](fn@crate::radio::LinkConfig::master)
//! - [`LinkConfig::slave()`](fn@crate::radio::LinkConfig::slave)
//! - [`SplitLink::new()`](fn@crate::radio::SplitLink::new)
//! - [`SplitLink::setup()`](radio/struct.SplitLink.html#method.setup)
//! - [`SplitLink::load_tx_payload()`](radio/struct.SplitLink.html#method.load_tx_payload)
//! - [`SplitLink::pulse_tx()`](radio/struct.SplitLink.html#method.pulse_tx)
//! - [`SplitLink::transmit_and_drain()`](radio/struct.SplitLink.html#method.transmit_and_drain)
//! - [`SplitLink::read_rx_payload()`](radio/struct.SplitLink.html#method.read_rx_payload)
//! - [`SplitLink::rx_pipe()`](radio/struct.SplitLink.html#method.rx_pipe)
//! - [`SplitLink::clear_irq_flags()`](radio/struct.SplitLink.html#method.clear_irq_flags)
//!
//! ## Advanced API
//!
//! - [`SplitLink::transmit_and_drain_bounded()`](radio/struct.SplitLink.html#method.transmit_and_drain_bounded)
//! - [`SplitLink::available()`](radio/struct.SplitLink.html#method.available)
//! - [`SplitLink::get_fifo_state()`](radio/struct.SplitLink.html#method.get_fifo_state)
//! - [`SplitLink::flush_rx()`](radio/struct.SplitLink.html#method.flush_rx)
//! - [`SplitLink::flush_tx()`](radio/struct.SplitLink.html#method.flush_tx)
//! - [`SplitLink::update()`](radio/struct.SplitLink.html#method.update)
//! - [`SplitLink::get_status_flags()`](radio/struct.SplitLink.html#method.get_status_flags)
//! - [`SplitLink::clear_status_flags()`](radio/struct.SplitLink.html#method.clear_status_flags)
//! - [`SplitLink::power_up()`](radio/struct.SplitLink.html#method.power_up)
//! - [`SplitLink::power_down()`](radio/struct.SplitLink.html#method.power_down)
//! - [`SplitLink::is_powered()`](radio/struct.SplitLink.html#method.is_powered)
//! - [`SplitLink::print_details()`](radio/struct.SplitLink.html#method.print_details)
//!
//! ## Register API
//!
//! - [`SplitLink::read_register()`](fn@crate::radio::SplitLink::read_register)
//! - [`SplitLink::read_buffer()`](fn@crate::radio::SplitLink::read_buffer)
//! - [`SplitLink::write_register()`](fn@crate::radio::SplitLink::write_register)
//! - [`SplitLink::write_buffer()`](fn@crate::radio::SplitLink::write_buffer)
//! - [`SplitLink::command()`](fn@crate::radio::SplitLink::command)
//!
#![no_std]

mod types;
pub use types::{AddressWidth, ConfigError, DataRate, FifoState, PaLevel, StatusFlags};
pub mod radio;
