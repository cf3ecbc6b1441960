//! Blocking SPI master engine
//!
//! # Protocol
//!
//! One call to [`Spi::transfer`] is one full-duplex 8-bit exchange:
//!
//! 1. drive slave-select low
//! 2. write the byte to the data register (the hardware starts shifting)
//! 3. spin until the transfer-complete flag is set
//! 4. drive slave-select high
//! 5. return the byte shifted in from MISO
//!
//! There is no timeout. If the completion flag never rises (SPI disabled,
//! pins misconfigured) the call blocks forever; callers that need liveness
//! must bound the wait themselves.
//!
//! Slave-select is a type parameter. With [`NullPin`](crate::pin::NullPin)
//! the engine never drives a select line, for buses whose select is handled
//! elsewhere; with a real pin every byte is framed by its own select pulse.

use core::convert::Infallible;
use core::marker::PhantomData;

use avrkit_hal::{Bit, Line, SpiConfig};
use embedded_hal::delay::DelayNs;

use crate::register::Register;

/// Register block of an SPI peripheral
pub trait SpiBlock {
    /// SPCR
    type Control: Register;
    /// SPSR
    type Status: Register;
    /// SPDR
    type Data: Register;

    /// SPE in the control register
    const ENABLE: Bit;
    /// MSTR in the control register
    const MASTER: Bit;
    /// SPI2X in the status register
    const DOUBLE_SPEED: Bit;
    /// SPIF in the status register
    const COMPLETE: Bit;
}

/// SPI master over peripheral `B`
///
/// A value of this type only exists after [`Spi::init`], so transfers on an
/// unconfigured bus do not compile.
pub struct Spi<B, Sck, Miso, Mosi, Ss> {
    _bus: PhantomData<fn() -> (B, Sck, Miso, Mosi, Ss)>,
}

impl<B, Sck, Miso, Mosi, Ss> Spi<B, Sck, Miso, Mosi, Ss>
where
    B: SpiBlock,
    Sck: Line,
    Miso: Line,
    Mosi: Line,
    Ss: Line,
{
    /// Configure the pins and the peripheral
    ///
    /// Slave-select is driven high before it becomes an output, so the
    /// slave never sees a spurious select.
    pub fn init(config: SpiConfig) -> Self {
        Sck::configure_output();
        Mosi::configure_output();
        Miso::configure_input();
        Ss::set();
        Ss::configure_output();

        let mut spi = Self { _bus: PhantomData };
        spi.mode(config);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "spi: master enabled, control {=u8:#04x}, double speed {=bool}",
            config.bits(),
            config.double_speed()
        );

        spi
    }

    /// Re-apply a configuration without touching the pins
    ///
    /// The double-speed bit is only ever set here, never cleared: a bus
    /// once switched to double speed stays there until reset.
    pub fn mode(&mut self, config: SpiConfig) {
        B::Control::assign(0);
        B::Control::assign(
            (config.bits() & SpiConfig::FIELD_MASK) | B::ENABLE.mask() | B::MASTER.mask(),
        );
        if config.double_speed() {
            B::Status::set_bit(B::DOUBLE_SPEED);
        } else {
            // Reading the status register is half of clearing a stale flag
            let _ = B::Status::read();
        }
        // ... and this is the other half; it also drops a stale byte
        let _ = B::Data::read();
    }

    /// Exchange one byte
    pub fn transfer(&mut self, value: u8) -> u8 {
        Self::exchange(value);
        B::Data::read()
    }

    /// Exchange one byte, then hold the bus idle for `gap_us` microseconds
    ///
    /// For slaves that need a pause between bytes. A gap of 0 skips the
    /// delay entirely.
    pub fn transfer_with_gap(&mut self, value: u8, gap_us: u8, delay: &mut impl DelayNs) -> u8 {
        Self::exchange(value);
        if gap_us > 0 {
            delay.delay_us(gap_us as u32);
        }
        B::Data::read()
    }

    fn exchange(value: u8) {
        Ss::clear();
        B::Data::assign(value);
        while !B::Status::is_set(B::COMPLETE) {
            core::hint::spin_loop();
        }
        Ss::set();
    }
}

impl<B, Sck, Miso, Mosi, Ss> embedded_hal::spi::ErrorType for Spi<B, Sck, Miso, Mosi, Ss> {
    type Error = Infallible;
}

impl<B, Sck, Miso, Mosi, Ss> embedded_hal::spi::SpiBus<u8> for Spi<B, Sck, Miso, Mosi, Ss>
where
    B: SpiBlock,
    Sck: Line,
    Miso: Line,
    Mosi: Line,
    Ss: Line,
{
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        for word in words.iter_mut() {
            *word = self.transfer(0x00);
        }
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        for &word in words {
            self.transfer(word);
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        let len = read.len().max(write.len());
        for i in 0..len {
            let received = Spi::transfer(self, write.get(i).copied().unwrap_or(0x00));
            if let Some(slot) = read.get_mut(i) {
                *slot = received;
            }
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        for word in words.iter_mut() {
            *word = Spi::transfer(self, *word);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        // Every exchange has completed by the time transfer returns
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::pin::{NullPin, Pin};
    use crate::sim::{
        self, Access, Kind, SimSpi, DDRB, DDRB_ADDR, PINB, PORTB, PORTB_ADDR, SPCR_ADDR,
        SPDR_ADDR, SPSR_ADDR,
    };
    use avrkit_hal::spi::{ClockRate, Mode};
    use std::vec::Vec;

    type Ss = Pin<DDRB, PORTB, PINB, 2>;
    type Mosi = Pin<DDRB, PORTB, PINB, 3>;
    type Miso = Pin<DDRB, PORTB, PINB, 4>;
    type Sck = Pin<DDRB, PORTB, PINB, 5>;

    type SpiSs = Spi<SimSpi, Sck, Miso, Mosi, Ss>;
    type SpiNoSs = Spi<SimSpi, Sck, Miso, Mosi, NullPin>;

    const SS: u8 = 1 << 2;

    fn index_of(trace: &[Access], kind: Kind, addr: usize) -> Vec<usize> {
        trace
            .iter()
            .enumerate()
            .filter(|(_, a)| a.kind == kind && a.addr == addr)
            .map(|(i, _)| i)
            .collect()
    }

    #[derive(Default)]
    struct RecordingDelay {
        calls: Vec<u32>,
    }

    impl DelayNs for RecordingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.calls.push(ns / 1_000);
        }

        fn delay_us(&mut self, us: u32) {
            self.calls.push(us);
        }
    }

    #[test]
    fn test_init_configures_pins() {
        sim::reset();
        sim::attach_spi_loopback();

        SpiSs::init(SpiConfig::default());

        // SCK, MOSI, SS out; MISO in
        assert_eq!(sim::peek(DDRB_ADDR), 0b0010_1100);
        assert_eq!(sim::peek(PORTB_ADDR), SS);

        // Select goes high before it becomes an output
        let trace = sim::trace();
        let ss_high = index_of(&trace, Kind::Write, PORTB_ADDR)[0];
        let ss_output = index_of(&trace, Kind::Write, DDRB_ADDR)
            .into_iter()
            .find(|&i| trace[i].value & SS != 0)
            .unwrap();
        assert!(ss_high < ss_output);
    }

    #[test]
    fn test_mode_register_sequence() {
        sim::reset();
        sim::attach_spi_loopback();
        sim::poke(SPCR_ADDR, 0xFF);

        SpiSs::init(SpiConfig::new().with_mode(Mode::Mode3));

        // Reset first, then configuration with SPE | MSTR
        assert_eq!(sim::writes_to(SPCR_ADDR), [0x00, 0b0101_1100]);

        // Status read, then data read last
        let trace = sim::trace();
        let status_read = index_of(&trace, Kind::Read, SPSR_ADDR)[0];
        let data_read = index_of(&trace, Kind::Read, SPDR_ADDR)[0];
        let last_control = *index_of(&trace, Kind::Write, SPCR_ADDR).last().unwrap();
        assert!(last_control < status_read);
        assert!(status_read < data_read);
        assert_eq!(data_read, trace.len() - 1);
        // Double speed untouched
        assert_eq!(sim::peek(SPSR_ADDR) & 1, 0);
    }

    #[test]
    fn test_mode_double_speed() {
        sim::reset();
        sim::attach_spi_loopback();

        let mut spi = SpiNoSs::init(SpiConfig::default());
        sim::clear_trace();
        spi.mode(SpiConfig::new().with_clock(ClockRate::Div8));

        assert_eq!(sim::writes_to(SPCR_ADDR), [0x00, 0b0101_0001]);
        assert_eq!(sim::peek(SPSR_ADDR) & 1, 1);
        let trace = sim::trace();
        assert_eq!(trace.last().unwrap().addr, SPDR_ADDR);
        // Pins are not reconfigured
        assert!(index_of(&trace, Kind::Write, DDRB_ADDR).is_empty());
    }

    #[test]
    fn test_single_speed_rate_after_double_speed_keeps_spi2x() {
        sim::reset();
        sim::attach_spi_loopback();

        let mut spi = SpiNoSs::init(SpiConfig::new().with_clock(ClockRate::Div8));
        assert_eq!(sim::peek(SPSR_ADDR) & 1, 1);

        spi.mode(SpiConfig::new().with_clock(ClockRate::Div16));

        // SPR field follows the request, SPI2X stays latched: SCK runs at /8
        assert_eq!(sim::peek(SPCR_ADDR) & 0b11, 0b01);
        assert_eq!(sim::peek(SPSR_ADDR) & 1, 1);
    }

    #[test]
    fn test_single_speed_rate_on_fresh_bus() {
        sim::reset();
        sim::attach_spi_loopback();

        SpiNoSs::init(SpiConfig::new().with_clock(ClockRate::Div16));

        assert_eq!(sim::peek(SPCR_ADDR) & 0b11, 0b01);
        assert_eq!(sim::peek(SPSR_ADDR) & 1, 0);
    }

    #[test]
    fn test_mode_masks_interrupt_enable() {
        sim::reset();
        sim::attach_spi_loopback();

        SpiNoSs::init(SpiConfig::from_bits(0xFF, false));
        assert_eq!(sim::peek(SPCR_ADDR), 0x7F);
    }

    #[test]
    fn test_loopback_transfer() {
        sim::reset();
        sim::attach_spi_loopback();

        let mut spi = SpiSs::init(SpiConfig::default());
        assert_eq!(spi.transfer(0xA5), 0xA5);
        assert_eq!(spi.transfer(0x00), 0x00);
        assert_eq!(spi.transfer(0xFF), 0xFF);
    }

    #[test]
    fn test_returns_slave_byte() {
        sim::reset();
        sim::attach_spi_slave(0x3C);

        let mut spi = SpiSs::init(SpiConfig::default());
        assert_eq!(spi.transfer(0xA5), 0x3C);
    }

    #[test]
    fn test_select_low_only_during_exchange() {
        sim::reset();
        sim::attach_spi_loopback();

        let mut spi = SpiSs::init(SpiConfig::default());
        sim::clear_trace();
        spi.transfer(0xA5);

        let trace = sim::trace();
        let data_write = index_of(&trace, Kind::Write, SPDR_ADDR)[0];
        let port_writes = index_of(&trace, Kind::Write, PORTB_ADDR);
        assert_eq!(port_writes.len(), 2);

        let (select, deselect) = (port_writes[0], port_writes[1]);
        assert_eq!(trace[select].value & SS, 0);
        assert_ne!(trace[deselect].value & SS, 0);
        assert!(select < data_write);
        assert!(data_write < deselect);

        // Byte is read back after deselect
        let data_read = *index_of(&trace, Kind::Read, SPDR_ADDR).last().unwrap();
        assert!(deselect < data_read);
        assert_eq!(sim::peek(PORTB_ADDR) & SS, SS);
    }

    #[test]
    fn test_null_select_never_touches_port() {
        sim::reset();
        sim::attach_spi_loopback();

        let mut spi = SpiNoSs::init(SpiConfig::default());
        for byte in [0x01, 0x80, 0xA5, 0xFF] {
            assert_eq!(spi.transfer(byte), byte);
        }

        let trace = sim::trace();
        assert!(index_of(&trace, Kind::Write, PORTB_ADDR).is_empty());
        assert!(index_of(&trace, Kind::Read, PORTB_ADDR).is_empty());
        // SS bit never made an output either
        assert_eq!(sim::peek(DDRB_ADDR) & SS, 0);
    }

    #[test]
    fn test_gap_after_deselect() {
        sim::reset();
        sim::attach_spi_loopback();

        let mut spi = SpiSs::init(SpiConfig::default());
        let mut delay = RecordingDelay::default();

        assert_eq!(spi.transfer_with_gap(0x42, 10, &mut delay), 0x42);
        assert_eq!(delay.calls, [10]);

        assert_eq!(spi.transfer_with_gap(0x43, 0, &mut delay), 0x43);
        assert_eq!(delay.calls, [10]);
    }

    #[test]
    fn test_spi_bus_trait() {
        use embedded_hal::spi::SpiBus;

        sim::reset();
        sim::attach_spi_loopback();

        let mut spi = SpiNoSs::init(SpiConfig::default());

        let mut buf = [1, 2, 3];
        SpiBus::transfer_in_place(&mut spi, &mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3]);

        let mut read = [0u8; 4];
        SpiBus::transfer(&mut spi, &mut read, &[9, 8]).unwrap();
        assert_eq!(read, [9, 8, 0, 0]);

        sim::clear_trace();
        SpiBus::write(&mut spi, &[0x10, 0x20]).unwrap();
        assert_eq!(sim::writes_to(SPDR_ADDR), [0x10, 0x20]);

        let mut zeros = [0xEEu8; 2];
        SpiBus::read(&mut spi, &mut zeros).unwrap();
        assert_eq!(zeros, [0, 0]);
        SpiBus::flush(&mut spi).unwrap();
    }
}
