//! Simulated I/O space for host tests
//!
//! Each test thread gets its own 256-byte register file and access trace.
//! Tests must call [`reset`] first: with `--test-threads=1` every test runs
//! on the same thread.
//!
//! Peripheral side effects modelled:
//! - port loopback: writes to an output register are mirrored into the
//!   matching input register;
//! - SPI: a write to the data register completes immediately, sets the
//!   completion flag and latches either the written byte (MISO wired to
//!   MOSI) or a fixed reply. Reading the data register clears the flag.

extern crate std;

use std::cell::RefCell;
use std::vec::Vec;

use crate::register::{IoSpace, Reg};
use crate::spi::SpiBlock;
use crate::timer::TimerBlock;
use avrkit_hal::Bit;

/// Kind of register access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Read,
    Write,
}

/// One traced register access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Access {
    pub kind: Kind,
    pub addr: usize,
    pub value: u8,
}

#[derive(Clone, Copy)]
struct SpiModel {
    data: usize,
    status: usize,
    complete: u8,
    reply: Option<u8>,
}

struct State {
    memory: [u8; 256],
    trace: Vec<Access>,
    loopbacks: Vec<(usize, usize)>,
    spi: Option<SpiModel>,
}

impl State {
    const fn new() -> Self {
        Self {
            memory: [0; 256],
            trace: Vec::new(),
            loopbacks: Vec::new(),
            spi: None,
        }
    }
}

std::thread_local! {
    static STATE: RefCell<State> = const { RefCell::new(State::new()) };
}

/// The simulated space
pub struct Sim;

impl IoSpace for Sim {
    fn read(addr: usize) -> u8 {
        STATE.with(|state| {
            let mut state = state.borrow_mut();
            let value = state.memory[addr];
            state.trace.push(Access {
                kind: Kind::Read,
                addr,
                value,
            });
            if let Some(spi) = state.spi {
                if addr == spi.data {
                    state.memory[spi.status] &= !spi.complete;
                }
            }
            value
        })
    }

    fn write(addr: usize, value: u8) {
        STATE.with(|state| {
            let mut state = state.borrow_mut();
            state.memory[addr] = value;
            state.trace.push(Access {
                kind: Kind::Write,
                addr,
                value,
            });
            let mirrors: Vec<usize> = state
                .loopbacks
                .iter()
                .filter(|(output, _)| *output == addr)
                .map(|(_, input)| *input)
                .collect();
            for input in mirrors {
                state.memory[input] = value;
            }
            if let Some(spi) = state.spi {
                if addr == spi.data {
                    if let Some(reply) = spi.reply {
                        state.memory[spi.data] = reply;
                    }
                    state.memory[spi.status] |= spi.complete;
                }
            }
        })
    }
}

/// Clear memory, trace and peripheral models
pub fn reset() {
    STATE.with(|state| *state.borrow_mut() = State::new());
}

/// Set a cell without tracing or side effects
pub fn poke(addr: usize, value: u8) {
    STATE.with(|state| state.borrow_mut().memory[addr] = value);
}

/// Read a cell without tracing or side effects
pub fn peek(addr: usize) -> u8 {
    STATE.with(|state| state.borrow().memory[addr])
}

/// All accesses since the last [`reset`] or [`clear_trace`]
pub fn trace() -> Vec<Access> {
    STATE.with(|state| state.borrow().trace.clone())
}

/// Writes only, in order
pub fn writes_to(addr: usize) -> Vec<u8> {
    trace()
        .into_iter()
        .filter(|a| a.kind == Kind::Write && a.addr == addr)
        .map(|a| a.value)
        .collect()
}

pub fn clear_trace() {
    STATE.with(|state| state.borrow_mut().trace.clear());
}

/// Mirror writes to `output` into `input`
pub fn attach_port_loopback(output: usize, input: usize) {
    STATE.with(|state| state.borrow_mut().loopbacks.push((output, input)));
}

/// SPI slave that echoes MOSI back on MISO
pub fn attach_spi_loopback() {
    attach_spi(None);
}

/// SPI slave that always answers `reply`
pub fn attach_spi_slave(reply: u8) {
    attach_spi(Some(reply));
}

fn attach_spi(reply: Option<u8>) {
    STATE.with(|state| {
        state.borrow_mut().spi = Some(SpiModel {
            data: SPDR_ADDR,
            status: SPSR_ADDR,
            complete: SimSpi::COMPLETE.mask(),
            reply,
        })
    });
}

// Register map of the simulated chip (ATmega328P layout)

pub const PINB_ADDR: usize = 0x23;
pub const DDRB_ADDR: usize = 0x24;
pub const PORTB_ADDR: usize = 0x25;
pub const TIFR0_ADDR: usize = 0x35;
pub const EIMSK_ADDR: usize = 0x3D;
pub const TCCR0A_ADDR: usize = 0x44;
pub const TCCR0B_ADDR: usize = 0x45;
pub const TCNT0_ADDR: usize = 0x46;
pub const OCR0A_ADDR: usize = 0x47;
pub const SPCR_ADDR: usize = 0x4C;
pub const SPSR_ADDR: usize = 0x4D;
pub const SPDR_ADDR: usize = 0x4E;
pub const EICRA_ADDR: usize = 0x69;
pub const TIMSK0_ADDR: usize = 0x6E;

pub type PINB = Reg<Sim, PINB_ADDR>;
pub type DDRB = Reg<Sim, DDRB_ADDR>;
pub type PORTB = Reg<Sim, PORTB_ADDR>;
pub type EIMSK = Reg<Sim, EIMSK_ADDR>;
pub type EICRA = Reg<Sim, EICRA_ADDR>;

/// SPI block of the simulated chip
pub struct SimSpi;

impl SpiBlock for SimSpi {
    type Control = Reg<Sim, SPCR_ADDR>;
    type Status = Reg<Sim, SPSR_ADDR>;
    type Data = Reg<Sim, SPDR_ADDR>;

    const ENABLE: Bit = Bit::B6;
    const MASTER: Bit = Bit::B4;
    const DOUBLE_SPEED: Bit = Bit::B0;
    const COMPLETE: Bit = Bit::B7;
}

/// Timer/counter 0 of the simulated chip
pub struct SimTimer;

impl TimerBlock for SimTimer {
    type ControlA = Reg<Sim, TCCR0A_ADDR>;
    type ControlB = Reg<Sim, TCCR0B_ADDR>;
    type Count = Reg<Sim, TCNT0_ADDR>;
    type CompareA = Reg<Sim, OCR0A_ADDR>;
    type InterruptMask = Reg<Sim, TIMSK0_ADDR>;
    type InterruptFlags = Reg<Sim, TIFR0_ADDR>;

    const OVERFLOW: Bit = Bit::B0;
    const COMPARE_A: Bit = Bit::B1;
}
