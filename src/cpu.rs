use std::fmt;

use crate::bus::SharedBus;
use crate::constants::{memory_range, InterruptVectors};
use crate::opcodes::{Mode, OpCode, OPERATIONS};

pub(crate) mod alu;
pub(crate) mod control;
pub(crate) mod transfer;

#[cfg(test)]
#[macro_use]
mod test_helpers;

// Test must be after test_helpers, rust format tries to move things around.
#[cfg(test)]
mod test;

/// Status register bit masks.
///
///   7  bit  0
///   ---- ----
///   NV1B DIZC
///   |||| ||||
///   |||| |||+- Carry
///   |||| ||+-- Zero
///   |||| |+--- Interrupt disable
///   |||| +---- Decimal (tracked but has no arithmetic effect on this variant)
///   |||+------ Break (only meaningful in the pushed copy)
///   ||+------- Always reads as 1
///   |+-------- Overflow
///   +--------- Negative
#[rustfmt::skip]
#[derive(Debug, Clone, Copy)]
pub enum StatusFlag {
    Carry            = 0b0000_0001,
    Zero             = 0b0000_0010,
    InterruptDisable = 0b0000_0100,
    Decimal          = 0b0000_1000,
    Break            = 0b0001_0000,
    Unused           = 0b0010_0000,
    Overflow         = 0b0100_0000,
    Negative         = 0b1000_0000,
}

/// Status byte after a reset: interrupts disabled, everything else clear.
/// The unused bit is not real storage but is kept set so the register
/// serialises correctly without special cases.
pub const RESET_STATUS: u8 = StatusFlag::Unused as u8 | StatusFlag::InterruptDisable as u8;

/// The one fatal condition the core can hit. The bus is total and all
/// arithmetic wraps, so the only way a step can fail is an opcode byte that
/// the 6502 never documented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    UndefinedOpcode { opcode: u8, pc: u16 },
}

impl fmt::Display for CpuError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CpuError::UndefinedOpcode { opcode, pc } => {
                write!(f, "undefined opcode {:#04x} at {:#06x}", opcode, pc)
            }
        }
    }
}

impl std::error::Error for CpuError {}

/// Where a resolved operand lives. Shift and rotate instructions work on
/// either the accumulator or a memory cell, so the resolver hands back a
/// target and the instruction reads and writes through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Memory(u16),
    Accumulator,
}

/// The MOS 6502 state machine: registers, flags, and a reference to the bus
/// it fetches and stores through.
pub struct Cpu {
    pub bus: SharedBus,
    /// Accumulator.
    pub a: u8,
    /// Index registers.
    pub x: u8,
    pub y: u8,
    /// Program counter.
    pub pc: u16,
    /// Stack pointer; offset into page 0x01, grows down.
    pub s: u8,
    /// Packed status register. Bit 5 stays set.
    pub p: u8,
    /// Total cycles consumed, using per-opcode base costs.
    pub cycles: u64,
    /// Instructions executed so far.
    pub steps: u64,
    /// Stop `run` after this many instructions. Guards test programs that
    /// never reach a BRK.
    pub max_steps: Option<u64>,
}

impl Cpu {
    /// The register file is architecturally undefined at power-on; zeroed
    /// registers plus `RESET_STATUS` is the conventional stand-in. Call
    /// `reset` to start executing through the reset vector.
    pub fn new(bus: SharedBus) -> Cpu {
        Cpu {
            bus,
            a: 0,
            x: 0,
            y: 0,
            pc: 0,
            s: 0xfd,
            p: RESET_STATUS,
            cycles: 0,
            steps: 0,
            max_steps: None,
        }
    }

    /// Load the program counter from the reset vector and put the registers
    /// into the conventional post-reset state.
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.s = 0xfd;
        self.p = RESET_STATUS;
        self.pc = self
            .bus
            .borrow()
            .read_u16(InterruptVectors::ResetVector as u16);
    }

    /// Read the byte at the program counter without advancing.
    pub fn peek_u8(&self) -> u8 {
        self.bus.borrow().read_u8(self.pc)
    }

    fn next_u8(&mut self) -> u8 {
        let value = self.bus.borrow().read_u8(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    fn next_u16(&mut self) -> u16 {
        let value = self.bus.borrow().read_u16(self.pc);
        self.pc = self.pc.wrapping_add(2);
        value
    }

    /// Execute one instruction: fetch the opcode, look it up, resolve the
    /// operand, run it. Returns the base cycle count of the opcode.
    pub fn step(&mut self) -> Result<u8, CpuError> {
        let pc = self.pc;
        let opcode = self.next_u8();
        let operation = match OPERATIONS[opcode as usize] {
            Some(operation) => operation,
            None => return Err(CpuError::UndefinedOpcode { opcode, pc }),
        };
        (operation.run)(self, operation.mode);
        self.cycles += operation.cycles as u64;
        self.steps += 1;
        Ok(operation.cycles)
    }

    /// Step until the predicate holds. The predicate is checked before each
    /// instruction, so a freshly reset CPU with a true predicate runs
    /// nothing.
    pub fn run_until<F>(&mut self, predicate: F) -> Result<(), CpuError>
    where
        F: Fn(&Cpu) -> bool,
    {
        while !predicate(self) {
            self.step()?;
        }
        Ok(())
    }

    /// Convenience driver for self-contained programs: step until the next
    /// opcode byte is BRK, leaving the BRK unexecuted so the registers still
    /// show the program's result. Hosts that want BRK's push-and-vector
    /// behavior use `step` or `run_until` directly.
    pub fn run(&mut self) -> Result<(), CpuError> {
        while self.peek_u8() != OpCode::BRK as u8 {
            self.step()?;

            if let Some(max_steps) = self.max_steps {
                if self.steps >= max_steps {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Resolve an addressing mode into an operand target, consuming the
    /// operand bytes and advancing the program counter.
    pub(crate) fn operand_target(&mut self, mode: Mode) -> Target {
        match mode {
            Mode::Accumulator => Target::Accumulator,
            _ => Target::Memory(self.operand_address(mode)),
        }
    }

    /// Effective-address half of the resolver. Only meaningful for modes
    /// that name a memory location.
    pub(crate) fn operand_address(&mut self, mode: Mode) -> u16 {
        match mode {
            Mode::Absolute => self.next_u16(),
            Mode::AbsoluteX => self.next_u16().wrapping_add(self.x as u16),
            Mode::AbsoluteY => self.next_u16().wrapping_add(self.y as u16),
            // The operand byte itself is the value, so its own address is
            // the effective address.
            Mode::Immediate => {
                let address = self.pc;
                self.pc = self.pc.wrapping_add(1);
                address
            }
            // Hardware quirk: the pointer's high byte is fetched without
            // carrying into the page, so a pointer at $xxff wraps to $xx00.
            Mode::Indirect => {
                let pointer = self.next_u16();
                let low = self.bus.borrow().read_u8(pointer);
                let high = if pointer & 0x00ff == 0x00ff {
                    self.bus.borrow().read_u8(pointer & 0xff00)
                } else {
                    self.bus.borrow().read_u8(pointer.wrapping_add(1))
                };
                u16::from_le_bytes([low, high])
            }
            Mode::IndirectX => {
                let zero_page = self.next_u8().wrapping_add(self.x);
                self.read_zero_page_u16(zero_page)
            }
            Mode::IndirectY => {
                let zero_page = self.next_u8();
                self.read_zero_page_u16(zero_page)
                    .wrapping_add(self.y as u16)
            }
            // Signed offset from the instruction that follows the branch.
            Mode::Relative => {
                let offset = self.next_u8() as i8;
                self.pc.wrapping_add(offset as u16)
            }
            Mode::ZeroPage => self.next_u8() as u16,
            Mode::ZeroPageX => self.next_u8().wrapping_add(self.x) as u16,
            Mode::ZeroPageY => self.next_u8().wrapping_add(self.y) as u16,
            Mode::Implied | Mode::Accumulator => {
                panic!("attempted to resolve an operand address for {:?}", mode)
            }
        }
    }

    /// Resolve and read in one go, for instructions that only consume their
    /// operand.
    pub(crate) fn fetch_operand(&mut self, mode: Mode) -> u8 {
        match mode {
            Mode::Accumulator => self.a,
            _ => {
                let address = self.operand_address(mode);
                self.bus.borrow().read_u8(address)
            }
        }
    }

    /// Both bytes of a zero-page pointer come from page zero; the second
    /// read wraps rather than reaching address 0x0100.
    fn read_zero_page_u16(&self, zero_page: u8) -> u16 {
        let bus = self.bus.borrow();
        let low = bus.read_u8(zero_page as u16);
        let high = bus.read_u8(zero_page.wrapping_add(1) as u16);
        u16::from_le_bytes([low, high])
    }

    pub(crate) fn read_target(&self, target: Target) -> u8 {
        match target {
            Target::Accumulator => self.a,
            Target::Memory(address) => self.bus.borrow().read_u8(address),
        }
    }

    pub(crate) fn write_target(&mut self, target: Target, value: u8) {
        match target {
            Target::Accumulator => self.a = value,
            Target::Memory(address) => self.bus.borrow_mut().set_u8(address, value),
        }
    }

    pub fn set_status_flag(&mut self, status_flag: StatusFlag, value: bool) {
        if value {
            self.p |= status_flag as u8;
        } else {
            self.p &= !(status_flag as u8);
        }
    }

    pub fn is_status_flag_set(&self, status_flag: StatusFlag) -> bool {
        self.p & status_flag as u8 == status_flag as u8
    }

    /// The externally visible status byte. Bit 5 always reads as 1.
    pub fn status(&self) -> u8 {
        self.p | StatusFlag::Unused as u8
    }

    /// The carry flag as a 0 or 1, for feeding into 9-bit arithmetic.
    pub(crate) fn get_carry(&self) -> u8 {
        self.p & StatusFlag::Carry as u8
    }

    /// The zero and negative flags always travel together: Z mirrors an
    /// all-zero result and N mirrors its top bit.
    pub(crate) fn update_zero_and_negative_flag(&mut self, value: u8) {
        self.set_status_flag(StatusFlag::Zero, value == 0);
        self.set_status_flag(StatusFlag::Negative, value & 0x80 != 0);
    }

    pub(crate) fn push_u8(&mut self, value: u8) {
        let address = u16::from_le_bytes([self.s, memory_range::STACK_PAGE]);
        self.bus.borrow_mut().set_u8(address, value);
        self.s = self.s.wrapping_sub(1);
    }

    pub(crate) fn pull_u8(&mut self) -> u8 {
        self.s = self.s.wrapping_add(1);
        let address = u16::from_le_bytes([self.s, memory_range::STACK_PAGE]);
        self.bus.borrow().read_u8(address)
    }

    /// High byte first, so the two bytes sit in memory little-endian.
    pub(crate) fn push_u16(&mut self, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.push_u8(high);
        self.push_u8(low);
    }

    pub(crate) fn pull_u16(&mut self) -> u16 {
        let low = self.pull_u8();
        let high = self.pull_u8();
        u16::from_le_bytes([low, high])
    }
}
