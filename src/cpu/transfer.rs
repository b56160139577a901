//! Data movement: loads, stores, register-to-register transfers, and the
//! stack push/pull instructions.

use crate::cpu::{Cpu, StatusFlag};
use crate::opcodes::Mode;

/// Load the accumulator. Flags: N Z
pub(crate) fn lda(cpu: &mut Cpu, mode: Mode) {
    cpu.a = cpu.fetch_operand(mode);
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// Load X. Flags: N Z
pub(crate) fn ldx(cpu: &mut Cpu, mode: Mode) {
    cpu.x = cpu.fetch_operand(mode);
    cpu.update_zero_and_negative_flag(cpu.x);
}

/// Load Y. Flags: N Z
pub(crate) fn ldy(cpu: &mut Cpu, mode: Mode) {
    cpu.y = cpu.fetch_operand(mode);
    cpu.update_zero_and_negative_flag(cpu.y);
}

/// Store the accumulator. No flags.
pub(crate) fn sta(cpu: &mut Cpu, mode: Mode) {
    let address = cpu.operand_address(mode);
    cpu.bus.borrow_mut().set_u8(address, cpu.a);
}

/// Store X. No flags.
pub(crate) fn stx(cpu: &mut Cpu, mode: Mode) {
    let address = cpu.operand_address(mode);
    cpu.bus.borrow_mut().set_u8(address, cpu.x);
}

/// Store Y. No flags.
pub(crate) fn sty(cpu: &mut Cpu, mode: Mode) {
    let address = cpu.operand_address(mode);
    cpu.bus.borrow_mut().set_u8(address, cpu.y);
}

/// A -> X. Flags: N Z
pub(crate) fn tax(cpu: &mut Cpu, _mode: Mode) {
    cpu.x = cpu.a;
    cpu.update_zero_and_negative_flag(cpu.x);
}

/// A -> Y. Flags: N Z
pub(crate) fn tay(cpu: &mut Cpu, _mode: Mode) {
    cpu.y = cpu.a;
    cpu.update_zero_and_negative_flag(cpu.y);
}

/// X -> A. Flags: N Z
pub(crate) fn txa(cpu: &mut Cpu, _mode: Mode) {
    cpu.a = cpu.x;
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// Y -> A. Flags: N Z
pub(crate) fn tya(cpu: &mut Cpu, _mode: Mode) {
    cpu.a = cpu.y;
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// S -> X. Flags: N Z
pub(crate) fn tsx(cpu: &mut Cpu, _mode: Mode) {
    cpu.x = cpu.s;
    cpu.update_zero_and_negative_flag(cpu.x);
}

/// X -> S. The one transfer that touches no flags.
pub(crate) fn txs(cpu: &mut Cpu, _mode: Mode) {
    cpu.s = cpu.x;
}

/// Push the accumulator. No flags.
pub(crate) fn pha(cpu: &mut Cpu, _mode: Mode) {
    cpu.push_u8(cpu.a);
}

/// Pull into the accumulator. Flags: N Z
pub(crate) fn pla(cpu: &mut Cpu, _mode: Mode) {
    cpu.a = cpu.pull_u8();
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// Push the status register. The pushed copy always has the break bit and
/// bit 5 set; that is a property of the copy, not of the register.
pub(crate) fn php(cpu: &mut Cpu, _mode: Mode) {
    cpu.push_u8(cpu.p | StatusFlag::Break as u8 | StatusFlag::Unused as u8);
}

/// Pull the status register. The break bit is discarded and bit 5 continues
/// to read as 1.
pub(crate) fn plp(cpu: &mut Cpu, _mode: Mode) {
    let pulled = cpu.pull_u8();
    cpu.p = (pulled & !(StatusFlag::Break as u8)) | StatusFlag::Unused as u8;
}
