//! Control flow and flag manipulation: branches, jumps and subroutines, the
//! BRK software interrupt, BIT, and the flag set/clear instructions.

use crate::constants::InterruptVectors;
use crate::cpu::{Cpu, StatusFlag};
use crate::opcodes::Mode;

/// Shared body for the eight conditional branches. The operand byte is
/// always consumed so the program counter stays in sync; the jump itself
/// only happens when the condition holds.
fn branch_if(cpu: &mut Cpu, mode: Mode, condition: bool) {
    let target = cpu.operand_address(mode);
    if condition {
        cpu.pc = target;
    }
}

/// Branch on carry clear.
pub(crate) fn bcc(cpu: &mut Cpu, mode: Mode) {
    branch_if(cpu, mode, !cpu.is_status_flag_set(StatusFlag::Carry));
}

/// Branch on carry set.
pub(crate) fn bcs(cpu: &mut Cpu, mode: Mode) {
    branch_if(cpu, mode, cpu.is_status_flag_set(StatusFlag::Carry));
}

/// Branch on zero set.
pub(crate) fn beq(cpu: &mut Cpu, mode: Mode) {
    branch_if(cpu, mode, cpu.is_status_flag_set(StatusFlag::Zero));
}

/// Branch on zero clear.
pub(crate) fn bne(cpu: &mut Cpu, mode: Mode) {
    branch_if(cpu, mode, !cpu.is_status_flag_set(StatusFlag::Zero));
}

/// Branch on negative set.
pub(crate) fn bmi(cpu: &mut Cpu, mode: Mode) {
    branch_if(cpu, mode, cpu.is_status_flag_set(StatusFlag::Negative));
}

/// Branch on negative clear.
pub(crate) fn bpl(cpu: &mut Cpu, mode: Mode) {
    branch_if(cpu, mode, !cpu.is_status_flag_set(StatusFlag::Negative));
}

/// Branch on overflow clear.
pub(crate) fn bvc(cpu: &mut Cpu, mode: Mode) {
    branch_if(cpu, mode, !cpu.is_status_flag_set(StatusFlag::Overflow));
}

/// Branch on overflow set.
pub(crate) fn bvs(cpu: &mut Cpu, mode: Mode) {
    branch_if(cpu, mode, cpu.is_status_flag_set(StatusFlag::Overflow));
}

/// Jump. The indirect form goes through the resolver, which reproduces the
/// page-boundary pointer quirk.
pub(crate) fn jmp(cpu: &mut Cpu, mode: Mode) {
    cpu.pc = cpu.operand_address(mode);
}

/// Jump to subroutine. The pushed return address points at the JSR's own
/// final byte; RTS adds one on the way back.
pub(crate) fn jsr(cpu: &mut Cpu, mode: Mode) {
    let target = cpu.operand_address(mode);
    cpu.push_u16(cpu.pc.wrapping_sub(1));
    cpu.pc = target;
}

/// Return from subroutine.
pub(crate) fn rts(cpu: &mut Cpu, _mode: Mode) {
    cpu.pc = cpu.pull_u16().wrapping_add(1);
}

/// Software interrupt: push the address after the signature byte, push the
/// status with the break bit set, disable interrupts, and vector through
/// 0xfffe. The live break flag is also set so a driver loop can see that a
/// BRK fired.
pub(crate) fn brk(cpu: &mut Cpu, _mode: Mode) {
    cpu.push_u16(cpu.pc.wrapping_add(1));
    cpu.push_u8(cpu.p | StatusFlag::Break as u8 | StatusFlag::Unused as u8);
    cpu.set_status_flag(StatusFlag::Break, true);
    cpu.set_status_flag(StatusFlag::InterruptDisable, true);
    cpu.pc = cpu
        .bus
        .borrow()
        .read_u16(InterruptVectors::IrqBrkVector as u16);
}

/// Return from interrupt: pull the status (break bit discarded), then the
/// program counter. Unlike RTS there is no +1 adjustment.
pub(crate) fn rti(cpu: &mut Cpu, _mode: Mode) {
    let pulled = cpu.pull_u8();
    cpu.p = (pulled & !(StatusFlag::Break as u8)) | StatusFlag::Unused as u8;
    cpu.pc = cpu.pull_u16();
}

/// Bit test: Z from A & operand, N and V copied straight from the operand's
/// top two bits.
pub(crate) fn bit(cpu: &mut Cpu, mode: Mode) {
    let operand = cpu.fetch_operand(mode);
    cpu.set_status_flag(StatusFlag::Zero, cpu.a & operand == 0);
    cpu.set_status_flag(StatusFlag::Negative, operand & 0x80 != 0);
    cpu.set_status_flag(StatusFlag::Overflow, operand & 0x40 != 0);
}

/// Clear carry.
pub(crate) fn clc(cpu: &mut Cpu, _mode: Mode) {
    cpu.set_status_flag(StatusFlag::Carry, false);
}

/// Set carry.
pub(crate) fn sec(cpu: &mut Cpu, _mode: Mode) {
    cpu.set_status_flag(StatusFlag::Carry, true);
}

/// Clear interrupt disable.
pub(crate) fn cli(cpu: &mut Cpu, _mode: Mode) {
    cpu.set_status_flag(StatusFlag::InterruptDisable, false);
}

/// Set interrupt disable.
pub(crate) fn sei(cpu: &mut Cpu, _mode: Mode) {
    cpu.set_status_flag(StatusFlag::InterruptDisable, true);
}

/// Clear decimal mode. The flag is tracked but arithmetic ignores it on
/// this variant.
pub(crate) fn cld(cpu: &mut Cpu, _mode: Mode) {
    cpu.set_status_flag(StatusFlag::Decimal, false);
}

/// Set decimal mode.
pub(crate) fn sed(cpu: &mut Cpu, _mode: Mode) {
    cpu.set_status_flag(StatusFlag::Decimal, true);
}

/// Clear overflow. There is no matching set instruction.
pub(crate) fn clv(cpu: &mut Cpu, _mode: Mode) {
    cpu.set_status_flag(StatusFlag::Overflow, false);
}

/// No operation.
pub(crate) fn nop(_cpu: &mut Cpu, _mode: Mode) {}
