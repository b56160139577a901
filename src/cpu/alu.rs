//! Arithmetic and logic: ADC/SBC, the bitwise operators, shifts and rotates,
//! compares, and increments/decrements.

use crate::cpu::{Cpu, StatusFlag};
use crate::opcodes::Mode;

/// Bitwise or into the accumulator.
/// Flags: N Z
pub(crate) fn ora(cpu: &mut Cpu, mode: Mode) {
    cpu.a |= cpu.fetch_operand(mode);
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// Bitwise and into the accumulator.
/// Flags: N Z
pub(crate) fn and(cpu: &mut Cpu, mode: Mode) {
    cpu.a &= cpu.fetch_operand(mode);
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// Bitwise exclusive or into the accumulator.
/// Flags: N Z
pub(crate) fn eor(cpu: &mut Cpu, mode: Mode) {
    cpu.a ^= cpu.fetch_operand(mode);
    cpu.update_zero_and_negative_flag(cpu.a);
}

/// The 9-bit add shared by ADC and SBC: A + operand + carry-in.
///
/// Carry is the 9th bit of the sum. Overflow is the signed misprediction
/// bit: set when both inputs agree in sign and the result does not, which is
/// the `(A ^ r) & (M ^ r) & 0x80` formulation.
fn add_with_carry(cpu: &mut Cpu, operand: u8) {
    let sum = cpu.a as u16 + operand as u16 + cpu.get_carry() as u16;
    let result = sum as u8;

    cpu.set_status_flag(StatusFlag::Carry, sum > 0xff);
    cpu.set_status_flag(
        StatusFlag::Overflow,
        (cpu.a ^ result) & (operand ^ result) & 0x80 != 0,
    );
    cpu.a = result;
    cpu.update_zero_and_negative_flag(result);
}

/// Add with carry.
/// Flags: N V Z C
pub(crate) fn adc(cpu: &mut Cpu, mode: Mode) {
    let operand = cpu.fetch_operand(mode);
    add_with_carry(cpu, operand);
}

/// Subtract with carry. Subtraction is addition of the operand's one's
/// complement, with the carry flag supplying the +1 that completes the two's
/// complement. The flags fall out of the same 9-bit add.
/// Flags: N V Z C
pub(crate) fn sbc(cpu: &mut Cpu, mode: Mode) {
    let operand = cpu.fetch_operand(mode);
    add_with_carry(cpu, !operand);
}

/// Compare a register against the operand without modifying either. Carry
/// means no borrow (register >= operand); N and Z come from the 8-bit
/// difference.
fn compare(cpu: &mut Cpu, mode: Mode, register: u8) {
    let operand = cpu.fetch_operand(mode);
    cpu.set_status_flag(StatusFlag::Carry, register >= operand);
    cpu.update_zero_and_negative_flag(register.wrapping_sub(operand));
}

/// Compare with A. Flags: N Z C
pub(crate) fn cmp(cpu: &mut Cpu, mode: Mode) {
    let register = cpu.a;
    compare(cpu, mode, register);
}

/// Compare with X. Flags: N Z C
pub(crate) fn cpx(cpu: &mut Cpu, mode: Mode) {
    let register = cpu.x;
    compare(cpu, mode, register);
}

/// Compare with Y. Flags: N Z C
pub(crate) fn cpy(cpu: &mut Cpu, mode: Mode) {
    let register = cpu.y;
    compare(cpu, mode, register);
}

/// Increment a memory cell.
/// Flags: N Z
pub(crate) fn inc(cpu: &mut Cpu, mode: Mode) {
    let address = cpu.operand_address(mode);
    let result = cpu.bus.borrow().read_u8(address).wrapping_add(1);
    cpu.bus.borrow_mut().set_u8(address, result);
    cpu.update_zero_and_negative_flag(result);
}

/// Decrement a memory cell.
/// Flags: N Z
pub(crate) fn dec(cpu: &mut Cpu, mode: Mode) {
    let address = cpu.operand_address(mode);
    let result = cpu.bus.borrow().read_u8(address).wrapping_sub(1);
    cpu.bus.borrow_mut().set_u8(address, result);
    cpu.update_zero_and_negative_flag(result);
}

/// Increment X. Flags: N Z
pub(crate) fn inx(cpu: &mut Cpu, _mode: Mode) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.update_zero_and_negative_flag(cpu.x);
}

/// Increment Y. Flags: N Z
pub(crate) fn iny(cpu: &mut Cpu, _mode: Mode) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.update_zero_and_negative_flag(cpu.y);
}

/// Decrement X. Flags: N Z
pub(crate) fn dex(cpu: &mut Cpu, _mode: Mode) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.update_zero_and_negative_flag(cpu.x);
}

/// Decrement Y. Flags: N Z
pub(crate) fn dey(cpu: &mut Cpu, _mode: Mode) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.update_zero_and_negative_flag(cpu.y);
}

/// Shift left, on the accumulator or in memory. The old bit 7 lands in the
/// carry.
/// Flags: N Z C
pub(crate) fn asl(cpu: &mut Cpu, mode: Mode) {
    let target = cpu.operand_target(mode);
    let operand = cpu.read_target(target);
    let result = operand << 1;
    cpu.set_status_flag(StatusFlag::Carry, operand & 0x80 != 0);
    cpu.update_zero_and_negative_flag(result);
    cpu.write_target(target, result);
}

/// Shift right. The old bit 0 lands in the carry; bit 7 of the result is
/// always 0, so N clears.
/// Flags: N Z C
pub(crate) fn lsr(cpu: &mut Cpu, mode: Mode) {
    let target = cpu.operand_target(mode);
    let operand = cpu.read_target(target);
    let result = operand >> 1;
    cpu.set_status_flag(StatusFlag::Carry, operand & 0x01 != 0);
    cpu.update_zero_and_negative_flag(result);
    cpu.write_target(target, result);
}

/// Rotate left through the carry: the old carry becomes bit 0 and the old
/// bit 7 becomes the carry.
/// Flags: N Z C
pub(crate) fn rol(cpu: &mut Cpu, mode: Mode) {
    let target = cpu.operand_target(mode);
    let operand = cpu.read_target(target);
    let result = (operand << 1) | cpu.get_carry();
    cpu.set_status_flag(StatusFlag::Carry, operand & 0x80 != 0);
    cpu.update_zero_and_negative_flag(result);
    cpu.write_target(target, result);
}

/// Rotate right through the carry: the old carry becomes bit 7 and the old
/// bit 0 becomes the carry.
/// Flags: N Z C
pub(crate) fn ror(cpu: &mut Cpu, mode: Mode) {
    let target = cpu.operand_target(mode);
    let operand = cpu.read_target(target);
    let result = (operand >> 1) | (cpu.get_carry() << 7);
    cpu.set_status_flag(StatusFlag::Carry, operand & 0x01 != 0);
    cpu.update_zero_and_negative_flag(result);
    cpu.write_target(target, result);
}
