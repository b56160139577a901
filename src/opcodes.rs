use crate::cpu::{alu, control, transfer, Cpu};

/// The thirteen documented addressing modes. The resolver in the CPU turns
/// one of these plus the bytes after the opcode into an operand target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Absolute,    // $0000
    AbsoluteX,   // $0000,x
    AbsoluteY,   // $0000,y
    Accumulator, // a
    Immediate,   // #$00
    Implied,     //
    Indirect,    // ($0000)
    IndirectX,   // ($00,x)
    IndirectY,   // ($00),y
    Relative,    // $00 (signed offset from the next instruction)
    ZeroPage,    // $00
    ZeroPageX,   // $00,x
    ZeroPageY,   // $00,y
}

/// What the assembler can tell about the mode from the operand syntax alone.
/// A one-byte operand could be zero page or a relative branch target; the
/// instruction decides which opcode it becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMode {
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Accumulator,
    Immediate,
    Indirect,
    IndirectX,
    IndirectY,
    None,
    ZeroPageOrRelative,
    ZeroPageX,
    ZeroPageY,
}

/// The 56 documented mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    // Arithmetic and logic
    ADC,
    AND,
    ASL,
    BIT,
    CMP,
    CPX,
    CPY,
    DEC,
    DEX,
    DEY,
    EOR,
    INC,
    INX,
    INY,
    LSR,
    ORA,
    ROL,
    ROR,
    SBC,
    // Loads, stores, transfers, stack
    LDA,
    LDX,
    LDY,
    PHA,
    PHP,
    PLA,
    PLP,
    STA,
    STX,
    STY,
    TAX,
    TAY,
    TSX,
    TXA,
    TXS,
    TYA,
    // Branches, jumps, flags
    BCC,
    BCS,
    BEQ,
    BMI,
    BNE,
    BPL,
    BRK,
    BVC,
    BVS,
    CLC,
    CLD,
    CLI,
    CLV,
    JMP,
    JSR,
    NOP,
    RTI,
    RTS,
    SEC,
    SED,
    SEI,
}

pub fn match_instruction(string: &str) -> Option<Instruction> {
    let instruction = match string.to_lowercase().as_ref() {
        "adc" => Instruction::ADC,
        "and" => Instruction::AND,
        "asl" => Instruction::ASL,
        "bcc" => Instruction::BCC,
        "bcs" => Instruction::BCS,
        "beq" => Instruction::BEQ,
        "bit" => Instruction::BIT,
        "bmi" => Instruction::BMI,
        "bne" => Instruction::BNE,
        "bpl" => Instruction::BPL,
        "brk" => Instruction::BRK,
        "bvc" => Instruction::BVC,
        "bvs" => Instruction::BVS,
        "clc" => Instruction::CLC,
        "cld" => Instruction::CLD,
        "cli" => Instruction::CLI,
        "clv" => Instruction::CLV,
        "cmp" => Instruction::CMP,
        "cpx" => Instruction::CPX,
        "cpy" => Instruction::CPY,
        "dec" => Instruction::DEC,
        "dex" => Instruction::DEX,
        "dey" => Instruction::DEY,
        "eor" => Instruction::EOR,
        "inc" => Instruction::INC,
        "inx" => Instruction::INX,
        "iny" => Instruction::INY,
        "jmp" => Instruction::JMP,
        "jsr" => Instruction::JSR,
        "lda" => Instruction::LDA,
        "ldx" => Instruction::LDX,
        "ldy" => Instruction::LDY,
        "lsr" => Instruction::LSR,
        "nop" => Instruction::NOP,
        "ora" => Instruction::ORA,
        "pha" => Instruction::PHA,
        "php" => Instruction::PHP,
        "pla" => Instruction::PLA,
        "plp" => Instruction::PLP,
        "rol" => Instruction::ROL,
        "ror" => Instruction::ROR,
        "rti" => Instruction::RTI,
        "rts" => Instruction::RTS,
        "sbc" => Instruction::SBC,
        "sec" => Instruction::SEC,
        "sed" => Instruction::SED,
        "sei" => Instruction::SEI,
        "sta" => Instruction::STA,
        "stx" => Instruction::STX,
        "sty" => Instruction::STY,
        "tax" => Instruction::TAX,
        "tay" => Instruction::TAY,
        "tsx" => Instruction::TSX,
        "txa" => Instruction::TXA,
        "txs" => Instruction::TXS,
        "tya" => Instruction::TYA,
        _ => return None,
    };
    Some(instruction)
}

/// Every documented opcode byte. The suffix is the addressing mode using the
/// usual shorthand (imm, zp, zpx, zpy, abs, abx, aby, izx, izy, ind, rel, a).
#[allow(non_camel_case_types)]
pub enum OpCode {
    BRK = 0x00,
    ORA_izx = 0x01,
    ORA_zp = 0x05,
    ASL_zp = 0x06,
    PHP = 0x08,
    ORA_imm = 0x09,
    ASL_a = 0x0a,
    ORA_abs = 0x0d,
    ASL_abs = 0x0e,
    BPL_rel = 0x10,
    ORA_izy = 0x11,
    ORA_zpx = 0x15,
    ASL_zpx = 0x16,
    CLC = 0x18,
    ORA_aby = 0x19,
    ORA_abx = 0x1d,
    ASL_abx = 0x1e,
    JSR_abs = 0x20,
    AND_izx = 0x21,
    BIT_zp = 0x24,
    AND_zp = 0x25,
    ROL_zp = 0x26,
    PLP = 0x28,
    AND_imm = 0x29,
    ROL_a = 0x2a,
    BIT_abs = 0x2c,
    AND_abs = 0x2d,
    ROL_abs = 0x2e,
    BMI_rel = 0x30,
    AND_izy = 0x31,
    AND_zpx = 0x35,
    ROL_zpx = 0x36,
    SEC = 0x38,
    AND_aby = 0x39,
    AND_abx = 0x3d,
    ROL_abx = 0x3e,
    RTI = 0x40,
    EOR_izx = 0x41,
    EOR_zp = 0x45,
    LSR_zp = 0x46,
    PHA = 0x48,
    EOR_imm = 0x49,
    LSR_a = 0x4a,
    JMP_abs = 0x4c,
    EOR_abs = 0x4d,
    LSR_abs = 0x4e,
    BVC_rel = 0x50,
    EOR_izy = 0x51,
    EOR_zpx = 0x55,
    LSR_zpx = 0x56,
    CLI = 0x58,
    EOR_aby = 0x59,
    EOR_abx = 0x5d,
    LSR_abx = 0x5e,
    RTS = 0x60,
    ADC_izx = 0x61,
    ADC_zp = 0x65,
    ROR_zp = 0x66,
    PLA = 0x68,
    ADC_imm = 0x69,
    ROR_a = 0x6a,
    JMP_ind = 0x6c,
    ADC_abs = 0x6d,
    ROR_abs = 0x6e,
    BVS_rel = 0x70,
    ADC_izy = 0x71,
    ADC_zpx = 0x75,
    ROR_zpx = 0x76,
    SEI = 0x78,
    ADC_aby = 0x79,
    ADC_abx = 0x7d,
    ROR_abx = 0x7e,
    STA_izx = 0x81,
    STY_zp = 0x84,
    STA_zp = 0x85,
    STX_zp = 0x86,
    DEY = 0x88,
    TXA = 0x8a,
    STY_abs = 0x8c,
    STA_abs = 0x8d,
    STX_abs = 0x8e,
    BCC_rel = 0x90,
    STA_izy = 0x91,
    STY_zpx = 0x94,
    STA_zpx = 0x95,
    STX_zpy = 0x96,
    TYA = 0x98,
    STA_aby = 0x99,
    TXS = 0x9a,
    STA_abx = 0x9d,
    LDY_imm = 0xa0,
    LDA_izx = 0xa1,
    LDX_imm = 0xa2,
    LDY_zp = 0xa4,
    LDA_zp = 0xa5,
    LDX_zp = 0xa6,
    TAY = 0xa8,
    LDA_imm = 0xa9,
    TAX = 0xaa,
    LDY_abs = 0xac,
    LDA_abs = 0xad,
    LDX_abs = 0xae,
    BCS_rel = 0xb0,
    LDA_izy = 0xb1,
    LDY_zpx = 0xb4,
    LDA_zpx = 0xb5,
    LDX_zpy = 0xb6,
    CLV = 0xb8,
    LDA_aby = 0xb9,
    TSX = 0xba,
    LDY_abx = 0xbc,
    LDA_abx = 0xbd,
    LDX_aby = 0xbe,
    CPY_imm = 0xc0,
    CMP_izx = 0xc1,
    CPY_zp = 0xc4,
    CMP_zp = 0xc5,
    DEC_zp = 0xc6,
    INY = 0xc8,
    CMP_imm = 0xc9,
    DEX = 0xca,
    CPY_abs = 0xcc,
    CMP_abs = 0xcd,
    DEC_abs = 0xce,
    BNE_rel = 0xd0,
    CMP_izy = 0xd1,
    CMP_zpx = 0xd5,
    DEC_zpx = 0xd6,
    CLD = 0xd8,
    CMP_aby = 0xd9,
    CMP_abx = 0xdd,
    DEC_abx = 0xde,
    CPX_imm = 0xe0,
    SBC_izx = 0xe1,
    CPX_zp = 0xe4,
    SBC_zp = 0xe5,
    INC_zp = 0xe6,
    INX = 0xe8,
    SBC_imm = 0xe9,
    NOP = 0xea,
    CPX_abs = 0xec,
    SBC_abs = 0xed,
    INC_abs = 0xee,
    BEQ_rel = 0xf0,
    SBC_izy = 0xf1,
    SBC_zpx = 0xf5,
    INC_zpx = 0xf6,
    SED = 0xf8,
    SBC_aby = 0xf9,
    SBC_abx = 0xfd,
    INC_abx = 0xfe,
}

/// Map the assembler's view of an instruction back onto an opcode byte. Only
/// documented combinations resolve; anything else is a programming error in
/// the source being assembled.
pub fn instruction_mode_to_op_code(
    instruction: &Instruction,
    mode: &TokenMode,
) -> Result<OpCode, String> {
    use Instruction::*;
    use TokenMode::*;
    Ok(match (instruction, mode) {
        (ADC, Immediate) => OpCode::ADC_imm,
        (ADC, ZeroPageOrRelative) => OpCode::ADC_zp,
        (ADC, ZeroPageX) => OpCode::ADC_zpx,
        (ADC, Absolute) => OpCode::ADC_abs,
        (ADC, AbsoluteX) => OpCode::ADC_abx,
        (ADC, AbsoluteY) => OpCode::ADC_aby,
        (ADC, IndirectX) => OpCode::ADC_izx,
        (ADC, IndirectY) => OpCode::ADC_izy,
        (AND, Immediate) => OpCode::AND_imm,
        (AND, ZeroPageOrRelative) => OpCode::AND_zp,
        (AND, ZeroPageX) => OpCode::AND_zpx,
        (AND, Absolute) => OpCode::AND_abs,
        (AND, AbsoluteX) => OpCode::AND_abx,
        (AND, AbsoluteY) => OpCode::AND_aby,
        (AND, IndirectX) => OpCode::AND_izx,
        (AND, IndirectY) => OpCode::AND_izy,
        (ASL, Accumulator) | (ASL, None) => OpCode::ASL_a,
        (ASL, ZeroPageOrRelative) => OpCode::ASL_zp,
        (ASL, ZeroPageX) => OpCode::ASL_zpx,
        (ASL, Absolute) => OpCode::ASL_abs,
        (ASL, AbsoluteX) => OpCode::ASL_abx,
        (BCC, ZeroPageOrRelative) => OpCode::BCC_rel,
        (BCS, ZeroPageOrRelative) => OpCode::BCS_rel,
        (BEQ, ZeroPageOrRelative) => OpCode::BEQ_rel,
        (BIT, ZeroPageOrRelative) => OpCode::BIT_zp,
        (BIT, Absolute) => OpCode::BIT_abs,
        (BMI, ZeroPageOrRelative) => OpCode::BMI_rel,
        (BNE, ZeroPageOrRelative) => OpCode::BNE_rel,
        (BPL, ZeroPageOrRelative) => OpCode::BPL_rel,
        (BRK, None) => OpCode::BRK,
        (BVC, ZeroPageOrRelative) => OpCode::BVC_rel,
        (BVS, ZeroPageOrRelative) => OpCode::BVS_rel,
        (CLC, None) => OpCode::CLC,
        (CLD, None) => OpCode::CLD,
        (CLI, None) => OpCode::CLI,
        (CLV, None) => OpCode::CLV,
        (CMP, Immediate) => OpCode::CMP_imm,
        (CMP, ZeroPageOrRelative) => OpCode::CMP_zp,
        (CMP, ZeroPageX) => OpCode::CMP_zpx,
        (CMP, Absolute) => OpCode::CMP_abs,
        (CMP, AbsoluteX) => OpCode::CMP_abx,
        (CMP, AbsoluteY) => OpCode::CMP_aby,
        (CMP, IndirectX) => OpCode::CMP_izx,
        (CMP, IndirectY) => OpCode::CMP_izy,
        (CPX, Immediate) => OpCode::CPX_imm,
        (CPX, ZeroPageOrRelative) => OpCode::CPX_zp,
        (CPX, Absolute) => OpCode::CPX_abs,
        (CPY, Immediate) => OpCode::CPY_imm,
        (CPY, ZeroPageOrRelative) => OpCode::CPY_zp,
        (CPY, Absolute) => OpCode::CPY_abs,
        (DEC, ZeroPageOrRelative) => OpCode::DEC_zp,
        (DEC, ZeroPageX) => OpCode::DEC_zpx,
        (DEC, Absolute) => OpCode::DEC_abs,
        (DEC, AbsoluteX) => OpCode::DEC_abx,
        (DEX, None) => OpCode::DEX,
        (DEY, None) => OpCode::DEY,
        (EOR, Immediate) => OpCode::EOR_imm,
        (EOR, ZeroPageOrRelative) => OpCode::EOR_zp,
        (EOR, ZeroPageX) => OpCode::EOR_zpx,
        (EOR, Absolute) => OpCode::EOR_abs,
        (EOR, AbsoluteX) => OpCode::EOR_abx,
        (EOR, AbsoluteY) => OpCode::EOR_aby,
        (EOR, IndirectX) => OpCode::EOR_izx,
        (EOR, IndirectY) => OpCode::EOR_izy,
        (INC, ZeroPageOrRelative) => OpCode::INC_zp,
        (INC, ZeroPageX) => OpCode::INC_zpx,
        (INC, Absolute) => OpCode::INC_abs,
        (INC, AbsoluteX) => OpCode::INC_abx,
        (INX, None) => OpCode::INX,
        (INY, None) => OpCode::INY,
        (JMP, Absolute) => OpCode::JMP_abs,
        (JMP, Indirect) => OpCode::JMP_ind,
        (JSR, Absolute) => OpCode::JSR_abs,
        (LDA, Immediate) => OpCode::LDA_imm,
        (LDA, ZeroPageOrRelative) => OpCode::LDA_zp,
        (LDA, ZeroPageX) => OpCode::LDA_zpx,
        (LDA, Absolute) => OpCode::LDA_abs,
        (LDA, AbsoluteX) => OpCode::LDA_abx,
        (LDA, AbsoluteY) => OpCode::LDA_aby,
        (LDA, IndirectX) => OpCode::LDA_izx,
        (LDA, IndirectY) => OpCode::LDA_izy,
        (LDX, Immediate) => OpCode::LDX_imm,
        (LDX, ZeroPageOrRelative) => OpCode::LDX_zp,
        (LDX, ZeroPageY) => OpCode::LDX_zpy,
        (LDX, Absolute) => OpCode::LDX_abs,
        (LDX, AbsoluteY) => OpCode::LDX_aby,
        (LDY, Immediate) => OpCode::LDY_imm,
        (LDY, ZeroPageOrRelative) => OpCode::LDY_zp,
        (LDY, ZeroPageX) => OpCode::LDY_zpx,
        (LDY, Absolute) => OpCode::LDY_abs,
        (LDY, AbsoluteX) => OpCode::LDY_abx,
        (LSR, Accumulator) | (LSR, None) => OpCode::LSR_a,
        (LSR, ZeroPageOrRelative) => OpCode::LSR_zp,
        (LSR, ZeroPageX) => OpCode::LSR_zpx,
        (LSR, Absolute) => OpCode::LSR_abs,
        (LSR, AbsoluteX) => OpCode::LSR_abx,
        (NOP, None) => OpCode::NOP,
        (ORA, Immediate) => OpCode::ORA_imm,
        (ORA, ZeroPageOrRelative) => OpCode::ORA_zp,
        (ORA, ZeroPageX) => OpCode::ORA_zpx,
        (ORA, Absolute) => OpCode::ORA_abs,
        (ORA, AbsoluteX) => OpCode::ORA_abx,
        (ORA, AbsoluteY) => OpCode::ORA_aby,
        (ORA, IndirectX) => OpCode::ORA_izx,
        (ORA, IndirectY) => OpCode::ORA_izy,
        (PHA, None) => OpCode::PHA,
        (PHP, None) => OpCode::PHP,
        (PLA, None) => OpCode::PLA,
        (PLP, None) => OpCode::PLP,
        (ROL, Accumulator) | (ROL, None) => OpCode::ROL_a,
        (ROL, ZeroPageOrRelative) => OpCode::ROL_zp,
        (ROL, ZeroPageX) => OpCode::ROL_zpx,
        (ROL, Absolute) => OpCode::ROL_abs,
        (ROL, AbsoluteX) => OpCode::ROL_abx,
        (ROR, Accumulator) | (ROR, None) => OpCode::ROR_a,
        (ROR, ZeroPageOrRelative) => OpCode::ROR_zp,
        (ROR, ZeroPageX) => OpCode::ROR_zpx,
        (ROR, Absolute) => OpCode::ROR_abs,
        (ROR, AbsoluteX) => OpCode::ROR_abx,
        (RTI, None) => OpCode::RTI,
        (RTS, None) => OpCode::RTS,
        (SBC, Immediate) => OpCode::SBC_imm,
        (SBC, ZeroPageOrRelative) => OpCode::SBC_zp,
        (SBC, ZeroPageX) => OpCode::SBC_zpx,
        (SBC, Absolute) => OpCode::SBC_abs,
        (SBC, AbsoluteX) => OpCode::SBC_abx,
        (SBC, AbsoluteY) => OpCode::SBC_aby,
        (SBC, IndirectX) => OpCode::SBC_izx,
        (SBC, IndirectY) => OpCode::SBC_izy,
        (SEC, None) => OpCode::SEC,
        (SED, None) => OpCode::SED,
        (SEI, None) => OpCode::SEI,
        (STA, ZeroPageOrRelative) => OpCode::STA_zp,
        (STA, ZeroPageX) => OpCode::STA_zpx,
        (STA, Absolute) => OpCode::STA_abs,
        (STA, AbsoluteX) => OpCode::STA_abx,
        (STA, AbsoluteY) => OpCode::STA_aby,
        (STA, IndirectX) => OpCode::STA_izx,
        (STA, IndirectY) => OpCode::STA_izy,
        (STX, ZeroPageOrRelative) => OpCode::STX_zp,
        (STX, ZeroPageY) => OpCode::STX_zpy,
        (STX, Absolute) => OpCode::STX_abs,
        (STY, ZeroPageOrRelative) => OpCode::STY_zp,
        (STY, ZeroPageX) => OpCode::STY_zpx,
        (STY, Absolute) => OpCode::STY_abs,
        (TAX, None) => OpCode::TAX,
        (TAY, None) => OpCode::TAY,
        (TSX, None) => OpCode::TSX,
        (TXA, None) => OpCode::TXA,
        (TXS, None) => OpCode::TXS,
        (TYA, None) => OpCode::TYA,
        _ => {
            return Err(format!(
                "No documented opcode for {:?} with {:?} addressing",
                instruction, mode
            ))
        }
    })
}

type OperationFn = fn(&mut Cpu, Mode);

/// One dispatch-table entry: the handler, how to resolve its operand, the
/// base cycle count, and the mnemonic for diagnostics.
#[derive(Clone, Copy)]
pub struct Operation {
    pub mnemonic: &'static str,
    pub mode: Mode,
    pub cycles: u8,
    pub run: OperationFn,
}

const fn entry(mnemonic: &'static str, mode: Mode, cycles: u8, run: OperationFn) -> Option<Operation> {
    Some(Operation {
        mnemonic,
        mode,
        cycles,
        run,
    })
}

/// Dispatch table indexed by the opcode byte. Exactly the 151 documented
/// opcodes are present; fetching any other byte is a fatal `CpuError`.
#[rustfmt::skip]
pub const OPERATIONS: [Option<Operation>; 256] = {
    let mut table: [Option<Operation>; 256] = [None; 256];

    // ADC - add with carry
    table[0x69] = entry("adc", Mode::Immediate, 2, alu::adc);
    table[0x65] = entry("adc", Mode::ZeroPage,  3, alu::adc);
    table[0x75] = entry("adc", Mode::ZeroPageX, 4, alu::adc);
    table[0x6d] = entry("adc", Mode::Absolute,  4, alu::adc);
    table[0x7d] = entry("adc", Mode::AbsoluteX, 4, alu::adc);
    table[0x79] = entry("adc", Mode::AbsoluteY, 4, alu::adc);
    table[0x61] = entry("adc", Mode::IndirectX, 6, alu::adc);
    table[0x71] = entry("adc", Mode::IndirectY, 5, alu::adc);

    // AND - bitwise and with the accumulator
    table[0x29] = entry("and", Mode::Immediate, 2, alu::and);
    table[0x25] = entry("and", Mode::ZeroPage,  3, alu::and);
    table[0x35] = entry("and", Mode::ZeroPageX, 4, alu::and);
    table[0x2d] = entry("and", Mode::Absolute,  4, alu::and);
    table[0x3d] = entry("and", Mode::AbsoluteX, 4, alu::and);
    table[0x39] = entry("and", Mode::AbsoluteY, 4, alu::and);
    table[0x21] = entry("and", Mode::IndirectX, 6, alu::and);
    table[0x31] = entry("and", Mode::IndirectY, 5, alu::and);

    // ASL - arithmetic shift left
    table[0x0a] = entry("asl", Mode::Accumulator, 2, alu::asl);
    table[0x06] = entry("asl", Mode::ZeroPage,    5, alu::asl);
    table[0x16] = entry("asl", Mode::ZeroPageX,   6, alu::asl);
    table[0x0e] = entry("asl", Mode::Absolute,    6, alu::asl);
    table[0x1e] = entry("asl", Mode::AbsoluteX,   7, alu::asl);

    // Branches
    table[0x90] = entry("bcc", Mode::Relative, 2, control::bcc);
    table[0xb0] = entry("bcs", Mode::Relative, 2, control::bcs);
    table[0xf0] = entry("beq", Mode::Relative, 2, control::beq);
    table[0x30] = entry("bmi", Mode::Relative, 2, control::bmi);
    table[0xd0] = entry("bne", Mode::Relative, 2, control::bne);
    table[0x10] = entry("bpl", Mode::Relative, 2, control::bpl);
    table[0x50] = entry("bvc", Mode::Relative, 2, control::bvc);
    table[0x70] = entry("bvs", Mode::Relative, 2, control::bvs);

    // BIT - bit test
    table[0x24] = entry("bit", Mode::ZeroPage, 3, control::bit);
    table[0x2c] = entry("bit", Mode::Absolute, 4, control::bit);

    // BRK - software interrupt
    table[0x00] = entry("brk", Mode::Implied, 7, control::brk);

    // Flag clears and sets
    table[0x18] = entry("clc", Mode::Implied, 2, control::clc);
    table[0xd8] = entry("cld", Mode::Implied, 2, control::cld);
    table[0x58] = entry("cli", Mode::Implied, 2, control::cli);
    table[0xb8] = entry("clv", Mode::Implied, 2, control::clv);
    table[0x38] = entry("sec", Mode::Implied, 2, control::sec);
    table[0xf8] = entry("sed", Mode::Implied, 2, control::sed);
    table[0x78] = entry("sei", Mode::Implied, 2, control::sei);

    // CMP / CPX / CPY - compares
    table[0xc9] = entry("cmp", Mode::Immediate, 2, alu::cmp);
    table[0xc5] = entry("cmp", Mode::ZeroPage,  3, alu::cmp);
    table[0xd5] = entry("cmp", Mode::ZeroPageX, 4, alu::cmp);
    table[0xcd] = entry("cmp", Mode::Absolute,  4, alu::cmp);
    table[0xdd] = entry("cmp", Mode::AbsoluteX, 4, alu::cmp);
    table[0xd9] = entry("cmp", Mode::AbsoluteY, 4, alu::cmp);
    table[0xc1] = entry("cmp", Mode::IndirectX, 6, alu::cmp);
    table[0xd1] = entry("cmp", Mode::IndirectY, 5, alu::cmp);
    table[0xe0] = entry("cpx", Mode::Immediate, 2, alu::cpx);
    table[0xe4] = entry("cpx", Mode::ZeroPage,  3, alu::cpx);
    table[0xec] = entry("cpx", Mode::Absolute,  4, alu::cpx);
    table[0xc0] = entry("cpy", Mode::Immediate, 2, alu::cpy);
    table[0xc4] = entry("cpy", Mode::ZeroPage,  3, alu::cpy);
    table[0xcc] = entry("cpy", Mode::Absolute,  4, alu::cpy);

    // DEC / DEX / DEY - decrements
    table[0xc6] = entry("dec", Mode::ZeroPage,  5, alu::dec);
    table[0xd6] = entry("dec", Mode::ZeroPageX, 6, alu::dec);
    table[0xce] = entry("dec", Mode::Absolute,  6, alu::dec);
    table[0xde] = entry("dec", Mode::AbsoluteX, 7, alu::dec);
    table[0xca] = entry("dex", Mode::Implied,   2, alu::dex);
    table[0x88] = entry("dey", Mode::Implied,   2, alu::dey);

    // EOR - bitwise exclusive or with the accumulator
    table[0x49] = entry("eor", Mode::Immediate, 2, alu::eor);
    table[0x45] = entry("eor", Mode::ZeroPage,  3, alu::eor);
    table[0x55] = entry("eor", Mode::ZeroPageX, 4, alu::eor);
    table[0x4d] = entry("eor", Mode::Absolute,  4, alu::eor);
    table[0x5d] = entry("eor", Mode::AbsoluteX, 4, alu::eor);
    table[0x59] = entry("eor", Mode::AbsoluteY, 4, alu::eor);
    table[0x41] = entry("eor", Mode::IndirectX, 6, alu::eor);
    table[0x51] = entry("eor", Mode::IndirectY, 5, alu::eor);

    // INC / INX / INY - increments
    table[0xe6] = entry("inc", Mode::ZeroPage,  5, alu::inc);
    table[0xf6] = entry("inc", Mode::ZeroPageX, 6, alu::inc);
    table[0xee] = entry("inc", Mode::Absolute,  6, alu::inc);
    table[0xfe] = entry("inc", Mode::AbsoluteX, 7, alu::inc);
    table[0xe8] = entry("inx", Mode::Implied,   2, alu::inx);
    table[0xc8] = entry("iny", Mode::Implied,   2, alu::iny);

    // JMP / JSR / RTS / RTI
    table[0x4c] = entry("jmp", Mode::Absolute, 3, control::jmp);
    table[0x6c] = entry("jmp", Mode::Indirect, 5, control::jmp);
    table[0x20] = entry("jsr", Mode::Absolute, 6, control::jsr);
    table[0x60] = entry("rts", Mode::Implied,  6, control::rts);
    table[0x40] = entry("rti", Mode::Implied,  6, control::rti);

    // LDA / LDX / LDY - loads
    table[0xa9] = entry("lda", Mode::Immediate, 2, transfer::lda);
    table[0xa5] = entry("lda", Mode::ZeroPage,  3, transfer::lda);
    table[0xb5] = entry("lda", Mode::ZeroPageX, 4, transfer::lda);
    table[0xad] = entry("lda", Mode::Absolute,  4, transfer::lda);
    table[0xbd] = entry("lda", Mode::AbsoluteX, 4, transfer::lda);
    table[0xb9] = entry("lda", Mode::AbsoluteY, 4, transfer::lda);
    table[0xa1] = entry("lda", Mode::IndirectX, 6, transfer::lda);
    table[0xb1] = entry("lda", Mode::IndirectY, 5, transfer::lda);
    table[0xa2] = entry("ldx", Mode::Immediate, 2, transfer::ldx);
    table[0xa6] = entry("ldx", Mode::ZeroPage,  3, transfer::ldx);
    table[0xb6] = entry("ldx", Mode::ZeroPageY, 4, transfer::ldx);
    table[0xae] = entry("ldx", Mode::Absolute,  4, transfer::ldx);
    table[0xbe] = entry("ldx", Mode::AbsoluteY, 4, transfer::ldx);
    table[0xa0] = entry("ldy", Mode::Immediate, 2, transfer::ldy);
    table[0xa4] = entry("ldy", Mode::ZeroPage,  3, transfer::ldy);
    table[0xb4] = entry("ldy", Mode::ZeroPageX, 4, transfer::ldy);
    table[0xac] = entry("ldy", Mode::Absolute,  4, transfer::ldy);
    table[0xbc] = entry("ldy", Mode::AbsoluteX, 4, transfer::ldy);

    // LSR - logical shift right
    table[0x4a] = entry("lsr", Mode::Accumulator, 2, alu::lsr);
    table[0x46] = entry("lsr", Mode::ZeroPage,    5, alu::lsr);
    table[0x56] = entry("lsr", Mode::ZeroPageX,   6, alu::lsr);
    table[0x4e] = entry("lsr", Mode::Absolute,    6, alu::lsr);
    table[0x5e] = entry("lsr", Mode::AbsoluteX,   7, alu::lsr);

    // NOP
    table[0xea] = entry("nop", Mode::Implied, 2, control::nop);

    // ORA - bitwise or with the accumulator
    table[0x09] = entry("ora", Mode::Immediate, 2, alu::ora);
    table[0x05] = entry("ora", Mode::ZeroPage,  3, alu::ora);
    table[0x15] = entry("ora", Mode::ZeroPageX, 4, alu::ora);
    table[0x0d] = entry("ora", Mode::Absolute,  4, alu::ora);
    table[0x1d] = entry("ora", Mode::AbsoluteX, 4, alu::ora);
    table[0x19] = entry("ora", Mode::AbsoluteY, 4, alu::ora);
    table[0x01] = entry("ora", Mode::IndirectX, 6, alu::ora);
    table[0x11] = entry("ora", Mode::IndirectY, 5, alu::ora);

    // Stack pushes and pulls
    table[0x48] = entry("pha", Mode::Implied, 3, transfer::pha);
    table[0x08] = entry("php", Mode::Implied, 3, transfer::php);
    table[0x68] = entry("pla", Mode::Implied, 4, transfer::pla);
    table[0x28] = entry("plp", Mode::Implied, 4, transfer::plp);

    // ROL / ROR - rotates through the carry
    table[0x2a] = entry("rol", Mode::Accumulator, 2, alu::rol);
    table[0x26] = entry("rol", Mode::ZeroPage,    5, alu::rol);
    table[0x36] = entry("rol", Mode::ZeroPageX,   6, alu::rol);
    table[0x2e] = entry("rol", Mode::Absolute,    6, alu::rol);
    table[0x3e] = entry("rol", Mode::AbsoluteX,   7, alu::rol);
    table[0x6a] = entry("ror", Mode::Accumulator, 2, alu::ror);
    table[0x66] = entry("ror", Mode::ZeroPage,    5, alu::ror);
    table[0x76] = entry("ror", Mode::ZeroPageX,   6, alu::ror);
    table[0x6e] = entry("ror", Mode::Absolute,    6, alu::ror);
    table[0x7e] = entry("ror", Mode::AbsoluteX,   7, alu::ror);

    // SBC - subtract with carry
    table[0xe9] = entry("sbc", Mode::Immediate, 2, alu::sbc);
    table[0xe5] = entry("sbc", Mode::ZeroPage,  3, alu::sbc);
    table[0xf5] = entry("sbc", Mode::ZeroPageX, 4, alu::sbc);
    table[0xed] = entry("sbc", Mode::Absolute,  4, alu::sbc);
    table[0xfd] = entry("sbc", Mode::AbsoluteX, 4, alu::sbc);
    table[0xf9] = entry("sbc", Mode::AbsoluteY, 4, alu::sbc);
    table[0xe1] = entry("sbc", Mode::IndirectX, 6, alu::sbc);
    table[0xf1] = entry("sbc", Mode::IndirectY, 5, alu::sbc);

    // STA / STX / STY - stores
    table[0x85] = entry("sta", Mode::ZeroPage,  3, transfer::sta);
    table[0x95] = entry("sta", Mode::ZeroPageX, 4, transfer::sta);
    table[0x8d] = entry("sta", Mode::Absolute,  4, transfer::sta);
    table[0x9d] = entry("sta", Mode::AbsoluteX, 5, transfer::sta);
    table[0x99] = entry("sta", Mode::AbsoluteY, 5, transfer::sta);
    table[0x81] = entry("sta", Mode::IndirectX, 6, transfer::sta);
    table[0x91] = entry("sta", Mode::IndirectY, 6, transfer::sta);
    table[0x86] = entry("stx", Mode::ZeroPage,  3, transfer::stx);
    table[0x96] = entry("stx", Mode::ZeroPageY, 4, transfer::stx);
    table[0x8e] = entry("stx", Mode::Absolute,  4, transfer::stx);
    table[0x84] = entry("sty", Mode::ZeroPage,  3, transfer::sty);
    table[0x94] = entry("sty", Mode::ZeroPageX, 4, transfer::sty);
    table[0x8c] = entry("sty", Mode::Absolute,  4, transfer::sty);

    // Register transfers
    table[0xaa] = entry("tax", Mode::Implied, 2, transfer::tax);
    table[0xa8] = entry("tay", Mode::Implied, 2, transfer::tay);
    table[0xba] = entry("tsx", Mode::Implied, 2, transfer::tsx);
    table[0x8a] = entry("txa", Mode::Implied, 2, transfer::txa);
    table[0x9a] = entry("txs", Mode::Implied, 2, transfer::txs);
    table[0x98] = entry("tya", Mode::Implied, 2, transfer::tya);

    table
};
