use crate::asm::{AsmLexer, BytesLabels};
use crate::bus::Bus;
use crate::constants::PROGRAM_START;
use crate::cpu::*;

/// The status byte a freshly reset CPU carries; the expected values in the
/// tests are written as `P | <flags>` on top of this.
pub const P: u8 = RESET_STATUS;
pub const C: u8 = StatusFlag::Carry as u8;
pub const Z: u8 = StatusFlag::Zero as u8;
pub const I: u8 = StatusFlag::InterruptDisable as u8;
pub const D: u8 = StatusFlag::Decimal as u8;
pub const B: u8 = StatusFlag::Break as u8;
pub const U: u8 = StatusFlag::Unused as u8;
pub const V: u8 = StatusFlag::Overflow as u8;
pub const N: u8 = StatusFlag::Negative as u8;

const FLAG_NAMES: [(&str, u8); 8] = [
    ("Carry", C),
    ("Zero", Z),
    ("InterruptDisable", I),
    ("Decimal", D),
    ("Break", B),
    ("Unused", U),
    ("Overflow", V),
    ("Negative", N),
];

/// Assemble the program, load it at the conventional origin, reset, and run
/// until the next opcode is BRK.
pub fn run_program(text: &str) -> Cpu {
    let mut lexer = AsmLexer::new(text);
    if let Err(parse_error) = lexer.parse() {
        parse_error.panic_nicely();
    }
    let BytesLabels { bytes, .. } = lexer.into_bytes(PROGRAM_START).unwrap();
    run_bytes(&bytes)
}

/// The raw-bytes version of `run_program`, for tests that care about exact
/// machine code.
pub fn run_bytes(bytes: &[u8]) -> Cpu {
    let mut cpu = load_bytes(bytes);
    cpu.run().unwrap();
    cpu
}

/// Load raw bytes at the conventional origin and reset, without running.
pub fn load_bytes(bytes: &[u8]) -> Cpu {
    let bus = Bus::new_shared_bus();
    bus.borrow_mut().load_program(bytes);
    let mut cpu = Cpu::new(bus);
    cpu.reset();
    // A wandering program would otherwise loop forever.
    cpu.max_steps = Some(10_000);
    cpu
}

pub fn assert_register_a(text: &str, value: u8, status: u8) {
    let cpu = run_program(text);
    assert_eq!(
        cpu.a, value,
        "\n{}\nExpected register A to be {:#04x} but it was {:#04x}",
        text, value, cpu.a
    );
    assert_status(&cpu, status);
}

pub fn assert_register_x(text: &str, value: u8, status: u8) {
    let cpu = run_program(text);
    assert_eq!(
        cpu.x, value,
        "\n{}\nExpected register X to be {:#04x} but it was {:#04x}",
        text, value, cpu.x
    );
    assert_status(&cpu, status);
}

pub fn assert_register_y(text: &str, value: u8, status: u8) {
    let cpu = run_program(text);
    assert_eq!(
        cpu.y, value,
        "\n{}\nExpected register Y to be {:#04x} but it was {:#04x}",
        text, value, cpu.y
    );
    assert_status(&cpu, status);
}

/// Compare the whole status byte, spelling out which flags disagree.
pub fn assert_status(cpu: &Cpu, value: u8) {
    if cpu.p == value {
        return;
    }
    let mut disagreements = String::new();
    for (name, mask) in FLAG_NAMES {
        let expected = value & mask != 0;
        let actual = cpu.p & mask != 0;
        if expected != actual {
            disagreements.push_str(&format!(
                "Expected {} to be {} but it was {}\n",
                name, expected, actual
            ));
        }
    }
    panic!(
        "\nExpected the status {:#010b} to match {:#010b}\n{}",
        cpu.p, value, disagreements
    );
}

/// Run a program and assert on the value left in register A.
macro_rules! register_a {
    ($name:ident, $a:expr, $p:expr, $text:expr) => {
        #[test]
        fn $name() {
            assert_register_a($text, $a, $p);
        }
    };
}

macro_rules! register_x {
    ($name:ident, $x:expr, $p:expr, $text:expr) => {
        #[test]
        fn $name() {
            assert_register_x($text, $x, $p);
        }
    };
}

macro_rules! register_y {
    ($name:ident, $y:expr, $p:expr, $text:expr) => {
        #[test]
        fn $name() {
            assert_register_y($text, $y, $p);
        }
    };
}

/// Run a program and assert only on the status register.
macro_rules! status {
    ($name:ident, $p:expr, $text:expr) => {
        #[test]
        fn $name() {
            let cpu = run_program($text);
            assert_status(&cpu, $p);
        }
    };
}

/// Run a program and assert on a byte of memory.
macro_rules! memory {
    ($name:ident, [$addr:expr, $expected:expr], $text:expr) => {
        #[test]
        fn $name() {
            let cpu = run_program($text);
            let actual = cpu.bus.borrow().read_u8($addr);
            assert_eq!(
                actual, $expected,
                "\n{}\nExpected address {:#06x} to contain {:#04x} but it held {:#04x}",
                $text, $addr, $expected, actual
            );
        }
    };
}
