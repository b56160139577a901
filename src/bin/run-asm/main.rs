//! Assemble a 6502 source file, run it, and trace every step. The program
//! is loaded at the conventional 0x0600 origin and runs until it reaches a
//! BRK (or the step limit, for programs that never settle).

use std::{env, error::Error, process};

use colored::*;

use mos_6502::asm::{AsmLexer, BytesLabels};
use mos_6502::bus::Bus;
use mos_6502::constants::PROGRAM_START;
use mos_6502::cpu::Cpu;
use mos_6502::opcodes::OPERATIONS;

fn parse_cli_args() -> String {
    let args: Vec<String> = env::args().collect();
    match args.get(1) {
        Some(filename) => filename.clone(),
        None => {
            eprintln!("Expected the first argument to be a path to a .asm file.");
            eprintln!("cargo run --bin run-asm demos/add-with-carry.asm");
            process::exit(1);
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let filename = parse_cli_args();
    let contents = std::fs::read_to_string(&filename)?;

    let mut lexer = AsmLexer::new(&contents);
    if let Err(parse_error) = lexer.parse() {
        eprintln!("{}", parse_error);
        process::exit(1);
    }
    let BytesLabels {
        bytes,
        address_to_label,
    } = lexer.into_bytes(PROGRAM_START)?;

    let bus = Bus::new_shared_bus();
    bus.borrow_mut().load_program(&bytes);
    let mut cpu = Cpu::new(bus);
    cpu.reset();
    cpu.max_steps = Some(100_000);

    while cpu.peek_u8() != 0x00 {
        if let Some(label) = address_to_label.get(&cpu.pc) {
            println!("{}", format!("{}:", label).cyan());
        }
        let mnemonic = OPERATIONS[cpu.peek_u8() as usize]
            .map(|operation| operation.mnemonic)
            .unwrap_or("???");
        println!(
            "  {}  {}  a:{:02x} x:{:02x} y:{:02x} s:{:02x} p:{:08b}",
            format!("{:04x}", cpu.pc).cyan(),
            mnemonic.bright_white(),
            cpu.a,
            cpu.x,
            cpu.y,
            cpu.s,
            cpu.status(),
        );
        cpu.step()?;

        if let Some(max_steps) = cpu.max_steps {
            if cpu.steps >= max_steps {
                eprintln!("{}", "Stopped: the step limit was reached.".bright_red());
                break;
            }
        }
    }

    println!(
        "\n{} a:{:02x} x:{:02x} y:{:02x} s:{:02x} pc:{:04x} p:{:08b} ({} steps, {} cycles)",
        "Done.".bright_green(),
        cpu.a,
        cpu.x,
        cpu.y,
        cpu.s,
        cpu.pc,
        cpu.status(),
        cpu.steps,
        cpu.cycles,
    );

    Ok(())
}
