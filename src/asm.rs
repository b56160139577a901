//! A small line-oriented 6502 assembler. It exists so tests and the runner
//! binary can express programs as source text rather than hand-built byte
//! arrays. One instruction, label, or data pragma per line; `;` starts a
//! comment; `$` is hex, `%` is binary, bare digits are decimal.
//!
//! Literal width picks the addressing mode: `$12` is zero page (or a branch
//! offset), `$1234` is absolute. Labels assemble to absolute addresses
//! against the origin passed to `into_bytes`, which is why branch operands
//! must be written as literal offsets.

use std::collections::HashMap;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use colored::*;

use crate::opcodes::{instruction_mode_to_op_code, match_instruction, Instruction, TokenMode};

pub type StringIndex = usize;

/// Label addresses keyed by the address they resolved to, for trace output.
pub type AddressToLabel = HashMap<u16, String>;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Instruction(Instruction),
    Mode(TokenMode),
    U8(u8),
    U16(u16),
    LabelDefinition(StringIndex),
    LabelReference(StringIndex),
}

/// A parsed numeric literal, tagged with the width its spelling implies.
enum Number {
    U8(u8),
    U16(u16),
}

/// Interned label names plus the addresses they end up at.
struct Labels {
    names: Vec<String>,
    addresses: Vec<Option<u16>>,
}

impl Labels {
    fn new() -> Labels {
        Labels {
            names: Vec::new(),
            addresses: Vec::new(),
        }
    }

    fn intern(&mut self, name: String) -> StringIndex {
        match self.names.iter().position(|existing| *existing == name) {
            Some(index) => index,
            None => {
                self.names.push(name);
                self.addresses.push(None);
                self.names.len() - 1
            }
        }
    }

    fn define(&mut self, index: StringIndex, address: u16) -> Result<(), String> {
        if self.addresses[index].is_some() {
            return Err(format!("The label \"{}\" is defined twice", self.names[index]));
        }
        self.addresses[index] = Some(address);
        Ok(())
    }

    fn address(&self, index: StringIndex) -> Result<u16, String> {
        self.addresses[index]
            .ok_or_else(|| format!("The label \"{}\" is never defined", self.names[index]))
    }
}

/// The assembled program plus the resolved label addresses.
pub struct BytesLabels {
    pub bytes: Vec<u8>,
    pub address_to_label: AddressToLabel,
}

/// A parse failure, with enough context to render the offending source
/// excerpt.
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
    pub row: usize,
    pub column: usize,
    rendered: String,
}

impl ParseError {
    fn new(message: String, lexer: &AsmLexer) -> ParseError {
        let error_row = lexer.row;
        let mut rendered = String::from("\n\n");

        for (row, line) in lexer.text.lines().enumerate() {
            if row + 3 < error_row {
                continue;
            }
            if row > error_row + 3 {
                break;
            }
            rendered.push_str(&format!("{}", format!("{:>4}: ", row + 1).cyan()));
            rendered.push_str(&format!("{}\n", line.bright_white()));

            if row == error_row {
                let indent = " ".repeat(lexer.column + 5);
                rendered.push_str(&indent);
                rendered.push_str(&format!(
                    "{}\n",
                    format!(
                        "^ parse error on line {} column {}",
                        error_row + 1,
                        lexer.column + 1
                    )
                    .bright_red()
                ));
                rendered.push_str(&indent);
                rendered.push_str(&format!("{}\n", message.bright_red()));
            }
        }
        rendered.push('\n');

        ParseError {
            message,
            row: lexer.row,
            column: lexer.column,
            rendered,
        }
    }

    /// For tests and tools that have nothing better to do with the error
    /// than stop with the rendered excerpt.
    pub fn panic_nicely(self) -> ! {
        panic!("{}", self.rendered)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.rendered)
    }
}

pub struct AsmLexer<'a> {
    text: &'a str,
    characters: Peekable<Chars<'a>>,
    tokens: Vec<Token>,
    labels: Labels,
    row: usize,
    column: usize,
}

impl<'a> AsmLexer<'a> {
    pub fn new(text: &'a str) -> AsmLexer<'a> {
        AsmLexer {
            text,
            characters: "".chars().peekable(),
            tokens: Vec::new(),
            labels: Labels::new(),
            row: 0,
            column: 0,
        }
    }

    /// Tokenize the whole source. Errors carry the source position and a
    /// rendered excerpt.
    pub fn parse(&mut self) -> Result<(), ParseError> {
        let text = self.text;
        for (row, line) in text.lines().enumerate() {
            self.row = row;
            self.column = 0;
            self.characters = line.chars().peekable();
            if let Err(message) = self.parse_line() {
                return Err(ParseError::new(message, self));
            }
        }
        Ok(())
    }

    /// Assemble the tokens into bytes, resolving labels against `origin`
    /// (the address the program will be loaded at).
    pub fn into_bytes(mut self, origin: u16) -> Result<BytesLabels, String> {
        let mut bytes: Vec<u8> = Vec::new();
        // Label operands are emitted as u16 placeholders and written back
        // once every definition has an address.
        let mut patches: Vec<(usize, StringIndex)> = Vec::new();
        let mut tokens = self.tokens.iter().peekable();

        while let Some(token) = tokens.next() {
            match token {
                Token::Instruction(instruction) => match tokens.peek() {
                    Some(Token::LabelReference(index)) => {
                        bytes.push(
                            instruction_mode_to_op_code(instruction, &TokenMode::Absolute)? as u8,
                        );
                        patches.push((bytes.len(), *index));
                        bytes.push(0);
                        bytes.push(0);
                        tokens.next();
                    }
                    Some(Token::Mode(mode)) => {
                        bytes.push(instruction_mode_to_op_code(instruction, mode)? as u8);
                        tokens.next();
                        match mode {
                            TokenMode::Absolute
                            | TokenMode::AbsoluteX
                            | TokenMode::AbsoluteY
                            | TokenMode::Indirect => match tokens.next() {
                                Some(Token::U16(value)) => {
                                    bytes.extend_from_slice(&value.to_le_bytes())
                                }
                                other => {
                                    return Err(format!(
                                        "Expected a two byte operand, found {:?}",
                                        other
                                    ))
                                }
                            },
                            TokenMode::Immediate
                            | TokenMode::ZeroPageOrRelative
                            | TokenMode::ZeroPageX
                            | TokenMode::ZeroPageY
                            | TokenMode::IndirectX
                            | TokenMode::IndirectY => match tokens.next() {
                                Some(Token::U8(value)) => bytes.push(*value),
                                other => {
                                    return Err(format!(
                                        "Expected a one byte operand, found {:?}",
                                        other
                                    ))
                                }
                            },
                            TokenMode::Accumulator | TokenMode::None => {}
                        }
                    }
                    _ => {
                        bytes
                            .push(instruction_mode_to_op_code(instruction, &TokenMode::None)? as u8)
                    }
                },
                Token::LabelDefinition(index) => {
                    self.labels
                        .define(*index, origin.wrapping_add(bytes.len() as u16))?;
                }
                Token::U8(value) => bytes.push(*value),
                Token::U16(value) => bytes.extend_from_slice(&value.to_le_bytes()),
                token => return Err(format!("Unexpected token {:?}", token)),
            }
        }

        for (offset, index) in patches {
            let [low, high] = self.labels.address(index)?.to_le_bytes();
            bytes[offset] = low;
            bytes[offset + 1] = high;
        }

        let mut address_to_label = AddressToLabel::new();
        for (index, name) in self.labels.names.iter().enumerate() {
            if let Some(address) = self.labels.addresses[index] {
                address_to_label.insert(address, name.clone());
            }
        }

        Ok(BytesLabels {
            bytes,
            address_to_label,
        })
    }

    fn parse_line(&mut self) -> Result<(), String> {
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Ok(()),
                Some(';') => return self.skip_comment(),
                Some('.') => {
                    self.advance();
                    return self.parse_pragma();
                }
                Some(c) if c.is_alphabetic() || c == '_' => {
                    let word = self.read_word();
                    match match_instruction(&word) {
                        Some(instruction) => {
                            self.tokens.push(Token::Instruction(instruction));
                            return self.parse_operand(instruction);
                        }
                        None => {
                            self.expect(':')?;
                            let index = self.labels.intern(word);
                            self.tokens.push(Token::LabelDefinition(index));
                            // A label may share its line with an instruction
                            // or pragma, so keep going.
                        }
                    }
                }
                Some(c) => return Err(format!("Unexpected character \"{}\"", c)),
            }
        }
    }

    fn parse_pragma(&mut self) -> Result<(), String> {
        let pragma = self.read_word();
        match pragma.as_ref() {
            "byte" => loop {
                self.skip_whitespace();
                let value = self.parse_u8()?;
                self.tokens.push(Token::U8(value));
                if !self.comma_follows()? {
                    return Ok(());
                }
            },
            "word" => loop {
                self.skip_whitespace();
                let value = self.parse_u16()?;
                self.tokens.push(Token::U16(value));
                if !self.comma_follows()? {
                    return Ok(());
                }
            },
            _ => Err(format!("Unknown pragma \".{}\"", pragma)),
        }
    }

    /// Operand grammar, by leading character:
    ///   #$00        immediate
    ///   a           accumulator
    ///   $00         zero page or branch offset
    ///   $00,x  $00,y    indexed zero page
    ///   $0000       absolute
    ///   $0000,x $0000,y indexed absolute
    ///   ($0000)     indirect
    ///   ($00,x)     indexed indirect
    ///   ($00),y     indirect indexed
    ///   name        label (assembles as absolute)
    fn parse_operand(&mut self, instruction: Instruction) -> Result<(), String> {
        self.skip_whitespace();
        match self.peek() {
            None => return self.verify_bare(instruction),
            Some(';') => {
                self.verify_bare(instruction)?;
                return self.skip_comment();
            }
            Some('#') => {
                self.advance();
                let value = self.parse_u8()?;
                self.tokens.push(Token::Mode(TokenMode::Immediate));
                self.tokens.push(Token::U8(value));
            }
            Some('(') => {
                self.advance();
                self.parse_indirect_operand()?;
            }
            Some(c) if c.is_alphabetic() || c == '_' => {
                let word = self.read_word();
                if word.eq_ignore_ascii_case("a") {
                    self.tokens.push(Token::Mode(TokenMode::Accumulator));
                } else {
                    let index = self.labels.intern(word);
                    self.tokens.push(Token::LabelReference(index));
                }
            }
            _ => match self.parse_number()? {
                Number::U8(value) => {
                    let mode = match self.parse_index_register()? {
                        Some('x') => TokenMode::ZeroPageX,
                        Some('y') => TokenMode::ZeroPageY,
                        _ => TokenMode::ZeroPageOrRelative,
                    };
                    self.tokens.push(Token::Mode(mode));
                    self.tokens.push(Token::U8(value));
                }
                Number::U16(value) => {
                    let mode = match self.parse_index_register()? {
                        Some('x') => TokenMode::AbsoluteX,
                        Some('y') => TokenMode::AbsoluteY,
                        _ => TokenMode::Absolute,
                    };
                    self.tokens.push(Token::Mode(mode));
                    self.tokens.push(Token::U16(value));
                }
            },
        }
        self.expect_end_of_line()
    }

    /// The three parenthesised forms: `($0000)`, `($00,x)`, `($00),y`.
    fn parse_indirect_operand(&mut self) -> Result<(), String> {
        match self.parse_number()? {
            Number::U16(value) => {
                self.expect(')')?;
                self.tokens.push(Token::Mode(TokenMode::Indirect));
                self.tokens.push(Token::U16(value));
            }
            Number::U8(value) => match self.next() {
                Some(',') => {
                    match self.next() {
                        Some(c) if c.eq_ignore_ascii_case(&'x') => {}
                        other => return Err(format!("Expected \"x\", found {:?}", other)),
                    }
                    self.expect(')')?;
                    self.tokens.push(Token::Mode(TokenMode::IndirectX));
                    self.tokens.push(Token::U8(value));
                }
                Some(')') => {
                    self.expect(',')?;
                    match self.next() {
                        Some(c) if c.eq_ignore_ascii_case(&'y') => {}
                        other => return Err(format!("Expected \"y\", found {:?}", other)),
                    }
                    self.tokens.push(Token::Mode(TokenMode::IndirectY));
                    self.tokens.push(Token::U8(value));
                }
                other => return Err(format!("Expected \",\" or \")\", found {:?}", other)),
            },
        }
        Ok(())
    }

    /// An optional `,x` or `,y` after a direct operand.
    fn parse_index_register(&mut self) -> Result<Option<char>, String> {
        if self.peek() != Some(',') {
            return Ok(None);
        }
        self.advance();
        match self.next() {
            Some(c) if c.eq_ignore_ascii_case(&'x') => Ok(Some('x')),
            Some(c) if c.eq_ignore_ascii_case(&'y') => Ok(Some('y')),
            other => Err(format!("Expected an index register, found {:?}", other)),
        }
    }

    /// Instructions that are valid with no operand at all.
    fn verify_bare(&self, instruction: Instruction) -> Result<(), String> {
        use Instruction::*;
        match instruction {
            BRK | CLC | CLD | CLI | CLV | DEX | DEY | INX | INY | NOP | PHA | PHP | PLA | PLP
            | RTI | RTS | SEC | SED | SEI | TAX | TAY | TSX | TXA | TXS | TYA => Ok(()),
            _ => Err(format!("{:?} expects an operand", instruction)),
        }
    }

    fn parse_u8(&mut self) -> Result<u8, String> {
        let (word, radix) = self.read_number_word()?;
        u8::from_str_radix(&word, radix)
            .map_err(|_| format!("Unable to parse \"{}\" as a one byte value", word))
    }

    fn parse_u16(&mut self) -> Result<u16, String> {
        let (word, radix) = self.read_number_word()?;
        u16::from_str_radix(&word, radix)
            .map_err(|_| format!("Unable to parse \"{}\" as a two byte value", word))
    }

    /// A literal whose spelled width chooses between the zero-page and
    /// absolute encodings: 2 hex digits or 8 binary digits are one byte,
    /// 4 or 16 are two. Decimal takes whichever width fits.
    fn parse_number(&mut self) -> Result<Number, String> {
        let (word, radix) = self.read_number_word()?;
        let wide = match (radix, word.len()) {
            (16, 2) | (2, 8) => false,
            (16, 4) | (2, 16) => true,
            (10, _) => {
                let value: u32 = word
                    .parse()
                    .map_err(|_| format!("Unable to parse \"{}\" as a number", word))?;
                if value > 0xffff {
                    return Err(format!("The value {} does not fit in two bytes", value));
                }
                value > 0xff
            }
            (16, _) => return Err("Hex literals must be 2 or 4 digits long".to_string()),
            _ => return Err("Binary literals must be 8 or 16 digits long".to_string()),
        };
        if wide {
            u16::from_str_radix(&word, radix)
                .map(Number::U16)
                .map_err(|_| format!("Unable to parse \"{}\" as a number", word))
        } else {
            u8::from_str_radix(&word, radix)
                .map(Number::U8)
                .map_err(|_| format!("Unable to parse \"{}\" as a number", word))
        }
    }

    fn read_number_word(&mut self) -> Result<(String, u32), String> {
        let radix = match self.peek() {
            Some('$') => {
                self.advance();
                16
            }
            Some('%') => {
                self.advance();
                2
            }
            Some(c) if c.is_ascii_digit() => 10,
            other => return Err(format!("Expected a number, found {:?}", other)),
        };
        let word = self.read_word();
        if word.is_empty() {
            return Err("Expected digits after the radix prefix".to_string());
        }
        Ok((word, radix))
    }

    /// After a pragma value: true if a comma (and therefore another value)
    /// follows.
    fn comma_follows(&mut self) -> Result<bool, String> {
        self.skip_whitespace();
        match self.peek() {
            Some(',') => {
                self.advance();
                Ok(true)
            }
            Some(';') => {
                self.skip_comment()?;
                Ok(false)
            }
            None => Ok(false),
            Some(c) => Err(format!("Expected a comma or end of line, found \"{}\"", c)),
        }
    }

    fn expect_end_of_line(&mut self) -> Result<(), String> {
        self.skip_whitespace();
        match self.peek() {
            None => Ok(()),
            Some(';') => self.skip_comment(),
            Some(c) => Err(format!("Unexpected trailing character \"{}\"", c)),
        }
    }

    fn skip_comment(&mut self) -> Result<(), String> {
        while self.next().is_some() {}
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            word.push(self.next().unwrap());
        }
        word
    }

    fn expect(&mut self, value: char) -> Result<(), String> {
        match self.next() {
            Some(c) if c == value => Ok(()),
            other => Err(format!("Expected \"{}\", found {:?}", value, other)),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.characters.peek().copied()
    }

    fn advance(&mut self) {
        self.next();
    }

    fn next(&mut self) -> Option<char> {
        let character = self.characters.next();
        if character.is_some() {
            self.column += 1;
        }
        character
    }
}
