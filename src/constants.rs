pub mod memory_range {
    /// The stack is hardwired to page 0x01 (0x0100-0x01ff) and indexed by
    /// the S register.
    pub const STACK_PAGE: u8 = 0x01;
}

/// The hardware vectors live at the top of the address space. Only the reset
/// and IRQ/BRK vectors are read by this core; NMI delivery is a host concern.
pub enum InterruptVectors {
    ResetVector = 0xFFFC,
    IrqBrkVector = 0xFFFE,
}

/// Conventional load address for raw test programs. The loader points the
/// reset vector here; the core itself only cares about the vector.
pub const PROGRAM_START: u16 = 0x0600;
