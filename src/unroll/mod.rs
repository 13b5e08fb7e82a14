pub mod unroll;

/// One instruction of the flattened program.
///
/// Branch operands are signed offsets relative to the branching instruction's
/// own index, never absolute addresses, so a flattened sub-program stays
/// position-independent until it is concatenated into place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Add the delta to the byte at the memory cursor, wrapping modulo 256
    ChangeValue(isize),

    /// Add the delta to the memory cursor itself
    ChangePointer(isize),

    /// Read from the input stream this many times, keeping the last byte
    Get(usize),

    /// Write the current cell to the output stream this many times
    Put(usize),

    /// Add the offset to the program counter if the current cell is zero
    BranchIfZero(isize),

    /// Add the offset to the program counter if the current cell is non-zero
    BranchNotZero(isize),
}
