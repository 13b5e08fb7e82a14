pub mod lexer;

/// One node of the syntax tree. Runs of like commands are already coalesced
/// here: the lexer folds a maximal run of `+`/`-` into a single `ValueChange`
/// carrying the net delta, and likewise for the other run classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Net change to the byte at the memory cursor
    ValueChange(isize),

    /// Net change to the memory cursor itself
    PointerChange(isize),

    /// Read from the input stream this many times, keeping the last byte
    Input(usize),

    /// Write the current cell to the output stream this many times
    Output(usize),

    /// A bracketed region; the body is owned exclusively and may nest
    Loop(Vec<Node>),
}
