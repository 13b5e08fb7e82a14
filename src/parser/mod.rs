pub mod parser;

/// Maximum number of bytes to request from the source at a time.
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// One recognized character of the source language. Everything the character
/// table below does not map is a comment and never becomes a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // `+`: Increment the byte at the memory cursor by one
    Increment,
    // `-`: Decrement the byte at the memory cursor by one
    Decrement,

    // `>`: Increment the memory cursor by one
    MoveRight,
    // `<`: Decrement the memory cursor by one
    MoveLeft,

    // `,`: Read the next byte from the input stream into the current cell
    Input,
    // `.`: Write the current cell to the output stream
    Output,

    // `[`: If the current cell is zero, jump past the matching `]`
    LoopStart,
    // `]`: If the current cell is non-zero, jump back past the matching `[`
    LoopEnd,
}

impl Command {
    /// The fixed character-to-command table.
    pub fn from_char(c: char) -> Option<Command> {
        match c {
            '+' => Some(Command::Increment),
            '-' => Some(Command::Decrement),
            '>' => Some(Command::MoveRight),
            '<' => Some(Command::MoveLeft),
            ',' => Some(Command::Input),
            '.' => Some(Command::Output),
            '[' => Some(Command::LoopStart),
            ']' => Some(Command::LoopEnd),
            _ => None,
        }
    }

    /// The source character this command was parsed from.
    pub fn to_char(self) -> char {
        match self {
            Command::Increment => '+',
            Command::Decrement => '-',
            Command::MoveRight => '>',
            Command::MoveLeft => '<',
            Command::Input => ',',
            Command::Output => '.',
            Command::LoopStart => '[',
            Command::LoopEnd => ']',
        }
    }
}
