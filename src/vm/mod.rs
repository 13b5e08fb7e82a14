use thiserror::Error;

pub mod machine;

/// Fatal execution errors. Unlike the compile-stage signals these are never
/// recovered; they abort the run and surface verbatim to the caller.
#[derive(Error, Debug)]
pub enum VmError {
    #[error("the memory cursor went below zero")]
    MemoryOutOfBounds,

    #[error("invalid command code: {0}")]
    InvalidCommand(i32),

    #[error("IO Error")]
    Io(
        #[from]
        std::io::Error,
    ),
}
