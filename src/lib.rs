//! A flattening Brainfuck compile/execute pipeline.
//!
//! Source characters are parsed into command symbols, lexed into a syntax
//! tree with coalesced runs, unrolled into a flat branch program, and
//! executed by a virtual machine over a growable memory tape. Data flows
//! strictly forward; no stage revisits an earlier one.

pub mod consumer;
pub mod encoder;
pub mod lexer;
pub mod parser;
pub mod unroll;
pub mod vm;

use std::io::{self, Read, Write};

use thiserror::Error;

use crate::consumer::ConsumerError;
use crate::parser::parser::Parser;
use crate::parser::Command;
use crate::unroll::Instruction;
use crate::vm::machine::VirtualMachine;
use crate::vm::VmError;

/// Any fatal condition the pipeline can surface to a caller. There is no
/// partial-success mode: a run either terminates normally or produces
/// exactly one of these.
#[derive(Error, Debug)]
pub enum Error {
    #[error("compile error: {0}")]
    Compile(#[from] ConsumerError),

    #[error("execution error: {0}")]
    Execution(#[from] VmError),

    #[error("IO Error")]
    Io(
        #[from]
        std::io::Error,
    ),
}

/// Compile a source down to its flat instruction list without executing it.
pub fn compile(source: impl Read) -> Result<Vec<Instruction>, Error> {
    let tokens = Parser::parse(source).collect::<io::Result<Vec<Command>>>()?;
    let forest = lexer::lexer::run(tokens)?;
    Ok(unroll::unroll::unroll(&forest))
}

/// Compile and execute a source against the given I/O streams.
///
/// The source is any readable stream; raw text is passed as bytes
/// (`source.as_bytes()`). `eof_value` is what `,` stores once the input
/// stream is exhausted.
pub fn evaluate<S, R, W>(source: S, input: R, output: W, eof_value: u8) -> Result<(), Error>
where
    S: Read,
    R: Read,
    W: Write,
{
    let program = compile(source)?;
    let mut vm = VirtualMachine::new(input, output, eof_value);
    vm.load(program);
    vm.execute()?;
    Ok(())
}
