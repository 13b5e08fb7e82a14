use thiserror::Error;

pub mod consumer;

/// Failures signalled by [`consumer::Consumer`] primitives. Both variants are
/// ordinary control flow inside `attempt`/`many`; they only become a compile
/// error when one escapes the outermost lex call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsumerError {
    #[error("end of input")]
    EndOfInput,

    #[error("unsatisfied: {0}")]
    Unsatisfied(String),
}
