use std::fmt::Debug;

use super::ConsumerError;

/// A generic backtracking cursor over an ordered sequence of tokens.
///
/// Every primitive either succeeds and advances the cursor, or fails and
/// leaves it where it was; `attempt` and `many` additionally roll the cursor
/// back to the position before a failing sub-parse, so a failure never leaks
/// partial advancement to the caller.
#[derive(Debug, Clone)]
pub struct Consumer<T> {
    tokens: Vec<T>,
    cursor: usize,
}

impl<T: Clone + Debug + PartialEq> Consumer<T> {
    pub fn new(tokens: Vec<T>) -> Consumer<T> {
        Consumer { tokens, cursor: 0 }
    }

    /// Current position of the consumption, `0 <= cursor <= tokens.len()`.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor to the given position.
    pub fn seek(&mut self, n: usize) {
        self.cursor = n;
    }

    pub fn end_of_input(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// Look at the next token without advancing.
    pub fn peek(&self) -> Result<T, ConsumerError> {
        self.tokens
            .get(self.cursor)
            .cloned()
            .ok_or(ConsumerError::EndOfInput)
    }

    /// Look at the next token and advance past it.
    pub fn advance(&mut self) -> Result<T, ConsumerError> {
        let tok = self.peek()?;
        self.cursor += 1;
        Ok(tok)
    }

    /// Advance past the next token if it satisfies the predicate; fails with
    /// `EndOfInput` when nothing remains and `Unsatisfied` when the predicate
    /// rejects the token.
    pub fn satisfy<P>(&mut self, message: &str, predicate: P) -> Result<T, ConsumerError>
    where
        P: Fn(&T) -> bool,
    {
        let tok = self.peek()?;
        if !predicate(&tok) {
            return Err(ConsumerError::Unsatisfied(format!("{message} {tok:?}")));
        }
        self.cursor += 1;
        Ok(tok)
    }

    /// Declare that the next token should equal the given token.
    pub fn eq(&mut self, expected: T) -> Result<T, ConsumerError> {
        self.satisfy(&format!("expected {expected:?}, got"), |tok| {
            *tok == expected
        })
    }

    /// Declare that the next token should be one of the given tokens.
    pub fn one_of(&mut self, expected: &[T]) -> Result<T, ConsumerError> {
        self.satisfy(&format!("expected one of {expected:?}, got"), |tok| {
            expected.contains(tok)
        })
    }

    /// Run a sub-parse, resetting the cursor on failure. The failure itself
    /// is swallowed; callers only see whether the block produced a value.
    pub fn attempt<R, F>(&mut self, block: F) -> Option<R>
    where
        F: FnOnce(&mut Self) -> Result<R, ConsumerError>,
    {
        let idx = self.cursor;
        match block(self) {
            Ok(result) => Some(result),
            Err(_) => {
                self.seek(idx);
                None
            }
        }
    }

    /// Collect zero or more occurrences of the given block. The cursor is
    /// restored to the position before the failing iteration; prior results
    /// are kept. Never fails.
    pub fn many<R, F>(&mut self, mut block: F) -> Vec<R>
    where
        F: FnMut(&mut Self) -> Result<R, ConsumerError>,
    {
        let mut results = vec![];
        loop {
            let idx = self.cursor;
            match block(self) {
                Ok(result) => results.push(result),
                Err(_) => {
                    self.seek(idx);
                    break results;
                }
            }
        }
    }

    /// Like `many`, but fails with `Unsatisfied` when zero results were
    /// collected.
    pub fn many_one<R, F>(&mut self, block: F) -> Result<Vec<R>, ConsumerError>
    where
        F: FnMut(&mut Self) -> Result<R, ConsumerError>,
    {
        let results = self.many(block);
        if results.is_empty() {
            return Err(ConsumerError::Unsatisfied("many_one: got no results".into()));
        }
        Ok(results)
    }
}
