use crate::consumer::consumer::Consumer;
use crate::consumer::ConsumerError;
use crate::parser::Command;

use super::Node;

/// Lex a command sequence into a syntax tree.
///
/// Fails with `Unsatisfied` when input remains after top-level parsing
/// completes (e.g. a stray `]`, or a `[` whose terminator was never found and
/// whose partial parse was rolled back).
pub fn run(tokens: Vec<Command>) -> Result<Vec<Node>, ConsumerError> {
    let mut consumer = Consumer::new(tokens);
    let forest = commands(&mut consumer);
    match consumer.peek() {
        Err(ConsumerError::EndOfInput) => Ok(forest),
        Ok(tok) => Err(ConsumerError::Unsatisfied(format!(
            "unexpected token {tok:?}"
        ))),
        Err(e) => Err(e),
    }
}

fn commands(consumer: &mut Consumer<Command>) -> Vec<Node> {
    consumer.many(command)
}

fn command(consumer: &mut Consumer<Command>) -> Result<Node, ConsumerError> {
    match consumer.peek()? {
        Command::Increment | Command::Decrement => change_value(consumer),
        Command::MoveRight | Command::MoveLeft => change_pointer(consumer),
        Command::Input => get(consumer),
        Command::Output => put(consumer),
        Command::LoopStart => while_loop(consumer),
        tok => Err(ConsumerError::Unsatisfied(format!(
            "unexpected token {tok:?}"
        ))),
    }
}

fn while_loop(consumer: &mut Consumer<Command>) -> Result<Node, ConsumerError> {
    consumer.eq(Command::LoopStart)?;
    let body = commands(consumer);
    consumer.eq(Command::LoopEnd)?;
    Ok(Node::Loop(body))
}

fn change_value(consumer: &mut Consumer<Command>) -> Result<Node, ConsumerError> {
    let toks = consumer.many_one(|c| c.one_of(&[Command::Increment, Command::Decrement]))?;
    let delta = toks
        .iter()
        .map(|tok| if *tok == Command::Increment { 1 } else { -1 })
        .sum();
    Ok(Node::ValueChange(delta))
}

fn change_pointer(consumer: &mut Consumer<Command>) -> Result<Node, ConsumerError> {
    let toks = consumer.many_one(|c| c.one_of(&[Command::MoveRight, Command::MoveLeft]))?;
    let delta = toks
        .iter()
        .map(|tok| if *tok == Command::MoveRight { 1 } else { -1 })
        .sum();
    Ok(Node::PointerChange(delta))
}

fn get(consumer: &mut Consumer<Command>) -> Result<Node, ConsumerError> {
    let count = consumer.many_one(|c| c.eq(Command::Input))?.len();
    Ok(Node::Input(count))
}

fn put(consumer: &mut Consumer<Command>) -> Result<Node, ConsumerError> {
    let count = consumer.many_one(|c| c.eq(Command::Output))?.len();
    Ok(Node::Output(count))
}

#[cfg(test)]
mod tests {
    use std::io;

    use crate::parser::parser::Parser;

    use super::*;

    fn lex(source: &str) -> Result<Vec<Node>, ConsumerError> {
        let tokens = Parser::parse(source.as_bytes())
            .collect::<io::Result<Vec<_>>>()
            .unwrap();
        run(tokens)
    }

    #[test]
    fn an_empty_source_lexes_to_an_empty_forest() {
        assert_eq!(lex(""), Ok(vec![]));
    }

    #[test]
    fn a_value_run_collapses_to_its_signed_sum() {
        assert_eq!(lex("+++--"), Ok(vec![Node::ValueChange(1)]));
        assert_eq!(lex("--"), Ok(vec![Node::ValueChange(-2)]));
    }

    #[test]
    fn a_pointer_run_collapses_to_its_signed_sum() {
        assert_eq!(lex(">><"), Ok(vec![Node::PointerChange(1)]));
    }

    #[test]
    fn io_runs_collapse_to_repetition_counts() {
        assert_eq!(
            lex(",,,.."),
            Ok(vec![Node::Input(3), Node::Output(2)])
        );
    }

    #[test]
    fn mixed_runs_split_at_class_boundaries() {
        assert_eq!(
            lex("++>>--"),
            Ok(vec![
                Node::ValueChange(2),
                Node::PointerChange(2),
                Node::ValueChange(-2),
            ])
        );
    }

    #[test]
    fn a_loop_owns_its_lexed_body() {
        assert_eq!(
            lex("[+>]"),
            Ok(vec![Node::Loop(vec![
                Node::ValueChange(1),
                Node::PointerChange(1),
            ])])
        );
    }

    #[test]
    fn loops_nest_arbitrarily() {
        assert_eq!(
            lex("[[[-]]]"),
            Ok(vec![Node::Loop(vec![Node::Loop(vec![Node::Loop(vec![
                Node::ValueChange(-1)
            ])])])])
        );
    }

    #[test]
    fn an_empty_loop_has_an_empty_body() {
        assert_eq!(lex("[]"), Ok(vec![Node::Loop(vec![])]));
    }

    #[test]
    fn an_unterminated_loop_is_unsatisfied() {
        assert!(matches!(lex("[+"), Err(ConsumerError::Unsatisfied(_))));
    }

    #[test]
    fn a_stray_loop_end_is_unsatisfied() {
        assert!(matches!(lex("+]"), Err(ConsumerError::Unsatisfied(_))));
        assert!(matches!(lex("]"), Err(ConsumerError::Unsatisfied(_))));
    }
}
