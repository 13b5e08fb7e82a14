use crate::lexer::Node;

use super::Instruction;

/// Flatten a syntax forest into a linear instruction list, replacing each
/// loop with a pair of conditional branches spanning its body.
pub fn unroll(forest: &[Node]) -> Vec<Instruction> {
    let mut instructions = vec![];
    unroll_into(&mut instructions, forest);
    instructions
}

fn unroll_into(instructions: &mut Vec<Instruction>, forest: &[Node]) {
    for node in forest {
        match node {
            Node::ValueChange(delta) => instructions.push(Instruction::ChangeValue(*delta)),
            Node::PointerChange(delta) => instructions.push(Instruction::ChangePointer(*delta)),
            Node::Input(count) => instructions.push(Instruction::Get(*count)),
            Node::Output(count) => instructions.push(Instruction::Put(*count)),
            Node::Loop(body) => {
                // because of recursion we need to count how many
                // sub-instructions the body produced; inner loops have
                // already fixed their own offsets by the time we get here
                let start = instructions.len();
                unroll_into(instructions, body);
                let offset = (instructions.len() - start) as isize;

                // i.e. for [+] this is BranchIfZero(3) & BranchNotZero(-1):
                // the entry branch jumps past the exit branch, and the exit
                // branch jumps back to just after the entry branch
                instructions.insert(start, Instruction::BranchIfZero(offset + 2));
                instructions.push(Instruction::BranchNotZero(-offset));
            }
        }
    }
}
