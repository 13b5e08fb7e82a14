use crate::unroll::Instruction;
use crate::vm::VmError;

/// Integer codes for the flat-instruction opcodes, consumed by native
/// execution backends that cannot share the [`Instruction`] enum.
pub const CHANGE_VALUE: i32 = 0;
pub const CHANGE_POINTER: i32 = 1;
pub const GET: i32 = 2;
pub const PUT: i32 = 3;
pub const BRANCH_IF_ZERO: i32 = 4;
pub const BRANCH_NOT_ZERO: i32 = 5;

/// Encode a flat program into order-preserving `(code, operand)` pairs.
pub fn encode(program: &[Instruction]) -> Vec<(i32, isize)> {
    program
        .iter()
        .map(|instruction| match instruction {
            Instruction::ChangeValue(delta) => (CHANGE_VALUE, *delta),
            Instruction::ChangePointer(delta) => (CHANGE_POINTER, *delta),
            Instruction::Get(count) => (GET, *count as isize),
            Instruction::Put(count) => (PUT, *count as isize),
            Instruction::BranchIfZero(offset) => (BRANCH_IF_ZERO, *offset),
            Instruction::BranchNotZero(offset) => (BRANCH_NOT_ZERO, *offset),
        })
        .collect()
}

/// Decode `(code, operand)` pairs back into instructions. A code outside the
/// table fails with `InvalidCommand`.
pub fn decode(pairs: &[(i32, isize)]) -> Result<Vec<Instruction>, VmError> {
    pairs
        .iter()
        .map(|(code, operand)| match *code {
            CHANGE_VALUE => Ok(Instruction::ChangeValue(*operand)),
            CHANGE_POINTER => Ok(Instruction::ChangePointer(*operand)),
            GET => Ok(Instruction::Get(*operand as usize)),
            PUT => Ok(Instruction::Put(*operand as usize)),
            BRANCH_IF_ZERO => Ok(Instruction::BranchIfZero(*operand)),
            BRANCH_NOT_ZERO => Ok(Instruction::BranchNotZero(*operand)),
            code => Err(VmError::InvalidCommand(code)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_every_opcode_with_its_table_entry() {
        let program = vec![
            Instruction::ChangeValue(-3),
            Instruction::ChangePointer(2),
            Instruction::Get(1),
            Instruction::Put(4),
            Instruction::BranchIfZero(5),
            Instruction::BranchNotZero(-3),
        ];
        assert_eq!(
            encode(&program),
            vec![(0, -3), (1, 2), (2, 1), (3, 4), (4, 5), (5, -3)]
        );
    }

    #[test]
    fn round_trips_losslessly() {
        let program = vec![
            Instruction::BranchIfZero(4),
            Instruction::ChangeValue(-1),
            Instruction::Put(2),
            Instruction::BranchNotZero(-2),
        ];
        assert_eq!(decode(&encode(&program)).unwrap(), program);
    }

    #[test]
    fn rejects_an_unknown_code() {
        let result = decode(&[(0, 1), (6, 0)]);
        assert!(matches!(result, Err(VmError::InvalidCommand(6))));
    }
}
