use std::io::{ErrorKind, Read, Write};

use crate::unroll::Instruction;

use super::VmError;

/// Executes a flattened program against a growable memory tape and two
/// byte-oriented I/O streams.
///
/// The tape starts as a single zero cell, grows zero-filled whenever the
/// cursor moves past its end, and never shrinks. It is bounded at zero on
/// the left: moving the cursor below zero is a fatal error, not a wrap.
pub struct VirtualMachine<R, W> {
    memory: Vec<u8>,
    cursor: usize,
    program: Vec<Instruction>,
    program_counter: usize,

    input: R,
    output: W,
    eof_value: u8,
}

/// Snapshot of the VM's internal state, for inspection and testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VmState {
    pub cursor: usize,
    pub memory_size: usize,
    pub program_counter: usize,
    pub current_value: u8,
}

impl<R: Read, W: Write> VirtualMachine<R, W> {
    pub fn new(input: R, output: W, eof_value: u8) -> Self {
        Self {
            memory: vec![0],
            cursor: 0,
            program: vec![],
            program_counter: 0,
            input,
            output,
            eof_value,
        }
    }

    /// Load a program, resetting the tape, cursor, and program counter.
    pub fn load(&mut self, program: Vec<Instruction>) {
        self.program = program;
        self.program_counter = 0;
        self.memory = vec![0];
        self.cursor = 0;
    }

    /// Run the loaded program to completion or to a fatal error. The run
    /// terminates normally when the program counter moves off the end of the
    /// instruction list.
    pub fn execute(&mut self) -> Result<(), VmError> {
        while self.program_counter < self.program.len() {
            match self.program[self.program_counter] {
                Instruction::ChangeValue(delta) => {
                    let cell = &mut self.memory[self.cursor];
                    *cell = (*cell as isize + delta).rem_euclid(256) as u8;
                    self.program_counter += 1;
                }
                Instruction::ChangePointer(delta) => {
                    self.shift_cursor(delta)?;
                    self.program_counter += 1;
                }
                Instruction::Get(count) => {
                    self.get(count)?;
                    self.program_counter += 1;
                }
                Instruction::Put(count) => {
                    self.put(count)?;
                    self.program_counter += 1;
                }
                Instruction::BranchIfZero(offset) => {
                    if self.memory[self.cursor] == 0 {
                        self.branch(offset);
                    } else {
                        self.program_counter += 1;
                    }
                }
                Instruction::BranchNotZero(offset) => {
                    if self.memory[self.cursor] != 0 {
                        self.branch(offset);
                    } else {
                        self.program_counter += 1;
                    }
                }
            }
        }
        Ok(())
    }

    pub fn state(&self) -> VmState {
        VmState {
            cursor: self.cursor,
            memory_size: self.memory.len(),
            program_counter: self.program_counter,
            current_value: self.memory[self.cursor],
        }
    }

    fn branch(&mut self, offset: isize) {
        // the offset replaces the normal +1 advance
        self.program_counter = self.program_counter.wrapping_add_signed(offset);
    }

    fn shift_cursor(&mut self, delta: isize) -> Result<(), VmError> {
        let target = (self.cursor as isize)
            .checked_add(delta)
            .filter(|target| *target >= 0)
            .ok_or(VmError::MemoryOutOfBounds)?;
        self.cursor = target as usize;
        if self.cursor >= self.memory.len() {
            self.memory.resize(self.cursor + 1, 0);
        }
        Ok(())
    }

    /// Read one byte from the input stream `count` times, keeping only the
    /// last value read; an exhausted stream stores the configured EOF value.
    fn get(&mut self, count: usize) -> Result<(), VmError> {
        for _ in 0..count {
            self.memory[self.cursor] = match self.read_byte()? {
                Some(byte) => byte,
                None => self.eof_value,
            };
        }
        Ok(())
    }

    fn read_byte(&mut self) -> Result<Option<u8>, VmError> {
        let mut byte = [0u8; 1];
        loop {
            match self.input.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Write the byte at the memory cursor to the output stream `count`
    /// times.
    fn put(&mut self, count: usize) -> Result<(), VmError> {
        let byte = self.memory[self.cursor];
        for _ in 0..count {
            self.output.write_all(&[byte])?;
        }
        self.output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(program: Vec<Instruction>) -> Result<VmState, VmError> {
        run_with_io(program, b"", &mut Vec::new(), 0)
    }

    fn run_with_io(
        program: Vec<Instruction>,
        input: &[u8],
        output: &mut Vec<u8>,
        eof_value: u8,
    ) -> Result<VmState, VmError> {
        let mut vm = VirtualMachine::new(input, output, eof_value);
        vm.load(program);
        vm.execute()?;
        Ok(vm.state())
    }

    #[test]
    fn change_value_accumulates_signed_deltas() {
        let state = run(vec![
            Instruction::ChangeValue(-4),
            Instruction::ChangeValue(7),
        ])
        .unwrap();
        assert_eq!(state.current_value, 3);
        assert_eq!(state.program_counter, 2);
    }

    #[test]
    fn change_value_wraps_modulo_the_cell_width() {
        let state = run(vec![Instruction::ChangeValue(-4)]).unwrap();
        assert_eq!(state.current_value, 252);

        let state = run(vec![Instruction::ChangeValue(300)]).unwrap();
        assert_eq!(state.current_value, 44);
    }

    #[test]
    fn change_pointer_moves_the_cursor_and_grows_the_tape() {
        let state = run(vec![
            Instruction::ChangePointer(100),
            Instruction::ChangePointer(-65),
        ])
        .unwrap();
        assert_eq!(state.cursor, 35);
        assert_eq!(state.memory_size, 101);
    }

    #[test]
    fn change_pointer_below_zero_is_out_of_bounds() {
        let result = run(vec![
            Instruction::ChangePointer(3),
            Instruction::ChangePointer(-4),
        ]);
        assert!(matches!(result, Err(VmError::MemoryOutOfBounds)));
    }

    #[test]
    fn grown_cells_are_zero_filled() {
        let state = run(vec![Instruction::ChangePointer(64)]).unwrap();
        assert_eq!(state.current_value, 0);
    }

    #[test]
    fn get_stores_the_last_of_count_reads() {
        let mut output = Vec::new();
        let state = run_with_io(vec![Instruction::Get(2)], b"ABC", &mut output, 0).unwrap();
        assert_eq!(state.current_value, b'B');
    }

    #[test]
    fn get_on_an_exhausted_stream_stores_the_eof_value() {
        let mut output = Vec::new();
        let state = run_with_io(vec![Instruction::Get(1)], b"", &mut output, 7).unwrap();
        assert_eq!(state.current_value, 7);
    }

    #[test]
    fn put_repeats_the_current_cell() {
        let mut output = Vec::new();
        run_with_io(
            vec![Instruction::ChangeValue(b'x' as isize), Instruction::Put(3)],
            b"",
            &mut output,
            0,
        )
        .unwrap();
        assert_eq!(output, b"xxx");
    }

    #[test]
    fn branch_if_zero_skips_by_the_offset_when_the_cell_is_zero() {
        // entry branch taken, the ChangeValue in the body never runs
        let state = run(vec![
            Instruction::BranchIfZero(3),
            Instruction::ChangeValue(1),
            Instruction::BranchNotZero(-1),
        ])
        .unwrap();
        assert_eq!(state.current_value, 0);
        assert_eq!(state.program_counter, 3);
    }

    #[test]
    fn a_countdown_loop_runs_until_the_cell_is_zero() {
        // 5 [-] as flattened by unroll
        let state = run(vec![
            Instruction::ChangeValue(5),
            Instruction::BranchIfZero(3),
            Instruction::ChangeValue(-1),
            Instruction::BranchNotZero(-1),
        ])
        .unwrap();
        assert_eq!(state.current_value, 0);
        assert_eq!(state.program_counter, 4);
    }

    #[test]
    fn an_empty_program_terminates_immediately() {
        let state = run(vec![]).unwrap();
        assert_eq!(state.program_counter, 0);
        assert_eq!(state.cursor, 0);
        assert_eq!(state.memory_size, 1);
    }
}
