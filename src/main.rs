use std::{
    collections::HashSet,
    fs::File,
    io::{self},
    time::Instant,
};

use clap::{command, Parser, ValueEnum};
use colored::Colorize;

use brainflat::{encoder, lexer, parser, unroll, vm::machine::VirtualMachine};

/// Brainf**k flattening compiler/VM
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The file to operate on
    #[arg()]
    file: String,

    #[arg(value_enum)]
    commands: Vec<Commands>,

    /// Value stored by `,` once the input stream is exhausted
    #[arg(short, long, default_value_t = 0)]
    eof_value: u8,
}

#[derive(ValueEnum, Debug, Clone, Hash, PartialEq, Eq)]
enum Commands {
    /// Output the parsed command symbols
    Tokens,
    /// Output the syntax tree
    Ast,
    /// Output the flattened instructions
    Instructions,
    /// Output the encoded (code, operand) pairs
    Encoded,

    /// Compile only, don't execute
    NoRun,
}

fn main() -> Result<(), ()> {
    let args = Args::parse();
    let commands: HashSet<Commands> = HashSet::from_iter(args.commands.into_iter());

    println!("Running {}", args.file);

    let source = File::open(&args.file)
        .map_err(|e| eprintln!("{}: {}: {}", "Error".red(), args.file, e))?;

    println!("{}", "Starting parsing".blue());
    let mut now = Instant::now();
    let tokens = parser::parser::Parser::parse(source)
        .collect::<io::Result<Vec<_>>>()
        .map_err(|e| eprintln!("{}: {}", "Error".red(), e))?;
    println!("{} {:.2?}", "Finished parsing in".green(), now.elapsed());

    if commands.contains(&Commands::Tokens) {
        for token in tokens.iter() {
            print!("{}", token.to_char());
        }
        println!();
    }

    println!("{}", "Starting lexing".blue());
    now = Instant::now();
    let forest = lexer::lexer::run(tokens).map_err(|e| eprintln!("{}: {}", "Error".red(), e))?;
    println!("{} {:.2?}", "Finished lexing in".green(), now.elapsed());

    if commands.contains(&Commands::Ast) {
        println!("{:#?}", forest);
    }

    println!("{}", "Starting unrolling".blue());
    now = Instant::now();
    let program = unroll::unroll::unroll(&forest);
    println!(
        "{} {} {} {:.2?}",
        "Finished unrolling".green(),
        program.len(),
        "instructions in".green(),
        now.elapsed()
    );

    if commands.contains(&Commands::Instructions) {
        println!("{:?}", program);
    }

    if commands.contains(&Commands::Encoded) {
        println!("{:?}", encoder::encode(&program));
    }

    if !commands.contains(&Commands::NoRun) {
        println!("{}", "Starting virtual machine".blue());
        now = Instant::now();
        let mut vm = VirtualMachine::new(io::stdin(), io::stdout(), args.eof_value);
        vm.load(program);
        vm.execute()
            .map_err(|e| eprintln!("{}: {}", "Error".red(), e))?;
        println!();
        println!(
            "{} {:.2?}",
            "Finished virtual machine in".green(),
            now.elapsed()
        );
    }

    Ok(())
}
