use clap::Parser;
use std::{io, path::PathBuf, time::Instant};
use tipsi::errors::TipsResult;
use tipsi::interpreter::Interpreter;
use tipsi::lexer::scan;
use tipsi::symboltable::SymbolTable;
use tipsi::LineNumber;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "TIPS subset interpreter",
    long_about = "Interpreter for the TIPS teaching-language subset.\n\
                 Takes a TIPS source file, performs lexical analysis and parsing\n\
                 with declaration checking, then executes the program tree.\n\
                 \n\
                 Example usage:\n\
                 tipsi input.tips                  # Parse and run the program\n\
                 tipsi input.tips --show-ast       # Display abstract syntax tree\n\
                 tipsi input.tips --verbose        # Verbose stage output\n\
                 tipsi input.tips --timing         # Show run timing"
)]
struct Cli {
    // The path to the file to run
    path: PathBuf,

    // Show AST after parsing
    #[arg(long)]
    show_ast: bool,

    // Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    // Show parse and run timing
    #[arg(short, long)]
    timing: bool,
}

fn run(cli: &Cli) -> TipsResult<()> {
    let start = Instant::now();
    let source = tipsi::read(&cli.path)?;

    let mut state = LineNumber::default();
    let tokens = scan(&mut state, &source)?;
    if cli.verbose {
        println!("Scanned {} tokens", tokens.len());
    }

    let mut table = SymbolTable::new();
    let mut parser = tipsi::parser::Parser::new(&tokens);
    let program = parser.parse(&mut table)?;
    if cli.verbose {
        println!("Parsed program '{}' with {} declarations", program.name, table.len());
    }
    let parse_time = start.elapsed();

    if cli.show_ast {
        print!("{}", program.render_tree());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut interpreter = Interpreter::new(&mut table, stdin.lock(), stdout.lock());
    interpreter.run(&program)?;

    if cli.timing {
        let total = start.elapsed();
        println!("Parse: {:.3}ms", parse_time.as_secs_f64() * 1000.0);
        println!("Total: {:.3}ms", total.as_secs_f64() * 1000.0);
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
