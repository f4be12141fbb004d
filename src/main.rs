use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser as _;
use clap_stdin::MaybeStdin;

use rvcc::codegen::Codegen;
use rvcc::error::{Diagnostics, Result};
use rvcc::lexer::Lexer;
use rvcc::parser::Parser;

/// Compiles an integer expression into RV64 assembly.
#[derive(clap::Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Expression to compile, or `-` to read it from stdin
    #[arg(allow_hyphen_values = true)]
    input: MaybeStdin<String>,

    /// Write the assembly here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Label of the emitted entry point
    #[arg(long, default_value = "main")]
    entry: String,

    /// Print the token stream to stderr
    #[arg(long)]
    dump_tokens: bool,

    /// Print the parenthesized syntax tree to stderr
    #[arg(long)]
    dump_ast: bool,

    /// Print the syntax tree sideways to stderr
    #[arg(long)]
    dump_tree: bool,
}

fn run(args: &Args) -> Result<()> {
    let user_input: &str = &args.input;

    let tokens = Lexer::tokenize(user_input)?;
    if args.dump_tokens {
        for (i, t) in tokens.iter().enumerate() {
            eprintln!("{i}: {} {:?} @{}", t.kind, t.text(user_input), t.loc);
        }
    }

    let node = Parser::new(user_input, &tokens).parse()?;
    if args.dump_ast {
        eprintln!("{node}");
    }
    if args.dump_tree {
        node.write_tree(&mut io::stderr().lock())?;
    }

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path).map_err(|err| {
            Diagnostics::error(format!(
                "failed to create output file '{}': {err}",
                path.display()
            ))
        })?),
        None => Box::new(io::stdout().lock()),
    };

    let mut codegen = Codegen::new(BufWriter::new(out)).with_entry(&args.entry);
    codegen.generate(&node)?;
    codegen.into_inner().flush()?;
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(err) = run(&args) {
        eprintln!("{err}");
        process::exit(1);
    }
}
