use clap::Parser;
use oberonc::{
    ast::{Node, Root},
    frontend::{lexer::scan, token::Token},
    passes::{Checker, Evaluator, NodeCounter, Printer},
    read,
    utils::config::printer::{DEFAULT_INDENT, MAX_INDENT},
    utils::errors::OberonResult,
    LineNumber,
};
use std::{path::PathBuf, time::Instant};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Front end for an Oberon declaration subset",
    long_about = "Front end for an Oberon declaration subset.\n\
                 Parses a module, then runs the requested passes over its syntax tree.\n\
                 \n\
                 Example usage:\n\
                 oberonc Sample.Mod --print          # Print canonical source\n\
                 oberonc Sample.Mod --check          # Report declaration errors\n\
                 oberonc Sample.Mod --eval           # Print constant values\n\
                 oberonc Sample.Mod --stats          # Node counts and timing\n\
                 oberonc Sample.Mod --show-ast       # Dump the syntax tree"
)]
struct Cli {
    // The module to read
    path: PathBuf,

    // Print the module back as canonical source
    #[arg(short, long)]
    print: bool,

    // Run declaration checks
    #[arg(short, long)]
    check: bool,

    // Evaluate every constant declaration
    #[arg(short, long)]
    eval: bool,

    // Show node counts per kind and phase timing
    #[arg(short, long)]
    stats: bool,

    // Show AST after parsing
    #[arg(long)]
    show_ast: bool,

    // Indent width used by --print
    #[arg(long, default_value_t = DEFAULT_INDENT, value_parser = validate_indent)]
    indent: usize,

    // Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Default)]
struct CompilationStats {
    lexer_time: f64,
    parser_time: f64,
    passes_time: f64,
    token_count: usize,
}

fn validate_indent(s: &str) -> Result<usize, String> {
    let indent: usize = s
        .parse()
        .map_err(|_| format!("Invalid indent width: {}", s))?;
    if indent > MAX_INDENT {
        return Err(format!("Indent width must be at most {}", MAX_INDENT));
    }
    Ok(indent)
}

// Print error message and exit with error code
fn fatal(msg: &str) -> ! {
    eprintln!("Error: {}", msg);
    std::process::exit(1);
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn lexical_analysis(source: &str, stats: &mut CompilationStats) -> OberonResult<Vec<(Token, usize)>> {
    let lexer_start = Instant::now();
    let mut state = LineNumber::default();
    let tokens = scan(&mut state, source)?;
    stats.lexer_time = lexer_start.elapsed().as_secs_f64();
    stats.token_count = tokens.len();
    info!(tokens = stats.token_count, "lexical analysis completed");
    Ok(tokens)
}

fn parsing_phase(tokens: &[(Token, usize)], stats: &mut CompilationStats) -> OberonResult<Root> {
    let parser_start = Instant::now();
    let root = oberonc::frontend::Parser::new(tokens).parse()?;
    stats.parser_time = parser_start.elapsed().as_secs_f64();
    info!(module = %root.module.name.name, "parsing completed");
    Ok(root)
}

/// Runs the requested passes. Returns false when the checker reported errors.
fn run_passes(root: &Root, args: &Cli, stats: &mut CompilationStats) -> OberonResult<bool> {
    let passes_start = Instant::now();
    let mut clean = true;

    if args.print {
        print!("{}", Printer::new(args.indent).print(root)?);
    }

    if args.check {
        let diagnostics = Checker::new().check(root)?;
        for diagnostic in diagnostics.diagnostics() {
            eprintln!("{}", diagnostic.render());
        }
        debug!(
            errors = diagnostics.error_count(),
            warnings = diagnostics.warning_count(),
            "checking completed"
        );
        clean = !diagnostics.has_errors();
    }

    if args.eval {
        let mut evaluator = Evaluator::new();
        root.accept(&mut evaluator)?;
        for (name, value) in evaluator.values() {
            println!("{} = {}", name, value);
        }
    }

    stats.passes_time = passes_start.elapsed().as_secs_f64();
    Ok(clean)
}

fn print_stats(root: &Root, stats: &CompilationStats) -> OberonResult<()> {
    let counter = NodeCounter::count_tree(root)?;
    println!("\nCompilation Statistics:");
    println!("  Lexical Analysis  {:>8.3}s", stats.lexer_time);
    println!("  Parsing           {:>8.3}s", stats.parser_time);
    println!("  Passes            {:>8.3}s", stats.passes_time);
    println!("\nCode Metrics:");
    println!("  Tokens:     {}", stats.token_count);
    println!("  AST Nodes:  {}", counter.total());
    for (kind, count) in counter.by_kind() {
        println!("    {:<24}{}", kind.name(), count);
    }
    Ok(())
}

fn compile(args: &Cli) -> OberonResult<bool> {
    let start_time = Instant::now();
    let mut stats = CompilationStats::default();
    info!(path = %args.path.display(), "starting");

    let source = read(&args.path)?;
    debug!(bytes = source.len(), "read input file");

    let tokens = lexical_analysis(&source, &mut stats)?;
    let root = parsing_phase(&tokens, &mut stats)?;

    if args.show_ast {
        println!("{:#?}", root);
    }

    let clean = run_passes(&root, args, &mut stats)?;

    if args.stats {
        print_stats(&root, &stats)?;
    }
    info!(seconds = start_time.elapsed().as_secs_f64(), "done");
    Ok(clean)
}

fn main() {
    let args = Cli::parse();
    init_logging(args.verbose);

    match compile(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => fatal(&e.to_string()),
    }
}
