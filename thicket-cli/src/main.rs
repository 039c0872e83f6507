//! Thicket CLI
//!
//! Parses an HTML file (or an inline string) and prints the node tree, the
//! token stream, or the extracted text. Diagnostics go to stderr.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use thicket_common::warning::{clear_warnings, error, warn_once};
use thicket_dom::Node;
use thicket_html::{Parsed, lex, parse};

/// Thicket - error-tolerant HTML parser
#[derive(Parser, Debug)]
#[command(name = "thicket")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the node tree of a file
    thicket ./index.html

    # Parse inline HTML and dump it as JSON
    thicket --json --html '<p class=a>Hi &amp; bye</p>'

    # Show the token stream
    thicket --tokens ./index.html

    # Text of the first <article> element
    thicket --find article --text ./index.html
"#)]
struct Cli {
    /// Path to the HTML file to parse
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse HTML string directly instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Print the tree as JSON
    #[arg(long)]
    json: bool,

    /// Print the token stream instead of the tree
    #[arg(long)]
    tokens: bool,

    /// Print the concatenated text instead of the tree
    #[arg(long, conflicts_with = "json")]
    text: bool,

    /// Only show the first element with this tag name
    #[arg(long, value_name = "NAME")]
    find: Option<String>,

    /// Don't report warnings
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let input = load_input(&cli)?;

    if cli.tokens {
        let lexed = lex(&input);
        for token in &lexed.tokens {
            println!("{token}");
        }
        if let Some(fatal) = lexed.fatal {
            error("lexer", &fatal.to_string());
            return Ok(ExitCode::FAILURE);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let parsed = parse(&input);
    report(&parsed, cli.quiet);

    let root = match cli.find.as_deref() {
        Some(name) => parsed.document.find(name),
        None => &parsed.document,
    };
    if root.is_invalid() {
        error("query", &format!("no <{}> element", cli.find.as_deref().unwrap_or_default()));
        return Ok(ExitCode::FAILURE);
    }
    print_node(root, &cli)?;

    Ok(if parsed.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Read the input bytes from `--html` or the file argument
fn load_input(cli: &Cli) -> Result<Vec<u8>> {
    if let Some(ref html) = cli.html {
        Ok(html.clone().into_bytes())
    } else if let Some(ref path) = cli.path {
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))
    } else {
        anyhow::bail!("expected a file path or --html")
    }
}

fn report(parsed: &Parsed, quiet: bool) {
    clear_warnings();
    if !quiet {
        for warning in &parsed.warnings {
            warn_once("HTML", &warning.to_string());
        }
    }
    if let Some(ref fatal) = parsed.fatal {
        error("HTML", &fatal.to_string());
    }
}

fn print_node(node: &Node, cli: &Cli) -> Result<()> {
    if cli.text {
        println!("{}", node.text());
    } else if cli.json {
        println!("{}", serde_json::to_string_pretty(node)?);
    } else {
        print!("{}", node.pretty_tree());
    }
    Ok(())
}
