use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use itertools::Itertools;
use log::{info, LevelFilter};
use symm::interpreter::syntax::expression_tree::{Notation, Substitutions};
use symm::interpreter::{parse, symbols_to_string, tokenize};

/// Parses, substitutes into and evaluates arithmetic expressions
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Arguments {
    /// The expression to evaluate, e.g. "n(n+1)/2"
    #[clap(required_unless_present = "demo")]
    expression: Option<String>,

    /// A value for a variable, e.g. "x=6". Can be given several times
    #[clap(
        short,
        long = "set",
        value_name = "VARIABLE=VALUE",
        multiple_occurrences(true),
        parse(try_from_str = parse_substitution)
    )]
    substitutions: Vec<(char, i64)>,

    /// Print the expression in postfix notation instead of infix
    #[clap(long)]
    postfix: bool,

    /// Print the expression tree
    #[clap(long)]
    tree: bool,

    /// Run the built-in sample expressions
    #[clap(long, conflicts_with = "expression")]
    demo: bool,

    #[clap(flatten)]
    verbose: Verbosity,
}

const DEMO_EXPRESSIONS: [&str; 7] = [
    "-2/5x + 3yz - .sqrt 7",
    "(-b+.sqrt(b^2-4ac))/(2a)",
    "n(n+1)(2n+1)/6",
    "a^b^c",
    "ab + bc + ac",
    "(x+y)(x-y) - x^2 + y^2",
    "a/b",
];

const DEMO_SUBSTITUTIONS: [(char, i64); 7] = [
    ('a', 2),
    ('b', 5),
    ('c', 3),
    ('n', 5),
    ('x', 6),
    ('y', 7),
    ('z', 8),
];

fn main() -> Result<()> {
    let args = Arguments::parse();
    env_logger::Builder::new()
        .filter_level(
            args.verbose
                .log_level()
                .map_or(LevelFilter::Off, |level| level.to_level_filter()),
        )
        .init();

    if args.demo {
        return run_demo();
    }

    let expression = args.expression.context("No expression given")?;
    let substitutions: Substitutions = args.substitutions.into_iter().collect();
    info!(
        "evaluating {} with {}",
        expression,
        substitutions
            .iter()
            .sorted()
            .map(|(name, value)| format!("{}={}", name, value))
            .join(", ")
    );

    let tree = parse(&expression).with_context(|| format!("Could not parse {}", expression))?;
    if args.tree {
        print!("{}", tree);
    }

    let notation = if args.postfix {
        Notation::Postfix
    } else {
        Notation::Infix
    };
    println!("{}", tree.format(notation));

    let value = tree.substitute(&substitutions).evaluate()?;
    println!("{}", value);
    Ok(())
}

/// Prints every stage of the pipeline for a fixed set of sample expressions.
fn run_demo() -> Result<()> {
    let substitutions: Substitutions = DEMO_SUBSTITUTIONS.into_iter().collect();

    for expression in DEMO_EXPRESSIONS {
        let symbols = tokenize(expression)?;
        let tree = parse(expression)?;
        let substituted = tree.substitute(&substitutions);

        println!("{}", expression);
        println!("{}", symbols_to_string(&symbols)?);
        println!("{}", tree.format(Notation::Postfix));
        println!("{}", tree.format(Notation::Infix));
        println!("{}", substituted.format(Notation::Infix));
        println!("{}", substituted.evaluate()?);
        println!();
    }
    Ok(())
}

fn parse_substitution(text: &str) -> Result<(char, i64)> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected VARIABLE=VALUE, found {}", text))?;

    let mut letters = name.trim().chars();
    let name = match (letters.next(), letters.next()) {
        (Some(letter), None) if letter.is_ascii_alphabetic() => letter,
        _ => bail!("Variable names are single letters, found {}", name),
    };
    let value = value
        .trim()
        .parse()
        .with_context(|| format!("{} is not an integer", value))?;

    Ok((name, value))
}
