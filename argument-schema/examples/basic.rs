//! This is a basic example that parses the command line of the process.
//!
//! Try `cargo run --example basic -- input.txt -n 1 -2 3 --verbose`.  Set
//! `RUST_LOG=argument_schema=trace` to see how the tokens are interpreted.
use argument_schema::{Arity, Error, Parser};
use tracing_subscriber::EnvFilter;

fn execute() -> Result<(), Error> {
    let mut parser = Parser::new();
    parser.add_positional("input")?;
    parser.add_option("-n", Arity::Variadic)?;
    parser.add_option("-o", Arity::fixed(1))?;
    parser.add_option("--verbose", Arity::Flag)?;

    let matches = parser.parse_env()?;
    let numbers = matches
        .get_list("n")
        .unwrap_or_default()
        .iter()
        .map(|x| x.parse::<i64>().map_err(|err| format!("{}: {}", x, err)))
        .collect::<Result<Vec<_>, _>>();

    println!("input: {}", matches.get_str("input").unwrap_or_default());
    println!("output: {}", matches.get_str("o").unwrap_or("-"));
    match numbers {
        Ok(numbers) => println!("sum: {}", numbers.iter().sum::<i64>()),
        Err(err) => println!("not a number: {}", err),
    }
    if matches.get_flag("verbose") {
        println!("{}", serde_json::to_string_pretty(&matches).unwrap_or_default());
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = execute() {
        eprintln!("error: {}", err);
        std::process::exit(if err.is_user_error() { 1 } else { 2 });
    }
}
