//! This example shows how to bundle declarations with a function.
//!
//! The command is built once and then called with a few command lines.
use argument_schema::{Arity, Command, Decl, Error, Matches};

struct Battle {
    hero: &'static str,
}

fn fight(battle: &Battle, m: Matches) -> String {
    let enemy = m.get_str("enemy").unwrap_or_default();
    let attacks = m.get_list("am").map_or(0, |x| x.len());
    let mut rv = format!("{} attacks {} {} times", battle.hero, enemy, attacks);
    if m.get_flag("loud") {
        rv.make_ascii_uppercase();
    }
    rv
}

fn main() -> Result<(), Error> {
    let cmd = Command::from_decls(
        &[
            Decl::Positional("enemy"),
            Decl::Option("-am", Arity::Variadic),
            Decl::Option("--loud", Arity::Flag),
        ],
        fight,
    )?;
    let battle = Battle { hero: "yogi" };

    for line in ["ham -am 1 2 -1", "spam --loud", "-am 3", "eggs -x"] {
        match cmd.call_on(&battle, line) {
            Ok(result) => println!("{:>16} => {}", line, result),
            Err(err) => println!("{:>16} => error: {}", line, err),
        }
    }
    Ok(())
}
