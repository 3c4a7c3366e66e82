//! This crate implements a declarative argument interpreter.  You declare
//! positional arguments and options (each option with an [`Arity`]), hand it
//! a command line and get back a map from names to values.
//!
//! It does not convert values into other types, does not render help pages
//! and does not know about subcommands.  It interprets tokens, that's it.
//!
//! # Example
//!
//! Parsing happens via the [`Parser`] type:
//!
//! ```
//! use argument_schema::{Arity, Error, Parser};
//!
//! fn main() -> Result<(), Error> {
//!     let mut parser = Parser::new();
//!     parser.add_positional("enemy")?;
//!     parser.add_option("-am", Arity::Variadic)?;
//!     parser.add_option("-em", Arity::Variadic)?;
//!     parser.add_option("--loud", Arity::Flag)?;
//!
//!     let matches = parser.parse("ham -am 1 2 -1 -em 3")?;
//!     assert_eq!(matches.get_str("enemy"), Some("ham"));
//!     assert_eq!(matches.get_list("am").unwrap(), ["1", "2", "-1"]);
//!     assert_eq!(matches.get_list("em").unwrap(), ["3"]);
//!     assert!(!matches.get_flag("loud"));
//!     Ok(())
//! }
//! ```
//!
//! Here is what's happening:
//!
//! * [`Parser::add_positional`] declares positional slots.  They are filled
//!   in the order they were declared and all of them must be filled.
//! * [`Parser::add_option`] declares an option.  The value is stored under
//!   the option with the leading dashes removed (`-am` is stored as `am`).
//! * [`Parser::parse`] splits the string on whitespace and interprets the
//!   tokens.  It also accepts already split tokens.
//! * [`Matches`] holds the result and has accessors for the different
//!   shapes of [`Value`]s.
//!
//! # Behavior
//!
//! * A token is an option if it starts with a dash, unless the rest of it
//!   is a number.  That way `-1` can be passed as a value.  As a consequence
//!   option names cannot start with a number.  This can be turned off with
//!   [`Flag::NumericValues`].
//! * [`Arity::Flag`] options become `true` when passed and `false` when not.
//! * [`Arity::Fixed`] options consume exactly that many of the following
//!   tokens, no matter what they look like.  An arity of one stores a single
//!   string, larger arities store a list.
//! * [`Arity::Variadic`] options consume tokens until the next option or the
//!   end of the command line and store a (possibly empty) list.
//! * Options with values that were not passed are absent from the result.
//! * Passing an option twice keeps the last value.
//! * `--` has no special meaning unless [`Flag::HandleDoubleDash`] is set.
//!
//! For parsers that belong to a single function, [`Command`] bundles the
//! declarations with the function.
//!
//! # Error Handling
//!
//! All errors are reported through [`Error`].  Registration fails early with
//! [`ErrorKind::InvalidDeclaration`], command lines that don't fit fail with
//! [`ErrorKind::Argument`].  A parse either fully succeeds or returns an
//! error, partial results are never handed out.
//!
//! The parser logs through [`tracing`].  It never installs a subscriber.
mod command;
mod error;
mod parser;
mod registry;

pub use self::command::{Command, Decl};
pub use self::error::{ArgumentError, DeclarationError, Error, ErrorKind};
pub use self::parser::{Flag, Input, Matches, Parser, Value};
pub use self::registry::{Arity, OptionDecl, Registry};
