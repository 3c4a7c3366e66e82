use std::fmt;

use crate::error::Error;
use crate::parser::{Input, Matches, Parser};
use crate::registry::Arity;

/// A single entry of a statically declared parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decl<'a> {
    /// A positional argument with this name.
    Positional(&'a str),
    /// An option with this match string and arity.
    Option(&'a str, Arity),
}

/// A handler bundled with the parser for its arguments.
///
/// The parser is built once and reused for every call:
///
/// ```
/// use argument_schema::{Arity, Command, Error, Matches};
///
/// fn main() -> Result<(), Error> {
///     let greet = Command::new(|m: Matches| {
///         let name = m.get_str("name").unwrap_or_default();
///         if m.get_flag("shout") {
///             format!("HELLO {}!", name.to_uppercase())
///         } else {
///             format!("Hello {}", name)
///         }
///     })
///     .positional("name")?
///     .option("--shout", Arity::Flag)?;
///
///     assert_eq!(greet.call("world")?, "Hello world");
///     assert_eq!(greet.call("world --shout")?, "HELLO WORLD!");
///     Ok(())
/// }
/// ```
pub struct Command<F> {
    parser: Parser,
    handler: F,
}

impl<F> fmt::Debug for Command<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("parser", &self.parser)
            .finish_non_exhaustive()
    }
}

impl<F> Command<F> {
    /// Creates a command without any declarations.
    pub fn new(handler: F) -> Command<F> {
        Command {
            parser: Parser::new(),
            handler,
        }
    }

    /// Creates a command from a parameter list.
    ///
    /// Declarations are registered in the order they are listed, so the
    /// positionals are filled in that order too.
    pub fn from_decls(decls: &[Decl<'_>], handler: F) -> Result<Command<F>, Error> {
        let mut parser = Parser::new();
        for decl in decls {
            match *decl {
                Decl::Positional(name) => parser.add_positional(name)?,
                Decl::Option(matcher, arity) => parser.add_option(matcher, arity)?,
            }
        }
        Ok(Command { parser, handler })
    }

    /// Declares the next positional argument.
    pub fn positional(mut self, name: &str) -> Result<Command<F>, Error> {
        self.parser.add_positional(name)?;
        Ok(self)
    }

    /// Declares an option.
    pub fn option(mut self, matcher: &str, arity: Arity) -> Result<Command<F>, Error> {
        self.parser.add_option(matcher, arity)?;
        Ok(self)
    }

    pub fn parser(&self) -> &Parser {
        &self.parser
    }

    /// Gives access to the parser to change its flags.
    pub fn parser_mut(&mut self) -> &mut Parser {
        &mut self.parser
    }

    /// Parses the input and invokes the handler with the matches.
    ///
    /// The handler is not invoked if parsing fails.
    pub fn call<'a, I, R>(&self, input: I) -> Result<R, Error>
    where
        I: Into<Input<'a>>,
        F: Fn(Matches) -> R,
    {
        let matches = self.parser.parse(input)?;
        Ok((self.handler)(matches))
    }

    /// Like [`call`](Self::call) but for handlers that act on a receiver.
    ///
    /// This is the shape to use when the command is stored next to the
    /// state it works on and the handler is written like a method.
    pub fn call_on<'a, S, I, R>(&self, target: &S, input: I) -> Result<R, Error>
    where
        S: ?Sized,
        I: Into<Input<'a>>,
        F: Fn(&S, Matches) -> R,
    {
        let matches = self.parser.parse(input)?;
        Ok((self.handler)(target, matches))
    }
}
