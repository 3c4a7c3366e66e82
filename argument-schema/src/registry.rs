use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ArgumentError, DeclarationError, Error};

/// The number of value tokens an option consumes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ArityRepr", into = "ArityRepr")]
pub enum Arity {
    /// Takes no value.  Produces `true` when present, `false` otherwise.
    #[default]
    Flag,
    /// Takes exactly this many values.
    Fixed(NonZeroUsize),
    /// Takes values until the next option-looking token or the end.
    Variadic,
}

impl Arity {
    /// Creates an arity for a fixed number of values.
    ///
    /// A count of zero is a [`Arity::Flag`].
    pub fn fixed(count: usize) -> Arity {
        match NonZeroUsize::new(count) {
            Some(n) => Arity::Fixed(n),
            None => Arity::Flag,
        }
    }

    /// Is this a flag?
    pub fn is_flag(self) -> bool {
        matches!(self, Arity::Flag)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Flag => write!(f, "0"),
            Arity::Fixed(n) => write!(f, "{}", n),
            Arity::Variadic => write!(f, "*"),
        }
    }
}

/// Parses `"*"` as variadic and decimal counts as flag or fixed arity.
impl FromStr for Arity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Arity, Error> {
        if s == "*" {
            return Ok(Arity::Variadic);
        }
        match s.parse::<i64>() {
            Ok(count) => Arity::try_from(count),
            Err(_) => Err(Error::arity(DeclarationError::InvalidArity(s.to_string()))),
        }
    }
}

impl TryFrom<i64> for Arity {
    type Error = Error;

    fn try_from(count: i64) -> Result<Arity, Error> {
        usize::try_from(count)
            .map(Arity::fixed)
            .map_err(|_| Error::arity(DeclarationError::NegativeArity(count)))
    }
}

impl From<usize> for Arity {
    fn from(count: usize) -> Arity {
        Arity::fixed(count)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ArityRepr {
    Count(i64),
    Marker(String),
}

impl TryFrom<ArityRepr> for Arity {
    type Error = Error;

    fn try_from(repr: ArityRepr) -> Result<Arity, Error> {
        match repr {
            ArityRepr::Count(count) => Arity::try_from(count),
            ArityRepr::Marker(marker) => marker.parse(),
        }
    }
}

impl From<Arity> for ArityRepr {
    fn from(arity: Arity) -> ArityRepr {
        match arity {
            Arity::Flag => ArityRepr::Count(0),
            Arity::Fixed(n) => ArityRepr::Count(n.get() as i64),
            Arity::Variadic => ArityRepr::Marker("*".into()),
        }
    }
}

/// A declared option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDecl {
    matcher: String,
    name: String,
    arity: Arity,
}

impl OptionDecl {
    /// Validates and creates an option declaration.
    ///
    /// The canonical name is the match with the leading dashes removed.
    pub fn new(matcher: impl Into<String>, arity: Arity) -> Result<OptionDecl, Error> {
        let matcher = matcher.into();
        if !matcher.starts_with('-') {
            return Err(Error::declaration(matcher, DeclarationError::MissingDash));
        }
        let name = matcher.trim_start_matches('-');
        match name.chars().next() {
            None => Err(Error::declaration(matcher, DeclarationError::EmptyName)),
            Some(c) if c.is_numeric() => {
                Err(Error::declaration(matcher, DeclarationError::NumericName))
            }
            Some(_) => Ok(OptionDecl {
                name: name.to_string(),
                matcher,
                arity,
            }),
        }
    }

    /// The literal token that selects this option (eg: `--foo`).
    pub fn matcher(&self) -> &str {
        &self.matcher
    }

    /// The key the option's value is stored under (eg: `foo`).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }
}

/// Holds the declared positionals and options in declaration order.
///
/// Options are looked up by their exact match string, not by their canonical
/// name.  This means that `-foo` and `--foo` can both be declared, but as both
/// store into `foo` one will overwrite the other.  Don't do that.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    positionals: Vec<String>,
    options: Vec<OptionDecl>,
}

impl Registry {
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Appends a positional slot.
    pub fn add_positional(&mut self, name: impl Into<String>) -> Result<(), Error> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::declaration(name, DeclarationError::EmptyName));
        }
        if self.positionals.contains(&name) {
            return Err(Error::declaration(name, DeclarationError::Duplicate));
        }
        tracing::debug!(name = %name, slot = self.positionals.len(), "declared positional");
        self.positionals.push(name);
        Ok(())
    }

    /// Validates and appends an option.
    pub fn add_option(&mut self, matcher: impl Into<String>, arity: Arity) -> Result<(), Error> {
        let decl = OptionDecl::new(matcher, arity)?;
        if self.options.iter().any(|x| x.matcher == decl.matcher) {
            return Err(Error::declaration(decl.matcher, DeclarationError::Duplicate));
        }
        tracing::debug!(matcher = %decl.matcher, %arity, "declared option");
        self.options.push(decl);
        Ok(())
    }

    /// Finds the option declared with exactly this match string.
    pub fn lookup(&self, matcher: &str) -> Result<&OptionDecl, Error> {
        self.options
            .iter()
            .find(|x| x.matcher == matcher)
            .ok_or_else(|| ArgumentError::UnknownOption(matcher.to_string()).into())
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    pub fn options(&self) -> &[OptionDecl] {
        &self.options
    }
}
