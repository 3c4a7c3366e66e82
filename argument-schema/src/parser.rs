use std::collections::btree_map::{self, BTreeMap};
use std::ffi::OsString;
use std::fmt;
use std::iter::Peekable;

use serde::{Deserialize, Serialize};

use crate::error::{ArgumentError, Error};
use crate::registry::{Arity, OptionDecl, Registry};

/// Parser behavior flags.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Flag {
    /// When set, tokens like `-1` or `-42` are values and never options.
    ///
    /// **Default:** flag is set
    NumericValues,
    /// When set, a bare `--` is swallowed and every token after it is a value.
    ///
    /// **Default:** flag is unset
    HandleDoubleDash,
}

impl Flag {
    fn as_u8(self) -> u8 {
        match self {
            Flag::NumericValues => 1,
            Flag::HandleDoubleDash => 2,
        }
    }
}

/// The input to [`Parser::parse`].
///
/// Strings are split on whitespace, sequences of strings are taken as they
/// are.  Dynamically typed input can be converted from a
/// [`serde_json::Value`] which fails with a type mismatch for anything that
/// is not a string or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<'a> {
    /// A command line that still needs splitting.
    Line(&'a str),
    /// Already split tokens.
    Tokens(Vec<String>),
}

impl Input<'_> {
    /// Normalizes the input into an ordered sequence of tokens.
    pub fn into_tokens(self) -> Vec<String> {
        match self {
            Input::Line(line) => line.split_whitespace().map(str::to_string).collect(),
            Input::Tokens(tokens) => tokens,
        }
    }
}

impl<'a> From<&'a str> for Input<'a> {
    fn from(line: &'a str) -> Input<'a> {
        Input::Line(line)
    }
}

impl<'a> From<&'a String> for Input<'a> {
    fn from(line: &'a String) -> Input<'a> {
        Input::Line(line)
    }
}

impl<'a> From<&'a [String]> for Input<'a> {
    fn from(tokens: &'a [String]) -> Input<'a> {
        Input::Tokens(tokens.to_vec())
    }
}

impl<'a> From<&'a Vec<String>> for Input<'a> {
    fn from(tokens: &'a Vec<String>) -> Input<'a> {
        Input::Tokens(tokens.clone())
    }
}

impl From<String> for Input<'_> {
    fn from(line: String) -> Self {
        Input::Tokens(line.split_whitespace().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Input<'_> {
    fn from(tokens: Vec<String>) -> Self {
        Input::Tokens(tokens)
    }
}

impl From<Vec<&str>> for Input<'_> {
    fn from(tokens: Vec<&str>) -> Self {
        Input::Tokens(tokens.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Input<'_> {
    fn from(tokens: &[&str]) -> Self {
        Input::Tokens(tokens.iter().map(|x| x.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Input<'_> {
    fn from(tokens: [&str; N]) -> Self {
        Input::Tokens(tokens.iter().map(|x| x.to_string()).collect())
    }
}

impl TryFrom<&serde_json::Value> for Input<'_> {
    type Error = Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Error> {
        use serde_json::Value as Json;
        match value {
            Json::String(line) => Ok(Input::Tokens(
                line.split_whitespace().map(str::to_string).collect(),
            )),
            Json::Array(items) => items
                .iter()
                .map(|item| match item {
                    Json::String(s) => Ok(s.clone()),
                    other => Err(Error::type_mismatch(format!(
                        "an array containing {}",
                        json_type_name(other)
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Input::Tokens),
            other => Err(Error::type_mismatch(json_type_name(other))),
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value as Json;
    match value {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

/// A parsed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Flags are `true` when passed and `false` when not.
    Bool(bool),
    /// Positionals and options with an arity of one.
    String(String),
    /// Options with a fixed arity of two or more, and variadic options.
    List(Vec<String>),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Value {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Value {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Value {
        Value::String(value)
    }
}

impl<S: Into<String>> From<Vec<S>> for Value {
    fn from(values: Vec<S>) -> Value {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

/// The result of a successful parse: declared names mapped to values.
///
/// Positionals are keyed by their declared name, options by their canonical
/// name (the match without leading dashes).  Options with values that were
/// not passed are absent, flags that were not passed are `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matches {
    values: BTreeMap<String, Value>,
}

impl Matches {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns a string value (positional or single value option).
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Returns a list value (multi value or variadic option).
    pub fn get_list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(Value::as_list)
    }

    /// Returns the state of a flag.  Unknown names are `false`.
    pub fn get_flag(&self, name: &str) -> bool {
        self.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Value> {
        self.values.iter()
    }

    pub fn into_map(self) -> BTreeMap<String, Value> {
        self.values
    }

    fn insert(&mut self, name: &str, value: Value) {
        tracing::trace!(name, ?value, "bound value");
        self.values.insert(name.to_string(), value);
    }
}

impl<'a> IntoIterator for &'a Matches {
    type Item = (&'a String, &'a Value);
    type IntoIter = btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Matches {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Matches {
        Matches {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Parses command lines against a set of declared positionals and options.
///
/// Declarations are made once, the parser can then be used for any number of
/// parses.  Every parse builds a fresh [`Matches`].
#[derive(Clone)]
pub struct Parser {
    registry: Registry,
    flags: u8,
}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("positionals", &self.registry.positionals())
            .field("options", &self.registry.options())
            .field("flags", &self.flags)
            .finish()
    }
}

impl Default for Parser {
    fn default() -> Parser {
        Parser::new()
    }
}

impl Parser {
    /// Creates a parser without declarations.
    pub fn new() -> Parser {
        Parser {
            registry: Registry::new(),
            flags: Flag::NumericValues.as_u8(),
        }
    }

    /// Declares the next positional argument.
    pub fn add_positional(&mut self, name: impl Into<String>) -> Result<(), Error> {
        self.registry.add_positional(name)
    }

    /// Declares an option.
    ///
    /// Options start with at least one dash, and may use any number of them.
    /// The value is stored under the name with the dashes stripped.  The
    /// name after the dashes may not start with a number so that negative
    /// numbers can be passed as values.  Matches without a leading dash are
    /// refused as they could never be selected.
    pub fn add_option(&mut self, matcher: impl Into<String>, arity: Arity) -> Result<(), Error> {
        self.registry.add_option(matcher, arity)
    }

    /// Returns the declarations.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Check if a parsing [`Flag`] is currently set.
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        self.flags & flag.as_u8() != 0
    }

    /// Sets or unsets a parsing [`Flag`].
    #[inline]
    pub fn set_flag(&mut self, flag: Flag, yes: bool) {
        if yes {
            self.flags |= flag.as_u8();
        } else {
            self.flags &= !flag.as_u8();
        }
    }

    /// Does this token select an option?
    ///
    /// That is the case if it starts with a dash, unless what remains after
    /// stripping dashes from both ends is numeric and [`Flag::NumericValues`]
    /// is set.  So `-1`, `--42` and `-5-` are values.
    pub fn looks_like_option(&self, token: &str) -> bool {
        token.starts_with('-')
            && !(self.get_flag(Flag::NumericValues) && is_numeric(token.trim_matches('-')))
    }

    /// Parses the command line of the current process.
    ///
    /// The program name is skipped.  Arguments that are not valid unicode
    /// fail with a type mismatch.
    pub fn parse_env(&self) -> Result<Matches, Error> {
        let tokens = std::env::args_os()
            .skip(1)
            .map(|arg: OsString| {
                arg.into_string().map_err(|arg| {
                    Error::type_mismatch(format!("an argument with invalid unicode ({:?})", arg))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.parse(tokens)
    }

    /// Parses dynamically typed input.
    pub fn parse_value(&self, value: &serde_json::Value) -> Result<Matches, Error> {
        self.parse(Input::try_from(value)?)
    }

    /// Parses a command line.
    ///
    /// Tokens are consumed front to back.  Option tokens bind as many of the
    /// following tokens as their arity asks for, all other tokens fill the
    /// positionals in declaration order.  All positionals must be filled.
    pub fn parse<'a, I: Into<Input<'a>>>(&self, input: I) -> Result<Matches, Error> {
        let tokens = input.into().into_tokens();
        tracing::trace!(?tokens, "parsing");
        match self.scan(tokens) {
            Ok(matches) => {
                tracing::debug!(keys = matches.len(), "parsed command line");
                Ok(matches)
            }
            Err(err) => {
                tracing::debug!(error = %err, "failed to parse command line");
                Err(err)
            }
        }
    }

    fn scan(&self, tokens: Vec<String>) -> Result<Matches, Error> {
        let mut tokens = tokens.into_iter().peekable();
        let mut positionals = self.registry.positionals().iter();
        let mut matches = Matches::default();
        let mut options_enabled = true;

        while let Some(token) = tokens.next() {
            if options_enabled && token == "--" && self.get_flag(Flag::HandleDoubleDash) {
                tracing::trace!("end of options");
                options_enabled = false;
            } else if options_enabled && self.looks_like_option(&token) {
                let opt = self.registry.lookup(&token)?;
                let value = self.bind_option(opt, &mut tokens)?;
                matches.insert(opt.name(), value);
            } else if let Some(name) = positionals.next() {
                matches.insert(name, Value::String(token));
            } else {
                return Err(ArgumentError::UnexpectedPositional(token).into());
            }
        }

        let missing: Vec<String> = positionals.cloned().collect();
        if !missing.is_empty() {
            return Err(ArgumentError::MissingPositionals(missing).into());
        }

        for opt in self.registry.options() {
            if opt.arity().is_flag() && !matches.contains(opt.name()) {
                matches.insert(opt.name(), Value::Bool(false));
            }
        }

        Ok(matches)
    }

    fn bind_option<I>(&self, opt: &OptionDecl, tokens: &mut Peekable<I>) -> Result<Value, Error>
    where
        I: Iterator<Item = String>,
    {
        match opt.arity() {
            Arity::Flag => Ok(Value::Bool(true)),
            Arity::Fixed(n) => {
                let expected = n.get();
                let mut values: Vec<String> = tokens.by_ref().take(expected).collect();
                if values.len() < expected {
                    return Err(ArgumentError::MissingValues {
                        option: opt.matcher().to_string(),
                        expected,
                        found: values.len(),
                    }
                    .into());
                }
                if expected == 1 {
                    Ok(Value::String(values.remove(0)))
                } else {
                    Ok(Value::List(values))
                }
            }
            Arity::Variadic => {
                let mut values = Vec::new();
                while let Some(value) = tokens.next_if(|x| !self.looks_like_option(x)) {
                    values.push(value);
                }
                Ok(Value::List(values))
            }
        }
    }
}

/// Is the string non-empty and made of numeric characters only?
fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_numeric)
}
