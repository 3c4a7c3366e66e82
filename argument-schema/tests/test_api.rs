use std::num::NonZeroUsize;

use argument_schema::{Arity, Error, Matches, OptionDecl, Parser, Value};

#[test]
fn test_arity() -> Result<(), Error> {
    assert_eq!(Arity::fixed(0), Arity::Flag);
    assert_eq!(Arity::fixed(3), Arity::Fixed(NonZeroUsize::new(3).unwrap()));
    assert_eq!(Arity::default(), Arity::Flag);
    assert!(Arity::Flag.is_flag());
    assert!(!Arity::Variadic.is_flag());

    assert_eq!("*".parse::<Arity>()?, Arity::Variadic);
    assert_eq!("0".parse::<Arity>()?, Arity::Flag);
    assert_eq!("2".parse::<Arity>()?, Arity::fixed(2));
    assert_eq!(Arity::try_from(4i64)?, Arity::fixed(4));
    assert_eq!(Arity::from(1usize), Arity::fixed(1));

    assert_eq!(Arity::Flag.to_string(), "0");
    assert_eq!(Arity::fixed(5).to_string(), "5");
    assert_eq!(Arity::Variadic.to_string(), "*");
    Ok(())
}

#[test]
fn test_arity_serde() {
    assert_eq!(serde_json::to_value(Arity::Variadic).unwrap(), serde_json::json!("*"));
    assert_eq!(serde_json::to_value(Arity::fixed(2)).unwrap(), serde_json::json!(2));
    assert_eq!(serde_json::to_value(Arity::Flag).unwrap(), serde_json::json!(0));

    let arities: Vec<Arity> = serde_json::from_str(r#"[0, 3, "*", "2"]"#).unwrap();
    assert_eq!(
        arities,
        vec![Arity::Flag, Arity::fixed(3), Arity::Variadic, Arity::fixed(2)]
    );
    assert!(serde_json::from_str::<Arity>("-2").is_err());
}

#[test]
fn test_option_decl() -> Result<(), Error> {
    let decl = OptionDecl::new("--dry-run", Arity::Flag)?;
    assert_eq!(decl.matcher(), "--dry-run");
    assert_eq!(decl.name(), "dry-run");
    assert_eq!(decl.arity(), Arity::Flag);

    let decl = OptionDecl::new("-x1", Arity::Variadic)?;
    assert_eq!(decl.name(), "x1");
    Ok(())
}

#[test]
fn test_registry_order() -> Result<(), Error> {
    let mut parser = Parser::new();
    parser.add_positional("b")?;
    parser.add_positional("a")?;
    parser.add_option("-z", Arity::Flag)?;
    parser.add_option("--y", Arity::Variadic)?;

    let registry = parser.registry();
    assert_eq!(registry.positionals(), ["b", "a"]);
    let names: Vec<_> = registry.options().iter().map(|x| x.name()).collect();
    assert_eq!(names, ["z", "y"]);
    assert_eq!(registry.lookup("--y")?.arity(), Arity::Variadic);
    assert!(registry.lookup("-y").is_err());
    Ok(())
}

#[test]
fn test_matches_accessors() -> Result<(), Error> {
    let mut parser = Parser::new();
    parser.add_positional("file")?;
    parser.add_option("-v", Arity::Flag)?;
    parser.add_option("-q", Arity::Flag)?;
    parser.add_option("-I", Arity::Variadic)?;
    parser.add_option("-o", Arity::fixed(1))?;

    let m = parser.parse("-v main.c -I a b")?;
    assert_eq!(m.get_str("file"), Some("main.c"));
    assert!(m.get_flag("v"));
    assert!(!m.get_flag("q"));
    assert!(m.contains("q"));
    assert_eq!(m.get_list("I").unwrap(), ["a", "b"]);
    assert!(!m.contains("o"));
    assert_eq!(m.get_str("o"), None);
    assert!(!m.get_flag("file"));
    assert_eq!(m.get_list("file"), None);
    assert_eq!(m.len(), 4);
    assert!(!m.is_empty());

    let keys: Vec<_> = m.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["I", "file", "q", "v"]);
    let keys: Vec<_> = (&m).into_iter().map(|(k, _)| k.clone()).collect();
    assert_eq!(keys.len(), 4);

    let map = m.into_map();
    assert_eq!(map.get("v"), Some(&Value::Bool(true)));
    Ok(())
}

#[test]
fn test_value_accessors() {
    assert_eq!(Value::from(true).as_bool(), Some(true));
    assert_eq!(Value::from("x").as_str(), Some("x"));
    assert_eq!(Value::from(vec!["a"]).as_list(), Some(&["a".to_string()][..]));
    assert_eq!(Value::from("x").as_bool(), None);
    assert_eq!(Value::from(false).as_list(), None);
    assert_eq!(Value::from(vec!["a"]).as_str(), None);
}

#[test]
fn test_matches_from_iter() {
    let m: Matches = [("a", Value::from("1")), ("b", Value::from(true))]
        .into_iter()
        .collect();
    assert_eq!(m.get_str("a"), Some("1"));
    assert!(m.get_flag("b"));
    assert_eq!(Matches::default().len(), 0);
}

#[test]
fn test_parser_debug() -> Result<(), Error> {
    let mut parser = Parser::new();
    parser.add_positional("x")?;
    let debug = format!("{:?}", parser);
    assert!(debug.starts_with("Parser {"));
    assert!(debug.contains("positionals: [\"x\"]"));
    Ok(())
}
