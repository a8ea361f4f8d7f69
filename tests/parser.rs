use mouseycat::ast::{Ast, Direction};
use mouseycat::lexer::tokenize;
use mouseycat::parser::Parser;
use mouseycat::tables::GrammarTables;
mod common;

#[test]
fn test_minimal_program() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let tables = GrammarTables::mouseycat()?;
    let parser = Parser::new(&tables);

    let source = common::read_test_file("minimal.mc");
    let (tree, derivation) = parser.parse_with_derivation(tokenize(&source)?)?;

    assert_eq!(tree.visualize(), "program→[2 2 hole→[0 0]]");
    assert_eq!(
        tree,
        Ast::Program {
            width: 2,
            height: 2,
            statements: Box::new(Ast::Hole { x: 0, y: 0 }),
        }
    );
    assert_eq!(
        derivation,
        vec![
            "PROGRAM -> SIZE INTEGER INTEGER BEGIN LIST HALT",
            "LIST -> STATEMENT SEMICOLON",
            "STATEMENT -> HOLE INTEGER INTEGER",
        ]
    );

    Ok(())
}

#[test]
fn test_every_statement_kind() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let tables = GrammarTables::mouseycat()?;
    let parser = Parser::new(&tables);

    let source = common::read_test_file("tomandjerry.mc");
    let tree = parser.parse(tokenize(&source)?)?;

    assert_eq!(
        tree.visualize(),
        concat!(
            "program→[10 10 sequence→[sequence→[sequence→[sequence→[sequence→[",
            "sequence→[cat→['tom' 5 5 north] mouse→['jerry' 9 9 south]] ",
            "hole→[0 0]] move→['tom' 2]] clockwise→['tom']] move→['jerry' 1]] ",
            "repeat→[3 sequence→[clockwise→['jerry'] move→['jerry' 2]]]]]"
        )
    );

    Ok(())
}

#[test]
fn test_parses_are_independent() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let tables = GrammarTables::mouseycat()?;

    let source = common::read_test_file("tomandjerry.mc");
    let first = Parser::new(&tables).parse(tokenize(&source)?)?;
    let second = Parser::new(&tables).parse(tokenize(&source)?)?;
    assert_eq!(first, second);

    // One parser value may also be reused sequentially
    let parser = Parser::new(&tables);
    let third = parser.parse(tokenize(&source)?)?;
    let fourth = parser.parse(tokenize(&source)?)?;
    assert_eq!(third, fourth);
    assert_eq!(first, third);

    Ok(())
}

#[test]
fn test_shared_tables_across_threads() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let tables = std::sync::Arc::new(GrammarTables::mouseycat()?);
    let source = common::read_test_file("minimal.mc");

    let mut handles = Vec::new();
    for _ in 0..4 {
        let tables = std::sync::Arc::clone(&tables);
        let source = source.clone();
        handles.push(std::thread::spawn(move || {
            Parser::new(&tables).parse(tokenize(&source).unwrap()).unwrap()
        }));
    }

    let want = Ast::Program {
        width: 2,
        height: 2,
        statements: Box::new(Ast::Hole { x: 0, y: 0 }),
    };
    for handle in handles {
        assert_eq!(handle.join().unwrap(), want);
    }

    Ok(())
}

#[test]
fn test_direction_leaves() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let tables = GrammarTables::mouseycat()?;
    let parser = Parser::new(&tables);

    for (word, want) in [
        ("north", Direction::North),
        ("south", Direction::South),
        ("east", Direction::East),
        ("west", Direction::West),
    ] {
        let source = format!("size 5 5 begin cat c 1 1 {} ; halt", word);
        let tree = parser.parse(tokenize(&source)?)?;
        assert_eq!(
            tree,
            Ast::Program {
                width: 5,
                height: 5,
                statements: Box::new(Ast::Cat {
                    name: String::from("c"),
                    x: 1,
                    y: 1,
                    facing: want,
                }),
            }
        );
    }

    Ok(())
}

#[test]
fn test_invalid_program_fail() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let tables = GrammarTables::mouseycat()?;
    let parser = Parser::new(&tables);

    let result = parser.parse(tokenize("size 2 2\nbegin\n    hole 0 0\nhalt")?);
    match result {
        Err(mouseycat::errors::Error::ParseError(s)) => {
            assert_eq!(s, "unexpected 'halt' at line 4");
        }
        other => panic!("unexpected result: {:?}", other),
    }

    Ok(())
}
