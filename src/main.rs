use mouseycat::lexer::tokenize;
use mouseycat::parser::Parser;
use mouseycat::tables::GrammarTables;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("usage: mouseycat <program-file>");
        std::process::exit(2);
    }

    if let Err(e) = run(&args[1]) {
        eprintln!("ERROR: {e}");
        std::process::exit(1);
    }
}

fn run(path: &str) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;

    let tables = GrammarTables::mouseycat()?;
    let parser = Parser::new(&tables);
    let (tree, derivation) = parser.parse_with_derivation(tokenize(&source)?)?;

    for production in &derivation {
        println!("{production}");
    }
    println!("Parsed successfully!");
    println!("{}", tree.visualize());

    Ok(())
}
