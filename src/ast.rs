use std::fmt;

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
/// A cardinal direction
pub enum Direction {
    East,
    North,
    South,
    West,
}

impl fmt::Display for Direction {
    /// Formats the direction using the given formatter
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::East => write!(f, "east"),
            Direction::North => write!(f, "north"),
            Direction::South => write!(f, "south"),
            Direction::West => write!(f, "west"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
/// A node in a MOUSEYCAT abstract syntax tree. Integer, Variable and
/// Direction nodes are leaves built directly from tokens; the parser
/// folds them into the other node kinds as it reduces.
pub enum Ast {
    Cat {
        name: String,
        x: i64,
        y: i64,
        facing: Direction,
    },
    Clockwise {
        name: String,
    },
    Direction(Direction),
    Hole {
        x: i64,
        y: i64,
    },
    Integer(i64),
    Mouse {
        name: String,
        x: i64,
        y: i64,
        facing: Direction,
    },
    Move {
        name: String,
        distance: i64,
    },
    Program {
        width: i64,
        height: i64,
        statements: Box<Ast>,
    },
    Repeat {
        count: i64,
        body: Box<Ast>,
    },
    Sequence {
        left: Box<Ast>,
        right: Box<Ast>,
    },
    Variable(String),
}

impl Ast {
    /// Returns a simple, one-line string representation of the syntax tree
    pub fn visualize(&self) -> String {
        let mut output = String::new();

        // Define this as a regular function rather than a closure, since we
        // need to call it recursively
        fn traverse(ast: &Ast, s: &mut String) {
            match ast {
                Ast::Cat { name, x, y, facing } => {
                    s.push_str(format!("cat→['{}' {} {} {}]", name, x, y, facing).as_str());
                }
                Ast::Clockwise { name } => {
                    s.push_str(format!("clockwise→['{}']", name).as_str());
                }
                Ast::Direction(direction) => {
                    s.push_str(format!("{}", direction).as_str());
                }
                Ast::Hole { x, y } => {
                    s.push_str(format!("hole→[{} {}]", x, y).as_str());
                }
                Ast::Integer(value) => {
                    s.push_str(format!("{}", value).as_str());
                }
                Ast::Mouse { name, x, y, facing } => {
                    s.push_str(format!("mouse→['{}' {} {} {}]", name, x, y, facing).as_str());
                }
                Ast::Move { name, distance } => {
                    s.push_str(format!("move→['{}' {}]", name, distance).as_str());
                }
                Ast::Program {
                    width,
                    height,
                    statements,
                } => {
                    s.push_str(format!("program→[{} {} ", width, height).as_str());
                    traverse(statements, s);
                    s.push(']');
                }
                Ast::Repeat { count, body } => {
                    s.push_str(format!("repeat→[{} ", count).as_str());
                    traverse(body, s);
                    s.push(']');
                }
                Ast::Sequence { left, right } => {
                    s.push_str("sequence→[");
                    traverse(left, s);
                    s.push(' ');
                    traverse(right, s);
                    s.push(']');
                }
                Ast::Variable(name) => {
                    s.push_str(format!("'{}'", name).as_str());
                }
            }
        }

        traverse(self, &mut output);

        output
    }
}
