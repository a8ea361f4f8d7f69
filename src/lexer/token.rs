use std::fmt;

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
/// A lexical token kind in the MOUSEYCAT language
pub enum TokenKind {
    Begin,
    Cat,
    Clockwise,
    East,
    End,
    Eof,
    Halt,
    Hole,
    Integer,
    Mouse,
    Move,
    North,
    Repeat,
    Semicolon,
    Size,
    South,
    Variable,
    West,
}

impl TokenKind {
    /// Returns the keyword token kind for the given word, if any. Keywords
    /// are matched without regard to case.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        match word.to_lowercase().as_str() {
            "begin" => Some(TokenKind::Begin),
            "cat" => Some(TokenKind::Cat),
            "clockwise" => Some(TokenKind::Clockwise),
            "east" => Some(TokenKind::East),
            "end" => Some(TokenKind::End),
            "halt" => Some(TokenKind::Halt),
            "hole" => Some(TokenKind::Hole),
            "mouse" => Some(TokenKind::Mouse),
            "move" => Some(TokenKind::Move),
            "north" => Some(TokenKind::North),
            "repeat" => Some(TokenKind::Repeat),
            "size" => Some(TokenKind::Size),
            "south" => Some(TokenKind::South),
            "west" => Some(TokenKind::West),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    /// Formats the token kind using the given formatter
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::Begin => write!(f, "begin"),
            TokenKind::Cat => write!(f, "cat"),
            TokenKind::Clockwise => write!(f, "clockwise"),
            TokenKind::East => write!(f, "east"),
            TokenKind::End => write!(f, "end"),
            TokenKind::Eof => write!(f, "end-of-input"),
            TokenKind::Halt => write!(f, "halt"),
            TokenKind::Hole => write!(f, "hole"),
            TokenKind::Integer => write!(f, "integer"),
            TokenKind::Mouse => write!(f, "mouse"),
            TokenKind::Move => write!(f, "move"),
            TokenKind::North => write!(f, "north"),
            TokenKind::Repeat => write!(f, "repeat"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Size => write!(f, "size"),
            TokenKind::South => write!(f, "south"),
            TokenKind::Variable => write!(f, "variable"),
            TokenKind::West => write!(f, "west"),
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
/// A lexical token with its source text and line number
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
}

impl Token {
    /// Creates a new token
    pub fn new(kind: TokenKind, text: &str, line: usize) -> Token {
        Token {
            kind,
            text: String::from(text),
            line,
        }
    }
}
