pub mod token;

use crate::errors::{Error, Result};
use token::{Token, TokenKind};

/// A lexical scanner for MOUSEYCAT source text
pub struct Lexer {
    input: Vec<char>,
    cursor: usize,
    current_line: usize,
}

/// Scans an entire source text and returns its tokens, with an end-of-input
/// token appended
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut lexer = Lexer::new(input);
    let mut tokens: Vec<Token> = Vec::new();

    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    tokens.push(Token::new(TokenKind::Eof, "", lexer.current_line));

    Ok(tokens)
}

impl Lexer {
    /// Returns a new lexer for the given input string
    pub fn new(input: &str) -> Lexer {
        Lexer {
            input: input.chars().collect(),
            cursor: 0,
            current_line: 1,
        }
    }

    /// Reads and discards a comment through to the end of the line
    fn discard_comment(&mut self) -> bool {
        if self.lookahead() != Some('#') {
            return false;
        }

        while let Some(lookahead) = self.lookahead() {
            if lookahead == '\n' {
                break;
            }
            self.read();
        }

        true
    }

    /// Reads and discards comments and whitespace characters, including
    /// newlines
    fn discard_comments_and_whitespace(&mut self) {
        loop {
            while let Some(lookahead) = self.lookahead() {
                if !lookahead.is_whitespace() {
                    break;
                }
                self.read();
            }

            if !self.discard_comment() {
                break;
            }
        }
    }

    /// Returns the lookahead character
    fn lookahead(&self) -> Option<char> {
        if self.cursor >= self.input.len() {
            return None;
        }

        Some(self.input[self.cursor])
    }

    /// Returns the next lexical token, if any
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        self.discard_comments_and_whitespace();

        let Some(lookahead) = self.lookahead() else {
            return Ok(None);
        };

        if lookahead == ';' {
            let line = self.current_line;
            self.read();
            return Ok(Some(Token::new(TokenKind::Semicolon, ";", line)));
        }

        if lookahead.is_ascii_digit() {
            return Ok(Some(self.lex_integer()));
        }

        if lookahead.is_alphabetic() {
            return Ok(Some(self.lex_word()));
        }

        Err(Error::UnexpectedChar(lookahead))
    }

    /// Lexes an integer, which is any sequence of decimal digits
    fn lex_integer(&mut self) -> Token {
        let line = self.current_line;
        let mut digits = vec![self.read()];

        while let Some(lookahead) = self.lookahead() {
            if !lookahead.is_ascii_digit() {
                break;
            }
            digits.push(self.read());
        }

        Token::new(
            TokenKind::Integer,
            &digits.into_iter().collect::<String>(),
            line,
        )
    }

    /// Lexes a keyword or a variable name, which is any sequence of
    /// alphabetic characters
    fn lex_word(&mut self) -> Token {
        let line = self.current_line;
        let mut word = vec![self.read()];

        while let Some(lookahead) = self.lookahead() {
            if !lookahead.is_alphabetic() {
                break;
            }
            word.push(self.read());
        }

        let word: String = word.into_iter().collect();
        match TokenKind::keyword(&word) {
            Some(kind) => Token::new(kind, &word, line),
            None => Token::new(TokenKind::Variable, &word, line),
        }
    }

    /// Reads and returns the next input character without checking if we're
    /// at end of input. This will panic if end of input is reached, so the
    /// caller should usually ensure the lookahead is valid.
    fn read(&mut self) -> char {
        let value = self.input[self.cursor];

        if value == '\n' {
            self.current_line += 1;
        }
        self.cursor += 1;

        value
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::assert_error_text;

    #[test]
    fn test_keywords() -> Result<()> {
        let mut lex = Lexer::new("size begin halt cat mouse hole move clockwise repeat end");
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Size, "size", 1)));
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Begin, "begin", 1)));
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Halt, "halt", 1)));
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Cat, "cat", 1)));
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Mouse, "mouse", 1)));
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Hole, "hole", 1)));
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Move, "move", 1)));
        assert_eq!(
            lex.next_token()?,
            Some(Token::new(TokenKind::Clockwise, "clockwise", 1))
        );
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Repeat, "repeat", 1)));
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::End, "end", 1)));
        assert_eq!(lex.next_token()?, None);

        Ok(())
    }

    #[test]
    fn test_keyword_case() -> Result<()> {
        let mut lex = Lexer::new("SIZE Begin hAlT");
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Size, "SIZE", 1)));
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Begin, "Begin", 1)));
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Halt, "hAlT", 1)));
        assert_eq!(lex.next_token()?, None);

        Ok(())
    }

    #[test]
    fn test_directions() -> Result<()> {
        let mut lex = Lexer::new("north south east west");
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::North, "north", 1)));
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::South, "south", 1)));
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::East, "east", 1)));
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::West, "west", 1)));
        assert_eq!(lex.next_token()?, None);

        Ok(())
    }

    #[test]
    fn test_variables() -> Result<()> {
        let mut lex = Lexer::new("tom Jerry speedy");
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Variable, "tom", 1)));
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Variable, "Jerry", 1)));
        assert_eq!(
            lex.next_token()?,
            Some(Token::new(TokenKind::Variable, "speedy", 1))
        );
        assert_eq!(lex.next_token()?, None);

        Ok(())
    }

    #[test]
    fn test_integers() -> Result<()> {
        let mut lex = Lexer::new("0 7 301;12");
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Integer, "0", 1)));
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Integer, "7", 1)));
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Integer, "301", 1)));
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Semicolon, ";", 1)));
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Integer, "12", 1)));
        assert_eq!(lex.next_token()?, None);

        Ok(())
    }

    #[test]
    fn test_comments_and_lines() -> Result<()> {
        let mut lex = Lexer::new("# a program\nsize 3 3 # grid\nbegin\n");
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Size, "size", 2)));
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Integer, "3", 2)));
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Integer, "3", 2)));
        assert_eq!(lex.next_token()?, Some(Token::new(TokenKind::Begin, "begin", 3)));
        assert_eq!(lex.next_token()?, None);

        // Call next again to verify we still get None
        assert_eq!(lex.next_token()?, None);

        Ok(())
    }

    #[test]
    fn test_tokenize_appends_eof() -> Result<()> {
        let tokens = tokenize("halt")?;
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::Halt, "halt", 1),
                Token::new(TokenKind::Eof, "", 1),
            ]
        );

        let tokens = tokenize("")?;
        assert_eq!(tokens, vec![Token::new(TokenKind::Eof, "", 1)]);

        Ok(())
    }

    #[test]
    fn test_unexpected_character_fail() {
        let mut lex = Lexer::new("@");
        assert_error_text(lex.next_token(), "unexpected input character '@'");

        let mut lex = Lexer::new("size 3 3\nbegin $");
        assert_eq!(lex.next_token().unwrap().unwrap().kind, TokenKind::Size);
        assert_eq!(lex.next_token().unwrap().unwrap().kind, TokenKind::Integer);
        assert_eq!(lex.next_token().unwrap().unwrap().kind, TokenKind::Integer);
        assert_eq!(lex.next_token().unwrap().unwrap().kind, TokenKind::Begin);
        assert_error_text(lex.next_token(), "unexpected input character '$'");
    }
}
