use crate::ast::{Ast, Direction};
use crate::errors::{Error, Result};
use crate::lexer::token::{Token, TokenKind};
use crate::tables::{Action, GrammarTables, Symbol};
use log::{debug, trace};

/// A table-driven shift-reduce parser for the MOUSEYCAT language
pub struct Parser<'a> {
    tables: &'a GrammarTables,
}

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
/// An entry on the parse stack
struct StackEntry {
    state: usize,
    symbol: Option<Symbol>,
}

impl<'a> Parser<'a> {
    /// Creates a new parser over the given grammar tables
    pub fn new(tables: &'a GrammarTables) -> Parser<'a> {
        Parser { tables }
    }

    /// Parses a token sequence and returns the root of its syntax tree
    pub fn parse<I>(&self, tokens: I) -> Result<Ast>
    where
        I: IntoIterator<Item = Token>,
    {
        Ok(self.run(tokens)?.0)
    }

    /// Parses a token sequence and returns the root of its syntax tree
    /// along with the rightmost derivation of the program, one production
    /// per line in reverse order of application
    pub fn parse_with_derivation<I>(&self, tokens: I) -> Result<(Ast, Vec<String>)>
    where
        I: IntoIterator<Item = Token>,
    {
        let (root, applied) = self.run(tokens)?;

        let derivation = applied
            .iter()
            .rev()
            .map(|number| {
                self.tables
                    .rule(*number)
                    .expect("applied rules come from the rule table")
                    .production
                    .clone()
            })
            .collect();

        Ok((root, derivation))
    }

    /// Runs the automaton over a token sequence, returning the root of the
    /// syntax tree and the rule numbers in order of application
    fn run<I>(&self, tokens: I) -> Result<(Ast, Vec<usize>)>
    where
        I: IntoIterator<Item = Token>,
    {
        // Algorithm adapted from Aho et al (2007) p.251
        let mut tokens = tokens.into_iter();
        let mut stack: Vec<StackEntry> = Vec::from([StackEntry {
            state: 0,
            symbol: None,
        }]);
        let mut nodes: Vec<Ast> = Vec::new();
        let mut applied: Vec<usize> = Vec::new();

        let mut lookahead = next_token(&mut tokens, &mut nodes)?;

        loop {
            let state = stack.last().unwrap().state;
            match self.tables.action(state, Symbol::Terminal(lookahead.kind)) {
                Action::Shift(to) => {
                    stack.push(StackEntry {
                        state: to,
                        symbol: Some(Symbol::Terminal(lookahead.kind)),
                    });
                    trace!("shift to state {}, stack: {}", to, stack_contents(&stack));
                    lookahead = next_token(&mut tokens, &mut nodes)?;
                }
                Action::Reduce(number) => {
                    self.reduce(number, &mut stack, &mut nodes)?;
                    applied.push(number);
                }
                Action::Accept => {
                    break;
                }
                Action::Error => {
                    return Err(unexpected_token(&lookahead));
                }
                Action::Goto(_) => {
                    // A GOTO can only appear in a non-terminal column, and
                    // actions are looked up for terminals, so the loaded
                    // table cannot match the grammar
                    return Err(Error::ParseError(format!(
                        "goto found in action position at state {}",
                        state
                    )));
                }
            }
        }

        // The accept entry lives in the end-of-input column, but verify the
        // lookahead anyway in case the loaded table accepts a prefix
        if lookahead.kind != TokenKind::Eof {
            return Err(Error::ParseError(format!(
                "trailing input after parse at line {}",
                lookahead.line
            )));
        }

        let Some(root) = nodes.pop() else {
            return Err(Error::ParseError(String::from(
                "no syntax tree after parse",
            )));
        };
        if !nodes.is_empty() {
            return Err(Error::ParseError(format!(
                "{} unconsumed syntax tree fragments after parse",
                nodes.len()
            )));
        }

        Ok((root, applied))
    }

    /// Reduces by the rule with the given number, applying its semantic
    /// action to the node stack, replacing the rule body's parse stack
    /// entries with its head, and following the GOTO for the exposed state
    fn reduce(
        &self,
        number: usize,
        stack: &mut Vec<StackEntry>,
        nodes: &mut Vec<Ast>,
    ) -> Result<()> {
        let rule = self
            .tables
            .rule(number)
            .expect("reduce targets are validated at load");
        debug!("reduce by rule {}: {}", number, rule.production);

        reduce_node(number, nodes);

        if stack.len() <= rule.rhs_len {
            return Err(Error::ParseError(format!(
                "parse stack underflow reducing by rule {}",
                number
            )));
        }
        stack.truncate(stack.len() - rule.rhs_len);

        let exposed = stack.last().unwrap().state;
        let Action::Goto(next) = self.tables.action(exposed, Symbol::NonTerminal(rule.head)) else {
            return Err(Error::ParseError(format!(
                "no goto for {} at state {}",
                rule.head, exposed
            )));
        };
        stack.push(StackEntry {
            state: next,
            symbol: Some(Symbol::NonTerminal(rule.head)),
        });
        trace!("goto state {}, stack: {}", next, stack_contents(stack));

        Ok(())
    }
}

/// Renders the parse stack for tracing, bottom to top, as the alternating
/// sequence of grammar symbols and states
fn stack_contents(stack: &[StackEntry]) -> String {
    let mut parts: Vec<String> = Vec::new();

    for entry in stack {
        if let Some(symbol) = entry.symbol {
            parts.push(match symbol {
                Symbol::Terminal(kind) => kind.to_string(),
                Symbol::NonTerminal(nt) => nt.to_string(),
            });
        }
        parts.push(entry.state.to_string());
    }

    parts.join(" ")
}

/// Pulls the next token, first pushing a leaf node onto the node stack if
/// the token carries semantic value. Keywords and punctuation drive the
/// automaton only and leave no node behind.
fn next_token<I>(tokens: &mut I, nodes: &mut Vec<Ast>) -> Result<Token>
where
    I: Iterator<Item = Token>,
{
    let Some(token) = tokens.next() else {
        return Err(Error::ParseError(String::from(
            "unexpected end of token stream",
        )));
    };

    match token.kind {
        TokenKind::Integer => {
            let value = token
                .text
                .parse()
                .map_err(|_| Error::InvalidInteger(token.text.clone()))?;
            nodes.push(Ast::Integer(value));
        }
        TokenKind::Variable => {
            nodes.push(Ast::Variable(token.text.clone()));
        }
        TokenKind::North => {
            nodes.push(Ast::Direction(Direction::North));
        }
        TokenKind::South => {
            nodes.push(Ast::Direction(Direction::South));
        }
        TokenKind::East => {
            nodes.push(Ast::Direction(Direction::East));
        }
        TokenKind::West => {
            nodes.push(Ast::Direction(Direction::West));
        }
        _ => (),
    }

    Ok(token)
}

/// Returns the parse error for an unexpected token
fn unexpected_token(token: &Token) -> Error {
    if token.kind == TokenKind::Eof {
        Error::ParseError(format!("unexpected end-of-input at line {}", token.line))
    } else {
        Error::ParseError(format!(
            "unexpected '{}' at line {}",
            token.text, token.line
        ))
    }
}

/// Applies the semantic action for the rule with the given number, popping
/// the nodes the rule body contributed and pushing the single node that
/// replaces them. Only integers, variables and directions push a leaf at
/// shift time, so each action pops only its body's share of those, in
/// reverse order. The pop helpers panic if the stack holds the wrong
/// fragments, which can only mean an action has fallen out of step with
/// the rule table.
fn reduce_node(number: usize, nodes: &mut Vec<Ast>) {
    match number {
        // PROGRAM -> SIZE INTEGER INTEGER BEGIN LIST HALT
        1 => {
            let statements = Box::new(pop_node(nodes));
            let height = pop_integer(nodes);
            let width = pop_integer(nodes);
            nodes.push(Ast::Program {
                width,
                height,
                statements,
            });
        }
        // LIST -> STATEMENT SEMICOLON: a one-statement list is the
        // statement itself
        2 => (),
        // LIST -> LIST STATEMENT SEMICOLON
        3 => {
            let right = Box::new(pop_node(nodes));
            let left = Box::new(pop_node(nodes));
            nodes.push(Ast::Sequence { left, right });
        }
        // STATEMENT -> CAT VARIABLE INTEGER INTEGER DIRECTION
        4 => {
            let facing = pop_direction(nodes);
            let y = pop_integer(nodes);
            let x = pop_integer(nodes);
            let name = pop_variable(nodes);
            nodes.push(Ast::Cat { name, x, y, facing });
        }
        // STATEMENT -> MOUSE VARIABLE INTEGER INTEGER DIRECTION
        5 => {
            let facing = pop_direction(nodes);
            let y = pop_integer(nodes);
            let x = pop_integer(nodes);
            let name = pop_variable(nodes);
            nodes.push(Ast::Mouse { name, x, y, facing });
        }
        // STATEMENT -> HOLE INTEGER INTEGER
        6 => {
            let y = pop_integer(nodes);
            let x = pop_integer(nodes);
            nodes.push(Ast::Hole { x, y });
        }
        // STATEMENT -> MOVE VARIABLE: the grammar leaves the distance
        // optional, and this action substitutes the default of one
        7 => {
            let name = pop_variable(nodes);
            nodes.push(Ast::Move { name, distance: 1 });
        }
        // STATEMENT -> MOVE VARIABLE INTEGER
        8 => {
            let distance = pop_integer(nodes);
            let name = pop_variable(nodes);
            nodes.push(Ast::Move { name, distance });
        }
        // STATEMENT -> CLOCKWISE VARIABLE
        9 => {
            let name = pop_variable(nodes);
            nodes.push(Ast::Clockwise { name });
        }
        // STATEMENT -> REPEAT INTEGER LIST END
        10 => {
            let body = Box::new(pop_node(nodes));
            let count = pop_integer(nodes);
            nodes.push(Ast::Repeat { count, body });
        }
        // DIRECTION -> NORTH | SOUTH | EAST | WEST: the direction leaf is
        // already on the stack
        11..=14 => (),
        _ => {
            panic!("no semantic action for rule {}", number);
        }
    }
}

/// Pops the top node from the node stack
fn pop_node(nodes: &mut Vec<Ast>) -> Ast {
    nodes.pop().expect("node stack empty during reduction")
}

/// Pops an integer leaf from the node stack
fn pop_integer(nodes: &mut Vec<Ast>) -> i64 {
    match pop_node(nodes) {
        Ast::Integer(value) => value,
        node => panic!("expected integer on node stack, found {:?}", node),
    }
}

/// Pops a variable leaf from the node stack
fn pop_variable(nodes: &mut Vec<Ast>) -> String {
    match pop_node(nodes) {
        Ast::Variable(name) => name,
        node => panic!("expected variable on node stack, found {:?}", node),
    }
}

/// Pops a direction leaf from the node stack
fn pop_direction(nodes: &mut Vec<Ast>) -> Direction {
    match pop_node(nodes) {
        Ast::Direction(direction) => direction,
        node => panic!("expected direction on node stack, found {:?}", node),
    }
}
