use crate::errors::{Error, Result};
use crate::lexer::token::TokenKind;
use std::fmt;

/// The number of terminal symbol columns in a parse table
const NUM_TERMINALS: usize = 18;

/// The number of non-terminal symbol columns in a parse table
const NUM_NON_TERMINALS: usize = 4;

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
/// A non-terminal symbol in the MOUSEYCAT grammar
pub enum NonTerminal {
    Program,
    List,
    Statement,
    Direction,
}

impl fmt::Display for NonTerminal {
    /// Formats the non-terminal using the given formatter
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NonTerminal::Program => write!(f, "program"),
            NonTerminal::List => write!(f, "list"),
            NonTerminal::Statement => write!(f, "statement"),
            NonTerminal::Direction => write!(f, "direction"),
        }
    }
}

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
/// A grammar symbol, used to select a parse table column
pub enum Symbol {
    Terminal(TokenKind),
    NonTerminal(NonTerminal),
}

#[derive(Debug, Eq, PartialEq, Clone, Copy)]
/// An entry in a parse table
pub enum Action {
    Goto(usize),
    Shift(usize),
    Reduce(usize),
    Accept,
    Error,
}

#[derive(Debug, PartialEq, Clone)]
/// A grammar rule, with the number of symbols in its body and its text
/// representation for derivation output
pub struct Rule {
    pub number: usize,
    pub rhs_len: usize,
    pub head: NonTerminal,
    pub production: String,
}

/// A decoded LR parse table and its accompanying grammar rules
pub struct GrammarTables {
    actions: Vec<Vec<Action>>,
    rules: Vec<Rule>,
}

impl Symbol {
    /// Returns the parse table column for this symbol. Actions on terminals
    /// and GOTOs for non-terminals live in the same table, since the two
    /// column sets are distinct.
    fn column(&self) -> usize {
        match self {
            Symbol::Terminal(kind) => match kind {
                TokenKind::Size => 0,
                TokenKind::Integer => 1,
                TokenKind::Begin => 2,
                TokenKind::Halt => 3,
                TokenKind::Semicolon => 4,
                TokenKind::Cat => 5,
                TokenKind::Variable => 6,
                TokenKind::Mouse => 7,
                TokenKind::Hole => 8,
                TokenKind::Move => 9,
                TokenKind::Clockwise => 10,
                TokenKind::Repeat => 11,
                TokenKind::End => 12,
                TokenKind::North => 13,
                TokenKind::South => 14,
                TokenKind::East => 15,
                TokenKind::West => 16,
                TokenKind::Eof => 17,
            },
            Symbol::NonTerminal(nt) => match nt {
                NonTerminal::Program => NUM_TERMINALS,
                NonTerminal::List => NUM_TERMINALS + 1,
                NonTerminal::Statement => NUM_TERMINALS + 2,
                NonTerminal::Direction => NUM_TERMINALS + 3,
            },
        }
    }
}

impl GrammarTables {
    /// Creates grammar tables from string representations of a parse table
    /// and a rule set
    pub fn new(table: &str, rules: &str) -> Result<GrammarTables> {
        let rules = parse_rules(rules)?;
        let actions = parse_table(table)?;
        validate_targets(&actions, &rules)?;

        Ok(GrammarTables { actions, rules })
    }

    /// Creates grammar tables from string representations in files with the
    /// given paths
    pub fn new_from_files(
        table_path: &str,
        rules_path: &str,
    ) -> std::result::Result<GrammarTables, Box<dyn std::error::Error>> {
        Ok(GrammarTables::new(
            &std::fs::read_to_string(table_path)?,
            &std::fs::read_to_string(rules_path)?,
        )?)
    }

    /// Returns the tables for the MOUSEYCAT grammar
    pub fn mouseycat() -> Result<GrammarTables> {
        GrammarTables::new(
            include_str!("../parsedata/mouseycat.tbl"),
            include_str!("../parsedata/mouseycat.rules"),
        )
    }

    /// Returns the action for the given state and symbol
    pub fn action(&self, state: usize, symbol: Symbol) -> Action {
        self.actions[state][symbol.column()]
    }

    /// Returns the rule with the given number, if any. Rule numbers begin
    /// at one, matching the reduce actions in the parse table.
    pub fn rule(&self, number: usize) -> Option<&Rule> {
        if number == 0 {
            return None;
        }

        self.rules.get(number - 1)
    }

    /// Returns the number of states in the parse table
    pub fn num_states(&self) -> usize {
        self.actions.len()
    }

    /// Returns the number of grammar rules
    pub fn num_rules(&self) -> usize {
        self.rules.len()
    }
}

/// Returns the lines of the input with comments and blank lines removed
fn data_lines(input: &str) -> impl Iterator<Item = &str> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Returns the terminal symbol for the given header column name, if any
fn terminal_for_name(name: &str) -> Option<TokenKind> {
    match name {
        "size" => Some(TokenKind::Size),
        "integer" => Some(TokenKind::Integer),
        "begin" => Some(TokenKind::Begin),
        "halt" => Some(TokenKind::Halt),
        "semicolon" => Some(TokenKind::Semicolon),
        "cat" => Some(TokenKind::Cat),
        "variable" => Some(TokenKind::Variable),
        "mouse" => Some(TokenKind::Mouse),
        "hole" => Some(TokenKind::Hole),
        "move" => Some(TokenKind::Move),
        "clockwise" => Some(TokenKind::Clockwise),
        "repeat" => Some(TokenKind::Repeat),
        "end" => Some(TokenKind::End),
        "north" => Some(TokenKind::North),
        "south" => Some(TokenKind::South),
        "east" => Some(TokenKind::East),
        "west" => Some(TokenKind::West),
        "eof" => Some(TokenKind::Eof),
        _ => None,
    }
}

/// Returns the non-terminal symbol for the given name, if any
fn non_terminal_for_name(name: &str) -> Option<NonTerminal> {
    match name {
        "program" => Some(NonTerminal::Program),
        "list" => Some(NonTerminal::List),
        "statement" => Some(NonTerminal::Statement),
        "direction" => Some(NonTerminal::Direction),
        _ => None,
    }
}

/// Parses a rule set from its string representation, one rule per line in
/// the form number&length&head&production
fn parse_rules(input: &str) -> Result<Vec<Rule>> {
    let mut rules: Vec<Rule> = Vec::new();

    for line in data_lines(input) {
        let fields: Vec<&str> = line.split('&').collect();
        if fields.len() != 4 {
            return Err(Error::MalformedRule(format!(
                "expected 4 fields, found {} in '{}'",
                fields.len(),
                line
            )));
        }

        let number: usize = fields[0]
            .parse()
            .map_err(|_| Error::MalformedRule(format!("bad rule number '{}'", fields[0])))?;
        if number != rules.len() + 1 {
            return Err(Error::MalformedRule(format!(
                "rule number {} out of sequence",
                number
            )));
        }

        let rhs_len: usize = fields[1]
            .parse()
            .map_err(|_| Error::MalformedRule(format!("bad body length '{}'", fields[1])))?;
        if rhs_len == 0 {
            return Err(Error::MalformedRule(format!("empty body for rule {}", number)));
        }

        let Some(head) = non_terminal_for_name(&fields[2].to_lowercase()) else {
            return Err(Error::MalformedRule(format!(
                "unknown non-terminal '{}'",
                fields[2]
            )));
        };

        let production = String::from(fields[3].trim());
        let body_len = production.split_whitespace().skip(2).count();
        if body_len != rhs_len {
            return Err(Error::MalformedRule(format!(
                "body length {} does not match production '{}'",
                rhs_len, production
            )));
        }

        rules.push(Rule {
            number,
            rhs_len,
            head,
            production,
        });
    }

    if rules.is_empty() {
        return Err(Error::MalformedRule(String::from("no rules found")));
    }

    Ok(rules)
}

/// Parses a parse table from its string representation. The table has two
/// sections, each introduced by a header line naming its columns: actions
/// on terminals first, then GOTO targets for non-terminals.
fn parse_table(input: &str) -> Result<Vec<Vec<Action>>> {
    let mut lines = data_lines(input).peekable();

    let terminals = parse_action_header(lines.next())?;

    let mut actions: Vec<Vec<Action>> = Vec::new();
    while let Some(line) = lines.peek() {
        if line.starts_with("state&") {
            break;
        }
        let row = parse_action_row(lines.next().unwrap(), &terminals, actions.len())?;
        actions.push(row);
    }

    if actions.is_empty() {
        return Err(Error::MalformedTable(String::from("no states found")));
    }

    let non_terminals = parse_goto_header(lines.next())?;

    let mut state = 0;
    for line in lines {
        if state >= actions.len() {
            return Err(Error::MalformedTable(String::from(
                "goto section has more states than action section",
            )));
        }
        parse_goto_row(line, &non_terminals, state, &mut actions)?;
        state += 1;
    }

    if state != actions.len() {
        return Err(Error::MalformedTable(format!(
            "goto section has {} states, expected {}",
            state,
            actions.len()
        )));
    }

    Ok(actions)
}

/// Parses the header line of the terminal action section, returning the
/// terminal symbol for each column
fn parse_action_header(line: Option<&str>) -> Result<Vec<TokenKind>> {
    let Some(line) = line else {
        return Err(Error::MalformedTable(String::from("missing action header")));
    };

    let mut fields = line.split('&');
    if fields.next() != Some("state") {
        return Err(Error::MalformedTable(String::from(
            "action header must begin with 'state'",
        )));
    }

    let mut terminals: Vec<TokenKind> = Vec::new();
    for name in fields {
        let Some(kind) = terminal_for_name(name) else {
            return Err(Error::MalformedTable(format!("unknown terminal '{}'", name)));
        };
        if terminals.contains(&kind) {
            return Err(Error::MalformedTable(format!("duplicate terminal '{}'", name)));
        }
        terminals.push(kind);
    }

    if terminals.len() != NUM_TERMINALS {
        return Err(Error::MalformedTable(format!(
            "expected {} terminal columns, found {}",
            NUM_TERMINALS,
            terminals.len()
        )));
    }

    Ok(terminals)
}

/// Parses the header line of the GOTO section, returning the non-terminal
/// symbol for each column
fn parse_goto_header(line: Option<&str>) -> Result<Vec<NonTerminal>> {
    let Some(line) = line else {
        return Err(Error::MalformedTable(String::from("missing goto header")));
    };

    let mut fields = line.split('&');
    if fields.next() != Some("state") {
        return Err(Error::MalformedTable(String::from(
            "goto header must begin with 'state'",
        )));
    }

    let mut non_terminals: Vec<NonTerminal> = Vec::new();
    for name in fields {
        let Some(nt) = non_terminal_for_name(name) else {
            return Err(Error::MalformedTable(format!(
                "unknown non-terminal '{}'",
                name
            )));
        };
        if non_terminals.contains(&nt) {
            return Err(Error::MalformedTable(format!(
                "duplicate non-terminal '{}'",
                name
            )));
        }
        non_terminals.push(nt);
    }

    if non_terminals.len() != NUM_NON_TERMINALS {
        return Err(Error::MalformedTable(format!(
            "expected {} non-terminal columns, found {}",
            NUM_NON_TERMINALS,
            non_terminals.len()
        )));
    }

    Ok(non_terminals)
}

/// Parses one row of the terminal action section
fn parse_action_row(line: &str, terminals: &[TokenKind], state: usize) -> Result<Vec<Action>> {
    let fields: Vec<&str> = line.split('&').collect();
    if fields.len() != terminals.len() + 1 {
        return Err(Error::MalformedTable(format!(
            "expected {} cells for state {}, found {}",
            terminals.len(),
            state,
            fields.len() - 1
        )));
    }

    let label: usize = fields[0]
        .parse()
        .map_err(|_| Error::MalformedTable(format!("bad state label '{}'", fields[0])))?;
    if label != state {
        return Err(Error::MalformedTable(format!(
            "state {} out of sequence",
            label
        )));
    }

    let mut row = vec![Action::Error; NUM_TERMINALS + NUM_NON_TERMINALS];
    for (i, cell) in fields[1..].iter().enumerate() {
        row[Symbol::Terminal(terminals[i]).column()] = parse_action_cell(cell, state)?;
    }

    Ok(row)
}

/// Decodes a single action cell: empty or err for error, sN for a shift,
/// rN for a reduce, or acc for accept
fn parse_action_cell(cell: &str, state: usize) -> Result<Action> {
    if cell.is_empty() || cell == "err" {
        return Ok(Action::Error);
    }
    if cell == "acc" {
        return Ok(Action::Accept);
    }

    if let Some(target) = cell.strip_prefix('s') {
        if let Ok(target) = target.parse() {
            return Ok(Action::Shift(target));
        }
    } else if let Some(number) = cell.strip_prefix('r') {
        if let Ok(number) = number.parse() {
            return Ok(Action::Reduce(number));
        }
    }

    Err(Error::MalformedTable(format!(
        "bad cell '{}' at state {}",
        cell, state
    )))
}

/// Parses one row of the GOTO section into the given state's action row
fn parse_goto_row(
    line: &str,
    non_terminals: &[NonTerminal],
    state: usize,
    actions: &mut [Vec<Action>],
) -> Result<()> {
    let fields: Vec<&str> = line.split('&').collect();
    if fields.len() != non_terminals.len() + 1 {
        return Err(Error::MalformedTable(format!(
            "expected {} goto cells for state {}, found {}",
            non_terminals.len(),
            state,
            fields.len() - 1
        )));
    }

    let label: usize = fields[0]
        .parse()
        .map_err(|_| Error::MalformedTable(format!("bad state label '{}'", fields[0])))?;
    if label != state {
        return Err(Error::MalformedTable(format!(
            "goto state {} out of sequence",
            label
        )));
    }

    for (i, cell) in fields[1..].iter().enumerate() {
        if cell.is_empty() || *cell == "err" {
            continue;
        }

        let Ok(target) = cell.parse::<usize>() else {
            return Err(Error::MalformedTable(format!(
                "bad goto cell '{}' at state {}",
                cell, state
            )));
        };
        actions[state][Symbol::NonTerminal(non_terminals[i]).column()] = Action::Goto(target);
    }

    Ok(())
}

/// Verifies that every shift and goto target names a state in the table,
/// and that every reduce action names a known rule
fn validate_targets(actions: &[Vec<Action>], rules: &[Rule]) -> Result<()> {
    for (state, row) in actions.iter().enumerate() {
        for action in row {
            match action {
                Action::Shift(to) | Action::Goto(to) => {
                    if *to >= actions.len() {
                        return Err(Error::MalformedTable(format!(
                            "target state {} out of range at state {}",
                            to, state
                        )));
                    }
                }
                Action::Reduce(number) => {
                    if *number == 0 || *number > rules.len() {
                        return Err(Error::MalformedTable(format!(
                            "reduce by unknown rule {} at state {}",
                            number, state
                        )));
                    }
                }
                Action::Accept | Action::Error => (),
            }
        }
    }

    Ok(())
}
