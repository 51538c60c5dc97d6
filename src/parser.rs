//! Text surface for ALCQ knowledge bases
//!
//! Concepts are written in prefix form; ABox and TBox inputs are
//! line-oriented:
//!
//! ```text
//! # ABox lines
//! Woman[mary]
//! hasChild[mary, tom]
//! (exists hasChild Person)[mary]
//! (<= 2 (rule hasChild T))[mary]
//! ann != eva
//!
//! # TBox lines
//! Mother == (and Woman (exists hasChild Person))
//! ```
//!
//! Operators: `and`, `or`, `not`, `implies`, `exists`, `all`, `>=`, `<=`,
//! `rule`, and `subsumes` (premise root only). `T` is the unrestricted
//! filler and is only legal inside a `rule` form. Malformed input fails
//! fast with an error naming the offending subexpression; it is never a
//! reasoning verdict.

use crate::abox::{Abox, Individual};
use crate::concept::{Concept, Role};
use crate::error::{DlError, DlResult};
use crate::reasoning::Premise;
use crate::tbox::TBox;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    NotEqual,
    DefinedAs,
    Word(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Comma => write!(f, ","),
            Token::NotEqual => write!(f, "!="),
            Token::DefinedAs => write!(f, "=="),
            Token::Word(word) => write!(f, "{}", word),
        }
    }
}

fn tokenize(input: &str) -> DlResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::LParen);
            }
            ')' => {
                chars.next();
                tokens.push(Token::RParen);
            }
            '[' => {
                chars.next();
                tokens.push(Token::LBracket);
            }
            ']' => {
                chars.next();
                tokens.push(Token::RBracket);
            }
            ',' => {
                chars.next();
                tokens.push(Token::Comma);
            }
            '!' => {
                chars.next();
                match chars.next() {
                    Some('=') => tokens.push(Token::NotEqual),
                    other => {
                        return Err(DlError::ParseError(format!(
                            "expected '=' after '!', found {:?}",
                            other
                        )))
                    }
                }
            }
            '=' => {
                chars.next();
                match chars.next() {
                    Some('=') => tokens.push(Token::DefinedAs),
                    other => {
                        return Err(DlError::ParseError(format!(
                            "expected '=' after '=', found {:?}",
                            other
                        )))
                    }
                }
            }
            _ => {
                let mut word = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() || matches!(c, '(' | ')' | '[' | ']' | ',' | '!' | '=') {
                        // '>=' and '<=' keep their '='
                        if c == '=' && (word == ">" || word == "<") {
                            word.push(c);
                            chars.next();
                        }
                        break;
                    }
                    word.push(c);
                    chars.next();
                }
                if word.is_empty() {
                    return Err(DlError::ParseError(format!(
                        "unexpected character {:?}",
                        c
                    )));
                }
                tokens.push(Token::Word(word));
            }
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(input: &str) -> DlResult<Self> {
        Ok(Parser {
            tokens: tokenize(input)?,
            pos: 0,
        })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token) -> DlResult<()> {
        match self.next() {
            Some(token) if token == expected => Ok(()),
            Some(token) => Err(DlError::ParseError(format!(
                "expected '{}', found '{}'",
                expected, token
            ))),
            None => Err(DlError::ParseError(format!(
                "expected '{}', found end of input",
                expected
            ))),
        }
    }

    fn expect_word(&mut self) -> DlResult<String> {
        match self.next() {
            Some(Token::Word(word)) => Ok(word),
            Some(token) => Err(DlError::ParseError(format!(
                "expected a name, found '{}'",
                token
            ))),
            None => Err(DlError::ParseError(
                "expected a name, found end of input".to_string(),
            )),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn expect_end(&self) -> DlResult<()> {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(DlError::ParseError(format!(
                "trailing input starting at '{}'",
                token
            ))),
        }
    }

    /// Parse one concept expression. `top_allowed` is true only in the
    /// filler slot of a `rule` form.
    fn concept(&mut self, top_allowed: bool) -> DlResult<Concept> {
        match self.next() {
            Some(Token::Word(word)) => {
                if word == "T" {
                    if top_allowed {
                        Ok(Concept::Top)
                    } else {
                        Err(DlError::MalformedExpression(
                            "T is only allowed inside a number restriction".to_string(),
                        ))
                    }
                } else {
                    Ok(Concept::named(word.as_str()))
                }
            }
            Some(Token::LParen) => {
                let head = self.expect_word()?;
                let concept = self.compound(&head)?;
                self.expect(Token::RParen)?;
                Ok(concept)
            }
            Some(token) => Err(DlError::ParseError(format!(
                "expected a concept, found '{}'",
                token
            ))),
            None => Err(DlError::ParseError(
                "expected a concept, found end of input".to_string(),
            )),
        }
    }

    fn compound(&mut self, head: &str) -> DlResult<Concept> {
        match head {
            "and" | "or" => {
                let mut operands = Vec::new();
                while self.peek() != Some(&Token::RParen) && !self.at_end() {
                    operands.push(self.concept(false)?);
                }
                if operands.len() < 2 {
                    return Err(DlError::MalformedExpression(format!(
                        "({} ...) needs at least two operands",
                        head
                    )));
                }
                Ok(if head == "and" {
                    Concept::intersection_of(operands)
                } else {
                    Concept::union_of(operands)
                })
            }
            "not" => Ok(Concept::complement(self.concept(false)?)),
            "implies" => {
                let lhs = self.concept(false)?;
                let rhs = self.concept(false)?;
                Ok(Concept::implication(lhs, rhs))
            }
            "exists" | "all" => {
                let role = Role::new(self.expect_word()?.as_str());
                let filler = self.concept(false)?;
                Ok(if head == "exists" {
                    Concept::some_values(role, filler)
                } else {
                    Concept::all_values(role, filler)
                })
            }
            ">=" | "<=" => {
                let count = self.cardinality(head)?;
                let (role, filler) = self.rule_form()?;
                Ok(if head == ">=" {
                    Concept::min_cardinality(count, role, filler)
                } else {
                    Concept::max_cardinality(count, role, filler)
                })
            }
            "subsumes" => Err(DlError::MalformedExpression(
                "subsumes is only allowed at the root of a premise".to_string(),
            )),
            "rule" => Err(DlError::MalformedExpression(
                "rule is only allowed inside a number restriction".to_string(),
            )),
            other => Err(DlError::UnknownOperator(other.to_string())),
        }
    }

    fn cardinality(&mut self, head: &str) -> DlResult<u32> {
        let word = self.expect_word()?;
        word.parse::<u32>().map_err(|_| {
            DlError::InvalidCardinality(format!("({} {} ...)", head, word))
        })
    }

    /// `(rule r C)` where C may be `T`
    fn rule_form(&mut self) -> DlResult<(Role, Concept)> {
        self.expect(Token::LParen)?;
        let head = self.expect_word()?;
        if head != "rule" {
            return Err(DlError::MalformedExpression(format!(
                "expected (rule ...) inside a number restriction, found ({} ...)",
                head
            )));
        }
        let role = Role::new(self.expect_word()?.as_str());
        let filler = self.concept(true)?;
        self.expect(Token::RParen)?;
        Ok((role, filler))
    }
}

/// Parse a single concept expression
pub fn parse_concept(input: &str) -> DlResult<Concept> {
    let mut parser = Parser::new(input)?;
    let concept = parser.concept(false)?;
    parser.expect_end()?;
    Ok(concept)
}

/// Parse a subsumption premise `(subsumes C D)`
pub fn parse_premise(input: &str) -> DlResult<Premise> {
    let mut parser = Parser::new(input)?;
    parser.expect(Token::LParen)?;
    let head = parser.expect_word()?;
    if head != "subsumes" {
        return Err(DlError::MalformedExpression(format!(
            "expected (subsumes ...) at the premise root, found ({} ...)",
            head
        )));
    }
    let subsumee = parser.concept(false)?;
    let subsumer = parser.concept(false)?;
    parser.expect(Token::RParen)?;
    parser.expect_end()?;
    Ok(Premise::new(subsumee, subsumer))
}

/// Parse an ABox, one assertion per line; `#` starts a comment line
pub fn parse_abox(input: &str) -> DlResult<Abox> {
    let mut abox = Abox::new();

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parser = Parser::new(line)?;

        // a != b
        if parser.tokens.contains(&Token::NotEqual) {
            let lhs = parser.expect_word()?;
            parser.expect(Token::NotEqual)?;
            let rhs = parser.expect_word()?;
            parser.expect_end()?;
            abox.add_distinct(Individual::named(lhs.as_str()), Individual::named(rhs.as_str()));
            continue;
        }

        // Either C[a] or r[a, b]; a two-argument head must be a plain role name
        let head_word = match parser.peek() {
            Some(Token::Word(word)) => Some(word.clone()),
            _ => None,
        };
        let head_concept = match head_word {
            Some(ref word) if word != "T" => {
                parser.next();
                None
            }
            _ => Some(parser.concept(false)?),
        };

        parser.expect(Token::LBracket)?;
        let first = parser.expect_word()?;
        match parser.next() {
            Some(Token::RBracket) => {
                parser.expect_end()?;
                let concept = match (head_concept, head_word) {
                    (Some(concept), _) => concept,
                    (None, Some(word)) => Concept::named(word.as_str()),
                    (None, None) => {
                        return Err(DlError::ParseError(format!("missing concept in: {}", line)))
                    }
                };
                abox.assert_concept(concept, Individual::named(first.as_str()));
            }
            Some(Token::Comma) => {
                let second = parser.expect_word()?;
                parser.expect(Token::RBracket)?;
                parser.expect_end()?;
                match (head_concept, head_word) {
                    (None, Some(role)) => {
                        abox.add_role(
                            Role::new(role.as_str()),
                            Individual::named(first.as_str()),
                            Individual::named(second.as_str()),
                        );
                    }
                    _ => {
                        return Err(DlError::MalformedExpression(format!(
                            "a role assertion needs a plain role name: {}",
                            line
                        )))
                    }
                }
            }
            other => {
                return Err(DlError::ParseError(format!(
                    "expected ']' or ',', found {:?} in: {}",
                    other.map(|t| t.to_string()),
                    line
                )))
            }
        }
    }

    Ok(abox)
}

/// Parse a TBox, one `Name == concept` definition per line
pub fn parse_tbox(input: &str) -> DlResult<TBox> {
    let mut tbox = TBox::new();

    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parser = Parser::new(line)?;
        let name = parser.expect_word()?;
        if name == "T" {
            return Err(DlError::MalformedExpression(format!(
                "T cannot be defined: {}",
                line
            )));
        }
        parser.expect(Token::DefinedAs)?;
        let definition = parser.concept(false)?;
        parser.expect_end()?;
        tbox.define(name.as_str(), definition);
    }

    Ok(tbox)
}
