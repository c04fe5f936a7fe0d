//! Recursive-descent parser for the byte-regex dialect.

use crate::regex::{Ast, RegexParseError};

/// Parses `pattern` into an AST.
///
/// # Errors
///
/// [`RegexParseError`] is returned for malformed or unsupported input.
pub(crate) fn parse(pattern: &str) -> Result<Ast, RegexParseError> {
    let mut parser = Parser {
        bytes: pattern.as_bytes(),
        pos: 0,
    };
    let ast = parser.alternation()?;
    match parser.peek() {
        None => Ok(ast),
        // alternation() only stops early on an unmatched ')'.
        Some(_) => Err(RegexParseError::UnbalancedParenthesis { pos: parser.pos }),
    }
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    // alternation := concat ('|' concat)*
    fn alternation(&mut self) -> Result<Ast, RegexParseError> {
        let mut node = self.concat()?;
        while self.peek() == Some(b'|') {
            self.bump();
            let rhs = self.concat()?;
            node = Ast::Union(Box::new(node), Box::new(rhs));
        }
        Ok(node)
    }

    // concat := repeat*; adjacent unrepeated literals are fused into runs so
    // that a word compiles to a single backward search.
    fn concat(&mut self) -> Result<Ast, RegexParseError> {
        let mut nodes: Vec<Ast> = vec![];
        while let Some(b) = self.peek() {
            if b == b'|' || b == b')' {
                break;
            }
            let node = self.repeat()?;
            match (nodes.last_mut(), &node) {
                (Some(Ast::Literal(run)), Ast::Literal(bytes)) => run.extend(bytes),
                _ => nodes.push(node),
            }
        }
        let mut nodes = nodes.into_iter();
        let first = nodes.next().unwrap_or(Ast::Empty);
        Ok(nodes.fold(first, |acc, node| {
            Ast::Concat(Box::new(acc), Box::new(node))
        }))
    }

    // repeat := atom ('*' | '+' | '?')*
    fn repeat(&mut self) -> Result<Ast, RegexParseError> {
        let mut node = self.atom()?;
        while let Some(b) = self.peek() {
            node = match b {
                b'*' => Ast::Star(Box::new(node)),
                b'+' => Ast::Plus(Box::new(node)),
                b'?' => Ast::Union(Box::new(Ast::Empty), Box::new(node)),
                _ => break,
            };
            self.bump();
        }
        Ok(node)
    }

    fn atom(&mut self) -> Result<Ast, RegexParseError> {
        let pos = self.pos;
        // concat() never calls atom() at end of input or before '|' / ')'.
        let b = self.bump().unwrap();
        match b {
            b'(' => {
                let node = self.alternation()?;
                if self.bump() != Some(b')') {
                    return Err(RegexParseError::UnbalancedParenthesis { pos });
                }
                Ok(node)
            }
            b'[' => self.class(pos),
            b'.' => Ok(Ast::Dot),
            b'\\' => match self.bump() {
                Some(escaped) => Ok(Ast::Literal(vec![escaped])),
                None => Err(RegexParseError::TrailingEscape { pos }),
            },
            b'*' | b'+' | b'?' => Err(RegexParseError::DanglingRepetition { pos }),
            _ => Ok(Ast::Literal(vec![b])),
        }
    }

    // class := '[' (item | item '-' item)* ']', entered after the bracket.
    fn class(&mut self, open_pos: usize) -> Result<Ast, RegexParseError> {
        if self.peek() == Some(b'^') {
            return Err(RegexParseError::Unsupported {
                construct: "negated character class",
                pos: self.pos,
            });
        }
        let mut bytes = vec![];
        loop {
            let item_pos = self.pos;
            let lo = match self.bump() {
                None => return Err(RegexParseError::UnterminatedClass { pos: open_pos }),
                Some(b']') => break,
                Some(b'\\') => self
                    .bump()
                    .ok_or(RegexParseError::TrailingEscape { pos: item_pos })?,
                Some(b) => b,
            };
            // A '-' is a range only when another item follows before ']'.
            if self.peek() == Some(b'-') && self.bytes.get(self.pos + 1).is_some_and(|&b| b != b']')
            {
                self.bump();
                let hi = match self.bump().unwrap() {
                    b'\\' => self
                        .bump()
                        .ok_or(RegexParseError::TrailingEscape { pos: item_pos })?,
                    b => b,
                };
                if hi < lo {
                    return Err(RegexParseError::InvalidClassRange { pos: item_pos });
                }
                bytes.extend(lo..=hi);
            } else {
                bytes.push(lo);
            }
        }
        bytes.sort_unstable();
        bytes.dedup();
        Ok(Ast::Class(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Ast {
        Ast::Literal(s.as_bytes().to_vec())
    }

    #[test]
    fn test_literal_run_fuses() {
        assert_eq!(parse("abc").unwrap(), lit("abc"));
    }

    #[test]
    fn test_empty_pattern() {
        assert_eq!(parse("").unwrap(), Ast::Empty);
    }

    #[test]
    fn test_repetition_binds_to_last_atom() {
        // "an+" repeats only the 'n'.
        assert_eq!(
            parse("an+").unwrap(),
            Ast::Concat(
                Box::new(lit("a")),
                Box::new(Ast::Plus(Box::new(lit("n"))))
            )
        );
    }

    #[test]
    fn test_group_repetition() {
        assert_eq!(
            parse("(ab)*").unwrap(),
            Ast::Star(Box::new(lit("ab")))
        );
    }

    #[test]
    fn test_option_desugars_to_union_with_empty() {
        assert_eq!(
            parse("a?").unwrap(),
            Ast::Union(Box::new(Ast::Empty), Box::new(lit("a")))
        );
    }

    #[test]
    fn test_alternation_and_dot() {
        assert_eq!(
            parse("a|.").unwrap(),
            Ast::Union(Box::new(lit("a")), Box::new(Ast::Dot))
        );
    }

    #[test]
    fn test_class_with_ranges_and_escapes() {
        assert_eq!(
            parse("[a-cx\\]]").unwrap(),
            Ast::Class(vec![b']', b'a', b'b', b'c', b'x'])
        );
        // Trailing '-' before ']' is a plain byte.
        assert_eq!(parse("[a-]").unwrap(), Ast::Class(vec![b'-', b'a']));
    }

    #[test]
    fn test_escaped_metacharacters() {
        assert_eq!(parse("\\*\\.").unwrap(), lit("*."));
    }

    #[test]
    fn test_errors_carry_positions() {
        assert_eq!(
            parse("*a").unwrap_err(),
            RegexParseError::DanglingRepetition { pos: 0 }
        );
        assert_eq!(
            parse("(ab").unwrap_err(),
            RegexParseError::UnbalancedParenthesis { pos: 0 }
        );
        assert_eq!(
            parse("ab)").unwrap_err(),
            RegexParseError::UnbalancedParenthesis { pos: 2 }
        );
        assert_eq!(
            parse("[abc").unwrap_err(),
            RegexParseError::UnterminatedClass { pos: 0 }
        );
        assert_eq!(
            parse("[z-a]").unwrap_err(),
            RegexParseError::InvalidClassRange { pos: 1 }
        );
        assert_eq!(
            parse("ab\\").unwrap_err(),
            RegexParseError::TrailingEscape { pos: 2 }
        );
        assert_eq!(
            parse("[^ab]").unwrap_err(),
            RegexParseError::Unsupported {
                construct: "negated character class",
                pos: 1
            }
        );
    }
}
