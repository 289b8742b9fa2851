//! Tokenizes programs and produces lexing diagnostics.

#[macro_use]
mod errors;
pub use errors::ScanErrors;
use errors::*;

pub mod types;
use types::TokenType as TT;
pub use types::*;

mod options;
pub use options::ScannerOptions;

use crate::common::Span;
use crate::diagnostics::Diagnostic;

/// Describes the result of tokenizing a program.
pub struct ScanResult {
    /// The tokens produced, always ending in an `EOF` token.
    pub tokens: Vec<Token>,
    /// Any diagnostics raised while scanning (e.g. invalid characters).
    pub diagnostics: Vec<Diagnostic>,
}

/// Scans and tokenizes a string-like program.
pub fn scan<'a, T: Into<&'a str>>(input: T) -> ScanResult {
    scan_with_options(input, ScannerOptions::default())
}

/// Scans with a customized definition of what counts as a variable-name character.
pub fn scan_with_options<'a, T: Into<&'a str>>(input: T, options: ScannerOptions) -> ScanResult {
    let mut scanner = Scanner::new(input.into(), options);
    scanner.scan();
    ScanResult {
        tokens: scanner.output,
        diagnostics: scanner.diagnostics,
    }
}

struct Scanner {
    pos: usize,
    input: Vec<char>,
    options: ScannerOptions,
    leading_trivia_start: usize,
    output: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl Scanner {
    fn new(input: &str, options: ScannerOptions) -> Scanner {
        Scanner {
            pos: 0,
            input: input.chars().collect(),
            options,
            leading_trivia_start: 0,
            output: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    #[inline]
    fn peek(&self) -> Option<&char> {
        self.input.get(self.pos)
    }

    #[inline]
    fn next(&mut self) -> Option<&char> {
        let ch = self.input.get(self.pos);
        self.pos += 1;
        ch
    }

    #[inline]
    fn push_diag(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn push_tok<S: Into<Span>>(&mut self, ty: TokenType, span: S) {
        let span: Span = span.into();
        let full_span = Span {
            lo: self.leading_trivia_start,
            hi: span.hi,
        };
        self.output.push(Token::new(ty, span, full_span));
        self.leading_trivia_start = span.hi;
    }

    fn collect_while<F: Fn(&char) -> bool>(&mut self, pred: F) -> String {
        let mut s = String::with_capacity(8);
        while let Some(true) = self.peek().map(pred) {
            s.push(*self.next().unwrap());
        }
        s
    }

    fn scan(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                _ if c.is_whitespace() => self.scan_trivia(),
                _ if c.is_ascii_digit() => self.scan_int(),
                _ if self.options.is_var_char(*c) => self.scan_ident(),
                _ => self.scan_symbol(),
            }
        }

        self.push_tok(TT::EOF, (self.pos, self.pos + 1));
    }

    fn scan_trivia(&mut self) {
        self.next();
    }

    fn scan_symbol(&mut self) {
        use TokenType::*;
        let start = self.pos;
        let ty = match *self.next().unwrap() {
            '+' => Plus,
            '-' => Minus,
            '*' => Mult,
            '/' => Div,
            '^' => Exp,
            '=' => Equal,
            '<' => {
                if self.peek() == Some(&'=') {
                    self.next();
                    Le
                } else {
                    Lt
                }
            }
            '>' => {
                if self.peek() == Some(&'=') {
                    self.next();
                    Ge
                } else {
                    Gt
                }
            }
            '(' => OpenParen,
            ')' => CloseParen,
            c => Invalid(c.to_string()),
        };
        let span = (start, self.pos);

        if matches!(ty, Invalid(..)) {
            self.push_diag(InvalidToken!(span));
        }
        self.push_tok(ty, span);
    }

    /// Scans an integer literal. Fractions are not tokenized as a single literal; they are built
    /// from two integer tokens separated by `/` at parse time.
    fn scan_int(&mut self) {
        let start = self.pos;
        let digits = self.collect_while(|c| c.is_ascii_digit());
        // `unwrap` is safe: `digits` is non-empty and all-ASCII-digit by construction.
        let value: i64 = digits.parse().unwrap();
        self.push_tok(TT::Int(value), (start, self.pos));
    }

    fn scan_ident(&mut self) {
        let start = self.pos;
        let name = self.collect_while(|c| self.options.is_var_char(*c));
        self.push_tok(TT::Ident(name), (start, self.pos));
    }
}

#[cfg(test)]
mod tests {
    macro_rules! scanner_tests {
        ($($name:ident: $program:expr, $format_str:expr)*) => {
        $(
            #[test]
            fn $name() {
                use crate::common::Span;
                use crate::scanner::scan;

                let mut tokens = scan($program).tokens;
                tokens.pop(); // EOF

                let tokens_str = tokens
                    .iter()
                    .map(|tok| tok.to_string())
                    .collect::<Vec<_>>().join(" ");
                assert_eq!(tokens_str, $format_str);

                for token in tokens {
                    let Span { lo, hi } = token.span;
                    assert_eq!($program[lo..hi], token.to_string());
                }
            }
        )*
        }
    }

    mod scan {
        scanner_tests! {
            integer: "2", "2"
            plus: "+", "+"
            minus: "-", "-"
            mult: "*", "*"
            div: "/", "/"
            exp: "^", "^"
            equal: "=", "="
            lt: "<", "<"
            le: "<=", "<="
            gt: ">", ">"
            ge: ">=", ">="
            open_paren: "(", "("
            close_paren: ")", ")"

            empty_string: "", ""
            skip_whitespace: "  =  ", "="

            multiple_integers: "1 2 3", "1 2 3"

            expressions: "1 + 2 ^ 5", "1 + 2 ^ 5"

            variables: "a = 5", "a = 5"
            variables_cap: "ABcd = 5", "ABcd = 5"
            function_call: "abs(x)", "abs ( x )"
            comparators: "x <= 5", "x <= 5"
        }
    }

    mod scan_invalid {
        scanner_tests! {
            invalid_tokens: "@", "@"
            invalid_tokens_mixed_with_valid: "=@/", "= @ /"
            invalid_expressions: "1 + @ 2", "1 + @ 2"
        }
    }

    #[test]
    fn leading_trivia() {
        let program = r#"1 + 2  +    3 -

 4   ^ 5"#;
        let tokens = crate::scan(program).tokens;
        let toks_with_trivia = vec![
            "1", " +", " 2", "  +", "    3", " -", "  \n\n 4", "   ^", " 5",
        ];
        for (tok, str_with_trivia) in tokens.into_iter().zip(toks_with_trivia) {
            assert_eq!(tok.full_span.over(program), str_with_trivia);
        }
    }
}
