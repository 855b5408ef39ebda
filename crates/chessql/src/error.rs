use thiserror::Error;

/// 1-based column into the source query text.
pub type Position = usize;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("unterminated string literal starting at position {0}")]
    UnterminatedString(Position),

    #[error("unknown character '{1}' at position {0}")]
    UnknownCharacter(Position, char),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected token '{lexeme}' at position {position}")]
    UnexpectedToken { position: Position, lexeme: String },

    #[error("unexpected end of input")]
    UnexpectedEnd,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("unknown motif '{0}'")]
    UnknownMotif(String),

    #[error("type mismatch for field '{field}': expected {expected}")]
    TypeMismatch { field: String, expected: &'static str },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Compile(#[from] CompileError),
}
