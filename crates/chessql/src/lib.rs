//! ChessQL: lexer, parser, AST, and SQL compiler (spec §4.10-4.12).

pub mod ast;
pub mod compiler;
pub mod error;
pub mod lexer;
pub mod parser;

pub use compiler::{compile, QueryParam};
pub use error::QueryError;
pub use lexer::lex;
pub use parser::parse;

/// Lex, parse, and compile `query` in one call, as the feature store's
/// query handler invokes it.
pub fn compile_query(query: &str) -> Result<(String, Vec<QueryParam>), QueryError> {
    let tokens = lex(query)?;
    let expr = parse(&tokens)?;
    Ok(compile(&expr)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_to_end_query_compiles() {
        let (sql, params) = compile_query(r#"motif(fork) AND white.elo >= 2000"#).unwrap();
        assert!(sql.contains("EXISTS"));
        assert_eq!(params.len(), 2);
    }
}
