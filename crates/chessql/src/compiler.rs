//! Compiles a ChessQL AST into a parameterized SQL WHERE-clause fragment
//! (spec §4.12). Field and motif names are resolved through fixed
//! whitelists; no column or table name is ever derived from user input.

use crate::ast::{CompOp, Expr, Value};
use crate::error::CompileError;

#[derive(Debug, Clone, PartialEq)]
pub enum QueryParam {
    Int(i64),
    Str(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldType {
    String,
    Int,
    Timestamp,
}

struct FieldDef {
    column: &'static str,
    ty: FieldType,
}

/// Both dotted (`white.elo`) and underscored (`white_elo`) spellings
/// resolve to the same column.
fn lookup_field(name: &str) -> Option<FieldDef> {
    let normalized = name.replace('.', "_");
    let def = match normalized.as_str() {
        "platform" => FieldDef { column: "platform", ty: FieldType::String },
        "white_username" => FieldDef { column: "white_username", ty: FieldType::String },
        "black_username" => FieldDef { column: "black_username", ty: FieldType::String },
        "white_elo" => FieldDef { column: "white_elo", ty: FieldType::Int },
        "black_elo" => FieldDef { column: "black_elo", ty: FieldType::Int },
        "time_class" => FieldDef { column: "time_class", ty: FieldType::String },
        "eco" => FieldDef { column: "eco", ty: FieldType::String },
        "result" => FieldDef { column: "result", ty: FieldType::String },
        "played_at" => FieldDef { column: "played_at", ty: FieldType::Timestamp },
        "num_moves" => FieldDef { column: "num_moves", ty: FieldType::Int },
        _ => return None,
    };
    Some(def)
}

/// Every motif the extractor can produce is stored directly in
/// `motif_occurrences`, so each resolves to the same `EXISTS` shape
/// (spec §4.12's "stored-motif predicate").
fn lookup_motif(name: &str) -> Option<&'static str> {
    chess_core::Motif::parse(&name.to_ascii_uppercase()).map(|m| m.as_str())
}

struct Compiler {
    params: Vec<QueryParam>,
}

impl Compiler {
    fn bind(&mut self, value: Value) -> String {
        self.params.push(match value {
            Value::Int(n) => QueryParam::Int(n),
            Value::Str(s) => QueryParam::Str(s),
        });
        "?".to_string()
    }

    fn compile(&mut self, expr: &Expr) -> Result<String, CompileError> {
        match expr {
            Expr::Or(l, r) => {
                let l = self.compile(l)?;
                let r = self.compile(r)?;
                Ok(format!("({l} OR {r})"))
            }
            Expr::And(l, r) => {
                let l = self.compile(l)?;
                let r = self.compile(r)?;
                Ok(format!("({l} AND {r})"))
            }
            Expr::Not(inner) => {
                let inner = self.compile(inner)?;
                Ok(format!("(NOT {inner})"))
            }
            Expr::Comparison { field, op, value } => self.compile_comparison(field, *op, value),
            Expr::In { field, values } => self.compile_in(field, values),
            Expr::Motif { name } => self.compile_motif(name),
        }
    }

    fn compile_comparison(&mut self, field: &str, op: CompOp, value: &Value) -> Result<String, CompileError> {
        let def = lookup_field(field).ok_or_else(|| CompileError::UnknownField(field.to_string()))?;
        let op_sql = match op {
            CompOp::Eq => "=",
            CompOp::Ne => "!=",
            CompOp::Lt => "<",
            CompOp::Le => "<=",
            CompOp::Gt => ">",
            CompOp::Ge => ">=",
        };

        match (def.ty, value) {
            (FieldType::String, Value::Str(s)) => {
                let param = self.bind(Value::Str(s.clone()));
                Ok(format!("LOWER(g.{}) {} LOWER({})", def.column, op_sql, param))
            }
            (FieldType::Int, Value::Int(n)) => {
                let param = self.bind(Value::Int(*n));
                Ok(format!("g.{} {} {}", def.column, op_sql, param))
            }
            (FieldType::Timestamp, Value::Str(s)) => {
                let param = self.bind(Value::Str(s.clone()));
                Ok(format!("g.{} {} {}", def.column, op_sql, param))
            }
            _ => Err(CompileError::TypeMismatch {
                field: field.to_string(),
                expected: match def.ty {
                    FieldType::String => "string",
                    FieldType::Int => "integer",
                    FieldType::Timestamp => "timestamp string",
                },
            }),
        }
    }

    fn compile_in(&mut self, field: &str, values: &[Value]) -> Result<String, CompileError> {
        let def = lookup_field(field).ok_or_else(|| CompileError::UnknownField(field.to_string()))?;
        let mut placeholders = Vec::with_capacity(values.len());
        for value in values {
            match (def.ty, value) {
                (FieldType::String, Value::Str(s)) => {
                    placeholders.push(format!("LOWER({})", self.bind(Value::Str(s.clone()))));
                }
                (FieldType::Int, Value::Int(n)) => {
                    placeholders.push(self.bind(Value::Int(*n)));
                }
                _ => {
                    return Err(CompileError::TypeMismatch {
                        field: field.to_string(),
                        expected: match def.ty {
                            FieldType::String => "string",
                            FieldType::Int => "integer",
                            FieldType::Timestamp => "timestamp string",
                        },
                    })
                }
            }
        }
        let column = if def.ty == FieldType::String {
            format!("LOWER(g.{})", def.column)
        } else {
            format!("g.{}", def.column)
        };
        Ok(format!("{} IN ({})", column, placeholders.join(", ")))
    }

    fn compile_motif(&mut self, name: &str) -> Result<String, CompileError> {
        let constant = lookup_motif(name).ok_or_else(|| CompileError::UnknownMotif(name.to_string()))?;
        let param = self.bind(Value::Str(constant.to_string()));
        Ok(format!(
            "EXISTS (SELECT 1 FROM motif_occurrences mo WHERE mo.game_url = g.game_url AND mo.motif = {param})"
        ))
    }
}

/// Compile `expr` into a WHERE-clause fragment plus its positional
/// parameter list, in emission order.
pub fn compile(expr: &Expr) -> Result<(String, Vec<QueryParam>), CompileError> {
    let mut compiler = Compiler { params: Vec::new() };
    let fragment = compiler.compile(expr)?;
    Ok((fragment, compiler.params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexer::lex, parser::parse};

    fn compile_str(src: &str) -> (String, Vec<QueryParam>) {
        let tokens = lex(src).unwrap();
        let expr = parse(&tokens).unwrap();
        compile(&expr).unwrap()
    }

    #[test]
    fn string_comparison_is_case_insensitive_and_parameterized() {
        let (sql, params) = compile_str(r#"result = "1-0""#);
        assert_eq!(sql, "LOWER(g.result) = LOWER(?)");
        assert_eq!(params, vec![QueryParam::Str("1-0".to_string())]);
    }

    #[test]
    fn numeric_comparison_binds_directly() {
        let (sql, params) = compile_str("white_elo >= 2000");
        assert_eq!(sql, "g.white_elo >= ?");
        assert_eq!(params, vec![QueryParam::Int(2000)]);
    }

    #[test]
    fn dotted_and_underscored_fields_compile_identically() {
        let (dotted, _) = compile_str("white.elo >= 2000");
        let (underscored, _) = compile_str("white_elo >= 2000");
        assert_eq!(dotted, underscored);
    }

    #[test]
    fn motif_call_compiles_to_whitelisted_exists() {
        let (sql, params) = compile_str("motif(fork)");
        assert_eq!(
            sql,
            "EXISTS (SELECT 1 FROM motif_occurrences mo WHERE mo.game_url = g.game_url AND mo.motif = ?)"
        );
        assert_eq!(params, vec![QueryParam::Str("FORK".to_string())]);
    }

    #[test]
    fn unknown_field_is_a_compile_error() {
        let tokens = lex("nonsense = 1").unwrap();
        let expr = parse(&tokens).unwrap();
        assert!(matches!(compile(&expr), Err(CompileError::UnknownField(_))));
    }

    #[test]
    fn unknown_motif_is_a_compile_error() {
        let tokens = lex("motif(not_a_motif)").unwrap();
        let expr = parse(&tokens).unwrap();
        assert!(matches!(compile(&expr), Err(CompileError::UnknownMotif(_))));
    }

    #[test]
    fn type_mismatch_on_numeric_field_with_string_literal() {
        let tokens = lex(r#"white_elo = "high""#).unwrap();
        let expr = parse(&tokens).unwrap();
        assert!(matches!(compile(&expr), Err(CompileError::TypeMismatch { .. })));
    }

    #[test]
    fn no_substring_of_a_string_literal_survives_into_the_sql_text() {
        let (sql, params) = compile_str(r#"white_username = "DROP TABLE games""#);
        assert!(!sql.contains("DROP TABLE"));
        assert_eq!(params, vec![QueryParam::Str("DROP TABLE games".to_string())]);
    }

    #[test]
    fn precedence_survives_compilation_as_parenthesized_fragments() {
        let (a, _) = compile_str("motif(pin) OR motif(fork) AND motif(skewer)");
        let (b, _) = compile_str("motif(pin) OR (motif(fork) AND motif(skewer))");
        assert_eq!(a, b);
    }
}
