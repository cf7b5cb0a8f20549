//! Java-flavored helper grammars.
//!
//! These factories are applications of the combinators, not engine
//! knowledge: the engine itself never learns Java semantics. Every call
//! site receives a fresh `Pattern` value, so grammars can be reused and
//! shared across files freely.

use crate::grammar::pattern::{
    literal, optional, regex, sequence, take_until, zero_or_more, GrammarError, Pattern,
};

/// Regex for a plain Java identifier.
pub const JAVA_IDENTIFIER: &str = r"[A-Za-z_$][A-Za-z0-9_$]*";

/// `Type name =` prefix of a local variable assignment.
///
/// Captures `declared_type` and `varname`.
pub fn lhs_equals() -> Result<Pattern, GrammarError> {
    sequence(vec![
        ("declared_type", regex(JAVA_IDENTIFIER)?),
        ("varname", regex(JAVA_IDENTIFIER)?),
        ("equals", literal("=")),
    ])
}

/// A statement of the form
///
/// ```java
/// int returnCode = <beginning_of_call>...<end_of_call>...;
/// ```
///
/// where the whole `int returnCode =` part is optional and anything may
/// trail the call up to the terminating semicolon. Captures:
/// `before_method_call` (empty text or a nested [`lhs_equals`] match),
/// `invocation` (nested: `beginning_of_call`, `rest`, `end_of_call`),
/// `rest_of_statement`, `end`.
pub fn unsafe_call(beginning_of_call: &str, end_of_call: &str) -> Result<Pattern, GrammarError> {
    let invocation = sequence(vec![
        ("beginning_of_call", literal(beginning_of_call)),
        ("rest", take_until(end_of_call)),
        ("end_of_call", literal(end_of_call)),
    ])?;
    sequence(vec![
        ("before_method_call", optional(lhs_equals()?)),
        ("invocation", invocation),
        ("rest_of_statement", take_until(";")),
        ("end", literal(";")),
    ])
}

/// A `try { } [catch ( ) { }]* finally { }` construct.
///
/// Block bodies are captured with `take_until("}")`, which stops at the
/// first closing brace: a brace-nested body defeats this grammar and the
/// construct simply doesn't match. Good enough for an exclusion grammar.
pub fn try_finally() -> Result<Pattern, GrammarError> {
    let catch_clause = sequence(vec![
        ("close_try", literal("}")),
        ("catch", literal("catch")),
        ("open_paren", literal("(")),
        ("catch_clause", take_until(")")),
        ("close_paren", literal(")")),
        ("open_body", literal("{")),
        ("catch_block", take_until("}")),
    ])?;
    sequence(vec![
        ("try", literal("try")),
        ("open", literal("{")),
        ("try_block", take_until("}")),
        ("catches", zero_or_more(catch_clause)),
        ("close", literal("}")),
        ("finally", literal("finally")),
        ("finally_open", literal("{")),
        ("finally_block", take_until("}")),
        ("end", literal("}")),
    ])
}
