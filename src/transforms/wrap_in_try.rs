//! Wrap unguarded resource-returning calls in try/finally.
//!
//! Finds statements of the form
//!
//! ```java
//! String response = client.get("https://bananas.com")
//!     .execute();
//! ```
//!
//! that are not already inside a try/finally, and rewrites them so the
//! returned resource is released in a finally block.

use crate::grammar::java::{try_finally, unsafe_call};
use crate::grammar::GrammarError;
use crate::matching::{not_within, CaptureValue, Match};
use crate::rewrite::{rewrite_files, EditError, Project, TransformReport};
use serde::Deserialize;

/// Options for [`wrap_in_try`].
///
/// Deserializable so the CLI can load them from a YAML file.
#[derive(Debug, Clone, Deserialize)]
pub struct WrapInTryOptions {
    /// Literal beginning of the call, e.g. `client.get(`.
    pub beginning_of_call: String,
    /// Literal end of the call, e.g. `execute()`.
    pub end_of_call: String,
    /// Type of the value the call returns.
    pub return_type: String,
    /// Variable name used when the source doesn't supply one.
    pub return_variable_name: String,
}

/// Wrap every unguarded matching call in the project.
///
/// `finally_content` renders the cleanup statement(s) from the name of
/// the variable holding the call's result.
pub fn wrap_in_try<F>(
    project: &mut Project,
    options: &WrapInTryOptions,
    finally_content: F,
) -> Result<TransformReport, GrammarError>
where
    F: Fn(&str) -> String,
{
    let pattern = unsafe_call(&options.beginning_of_call, &options.end_of_call)?;
    let guard = not_within(try_finally()?);
    Ok(rewrite_files(project, &pattern, Some(&guard), |call| {
        wrapped_call(options, &finally_content, call).map(Some)
    }))
}

/// Build the replacement for one unguarded call.
fn wrapped_call<F>(
    options: &WrapInTryOptions,
    finally_content: &F,
    call: &Match,
) -> Result<String, EditError>
where
    F: Fn(&str) -> String,
{
    let rest_of_statement = call
        .text("rest_of_statement")
        .ok_or_else(|| EditError::new("rest_of_statement capture missing"))?;
    let more_calls_are_made = !rest_of_statement.trim().is_empty();

    // `before_method_call` is optional: empty text when the statement
    // discards the value, a nested lhs match when it is stored.
    let declared = match call.capture("before_method_call") {
        Some(CaptureValue::Nested(lhs)) => {
            let declared_type = lhs
                .text("declared_type")
                .ok_or_else(|| EditError::new("declared_type capture missing"))?;
            let varname = lhs
                .text("varname")
                .ok_or_else(|| EditError::new("varname capture missing"))?;
            Some((declared_type, varname))
        }
        _ => None,
    };

    // Variable-name policy: with trailing calls the configured default
    // name holds the response and the declared variable is re-bound
    // afterwards; a directly stored response reuses the declared name; a
    // discarded one gets the default name.
    let response: &str = if more_calls_are_made {
        &options.return_variable_name
    } else if let Some((_, varname)) = declared {
        varname
    } else {
        &options.return_variable_name
    };

    let invocation = call
        .nested("invocation")
        .ok_or_else(|| EditError::new("invocation capture missing"))?;
    let original_call = &invocation.matched;
    let init = java_initial_value(&options.return_type);
    let cleanup = finally_content(response);
    let rest_of_stuff = if more_calls_are_made {
        match declared {
            Some((declared_type, varname)) => {
                format!("{declared_type} {varname} = {response}{rest_of_statement};")
            }
            None => format!("{response}{rest_of_statement};"),
        }
    } else {
        String::new()
    };

    Ok(format!(
        "{return_type} {response} = {init};\n    try {{\n        {response} = {original_call};\n    }} finally {{\n        {cleanup}\n    }}\n    {rest_of_stuff}",
        return_type = options.return_type,
    ))
}

fn java_initial_value(return_type: &str) -> &'static str {
    match return_type {
        "int" => "-1",
        _ => "null",
    }
}
