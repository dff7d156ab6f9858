//! Prompt builder: renders definitions into system and user messages.

use crate::types::{BuiltPrompt, PromptDefinition};
use handlebars::Handlebars;
use std::collections::HashMap;
use tutor_core::{AppError, AppResult};

/// Build a prompt from a definition and input variables.
///
/// Both the system instruction and the user template are rendered with the
/// same variables. Values are inserted verbatim (no HTML escaping).
///
/// # Example
/// ```no_run
/// use tutor_prompt::{build_prompt, default_prompt};
/// use std::collections::HashMap;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut vars = HashMap::new();
/// vars.insert("question".to_string(), "What is a dataframe?".to_string());
/// vars.insert("context".to_string(), "A dataframe is a table.".to_string());
///
/// let built = build_prompt(&default_prompt(), vars)?;
/// println!("User prompt: {}", built.user);
/// # Ok(())
/// # }
/// ```
pub fn build_prompt(
    definition: &PromptDefinition,
    variables: HashMap<String, String>,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", definition.id);

    let system = definition
        .system
        .as_deref()
        .map(|template| render_template(template, &variables))
        .transpose()?;

    let user = render_template(&definition.template, &variables)?;

    Ok(BuiltPrompt::new(
        system,
        user,
        definition.id.clone(),
        variables,
    ))
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Context is plain text, not HTML
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    let rendered = handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))?;

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::default_prompt;

    fn vars(question: &str, context: &str) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert("question".to_string(), question.to_string());
        vars.insert("context".to_string(), context.to_string());
        vars
    }

    #[test]
    fn test_default_prompt_layout() {
        let built = build_prompt(
            &default_prompt(),
            vars("What is GA4?", "GA4 is graded assignment 4."),
        )
        .unwrap();

        assert_eq!(
            built.user,
            "Answer the question:\n\nWhat is GA4?\n\nOnly using the context below:\nGA4 is graded assignment 4."
        );
        assert_eq!(
            built.system.as_deref(),
            Some("You're a helpful teaching assistant for a course.")
        );
        assert_eq!(built.metadata.source_prompt_id, "answer.default");
    }

    #[test]
    fn test_values_are_not_html_escaped() {
        let built = build_prompt(&default_prompt(), vars("Is a < b && c > d?", "<p>x</p>")).unwrap();
        assert!(built.user.contains("Is a < b && c > d?"));
        assert!(built.user.contains("<p>x</p>"));
    }

    #[test]
    fn test_render_template_missing_variable() {
        let result = render_template("Question: {{missing}}", &HashMap::new());
        // Handlebars renders missing variables as empty string
        assert_eq!(result.unwrap(), "Question: ");
    }

    #[test]
    fn test_invalid_template_is_error() {
        let result = render_template("{{#if}}", &HashMap::new());
        assert!(result.is_err());
    }
}
