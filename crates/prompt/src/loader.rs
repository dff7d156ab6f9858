//! Prompt loader.
//!
//! Prompts live in `<workspace>/prompts/<id>.yml`. The answer prompt has a
//! built-in definition, so a workspace without a `prompts/` directory works.

use crate::types::PromptDefinition;
use std::path::Path;
use tutor_core::{AppError, AppResult};

/// Identifier of the built-in answer prompt.
pub const DEFAULT_PROMPT_ID: &str = "answer.default";

const DEFAULT_SYSTEM: &str = "You're a helpful teaching assistant for a course.";

const DEFAULT_TEMPLATE: &str =
    "Answer the question:\n\n{{question}}\n\nOnly using the context below:\n{{context}}";

/// The built-in answer prompt.
pub fn default_prompt() -> PromptDefinition {
    PromptDefinition {
        id: DEFAULT_PROMPT_ID.to_string(),
        title: "Course teaching assistant".to_string(),
        api_version: "1.0".to_string(),
        system: Some(DEFAULT_SYSTEM.to_string()),
        template: DEFAULT_TEMPLATE.to_string(),
    }
}

/// Load a prompt definition by ID from the workspace.
///
/// Falls back to the built-in definition when `prompt_id` is
/// [`DEFAULT_PROMPT_ID`] and no override file exists.
///
/// # Example
/// ```no_run
/// use tutor_prompt::load_prompt;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Path::new("."), "answer.default")?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(workspace_path: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let prompt_file = workspace_path
        .join("prompts")
        .join(format!("{}.yml", prompt_id));

    tracing::debug!("Loading prompt from: {:?}", prompt_file);

    if !prompt_file.exists() {
        if prompt_id == DEFAULT_PROMPT_ID {
            tracing::debug!("Using built-in prompt: {}", DEFAULT_PROMPT_ID);
            return Ok(default_prompt());
        }
        return Err(AppError::Prompt(format!(
            "Prompt file not found: {:?}",
            prompt_file
        )));
    }

    let contents = std::fs::read_to_string(&prompt_file).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to read prompt file {:?}: {}",
            prompt_file, e
        ))
    })?;

    let definition: PromptDefinition = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to parse prompt YAML {:?}: {}",
            prompt_file, e
        ))
    })?;

    validate_prompt(&definition)?;

    tracing::info!("Loaded prompt: {} ({})", definition.id, definition.title);

    Ok(definition)
}

/// Validate a prompt definition.
fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.template.is_empty() {
        return Err(AppError::Prompt(
            "Prompt template cannot be empty".to_string(),
        ));
    }

    if !def.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    if !def.template.contains("{{question}}") {
        return Err(AppError::Prompt(format!(
            "Prompt {} does not reference {{{{question}}}}",
            def.id
        )));
    }

    Ok(())
}
