//! Model listing functionality
//!
//! Prints the chat-capable models the server reports, in server order.

use crate::api::backend::ChatBackend;
use crate::api::models::ModelDescriptor;
use std::error::Error;

pub async fn list_models(
    backend: &dyn ChatBackend,
    preferred: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let models = backend
        .list_models()
        .await
        .map_err(|err| format!("Could not connect to CodeFace API: {err}"))?;
    print!("{}", format_model_list(&models, preferred));
    Ok(())
}

/// The listing printed by `codeface models`. The model a chat would start
/// with is marked.
pub fn format_model_list(models: &[ModelDescriptor], preferred: Option<&str>) -> String {
    if models.is_empty() {
        return "No chat models found. Load a model in your server and try again.\n".to_string();
    }

    let selected = preferred.unwrap_or(&models[0].id);
    let mut listing = format!("Found {} chat models:\n", models.len());
    for model in models {
        let marker = if model.id == selected { "*" } else { " " };
        listing.push_str(&format!("{marker} {}\n", model.id));
    }
    if !models.iter().any(|model| model.id == selected) {
        listing.push_str(&format!("Configured model '{selected}' is not loaded.\n"));
    }
    listing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptors(ids: &[&str]) -> Vec<ModelDescriptor> {
        ids.iter()
            .map(|id| ModelDescriptor { id: id.to_string() })
            .collect()
    }

    #[test]
    fn first_model_is_marked_by_default() {
        let listing = format_model_list(&descriptors(&["qwen-coder", "llama-chat"]), None);
        assert_eq!(
            listing,
            "Found 2 chat models:\n* qwen-coder\n  llama-chat\n"
        );
    }

    #[test]
    fn preferred_model_is_marked_or_reported_missing() {
        let models = descriptors(&["qwen-coder", "llama-chat"]);
        let listing = format_model_list(&models, Some("llama-chat"));
        assert!(listing.contains("* llama-chat"));
        assert!(listing.contains("  qwen-coder"));

        let listing = format_model_list(&models, Some("gone"));
        assert!(listing.ends_with("Configured model 'gone' is not loaded.\n"));
    }

    #[test]
    fn empty_list_has_a_hint() {
        assert!(format_model_list(&[], None).starts_with("No chat models found"));
    }
}
