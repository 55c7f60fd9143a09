pub const SYSTEM_PROMPT_TEMPLATE: &str = "You are a translator. Translate the following text to {target_language}. \
     Only respond with the translation, no explanations.";

#[allow(clippy::literal_string_with_formatting_args)]
pub fn build_system_prompt(target_language: &str) -> String {
    // {target_language} is a placeholder for string replacement, not a format argument
    SYSTEM_PROMPT_TEMPLATE.replace("{target_language}", target_language)
}
