//! Translation instructions sent to providers

/// Instruction telling a model how to translate into `target_language`.
///
/// Used as the system message for chat-style providers and as the prompt header for
/// single-prompt providers.
pub fn translation_instruction(target_language: &str) -> String {
    format!(
        "You are a professional translator. Translate the following text to {target_language}. \
         Preserve the original meaning and tone. \
         Keep all formatting, line breaks and special characters exactly as they appear. \
         Respond with the translated text only, without any commentary or explanation."
    )
}

/// Single prompt string: the instruction, a blank line, then the source text
pub fn compose_prompt(text: &str, target_language: &str) -> String {
    format!("{}\n\n{}", translation_instruction(target_language), text)
}
