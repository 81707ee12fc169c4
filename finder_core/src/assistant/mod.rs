mod finder;

pub use finder::{
    AssistantConfig, AssistantError, AssistantMode, DEFAULT_SYSTEM_PROMPT, EXTRACTION_PROMPT,
    FinderAssistant, clean_identifier,
};
