const DATA_SYSTEM: &str = "You are an expert data generation assistant. Your task is to generate a JSON array of objects. Your response MUST be only the raw JSON array, starting with `[` and ending with `]`. Do not include markdown formatting like ```json, explanations, or any other text.";

const TITLE_SYSTEM: &str = "You are a chat session titler. \
Your job is to create a short, human-friendly topic title. \
The title MUST:\n\
1. Be different from the user request.\n\
2. Summarize the topic (not the instruction).\n\
3. Contain 2-4 words, in Title Case.\n\
4. Reply ONLY with JSON in the form {\"title\":\"...\"}";

/// A system/user message pair sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    pub fn data_generation(request: &str) -> Self {
        Self {
            system: DATA_SYSTEM.to_string(),
            user: format!("User Request: {request}"),
        }
    }

    pub fn title(request: &str) -> Self {
        Self {
            system: TITLE_SYSTEM.to_string(),
            user: format!("User asked: {request}\n\nNow reply with only the title JSON."),
        }
    }
}
