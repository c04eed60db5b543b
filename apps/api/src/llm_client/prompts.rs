// Cross-cutting prompt fragments shared by every prompt that expects structured output.
// Feature-specific prompts live in their own prompts.rs alongside the feature.

/// Role line that opens every advisory prompt.
pub const ADVISOR_ROLE: &str = "As an AI career advisor, analyze the following user profile \
    and provide career recommendations in JSON format.";

/// Appended after the target schema. Enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with a single valid JSON object only. \
    Do NOT include any text before or after the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
