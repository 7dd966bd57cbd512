// Fragments shared by every prompt sent through llm_client.
// Feature prompts live next to the feature (see processing/prompts.rs).

/// Appended to a feature's system prompt when the reply is parsed with `call_json`.
pub const JSON_ONLY_SYSTEM: &str = "Reply with a single JSON object and nothing else. \
    No prose before or after it, no markdown fences, no comments. \
    Keep string values in the language the instructions ask for.";
