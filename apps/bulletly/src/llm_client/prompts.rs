// Cross-cutting prompt fragments shared by every completion call.
// Feature-specific prompts live next to the feature (see assessment::prompts).

/// Appended to system prompts that expect machine-readable output.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences.";

/// Guards against fabricated claims in rewritten text.
pub const NO_INVENTION_INSTRUCTION: &str = "Do not invent metrics or claims. \
    Preserve factuality and avoid buzzword-only phrasing.";
