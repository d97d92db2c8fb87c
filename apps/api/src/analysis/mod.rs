// Analysis module: prompt construction, LLM narrative generation, and
// structured-field extraction. All LLM calls go through llm_client —
// no direct Anthropic calls here.

pub mod handlers;
pub mod narrative;
pub mod parser;
pub mod prompts;
