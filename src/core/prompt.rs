//! Prompt assembly for the text-generation endpoint.
//!
//! The remote model is a chat-tuned completion model, so every request carries
//! the full template: system block, the user's question, and an open assistant
//! marker the model continues from.

/// Instruction block sent with every request. Shared by all turns in a
/// session, never mutated at runtime.
pub const SYSTEM_PROMPT: &str = "\
You are Farmer Assistant, an AI built exclusively to help farmers with agricultural topics such as crop care, soil management, pests and diseases, weather, farm economics, government schemes, and sustainable practices.

Only respond to questions directly related to farming, agriculture, or rural livelihoods. If a user asks about unrelated topics like programming, sports, or politics, kindly reply:

\"I'm here to help only with farming and agricultural questions. Could you please ask something related to farming?\"

Keep your responses practical, clear, and helpful for Indian farmers.";

/// Formats one outbound prompt from the system block and the user's question.
///
/// Empty input never reaches here; the session controller drops it before a
/// turn begins.
pub fn build_prompt(user_text: &str) -> String {
    format!(
        "<|system|>\n{}\n<|user|>\n{}\n<|assistant|>\n",
        SYSTEM_PROMPT.trim(),
        user_text.trim()
    )
}
