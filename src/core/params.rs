use crate::core::message::Message;

pub const MIN_TEMPERATURE: f32 = 0.0;
pub const MAX_TEMPERATURE: f32 = 2.0;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

pub const MIN_MAX_TOKENS: u32 = 50;
pub const MAX_MAX_TOKENS: u32 = 4000;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are CodeFace, a helpful AI coding assistant that provides clear and efficient solutions to programming questions.";

/// Sampling settings applied to the next completion request.
///
/// Setters clamp into the accepted range and return the value actually
/// stored.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    temperature: f32,
    max_tokens: u32,
    system_prompt: String,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl GenerationParams {
    pub fn new(temperature: f32, max_tokens: u32, system_prompt: impl Into<String>) -> Self {
        let mut params = Self {
            system_prompt: system_prompt.into(),
            ..Self::default()
        };
        params.set_temperature(temperature);
        params.set_max_tokens(max_tokens);
        params
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Non-finite input is ignored.
    pub fn set_temperature(&mut self, value: f32) -> f32 {
        if value.is_finite() {
            self.temperature = value.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE);
        }
        self.temperature
    }

    pub fn set_max_tokens(&mut self, value: u32) -> u32 {
        self.max_tokens = value.clamp(MIN_MAX_TOKENS, MAX_MAX_TOKENS);
        self.max_tokens
    }

    pub fn set_system_prompt(&mut self, prompt: impl Into<String>) {
        self.system_prompt = prompt.into();
    }

    /// The system message to prepend, if the prompt is not blank.
    pub fn system_message(&self) -> Option<Message> {
        let trimmed = self.system_prompt.trim();
        (!trimmed.is_empty()).then(|| Message::system(trimmed))
    }
}
