//! Gateway capabilities composed over the provider ports.

mod gateway;
mod prompts;

pub use gateway::{AiGateway, GatewayResult};
pub use prompts::{enhancement_request, render_prompt, translation_request};
