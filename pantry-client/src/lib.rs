pub mod llm;
pub mod logging;
pub mod output;
pub mod requester;
pub mod throttle;

pub use llm::{OpenAiCompatGenerator, TextGenerator};
pub use requester::{Requester, RequesterSettings};
