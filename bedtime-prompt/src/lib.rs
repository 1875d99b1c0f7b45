mod story;
mod template;

pub use story::{build, build_for_request, GENERIC_THEME_INSTRUCTION};
pub use template::PromptTemplate;
