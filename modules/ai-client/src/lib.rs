pub mod gemini;
pub mod schema;
pub mod util;

pub use gemini::{Citation, Gemini};
pub use schema::StructuredOutput;
pub use util::strip_code_blocks;
