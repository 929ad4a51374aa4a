pub mod filter;
pub mod hook;
pub mod llm;
pub mod prompt;
pub mod report;
pub mod server;

pub use filter::{BatchRejection, FileFilter, FilterError, SourceFile};
pub use hook::{Hook, HookSummary};
pub use llm::{GenerateRequest, LlmClient, LlmSettings, OllamaClient, ReviewError, Verdict};
pub use report::Reporter;
pub use server::{ModelServer, ServerCommand};
