pub mod allowlist;
pub mod audit;
pub mod parser;
pub mod scanner;

pub use allowlist::{AllowList, AllowListError};
pub use audit::{audit_content, audit_file, FileReport, LineOutcome, RunReport, RunSummary};
pub use parser::{parse_line, FromDirective, ParsedLine};
pub use scanner::find_dockerfiles;
