pub mod serve;
pub mod types;

pub use serve::run;
pub use types::Cli;
