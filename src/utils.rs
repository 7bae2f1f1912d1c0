/// display contract for numbers placed into traces and final answers
pub mod fmt;
/// simplelog-based terminal logger initialization
pub mod logger;
