//! GitHub Actions host adapter: reads the event, runs the pipeline once and
//! reports the outcome through workflow commands and step outputs.

pub mod context;
pub mod reporter;
pub mod run;
