pub mod batch;
pub mod decompiler;

pub use batch::{list_inputs, plan_inputs, run_batch, BatchProgress, BatchSummary, FileOutcome, FileReport, InputAsset};
pub use decompiler::Decompiler;
