pub mod config;
pub mod ctx;
pub mod ops;

use ctx::LogCtx;

// Factory helpers, one per op
pub fn search() -> LogCtx<ops::search::Search> {
    LogCtx::new()
}
pub fn inspect() -> LogCtx<ops::inspect::Inspect> {
    LogCtx::new()
}
