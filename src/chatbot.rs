//! Turn assembly, per-session history and terminal rendering.

mod assembler;
mod render;
mod session;

pub use assembler::{AssembledTurn, Assistant, DataResults};
pub use render::{render_history, render_reply};
pub use session::{ChatTurn, Session};
