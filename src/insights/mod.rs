//! Rule-based insight generation.
//!
//! Each engine evaluates an ordered registry of independent
//! predicate-to-finding rules against a read-only snapshot of the cached
//! metrics. Rules are non-exclusive: any subset may fire, and findings are
//! appended in evaluation order, never re-sorted.
//!
//! - **player**: per-player averages, trends and threshold rules
//! - **team**: team macro rules plus micro-to-macro correlation rules
//! - **mistakes**: recurring-mistake detection over a match window
//! - **scenario**: hypothetical "what if" projection
//! - **review**: post-match review agenda
//! - **personalized**: match-scoped per-player insights

pub mod mistakes;
pub mod personalized;
pub mod player;
pub mod review;
pub mod scenario;
pub mod team;
