//! rotrack-core — Evaluation scheduling and classification engine.
//!
//! Derives evaluation periods for a fixed-duration rotation, reconciles them
//! with recorded evaluations, classifies the trend across periods and the
//! aggregate performance level from selected criteria. Every engine function
//! is pure and takes "now" explicitly.

pub mod classifier;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod schedule;
pub mod session;
pub mod timeline;
pub mod trend;

pub use classifier::{classify, performance_level, Classification};
pub use error::EngineError;
pub use model::{Criterion, Dossier, Enrollment, Evaluation, LevelTag, PerformanceLevel, RotationConfig};
pub use schedule::{current_period, total_periods};
pub use session::EvaluationSession;
pub use timeline::{period_statuses, PeriodStatus};
pub use trend::{analyze_trend, trend, Trend, TrendAnalysis};
