pub mod state;
pub mod config;
pub mod events;
pub mod outcome;

pub use state::LessonState;
pub use config::{GraphConfig, DEFAULT_SCORE_THRESHOLD};
pub use events::FlowEvent;
pub use outcome::{FlowOutcome, FlowStatus};
