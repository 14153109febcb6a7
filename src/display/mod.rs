//! Display formatting for terminal output
//!
//! Provides utilities for formatting care homes, projections, rankings and
//! questionnaire state for terminal display.

pub mod comparison;
pub mod format;
pub mod home;
pub mod projection;
pub mod questionnaire;

pub use comparison::{format_insights, format_ranking};
pub use home::{format_home_details, format_home_list};
pub use projection::{format_history, format_projection_summary, format_yearly_breakdown};
pub use questionnaire::{format_draft_status, format_submissions};
