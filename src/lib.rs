//! Neuromuscle - exercise recommendations for individual muscle regions
//!
//! A renderer draws the [`anatomy::BodyLayout`] and reports pointer events to
//! a [`scene::Scene`]. Selecting a region issues one chat-completions query
//! through [`query::ExerciseQueryPipeline`]; the [`session::Session`] applies
//! the result only if that region is still selected.
//!
//! ```text
//! renderer ──PointerEvent──▶ Scene ──▶ Session ──▶ SelectionController
//!    ▲                         │          │
//!    └────── DrawState ◀───────┘          └─spawn─▶ PromptBuilder → pipeline
//! ```

pub mod anatomy;
pub mod config;
pub mod highlight;
pub mod logging;
pub mod prompt;
pub mod query;
pub mod scene;
pub mod selection;
pub mod session;
pub mod util;
