//! # Planning Model
//!
//! Plain data shared by the builder, search engine, arbiter and advisor.
//!
//! Design rule: no catalog access, no logging, no search logic here.
//! This module is pure data with no I/O.

pub mod course;
pub mod graph;
pub mod path;
pub mod unbounded;
pub mod weights;

pub use course::{Course, MAX_DIFFICULTY, MAX_VALUE, MIN_DIFFICULTY};
pub use graph::{CourseGraph, Edge};
pub use path::Path;
pub use weights::{LearningStyle, WeightOverrides, WeightProfile};
