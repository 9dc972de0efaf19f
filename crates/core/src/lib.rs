//! Face annotation through a remote vision service, with local overlay
//! rendering and emotion reporting.

pub mod capture;
pub mod detection;
pub mod pipeline;
pub mod rendering;
pub mod reporting;
pub mod shared;
