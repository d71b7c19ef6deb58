//! In-memory PDF renderer using lopdf.
//!
//! Text uses the base-14 Helvetica family, so no font files are embedded and
//! the output is readable by any PDF viewer.

mod renderer;

pub use renderer::LopdfRenderer;
