//! Symbol index for C3.
//!
//! Source text is converted into [`c3_ir::Module`] trees per document,
//! registered in a [`Workspace`], and queried through the [`Resolver`].
//!
//! # Pipeline
//!
//! ```text
//! text ── c3_syntax::parse ──> syntax tree ── convert ──> UnitModules
//!                                                           │
//! cursor ── SearchParams::from_position ──> Resolver ──> Symbol
//! ```

mod convert;
mod error;
mod features;
mod resolver;
mod search_params;
mod unit_modules;
mod workspace;

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Test code uses expect for clarity")]
mod test_support;

pub use convert::{convert_document, convert_tree};
pub use error::ConvertError;
pub use features::{CompletionEntry, HoverInfo, Location, SignatureInfo};
pub use resolver::{Resolver, TrackedModules};
pub use search_params::{AccessToken, ScopeMode, SearchParams, SearchParamsBuilder};
pub use unit_modules::UnitModules;
pub use workspace::{Document, Workspace};
