//! # sx-codemod
//!
//! Rewrites component library JSX so that styled-system props move into a
//! single `sx` object:
//!
//! ```text
//! <Button padding={1} fontWeight="bold" onClick={go} />
//! <Button sx={{ padding: 1 }} fontWeight="bold" onClick={go} />
//! ```
//!
//! ## Pipeline
//!
//! 1. **Parse** the file with oxc.
//! 2. **Resolve imports** from the component library (`imports`), so aliased
//!    components keep their canonical kind.
//! 3. **Match** every element whose kind is in the registry (`matcher`,
//!    `registry`). `Lib.Button` is looked up as `Button`.
//! 4. **Collect** the element's system props in declaration order (`collect`).
//! 5. **Serialize** them to an object literal (`serialize`). Only literals and
//!    identifiers are migrated; any other expression is reported.
//! 6. **Mutate**: drop all migrated props but the last, which becomes `sx`
//!    (`mutate`).
//! 7. **Format**: the rewritten attributes are spliced into the original
//!    text, so everything else stays byte-for-byte (`format`).
//!
//! ## Guarantees
//!
//! - Running the transform on its own output changes nothing.
//! - Props outside an element's registry entry are never touched.
//! - A problem with one element never affects another element or file.

pub mod collect;
pub mod diagnostics;
pub mod discovery;
pub mod format;
pub mod imports;
pub mod matcher;
pub mod mutate;
pub mod options;
pub mod registry;
pub mod runner;
pub mod serialize;
pub mod transform;


pub use diagnostics::{Diagnostic, Severity, TransformError};
pub use format::{CodegenFormatter, FileMeta, Formatter, SourceEdit, SpliceFormatter};
pub use options::{BareLiteralPolicy, ConfigError, TransformOptions, UnsupportedValuePolicy};
pub use transform::{transform, transform_with, TransformOutput};

#[cfg(feature = "napi")]
pub use transform::transform_source_native;
