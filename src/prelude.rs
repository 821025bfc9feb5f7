//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the paramtree crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use paramtree::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let converter = SchemaConverter::builder().build();
//! let schema = load_schema_file("path/to/schema.json", &converter)?;
//! let leaves = ParamCodec::flatten(&schema);
//!
//! let raw = RawValues::from_file("path/to/values.json")?;
//! let params = ParamCodec::collect(&raw.typed(&leaves)?)?;
//!
//! println!("Collected: {}", params);
//! # Ok(())
//! # }
//! ```

// Codec
pub use crate::codec::{FieldInput, LeafDescriptor, PATH_SEPARATOR, ParamCodec, PathValueMap};
pub use crate::value::{CollectedParams, ParamValue};

// Schema types
pub use crate::schema::{
    IntoSchema, LeafType, Occurs, ParameterDescriptor, SchemaConverter, SchemaDocument,
    SchemaNode, SchemaTree, ValidationIssue,
};

// Data loading
pub use crate::data::{RawValues, load_schema_file};

// Invocation contract
pub use crate::invoke::{
    ConnectionParams, InvocationResult, InvocationSink, OperationRef, Transport, submit,
};

// Error types
pub use crate::error::{CodecError, DataError, SchemaError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
