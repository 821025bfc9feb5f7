//! # paramtree - Schema-Driven Parameter Tree Codec
//!
//! **paramtree** turns the parameter schema of a device protocol operation into a flat
//! list of form fields, and turns the values typed into those fields back into the
//! nested, typed parameter object the operation expects.
//!
//! ## Core Workflow
//!
//! 1.  **Get a Schema**: Convert your schema source's output into a `SchemaTree`, either
//!     through the built-in `SchemaConverter` (which understands the JSON descriptor
//!     format and XSD type names) or by implementing `IntoSchema` for your own types.
//! 2.  **Flatten**: `ParamCodec::flatten` produces one `LeafDescriptor` per leaf, in
//!     declaration order, each addressed by a dotted path such as `Device.Port`.
//! 3.  **Collect**: Pair the user's raw strings with their leaf kinds in a `PathValueMap`
//!     and call `ParamCodec::collect`. Blank fields are omitted, values are coerced, and
//!     the nested `CollectedParams` is ready for an `InvocationSink`.
//!
//! ## Quick Start
//!
//! ```rust
//! use paramtree::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let schema = SchemaTree::new(vec![SchemaNode::complex(
//!         "Device",
//!         vec![
//!             SchemaNode::leaf("Name", LeafType::String).required(),
//!             SchemaNode::leaf("Port", LeafType::Integer),
//!         ],
//!     )]);
//!
//!     let leaves = ParamCodec::flatten(&schema);
//!     assert_eq!(leaves[0].path, "Device.Name");
//!     assert_eq!(leaves[1].path, "Device.Port");
//!
//!     let values = PathValueMap::from_descriptors(
//!         &leaves,
//!         [("Device.Name", "cam1"), ("Device.Port", " 80 ")],
//!     )?;
//!     let params = ParamCodec::collect(&values)?;
//!
//!     assert_eq!(
//!         serde_json::to_string(&params)?,
//!         r#"{"Device":{"Name":"cam1","Port":80}}"#
//!     );
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod data;
pub mod error;
pub mod invoke;
pub mod prelude;
pub mod schema;
pub mod value;
