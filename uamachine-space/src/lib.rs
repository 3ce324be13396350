//! In-process address space for uamachine.
//!
//! Models the part of an OPC UA server's information model that provisioning
//! code talks to:
//! - a namespace table resolved by URI ([`AddressSpace::namespace_index`])
//! - a tree of [`Node`]s linked by organizing / component references
//! - [`ObjectTypeTemplate`]s with mandatory and optional children that can be
//!   instantiated under any parent
//! - variables whose value is either static or served by a [`ValueSource`]
//!   accessor pair, dispatched through [`AddressSpace::read_value`] and
//!   [`AddressSpace::write_value`]
//!
//! There is no transport here. Sessions, subscriptions and the wire protocol
//! belong to whatever server embeds the address space.

mod builder;
mod dispatch;
mod error;
pub mod ids;
mod node;
mod space;
mod template;
mod value;

pub use builder::{InstantiateSpec, ObjectSpec, VariableSpec};
pub use error::{SpaceError, SpaceResult};
pub use node::{Node, NodeClass, ReferenceKind, VariableAttributes};
pub use space::AddressSpace;
pub use template::{ChildDecl, ChildKind, ModellingRule, ObjectTypeTemplate};
pub use value::{ReadFn, ValueSource, WriteFn};
