//! Core-Domänentypen: Module, Parameter, Links, ChainGraph, Handle-Index.

pub mod chain_graph;
pub mod description;
pub mod error;
pub mod ids;
pub mod link;
/// Module mit typisierten Input-/Output-Parametern
pub mod module;
pub mod spatial;

pub use chain_graph::{ChainGraph, ModuleEdge};
pub use description::{ChainDescription, LinkDescription, ModuleDescription, ParamDescription};
pub use error::{LayoutError, LinkError};
pub use ids::{LinkId, ModuleId, ParamId};
pub use link::Link;
pub use module::{Module, ModuleSpec, ParamSide, ParamSpec, Parameter};
pub use spatial::{HandleIndex, HandleMatch};
