//! Struktur-Engine des visuellen Analyse-Ketten-Editors.
//! Layering, Layout, Link-Routing und die Link-Erstellungs-Zustandsmaschine,
//! als Library exportiert für Rendering-Hosts und Tests.

pub mod app;
pub mod core;
pub mod layout;
pub mod shared;

pub use app::{
    AppController, ChainEditor, EditorCommand, EditorIntent, EditorState, HighlightSet, Key,
    LinkingState, PickRole, Selection,
};
pub use core::{
    ChainDescription, ChainGraph, LayoutError, Link, LinkDescription, LinkError, LinkId, Module,
    ModuleDescription, ModuleId, ModuleSpec, ParamDescription, ParamId, ParamSide, ParamSpec,
    Parameter,
};
pub use core::{HandleIndex, HandleMatch};
pub use layout::{auto_layout, LayerAssignment, LayoutResult, Placement};
pub use shared::{EditorOptions, ModuleSizing, Rect};
