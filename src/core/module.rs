//! Module und ihre typisierten Input-/Output-Parameter.

use super::{LinkId, ModuleId, ParamId};
use crate::shared::{ModuleSizing, Rect};
use glam::Vec2;
use indexmap::IndexSet;
use std::cmp::Ordering;

/// Seite eines Parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamSide {
    /// Eingang (links am Modul)
    Input,
    /// Ausgang (rechts am Modul)
    Output,
}

impl ParamSide {
    /// Gibt die Gegenseite zurück.
    pub fn opposite(self) -> Self {
        match self {
            ParamSide::Input => ParamSide::Output,
            ParamSide::Output => ParamSide::Input,
        }
    }
}

/// Beschreibung eines Parameters beim Anlegen eines Moduls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    /// Anzeigename
    pub name: String,
    /// Semantik-Typ (None = untypisiert)
    pub semantic_type: Option<String>,
}

impl ParamSpec {
    pub fn new(name: impl Into<String>, semantic_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            semantic_type: semantic_type.map(str::to_owned),
        }
    }
}

/// Beschreibung eines Moduls beim Anlegen (Builder-Stil)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleSpec {
    pub name: String,
    pub inputs: Vec<ParamSpec>,
    pub outputs: Vec<ParamSpec>,
}

impl ModuleSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Fügt einen Input hinzu.
    pub fn input(mut self, name: impl Into<String>, semantic_type: Option<&str>) -> Self {
        self.inputs.push(ParamSpec::new(name, semantic_type));
        self
    }

    /// Fügt einen Output hinzu.
    pub fn output(mut self, name: impl Into<String>, semantic_type: Option<&str>) -> Self {
        self.outputs.push(ParamSpec::new(name, semantic_type));
        self
    }
}

/// Ein einzelner Input- oder Output-Slot eines Moduls
#[derive(Debug, Clone)]
pub struct Parameter {
    pub id: ParamId,
    /// Besitzendes Modul
    pub module: ModuleId,
    pub side: ParamSide,
    pub name: String,
    /// Semantik-Typ (None = untypisiert)
    pub semantic_type: Option<String>,
    /// Geschlossene Links, an denen dieser Parameter beteiligt ist
    pub(crate) links: IndexSet<LinkId>,
}

impl Parameter {
    /// Links, die diesen Parameter als Endpunkt registriert haben.
    pub fn links(&self) -> impl Iterator<Item = LinkId> + '_ {
        self.links.iter().copied()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_input(&self) -> bool {
        self.side == ParamSide::Input
    }

    /// Anzeige-Reihenfolge: (Semantik-Typ, Parameter-ID)
    pub fn display_cmp(&self, other: &Parameter) -> Ordering {
        self.semantic_type
            .cmp(&other.semantic_type)
            .then(self.id.cmp(&other.id))
    }
}

/// Ein Verarbeitungsmodul der Analyse-Kette
#[derive(Debug, Clone)]
pub struct Module {
    pub id: ModuleId,
    /// Anzeigename
    pub name: String,
    /// Inputs in Anzeige-Reihenfolge
    pub(crate) inputs: Vec<ParamId>,
    /// Outputs in Anzeige-Reihenfolge
    pub(crate) outputs: Vec<ParamId>,
    /// Linke obere Ecke
    pub position: Vec2,
    /// Breite/Höhe des Widgets (vom Host gemeldet oder berechnet)
    pub size: Vec2,
    /// Parameter sichtbar (false = durch Semantic-Zoom eingeklappt)
    pub params_visible: bool,
}

impl Module {
    /// Standardgröße anhand der Parameteranzahl.
    pub fn default_size(input_count: usize, output_count: usize, sizing: &ModuleSizing) -> Vec2 {
        let rows = input_count.max(output_count).max(1) as f32;
        Vec2::new(sizing.width, sizing.header_height + rows * sizing.row_height)
    }

    pub fn inputs(&self) -> &[ParamId] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[ParamId] {
        &self.outputs
    }

    /// Parameterliste einer Seite.
    pub fn params(&self, side: ParamSide) -> &[ParamId] {
        match side {
            ParamSide::Input => &self.inputs,
            ParamSide::Output => &self.outputs,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.position, self.size)
    }

    /// Modul ist per Doppelklick linkbar, wenn seine Parameter sichtbar sind.
    pub fn is_linkable(&self) -> bool {
        self.params_visible
    }

    /// Bestimmt die Ursprungsseite beim Modul-zu-Modul-Linken.
    ///
    /// Linke Hälfte → Inputs, rechte Hälfte → Outputs; ohne Outputs immer Inputs.
    pub fn origin_side_at(&self, pos: Vec2) -> ParamSide {
        if self.outputs.is_empty() || pos.x < self.bounds().center().x {
            ParamSide::Input
        } else {
            ParamSide::Output
        }
    }
}
