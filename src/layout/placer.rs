//! Platzierung: Layer als Spalten, Einträge vertikal gestapelt und zentriert.

use super::layering::{LayerAssignment, LayerEntry};
use crate::core::{ChainGraph, ModuleId};
use crate::shared::EditorOptions;
use glam::Vec2;
use indexmap::IndexMap;

/// Berechnete Koordinaten eines Layouts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placement {
    /// Linke obere Ecke je Modul
    pub module_positions: IndexMap<ModuleId, Vec2>,
    /// Slot-Position je Platzhalter (Index = `PlaceholderId`)
    pub placeholder_positions: Vec<Vec2>,
    /// Gesamtbreite
    pub width: f32,
    /// Höhe des höchsten Layers
    pub height: f32,
}

impl Placement {
    pub fn placeholder_position(&self, id: super::PlaceholderId) -> Option<Vec2> {
        self.placeholder_positions.get(id.0).copied()
    }

    /// Überträgt die Modul-Positionen in den Graphen.
    pub fn apply(&self, graph: &mut ChainGraph) {
        for (module, pos) in &self.module_positions {
            graph.set_module_position(*module, *pos);
        }
    }
}

fn entry_size(graph: &ChainGraph, entry: &LayerEntry) -> Vec2 {
    match entry {
        LayerEntry::Module(id) => graph.module(*id).map_or(Vec2::ZERO, |m| m.size),
        LayerEntry::Placeholder(_) => Vec2::ZERO,
    }
}

/// Platziert alle Layer vom höchsten Rang (links) bis Rang 0 (rechts).
///
/// Kürzere Layer werden relativ zum höchsten vertikal zentriert: der Überschuss
/// `(max_height - height) / (n + 1)` wird als Zusatzabstand über und zwischen
/// den Einträgen verteilt. Schreibt `midpoint_x` jedes Layers zurück.
pub fn place(
    graph: &ChainGraph,
    assignment: &mut LayerAssignment,
    options: &EditorOptions,
) -> Placement {
    let gap_y = options.entry_vertical_gap;
    let gap_x = options.layer_horizontal_gap;

    let layer_heights: Vec<f32> = assignment
        .layers
        .iter()
        .map(|layer| {
            let sum: f32 = layer.entries.iter().map(|e| entry_size(graph, e).y).sum();
            sum + gap_y * layer.entries.len().saturating_sub(1) as f32
        })
        .collect();
    let max_height = layer_heights.iter().copied().fold(0.0_f32, f32::max);

    let mut placement = Placement {
        placeholder_positions: vec![Vec2::ZERO; assignment.placeholders.len()],
        height: max_height,
        ..Placement::default()
    };

    let mut x = 0.0_f32;
    let mut placed_any = false;
    for rank in (0..assignment.layers.len()).rev() {
        let layer = &mut assignment.layers[rank];
        let slack = (max_height - layer_heights[rank]) / (layer.entries.len() + 1) as f32;

        let mut y = slack;
        let mut max_width = 0.0_f32;
        for entry in &layer.entries {
            let size = entry_size(graph, entry);
            let pos = Vec2::new(x, y);
            match entry {
                LayerEntry::Module(id) => {
                    placement.module_positions.insert(*id, pos);
                }
                LayerEntry::Placeholder(id) => {
                    if let Some(slot) = placement.placeholder_positions.get_mut(id.0) {
                        *slot = pos;
                    }
                }
            }
            max_width = max_width.max(size.x);
            y += size.y + gap_y + slack;
        }

        let x_after = x + max_width + gap_x;
        layer.midpoint_x = (x + x_after) * 0.5;
        x = x_after;
        placed_any = true;
    }

    placement.width = if placed_any { x - gap_x } else { 0.0 };
    log::debug!(
        "Placement: {} Module, {:.1} x {:.1}",
        placement.module_positions.len(),
        placement.width,
        placement.height
    );
    placement
}
