//! Spatial-Index (KD-Tree) über die inneren Kontrollpunkte aller Links.

use glam::Vec2;
use kiddo::{KdTree, SquaredEuclidean};

use super::{ChainGraph, LinkId};

/// Treffer einer Handle-Abfrage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleMatch {
    /// Link, zu dem der Handle gehört
    pub link: LinkId,
    /// Index des Kontrollpunkts im Link
    pub point: usize,
    /// Euklidische Distanz zum Suchpunkt
    pub distance: f32,
}

/// Read-only Index über alle editierbaren Link-Handles.
///
/// Muss nach jeder Geometrie-Änderung neu gebaut werden.
#[derive(Debug, Clone)]
pub struct HandleIndex {
    tree: KdTree<f64, 2>,
    handles: Vec<(LinkId, usize)>,
}

impl HandleIndex {
    /// Erstellt einen leeren Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 2]>::new()).into(),
            handles: Vec::new(),
        }
    }

    /// Baut den Index aus den inneren Punkten aller geschlossenen Links.
    pub fn from_graph(graph: &ChainGraph) -> Self {
        let mut handles = Vec::new();
        let mut entries: Vec<[f64; 2]> = Vec::new();
        for link in graph.closed_links() {
            for (index, pos) in link.interior_points() {
                handles.push((link.id, index));
                entries.push([pos.x as f64, pos.y as f64]);
            }
        }

        Self {
            tree: (&entries).into(),
            handles,
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Nächster Handle zur Position, unabhängig vom Abstand.
    pub fn nearest(&self, query: Vec2) -> Option<HandleMatch> {
        if self.is_empty() {
            return None;
        }
        let result = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[query.x as f64, query.y as f64]);
        let (link, point) = *self.handles.get(result.item as usize)?;
        Some(HandleMatch {
            link,
            point,
            distance: (result.distance as f32).sqrt(),
        })
    }

    /// Alle Handles innerhalb von `radius`, nach Distanz sortiert.
    pub fn within_radius(&self, query: Vec2, radius: f32) -> Vec<HandleMatch> {
        if self.is_empty() || radius.is_sign_negative() {
            return Vec::new();
        }

        let mut results = self
            .tree
            .within::<SquaredEuclidean>(&[query.x as f64, query.y as f64], (radius * radius) as f64)
            .into_iter()
            .filter_map(|entry| {
                let (link, point) = *self.handles.get(entry.item as usize)?;
                Some(HandleMatch {
                    link,
                    point,
                    distance: (entry.distance as f32).sqrt(),
                })
            })
            .collect::<Vec<_>>();

        results.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        results
    }

    /// Handle unter dem Zeiger (nächster innerhalb des Pick-Radius).
    pub fn pick(&self, query: Vec2, radius: f32) -> Option<HandleMatch> {
        self.nearest(query).filter(|m| m.distance <= radius)
    }
}
