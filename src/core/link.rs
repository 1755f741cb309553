//! Repräsentiert einen Link zwischen zwei Parametern.

use super::{LinkId, ParamId};
use glam::Vec2;

/// Ein Link als Punktfolge zwischen Start- und End-Parameter.
///
/// "Start"/"Ende" bezeichnen die Zeichenreihenfolge, nicht die Datenflussrichtung.
/// Punkt 0 ist am Start-Parameter verankert, der letzte Punkt (sobald geschlossen)
/// am End-Parameter; alle Punkte dazwischen sind frei editierbare Routing-Punkte.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: LinkId,
    /// Parameter, an dem das Zeichnen begann
    pub start: ParamId,
    /// End-Parameter (None = offen, wird noch gezeichnet)
    pub end: Option<ParamId>,
    /// Permanente Punkte (Anker + Zwischenpunkte)
    pub(crate) points: Vec<Vec2>,
    /// Loses Ende während des Zeichnens (folgt dem Zeiger)
    pub(crate) free_end: Option<Vec2>,
    /// Abgetastete Kurve für Rendering und Hit-Test
    pub(crate) curve: Vec<Vec2>,
}

impl Link {
    /// Erstellt einen offenen Link mit nur dem Startpunkt.
    pub fn open(id: LinkId, start: ParamId, anchor: Vec2) -> Self {
        Self {
            id,
            start,
            end: None,
            points: vec![anchor],
            free_end: None,
            curve: vec![anchor],
        }
    }

    pub fn is_closed(&self) -> bool {
        self.end.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    /// Permanente Punkte des Links.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Loses Ende (nur bei offenen Links gesetzt).
    pub fn free_end(&self) -> Option<Vec2> {
        self.free_end
    }

    /// Kontrollpunkte für die Kurve: permanente Punkte plus loses Ende.
    pub fn control_points(&self) -> Vec<Vec2> {
        let mut pts = self.points.clone();
        if let Some(free) = self.free_end {
            pts.push(free);
        }
        pts
    }

    /// Abgetastete Kurve (vom Router berechnet).
    pub fn curve(&self) -> &[Vec2] {
        &self.curve
    }

    /// Prüft ob `index` ein innerer (frei editierbarer) Punkt ist.
    pub fn is_interior_index(&self, index: usize) -> bool {
        let upper = if self.is_closed() {
            self.points.len().saturating_sub(1)
        } else {
            self.points.len()
        };
        index > 0 && index < upper
    }

    /// Innere Punkte mit ihrem Index.
    pub fn interior_points(&self) -> impl Iterator<Item = (usize, Vec2)> + '_ {
        self.points
            .iter()
            .copied()
            .enumerate()
            .filter(|(i, _)| self.is_interior_index(*i))
    }

    /// Gibt den jeweils anderen Endpunkt zurück.
    pub fn other_end(&self, param: ParamId) -> Option<ParamId> {
        if self.start == param {
            self.end
        } else if self.end == Some(param) {
            Some(self.start)
        } else {
            None
        }
    }

    /// Prüft ob `param` ein Endpunkt dieses Links ist.
    pub fn touches(&self, param: ParamId) -> bool {
        self.start == param || self.end == Some(param)
    }
}
