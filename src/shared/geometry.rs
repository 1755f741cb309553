//! Reine Geometrie-Funktionen: Rechtecke, Bézier-Auswertung, Abstände.
//!
//! Layer-neutral: wird von `core`, `layout` und `app` gleichermaßen genutzt.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Achsenparalleles Rechteck (Modul-Bounds).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Linke obere Ecke
    pub min: Vec2,
    /// Rechte untere Ecke
    pub max: Vec2,
}

impl Rect {
    /// Erstellt ein Rechteck aus Position (links oben) und Größe.
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Prüft ob `p` im Rechteck liegt (Ränder inklusive).
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// B(t) = (1-t)²·P0 + 2(1-t)t·P1 + t²·P2
pub fn quadratic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, t: f32) -> Vec2 {
    let inv = 1.0 - t;
    inv * inv * p0 + 2.0 * inv * t * p1 + t * t * p2
}

/// Wertet eine Bézier-Kurve beliebigen Grades per de Casteljau aus.
///
/// Die Kontrollpunkte werden wiederholt linear interpoliert, bis ein Punkt übrig bleibt.
pub fn de_casteljau(control_points: &[Vec2], t: f32) -> Vec2 {
    match control_points.len() {
        0 => Vec2::ZERO,
        1 => control_points[0],
        _ => {
            let mut work = control_points.to_vec();
            let mut n = work.len();
            while n > 1 {
                for i in 0..n - 1 {
                    work[i] = work[i].lerp(work[i + 1], t);
                }
                n -= 1;
            }
            work[0]
        }
    }
}

/// Tastet eine Kurve durch `control_points` mit `steps` Schritten ab.
///
/// - 0–2 Punkte: unverändert (Strecke)
/// - 3 Punkte: quadratische Bézier-Kurve
/// - mehr: Bézier-Approximation per de Casteljau
///
/// Das Ergebnis enthält Start- und Endpunkt exakt.
pub fn sample_curve(control_points: &[Vec2], steps: usize) -> Vec<Vec2> {
    let n = control_points.len();
    if n <= 2 {
        return control_points.to_vec();
    }
    let steps = steps.max(1);
    let mut result = Vec::with_capacity(steps + 1);
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let p = if n == 3 {
            quadratic_bezier(control_points[0], control_points[1], control_points[2], t)
        } else {
            de_casteljau(control_points, t)
        };
        result.push(p);
    }
    // Endpunkte exakt (keine Float-Drift an den Ankern)
    result[0] = control_points[0];
    result[steps] = control_points[n - 1];
    result
}

/// Kürzester Abstand von `p` zur Strecke `a`–`b`.
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq < f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Kürzester Abstand von `p` zu einer Polyline (`None` bei leerer Polyline).
pub fn distance_to_polyline(p: Vec2, polyline: &[Vec2]) -> Option<f32> {
    match polyline {
        [] => None,
        [single] => Some(p.distance(*single)),
        _ => polyline
            .windows(2)
            .map(|w| distance_to_segment(p, w[0], w[1]))
            .reduce(f32::min),
    }
}
