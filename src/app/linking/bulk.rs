//! Modul-zu-Modul-Linken: ein Link je Parameter der Ursprungsseite.

use crate::core::{ChainGraph, LinkId, ModuleId, ParamId, ParamSide};
use glam::Vec2;

/// Ergebnis eines abgeschlossenen Bündels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    /// Geschlossene Links
    pub committed: Vec<LinkId>,
    /// Anzahl verworfener Links ohne passenden Ziel-Parameter
    pub discarded: usize,
}

/// Öffnet je Parameter der Seite `side` einen Link.
///
/// Bereits gebundene Inputs werden übersprungen.
pub fn begin_bulk(graph: &mut ChainGraph, module: ModuleId, side: ParamSide) -> Vec<LinkId> {
    let params = graph
        .module(module)
        .map(|m| m.params(side).to_vec())
        .unwrap_or_default();

    let origins: Vec<ParamId> = params
        .into_iter()
        .filter(|p| graph.can_be_link_origin(*p))
        .collect();
    origins
        .into_iter()
        .filter_map(|p| graph.begin_link(p).ok())
        .collect()
}

/// Setzt einen permanenten Punkt in jeden Link, vertikal um `spacing` aufgefächert.
pub fn fan_out_points(graph: &mut ChainGraph, links: &[LinkId], pos: Vec2, spacing: f32) {
    for (i, link) in links.iter().enumerate() {
        graph.insert_link_point(*link, pos + Vec2::new(0.0, i as f32 * spacing));
    }
}

/// Bindet jeden offenen Link an den ersten Ziel-Parameter mit exakt gleichem Typ.
///
/// Gesucht wird auf der Gegenseite von `target` in Anzeige-Reihenfolge; bereits
/// gebundene Inputs werden übersprungen. Links ohne Treffer werden verworfen.
pub fn finish_bulk(graph: &mut ChainGraph, links: &[LinkId], target: ModuleId) -> BulkOutcome {
    let mut outcome = BulkOutcome::default();

    for &link in links {
        let origin = graph
            .link(link)
            .and_then(|l| graph.parameter(l.start))
            .map(|p| (p.side, p.semantic_type.clone()));
        let Some((origin_side, origin_type)) = origin else {
            continue;
        };

        let candidate = graph.module(target).and_then(|m| {
            m.params(origin_side.opposite())
                .iter()
                .copied()
                .find(|p| {
                    graph
                        .parameter(*p)
                        .is_some_and(|param| param.semantic_type == origin_type)
                        && !graph.is_input_bound(*p)
                })
        });

        let Some(param) = candidate else {
            log::debug!("Bulk-Link {}: kein passender Ziel-Parameter", link);
            graph.remove_link(link);
            outcome.discarded += 1;
            continue;
        };
        match graph.finish_link(link, param) {
            Ok(()) => outcome.committed.push(link),
            Err(e) => {
                log::debug!("Bulk-Link {} verworfen: {}", link, e);
                graph.remove_link(link);
                outcome.discarded += 1;
            }
        }
    }

    outcome
}
