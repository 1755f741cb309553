//! Benannte Übergänge der Link-Zustandsmaschine.
//!
//! Jede Funktion mutiert höchstens den Graphen und liefert den Folgezustand.
//! Fehler beim Schließen werden lokal behandelt: Link verwerfen, Ruhezustand.

use super::bulk;
use super::LinkingState;
use crate::core::{ChainGraph, LinkId, ModuleId, ParamId, ParamSide};
use crate::layout::reroute_link;
use crate::shared::EditorOptions;
use glam::Vec2;

fn refresh(graph: &mut ChainGraph, link: LinkId, options: &EditorOptions) {
    if let Err(e) = reroute_link(graph, link, options.curve_sample_steps) {
        log::debug!("Routing von {} fehlgeschlagen: {}", link, e);
    }
}

// ── NOT_LINKING → ... ─────────────────────────────────────────────

/// Druck auf einen Parameter, der Link-Ursprung sein darf.
pub fn start_parameter_link(graph: &mut ChainGraph, origin: ParamId) -> LinkingState {
    if !graph.can_be_link_origin(origin) {
        return LinkingState::NotLinking;
    }
    match graph.begin_link(origin) {
        Ok(link) => LinkingState::LinkingParameters { link },
        Err(e) => {
            log::debug!("Link-Start an {} abgelehnt: {}", origin, e);
            LinkingState::NotLinking
        }
    }
}

/// Doppelklick auf ein linkbares Modul: Bündel von der Seite unter `pos` aus.
pub fn start_module_link(graph: &mut ChainGraph, module: ModuleId, pos: Vec2) -> LinkingState {
    let Some(side) = graph
        .module(module)
        .filter(|m| m.is_linkable())
        .map(|m| m.origin_side_at(pos))
    else {
        return LinkingState::NotLinking;
    };

    let links = bulk::begin_bulk(graph, module, side);
    if links.is_empty() {
        log::debug!("Modul {}: keine freien Parameter auf Seite {:?}", module, side);
        return LinkingState::NotLinking;
    }
    LinkingState::LinkingModules {
        origin: module,
        side,
        links,
    }
}

/// Druck auf einen inneren Handle: Link selektieren und Punkt ziehen.
pub fn begin_point_edit(graph: &ChainGraph, link: LinkId, point: usize) -> LinkingState {
    match graph.link(link) {
        Some(l) if l.is_closed() && l.is_interior_index(point) => {
            LinkingState::EditingLinkPoint { link, point }
        }
        _ => LinkingState::NotLinking,
    }
}

// ── LINKING_PARAMETERS ───────────────────────────────────────────

/// Kompatibler Ziel-Parameter unter dem Zeiger, falls vorhanden.
pub fn link_candidate(
    graph: &ChainGraph,
    link: LinkId,
    pos: Vec2,
    options: &EditorOptions,
) -> Option<ParamId> {
    let start = graph.link(link)?.start;
    let param = graph.parameter_at(pos, options.parameter_pick_radius)?;
    let bound_input = graph.parameter(param)?.is_input() && graph.is_input_bound(param);
    (graph.compatible(start, param) && !bound_input).then_some(param)
}

/// Loses Ende folgt dem Zeiger; über einem Kandidaten rastet es am Anker ein.
pub fn extend_parameter_link(
    graph: &mut ChainGraph,
    link: LinkId,
    pos: Vec2,
    options: &EditorOptions,
) -> LinkingState {
    let target = link_candidate(graph, link, pos, options)
        .and_then(|p| graph.param_anchor(p))
        .unwrap_or(pos);
    graph.set_free_end(link, target);
    refresh(graph, link, options);
    LinkingState::LinkingParameters { link }
}

/// Druck auf leere Fläche: permanenter Zwischenpunkt.
pub fn insert_parameter_link_point(
    graph: &mut ChainGraph,
    link: LinkId,
    pos: Vec2,
    options: &EditorOptions,
) -> LinkingState {
    graph.insert_link_point(link, pos);
    graph.set_free_end(link, pos);
    refresh(graph, link, options);
    LinkingState::LinkingParameters { link }
}

/// Druck auf einen Parameter: schließen, bei Inkompatibilität verwerfen.
pub fn finish_parameter_link(
    graph: &mut ChainGraph,
    link: LinkId,
    target: ParamId,
    options: &EditorOptions,
) -> LinkingState {
    match graph.finish_link(link, target) {
        Ok(()) => {
            refresh(graph, link, options);
            log::info!("Link {} erstellt", link);
        }
        Err(e) => {
            graph.remove_link(link);
            log::debug!("Link {} verworfen: {}", link, e);
        }
    }
    LinkingState::NotLinking
}

/// Doppelklick während des Zeichnens: verwerfen, Nachläufer schlucken.
pub fn cancel_parameter_link(graph: &mut ChainGraph, link: LinkId) -> LinkingState {
    graph.remove_link(link);
    log::debug!("Link {} abgebrochen", link);
    LinkingState::LinkCancelling
}

// ── LINKING_MODULES ──────────────────────────────────────────────

/// Alle losen Enden folgen identisch dem Zeiger.
pub fn extend_module_links(
    graph: &mut ChainGraph,
    origin: ModuleId,
    side: ParamSide,
    links: Vec<LinkId>,
    pos: Vec2,
    options: &EditorOptions,
) -> LinkingState {
    for link in &links {
        graph.set_free_end(*link, pos);
        refresh(graph, *link, options);
    }
    LinkingState::LinkingModules {
        origin,
        side,
        links,
    }
}

/// Druck auf leere Fläche: aufgefächerter Zwischenpunkt in jedem Link.
pub fn insert_module_link_points(
    graph: &mut ChainGraph,
    origin: ModuleId,
    side: ParamSide,
    links: Vec<LinkId>,
    pos: Vec2,
    options: &EditorOptions,
) -> LinkingState {
    bulk::fan_out_points(graph, &links, pos, options.bulk_link_spacing);
    for link in &links {
        refresh(graph, *link, options);
    }
    LinkingState::LinkingModules {
        origin,
        side,
        links,
    }
}

/// Doppelklick auf ein Zielmodul: Typ-gleiche Paare binden, Rest verwerfen.
///
/// Ungültiges Ziel (gleiches Modul, nicht linkbar) bricht das ganze Bündel ab.
pub fn finish_module_link(
    graph: &mut ChainGraph,
    origin: ModuleId,
    links: &[LinkId],
    target: ModuleId,
    options: &EditorOptions,
) -> LinkingState {
    if target == origin || !graph.is_linkable(target) {
        discard_links(graph, links);
        log::debug!("Bulk-Linken abgebrochen: ungültiges Ziel {}", target);
        return LinkingState::NotLinking;
    }

    let outcome = bulk::finish_bulk(graph, links, target);
    for link in &outcome.committed {
        refresh(graph, *link, options);
    }
    log::info!(
        "Bulk-Linken {} → {}: {} erstellt, {} verworfen",
        origin,
        target,
        outcome.committed.len(),
        outcome.discarded
    );
    LinkingState::NotLinking
}

// ── Abbruch & Rückkehr ───────────────────────────────────────────

/// Verwirft alle offenen Links des Zustands.
pub fn abort_linking(graph: &mut ChainGraph, state: &LinkingState) -> LinkingState {
    let links = state.open_links();
    if !links.is_empty() {
        discard_links(graph, &links);
        log::debug!("Linken abgebrochen, {} offene(r) Link(s) verworfen", links.len());
    }
    LinkingState::NotLinking
}

fn discard_links(graph: &mut ChainGraph, links: &[LinkId]) {
    for link in links {
        if graph.link(*link).is_some_and(|l| l.is_open()) {
            graph.remove_link(*link);
        }
    }
}

/// LINK_CANCELLING: nächster Klick wird geschluckt.
pub fn absorb_cancel_click() -> LinkingState {
    LinkingState::NotLinking
}

// ── EDITING_LINK_POINT ───────────────────────────────────────────

/// Zieht den Punkt und routet den Link neu.
pub fn drag_link_point(
    graph: &mut ChainGraph,
    link: LinkId,
    point: usize,
    pos: Vec2,
    options: &EditorOptions,
) -> LinkingState {
    if !graph.move_link_point(link, point, pos) {
        return LinkingState::NotLinking;
    }
    refresh(graph, link, options);
    LinkingState::EditingLinkPoint { link, point }
}

/// Loslassen oder Druck auf leere Fläche.
pub fn end_point_edit() -> LinkingState {
    LinkingState::NotLinking
}
