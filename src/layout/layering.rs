//! Layer-Zuweisung: Ränge per umgekehrter Topologie, Platzhalter für lange Links.

use crate::core::{ChainGraph, LayoutError, LinkId, ModuleEdge, ModuleId};
use indexmap::IndexMap;
use std::collections::VecDeque;

/// Index eines Platzhalters in [`LayerAssignment::placeholders`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaceholderId(pub usize);

/// Eintrag eines Layers: echtes Modul oder Platzhalter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerEntry {
    Module(ModuleId),
    Placeholder(PlaceholderId),
}

/// Platzhalter ohne Größe, reserviert einen Slot für einen langen Link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder {
    pub id: PlaceholderId,
    /// Link, der durch diesen Layer läuft
    pub link: LinkId,
    /// Rang des Layers, in dem der Platzhalter liegt
    pub rank: usize,
    /// 1-basierter Index des zugehörigen Zwischenpunkts in Zeichenreihenfolge
    pub point_index: usize,
}

/// Ein Layer: geordnete Einträge plus gecachte horizontale Mitte.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub rank: usize,
    pub entries: Vec<LayerEntry>,
    /// Horizontale Mitte, vom Placer gesetzt
    pub midpoint_x: f32,
}

impl Layer {
    fn new(rank: usize) -> Self {
        Self {
            rank,
            entries: Vec::new(),
            midpoint_x: 0.0,
        }
    }

    /// Nur die echten Module in Layer-Reihenfolge.
    pub fn modules(&self) -> impl Iterator<Item = ModuleId> + '_ {
        self.entries.iter().filter_map(|e| match e {
            LayerEntry::Module(id) => Some(*id),
            LayerEntry::Placeholder(_) => None,
        })
    }
}

/// Ergebnis der Layering-Engine.
///
/// `layers[k]` ist der Layer mit Rang k; Rang 0 sind die Senken.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerAssignment {
    pub ranks: IndexMap<ModuleId, usize>,
    pub layers: Vec<Layer>,
    pub placeholders: Vec<Placeholder>,
    /// Platzhalter je langem Link, in Zeichenreihenfolge
    pub long_links: IndexMap<LinkId, Vec<PlaceholderId>>,
}

impl LayerAssignment {
    pub fn rank(&self, module: ModuleId) -> Option<usize> {
        self.ranks.get(&module).copied()
    }

    pub fn layer(&self, rank: usize) -> Option<&Layer> {
        self.layers.get(rank)
    }

    /// Höchster Rang (Quellen), `None` bei leerem Graphen.
    pub fn max_rank(&self) -> Option<usize> {
        self.layers.len().checked_sub(1)
    }

    pub fn placeholder(&self, id: PlaceholderId) -> Option<&Placeholder> {
        self.placeholders.get(id.0)
    }

    /// Platzhalter eines Links in Zeichenreihenfolge (leer bei benachbarten Layern).
    pub fn route_placeholders(&self, link: LinkId) -> &[PlaceholderId] {
        self.long_links.get(&link).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Findet ein Modul, das auf einem Zyklus liegt.
///
/// Jedes unbearbeitete Modul hat einen unbearbeiteten Abnehmer; nach
/// `n` Schritten entlang solcher Kanten steht die Suche sicher im Zyklus.
fn module_on_cycle(
    edges: &[ModuleEdge],
    pending_out: &IndexMap<ModuleId, usize>,
) -> Option<ModuleId> {
    let stuck = |id: &ModuleId| pending_out.get(id).is_some_and(|count| *count > 0);
    let mut current = pending_out.keys().copied().find(|id| stuck(id))?;
    for _ in 0..pending_out.len() {
        current = edges
            .iter()
            .find(|e| e.source == current && stuck(&e.sink))
            .map(|e| e.sink)?;
    }
    Some(current)
}

/// Weist jedem Modul einen Rang zu und baut die Layer.
///
/// Rang = 1 + max(Rang aller direkt gespeisten Module), Senken haben Rang 0.
/// Module werden erst bearbeitet, wenn alle ihre Abnehmer feststehen
/// (umgekehrter Kahn-Algorithmus ab den Senken), O(V+E).
pub fn assign_layers(graph: &ChainGraph) -> Result<LayerAssignment, LayoutError> {
    let edges = graph.module_edges();

    let mut pending_out: IndexMap<ModuleId, usize> =
        graph.module_ids().into_iter().map(|id| (id, 0)).collect();
    let mut feeders: IndexMap<ModuleId, Vec<ModuleId>> = IndexMap::new();
    for edge in &edges {
        if let Some(count) = pending_out.get_mut(&edge.source) {
            *count += 1;
        }
        feeders.entry(edge.sink).or_default().push(edge.source);
    }

    let mut ranks: IndexMap<ModuleId, usize> =
        pending_out.keys().map(|id| (*id, 0)).collect();
    let mut queue: VecDeque<ModuleId> = pending_out
        .iter()
        .filter(|(_, count)| **count == 0)
        .map(|(id, _)| *id)
        .collect();

    let mut processed = 0usize;
    while let Some(module) = queue.pop_front() {
        processed += 1;
        let rank = ranks.get(&module).copied().unwrap_or(0);
        let Some(sources) = feeders.get(&module) else {
            continue;
        };
        for source in sources {
            if let Some(r) = ranks.get_mut(source) {
                *r = (*r).max(rank + 1);
            }
            if let Some(count) = pending_out.get_mut(source) {
                *count -= 1;
                if *count == 0 {
                    queue.push_back(*source);
                }
            }
        }
    }

    if processed < pending_out.len() {
        let module = module_on_cycle(&edges, &pending_out).unwrap_or(ModuleId(0));
        log::warn!("Layering abgebrochen: Zyklus über {}", module);
        return Err(LayoutError::CyclicGraph { module });
    }

    let layer_count = ranks.values().max().map_or(0, |max| max + 1);
    let mut layers: Vec<Layer> = (0..layer_count).map(Layer::new).collect();
    for (module, rank) in &ranks {
        layers[*rank].entries.push(LayerEntry::Module(*module));
    }

    let mut placeholders = Vec::new();
    let mut long_links = IndexMap::new();
    for edge in &edges {
        let (Some(&high), Some(&low)) = (ranks.get(&edge.source), ranks.get(&edge.sink)) else {
            continue;
        };
        if high <= low + 1 {
            continue;
        }
        // Zeichenreihenfolge: vom Start-Parameter des Links aus
        let drawn_from_source = graph
            .link(edge.link)
            .and_then(|l| graph.module_of(l.start))
            .is_some_and(|m| m == edge.source);
        let intervening: Vec<usize> = if drawn_from_source {
            (low + 1..high).rev().collect()
        } else {
            (low + 1..high).collect()
        };

        let ids: Vec<PlaceholderId> = intervening
            .into_iter()
            .enumerate()
            .map(|(i, rank)| {
                let id = PlaceholderId(placeholders.len());
                placeholders.push(Placeholder {
                    id,
                    link: edge.link,
                    rank,
                    point_index: i + 1,
                });
                layers[rank].entries.push(LayerEntry::Placeholder(id));
                id
            })
            .collect();
        long_links.insert(edge.link, ids);
    }

    log::debug!(
        "Layering: {} Module in {} Layern, {} Platzhalter",
        ranks.len(),
        layers.len(),
        placeholders.len()
    );

    Ok(LayerAssignment {
        ranks,
        layers,
        placeholders,
        long_links,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ModuleSpec;

    struct Chain {
        graph: ChainGraph,
        source: ModuleId,
        filter: ModuleId,
        sink: ModuleId,
    }

    impl Chain {
        fn new() -> Self {
            let mut graph = ChainGraph::new();
            let source = graph.add_module(ModuleSpec::new("Source").output("out", Some("Image")));
            let filter = graph.add_module(
                ModuleSpec::new("Filter")
                    .input("in", Some("Image"))
                    .output("out", Some("Image")),
            );
            let sink = graph.add_module(
                ModuleSpec::new("Sink")
                    .input("a", Some("Image"))
                    .input("b", Some("Image")),
            );
            Self {
                graph,
                source,
                filter,
                sink,
            }
        }

        fn connect(&mut self, from: ModuleId, to: ModuleId, input: usize) -> LinkId {
            let out = self.graph.module(from).unwrap().outputs()[0];
            let inp = self.graph.module(to).unwrap().inputs()[input];
            self.graph.add_link(out, inp).expect("Link erwartet")
        }
    }

    #[test]
    fn test_scenario_a_linear_chain() {
        let mut chain = Chain::new();
        chain.connect(chain.source, chain.filter, 0);
        chain.connect(chain.filter, chain.sink, 0);

        let assignment = assign_layers(&chain.graph).unwrap();
        assert_eq!(assignment.rank(chain.sink), Some(0));
        assert_eq!(assignment.rank(chain.filter), Some(1));
        assert_eq!(assignment.rank(chain.source), Some(2));
        assert!(assignment.placeholders.is_empty());
        assert_eq!(assignment.max_rank(), Some(2));
    }

    #[test]
    fn test_scenario_b_long_link_gets_one_placeholder() {
        let mut chain = Chain::new();
        chain.connect(chain.source, chain.filter, 0);
        chain.connect(chain.filter, chain.sink, 0);
        let direct = chain.connect(chain.source, chain.sink, 1);

        let assignment = assign_layers(&chain.graph).unwrap();
        assert_eq!(assignment.rank(chain.source), Some(2));
        assert_eq!(assignment.rank(chain.filter), Some(1));
        assert_eq!(assignment.rank(chain.sink), Some(0));

        let route = assignment.route_placeholders(direct);
        assert_eq!(route.len(), 1);
        let placeholder = assignment.placeholder(route[0]).unwrap();
        assert_eq!(placeholder.rank, 1);
        assert_eq!(placeholder.point_index, 1);
        assert_eq!(
            assignment.layer(1).unwrap().entries,
            vec![
                LayerEntry::Module(chain.filter),
                LayerEntry::Placeholder(route[0])
            ]
        );
    }

    #[test]
    fn test_rank_invariant_for_every_link() {
        let mut chain = Chain::new();
        chain.connect(chain.source, chain.filter, 0);
        chain.connect(chain.source, chain.sink, 1);
        let assignment = assign_layers(&chain.graph).unwrap();

        for edge in chain.graph.module_edges() {
            let high = assignment.rank(edge.source).unwrap();
            let low = assignment.rank(edge.sink).unwrap();
            assert!(high > low);
            assert_eq!(assignment.route_placeholders(edge.link).len(), high - low - 1);
        }
        // Filter speist nichts → Senke
        assert_eq!(assignment.rank(chain.filter), Some(0));
        assert_eq!(assignment.rank(chain.source), Some(1));
    }

    #[test]
    fn test_placeholder_indices_follow_drawing_order() {
        let mut graph = ChainGraph::new();
        let ids: Vec<ModuleId> = (0..4)
            .map(|i| {
                graph.add_module(
                    ModuleSpec::new(format!("M{}", i))
                        .input("in", Some("T"))
                        .input("skip", Some("T"))
                        .output("out", Some("T")),
                )
            })
            .collect();
        for pair in ids.windows(2) {
            let out = graph.module(pair[0]).unwrap().outputs()[0];
            let inp = graph.module(pair[1]).unwrap().inputs()[0];
            graph.add_link(out, inp).unwrap();
        }
        // Langer Link M0 → M3, gezeichnet vom Input aus
        let inp = graph.module(ids[3]).unwrap().inputs()[1];
        let out = graph.module(ids[0]).unwrap().outputs()[0];
        let link = graph.begin_link(inp).unwrap();
        graph.finish_link(link, out).unwrap();

        let assignment = assign_layers(&graph).unwrap();
        let ranks: Vec<usize> = assignment
            .route_placeholders(link)
            .iter()
            .map(|id| assignment.placeholder(*id).unwrap().rank)
            .collect();
        // Vom Senken-Ende aus: aufsteigende Ränge
        assert_eq!(ranks, vec![1, 2]);
    }

    #[test]
    fn test_cycle_is_rejected() {
        let mut graph = ChainGraph::new();
        let spec = || {
            ModuleSpec::new("Loop")
                .input("in", Some("T"))
                .output("out", Some("T"))
        };
        let a = graph.add_module(spec());
        let b = graph.add_module(spec());
        let a_out = graph.module(a).unwrap().outputs()[0];
        let a_in = graph.module(a).unwrap().inputs()[0];
        let b_out = graph.module(b).unwrap().outputs()[0];
        let b_in = graph.module(b).unwrap().inputs()[0];
        graph.add_link(a_out, b_in).unwrap();
        graph.add_link(b_out, a_in).unwrap();

        assert!(matches!(
            assign_layers(&graph),
            Err(LayoutError::CyclicGraph { .. })
        ));
    }

    #[test]
    fn test_cycle_error_names_module_on_cycle() {
        let mut graph = ChainGraph::new();
        let feeder = graph.add_module(ModuleSpec::new("Feeder").output("out", Some("T")));
        let spec = || {
            ModuleSpec::new("Loop")
                .input("in", Some("T"))
                .input("extra", Some("T"))
                .output("out", Some("T"))
        };
        let a = graph.add_module(spec());
        let b = graph.add_module(spec());
        let feeder_out = graph.module(feeder).unwrap().outputs()[0];
        let a_out = graph.module(a).unwrap().outputs()[0];
        let a_ins = graph.module(a).unwrap().inputs().to_vec();
        let b_out = graph.module(b).unwrap().outputs()[0];
        let b_in = graph.module(b).unwrap().inputs()[0];
        graph.add_link(feeder_out, a_ins[1]).unwrap();
        graph.add_link(a_out, b_in).unwrap();
        graph.add_link(b_out, a_ins[0]).unwrap();

        let Err(LayoutError::CyclicGraph { module }) = assign_layers(&graph) else {
            panic!("CyclicGraph erwartet");
        };
        assert_ne!(module, feeder);
        assert!(module == a || module == b);
    }

    #[test]
    fn test_layering_is_idempotent() {
        let mut chain = Chain::new();
        chain.connect(chain.source, chain.filter, 0);
        chain.connect(chain.filter, chain.sink, 0);
        chain.connect(chain.source, chain.sink, 1);

        let first = assign_layers(&chain.graph).unwrap();
        let second = assign_layers(&chain.graph).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_graph() {
        let assignment = assign_layers(&ChainGraph::new()).unwrap();
        assert!(assignment.layers.is_empty());
        assert_eq!(assignment.max_rank(), None);
    }
}
