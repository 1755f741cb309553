//! Austauschformat mit Ketten-Loader und Speicher-Service.
//!
//! Die Engine besitzt kein Dateiformat: die Beschreibung ist der In-Memory-Vertrag,
//! den der externe Loader liefert und der Speicher-Service beim Sichern erhält.
//! Parameter werden über ihren Index in Deklarations-Reihenfolge adressiert,
//! nicht über die sortierte Anzeige-Reihenfolge.

use super::{ChainGraph, ModuleId, ModuleSpec, ParamId, ParamSide};
use crate::shared::ModuleSizing;
use anyhow::Context;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Ein Parameter in Deklarations-Reihenfolge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDescription {
    pub name: String,
    #[serde(default)]
    pub semantic_type: Option<String>,
}

impl ParamDescription {
    pub fn new(name: impl Into<String>, semantic_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            semantic_type: semantic_type.map(str::to_owned),
        }
    }
}

/// Ein Modul mit optional persistierter Position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDescription {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<ParamDescription>,
    #[serde(default)]
    pub outputs: Vec<ParamDescription>,
    /// Persistierte linke obere Ecke
    #[serde(default)]
    pub position: Option<Vec2>,
}

/// Ein geschlossener Link, Datenfluss Output → Input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkDescription {
    /// Index des Quell-Moduls in `modules`
    pub from_module: usize,
    /// Index des Outputs im Quell-Modul
    pub from_output: usize,
    /// Index des Ziel-Moduls in `modules`
    pub to_module: usize,
    /// Index des Inputs im Ziel-Modul
    pub to_input: usize,
    /// Innere Routing-Punkte vom Output zum Input
    #[serde(default)]
    pub points: Vec<Vec2>,
}

/// Vollständige Beschreibung einer Analyse-Kette.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainDescription {
    pub modules: Vec<ModuleDescription>,
    #[serde(default)]
    pub links: Vec<LinkDescription>,
}

impl ChainDescription {
    /// Prüft ob jedes Modul eine persistierte Position besitzt.
    pub fn fully_positioned(&self) -> bool {
        self.modules.iter().all(|m| m.position.is_some())
    }

    /// Liest eine Beschreibung aus JSON.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Ketten-Beschreibung ist kein gültiges JSON")
    }

    /// Schreibt die Beschreibung als formatiertes JSON.
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Ketten-Beschreibung nicht serialisierbar")
    }
}

impl ChainGraph {
    /// Baut einen Graphen aus einer Beschreibung.
    ///
    /// Ungültige Links (Index außerhalb, Typ-Konflikt, bereits gebundener Input)
    /// werden übersprungen und geloggt. Kurven werden nicht berechnet; das
    /// erledigt der Router nach dem Laden.
    pub fn from_description(description: &ChainDescription, sizing: ModuleSizing) -> Self {
        let mut graph = ChainGraph::with_sizing(sizing);

        let module_ids: Vec<ModuleId> = description
            .modules
            .iter()
            .map(|desc| {
                let mut spec = ModuleSpec::new(desc.name.clone());
                for p in &desc.inputs {
                    spec = spec.input(p.name.clone(), p.semantic_type.as_deref());
                }
                for p in &desc.outputs {
                    spec = spec.output(p.name.clone(), p.semantic_type.as_deref());
                }
                let id = graph.add_module(spec);
                if let Some(position) = desc.position {
                    graph.set_module_position(id, position);
                }
                id
            })
            .collect();

        let mut skipped = 0usize;
        for (index, link_desc) in description.links.iter().enumerate() {
            let endpoints = module_ids
                .get(link_desc.from_module)
                .zip(module_ids.get(link_desc.to_module))
                .and_then(|(from, to)| {
                    let output = graph.declared_param(*from, ParamSide::Output, link_desc.from_output)?;
                    let input = graph.declared_param(*to, ParamSide::Input, link_desc.to_input)?;
                    Some((output, input))
                });
            let Some((output, input)) = endpoints else {
                log::warn!("Link #{} verweist auf unbekanntes Modul/Parameter, übersprungen", index);
                skipped += 1;
                continue;
            };

            match graph.add_link(output, input) {
                Ok(link) => {
                    if !link_desc.points.is_empty() {
                        graph.set_interior_points(link, &link_desc.points);
                    }
                }
                Err(e) => {
                    log::warn!("Link #{} übersprungen: {}", index, e);
                    skipped += 1;
                }
            }
        }

        log::info!(
            "Kette geladen: {} Module, {} Links ({} übersprungen)",
            graph.module_count(),
            graph.link_count(),
            skipped
        );
        graph
    }

    /// Exportiert Module und geschlossene Links für den Speicher-Service.
    ///
    /// Offene Links werden nie exportiert.
    pub fn to_description(&self) -> ChainDescription {
        let module_ids = self.module_ids();
        let modules = self
            .modules_iter()
            .map(|module| ModuleDescription {
                name: module.name.clone(),
                inputs: self.describe_params(module.id, ParamSide::Input),
                outputs: self.describe_params(module.id, ParamSide::Output),
                position: Some(module.position),
            })
            .collect();

        let links = self
            .closed_links()
            .filter_map(|link| {
                let (output, input) = self.link_flow(link.id)?;
                let from = self.module_of(output)?;
                let to = self.module_of(input)?;
                let mut points: Vec<Vec2> = link.interior_points().map(|(_, p)| p).collect();
                // Gezeichnet vom Input aus → auf Datenfluss-Richtung drehen
                if link.start == input {
                    points.reverse();
                }
                Some(LinkDescription {
                    from_module: module_ids.iter().position(|m| *m == from)?,
                    from_output: self.declared_index(from, ParamSide::Output, output)?,
                    to_module: module_ids.iter().position(|m| *m == to)?,
                    to_input: self.declared_index(to, ParamSide::Input, input)?,
                    points,
                })
            })
            .collect();

        ChainDescription { modules, links }
    }

    /// Parameter-IDs einer Seite in Deklarations-Reihenfolge (= aufsteigende ID).
    fn declared_params(&self, module: ModuleId, side: ParamSide) -> Vec<ParamId> {
        let mut ids = self
            .module(module)
            .map(|m| m.params(side).to_vec())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    fn declared_param(&self, module: ModuleId, side: ParamSide, index: usize) -> Option<ParamId> {
        self.declared_params(module, side).get(index).copied()
    }

    fn declared_index(&self, module: ModuleId, side: ParamSide, param: ParamId) -> Option<usize> {
        self.declared_params(module, side)
            .iter()
            .position(|p| *p == param)
    }

    fn describe_params(&self, module: ModuleId, side: ParamSide) -> Vec<ParamDescription> {
        self.declared_params(module, side)
            .into_iter()
            .filter_map(|id| self.parameter(id))
            .map(|p| ParamDescription {
                name: p.name.clone(),
                semantic_type: p.semantic_type.clone(),
            })
            .collect()
    }
}
