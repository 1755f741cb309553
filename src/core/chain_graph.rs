//! Die zentrale ChainGraph-Datenstruktur mit Modulen, Parametern und Links.

use super::{
    Link, LinkError, LinkId, Module, ModuleId, ModuleSpec, ParamId, ParamSide, ParamSpec,
    Parameter,
};
use crate::shared::geometry::distance_to_polyline;
use crate::shared::ModuleSizing;
use glam::Vec2;
use indexmap::{IndexMap, IndexSet};

/// Gerichtete Kante zwischen zwei Modulen, abgeleitet aus einem geschlossenen Link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleEdge {
    /// Zugrunde liegender Link
    pub link: LinkId,
    /// Modul mit dem Output-Endpunkt
    pub source: ModuleId,
    /// Modul mit dem Input-Endpunkt
    pub sink: ModuleId,
}

/// Arena aller Module, Parameter und Links einer Analyse-Kette.
///
/// Alle Maps behalten die Einfügereihenfolge; Layering und Anzeige
/// sind dadurch deterministisch.
#[derive(Debug, Clone)]
pub struct ChainGraph {
    modules: IndexMap<ModuleId, Module>,
    params: IndexMap<ParamId, Parameter>,
    links: IndexMap<LinkId, Link>,
    sizing: ModuleSizing,
    next_module_id: u64,
    next_param_id: u64,
    next_link_id: u64,
}

impl ChainGraph {
    /// Erstellt einen leeren Graphen mit Standard-Modulgrößen.
    pub fn new() -> Self {
        Self::with_sizing(ModuleSizing::default())
    }

    /// Erstellt einen leeren Graphen mit vorgegebenen Modulgrößen.
    pub fn with_sizing(sizing: ModuleSizing) -> Self {
        Self {
            modules: IndexMap::new(),
            params: IndexMap::new(),
            links: IndexMap::new(),
            sizing,
            next_module_id: 1,
            next_param_id: 1,
            next_link_id: 1,
        }
    }

    pub fn sizing(&self) -> &ModuleSizing {
        &self.sizing
    }

    // ── Module ───────────────────────────────────────────────────────

    /// Fügt ein Modul mit seinen Parametern hinzu.
    pub fn add_module(&mut self, spec: ModuleSpec) -> ModuleId {
        let id = ModuleId(self.next_module_id);
        self.next_module_id += 1;

        let mut inputs = self.create_params(id, ParamSide::Input, spec.inputs);
        let mut outputs = self.create_params(id, ParamSide::Output, spec.outputs);
        self.sort_for_display(&mut inputs);
        self.sort_for_display(&mut outputs);

        let size = Module::default_size(inputs.len(), outputs.len(), &self.sizing);
        self.modules.insert(
            id,
            Module {
                id,
                name: spec.name,
                inputs,
                outputs,
                position: Vec2::ZERO,
                size,
                params_visible: true,
            },
        );
        id
    }

    fn create_params(
        &mut self,
        module: ModuleId,
        side: ParamSide,
        specs: Vec<ParamSpec>,
    ) -> Vec<ParamId> {
        specs
            .into_iter()
            .map(|spec| {
                let id = ParamId(self.next_param_id);
                self.next_param_id += 1;
                self.params.insert(
                    id,
                    Parameter {
                        id,
                        module,
                        side,
                        name: spec.name,
                        semantic_type: spec.semantic_type,
                        links: IndexSet::new(),
                    },
                );
                id
            })
            .collect()
    }

    fn sort_for_display(&self, ids: &mut [ParamId]) {
        ids.sort_by(|a, b| match (self.params.get(a), self.params.get(b)) {
            (Some(pa), Some(pb)) => pa.display_cmp(pb),
            _ => a.cmp(b),
        });
    }

    /// Entfernt ein Modul inklusive aller Links an seinen Parametern.
    pub fn remove_module(&mut self, module_id: ModuleId) -> Option<Module> {
        let module = self.modules.shift_remove(&module_id)?;
        let owned: Vec<ParamId> = module
            .inputs
            .iter()
            .chain(module.outputs.iter())
            .copied()
            .collect();

        let doomed: Vec<LinkId> = self
            .links
            .values()
            .filter(|l| owned.iter().any(|p| l.touches(*p)))
            .map(|l| l.id)
            .collect();
        for link_id in &doomed {
            self.remove_link(*link_id);
        }
        for param_id in owned {
            self.params.shift_remove(&param_id);
        }

        log::info!(
            "Modul {} ('{}') entfernt, {} Link(s) mitentfernt",
            module_id,
            module.name,
            doomed.len()
        );
        Some(module)
    }

    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.modules.get(&id)
    }

    /// Iterator über alle Module in Erstellungsreihenfolge.
    pub fn modules_iter(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    pub fn module_ids(&self) -> Vec<ModuleId> {
        self.modules.keys().copied().collect()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Setzt die Position eines Moduls (linke obere Ecke).
    pub fn set_module_position(&mut self, id: ModuleId, position: Vec2) -> bool {
        let Some(module) = self.modules.get_mut(&id) else {
            return false;
        };
        module.position = position;
        true
    }

    /// Verschiebt ein Modul um `delta`.
    pub fn move_module(&mut self, id: ModuleId, delta: Vec2) -> bool {
        let Some(module) = self.modules.get_mut(&id) else {
            return false;
        };
        module.position += delta;
        true
    }

    /// Übernimmt die vom Host gemeldete Widget-Größe.
    pub fn set_module_size(&mut self, id: ModuleId, size: Vec2) -> bool {
        let Some(module) = self.modules.get_mut(&id) else {
            return false;
        };
        module.size = size;
        true
    }

    /// Semantic-Zoom: Parameter ein- oder ausblenden.
    pub fn set_params_visible(&mut self, id: ModuleId, visible: bool) -> bool {
        let Some(module) = self.modules.get_mut(&id) else {
            return false;
        };
        module.params_visible = visible;
        true
    }

    /// Prüft ob ein Modul per Doppelklick gelinkt werden kann.
    pub fn is_linkable(&self, id: ModuleId) -> bool {
        self.modules.get(&id).is_some_and(Module::is_linkable)
    }

    // ── Parameter ────────────────────────────────────────────────────

    pub fn parameter(&self, id: ParamId) -> Option<&Parameter> {
        self.params.get(&id)
    }

    /// Besitzendes Modul eines Parameters.
    pub fn module_of(&self, param: ParamId) -> Option<ModuleId> {
        self.params.get(&param).map(|p| p.module)
    }

    /// Ankerpunkt eines Parameters in Weltkoordinaten.
    ///
    /// Inputs sitzen am linken, Outputs am rechten Rand, gleichmäßig nach
    /// Anzeige-Reihenfolge verteilt. Eingeklappte Module bündeln alle Anker
    /// einer Seite auf der Randmitte.
    pub fn param_anchor(&self, param_id: ParamId) -> Option<Vec2> {
        let param = self.params.get(&param_id)?;
        let module = self.modules.get(&param.module)?;
        let x = match param.side {
            ParamSide::Input => module.position.x,
            ParamSide::Output => module.position.x + module.size.x,
        };
        if !module.params_visible {
            return Some(Vec2::new(x, module.position.y + module.size.y * 0.5));
        }

        let list = module.params(param.side);
        let index = list.iter().position(|p| *p == param_id)?;
        let header = self.sizing.header_height.min(module.size.y);
        let body = module.size.y - header;
        let y = module.position.y + header + (index as f32 + 0.5) * body / list.len() as f32;
        Some(Vec2::new(x, y))
    }

    /// Prüft ob ein Input bereits einen eingehenden (geschlossenen) Link hat.
    pub fn is_input_bound(&self, param: ParamId) -> bool {
        self.params
            .get(&param)
            .is_some_and(|p| p.is_input() && !p.links.is_empty())
    }

    /// Eingehender Link eines Inputs.
    pub fn incoming_link(&self, input: ParamId) -> Option<LinkId> {
        let param = self.params.get(&input)?;
        if !param.is_input() {
            return None;
        }
        param.links.first().copied()
    }

    /// Prüft ob an diesem Parameter ein neuer Link beginnen darf.
    ///
    /// Outputs immer; Inputs nur ohne eingehenden Link und bei sichtbaren Parametern.
    pub fn can_be_link_origin(&self, param_id: ParamId) -> bool {
        let Some(param) = self.params.get(&param_id) else {
            return false;
        };
        match param.side {
            ParamSide::Output => true,
            ParamSide::Input => {
                param.links.is_empty()
                    && self
                        .modules
                        .get(&param.module)
                        .is_some_and(|m| m.params_visible)
            }
        }
    }

    /// Link-Kompatibilität für interaktives Verbinden.
    ///
    /// Gegenseiten, gleicher (oder beidseitig fehlender) Semantik-Typ, verschiedene Module.
    pub fn check_compatible(&self, a: ParamId, b: ParamId) -> Result<(), LinkError> {
        let pa = self.params.get(&a).ok_or(LinkError::UnknownParameter(a))?;
        let pb = self.params.get(&b).ok_or(LinkError::UnknownParameter(b))?;
        if pa.side == pb.side {
            return Err(LinkError::SameSide(a, b));
        }
        if pa.module == pb.module {
            return Err(LinkError::SameModule(a, b));
        }
        if pa.semantic_type != pb.semantic_type {
            return Err(LinkError::IncompatibleTypes {
                from: pa.semantic_type.clone(),
                to: pb.semantic_type.clone(),
            });
        }
        Ok(())
    }

    /// Symmetrische Kompatibilitätsprüfung.
    pub fn compatible(&self, a: ParamId, b: ParamId) -> bool {
        self.check_compatible(a, b).is_ok()
    }

    // ── Links ────────────────────────────────────────────────────────

    pub fn link(&self, id: LinkId) -> Option<&Link> {
        self.links.get(&id)
    }

    /// Iterator über alle Links (offen und geschlossen).
    pub fn links_iter(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    /// Iterator über alle geschlossenen Links.
    pub fn closed_links(&self) -> impl Iterator<Item = &Link> {
        self.links.values().filter(|l| l.is_closed())
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn open_link_count(&self) -> usize {
        self.links.values().filter(|l| l.is_open()).count()
    }

    /// Verbindet einen Output mit einem Input (Lade-/Programm-Pfad).
    ///
    /// Untypisierte Parameter sind hier mit allem kompatibel; nur zwei
    /// gesetzte, verschiedene Typen werden abgelehnt.
    pub fn add_link(&mut self, from_output: ParamId, to_input: ParamId) -> Result<LinkId, LinkError> {
        let from = self
            .params
            .get(&from_output)
            .ok_or(LinkError::UnknownParameter(from_output))?;
        let to = self
            .params
            .get(&to_input)
            .ok_or(LinkError::UnknownParameter(to_input))?;
        if from.side == to.side {
            return Err(LinkError::SameSide(from_output, to_input));
        }
        // Vertauschte Argumente tolerieren
        let (output, input) = if from.side == ParamSide::Output {
            (from, to)
        } else {
            (to, from)
        };
        if output.module == input.module {
            return Err(LinkError::SameModule(output.id, input.id));
        }
        if let (Some(a), Some(b)) = (&output.semantic_type, &input.semantic_type) {
            if a != b {
                return Err(LinkError::IncompatibleTypes {
                    from: output.semantic_type.clone(),
                    to: input.semantic_type.clone(),
                });
            }
        }
        if !input.links.is_empty() {
            return Err(LinkError::InputAlreadyBound(input.id));
        }

        let (output_id, input_id) = (output.id, input.id);
        let start_anchor = self
            .param_anchor(output_id)
            .ok_or(LinkError::UnknownParameter(output_id))?;
        let end_anchor = self
            .param_anchor(input_id)
            .ok_or(LinkError::UnknownParameter(input_id))?;

        let id = self.allocate_link_id();
        let mut link = Link::open(id, output_id, start_anchor);
        link.points.push(end_anchor);
        link.end = Some(input_id);
        link.curve = link.points.clone();
        self.links.insert(id, link);
        self.register(id, output_id, input_id);

        log::debug!("Link {} erstellt: {} → {}", id, output_id, input_id);
        Ok(id)
    }

    fn allocate_link_id(&mut self) -> LinkId {
        let id = LinkId(self.next_link_id);
        self.next_link_id += 1;
        id
    }

    fn register(&mut self, link: LinkId, a: ParamId, b: ParamId) {
        for p in [a, b] {
            if let Some(param) = self.params.get_mut(&p) {
                param.links.insert(link);
            }
        }
    }

    /// Beginnt einen offenen Link am Parameter `start`.
    pub fn begin_link(&mut self, start: ParamId) -> Result<LinkId, LinkError> {
        let anchor = self
            .param_anchor(start)
            .ok_or(LinkError::UnknownParameter(start))?;
        let id = self.allocate_link_id();
        self.links.insert(id, Link::open(id, start, anchor));
        Ok(id)
    }

    /// Schließt einen offenen Link am Parameter `end`.
    ///
    /// Bei Fehler bleibt der Link offen; der Aufrufer entscheidet über das Verwerfen.
    pub fn finish_link(&mut self, link_id: LinkId, end: ParamId) -> Result<(), LinkError> {
        let link = self
            .links
            .get(&link_id)
            .ok_or(LinkError::UnknownLink(link_id))?;
        if link.is_closed() {
            return Err(LinkError::LinkNotOpen(link_id));
        }
        let start = link.start;
        self.check_compatible(start, end)?;

        let input = if self.params.get(&end).is_some_and(Parameter::is_input) {
            end
        } else {
            start
        };
        if self.is_input_bound(input) {
            return Err(LinkError::InputAlreadyBound(input));
        }

        let anchor = self
            .param_anchor(end)
            .ok_or(LinkError::UnknownParameter(end))?;
        if let Some(link) = self.links.get_mut(&link_id) {
            link.points.push(anchor);
            link.free_end = None;
            link.end = Some(end);
        }
        self.register(link_id, start, end);
        log::debug!("Link {} geschlossen: {} ↔ {}", link_id, start, end);
        Ok(())
    }

    /// Entfernt einen Link und löscht die Rückverweise an beiden Parametern.
    pub fn remove_link(&mut self, link_id: LinkId) -> Option<Link> {
        let link = self.links.shift_remove(&link_id)?;
        for p in [Some(link.start), link.end].into_iter().flatten() {
            if let Some(param) = self.params.get_mut(&p) {
                param.links.shift_remove(&link_id);
            }
        }
        Some(link)
    }

    /// Datenfluss eines geschlossenen Links: (Output, Input).
    pub fn link_flow(&self, link_id: LinkId) -> Option<(ParamId, ParamId)> {
        let link = self.links.get(&link_id)?;
        let end = link.end?;
        if self.params.get(&link.start)?.is_input() {
            Some((end, link.start))
        } else {
            Some((link.start, end))
        }
    }

    /// Alle Modul-Kanten (Quelle → Senke) aus geschlossenen Links.
    pub fn module_edges(&self) -> Vec<ModuleEdge> {
        self.links
            .keys()
            .filter_map(|&id| {
                let (output, input) = self.link_flow(id)?;
                Some(ModuleEdge {
                    link: id,
                    source: self.module_of(output)?,
                    sink: self.module_of(input)?,
                })
            })
            .collect()
    }

    /// Setzt das lose Ende eines offenen Links.
    pub fn set_free_end(&mut self, link_id: LinkId, pos: Vec2) -> bool {
        match self.links.get_mut(&link_id) {
            Some(link) if link.is_open() => {
                link.free_end = Some(pos);
                true
            }
            _ => false,
        }
    }

    /// Fügt einem offenen Link einen permanenten Zwischenpunkt hinzu.
    pub fn insert_link_point(&mut self, link_id: LinkId, pos: Vec2) -> bool {
        match self.links.get_mut(&link_id) {
            Some(link) if link.is_open() => {
                link.points.push(pos);
                true
            }
            _ => false,
        }
    }

    /// Verschiebt einen inneren Kontrollpunkt.
    pub fn move_link_point(&mut self, link_id: LinkId, index: usize, pos: Vec2) -> bool {
        match self.links.get_mut(&link_id) {
            Some(link) if link.is_interior_index(index) => {
                link.points[index] = pos;
                true
            }
            _ => false,
        }
    }

    /// Ersetzt die inneren Punkte eines geschlossenen Links (Auto-Layout).
    pub(crate) fn set_interior_points(&mut self, link_id: LinkId, interior: &[Vec2]) -> bool {
        match self.links.get_mut(&link_id) {
            Some(link) if link.is_closed() && link.points.len() >= 2 => {
                let first = link.points[0];
                let last = link.points[link.points.len() - 1];
                link.points.clear();
                link.points.push(first);
                link.points.extend_from_slice(interior);
                link.points.push(last);
                true
            }
            _ => false,
        }
    }

    /// Aktualisiert die Endpunkte eines Links aus den aktuellen Parameter-Ankern.
    pub(crate) fn refresh_link_anchors(&mut self, link_id: LinkId) -> Result<(), LinkError> {
        let link = self
            .links
            .get(&link_id)
            .ok_or(LinkError::UnknownLink(link_id))?;
        let start = self
            .param_anchor(link.start)
            .ok_or(LinkError::DanglingReference(link_id))?;
        let end = match link.end {
            Some(end) => Some(
                self.param_anchor(end)
                    .ok_or(LinkError::DanglingReference(link_id))?,
            ),
            None => None,
        };
        if let Some(link) = self.links.get_mut(&link_id) {
            link.points[0] = start;
            if let Some(end) = end {
                let last = link.points.len() - 1;
                link.points[last] = end;
            }
        }
        Ok(())
    }

    pub(crate) fn set_link_curve(&mut self, link_id: LinkId, curve: Vec<Vec2>) {
        if let Some(link) = self.links.get_mut(&link_id) {
            link.curve = curve;
        }
    }

    // ── Picking ──────────────────────────────────────────────────────

    /// Oberstes Modul unter `pos` (zuletzt eingefügtes gewinnt).
    pub fn module_at(&self, pos: Vec2) -> Option<ModuleId> {
        self.modules
            .values()
            .rev()
            .find(|m| m.bounds().contains(pos))
            .map(|m| m.id)
    }

    /// Nächster sichtbarer Parameter-Anker innerhalb von `radius`.
    pub fn parameter_at(&self, pos: Vec2, radius: f32) -> Option<ParamId> {
        self.params
            .values()
            .filter(|p| {
                self.modules
                    .get(&p.module)
                    .is_some_and(|m| m.params_visible)
            })
            .filter_map(|p| {
                let anchor = self.param_anchor(p.id)?;
                let d = anchor.distance(pos);
                (d <= radius).then_some((p.id, d))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Geschlossener Link, dessen Kurve `pos` innerhalb von `tolerance` passiert.
    pub fn link_at(&self, pos: Vec2, tolerance: f32) -> Option<LinkId> {
        self.closed_links()
            .filter_map(|l| {
                let d = distance_to_polyline(pos, &l.curve)?;
                (d <= tolerance).then_some((l.id, d))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }
}

#[cfg(test)]
impl ChainGraph {
    /// Entfernt nur den Modul-Eintrag, ohne Links und Parameter aufzuräumen.
    pub(crate) fn forget_module(&mut self, id: ModuleId) {
        self.modules.shift_remove(&id);
    }
}

impl Default for ChainGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
