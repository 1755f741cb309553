use crate::core::ModuleId;
use glam::Vec2;

/// Aufgelöste, mutierende Commands.
///
/// Klicks sind hier bereits entprellt: ein `Click` folgt nie unmittelbar
/// auf einen `DoubleClick` derselben Geste.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    /// Einfach-Klick (Press) an Position
    Click { pos: Vec2 },
    /// Doppelklick an Position
    DoubleClick { pos: Vec2 },
    /// Zeigerbewegung ohne gedrückte Taste
    PointerMotion { pos: Vec2 },
    /// Drag mit gedrückter Taste
    PointerDrag { pos: Vec2, delta: Vec2 },
    /// Taste losgelassen
    PointerRelease { pos: Vec2 },
    /// Selektiertes Modul bzw. selektierten Link löschen
    DeleteSelection,
    /// Laufende Link-Erstellung oder Punkt-Bearbeitung abbrechen
    CancelLinking,
    /// Layering + Platzierung + Routing
    AutoLayout,
    /// Modul um Delta verschieben
    MoveModule { module: ModuleId, delta: Vec2 },
    /// Widget-Größe übernehmen
    ResizeModule { module: ModuleId, size: Vec2 },
    /// Parameter ein-/ausblenden
    SetParamsVisible { module: ModuleId, visible: bool },
}
