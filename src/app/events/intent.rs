use crate::core::ModuleId;
use glam::Vec2;
use std::time::Duration;

/// Tasten, die der Editor auswertet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    /// Jede andere Taste (wird ignoriert)
    Other,
}

/// Rohe Eingaben des Hosts ohne Mutationslogik.
///
/// Positionen sind Weltkoordinaten, Zeitstempel relativ zu einem beliebigen,
/// aber festen Startpunkt des Hosts.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorIntent {
    /// Primärtaste gedrückt (`click_count` wie vom Host gemeldet, 1 oder 2)
    PointerPressed {
        pos: Vec2,
        click_count: u8,
        at: Duration,
    },
    /// Zeiger bewegt, keine Taste gedrückt
    PointerMoved { pos: Vec2 },
    /// Zeiger bewegt mit gedrückter Primärtaste
    PointerDragged { pos: Vec2, delta: Vec2 },
    /// Primärtaste losgelassen
    PointerReleased { pos: Vec2 },
    /// Taste gedrückt
    KeyPressed { key: Key },
    /// Timer des Hosts (löst gepufferte Einfach-Klicks aus)
    TimerTick { at: Duration },
    /// Auto-Layout angefordert
    AutoLayoutRequested,
    /// Modul programmatisch verschieben
    ModuleMoveRequested { module: ModuleId, delta: Vec2 },
    /// Host meldet neue Widget-Größe eines Moduls
    ModuleResized { module: ModuleId, size: Vec2 },
    /// Semantic-Zoom hat die Parameter-Sichtbarkeit geändert
    ParamsVisibilityChanged { module: ModuleId, visible: bool },
}
