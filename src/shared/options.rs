//! Zentrale Konfiguration für den Ketten-Editor.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Layout ──────────────────────────────────────────────────────────

/// Horizontaler Abstand zwischen zwei Layern (Spalten).
pub const LAYER_HORIZONTAL_GAP: f32 = 80.0;
/// Vertikaler Mindestabstand zwischen Einträgen eines Layers.
pub const ENTRY_VERTICAL_GAP: f32 = 20.0;

// ── Module ──────────────────────────────────────────────────────────

/// Standardbreite eines Moduls.
pub const MODULE_DEFAULT_WIDTH: f32 = 140.0;
/// Höhe der Titelzeile eines Moduls.
pub const MODULE_HEADER_HEIGHT: f32 = 24.0;
/// Höhe einer Parameter-Zeile.
pub const PARAMETER_ROW_HEIGHT: f32 = 18.0;

// ── Routing ─────────────────────────────────────────────────────────

/// Vertikaler Versatz der Routing-Punkte in übersprungenen Layern.
pub const ROUTE_VERTICAL_OFFSET: f32 = 10.0;
/// Abtastschritte für Bézier-Approximation.
pub const CURVE_SAMPLE_STEPS: usize = 100;

// ── Link-Erstellung ─────────────────────────────────────────────────

/// Vertikaler Abstand zwischen Zwischenpunkten beim Modul-zu-Modul-Linken.
pub const BULK_LINK_SPACING: f32 = 8.0;
/// Zeitfenster (ms) für die Doppelklick-Erkennung.
pub const DOUBLE_CLICK_WINDOW_MS: u64 = 300;
/// Maximaler Abstand zwischen den Drücken eines Doppelklicks.
pub const DOUBLE_CLICK_MAX_DISTANCE: f32 = 4.0;
/// Pick-Radius für Link-Handles.
pub const HANDLE_PICK_RADIUS: f32 = 5.0;
/// Toleranz für Treffer auf einer Link-Kurve.
pub const LINK_HIT_TOLERANCE: f32 = 4.0;
/// Pick-Radius für Parameter-Anker.
pub const PARAMETER_PICK_RADIUS: f32 = 6.0;

/// Größenvorgaben für neu angelegte Module.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModuleSizing {
    /// Breite eines Moduls
    pub width: f32,
    /// Höhe der Titelzeile
    pub header_height: f32,
    /// Höhe einer Parameter-Zeile
    pub row_height: f32,
}

impl Default for ModuleSizing {
    fn default() -> Self {
        Self {
            width: MODULE_DEFAULT_WIDTH,
            header_height: MODULE_HEADER_HEIGHT,
            row_height: PARAMETER_ROW_HEIGHT,
        }
    }
}

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `analysis_chain_editor.toml` gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorOptions {
    // ── Layout ──────────────────────────────────────────────────
    /// Horizontaler Abstand zwischen Layern
    pub layer_horizontal_gap: f32,
    /// Vertikaler Abstand zwischen Einträgen eines Layers
    pub entry_vertical_gap: f32,
    /// Größenvorgaben für Module
    #[serde(default)]
    pub module_sizing: ModuleSizing,

    // ── Routing ─────────────────────────────────────────────────
    /// Vertikaler Versatz der Routing-Punkte
    pub route_vertical_offset: f32,
    /// Abtastschritte für Kurven
    pub curve_sample_steps: usize,

    // ── Link-Erstellung ─────────────────────────────────────────
    /// Fächerabstand beim Modul-zu-Modul-Linken
    pub bulk_link_spacing: f32,
    /// Doppelklick-Fenster in Millisekunden
    pub double_click_window_ms: u64,
    /// Maximaler Abstand der Drücke eines Doppelklicks
    #[serde(default = "default_double_click_distance")]
    pub double_click_distance: f32,
    /// Pick-Radius für Link-Handles
    pub handle_pick_radius: f32,
    /// Treffer-Toleranz für Link-Kurven
    pub link_hit_tolerance: f32,
    /// Pick-Radius für Parameter-Anker
    #[serde(default = "default_parameter_pick_radius")]
    pub parameter_pick_radius: f32,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            layer_horizontal_gap: LAYER_HORIZONTAL_GAP,
            entry_vertical_gap: ENTRY_VERTICAL_GAP,
            module_sizing: ModuleSizing::default(),

            route_vertical_offset: ROUTE_VERTICAL_OFFSET,
            curve_sample_steps: CURVE_SAMPLE_STEPS,

            bulk_link_spacing: BULK_LINK_SPACING,
            double_click_window_ms: DOUBLE_CLICK_WINDOW_MS,
            double_click_distance: DOUBLE_CLICK_MAX_DISTANCE,
            handle_pick_radius: HANDLE_PICK_RADIUS,
            link_hit_tolerance: LINK_HIT_TOLERANCE,
            parameter_pick_radius: PARAMETER_PICK_RADIUS,
        }
    }
}

fn default_double_click_distance() -> f32 {
    DOUBLE_CLICK_MAX_DISTANCE
}

/// Serde-Default für `parameter_pick_radius`.
fn default_parameter_pick_radius() -> f32 {
    PARAMETER_PICK_RADIUS
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Doppelklick-Fenster als `Duration`.
    pub fn double_click_window(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.double_click_window_ms)
    }
}
