//! Doppelklick-Entprellung unabhängig von der Event-Loop des Hosts.
//!
//! Ein Einfach-Klick wird bis zum Ablauf des Doppelklick-Fensters gepuffert.
//! Folgt ein echter Doppelklick (Host meldet `click_count >= 2` oder zweiter
//! Druck nahe der ersten Position innerhalb des Fensters), wird der gepufferte
//! verworfen und nur der Doppelklick ausgegeben; sonst wird er nachgereicht.

use super::EditorCommand;
use crate::shared::options::DOUBLE_CLICK_MAX_DISTANCE;
use glam::Vec2;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingClick {
    pos: Vec2,
    deadline: Duration,
    /// Release, das während der Wartezeit eintraf
    released: Option<Vec2>,
}

/// Kleiner Zustand: gepufferter Einfach-Klick plus Deadline.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickDebouncer {
    window: Duration,
    /// Maximaler Abstand zweier Drücke eines Doppelklicks
    max_distance: f32,
    pending: Option<PendingClick>,
}

impl ClickDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            max_distance: DOUBLE_CLICK_MAX_DISTANCE,
            pending: None,
        }
    }

    pub fn set_window(&mut self, window: Duration) {
        self.window = window;
    }

    pub fn set_max_distance(&mut self, max_distance: f32) {
        self.max_distance = max_distance;
    }

    /// Gibt `true` zurück, solange ein Einfach-Klick auf seine Auflösung wartet.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Verarbeitet einen Tastendruck.
    pub fn press(&mut self, pos: Vec2, click_count: u8, at: Duration) -> Vec<EditorCommand> {
        let repeats_pending = self
            .pending
            .is_some_and(|p| at <= p.deadline && p.pos.distance(pos) <= self.max_distance);
        if click_count >= 2 || repeats_pending {
            self.pending = None;
            return vec![EditorCommand::DoubleClick { pos }];
        }

        let out = self.flush();
        self.pending = Some(PendingClick {
            pos,
            deadline: at + self.window,
            released: None,
        });
        out
    }

    /// Verarbeitet ein Loslassen; wird bei wartendem Klick mitgepuffert.
    pub fn release(&mut self, pos: Vec2) -> Vec<EditorCommand> {
        match self.pending.as_mut() {
            Some(pending) if pending.released.is_none() => {
                pending.released = Some(pos);
                Vec::new()
            }
            _ => vec![EditorCommand::PointerRelease { pos }],
        }
    }

    /// Löst einen abgelaufenen Klick aus.
    pub fn tick(&mut self, at: Duration) -> Vec<EditorCommand> {
        match self.pending {
            Some(pending) if at > pending.deadline => self.flush(),
            _ => Vec::new(),
        }
    }

    /// Reicht einen wartenden Klick (und sein Release) sofort nach.
    pub fn flush(&mut self) -> Vec<EditorCommand> {
        let Some(pending) = self.pending.take() else {
            return Vec::new();
        };
        let mut out = vec![EditorCommand::Click { pos: pending.pos }];
        if let Some(pos) = pending.released {
            out.push(EditorCommand::PointerRelease { pos });
        }
        out
    }
}
