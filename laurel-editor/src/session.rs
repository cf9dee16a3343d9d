/*
    Laurel - certificate template design engine
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use laurel_core::Design;
use thiserror::Error;
use tracing::{debug, warn};

/// Quiet period after the last edit before an auto-save is due.
pub const AUTOSAVE_QUIET_MS: u64 = 30_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    #[error("save rejected: {0}")]
    Rejected(String),

    #[error("save transport failed: {0}")]
    Transport(String),
}

/// The persistence boundary. The core never learns how a design is stored;
/// it only sees this contract.
pub trait SaveTarget {
    fn save(&mut self, design: &Design) -> Result<(), SaveError>;
}

/// Tracks what the outside world last accepted and when the user last
/// edited. Time is supplied by the hosting shell as milliseconds from any
/// monotonic origin; the session never reads a clock itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveSession {
    last_saved: Option<Design>,
    last_edit_ms: Option<u64>,
    last_saved_ms: Option<u64>,
    last_error: Option<String>,
}

impl SaveSession {
    /// Session for a freshly loaded design, considered saved as-is.
    pub fn mounted(design: &Design) -> Self {
        Self {
            last_saved: Some(design.clone()),
            ..Self::default()
        }
    }

    /// Dirty means the in-memory design differs from the last externally
    /// accepted snapshot.
    pub fn is_dirty(&self, current: &Design) -> bool {
        self.last_saved.as_ref() != Some(current)
    }

    pub fn note_edited(&mut self, now_ms: u64) {
        self.last_edit_ms = Some(now_ms);
    }

    /// True when the design is dirty and no edit happened for the quiet
    /// period. The hosting shell owns the actual timer and calls this on
    /// each tick.
    pub fn autosave_due(&self, current: &Design, now_ms: u64) -> bool {
        if !self.is_dirty(current) {
            return false;
        }
        match self.last_edit_ms {
            Some(edited) => now_ms.saturating_sub(edited) >= AUTOSAVE_QUIET_MS,
            None => false,
        }
    }

    /// Runs a save against the target and folds the outcome into the
    /// session. Failure keeps the design dirty; no rollback happens.
    pub fn save_with(
        &mut self,
        target: &mut dyn SaveTarget,
        design: &Design,
        now_ms: u64,
    ) -> Result<(), SaveError> {
        match target.save(design) {
            Ok(()) => {
                debug!(now_ms, "design saved");
                self.last_saved = Some(design.clone());
                self.last_saved_ms = Some(now_ms);
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                warn!(%err, "save failed; design stays dirty");
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Timestamp of the last accepted save, for the "last saved" indicator.
    pub fn last_saved_ms(&self) -> Option<u64> {
        self.last_saved_ms
    }

    /// Message for the transient save-failure notification, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Escape or navigation away must ask the user first when edits would
    /// be lost.
    pub fn needs_discard_confirmation(&self, current: &Design) -> bool {
        self.is_dirty(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use laurel_core::{Background, BackgroundKind};

    struct FlakyTarget {
        fail: bool,
        saves: usize,
    }

    impl SaveTarget for FlakyTarget {
        fn save(&mut self, _design: &Design) -> Result<(), SaveError> {
            if self.fail {
                Err(SaveError::Transport("connection reset".to_string()))
            } else {
                self.saves += 1;
                Ok(())
            }
        }
    }

    fn edited(design: &Design) -> Design {
        let mut next = design.clone();
        next.background = Background {
            kind: BackgroundKind::Color,
            value: "#123456".to_string(),
            opacity: 1.0,
        };
        next
    }

    #[test]
    fn mounted_design_is_clean() {
        let design = Design::blank();
        let session = SaveSession::mounted(&design);
        assert!(!session.is_dirty(&design));
        assert!(!session.needs_discard_confirmation(&design));
    }

    #[test]
    fn edit_makes_dirty_and_save_clears_it() {
        let design = Design::blank();
        let mut session = SaveSession::mounted(&design);
        let current = edited(&design);
        assert!(session.is_dirty(&current));

        let mut target = FlakyTarget { fail: false, saves: 0 };
        session.save_with(&mut target, &current, 1_000).unwrap();
        assert_eq!(target.saves, 1);
        assert!(!session.is_dirty(&current));
        assert_eq!(session.last_saved_ms(), Some(1_000));
    }

    #[test]
    fn failed_save_keeps_dirty_and_surfaces_error() {
        let design = Design::blank();
        let mut session = SaveSession::mounted(&design);
        let current = edited(&design);

        let mut target = FlakyTarget { fail: true, saves: 0 };
        let result = session.save_with(&mut target, &current, 1_000);
        assert!(result.is_err());
        assert!(session.is_dirty(&current));
        assert_eq!(session.last_error(), Some("save transport failed: connection reset"));

        // retry succeeds and clears the notification
        target.fail = false;
        session.save_with(&mut target, &current, 2_000).unwrap();
        assert!(!session.is_dirty(&current));
        assert_eq!(session.last_error(), None);
    }

    #[test]
    fn autosave_waits_for_the_quiet_period() {
        let design = Design::blank();
        let mut session = SaveSession::mounted(&design);
        let current = edited(&design);
        session.note_edited(10_000);

        assert!(!session.autosave_due(&current, 10_000 + AUTOSAVE_QUIET_MS - 1));
        assert!(session.autosave_due(&current, 10_000 + AUTOSAVE_QUIET_MS));
    }

    #[test]
    fn autosave_never_fires_when_clean() {
        let design = Design::blank();
        let mut session = SaveSession::mounted(&design);
        session.note_edited(10_000);
        assert!(!session.autosave_due(&design, 10_000 + AUTOSAVE_QUIET_MS * 2));
    }

    #[test]
    fn new_edit_restarts_the_quiet_period() {
        let design = Design::blank();
        let mut session = SaveSession::mounted(&design);
        let current = edited(&design);
        session.note_edited(10_000);
        session.note_edited(30_000);
        assert!(!session.autosave_due(&current, 10_000 + AUTOSAVE_QUIET_MS));
        assert!(session.autosave_due(&current, 30_000 + AUTOSAVE_QUIET_MS));
    }
}
