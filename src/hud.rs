//! Page-level HUD: which screens, labels and texts change on a phase change
//!
//! Kept free of DOM types; the wasm front end applies the changes by element id.

use crate::sim::GamePhase;

/// One change to a page element, addressed by id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HudChange {
    /// Replace the element's text
    Text(&'static str, String),
    /// Set the element's CSS `display`
    Display(&'static str, &'static str),
}

/// Changes to apply when the game enters `phase`
pub fn phase_changes(phase: GamePhase, score: u32) -> Vec<HudChange> {
    use HudChange::{Display, Text};

    match phase {
        GamePhase::Running => vec![
            Display("startScreen", "none"),
            Display("gameOverScreen", "none"),
            Display("gameClearScreen", "none"),
            Display("controlsInfo", "block"),
            Display("pausedLabel", "none"),
            Text("pauseButton", "Pause".into()),
        ],
        GamePhase::Paused => vec![
            Display("pausedLabel", "flex"),
            Text("pauseButton", "Resume".into()),
        ],
        GamePhase::GameOver => vec![
            Text("finalScore", score.to_string()),
            Display("gameOverScreen", "flex"),
            Display("controlsInfo", "none"),
        ],
        GamePhase::GameClear => vec![
            Text("clearScore", score.to_string()),
            Display("gameClearScreen", "flex"),
            Display("controlsInfo", "none"),
        ],
        GamePhase::Idle => Vec::new(),
    }
}
