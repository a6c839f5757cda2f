//! High score persistence
//!
//! A single integer, persisted to LocalStorage in the browser. Storage errors
//! are never surfaced to the game: a failed load reads as 0 and a failed save
//! is logged and dropped.

/// Where the high score lives between sessions
pub trait HighScoreStore {
    /// Stored high score, or 0 if absent/unreadable
    fn load(&self) -> u64;
    /// Persist a new high score (fire-and-forget)
    fn save(&mut self, score: u64);
}

/// Parse a stored value the way it was written; anything else reads as 0
pub fn parse_stored(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

/// In-process store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u64>,
    /// Number of save calls received
    pub saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u64) -> Self {
        Self {
            value: Some(score),
            saves: 0,
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        self.value.unwrap_or(0)
    }

    fn save(&mut self, score: u64) {
        self.value = Some(score);
        self.saves += 1;
    }
}

/// Browser LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "burgerInvadersHighScore";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&self) -> u64 {
        let raw = Self::storage().and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());
        let score = parse_stored(raw.as_deref());
        log::info!("Loaded high score {}", score);
        score
    }

    fn save(&mut self, score: u64) {
        match Self::storage() {
            Some(storage) => {
                if storage
                    .set_item(Self::STORAGE_KEY, &score.to_string())
                    .is_err()
                {
                    log::warn!("Failed to save high score");
                } else {
                    log::info!("High score saved ({})", score);
                }
            }
            None => log::warn!("LocalStorage unavailable, high score not saved"),
        }
    }
}
