use serde::Deserialize;

/// Main configuration structure for quiz-harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub browser: BrowserSettings,
    #[serde(default)]
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Entry page hosting the testing widget
    #[serde(rename = "entry-url")]
    pub entry_url: String,

    /// `data-subject` value of the program to drill into from the entry menu
    pub subject: String,
}

/// Chrome launch options
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserSettings {
    /// Run Chrome without a visible window
    #[serde(default = "default_headless")]
    pub headless: bool,

    #[serde(rename = "window-width", default = "default_window_width")]
    pub window_width: u32,

    #[serde(rename = "window-height", default = "default_window_height")]
    pub window_height: u32,
}

/// Crawl pacing configuration
///
/// Every wait in the navigation driver is bounded by one of these intervals.
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Bounded wait for a single expected element (milliseconds)
    #[serde(rename = "element-timeout-ms", default = "default_element_timeout")]
    pub element_timeout_ms: u64,

    /// Bounded wait for the initial menu after entry navigation (milliseconds)
    #[serde(rename = "root-timeout-ms", default = "default_root_timeout")]
    pub root_timeout_ms: u64,

    /// Fixed settle interval after a forced click (milliseconds)
    #[serde(rename = "settle-ms", default = "default_settle")]
    pub settle_ms: u64,

    /// Pause after a menu transition (milliseconds)
    #[serde(rename = "menu-pause-ms", default = "default_menu_pause")]
    pub menu_pause_ms: u64,

    /// Pause after starting a quiz, before extraction (milliseconds)
    #[serde(rename = "quiz-pause-ms", default = "default_quiz_pause")]
    pub quiz_pause_ms: u64,

    /// Cooldown between work units (milliseconds)
    #[serde(rename = "unit-cooldown-ms", default = "default_unit_cooldown")]
    pub unit_cooldown_ms: u64,
}

/// Output file paths
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the progress record (completed unit keys)
    #[serde(rename = "progress-path")]
    pub progress_path: String,

    /// Path to the incremental question snapshot
    #[serde(rename = "snapshot-path")]
    pub snapshot_path: String,

    /// Path to the final JSON export
    #[serde(rename = "json-path")]
    pub json_path: String,

    /// Path to the human-readable transcript
    #[serde(rename = "transcript-path")]
    pub transcript_path: String,

    /// Path to the flat CSV export
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

fn default_headless() -> bool {
    true
}

fn default_window_width() -> u32 {
    1920
}

fn default_window_height() -> u32 {
    1080
}

fn default_element_timeout() -> u64 {
    10_000
}

fn default_root_timeout() -> u64 {
    20_000
}

fn default_settle() -> u64 {
    1_000
}

fn default_menu_pause() -> u64 {
    2_000
}

fn default_quiz_pause() -> u64 {
    3_000
}

fn default_unit_cooldown() -> u64 {
    2_000
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: default_headless(),
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            element_timeout_ms: default_element_timeout(),
            root_timeout_ms: default_root_timeout(),
            settle_ms: default_settle(),
            menu_pause_ms: default_menu_pause(),
            quiz_pause_ms: default_quiz_pause(),
            unit_cooldown_ms: default_unit_cooldown(),
        }
    }
}
