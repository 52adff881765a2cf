use serde::{Deserialize, Serialize};

/// Root configuration container.
///
/// Every threshold the interaction core uses is product tuning, so all of
/// them live here rather than as constants next to the code that reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub swipe_back: SwipeBackConfig,
    #[serde(default)]
    pub sheet: SheetConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
}

/// Pointer classification thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Displacement below which a session stays a tap candidate (default: 8).
    #[serde(default = "default_move_threshold_px")]
    pub move_threshold_px: f64,
    /// Longest press that can still count as a tap (default: 160).
    #[serde(default = "default_tap_window_ms")]
    pub tap_window_ms: u64,
    /// Stationary hold that becomes a long press (default: 400).
    #[serde(default = "default_long_press_ms")]
    pub long_press_ms: u64,
    /// Peak instantaneous velocity a tap may reach, px/ms (default: 16.0).
    /// Must be at least twice `move_threshold_px` per ms: two samples inside
    /// the threshold one millisecond apart are still a tap.
    #[serde(default = "default_tap_max_velocity")]
    pub tap_max_velocity: f64,
    /// Dominant-axis travel needed before a swipe fires (default: 30).
    #[serde(default = "default_swipe_min_distance_px")]
    pub swipe_min_distance_px: f64,
    /// Ratio one axis must exceed the other by to win (default: 1.5).
    #[serde(default = "default_axis_dominance")]
    pub axis_dominance: f64,
}

/// Swipe-to-go-back tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwipeBackConfig {
    /// Horizontal travel that maps to progress 1.0 (default: 320).
    #[serde(default = "default_commit_distance_px")]
    pub commit_distance_px: f64,
    /// Progress past which release pops the frame (default: 0.4).
    #[serde(default = "default_commit_progress")]
    pub commit_progress: f64,
    /// Release velocity that pops regardless of progress, px/ms (default: 0.5).
    #[serde(default = "default_fling_velocity")]
    pub fling_velocity: f64,
    /// Duration of the settle animation after release (default: 220).
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    /// How far the frame beneath sits inward at progress 0 (default: 96).
    #[serde(default = "default_parallax_shift_px")]
    pub parallax_shift_px: f64,
    /// Shade over the frame beneath at progress 0 (default: 0.35).
    #[serde(default = "default_underlay_max_shade")]
    pub underlay_max_shade: f64,
}

/// Transient sheet timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Delay before the visible flag flips, roughly two frames (default: 32).
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,
    /// Exit animation length; content is cleared after it (default: 300).
    #[serde(default = "default_exit_duration_ms")]
    pub exit_duration_ms: u64,
    /// Drag distance that commits a swipe-to-dismiss (default: 120).
    #[serde(default = "default_dismiss_distance_px")]
    pub dismiss_distance_px: f64,
    /// Backdrop opacity with the sheet fully open (default: 0.5).
    #[serde(default = "default_backdrop_max_opacity")]
    pub backdrop_max_opacity: f64,
}

/// Section layout and navigation timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Tab sections, in display order.
    #[serde(default = "default_sections")]
    pub sections: Vec<String>,
    /// Section active on startup. Must be listed in `sections`.
    #[serde(default = "default_section")]
    pub default_section: String,
    /// Delay of the re-render tick scheduled after a push (default: 16).
    #[serde(default = "default_entry_tick_ms")]
    pub entry_tick_ms: u64,
    /// Query parameter carrying a deep-linked item id (default: "item").
    #[serde(default = "default_deep_link_param")]
    pub deep_link_param: String,
}

fn default_move_threshold_px() -> f64 {
    8.0
}

fn default_tap_window_ms() -> u64 {
    160
}

fn default_long_press_ms() -> u64 {
    400
}

fn default_tap_max_velocity() -> f64 {
    16.0
}

fn default_swipe_min_distance_px() -> f64 {
    30.0
}

fn default_axis_dominance() -> f64 {
    1.5
}

fn default_commit_distance_px() -> f64 {
    320.0
}

fn default_commit_progress() -> f64 {
    0.4
}

fn default_fling_velocity() -> f64 {
    0.5
}

fn default_settle_ms() -> u64 {
    220
}

fn default_parallax_shift_px() -> f64 {
    96.0
}

fn default_underlay_max_shade() -> f64 {
    0.35
}

fn default_reveal_delay_ms() -> u64 {
    32
}

fn default_exit_duration_ms() -> u64 {
    300
}

fn default_dismiss_distance_px() -> f64 {
    120.0
}

fn default_backdrop_max_opacity() -> f64 {
    0.5
}

fn default_sections() -> Vec<String> {
    ["home", "search", "sell", "wallet", "profile"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_section() -> String {
    "home".to_string()
}

fn default_entry_tick_ms() -> u64 {
    16
}

fn default_deep_link_param() -> String {
    "item".to_string()
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            move_threshold_px: default_move_threshold_px(),
            tap_window_ms: default_tap_window_ms(),
            long_press_ms: default_long_press_ms(),
            tap_max_velocity: default_tap_max_velocity(),
            swipe_min_distance_px: default_swipe_min_distance_px(),
            axis_dominance: default_axis_dominance(),
        }
    }
}

impl Default for SwipeBackConfig {
    fn default() -> Self {
        Self {
            commit_distance_px: default_commit_distance_px(),
            commit_progress: default_commit_progress(),
            fling_velocity: default_fling_velocity(),
            settle_ms: default_settle_ms(),
            parallax_shift_px: default_parallax_shift_px(),
            underlay_max_shade: default_underlay_max_shade(),
        }
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: default_reveal_delay_ms(),
            exit_duration_ms: default_exit_duration_ms(),
            dismiss_distance_px: default_dismiss_distance_px(),
            backdrop_max_opacity: default_backdrop_max_opacity(),
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            default_section: default_section(),
            entry_tick_ms: default_entry_tick_ms(),
            deep_link_param: default_deep_link_param(),
        }
    }
}
