//! Configuration documents handled by the sync
//!
//! - `document`: reading and rendering third-party JSON configs
//! - `merge`: template -> generated -> override layering
//! - `layers`: locating template and override fragments
//! - `settings`: the optional `sync.toml`

pub mod document;
pub mod layers;
pub mod merge;
pub mod settings;

pub use document::{read_json_map, render_json};
pub use layers::LayerStore;
pub use merge::{deep_merge, deep_merge_maps, merge_layers};
pub use settings::{SyncSettings, TargetSettings, load_settings, parse_settings_str};
