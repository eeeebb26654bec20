mod player_table;
mod presence_settings_table;

pub use player_table::*;
pub use presence_settings_table::*;
