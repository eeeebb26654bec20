mod reducers {
    mod connection;
    pub(crate) mod presence_sweep;
    pub mod update_player;
}
pub mod schema;
pub mod types;
mod utils;

use crate::schema::*;
use spacetimedb::*;

#[reducer(init)]
pub fn init(ctx: &ReducerContext) {
    ctx.db.presence_settings().id().delete(1);
    let settings = ctx.db.presence_settings().insert(PresenceSettings::default());

    // Nobody is connected to a freshly published module.
    let leftover: Vec<Identity> = ctx.db.player().iter().map(|p| p.identity).collect();
    for identity in &leftover {
        ctx.db.player().identity().delete(identity);
    }
    if !leftover.is_empty() {
        log::info!("Cleared {} leftover player row(s)", leftover.len());
    }

    reducers::presence_sweep::init(ctx, &settings);
}
