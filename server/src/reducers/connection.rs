//! Connection lifecycle reducers.
//!
//! A client only gets a `Player` row once it publishes a transform, so connecting is
//! just logged. Disconnecting removes the row so peers stop rendering it right away
//! instead of waiting for the stale sweep.

use crate::schema::*;
use spacetimedb::ReducerContext;

#[spacetimedb::reducer(client_connected)]
pub fn identity_connected(ctx: &ReducerContext) {
    log::info!("Client connected: {:?}", ctx.sender);
}

#[spacetimedb::reducer(client_disconnected)]
pub fn identity_disconnected(ctx: &ReducerContext) {
    log::info!("Client disconnected: {:?}", ctx.sender);

    if ctx.db.player().identity().delete(ctx.sender) {
        log::info!("Removed presence row for {:?}", ctx.sender);
    }
}
