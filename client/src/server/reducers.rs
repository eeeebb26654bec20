use crate::module_bindings::{DbQuat, DbVec3, Reducer};
use bevy::prelude::*;
use bevy_spacetimedb::{ReadReducerMessage, RegisterReducerMessage};
use spacetimedb_sdk::{ReducerEvent, Status};

#[derive(Debug, RegisterReducerMessage)]
pub struct UpdatePlayer {
    pub event: ReducerEvent<Reducer>,
    pub translation: DbVec3,
    pub rotation: DbQuat,
}

/// The module refuses poses it can't store (non-finite, degenerate rotation, out of bounds).
pub(super) fn log_rejected_updates(mut messages: ReadReducerMessage<UpdatePlayer>) {
    for message in messages.read() {
        match &message.result.event.status {
            Status::Committed => {}
            Status::Failed(reason) => warn!("update_player rejected: {reason}"),
            other => warn!("update_player did not commit: {other:?}"),
        }
    }
}
