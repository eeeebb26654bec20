use crate::{
    schema::*,
    types::{DbQuat, DbVec3},
};
use shared::presence::validate_pose;
use spacetimedb::{ReducerContext, Table};

/// Publish the caller's transform.
///
/// The pose is validated and its rotation normalized before it is stored. The row is
/// stamped with the reducer's timestamp; clients never supply their own clock.
#[spacetimedb::reducer]
pub fn update_player(
    ctx: &ReducerContext,
    translation: DbVec3,
    rotation: DbQuat,
) -> Result<(), String> {
    let pose = validate_pose(translation.into(), rotation.into()).map_err(|e| e.to_string())?;

    let row = Player {
        identity: ctx.sender,
        translation: pose.translation.into(),
        rotation: pose.rotation.into(),
        last_updated: ctx.timestamp,
    };

    if ctx.db.player().identity().find(ctx.sender).is_some() {
        ctx.db.player().identity().update(row);
    } else {
        log::info!("First transform from {:?}", ctx.sender);
        ctx.db.player().insert(row);
    }

    Ok(())
}
