pub mod reducers;
pub mod types;

use crate::{
    config::ClientArgs,
    module_bindings::{DbConnection, PlayerTableAccess, PresenceSettingsTableAccess, RemoteTables},
};
use bevy::prelude::*;
use bevy_spacetimedb::{ReadStdbConnectedMessage, StdbConnection, StdbPlugin};
use reducers::*;
use spacetimedb_sdk::Identity;

pub type SpacetimeDB<'a> = Res<'a, StdbConnection<DbConnection>>;

/// Identity of this client once the module has accepted the connection.
#[derive(Resource, Default)]
pub struct ServerSession {
    pub identity: Option<Identity>,
}

pub fn is_connected(session: Res<ServerSession>) -> bool {
    session.identity.is_some()
}

pub(super) fn plugin(app: &mut App) {
    let args = app
        .world()
        .get_resource::<ClientArgs>()
        .cloned()
        .unwrap_or_default();

    let stdb_plugin = StdbPlugin::default()
        .with_uri(args.uri.clone())
        .with_module_name(args.module_name.clone());

    let stdb_plugin = match args.resolve_token() {
        Ok(Some(token)) => {
            info!("Using JWT from CLI/ENV for SpacetimeDB connection.");
            stdb_plugin.with_token(token)
        }
        Ok(None) => {
            warn!("No JWT provided via CLI/ENV; identity will be ephemeral for this run.");
            stdb_plugin
        }
        Err(err) => {
            error!("{err}; connecting with an ephemeral identity.");
            stdb_plugin
        }
    };

    info!("Connecting to {} / {}", args.uri, args.module_name);

    app.add_plugins(
        stdb_plugin
            .add_reducer::<UpdatePlayer>()
            .add_table(RemoteTables::player)
            .add_table(RemoteTables::presence_settings)
            .with_run_fn(DbConnection::run_threaded),
    );
    app.init_resource::<ServerSession>();
    app.add_systems(Update, (on_connect, reducers::log_rejected_updates));
}

fn on_connect(
    mut messages: ReadStdbConnectedMessage,
    mut session: ResMut<ServerSession>,
    stdb: SpacetimeDB,
) {
    for message in messages.read() {
        info!("SpacetimeDB module connected: {:?}", message.identity);
        session.identity = Some(message.identity);

        stdb.subscription_builder().subscribe(vec![
            "SELECT * FROM player",
            "SELECT * FROM presence_settings",
        ]);
    }
}
