use futures::StreamExt;
use k8s_openapi::api::core::v1::ConfigMap;
use kube::{
    api::{Api, DeleteParams, ListParams, Patch, PatchParams},
    client::Client,
    runtime::{
        controller::{Action, Controller},
        watcher::Config,
    },
    ResourceExt,
};
use std::sync::Arc;
use tokio::time::Duration;
use tracing::{debug, error, info};

use crate::{
    cluster_config::{ConsoleConfig, Infrastructure},
    config_map::{self, ConfigMapSources},
    console_plugin::{self, ConsolePlugin},
    constants,
    context_data::ContextData,
    model::Error,
    operator_console::Console,
    route::{self, Route},
    utils,
};

/// Action to be taken upon the operator `Console` resource during reconciliation
#[derive(Debug, PartialEq, Eq)]
enum ConsoleAction {
    /// Recompute the console ConfigMaps and re-apply them when they drifted
    Sync,
    /// Remove the published console configuration
    Remove,
    /// The operator is not in charge of the console resources
    NoOp,
}

fn determine_action(console: &Console) -> ConsoleAction {
    if console.name_any() != constants::OPERATOR_CONFIG_NAME || console.is_unmanaged() {
        ConsoleAction::NoOp
    } else if console.is_removed() {
        ConsoleAction::Remove
    } else {
        ConsoleAction::Sync
    }
}

async fn reconciler(console: Arc<Console>, context: Arc<ContextData>) -> Result<Action, Error> {
    match determine_action(&console) {
        ConsoleAction::Sync => sync_config_maps(&console, &context).await?,
        ConsoleAction::Remove => remove_config_maps(context.client.clone()).await?,
        ConsoleAction::NoOp => debug!("Console {} is not managed, skipping", console.name_any()),
    }
    Ok(Action::requeue(Duration::from_secs(constants::RECONCILE_FREQUENCY)))
}

/// Actions to be taken when a reconciliation fails - for whatever reason.
/// Logs the error and requeues the resource for another reconciliation.
pub fn on_error(console: Arc<Console>, error: &Error, _context: Arc<ContextData>) -> Action {
    error!("[Console] Reconciliation error on {}: {:?}", console.name_any(), error);
    Action::requeue(Duration::from_secs(constants::RECONCILE_FREQUENCY))
}

/// Gathers the inputs from the cluster, synthesizes the console ConfigMaps and applies them
async fn sync_config_maps(console: &Console, context: &ContextData) -> Result<(), Error> {
    let client = context.client.clone();
    let console_config = Api::<ConsoleConfig>::all(client.clone())
        .get(constants::OPERATOR_CONFIG_NAME)
        .await?;
    let infrastructure = Api::<Infrastructure>::all(client.clone())
        .get_opt(constants::OPERATOR_CONFIG_NAME)
        .await?;
    let managed_config = Api::<ConfigMap>::namespaced(client.clone(), constants::OPENSHIFT_CONFIG_MANAGED_NAMESPACE)
        .get_opt(constants::OPENSHIFT_CONSOLE_CONFIG_MAP_NAME)
        .await?;
    let oauth_serving_cert = Api::<ConfigMap>::namespaced(client.clone(), constants::OPENSHIFT_CONSOLE_NAMESPACE)
        .get_opt(constants::OAUTH_SERVING_CERT_CONFIG_MAP_NAME)
        .await?;

    let route_api: Api<Route> = Api::namespaced(client.clone(), constants::OPENSHIFT_CONSOLE_NAMESPACE);
    let custom_route = route_api.get_opt(constants::OPENSHIFT_CONSOLE_CUSTOM_ROUTE_NAME).await?;
    let default_route = route_api.get_opt(constants::OPENSHIFT_CONSOLE_ROUTE_NAME).await?;
    let active_route = route::active_route(custom_route, default_route).ok_or_else(|| {
        Error::ResourceNotFound(format!(
            "route {}/{}",
            constants::OPENSHIFT_CONSOLE_NAMESPACE,
            constants::OPENSHIFT_CONSOLE_ROUTE_NAME
        ))
    })?;

    let registered_plugins = Api::<ConsolePlugin>::all(client.clone())
        .list(&ListParams::default())
        .await?
        .items;
    let available_plugins = console_plugin::enabled_plugins(&registered_plugins, &console.spec.plugins);

    let sources = ConfigMapSources {
        operator_config: console,
        console_config: &console_config,
        managed_config: managed_config.as_ref(),
        infrastructure_config: infrastructure.as_ref(),
        active_console_route: &active_route,
        use_default_ca_file: use_default_ca_file(oauth_serving_cert.as_ref()),
        inactivity_timeout_seconds: context.config.inactivity_timeout_seconds,
        available_plugins: &available_plugins,
        managed_cluster_config_file: context.config.managed_cluster_config_file.as_deref(),
        release_version: context.config.release_version.as_deref(),
    };
    let (console_config_map, overrides_merged) = config_map::default_config_map(&sources)?;
    if overrides_merged {
        info!("Unsupported config overrides merged into {}", constants::OPENSHIFT_CONSOLE_CONFIG_MAP_NAME);
    }
    apply_config_map(client.clone(), &console_config_map).await?;

    let public_config_map = config_map::default_public_config(&utils::https(&active_route.host()))?;
    apply_config_map(client, &public_config_map).await
}

/// Deletes the console ConfigMap and empties the public one
async fn remove_config_maps(client: Client) -> Result<(), Error> {
    let api: Api<ConfigMap> = Api::namespaced(client.clone(), constants::OPENSHIFT_CONSOLE_NAMESPACE);
    let name = constants::OPENSHIFT_CONSOLE_CONFIG_MAP_NAME;
    if api.get_opt(name).await?.is_some() {
        api.delete(name, &DeleteParams::default()).await?;
        info!("ConfigMap {name} successfully deleted");
    } else {
        debug!("ConfigMap {name} already deleted");
    }
    apply_config_map(client, &config_map::empty_public_config()?).await
}

/// Server side applies `desired` unless the live object already matches it
async fn apply_config_map(client: Client, desired: &ConfigMap) -> Result<(), Error> {
    let name = desired.name_any();
    let namespace = desired
        .namespace()
        .unwrap_or_else(|| constants::OPENSHIFT_CONSOLE_NAMESPACE.to_owned());
    let api: Api<ConfigMap> = Api::namespaced(client, &namespace);
    let live = api.get_opt(&name).await?;
    if !needs_update(live.as_ref(), desired) {
        debug!("ConfigMap {namespace}/{name} is up to date");
        return Ok(());
    }
    let patch_params = PatchParams::apply(constants::OPERATOR_FIELD_MANAGER).force();
    api.patch(&name, &patch_params, &Patch::Apply(desired)).await?;
    info!("ConfigMap {namespace}/{name} applied");
    Ok(())
}

/// A ConfigMap has drifted when its data differs or it lost one of the desired owner references
fn needs_update(live: Option<&ConfigMap>, desired: &ConfigMap) -> bool {
    let Some(live) = live else {
        return true;
    };
    if live.data.clone().unwrap_or_default() != desired.data.clone().unwrap_or_default() {
        return true;
    }
    let live_owners = live.owner_references();
    desired
        .owner_references()
        .iter()
        .any(|owner| !live_owners.iter().any(|live_owner| live_owner.uid == owner.uid && live_owner.kind == owner.kind))
}

/// The service account CA is used unless the OAuth serving certificate bundle is published
fn use_default_ca_file(oauth_serving_cert: Option<&ConfigMap>) -> bool {
    !oauth_serving_cert
        .and_then(|config_map| config_map.data.as_ref())
        .and_then(|data| data.get(constants::OAUTH_SERVING_CERT_CA_BUNDLE_KEY))
        .map_or(false, |ca_bundle| !ca_bundle.is_empty())
}

/// Initialize the controller
pub async fn run(client: Client, context_data: Arc<ContextData>) {
    let owned_api: Api<Console> = Api::<Console>::all(client.clone());
    let config_map = Api::<ConfigMap>::namespaced(client.clone(), constants::OPENSHIFT_CONSOLE_NAMESPACE);

    Controller::new(owned_api, Config::default())
        .owns(config_map, Config::default())
        .shutdown_on_signal()
        .run(reconciler, on_error, context_data)
        .for_each(|reconciliation_result| async move {
            match reconciliation_result {
                Ok(_console_resource) => {}
                Err(reconciliation_err) => {
                    let err_string = reconciliation_err.to_string();
                    if !err_string.contains("that was not found in local store") {
                        // https://github.com/kube-rs/kube/issues/712
                        error!("[Console] Reconciliation error: {:?}", reconciliation_err)
                    }
                }
            }
        })
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator_console::{ConsoleSpec, ManagementState};
    use std::collections::BTreeMap;

    fn console(name: &str, management_state: ManagementState) -> Console {
        Console::new(
            name,
            ConsoleSpec {
                management_state,
                ..ConsoleSpec::default()
            },
        )
    }

    fn config_map(data: &[(&str, &str)]) -> ConfigMap {
        ConfigMap {
            data: Some(data.iter().map(|(key, value)| (key.to_string(), value.to_string())).collect()),
            ..ConfigMap::default()
        }
    }

    #[test]
    fn test_determine_action() {
        assert_eq!(determine_action(&console("cluster", ManagementState::Managed)), ConsoleAction::Sync);
        assert_eq!(determine_action(&console("cluster", ManagementState::Force)), ConsoleAction::Sync);
        assert_eq!(determine_action(&console("cluster", ManagementState::Unmanaged)), ConsoleAction::NoOp);
        assert_eq!(determine_action(&console("cluster", ManagementState::Removed)), ConsoleAction::Remove);
        assert_eq!(determine_action(&console("other", ManagementState::Managed)), ConsoleAction::NoOp);
    }

    #[test]
    fn test_needs_update_when_data_drifted() {
        let desired = config_map(&[("console-config.yaml", "kind: ConsoleConfig\n")]);
        let patched = config_map(&[("console-config.yaml", "test")]);
        assert!(needs_update(None, &desired));
        assert!(needs_update(Some(&patched), &desired));
        assert!(!needs_update(Some(&desired.clone()), &desired));
    }

    #[test]
    fn test_needs_update_when_owner_lost() {
        let mut owner = console("cluster", ManagementState::Managed);
        owner.metadata.uid = Some("uid".to_owned());
        let live = config_map(&[("console-config.yaml", "kind: ConsoleConfig\n")]);
        let mut desired = live.clone();
        utils::add_owner_ref(&mut desired, utils::owner_ref_from(&owner));
        assert!(needs_update(Some(&live), &desired));
        assert!(!needs_update(Some(&desired.clone()), &desired));
    }

    #[test]
    fn test_use_default_ca_file() {
        assert!(use_default_ca_file(None));
        assert!(use_default_ca_file(Some(&config_map(&[("ca-bundle.crt", "")]))));
        assert!(!use_default_ca_file(Some(&config_map(&[("ca-bundle.crt", "-----BEGIN CERTIFICATE-----")]))));
        assert!(use_default_ca_file(Some(&ConfigMap {
            data: Some(BTreeMap::new()),
            ..ConfigMap::default()
        })));
    }
}
