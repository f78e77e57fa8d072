//! # Hub
//!
//! The part of a home automation host this integration relies on: setting the
//! platform up from config, keeping entities keyed by host, dispatching
//! service calls and polling.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tokio::time::{Interval, MissedTickBehavior};
use tracing::debug;

use airfresh_common::config::{Config, DeviceConfig};
use airfresh_common::utils::slug;
use airfresh_common::{error, info, warn};

use crate::airfresh::services::{DOMAIN, ServiceCall};
use crate::airfresh::{AirFresh, AirFreshEntity};
use crate::error::ServiceError;
use crate::network::{ClientOptions, MiioClient};

pub struct Hub {
    entities: Vec<AirFreshEntity>,
    scan_interval: Duration,
}

impl Hub {
    pub fn new(scan_interval: Duration) -> Self {
        Self {
            entities: Vec::new(),
            scan_interval,
        }
    }

    pub fn scan_interval(&self) -> Duration {
        self.scan_interval
    }

    pub fn entities(&self) -> &[AirFreshEntity] {
        &self.entities
    }

    pub fn entity(&self, entity_id: &str) -> Option<&AirFreshEntity> {
        self.entities.iter().find(|e| e.entity_id() == entity_id)
    }

    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut AirFreshEntity> {
        self.entities.iter_mut()
    }

    /// Entities whose id is in `ids`, or all of them when `ids` is empty.
    pub fn select_mut<'a>(&'a mut self, ids: &'a [String]) -> impl Iterator<Item = &'a mut AirFreshEntity> + 'a {
        self.entities
            .iter_mut()
            .filter(move |e| ids.is_empty() || ids.iter().any(|id| id == e.entity_id()))
    }

    /// Registers an entity under its host, replacing a previous one for the same host.
    pub async fn add_entity(&mut self, mut entity: AirFreshEntity, update_before_add: bool) -> &AirFreshEntity {
        if update_before_add {
            entity.update().await;
        }

        if let Some(pos) = self.entities.iter().position(|e| e.host() == entity.host()) {
            warn!("Replacing the entity configured for {}", entity.host());
            self.entities.remove(pos);
        }

        let entity_id: String = self.unique_entity_id(entity.name());
        entity.set_entity_id(entity_id);
        self.entities.push(entity);

        let index: usize = self.entities.len() - 1;
        &self.entities[index]
    }

    fn unique_entity_id(&self, name: &str) -> String {
        let base: String = format!("{DOMAIN}.{}", slug::slugify(name));
        let taken = |candidate: &str| self.entities.iter().any(|e| e.entity_id() == candidate);

        if !taken(&base) {
            return base;
        }
        (2..)
            .map(|n| format!("{base}_{n}"))
            .find(|candidate| !taken(candidate))
            .unwrap_or(base)
    }

    pub async fn update_all(&mut self) {
        for entity in self.entities.iter_mut() {
            entity.update().await;
        }
    }

    /// Validates and dispatches a service call, then refreshes every targeted entity.
    ///
    /// Returns the ids of the entities the call reached.
    pub async fn call_service(&mut self, service: &str, data: &Value) -> Result<Vec<String>, ServiceError> {
        let call: ServiceCall = ServiceCall::parse(service, data)?;
        Ok(self.dispatch(&call).await)
    }

    pub async fn dispatch(&mut self, call: &ServiceCall) -> Vec<String> {
        let mut handled: Vec<String> = Vec::new();

        for entity in self.entities.iter_mut().filter(|e| call.targets(e.entity_id())) {
            let acknowledged: bool = call.invoke(entity).await;
            debug!("{} on {}: acknowledged={acknowledged}", call.service, entity.entity_id());
            handled.push(entity.entity_id().to_string());
        }

        for entity in self.entities.iter_mut().filter(|e| handled.iter().any(|id| id == e.entity_id())) {
            entity.update().await;
        }

        handled
    }

    /// Polls every entity each `scan_interval` until `shutdown` resolves. An
    /// update still in flight when `shutdown` resolves is dropped.
    ///
    /// The first poll happens one interval after the call; entities are expected
    /// to be fresh from [`Hub::add_entity`].
    pub async fn poll<S, F>(&mut self, shutdown: S, mut on_update: F)
    where
        S: Future<Output = ()>,
        F: FnMut(&AirFreshEntity),
    {
        let mut ticker: Interval = tokio::time::interval(self.scan_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker.tick().await;

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => return,
                _ = ticker.tick() => {}
            }

            // A slow device must not hold up shutdown.
            for entity in self.entities.iter_mut() {
                tokio::select! {
                    _ = &mut shutdown => return,
                    _ = entity.update() => on_update(entity),
                }
            }
        }
    }
}

/// Builds a hub from `config`: one client and one entity per device, each
/// updated before it is added. Devices whose host cannot be resolved are skipped.
pub async fn setup_platform(config: &Config) -> Hub {
    let options = ClientOptions {
        timeout: config.timeout,
        retries: config.retries,
    };
    let mut hub = Hub::new(config.scan_interval);

    for device in &config.devices {
        match connect(device, options).await {
            Ok(entity) => {
                hub.add_entity(entity, true).await;
            }
            Err(e) => error!("Skipping {}: {e}", device.host),
        }
    }

    hub
}

async fn connect(device: &DeviceConfig, options: ClientOptions) -> Result<AirFreshEntity, crate::DeviceError> {
    info!("Initializing with host {} (token {})", device.host, device.token);
    let client: MiioClient = MiioClient::connect(&device.host, device.token, options).await?;
    Ok(AirFreshEntity::new(
        device.name.clone(),
        device.host.clone(),
        device.model,
        AirFresh::new(Box::new(client)),
    ))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
