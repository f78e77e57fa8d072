//! `on`, `off` and `speed`.

use airfresh_common::{error, success, warn};
use airfresh_core::ServiceError;
use airfresh_core::airfresh::AirFreshEntity;

use crate::session::Session;

pub enum Action {
    On(Option<String>),
    Off,
    Speed(String),
}

impl Action {
    async fn apply(&self, entity: &mut AirFreshEntity) -> Result<bool, ServiceError> {
        match self {
            Action::On(speed) => entity.turn_on(speed.as_deref()).await,
            Action::Off => Ok(entity.turn_off().await),
            Action::Speed(speed) => entity.set_speed(speed).await,
        }
    }

    fn describe(&self) -> String {
        match self {
            Action::On(Some(speed)) => format!("turned on in {speed}"),
            Action::On(None) => "turned on".to_string(),
            Action::Off => "turned off".to_string(),
            Action::Speed(speed) => format!("set to {speed}"),
        }
    }
}

pub async fn control(session: &mut Session, action: Action) -> anyhow::Result<()> {
    let mut failed: usize = 0;

    for entity in session.hub.select_mut(&session.selection) {
        match action.apply(entity).await {
            Ok(true) => success!("{} {}", entity.entity_id(), action.describe()),
            Ok(false) => {
                failed += 1;
                warn!("{} did not acknowledge", entity.entity_id());
            }
            // A bad speed is the same for every entity.
            Err(e @ ServiceError::InvalidSpeed(_)) => return Err(e.into()),
            Err(e) => {
                failed += 1;
                error!("{}: {e}", entity.entity_id());
            }
        }
        entity.update().await;
    }

    if failed > 0 {
        anyhow::bail!("{failed} device(s) failed");
    }
    Ok(())
}
