use colored::*;

use airfresh_core::airfresh::AirFreshEntity;

use crate::mprint;
use crate::session::Session;
use crate::terminal::{colors, format, print};

pub fn status(session: &mut Session, quiet: u8) -> anyhow::Result<()> {
    print::header("device status", quiet);

    let entities: Vec<&mut AirFreshEntity> = session.hub.select_mut(&session.selection).collect();
    let total: usize = entities.len();

    for (idx, entity) in entities.into_iter().enumerate() {
        match quiet {
            0 | 1 => {
                print::tree_head(idx, entity.name());
                print::as_tree_one_level(format::entity_details(entity));
            }
            _ => print_line(entity),
        }
        if quiet < 2 && idx + 1 != total {
            mprint!();
        }
    }

    Ok(())
}

/// One line summary, used by `-qq` and by `watch`.
pub fn print_line(entity: &AirFreshEntity) {
    let speed: String = entity.speed().map(|s| format!(" {s}")).unwrap_or_default();
    print::print(&format!(
        "{} {}{}",
        entity.entity_id().color(colors::ACCENT),
        format::state_to_colored(entity),
        speed.color(colors::VALUE)
    ));
}
