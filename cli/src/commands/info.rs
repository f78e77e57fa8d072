use airfresh_common::error;

use crate::mprint;
use crate::session::Session;
use crate::terminal::{format, print};

pub async fn info(session: &mut Session, quiet: u8) -> anyhow::Result<()> {
    print::header("device info", quiet);

    let mut failed: usize = 0;
    let mut idx: usize = 0;

    for entity in session.hub.select_mut(&session.selection) {
        if idx > 0 {
            mprint!();
        }
        match entity.info().await {
            Ok(info) => {
                print::tree_head(idx, entity.name());
                print::as_tree_one_level(format::info_details(&info));
            }
            Err(e) => {
                failed += 1;
                error!("{}: {e}", entity.entity_id());
            }
        }
        idx += 1;
    }

    if failed > 0 {
        anyhow::bail!("{failed} device(s) did not answer miIO.info");
    }
    Ok(())
}
