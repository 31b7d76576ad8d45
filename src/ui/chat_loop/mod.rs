//! The session loop.
//!
//! One iteration: draw if anything changed, take at most one keypress and
//! handle it to completion, then sleep for the loop interval. Requests and
//! playback are awaited inline, so keys pressed meanwhile wait in the
//! keypad's buffer.

pub mod lifecycle;

use tracing::info;

use crate::core::app::ChatSession;
use crate::core::constants::LOOP_INTERVAL;
use crate::ui::display::{DisplayError, DisplaySurface, Scene};
use crate::ui::keypad::KeypressSource;

pub use lifecycle::{restore_terminal, setup_terminal, TerminalSurface};

pub async fn run_session<K, D>(
    session: &mut ChatSession,
    keypad: &mut K,
    display: &mut D,
) -> Result<(), DisplayError>
where
    K: KeypressSource + ?Sized,
    D: DisplaySurface + ?Sized,
{
    loop {
        if session.ui.needs_redraw {
            display.render(&Scene::compose(session))?;
            session.ui.needs_redraw = false;
        }

        if keypad.is_closed() {
            info!("Keypad closed; ending session");
            return Ok(());
        }

        if let Some(key) = keypad.next_keypress() {
            session.on_keypress(key).await;
        }

        tokio::time::sleep(LOOP_INTERVAL).await;
    }
}
