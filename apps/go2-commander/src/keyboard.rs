use anyhow::Result;
use motion_sequencer::StopSignal;
use std::io::Read;
use std::thread;
use tracing::{debug, info};

const ESCAPE: u8 = 0x1b;

/// Raise `stop` when an Escape byte shows up on standard input.
///
/// Reading stdin blocks, so this runs on its own detached thread; the process
/// exits without joining it.
pub fn watch_escape(stop: &StopSignal) -> Result<()> {
    let stop = stop.clone();
    thread::Builder::new()
        .name("escape-watcher".to_string())
        .spawn(move || watch_reader(std::io::stdin().lock(), &stop))?;
    Ok(())
}

/// Returns whether Escape was seen before end of input.
fn watch_reader<R: Read>(mut reader: R, stop: &StopSignal) -> bool {
    let mut buf = [0u8; 64];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => {
                debug!("stdin closed, escape watcher exiting");
                return false;
            }
            Ok(n) if buf[..n].contains(&ESCAPE) => {
                info!("Escape pressed, exiting...");
                stop.raise();
                return true;
            }
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => {
                debug!("stdin read failed: {e}");
                return false;
            }
        }
    }
}
