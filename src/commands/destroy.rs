//! Delete all duster state for this directory

use std::fs;

use duster::confirm::Confirm;
use duster::error::Result;
use duster::paths;

/// Remove the state directory (config, ignore list, and every warehouse
/// box) after the gate confirms. Refusal is a clean no-op.
pub fn destroy(gate: &mut dyn Confirm) -> Result<()> {
    let state = paths::state_dir();
    if !state.exists() {
        println!("Nothing to destroy (\"{}\" does not exist)", paths::STATE_DIR);
        return Ok(());
    }

    let prompt = format!(
        "Delete \"{}\" and every quarantined entry inside it?",
        paths::STATE_DIR
    );
    if !gate.confirm(&prompt)? {
        println!("Canceled");
        return Ok(());
    }

    fs::remove_dir_all(&state)?;
    println!("Removed \"{}\"", paths::STATE_DIR);
    Ok(())
}
