use meditime_core::storage;

use super::common;

pub fn run(yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        println!("This clears all meditation history, timer settings, and the theme preference.");
        println!("Re-run with --yes to confirm.");
        return Ok(());
    }

    let storage = common::open_storage();
    storage::clear_all(&*storage)?;
    println!("All data cleared.");
    Ok(())
}
