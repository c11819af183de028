use crate::model::Project;
use std::fs;
use std::io;

impl Project {
    /// Checks the project's build outputs for changes since the last check.
    ///
    /// Returns `true` when any tracked artifact's modification time differs
    /// from the recorded one. The recorded clock is brought up to date with
    /// disk for every artifact, changed or not, so a `false` result means the
    /// recorded state already equals disk state.
    ///
    /// A failed stat (artifact missing, e.g. mid-build or after a failed
    /// build) propagates; the caller skips this project and retries on the
    /// next trigger with the clock untouched for the remaining artifacts,
    /// so staleness is assumed resolved then.
    pub fn refresh_outputs(&mut self) -> io::Result<bool> {
        let mut changed = false;
        for (path, recorded) in self.output_files.iter_mut() {
            let modified = fs::metadata(path)?.modified()?;
            if *recorded != modified {
                *recorded = modified;
                changed = true;
            }
        }
        Ok(changed)
    }
}
