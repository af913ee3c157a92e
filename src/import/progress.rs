//! Progress reporting for a running import.

/// Counts completed work units and reports the running fraction to a
/// callback.
///
/// The fraction is `completed / total`, so the final unit reports exactly
/// `1.0`. With a total of zero the callback is never invoked.
pub struct Progress<'a> {
    total: u64,
    completed: u64,
    callback: &'a mut dyn FnMut(f32),
}

impl<'a> Progress<'a> {
    pub fn new(total: u64, callback: &'a mut dyn FnMut(f32)) -> Self {
        Self { total, completed: 0, callback }
    }

    /// Completes one unit and reports the new fraction.
    pub fn advance(&mut self) {
        if self.total == 0 {
            return;
        }
        self.completed += 1;
        (self.callback)(self.completed as f32 / self.total as f32);
    }
}
