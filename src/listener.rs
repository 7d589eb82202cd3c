//! Single-occupancy holder for an event listener.
//!
//! The backdrop re-registers its window `resize` handler on every restart.
//! [`ListenerSlot`] keeps at most one handler attached: installing a new one
//! detaches the previous one first, so repeated restarts never stack
//! listeners. The slot is generic over the handler and the attach/detach
//! calls, which keeps it testable without a browser.

#[cfg(test)]
#[path = "listener_test.rs"]
mod listener_test;

#[derive(Debug)]
pub struct ListenerSlot<L> {
    current: Option<L>,
    installs: u64,
}

impl<L> Default for ListenerSlot<L> {
    fn default() -> Self {
        Self { current: None, installs: 0 }
    }
}

impl<L> ListenerSlot<L> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Detach the held listener (if any), then attach and hold `next`.
    ///
    /// The old listener leaves the slot before `detach` runs, so a failed
    /// detach or attach leaves the slot empty rather than holding a handler
    /// whose registration state is unknown.
    ///
    /// # Errors
    ///
    /// Returns the first error from `detach` or `attach`.
    pub fn install<E>(
        &mut self,
        next: L,
        detach: impl FnOnce(&L) -> Result<(), E>,
        attach: impl FnOnce(&L) -> Result<(), E>,
    ) -> Result<(), E> {
        if let Some(old) = self.current.take() {
            detach(&old)?;
        }
        attach(&next)?;
        self.current = Some(next);
        self.installs += 1;
        Ok(())
    }

    #[must_use]
    pub const fn is_installed(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub const fn get(&self) -> Option<&L> {
        self.current.as_ref()
    }

    /// Successful installs over the slot's lifetime.
    #[must_use]
    pub const fn installs(&self) -> u64 {
        self.installs
    }
}
