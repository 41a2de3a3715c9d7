//! Per-activation handshake bookkeeping

/// State of the handshake for the current mode activation
///
/// `overtime` and `confirmed` are never both set: confirming clears
/// overtime, and a confirmed session is never attempted again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandshakeSession {
    awaiting_reply: bool,
    request_sent_at: u64,
    overtime: bool,
    confirmed: bool,
    mismatches: u8,
    finalized_at: Option<u64>,
    write_failing_since: Option<u64>,
}

impl HandshakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything; used when the mode changes
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record that the request byte went out at `now`
    pub fn begin(&mut self, now: u64) {
        self.awaiting_reply = true;
        self.request_sent_at = now;
        self.write_failing_since = None;
    }

    /// The request byte could not be written at `now`
    ///
    /// The first failure starts the overtime clock, so a link that never
    /// accepts the request still expires.
    pub fn write_failed(&mut self, now: u64) {
        self.write_failing_since.get_or_insert(now);
    }

    /// Expected acknowledgement received
    pub fn confirm(&mut self) {
        self.awaiting_reply = false;
        self.overtime = false;
        self.confirmed = true;
        self.mismatches = 0;
    }

    /// Overtime window passed without a reply; the request will be resent
    pub fn expire(&mut self) {
        self.awaiting_reply = false;
        self.overtime = true;
        self.write_failing_since = None;
    }

    /// Unexpected reply; the request will be resent
    pub fn reject(&mut self) {
        self.awaiting_reply = false;
        self.mismatches = self.mismatches.saturating_add(1);
    }

    /// Peer escalated; stop waiting without counting a mismatch
    pub fn abandon(&mut self) {
        self.awaiting_reply = false;
    }

    /// Finalize byte sent at `now`
    pub fn finalize(&mut self, now: u64) {
        self.finalized_at = Some(now);
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    pub fn request_sent_at(&self) -> u64 {
        self.request_sent_at
    }

    /// Start of the window the overtime check runs against
    ///
    /// The send time while a reply is awaited, otherwise the first failed
    /// write of the current attempt.
    pub fn overtime_clock(&self) -> Option<u64> {
        if self.awaiting_reply {
            Some(self.request_sent_at)
        } else {
            self.write_failing_since
        }
    }

    pub fn is_overtime(&self) -> bool {
        self.overtime
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Consecutive mismatched replies since the last confirmation
    pub fn mismatches(&self) -> u8 {
        self.mismatches
    }

    pub fn finalized_at(&self) -> Option<u64> {
        self.finalized_at
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized_at.is_some()
    }
}
