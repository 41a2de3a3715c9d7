//! Single handshake step

use vigil_hal::Uart;
use vigil_protocol::Message;

use super::session::HandshakeSession;
use crate::error::Error;
use crate::state::Mode;

/// Unsolicited reply that moves the panel to another mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Escalation {
    /// Byte that triggers the escalation when seen instead of the reply
    pub trigger: Message,
    /// Mode the state machine should move to
    pub to: Mode,
}

/// Request/reply pair of one mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Exchange {
    pub request: Message,
    pub reply: Message,
    pub escalation: Option<Escalation>,
}

/// Result of one [`attempt`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Request outstanding (or just sent)
    Pending,
    /// Expected reply received, or already confirmed earlier
    Confirmed,
    /// No reply within the overtime window; resent next time
    Overtime,
    /// Wrong reply; carries the consecutive mismatch count. Resent next time.
    Mismatch(u8),
    /// Peer asked for another mode; the caller performs the transition
    PeerEscalation(Mode),
}

impl Outcome {
    /// True for outcomes that still wait on the peer
    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::Pending | Outcome::Mismatch(_))
    }
}

/// Advance the handshake by one step
///
/// At most one byte is written or read per call:
///
/// 1. Nothing outstanding: send the request and start the overtime window.
/// 2. A byte is waiting: consume it and compare against the exchange.
/// 3. The window has passed: mark overtime so the request is resent.
///
/// A serial error is returned after the overtime check, so a link that keeps
/// failing still ends up in overtime. Otherwise the session is unchanged and
/// the same step is retried on the next call.
pub fn attempt<S: Uart>(
    session: &mut HandshakeSession,
    serial: &mut S,
    exchange: &Exchange,
    now: u64,
    overtime_ms: u64,
) -> Result<Outcome, Error> {
    if session.is_confirmed() {
        return Ok(Outcome::Confirmed);
    }

    if !session.is_awaiting_reply() {
        if serial.write_byte(exchange.request.to_byte()).is_err() {
            session.write_failed(now);
            expire_if_late(session, now, overtime_ms);
            return Err(Error::SerialWrite);
        }
        session.begin(now);
        return Ok(Outcome::Pending);
    }

    let received = match serial.try_read_byte() {
        Ok(received) => received,
        Err(_) => {
            expire_if_late(session, now, overtime_ms);
            return Err(Error::SerialRead);
        }
    };

    if let Some(byte) = received {
        if exchange.reply == byte {
            session.confirm();
            return Ok(Outcome::Confirmed);
        }
        if let Some(escalation) = exchange.escalation.filter(|e| e.trigger == byte) {
            session.abandon();
            return Ok(Outcome::PeerEscalation(escalation.to));
        }
        session.reject();
        return Ok(Outcome::Mismatch(session.mismatches()));
    }

    if expire_if_late(session, now, overtime_ms) {
        return Ok(Outcome::Overtime);
    }

    Ok(Outcome::Pending)
}

/// Expire the session once strictly more than `overtime_ms` has passed
fn expire_if_late(session: &mut HandshakeSession, now: u64, overtime_ms: u64) -> bool {
    match session.overtime_clock() {
        Some(since) if now.saturating_sub(since) > overtime_ms => {
            session.expire();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_hal::mock::SerialLine;

    const OVERTIME: u64 = 5_000;

    const MONITOR: Exchange = Exchange {
        request: Message::MonitorRequest,
        reply: Message::MonitorAck,
        escalation: Some(Escalation {
            trigger: Message::PanicAck,
            to: Mode::Panic,
        }),
    };

    const OFF: Exchange = Exchange {
        request: Message::OffRequest,
        reply: Message::OffAck,
        escalation: None,
    };

    #[test]
    fn test_first_attempt_sends_request() {
        let line = SerialLine::new();
        let mut port = line.port();
        let mut session = HandshakeSession::new();

        let outcome = attempt(&mut session, &mut port, &MONITOR, 100, OVERTIME);
        assert_eq!(outcome, Ok(Outcome::Pending));
        assert_eq!(line.sent().as_slice(), b"m");
        assert!(session.is_awaiting_reply());
        assert_eq!(session.request_sent_at(), 100);
    }

    #[test]
    fn test_request_not_repeated_while_waiting() {
        let line = SerialLine::new();
        let mut port = line.port();
        let mut session = HandshakeSession::new();

        for now in [0, 1_000, 4_000, 5_000] {
            assert_eq!(
                attempt(&mut session, &mut port, &MONITOR, now, OVERTIME),
                Ok(Outcome::Pending)
            );
        }
        assert_eq!(line.sent_count(b'm'), 1);
    }

    #[test]
    fn test_expected_reply_confirms() {
        let line = SerialLine::new();
        let mut port = line.port();
        let mut session = HandshakeSession::new();

        attempt(&mut session, &mut port, &OFF, 0, OVERTIME).unwrap();
        line.inject(b'O');
        assert_eq!(
            attempt(&mut session, &mut port, &OFF, 20, OVERTIME),
            Ok(Outcome::Confirmed)
        );
        assert!(session.is_confirmed());

        // Confirmed sessions do no further I/O
        line.inject(b'O');
        assert_eq!(
            attempt(&mut session, &mut port, &OFF, 9_000, OVERTIME),
            Ok(Outcome::Confirmed)
        );
        assert_eq!(line.pending_rx(), 1);
        assert_eq!(line.sent().as_slice(), b"o");
    }

    #[test]
    fn test_overtime_is_strictly_after_window() {
        let line = SerialLine::new();
        let mut port = line.port();
        let mut session = HandshakeSession::new();

        attempt(&mut session, &mut port, &MONITOR, 1_000, OVERTIME).unwrap();
        assert_eq!(
            attempt(&mut session, &mut port, &MONITOR, 6_000, OVERTIME),
            Ok(Outcome::Pending)
        );
        assert_eq!(
            attempt(&mut session, &mut port, &MONITOR, 6_001, OVERTIME),
            Ok(Outcome::Overtime)
        );
        assert!(session.is_overtime());

        // Next attempt resends
        assert_eq!(
            attempt(&mut session, &mut port, &MONITOR, 6_002, OVERTIME),
            Ok(Outcome::Pending)
        );
        assert_eq!(line.sent_count(b'm'), 2);
    }

    #[test]
    fn test_escalation_byte_during_monitor() {
        let line = SerialLine::new();
        let mut port = line.port();
        let mut session = HandshakeSession::new();

        attempt(&mut session, &mut port, &MONITOR, 0, OVERTIME).unwrap();
        line.inject(b'P');
        assert_eq!(
            attempt(&mut session, &mut port, &MONITOR, 10, OVERTIME),
            Ok(Outcome::PeerEscalation(Mode::Panic))
        );
        assert!(!session.is_awaiting_reply());
        assert_eq!(session.mismatches(), 0);
    }

    #[test]
    fn test_escalation_byte_without_escalation_is_mismatch() {
        let line = SerialLine::new();
        let mut port = line.port();
        let mut session = HandshakeSession::new();

        attempt(&mut session, &mut port, &OFF, 0, OVERTIME).unwrap();
        line.inject(b'P');
        assert_eq!(
            attempt(&mut session, &mut port, &OFF, 10, OVERTIME),
            Ok(Outcome::Mismatch(1))
        );
    }

    #[test]
    fn test_mismatch_resends_and_counts() {
        let line = SerialLine::new();
        let mut port = line.port();
        let mut session = HandshakeSession::new();

        for round in 1..=3u8 {
            attempt(&mut session, &mut port, &OFF, 0, OVERTIME).unwrap();
            line.inject(b'?');
            let outcome = attempt(&mut session, &mut port, &OFF, 1, OVERTIME).unwrap();
            assert_eq!(outcome, Outcome::Mismatch(round));
            assert!(outcome.is_pending());
        }
        assert_eq!(line.sent_count(b'o'), 3);
    }

    #[test]
    fn test_write_error_is_retried() {
        let line = SerialLine::new();
        let mut port = line.port();
        let mut session = HandshakeSession::new();

        line.set_write_failure(true);
        assert_eq!(
            attempt(&mut session, &mut port, &MONITOR, 0, OVERTIME),
            Err(Error::SerialWrite)
        );
        assert!(!session.is_awaiting_reply());
        assert!(!session.is_overtime());

        line.set_write_failure(false);
        assert_eq!(
            attempt(&mut session, &mut port, &MONITOR, 5, OVERTIME),
            Ok(Outcome::Pending)
        );
        assert_eq!(line.sent().as_slice(), b"m");
    }

    #[test]
    fn test_read_error() {
        let line = SerialLine::new();
        let mut port = line.port();
        let mut session = HandshakeSession::new();

        attempt(&mut session, &mut port, &MONITOR, 0, OVERTIME).unwrap();
        line.set_read_failure(true);
        assert_eq!(
            attempt(&mut session, &mut port, &MONITOR, 10, OVERTIME),
            Err(Error::SerialRead)
        );
        assert!(session.is_awaiting_reply());
        assert!(!session.is_overtime());
    }

    #[test]
    fn test_read_error_past_window_expires() {
        let line = SerialLine::new();
        let mut port = line.port();
        let mut session = HandshakeSession::new();

        attempt(&mut session, &mut port, &MONITOR, 0, OVERTIME).unwrap();
        line.set_read_failure(true);
        assert_eq!(
            attempt(&mut session, &mut port, &MONITOR, 5_000, OVERTIME),
            Err(Error::SerialRead)
        );
        assert!(!session.is_overtime());
        assert_eq!(
            attempt(&mut session, &mut port, &MONITOR, 5_001, OVERTIME),
            Err(Error::SerialRead)
        );
        assert!(session.is_overtime());
        assert!(!session.is_awaiting_reply());
    }

    #[test]
    fn test_write_error_past_window_expires() {
        let line = SerialLine::new();
        let mut port = line.port();
        let mut session = HandshakeSession::new();

        line.set_write_failure(true);
        for now in [100, 2_000, 5_100] {
            assert_eq!(
                attempt(&mut session, &mut port, &OFF, now, OVERTIME),
                Err(Error::SerialWrite)
            );
            assert!(!session.is_overtime());
        }
        assert_eq!(
            attempt(&mut session, &mut port, &OFF, 5_101, OVERTIME),
            Err(Error::SerialWrite)
        );
        assert!(session.is_overtime());
        assert!(line.sent().is_empty());
    }
}
