//! Single-byte protocol messages

// Wire format values: panel → unit
pub const MSG_MONITOR_REQUEST: u8 = b'm';
pub const MSG_PANIC_REQUEST: u8 = b'p';
pub const MSG_OFF_REQUEST: u8 = b'o';
pub const MSG_OFF_FINALIZE: u8 = b'x';

// Wire format values: unit → panel
pub const MSG_MONITOR_ACK: u8 = b'M';
pub const MSG_PANIC_ACK: u8 = b'P';
pub const MSG_OFF_ACK: u8 = b'O';

/// Which side of the link originates a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Sent by the panel
    PanelToUnit,
    /// Sent by the alarm unit
    UnitToPanel,
}

/// Every message either side may put on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Message {
    /// Ask the unit to enter monitoring
    MonitorRequest,
    /// Unit confirms monitoring
    MonitorAck,
    /// Ask the unit to raise the alarm
    PanicRequest,
    /// Unit confirms panic, also sent unsolicited to escalate
    PanicAck,
    /// Ask the unit to stand down
    OffRequest,
    /// Unit confirms stand-down
    OffAck,
    /// Panel finished shutting down; no reply expected
    OffFinalize,
}

impl Message {
    /// Parse a message from its wire byte
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            MSG_MONITOR_REQUEST => Some(Message::MonitorRequest),
            MSG_MONITOR_ACK => Some(Message::MonitorAck),
            MSG_PANIC_REQUEST => Some(Message::PanicRequest),
            MSG_PANIC_ACK => Some(Message::PanicAck),
            MSG_OFF_REQUEST => Some(Message::OffRequest),
            MSG_OFF_ACK => Some(Message::OffAck),
            MSG_OFF_FINALIZE => Some(Message::OffFinalize),
            _ => None,
        }
    }

    /// Convert to wire byte
    pub const fn to_byte(self) -> u8 {
        match self {
            Message::MonitorRequest => MSG_MONITOR_REQUEST,
            Message::MonitorAck => MSG_MONITOR_ACK,
            Message::PanicRequest => MSG_PANIC_REQUEST,
            Message::PanicAck => MSG_PANIC_ACK,
            Message::OffRequest => MSG_OFF_REQUEST,
            Message::OffAck => MSG_OFF_ACK,
            Message::OffFinalize => MSG_OFF_FINALIZE,
        }
    }

    /// Which side sends this message
    pub const fn direction(self) -> Direction {
        match self {
            Message::MonitorAck | Message::PanicAck | Message::OffAck => Direction::UnitToPanel,
            _ => Direction::PanelToUnit,
        }
    }

    /// Returns true if the sender waits for an acknowledgement
    pub const fn expects_reply(self) -> bool {
        matches!(
            self,
            Message::MonitorRequest | Message::PanicRequest | Message::OffRequest
        )
    }

    /// The acknowledgement that answers this request
    pub const fn reply(self) -> Option<Message> {
        match self {
            Message::MonitorRequest => Some(Message::MonitorAck),
            Message::PanicRequest => Some(Message::PanicAck),
            Message::OffRequest => Some(Message::OffAck),
            _ => None,
        }
    }
}

impl PartialEq<u8> for Message {
    fn eq(&self, other: &u8) -> bool {
        self.to_byte() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Message; 7] = [
        Message::MonitorRequest,
        Message::MonitorAck,
        Message::PanicRequest,
        Message::PanicAck,
        Message::OffRequest,
        Message::OffAck,
        Message::OffFinalize,
    ];

    #[test]
    fn test_wire_bytes_match_alphabet() {
        assert_eq!(Message::MonitorRequest.to_byte(), b'm');
        assert_eq!(Message::MonitorAck.to_byte(), b'M');
        assert_eq!(Message::PanicRequest.to_byte(), b'p');
        assert_eq!(Message::PanicAck.to_byte(), b'P');
        assert_eq!(Message::OffRequest.to_byte(), b'o');
        assert_eq!(Message::OffAck.to_byte(), b'O');
        assert_eq!(Message::OffFinalize.to_byte(), b'x');
    }

    #[test]
    fn test_from_byte_inverts_to_byte() {
        for msg in ALL {
            assert_eq!(Message::from_byte(msg.to_byte()), Some(msg));
        }
    }

    #[test]
    fn test_unknown_bytes() {
        assert!(Message::from_byte(0x00).is_none());
        assert!(Message::from_byte(b'X').is_none());
        assert!(Message::from_byte(b'q').is_none());
    }

    #[test]
    fn test_requests_pair_with_acks() {
        for msg in ALL {
            match msg.reply() {
                Some(ack) => {
                    assert!(msg.expects_reply());
                    assert_eq!(msg.direction(), Direction::PanelToUnit);
                    assert_eq!(ack.direction(), Direction::UnitToPanel);
                }
                None => assert!(!msg.expects_reply()),
            }
        }
    }

    #[test]
    fn test_finalize_is_one_way() {
        assert_eq!(Message::OffFinalize.direction(), Direction::PanelToUnit);
        assert!(!Message::OffFinalize.expects_reply());
        assert!(Message::OffFinalize.reply().is_none());
    }

    #[test]
    fn test_compare_with_raw_byte() {
        assert!(Message::PanicAck == b'P');
        assert!(Message::PanicAck != b'p');
    }
}
