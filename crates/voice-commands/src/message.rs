use std::fmt;
use time::OffsetDateTime;
use uuid::Uuid;

/// Largest command text taken from one datagram, in bytes.
pub const MAX_DATAGRAM: usize = 1023;

/// One received command, alive from receipt until it has been dispatched.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandMessage {
    pub id: Uuid,
    pub received_at: OffsetDateTime,
    pub text: String,
}

impl CommandMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            received_at: OffsetDateTime::now_utc(),
            text: text.into(),
        }
    }

    /// Decode a raw datagram: at most [`MAX_DATAGRAM`] bytes, ending at the
    /// first NUL, invalid UTF-8 replaced.
    pub fn from_datagram(payload: &[u8]) -> Self {
        let bounded = &payload[..payload.len().min(MAX_DATAGRAM)];
        let end = bounded.iter().position(|&b| b == 0).unwrap_or(bounded.len());
        Self::new(String::from_utf8_lossy(&bounded[..end]).into_owned())
    }
}

impl fmt::Display for CommandMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cut_at_nul() {
        let msg = CommandMessage::from_datagram(b"sit down\0garbage");
        assert_eq!(msg.text, "sit down");
    }

    #[test]
    fn test_bounded_length() {
        let payload = vec![b'a'; 2000];
        let msg = CommandMessage::from_datagram(&payload);
        assert_eq!(msg.text.len(), MAX_DATAGRAM);
    }

    #[test]
    fn test_lossy_utf8() {
        let msg = CommandMessage::from_datagram(b"stand \xff up");
        assert_eq!(msg.text, "stand \u{fffd} up");
    }

    #[test]
    fn test_each_message_gets_its_own_id() {
        let a = CommandMessage::from_datagram(b"stop");
        let b = CommandMessage::from_datagram(b"stop");
        assert_ne!(a.id, b.id);
        assert_eq!(a.text, b.text);
    }
}
