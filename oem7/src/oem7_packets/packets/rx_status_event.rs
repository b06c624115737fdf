use crate::oem7_packets::{
    fixed_str,
    types::{EventType, StatusWordId},
    Oem7PacketMeta,
};

oem7_record! {
    /// Status word change (RXSTATUSEVENT), diagnostics only
    pub struct RxStatusEvent {
        /// Which status word changed, see [`StatusWordId`]
        pub word: u32,
        /// Bit position within the word
        pub bit: u32,
        /// Set or clear, see [`EventType`]
        pub event: u32,
        pub description: [u8; 32],
    }
}

impl Oem7PacketMeta for RxStatusEvent {
    const MESSAGE_ID: u16 = 94;
    const NAME: &'static str = "RXSTATUSEVENT";
}

impl RxStatusEvent {
    pub fn word_id(&self) -> Option<StatusWordId> {
        StatusWordId::from_raw(self.word)
    }

    pub fn event_type(&self) -> Option<EventType> {
        EventType::from_raw(self.event)
    }

    pub fn description(&self) -> &str {
        fixed_str(&self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oem7_packets::{decode, FixedPacket, Message, WireField};

    #[test]
    fn test_field_order() {
        let mut payload = Vec::new();
        2u32.write(&mut payload);
        15u32.write(&mut payload);
        1u32.write(&mut payload);
        let mut text = [0u8; 32];
        text[..14].copy_from_slice(b"Jammer on GPS1");
        payload.extend_from_slice(&text);
        assert_eq!(payload.len(), RxStatusEvent::SIZE);

        let event = RxStatusEvent::decode(&payload).unwrap();
        assert_eq!(event.word_id(), Some(StatusWordId::Aux1));
        assert_eq!(event.bit, 15);
        assert_eq!(event.event_type(), Some(EventType::Set));
        assert_eq!(event.description(), "Jammer on GPS1");
        assert_eq!(event.encode(), payload);

        assert_eq!(
            decode(RxStatusEvent::MESSAGE_ID, &payload),
            Ok(Message::RxStatusEvent(event))
        );
    }

    #[test]
    fn test_unknown_codes() {
        let event = RxStatusEvent {
            word: 9,
            event: 4,
            ..Default::default()
        };
        assert_eq!(event.word_id(), None);
        assert_eq!(event.event_type(), None);
        assert_eq!(event.description(), "");
    }
}
