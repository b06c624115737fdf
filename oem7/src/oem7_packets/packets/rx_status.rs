use crate::oem7_packets::{
    types::{Aux1Status, Aux2Status, Aux4Status, ReceiverError, ReceiverStatus, StatusWordId},
    Oem7PacketMeta,
};

oem7_record! {
    /// Status word together with its event masks
    pub struct StatusWordGroup {
        pub word: u32,
        pub priority_mask: u32,
        pub set_mask: u32,
        pub clear_mask: u32,
    }
}

oem7_record! {
    /// Receiver status (RXSTATUS)
    pub struct RxStatus {
        /// Receiver error word, see [`ReceiverError`]
        pub error: u32,
        /// Number of status words that follow, including the primary one
        pub num_stats: u32,
        pub status: StatusWordGroup,
        pub aux1: StatusWordGroup,
        pub aux2: StatusWordGroup,
        pub aux3: StatusWordGroup,
        pub aux4: StatusWordGroup,
    }
}

impl Oem7PacketMeta for RxStatus {
    const MESSAGE_ID: u16 = 93;
    const NAME: &'static str = "RXSTATUS";
}

impl RxStatus {
    pub fn receiver_error(&self) -> ReceiverError {
        ReceiverError::from_bits_retain(self.error)
    }

    pub fn receiver_status(&self) -> ReceiverStatus {
        ReceiverStatus::from_bits_retain(self.status.word)
    }

    pub fn aux1_status(&self) -> Aux1Status {
        Aux1Status::from_bits_retain(self.aux1.word)
    }

    pub fn aux2_status(&self) -> Aux2Status {
        Aux2Status::from_bits_retain(self.aux2.word)
    }

    pub fn aux4_status(&self) -> Aux4Status {
        Aux4Status::from_bits_retain(self.aux4.word)
    }

    /// Raw value of the given word
    pub fn word(&self, id: StatusWordId) -> u32 {
        match id {
            StatusWordId::Error => self.error,
            StatusWordId::Status => self.status.word,
            StatusWordId::Aux1 => self.aux1.word,
            StatusWordId::Aux2 => self.aux2.word,
            StatusWordId::Aux3 => self.aux3.word,
            StatusWordId::Aux4 => self.aux4.word,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oem7_packets::{FixedPacket, WireField};

    #[test]
    fn test_field_order() {
        let mut payload = Vec::new();
        for i in 0..22u32 {
            i.write(&mut payload);
        }
        let status = RxStatus::decode(&payload).unwrap();
        assert_eq!(status.error, 0);
        assert_eq!(status.num_stats, 1);
        assert_eq!(status.status.word, 2);
        assert_eq!(status.status.clear_mask, 5);
        assert_eq!(status.aux1.word, 6);
        assert_eq!(status.aux2.word, 10);
        assert_eq!(status.aux4.word, 18);
        assert_eq!(status.aux4.clear_mask, 21);
        assert_eq!(status.word(StatusWordId::Aux3), 14);
        assert_eq!(status.encode(), payload);
    }
}
