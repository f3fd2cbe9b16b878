//! Wire encoding for commands and replication events.
//!
//! `bincode` with fixed-width little-endian integers: every field has a
//! fixed size and there are no optional fields, so a `CardState` is always
//! 19 bytes (rank u8, suit u8, face-up bool, owner u64, visual u64).
//! Enum variants are prefixed with a u32 tag.
//!
//! Decoding treats input as untrusted: size is capped, trailing bytes are
//! rejected, and every carried card is checked against the rank/suit
//! invariant. Hand and discard updates must also name the card's owner.

use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::command::Command;
use super::event::{Envelope, ReplicationEvent};
use crate::cards::CardState;
use crate::core::CodecError;

/// Largest message accepted or produced.
pub const MAX_MESSAGE_BYTES: u64 = 256;

/// Encoded size of one `CardState`.
pub const CARD_WIRE_BYTES: usize = 19;

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .reject_trailing_bytes()
        .with_limit(MAX_MESSAGE_BYTES)
}

/// Encode any protocol message.
pub fn encode<T: Serialize>(message: &T) -> Result<Vec<u8>, CodecError> {
    Ok(options().serialize(message)?)
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    Ok(options().deserialize(bytes)?)
}

fn check_card(card: &CardState) -> Result<(), CodecError> {
    if card.is_valid() {
        Ok(())
    } else {
        Err(CodecError::InvalidCard {
            rank: card.rank,
            suit_index: card.suit_index,
        })
    }
}

/// Card checks plus ownership for events that name a participant.
fn check_event(event: &ReplicationEvent) -> Result<(), CodecError> {
    match *event {
        ReplicationEvent::HandUpdated { participant, card }
        | ReplicationEvent::DiscardUpdated { participant, card, .. } => {
            check_card(&card)?;
            if card.owner != participant {
                return Err(CodecError::ForeignCard {
                    participant,
                    owner: card.owner,
                });
            }
            Ok(())
        }
        ReplicationEvent::CardStateChanged { card } => check_card(&card),
        ReplicationEvent::CardPositionChanged { .. } | ReplicationEvent::TurnChanged { .. } => Ok(()),
    }
}

/// Decode a command sent by a participant.
pub fn decode_command(bytes: &[u8]) -> Result<Command, CodecError> {
    decode(bytes)
}

/// Decode a replication event, validating any card it carries.
pub fn decode_event(bytes: &[u8]) -> Result<ReplicationEvent, CodecError> {
    let event: ReplicationEvent = decode(bytes)?;
    check_event(&event)?;
    Ok(event)
}

/// Decode an addressed event.
pub fn decode_envelope(bytes: &[u8]) -> Result<Envelope, CodecError> {
    let envelope: Envelope = decode(bytes)?;
    check_event(&envelope.event)?;
    Ok(envelope)
}

/// Decode a bare card.
pub fn decode_card(bytes: &[u8]) -> Result<CardState, CodecError> {
    let card: CardState = decode(bytes)?;
    check_card(&card)?;
    Ok(card)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Suit, VisualHandle};
    use crate::core::ParticipantId;

    fn sample_card() -> CardState {
        CardState {
            rank: 12,
            suit_index: Suit::Clubs.index(),
            face_up: true,
            owner: ParticipantId(0x0102_0304_0506_0708),
            visual: VisualHandle(9),
        }
    }

    #[test]
    fn test_card_layout() {
        let bytes = encode(&sample_card()).unwrap();
        assert_eq!(bytes.len(), CARD_WIRE_BYTES);

        // Field order: rank, suit, face_up, owner (LE), visual (LE)
        assert_eq!(bytes[0], 12);
        assert_eq!(bytes[1], 2);
        assert_eq!(bytes[2], 1);
        assert_eq!(&bytes[3..11], &[8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(&bytes[11..19], &[9, 0, 0, 0, 0, 0, 0, 0]);

        assert_eq!(decode_card(&bytes).unwrap(), sample_card());
    }

    #[test]
    fn test_command_layout() {
        // Unit variants are just the u32 tag
        assert_eq!(encode(&Command::Shuffle).unwrap(), vec![1, 0, 0, 0]);

        let bytes = encode(&Command::DiscardCard { hand_index: 3, to_shared_pile: true }).unwrap();
        assert_eq!(bytes, vec![4, 0, 0, 0, 3, 0, 0, 0, 1]);
        assert_eq!(
            decode_command(&bytes).unwrap(),
            Command::DiscardCard { hand_index: 3, to_shared_pile: true }
        );
    }

    #[test]
    fn test_event_fixed_width() {
        let event = ReplicationEvent::HandUpdated {
            participant: ParticipantId(5),
            card: CardState {
                owner: ParticipantId(5),
                ..sample_card()
            },
        };
        let bytes = encode(&event).unwrap();
        assert_eq!(bytes.len(), 4 + 8 + CARD_WIRE_BYTES);
        assert_eq!(decode_event(&bytes).unwrap(), event);
    }

    #[test]
    fn test_envelope_decodes() {
        let envelope = Envelope::to_only(
            ParticipantId(2),
            ReplicationEvent::CardStateChanged { card: sample_card() },
        );
        let bytes = encode(&envelope).unwrap();
        assert_eq!(decode_envelope(&bytes).unwrap(), envelope);
    }

    #[test]
    fn test_rejects_invalid_card() {
        let mut bad = sample_card();
        bad.rank = 14;
        let bytes = encode(&ReplicationEvent::CardStateChanged { card: bad }).unwrap();

        assert!(matches!(
            decode_event(&bytes),
            Err(CodecError::InvalidCard { rank: 14, .. })
        ));

        let mut bad_suit = sample_card();
        bad_suit.suit_index = 7;
        let bytes = encode(&bad_suit).unwrap();
        assert!(matches!(decode_card(&bytes), Err(CodecError::InvalidCard { suit_index: 7, .. })));
    }

    #[test]
    fn test_rejects_card_owned_by_someone_else() {
        let owner = sample_card().owner;
        let hand = ReplicationEvent::HandUpdated {
            participant: ParticipantId(5),
            card: sample_card(),
        };
        assert!(matches!(
            decode_event(&encode(&hand).unwrap()),
            Err(CodecError::ForeignCard { participant: ParticipantId(5), owner: o }) if o == owner
        ));

        let discard = Envelope::to_only(
            ParticipantId(5),
            ReplicationEvent::DiscardUpdated {
                participant: ParticipantId(5),
                card: sample_card(),
                to_shared_pile: false,
            },
        );
        assert!(matches!(
            decode_envelope(&encode(&discard).unwrap()),
            Err(CodecError::ForeignCard { .. })
        ));

        // Same event with a matching owner is fine
        let own = ReplicationEvent::HandUpdated { participant: owner, card: sample_card() };
        assert_eq!(decode_event(&encode(&own).unwrap()).unwrap(), own);
    }

    #[test]
    fn test_rejects_malformed_input() {
        // Truncated
        assert!(matches!(decode_command(&[4, 0, 0]), Err(CodecError::Malformed(_))));
        // Unknown variant tag
        assert!(matches!(decode_command(&[99, 0, 0, 0]), Err(CodecError::Malformed(_))));
        // Trailing bytes
        assert!(matches!(decode_command(&[1, 0, 0, 0, 0]), Err(CodecError::Malformed(_))));
        // Empty
        assert!(decode_event(&[]).is_err());
    }

    #[test]
    fn test_rejects_non_bool_flag() {
        // DiscardCard with a 2 in the bool slot
        let bytes = vec![4, 0, 0, 0, 0, 0, 0, 0, 2];
        assert!(decode_command(&bytes).is_err());
    }
}
