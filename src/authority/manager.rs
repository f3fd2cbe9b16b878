//! The game state authority: sole writer of deck, hands, and discard piles.
//!
//! Every operation either applies completely and returns the envelopes it
//! produced, or returns a `Rejection` having changed nothing. Requests come
//! from untrusted participants, so nothing here panics on bad input.

use tracing::{debug, info, trace};

use super::snapshot::TableSnapshot;
use crate::cards::{CardState, VisualHandle};
use crate::core::{GameRng, GameRngState, ParticipantId, Rejection, Role, SessionConfig};
use crate::protocol::{Envelope, Outbox, ReplicationEvent};
use crate::zones::{Deck, DiscardEngine, Hand, Hands, PileKind};

/// Owner of the shared card state.
///
/// ## Usage
///
/// ```
/// use card_authority::authority::GameStateAuthority;
/// use card_authority::core::{GameRng, ParticipantId, Role};
///
/// let mut authority = GameStateAuthority::new(Role::Authority, 8, GameRng::new(42));
/// authority.initialize_deck(1).unwrap();
///
/// let alice = ParticipantId::new(1);
/// let outbox = authority.draw_card(alice).unwrap();
///
/// assert_eq!(outbox.len(), 1);
/// assert_eq!(authority.deck().len(), 51);
/// assert_eq!(authority.hand(alice).map(|h| h.len()), Some(1));
/// ```
#[derive(Clone, Debug)]
pub struct GameStateAuthority {
    role: Role,
    max_deck_count: u32,
    deck: Deck,
    hands: Hands,
    discards: DiscardEngine,
    rng: GameRng,
    /// Last visual handle handed out. Never reused.
    last_visual: u64,
    /// Bumped by every successful `initialize_deck`.
    generation: u64,
}

impl GameStateAuthority {
    /// Create an authority with an empty table.
    #[must_use]
    pub fn new(role: Role, max_deck_count: u32, rng: GameRng) -> Self {
        Self {
            role,
            max_deck_count,
            deck: Deck::new(),
            hands: Hands::new(),
            discards: DiscardEngine::new(),
            rng,
            last_visual: 0,
            generation: 0,
        }
    }

    /// Create from a session configuration.
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(
            config.role,
            config.max_deck_count,
            GameRng::from_seed_or_entropy(config.seed),
        )
    }

    // === Queries ===

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn hands(&self) -> &Hands {
        &self.hands
    }

    /// A participant's hand, if one was ever dealt to.
    #[must_use]
    pub fn hand(&self, participant: ParticipantId) -> Option<&Hand> {
        self.hands.get(participant)
    }

    #[must_use]
    pub fn discards(&self) -> &DiscardEngine {
        &self.discards
    }

    /// Table generation: how many times the deck has been initialized.
    ///
    /// Initialization clears every hand and pile without emitting events,
    /// so participant views compare this to know when to resync.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// RNG position, for checkpointing.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Copy of the whole table.
    #[must_use]
    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            deck: self.deck.cards().clone(),
            hands: self
                .hands
                .participants()
                .into_iter()
                .filter_map(|id| self.hands.get(id).map(|hand| (id, hand.cards().clone())))
                .collect(),
            shared_pile: self.discards.shared().clone(),
            private_piles: self.discards.private_piles(),
            generation: self.generation,
        }
    }

    // === Commands ===

    /// Clear the table and rebuild the deck from `deck_count` standard
    /// decks, face down and unowned, then shuffle.
    ///
    /// Session setup: not turn-gated. Callers run it before or between hands.
    pub fn initialize_deck(&mut self, deck_count: u32) -> Result<Outbox, Rejection> {
        self.ensure_authority()?;
        if deck_count == 0 || deck_count > self.max_deck_count {
            return Err(Rejection::InvalidDeckCount {
                requested: deck_count,
                max: self.max_deck_count,
            });
        }

        self.hands.clear();
        self.discards.clear();
        self.deck.rebuild(deck_count as usize);
        self.deck.shuffle(&mut self.rng);
        self.generation += 1;

        info!(deck_count, cards = self.deck.len(), generation = self.generation, "deck initialized");
        Ok(Outbox::new())
    }

    /// Permute the deck. Hands and piles are untouched.
    pub fn shuffle(&mut self) -> Result<Outbox, Rejection> {
        self.ensure_authority()?;
        self.deck.shuffle(&mut self.rng);
        debug!(cards = self.deck.len(), "deck shuffled");
        Ok(Outbox::new())
    }

    /// Deal up to `cards_per_participant` cards to each participant in
    /// order, finishing one participant before starting the next.
    ///
    /// Stops early when the deck runs out, so earlier participants never
    /// hold fewer dealt cards than later ones. Emits one `HandUpdated` per
    /// card, in deal order.
    pub fn deal_initial_hands(
        &mut self,
        participants: &[ParticipantId],
        cards_per_participant: u32,
    ) -> Result<Outbox, Rejection> {
        self.ensure_authority()?;

        let mut outbox = Outbox::new();
        'participants: for &participant in participants {
            if participant.is_unowned() {
                continue;
            }
            for _ in 0..cards_per_participant {
                let Some(card) = self.deck.pop_top() else {
                    break 'participants;
                };
                outbox.push(self.give(participant, card));
            }
        }

        debug!(
            dealt = outbox.len(),
            participants = participants.len(),
            remaining = self.deck.len(),
            "initial hands dealt"
        );
        Ok(outbox)
    }

    /// Move the top card of the deck into `requester`'s hand.
    pub fn draw_card(&mut self, requester: ParticipantId) -> Result<Outbox, Rejection> {
        self.ensure_authority()?;
        if requester.is_unowned() {
            return Err(Rejection::UnknownParticipant(requester));
        }

        let card = self.deck.pop_top().ok_or(Rejection::DeckEmpty)?;
        let mut outbox = Outbox::new();
        outbox.push(self.give(requester, card));
        Ok(outbox)
    }

    /// Move the card at `hand_index` from `requester`'s hand to the shared
    /// pile or their private pile.
    ///
    /// Emits `DiscardUpdated` to the requester and `CardPositionChanged` to
    /// everyone, so observers can move the visual without a hand sync.
    pub fn discard_card(
        &mut self,
        requester: ParticipantId,
        hand_index: usize,
        to_shared_pile: bool,
    ) -> Result<Outbox, Rejection> {
        self.ensure_authority()?;
        let hand = self.checked_hand(requester, hand_index)?;

        let card = hand.remove(hand_index);
        self.discards
            .discard(card, PileKind::for_discard(requester, to_shared_pile));
        debug!(participant = %requester, %card, to_shared_pile, "card discarded");

        let mut outbox = Outbox::new();
        outbox.push(Envelope::to_only(
            requester,
            ReplicationEvent::DiscardUpdated {
                participant: requester,
                card,
                to_shared_pile,
            },
        ));
        outbox.push(Envelope::to_all(ReplicationEvent::CardPositionChanged {
            visual: card.visual,
            to_shared_pile,
        }));
        Ok(outbox)
    }

    /// Toggle `face_up` on the card at `hand_index` in `requester`'s hand.
    ///
    /// The card keeps its position and visual handle; the updated value is
    /// written back into the hand.
    pub fn flip_card(&mut self, requester: ParticipantId, hand_index: usize) -> Result<Outbox, Rejection> {
        self.ensure_authority()?;
        let hand = self.checked_hand(requester, hand_index)?;

        let Some(&current) = hand.get(hand_index) else {
            return Err(Rejection::HandIndexOutOfBounds {
                index: hand_index,
                len: hand.len(),
            });
        };
        let card = CardState {
            face_up: !current.face_up,
            ..current
        };
        hand.replace(hand_index, card);
        debug!(participant = %requester, %card, "card flipped");

        let mut outbox = Outbox::new();
        outbox.push(Envelope::to_all(ReplicationEvent::CardStateChanged { card }));
        Ok(outbox)
    }

    // === Internals ===

    fn ensure_authority(&self) -> Result<(), Rejection> {
        if self.role.is_authority() {
            Ok(())
        } else {
            Err(Rejection::NotAuthority)
        }
    }

    /// The requester's hand, if `index` addresses a card in it.
    fn checked_hand(&mut self, requester: ParticipantId, index: usize) -> Result<&mut Hand, Rejection> {
        let len = self.hands.len_of(requester);
        match self.hands.get_mut(requester) {
            Some(hand) if index < len => Ok(hand),
            _ => Err(Rejection::HandIndexOutOfBounds { index, len }),
        }
    }

    fn next_visual(&mut self) -> VisualHandle {
        self.last_visual += 1;
        VisualHandle::new(self.last_visual)
    }

    /// Hand a card from the deck to a participant, making it observable.
    fn give(&mut self, participant: ParticipantId, card: CardState) -> Envelope {
        let card = CardState {
            owner: participant,
            visual: self.next_visual(),
            ..card
        };
        self.hands.entry(participant).push(card);
        trace!(%participant, %card, visual = %card.visual, "card to hand");

        Envelope::to_only(participant, ReplicationEvent::HandUpdated { participant, card })
    }
}
