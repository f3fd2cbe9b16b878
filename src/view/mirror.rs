//! Participant-side mirror of the table.
//!
//! A `TableView` is what one participant can know: its own hand and
//! private pile in full, the order of the shared pile, the last state seen
//! for any card, and whose turn it is. It is built only from envelopes
//! addressed to that participant (plus an optional snapshot on join).
//!
//! The view also owns the `VisualHandle -> P` registry, where `P` is
//! whatever the presentation layer uses for a spawned card object.
//!
//! Deck initialization wipes every hand and pile on the authority without
//! publishing anything. Hosts track `Session::generation` and call
//! [`TableView::reset_table`] (or reseed with `from_snapshot`) whenever it
//! moves, before forwarding any later envelopes.

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::authority::TableSnapshot;
use crate::cards::{CardState, VisualHandle};
use crate::core::ParticipantId;
use crate::protocol::{Envelope, ReplicationEvent};

/// Where a visual currently sits, as far as this view knows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardLocation {
    Hand,
    SharedPile,
    PrivatePile,
}

/// One participant's view of the table.
#[derive(Clone, Debug)]
pub struct TableView<P = ()> {
    me: ParticipantId,
    hand: Vec<CardState>,
    private_pile: Vec<CardState>,
    /// Bottom to top.
    shared_pile: Vec<VisualHandle>,
    current_turn: Option<ParticipantId>,
    known: FxHashMap<VisualHandle, CardState>,
    locations: FxHashMap<VisualHandle, CardLocation>,
    visuals: FxHashMap<VisualHandle, P>,
    /// Table generation this view was last synced to.
    generation: u64,
}

impl<P> TableView<P> {
    /// Empty view for `me`.
    #[must_use]
    pub fn new(me: ParticipantId) -> Self {
        Self {
            me,
            hand: Vec::new(),
            private_pile: Vec::new(),
            shared_pile: Vec::new(),
            current_turn: None,
            known: FxHashMap::default(),
            locations: FxHashMap::default(),
            visuals: FxHashMap::default(),
            generation: 0,
        }
    }

    /// Seed a view for a participant joining mid-session.
    ///
    /// Only what `me` is entitled to see is copied: its own hand and
    /// private pile, and the shared pile. Other hands are skipped.
    #[must_use]
    pub fn from_snapshot(me: ParticipantId, snapshot: &TableSnapshot, current_turn: Option<ParticipantId>) -> Self {
        let mut view = Self::new(me);
        view.current_turn = current_turn;
        view.generation = snapshot.generation;

        if let Some(hand) = snapshot.hand(me) {
            for card in hand {
                view.remember(*card, CardLocation::Hand);
                view.hand.push(*card);
            }
        }
        if let Some(pile) = snapshot.private_pile(me) {
            for card in pile {
                view.remember(*card, CardLocation::PrivatePile);
                view.private_pile.push(*card);
            }
        }
        for card in &snapshot.shared_pile {
            view.remember(*card, CardLocation::SharedPile);
            view.shared_pile.push(card.visual);
        }
        view
    }

    // === Queries ===

    #[must_use]
    pub fn me(&self) -> ParticipantId {
        self.me
    }

    /// Own hand in authority order.
    #[must_use]
    pub fn hand(&self) -> &[CardState] {
        &self.hand
    }

    #[must_use]
    pub fn private_pile(&self) -> &[CardState] {
        &self.private_pile
    }

    /// Visuals on the shared pile, bottom to top.
    #[must_use]
    pub fn shared_pile(&self) -> &[VisualHandle] {
        &self.shared_pile
    }

    #[must_use]
    pub fn current_turn(&self) -> Option<ParticipantId> {
        self.current_turn
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn is_my_turn(&self) -> bool {
        self.current_turn == Some(self.me)
    }

    /// Last state seen for the card behind `visual`.
    #[must_use]
    pub fn card(&self, visual: VisualHandle) -> Option<&CardState> {
        self.known.get(&visual)
    }

    #[must_use]
    pub fn location(&self, visual: VisualHandle) -> Option<CardLocation> {
        self.locations.get(&visual).copied()
    }

    // === Visual Registry ===

    /// Attach a presentation object to a handle, returning any previous one.
    pub fn bind(&mut self, visual: VisualHandle, object: P) -> Option<P> {
        self.visuals.insert(visual, object)
    }

    /// Detach and return the presentation object for a handle.
    pub fn unbind(&mut self, visual: VisualHandle) -> Option<P> {
        self.visuals.remove(&visual)
    }

    #[must_use]
    pub fn visual(&self, visual: VisualHandle) -> Option<&P> {
        self.visuals.get(&visual)
    }

    pub fn visual_mut(&mut self, visual: VisualHandle) -> Option<&mut P> {
        self.visuals.get_mut(&visual)
    }

    #[must_use]
    pub fn bound_visuals(&self) -> usize {
        self.visuals.len()
    }

    // === Updates ===

    /// Forget every card after the authority rebuilt its deck.
    ///
    /// Returns the presentation objects that were bound so the host can
    /// despawn them; their handles will never be issued again. Turn state
    /// is kept since initialization does not touch it.
    pub fn reset_table(&mut self, generation: u64) -> Vec<(VisualHandle, P)> {
        self.hand.clear();
        self.private_pile.clear();
        self.shared_pile.clear();
        self.known.clear();
        self.locations.clear();
        self.generation = generation;
        trace!(me = %self.me, generation, "view reset");
        self.visuals.drain().collect()
    }

    /// Apply an envelope if it is addressed to this participant.
    ///
    /// Returns whether it was applied.
    pub fn apply(&mut self, envelope: &Envelope) -> bool {
        if !envelope.audience.includes(self.me) {
            return false;
        }
        self.apply_event(&envelope.event);
        true
    }

    /// Apply an event unconditionally.
    ///
    /// Events about handles this view has never seen are recorded rather
    /// than rejected; delivery order across participants is not guaranteed.
    pub fn apply_event(&mut self, event: &ReplicationEvent) {
        trace!(me = %self.me, event = event.name(), "view update");
        match *event {
            ReplicationEvent::HandUpdated { participant, card } => {
                self.remember(card, CardLocation::Hand);
                if participant == self.me && !self.hand.iter().any(|c| c.visual == card.visual) {
                    self.hand.push(card);
                }
            }
            ReplicationEvent::DiscardUpdated {
                participant,
                card,
                to_shared_pile,
            } => {
                if participant == self.me {
                    self.take_from_hand(card.visual);
                    if !to_shared_pile && !self.private_pile.iter().any(|c| c.visual == card.visual) {
                        self.private_pile.push(card);
                    }
                }
                self.remember(card, pile_location(to_shared_pile));
            }
            ReplicationEvent::CardPositionChanged { visual, to_shared_pile } => {
                self.take_from_hand(visual);
                self.locations.insert(visual, pile_location(to_shared_pile));
                if to_shared_pile && !self.shared_pile.contains(&visual) {
                    self.shared_pile.push(visual);
                }
            }
            ReplicationEvent::CardStateChanged { card } => {
                if let Some(held) = self.hand.iter_mut().find(|c| c.visual == card.visual) {
                    *held = card;
                }
                self.known.insert(card.visual, card);
            }
            ReplicationEvent::TurnChanged { participant } => {
                self.current_turn = Some(participant);
            }
        }
    }

    fn remember(&mut self, card: CardState, location: CardLocation) {
        self.known.insert(card.visual, card);
        self.locations.insert(card.visual, location);
    }

    fn take_from_hand(&mut self, visual: VisualHandle) {
        if let Some(pos) = self.hand.iter().position(|c| c.visual == visual) {
            self.hand.remove(pos);
        }
    }
}

fn pile_location(to_shared_pile: bool) -> CardLocation {
    if to_shared_pile {
        CardLocation::SharedPile
    } else {
        CardLocation::PrivatePile
    }
}
