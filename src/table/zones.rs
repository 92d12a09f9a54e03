//! Pure transforms over a zone collection. Nothing here mutates its input
//! or touches the store; the store calls these on every zone-shaped change.

use super::types::{Card, CardId, ZoneKind, Zones};
use rand::seq::SliceRandom;
use rand::RngCore;
use std::collections::HashSet;

/// Re-establish the zone invariants on a collection:
///
/// - every card id appears at most once, the first occurrence in canonical
///   zone order (library, hand, battlefield, lands, graveyard, exile,
///   command) winning;
/// - the graveyard holds no clones (cards carrying a `clone_of` reference
///   are ephemeral and dropped there).
///
/// Returns a new collection; the input is left untouched.
pub fn normalize(zones: &Zones) -> Zones {
    let mut seen: HashSet<CardId> = HashSet::new();
    let mut out = Zones::default();
    for &kind in ZoneKind::ALL.iter() {
        let kept = out.get_mut(kind);
        for card in zones.get(kind) {
            if kind == ZoneKind::Graveyard && card.clone_of.is_some() {
                continue;
            }
            if seen.insert(card.id) {
                kept.push(card.clone());
            }
        }
    }
    out
}

/// Uniform random permutation (Fisher–Yates) of a card sequence.
pub fn shuffle_cards(cards: &mut [Card], rng: &mut impl RngCore) {
    cards.shuffle(rng);
}

/// Count occurrences of a card id across every zone. The normalization
/// invariant keeps this at most 1; tests lean on it.
pub fn count_occurrences(zones: &Zones, id: CardId) -> usize {
    zones
        .iter()
        .map(|(_, cards)| cards.iter().filter(|c| c.id == id).count())
        .sum()
}
