//! Set validation rules.
//!
//! The dealer only ever asks two questions about cards: does this triple
//! form a set, and does any set exist among these cards. [`SetValidator`]
//! is the capability answering them; [`StandardRules`] implements the
//! classic feature-matching rule.

use crate::cards::Card;
use std::collections::HashMap;

/// Capability deciding which card triples are sets.
///
/// Implementations must be pure: the same cards always give the same answer.
pub trait SetValidator: Send + Sync {
    /// Whether the three cards form a set
    fn is_set(&self, cards: &[Card; 3]) -> bool;

    /// Find up to `limit` sets among `cards`
    fn find_sets(&self, cards: &[Card], limit: usize) -> Vec<[Card; 3]> {
        let mut found = Vec::new();
        if limit == 0 {
            return found;
        }

        for i in 0..cards.len() {
            for j in i + 1..cards.len() {
                for k in j + 1..cards.len() {
                    let triple = [cards[i], cards[j], cards[k]];
                    if self.is_set(&triple) {
                        found.push(triple);
                        if found.len() >= limit {
                            return found;
                        }
                    }
                }
            }
        }

        found
    }

    /// Whether at least one set exists among `cards`
    fn has_any_set(&self, cards: &[Card]) -> bool {
        !self.find_sets(cards, 1).is_empty()
    }
}

/// Classic rules: every card id encodes `features` attributes, each taking
/// one of `feature_size` values (the id written in base `feature_size`).
/// Three cards form a set iff, for every feature, their values are either
/// all equal or all distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardRules {
    features: usize,
    feature_size: usize,
}

impl StandardRules {
    pub fn new(features: usize, feature_size: usize) -> Self {
        Self {
            features,
            feature_size,
        }
    }

    /// Number of distinct cards these rules can describe, saturating at `usize::MAX`
    pub fn deck_size(&self) -> usize {
        u32::try_from(self.features)
            .ok()
            .and_then(|features| self.feature_size.checked_pow(features))
            .unwrap_or(usize::MAX)
    }

    /// Feature values of a card, least significant feature first
    pub fn features_of(&self, card: Card) -> Vec<usize> {
        let mut rest = card;
        (0..self.features)
            .map(|_| {
                let value = rest % self.feature_size;
                rest /= self.feature_size;
                value
            })
            .collect()
    }

    /// The unique card completing a set with `a` and `b` (three values per feature only).
    ///
    /// `None` when that card id does not fit in a `Card`.
    fn third_card(&self, a: Card, b: Card) -> Option<Card> {
        let mut third: Card = 0;
        let mut weight: Card = 1;
        let (mut a, mut b) = (a, b);
        for _ in 0..self.features {
            // Higher digits of both cards are zero, and so are the third card's
            if a == 0 && b == 0 {
                break;
            }
            let value = (6 - a % 3 - b % 3) % 3;
            third = third.checked_add(value.checked_mul(weight)?)?;
            weight = weight.saturating_mul(3);
            a /= 3;
            b /= 3;
        }
        Some(third)
    }
}

impl Default for StandardRules {
    fn default() -> Self {
        Self::new(4, 3)
    }
}

impl SetValidator for StandardRules {
    fn is_set(&self, cards: &[Card; 3]) -> bool {
        let deck_size = self.deck_size();
        if cards.iter().any(|&card| card >= deck_size) {
            return false;
        }

        let [a, b, c] = cards.map(|card| self.features_of(card));
        (0..self.features).all(|f| {
            let all_equal = a[f] == b[f] && b[f] == c[f];
            let all_distinct = a[f] != b[f] && b[f] != c[f] && a[f] != c[f];
            all_equal || all_distinct
        })
    }

    fn find_sets(&self, cards: &[Card], limit: usize) -> Vec<[Card; 3]> {
        if self.feature_size != 3 {
            return self.find_sets_exhaustive(cards, limit);
        }

        let mut found = Vec::new();
        if limit == 0 {
            return found;
        }

        // With three values per feature any two cards determine the third.
        let index: HashMap<Card, usize> = cards
            .iter()
            .enumerate()
            .filter(|&(_, &card)| card < self.deck_size())
            .map(|(i, &card)| (card, i))
            .collect();
        for i in 0..cards.len() {
            for j in i + 1..cards.len() {
                if cards[i] == cards[j]
                    || !index.contains_key(&cards[i])
                    || !index.contains_key(&cards[j])
                {
                    continue;
                }
                let Some(third) = self.third_card(cards[i], cards[j]) else {
                    continue;
                };
                if index.get(&third).is_some_and(|&k| k > j) {
                    found.push([cards[i], cards[j], third]);
                    if found.len() >= limit {
                        return found;
                    }
                }
            }
        }

        found
    }
}

impl StandardRules {
    fn find_sets_exhaustive(&self, cards: &[Card], limit: usize) -> Vec<[Card; 3]> {
        struct Exhaustive<'a>(&'a StandardRules);
        impl SetValidator for Exhaustive<'_> {
            fn is_set(&self, cards: &[Card; 3]) -> bool {
                self.0.is_set(cards)
            }
        }
        Exhaustive(self).find_sets(cards, limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features_of() {
        let rules = StandardRules::default();
        assert_eq!(rules.features_of(0), vec![0, 0, 0, 0]);
        assert_eq!(rules.features_of(5), vec![2, 1, 0, 0]);
        assert_eq!(rules.features_of(80), vec![2, 2, 2, 2]);
        assert_eq!(rules.deck_size(), 81);
    }

    #[test]
    fn test_all_equal_or_all_distinct() {
        let rules = StandardRules::default();
        // Only the first feature differs: 0, 1, 2
        assert!(rules.is_set(&[0, 1, 2]));
        // Every feature distinct
        assert!(rules.is_set(&[0, 40, 80]));
        // First feature 0, 1, 1
        assert!(!rules.is_set(&[0, 1, 4]));
    }

    #[test]
    fn test_cards_outside_deck_never_form_a_set() {
        let rules = StandardRules::default();
        assert!(!rules.is_set(&[0, 1, 81]));
    }

    #[test]
    fn test_third_card_completes_set() {
        let rules = StandardRules::default();
        for a in 0..81 {
            for b in 0..81 {
                if a == b {
                    continue;
                }
                let c = rules.third_card(a, b).unwrap();
                assert!(rules.is_set(&[a, b, c]), "{a} {b} {c}");
            }
        }
    }

    #[test]
    fn test_find_sets_matches_exhaustive_search() {
        let rules = StandardRules::default();
        let cards = [0, 4, 8, 10, 13, 26, 40, 41, 80, 62, 17, 33];

        let mut fast = rules.find_sets(&cards, usize::MAX);
        let mut slow = rules.find_sets_exhaustive(&cards, usize::MAX);
        for set in fast.iter_mut().chain(slow.iter_mut()) {
            set.sort_unstable();
        }
        fast.sort_unstable();
        slow.sort_unstable();
        assert_eq!(fast, slow);
    }

    #[test]
    fn test_has_any_set() {
        let rules = StandardRules::default();
        assert!(rules.has_any_set(&(0..81).collect::<Vec<_>>()));
        assert!(!rules.has_any_set(&[0, 1]));
        assert!(!rules.has_any_set(&[0, 1, 4]));
        assert!(!rules.has_any_set(&[]));
    }

    #[test]
    fn test_find_sets_respects_limit() {
        let rules = StandardRules::default();
        let all: Vec<Card> = (0..81).collect();
        assert_eq!(rules.find_sets(&all, 5).len(), 5);
        assert!(rules.find_sets(&all, 0).is_empty());
    }

    #[test]
    fn test_two_feature_values() {
        // Two values per feature: "all distinct" is impossible, only equal triples
        let rules = StandardRules::new(2, 2);
        assert!(!rules.is_set(&[0, 1, 2]));
        assert!(!rules.has_any_set(&[0, 1, 2, 3]));
    }

    #[test]
    fn test_huge_feature_count_does_not_overflow() {
        let rules = StandardRules::new(100, 3);
        assert_eq!(rules.deck_size(), usize::MAX);
        assert!(rules.is_set(&[0, 1, 2]));
        assert!(!rules.is_set(&[0, 1, 4]));
        assert_eq!(rules.find_sets(&[0, 1, 2, 4], usize::MAX).len(), 1);
        assert_eq!(rules.third_card(usize::MAX, 0), None);
    }
}
