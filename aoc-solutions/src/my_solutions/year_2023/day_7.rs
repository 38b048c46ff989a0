use crate::utils::parse_lines;
use anyhow::{Context, anyhow, bail};
use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;
use std::fmt;
use tracing::{debug, trace};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 7, tags = ["2023"])]
pub struct Solver;

/// Hand types in increasing order of strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandType {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfKind,
    FullHouse,
    FourOfKind,
    FiveOfKind,
}

impl HandType {
    /// Classify from group sizes sorted largest first. `jokers` join the
    /// largest group.
    fn from_groups(groups: &[usize], jokers: usize) -> Self {
        let first = groups.first().copied().unwrap_or(0) + jokers;
        let second = groups.get(1).copied().unwrap_or(0);
        match (first, second) {
            (5, _) => HandType::FiveOfKind,
            (4, _) => HandType::FourOfKind,
            (3, 2) => HandType::FullHouse,
            (3, _) => HandType::ThreeOfKind,
            (2, 2) => HandType::TwoPair,
            (2, _) => HandType::OnePair,
            _ => HandType::HighCard,
        }
    }
}

const JOKER: u8 = b'J';

fn card_value(card: u8, jokers: bool) -> u8 {
    match card {
        b'2'..=b'9' => card - b'0',
        b'T' => 10,
        JOKER if jokers => 1,
        JOKER => 11,
        b'Q' => 12,
        b'K' => 13,
        b'A' => 14,
        _ => 0,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Hand {
    pub cards: [u8; 5],
    pub bid: u64,
}

impl Hand {
    pub fn hand_type(&self, jokers: bool) -> HandType {
        let counts = self
            .cards
            .iter()
            .filter(|&&c| !(jokers && c == JOKER))
            .counts();
        let wild = if jokers {
            self.cards.iter().filter(|&&c| c == JOKER).count()
        } else {
            0
        };
        let groups: Vec<usize> = counts.into_values().sorted_unstable_by(|a, b| b.cmp(a)).collect();
        HandType::from_groups(&groups, wild)
    }

    /// Sort key: type first, then card values left to right
    fn strength(&self, jokers: bool) -> (HandType, [u8; 5]) {
        (
            self.hand_type(jokers),
            self.cards.map(|c| card_value(c, jokers)),
        )
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:>4}", String::from_utf8_lossy(&self.cards), self.bid)
    }
}

fn parse_hand(line: &str) -> anyhow::Result<Hand> {
    let (cards, bid) = line
        .split_once(char::is_whitespace)
        .ok_or_else(|| anyhow!("expected '<cards> <bid>'"))?;
    let cards: [u8; 5] = cards
        .as_bytes()
        .try_into()
        .map_err(|_| anyhow!("hand {cards:?} must have 5 cards"))?;
    if let Some(bad) = cards.iter().find(|&&c| card_value(c, false) == 0) {
        bail!("unknown card {:?}", char::from(*bad));
    }
    let bid = bid.trim().parse().with_context(|| format!("bad bid {bid:?}"))?;
    Ok(Hand { cards, bid })
}

fn total_winnings(hands: &[Hand], jokers: bool) -> u64 {
    let ranked: Vec<&Hand> = hands
        .iter()
        .sorted_by_cached_key(|h| h.strength(jokers))
        .collect();

    ranked
        .iter()
        .enumerate()
        .map(|(i, hand)| {
            let points = hand.bid * (i as u64 + 1);
            trace!(rank = i + 1, %hand, kind = ?hand.hand_type(jokers), points);
            points
        })
        .sum()
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Hand>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let hands = parse_lines(input, parse_hand)?;
        debug!(hands = hands.len(), "dealt");
        Ok(hands)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_winnings(shared, false).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(total_winnings(shared, true).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const SAMPLE: &str = indoc! {"
        32T3K 765
        T55J5 684
        KK677 28
        KTJJT 220
        QQQJA 483
    "};

    fn hand(cards: &str) -> Hand {
        parse_hand(&format!("{cards} 1")).unwrap()
    }

    #[test]
    fn test_sample() {
        let mut shared = Solver::parse(SAMPLE).unwrap();
        assert_eq!(<Solver as PartSolver<1>>::solve(&mut shared).unwrap(), "6440");
        assert_eq!(<Solver as PartSolver<2>>::solve(&mut shared).unwrap(), "5905");
    }

    #[test]
    fn test_hand_types() {
        assert_eq!(hand("32T3K").hand_type(false), HandType::OnePair);
        assert_eq!(hand("KK677").hand_type(false), HandType::TwoPair);
        assert_eq!(hand("T55J5").hand_type(false), HandType::ThreeOfKind);
        assert_eq!(hand("23332").hand_type(false), HandType::FullHouse);
        assert_eq!(hand("23456").hand_type(false), HandType::HighCard);
    }

    #[test]
    fn test_joker_upgrades() {
        assert_eq!(hand("T55J5").hand_type(true), HandType::FourOfKind);
        assert_eq!(hand("KTJJT").hand_type(true), HandType::FourOfKind);
        assert_eq!(hand("JJJJJ").hand_type(true), HandType::FiveOfKind);
        assert_eq!(hand("2233J").hand_type(true), HandType::FullHouse);
        assert_eq!(hand("2345J").hand_type(true), HandType::OnePair);
    }

    #[test]
    fn test_joker_is_weakest_in_tie_break() {
        assert!(hand("JKKK2").strength(true) < hand("QQQQ2").strength(true));
        assert!(hand("JKKK3").strength(false) > hand("2KKK3").strength(false));
    }

    #[test]
    fn test_bad_hands_rejected() {
        assert!(Solver::parse("32T3 765").is_err());
        assert!(Solver::parse("32T3X 765").is_err());
        assert!(Solver::parse("32T3K").is_err());
    }
}
