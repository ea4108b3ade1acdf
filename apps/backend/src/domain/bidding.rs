use crate::domain::rules::{bid_order, BidRestriction};
use crate::domain::state::Round;
use crate::errors::domain::{DomainError, ValidationKind};

/// Check a bid set against the table's restriction.
///
/// Partial sets always pass. Once every seat has bid, the final bidder in
/// [`bid_order`] (the dealer) is the one whose bid broke the rule.
pub fn validate_bid_restriction(
    round: &Round,
    restriction: BidRestriction,
    bids: &[Option<u8>],
) -> Result<(), DomainError> {
    if restriction == BidRestriction::NoRestrictions || bids.iter().any(Option::is_none) {
        return Ok(());
    }

    let total: u32 = bids.iter().flatten().map(|&b| u32::from(b)).sum();
    let cards = u32::from(round.cards_count);
    let violated = match restriction {
        BidRestriction::CannotMatchCards => total == cards,
        BidRestriction::MustMatchCards => total != cards,
        BidRestriction::NoRestrictions => false,
    };
    if !violated {
        return Ok(());
    }

    let last = bid_order(round.dealer_index, bids.len())
        .last()
        .copied()
        .unwrap_or(round.dealer_index);
    let rule = match restriction {
        BidRestriction::CannotMatchCards => "must not equal",
        _ => "must equal",
    };
    Err(DomainError::validation(
        ValidationKind::InvalidBid,
        format!(
            "round {}: player {last} bids last and total bids {total} {rule} cards dealt {cards}",
            round.round_number
        ),
    ))
}
