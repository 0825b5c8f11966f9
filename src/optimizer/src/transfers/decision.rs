use crate::player::Player;
use serde::Serialize;

/// One player swapped for another, with the projected points gained over
/// the rest of the horizon.
#[derive(Debug, Clone, Serialize)]
pub struct Transfer {
    pub player_out: u32,
    pub player_in: u32,
    pub out_name: String,
    pub in_name: String,
    pub gain: f32,
}

impl Transfer {
    pub fn new(out: &Player, incoming: &Player, gain: f32) -> Self {
        Transfer {
            player_out: out.id,
            player_in: incoming.id,
            out_name: out.name.clone(),
            in_name: incoming.name.clone(),
            gain,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub enum TransferDecision {
    NoChange,
    Single(Transfer),
    Double(Transfer, Transfer),
}

impl TransferDecision {
    pub fn transfer_count(&self) -> u8 {
        match self {
            TransferDecision::NoChange => 0,
            TransferDecision::Single(_) => 1,
            TransferDecision::Double(_, _) => 2,
        }
    }

    pub fn transfers(&self) -> Vec<&Transfer> {
        match self {
            TransferDecision::NoChange => Vec::new(),
            TransferDecision::Single(transfer) => vec![transfer],
            TransferDecision::Double(first, second) => vec![first, second],
        }
    }

    pub fn total_gain(&self) -> f32 {
        self.transfers().iter().map(|t| t.gain).sum()
    }
}
