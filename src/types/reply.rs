use super::buffer::COMMAND_BUFFER_SIZE;
use super::opcode::Opcode;

/// Largest data block a `DataTransfer` reply can carry.
pub const REPLY_DATA_CAPACITY: usize = COMMAND_BUFFER_SIZE - 4;

pub type ReplyData = heapless::Vec<u8, REPLY_DATA_CAPACITY>;

/// Answer written by a handler into the battler's reply slot for the scheduler to pick up.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reply {
    DataTransfer(ReplyData),
    TwoReturnValues { ret8: u8, ret16: u16 },
    ChosenMonReturnValue { party_slot: u8, order: [u8; 3] },
    OneReturnValue(u16),
}

impl Reply {
    pub fn opcode(&self) -> Opcode {
        match self {
            Reply::DataTransfer(..) => Opcode::DataTransfer,
            Reply::TwoReturnValues { .. } => Opcode::TwoReturnValues,
            Reply::ChosenMonReturnValue { .. } => Opcode::ChosenMonReturnValue,
            Reply::OneReturnValue(..) => Opcode::OneReturnValue,
        }
    }

    /// Builds a `DataTransfer` reply, truncating at [REPLY_DATA_CAPACITY].
    pub fn data_transfer(data: &[u8]) -> Self {
        let len = data.len().min(REPLY_DATA_CAPACITY);
        let mut out = ReplyData::new();
        // Cannot fail: `len` is clipped to the capacity.
        let _ = out.extend_from_slice(&data[..len]);
        Reply::DataTransfer(out)
    }

    /// Byte layout of the reply as the scheduler reads it from the reply buffer.
    pub fn to_bytes(&self) -> heapless::Vec<u8, COMMAND_BUFFER_SIZE> {
        let mut out = heapless::Vec::new();
        let op = self.opcode().as_u8();
        // Every variant fits: the largest is 4 header bytes plus REPLY_DATA_CAPACITY.
        let _ = match self {
            Reply::DataTransfer(data) => {
                let [lo, hi] = (data.len() as u16).to_le_bytes();
                out.extend_from_slice(&[op, 0, lo, hi]).and_then(|_| out.extend_from_slice(data))
            }
            Reply::TwoReturnValues { ret8, ret16 } => {
                let [lo, hi] = ret16.to_le_bytes();
                out.extend_from_slice(&[op, *ret8, lo, hi])
            }
            Reply::ChosenMonReturnValue { party_slot, order } => {
                out.extend_from_slice(&[op, *party_slot, order[0], order[1], order[2]])
            }
            Reply::OneReturnValue(ret16) => {
                let [lo, hi] = ret16.to_le_bytes();
                out.extend_from_slice(&[op, 0, lo, hi])
            }
        };
        out
    }
}
