use super::opcode::Opcode;

/// Capacity of one battler's command buffer.
pub const COMMAND_BUFFER_SIZE: usize = 512;

/// One battler's command: byte 0 is the opcode, the rest is opcode-specific payload.
///
/// Owned by the scheduler side of a [crate::prelude::BattleSession]; handlers only read it.
/// Reads past the written length yield zero, matching a buffer that was cleared at battle start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommandBuffer {
    bytes: heapless::Vec<u8, COMMAND_BUFFER_SIZE>,
}

impl CommandBuffer {
    /// `None` if `bytes` does not fit.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        heapless::Vec::from_slice(bytes).ok().map(|bytes| Self { bytes })
    }

    pub fn with_opcode(opcode: Opcode, payload: &[u8]) -> Option<Self> {
        let mut bytes = heapless::Vec::new();
        bytes.push(opcode.as_u8()).ok()?;
        bytes.extend_from_slice(payload).ok()?;
        Some(Self { bytes })
    }

    #[inline]
    pub fn raw_opcode(&self) -> u8 {
        self.byte(0)
    }

    #[inline]
    pub fn opcode(&self) -> Option<Opcode> {
        Opcode::from_u8(self.raw_opcode())
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn payload(&self) -> &[u8] {
        self.bytes.get(1..).unwrap_or(&[])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn byte(&self, idx: usize) -> u8 {
        self.bytes.get(idx).copied().unwrap_or(0)
    }

    #[inline]
    pub fn flag(&self, idx: usize) -> bool {
        self.byte(idx) != 0
    }

    #[inline]
    pub fn u16_le(&self, idx: usize) -> u16 {
        u16::from_le_bytes([self.byte(idx), self.byte(idx + 1)])
    }

    #[inline]
    pub fn i16_le(&self, idx: usize) -> i16 {
        self.u16_le(idx) as i16
    }

    #[inline]
    pub fn u32_le(&self, idx: usize) -> u32 {
        u32::from_le_bytes([
            self.byte(idx),
            self.byte(idx + 1),
            self.byte(idx + 2),
            self.byte(idx + 3),
        ])
    }

    /// Bytes `from..from + len`, clipped to what was written.
    pub fn bytes_at(&self, from: usize, len: usize) -> &[u8] {
        let start = from.min(self.bytes.len());
        let end = from.saturating_add(len).min(self.bytes.len());
        &self.bytes[start..end]
    }

    /// Bytes from `from` to the end of the command.
    pub fn tail(&self, from: usize) -> &[u8] {
        self.bytes.get(from..).unwrap_or(&[])
    }
}
