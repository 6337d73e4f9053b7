/// Bytes of one party member as returned by the host.
pub type MonData = smallvec::SmallVec<[u8; 32]>;

/// Party slots selected by a slot mask.
pub type SlotList = smallvec::SmallVec<[u8; 6]>;

/// Decisions that arrived ahead of the poll that asks for them.
pub type Inbox<T> = smallvec::SmallVec<[T; 4]>;

#[macro_export]
macro_rules! slot_list {
    () => {
        $crate::smallvec::SmallVec::<[u8; 6]>::new()
    };
    ($($e : expr),+ $(,)?) => {
        $crate::smallvec::smallvec![$($e),+]
    }
}

#[macro_export]
macro_rules! mon_data {
    () => {
        $crate::smallvec::SmallVec::<[u8; 32]>::new()
    };
    ($($e : expr),+ $(,)?) => {
        $crate::smallvec::smallvec![$($e),+]
    }
}

/// Party slots addressed by a `GetMonData`/`SetMonData` slot mask.
/// A zero mask addresses only `active_slot`.
pub fn slots_from_mask(mask: u8, active_slot: u8) -> SlotList {
    if mask == 0 {
        return slot_list![active_slot];
    }
    (0..crate::types::host::PARTY_SIZE as u8)
        .filter(|i| mask & (1 << i) != 0)
        .collect()
}
