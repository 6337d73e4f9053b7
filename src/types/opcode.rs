use enum_map::Enum;

/// Controller command identifiers shared by every controller variant.
///
/// The declaration order is the wire value: byte 0 of a command buffer holds
/// `opcode as u8`. The catalogue is closed; [Opcode::COUNT] is the size of every
/// command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Enum)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Opcode {
    GetMonData,
    GetRawMonData,
    SetMonData,
    SetRawMonData,
    LoadMonSprite,
    SwitchInAnim,
    ReturnMonToBall,
    DrawTrainerPic,
    TrainerSlide,
    TrainerSlideBack,
    FaintAnimation,
    PaletteFade,
    SuccessBallThrowAnim,
    BallThrowAnim,
    Pause,
    MoveAnimation,
    PrintString,
    PrintSelectionString,
    ChooseAction,
    UnknownYesNoBox,
    ChooseMove,
    ChooseItem,
    ChoosePokemon,
    Cmd23,
    HealthBarUpdate,
    ExpUpdate,
    StatusIconUpdate,
    StatusAnimation,
    StatusXor,
    DataTransfer,
    Dma3Transfer,
    PlayBgm,
    Cmd32,
    TwoReturnValues,
    ChosenMonReturnValue,
    OneReturnValue,
    OneReturnValueDuplicate,
    ClearUnkVar,
    SetUnkVar,
    ClearUnkFlag,
    ToggleUnkFlag,
    HitAnimation,
    CantSwitch,
    PlaySe,
    PlayFanfare,
    FaintingCry,
    IntroSlide,
    IntroTrainerBallThrow,
    DrawPartyStatusSummary,
    HidePartyStatusSummary,
    EndBounceEffect,
    SpriteInvisibility,
    BattleAnimation,
    LinkStandbyMsg,
    ResetActionMoveSelection,
    EndLinkBattle,
    TerminatorNop,
}

crate::impl_display_from_debug!(Opcode);

impl Opcode {
    pub const COUNT: usize = <Self as Enum>::LENGTH;

    /// `None` when `raw` lies past the end of the catalogue.
    #[inline]
    pub fn from_u8(raw: u8) -> Option<Self> {
        let idx = raw as usize;
        if idx < Self::COUNT {
            Some(Self::from_usize(idx))
        } else {
            None
        }
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self.into_usize() as u8
    }

    /// Opcodes whose handler asks the remote participant for a choice.
    #[inline]
    pub fn is_choice(self) -> bool {
        matches!(
            self,
            Opcode::ChooseAction | Opcode::ChooseMove | Opcode::ChooseItem | Opcode::ChoosePokemon
        )
    }

    pub fn iter() -> impl Iterator<Item = Opcode> {
        (0..Self::COUNT).map(Self::from_usize)
    }
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_u8(value).ok_or(value)
    }
}

impl From<Opcode> for u8 {
    fn from(value: Opcode) -> Self {
        value.as_u8()
    }
}
