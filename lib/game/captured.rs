use crate::chess::Color;
use bitflags::bitflags;

bitflags! {
    /// Latches recording which kings have been captured since the game started.
    #[derive(Default)]
    pub struct KingsCaptured: u8 {
        const WHITE = 0b01;
        const BLACK = 0b10;
    }
}

impl KingsCaptured {
    /// The latch of the king of the given [`Color`].
    #[inline(always)]
    pub fn of(side: Color) -> Self {
        match side {
            Color::White => KingsCaptured::WHITE,
            Color::Black => KingsCaptured::BLACK,
        }
    }

    /// Whether the king of the given [`Color`] has been captured.
    #[inline(always)]
    pub fn has(&self, side: Color) -> bool {
        self.contains(KingsCaptured::of(side))
    }
}
