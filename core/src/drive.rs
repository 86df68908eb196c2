/// Rotation sense of the motor, as seen on the direction line
#[derive(Clone, Debug, PartialEq, Eq, Copy)]
pub enum Direction {
    /// direction line held low
    Forward,
    /// direction line held high
    Reverse,
}

impl Direction {
    #[inline]
    pub fn is_high(&self) -> bool {
        match self {
            Direction::Forward => false,
            Direction::Reverse => true,
        }
    }
}

/// A single motion request: hold `direction` and emit `steps` pulses.
///
/// Steps are an opaque pulse count, they carry no calibration to
/// degrees or distance.
#[derive(Clone, Debug, PartialEq, Eq, Copy)]
pub struct Command {
    pub direction: Direction,
    pub steps: u32,
}

impl Command {
    pub const fn new(direction: Direction, steps: u32) -> Self {
        Self { direction, steps }
    }

    pub const fn forward(steps: u32) -> Self {
        Self::new(Direction::Forward, steps)
    }

    pub const fn reverse(steps: u32) -> Self {
        Self::new(Direction::Reverse, steps)
    }

    /// A command that only sets the direction line
    pub const fn idle() -> Self {
        Self::forward(0)
    }

    /// Negative values select reverse, the magnitude is the step count
    #[inline]
    pub fn from_signed(steps: i32) -> Self {
        if steps < 0 {
            Self::reverse(steps.unsigned_abs())
        } else {
            Self::forward(steps.unsigned_abs())
        }
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.steps == 0
    }
}
