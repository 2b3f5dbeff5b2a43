//! Protocol constants and default link parameters

/// Default pulse width in microseconds
pub const DEFAULT_PULSE_WIDTH_US: u32 = 350;

/// Default MCU clock in Hz (ATtiny13 internal oscillator / 8)
pub const DEFAULT_CLOCK_HZ: u32 = 1_200_000;

/// Default SYNC symbol pulse counts:
/// ```text
///  _
/// |1|_______________________________ 31
/// ```
pub const DEFAULT_SYNC_PULSES: (u8, u8) = (1, 31);

/// Default ONE symbol pulse counts:
/// ```text
///  ___
/// | 3 |_ 1
/// ```
pub const DEFAULT_ONE_PULSES: (u8, u8) = (3, 1);

/// Default ZERO symbol pulse counts:
/// ```text
///  _
/// |1|___ 3
/// ```
pub const DEFAULT_ZERO_PULSES: (u8, u8) = (1, 3);

/// Default number of times a frame is sent per `send()`
pub const DEFAULT_REPEAT_COUNT: u8 = 10;

/// Repeat counts below this are legal but rarely survive a real channel
pub const MIN_RECOMMENDED_REPEAT_COUNT: u8 = 5;

/// Default transmit pin number (PB0)
pub const DEFAULT_TX_PIN: u8 = 0;

/// Default receive pin number (PB1)
pub const DEFAULT_RX_PIN: u8 = 1;

/// Smallest frame the link can carry, in bytes
pub const MIN_FRAME_SIZE: usize = 1;

/// Largest frame the link can carry, in bytes
pub const MAX_FRAME_SIZE: usize = 255;

/// Receive tolerance around each nominal pulse count, in percent
pub const TOLERANCE_PERCENT: u16 = 70;

/// Largest value the 8-bit pulse counter can hold
pub const COUNTER_MAX: u8 = u8::MAX;

/// Previous-interval value before any edge has been seen.
///
/// Chosen outside every SYNC high window so the first rising edge can
/// never complete a sync pair.
pub const INITIAL_PREV_TICKS: u8 = 0xFF;

/// Timer prescaler divisors available on the 8-bit timer, finest first
pub const PRESCALER_DIVISORS: [u16; 5] = [1, 8, 64, 256, 1024];

/// Number of bits per frame byte
pub const BITS_PER_BYTE: u8 = 8;
