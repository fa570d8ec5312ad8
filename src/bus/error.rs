use core::fmt;

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};

/// Error of a bus transaction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError<E> {
    /// The GPIO layer failed
    Pin(E),
    /// Device did not pull DATA low on the 9th clock
    NoAck(NoAcknowledgeSource),
    /// Address does not fit in 7 bits
    InvalidAddress(u8),
}

impl<E> From<E> for BusError<E> {
    fn from(err: E) -> Self {
        BusError::Pin(err)
    }
}

impl<E: fmt::Debug> embedded_hal::i2c::Error for BusError<E> {
    fn kind(&self) -> ErrorKind {
        match self {
            BusError::Pin(_) => ErrorKind::Bus,
            BusError::NoAck(source) => ErrorKind::NoAcknowledge(*source),
            BusError::InvalidAddress(_) => ErrorKind::Other,
        }
    }
}

impl<E: fmt::Debug> fmt::Display for BusError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::Pin(err) => write!(f, "GPIO error: {err:?}"),
            BusError::NoAck(source) => write!(f, "no acknowledge: {source}"),
            BusError::InvalidAddress(addr) => write!(f, "address {addr:#x} is not 7 bit"),
        }
    }
}
