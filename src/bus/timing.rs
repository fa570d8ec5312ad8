/// Every wait the bus engine makes, in nanoseconds
///
/// [`Timing::default()`] is the I2C standard-mode (100 kHz) minimum of each interval.
/// Tune it for the target clock and the bus capacitance,
/// or use [`Timing::immediate()`] to run without any wait.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    start_hold_ns: u32,
    start_setup_ns: u32,
    stop_setup_ns: u32,
    bus_free_ns: u32,
    data_setup_ns: u32,
    clock_high_ns: u32,
    clock_low_ns: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self::standard_mode()
    }
}

#[allow(missing_docs)]
impl Timing {
    /// Minimum intervals of a 100 kHz bus
    pub const fn standard_mode() -> Self {
        Self {
            start_hold_ns: 4_000,
            start_setup_ns: 4_700,
            stop_setup_ns: 4_000,
            bus_free_ns: 4_700,
            data_setup_ns: 250,
            clock_high_ns: 4_000,
            clock_low_ns: 4_700,
        }
    }

    /// No wait at all, only useful when the "bus" is a simulation
    pub const fn immediate() -> Self {
        Self {
            start_hold_ns: 0,
            start_setup_ns: 0,
            stop_setup_ns: 0,
            bus_free_ns: 0,
            data_setup_ns: 0,
            clock_high_ns: 0,
            clock_low_ns: 0,
        }
    }

    /// DATA low to CLOCK low, in a (repeated) start condition
    pub fn get_start_hold_ns(&self) -> u32 {
        self.start_hold_ns
    }

    pub fn set_start_hold_ns(mut self, ns: u32) -> Self {
        self.start_hold_ns = ns;
        self
    }

    /// CLOCK high to DATA low, in a repeated start condition
    pub fn get_start_setup_ns(&self) -> u32 {
        self.start_setup_ns
    }

    pub fn set_start_setup_ns(mut self, ns: u32) -> Self {
        self.start_setup_ns = ns;
        self
    }

    /// CLOCK high to DATA high, in a stop condition
    pub fn get_stop_setup_ns(&self) -> u32 {
        self.stop_setup_ns
    }

    pub fn set_stop_setup_ns(mut self, ns: u32) -> Self {
        self.stop_setup_ns = ns;
        self
    }

    /// Idle time after a stop condition
    pub fn get_bus_free_ns(&self) -> u32 {
        self.bus_free_ns
    }

    pub fn set_bus_free_ns(mut self, ns: u32) -> Self {
        self.bus_free_ns = ns;
        self
    }

    /// DATA settled to CLOCK rising
    pub fn get_data_setup_ns(&self) -> u32 {
        self.data_setup_ns
    }

    pub fn set_data_setup_ns(mut self, ns: u32) -> Self {
        self.data_setup_ns = ns;
        self
    }

    pub fn get_clock_high_ns(&self) -> u32 {
        self.clock_high_ns
    }

    pub fn set_clock_high_ns(mut self, ns: u32) -> Self {
        self.clock_high_ns = ns;
        self
    }

    pub fn get_clock_low_ns(&self) -> u32 {
        self.clock_low_ns
    }

    pub fn set_clock_low_ns(mut self, ns: u32) -> Self {
        self.clock_low_ns = ns;
        self
    }

    /// Time one [`write_byte()`](super::SoftI2c::write_byte) spends waiting, ACK clock included
    pub fn byte_ns(&self) -> u64 {
        let per_bit = u64::from(self.data_setup_ns)
            + u64::from(self.clock_high_ns)
            + u64::from(self.clock_low_ns);
        per_bit * 9
    }
}
