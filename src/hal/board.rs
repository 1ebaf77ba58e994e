//! GPIO-backed hardware context.
//!
//! Drives the HV enable, pulse and GP1 lines and watches the GP0 trigger.
//! Charge PWM and the HV timeout are handled by the analog front end; this
//! context only records the configured values and mode flags.

use esp_idf_svc::hal::delay::Ets;
use esp_idf_svc::hal::gpio::{AnyInputPin, AnyOutputPin, Input, Output, PinDriver};
use esp_idf_svc::sys::EspError;

use crate::config::PulseConfig;
use crate::console::StatusWord;
use crate::hardware::HardwareContext;
use crate::protocol::Request;

/// Fast-trigger timing unit: 8 ns.
const CYCLES_PER_US: u32 = 125;

/// Pins used by [`PulserBoard`].
pub struct BoardPins {
    pub hv_enable: AnyOutputPin,
    pub pulse: AnyOutputPin,
    pub gp1: AnyOutputPin,
    /// GP0: fast-trigger input, active high.
    pub trigger: AnyInputPin,
    /// HV-ready comparator, active high.
    pub charged: AnyInputPin,
}

pub struct PulserBoard<'d> {
    hv_enable: PinDriver<'d, AnyOutputPin, Output>,
    pulse: PinDriver<'d, AnyOutputPin, Output>,
    gp1: PinDriver<'d, AnyOutputPin, Output>,
    trigger: PinDriver<'d, AnyInputPin, Input>,
    charged: PinDriver<'d, AnyInputPin, Input>,
    armed: bool,
    timeout_active: bool,
    hvp_internal: bool,
    timing: PulseConfig,
}

impl PulserBoard<'static> {
    pub fn new(pins: BoardPins) -> Result<Self, EspError> {
        let mut hv_enable = PinDriver::output(pins.hv_enable)?;
        let mut pulse = PinDriver::output(pins.pulse)?;
        hv_enable.set_low()?;
        pulse.set_low()?;

        Ok(Self {
            hv_enable,
            pulse,
            gp1: PinDriver::output(pins.gp1)?,
            trigger: PinDriver::input(pins.trigger)?,
            charged: PinDriver::input(pins.charged)?,
            armed: false,
            timeout_active: true,
            hvp_internal: true,
            timing: PulseConfig::new(),
        })
    }
}

impl PulserBoard<'_> {
    fn fire(&mut self, width_us: u32) -> Result<(), EspError> {
        self.pulse.set_high()?;
        Ets::delay_us(width_us);
        self.pulse.set_low()
    }

    fn apply(&mut self, request: Request) -> Result<bool, EspError> {
        match request {
            Request::Arm => {
                self.hv_enable.set_high()?;
                self.armed = true;
            }
            Request::Disarm => {
                self.hv_enable.set_low()?;
                self.armed = false;
            }
            Request::Pulse => {
                if !self.armed {
                    return Ok(false);
                }
                self.fire(self.timing.pulse_time_micros)?;
            }
            Request::Status => {}
            Request::EnableTimeout => self.timeout_active = true,
            Request::DisableTimeout => self.timeout_active = false,
            Request::FastTrigger => return Ok(self.armed),
            Request::ConfigPulseTime(us) => self.timing.pulse_time_micros = us,
            Request::ConfigPulsePower(power) => self.timing.pulse_power = power,
            Request::InternalHvp => self.hvp_internal = true,
            Request::ExternalHvp => self.hvp_internal = false,
            Request::ConfigPulseDelayCycles(c) => self.timing.pulse_delay_cycles = c,
            Request::ConfigPulseTimeCycles(c) => self.timing.pulse_time_cycles = c,
            Request::Gp1Toggle => self.gp1.toggle()?,
            Request::Gp1Low => self.gp1.set_low()?,
            Request::Gp1High => self.gp1.set_high()?,
        }
        Ok(true)
    }
}

impl HardwareContext for PulserBoard<'_> {
    fn execute(&mut self, request: Request) -> bool {
        self.apply(request).unwrap_or(false)
    }

    fn status(&mut self) -> StatusWord {
        let mut status = StatusWord::empty();
        status.set(StatusWord::ARMED, self.armed);
        status.set(StatusWord::CHARGED, self.charged.is_high());
        status.set(StatusWord::TIMEOUT_ACTIVE, self.timeout_active);
        status.set(StatusWord::HVP_INTERNAL, self.hvp_internal);
        status
    }

    fn wait_for_trigger(&mut self) {
        while self.trigger.is_low() {
            core::hint::spin_loop();
        }
        Ets::delay_us(self.timing.pulse_delay_cycles / CYCLES_PER_US);
        let width = (self.timing.pulse_time_cycles / CYCLES_PER_US).max(1);
        let _ = self.fire(width);
    }
}
