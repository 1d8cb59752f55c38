//! Single-pin handle for `embedded-hal` consumers

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin, StatefulOutputPin};

use super::{Gpio, PinId, PinState, PortRegisters};

/// One pin of a port
///
/// Does not configure the pin; call [`Gpio::init`] first. An `inverted` pin
/// is active-low: "high" through the traits drives the line low.
pub struct Pin<'a, R: PortRegisters + ?Sized> {
    port: Gpio<'a, R>,
    id: PinId,
    inverted: bool,
}

impl<'a, R: PortRegisters + ?Sized> Pin<'a, R> {
    pub(super) fn new(port: Gpio<'a, R>, id: PinId) -> Self {
        Self {
            port,
            id,
            inverted: false,
        }
    }

    /// Treat the pin as active-low
    pub fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    pub fn id(&self) -> PinId {
        self.id
    }

    fn logical(&self, state: PinState) -> PinState {
        if self.inverted {
            !state
        } else {
            state
        }
    }
}

impl<R: PortRegisters + ?Sized> ErrorType for Pin<'_, R> {
    type Error = Infallible;
}

impl<R: PortRegisters + ?Sized> OutputPin for Pin<'_, R> {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.port.write_pin(self.id.mask(), self.logical(PinState::Set));
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.port.write_pin(self.id.mask(), self.logical(PinState::Reset));
        Ok(())
    }
}

impl<R: PortRegisters + ?Sized> StatefulOutputPin for Pin<'_, R> {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        let latch = self.port.read_output_pin(self.id.mask());
        Ok(self.logical(latch).is_set())
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        self.is_set_high().map(|high| !high)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.port.toggle_pin(self.id.mask());
        Ok(())
    }
}

impl<R: PortRegisters + ?Sized> InputPin for Pin<'_, R> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let level = self.port.read_pin(self.id.mask());
        Ok(self.logical(level).is_set())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}
