// Conversion between the byte the Duet stores and the value shown to the user. Most registers
// hold the value directly, volume style registers are shifted or negated so they fit a byte.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Encoding {
    Identity,

    /// Output levels run from -64 to 0 and are stored as their magnitude.
    SignInverted,

    /// The register holds the distance from the given minimum.
    Offset(i16),
}

impl Encoding {
    /// Returns `None` when the value can't be represented in a single wire byte.
    pub fn encode(&self, value: i16) -> Option<u8> {
        let wire = match self {
            Encoding::Identity => value,
            Encoding::SignInverted => value.checked_neg()?,
            Encoding::Offset(minimum) => value.checked_sub(*minimum)?,
        };
        u8::try_from(wire).ok()
    }

    pub fn decode(&self, wire: u8) -> i16 {
        let wire = i16::from(wire);
        match self {
            Encoding::Identity => wire,
            Encoding::SignInverted => -wire,
            Encoding::Offset(minimum) => wire + minimum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_level_is_sign_inverted() {
        assert_eq!(Encoding::SignInverted.encode(-5), Some(5));
        assert_eq!(Encoding::SignInverted.encode(-20), Some(20));
        assert_eq!(Encoding::SignInverted.decode(20), -20);
        for level in -64..=0 {
            let wire = Encoding::SignInverted.encode(level);
            assert_eq!(wire.map(|w| Encoding::SignInverted.decode(w)), Some(level));
        }
    }

    #[test]
    fn channel_level_is_offset_from_minimum() {
        let encoding = Encoding::Offset(-48);
        assert_eq!(encoding.encode(0), Some(48));
        assert_eq!(encoding.encode(-48), Some(0));
        assert_eq!(encoding.decode(0), -48);
        for level in -48..=6 {
            let wire = encoding.encode(level);
            assert_eq!(wire.map(|w| encoding.decode(w)), Some(level));
        }
    }

    #[test]
    fn pan_is_offset_from_its_own_minimum() {
        let encoding = Encoding::Offset(-64);
        assert_eq!(encoding.encode(0), Some(64));
        assert_eq!(encoding.decode(0), -64);
        assert_eq!(encoding.decode(128), 64);
        for pan in -64..=64 {
            let wire = encoding.encode(pan);
            assert_eq!(wire.map(|w| encoding.decode(w)), Some(pan));
        }
    }

    #[test]
    fn values_outside_a_byte_are_refused() {
        assert_eq!(Encoding::Identity.encode(256), None);
        assert_eq!(Encoding::Identity.encode(-1), None);
        assert_eq!(Encoding::SignInverted.encode(1), None);
        assert_eq!(Encoding::Offset(-48).encode(-49), None);
    }
}
