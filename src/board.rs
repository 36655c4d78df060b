//! Mapping from HatDrive! board variants to their bus wiring.

/// Supported board variants. The variant decides which I2C bus the power
/// sensor sits on and at which address the ID EEPROM answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BoardVariant {
    /// HatDrive! Top, sensor on i2c-0
    Top,
    /// HatDrive! Bottom, sensor on i2c-1
    Bottom,
    /// Waveshare variant, sensor on i2c-1, EEPROM at 0x51
    #[value(name = "ws")]
    Waveshare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardProfile {
    pub variant: BoardVariant,
    pub bus_index: u8,
    pub eeprom_address: u8,
}

impl BoardVariant {
    pub fn profile(self) -> BoardProfile {
        let (bus_index, eeprom_address) = match self {
            BoardVariant::Top => (0, 0x50),
            BoardVariant::Bottom => (1, 0x50),
            BoardVariant::Waveshare => (1, 0x51),
        };
        BoardProfile {
            variant: self,
            bus_index,
            eeprom_address,
        }
    }
}

impl BoardProfile {
    /// Path of the Linux I2C character device for this board's sensor bus.
    pub fn bus_device(&self) -> std::path::PathBuf {
        std::path::PathBuf::from(format!("/dev/i2c-{}", self.bus_index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn profile_table() {
        let cases = [
            (BoardVariant::Top, 0, 0x50),
            (BoardVariant::Bottom, 1, 0x50),
            (BoardVariant::Waveshare, 1, 0x51),
        ];
        for (variant, bus_index, eeprom_address) in cases {
            let profile = variant.profile();
            assert_eq!(profile.variant, variant);
            assert_eq!(profile.bus_index, bus_index);
            assert_eq!(profile.eeprom_address, eeprom_address);
        }
    }

    #[test]
    fn cli_names() {
        assert_eq!(
            BoardVariant::from_str("top", false).unwrap(),
            BoardVariant::Top
        );
        assert_eq!(
            BoardVariant::from_str("bottom", false).unwrap(),
            BoardVariant::Bottom
        );
        assert_eq!(
            BoardVariant::from_str("ws", false).unwrap(),
            BoardVariant::Waveshare
        );
    }

    #[test]
    fn unknown_variant_is_rejected() {
        assert!(BoardVariant::from_str("waveshare", false).is_err());
        assert!(BoardVariant::from_str("middle", false).is_err());
        assert!(BoardVariant::from_str("", false).is_err());
    }

    #[test]
    fn resolution_is_idempotent() {
        for variant in [
            BoardVariant::Top,
            BoardVariant::Bottom,
            BoardVariant::Waveshare,
        ] {
            assert_eq!(variant.profile(), variant.profile());
        }
    }

    #[test]
    fn bus_device_path() {
        assert_eq!(
            BoardVariant::Top.profile().bus_device(),
            std::path::PathBuf::from("/dev/i2c-0")
        );
        assert_eq!(
            BoardVariant::Waveshare.profile().bus_device(),
            std::path::PathBuf::from("/dev/i2c-1")
        );
    }
}
