//! Reader for the 24C32 ID EEPROM (4kB, two-byte word addressing).

use embedded_hal::i2c::I2c;

/// Capacity of the 24C32 in bytes.
pub const EEPROM_SIZE: usize = 4096;

pub struct Eeprom24c32<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Eeprom24c32<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Eeprom24c32<I2C> {
        Eeprom24c32 { i2c, address }
    }

    /// Read the full EEPROM image: set the word address to 0x0000, then
    /// sequentially read all 4096 bytes.
    pub fn read_all(&mut self) -> Result<Vec<u8>, I2C::Error> {
        let mut image = vec![0u8; EEPROM_SIZE];
        self.i2c.write_read(self.address, &[0x00, 0x00], &mut image)?;
        Ok(image)
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    #[test]
    fn reads_full_image_from_word_address_zero() {
        let mut contents = vec![0u8; EEPROM_SIZE];
        contents[0] = 0x52;
        contents[1] = 0x50;
        contents[EEPROM_SIZE - 1] = 0xFF;

        let mock = I2cMock::new(&[Transaction::write_read(
            0x50,
            vec![0x00, 0x00],
            contents.clone(),
        )]);
        let mut eeprom = Eeprom24c32::new(mock, 0x50);

        let image = eeprom.read_all().unwrap();
        assert_eq!(image.len(), EEPROM_SIZE);
        assert_eq!(image, contents);

        eeprom.release().done();
    }

    #[test]
    fn uses_the_configured_address() {
        let mock = I2cMock::new(&[Transaction::write_read(
            0x51,
            vec![0x00, 0x00],
            vec![0u8; EEPROM_SIZE],
        )]);
        let mut eeprom = Eeprom24c32::new(mock, 0x51);
        eeprom.read_all().unwrap();
        eeprom.release().done();
    }
}
