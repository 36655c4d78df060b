pub mod eeprom;
pub mod ina219;
