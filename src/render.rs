//! Textual output for meter readings.
//!
//! Formatting is split from presentation: `format_reading` builds the text
//! for one reading, `present` writes it out (and, in single-line mode, erases
//! whatever the previous call left on the terminal).

use std::io::{self, Write};

use crate::meter::Reading;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    LineByLine,
    SingleLine,
    Csv,
    CsvWithHeader,
}

impl OutputMode {
    /// Map the numeric `-m` CLI flag to a mode.
    pub fn from_flag(flag: u8) -> Option<OutputMode> {
        match flag {
            0 => Some(OutputMode::LineByLine),
            1 => Some(OutputMode::SingleLine),
            2 => Some(OutputMode::Csv),
            3 => Some(OutputMode::CsvWithHeader),
            _ => None,
        }
    }
}

pub struct Renderer {
    mode: OutputMode,
    with_power: bool,
    // length of the previous single-line output, excluding the trailing \r
    last_line_len: usize,
}

impl Renderer {
    pub fn new(mode: OutputMode, with_power: bool) -> Renderer {
        Renderer {
            mode,
            with_power,
            last_line_len: 0,
        }
    }

    /// Pure formatting step: the text for one reading, without line ending.
    pub fn format_reading(&self, reading: &Reading) -> String {
        let mut line = match self.mode {
            OutputMode::LineByLine | OutputMode::SingleLine => {
                format!("{:.2} V {:.1} mA", reading.voltage_v, reading.current_ma)
            }
            OutputMode::Csv | OutputMode::CsvWithHeader => {
                format!("{:.2},{:.1}", reading.voltage_v, reading.current_ma)
            }
        };
        if self.with_power {
            match self.mode {
                OutputMode::LineByLine | OutputMode::SingleLine => {
                    line.push_str(&format!(" {:.0} mW", reading.power_mw()));
                }
                OutputMode::Csv | OutputMode::CsvWithHeader => {
                    line.push_str(&format!(",{:.0}", reading.power_mw()));
                }
            }
        }
        line
    }

    /// Emit the session header, if the mode has one. Call once, before the
    /// first reading.
    pub fn write_header(&self, out: &mut impl Write) -> io::Result<()> {
        if self.mode == OutputMode::CsvWithHeader {
            writeln!(out, "\"HatDriveTool\",\"Meter\"")?;
            write!(out, "\"Voltage [V]\",\"Current [mA]\"")?;
            if self.with_power {
                write!(out, ",\"Power [mW]\"")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Side-effecting presentation step for one reading.
    pub fn present(&mut self, out: &mut impl Write, reading: &Reading) -> io::Result<()> {
        let line = self.format_reading(reading);
        match self.mode {
            OutputMode::SingleLine => {
                if self.last_line_len > 0 {
                    write!(out, "{}\r", " ".repeat(self.last_line_len))?;
                }
                self.last_line_len = line.len();
                write!(out, "{}\r", line)?;
                // update the terminal in place
                out.flush()?;
            }
            OutputMode::LineByLine | OutputMode::Csv | OutputMode::CsvWithHeader => {
                writeln!(out, "{}", line)?;
            }
        }
        Ok(())
    }
}
