//! Physical length conversion and page size presets.
//!
//! The engine works in a single linear unit. Callers pick a [`Resolution`]
//! (units per inch) and convert physical lengths with it before building a
//! [`Config`](crate::Config).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Linear units per physical inch.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Resolution {
    units_per_inch: f64,
}

impl Resolution {
    /// The on-screen CSS resolution, 96 units per inch.
    pub const SCREEN: Resolution = Resolution {
        units_per_inch: 96.0,
    };

    /// Creates a resolution with the given number of units per inch.
    pub fn new(units_per_inch: f64) -> Self {
        Self { units_per_inch }
    }

    /// Returns the number of units per inch.
    pub fn units_per_inch(&self) -> f64 {
        self.units_per_inch
    }

    /// Converts inches to layout units.
    pub fn inches(&self, inches: f64) -> f64 {
        inches * self.units_per_inch
    }

    /// Converts millimetres to layout units.
    pub fn millimeters(&self, mm: f64) -> f64 {
        mm / MM_PER_INCH * self.units_per_inch
    }

    /// Converts layout units back to inches.
    pub fn to_inches(&self, units: f64) -> f64 {
        if self.units_per_inch == 0.0 {
            0.0
        } else {
            units / self.units_per_inch
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::SCREEN
    }
}

/// Physical page dimensions, stored in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageSize {
    /// Page width in inches.
    pub width_in: f64,
    /// Page height in inches.
    pub height_in: f64,
}

impl PageSize {
    /// US Letter, 8.5 x 11 in.
    pub const LETTER: PageSize = PageSize {
        width_in: 8.5,
        height_in: 11.0,
    };

    /// US Legal, 8.5 x 14 in.
    pub const LEGAL: PageSize = PageSize {
        width_in: 8.5,
        height_in: 14.0,
    };

    /// ISO A3, 297 x 420 mm.
    pub const A3: PageSize = PageSize {
        width_in: 297.0 / MM_PER_INCH,
        height_in: 420.0 / MM_PER_INCH,
    };

    /// ISO A4, 210 x 297 mm.
    pub const A4: PageSize = PageSize {
        width_in: 210.0 / MM_PER_INCH,
        height_in: 297.0 / MM_PER_INCH,
    };

    /// ISO A5, 148 x 210 mm.
    pub const A5: PageSize = PageSize {
        width_in: 148.0 / MM_PER_INCH,
        height_in: 210.0 / MM_PER_INCH,
    };

    /// Named presets, in display order.
    pub const PRESETS: &'static [(&'static str, PageSize)] = &[
        ("letter", PageSize::LETTER),
        ("legal", PageSize::LEGAL),
        ("a3", PageSize::A3),
        ("a4", PageSize::A4),
        ("a5", PageSize::A5),
    ];

    /// Creates a page size from inches.
    pub fn custom_inches(width_in: f64, height_in: f64) -> Self {
        Self {
            width_in,
            height_in,
        }
    }

    /// Looks up a preset by case-insensitive name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::PRESETS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, size)| size)
    }

    /// Returns this page turned sideways (long edge horizontal).
    pub fn landscape(self) -> Self {
        if self.width_in >= self.height_in {
            self
        } else {
            Self {
                width_in: self.height_in,
                height_in: self.width_in,
            }
        }
    }

    /// Returns the page width and height in layout units.
    pub fn to_units(&self, resolution: Resolution) -> (f64, f64) {
        (
            resolution.inches(self.width_in),
            resolution.inches(self.height_in),
        )
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::LETTER
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_resolution_conversion() {
        let res = Resolution::SCREEN;
        assert_relative_eq!(res.inches(8.5), 816.0);
        assert_relative_eq!(res.millimeters(25.4), 96.0);
        assert_relative_eq!(res.to_inches(48.0), 0.5);
        assert_eq!(Resolution::new(0.0).to_inches(10.0), 0.0);
    }

    #[test]
    fn test_page_presets() {
        let a4 = PageSize::from_name("A4").unwrap();
        assert_relative_eq!(a4.width_in * MM_PER_INCH, 210.0, epsilon = 1e-9);
        assert!(PageSize::from_name("tabloid").is_none());

        let (w, h) = PageSize::LETTER.to_units(Resolution::new(300.0));
        assert_relative_eq!(w, 2550.0);
        assert_relative_eq!(h, 3300.0);
    }

    #[test]
    fn test_landscape() {
        let land = PageSize::LETTER.landscape();
        assert_eq!(land.width_in, 11.0);
        assert_eq!(land.height_in, 8.5);
        assert_eq!(land.landscape(), land);
    }
}
