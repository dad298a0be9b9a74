use std::fmt::Display;

use clap::Args;

/// Exchange rates, settable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Args)]
pub struct CurrencyConverter {
    /// Euro received for one US dollar.
    #[clap(long, value_parser, default_value_t = 0.85)]
    pub usd_to_euro: f64,

    /// US dollars received for one euro.
    #[clap(long, value_parser, default_value_t = 1.18)]
    pub euro_to_usd: f64,

    /// Indian rupees received for one US dollar.
    #[clap(long, value_parser, default_value_t = 85.0)]
    pub usd_to_inr: f64,

    /// Euro received for one Indian rupee.
    #[clap(long, value_parser, default_value_t = 0.0099)]
    pub inr_to_euro: f64,
}

impl Default for CurrencyConverter {
    fn default() -> Self {
        CurrencyConverter {
            usd_to_euro: 0.85,
            euro_to_usd: 1.18,
            usd_to_inr: 85.0,
            inr_to_euro: 0.0099,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    UsdToEuro,
    EuroToUsd,
    UsdToInr,
    InrToEuro,
}

impl Conversion {
    /// (from, to) unit labels as printed next to amounts.
    pub fn units(self) -> (&'static str, &'static str) {
        match self {
            Conversion::UsdToEuro => ("USD", "Euro"),
            Conversion::EuroToUsd => ("Euro", "USD"),
            Conversion::UsdToInr => ("USD", "Rs"),
            Conversion::InrToEuro => ("Rs", "Euro"),
        }
    }
}

impl CurrencyConverter {
    pub fn rate(&self, conversion: Conversion) -> f64 {
        match conversion {
            Conversion::UsdToEuro => self.usd_to_euro,
            Conversion::EuroToUsd => self.euro_to_usd,
            Conversion::UsdToInr => self.usd_to_inr,
            Conversion::InrToEuro => self.inr_to_euro,
        }
    }

    pub fn convert(&self, conversion: Conversion, amount: f64) -> f64 {
        amount * self.rate(conversion)
    }
}

impl Display for CurrencyConverter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Current Conversion Rates:")?;
        writeln!(f, "1 USD = {} Euro", self.usd_to_euro)?;
        writeln!(f, "1 Euro = {} USD", self.euro_to_usd)?;
        writeln!(f, "1 USD = Rs {}", self.usd_to_inr)?;
        write!(f, "1 Rs = {} Euro", self.inr_to_euro)
    }
}
