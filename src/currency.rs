use serde::{Deserialize, Serialize};
use sys_locale::get_locale;

/// Display currency. The calculation pipeline is INR-only; conversion
/// happens at formatting time with fixed indicative rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Inr,
    Usd,
    Eur,
}

impl Currency {
    /// Indicative conversion rate from INR.
    pub fn rate_from_inr(self) -> f64 {
        match self {
            Currency::Inr => 1.0,
            Currency::Usd => 0.012,
            Currency::Eur => 0.011,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }
}

/// Converts an INR amount to the display currency.
pub fn from_inr(amount_inr: f64, to: Currency) -> f64 {
    amount_inr * to.rate_from_inr()
}

/// Parses a currency code or symbol.
pub fn parse_currency(s: &str) -> Option<Currency> {
    match s.trim().to_lowercase().as_str() {
        "inr" | "rs" | "₹" => Some(Currency::Inr),
        "usd" | "$" => Some(Currency::Usd),
        "eur" | "€" => Some(Currency::Eur),
        _ => None,
    }
}

/// Default display currency for a BCP 47 locale tag.
pub fn currency_for_locale(tag: &str) -> Currency {
    let lower = tag.to_lowercase();
    if lower.ends_with("-in") || lower.starts_with("hi") {
        return Currency::Inr;
    }
    if lower.ends_with("-us") {
        return Currency::Usd;
    }
    const EURO_LANGS: [&str; 10] = ["de", "fr", "es", "it", "nl", "pt", "fi", "el", "sk", "sl"];
    if EURO_LANGS.iter().any(|l| lower.starts_with(l)) {
        return Currency::Eur;
    }
    // Vendor home market.
    Currency::Inr
}

/// Default display currency from the system locale.
pub fn locale_default() -> Currency {
    match get_locale() {
        Some(tag) => currency_for_locale(&tag),
        None => Currency::Inr,
    }
}

/// Formats an INR amount in the display currency with a symbol and
/// thousands separators, rounded to whole units. Zero and non-finite
/// amounts render as the "-" placeholder.
pub fn format_money(amount_inr: f64, currency: Currency) -> String {
    if !amount_inr.is_finite() || amount_inr == 0.0 {
        return "-".to_string();
    }
    let converted = from_inr(amount_inr, currency);
    format!("{} {}", currency.symbol(), group_thousands(converted))
}

/// Like [`format_money`] but flags the figure as indicative.
pub fn format_money_approx(amount_inr: f64, currency: Currency) -> String {
    let formatted = format_money(amount_inr, currency);
    if formatted == "-" {
        formatted
    } else {
        format!("{formatted} (approx)")
    }
}

fn group_thousands(value: f64) -> String {
    let rounded = value.round() as i128;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0 {
        format!("-{out}")
    } else {
        out
    }
}
