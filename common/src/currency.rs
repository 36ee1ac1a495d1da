/// Format an amount of roubles the way the menu shows prices.
pub fn format_amount(amount: u64) -> String {
    format!("{amount}₽")
}

/// Price with a leading plus, for add-on surcharges.
pub fn format_surcharge(amount: u64) -> String {
    format!("+{amount}₽")
}
