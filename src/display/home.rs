//! Care home display formatting
//!
//! Formats the catalogue for terminal output in table and detail views.

use crate::models::CareHome;

use super::format::truncate;

/// Format the catalogue as a table
pub fn format_home_list(homes: &[CareHome], symbol: &str) -> String {
    if homes.is_empty() {
        return "No care homes found.".to_string();
    }

    let key_width = homes.iter().map(|h| h.key.len()).max().unwrap_or(3).max(3);
    let name_width = homes.iter().map(|h| h.name.len()).max().unwrap_or(4).max(4);
    let location_width = homes
        .iter()
        .map(|h| h.location.len())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<key_width$}  {:<name_width$}  {:<location_width$}  {:>10}  {:<20}  {}\n",
        "Key", "Name", "Location", "Weekly", "CQC", "Specialties",
    ));
    output.push_str(&format!(
        "{:-<key_width$}  {:-<name_width$}  {:-<location_width$}  {:->10}  {:-<20}  {:-<11}\n",
        "", "", "", "", "", "",
    ));

    for home in homes {
        output.push_str(&format!(
            "{:<key_width$}  {:<name_width$}  {:<location_width$}  {:>10}  {:<20}  {}\n",
            home.key,
            home.name,
            home.location,
            home.weekly_fee.format_with_symbol(symbol),
            home.cqc_rating.to_string(),
            truncate(&home.specialties.join(", "), 40),
        ));
    }

    output
}

/// Format a single care home's pricing and details
pub fn format_home_details(home: &CareHome, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", home.name));
    output.push_str(&format!("  Key:              {}\n", home.key));
    output.push_str(&format!("  Location:         {}\n", home.location));
    output.push_str(&format!("  CQC Rating:       {}\n", home.cqc_rating));
    if let Some(date) = home.last_inspection {
        output.push_str(&format!("  Last Inspection:  {}\n", date.format("%d %B %Y")));
    }
    if !home.specialties.is_empty() {
        output.push_str(&format!("  Specialties:      {}\n", home.specialties.join(", ")));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Weekly Fee:       {}\n",
        home.weekly_fee.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Annual Base:      {}\n",
        home.annual_base().format_whole(symbol)
    ));
    output.push_str(&format!(
        "  Registration Fee: {}\n",
        home.registration_fee.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Deposit:          {} ({} weeks, refundable)\n",
        home.deposit().format_with_symbol(symbol),
        home.deposit_weeks
    ));

    output.push('\n');
    output.push_str("  Monthly Extras:\n");
    output.push_str(&format!(
        "    Activities:     {}\n",
        home.activities.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "    Medical:        {}\n",
        home.medical.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "    Transport:      {}\n",
        home.transport.format_with_symbol(symbol)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::default_catalogue;

    #[test]
    fn test_format_home_list() {
        let homes = default_catalogue();
        let output = format_home_list(&homes, "£");

        assert!(output.contains("manor_house"));
        assert!(output.contains("Metchley Manor Care Home"));
        assert!(output.contains("£1,200.00"));
        assert_eq!(output.lines().count(), homes.len() + 2);
    }

    #[test]
    fn test_format_empty_list() {
        assert_eq!(format_home_list(&[], "£"), "No care homes found.");
    }

    #[test]
    fn test_format_home_details() {
        let home = default_catalogue().remove(0);
        let output = format_home_details(&home, "£");

        assert!(output.contains("Manor House Care Home"));
        assert!(output.contains("£62,400"));
        assert!(output.contains("£7,200.00 (6 weeks, refundable)"));
        assert!(output.contains("15 March 2024"));
    }
}
